use std::{
    fmt::{self, Display, Formatter},
    num::NonZeroU32,
    ops::Mul,
};

use rust_decimal::Decimal;

use crate::{Count, Mass};

impl Count {
    pub(crate) fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    pub(crate) fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.get()).map(Self)
    }

    pub(crate) fn checked_mul(self, rhs: Self) -> Option<Self> {
        self.0.checked_mul(rhs.0).map(Self)
    }
}

impl Mul<Mass> for Count {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Self::Output {
        Mass(Decimal::from(self.get()) * rhs.0)
    }
}

impl Display for Count {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let count = self.get();
        if count > 1 {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

impl Default for Count {
    fn default() -> Self {
        Self(NonZeroU32::MIN)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn zero_is_not_a_count() {
        assert_eq!(Count::new(0), None);
        assert_eq!(Count::new(7).map(Count::get), Some(7));
        assert_eq!(Count::default().get(), 1);
    }

    #[test]
    fn count_arithmetic() {
        let two = Count::new(2).unwrap();
        let three = Count::new(3).unwrap();
        assert_eq!(two.checked_add(three), Count::new(5));
        assert_eq!(two.checked_mul(three), Count::new(6));
        let max = Count::new(u32::MAX).unwrap();
        assert_eq!(max.checked_add(two), None);
        assert_eq!(max.checked_mul(two), None);
        assert_eq!(three * Mass(dec!(1.5)), Mass(dec!(4.5)));
    }

    #[test]
    fn count_display() {
        assert_eq!(Count::default().to_string(), "");
        assert_eq!(Count::new(12).unwrap().to_string(), "12");
    }
}
