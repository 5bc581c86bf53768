use std::iter::Sum;

use crate::{Mass, NominalMass};

impl Mass {
    /// Rounds to the nearest whole dalton, with exact halves going to the even neighbour
    pub fn nominal(self) -> NominalMass {
        // NOTE: `Decimal::round()` uses banker's rounding; masses are never negative, so the fallback is unreachable
        NominalMass(u64::try_from(self.0.round()).unwrap_or_default())
    }
}

impl NominalMass {
    /// Rounds a floating-point peak position half-to-even, returning `None` for negative or non-finite values
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn nearest(mz: f64) -> Option<Self> {
        let rounded = mz.round_ties_even();
        (rounded.is_finite() && rounded >= 0.0).then(|| Self(rounded as u64))
    }
}

impl Sum for Mass {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |total, mass| total + mass)
    }
}
