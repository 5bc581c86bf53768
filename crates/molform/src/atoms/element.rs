use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

use rust_decimal::Decimal;

use crate::{Element, Isotope, Mass, Massive};

use super::{
    atomic_database::{AtomicDatabase, ElementDescription},
    errors::AtomicLookupError,
};

impl<'a> Element<'a> {
    pub(crate) fn new(
        db: &'a AtomicDatabase,
        symbol: impl AsRef<str>,
    ) -> Result<Self, AtomicLookupError> {
        let symbol = symbol.as_ref();
        let (symbol, ElementDescription { name, isotopes }) = db
            .elements
            .get_key_value(symbol)
            .ok_or_else(|| AtomicLookupError::element(symbol))?;

        if !isotopes.values().any(|i| i.abundance.is_some()) {
            return Err(AtomicLookupError::abundance(symbol, name, isotopes));
        }

        Ok(Self {
            symbol,
            name,
            isotopes,
        })
    }

    pub const fn symbol(&self) -> &'a str {
        self.symbol
    }

    pub const fn name(&self) -> &'a str {
        self.name
    }

    fn isotope_abundances(&self) -> impl Iterator<Item = (&Isotope, Decimal)> {
        self.isotopes
            .values()
            .filter_map(|i| i.abundance.map(|a| (i, a)))
    }

    // NOTE: Carbon and hydrogen lead, then everything else is alphabetical
    fn hill_rank(&self) -> (u8, &'a str) {
        match self.symbol {
            "C" => (0, ""),
            "H" => (1, ""),
            symbol => (2, symbol),
        }
    }
}

impl Display for Element<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Element<'_> {}

impl Ord for Element<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hill_rank().cmp(&other.hill_rank())
    }
}

impl PartialOrd for Element<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Element<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl Massive for Element<'_> {
    fn monoisotopic_mass(&self) -> Mass {
        // SAFETY: `Element::new()` guarantees at least one isotope with a natural abundance
        let (isotope, _) = self
            .isotope_abundances()
            .max_by_key(|&(_, abundance)| abundance)
            .unwrap();
        Mass(isotope.relative_mass)
    }

    fn average_mass(&self) -> Mass {
        let (weighted_mass, total_abundance) = self.isotope_abundances().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(mass, total), (isotope, abundance)| {
                (mass + isotope.relative_mass * abundance, total + abundance)
            },
        );
        Mass(weighted_mass / total_abundance)
    }
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;
    use rust_decimal_macros::dec;

    use crate::{NominalMass, testing_tools::assert_miette_snapshot};

    use super::*;

    static DB: Lazy<AtomicDatabase> = Lazy::new(AtomicDatabase::default);

    #[test]
    fn new_element() {
        // Sucessfully lookup elements that exist
        let c = Element::new(&DB, "C").unwrap();
        assert_eq!(c.symbol(), "C");
        assert_eq!(c.name(), "Carbon");
        assert_eq!(c.isotopes.len(), 2);
        let cl = Element::new(&DB, "Cl").unwrap();
        assert_eq!(cl.name(), "Chlorine");
        // Fail to lookup elements that don't exist
        assert_miette_snapshot!(
            Element::new(&DB, "R"),
            @r#"the element "R" could not be found in the supplied atomic database | help: double-check for typos, or add a new entry to the atomic database"#
        );
        // Fail to lookup elements without any natural abundance
        assert_miette_snapshot!(
            Element::new(&DB, "Tc"),
            @"no natural abundance data could be found for Technetium (Tc), though the following isotopes were found: [97, 98, 99] | help: only elements with natural abundance data have a standard atomic mass, so Tc can't be used here"
        );
    }

    #[test]
    fn element_display() {
        let c = Element::new(&DB, "C").unwrap();
        assert_eq!(c.to_string(), "C");
        let br = Element::new(&DB, "Br").unwrap();
        assert_eq!(br.to_string(), "Br");
    }

    #[test]
    fn element_hill_order() {
        let element = |symbol: &str| Element::new(&DB, symbol).unwrap();
        let mut elements: Vec<_> = ["O", "Br", "H", "N", "C", "Cl"]
            .into_iter()
            .map(element)
            .collect();
        elements.sort();
        let symbols: Vec<_> = elements.iter().map(Element::symbol).collect();
        assert_eq!(symbols, ["C", "H", "Br", "Cl", "N", "O"]);
    }

    #[test]
    fn element_monoisotopic_mass() {
        let c = Element::new(&DB, "C").unwrap().monoisotopic_mass();
        assert_eq!(c, Mass(dec!(12)));
        let cl = Element::new(&DB, "Cl").unwrap().monoisotopic_mass();
        assert_eq!(cl, Mass(dec!(34.968852682)));
        let se = Element::new(&DB, "Se").unwrap().monoisotopic_mass();
        assert_eq!(se, Mass(dec!(79.9165218)));
    }

    #[test]
    fn element_average_mass() {
        let c = Element::new(&DB, "C").unwrap().average_mass();
        assert_eq!(c, Mass(dec!(12.010735896735249)));
        let cl = Element::new(&DB, "Cl").unwrap().average_mass();
        assert_eq!(cl.nominal(), NominalMass(35));
        let br = Element::new(&DB, "Br").unwrap().average_mass();
        assert_eq!(br.nominal(), NominalMass(80));
    }
}
