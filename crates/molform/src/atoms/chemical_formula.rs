use std::fmt::{self, Display, Formatter};

// External Crate Imports
use rand::Rng;

// Local Crate Imports
use crate::{
    AtomicDatabase, ChemicalFormula, Count, Element, Mass, Massive, Result,
    parsers::chemical_formula::chemical_formula,
};

// Public API ==========================================================================================================

impl<'a> ChemicalFormula<'a> {
    pub fn new(db: &'a AtomicDatabase, formula: impl AsRef<str>) -> Result<Self> {
        chemical_formula(db, formula.as_ref()).map_err(Into::into)
    }

    /// Elements and their counts, in Hill order
    pub fn iter(&self) -> impl Iterator<Item = (Element<'a>, Count)> + '_ {
        self.elements.iter().map(|(&element, &count)| (element, count))
    }

    /// The number of atoms of `symbol`, or zero if the element is absent
    pub fn count(&self, symbol: impl AsRef<str>) -> u32 {
        let symbol = symbol.as_ref();
        self.iter()
            .find(|(element, _)| element.symbol() == symbol)
            .map_or(0, |(_, count)| count.get())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// True if no element appears more often here than it does in `parent`
    pub fn is_subformula_of(&self, parent: &Self) -> bool {
        self.elements
            .iter()
            .all(|(element, count)| parent.elements.get(element).is_some_and(|max| count <= max))
    }

    /// Draws an independent, uniform count in `0..=max` for every element of this formula, leaving out any element
    /// that drew zero. The result may be the empty formula.
    pub fn random_subformula<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let elements = self
            .iter()
            .filter_map(|(element, max)| {
                let drawn = rng.gen_range(0..=max.get());
                Count::new(drawn).map(|count| (element, count))
            })
            .collect();
        Self { elements }
    }
}

// Crate-Internal Construction =========================================================================================

impl<'a> ChemicalFormula<'a> {
    pub(crate) fn single(element: Element<'a>, count: Count) -> Self {
        Self {
            elements: [(element, count)].into(),
        }
    }

    /// Sums the counts of both formulae, returning `None` if any count would overflow
    pub(crate) fn checked_merge(mut self, other: Self) -> Option<Self> {
        for (element, count) in other.elements {
            let total = match self.elements.get(&element) {
                Some(&existing) => existing.checked_add(count)?,
                None => count,
            };
            self.elements.insert(element, total);
        }
        Some(self)
    }

    /// Multiplies every count by `multiplier`, returning `None` if any count would overflow
    pub(crate) fn checked_scale(mut self, multiplier: Count) -> Option<Self> {
        for count in self.elements.values_mut() {
            *count = count.checked_mul(multiplier)?;
        }
        Some(self)
    }
}

// Massive Trait Implementation ========================================================================================

impl Massive for ChemicalFormula<'_> {
    fn monoisotopic_mass(&self) -> Mass {
        self.mass(Element::monoisotopic_mass)
    }

    fn average_mass(&self) -> Mass {
        self.mass(Element::average_mass)
    }
}

// Display Trait Implementation ========================================================================================

impl Display for ChemicalFormula<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (element, count) in self.iter() {
            write!(f, "{element}{count}")?;
        }
        Ok(())
    }
}

// Private Helper Methods ==============================================================================================

impl<'a> ChemicalFormula<'a> {
    fn mass(&self, accessor: impl Fn(&Element<'a>) -> Mass) -> Mass {
        self.iter()
            .map(|(element, count)| count * accessor(&element))
            .sum()
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;
    use rand::{SeedableRng, rngs::StdRng};
    use rust_decimal_macros::dec;

    use crate::NominalMass;

    use super::*;

    static DB: Lazy<AtomicDatabase> = Lazy::new(AtomicDatabase::default);

    fn formula(formula: &str) -> ChemicalFormula<'static> {
        ChemicalFormula::new(&DB, formula).unwrap()
    }

    #[test]
    fn formula_display() {
        // Already in Hill order
        assert_eq!(formula("C6H6").to_string(), "C6H6");
        assert_eq!(formula("C2H6O").to_string(), "C2H6O");
        assert_eq!(formula("H2O").to_string(), "H2O");
        // Reordered into Hill order
        assert_eq!(formula("OH2").to_string(), "H2O");
        assert_eq!(formula("NaCl").to_string(), "ClNa");
        assert_eq!(formula("BrCH3").to_string(), "CH3Br");
        assert_eq!(formula("Cl3CH").to_string(), "CHCl3");
        // Whitespace, repeats, and groups are normalised away
        assert_eq!(formula("C6 H6").to_string(), "C6H6");
        assert_eq!(formula("CH3CH2OH").to_string(), "C2H6O");
        assert_eq!(formula("(CH3)3N").to_string(), "C3H9N");
        assert_eq!(formula("").to_string(), "");
    }

    #[test]
    fn formula_counts() {
        let ethanol = formula("CH3CH2OH");
        assert_eq!(ethanol.count("C"), 2);
        assert_eq!(ethanol.count("H"), 6);
        assert_eq!(ethanol.count("O"), 1);
        assert_eq!(ethanol.count("N"), 0);
        assert_eq!(ethanol.len(), 3);
        assert!(!ethanol.is_empty());
        assert!(formula("").is_empty());
    }

    #[test]
    fn formula_equality_is_structural() {
        assert_eq!(formula("CH3CH2OH"), formula("C2H6O"));
        assert_eq!(formula("HOCH2CH3"), formula("C2 H6 O"));
        // Same nominal mass, different formulae
        let co = formula("CO");
        let n2 = formula("N2");
        assert_eq!(co.nominal_mass(), n2.nominal_mass());
        assert_ne!(co, n2);
    }

    #[test]
    fn formula_masses() {
        assert_eq!(formula("C6H6").nominal_mass(), NominalMass(78));
        assert_eq!(formula("C2H6O").nominal_mass(), NominalMass(46));
        assert_eq!(formula("(CH3)3N").nominal_mass(), NominalMass(59));
        assert_eq!(formula("CHCl3").nominal_mass(), NominalMass(119));
        assert_eq!(formula("").nominal_mass(), NominalMass(0));
        assert_eq!(formula("C").average_mass(), Mass(dec!(12.010735896735249)));
        assert_eq!(formula("C6").monoisotopic_mass(), Mass(dec!(72)));
        // Mass computation is a pure function of the formula
        let benzene = formula("C6H6");
        assert_eq!(benzene.average_mass(), benzene.clone().average_mass());
    }

    #[test]
    fn organometallic_and_inorganic_masses() {
        let nominal = |f: &str| u64::from(formula(f).nominal_mass());
        assert_eq!(nominal("C8H20Ge"), 189);
        assert_eq!(nominal("C4H12Sn"), 179);
        assert_eq!(nominal("C2H6Te"), 158);
        assert_eq!(nominal("C10H10Ru"), 231);
        assert_eq!(nominal("C5H5TiCl3"), 219);
        assert_eq!(nominal("MoO3"), 144);
        assert_eq!(nominal("PtCl2"), 266);
        assert_eq!(nominal("WF6"), 298);
        assert_eq!(nominal("UF6"), 352);
        assert_eq!(nominal("BaSO4"), 233);
        assert_eq!(nominal("Xe"), 131);
        assert_eq!(nominal("Kr"), 84);
    }

    #[test]
    fn subformulae() {
        let parent = formula("C6H6O");
        assert!(formula("C6H6O").is_subformula_of(&parent));
        assert!(formula("CH").is_subformula_of(&parent));
        assert!(formula("").is_subformula_of(&parent));
        assert!(!formula("C7").is_subformula_of(&parent));
        assert!(!formula("CN").is_subformula_of(&parent));
    }

    #[test]
    fn random_subformulae_respect_bounds() {
        let parent = formula("C6H12O6");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let candidate = parent.random_subformula(&mut rng);
            assert!(candidate.is_subformula_of(&parent));
            // Zero draws are never stored
            assert!(candidate.iter().all(|(_, count)| count.get() > 0));
        }
    }

    #[test]
    fn random_subformulae_cover_extremes() {
        let parent = formula("CH2");
        let mut rng = StdRng::seed_from_u64(7);
        let candidates: Vec<_> = (0..500).map(|_| parent.random_subformula(&mut rng)).collect();
        // Both the empty "null" fragment and the full parent come up eventually
        assert!(candidates.iter().any(ChemicalFormula::is_empty));
        assert!(candidates.contains(&parent));
    }

    #[test]
    fn random_subformulae_are_reproducible() {
        let parent = formula("C8H10N4O2");
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| parent.random_subformula(&mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(1), draw(1));
        assert_ne!(draw(1), draw(2));
    }

    #[test]
    fn empty_parent_yields_empty_subformulae() {
        let parent = formula("");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(parent.random_subformula(&mut rng).is_empty());
    }
}
