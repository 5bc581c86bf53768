//! Chemical formulae, their masses, and the atomic data needed to compute them

pub mod atoms;
pub mod errors;
pub mod parsers;
#[cfg(test)]
mod testing_tools;

use std::{collections::BTreeMap, num::NonZeroU32};

// External Crate Imports
use ahash::HashMap;
use derive_more::{Add, Display, From, Into};
use rust_decimal::Decimal;

pub use atoms::atomic_database::AtomicDatabase;
pub use errors::Result;

// NOTE: For the types in this module, 'a lifetimes indicate references to the AtomicDatabase
// ---------------------------------------------------------------------------------------------------------------------

/// A mapping from elements to their (non-zero) counts, kept in Hill order: carbon, then hydrogen, then every other
/// element alphabetically
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ChemicalFormula<'a> {
    elements: BTreeMap<Element<'a>, Count>,
}

// NOTE: `Eq`, `Ord`, and `Hash` are implemented by hand in `atoms::element`, and only look at the element's symbol
#[derive(Copy, Clone, Debug)]
pub struct Element<'a> {
    symbol: &'a str,
    name: &'a str,
    isotopes: &'a HashMap<MassNumber, Isotope>,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Count(NonZeroU32);

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, From, Into)]
pub struct MassNumber(u32);

#[derive(Clone, Eq, PartialEq, Debug)]
struct Isotope {
    relative_mass: Decimal,
    abundance: Option<Decimal>,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display, From, Into, Add)]
pub struct Mass(Decimal);

/// A mass rounded to the nearest whole dalton
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display, From, Into)]
pub struct NominalMass(u64);

// =====================================================================================================================

pub trait Massive {
    fn monoisotopic_mass(&self) -> Mass;
    fn average_mass(&self) -> Mass;

    /// The standard (average) mass rounded half-to-even, which is the mass compared against spectral peaks
    fn nominal_mass(&self) -> NominalMass {
        self.average_mass().nominal()
    }
}

// Blanket impls

macro_rules! massive_ref_impls {
    ($($ref_type:ty),+ $(,)?) => {
        $(
            impl<T: Massive> Massive for $ref_type {
                fn monoisotopic_mass(&self) -> Mass {
                    (**self).monoisotopic_mass()
                }

                fn average_mass(&self) -> Mass {
                    (**self).average_mass()
                }
            }
        )+
    };
}

massive_ref_impls!(&T, &mut T, Box<T>);
