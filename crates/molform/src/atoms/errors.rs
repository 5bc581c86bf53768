use ahash::HashMap;
use itertools::Itertools;
use miette::Diagnostic;
use thiserror::Error;

use crate::{Isotope, MassNumber};

#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
pub enum AtomicDatabaseError {
    #[diagnostic(help("list at least one isotope, like `isotope 12 \"12\" \"0.9893\"`"))]
    #[error("{1} ({0}) has no isotopes")]
    NoIsotopes(String, String),

    #[error("the element {0:?} is listed more than once")]
    DuplicateElement(String),

    #[error("{0}-{1} is listed more than once")]
    DuplicateIsotope(String, u32),

    #[error("the natural abundance of {0}-{1} must be greater than 0 and no more than 1")]
    Abundance(String, u32),
}

#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
pub enum AtomicLookupError {
    #[diagnostic(help("double-check for typos, or add a new entry to the atomic database"))]
    #[error("the element {0:?} could not be found in the supplied atomic database")]
    Element(String),

    #[diagnostic(help(
        "only elements with natural abundance data have a standard atomic mass, so {0} can't be used here"
    ))]
    #[error("no natural abundance data could be found for {1} ({0}), though the following isotopes were found: {2}")]
    Abundance(String, String, String),
}

impl AtomicLookupError {
    pub(crate) fn element(symbol: &str) -> Self {
        Self::Element(symbol.to_owned())
    }

    pub(crate) fn abundance(
        symbol: &str,
        name: &str,
        isotopes: &HashMap<MassNumber, Isotope>,
    ) -> Self {
        let mass_numbers = isotopes.keys().sorted().join(", ");
        Self::Abundance(
            symbol.to_owned(),
            name.to_owned(),
            format!("[{mass_numbers}]"),
        )
    }
}
