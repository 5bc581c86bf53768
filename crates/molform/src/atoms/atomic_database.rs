//! The elements and isotopes every mass is calculated from, read from a KDL document like:
//!
//! ```kdl
//! elements {
//!   C "Carbon" {
//!     isotope 12 "12" "0.9893"
//!     isotope 13 "13.00335483507" "0.0107"
//!   }
//! }
//! ```
//!
//! Masses and abundances are quoted so that they can be read without any loss of precision.

// Standard Library Imports
use std::{collections::hash_map::Entry, str::FromStr};

// External Crate Imports
use ahash::HashMap;
use knuffel::{
    Decode, DecodeScalar,
    ast::{Literal, TypeName},
    decode::{Context, Kind},
    errors::{DecodeError, ExpectedType},
    span::Spanned,
    traits::ErrorSpan,
};
use miette::{Diagnostic, Result};
use rust_decimal::Decimal;
use thiserror::Error;

// Local Crate Imports
use super::errors::{AtomicDatabaseError, AtomicLookupError};
use crate::{Element, Isotope, Mass, MassNumber, Massive};

pub const DEFAULT_KDL: &str = include_str!("../../atomic_database.kdl");

// Public API ==========================================================================================================

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AtomicDatabase {
    pub(crate) elements: HashMap<String, ElementDescription>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct ElementDescription {
    pub(crate) name: String,
    pub(crate) isotopes: HashMap<MassNumber, Isotope>,
}

impl AtomicDatabase {
    pub fn new(file_name: impl AsRef<str>, kdl_text: impl AsRef<str>) -> Result<Self> {
        let ElementTableKdl { elements: entries } =
            knuffel::parse(file_name.as_ref(), kdl_text.as_ref())?;

        let mut elements = HashMap::default();
        for entry in entries {
            let (symbol, description) = entry.into_description()?;
            match elements.entry(symbol) {
                Entry::Occupied(duplicate) => {
                    let symbol = duplicate.key().clone();
                    return Err(AtomicDatabaseError::DuplicateElement(symbol).into());
                }
                Entry::Vacant(slot) => {
                    slot.insert(description);
                }
            }
        }
        Ok(Self { elements })
    }

    /// The abundance-weighted mass of an element, as listed in the periodic table
    pub fn standard_mass(&self, symbol: impl AsRef<str>) -> Result<Mass, AtomicLookupError> {
        Element::new(self, symbol).map(|e| e.average_mass())
    }

    pub fn contains(&self, symbol: impl AsRef<str>) -> bool {
        self.elements.contains_key(symbol.as_ref())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for AtomicDatabase {
    fn default() -> Self {
        // SAFETY: The embedded table is checked by `load_embedded_table()` below
        Self::new("atomic_database.kdl", DEFAULT_KDL).unwrap()
    }
}

// KDL File Schema =====================================================================================================

#[derive(Debug, Decode)]
struct ElementTableKdl {
    #[knuffel(child, unwrap(children))]
    elements: Vec<ElementKdl>,
}

#[derive(Debug, Decode)]
struct ElementKdl {
    #[knuffel(node_name)]
    symbol: ElementSymbol,
    #[knuffel(argument)]
    name: String,
    #[knuffel(children(name = "isotope"))]
    isotopes: Vec<IsotopeKdl>,
}

#[derive(Debug, Decode)]
struct IsotopeKdl {
    #[knuffel(argument)]
    mass_number: u32,
    #[knuffel(argument)]
    relative_mass: ExactDecimal,
    #[knuffel(argument)]
    abundance: Option<ExactDecimal>,
}

// Exact Decimals ======================================================================================================

/// A decimal read from a quoted string (or a plain integer), since unquoted KDL decimals only convert to `f64`
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
struct ExactDecimal(Decimal);

impl FromStr for ExactDecimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(['e', 'E']) {
            Decimal::from_scientific(s)
        } else {
            Decimal::from_str_exact(s)
        }
        .map(Self)
    }
}

impl<S: ErrorSpan> DecodeScalar<S> for ExactDecimal {
    fn type_check(type_name: &Option<Spanned<TypeName, S>>, ctx: &mut Context<S>) {
        if let Some(type_name) = type_name {
            ctx.emit_error(DecodeError::TypeName {
                span: type_name.span().clone(),
                found: Some(TypeName::clone(type_name)),
                expected: ExpectedType::no_type(),
                rust_type: "Decimal",
            });
        }
    }

    fn raw_decode(
        value: &Spanned<Literal, S>,
        ctx: &mut Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let decoded: Result<Self, DecodeError<S>> = match &**value {
            Literal::String(digits) => digits
                .parse::<Self>()
                .map_err(|e| DecodeError::conversion(value, e)),
            Literal::Int(integer) => u64::try_from(integer)
                .map(|n| Self(Decimal::from(n)))
                .map_err(|e| DecodeError::conversion(value, e)),
            Literal::Decimal(_) => Err(DecodeError::unsupported(
                value,
                "unquoted decimals lose precision, so write this as a string, like \"1.007825\"",
            )),
            _ => Err(DecodeError::scalar_kind(Kind::String, value)),
        };
        Ok(decoded.unwrap_or_else(|error| {
            ctx.emit_error(error);
            Self::default()
        }))
    }
}

// Element Symbol Validation ===========================================================================================

#[derive(Debug)]
struct ElementSymbol(String);

impl FromStr for ElementSymbol {
    type Err = InvalidElementSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(first), None, None) if first.is_ascii_uppercase() => Ok(Self(s.to_owned())),
            (Some(first), Some(second), None)
                if first.is_ascii_uppercase() && second.is_ascii_lowercase() =>
            {
                Ok(Self(s.to_owned()))
            }
            _ => Err(InvalidElementSymbolError(s.to_owned())),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Diagnostic, Error)]
#[error(
    "expected a single uppercase ASCII letter optionally followed by a lowercase ASCII letter, got {0:?}"
)]
struct InvalidElementSymbolError(String);

// Validation Of Parsed Elements =======================================================================================

impl ElementKdl {
    fn into_description(self) -> Result<(String, ElementDescription), AtomicDatabaseError> {
        let Self {
            symbol: ElementSymbol(symbol),
            name,
            isotopes: isotope_entries,
        } = self;

        if isotope_entries.is_empty() {
            return Err(AtomicDatabaseError::NoIsotopes(symbol, name));
        }

        let mut isotopes = HashMap::default();
        for IsotopeKdl {
            mass_number,
            relative_mass,
            abundance,
        } in isotope_entries
        {
            let abundance = abundance.map(|ExactDecimal(a)| a);
            if abundance.is_some_and(|a| a <= Decimal::ZERO || a > Decimal::ONE) {
                return Err(AtomicDatabaseError::Abundance(symbol, mass_number));
            }

            let isotope = Isotope {
                relative_mass: relative_mass.0,
                abundance,
            };
            if isotopes.insert(MassNumber(mass_number), isotope).is_some() {
                return Err(AtomicDatabaseError::DuplicateIsotope(symbol, mass_number));
            }
        }

        Ok((symbol, ElementDescription { name, isotopes }))
    }
}

// Module Tests ========================================================================================================
