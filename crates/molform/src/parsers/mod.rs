pub(crate) mod chemical_formula;
pub mod errors;
pub mod primitives;

// Re-exports
pub use chemical_formula::chemical_formula;
