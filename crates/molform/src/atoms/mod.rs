pub mod atomic_database;
pub mod chemical_formula;
mod count;
mod element;
pub mod errors;
mod mass;
