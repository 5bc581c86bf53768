use miette::Diagnostic;
use thiserror::Error;

pub use crate::parsers::errors::FormulaError;

pub type Result<T, E = MolformError> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
pub enum MolformError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Formula {
        #[from]
        error: FormulaError,
    },
}
