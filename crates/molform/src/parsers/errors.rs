use std::fmt;

use miette::{Diagnostic, LabeledSpan, SourceCode, SourceSpan};
use nom::{
    Err, IResult, Offset, Parser,
    error::{ErrorKind, ParseError},
};
use thiserror::Error;

use crate::atoms::errors::AtomicLookupError;

pub type ParseResult<'a, O> = IResult<&'a str, O, ParseFailure<'a>>;

// Final Errors ========================================================================================================

/// A formula that couldn't be parsed, along with the span of the offending region
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{kind}")]
pub struct FormulaError {
    formula: String,
    span: SourceSpan,
    kind: FormulaErrorKind,
}

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum FormulaErrorKind {
    #[error("expected an element symbol (like Au) or a parenthesised group (like (CH3))")]
    ExpectedElement,

    #[diagnostic(help(
        "a 0 value doesn't make sense here, if you've mistakenly included a leading zero, like \
        NH02, try just NH2 instead"
    ))]
    #[error("counts cannot start with 0")]
    ExpectedNoLeadingZero,

    #[diagnostic(help("you've probably forgotten to close an earlier '(' bracket"))]
    #[error("expected ')' to close a group")]
    ExpectedGroupEnd,

    #[error("the number of atoms is too large to be represented")]
    CountOverflow,

    #[diagnostic(transparent)]
    #[error(transparent)]
    Lookup(Box<AtomicLookupError>),

    #[diagnostic(help(
        "this is an internal error that you shouldn't ever see! If you have gotten this error, \
        then please report it as a bug!"
    ))]
    #[error("internal `nom` error: {0:?}")]
    NomError(ErrorKind),

    #[diagnostic(help(
        "check the unparsed region for errors, or remove it from the rest of the formula"
    ))]
    #[error("could not interpret the full input as a valid chemical formula")]
    Incomplete,
}

impl FormulaError {
    pub fn kind(&self) -> &FormulaErrorKind {
        &self.kind
    }
}

impl FormulaErrorKind {
    fn label(&self) -> Option<&'static str> {
        Some(match self {
            Self::Lookup(e) => match **e {
                AtomicLookupError::Element(..) => "element not found",
                AtomicLookupError::Abundance(..) => "no natural abundance",
            },
            Self::ExpectedElement => "expected element",
            Self::ExpectedNoLeadingZero => "expected non-zero",
            Self::ExpectedGroupEnd => "expected ')'",
            Self::CountOverflow => "count too large",
            Self::Incomplete => "input was valid up until this point",
            Self::NomError(_) => "the region that triggered this bug!",
        })
    }
}

impl Diagnostic for FormulaError {
    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.formula)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.help()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = self.kind.label()?;
        let labeled_span = LabeledSpan::new_with_span(Some(label.to_owned()), self.span);
        Some(Box::new(std::iter::once(labeled_span)))
    }
}

// Intermediate Parser Errors ==========================================================================================

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseFailure<'a> {
    input: &'a str,
    length: usize,
    kind: FormulaErrorKind,
}

impl<'a> ParseFailure<'a> {
    pub(crate) const fn new(input: &'a str, length: usize, kind: FormulaErrorKind) -> Self {
        Self {
            input,
            length,
            kind,
        }
    }

    pub(crate) fn lookup(input: &'a str, length: usize, error: AtomicLookupError) -> Self {
        Self::new(input, length, FormulaErrorKind::Lookup(Box::new(error)))
    }

    pub(crate) fn into_final_error(self, full_input: &str) -> FormulaError {
        let start = full_input.offset(self.input);
        // NOTE: The additional space is added so that labels can point to the end of an input
        let formula = format!("{full_input} ");
        FormulaError {
            formula,
            span: SourceSpan::from(start..start + self.length),
            kind: self.kind,
        }
    }
}

impl<'a> ParseError<&'a str> for ParseFailure<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self::new(input, 0, kind.into())
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<ErrorKind> for FormulaErrorKind {
    fn from(value: ErrorKind) -> Self {
        match value {
            ErrorKind::Eof => Self::Incomplete,
            kind => Self::NomError(kind),
        }
    }
}

/// Replaces any error from `parser` with `kind`, pointing at the input where `parser` started
pub fn expect<'a, O, P>(
    mut parser: P,
    kind: FormulaErrorKind,
) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    P: Parser<&'a str, O, ParseFailure<'a>>,
{
    move |input| {
        parser.parse(input).map_err(|e| {
            let failure = ParseFailure::new(input, 0, kind.clone());
            match e {
                Err::Error(_) => Err::Error(failure),
                Err::Failure(_) => Err::Failure(failure),
                Err::Incomplete(needed) => Err::Incomplete(needed),
            }
        })
    }
}
