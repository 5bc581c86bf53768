use std::{io, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum JcampError {
    #[diagnostic(help("check the spelling of the file name, and that you're allowed to read it"))]
    #[error("failed to read the JCAMP-DX file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[diagnostic(help(
        "fragments can only be searched for when the parent molecule is known, so add a line like \
        ##MOLFORM=C6 H6 to the file"
    ))]
    #[error("the JCAMP-DX file doesn't contain a ##MOLFORM= record")]
    MissingMolform,

    #[error("the JCAMP-DX file doesn't contain a ##PEAKTABLE=, ##XYPOINTS=, or ##XYDATA= record")]
    MissingPeaks,

    #[diagnostic(help("(X++(Y..Y)) tables need ##FIRSTX=, ##LASTX=, and ##NPOINTS= to space their y values"))]
    #[error("the JCAMP-DX file doesn't contain a ##{0}= record")]
    MissingHeader(&'static str),

    #[diagnostic(help(
        "only uncompressed (XY..XY) and (X++(Y..Y)) tables are supported, try exporting the spectrum as a peak table"
    ))]
    #[error("unsupported peak table format {table:?}")]
    UnsupportedTable {
        table: String,
        #[source_code]
        src: NamedSource,
        #[label("found on line {line}")]
        span: SourceSpan,
        line: usize,
    },

    #[error("expected a number, but found {value:?}")]
    InvalidNumber {
        value: String,
        #[source_code]
        src: NamedSource,
        #[label("on line {line}")]
        span: SourceSpan,
        line: usize,
    },

    #[diagnostic(help("(XY..XY) tables must contain an even number of values"))]
    #[error("the x value {value:?} has no matching y value")]
    UnpairedValue {
        value: String,
        #[source_code]
        src: NamedSource,
        #[label("missing a y value")]
        span: SourceSpan,
    },
}
