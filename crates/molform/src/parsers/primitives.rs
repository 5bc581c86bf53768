use nom::{
    character::complete::{char, digit1, satisfy},
    combinator::{cut, not, opt, recognize},
    sequence::{pair, preceded},
};

use crate::Count;

use super::errors::{FormulaErrorKind, ParseFailure, ParseResult, expect};

/// uppercase
///   = "A" | "B" | "C" | "D" | "E" | "F" | "G"
///   | "H" | "I" | "J" | "K" | "L" | "M" | "N"
///   | "O" | "P" | "Q" | "R" | "S" | "T" | "U"
///   | "V" | "W" | "X" | "Y" | "Z"
///   ;
pub fn uppercase(i: &str) -> ParseResult<char> {
    satisfy(|c| c.is_ascii_uppercase())(i)
}

/// lowercase
///   = "a" | "b" | "c" | "d" | "e" | "f" | "g"
///   | "h" | "i" | "j" | "k" | "l" | "m" | "n"
///   | "o" | "p" | "q" | "r" | "s" | "t" | "u"
///   | "v" | "w" | "x" | "y" | "z"
///   ;
pub fn lowercase(i: &str) -> ParseResult<char> {
    satisfy(|c| c.is_ascii_lowercase())(i)
}

/// Element = uppercase , [ lowercase ] ;
pub fn element_symbol(i: &str) -> ParseResult<&str> {
    let parser = recognize(pair(uppercase, opt(lowercase)));
    expect(parser, FormulaErrorKind::ExpectedElement)(i)
}

/// Count = digit - "0" , { digit } ;
pub fn count(i: &str) -> ParseResult<Count> {
    let not_zero = expect(
        cut(not(char('0'))),
        FormulaErrorKind::ExpectedNoLeadingZero,
    );
    let (rest, digits) = preceded(not_zero, digit1)(i)?;
    let count = digits.parse().ok().and_then(Count::new).ok_or_else(|| {
        nom::Err::Failure(ParseFailure::new(
            i,
            digits.len(),
            FormulaErrorKind::CountOverflow,
        ))
    })?;
    Ok((rest, count))
}
