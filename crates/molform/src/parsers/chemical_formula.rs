// External Crate Imports
use nom::{
    Finish, Offset,
    branch::alt,
    character::complete::{char, multispace0},
    combinator::{all_consuming, cut, map, opt},
    sequence::{delimited, pair},
};

// Local Crate Imports
use super::{
    errors::{FormulaError, FormulaErrorKind, ParseFailure, ParseResult, expect},
    primitives::{count, element_symbol},
};
use crate::{AtomicDatabase, ChemicalFormula, Count, Element};

// Public API ==========================================================================================================

/// Parses a complete formula, resolving every element symbol against `db`
pub fn chemical_formula<'a>(
    db: &'a AtomicDatabase,
    input: &str,
) -> Result<ChemicalFormula<'a>, FormulaError> {
    all_consuming(|i| formula(db, i))(input)
        .finish()
        .map(|(_, formula)| formula)
        .map_err(|e| e.into_final_error(input))
}

// Private Sub-Parsers =================================================================================================

/// Formula = { Whitespace } , { Group , { Whitespace } } ;
fn formula<'a, 's>(db: &'a AtomicDatabase, i: &'s str) -> ParseResult<'s, ChemicalFormula<'a>> {
    let (mut rest, _) = multispace0::<_, ParseFailure>(i)?;
    let mut formula = ChemicalFormula::default();
    loop {
        match group(db, rest) {
            Ok((remaining, group)) => {
                formula = formula
                    .checked_merge(group)
                    .ok_or_else(|| count_overflow(rest, remaining))?;
                (rest, _) = multispace0::<_, ParseFailure>(remaining)?;
            }
            Err(nom::Err::Error(_)) => return Ok((rest, formula)),
            Err(e) => return Err(e),
        }
    }
}

/// Group = ( Element | "(" , Formula , ")" ) , [ Count ] ;
fn group<'a, 's>(db: &'a AtomicDatabase, i: &'s str) -> ParseResult<'s, ChemicalFormula<'a>> {
    let single_element = map(
        |i| element(db, i),
        |element| ChemicalFormula::single(element, Count::default()),
    );
    let closing_bracket = expect(cut(char(')')), FormulaErrorKind::ExpectedGroupEnd);
    let nested_formula = delimited(char('('), |i| formula(db, i), closing_bracket);

    let (rest, (group, multiplier)) = pair(alt((single_element, nested_formula)), opt(count))(i)?;
    let group = match multiplier {
        Some(multiplier) => group
            .checked_scale(multiplier)
            .ok_or_else(|| count_overflow(i, rest))?,
        None => group,
    };
    Ok((rest, group))
}

/// Element = uppercase , [ lowercase ] ;
fn element<'a, 's>(db: &'a AtomicDatabase, i: &'s str) -> ParseResult<'s, Element<'a>> {
    let (rest, symbol) = element_symbol(i)?;
    let element = Element::new(db, symbol)
        .map_err(|e| nom::Err::Failure(ParseFailure::lookup(i, symbol.len(), e)))?;
    Ok((rest, element))
}

// ---------------------------------------------------------------------------------------------------------------------

fn count_overflow<'s>(start: &'s str, rest: &'s str) -> nom::Err<ParseFailure<'s>> {
    let length = start.offset(rest);
    nom::Err::Failure(ParseFailure::new(
        start,
        length,
        FormulaErrorKind::CountOverflow,
    ))
}

// Module Tests ========================================================================================================
