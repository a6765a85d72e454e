use nom::{
    Err,
    branch::alt,
    character::complete::{char, digit1},
    combinator::{cut, map, opt},
    multi::many0,
    sequence::{pair, preceded, terminated},
};

use super::{
    Tally,
    errors::{FormulaErrorKind, FormulaParseError, ParseResult, first_char_len},
    primitives::{count, element_symbol},
};

/// Formula = { Term } ;
pub fn formula(i: &str) -> ParseResult<Tally> {
    let (i, terms) = many0(term)(i)?;
    let (i, ()) = no_hanging_factor(i)?;
    Ok((i, terms.concat()))
}

/// Term = ( Element Symbol | Group ) , [ Count ] ;
fn term(i: &str) -> ParseResult<Tally> {
    let element = map(element_symbol, |symbol| vec![(symbol, 1)]);
    let (rest, (tally, multiplier)) = pair(alt((element, group)), opt(count))(i)?;

    let Some(multiplier) = multiplier else {
        return Ok((rest, tally));
    };

    tally
        .into_iter()
        .map(|(symbol, n)| Some((symbol, n.checked_mul(multiplier)?)))
        .collect::<Option<Tally>>()
        .map(|tally| (rest, tally))
        .ok_or_else(|| {
            let length = i.len() - rest.len();
            Err::Failure(FormulaParseError::new(i, FormulaErrorKind::CountTooLarge).with_length(length))
        })
}

/// Group = "(" , Formula , ")" ;
fn group(i: &str) -> ParseResult<Tally> {
    preceded(char('('), cut(terminated(formula, closing_parenthesis)))(i)
}

fn closing_parenthesis(i: &str) -> ParseResult<char> {
    char(')')(i).map_err(|_: Err<FormulaParseError>| {
        let kind = if i.is_empty() {
            FormulaErrorKind::MismatchedParentheses
        } else {
            FormulaErrorKind::UnexpectedCharacter
        };
        Err::Error(FormulaParseError::new(i, kind).with_length(first_char_len(i)))
    })
}

// NOTE: Counts are only consumed directly after an element or group, so any digits that `many0(term)` stops on have
// nothing to multiply
fn no_hanging_factor(i: &str) -> ParseResult<()> {
    match digit1::<_, FormulaParseError>(i) {
        Ok((_, digits)) => {
            let error = FormulaParseError::new(i, FormulaErrorKind::HangingFactor).with_length(digits.len());
            Err(Err::Failure(error))
        }
        Err(_) => Ok((i, ())),
    }
}
