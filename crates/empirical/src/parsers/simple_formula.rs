use nom::{
    Parser,
    character::complete::char,
    combinator::opt,
    multi::many0,
    sequence::{delimited, pair},
};

use super::{
    Tally,
    errors::ParseResult,
    primitives::{element_symbol, signed_count},
};

/// Simple Formula = { Atomic Offset } ;
pub fn simple_formula(i: &str) -> ParseResult<Tally> {
    many0(atomic_offset)(i)
}

/// Atomic Offset = Element Symbol , [ "(" , Signed Count , ")" ] ;
fn atomic_offset(i: &str) -> ParseResult<(&str, i64)> {
    let explicit_count = delimited(char('('), signed_count, char(')'));
    pair(element_symbol, opt(explicit_count).map(|count| count.unwrap_or(1)))(i)
}
