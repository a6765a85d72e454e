use nom::{
    Err,
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{map, opt, recognize},
    sequence::pair,
};

use super::errors::{FormulaErrorKind, FormulaParseError, ParseResult};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum OffsetKind {
    Add,
    Remove,
}

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

/// Element Symbol = uppercase , [ lowercase ] ;
pub fn element_symbol(i: &str) -> ParseResult<&str> {
    recognize(pair(uppercase, opt(lowercase)))(i)
}

/// Count = digit , { digit } ;
pub fn count(i: &str) -> ParseResult<i64> {
    let (rest, digits) = digit1(i)?;
    parse_digits(i, rest, digits)
}

/// Signed Count = [ "-" ] , digit , { digit } ;
pub fn signed_count(i: &str) -> ParseResult<i64> {
    let (rest, digits) = recognize(pair(opt(char('-')), digit1))(i)?;
    parse_digits(i, rest, digits)
}

/// Offset Kind = "+" | "-" ;
pub fn offset_kind(i: &str) -> ParseResult<OffsetKind> {
    map(one_of("+-"), |c| match c {
        '+' => OffsetKind::Add,
        '-' => OffsetKind::Remove,
        _ => unreachable!(),
    })(i)
}

fn parse_digits<'s>(i: &'s str, rest: &'s str, digits: &str) -> ParseResult<'s, i64> {
    digits.parse().map(|count| (rest, count)).map_err(|_| {
        let error = FormulaParseError::new(i, FormulaErrorKind::CountTooLarge).with_length(digits.len());
        Err::Failure(error)
    })
}
