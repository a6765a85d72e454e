pub mod errors;
mod expression;
mod factor_list;
mod formula;
pub mod primitives;
mod simple_formula;

// External Crate Imports
use log::trace;
use nom::{Finish, Parser, combinator::all_consuming};

// Local Crate Imports
use crate::{Composition, ElementTable, EmpiricalError, Result, errors::UnknownElementError};
use errors::{FormulaError, FormulaErrorKind, FormulaParseError, span_from_input};
use expression::expression;
use primitives::OffsetKind;
use simple_formula::simple_formula;

// Re-exports
pub use factor_list::factor_list;

/// Element symbols paired with their (not yet merged) counts, in the order they appear in a formula
pub(crate) type Tally<'s> = Vec<(&'s str, i64)>;

// Public API ==========================================================================================================

/// Parses the flat `symbol(count)` notation produced by [`Composition`]'s `Display` implementation
///
/// Whitespace is ignored, counts can be negative, and repeated symbols are summed, so `HO(-1)O(2)H` is `H(2)O`.
pub fn parse_simple(formula: impl AsRef<str>) -> Result<Composition> {
    let text = strip_whitespace(formula.as_ref());
    trace!("parsing {text:?} as a simple formula");
    let tally = final_parser(simple_formula)(text.as_str()).map_err(|e| e.into_final_error(&text))?;
    composition_from_tally(&text, tally)
}

/// Parses chemical formulas with nested groups and top-level `+` or `-` terms, like `CH3(CH2)50CH3` or
/// `C2H3NO - H2O + NH3`
pub fn parse(formula: impl AsRef<str>) -> Result<Composition> {
    parse_with(formula, |_| Ok(None))
}

/// Like [`parse`], but any term containing characters that can't appear in a chemical formula is handed to
/// `extension`, which can return a [`Composition`] for it, `Ok(None)` if it doesn't recognise the term, or an error
pub fn parse_with<E>(
    formula: impl AsRef<str>,
    mut extension: impl FnMut(&str) -> Result<Option<Composition>, E>,
) -> Result<Composition, E>
where
    E: From<EmpiricalError>,
{
    let text = strip_whitespace(formula.as_ref());
    // NOTE: `expression` accepts any input, so this can't actually fail
    let (first, offsets) = final_parser(expression)(text.as_str())
        .map_err(|e| EmpiricalError::from(e.into_final_error(&text)))?;

    let mut composition = fragment_composition(&text, first, &mut extension)?;
    for (offset_kind, fragment) in offsets {
        let offset = fragment_composition(&text, fragment, &mut extension)?;
        composition = match offset_kind {
            OffsetKind::Add => composition.checked_add(&offset),
            OffsetKind::Remove => composition.checked_sub(&offset),
        }
        .ok_or_else(|| EmpiricalError::from(count_too_large(&text, fragment)))?;
    }

    Ok(composition)
}

// Private Helper Functions ============================================================================================

pub(crate) fn final_parser<'s, O>(
    parser: impl Parser<&'s str, O, FormulaParseError<'s>>,
) -> impl FnMut(&'s str) -> Result<O, FormulaParseError<'s>> {
    let mut parser = all_consuming(parser);
    move |input| parser(input).finish().map(|(_, output)| output)
}

fn strip_whitespace(formula: &str) -> String {
    formula.split_whitespace().collect()
}

const fn is_formula_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '(' || c == ')'
}

fn fragment_composition<E: From<EmpiricalError>>(
    text: &str,
    fragment: &str,
    extension: &mut impl FnMut(&str) -> Result<Option<Composition>, E>,
) -> Result<Composition, E> {
    if fragment.chars().all(is_formula_char) {
        trace!("parsing {fragment:?} as a chemical formula");
        return Ok(formula_composition(text, fragment)?);
    }

    trace!("passing {fragment:?} to the formula extension");
    extension(fragment)?.ok_or_else(|| {
        let span = span_from_input(text, fragment, fragment.len());
        let error = FormulaError::new(FormulaErrorKind::UnexpectedCharacters, text, span);
        EmpiricalError::from(error).into()
    })
}

fn formula_composition(text: &str, fragment: &str) -> Result<Composition> {
    let tally = final_parser(formula::formula)(fragment).map_err(|e| e.into_final_error(text))?;

    if tally.is_empty() && !fragment.is_empty() {
        let span = span_from_input(text, fragment, fragment.len());
        return Err(FormulaError::new(FormulaErrorKind::NoElements, text, span).into());
    }

    composition_from_tally(text, tally)
}

// NOTE: `substring` must be a slice of `text`
fn count_too_large(text: &str, substring: &str) -> FormulaError {
    let span = span_from_input(text, substring, substring.len());
    FormulaError::new(FormulaErrorKind::CountTooLarge, text, span)
}

fn composition_from_tally(text: &str, tally: Tally) -> Result<Composition> {
    // NOTE: The first occurrence of each symbol is kept, so that unknown elements are reported where they first appear
    let mut totals: Tally = Vec::new();
    for (symbol, count) in tally {
        match totals.iter_mut().find(|(seen, _)| *seen == symbol) {
            Some((_, total)) => {
                *total = total
                    .checked_add(count)
                    .ok_or_else(|| count_too_large(text, symbol))?;
            }
            None => totals.push((symbol, count)),
        }
    }

    let table = ElementTable::global();
    let mut factors = Vec::new();
    // NOTE: Symbols that cancel out are never looked up, so `Xx-Xx` is empty rather than an error
    for (symbol, total) in totals.into_iter().filter(|&(_, total)| total != 0) {
        let index = table
            .index_of(symbol)
            .ok_or_else(|| UnknownElementError::new(text, symbol))?;
        if factors.len() <= index {
            factors.resize(index + 1, 0);
        }
        factors[index] = total;
    }

    Ok(Composition::new(factors))
}

// Module Tests ========================================================================================================
