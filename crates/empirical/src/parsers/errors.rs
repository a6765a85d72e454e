// Standard Library Imports
use std::fmt::Display;

// External Crate Imports
use miette::{Diagnostic, LabeledSpan, SourceCode, SourceSpan};
use nom::{
    IResult,
    error::{ErrorKind, ParseError},
};
use thiserror::Error;

pub type ParseResult<'s, O> = IResult<&'s str, O, FormulaParseError<'s>>;

// Public API ==========================================================================================================

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum FormulaErrorKind {
    #[diagnostic(help(
        "counts follow the element or group they multiply, like the 6 in C6 or the 2 in (CH2)2"
    ))]
    #[error("the formula contains a hanging factor")]
    HangingFactor,

    #[diagnostic(help("every '(' needs a matching ')' after it"))]
    #[error("mismatched parenthesis")]
    MismatchedParentheses,

    #[diagnostic(help(
        "formulas are made of element symbols (like C or Fe), counts, and parentheses"
    ))]
    #[error("could not parse formula")]
    UnexpectedCharacter,

    #[error("unexpected characters in formula")]
    UnexpectedCharacters,

    #[error("no elements could be found")]
    NoElements,

    #[error("the formula contains a count that is too large")]
    CountTooLarge,
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{kind}: {formula}")]
pub struct FormulaError {
    kind: FormulaErrorKind,
    formula: String,
    source_code: String,
    span: SourceSpan,
}

impl FormulaError {
    pub(crate) fn new(kind: FormulaErrorKind, formula: &str, span: SourceSpan) -> Self {
        // NOTE: The trailing space gives labels something to point at when an error occurs at the end of the input
        let source_code = format!("{formula} ");
        Self {
            kind,
            formula: formula.to_owned(),
            source_code,
            span,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &FormulaErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn formula(&self) -> &str {
        &self.formula
    }

    #[must_use]
    pub const fn span(&self) -> SourceSpan {
        self.span
    }
}

impl Diagnostic for FormulaError {
    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.kind.help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(self.kind.label().to_owned()), self.span);
        Some(Box::new(std::iter::once(label)))
    }
}

// Parser Errors =======================================================================================================

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FormulaParseError<'s> {
    input: &'s str,
    length: usize,
    kind: FormulaErrorKind,
}

impl<'s> FormulaParseError<'s> {
    pub(crate) const fn new(input: &'s str, kind: FormulaErrorKind) -> Self {
        Self {
            input,
            length: 0,
            kind,
        }
    }

    pub(crate) const fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> &FormulaErrorKind {
        &self.kind
    }

    /// Converts into a [`FormulaError`], where `formula` is the full text `self.input` was sliced from
    pub(crate) fn into_final_error(self, formula: &str) -> FormulaError {
        let span = span_from_input(formula, self.input, self.length);
        FormulaError::new(self.kind, formula, span)
    }
}

impl<'s> ParseError<&'s str> for FormulaParseError<'s> {
    fn from_error_kind(input: &'s str, kind: ErrorKind) -> Self {
        // NOTE: An `Eof` error means that input was left over after a complete formula was parsed, and the only
        // character that can stop a formula like that (other than invalid ones) is an unmatched closing parenthesis
        let kind = match kind {
            ErrorKind::Eof if input.starts_with(')') => FormulaErrorKind::MismatchedParentheses,
            _ => FormulaErrorKind::UnexpectedCharacter,
        };
        Self::new(input, kind).with_length(first_char_len(input))
    }

    fn append(_input: &'s str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

pub(crate) fn first_char_len(input: &str) -> usize {
    input.chars().next().map_or(0, char::len_utf8)
}

/// The span of `substring` within `input`, which it must be a slice of
pub(crate) fn span_from_input(input: &str, substring: &str, length: usize) -> SourceSpan {
    let base_addr = input.as_ptr() as usize;
    let substring_addr = substring.as_ptr() as usize;
    debug_assert!(
        (base_addr..=base_addr + input.len()).contains(&substring_addr),
        "tried to get the span of a non-substring!"
    );
    let start = substring_addr - base_addr;
    SourceSpan::from(start..start + length)
}

impl FormulaErrorKind {
    const fn label(&self) -> &'static str {
        match self {
            Self::HangingFactor => "this count has nothing to multiply",
            Self::MismatchedParentheses => "unmatched parenthesis",
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnexpectedCharacters => "not a chemical formula",
            Self::NoElements => "no elements here",
            Self::CountTooLarge => "count too large",
        }
    }
}
