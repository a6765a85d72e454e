use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::parsers::errors::{FormulaError, span_from_input};

pub type Result<T, E = EmpiricalError> = std::result::Result<T, E>;

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum EmpiricalError {
    #[diagnostic(transparent)]
    #[error(transparent)]
    Parse(#[from] FormulaError),

    #[diagnostic(transparent)]
    #[error(transparent)]
    UnknownElement(#[from] UnknownElementError),
}

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
#[diagnostic(help(
    "double-check for typos, or add a new entry to the element table if this element is missing"
))]
#[error("unknown element {symbol:?} in formula: {formula}")]
pub struct UnknownElementError {
    symbol: String,
    formula: String,
    #[source_code]
    source_code: String,
    #[label("element not found")]
    span: SourceSpan,
}

impl UnknownElementError {
    /// `symbol` must be a slice of `formula`
    pub(crate) fn new(formula: &str, symbol: &str) -> Self {
        let span = span_from_input(formula, symbol, symbol.len());
        Self {
            symbol: symbol.to_owned(),
            formula: formula.to_owned(),
            source_code: formula.to_owned(),
            span,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn formula(&self) -> &str {
        &self.formula
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_elements() {
        let formula = "NaClXy2";
        let error = UnknownElementError::new(formula, &formula[4..6]);
        assert_eq!(error.symbol(), "Xy");
        assert_eq!(error.formula(), "NaClXy2");
        assert_eq!(error.to_string(), r#"unknown element "Xy" in formula: NaClXy2"#);

        let labels: Vec<_> = error.labels().unwrap().collect();
        assert_eq!(labels[0].inner(), &SourceSpan::from(4..6));
        assert_eq!(labels[0].label(), Some("element not found"));

        let error = EmpiricalError::from(error);
        assert!(error.help().is_some());
        assert!(matches!(error, EmpiricalError::UnknownElement(_)));
    }
}
