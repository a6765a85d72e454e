use empirical::EmpiricalError;
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = PeptideError> = std::result::Result<T, E>;

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum PeptideError {
    #[diagnostic(transparent)]
    #[error(transparent)]
    Formula(#[from] EmpiricalError),

    #[diagnostic(help("sequences may only contain the one-letter codes of the 20 common amino acids"))]
    #[error("unknown characters in sequence: {sequence}")]
    UnknownResidue { sequence: String },

    #[error("could not find modification: {name}")]
    UnknownModification { name: String },

    #[diagnostic(help("try a more specific name"))]
    #[error("multiple modifications found for: {name} ({})", .matches.join(", "))]
    AmbiguousModification { name: String, matches: Vec<String> },
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn error_messages() {
        let error = PeptideError::UnknownResidue {
            sequence: "RPZ".to_owned(),
        };
        assert_snapshot!(error.to_string(), @"unknown characters in sequence: RPZ");
        assert!(error.help().is_some());

        let error = PeptideError::UnknownModification {
            name: "Acetyl".to_owned(),
        };
        assert_snapshot!(error.to_string(), @"could not find modification: Acetyl");
        assert!(error.help().is_none());

        let error = PeptideError::AmbiguousModification {
            name: "Amid%".to_owned(),
            matches: vec!["Amidated".to_owned(), "Amidation".to_owned()],
        };
        assert_snapshot!(
            error.to_string(),
            @"multiple modifications found for: Amid% (Amidated, Amidation)"
        );
    }

    #[test]
    fn formula_errors_are_transparent() {
        let error: PeptideError = empirical::parse("H2O(").unwrap_err().into();
        assert_eq!(error.to_string(), empirical::parse("H2O(").unwrap_err().to_string());
        assert!(error.labels().is_some());
    }
}
