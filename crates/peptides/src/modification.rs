//! Terminal modifications, and a `parse_with` hook for writing whole peptides into chemical formulas

// Standard Library Imports
use std::{collections::HashMap, hash::BuildHasher, sync::LazyLock};

// External Crate Imports
use empirical::Composition;
use itertools::Itertools;
use log::trace;
use regex::Regex;

// Local Crate Imports
use crate::{PeptideError, Polypeptide, Result};

/// Matches `N_MOD:SEQUENCE:C_MOD`, where both modifications (and the final colon) are optional
static PEPTIDE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?):([A-Z]+):?(.*)$").unwrap());

static WATER: LazyLock<Composition> =
    LazyLock::new(|| Composition::parse_simple("H(2)O").expect("water is a valid formula"));

// Public API ==========================================================================================================

/// Somewhere to look up the compositions of named modifications
pub trait ModificationLookup {
    /// # Errors
    ///
    /// Returns [`PeptideError::UnknownModification`] if there is no modification called `name`, or
    /// [`PeptideError::AmbiguousModification`] if `name` is a pattern matching more than one modification
    fn find_modification(&self, name: &str) -> Result<Composition>;
}

/// An in-memory modification table
///
/// Names without a `%` are looked up exactly. Names with one are patterns, where `%` matches any run of characters
/// and `_` matches exactly one, so `Acetyl%` finds `Acetylation`.
impl<S: BuildHasher> ModificationLookup for HashMap<String, Composition, S> {
    fn find_modification(&self, name: &str) -> Result<Composition> {
        if let Some(composition) = self.get(name) {
            return Ok(composition.clone());
        }

        let unknown = || PeptideError::UnknownModification { name: name.to_owned() };
        if !name.contains('%') {
            return Err(unknown());
        }

        let pattern = wildcard_pattern(name).ok_or_else(unknown)?;
        let mut matches: Vec<_> = self
            .iter()
            .filter(|(key, _)| pattern.is_match(key))
            .sorted_unstable_by(|(a, _), (b, _)| a.cmp(b))
            .collect();
        trace!("the modification pattern {name:?} matched {} entries", matches.len());

        match matches.len() {
            0 => Err(unknown()),
            1 => Ok(matches.remove(0).1.clone()),
            _ => Err(PeptideError::AmbiguousModification {
                name: name.to_owned(),
                matches: matches.into_iter().map(|(key, _)| key.clone()).collect(),
            }),
        }
    }
}

impl<T: ModificationLookup + ?Sized> ModificationLookup for &T {
    fn find_modification(&self, name: &str) -> Result<Composition> {
        T::find_modification(self, name)
    }
}

/// Returns a [`parse_with`](empirical::parse_with) extension that reads `N_MOD:SEQUENCE:C_MOD` terms as a
/// polypeptide with free termini (so with an extra H2O), plus any named terminal modifications
pub fn peptide_extension<M: ModificationLookup>(
    modifications: M,
) -> impl Fn(&str) -> Result<Option<Composition>> {
    move |fragment: &str| {
        let Some(captures) = PEPTIDE_FRAGMENT.captures(fragment) else {
            return Ok(None);
        };
        let (n_terminal, sequence, c_terminal) = (&captures[1], &captures[2], &captures[3]);

        let mut composition = Polypeptide::new(sequence)?.composition + &*WATER;
        for name in [n_terminal, c_terminal] {
            if !name.is_empty() {
                composition = composition + modifications.find_modification(name)?;
            }
        }

        Ok(Some(composition))
    }
}

/// Parses a chemical formula that may also contain peptides written as `N_MOD:SEQUENCE:C_MOD`
///
/// # Errors
///
/// Fails for any formula error, for unknown residues in a sequence, and for modifications that can't be found
pub fn parse_with_peptides(formula: impl AsRef<str>, modifications: impl ModificationLookup) -> Result<Composition> {
    empirical::parse_with(formula, peptide_extension(modifications))
}

// Private Helper Functions ============================================================================================

fn wildcard_pattern(name: &str) -> Option<Regex> {
    let mut pattern = String::from("^");
    for c in name.chars() {
        match c {
            '%' => pattern.push_str(".*"),
            '_' => pattern.push('.'),
            c => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern.push('$');
    Regex::new(&pattern).ok()
}

// Module Tests ========================================================================================================
