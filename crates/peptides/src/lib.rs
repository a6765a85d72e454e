//! Amino acid residues and polypeptides, weighed as `empirical` compositions

pub mod errors;
pub mod modification;
pub mod polypeptide;
pub mod residue;

// External Crate Imports
use ahash::HashMap;
use empirical::{Composition, MonoisotopicMass};
use serde::Serialize;
use static_assertions::assert_impl_all;

pub use errors::{PeptideError, Result};
pub use modification::{ModificationLookup, parse_with_peptides, peptide_extension};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum Classification {
    /// One of the 20 amino acids encoded by the standard genetic code
    Common,
    /// Genetically encoded, but not by the standard codon table
    Standard,
    Uncommon,
}

// NOTE: Residues are compared and hashed by their (unique) abbreviations alone
#[derive(Clone, Debug, Serialize)]
pub struct Residue {
    letter: Option<char>,
    abbr: &'static str,
    name: &'static str,
    classification: Classification,
    side_chain: Composition,
    composition: Composition,
    side_chain_mass: MonoisotopicMass,
    residue_mass: MonoisotopicMass,
    immonium_ion_mass: MonoisotopicMass,
}

#[derive(Clone, Debug)]
pub struct ResidueLibrary {
    residues: Vec<Residue>,
    letters: HashMap<char, usize>,
    abbrs: HashMap<&'static str, usize>,
    names: HashMap<&'static str, usize>,
    common: Vec<usize>,
    residue_index: [Option<usize>; 256],
    residue_mass_index: [Option<MonoisotopicMass>; 256],
    backbone: Composition,
    delta_immonium: Composition,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Polypeptide {
    sequence: String,
    composition: Composition,
    residue_composition: HashMap<&'static Residue, usize>,
    len: usize,
}

assert_impl_all!(Residue: Send, Sync);
assert_impl_all!(ResidueLibrary: Send, Sync);
assert_impl_all!(Polypeptide: Send, Sync);
