//! Chemical formulas, elemental compositions, and the masses of molecules and peptides
//!
//! Everything here is re-exported from the [`empirical`] and [`peptides`] crates.

pub use empirical::{
    AverageMass, Composition, Count, DEFAULT_KDL, Element, ElementTable, EmpiricalError, Massive, MonoisotopicMass,
    atoms, errors, factor_list, parse, parse_simple, parse_with, parsers,
};
pub use peptides::{
    Classification, ModificationLookup, PeptideError, Polypeptide, Residue, ResidueLibrary, modification,
    parse_with_peptides, peptide_extension, polypeptide, residue,
};
