// Standard Library Imports
use std::fmt::{self, Display, Formatter};

// External Crate Imports
use ahash::{HashMap, HashMapExt};
use empirical::{AverageMass, Composition, Massive, MonoisotopicMass};
use log::trace;

// Local Crate Imports
use crate::{PeptideError, Polypeptide, Residue, ResidueLibrary, Result};

const WHITESPACE: &[u8] = b" \t\r\n";

// Public API ==========================================================================================================

impl Polypeptide {
    /// Strips all whitespace from `sequence` and converts it to uppercase
    #[must_use]
    pub fn normalize(sequence: &str) -> String {
        sequence.split_whitespace().collect::<String>().to_uppercase()
    }

    /// Builds a polypeptide from a sequence of one-letter residue codes, like `RPPGFSPFR`
    ///
    /// Whitespace is ignored, but letters are case-sensitive, and only the 20 common amino acids are recognised.
    ///
    /// # Errors
    ///
    /// Returns [`PeptideError::UnknownResidue`] if `sequence` contains anything else.
    pub fn new(sequence: impl Into<String>) -> Result<Self> {
        let sequence = sequence.into();
        let library = ResidueLibrary::global();

        let mut histogram = [0_usize; 256];
        for &byte in sequence.as_bytes() {
            histogram[usize::from(byte)] += 1;
        }

        let whitespace: usize = WHITESPACE.iter().map(|&byte| histogram[usize::from(byte)]).sum();
        let mut residue_composition = HashMap::new();
        let mut len = 0;
        for residue in library.common() {
            // NOTE: Every common residue has an ASCII one-letter code
            let Some(byte) = residue.letter().and_then(|letter| u8::try_from(letter).ok()) else {
                continue;
            };
            let count = histogram[usize::from(byte)];
            if count > 0 {
                residue_composition.insert(residue, count);
                len += count;
            }
        }

        if whitespace + len != sequence.len() {
            return Err(PeptideError::UnknownResidue { sequence });
        }

        let composition: Composition = residue_composition
            .iter()
            .map(|(residue, &count)| residue.composition() * count_to_factor(count))
            .sum();
        trace!("built a polypeptide of {len} residues from {sequence:?}");

        Ok(Self {
            sequence,
            composition,
            residue_composition,
            len,
        })
    }

    /// Each recognised residue in the order it appears, silently skipping whitespace and anything unknown
    pub fn residues(&self) -> impl Iterator<Item = &'static Residue> + '_ {
        let library = ResidueLibrary::global();
        self.sequence.bytes().filter_map(|byte| library.residue_at(byte))
    }

    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// The sum of every residue's composition (with no N- or C-terminus)
    #[must_use]
    pub const fn composition(&self) -> &Composition {
        &self.composition
    }

    /// How many times each residue occurs, leaving out residues that don't occur at all
    #[must_use]
    pub const fn residue_composition(&self) -> &HashMap<&'static Residue, usize> {
        &self.residue_composition
    }

    /// The number of residues, not counting whitespace
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Massive for Polypeptide {
    fn monoisotopic_mass(&self) -> MonoisotopicMass {
        self.composition.monoisotopic_mass()
    }

    fn average_mass(&self) -> AverageMass {
        self.composition.average_mass()
    }
}

impl Display for Polypeptide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sequence)
    }
}

// Private Helper Functions ============================================================================================

// FIXME: A sequence can't have more residues than fit in memory, so this only saturates in theory
fn count_to_factor(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

// Module Tests ========================================================================================================
