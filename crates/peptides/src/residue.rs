// Standard Library Imports
use std::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    sync::LazyLock,
};

// External Crate Imports
use ahash::{HashMap, HashMapExt};
use empirical::{AverageMass, Composition, EmpiricalError, Massive, MonoisotopicMass};
use log::debug;

// Local Crate Imports
use crate::{Classification, Residue, ResidueLibrary};

// Residue Catalog =====================================================================================================

/// The atoms shared by every residue in a peptide chain
pub const BACKBONE: &str = "C(2)H(2)NO";

/// The change in composition between a residue and its immonium ion
pub const DELTA_IMMONIUM: &str = "-CO+H";

type CatalogEntry = (Option<char>, &'static str, &'static str, &'static str, Classification);

// NOTE: Side chains use the simple formula notation
const CATALOG: [CatalogEntry; 35] = {
    use Classification::{Common, Standard, Uncommon};
    [
        (Some('A'), "Ala", "Alanine", "CH(3)", Common),
        (Some('C'), "Cys", "Cysteine", "CH(3)S", Common),
        (Some('D'), "Asp", "Aspartic Acid", "C(2)H(3)O(2)", Common),
        (Some('E'), "Glu", "Glutamic Acid", "C(3)H(5)O(2)", Common),
        (Some('F'), "Phe", "Phenylalanine", "C(7)H(7)", Common),
        (Some('G'), "Gly", "Glycine", "H", Common),
        (Some('H'), "His", "Histidine", "C(4)H(5)N(2)", Common),
        (Some('I'), "Ile", "Isoleucine", "C(4)H(9)", Common),
        (Some('K'), "Lys", "Lysine", "C(4)H(10)N", Common),
        (Some('L'), "Leu", "Leucine", "C(4)H(9)", Common),
        (Some('M'), "Met", "Methionine", "C(3)H(7)S", Common),
        (Some('N'), "Asn", "Asparagine", "C(2)H(4)NO", Common),
        (Some('P'), "Pro", "Proline", "C(3)H(5)", Common),
        (Some('Q'), "Gln", "Glutamine", "C(3)H(6)NO", Common),
        (Some('R'), "Arg", "Arginine", "C(4)H(10)N(3)", Common),
        (Some('S'), "Ser", "Serine", "CH(3)O", Common),
        (Some('T'), "Thr", "Threonine", "C(2)H(5)O", Common),
        (Some('U'), "Sec", "Selenocysteine", "CH(3)Se", Standard),
        (Some('V'), "Val", "Valine", "C(3)H(7)", Common),
        (Some('W'), "Trp", "Tryptophan", "C(9)H(8)N", Common),
        (Some('Y'), "Tyr", "Tyrosine", "C(7)H(7)O", Common),
        (Some('O'), "Orn", "Ornithine", "C(3)H(8)N", Uncommon),
        (None, "Aba", "Aminobutyric Acid", "C(2)H(5)", Uncommon),
        (None, "AECys", "Aminoethylcysteine", "C(3)H(8)NS", Uncommon),
        (None, "Aib", "alpha-Aminoisobutyric Acid", "C(2)H(5)", Uncommon),
        (None, "CMCys", "Carboxymethylcysteine", "C(3)H(5)O(2)S", Uncommon),
        (None, "Dha", "Dehydroalanine", "CH", Uncommon),
        (None, "Dhb", "Dehydroamino-alpha-butyric Acid", "C(2)H(3)", Uncommon),
        (None, "Hyl", "Hydroxylysine", "C(4)H(10)NO", Uncommon),
        (None, "Hyp", "Hydroxyproline", "C(3)H(5)O", Uncommon),
        (None, "Iva", "Isovaline", "C(3)H(7)", Uncommon),
        (None, "nLeu", "Norleucine", "C(4)H(9)", Uncommon),
        (None, "Pip", "2-Piperidinecarboxylic Acid", "C(4)H(7)", Uncommon),
        (None, "pGlu", "Pyroglutamic Acid", "C(3)H(3)O", Uncommon),
        (None, "Sar", "Sarcosine", "CH(3)", Uncommon),
    ]
};

static GLOBAL: LazyLock<ResidueLibrary> = LazyLock::new(|| {
    // NOTE: Every formula in `CATALOG` is checked by this module's tests, so failing here is a bug in the catalog
    let library = ResidueLibrary::from_catalog().expect("the residue catalog contains an invalid formula");
    debug!(
        "built the residue library ({} residues, {} common)",
        library.residues.len(),
        library.common.len()
    );
    library
});

// Public API ==========================================================================================================

impl ResidueLibrary {
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Looks a residue up by its one-letter code, then its abbreviation, and finally its full name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Residue> {
        let mut chars = key.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(letter), None) => self.by_letter(letter),
            _ => None,
        };
        letter
            .or_else(|| self.by_abbr(key))
            .or_else(|| self.by_name(key))
    }

    #[must_use]
    pub fn by_letter(&self, letter: char) -> Option<&Residue> {
        self.letters.get(&letter).map(|&index| &self.residues[index])
    }

    #[must_use]
    pub fn by_abbr(&self, abbr: &str) -> Option<&Residue> {
        self.abbrs.get(abbr).map(|&index| &self.residues[index])
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Residue> {
        self.names.get(name).map(|&index| &self.residues[index])
    }

    /// The 20 common amino acids
    pub fn common(&self) -> impl ExactSizeIterator<Item = &Residue> {
        self.common.iter().map(|&index| &self.residues[index])
    }

    /// The common residue whose one-letter code is `byte`
    #[must_use]
    pub fn residue_at(&self, byte: u8) -> Option<&Residue> {
        self.residue_index[usize::from(byte)].map(|index| &self.residues[index])
    }

    /// The residue mass of the common residue whose one-letter code is `byte`
    #[must_use]
    pub fn residue_mass_at(&self, byte: u8) -> Option<MonoisotopicMass> {
        self.residue_mass_index[usize::from(byte)]
    }

    /// Every common residue, indexed by the byte of its one-letter code
    #[must_use]
    pub fn residue_index(&self) -> [Option<&Residue>; 256] {
        std::array::from_fn(|byte| self.residue_index[byte].map(|index| &self.residues[index]))
    }

    /// Every common residue mass, indexed by the byte of its one-letter code
    #[must_use]
    pub const fn residue_mass_index(&self) -> &[Option<MonoisotopicMass>; 256] {
        &self.residue_mass_index
    }

    #[must_use]
    pub const fn backbone(&self) -> &Composition {
        &self.backbone
    }

    #[must_use]
    pub const fn delta_immonium(&self) -> &Composition {
        &self.delta_immonium
    }

    /// The full catalog, common residues first
    pub fn iter(&self) -> impl Iterator<Item = &Residue> {
        self.residues.iter()
    }
}

impl Residue {
    #[must_use]
    pub const fn letter(&self) -> Option<char> {
        self.letter
    }

    #[must_use]
    pub const fn abbr(&self) -> &'static str {
        self.abbr
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub fn is_common(&self) -> bool {
        self.classification == Classification::Common
    }

    #[must_use]
    pub fn is_standard(&self) -> bool {
        matches!(self.classification, Classification::Common | Classification::Standard)
    }

    #[must_use]
    pub const fn side_chain(&self) -> &Composition {
        &self.side_chain
    }

    /// The side chain plus the peptide backbone
    #[must_use]
    pub const fn composition(&self) -> &Composition {
        &self.composition
    }

    #[must_use]
    pub const fn side_chain_mass(&self) -> MonoisotopicMass {
        self.side_chain_mass
    }

    /// The monoisotopic mass of the residue within a chain (with no N- or C-terminus)
    #[must_use]
    pub const fn residue_mass(&self) -> MonoisotopicMass {
        self.residue_mass
    }

    #[must_use]
    pub const fn immonium_ion_mass(&self) -> MonoisotopicMass {
        self.immonium_ion_mass
    }
}

impl Massive for Residue {
    fn monoisotopic_mass(&self) -> MonoisotopicMass {
        self.residue_mass
    }

    fn average_mass(&self) -> AverageMass {
        self.composition.average_mass()
    }
}

impl Display for Residue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbr)
    }
}

impl PartialEq for Residue {
    fn eq(&self, other: &Self) -> bool {
        self.abbr == other.abbr
    }
}

impl Eq for Residue {}

impl Hash for Residue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.abbr.hash(state);
    }
}

// Private Helper Methods ==============================================================================================

impl ResidueLibrary {
    fn from_catalog() -> Result<Self, EmpiricalError> {
        let backbone = Composition::parse_simple(BACKBONE)?;
        let delta_immonium = Composition::parse(DELTA_IMMONIUM)?;
        let delta_immonium_mass = delta_immonium.monoisotopic_mass();

        let residues = CATALOG
            .into_iter()
            .map(|(letter, abbr, name, side_chain, classification)| -> Result<_, EmpiricalError> {
                let side_chain = Composition::parse_simple(side_chain)?;
                let composition = &side_chain + &backbone;
                let residue_mass = composition.monoisotopic_mass();
                Ok(Residue {
                    letter,
                    abbr,
                    name,
                    classification,
                    side_chain_mass: side_chain.monoisotopic_mass(),
                    side_chain,
                    composition,
                    residue_mass,
                    immonium_ion_mass: residue_mass + delta_immonium_mass,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut letters = HashMap::new();
        let mut abbrs = HashMap::with_capacity(residues.len());
        let mut names = HashMap::with_capacity(residues.len());
        let mut common = Vec::new();
        let mut residue_index = [None; 256];
        let mut residue_mass_index = [None; 256];
        for (index, residue) in residues.iter().enumerate() {
            abbrs.insert(residue.abbr, index);
            names.insert(residue.name, index);
            if let Some(letter) = residue.letter {
                letters.insert(letter, index);
            }

            if residue.is_common() {
                common.push(index);
                // NOTE: Every lettered residue uses an ASCII letter, so this `u8` conversion always succeeds
                if let Some(byte) = residue.letter.and_then(|letter| u8::try_from(letter).ok()) {
                    residue_index[usize::from(byte)] = Some(index);
                    residue_mass_index[usize::from(byte)] = Some(residue.residue_mass);
                }
            }
        }

        Ok(Self {
            residues,
            letters,
            abbrs,
            names,
            common,
            residue_index,
            residue_mass_index,
            backbone,
            delta_immonium,
        })
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    fn library() -> &'static ResidueLibrary {
        ResidueLibrary::global()
    }

    fn assert_close(actual: MonoisotopicMass, expected: Decimal, label: &str) {
        let difference = (actual.0 - expected).abs();
        assert!(
            difference < dec!(0.00001),
            "{label}: expected {expected}, but got {actual}"
        );
    }

    #[test]
    fn documented_residue() {
        let alanine = library().by_letter('A').unwrap();
        assert_eq!(alanine.name(), "Alanine");
        assert_eq!(alanine.abbr(), "Ala");
        assert_eq!(alanine.letter(), Some('A'));
        assert_eq!(alanine.side_chain().to_string(), "CH(3)");
        assert_eq!(alanine.composition().to_string(), "C(3)H(5)NO");
        assert_eq!(alanine.to_string(), "Ala");
        assert!(alanine.is_common());
        assert!(alanine.is_standard());
    }

    #[test]
    fn catalog_contents() {
        let library = library();
        assert_eq!(library.iter().count(), 35);

        let mut common: Vec<_> = library.common().filter_map(Residue::letter).collect();
        common.sort_unstable();
        assert_eq!(common, "ACDEFGHIKLMNPQRSTVWY".chars().collect::<Vec<_>>());

        // Abbreviations (and so residues) are all unique
        let abbrs: HashSet<_> = library.iter().map(Residue::abbr).collect();
        assert_eq!(abbrs.len(), 35);
        let residues: HashSet<_> = library.iter().collect();
        assert_eq!(residues.len(), 35);
    }

    #[test]
    fn classifications() {
        let library = library();
        let selenocysteine = library.get("U").unwrap();
        assert_eq!(selenocysteine.classification(), Classification::Standard);
        assert!(!selenocysteine.is_common());
        assert!(selenocysteine.is_standard());

        let ornithine = library.get("Orn").unwrap();
        assert_eq!(ornithine.letter(), Some('O'));
        assert!(!ornithine.is_common());
        assert!(!ornithine.is_standard());

        let sarcosine = library.get("Sarcosine").unwrap();
        assert_eq!(sarcosine.letter(), None);
        assert_eq!(sarcosine.classification(), Classification::Uncommon);
    }

    #[test]
    fn lookup() {
        let library = library();
        let alanine = library.by_letter('A').unwrap();
        assert_eq!(library.get("A"), Some(alanine));
        assert_eq!(library.get("Ala"), Some(alanine));
        assert_eq!(library.get("Alanine"), Some(alanine));
        assert_eq!(library.by_abbr("Ala"), Some(alanine));
        assert_eq!(library.by_name("Alanine"), Some(alanine));
        // Mixed-case abbreviations are kept as-is
        assert_eq!(library.get("pGlu").unwrap().name(), "Pyroglutamic Acid");
        assert_eq!(library.get("nLeu").unwrap().name(), "Norleucine");
        // Unknown keys are `None`, not errors
        assert_eq!(library.get("X"), None);
        assert_eq!(library.get("Z"), None);
        assert_eq!(library.get("a"), None);
        assert_eq!(library.get("BACKBONE"), None);
        assert_eq!(library.get(""), None);
        assert_eq!(library.by_letter('B'), None);
    }

    #[test]
    fn constants() {
        let library = library();
        assert_eq!(library.backbone().to_string(), "C(2)H(2)NO");
        assert_eq!(library.delta_immonium().to_string(), "C(-1)HO(-1)");
        assert_eq!(library.backbone(), &Composition::new([2, 1, 2, 1]));
    }

    #[test]
    fn residue_indices() {
        let library = library();
        let index = library.residue_index();
        assert_eq!(index.iter().flatten().count(), 20);
        assert_eq!(index[usize::from(b'W')].map(Residue::name), Some("Tryptophan"));
        assert_eq!(library.residue_at(b'K').map(Residue::abbr), Some("Lys"));
        // Only common residues are indexed
        assert_eq!(library.residue_at(b'U'), None);
        assert_eq!(library.residue_at(b'O'), None);
        assert_eq!(library.residue_at(b'a'), None);
        assert_eq!(library.residue_at(b' '), None);

        let masses = library.residue_mass_index();
        assert_eq!(masses.iter().flatten().count(), 20);
        assert_eq!(
            library.residue_mass_at(b'G'),
            Some(MonoisotopicMass(dec!(57.0214637236)))
        );
        assert_eq!(library.residue_mass_at(b'Z'), None);
        for residue in library.common() {
            let byte = u8::try_from(residue.letter().unwrap()).unwrap();
            assert_eq!(masses[usize::from(byte)], Some(residue.residue_mass()));
        }
    }

    #[test]
    fn residue_masses() {
        let library = library();
        for (letter, expected) in [
            ("A", dec!(71.03711)),
            ("R", dec!(156.10111)),
            ("N", dec!(114.04293)),
            ("D", dec!(115.02694)),
            ("C", dec!(103.00919)),
            ("E", dec!(129.04259)),
            ("Q", dec!(128.05858)),
            ("G", dec!(57.02146)),
            ("H", dec!(137.05891)),
            ("I", dec!(113.08406)),
            ("L", dec!(113.08406)),
            ("K", dec!(128.09496)),
            ("M", dec!(131.04049)),
            ("O", dec!(114.07931)),
            ("F", dec!(147.06841)),
            ("P", dec!(97.05276)),
            ("S", dec!(87.03203)),
            ("T", dec!(101.04768)),
            ("U", dec!(150.95363)),
            ("W", dec!(186.07931)),
            ("Y", dec!(163.06333)),
            ("V", dec!(99.06841)),
        ] {
            let residue = library.get(letter).unwrap();
            assert_close(residue.residue_mass(), expected, letter);
            assert_eq!(residue.monoisotopic_mass(), residue.residue_mass());
            assert_eq!(residue.residue_mass(), residue.composition().monoisotopic_mass());
        }
    }

    #[test]
    fn exact_residue_masses() {
        let library = library();
        for (letter, expected) in [
            ('A', dec!(71.0371137878)),
            ('R', dec!(156.1011110281)),
            ('D', dec!(115.026943032)),
            ('C', dec!(103.0091844778)),
            ('G', dec!(57.0214637236)),
            ('W', dec!(186.0793129535)),
        ] {
            let residue = library.by_letter(letter).unwrap();
            assert_eq!(residue.residue_mass(), MonoisotopicMass(expected));
        }
        assert_eq!(
            library.by_letter('A').unwrap().side_chain_mass(),
            MonoisotopicMass(dec!(15.0234750963))
        );
    }

    #[test]
    fn immonium_ion_masses() {
        let library = library();
        for (letter, expected) in [
            ("A", dec!(44.05002)),
            ("R", dec!(129.11402)),
            ("N", dec!(87.05584)),
            ("D", dec!(88.03985)),
            ("C", dec!(76.02210)),
            ("E", dec!(102.05550)),
            ("Q", dec!(101.07149)),
            ("G", dec!(30.03437)),
            ("H", dec!(110.07182)),
            ("I", dec!(86.09697)),
            ("L", dec!(86.09697)),
            ("K", dec!(101.10787)),
            ("M", dec!(104.05340)),
            ("F", dec!(120.08132)),
            ("P", dec!(70.06567)),
            ("S", dec!(60.04494)),
            ("T", dec!(74.06059)),
            ("U", dec!(123.96654)),
            ("W", dec!(159.09222)),
            ("Y", dec!(136.07624)),
            ("V", dec!(72.08132)),
        ] {
            assert_close(library.get(letter).unwrap().immonium_ion_mass(), expected, letter);
        }
    }

    #[test]
    fn catalog_formulas_are_valid() {
        for (_, abbr, _, side_chain, _) in CATALOG {
            assert!(Composition::parse_simple(side_chain).is_ok(), "{abbr}");
        }
        assert!(ResidueLibrary::from_catalog().is_ok());
    }

    #[test]
    fn serialization() {
        let library = library();
        let glycine = serde_json::to_value(library.by_letter('G').unwrap()).unwrap();
        assert_eq!(glycine["letter"], "G");
        assert_eq!(glycine["abbr"], "Gly");
        assert_eq!(glycine["name"], "Glycine");
        assert_eq!(glycine["classification"], "Common");
        assert_eq!(glycine["side_chain"]["factors"], serde_json::json!([1]));
        assert_eq!(glycine["composition"]["factors"], serde_json::json!([3, 1, 2, 1]));
        assert_eq!(glycine["residue_mass"], "57.0214637236");

        let sarcosine = serde_json::to_value(library.get("Sar").unwrap()).unwrap();
        assert!(sarcosine["letter"].is_null());
        assert_eq!(sarcosine["classification"], "Uncommon");
    }
}
