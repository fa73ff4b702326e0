//! Codons and amino acids.

use omics::coordinate::position::Number;

/// The number of nucleotides in a codon.
pub const CODON_LENGTH: usize = 3;

/// The nucleotides in the order used to index [`STANDARD_CODE`].
const NUCLEOTIDES: [u8; 4] = [b'T', b'C', b'A', b'G'];

/// The standard genetic code, indexed by `16 * first + 4 * second + third`
/// over [`NUCLEOTIDES`]. `*` marks the three stop codons.
const STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

////////////////////////////////////////////////////////////////////////////////////////
// Amino acids
////////////////////////////////////////////////////////////////////////////////////////

/// The side-chain property of an amino acid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Property {
    /// Acidic.
    Acidic,

    /// Aliphatic.
    Aliphatic,

    /// Amidic.
    Amidic,

    /// Aromatic.
    Aromatic,

    /// Basic.
    Basic,

    /// Hydroxylic.
    Hydroxylic,

    /// Sulfur-containing.
    SulfurContaining,
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Property::Acidic => write!(f, "acidic"),
            Property::Aliphatic => write!(f, "aliphatic"),
            Property::Amidic => write!(f, "amidic"),
            Property::Aromatic => write!(f, "aromatic"),
            Property::Basic => write!(f, "basic"),
            Property::Hydroxylic => write!(f, "hydroxylic"),
            Property::SulfurContaining => write!(f, "sulfur-containing"),
        }
    }
}

/// The product of translating a codon.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AminoAcid {
    /// Alanine.
    Alanine,
    /// Arginine.
    Arginine,
    /// Asparagine.
    Asparagine,
    /// Aspartic acid.
    AsparticAcid,
    /// Cysteine.
    Cysteine,
    /// Glutamic acid.
    GlutamicAcid,
    /// Glutamine.
    Glutamine,
    /// Glycine.
    Glycine,
    /// Histidine.
    Histidine,
    /// Isoleucine.
    Isoleucine,
    /// Leucine.
    Leucine,
    /// Lysine.
    Lysine,
    /// Methionine.
    Methionine,
    /// Phenylalanine.
    Phenylalanine,
    /// Proline.
    Proline,
    /// Serine.
    Serine,
    /// Threonine.
    Threonine,
    /// Tryptophan.
    Tryptophan,
    /// Tyrosine.
    Tyrosine,
    /// Valine.
    Valine,
    /// Any of the three stop codons.
    Stop,
}

impl AminoAcid {
    /// Gets the amino acid for a one-letter key.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::codon::AminoAcid;
    ///
    /// assert_eq!(AminoAcid::from_key('M'), Some(AminoAcid::Methionine));
    /// assert_eq!(AminoAcid::from_key('*'), Some(AminoAcid::Stop));
    /// assert_eq!(AminoAcid::from_key('B'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Self> {
        let amino_acid = match key {
            'A' => AminoAcid::Alanine,
            'R' => AminoAcid::Arginine,
            'N' => AminoAcid::Asparagine,
            'D' => AminoAcid::AsparticAcid,
            'C' => AminoAcid::Cysteine,
            'E' => AminoAcid::GlutamicAcid,
            'Q' => AminoAcid::Glutamine,
            'G' => AminoAcid::Glycine,
            'H' => AminoAcid::Histidine,
            'I' => AminoAcid::Isoleucine,
            'L' => AminoAcid::Leucine,
            'K' => AminoAcid::Lysine,
            'M' => AminoAcid::Methionine,
            'F' => AminoAcid::Phenylalanine,
            'P' => AminoAcid::Proline,
            'S' => AminoAcid::Serine,
            'T' => AminoAcid::Threonine,
            'W' => AminoAcid::Tryptophan,
            'Y' => AminoAcid::Tyrosine,
            'V' => AminoAcid::Valine,
            '*' => AminoAcid::Stop,
            _ => return None,
        };

        Some(amino_acid)
    }

    /// Gets the one-letter key.
    pub fn key(&self) -> char {
        match self {
            AminoAcid::Alanine => 'A',
            AminoAcid::Arginine => 'R',
            AminoAcid::Asparagine => 'N',
            AminoAcid::AsparticAcid => 'D',
            AminoAcid::Cysteine => 'C',
            AminoAcid::GlutamicAcid => 'E',
            AminoAcid::Glutamine => 'Q',
            AminoAcid::Glycine => 'G',
            AminoAcid::Histidine => 'H',
            AminoAcid::Isoleucine => 'I',
            AminoAcid::Leucine => 'L',
            AminoAcid::Lysine => 'K',
            AminoAcid::Methionine => 'M',
            AminoAcid::Phenylalanine => 'F',
            AminoAcid::Proline => 'P',
            AminoAcid::Serine => 'S',
            AminoAcid::Threonine => 'T',
            AminoAcid::Tryptophan => 'W',
            AminoAcid::Tyrosine => 'Y',
            AminoAcid::Valine => 'V',
            AminoAcid::Stop => '*',
        }
    }

    /// Gets the three-letter abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            AminoAcid::Alanine => "Ala",
            AminoAcid::Arginine => "Arg",
            AminoAcid::Asparagine => "Asn",
            AminoAcid::AsparticAcid => "Asp",
            AminoAcid::Cysteine => "Cys",
            AminoAcid::GlutamicAcid => "Glu",
            AminoAcid::Glutamine => "Gln",
            AminoAcid::Glycine => "Gly",
            AminoAcid::Histidine => "His",
            AminoAcid::Isoleucine => "Ile",
            AminoAcid::Leucine => "Leu",
            AminoAcid::Lysine => "Lys",
            AminoAcid::Methionine => "Met",
            AminoAcid::Phenylalanine => "Phe",
            AminoAcid::Proline => "Pro",
            AminoAcid::Serine => "Ser",
            AminoAcid::Threonine => "Thr",
            AminoAcid::Tryptophan => "Trp",
            AminoAcid::Tyrosine => "Tyr",
            AminoAcid::Valine => "Val",
            AminoAcid::Stop => "Ter",
        }
    }

    /// Gets the full name.
    pub fn name(&self) -> &'static str {
        match self {
            AminoAcid::Alanine => "Alanine",
            AminoAcid::Arginine => "Arginine",
            AminoAcid::Asparagine => "Asparagine",
            AminoAcid::AsparticAcid => "Aspartic acid",
            AminoAcid::Cysteine => "Cysteine",
            AminoAcid::GlutamicAcid => "Glutamic acid",
            AminoAcid::Glutamine => "Glutamine",
            AminoAcid::Glycine => "Glycine",
            AminoAcid::Histidine => "Histidine",
            AminoAcid::Isoleucine => "Isoleucine",
            AminoAcid::Leucine => "Leucine",
            AminoAcid::Lysine => "Lysine",
            AminoAcid::Methionine => "Methionine",
            AminoAcid::Phenylalanine => "Phenylalanine",
            AminoAcid::Proline => "Proline",
            AminoAcid::Serine => "Serine",
            AminoAcid::Threonine => "Threonine",
            AminoAcid::Tryptophan => "Tryptophan",
            AminoAcid::Tyrosine => "Tyrosine",
            AminoAcid::Valine => "Valine",
            AminoAcid::Stop => "Stop codon",
        }
    }

    /// Gets the side-chain property. Stop codons have none.
    pub fn property(&self) -> Option<Property> {
        let property = match self {
            AminoAcid::AsparticAcid | AminoAcid::GlutamicAcid => Property::Acidic,
            AminoAcid::Alanine
            | AminoAcid::Glycine
            | AminoAcid::Isoleucine
            | AminoAcid::Leucine
            | AminoAcid::Proline
            | AminoAcid::Valine => Property::Aliphatic,
            AminoAcid::Asparagine | AminoAcid::Glutamine => Property::Amidic,
            AminoAcid::Phenylalanine | AminoAcid::Tryptophan | AminoAcid::Tyrosine => {
                Property::Aromatic
            }
            AminoAcid::Arginine | AminoAcid::Histidine | AminoAcid::Lysine => Property::Basic,
            AminoAcid::Serine | AminoAcid::Threonine => Property::Hydroxylic,
            AminoAcid::Cysteine | AminoAcid::Methionine => Property::SulfurContaining,
            AminoAcid::Stop => return None,
        };

        Some(property)
    }

    /// Returns whether the amino acid is essential in humans.
    pub fn is_essential(&self) -> bool {
        matches!(
            self,
            AminoAcid::Histidine
                | AminoAcid::Isoleucine
                | AminoAcid::Leucine
                | AminoAcid::Lysine
                | AminoAcid::Methionine
                | AminoAcid::Phenylalanine
                | AminoAcid::Threonine
                | AminoAcid::Tryptophan
                | AminoAcid::Valine
        )
    }
}

impl std::fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Gets the position of a nucleotide within [`NUCLEOTIDES`].
///
/// `U` is read as `T` and lowercase letters are accepted.
fn nucleotide_index(nucleotide: u8) -> Option<usize> {
    let nucleotide = match nucleotide.to_ascii_uppercase() {
        b'U' => b'T',
        other => other,
    };

    NUCLEOTIDES.iter().position(|n| *n == nucleotide)
}

/// Translates a triplet with the standard genetic code.
///
/// Returns `None` when the triplet is not made of exactly three recognized
/// nucleotides.
///
/// # Examples
///
/// ```
/// use txtrack::codon::translate;
/// use txtrack::codon::AminoAcid;
///
/// assert_eq!(translate("ATG"), Some(AminoAcid::Methionine));
/// assert_eq!(translate("tgg"), Some(AminoAcid::Tryptophan));
/// assert_eq!(translate("TAA"), Some(AminoAcid::Stop));
/// assert_eq!(translate("UGA"), Some(AminoAcid::Stop));
/// assert_eq!(translate("ANG"), None);
/// assert_eq!(translate("AT"), None);
/// ```
pub fn translate(triplet: &str) -> Option<AminoAcid> {
    let bytes = triplet.as_bytes();
    if bytes.len() != CODON_LENGTH {
        return None;
    }

    let mut index = 0;
    for nucleotide in bytes {
        index = index * NUCLEOTIDES.len() + nucleotide_index(*nucleotide)?;
    }

    AminoAcid::from_key(char::from(STANDARD_CODE[index]))
}

////////////////////////////////////////////////////////////////////////////////////////
// Codons
////////////////////////////////////////////////////////////////////////////////////////

/// A translated codon placed on the absolute axis.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Codon {
    /// The absolute positions of the three nucleotides, in transcription
    /// order.
    positions: [Number; CODON_LENGTH],

    /// The amino acid.
    amino_acid: AminoAcid,
}

impl Codon {
    /// Creates a new [`Codon`].
    pub fn new(positions: [Number; CODON_LENGTH], amino_acid: AminoAcid) -> Self {
        Self {
            positions,
            amino_acid,
        }
    }

    /// Gets the first absolute position covered by the codon.
    pub fn pos_start(&self) -> Number {
        self.positions.iter().copied().min().unwrap_or_default()
    }

    /// Gets the last absolute position covered by the codon (inclusive).
    pub fn pos_end(&self) -> Number {
        self.positions.iter().copied().max().unwrap_or_default()
    }

    /// Gets the absolute positions of the nucleotides in transcription order.
    pub fn positions(&self) -> &[Number; CODON_LENGTH] {
        &self.positions
    }

    /// Gets the amino acid.
    pub fn amino_acid(&self) -> AminoAcid {
        self.amino_acid
    }

    /// Returns whether the nucleotides of the codon are not adjacent, which
    /// happens when the codon is split across an exon boundary.
    pub fn split_across_boundary(&self) -> bool {
        self.segments().len() > 1
    }

    /// Gets the contiguous spans covered by the codon as closed
    /// `(start, end)` pairs in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::codon::AminoAcid;
    /// use txtrack::codon::Codon;
    ///
    /// let codon = Codon::new([106, 200, 201], AminoAcid::Leucine);
    ///
    /// assert_eq!(codon.pos_start(), 106);
    /// assert_eq!(codon.pos_end(), 201);
    /// assert!(codon.split_across_boundary());
    /// assert_eq!(codon.segments(), vec![(106, 106), (200, 201)]);
    /// ```
    pub fn segments(&self) -> Vec<(Number, Number)> {
        let mut positions = self.positions;
        positions.sort_unstable();

        let mut segments = Vec::<(Number, Number)>::new();
        for position in positions {
            match segments.last_mut() {
                Some((_, end)) if *end + 1 == position => *end = position,
                _ => segments.push((position, position)),
            }
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_triplet() {
        let mut stops = 0;

        for a in NUCLEOTIDES {
            for b in NUCLEOTIDES {
                for c in NUCLEOTIDES {
                    let triplet = String::from_utf8(vec![a, b, c]).unwrap();
                    let amino_acid = translate(&triplet).unwrap();

                    if amino_acid == AminoAcid::Stop {
                        stops += 1;
                    }
                }
            }
        }

        assert_eq!(stops, 3);
    }

    #[test]
    fn test_translate() {
        assert_eq!(translate("GCT"), Some(AminoAcid::Alanine));
        assert_eq!(translate("AGA"), Some(AminoAcid::Arginine));
        assert_eq!(translate("GAT"), Some(AminoAcid::AsparticAcid));
        assert_eq!(translate("TTT"), Some(AminoAcid::Phenylalanine));
        assert_eq!(translate("TAG"), Some(AminoAcid::Stop));
        assert_eq!(translate("ATA"), Some(AminoAcid::Isoleucine));
        assert_eq!(translate("GGG"), Some(AminoAcid::Glycine));
    }

    #[test]
    fn test_metadata() {
        let amino_acid = AminoAcid::Tryptophan;

        assert_eq!(amino_acid.key(), 'W');
        assert_eq!(amino_acid.abbreviation(), "Trp");
        assert_eq!(amino_acid.name(), "Tryptophan");
        assert_eq!(amino_acid.property(), Some(Property::Aromatic));
        assert!(amino_acid.is_essential());

        assert_eq!(AminoAcid::Stop.property(), None);
        assert_eq!(Property::SulfurContaining.to_string(), "sulfur-containing");
    }

    #[test]
    fn test_keys_round_trip() {
        for key in "ARNDCEQGHILKMFPSTWYV*".chars() {
            assert_eq!(AminoAcid::from_key(key).unwrap().key(), key);
        }
    }

    #[test]
    fn test_contiguous_codon() {
        let codon = Codon::new([100, 101, 102], AminoAcid::Methionine);

        assert_eq!(codon.pos_start(), 100);
        assert_eq!(codon.pos_end(), 102);
        assert!(!codon.split_across_boundary());
        assert_eq!(codon.segments(), vec![(100, 102)]);
    }

    #[test]
    fn test_reverse_strand_split_codon() {
        let codon = Codon::new([301, 300, 150], AminoAcid::Serine);

        assert_eq!(codon.pos_start(), 150);
        assert_eq!(codon.pos_end(), 301);
        assert!(codon.split_across_boundary());
        assert_eq!(codon.segments(), vec![(150, 150), (300, 301)]);
    }
}
