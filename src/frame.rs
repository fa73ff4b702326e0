//! Reading frame reconstruction.
//!
//! Reference sequence arrives one tile at a time, and tile boundaries fall
//! anywhere relative to exons and codons. Reconstructing the codons of a
//! transcript on one tile takes six steps:
//!
//! 1. The frame offset of every exon is accumulated in transcription order
//!    ([`offsets`]).
//! 2. The tile is masked down to the nucleotides that are both exonic and
//!    coding ([`intersect`]).
//! 3. The first coding nucleotide of the tile is located within its exon and
//!    the tile offset is derived from that exon's frame offset.
//! 4. The nucleotides needed to complete the codons cut by either side of the
//!    tile are fetched from outside of the tile.
//! 5. Negative strand sequence is reverse complemented and the codon
//!    positions are reflected back onto the forward strand.
//! 6. The coding nucleotides are read three at a time and translated.
//!
//! All of the work happens in _transcription space_: chromosome-relative
//! coordinates that, on the negative strand, are reflected through the end of
//! the chromosome (`position -> length - position`) so that transcription
//! always runs towards increasing positions. Exon order, frame offsets and
//! codon boundaries then read the same on either strand.

pub mod cache;
pub mod intersect;
pub mod offsets;

use omics::coordinate::Strand;
use omics::coordinate::position::Number;
use tracing::debug;
use tracing::warn;

pub use cache::Cache;

use crate::codon;
use crate::codon::CODON_LENGTH;
use crate::codon::Codon;
use crate::frame::offsets::Segments;
use crate::sequence::Fetcher;
use crate::sequence::Side;
use crate::sequence::Source;
use crate::sequence::fetcher;
use crate::sequence::reverse_complement;
use crate::sequence::reverse_interval;
use crate::tile::Range;
use crate::transcript::Transcript;

/// The number of nucleotides in a codon.
const CODON: Number = CODON_LENGTH as Number;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to reconstructing a reading frame.
#[derive(Debug)]
pub enum Error {
    /// The window does not lie on the chromosome of the transcript.
    MismatchedChromosome(String, String),

    /// Fetching the nucleotides outside of the tile failed.
    Fetch(fetcher::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MismatchedChromosome(window, transcript) => write!(
                f,
                "window on `{window}` does not match transcript chromosome `{transcript}`"
            ),
            Error::Fetch(err) => write!(f, "fetch error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Transcription space
////////////////////////////////////////////////////////////////////////////////////////

/// The mapping between chromosome coordinates and transcription space.
#[derive(Clone, Copy, Debug)]
struct Space {
    /// Whether the transcript lies on the negative strand.
    reverse: bool,

    /// The length of the chromosome.
    chrom_length: Number,
}

impl Space {
    /// Maps a half-open interval into transcription space.
    fn interval(&self, start: Number, end: Number) -> (Number, Number) {
        if self.reverse {
            reverse_interval(start, end, self.chrom_length)
        } else {
            (start, end)
        }
    }

    /// Maps a single position in transcription space back onto the
    /// chromosome.
    fn position(&self, position: Number) -> Number {
        if self.reverse {
            self.chrom_length - 1 - position
        } else {
            position
        }
    }

    /// Reads a forward strand sequence in transcription order.
    fn sequence(&self, sequence: &str) -> String {
        if self.reverse {
            reverse_complement(sequence)
        } else {
            sequence.to_string()
        }
    }
}

/// A nucleotide of the coding sequence: its index within the coding
/// sequence, its position in transcription space and its letter.
type Nucleotide = (Number, Number, u8);

/// Finds the contiguous range holding a run of coding sequence indices.
///
/// Returns `None` if the indices do not map onto adjacent positions.
fn contiguous_range(
    segments: &Segments,
    first: Number,
    count: Number,
) -> Option<(Number, Number)> {
    let start = segments.position(first)?;

    for i in 1..count {
        if segments.position(first + i)? != start + i {
            return None;
        }
    }

    Some((start, start + count))
}

////////////////////////////////////////////////////////////////////////////////////////
// Reconstruction
////////////////////////////////////////////////////////////////////////////////////////

/// Reconstructs the codons of a transcript that fall on one tile window.
///
/// `window` is the part of the tile on the chromosome of the transcript
/// together with its forward strand sequence, and `chrom_length` is the
/// length of that chromosome. Codons are returned in transcription order.
/// Non-coding and unstranded transcripts have no codons.
///
/// Codons cut by the window boundary are completed with nucleotides fetched
/// from outside of the window. A boundary codon that cannot be completed from
/// a single contiguous range, or that would run past the end of the coding
/// sequence, is dropped with a warning.
///
/// # Examples
///
/// ```
/// use txtrack::chromosome::Index;
/// use txtrack::codon::AminoAcid;
/// use txtrack::frame;
/// use txtrack::sequence::Fetcher;
/// use txtrack::sequence::InMemory;
/// use txtrack::tile::Range;
/// use txtrack::transcript::Base;
/// use txtrack::transcript::Transcript;
///
/// let mut source = InMemory::new();
/// source.insert("chr1", b"CCATGGCCTAACC".to_vec());
/// let fetcher = Fetcher::new(source);
///
/// let chromosomes = Index::try_new(["chr1"], [13])?;
/// let transcript = Transcript::parse(
///     "chr1\t2\t11\tA\t1\t+\tG\tT\tprotein_coding\t2\t11\t2\t8",
///     &chromosomes,
///     Base::Zero,
/// )?;
///
/// let window = (Range::new("chr1", 3, 13, 3), String::from("TGGCCTAACC"));
/// let codons = pollster::block_on(frame::reconstruct(&fetcher, &transcript, &window, 13))?;
///
/// let amino_acids = codons.iter().map(|c| c.amino_acid()).collect::<Vec<_>>();
/// assert_eq!(
///     amino_acids,
///     vec![AminoAcid::Methionine, AminoAcid::Alanine, AminoAcid::Stop]
/// );
/// assert_eq!(codons[0].pos_start(), 2);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub async fn reconstruct<S>(
    fetcher: &Fetcher<S>,
    transcript: &Transcript,
    window: &(Range, String),
    chrom_length: Number,
) -> Result<Vec<Codon>>
where
    S: Source,
{
    let (range, sequence) = window;

    if range.chrom() != transcript.chrom() {
        return Err(Error::MismatchedChromosome(
            range.chrom().to_string(),
            transcript.chrom().to_string(),
        ));
    }

    let Some((coding_start, coding_end)) = transcript.coding() else {
        return Ok(Vec::new());
    };

    let Some(strand) = transcript.strand() else {
        debug!(
            "transcript `{}` has a coding range but no strand",
            transcript.id()
        );
        return Ok(Vec::new());
    };

    let space = Space {
        reverse: matches!(strand, Strand::Negative),
        chrom_length,
    };

    //////////////////////////////////////////////////////////////////////////
    // Offsets and masking
    //////////////////////////////////////////////////////////////////////////

    let mut exons = transcript
        .exons()
        .map(|(start, end)| space.interval(start, end))
        .collect::<Vec<_>>();
    if space.reverse {
        exons.reverse();
    }

    let coding = space.interval(coding_start, coding_end);
    let segments = Segments::new(&exons, coding);

    let (tile_start, _) = space.interval(range.start(), range.end());
    let tile_sequence = space.sequence(sequence);
    let mask = intersect::mask(&tile_sequence, tile_start, &exons, coding);

    let Some(first) = mask.iter().position(Option::is_some) else {
        return Ok(Vec::new());
    };
    let last = mask.iter().rposition(Option::is_some).unwrap_or(first);

    let first = tile_start + first as Number;
    let last = tile_start + last as Number;

    let (Some(segment), Some(first_index), Some(last_index)) = (
        segments.find(first),
        segments.cds_index(first),
        segments.cds_index(last),
    ) else {
        return Ok(Vec::new());
    };

    //////////////////////////////////////////////////////////////////////////
    // Boundary completion
    //////////////////////////////////////////////////////////////////////////

    let tile_offset = Number::from(offsets::tile_offset(first, segment));
    let lead = (CODON - tile_offset) % CODON;

    let left = if lead > 0 {
        let range = contiguous_range(&segments, first_index - lead, lead);
        if range.is_none() {
            warn!(
                "transcript `{}`: the codon before position {} is not contiguous, dropping it",
                transcript.id(),
                space.position(first)
            );
        }
        range
    } else {
        None
    };

    let trail = (CODON - (last_index + 1) % CODON) % CODON;

    let right = if trail > 0 {
        if last_index + trail >= segments.cds_length() {
            warn!(
                "transcript `{}`: the coding sequence ends within a codon, dropping it",
                transcript.id()
            );
            None
        } else {
            let range = contiguous_range(&segments, last_index + 1, trail);
            if range.is_none() {
                warn!(
                    "transcript `{}`: the codon after position {} is not contiguous, dropping it",
                    transcript.id(),
                    space.position(last)
                );
            }
            range
        }
    } else {
        None
    };

    let excess = if left.is_some() || right.is_some() {
        fetcher
            .get_excess_nucleotides(transcript.chrom(), chrom_length, strand, left, right)
            .await
            .map_err(Error::Fetch)?
    } else {
        Vec::new()
    };

    //////////////////////////////////////////////////////////////////////////
    // Assembly in coding sequence order
    //////////////////////////////////////////////////////////////////////////

    let mut nucleotides = Vec::<Nucleotide>::new();

    for item in &excess {
        let value = space.sequence(item.value());

        let (index, position) = match (item.side(), left, right) {
            (Side::Left, Some((start, _)), _) => (first_index - lead, start),
            (Side::Right, _, Some((start, _))) => (last_index + 1, start),
            _ => continue,
        };

        nucleotides.extend(
            value
                .bytes()
                .enumerate()
                .map(|(i, letter)| (index + i as Number, position + i as Number, letter)),
        );
    }

    let mut index = first_index;
    for (i, letter) in mask.iter().enumerate() {
        if let Some(letter) = letter {
            nucleotides.push((index, tile_start + i as Number, *letter));
            index += 1;
        }
    }

    nucleotides.sort_by_key(|(index, _, _)| *index);

    Ok(translate(transcript, &space, &nucleotides))
}

/// Reads coding nucleotides three at a time and translates them.
///
/// Codons with fewer than three nucleotides are skipped.
fn translate(transcript: &Transcript, space: &Space, nucleotides: &[Nucleotide]) -> Vec<Codon> {
    let mut codons = Vec::new();
    let mut i = 0;

    while i < nucleotides.len() {
        let codon = nucleotides[i].0 / CODON;
        let group = nucleotides[i..]
            .iter()
            .take_while(|(index, _, _)| index / CODON == codon)
            .collect::<Vec<_>>();
        i += group.len();

        if group.len() != CODON_LENGTH {
            continue;
        }

        let triplet = group
            .iter()
            .map(|(_, _, letter)| char::from(letter.to_ascii_uppercase()))
            .collect::<String>();

        let Some(amino_acid) = codon::translate(&triplet) else {
            warn!(
                "transcript `{}`: cannot translate `{triplet}`, skipping it",
                transcript.id()
            );
            continue;
        };

        let positions = [group[0].1, group[1].1, group[2].1]
            .map(|position| transcript.chrom_offset() + space.position(position));

        codons.push(Codon::new(positions, amino_acid));
    }

    codons
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::chromosome;
    use crate::codon::AminoAcid;
    use crate::sequence::InMemory;
    use crate::transcript::Base;

    use super::*;

    /// A chromosome of 1000 nucleotides repeating `ATG`.
    fn chromosome() -> String {
        "ATG".repeat(334)[..1000].to_string()
    }

    fn fetcher(sequence: &str) -> Fetcher<InMemory> {
        let mut source = InMemory::new();
        source.insert("chr1", sequence.as_bytes().to_vec());
        Fetcher::new(source)
    }

    fn transcript(
        strand: &str,
        exons: &[(Number, Number)],
        coding: (Number, Number),
    ) -> Transcript {
        let chromosomes = chromosome::Index::try_new(["chr1"], [1000]).unwrap();
        let starts = exons
            .iter()
            .map(|(start, _)| start.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let ends = exons
            .iter()
            .map(|(_, end)| end.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let tx_start = exons[0].0;
        let tx_end = exons[exons.len() - 1].1;

        let line = format!(
            "chr1\t{tx_start}\t{tx_end}\tA\t1\t{strand}\tG\tT\tprotein_coding\t{starts}\t{ends}\t{}\t{}",
            coding.0,
            coding.1 - 3
        );

        Transcript::parse(&line, &chromosomes, Base::Zero).unwrap()
    }

    fn window(sequence: &str, start: Number, end: Number) -> (Range, String) {
        (
            Range::new("chr1", start, end, start),
            sequence[start as usize..end as usize].to_string(),
        )
    }

    fn run(
        sequence: &str,
        transcript: &Transcript,
        start: Number,
        end: Number,
    ) -> Vec<Codon> {
        pollster::block_on(reconstruct(
            &fetcher(sequence),
            transcript,
            &window(sequence, start, end),
            1000,
        ))
        .unwrap()
    }

    #[test]
    fn test_single_exon() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 130)], (100, 130));
        let codons = run(&sequence, &transcript, 0, 1000);

        assert_eq!(codons.len(), 10);
        assert_eq!(codons[0].pos_start(), 100);
        assert_eq!(codons[0].pos_end(), 102);
        assert!(codons.iter().all(|codon| !codon.split_across_boundary()));
        assert!(codons
            .iter()
            .all(|codon| codon.pos_end() - codon.pos_start() == 2));
    }

    #[test]
    fn test_exons_in_frame() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 109), (200, 212)], (100, 212));
        let codons = run(&sequence, &transcript, 0, 1000);

        assert_eq!(codons.len(), 7);
        assert!(codons.iter().all(|codon| !codon.split_across_boundary()));
        assert!(codons.iter().all(|codon| codon.pos_end() - codon.pos_start() == 2));
        assert_eq!(codons[3].pos_start(), 200);
    }

    #[test]
    fn test_codon_split_across_exons() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 107), (200, 215)], (100, 215));
        let codons = run(&sequence, &transcript, 0, 1000);

        assert_eq!(codons.len(), 7);
        assert!(codons[2].split_across_boundary());
        assert_eq!(codons[2].positions(), &[106, 200, 201]);
        assert_eq!(codons[2].segments(), vec![(106, 106), (200, 201)]);
        assert_eq!(
            codons
                .iter()
                .filter(|codon| codon.split_across_boundary())
                .count(),
            1
        );
    }

    #[test]
    fn test_codons_completed_across_tiles() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 107), (200, 215)], (100, 215));

        let left = run(&sequence, &transcript, 0, 125);
        let right = run(&sequence, &transcript, 125, 250);

        assert_eq!(left.len(), 3);
        assert_eq!(left[2].positions(), &[106, 200, 201]);

        assert_eq!(right.len(), 5);
        assert_eq!(right[0].positions(), &[106, 200, 201]);
        assert_eq!(right[0].amino_acid(), left[2].amino_acid());
    }

    #[test]
    fn test_tile_boundary_within_an_exon() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 130)], (100, 130));

        let left = run(&sequence, &transcript, 0, 110);
        let right = run(&sequence, &transcript, 110, 1000);

        assert_eq!(left.len(), 4);
        assert_eq!(left[3].positions(), &[109, 110, 111]);
        assert_eq!(right.len(), 7);
        assert_eq!(right[0].positions(), &[109, 110, 111]);
    }

    #[test]
    fn test_non_contiguous_boundary_codon_is_dropped() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 101), (200, 201), (300, 310)], (100, 310));

        let codons = run(&sequence, &transcript, 250, 1000);

        assert_eq!(codons.len(), 3);
        assert_eq!(codons[0].positions(), &[301, 302, 303]);
    }

    #[test]
    fn test_translation() {
        let mut sequence = "C".repeat(1000);
        sequence.replace_range(100..109, "ATGGCCTAA");
        let transcript = transcript("+", &[(100, 109)], (100, 109));

        let codons = run(&sequence, &transcript, 0, 1000);
        let amino_acids = codons
            .iter()
            .map(|codon| codon.amino_acid())
            .collect::<Vec<_>>();

        assert_eq!(
            amino_acids,
            vec![AminoAcid::Methionine, AminoAcid::Alanine, AminoAcid::Stop]
        );
    }

    #[test]
    fn test_negative_strand() {
        let mut sequence = "C".repeat(1000);
        // TTA GGC CAT reads ATG GCC TAA on the negative strand.
        sequence.replace_range(100..109, "TTAGGCCAT");
        let transcript = transcript("-", &[(100, 109)], (100, 109));

        let codons = run(&sequence, &transcript, 0, 1000);
        let amino_acids = codons
            .iter()
            .map(|codon| codon.amino_acid())
            .collect::<Vec<_>>();

        assert_eq!(
            amino_acids,
            vec![AminoAcid::Methionine, AminoAcid::Alanine, AminoAcid::Stop]
        );
        assert_eq!(codons[0].positions(), &[108, 107, 106]);
        assert_eq!(codons[0].pos_start(), 106);
        assert_eq!(codons[2].pos_end(), 102);
    }

    #[test]
    fn test_negative_strand_split_codon_across_tiles() {
        let mut sequence = "C".repeat(1000);
        // Coding sequence ATG GCC TAA with an intron after `ATGG`.
        sequence.replace_range(100..105, "TTAGG");
        sequence.replace_range(200..204, "CCAT");
        let transcript = transcript("-", &[(100, 105), (200, 204)], (100, 204));

        let whole = run(&sequence, &transcript, 0, 1000);
        assert_eq!(whole.len(), 3);
        assert_eq!(whole[1].positions(), &[200, 104, 103]);
        assert!(whole[1].split_across_boundary());

        let left = run(&sequence, &transcript, 0, 150);
        assert_eq!(left.len(), 2);
        assert_eq!(left[0], whole[1]);

        let right = run(&sequence, &transcript, 150, 1000);
        assert_eq!(right.len(), 2);
        assert_eq!(right[1], whole[1]);

        assert_eq!(
            whole
                .iter()
                .map(|codon| codon.amino_acid())
                .collect::<Vec<_>>(),
            vec![AminoAcid::Methionine, AminoAcid::Alanine, AminoAcid::Stop]
        );
    }

    #[test]
    fn test_incomplete_coding_sequence() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 110)], (100, 110));

        let codons = run(&sequence, &transcript, 0, 1000);
        assert_eq!(codons.len(), 3);
    }

    #[test]
    fn test_noncoding_window() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 130)], (100, 130));

        assert!(run(&sequence, &transcript, 500, 1000).is_empty());
    }

    #[test]
    fn test_mismatched_window() {
        let sequence = chromosome();
        let transcript = transcript("+", &[(100, 130)], (100, 130));
        let window = (Range::new("chr2", 0, 10, 1000), String::from("ACGTACGTAC"));

        let err = pollster::block_on(reconstruct(&fetcher(&sequence), &transcript, &window, 1000))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "window on `chr2` does not match transcript chromosome `chr1`"
        );
    }

    proptest! {
        #[test]
        fn test_exons_in_frame_never_split_codons(
            first in 10u64..100,
            exons in prop::collection::vec((1u64..10, 1u64..50), 1..5),
            negative in any::<bool>(),
            split in 1u64..999,
        ) {
            let mut intervals = Vec::new();
            let mut start = first;
            for (codons, gap) in exons {
                let end = start + codons * 3;
                intervals.push((start, end));
                start = end + gap;
            }

            let coding = (intervals[0].0, intervals[intervals.len() - 1].1);
            let strand = if negative { "-" } else { "+" };
            let transcript = transcript(strand, &intervals, coding);
            let sequence = chromosome();

            let whole = run(&sequence, &transcript, 0, 1000);
            let total = intervals.iter().map(|(start, end)| end - start).sum::<Number>();
            prop_assert_eq!(whole.len() as Number, total / 3);

            let left = run(&sequence, &transcript, 0, split);
            let right = run(&sequence, &transcript, split, 1000);

            for codon in whole.iter().chain(&left).chain(&right) {
                prop_assert!(!codon.split_across_boundary());
                prop_assert_eq!(codon.pos_end() - codon.pos_start(), 2);
            }
        }
    }
}
