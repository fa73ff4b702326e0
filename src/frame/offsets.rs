//! Frame offsets of exons.
//!
//! Exons are given in transcription order and in transcription space (see
//! [the module documentation](super)). The frame offset of an exon is the
//! number of its coding nucleotides that complete a codon begun in the
//! previous exons, so the first full codon of the exon starts that many
//! nucleotides into its coding part.

use omics::coordinate::position::Number;

/// The number of nucleotides in a codon.
const CODON_LENGTH: Number = 3;

/// Gets the number of coding nucleotides in an exon.
pub fn coding_length(exon: (Number, Number), coding: (Number, Number)) -> Number {
    let start = exon.0.max(coding.0);
    let end = exon.1.min(coding.1);
    end.saturating_sub(start)
}

/// Computes the frame offset of every exon.
///
/// The first exon has an offset of zero. Each following exon adds
/// `(3 - previous coding length % 3) % 3` to the running offset, modulo
/// three. Exons outside of the coding range contribute nothing.
///
/// # Examples
///
/// ```
/// use txtrack::frame::offsets::exon_offsets;
///
/// assert_eq!(exon_offsets(&[(100, 109), (200, 212)], (100, 212)), vec![0, 0]);
/// assert_eq!(exon_offsets(&[(100, 107), (200, 215)], (100, 215)), vec![0, 2]);
/// assert_eq!(
///     exon_offsets(&[(100, 101), (200, 201), (300, 310)], (100, 310)),
///     vec![0, 2, 1]
/// );
/// ```
pub fn exon_offsets(exons: &[(Number, Number)], coding: (Number, Number)) -> Vec<u8> {
    let mut offsets = Vec::with_capacity(exons.len());
    let mut accumulated = 0;
    let mut previous = None;

    for exon in exons {
        if let Some(previous) = previous {
            let length = coding_length(previous, coding);
            let local = (CODON_LENGTH - length % CODON_LENGTH) % CODON_LENGTH;
            accumulated = (accumulated + local) % CODON_LENGTH;
        }

        offsets.push(accumulated as u8);
        previous = Some(*exon);
    }

    offsets
}

/// The coding part of an exon.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Segment {
    /// The index of the exon in transcription order.
    exon: usize,

    /// The first coding position.
    start: Number,

    /// The position after the last coding position.
    end: Number,

    /// The number of coding nucleotides in all previous segments.
    cds_start: Number,

    /// The frame offset of the exon.
    offset: u8,
}

impl Segment {
    /// Gets the index of the exon in transcription order.
    pub fn exon(&self) -> usize {
        self.exon
    }

    /// Gets the first coding position.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the position after the last coding position.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the number of coding nucleotides in all previous segments.
    pub fn cds_start(&self) -> Number {
        self.cds_start
    }

    /// Gets the frame offset of the exon.
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Gets the number of coding nucleotides in the segment.
    pub fn len(&self) -> Number {
        self.end - self.start
    }

    /// Returns whether the segment is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns whether the segment holds a position.
    pub fn contains(&self, position: Number) -> bool {
        self.start <= position && position < self.end
    }
}

/// The coding segments of a transcript with their frame offsets.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Segments(Vec<Segment>);

impl Segments {
    /// Clips every exon to the coding range, keeping the non-empty clips.
    pub fn new(exons: &[(Number, Number)], coding: (Number, Number)) -> Self {
        let offsets = exon_offsets(exons, coding);

        let mut segments = Vec::new();
        let mut cds_start = 0;

        for (exon, ((start, end), offset)) in exons.iter().zip(offsets).enumerate() {
            let length = coding_length((*start, *end), coding);
            if length == 0 {
                continue;
            }

            let start = (*start).max(coding.0);
            segments.push(Segment {
                exon,
                start,
                end: start + length,
                cds_start,
                offset,
            });
            cds_start += length;
        }

        Self(segments)
    }

    /// Gets the segments in transcription order.
    pub fn as_slice(&self) -> &[Segment] {
        &self.0
    }

    /// Gets the length of the coding sequence.
    pub fn cds_length(&self) -> Number {
        self.0
            .last()
            .map(|segment| segment.cds_start + segment.len())
            .unwrap_or_default()
    }

    /// Gets the segment holding a position.
    pub fn find(&self, position: Number) -> Option<&Segment> {
        self.0.iter().find(|segment| segment.contains(position))
    }

    /// Gets the index within the coding sequence of a coding position.
    pub fn cds_index(&self, position: Number) -> Option<Number> {
        self.find(position)
            .map(|segment| segment.cds_start + (position - segment.start))
    }

    /// Gets the position of an index within the coding sequence.
    pub fn position(&self, cds_index: Number) -> Option<Number> {
        self.0
            .iter()
            .find(|segment| {
                segment.cds_start <= cds_index && cds_index < segment.cds_start + segment.len()
            })
            .map(|segment| segment.start + (cds_index - segment.cds_start))
    }
}

/// Computes the tile offset from the first coding position of a tile.
///
/// The tile offset is the number of nucleotides, starting at `first`, that
/// belong to a codon begun before `first`.
///
/// # Examples
///
/// ```
/// use txtrack::frame::offsets::tile_offset;
/// use txtrack::frame::offsets::Segments;
///
/// let segments = Segments::new(&[(100, 107), (200, 215)], (100, 215));
/// let second = &segments.as_slice()[1];
///
/// assert_eq!(tile_offset(200, second), 2);
/// assert_eq!(tile_offset(201, second), 1);
/// assert_eq!(tile_offset(202, second), 0);
/// assert_eq!(tile_offset(203, second), 2);
/// ```
pub fn tile_offset(first: Number, segment: &Segment) -> u8 {
    let anchor = segment.start + Number::from(segment.offset);
    let distance = (first as i128 - anchor as i128).rem_euclid(CODON_LENGTH as i128);
    ((CODON_LENGTH as i128 - distance) % CODON_LENGTH as i128) as u8
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_noncoding_exons_contribute_nothing() {
        let exons = [(10, 20), (30, 40), (100, 107), (200, 215), (300, 320)];
        let offsets = exon_offsets(&exons, (100, 215));

        assert_eq!(offsets, vec![0, 0, 0, 2, 2]);
    }

    #[test]
    fn test_segments() {
        let segments = Segments::new(&[(50, 107), (200, 215), (300, 320)], (100, 210));

        assert_eq!(segments.as_slice().len(), 2);
        assert_eq!(segments.as_slice()[0].start(), 100);
        assert_eq!(segments.as_slice()[0].exon(), 0);
        assert_eq!(segments.as_slice()[1].end(), 210);
        assert_eq!(segments.as_slice()[1].cds_start(), 7);
        assert_eq!(segments.as_slice()[1].offset(), 2);
        assert_eq!(segments.cds_length(), 17);

        assert_eq!(segments.cds_index(106), Some(6));
        assert_eq!(segments.cds_index(200), Some(7));
        assert_eq!(segments.cds_index(150), None);
        assert_eq!(segments.position(7), Some(200));
        assert_eq!(segments.position(17), None);
    }

    proptest! {
        #[test]
        fn test_offsets_are_idempotent_and_track_the_coding_length(
            lengths in prop::collection::vec(1u64..50, 1..12)
        ) {
            let mut exons = Vec::new();
            let mut start = 0;
            for length in &lengths {
                exons.push((start, start + length));
                start += length + 100;
            }
            let coding = (0, start);

            let offsets = exon_offsets(&exons, coding);
            prop_assert_eq!(&offsets, &exon_offsets(&exons, coding));

            let mut cumulative = 0;
            for (offset, length) in offsets.iter().zip(&lengths) {
                prop_assert_eq!(Number::from(*offset), (3 - cumulative % 3) % 3);
                cumulative += length;
            }
        }
    }
}
