//! Windows of reference sequence.

use omics::coordinate::Strand;
use omics::coordinate::position::Number;

use crate::sequence::Source;
use crate::sequence::reverse_interval;
use crate::sequence::source;
use crate::tile;
use crate::tile::Range;
use crate::tile::Tile;
use crate::tileset::Tileset;

/// An error related to a [`Fetcher`].
#[derive(Debug)]
pub enum Error {
    /// The tile could not be created.
    Tile(tile::Error),

    /// A range query failed.
    Source(source::Error),

    /// The exon start and exon end lists have different lengths.
    MismatchedExonLists(usize, usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Tile(err) => write!(f, "tile error: {err}"),
            Error::Source(err) => write!(f, "source error: {err}"),
            Error::MismatchedExonLists(starts, ends) => write!(
                f,
                "mismatched exon lists: {starts} starts but {ends} ends"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The side of a tile that extra nucleotides complete.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    /// Before the first coding position of the tile.
    Left,

    /// After the last coding position of the tile.
    Right,
}

/// Nucleotides fetched from outside of a tile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Excess {
    /// The side of the tile.
    side: Side,

    /// The nucleotides as read from the forward strand.
    value: String,
}

impl Excess {
    /// Gets the side of the tile.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Gets the nucleotides as read from the forward strand.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes self and returns the nucleotides.
    pub fn into_value(self) -> String {
        self.value
    }
}

/// Fetches windows of reference sequence from a [`Source`].
#[derive(Clone, Debug)]
pub struct Fetcher<S> {
    /// The inner source.
    source: S,
}

impl<S> Fetcher<S>
where
    S: Source,
{
    /// Creates a new [`Fetcher`].
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Gets a reference to the inner source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes self and returns the inner source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Fetches the sequence of every chromosome range covered by a tile.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::sequence::Fetcher;
    /// use txtrack::sequence::InMemory;
    /// use txtrack::tileset::Info;
    /// use txtrack::tileset::Tileset;
    ///
    /// let source = InMemory::from_reader(&b">chr1\nAAAACCCC\n>chr2\nGGGGTTTT\n"[..])?;
    /// let tileset = Tileset::try_from(Info::new(2, 16.0, 0.0, 16.0, "8\t8", "chr1\tchr2"))?;
    ///
    /// let fetcher = Fetcher::new(source);
    /// let windows = pollster::block_on(fetcher.get_tile(1, 0, &tileset))?;
    /// assert_eq!(windows.len(), 1);
    /// assert_eq!(windows[0].1, "AAAACCCC");
    ///
    /// let windows = pollster::block_on(fetcher.get_tile(0, 0, &tileset))?;
    /// assert_eq!(windows.len(), 2);
    /// assert_eq!(windows[1].0.chrom(), "chr2");
    /// assert_eq!(windows[1].1, "GGGGTTTT");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub async fn get_tile(
        &self,
        zoom: u32,
        index: u64,
        tileset: &Tileset,
    ) -> Result<Vec<(Range, String)>> {
        let tile = Tile::try_new(zoom, index, tileset).map_err(Error::Tile)?;
        self.get_ranges(tile::resolve(&tile, tileset.chromosomes()))
            .await
    }

    /// Fetches the sequence of each range, in order.
    pub async fn get_ranges(&self, ranges: Vec<Range>) -> Result<Vec<(Range, String)>> {
        let mut windows = Vec::with_capacity(ranges.len());

        for range in ranges {
            let value = self
                .source
                .fetch_range(range.chrom(), range.start(), range.end())
                .await
                .map_err(Error::Source)?;
            windows.push((range, value));
        }

        Ok(windows)
    }

    /// Fetches the coding sequence of a transcript: every exon clipped to the
    /// coding range, concatenated in exon order.
    ///
    /// Exons that fall entirely outside of the coding range are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::sequence::Fetcher;
    /// use txtrack::sequence::InMemory;
    ///
    /// let source = InMemory::from_reader(&b">chr1\nAAAACCCCGGGGTTTT\n"[..])?;
    /// let fetcher = Fetcher::new(source);
    ///
    /// let cds = pollster::block_on(fetcher.get_sub_sequence("chr1", &[0, 8], &[6, 16], 2, 10))?;
    /// assert_eq!(cds, "AACCGG");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub async fn get_sub_sequence(
        &self,
        chrom: &str,
        exon_starts: &[Number],
        exon_ends: &[Number],
        coding_start: Number,
        coding_end: Number,
    ) -> Result<String> {
        if exon_starts.len() != exon_ends.len() {
            return Err(Error::MismatchedExonLists(
                exon_starts.len(),
                exon_ends.len(),
            ));
        }

        let mut sequence = String::new();

        for (start, end) in exon_starts.iter().zip(exon_ends.iter()) {
            let clipped_start = (*start).max(coding_start).min(*end);
            let clipped_end = (*end).min(coding_end).max(*start);

            if clipped_start >= clipped_end {
                continue;
            }

            let value = self
                .source
                .fetch_range(chrom, clipped_start, clipped_end)
                .await
                .map_err(Error::Source)?;
            sequence.push_str(&value);
        }

        Ok(sequence)
    }

    /// Fetches the nucleotides needed to complete the codons at either side of
    /// a tile.
    ///
    /// The ranges are given in transcription space. On the negative strand
    /// they are reflected onto the forward strand before they are fetched;
    /// the values are returned as read from the forward strand, so the caller
    /// reverse complements them.
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use txtrack::sequence::Fetcher;
    /// use txtrack::sequence::InMemory;
    /// use txtrack::sequence::Side;
    ///
    /// let source = InMemory::from_reader(&b">chr1\nAACCGGTT\n"[..])?;
    /// let fetcher = Fetcher::new(source);
    ///
    /// let excess = pollster::block_on(fetcher.get_excess_nucleotides(
    ///     "chr1",
    ///     8,
    ///     &Strand::Negative,
    ///     Some((0, 2)),
    ///     None,
    /// ))?;
    ///
    /// assert_eq!(excess.len(), 1);
    /// assert_eq!(excess[0].side(), Side::Left);
    /// assert_eq!(excess[0].value(), "TT");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub async fn get_excess_nucleotides(
        &self,
        chrom: &str,
        chrom_length: Number,
        strand: &Strand,
        left: Option<(Number, Number)>,
        right: Option<(Number, Number)>,
    ) -> Result<Vec<Excess>> {
        let mut excess = Vec::new();

        for (side, range) in [(Side::Left, left), (Side::Right, right)] {
            let Some((start, end)) = range else {
                continue;
            };

            let (start, end) = match strand {
                Strand::Positive => (start, end),
                Strand::Negative => reverse_interval(start, end, chrom_length),
            };

            let value = self
                .source
                .fetch_range(chrom, start, end)
                .await
                .map_err(Error::Source)?;
            excess.push(Excess { side, value });
        }

        Ok(excess)
    }
}
