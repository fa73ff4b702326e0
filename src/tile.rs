//! Tiles and the coordinate model that maps them onto chromosomes.
//!
//! A tile is a fixed-width slice of the flattened genome at a particular zoom
//! level. At zoom level `z`, each tile is `max_width / 2^z` wide and tile `i`
//! starts at `min_pos + i * width`. Because chromosomes are laid end to end, a
//! tile may straddle the end of one chromosome and the start of the next; the
//! [`resolve()`] function splits such a tile into one [`Range`] per
//! chromosome.

use std::str::FromStr;
use std::sync::LazyLock;

use omics::coordinate::position::Number;
use regex::Regex;

use crate::chromosome;
use crate::tileset::Tileset;

/// The pattern of a textual tile id (`<zoom>.<index>`).
static TILE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)$").unwrap());

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to a [`Tile`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A textual tile id did not have the form `<zoom>.<index>`.
    InvalidId(String),

    /// The zoom level exceeds the deepest zoom level of the tileset.
    ZoomOutOfRange(u32, u32),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidId(id) => write!(f, "invalid tile id: `{id}`"),
            Error::ZoomOutOfRange(zoom, max) => {
                write!(f, "zoom level {zoom} exceeds the maximum zoom level {max}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Key
////////////////////////////////////////////////////////////////////////////////////////

/// The identity of a tile: its zoom level and its index at that level.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Key {
    /// The zoom level.
    zoom: u32,

    /// The index of the tile at the zoom level.
    index: u64,
}

impl Key {
    /// Creates a new [`Key`].
    pub fn new(zoom: u32, index: u64) -> Self {
        Self { zoom, index }
    }

    /// Gets the zoom level.
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Gets the index of the tile at the zoom level.
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl FromStr for Key {
    type Err = Error;

    /// Parses a tile id of the form `<zoom>.<index>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::tile::Key;
    ///
    /// let key = "12.3104".parse::<Key>()?;
    /// assert_eq!(key.zoom(), 12);
    /// assert_eq!(key.index(), 3104);
    /// assert_eq!(key.to_string(), "12.3104");
    ///
    /// assert!("12".parse::<Key>().is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let captures = TILE_ID
            .captures(s)
            .ok_or_else(|| Error::InvalidId(s.to_string()))?;

        let zoom = captures[1]
            .parse()
            .map_err(|_| Error::InvalidId(s.to_string()))?;
        let index = captures[2]
            .parse()
            .map_err(|_| Error::InvalidId(s.to_string()))?;

        Ok(Self { zoom, index })
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.zoom, self.index)
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Tile
////////////////////////////////////////////////////////////////////////////////////////

/// A tile and its span on the absolute axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// The identity of the tile.
    key: Key,

    /// The absolute start of the tile.
    abs_start: f64,

    /// The absolute end of the tile.
    abs_end: f64,
}

impl Tile {
    /// Attempts to create the tile with the given zoom level and index.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::tile::Tile;
    /// use txtrack::tileset::Info;
    /// use txtrack::tileset::Tileset;
    ///
    /// let tileset = Tileset::try_from(Info::new(2, 1024.0, 0.0, 1000.0, "1000", "chr1"))?;
    /// let tile = Tile::try_new(2, 1, &tileset)?;
    ///
    /// assert_eq!(tile.abs_start(), 256.0);
    /// assert_eq!(tile.abs_end(), 512.0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(zoom: u32, index: u64, tileset: &Tileset) -> Result<Self> {
        if zoom > tileset.max_zoom() {
            return Err(Error::ZoomOutOfRange(zoom, tileset.max_zoom()));
        }

        let width = tileset.tile_width(zoom);
        let abs_start = tileset.min_pos() + index as f64 * width;

        Ok(Self {
            key: Key::new(zoom, index),
            abs_start,
            abs_end: abs_start + width,
        })
    }

    /// Attempts to create the tile identified by a [`Key`].
    pub fn try_from_key(key: Key, tileset: &Tileset) -> Result<Self> {
        Self::try_new(key.zoom(), key.index(), tileset)
    }

    /// Gets the identity of the tile.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Gets the zoom level of the tile.
    pub fn zoom(&self) -> u32 {
        self.key.zoom()
    }

    /// Gets the index of the tile.
    pub fn index(&self) -> u64 {
        self.key.index()
    }

    /// Gets the absolute start of the tile.
    pub fn abs_start(&self) -> f64 {
        self.abs_start
    }

    /// Gets the absolute end of the tile.
    pub fn abs_end(&self) -> f64 {
        self.abs_end
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Ranges
////////////////////////////////////////////////////////////////////////////////////////

/// The part of a tile that falls on a single chromosome.
///
/// `start` and `end` are chromosome-relative and half-open.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Range {
    /// The chromosome name.
    chrom: String,

    /// The chromosome-relative start.
    start: Number,

    /// The chromosome-relative end.
    end: Number,

    /// The absolute position of `start`.
    absolute_start: Number,
}

impl Range {
    /// Creates a new [`Range`].
    pub fn new(
        chrom: impl Into<String>,
        start: Number,
        end: Number,
        absolute_start: Number,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            absolute_start,
        }
    }

    /// Gets the chromosome name.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Gets the chromosome-relative start.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the chromosome-relative end.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the absolute position of the start.
    pub fn absolute_start(&self) -> Number {
        self.absolute_start
    }

    /// Gets the number of positions in the range.
    pub fn len(&self) -> Number {
        self.end - self.start
    }

    /// Returns whether the range holds no positions.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Converts an absolute tile bound to an integer position, clamped to the
/// genome.
fn clamp(value: f64, total: Number) -> Number {
    if value <= 0.0 {
        0
    } else {
        (value as Number).min(total)
    }
}

/// Resolves a tile to the chromosome ranges it covers, in absolute order.
///
/// The tile start is floored and the tile end is ceiled. Whatever lies beyond
/// the last chromosome is clipped off, so a tile past the end of the genome
/// resolves to nothing.
///
/// # Examples
///
/// ```
/// use txtrack::tile;
/// use txtrack::tile::Tile;
/// use txtrack::tileset::Info;
/// use txtrack::tileset::Tileset;
///
/// let tileset = Tileset::try_from(Info::new(1, 200.0, 0.0, 150.0, "80\t70", "chr1\tchr2"))?;
/// let tile = Tile::try_new(1, 0, &tileset)?;
///
/// let ranges = tile::resolve(&tile, tileset.chromosomes())
///     .iter()
///     .map(|range| range.to_string())
///     .collect::<Vec<_>>();
///
/// assert_eq!(ranges, vec!["chr1:0-80", "chr2:0-20"]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resolve(tile: &Tile, chromosomes: &chromosome::Index) -> Vec<Range> {
    let total = chromosomes.total_length();
    let start = clamp(tile.abs_start().floor(), total);
    let end = clamp(tile.abs_end().ceil(), total);

    let mut ranges = Vec::new();
    let mut cursor = start;

    for entry in chromosomes.entries().iter() {
        if cursor >= end {
            break;
        }

        if entry.absolute_end() <= cursor {
            continue;
        }

        let range_start = cursor.max(entry.absolute_start());
        let range_end = end.min(entry.absolute_end());

        ranges.push(Range::new(
            entry.name(),
            range_start - entry.absolute_start(),
            range_end - entry.absolute_start(),
            range_start,
        ));

        cursor = range_end;
    }

    ranges
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::tileset::Info;

    use super::*;

    fn tileset() -> Tileset {
        Tileset::try_from(Info::new(
            4,
            1600.0,
            0.0,
            1000.0,
            "500\t300\t200",
            "chr1\tchr2\tchr3",
        ))
        .unwrap()
    }

    #[test]
    fn test_tile_within_a_single_chromosome()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tileset = tileset();
        let tile = Tile::try_new(4, 2, &tileset)?;
        let ranges = resolve(&tile, tileset.chromosomes());

        assert_eq!(ranges, vec![Range::new("chr1", 200, 300, 200)]);
        Ok(())
    }

    #[test]
    fn test_tile_spanning_a_chromosome_boundary()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tileset = tileset();
        let tile = Tile::try_new(3, 2, &tileset)?;
        let ranges = resolve(&tile, tileset.chromosomes());

        assert_eq!(
            ranges,
            vec![
                Range::new("chr1", 400, 500, 400),
                Range::new("chr2", 0, 100, 500)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_tile_spanning_several_chromosomes()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tileset = tileset();
        let tile = Tile::try_new(0, 0, &tileset)?;
        let ranges = resolve(&tile, tileset.chromosomes());

        assert_eq!(
            ranges,
            vec![
                Range::new("chr1", 0, 500, 0),
                Range::new("chr2", 0, 300, 500),
                Range::new("chr3", 0, 200, 800),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_tile_clipped_at_the_end_of_the_genome()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tileset = tileset();
        let tile = Tile::try_new(4, 9, &tileset)?;
        let ranges = resolve(&tile, tileset.chromosomes());

        assert_eq!(ranges, vec![Range::new("chr3", 100, 200, 900)]);
        Ok(())
    }

    #[test]
    fn test_tile_beyond_the_genome() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tileset = tileset();
        let tile = Tile::try_new(4, 12, &tileset)?;
        assert!(resolve(&tile, tileset.chromosomes()).is_empty());
        Ok(())
    }

    #[test]
    fn test_zoom_out_of_range() {
        let err = Tile::try_new(5, 0, &tileset()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "zoom level 5 exceeds the maximum zoom level 4"
        );
    }

    #[test]
    fn test_invalid_key() {
        let err = "a.b".parse::<Key>().unwrap_err();
        assert_eq!(err.to_string(), "invalid tile id: `a.b`");
    }

    proptest! {
        #[test]
        fn test_ranges_cover_the_clipped_tile(zoom in 0u32..=4, index in 0u64..20) {
            let tileset = tileset();
            let tile = Tile::try_new(zoom, index, &tileset).unwrap();
            let ranges = resolve(&tile, tileset.chromosomes());

            let total = tileset.chromosomes().total_length();
            let expected = clamp(tile.abs_end().ceil(), total)
                .saturating_sub(clamp(tile.abs_start().floor(), total));
            let covered = ranges.iter().map(|range| range.len()).sum::<u64>();
            prop_assert_eq!(covered, expected);

            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].absolute_start() + pair[0].len(), pair[1].absolute_start());
            }
        }
    }
}
