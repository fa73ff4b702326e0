//! Tileset metadata.
//!
//! A tileset describes how the flattened genome is cut into tiles at each
//! zoom level. It arrives as JSON from the host ([`Info`]) and is validated
//! into a [`Tileset`], which owns the [`chromosome::Index`] used for every
//! coordinate conversion in the track.

use std::io::Read;
use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;
use serde::Deserialize;
use serde::Serialize;

use crate::chromosome;

/// The delimiter between entries of `chrom_sizes` and `chrom_names`.
pub const LIST_DELIMITER: char = '\t';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with interpreting tileset metadata.
#[derive(Debug)]
pub enum ParseError {
    /// A chromosome size could not be parsed.
    InvalidChromosomeSize(String, ParseIntError),

    /// The `min_pos` list was empty.
    MissingMinPos,

    /// The `max_pos` list was empty.
    MissingMaxPos,

    /// The maximum width was not a positive, finite number.
    InvalidMaxWidth(f64),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidChromosomeSize(value, err) => {
                write!(f, "invalid chromosome size `{value}`: {err}")
            }
            ParseError::MissingMinPos => write!(f, "missing minimum position"),
            ParseError::MissingMaxPos => write!(f, "missing maximum position"),
            ParseError::InvalidMaxWidth(width) => write!(f, "invalid maximum width: {width}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Tileset`].
#[derive(Debug)]
pub enum Error {
    /// The metadata was not valid JSON.
    Json(serde_json::Error),

    /// The metadata could not be interpreted.
    Parse(ParseError),

    /// The chromosome lists were malformed.
    Chromosome(chromosome::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Json(err) => write!(f, "json error: {err}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
            Error::Chromosome(err) => write!(f, "chromosome error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Raw metadata
////////////////////////////////////////////////////////////////////////////////////////

/// Tileset metadata as delivered by the host.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Info {
    /// The deepest zoom level.
    max_zoom: u32,

    /// The width of the tile at zoom level zero.
    max_width: f64,

    /// The minimum position of the tileset.
    min_pos: Vec<f64>,

    /// The maximum position of the tileset.
    max_pos: Vec<f64>,

    /// The tab-delimited chromosome lengths.
    chrom_sizes: String,

    /// The tab-delimited chromosome names.
    chrom_names: String,
}

impl Info {
    /// Creates new tileset metadata.
    pub fn new(
        max_zoom: u32,
        max_width: f64,
        min_pos: f64,
        max_pos: f64,
        chrom_sizes: impl Into<String>,
        chrom_names: impl Into<String>,
    ) -> Self {
        Self {
            max_zoom,
            max_width,
            min_pos: vec![min_pos],
            max_pos: vec![max_pos],
            chrom_sizes: chrom_sizes.into(),
            chrom_names: chrom_names.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Tileset
////////////////////////////////////////////////////////////////////////////////////////

/// Validated tileset metadata.
#[derive(Clone, Debug)]
pub struct Tileset {
    /// The deepest zoom level.
    max_zoom: u32,

    /// The width of the tile at zoom level zero.
    max_width: f64,

    /// The minimum position.
    min_pos: f64,

    /// The maximum position.
    max_pos: f64,

    /// The chromosomes of the tileset.
    chromosomes: chromosome::Index,
}

impl Tileset {
    /// Reads and validates tileset metadata from a JSON reader.
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: Read,
    {
        let info = serde_json::from_reader::<_, Info>(reader).map_err(Error::Json)?;
        Self::try_from(info)
    }

    /// Gets the deepest zoom level.
    pub fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    /// Gets the width of the tile at zoom level zero.
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Gets the minimum position.
    pub fn min_pos(&self) -> f64 {
        self.min_pos
    }

    /// Gets the maximum position.
    pub fn max_pos(&self) -> f64 {
        self.max_pos
    }

    /// Gets the chromosome index.
    pub fn chromosomes(&self) -> &chromosome::Index {
        &self.chromosomes
    }

    /// Gets the width of a single tile at the given zoom level.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::tileset::Info;
    /// use txtrack::tileset::Tileset;
    ///
    /// let tileset = Tileset::try_from(Info::new(2, 1024.0, 0.0, 1000.0, "1000", "chr1"))?;
    ///
    /// assert_eq!(tileset.tile_width(0), 1024.0);
    /// assert_eq!(tileset.tile_width(2), 256.0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn tile_width(&self, zoom: u32) -> f64 {
        self.max_width / 2f64.powi(zoom as i32)
    }
}

impl TryFrom<Info> for Tileset {
    type Error = Error;

    fn try_from(info: Info) -> Result<Self> {
        if !(info.max_width.is_finite() && info.max_width > 0.0) {
            return Err(Error::Parse(ParseError::InvalidMaxWidth(info.max_width)));
        }

        let min_pos = *info
            .min_pos
            .first()
            .ok_or(Error::Parse(ParseError::MissingMinPos))?;
        let max_pos = *info
            .max_pos
            .first()
            .ok_or(Error::Parse(ParseError::MissingMaxPos))?;

        let names = split_list(&info.chrom_names);
        let lengths = split_list(&info.chrom_sizes)
            .into_iter()
            .map(|value| {
                Number::from_str(value).map_err(|err| {
                    Error::Parse(ParseError::InvalidChromosomeSize(value.to_string(), err))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let chromosomes = chromosome::Index::try_new(names, lengths).map_err(Error::Chromosome)?;

        Ok(Self {
            max_zoom: info.max_zoom,
            max_width: info.max_width,
            min_pos,
            max_pos,
            chromosomes,
        })
    }
}

impl FromStr for Tileset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let info = serde_json::from_str::<Info>(s).map_err(Error::Json)?;
        Self::try_from(info)
    }
}

/// Splits a tab-delimited list, ignoring a trailing delimiter.
fn split_list(value: &str) -> Vec<&str> {
    value
        .trim_end_matches(LIST_DELIMITER)
        .split(LIST_DELIMITER)
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "max_zoom": 3,
        "max_width": 2048,
        "min_pos": [0],
        "max_pos": [1500],
        "chrom_sizes": "1000\t500",
        "chrom_names": "chr1\tchr2"
    }"#;

    #[test]
    fn test_parse_json() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tileset = JSON.parse::<Tileset>()?;

        assert_eq!(tileset.max_zoom(), 3);
        assert_eq!(tileset.max_width(), 2048.0);
        assert_eq!(tileset.min_pos(), 0.0);
        assert_eq!(tileset.max_pos(), 1500.0);
        assert_eq!(tileset.chromosomes().len(), 2);
        assert_eq!(tileset.chromosomes().total_length(), 1500);
        assert_eq!(tileset.tile_width(3), 256.0);

        Ok(())
    }

    #[test]
    fn test_from_reader() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tileset = Tileset::from_reader(JSON.as_bytes())?;
        assert_eq!(tileset.chromosomes().get("chr2").unwrap().absolute_start(), 1000);
        Ok(())
    }

    #[test]
    fn test_mismatched_chromosome_lists() {
        let info = Info::new(3, 2048.0, 0.0, 1500.0, "1000\t500", "chr1");
        let err = Tileset::try_from(info).unwrap_err();

        assert_eq!(
            err.to_string(),
            "chromosome error: build error: mismatched chromosome lists: 1 names but 2 lengths"
        );
    }

    #[test]
    fn test_invalid_chromosome_size() {
        let info = Info::new(3, 2048.0, 0.0, 1500.0, "1000\tfoo", "chr1\tchr2");
        let err = Tileset::try_from(info).unwrap_err();

        assert_eq!(
            err.to_string(),
            "parse error: invalid chromosome size `foo`: invalid digit found in string"
        );
    }

    #[test]
    fn test_invalid_max_width() {
        let info = Info::new(3, 0.0, 0.0, 1500.0, "1000", "chr1");
        let err = Tileset::try_from(info).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::InvalidMaxWidth(_))));
    }

    #[test]
    fn test_trailing_delimiter() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tileset = Tileset::try_from(Info::new(1, 2.0, 0.0, 2.0, "1\t1\t", "a\tb\t"))?;
        assert_eq!(tileset.chromosomes().len(), 2);
        Ok(())
    }

    #[test]
    fn test_invalid_json() {
        let err = "{".parse::<Tileset>().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
