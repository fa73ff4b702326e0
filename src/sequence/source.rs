//! Sources of reference sequence.

use std::collections::HashMap;
use std::future::Future;
use std::io::BufRead;
use std::io::{self};

use noodles::fasta;
use omics::coordinate::position::Number;

/// An error related to a [`Source`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// The requested sequence does not exist.
    UnknownSequence(String),

    /// The requested range is reversed.
    InvalidRange(String, Number, Number),

    /// The requested range extends past the end of the sequence.
    OutOfRange(String, Number, Number),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::UnknownSequence(name) => write!(f, "unknown sequence `{name}`"),
            Error::InvalidRange(name, start, end) => {
                write!(f, "invalid range {name}:{start}-{end}")
            }
            Error::OutOfRange(name, end, length) => write!(
                f,
                "range end {end} exceeds the length of sequence `{name}` ({length})"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// An indexed source of reference sequence.
///
/// Ranges are 0-based and half-open. The returned value holds exactly
/// `end - start` letters.
pub trait Source {
    /// Fetches the letters of `chrom` within `[start, end)`.
    fn fetch_range(
        &self,
        chrom: &str,
        start: Number,
        end: Number,
    ) -> impl Future<Output = Result<String>>;
}

/// A [`Source`] holding every sequence in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// The sequences by name.
    sequences: HashMap<String, Vec<u8>>,
}

impl InMemory {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every record of a FASTA stream into memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::sequence::InMemory;
    ///
    /// let data = b">chr1\nACGT\nACGT\n>chr2\nTTTT\n";
    /// let source = InMemory::from_reader(&data[..])?;
    ///
    /// assert_eq!(source.length("chr1"), Some(8));
    /// assert_eq!(source.length("chr2"), Some(4));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<R>(inner: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut reader = fasta::io::Reader::new(inner);
        let mut source = Self::new();

        for result in reader.records() {
            let record = result.map_err(Error::Io)?;
            let name = String::from_utf8_lossy(record.name()).to_string();
            source.insert(name, record.sequence().as_ref().to_vec());
        }

        Ok(source)
    }

    /// Adds a sequence, replacing any sequence with the same name.
    pub fn insert(&mut self, name: impl Into<String>, sequence: impl Into<Vec<u8>>) {
        self.sequences.insert(name.into(), sequence.into());
    }

    /// Gets the length of a sequence.
    pub fn length(&self, name: &str) -> Option<Number> {
        self.sequences
            .get(name)
            .map(|sequence| sequence.len() as Number)
    }

    /// Returns whether the source holds no sequences.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Gets the letters of `chrom` within `[start, end)`.
    fn slice(&self, chrom: &str, start: Number, end: Number) -> Result<String> {
        let sequence = self
            .sequences
            .get(chrom)
            .ok_or_else(|| Error::UnknownSequence(chrom.to_string()))?;

        if end < start {
            return Err(Error::InvalidRange(chrom.to_string(), start, end));
        }

        let length = sequence.len() as Number;
        if end > length {
            return Err(Error::OutOfRange(chrom.to_string(), end, length));
        }

        Ok(String::from_utf8_lossy(&sequence[start as usize..end as usize]).to_string())
    }
}

impl Source for InMemory {
    fn fetch_range(
        &self,
        chrom: &str,
        start: Number,
        end: Number,
    ) -> impl Future<Output = Result<String>> {
        std::future::ready(self.slice(chrom, start, end))
    }
}
