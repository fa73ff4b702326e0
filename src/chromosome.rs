//! An index of the chromosomes that make up a flattened, absolute coordinate
//! space.
//!
//! Tiles address the genome as a single axis on which every chromosome is
//! laid end to end in index order. The [`Index`] translates between positions
//! on that axis (absolute positions) and positions relative to the start of
//! the chromosome that contains them.
//!
//! ```text
//! absolute:  0         10        20    25
//!            |---chr1---|---chr2---|chr3|
//! relative:  0         10 0       10 0  5
//! ```

use std::collections::HashMap;

use nonempty::NonEmpty;
use omics::coordinate::position::Number;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to building an [`Index`].
#[derive(Debug, Eq, PartialEq)]
pub enum BuildError {
    /// No chromosomes were provided.
    Empty,

    /// The number of names and the number of lengths differ.
    MismatchedLengths(usize, usize),

    /// A chromosome was given a length of zero.
    InvalidLength(String),

    /// A chromosome name was provided more than once.
    DuplicateName(String),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Empty => write!(f, "no chromosomes were provided"),
            BuildError::MismatchedLengths(names, lengths) => write!(
                f,
                "mismatched chromosome lists: {names} names but {lengths} lengths"
            ),
            BuildError::InvalidLength(name) => {
                write!(f, "chromosome `{name}` must have a non-zero length")
            }
            BuildError::DuplicateName(name) => {
                write!(f, "chromosome `{name}` was provided more than once")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// An error related to a lookup within an [`Index`].
#[derive(Debug, Eq, PartialEq)]
pub enum LookupError {
    /// The absolute position lies outside of the genome.
    AbsoluteOutOfRange(Number, Number),

    /// The chromosome is not part of the index.
    UnknownChromosome(String),

    /// The relative position lies beyond the end of the chromosome.
    RelativeOutOfRange(String, Number, Number),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::AbsoluteOutOfRange(position, total) => write!(
                f,
                "absolute position {position} is outside of the genome (total length {total})"
            ),
            LookupError::UnknownChromosome(name) => write!(f, "unknown chromosome `{name}`"),
            LookupError::RelativeOutOfRange(name, position, length) => write!(
                f,
                "position {position} exceeds the length of chromosome `{name}` ({length})"
            ),
        }
    }
}

impl std::error::Error for LookupError {}

/// An error related to an [`Index`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A build error.
    Build(BuildError),

    /// A lookup error.
    Lookup(LookupError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Build(err) => write!(f, "build error: {err}"),
            Error::Lookup(err) => write!(f, "lookup error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Entry
////////////////////////////////////////////////////////////////////////////////////////

/// A single chromosome placed on the absolute axis.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// The position of the chromosome within the index.
    index: usize,

    /// The chromosome name.
    name: String,

    /// The absolute position of the first base of the chromosome.
    absolute_start: Number,

    /// The length of the chromosome.
    length: Number,
}

impl Entry {
    /// Gets the position of the chromosome within the index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Gets the chromosome name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the absolute position of the first base of the chromosome.
    pub fn absolute_start(&self) -> Number {
        self.absolute_start
    }

    /// Gets the absolute position one past the last base of the chromosome.
    pub fn absolute_end(&self) -> Number {
        self.absolute_start + self.length
    }

    /// Gets the length of the chromosome.
    pub fn length(&self) -> Number {
        self.length
    }

    /// Returns whether the absolute position falls on this chromosome.
    pub fn contains(&self, absolute: Number) -> bool {
        self.absolute_start <= absolute && absolute < self.absolute_end()
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Index
////////////////////////////////////////////////////////////////////////////////////////

/// An ordered index of chromosomes.
///
/// The index is immutable once built and is shared, read-only, by everything
/// that needs to convert coordinates for a tileset.
#[derive(Clone, Debug)]
pub struct Index {
    /// The entries, ordered by absolute start.
    entries: NonEmpty<Entry>,

    /// A lookup from chromosome name to its position in `entries`.
    lookup: HashMap<String, usize>,
}

impl Index {
    /// Attempts to build an [`Index`] from parallel lists of chromosome names
    /// and lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::chromosome::Index;
    ///
    /// let index = Index::try_new(["chr1", "chr2"], [10, 20])?;
    ///
    /// assert_eq!(index.len(), 2);
    /// assert_eq!(index.total_length(), 30);
    /// assert_eq!(index.get("chr2").unwrap().absolute_start(), 10);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new<N, L>(names: N, lengths: L) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        L: IntoIterator<Item = Number>,
    {
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();
        let lengths = lengths.into_iter().collect::<Vec<_>>();

        if names.len() != lengths.len() {
            return Err(Error::Build(BuildError::MismatchedLengths(
                names.len(),
                lengths.len(),
            )));
        }

        let mut entries = Vec::with_capacity(names.len());
        let mut lookup = HashMap::with_capacity(names.len());
        let mut absolute_start = 0;

        for (index, (name, length)) in names.into_iter().zip(lengths).enumerate() {
            if length == 0 {
                return Err(Error::Build(BuildError::InvalidLength(name)));
            }

            if lookup.insert(name.clone(), index).is_some() {
                return Err(Error::Build(BuildError::DuplicateName(name)));
            }

            entries.push(Entry {
                index,
                name,
                absolute_start,
                length,
            });

            absolute_start += length;
        }

        let entries = NonEmpty::from_vec(entries).ok_or(Error::Build(BuildError::Empty))?;

        Ok(Self { entries, lookup })
    }

    /// Gets the entries of the index in absolute order.
    pub fn entries(&self) -> &NonEmpty<Entry> {
        &self.entries
    }

    /// Gets the number of chromosomes in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always returns `false`: an index holds at least one chromosome.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Gets the combined length of all chromosomes.
    pub fn total_length(&self) -> Number {
        self.entries.last().absolute_end()
    }

    /// Gets an entry by chromosome name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.lookup.get(name).and_then(|i| self.entries.get(*i))
    }

    /// Gets the entry containing an absolute position.
    pub fn entry_at(&self, absolute: Number) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.contains(absolute))
    }

    /// Converts an absolute position to a chromosome name and a position
    /// relative to the start of that chromosome.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::chromosome::Index;
    ///
    /// let index = Index::try_new(["chr1", "chr2"], [10, 20])?;
    ///
    /// assert_eq!(index.to_chrom_coord(0)?, ("chr1", 0));
    /// assert_eq!(index.to_chrom_coord(10)?, ("chr2", 0));
    /// assert_eq!(index.to_chrom_coord(29)?, ("chr2", 19));
    /// assert!(index.to_chrom_coord(30).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_chrom_coord(&self, absolute: Number) -> Result<(&str, Number)> {
        let entry = self.entry_at(absolute).ok_or(Error::Lookup(
            LookupError::AbsoluteOutOfRange(absolute, self.total_length()),
        ))?;

        Ok((entry.name(), absolute - entry.absolute_start()))
    }

    /// Converts a chromosome-relative position to an absolute position.
    ///
    /// A position equal to the chromosome length is accepted so that
    /// half-open interval ends can be converted.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::chromosome::Index;
    ///
    /// let index = Index::try_new(["chr1", "chr2"], [10, 20])?;
    ///
    /// assert_eq!(index.to_abs_coord("chr2", 5)?, 15);
    /// assert_eq!(index.to_abs_coord("chr2", 20)?, 30);
    /// assert!(index.to_abs_coord("chr2", 21).is_err());
    /// assert!(index.to_abs_coord("chrM", 0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_abs_coord(&self, name: &str, relative: Number) -> Result<Number> {
        let entry = self.get(name).ok_or_else(|| {
            Error::Lookup(LookupError::UnknownChromosome(name.to_string()))
        })?;

        if relative > entry.length() {
            return Err(Error::Lookup(LookupError::RelativeOutOfRange(
                name.to_string(),
                relative,
                entry.length(),
            )));
        }

        Ok(entry.absolute_start() + relative)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn index() -> Index {
        Index::try_new(["chr1", "chr2", "chr3"], [100, 50, 25]).unwrap()
    }

    #[test]
    fn test_running_sum_of_lengths() {
        let index = index();
        let starts = index
            .entries()
            .iter()
            .map(|entry| (entry.index(), entry.absolute_start()))
            .collect::<Vec<_>>();

        assert_eq!(starts, vec![(0, 0), (1, 100), (2, 150)]);
        assert_eq!(index.total_length(), 175);
    }

    #[test]
    fn test_mismatched_lengths() {
        let err = Index::try_new(["chr1", "chr2"], [100]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "build error: mismatched chromosome lists: 2 names but 1 lengths"
        );
    }

    #[test]
    fn test_empty() {
        let err = Index::try_new(Vec::<String>::new(), Vec::new()).unwrap_err();
        assert_eq!(err, Error::Build(BuildError::Empty));
    }

    #[test]
    fn test_zero_length() {
        let err = Index::try_new(["chr1", "chr2"], [100, 0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "build error: chromosome `chr2` must have a non-zero length"
        );
    }

    #[test]
    fn test_duplicate_name() {
        let err = Index::try_new(["chr1", "chr1"], [100, 10]).unwrap_err();
        assert_eq!(err, Error::Build(BuildError::DuplicateName("chr1".into())));
    }

    #[test]
    fn test_chromosome_boundaries() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let index = index();

        assert_eq!(index.to_chrom_coord(99)?, ("chr1", 99));
        assert_eq!(index.to_chrom_coord(100)?, ("chr2", 0));
        assert_eq!(index.to_chrom_coord(174)?, ("chr3", 24));

        let err = index.to_chrom_coord(175).unwrap_err();
        assert_eq!(
            err.to_string(),
            "lookup error: absolute position 175 is outside of the genome (total length 175)"
        );

        Ok(())
    }

    #[test]
    fn test_unknown_chromosome() {
        let err = index().to_abs_coord("chrX", 1).unwrap_err();
        assert_eq!(err.to_string(), "lookup error: unknown chromosome `chrX`");
    }

    proptest! {
        #[test]
        fn test_coordinate_round_trip(x in 0u64..175) {
            let index = index();
            let (name, relative) = index.to_chrom_coord(x).unwrap();
            prop_assert_eq!(index.to_abs_coord(name, relative).unwrap(), x);
        }
    }
}
