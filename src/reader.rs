//! A feature record reader.

use std::io::BufRead;
use std::io::{self};
use std::iter;

use tracing::warn;

use crate::chromosome;
use crate::transcript;
use crate::transcript::Base;
use crate::transcript::Record;
use crate::transcript::Transcript;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The prefix of a comment line.
const COMMENT_PREFIX: char = '#';

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A record could not be parsed.
    Record(transcript::ParseError, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Record(err, line) => write!(f, "invalid record: {err}\n\nline: {line}"),
        }
    }
}

impl std::error::Error for Error {}

/// A feature record reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a feature record reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chr1\t101\t130\tA\t1\t+\tG\tT\tb\t101\t130\t.\t.\n";
    /// let reader = txtrack::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.0
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"# comment\r\nchr1\t1\t2";
    /// let mut reader = txtrack::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 11);
    /// assert_eq!(buffer, "# comment");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 8);
    /// assert_eq!(buffer, "chr1\t1\t2");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        read_line(self.inner_mut(), buffer)
    }

    /// Attempts to read the next [`Record`], skipping blank and comment lines.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"# header\n\nchr1\t101\t130\tA\t1\t+\tG\tT\tb\t101\t130\t.\t.\n";
    /// let mut reader = txtrack::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// let record = reader.read_record(&mut buffer)?.unwrap();
    /// assert_eq!(record.transcript_id(), "T");
    ///
    /// assert!(reader.read_record(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_record(&mut self, buffer: &mut String) -> Result<Option<Record>, Error> {
        loop {
            let read = self.read_line_raw(buffer).map_err(Error::Io)?;

            if read == 0 {
                return Ok(None);
            }

            if is_skipped(buffer) {
                continue;
            }

            return buffer
                .parse::<Record>()
                .map(Some)
                .map_err(|err| Error::Record(err, buffer.clone()));
        }
    }

    /// Returns an iterator over the [`Record`]s in the underlying reader.
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record, Error>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }

    /// Returns an iterator over the valid [`Transcript`]s in the underlying
    /// reader.
    ///
    /// Records that cannot be parsed or that fail validation are logged and
    /// skipped. Only I/O errors are yielded.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::chromosome::Index;
    /// use txtrack::transcript::Base;
    ///
    /// let data = b"chr1\t101\t130\tA\t1\t+\tG\tT1\tb\t101\t130\t.\t.\n\
    ///              chr1\t130\t101\tB\t1\t+\tG\tT2\tb\t101\t130\t.\t.\n\
    ///              chr1\t1\n";
    ///
    /// let chromosomes = Index::try_new(["chr1"], [1000])?;
    /// let mut reader = txtrack::Reader::new(&data[..]);
    ///
    /// let transcripts = reader
    ///     .transcripts(&chromosomes, Base::One)
    ///     .collect::<Result<Vec<_>, _>>()?;
    ///
    /// assert_eq!(transcripts.len(), 1);
    /// assert_eq!(transcripts[0].transcript_id(), "T1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn transcripts<'a>(
        &'a mut self,
        chromosomes: &'a chromosome::Index,
        base: Base,
    ) -> impl Iterator<Item = io::Result<Transcript>> + 'a {
        self.records().filter_map(move |result| match result {
            Ok(record) => {
                let id = record.id();
                match Transcript::try_from_record(record, chromosomes, base) {
                    Ok(transcript) => Some(Ok(transcript)),
                    Err(err) => {
                        warn!("skipping transcript `{id}`: {err}");
                        None
                    }
                }
            }
            Err(Error::Io(err)) => Some(Err(err)),
            Err(err) => {
                warn!("skipping feature record: {err}");
                None
            }
        })
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

/// Returns whether a line holds no record.
fn is_skipped(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(COMMENT_PREFIX)
}

/// Reads a line from a buffered reader, stripping the line terminator.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_invalid_record() {
        let data = b"chr1\t1\t2\n";
        let mut reader = Reader::new(&data[..]);

        let err = reader.records().next().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid record: invalid number of fields in feature record: expected 11 to 13 \
             fields, found 3 fields\n\nline: chr1\t1\t2"
        );
    }

    #[test]
    fn test_records_skip_comments_and_blank_lines()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"#a\n\n  \nchr1\t1\t5\tA\t1\t+\tG\tT1\tb\t1\t5\t.\t.\r\n\
                     chr1\t6\t9\tB\t1\t-\tG\tT2\tb\t6\t9\t.\t.";
        let mut reader = Reader::new(&data[..]);

        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].transcript_id(), "T1");
        assert_eq!(records[1].end(), 9);

        Ok(())
    }

    #[test]
    fn test_transcripts_without_codon_fields()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"chr1\t10\t20\tRNA\t0\t+\tG\tT\tlncRNA\t10\t20\n";
        let chromosomes = chromosome::Index::try_new(["chr1"], [1000])?;
        let mut reader = Reader::new(&data[..]);

        let transcripts = reader
            .transcripts(&chromosomes, Base::Zero)
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(transcripts.len(), 1);
        assert_eq!(transcripts[0].id(), "T_chr1_10_20");
        assert!(!transcripts[0].is_coding());

        Ok(())
    }
}
