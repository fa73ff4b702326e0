//! Transcripts.
//!
//! A transcript arrives as a tab-delimited feature [`Record`] with
//! chromosome-relative coordinates in the coordinate [`Base`] of the upstream
//! extraction. Converting a record into a [`Transcript`] normalizes every
//! coordinate to 0-based, half-open intervals, validates the exon structure,
//! and places the transcript on the absolute axis of a
//! [`chromosome::Index`].

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::Strand;
use omics::coordinate::interbase::Coordinate;
use omics::coordinate::interval;
use omics::coordinate::interval::interbase::Interval;
use omics::coordinate::position::Number;

use crate::chromosome;

/// The delimiter between the fields of a feature record.
pub const FIELD_DELIMITER: char = '\t';

/// The delimiter between the entries of an exon list.
pub const EXON_DELIMITER: char = ',';

/// The value used for an absent field.
pub const MISSING_VALUE: &str = ".";

/// The number of fields in a feature record.
pub const NUM_FIELDS: usize = 13;

/// The number of fields a feature record must carry. The start and stop codon
/// fields may be left off entirely for noncoding transcripts.
pub const MIN_FIELDS: usize = 11;

/// The number of nucleotides in a codon.
const CODON_LENGTH: Number = 3;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a feature record.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An incorrect number of fields.
    IncorrectNumberOfFields(usize),

    /// A position could not be parsed.
    InvalidPosition(&'static str, String, ParseIntError),

    /// An invalid strand.
    InvalidStrand(String),

    /// The exon start and exon end lists have different lengths.
    MismatchedExonLists(usize, usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in feature record: expected {MIN_FIELDS} to {NUM_FIELDS} \
                 fields, found {n} fields"
            ),
            ParseError::InvalidPosition(field, value, err) => {
                write!(f, "invalid {field} `{value}`: {err}")
            }
            ParseError::InvalidStrand(value) => write!(f, "invalid strand: `{value}`"),
            ParseError::MismatchedExonLists(starts, ends) => write!(
                f,
                "mismatched exon lists: {starts} starts but {ends} ends"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Transcript`].
#[derive(Debug)]
pub enum Error {
    /// The feature record could not be parsed.
    Parse(ParseError),

    /// The transcript end does not lie after its start.
    InvalidBounds(Number, Number),

    /// An exon is empty or lies outside of the transcript.
    InvalidExon(usize, Number, Number),

    /// An exon starts before the previous exon ends.
    OverlappingExons(usize),

    /// The coding range does not intersect the transcript.
    InvalidCodingRange(Number, Number),

    /// An interval error.
    Interval(interval::Error),

    /// The transcript could not be placed on the chromosome index.
    Chromosome(chromosome::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error: {err}"),
            Error::InvalidBounds(start, end) => {
                write!(f, "invalid transcript bounds: [{start}, {end})")
            }
            Error::InvalidExon(i, start, end) => {
                write!(f, "invalid exon {i}: [{start}, {end})")
            }
            Error::OverlappingExons(i) => {
                write!(f, "exon {i} overlaps the previous exon")
            }
            Error::InvalidCodingRange(start, end) => {
                write!(f, "coding range [{start}, {end}) lies outside of the transcript")
            }
            Error::Interval(err) => write!(f, "interval error: {err}"),
            Error::Chromosome(err) => write!(f, "chromosome error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Coordinate base
////////////////////////////////////////////////////////////////////////////////////////

/// The coordinate base of the feature records.
///
/// One-based records carry closed intervals: the starts (transcript, exons and
/// codons) are shifted down by one when converted, while the ends are kept.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Base {
    /// 0-based, half-open coordinates.
    Zero,

    /// 1-based, fully-closed coordinates.
    #[default]
    One,
}

impl Base {
    /// Converts a start coordinate in this base to a 0-based position.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::transcript::Base;
    ///
    /// assert_eq!(Base::One.start(101), 100);
    /// assert_eq!(Base::Zero.start(101), 101);
    /// assert_eq!(Base::One.start(0), 0);
    /// ```
    pub fn start(&self, value: Number) -> Number {
        match self {
            Base::Zero => value,
            Base::One => value.saturating_sub(1),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Feature records
////////////////////////////////////////////////////////////////////////////////////////

/// A feature record as it appears in the input.
///
/// The coordinates are kept exactly as written.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The chromosome name.
    chrom: String,

    /// The transcript start.
    start: Number,

    /// The transcript end.
    end: Number,

    /// The display name.
    name: String,

    /// The importance (score) column.
    importance: Option<f64>,

    /// The strand, if any.
    strand: Option<Strand>,

    /// The gene identifier.
    gene_id: String,

    /// The transcript identifier.
    transcript_id: String,

    /// The biotype.
    biotype: String,

    /// The exon starts.
    exon_starts: Vec<Number>,

    /// The exon ends.
    exon_ends: Vec<Number>,

    /// The start of the start codon.
    start_codon: Option<Number>,

    /// The start of the stop codon.
    stop_codon: Option<Number>,
}

impl Record {
    /// Gets the chromosome name.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Gets the transcript start as written.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the transcript end as written.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the transcript identifier.
    pub fn transcript_id(&self) -> &str {
        &self.transcript_id
    }

    /// Gets the identifier that is stable across tiles.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::transcript::Record;
    ///
    /// let record = "chr1\t101\t130\tA\t1\t+\tG1\tT1\tprotein_coding\t101\t130\t101\t128"
    ///     .parse::<Record>()?;
    ///
    /// assert_eq!(record.id(), "T1_chr1_101_130");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn id(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.transcript_id, self.chrom, self.start, self.end
        )
    }
}

/// Parses a single position field.
fn parse_position(field: &'static str, value: &str) -> std::result::Result<Number, ParseError> {
    value
        .parse()
        .map_err(|err| ParseError::InvalidPosition(field, value.to_string(), err))
}

/// Parses an optional position field.
fn parse_optional_position(
    field: &'static str,
    value: &str,
) -> std::result::Result<Option<Number>, ParseError> {
    match value {
        MISSING_VALUE | "" => Ok(None),
        _ => parse_position(field, value).map(Some),
    }
}

/// Parses a comma-joined exon list, tolerating a trailing delimiter.
fn parse_exon_list(
    field: &'static str,
    value: &str,
) -> std::result::Result<Vec<Number>, ParseError> {
    value
        .trim_end_matches(EXON_DELIMITER)
        .split(EXON_DELIMITER)
        .filter(|part| !part.is_empty())
        .map(|part| parse_position(field, part))
        .collect()
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = s.split(FIELD_DELIMITER).collect::<Vec<_>>();
        if parts.len() < MIN_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let start = parse_position("transcript start", parts[1])?;
        let end = parse_position("transcript end", parts[2])?;

        let importance = parts[4].parse::<f64>().ok();

        let strand = match parts[5] {
            MISSING_VALUE => None,
            value => Some(
                value
                    .parse::<Strand>()
                    .map_err(|_| ParseError::InvalidStrand(value.to_string()))?,
            ),
        };

        let exon_starts = parse_exon_list("exon start", parts[9])?;
        let exon_ends = parse_exon_list("exon end", parts[10])?;

        if exon_starts.len() != exon_ends.len() {
            return Err(ParseError::MismatchedExonLists(
                exon_starts.len(),
                exon_ends.len(),
            ));
        }

        let start_codon = match parts.get(11) {
            Some(value) => parse_optional_position("start codon", value)?,
            None => None,
        };
        let stop_codon = match parts.get(12) {
            Some(value) => parse_optional_position("stop codon", value)?,
            None => None,
        };

        Ok(Self {
            chrom: parts[0].to_string(),
            start,
            end,
            name: parts[3].to_string(),
            importance,
            strand,
            gene_id: parts[6].to_string(),
            transcript_id: parts[7].to_string(),
            biotype: parts[8].to_string(),
            exon_starts,
            exon_ends,
            start_codon,
            stop_codon,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Transcripts
////////////////////////////////////////////////////////////////////////////////////////

/// Creates an interbase interval on the positive strand of a chromosome.
fn interbase_interval(
    chrom: &str,
    start: Number,
    end: Number,
) -> std::result::Result<Interval, interval::Error> {
    Interval::try_new(
        Coordinate::new(chrom, Strand::Positive, start),
        Coordinate::new(chrom, Strand::Positive, end),
    )
}

/// A validated transcript.
///
/// The transcript bounds are absolute. Exons and the coding range are
/// chromosome-relative. All intervals are 0-based and half-open.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    /// The identifier that is stable across tiles.
    id: String,

    /// The display name.
    name: String,

    /// The chromosome name.
    chrom: String,

    /// The absolute start of the chromosome.
    chrom_offset: Number,

    /// The strand, if any.
    strand: Option<Strand>,

    /// The absolute transcript start.
    tx_start: Number,

    /// The absolute transcript end.
    tx_end: Number,

    /// The exon starts.
    exon_starts: Vec<Number>,

    /// The exon ends.
    exon_ends: Vec<Number>,

    /// The coding range.
    coding: Option<(Number, Number)>,

    /// The gene identifier.
    gene_id: String,

    /// The transcript identifier.
    transcript_id: String,

    /// The biotype.
    biotype: String,

    /// The importance (score) column.
    importance: Option<f64>,

    /// The display row assigned by the last layout pass.
    display_row: Option<usize>,
}

impl Transcript {
    /// Attempts to create a transcript from a feature record.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::chromosome::Index;
    /// use txtrack::transcript::Base;
    /// use txtrack::transcript::Record;
    /// use txtrack::transcript::Transcript;
    ///
    /// let chromosomes = Index::try_new(["chr1", "chr2"], [1000, 1000])?;
    /// let record = "chr2\t101\t130\tA\t1\t+\tG1\tT1\tprotein_coding\t101,\t130,\t101\t128"
    ///     .parse::<Record>()?;
    ///
    /// let transcript = Transcript::try_from_record(record, &chromosomes, Base::One)?;
    ///
    /// assert_eq!(transcript.tx_start(), 1100);
    /// assert_eq!(transcript.tx_end(), 1130);
    /// assert_eq!(transcript.exon_starts(), &[100]);
    /// assert_eq!(transcript.exon_ends(), &[130]);
    /// assert_eq!(transcript.coding(), Some((100, 130)));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_record(
        record: Record,
        chromosomes: &chromosome::Index,
        base: Base,
    ) -> Result<Self> {
        let id = record.id();

        let start = base.start(record.start);
        let end = record.end;

        if end <= start {
            return Err(Error::InvalidBounds(start, end));
        }

        let exon_starts = record
            .exon_starts
            .iter()
            .map(|start| base.start(*start))
            .collect::<Vec<_>>();
        let exon_ends = record.exon_ends;

        let bounds = interbase_interval(&record.chrom, start, end).map_err(Error::Interval)?;

        let mut previous_end = None;
        for (i, (exon_start, exon_end)) in exon_starts.iter().zip(exon_ends.iter()).enumerate() {
            if exon_end <= exon_start {
                return Err(Error::InvalidExon(i, *exon_start, *exon_end));
            }

            let exon = interbase_interval(&record.chrom, *exon_start, *exon_end)
                .map_err(Error::Interval)?;
            let inside =
                bounds.contains_coordinate(exon.start()) && bounds.contains_coordinate(exon.end());
            if !inside {
                return Err(Error::InvalidExon(i, *exon_start, *exon_end));
            }

            if previous_end.is_some_and(|previous| *exon_start < previous) {
                return Err(Error::OverlappingExons(i));
            }

            previous_end = Some(*exon_end);
        }

        let coding = match (record.start_codon, record.stop_codon) {
            (Some(start_codon), Some(stop_codon)) => {
                let first = base.start(start_codon.min(stop_codon));
                let last = base.start(start_codon.max(stop_codon)) + CODON_LENGTH;

                let coding_start = first.max(start);
                let coding_end = last.min(end);

                if coding_end <= coding_start {
                    return Err(Error::InvalidCodingRange(first, last));
                }

                Some((coding_start, coding_end))
            }
            _ => None,
        };

        let chrom_offset = chromosomes
            .to_abs_coord(&record.chrom, 0)
            .map_err(Error::Chromosome)?;
        let tx_start = chromosomes
            .to_abs_coord(&record.chrom, start)
            .map_err(Error::Chromosome)?;
        let tx_end = chromosomes
            .to_abs_coord(&record.chrom, end)
            .map_err(Error::Chromosome)?;

        Ok(Self {
            id,
            name: record.name,
            chrom: record.chrom,
            chrom_offset,
            strand: record.strand,
            tx_start,
            tx_end,
            exon_starts,
            exon_ends,
            coding,
            gene_id: record.gene_id,
            transcript_id: record.transcript_id,
            biotype: record.biotype,
            importance: record.importance,
            display_row: None,
        })
    }

    /// Attempts to parse a transcript from a single feature line.
    pub fn parse(line: &str, chromosomes: &chromosome::Index, base: Base) -> Result<Self> {
        let record = line.parse::<Record>().map_err(Error::Parse)?;
        Self::try_from_record(record, chromosomes, base)
    }

    /// Gets the identifier that is stable across tiles.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the chromosome name.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Gets the absolute start of the chromosome the transcript lies on.
    pub fn chrom_offset(&self) -> Number {
        self.chrom_offset
    }

    /// Gets the strand, if the transcript is stranded.
    pub fn strand(&self) -> Option<&Strand> {
        self.strand.as_ref()
    }

    /// Gets the absolute transcript start.
    pub fn tx_start(&self) -> Number {
        self.tx_start
    }

    /// Gets the absolute transcript end.
    pub fn tx_end(&self) -> Number {
        self.tx_end
    }

    /// Gets the chromosome-relative exon starts.
    pub fn exon_starts(&self) -> &[Number] {
        &self.exon_starts
    }

    /// Gets the chromosome-relative exon ends.
    pub fn exon_ends(&self) -> &[Number] {
        &self.exon_ends
    }

    /// Returns an iterator over the exons as `(start, end)` pairs.
    pub fn exons(&self) -> impl Iterator<Item = (Number, Number)> + '_ {
        self.exon_starts
            .iter()
            .copied()
            .zip(self.exon_ends.iter().copied())
    }

    /// Gets the chromosome-relative coding range, if the transcript is coding.
    pub fn coding(&self) -> Option<(Number, Number)> {
        self.coding
    }

    /// Returns whether the transcript has a coding range.
    pub fn is_coding(&self) -> bool {
        self.coding.is_some()
    }

    /// Gets the gene identifier.
    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    /// Gets the transcript identifier.
    pub fn transcript_id(&self) -> &str {
        &self.transcript_id
    }

    /// Gets the biotype.
    pub fn biotype(&self) -> &str {
        &self.biotype
    }

    /// Gets the importance (score) column, if it was numeric.
    pub fn importance(&self) -> Option<f64> {
        self.importance
    }

    /// Gets the display row assigned by the last layout pass.
    pub fn display_row(&self) -> Option<usize> {
        self.display_row
    }

    /// Sets the display row.
    pub(crate) fn set_display_row(&mut self, row: Option<usize>) {
        self.display_row = row;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chromosomes() -> chromosome::Index {
        chromosome::Index::try_new(["chr1", "chr2"], [1000, 500]).unwrap()
    }

    #[test]
    fn test_parse_coding_transcript() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let transcript = Transcript::parse(
            "chr1\t101\t300\tGENE\t5\t-\tG1\tT1\tprotein_coding\t101,201,\t150,300,\t281\t111",
            &chromosomes(),
            Base::One,
        )?;

        assert_eq!(transcript.id(), "T1_chr1_101_300");
        assert_eq!(transcript.name(), "GENE");
        assert_eq!(transcript.strand(), Some(&Strand::Negative));
        assert_eq!(transcript.tx_start(), 100);
        assert_eq!(transcript.tx_end(), 300);
        assert_eq!(
            transcript.exons().collect::<Vec<_>>(),
            vec![(100, 150), (200, 300)]
        );
        assert_eq!(transcript.coding(), Some((110, 283)));
        assert_eq!(transcript.importance(), Some(5.0));
        assert_eq!(transcript.display_row(), None);

        Ok(())
    }

    #[test]
    fn test_parse_noncoding_transcript() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let transcript = Transcript::parse(
            "chr2\t10\t20\tRNA\t.\t.\tG2\tT2\tlncRNA\t10\t20\t.\t.",
            &chromosomes(),
            Base::Zero,
        )?;

        assert_eq!(transcript.strand(), None);
        assert_eq!(transcript.tx_start(), 1010);
        assert_eq!(transcript.tx_end(), 1020);
        assert_eq!(transcript.chrom_offset(), 1000);
        assert!(!transcript.is_coding());
        assert_eq!(transcript.importance(), None);

        Ok(())
    }

    #[test]
    fn test_parse_record_without_codon_fields()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let transcript = Transcript::parse(
            "chr1\t10\t20\tRNA\t0\t+\tG\tT\tlncRNA\t10\t20",
            &chromosomes(),
            Base::Zero,
        )?;

        assert_eq!(transcript.id(), "T_chr1_10_20");
        assert_eq!(transcript.tx_start(), 10);
        assert_eq!(transcript.tx_end(), 20);
        assert!(!transcript.is_coding());

        let err = "chr1\t10\t20\tRNA\t0\t+\tG\tT\tlncRNA\t10"
            .parse::<Record>()
            .unwrap_err();
        assert_eq!(err, ParseError::IncorrectNumberOfFields(10));

        Ok(())
    }

    #[test]
    fn test_coding_range_is_clipped_to_the_transcript()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let transcript = Transcript::parse(
            "chr1\t100\t130\tA\t1\t+\tG\tT\tprotein_coding\t100\t130\t100\t129",
            &chromosomes(),
            Base::Zero,
        )?;

        assert_eq!(transcript.coding(), Some((100, 130)));
        Ok(())
    }

    #[test]
    fn test_incorrect_number_of_fields() {
        let err = "chr1\t1\t2".parse::<Record>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields in feature record: expected 11 to 13 fields, found 3 fields"
        );
    }

    #[test]
    fn test_invalid_position() {
        let err = "chr1\tfoo\t2\tA\t1\t+\tG\tT\tb\t1\t2\t.\t."
            .parse::<Record>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid transcript start `foo`: invalid digit found in string"
        );
    }

    #[test]
    fn test_invalid_strand() {
        let err = "chr1\t1\t2\tA\t1\t?\tG\tT\tb\t1\t2\t.\t."
            .parse::<Record>()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid strand: `?`");
    }

    #[test]
    fn test_mismatched_exon_lists() {
        let err = Transcript::parse(
            "chr1\t1\t20\tA\t1\t+\tG\tT\tb\t1,10,\t5,\t.\t.",
            &chromosomes(),
            Base::One,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error: mismatched exon lists: 2 starts but 1 ends"
        );
    }

    #[test]
    fn test_reversed_bounds() {
        let err = Transcript::parse(
            "chr1\t20\t10\tA\t1\t+\tG\tT\tb\t\t\t.\t.",
            &chromosomes(),
            Base::Zero,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid transcript bounds: [20, 10)");
    }

    #[test]
    fn test_invalid_exon() {
        let err = Transcript::parse(
            "chr1\t0\t50\tA\t1\t+\tG\tT\tb\t10,30\t20,30\t.\t.",
            &chromosomes(),
            Base::Zero,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid exon 1: [30, 30)");
    }

    #[test]
    fn test_exon_outside_of_the_transcript() {
        let err = Transcript::parse(
            "chr1\t0\t50\tA\t1\t-\tG\tT\tb\t10,40\t20,60\t.\t.",
            &chromosomes(),
            Base::Zero,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid exon 1: [40, 60)");

        let err = Transcript::parse(
            "chr2\t11\t500\tA\t1\t-\tG\tT\tb\t1\t500\t.\t.",
            &chromosomes(),
            Base::One,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid exon 0: [0, 500)");
    }

    #[test]
    fn test_exons_touching_the_transcript_bounds()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let transcript = Transcript::parse(
            "chr1\t0\t50\tA\t1\t+\tG\tT\tb\t0,30\t20,50\t.\t.",
            &chromosomes(),
            Base::Zero,
        )?;
        assert_eq!(transcript.exon_starts(), &[0, 30]);
        assert_eq!(transcript.exon_ends(), &[20, 50]);

        let bounds = interbase_interval("chr1", 0, 50)?;
        let inside = interbase_interval("chr1", 30, 50)?;
        let outside = interbase_interval("chr1", 40, 60)?;
        assert!(bounds.contains_coordinate(inside.end()));
        assert!(!bounds.contains_coordinate(outside.end()));
        assert!(!bounds.contains_coordinate(interbase_interval("chr2", 0, 50)?.end()));

        Ok(())
    }

    #[test]
    fn test_overlapping_exons() {
        let err = Transcript::parse(
            "chr1\t0\t50\tA\t1\t+\tG\tT\tb\t10,15\t20,30\t.\t.",
            &chromosomes(),
            Base::Zero,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "exon 1 overlaps the previous exon");
    }

    #[test]
    fn test_unknown_chromosome() {
        let err = Transcript::parse(
            "chrX\t0\t50\tA\t1\t+\tG\tT\tb\t10\t20\t.\t.",
            &chromosomes(),
            Base::Zero,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "chromosome error: lookup error: unknown chromosome `chrX`"
        );
    }
}
