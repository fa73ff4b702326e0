//! Display rows.

use omics::coordinate::position::Number;
use rust_lapper as lapper;

/// The inner value of the row occupancy lookup.
type Iv = lapper::Interval<Number, String>;

/// A transcript placed on a row: `(start, end, transcript id)`.
pub type Placement = (Number, Number, String);

/// Returns whether two intervals conflict when both are treated as closed.
///
/// Intervals that merely touch at an endpoint conflict.
///
/// # Examples
///
/// ```
/// use txtrack::layout::row::conflicts;
///
/// assert!(conflicts((100, 200), (150, 250)));
/// assert!(conflicts((100, 200), (200, 300)));
/// assert!(conflicts((100, 400), (200, 300)));
/// assert!(!conflicts((100, 200), (201, 300)));
/// ```
pub fn conflicts(a: (Number, Number), b: (Number, Number)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

/// A horizontal lane of non-conflicting transcripts.
#[derive(Clone, Debug)]
pub struct Row {
    /// The placements in the order they were made.
    placements: Vec<Placement>,

    /// The occupancy lookup over the placements.
    lookup: lapper::Lapper<Number, String>,
}

impl Row {
    /// Creates a row from its placements.
    pub(crate) fn new(placements: Vec<Placement>) -> Self {
        // Closed intervals are stored half-open by extending the end by one.
        let intervals = placements
            .iter()
            .map(|(start, end, id)| Iv {
                start: *start,
                stop: end.saturating_add(1),
                val: id.clone(),
            })
            .collect::<Vec<_>>();

        Self {
            placements,
            lookup: lapper::Lapper::new(intervals),
        }
    }

    /// Gets the placements of the row, ordered by start.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Gets the number of transcripts on the row.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns whether the row is empty.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns the placements on the row that conflict with the closed
    /// interval `[start, end]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::layout::Row;
    /// # use txtrack::layout::Builder;
    /// # use txtrack::chromosome::Index;
    /// # use txtrack::transcript::{Base, Transcript};
    ///
    /// # let chromosomes = Index::try_new(["chr1"], [1000])?;
    /// # let mut transcripts = vec![
    /// #     Transcript::parse("chr1\t100\t200\tA\t1\t+\tG\tT1\tb\t100\t200\t.\t.", &chromosomes, Base::Zero)?,
    /// #     Transcript::parse("chr1\t300\t400\tB\t1\t+\tG\tT2\tb\t300\t400\t.\t.", &chromosomes, Base::Zero)?,
    /// # ];
    /// # let layout = Builder::default().build().assign_rows(&mut transcripts);
    /// let row: &Row = layout.row(0).unwrap();
    ///
    /// let ids = row
    ///     .overlapping(150, 300)
    ///     .map(|(_, _, id)| id)
    ///     .collect::<Vec<_>>();
    /// assert_eq!(ids, vec!["T1_chr1_100_200", "T2_chr1_300_400"]);
    ///
    /// assert_eq!(row.overlapping(201, 299).count(), 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn overlapping(
        &self,
        start: Number,
        end: Number,
    ) -> impl Iterator<Item = (Number, Number, &str)> + '_ {
        self.lookup
            .find(start, end.saturating_add(1))
            .map(|iv| (iv.start, iv.stop - 1, iv.val.as_str()))
    }
}
