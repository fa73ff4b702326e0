//! Packing transcripts into display rows.
//!
//! Transcripts are packed greedily: in order of their start, each transcript
//! is placed on the lowest row on which it conflicts with nothing already
//! placed there. Two transcripts conflict when their closed intervals
//! intersect (see [`row::conflicts()`]), so transcripts that abut never share
//! a row.

pub mod row;

use std::collections::HashMap;

use omics::coordinate::position::Number;
use tracing::debug;

pub use row::Row;

use crate::layout::row::Placement;
use crate::transcript::Transcript;

////////////////////////////////////////////////////////////////////////////////////////
// Builder
////////////////////////////////////////////////////////////////////////////////////////

/// A builder for a [`Packer`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// The maximum number of rows.
    max_rows: Option<usize>,
}

impl Builder {
    /// Sets the maximum number of rows.
    ///
    /// Transcripts that would land on a row at or beyond the maximum are
    /// discarded from the layout.
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Builds a [`Packer`] from the builder.
    pub fn build(self) -> Packer {
        Packer {
            max_rows: self.max_rows,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Packer
////////////////////////////////////////////////////////////////////////////////////////

/// Assigns display rows to transcripts.
#[derive(Clone, Debug, Default)]
pub struct Packer {
    /// The maximum number of rows.
    max_rows: Option<usize>,
}

impl Packer {
    /// Gets the maximum number of rows, if the packer is capped.
    pub fn max_rows(&self) -> Option<usize> {
        self.max_rows
    }

    /// Assigns a display row to every transcript and returns the resulting
    /// [`Layout`].
    ///
    /// The display row of every transcript is overwritten. Discarded
    /// transcripts are left with no display row.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::chromosome::Index;
    /// use txtrack::layout::Builder;
    /// use txtrack::transcript::Base;
    /// use txtrack::transcript::Transcript;
    ///
    /// let chromosomes = Index::try_new(["chr1"], [1000])?;
    /// let mut transcripts = [
    ///     "chr1\t100\t200\tA\t1\t+\tG\tA\tb\t100\t200\t.\t.",
    ///     "chr1\t150\t250\tB\t1\t+\tG\tB\tb\t150\t250\t.\t.",
    ///     "chr1\t300\t400\tC\t1\t+\tG\tC\tb\t300\t400\t.\t.",
    /// ]
    /// .into_iter()
    /// .map(|line| Transcript::parse(line, &chromosomes, Base::Zero))
    /// .collect::<Result<Vec<_>, _>>()?;
    ///
    /// let layout = Builder::default().build().assign_rows(&mut transcripts);
    ///
    /// assert_eq!(layout.row_count(), 2);
    /// assert_eq!(transcripts[0].display_row(), Some(0));
    /// assert_eq!(transcripts[1].display_row(), Some(1));
    /// assert_eq!(transcripts[2].display_row(), Some(0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn assign_rows(&self, transcripts: &mut [Transcript]) -> Layout {
        let mut order = (0..transcripts.len()).collect::<Vec<_>>();
        order.sort_by_key(|i| transcripts[*i].tx_start());

        let mut rows = Vec::<Vec<Placement>>::new();
        let mut assignments = HashMap::new();
        let mut discarded = Vec::new();

        for i in order {
            let transcript = &mut transcripts[i];
            transcript.set_display_row(None);

            let interval = (transcript.tx_start(), transcript.tx_end());
            let row = rows
                .iter()
                .position(|row| {
                    row.iter()
                        .all(|(start, end, _)| !row::conflicts(interval, (*start, *end)))
                })
                .unwrap_or(rows.len());

            if self.max_rows.is_some_and(|max| row >= max) {
                debug!(
                    "discarding transcript `{}`: no room within {} rows",
                    transcript.id(),
                    row
                );
                discarded.push(transcript.id().to_string());
                continue;
            }

            if row == rows.len() {
                rows.push(Vec::new());
            }

            rows[row].push((interval.0, interval.1, transcript.id().to_string()));
            assignments.insert(transcript.id().to_string(), row);
            transcript.set_display_row(Some(row));
        }

        Layout {
            rows: rows.into_iter().map(Row::new).collect(),
            assignments,
            discarded,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Layout
////////////////////////////////////////////////////////////////////////////////////////

/// The result of a layout pass.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    /// The display rows.
    rows: Vec<Row>,

    /// The row assigned to each transcript id.
    assignments: HashMap<String, usize>,

    /// The ids of the transcripts that did not fit.
    discarded: Vec<String>,
}

impl Layout {
    /// Gets the display rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Gets a display row by index.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Gets the number of display rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Gets the row assigned to a transcript.
    pub fn row_of(&self, id: &str) -> Option<usize> {
        self.assignments.get(id).copied()
    }

    /// Gets the row assigned to each transcript id.
    pub fn assignments(&self) -> &HashMap<String, usize> {
        &self.assignments
    }

    /// Gets the ids of the transcripts that did not fit within the maximum
    /// number of rows, in packing order.
    pub fn discarded(&self) -> &[String] {
        &self.discarded
    }

    /// Gets the height needed to draw every row.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::layout::Layout;
    ///
    /// assert_eq!(Layout::default().height(10.0, 2.0), 0.0);
    /// ```
    pub fn height(&self, transcript_height: f64, spacing: f64) -> f64 {
        self.rows.len() as f64 * (transcript_height + spacing)
    }

    /// Returns whether the label of a transcript must be hidden.
    ///
    /// Labels are drawn to the left of a transcript and span `extent`
    /// positions. A label is hidden when another transcript on the same row
    /// ends strictly inside that span. Unknown transcripts have no label to
    /// hide.
    pub fn label_hidden(&self, id: &str, extent: Number) -> bool {
        let Some(row) = self.row_of(id).and_then(|index| self.rows.get(index)) else {
            return false;
        };

        let Some((start, _, _)) = row
            .placements()
            .iter()
            .find(|(_, _, placed)| placed == id)
        else {
            return false;
        };

        let label_start = start.saturating_sub(extent);

        row.overlapping(label_start, *start)
            .any(|(_, end, other)| other != id && end > label_start && end < *start)
    }
}
