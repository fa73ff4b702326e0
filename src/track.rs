//! The transcript track.
//!
//! A [`Track`] ties the pieces of the crate together for a single tileset: it
//! resolves tiles, lays out the transcripts visible in the viewport, and, at
//! the deepest zoom level, reconstructs the codons of the coding transcripts
//! on each tile into a tile-keyed [`Cache`].

use std::collections::HashSet;
use std::io::BufRead;
use std::io::{self};

use omics::coordinate::position::Number;
use tracing::debug;
use tracing::warn;

use crate::codon::Codon;
use crate::frame;
use crate::frame::Cache;
use crate::layout;
use crate::layout::Layout;
use crate::layout::Packer;
use crate::reader::Reader;
use crate::sequence::Fetcher;
use crate::sequence::Source;
use crate::sequence::fetcher;
use crate::tile;
use crate::tile::Key;
use crate::tile::Range;
use crate::tile::Tile;
use crate::tileset::Tileset;
use crate::transcript::Base;
use crate::transcript::Transcript;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to a [`Track`].
#[derive(Debug)]
pub enum Error {
    /// A tile error.
    Tile(tile::Error),

    /// Fetching the sequence of a tile failed.
    Fetch(fetcher::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Tile(err) => write!(f, "tile error: {err}"),
            Error::Fetch(err) => write!(f, "fetch error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The outcome of reconstructing the codons of each transcript on a tile.
pub type Frames = Vec<(String, frame::Result<Vec<Codon>>)>;

////////////////////////////////////////////////////////////////////////////////////////
// Builder
////////////////////////////////////////////////////////////////////////////////////////

/// A builder for a [`Track`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// The maximum number of display rows.
    max_rows: Option<usize>,

    /// The coordinate base of the feature records.
    base: Base,
}

impl Builder {
    /// Sets the maximum number of display rows.
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Sets the coordinate base of the feature records.
    pub fn base(mut self, base: Base) -> Self {
        self.base = base;
        self
    }

    /// Builds a [`Track`] from the builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::sequence::InMemory;
    /// use txtrack::tileset::Info;
    /// use txtrack::tileset::Tileset;
    /// use txtrack::track::Builder;
    /// use txtrack::transcript::Base;
    ///
    /// let tileset = Tileset::try_from(Info::new(0, 8.0, 0.0, 8.0, "8", "chr1"))?;
    /// let source = InMemory::from_reader(&b">chr1\nACGTACGT\n"[..])?;
    ///
    /// let track = Builder::default()
    ///     .max_rows(5)
    ///     .base(Base::Zero)
    ///     .build(tileset, source);
    ///
    /// assert_eq!(track.packer().max_rows(), Some(5));
    /// assert_eq!(track.base(), Base::Zero);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn build<S>(self, tileset: Tileset, source: S) -> Track<S>
    where
        S: Source,
    {
        let mut packer = layout::Builder::default();
        if let Some(max_rows) = self.max_rows {
            packer = packer.max_rows(max_rows);
        }

        Track {
            tileset,
            base: self.base,
            packer: packer.build(),
            fetcher: Fetcher::new(source),
            cache: Cache::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Track
////////////////////////////////////////////////////////////////////////////////////////

/// A transcript track over one tileset and one sequence source.
#[derive(Debug)]
pub struct Track<S> {
    /// The tileset.
    tileset: Tileset,

    /// The coordinate base of the feature records.
    base: Base,

    /// The row packer.
    packer: Packer,

    /// The sequence fetcher.
    fetcher: Fetcher<S>,

    /// The codons of the registered tiles.
    cache: Cache,
}

impl<S> Track<S>
where
    S: Source,
{
    /// Gets the tileset.
    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    /// Gets the coordinate base of the feature records.
    pub fn base(&self) -> Base {
        self.base
    }

    /// Gets the row packer.
    pub fn packer(&self) -> &Packer {
        &self.packer
    }

    /// Gets the sequence fetcher.
    pub fn fetcher(&self) -> &Fetcher<S> {
        &self.fetcher
    }

    /// Gets the codon cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Resolves a tile to the chromosome ranges it covers.
    pub fn resolve_tile(&self, key: Key) -> Result<Vec<Range>> {
        let tile = Tile::try_from_key(key, &self.tileset).map_err(Error::Tile)?;
        Ok(tile::resolve(&tile, self.tileset.chromosomes()))
    }

    /// Reads the valid transcripts of a tile's feature records.
    ///
    /// Invalid records are logged and skipped.
    pub fn read_transcripts<R>(&self, inner: R) -> io::Result<Vec<Transcript>>
    where
        R: BufRead,
    {
        Reader::new(inner)
            .transcripts(self.tileset.chromosomes(), self.base)
            .collect()
    }

    /// Merges the transcripts of several tiles by id.
    ///
    /// The first occurrence of each transcript is kept, in order.
    pub fn visible_transcripts<I>(&self, tiles: I) -> Vec<Transcript>
    where
        I: IntoIterator<Item = Vec<Transcript>>,
    {
        let mut seen = HashSet::new();

        tiles
            .into_iter()
            .flatten()
            .filter(|transcript| seen.insert(transcript.id().to_string()))
            .collect()
    }

    /// Lays out transcripts into display rows.
    pub fn assign_rows(&self, transcripts: &mut [Transcript]) -> Layout {
        self.packer.assign_rows(transcripts)
    }

    /// Registers a tile so that its codons are accepted.
    pub fn register_tile(&mut self, key: Key) {
        self.cache.register(key);
    }

    /// Evicts a tile and its codons.
    pub fn evict_tile(&mut self, key: &Key) {
        self.cache.evict(key);
    }

    /// Evicts every tile.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Reconstructs the codons of the coding transcripts on a tile.
    ///
    /// Codons are only reconstructed at the deepest zoom level; other zoom
    /// levels yield nothing. A transcript whose reconstruction fails carries
    /// its error, and the others are unaffected. Failing to fetch the tile
    /// itself fails the whole tile.
    pub async fn reconstruct_frames(
        &self,
        key: Key,
        transcripts: &[Transcript],
    ) -> Result<Frames> {
        if key.zoom() != self.tileset.max_zoom() {
            debug!("skipping codons for tile {key}: not at the deepest zoom level");
            return Ok(Vec::new());
        }

        let windows = self
            .fetcher
            .get_tile(key.zoom(), key.index(), &self.tileset)
            .await
            .map_err(Error::Fetch)?;

        let mut frames = Vec::new();

        for transcript in transcripts.iter().filter(|t| t.is_coding()) {
            let Some(window) = windows
                .iter()
                .find(|(range, _)| overlaps(range, transcript))
            else {
                continue;
            };

            let Some(chrom_length) = self
                .tileset
                .chromosomes()
                .get(transcript.chrom())
                .map(|entry| entry.length())
            else {
                continue;
            };

            let result = frame::reconstruct(&self.fetcher, transcript, window, chrom_length).await;
            frames.push((transcript.id().to_string(), result));
        }

        Ok(frames)
    }

    /// Stores reconstructed codons for a tile.
    ///
    /// Failed reconstructions are logged and skipped. Nothing is stored if
    /// the tile was evicted in the meantime. Returns the number of
    /// transcripts whose codons were stored.
    pub fn apply_frames(&mut self, key: Key, frames: Frames) -> usize {
        if !self.cache.is_registered(&key) {
            debug!("dropping codons for evicted tile {key}");
            return 0;
        }

        let mut applied = 0;

        for (id, result) in frames {
            match result {
                Ok(codons) => {
                    if self.cache.apply(key, id, codons) {
                        applied += 1;
                    }
                }
                Err(err) => warn!("no codons for transcript `{id}` on tile {key}: {err}"),
            }
        }

        applied
    }

    /// Gets the codons of a transcript on a tile.
    pub fn codons(&self, key: &Key, id: &str) -> Option<&[Codon]> {
        self.cache.codons(key, id)
    }
}

/// Returns whether a transcript overlaps a tile range.
fn overlaps(range: &Range, transcript: &Transcript) -> bool {
    let start: Number = range.absolute_start();
    let end = start + range.len();

    range.chrom() == transcript.chrom()
        && transcript.tx_start() < end
        && start < transcript.tx_end()
}
