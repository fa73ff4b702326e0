//! `txtrack` is a crate for laying out transcript annotations on a zoomable
//! genomic axis and for reconstructing their reading frames from tiled
//! reference sequence.
//!
//! The crate provides two main points of entry:
//!
//! - Packing possibly-overlapping transcripts into display rows.
//! - Reconstructing the codons of protein-coding transcripts from reference
//!   sequence that arrives in fixed-width tiles.
//!
//! ## Coordinates and tiles
//!
//! Every chromosome of a [tileset](crate::tileset::Tileset) is laid end to end
//! on a single absolute axis, and the [`chromosome::Index`] translates between
//! absolute and chromosome-relative positions. At zoom level `z`, the axis is
//! cut into [tiles](crate::tile::Tile) of width `max_width / 2^z`; a tile may
//! straddle a chromosome boundary, in which case
//! [`tile::resolve()`](crate::tile::resolve) splits it into one
//! [`Range`](crate::tile::Range) per chromosome.
//!
//! ## Layout
//!
//! Transcripts are read from tab-delimited feature records with the
//! [`Reader`], merged across the visible tiles, and packed into rows by a
//! [`layout::Packer`]. Each transcript is placed on the lowest row on which it
//! does not overlap another transcript.
//!
//! ```
//! use txtrack::chromosome::Index;
//! use txtrack::layout;
//! use txtrack::transcript::Base;
//!
//! let data = b"chr1\t101\t200\tA\t1\t+\tG1\tT1\tprotein_coding\t101\t200\t101\t197\n\
//!              chr1\t151\t300\tB\t1\t-\tG2\tT2\tlncRNA\t151\t300\t.\t.\n";
//!
//! let chromosomes = Index::try_new(["chr1"], [1000])?;
//! let mut reader = txtrack::Reader::new(&data[..]);
//! let mut transcripts = reader
//!     .transcripts(&chromosomes, Base::One)
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let layout = layout::Builder::default().build().assign_rows(&mut transcripts);
//!
//! assert_eq!(layout.row_count(), 2);
//! assert_eq!(transcripts[1].display_row(), Some(1));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reading frames
//!
//! At the deepest zoom level, the [`frame`] module reconstructs the codons of
//! each coding transcript on a tile. Tile boundaries ignore exon and codon
//! boundaries, so the nucleotides needed to complete the codons at either
//! edge of a tile are fetched separately through a
//! [`sequence::Fetcher`], and transcripts on the negative strand are handled
//! by reflecting coordinates and reverse complementing sequence.
//!
//! The [`track::Track`] facade ties all of this together and keeps the
//! reconstructed codons in a tile-keyed [`frame::Cache`].
//!
//! ```
//! use txtrack::sequence::InMemory;
//! use txtrack::tile::Key;
//! use txtrack::tileset::Info;
//! use txtrack::tileset::Tileset;
//! use txtrack::track::Builder;
//!
//! let tileset = Tileset::try_from(Info::new(0, 16.0, 0.0, 16.0, "16", "chr1"))?;
//! let source = InMemory::from_reader(&b">chr1\nCCATGGCCTAACCCCC\n"[..])?;
//! let mut track = Builder::default().build(tileset, source);
//!
//! let data = "chr1\t3\t11\tA\t1\t+\tG\tT\tprotein_coding\t3\t11\t3\t9\n";
//! let transcripts = track.read_transcripts(data.as_bytes())?;
//!
//! let key = "0.0".parse::<Key>()?;
//! track.register_tile(key);
//!
//! let frames = pollster::block_on(track.reconstruct_frames(key, &transcripts))?;
//! track.apply_frames(key, frames);
//!
//! let protein = track
//!     .codons(&key, transcripts[0].id())
//!     .unwrap()
//!     .iter()
//!     .map(|codon| codon.amino_acid().key())
//!     .collect::<String>();
//! assert_eq!(protein, "MA*");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod chromosome;
pub mod codon;
pub mod frame;
pub mod layout;
pub mod reader;
pub mod sequence;
pub mod tile;
pub mod tileset;
pub mod track;
pub mod transcript;

pub use self::reader::Reader;
