//! A binary to render the transcript track of one or more tiles as text.
//!
//! ```shell
//! cargo run --release --bin=txtrack --features=binaries -- \
//!     tileset.json hg38.fa.gz transcripts.tsv.gz --tile 22.1234 --tile 22.1235
//! ```
//!
//! It carries out the following:
//!
//! * Reads the tileset metadata, the reference sequence, and the transcript
//!   feature records (any of which may be gzipped).
//! * Lays out the transcripts overlapping the requested tiles into rows and
//!   prints the rows.
//! * For tiles at the deepest zoom level, reconstructs the codons of every
//!   coding transcript and prints them.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use flate2::read::GzDecoder;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;
use txtrack::sequence::InMemory;
use txtrack::tile::Key;
use txtrack::tile::Range;
use txtrack::tileset::Tileset;
use txtrack::track;
use txtrack::track::Track;
use txtrack::transcript::Base;
use txtrack::transcript::Transcript;

////////////////////////////////////////////////////////////////////////////////////////
// Input
////////////////////////////////////////////////////////////////////////////////////////

/// Opens a file for buffered reading, decompressing it if it ends in `.gz`.
fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// Returns whether a transcript overlaps any of a tile's ranges.
fn on_tile(transcript: &Transcript, ranges: &[Range]) -> bool {
    ranges.iter().any(|range| {
        let start = range.absolute_start();
        let end = start + range.len();

        range.chrom() == transcript.chrom()
            && transcript.tx_start() < end
            && start < transcript.tx_end()
    })
}

////////////////////////////////////////////////////////////////////////////////////////
// Output
////////////////////////////////////////////////////////////////////////////////////////

/// Prints a table with the rounded style used throughout the binary.
fn print_table(builder: Builder) {
    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    println!("{table}");
}

/// Prints the display rows of a set of laid out transcripts.
fn print_rows(transcripts: &[Transcript]) {
    let mut builder = Builder::default();
    builder.push_record(["Row", "Transcript", "Name", "Strand", "Start", "End", "Biotype"]);

    let mut placed = transcripts
        .iter()
        .filter_map(|transcript| transcript.display_row().map(|row| (row, transcript)))
        .collect::<Vec<_>>();
    placed.sort_by_key(|(row, transcript)| (*row, transcript.tx_start()));

    for (row, transcript) in placed {
        builder.push_record([
            row.to_string(),
            transcript.id().to_string(),
            transcript.name().to_string(),
            transcript
                .strand()
                .map(|strand| strand.to_string())
                .unwrap_or(String::from(".")),
            transcript.tx_start().to_string(),
            transcript.tx_end().to_string(),
            transcript.biotype().to_string(),
        ]);
    }

    print_table(builder);
}

/// Prints the codons of every transcript on a tile.
fn print_codons(track: &Track<InMemory>, key: &Key, transcripts: &[Transcript]) {
    let mut builder = Builder::default();
    builder.push_record(["Transcript", "Positions", "Split", "Amino acid", "Property"]);

    for transcript in transcripts {
        let Some(codons) = track.codons(key, transcript.id()) else {
            continue;
        };

        for codon in codons {
            let amino_acid = codon.amino_acid();

            builder.push_record([
                transcript.id().to_string(),
                codon
                    .positions()
                    .iter()
                    .map(|position| position.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
                codon.split_across_boundary().to_string(),
                format!("{} ({})", amino_acid.name(), amino_acid.abbreviation()),
                amino_acid
                    .property()
                    .map(|property| property.to_string())
                    .unwrap_or(String::from("<None>")),
            ]);
        }
    }

    print_table(builder);
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Renders the transcript track for a set of tiles.
#[derive(Parser)]
struct Args {
    /// The tileset metadata (JSON).
    tileset: PathBuf,

    /// The reference sequence (FASTA).
    reference: PathBuf,

    /// The transcript feature records (tab-delimited).
    features: PathBuf,

    /// The tiles to render (e.g., `22.1234`).
    #[arg(short, long = "tile", required = true)]
    tiles: Vec<Key>,

    /// If desired, the maximum number of display rows.
    #[arg(short, long)]
    max_rows: Option<usize>,

    /// Whether the feature records use zero-based starts.
    #[arg(short, long, default_value_t = false)]
    zero_based: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

fn render(args: &Args) -> Result<()> {
    let tileset = Tileset::from_reader(open(&args.tileset)?).context("reading tileset")?;

    info!("reading reference sequence from {}", args.reference.display());
    let source = InMemory::from_reader(open(&args.reference)?).context("reading reference")?;

    if source.is_empty() {
        bail!("no sequences found in {}", args.reference.display());
    }

    let base = if args.zero_based { Base::Zero } else { Base::One };
    let mut builder = track::Builder::default().base(base);

    if let Some(max_rows) = args.max_rows {
        builder = builder.max_rows(max_rows);
    }

    let mut track = builder.build(tileset, source);

    let transcripts = track
        .read_transcripts(open(&args.features)?)
        .context("reading feature records")?;
    info!("read {} transcripts", transcripts.len());

    let mut tiles = Vec::new();

    for key in &args.tiles {
        let ranges = track
            .resolve_tile(*key)
            .with_context(|| format!("resolving tile {key}"))?;

        let overlapping = transcripts
            .iter()
            .filter(|transcript| on_tile(transcript, &ranges))
            .cloned()
            .collect::<Vec<_>>();

        tiles.push((*key, overlapping));
    }

    let mut visible = track.visible_transcripts(tiles.iter().map(|(_, t)| t.clone()));
    let layout = track.assign_rows(&mut visible);

    if !layout.discarded().is_empty() {
        warn!(
            "{} transcripts did not fit in {} rows",
            layout.discarded().len(),
            layout.row_count()
        );
    }

    print_rows(&visible);

    for (key, transcripts) in &tiles {
        if key.zoom() != track.tileset().max_zoom() {
            info!("tile {key}: codons are only shown at the deepest zoom level");
            continue;
        }

        track.register_tile(*key);

        let frames = pollster::block_on(track.reconstruct_frames(*key, transcripts))
            .with_context(|| format!("reconstructing codons for tile {key}"))?;
        let applied = track.apply_frames(*key, frames);
        info!("tile {key}: codons for {applied} transcripts");

        print_codons(&track, key, transcripts);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    render(&args)
}
