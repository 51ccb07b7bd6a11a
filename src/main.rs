//! csv2rdf CLI - Transform CSV input into RDF triples
//!
//! ```bash
//! csv2rdf mapping.rq https://example.org/ < input.csv > output.nt
//! csv2rdf mapping.rq https://example.org/ --input data.csv --output data.nt
//! csv2rdf mapping.rq https://example.org/ -d ';' --input-charset iso-8859-1
//! ```
//!
//! Reads delimited text from stdin (or `--input`), applies the SPARQL
//! CONSTRUCT/DESCRIBE query from the query file to every row, and writes
//! the resulting triples as N-Triples to stdout (or `--output`).

use clap::Parser;
use csv2rdf::{decode_content, detect_encoding, transform_read, TransformOptions, TransformQuery};
use std::fs;
use std::io::{self, BufReader, BufWriter, Cursor, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csv2rdf")]
#[command(about = "Transform CSV input into RDF triples with a SPARQL query", long_about = None)]
struct Cli {
    /// File with the SPARQL CONSTRUCT/DESCRIBE query used for the transformation
    query_file: PathBuf,

    /// Base IRI of the RDF output data (e.g. https://example.org/)
    base: String,

    /// Input CSV file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for the N-Triples stream (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter character used in the input data
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Input charset label, or "auto" to detect it
    #[arg(long, default_value = "utf-8")]
    input_charset: String,

    /// Maximum number of characters allowed for any single cell
    #[arg(long, default_value_t = 4096)]
    max_chars_per_column: usize,

    /// Write the run report (subject/triple counts) as JSON to this file
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn main() {
    // Load .env file (if present), e.g. for RUST_LOG
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let query_text = fs::read_to_string(&cli.query_file)?;
    let query = TransformQuery::parse(&query_text, &cli.base)?;

    if !cli.delimiter.is_ascii() {
        return Err(format!(
            "delimiter must be a single ASCII character, got '{}'",
            cli.delimiter
        )
        .into());
    }
    let options = TransformOptions {
        delimiter: cli.delimiter as u8,
        max_cell_len: Some(cli.max_chars_per_column),
    };

    let input = open_input(&cli)?;
    let report = match cli.output {
        Some(ref path) => {
            let out = BufWriter::new(fs::File::create(path)?);
            transform_read(input, &query, &options, out)?
        }
        None => {
            let stdout = io::stdout();
            transform_read(input, &query, &options, BufWriter::new(stdout.lock()))?
        }
    };

    eprintln!(
        "✅ {} subjects, {} triples",
        report.subject_count, report.triple_count
    );

    if let Some(ref path) = cli.stats {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        eprintln!("💾 Stats written to: {}", path.display());
    }

    Ok(())
}

/// Open the CSV input, decoding it when a non-UTF-8 charset is requested.
///
/// UTF-8 input streams straight through. Other charsets (and "auto"
/// detection) are decoded up front at this boundary; the core only ever
/// consumes characters.
fn open_input(cli: &Cli) -> Result<Box<dyn Read>, Box<dyn std::error::Error>> {
    let charset = cli.input_charset.to_lowercase();
    if matches!(charset.as_str(), "utf-8" | "utf8" | "ascii") {
        return Ok(match cli.input {
            Some(ref path) => Box::new(BufReader::new(fs::File::open(path)?)),
            None => Box::new(io::stdin()),
        });
    }

    let bytes = match cli.input {
        Some(ref path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    let label = if charset == "auto" {
        let detected = detect_encoding(&bytes);
        eprintln!("   Detected charset: {}", detected);
        detected
    } else {
        charset
    };
    let content = decode_content(&bytes, &label)?;
    Ok(Box::new(Cursor::new(content.into_bytes())))
}
