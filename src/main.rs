use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use json_shape::{compare_shape_at, derive_shape, Pointer, Shape, NO_MISMATCHES};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{stdin, BufReader, IsTerminal, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Derives the shape of JSON documents, and checks documents against shapes.
///
/// Exits with 0 on success, 1 when `compare` finds mismatches, and 2 on any
/// error.
#[derive(Parser, Debug)]
#[command(name = "json-shape", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the shape of a JSON document.
    ///
    /// Object keys are printed in sorted order, not the order they appear in
    /// the document.
    Derive(DeriveArgs),

    /// Check a JSON document against a shape, printing every mismatch.
    ///
    /// Mismatches are listed with object keys in sorted order.
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct DeriveArgs {
    /// Where to read the document from. Dash (hyphen) indicates stdin.
    #[arg(default_value = "-")]
    input: String,

    /// What to print.
    #[arg(long, value_enum, default_value_t = Format::Shape)]
    format: Format,

    /// Print on a single line instead of indenting.
    #[arg(long)]
    compact: bool,

    /// JSON pointer to the part of the document to derive a shape from.
    #[arg(long, default_value = "")]
    pointer: String,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// File containing the shape to compare against, as printed by `derive`.
    #[arg(long)]
    shape: String,

    /// Where to read the document from. Dash (hyphen) indicates stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Print mismatches as a JSON array.
    #[arg(long)]
    json: bool,

    /// JSON pointer to the part of the document to compare. Reported paths
    /// are relative to the whole document.
    #[arg(long, default_value = "")]
    pointer: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// The shape itself.
    Shape,

    /// A JSON Type Definition (RFC 8927) schema for the shape.
    Jtd,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Derive(args) => run_derive(args),
        Commands::Compare(args) => run_compare(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!("{e:?}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run_derive(args: &DeriveArgs) -> Result<u8> {
    let pointer = Pointer::parse(&args.pointer)?;
    let doc = read_json(&args.input)?;
    let (value, _) = pointer.resolve(&doc)?;

    let shape = derive_shape(value);
    tracing::info!(input = describe(&args.input), "derived shape");

    match args.format {
        Format::Shape => print_json(&shape, args.compact)?,
        Format::Jtd => print_json(&shape.into_schema().into_serde_schema(), args.compact)?,
    }

    Ok(0)
}

fn run_compare(args: &CompareArgs) -> Result<u8> {
    if args.shape == "-" && args.input == "-" {
        bail!("the shape and the document can't both be read from stdin");
    }

    let pointer = Pointer::parse(&args.pointer)?;

    let shape = Shape::from_value(&read_json(&args.shape)?)
        .with_context(|| format!("invalid shape in {}", describe(&args.shape)))?;

    let doc = read_json(&args.input)?;
    let (value, at) = pointer.resolve(&doc)?;
    tracing::debug!(depth = pointer.segments().len(), path = %at, "resolved pointer");

    let mismatches = compare_shape_at(&shape, value, &at);
    tracing::info!(
        input = describe(&args.input),
        mismatches = mismatches.len(),
        "compared document against shape"
    );

    if args.json {
        print_json(&mismatches, false)?;
    } else if mismatches.is_empty() {
        println!("{}", NO_MISMATCHES);
    } else {
        for mismatch in &mismatches {
            tracing::debug!(path = mismatch.path(), "mismatch");
            println!("{}", mismatch);
        }
    }

    Ok(if mismatches.is_empty() { 0 } else { 1 })
}

fn read_json(source: &str) -> Result<Value> {
    tracing::debug!(source = describe(source), "reading JSON");

    let reader = BufReader::new(match source {
        "-" => Box::new(stdin()) as Box<dyn Read>,
        file => Box::new(File::open(file).with_context(|| format!("failed to open {}", file))?)
            as Box<dyn Read>,
    });

    serde_json::from_reader(reader)
        .with_context(|| format!("invalid JSON input in {}", describe(source)))
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };

    println!("{}", out);
    Ok(())
}

fn describe(source: &str) -> &str {
    if source == "-" {
        "stdin"
    } else {
        source
    }
}
