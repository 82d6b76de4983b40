//! `histg` -- finds homeomorphically irreducible spanning trees.
//!
//! Thin wrapper: parse arguments, open files, hand off to
//! `histg::cli::run`. See `histg::cli` for the actual query logic.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use histg::cli::{self, Config, EnumerateTarget};
use histg::io::Format;
use histg::CliError;

#[derive(Debug, Parser)]
#[command(name = "histg", version, about = "Finds homeomorphically irreducible spanning trees")]
struct Cli {
    /// Input file to read (graph6, one graph per line); defaults to stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output file; defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress the per-graph result line.
    #[arg(long)]
    quiet: bool,

    /// Compute homeomorphically irreducible spanning trees (the default query).
    #[arg(long)]
    hist: bool,

    /// Compute plain spanning trees instead of HISTs.
    #[arg(long)]
    spanning: bool,

    /// Decide whether each graph is hypohisterian.
    #[arg(long)]
    hypohist: bool,

    /// Emit every tree found, to FILE if given or to the main output otherwise.
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "")]
    enumerate: Option<PathBuf>,

    /// Only print rows with at least one match.
    #[arg(long)]
    positives: bool,

    /// Only print rows with zero matches.
    #[arg(long)]
    negatives: bool,

    /// Stop at the first match per graph; print 0/1 instead of a count.
    #[arg(long)]
    boolean: bool,

    /// Append elapsed seconds per query per row.
    #[arg(long)]
    timing: bool,

    /// Print a CSV header line before the rows.
    #[arg(long = "csv-header")]
    csv_header: bool,

    /// Prefix each row with the graph6 encoding of the input graph.
    #[arg(long = "graph-echo")]
    graph_echo: bool,

    /// Output format for `--enumerate`: g6, am, or al.
    #[arg(long = "output-format", value_name = "FORMAT", default_value = "g6")]
    output_format: String,
}

fn parse_format(s: &str) -> Format {
    match s {
        "am" => Format::AdjacencyMatrix,
        "al" => Format::AdjacencyList,
        _ => Format::Graph6,
    }
}

fn main() -> Result<(), CliError> {
    cli::init_tracing();
    let args = Cli::parse();

    let mut config = Config {
        spanning: args.spanning,
        hist: args.hist,
        hypohist: args.hypohist,
        boolean: args.boolean,
        positives: args.positives,
        negatives: args.negatives,
        quiet: args.quiet,
        timing: args.timing,
        header: args.csv_header,
        echo: args.graph_echo,
        enumerate: args.enumerate.is_some(),
        format: parse_format(&args.output_format),
    };

    if !config.spanning && !config.hist && !config.hypohist {
        config.hist = true;
    }
    if !config.positives && !config.negatives {
        config.positives = true;
        config.negatives = true;
    }

    let input: Box<dyn io::BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let mut enumerate_file;
    let enumerate_target = match args.enumerate.as_deref() {
        Some(path) if !path.as_os_str().is_empty() => {
            enumerate_file = BufWriter::new(File::create(path)?);
            EnumerateTarget::Separate(&mut enumerate_file)
        }
        Some(_) => EnumerateTarget::SameAsOutput,
        None => EnumerateTarget::None,
    };

    let started = std::time::Instant::now();
    let summary = cli::run(&config, input, output, enumerate_target)?;
    let elapsed = started.elapsed().as_secs_f64();

    tracing::info!(
        spanning_trees = summary.total_spanning_trees,
        hists = summary.total_hists,
        hypohists = summary.total_hypohists,
        graphs = summary.read_graphs,
        elapsed_seconds = elapsed,
        "finished"
    );

    Ok(())
}
