//! The query-stream driver behind the `histg` binary (ported from
//! `histg.c`'s `main`, `print_header` and `should_print`). Kept in the
//! library so it can be exercised without a process boundary; the binary
//! itself only parses arguments and opens files (see `src/bin/histg.rs`).

use std::io::{BufRead, Write};

use crate::counters::Counters;
use crate::enumerate::{find_hists, find_spanning_trees, FirstMatchReporter, NullReporter, Reporter};
use crate::error::CliError;
use crate::graph::Graph;
use crate::hypohist::{is_hypohist, is_hypohist_partials};
use crate::io::{self, Format};

/// Which queries to run over each input graph, and how to report them.
/// One query flag set (`spanning`/`hist`/`hypohist`) may be true at a
/// time in combination with any of the others, exactly as in the
/// original's argp flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub spanning: bool,
    pub hist: bool,
    pub hypohist: bool,
    /// Stop each search at the first match instead of counting all of them.
    pub boolean: bool,
    pub positives: bool,
    pub negatives: bool,
    pub quiet: bool,
    pub timing: bool,
    pub header: bool,
    pub echo: bool,
    /// Write every enumerated tree to the enumerate sink passed to `run`.
    pub enumerate: bool,
    pub format: Format,
}

impl Default for Config {
    /// The default query is `hist`, with both positive and negative rows
    /// printed — the same defaults `histg.c`'s `main` falls back to when
    /// no relevant flags were passed.
    fn default() -> Self {
        Config {
            spanning: false,
            hist: true,
            hypohist: false,
            boolean: false,
            positives: true,
            negatives: true,
            quiet: false,
            timing: false,
            header: false,
            echo: false,
            enumerate: false,
            format: Format::Graph6,
        }
    }
}

/// Installs a `tracing_subscriber::fmt` subscriber, filterable via
/// `RUST_LOG`. Call once, at the top of `main`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Cumulative totals across every graph read during one `run` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Summary {
    pub read_graphs: u64,
    pub total_spanning_trees: u64,
    pub total_hists: u64,
    pub total_hypohists: u64,
}

/// Writes the CSV header row implied by `config`, if `config.header` is set.
pub fn print_header(config: &Config, mut output: impl Write) -> Result<(), CliError> {
    if !config.header {
        return Ok(());
    }

    let mut columns = Vec::new();
    if config.echo {
        columns.push("graph".to_string());
    }
    if config.spanning {
        columns.push("spanning_trees".to_string());
        if config.timing {
            columns.push("spanning_trees_timing".to_string());
        }
    }
    if config.hist {
        columns.push("hists".to_string());
        if config.timing {
            columns.push("hists_timing".to_string());
        }
    }
    if config.hypohist {
        columns.push("hypohist".to_string());
    }

    writeln!(output, "{}", columns.join(","))?;
    Ok(())
}

/// Whether a result row should be printed, given the counts found for one
/// graph (ported from `should_print` in `histg.c`).
fn should_print(config: &Config, nb_spanning_trees: u64, nb_hists: u64, is_hypo: bool) -> bool {
    if config.quiet {
        return false;
    }
    if config.positives && config.negatives {
        return true;
    }
    if config.positives
        && ((config.spanning && nb_spanning_trees > 0)
            || (config.hist && nb_hists > 0)
            || (config.hypohist && is_hypo))
    {
        return true;
    }
    if config.negatives
        && ((config.spanning && nb_spanning_trees == 0)
            || (config.hist && nb_hists == 0)
            || (config.hypohist && !is_hypo))
    {
        return true;
    }
    false
}

fn write_graph(format: Format, graph: &Graph, sink: &mut dyn Write) -> Result<(), CliError> {
    match format {
        Format::Graph6 => writeln!(sink, "{}", io::graph6::encode(graph)?)?,
        Format::AdjacencyMatrix => write!(sink, "{}", io::adjacency_matrix::encode(graph))?,
        Format::AdjacencyList => write!(sink, "{}", io::adjacency_list::encode(graph))?,
    }
    Ok(())
}

/// Writes every reported tree to `sink` in `format`, stopping at the
/// first one when `stop_after_first` is set. Keeps the first write error
/// it hits so the caller can propagate it once the search unwinds.
struct WritingReporter<'a> {
    format: Format,
    sink: &'a mut dyn Write,
    stop_after_first: bool,
    error: Option<CliError>,
}

impl Reporter for WritingReporter<'_> {
    fn report(&mut self, tree: Graph) -> bool {
        if let Err(err) = write_graph(self.format, &tree, self.sink) {
            self.error = Some(err);
            return false;
        }
        !self.stop_after_first
    }
}

/// Where enumerated trees go when `config.enumerate` is set. Kept as an
/// enum rather than a plain `Option<&mut dyn Write>` so that "write
/// enumerated trees into the same stream as the result rows" (the
/// original's behaviour when `-e` was passed with no filename) can reuse
/// `run`'s own `output` borrow instead of asking the caller to alias it.
pub enum EnumerateTarget<'a> {
    /// `config.enumerate` is false, or nothing was requested.
    None,
    /// Interleave enumerated trees into the same stream as the result rows.
    SameAsOutput,
    /// Write enumerated trees to a dedicated sink.
    Separate(&'a mut dyn Write),
}

/// Runs `search` through the right `Reporter` for `sink` and
/// `config.boolean`, returning the resulting counters.
fn run_search(
    config: &Config,
    sink: Option<&mut dyn Write>,
    search: impl FnOnce(Option<&mut dyn Reporter>, &mut Counters),
) -> Result<Counters, CliError> {
    let mut counters = Counters::new();
    match sink {
        Some(sink) => {
            let mut reporter = WritingReporter {
                format: config.format,
                sink,
                stop_after_first: config.boolean,
                error: None,
            };
            search(Some(&mut reporter), &mut counters);
            if let Some(err) = reporter.error {
                return Err(err);
            }
        }
        None if config.boolean => {
            let mut reporter = FirstMatchReporter::default();
            search(Some(&mut reporter), &mut counters);
        }
        None => {
            let mut reporter = NullReporter;
            search(Some(&mut reporter), &mut counters);
        }
    }
    Ok(counters)
}

/// Reads one graph per line from `input` (graph6 format, as the original
/// always used for its stream input) and runs the configured queries
/// over each, writing result rows to `output` and, when
/// `config.enumerate` is set, enumerated trees to `enumerate_target`.
pub fn run(
    config: &Config,
    input: impl BufRead,
    mut output: impl Write,
    mut enumerate_target: EnumerateTarget<'_>,
) -> Result<Summary, CliError> {
    let mut summary = Summary::default();
    print_header(config, &mut output)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let graph = io::graph6::decode(&line)?;
        summary.read_graphs += 1;
        tracing::debug!(graph_index = summary.read_graphs, vertices = graph.vertices(), "processing graph");

        let mut row = String::new();
        if config.echo {
            row.push_str(&io::graph6::encode(&graph)?);
            row.push(',');
        }

        let mut nb_spanning_trees = 0u64;
        let mut nb_hists = 0u64;
        let mut is_hypo = false;

        if config.spanning {
            let started = std::time::Instant::now();
            let sink: Option<&mut dyn Write> = if config.enumerate {
                match &mut enumerate_target {
                    EnumerateTarget::None => None,
                    EnumerateTarget::SameAsOutput => Some(&mut output),
                    EnumerateTarget::Separate(w) => Some(&mut **w),
                }
            } else {
                None
            };
            let counters = run_search(config, sink, |reporter, counters| {
                find_spanning_trees(&graph, reporter, config.boolean, counters);
            })?;
            nb_spanning_trees = counters.trees_this_run;
            summary.total_spanning_trees += nb_spanning_trees;

            row.push_str(&nb_spanning_trees.to_string());
            if config.timing {
                row.push_str(&format!(",{:.6}", started.elapsed().as_secs_f64()));
            }
        }

        if config.hist {
            if config.spanning {
                row.push(',');
            }

            let started = std::time::Instant::now();
            let sink: Option<&mut dyn Write> = if config.enumerate {
                match &mut enumerate_target {
                    EnumerateTarget::None => None,
                    EnumerateTarget::SameAsOutput => Some(&mut output),
                    EnumerateTarget::Separate(w) => Some(&mut **w),
                }
            } else {
                None
            };
            let counters = run_search(config, sink, |reporter, counters| {
                find_hists(&graph, 0, reporter, config.boolean, counters);
            })?;
            nb_hists = counters.hists_this_run;
            summary.total_hists += nb_hists;

            row.push_str(&nb_hists.to_string());
            if config.timing {
                row.push_str(&format!(",{:.6}", started.elapsed().as_secs_f64()));
            }

            if config.hypohist {
                let mut counters = Counters::new();
                if nb_hists == 0 {
                    is_hypo = is_hypohist_partials(&graph, None, &mut counters);
                }
                summary.total_hypohists += is_hypo as u64;
                row.push_str(&format!(",{}", is_hypo as u8));
            }
        } else if config.hypohist {
            let mut counters = Counters::new();
            is_hypo = is_hypohist(&graph, None, false, &mut counters);
            summary.total_hypohists += is_hypo as u64;
            row.push_str(&(is_hypo as u8).to_string());
        }

        row.push('\n');
        if should_print(config, nb_spanning_trees, nb_hists, is_hypo) {
            output.write_all(row.as_bytes())?;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k4_line() -> String {
        io::graph6::encode(
            &Graph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn default_config_counts_hists() {
        let config = Config::default();
        let input = k4_line();
        let mut output = Vec::new();
        let summary = run(&config, input.as_bytes(), &mut output, EnumerateTarget::None).unwrap();

        assert_eq!(summary.read_graphs, 1);
        assert_eq!(summary.total_hists, 4);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "4\n");
    }

    #[test]
    fn quiet_suppresses_every_row() {
        let mut config = Config::default();
        config.quiet = true;
        let mut output = Vec::new();
        run(&config, k4_line().as_bytes(), &mut output, EnumerateTarget::None).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn positives_only_hides_zero_results() {
        let mut config = Config::default();
        config.positives = true;
        config.negatives = false;
        let triangle = io::graph6::encode(&Graph::from_edges(3, [(0, 1), (1, 2), (0, 2)]).unwrap()).unwrap();
        let mut output = Vec::new();
        let summary = run(&config, triangle.as_bytes(), &mut output, EnumerateTarget::None).unwrap();

        assert_eq!(summary.total_hists, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn header_lists_requested_columns() {
        let mut config = Config::default();
        config.header = true;
        config.timing = true;
        let mut output = Vec::new();
        print_header(&config, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "hists,hists_timing\n");
    }

    #[test]
    fn enumerate_writes_trees_to_the_side_sink() {
        let mut config = Config::default();
        config.enumerate = true;
        let mut output = Vec::new();
        let mut trees = Vec::new();
        run(&config, k4_line().as_bytes(), &mut output, EnumerateTarget::Separate(&mut trees)).unwrap();

        let tree_lines = String::from_utf8(trees).unwrap();
        assert_eq!(tree_lines.lines().count(), 4);
    }

    #[test]
    fn boolean_mode_stops_after_one_hist_per_graph() {
        let mut config = Config::default();
        config.boolean = true;
        let mut output = Vec::new();
        let summary = run(&config, k4_line().as_bytes(), &mut output, EnumerateTarget::None).unwrap();
        assert_eq!(summary.total_hists, 1);
    }
}
