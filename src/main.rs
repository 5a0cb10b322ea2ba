use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use sqlembed::ast::{Grammar, Node};
use sqlembed::{format_program, parse_nodes, read_nodes, Config};

/// Formats SQL embedded in JavaScript and TypeScript template literals
///
/// Input is an ESTree syntax tree as JSON: a single node or an array of
/// top-level nodes.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Grammar of the input tree (babel or typescript)
    #[arg(long, global = true, default_value = "babel")]
    grammar: Grammar,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured line width
    #[arg(long, global = true)]
    print_width: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the formatted code for each input (stdin when none given)
    Fmt { files: Vec<PathBuf> },
    /// Exit with status 1 if the formatted input differs from the expected file
    Check { input: PathBuf, expected: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(width) = cli.print_width {
        config.print_width = width;
    }

    match &cli.command {
        Command::Fmt { files } => {
            if files.is_empty() {
                let mut input = String::new();
                std::io::stdin()
                    .read_to_string(&mut input)
                    .context("failed to read stdin")?;
                print!("{}", format_json(&input, cli.grammar, &config)?);
            }
            for file in files {
                print!("{}", format_file(file, cli.grammar, &config)?);
            }
        }
        Command::Check { input, expected } => {
            let actual = format_file(input, cli.grammar, &config)?;
            let wanted = std::fs::read_to_string(expected)
                .with_context(|| format!("failed to read {}", expected.display()))?;
            if actual.trim_end() != wanted.trim_end() {
                eprintln!("{} is not formatted as expected", input.display());
                if let Some(diff) = first_difference(&actual, &wanted) {
                    eprintln!("  first difference at line {}:", diff.line);
                    eprintln!("    expected: {}", diff.expected.unwrap_or("<end of file>"));
                    eprintln!("    actual:   {}", diff.actual.unwrap_or("<end of file>"));
                }
                let (got, want) = (actual.trim_end().lines().count(), wanted.trim_end().lines().count());
                if got != want {
                    eprintln!("  expected {want} line(s), got {got}");
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn format_file(path: &Path, grammar: Grammar, config: &Config) -> Result<String> {
    let nodes = read_nodes(path).with_context(|| format!("failed to load {}", path.display()))?;
    format_nodes(&nodes, grammar, config)
        .with_context(|| format!("failed to format {}", path.display()))
}

fn format_json(input: &str, grammar: Grammar, config: &Config) -> Result<String> {
    let nodes = parse_nodes(input).context("invalid syntax tree on stdin")?;
    format_nodes(&nodes, grammar, config)
}

fn format_nodes(nodes: &[Node], grammar: Grammar, config: &Config) -> Result<String> {
    tracing::debug!(nodes = nodes.len(), %grammar, "formatting tree");
    Ok(format_program(nodes, grammar, config)?)
}

/// First line where two outputs disagree, 1-based. A side that ran out of
/// lines is `None`.
#[derive(Debug, PartialEq)]
struct Difference<'a> {
    line: usize,
    expected: Option<&'a str>,
    actual: Option<&'a str>,
}

fn first_difference<'a>(actual: &'a str, expected: &'a str) -> Option<Difference<'a>> {
    let mut actual_lines = actual.trim_end().lines();
    let mut expected_lines = expected.trim_end().lines();
    let mut line = 1;
    loop {
        match (actual_lines.next(), expected_lines.next()) {
            (None, None) => return None,
            (got, want) if got != want => {
                return Some(Difference {
                    line,
                    expected: want,
                    actual: got,
                })
            }
            _ => line += 1,
        }
    }
}
