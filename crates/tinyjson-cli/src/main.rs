//! `tinyjson` CLI: validate, format, query and inspect JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Validate (stdin → stdout)
//! echo '{"name":"example","version":1}' | tinyjson check
//!
//! # Compact or pretty re-serialization, file to file
//! tinyjson fmt -i data.json -o data.min.json
//! tinyjson fmt --pretty -i data.json
//!
//! # Select a value by dot path (numeric segments index arrays)
//! tinyjson get company.employees.0.name -i company.json
//!
//! # Size, node counts per type, nesting depth
//! tinyjson stats -i company.json
//!
//! # Raise the nesting ceiling for deeply nested input
//! tinyjson --max-depth 512 check -i deep.json
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=debug` to see
//! parser failures as they are logged.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tinyjson_core::{Limits, Value, ValueType, DEFAULT_MAX_DEPTH};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tinyjson",
    version,
    about = "Validate, format, query and inspect JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum array/object nesting accepted by the parser
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the input and report whether it is valid
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse and re-serialize (compact unless --pretty)
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent two spaces per level
        #[arg(long)]
        pretty: bool,
    },
    /// Print the value at a dot path, e.g. `company.employees.0.id`
    Get {
        /// Dot-separated path; numeric segments index arrays
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show document statistics (size, node counts, nesting depth)
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let limits = Limits::with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            parse_input(&text, limits)?;
            println!("valid");
        }
        Commands::Fmt {
            input,
            output,
            pretty,
        } => {
            let text = read_input(input.as_deref())?;
            let value = parse_input(&text, limits)?;
            let rendered = if pretty {
                value.to_pretty_string()
            } else {
                value.to_string()
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Get {
            path,
            input,
            output,
        } => {
            let text = read_input(input.as_deref())?;
            let value = parse_input(&text, limits)?;
            let selected = select(&value, &path)?;
            write_output(output.as_deref(), &selected.to_string())?;
        }
        Commands::Stats { input } => {
            let text = read_input(input.as_deref())?;
            let value = parse_input(&text, limits)?;
            let stats = Stats::collect(&value);
            println!("Bytes:      {}", text.len());
            println!("Max depth:  {}", stats.max_depth);
            println!("Nodes:      {}", stats.total());
            for (kind, count) in stats.counts() {
                println!("  {:<8} {}", format!("{kind}:"), count);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with JSON written to stdout.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_input(text: &str, limits: Limits) -> Result<Value> {
    tinyjson_core::Parser::new(text)
        .with_limits(limits)
        .parse()
        .context("Failed to parse JSON")
}

/// Walk a dot path from `root`. An empty path selects the root itself.
fn select<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        debug!(segment, kind = %current.value_type(), "path step");
        current = match current {
            Value::Array(_) => {
                let index: usize = segment
                    .parse()
                    .with_context(|| format!("'{segment}' is not an array index"))?;
                current
                    .at(index)
                    .with_context(|| format!("Path '{path}' not found"))?
            }
            Value::Object(_) => {
                if !current.is_member(segment) {
                    bail!("Path '{path}' not found: no key '{segment}'");
                }
                current.field(segment)?
            }
            other => bail!(
                "Path '{path}' not found: cannot descend into {} at '{segment}'",
                other.value_type()
            ),
        };
    }
    Ok(current)
}

/// Node counts per type plus the deepest container nesting.
#[derive(Default)]
struct Stats {
    counts: [usize; 7],
    max_depth: usize,
}

/// Report order; matches the declaration order of `ValueType`.
const KINDS: [ValueType; 7] = [
    ValueType::Null,
    ValueType::Int,
    ValueType::Bool,
    ValueType::Double,
    ValueType::String,
    ValueType::Array,
    ValueType::Object,
];

impl Stats {
    fn collect(root: &Value) -> Self {
        let mut stats = Stats::default();
        stats.visit(root, 0);
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        self.counts[value.value_type() as usize] += 1;
        match value {
            Value::Array(items) => {
                self.max_depth = self.max_depth.max(depth + 1);
                for item in items {
                    self.visit(item, depth + 1);
                }
            }
            Value::Object(map) => {
                self.max_depth = self.max_depth.max(depth + 1);
                for item in map.values() {
                    self.visit(item, depth + 1);
                }
            }
            _ => {}
        }
    }

    fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn counts(&self) -> impl Iterator<Item = (ValueType, usize)> + '_ {
        KINDS.iter().copied().zip(self.counts.iter().copied())
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
