//! `json5` CLI: convert, query, and inspect JSON5 files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Convert JSON5 to pretty-printed JSON (stdin → stdout)
//! echo "{ name: 'Alice', tags: ['a', 'b',] }" | json5 decode
//!
//! # Convert from file to file, compact output
//! json5 decode -i config.json5 -o config.json --compact
//!
//! # Read one value by dotted path
//! json5 get witharray.0.name -i sample.json5
//!
//! # Show document statistics
//! json5 stats -i sample.json5
//!
//! # More logging (or set RUST_LOG)
//! json5 -vv stats -i sample.json5
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use json5_core::{ParseOptions, Value, DEFAULT_MAX_DEPTH};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "json5", version, about = "JSON5 parser CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Containers nested deeper than this are not parsed
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Treat `//` and `/* */` as ordinary characters instead of comments
    #[arg(long, global = true)]
    no_comments: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert JSON5 to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Print the value at a dotted path (e.g. `servers.0.host`) as JSON
    Get {
        /// Dotted path; numeric segments index arrays
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show document statistics (value counts per kind, nesting depth)
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ParseOptions::default()
        .with_max_depth(cli.max_depth)
        .with_comments(!cli.no_comments);

    match cli.command {
        Commands::Decode {
            input,
            output,
            compact,
        } => {
            let text = read_input(input.as_deref())?;
            let json = json5_core::to_json_with(&text, &options, !compact)
                .context("Failed to convert JSON5 to JSON")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Get { path, input } => {
            let text = read_input(input.as_deref())?;
            let value = json5_core::parse_with(&text, &options);
            let found = lookup(&value, &path)?;
            let json = serde_json::to_string_pretty(found)
                .context("Failed to convert JSON5 to JSON")?;
            println!("{}", json);
        }
        Commands::Stats { input } => {
            let text = read_input(input.as_deref())?;
            let value = json5_core::parse_with(&text, &options);
            let stats = Stats::collect(&value);
            println!("Input size: {} bytes", text.len());
            println!("Root:       {}", value.kind());
            println!("Values:     {}", stats.total());
            println!("  objects:  {}", stats.objects);
            println!("  arrays:   {}", stats.arrays);
            println!("  strings:  {}", stats.strings);
            println!("  integers: {}", stats.integers);
            println!("  floats:   {}", stats.floats);
            println!("  booleans: {}", stats.booleans);
            println!("  nulls:    {}", stats.nulls);
            println!("Max depth:  {}", stats.max_depth);
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Resolve a dotted path against a parsed document.
///
/// - `""` is the root
/// - `servers.0.host` indexes arrays by number and objects by key
/// - a numeric segment on an object is treated as a key
fn lookup<'v>(root: &'v Value, path: &str) -> Result<&'v Value> {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match (current, segment.parse::<usize>()) {
            (Value::Array(arr), Ok(index)) => {
                if index >= arr.len() {
                    anyhow::bail!(
                        "Index {} out of range at '{}' (array has {} elements)",
                        index,
                        segment,
                        arr.len()
                    );
                }
                current.at_opt(index)
            }
            (Value::Object(_), _) => current
                .at_key(segment)
                .with_context(|| format!("No value at path '{}'", path))?,
            (other, _) => {
                anyhow::bail!("Cannot descend into {} at '{}'", other.kind(), segment)
            }
        };
    }
    Ok(current)
}

/// Value counts for the `stats` subcommand.
#[derive(Default)]
struct Stats {
    nulls: usize,
    booleans: usize,
    integers: usize,
    floats: usize,
    strings: usize,
    objects: usize,
    arrays: usize,
    max_depth: usize,
}

impl Stats {
    fn collect(value: &Value) -> Self {
        let mut stats = Stats::default();
        stats.visit(value, 1);
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        match value {
            Value::Null => self.nulls += 1,
            Value::Boolean(_) => self.booleans += 1,
            Value::Integer(_) => self.integers += 1,
            Value::Float(_) => self.floats += 1,
            Value::String(_) => self.strings += 1,
            Value::Object(map) => {
                self.objects += 1;
                for child in map.values() {
                    self.visit(child, depth + 1);
                }
            }
            Value::Array(arr) => {
                self.arrays += 1;
                for child in arr {
                    self.visit(child, depth + 1);
                }
            }
        }
    }

    fn total(&self) -> usize {
        self.nulls
            + self.booleans
            + self.integers
            + self.floats
            + self.strings
            + self.objects
            + self.arrays
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    let text = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    debug!(bytes = text.len(), source = path.unwrap_or("<stdin>"), "read input");
    Ok(text)
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
