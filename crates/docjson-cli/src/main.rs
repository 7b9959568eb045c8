//! `docjson` CLI — format, validate and query JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-serialize compactly (stdin → stdout)
//! echo '{ "name" : "Alice" }' | docjson format
//!
//! # Pretty-print from file to file
//! docjson format --pretty 2 -i data.json -o data.pretty.json
//!
//! # Keep backslash sequences exactly as written
//! docjson format --verbatim -i legacy.json
//!
//! # Check a document
//! docjson validate -i data.json
//!
//! # Read one value by dot path (numeric segments index arrays)
//! docjson get creators.0.name -i data.json
//! docjson get publisher --default unknown -i data.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use docjson_core::{EscapeMode, JsonBuilder, JsonConfig, TypedAccess, Value};
use std::io::{self, Read};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "docjson", version, about = "Format, validate and query JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and write it back out
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent nested values by this many spaces
        #[arg(long)]
        pretty: Option<usize>,
        /// Keep backslash sequences in strings as written instead of decoding them
        #[arg(long)]
        verbatim: bool,
    },
    /// Check that the input holds a well-formed object or array
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the value at a dot-separated path
    Get {
        /// Path such as `creators.0.name`
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Printed instead of failing when the path does not resolve
        #[arg(long)]
        default: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Format {
            input,
            output,
            pretty,
            verbatim,
        } => {
            let mut config = JsonConfig::new();
            if let Some(width) = pretty {
                config = config.pretty(width);
            }
            if verbatim {
                config = config.with_escape_mode(EscapeMode::Verbatim);
            }
            let builder = JsonBuilder::with_config(config);
            let text = read_input(input.as_deref())?;
            let value = read_document(&builder, &text)?;
            let formatted = builder.create_writer().to_string(&value);
            write_output(output.as_deref(), &formatted)?;
        }
        Commands::Validate { input } => {
            let text = read_input(input.as_deref())?;
            let value = read_document(&JsonBuilder::new(), &text)?;
            println!("valid {}", value.kind());
        }
        Commands::Get {
            path,
            input,
            default,
        } => {
            let text = read_input(input.as_deref())?;
            let value = read_document(&JsonBuilder::new(), &text)?;
            match (resolve_path(&value, &path), default) {
                (Ok(found), _) => println!("{}", render(found)),
                (Err(e), Some(fallback)) => {
                    debug!(error = %e, "path did not resolve, printing default");
                    println!("{fallback}");
                }
                (Err(e), None) => return Err(e),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_document(builder: &JsonBuilder, text: &str) -> Result<Value> {
    let mut reader = builder.create_reader(text.as_bytes());
    match reader.read().context("Failed to parse JSON")? {
        Some(value) => Ok(value),
        None => bail!("No JSON object or array found in input"),
    }
}

/// Walks `path` segment by segment. Numeric segments index arrays.
fn resolve_path<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(obj) => obj
                .get(segment)
                .with_context(|| format!("Path '{path}' not found"))?,
            Value::Array(arr) => {
                let index: usize = segment
                    .parse()
                    .with_context(|| format!("'{segment}' is not an array index"))?;
                arr.get(index)
                    .with_context(|| format!("Path '{path}' not found"))?
            }
            other => bail!("Cannot descend into {} at '{segment}'", other.kind()),
        };
    }
    Ok(current)
}

/// Strings print bare; everything else prints as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_json_string(),
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
            print!("{}", content);
        }
    }
    Ok(())
}
