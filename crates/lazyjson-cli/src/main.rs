//! `lazyjson` CLI — query JSON objects from the command line without decoding
//! more of them than needed.
//!
//! ## Usage
//!
//! ```sh
//! # Read a scalar (stdin → stdout)
//! echo '{"user":{"name":"Alice"}}' | lazyjson get user.name
//!
//! # Print a nested object's tagged values
//! lazyjson object user -i response.json
//!
//! # Print the raw text of an array
//! lazyjson array user.roles -i response.json
//!
//! # List the keys of the top level or of a nested object
//! lazyjson keys user -i response.json
//!
//! # Dump the whole document, fully expanded, as pretty JSON
//! lazyjson dump --expand -i response.json -o expanded.json
//!
//! # Trace the scanner
//! RUST_LOG=lazyjson_core=trace lazyjson keys -i response.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lazyjson_core::ObjectStore;
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lazyjson",
    version,
    about = "Query JSON objects with lazily decoded nested values"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the scalar value at a dotted key path
    Get {
        /// Dotted key path, e.g. `user.address.city`
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the tagged values of the nested object at a dotted key path
    Object {
        path: String,
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the raw text of the array at a dotted key path
    Array {
        path: String,
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List `key<TAB>tag` for the top level or a nested object
    Keys {
        /// Dotted path of the object to list (top level if omitted)
        path: Option<String>,
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Dump the whole object
    Dump {
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit the tagged key → value map as JSON
        #[arg(long, conflicts_with = "expand")]
        json: bool,
        /// Decode every nested object and emit plain JSON
        #[arg(long)]
        expand: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Get {
            path,
            input,
            output,
        } => {
            let store = read_store(input.as_deref())?;
            let value = store
                .get_path(&path)
                .with_context(|| format!("Failed to read '{}'", path))?;
            write_or_exit(&path, value, output.as_deref())?;
        }
        Commands::Object {
            path,
            input,
            output,
        } => {
            let store = read_store(input.as_deref())?;
            let object = store
                .object_at(&path)
                .with_context(|| format!("Failed to read object '{}'", path))?;
            write_or_exit(&path, object.map(|o| o.to_string()), output.as_deref())?;
        }
        Commands::Array {
            path,
            input,
            output,
        } => {
            let store = read_store(input.as_deref())?;
            let array = store
                .get_array_path(&path)
                .with_context(|| format!("Failed to read array '{}'", path))?;
            write_or_exit(&path, array, output.as_deref())?;
        }
        Commands::Keys {
            path,
            input,
            output,
        } => {
            let store = read_store(input.as_deref())?;
            let path = path.unwrap_or_default();
            let Some(object) = store
                .object_at(&path)
                .with_context(|| format!("Failed to read object '{}'", path))?
            else {
                missing(&path);
            };
            let listing: Vec<String> = object
                .iter()
                .map(|(key, cell)| format!("{}\t{}", key, cell.tag()))
                .collect();
            write_output(output.as_deref(), &listing.join("\n"))?;
        }
        Commands::Dump {
            input,
            output,
            json,
            expand,
        } => {
            let store = read_store(input.as_deref())?;
            let rendered = if expand {
                let value = store.expand().context("Failed to expand nested objects")?;
                serde_json::to_string_pretty(&value)?
            } else if json {
                serde_json::to_string_pretty(&store)?
            } else {
                store.to_string()
            };
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only query results.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_store(path: Option<&str>) -> Result<ObjectStore> {
    let text = read_input(path)?;
    debug!(bytes = text.len(), "read input");
    lazyjson_core::decode(&text).context("Failed to decode JSON object")
}

/// Absence is not a library error, but a query for a missing key still
/// exits non-zero.
fn write_or_exit(path: &str, value: Option<String>, output: Option<&str>) -> Result<()> {
    match value {
        Some(value) => write_output(output, &value),
        None => missing(path),
    }
}

fn missing(path: &str) -> ! {
    eprintln!("No value at '{}'", path);
    process::exit(1);
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
