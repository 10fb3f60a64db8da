/// ABP command-line tool: decode fixed-width little-endian primitives from
/// a file or stdin.
///
/// # Command overview
///
/// ```text
/// abp <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Decode a sequence of primitives following a layout
///   kinds      List the primitive kinds, their widths and the byte order
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log accumulator activity (end of stream, cancellation) to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                        |
/// |------|------------------------------------------------|
/// | 0    | Success                                        |
/// | 1    | Error (I/O failure, truncated input, bad flag) |
///
/// Errors go to stderr so decoded values on stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

mod cmd_decode;
mod cmd_kinds;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The ABP (Async Binary Primitives) command-line tool.
#[derive(Parser)]
#[command(name = "abp", version, about = "Async Binary Primitives CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log accumulator activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode primitives from a file (or `-` for stdin) following a layout.
    Decode(DecodeArgs),
    /// List the primitive kinds, their widths and the byte order.
    Kinds,
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `abp decode`.
///
/// The layout is a comma-separated list of kind names applied in order,
/// one record at a time. Each decoded value prints as one line:
///
/// ```text
/// 00000000  u32   305419896
/// 00000004  i16   -2
/// 00000006  f64   1.5
/// ```
///
/// ```text
/// ┌──────────────┬────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                             │
/// ├──────────────┼────────────────────────────────────────────────────┤
/// │ --layout     │ Kinds of one record, e.g. `u32,i16,f64` (required) │
/// │ --repeat N   │ Decode N records (default 1)                       │
/// │ --all        │ Decode records until input ends on a boundary      │
/// │ --backoff-ms │ Retry delay after an empty read (default 10)       │
/// │ --max-len    │ Largest single read in bytes                       │
/// └──────────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Input file, or `-` to read stdin.
    pub input: PathBuf,

    /// Comma-separated primitive kinds making up one record.
    #[arg(short, long)]
    pub layout: String,

    /// Number of records to decode.
    #[arg(long, default_value_t = 1, conflicts_with = "all")]
    pub repeat: usize,

    /// Keep decoding records until the input ends at a record boundary.
    #[arg(long)]
    pub all: bool,

    /// Delay before retrying after an empty read, in milliseconds.
    #[arg(long, default_value_t = 10)]
    pub backoff_ms: u64,

    /// Upper bound for a single accumulated read, in bytes.
    #[arg(long, default_value_t = abp_reader::config::DEFAULT_MAX_LEN)]
    pub max_len: usize,
}

/// Log level used when `RUST_LOG` does not say otherwise.
fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // `RUST_LOG` directives win; `-v` only moves the default from warn to debug.
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(cli.verbose).into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args).await,
        Commands::Kinds => {
            cmd_kinds::run();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
