use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod error;
mod har;
mod timing;
mod utils;

use commands::loading_time::{DEFAULT_END_URL_SUFFIX, DEFAULT_START_URL_PREFIX};

#[derive(Parser)]
#[command(name = "har-tools")]
#[command(about = "HAR (HTTP Archive) sanitization and timing analysis tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Redact credentials, cookies and bodies from HAR capture file(s)
    Sanitize {
        /// Path to HAR file(s) - .gz and .zst are decompressed transparently
        #[arg(required = true)]
        har_files: Vec<String>,

        /// Output path (stdout if omitted; requires a single input)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Flatten HAR capture file(s) into a timing CSV table
    TimingCsv {
        /// Path to HAR file(s) - can specify multiple files
        #[arg(required = true)]
        har_files: Vec<String>,

        /// Output CSV path (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Keep only requests served from object storage (pre-signed S3 URLs)
        #[arg(long)]
        only_s3_path: bool,
    },

    /// Compute frame arrival latency and summary statistics from a timing CSV
    FrameAnalysis {
        /// Timing CSV file(s) produced by the timing-csv command
        #[arg(required = true)]
        csv_files: Vec<String>,

        /// Output CSV path; the statistics summary is written next to it
        /// as <stem>_summary.csv (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Nth frame(s) to report, 1-based
        #[arg(short = 'n', long, num_args = 1.., default_values_t = [1])]
        nth_frame: Vec<usize>,

        /// MIME type identifying a frame request
        #[arg(long, default_value = "image/png")]
        content_type: String,
    },

    /// Measure page-load time between a start and an end request marker
    LoadingTime {
        /// Path to HAR file(s) - can specify multiple files
        #[arg(required = true)]
        har_files: Vec<String>,

        /// Output JSON path (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// URL prefix of the GET request that starts the measurement
        #[arg(long, default_value = DEFAULT_START_URL_PREFIX)]
        start_url_prefix: String,

        /// URL suffix of the POST request that ends the measurement
        #[arg(long, default_value = DEFAULT_END_URL_SUFFIX)]
        end_url_suffix: String,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sanitize { har_files, output }) => {
            commands::sanitize::run(&har_files, output.as_deref())
        }
        Some(Commands::TimingCsv {
            har_files,
            output,
            only_s3_path,
        }) => commands::timing_csv::run(&har_files, output.as_deref(), only_s3_path),
        Some(Commands::FrameAnalysis {
            csv_files,
            output,
            nth_frame,
            content_type,
        }) => commands::frame_analysis::run(
            &csv_files,
            output.as_deref(),
            &nth_frame,
            &content_type,
        ),
        Some(Commands::LoadingTime {
            har_files,
            output,
            start_url_prefix,
            end_url_suffix,
        }) => commands::loading_time::run(
            &har_files,
            output.as_deref(),
            &start_url_prefix,
            &end_url_suffix,
        ),
        Some(Commands::GenerateCompletion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "har-tools", &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No subcommand: print help and exit cleanly.
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
