//! # Sender Sleuth CLI
//!
//! Command-line interface for the Sender Sleuth library (`sender_sleuth_core`).
//! This binary reads a page scan payload (JSON), sets up configuration, runs
//! the extraction, and renders or saves the resulting sender list.

use sender_sleuth_core::{ConfigBuilder, PageScan, ScanOutcome, SenderSleuth};

// Dependencies specific to the CLI binary
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const WRONG_PAGE_MESSAGE: &str = "Not on the webmail site - please open the spam folder and scan again";
const WRONG_FOLDER_MESSAGE: &str = "Please navigate to the Spam folder first";
const EMPTY_MESSAGE: &str = "No spam emails found in spam folder. The folder may be empty.";

/// How results are written.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    /// Human-readable listing; files receive one address per line
    Text,
    /// The tagged scan outcome as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Extracts sender email addresses from a scanned webmail spam folder.",
    long_about = "Sender Sleuth reads the fragments a page scanner collected from a webmail spam folder (attribute values, link targets, visible text), repairs the addresses the mail UI mangled, drops service senders, and prints the sorted, deduplicated list."
)]
struct AppArgs {
    /// Path to the JSON page scan to read, or '-' for standard input.
    #[arg(short, long, default_value = "-", env = "SENDER_SLEUTH_INPUT")]
    input: String,

    /// Path of the file the results are written to.
    #[arg(short, long, default_value = "senders.txt", env = "SENDER_SLEUTH_OUTPUT")]
    output: String,

    /// Print results to standard output instead of writing the output file.
    #[arg(long, default_value = "false", env = "SENDER_SLEUTH_STDOUT")]
    stdout: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "SENDER_SLEUTH_FORMAT")]
    format: OutputFormat,

    /// Path to a configuration file (TOML format). CLI args override file settings.
    #[arg(long, env = "SENDER_SLEUTH_CONFIG")]
    config_file: Option<String>,

    /// Minimum distinct addresses from message rows before the page-wide fallback is skipped.
    #[arg(long, env = "SENDER_SLEUTH_FALLBACK_THRESHOLD")]
    fallback_threshold: Option<usize>,

    /// Host the scanned page must belong to.
    #[arg(long, env = "SENDER_SLEUTH_WEBMAIL_HOST")]
    webmail_host: Option<String>,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Setting up tracing subscriber failed")?;

    tracing::info!(
        "Sender Sleuth CLI v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let args = AppArgs::parse();
    tracing::debug!("Parsed CLI arguments: {:?}", args);

    let mut config_builder = ConfigBuilder::new();
    if let Some(ref path) = args.config_file {
        config_builder = config_builder.config_file(path);
    }
    if let Some(threshold) = args.fallback_threshold {
        config_builder = config_builder.fallback_threshold(threshold);
    }
    if let Some(ref host) = args.webmail_host {
        config_builder = config_builder.webmail_host(host);
    }

    let config = match config_builder.build() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(anyhow::anyhow!("Failed to build configuration: {}", e));
        }
    };
    tracing::debug!("Effective configuration loaded: {:?}", config);

    let start_time = Instant::now();
    let scan = load_scan(&args.input)?;
    let sleuth = SenderSleuth::with_shared_config(Arc::new(config));
    if sleuth.config().fallback_threshold == 0 {
        tracing::info!("Page-wide fallback scan disabled; only message rows will be scanned.");
    }
    let outcome = sleuth
        .scan_page(&scan)
        .with_context(|| format!("Failed to process page scan from '{}'", args.input))?;

    if args.stdout {
        print_outcome(&outcome, args.format)?;
    } else {
        tracing::info!("Saving results to '{}'...", args.output);
        save_outcome(&outcome, args.format, &args.output)?;
    }

    tracing::info!(
        "Processing finished. Total duration: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn load_scan(input: &str) -> Result<PageScan> {
    if input == "-" {
        tracing::debug!("Reading page scan from standard input");
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read page scan from standard input")?;
        return serde_json::from_str(&buffer)
            .context("Failed to parse JSON page scan from standard input");
    }

    let path = Path::new(input);
    if !path.is_file() {
        return Err(anyhow::anyhow!(
            "Input file not found or is not a file: {}",
            input
        ));
    }
    let file =
        File::open(path).with_context(|| format!("Failed to open input file '{}'", input))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| {
        format!(
            "Failed to parse JSON from '{}'. Expected an object with a 'fragments' array.",
            input
        )
    })
}

/// The text offered for copying: one address per line.
fn clipboard_text(addresses: &[String]) -> String {
    addresses.join("\n")
}

fn status_message(outcome: &ScanOutcome) -> Option<&'static str> {
    match outcome {
        ScanOutcome::WrongPage => Some(WRONG_PAGE_MESSAGE),
        ScanOutcome::WrongFolder => Some(WRONG_FOLDER_MESSAGE),
        ScanOutcome::Ok { addresses } if addresses.is_empty() => Some(EMPTY_MESSAGE),
        ScanOutcome::Ok { .. } => None,
    }
}

fn print_outcome(outcome: &ScanOutcome, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        let rendered =
            serde_json::to_string_pretty(outcome).context("Failed to serialize scan outcome")?;
        println!("{}", rendered);
        return Ok(());
    }

    const BLUE: &str = "\x1b[34m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const RESET: &str = "\x1b[0m";

    if let Some(message) = status_message(outcome) {
        println!("{YELLOW}{}{RESET}", message);
        return Ok(());
    }

    let addresses = outcome.addresses();
    println!(
        "{BLUE}Found {} sender email{}{RESET}",
        addresses.len(),
        if addresses.len() == 1 { "" } else { "s" }
    );
    for email in addresses {
        println!("{GREEN}{}{RESET}", email);
    }
    Ok(())
}

fn save_outcome(outcome: &ScanOutcome, format: OutputFormat, file_path: &str) -> Result<()> {
    if let (OutputFormat::Text, ScanOutcome::WrongPage | ScanOutcome::WrongFolder) =
        (format, outcome)
    {
        if let Some(message) = status_message(outcome) {
            tracing::warn!("{}", message);
        }
        tracing::warn!("Leaving '{}' untouched.", file_path);
        return Ok(());
    }

    if let Some(parent_dir) = Path::new(file_path).parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            tracing::debug!("Creating output directory: {}", parent_dir.display());
            std::fs::create_dir_all(parent_dir).with_context(|| {
                format!(
                    "Failed to create output directory '{}'",
                    parent_dir.display()
                )
            })?;
        }
    }

    let file = File::create(file_path)
        .with_context(|| format!("Failed to create/truncate output file '{}'", file_path))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(&mut writer, outcome)
            .with_context(|| format!("Failed to serialize results to JSON for '{}'", file_path))?,
        OutputFormat::Text => {
            if let Some(message) = status_message(outcome) {
                tracing::warn!("{}", message);
            }
            let text = clipboard_text(outcome.addresses());
            if !text.is_empty() {
                writeln!(writer, "{}", text)
                    .with_context(|| format!("Failed to write results to '{}'", file_path))?;
            }
        }
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush output file '{}'", file_path))?;

    tracing::info!("Wrote {} addresses ({})", outcome.addresses().len(), format);
    Ok(())
}
