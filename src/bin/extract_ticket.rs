//! Run one ticket extraction from the command line.
//!
//! Reads OCR text from a file (or stdin), calls the extraction backend and
//! prints the display fields.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use ticket_scanner_lib::{
    default_app_data_dir, ExtractionConfig, RuntimeEnvironment, TicketExtractionClient,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Runtime {
    Native,
    Development,
    Production,
}

impl From<Runtime> for RuntimeEnvironment {
    fn from(r: Runtime) -> Self {
        match r {
            Runtime::Native => RuntimeEnvironment::NativeShell,
            Runtime::Development => RuntimeEnvironment::Development,
            Runtime::Production => RuntimeEnvironment::Production,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    /// Full backend response, unformatted
    Raw,
}

/// Extract structured data from parking ticket OCR text
#[derive(Parser)]
#[command(name = "extract_ticket")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File holding OCR text; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Override TIXAPP_RUNTIME
    #[arg(long, value_enum)]
    runtime: Option<Runtime>,

    /// Override TIXAPP_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match default_app_data_dir() {
        Some(dir) => ExtractionConfig::from_app_data_dir(&dir),
        None => ExtractionConfig::from_env(),
    }
    .context("loading configuration")?;
    if let Some(runtime) = cli.runtime {
        config = config.with_runtime(runtime.into());
    }
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }

    let ocr_text = read_input(cli.input.as_ref())?;
    let client = TicketExtractionClient::new(&config).context("building extraction client")?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let response = client.extract_with_cancel(&ocr_text, &cancel).await?;

    match cli.format {
        OutputFormat::Raw => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Json => {
            let fields = ticket_scanner_lib::normalize(&response);
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        OutputFormat::Table => {
            let fields = ticket_scanner_lib::normalize(&response);
            if fields.is_empty() {
                println!("No ticket fields extracted.");
            }
            let width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0);
            for field in &fields {
                println!("{:width$}  {}", field.label, field.value, width = width);
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("could not read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("could not read OCR text from stdin")?;
            Ok(buf)
        }
    }
}
