// DocuMint command-line entry point
// Runs the extraction engine over saved model responses

use anyhow::Context;
use clap::{Parser, Subcommand};
use documint_core::config::{AnalysisConfig, LogFormat};
use documint_core::models::{InsightRecord, InsightType};
use documint_core::{parse_document_type, parse_insights_from_text, prompts};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "documint", version, about = "Extract typed insights from model responses")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an analysis response into insights
    Parse {
        /// Response file (stdin when omitted)
        file: Option<PathBuf>,
        /// Type implied by the prompt that produced the response
        #[arg(short, long, default_value = "suggestion")]
        default_type: InsightType,
        /// Print full insights (with confidence) instead of wire records
        #[arg(long)]
        full: bool,
    },
    /// Classify a document-type detection response
    Classify {
        /// Response file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Print the prompt plan for a document
    Prompts {
        /// Document text file (stdin when omitted)
        file: Option<PathBuf>,
        /// Detected document type used to select the specific questions
        #[arg(short = 't', long, default_value = "Unknown Document")]
        document_type: String,
    },
}

fn init_tracing(format: LogFormat, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
    .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AnalysisConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format, cli.verbose)?;

    match cli.command {
        Command::Parse {
            file,
            default_type,
            full,
        } => {
            let text = read_input(file.as_deref())?;
            let insights = parse_insights_from_text(&text, default_type);
            info!("Parsed {} insights", insights.len());
            if full {
                print_json(&insights)
            } else {
                let records: Vec<InsightRecord> = insights.iter().map(InsightRecord::from).collect();
                print_json(&records)
            }
        }
        Command::Classify { file } => {
            let text = read_input(file.as_deref())?;
            print_json(&parse_document_type(&text))
        }
        Command::Prompts {
            file,
            document_type,
        } => {
            let text = read_input(file.as_deref())?;
            let mut plan = prompts::generic_prompts(&text);
            let mut specific = prompts::specific_prompts(&document_type, &text);
            specific.truncate(config.max_specific_prompts);
            plan.extend(specific);
            print_json(&serde_json::json!({
                "document_type": document_type,
                "question_set": prompts::question_set_for(&document_type),
                "detection_prompt": prompts::document_type_prompt(&text),
                "prompts": plan,
            }))
        }
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("documint error: {error:#}");
        std::process::exit(1);
    }
}
