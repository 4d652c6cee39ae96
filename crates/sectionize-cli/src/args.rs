use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use sectionize_core::analysis::ReportKind;

#[derive(Debug, Parser)]
#[command(
    name = "sectionize",
    version,
    about = "Normalize AI analysis reports into display sections"
)]
pub struct Args {
    /// Path to the raw analysis document (.json)
    pub input: PathBuf,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Only keep analyses of this kind (key-trends, netnographic, final)
    #[arg(long)]
    pub kind: Option<ReportKind>,

    /// Timestamp (RFC 3339) used for analyses without a date; defaults to now
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Keyed strings longer than this get their own heading
    #[arg(long, default_value_t = 50)]
    pub heading_threshold: usize,

    /// Also render sections that are hidden by default (e.g. "Sources")
    #[arg(long)]
    pub show_hidden: bool,

    /// Optional git commit hash for tool metadata
    #[arg(long)]
    pub commit: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
