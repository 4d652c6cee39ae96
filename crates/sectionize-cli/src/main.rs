use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sectionize_core::analysis::NormalizeConfig;
use sectionize_core::process;
use sectionize_core::report::{
    model::ToolInfo,
    render::{self, RenderOptions},
};

mod args;

fn main() -> Result<()> {
    // stdout carries the report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = args::Args::parse();

    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: args.commit.clone(),
    };
    let config = NormalizeConfig {
        heading_threshold: args.heading_threshold,
    };
    let now = args.now.unwrap_or_else(Utc::now);

    let mut report = process(&args.input, tool, &config, now)?;
    if let Some(kind) = args.kind {
        report.retain_kind(kind);
    }
    info!(
        analyses = report.analyses.len(),
        status = %report.status.status,
        "report ready"
    );

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => {
            let options = if args.show_hidden {
                RenderOptions::show_all()
            } else {
                RenderOptions::default()
            };
            render::render_text(&report, &options)
        }
    };

    match args.out {
        Some(path) => std::fs::write(path, &output)?,
        None => print!("{output}"),
    }

    Ok(())
}
