//! Plain-text rendering of a [`Report`].
//!
//! Each section renders its heading, content, bullets and then its
//! subsections one level deeper. An analysis with nothing visible falls
//! back to its raw JSON, so a report is never shown blank.

use std::fmt::Write;

use thiserror::Error;
use tracing::warn;

use crate::TOOL_NAME;
use crate::analysis::model::Section;
use crate::report::model::{Report, ReportEntry};

pub const UNSUPPORTED_NOTE: &str = "Format not fully supported; showing raw data.";
pub const PENDING_NOTE: &str = "This section is pending completion.";

/// Presentation switches for [`render_text`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Top-level headings that are not shown. Compared case-insensitively.
    pub hidden_headings: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hidden_headings: vec!["sources".to_string()],
        }
    }
}

impl RenderOptions {
    pub fn show_all() -> Self {
        Self {
            hidden_headings: vec![],
        }
    }

    fn hides(&self, section: &Section) -> bool {
        section.heading.as_deref().is_some_and(|heading| {
            self.hidden_headings
                .iter()
                .any(|h| h.eq_ignore_ascii_case(heading.trim()))
        })
    }
}

#[derive(Debug, Error)]
enum RenderError {
    #[error("formatting failed")]
    Fmt(#[from] std::fmt::Error),

    #[error("failed to serialize raw data: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn render_text(report: &Report, options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    out.push_str(&format!(
        "Source: {} ({} bytes)\n",
        report.source.path.as_deref().unwrap_or("<memory>"),
        report.source.size_bytes
    ));
    out.push_str(&format!("Status: {}\n", report.status.status));
    for w in &report.status.warnings {
        out.push_str(&format!("  ! {w}\n"));
    }

    for entry in &report.analyses {
        out.push('\n');
        match render_entry(entry, options) {
            Ok(text) => out.push_str(&text),
            Err(e) => {
                warn!(id = %entry.analysis.id, error = %e, "rendering failed; showing raw data");
                out.push_str(&render_raw(entry));
            }
        }
    }
    out
}

fn render_entry(entry: &ReportEntry, options: &RenderOptions) -> Result<String, RenderError> {
    let analysis = &entry.analysis;
    let mut out = String::new();
    writeln!(out, "{}", analysis.title)?;
    writeln!(out, "[{}] {}", analysis.kind, analysis.date)?;

    let visible: Vec<&Section> = analysis.body.iter().filter(|s| !options.hides(s)).collect();
    if visible.is_empty() {
        let raw = match &entry.fallback {
            Some(value) => serde_json::to_string_pretty(value)?,
            None => serde_json::to_string_pretty(&analysis.body)?,
        };
        writeln!(out, "{UNSUPPORTED_NOTE}")?;
        writeln!(out, "{raw}")?;
        return Ok(out);
    }

    for section in visible {
        render_section(&mut out, section, 0)?;
    }
    Ok(out)
}

fn render_section(out: &mut String, section: &Section, depth: usize) -> std::fmt::Result {
    let indent = "  ".repeat(depth);

    if let Some(heading) = &section.heading {
        writeln!(out, "{indent}{} {heading}", "#".repeat(depth + 2))?;
    }
    if let Some(content) = &section.content {
        for line in content.lines() {
            writeln!(out, "{indent}{line}")?;
        }
    }
    for bullet in &section.bullets {
        writeln!(out, "{indent}- {bullet}")?;
    }

    let is_pending_conclusion = section.content.is_none()
        && section.bullets.is_empty()
        && section.subsections.is_empty()
        && section
            .heading
            .as_deref()
            .is_some_and(|h| h.to_lowercase().contains("conclusion"));
    if is_pending_conclusion {
        writeln!(out, "{indent}{PENDING_NOTE}")?;
    }

    for sub in &section.subsections {
        render_section(out, sub, depth + 1)?;
    }
    Ok(())
}

/// Infallible raw-JSON display used when rendering an entry fails.
fn render_raw(entry: &ReportEntry) -> String {
    let value = match &entry.fallback {
        Some(value) => value.clone(),
        None => serde_json::to_value(&entry.analysis).unwrap_or_default(),
    };
    let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    format!("{}\n{UNSUPPORTED_NOTE}\n{pretty}\n", entry.analysis.title)
}
