pub mod analysis;
pub mod input;
pub mod report;
pub mod util;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::analysis::{NormalizeConfig, normalize_document};
use crate::report::model::{Report, SourceInfo, ToolInfo};

pub const TOOL_NAME: &str = "sectionize";

/// JSON schema version of sectionize reports.
/// Bump only when the serialized `Report` shape changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Load an analysis document from disk and normalize it into a report.
///
/// `now` stamps analyses that carry no `date` of their own.
pub fn process(
    path: &Path,
    tool: ToolInfo,
    config: &NormalizeConfig,
    now: DateTime<Utc>,
) -> Result<Report> {
    let ctx = input::read_document(path)
        .with_context(|| format!("cannot process {}", path.display()))?;
    debug!(path = %path.display(), size_bytes = ctx.size_bytes, "loaded analysis document");

    let (value, source) = ctx.into_parts();
    Ok(process_value(&value, source, tool, config, now))
}

/// Normalize an in-memory analysis document into a report.
pub fn process_value(
    value: &Value,
    source: SourceInfo,
    tool: ToolInfo,
    config: &NormalizeConfig,
    now: DateTime<Utc>,
) -> Report {
    let normalized = normalize_document(value, config, now);
    debug!(
        analyses = normalized.entries.len(),
        skipped = normalized.skipped.len(),
        "normalized analysis document"
    );
    Report::new(tool, source, normalized, value)
}
