//! Analysis normalization.
//!
//! Turns a raw multi-report analysis document (an untyped JSON mapping of
//! report key → report value) into an ordered list of
//! [`ProcessedAnalysis`] with a canonical [`Section`] body.
//!
//! Normalization is pure and total: malformed input degrades to fewer or
//! emptier sections, never to an error.

pub mod classify;
pub mod generic;
pub mod key_trends;
pub mod model;
pub mod title;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::debug;

pub use classify::classify;
pub use generic::{normalize_generic, normalize_section};
pub use key_trends::normalize_key_trends;
pub use model::{NormalizeConfig, ProcessedAnalysis, ReportKind, Section};
pub use title::{derive_title, format_key};

/// Why a top-level document entry produced no analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Scalars and `null`; only objects and arrays carry a report.
    NotStructured,
    UnrecognizedKey,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotStructured => f.write_str("not an object or array"),
            SkipReason::UnrecognizedKey => f.write_str("unrecognized report key"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub key: String,
    pub reason: SkipReason,
}

/// One produced analysis together with the document key it came from.
#[derive(Debug, Clone)]
pub struct NormalizedEntry {
    pub key: String,
    pub analysis: ProcessedAnalysis,
}

/// Normalized analyses plus the entries that were left out.
#[derive(Debug, Clone, Default)]
pub struct NormalizedDocument {
    pub entries: Vec<NormalizedEntry>,
    pub skipped: Vec<SkippedEntry>,
}

impl NormalizedDocument {
    pub fn into_analyses(self) -> Vec<ProcessedAnalysis> {
        self.entries.into_iter().map(|e| e.analysis).collect()
    }
}

/// Normalizes every recognized report in `doc`, in document key order.
///
/// Reports without a `date` are stamped with the current UTC time.
pub fn normalize(doc: &Value, config: &NormalizeConfig) -> Vec<ProcessedAnalysis> {
    normalize_at(doc, config, Utc::now())
}

/// Same as [`normalize`] with an explicit fallback timestamp.
pub fn normalize_at(
    doc: &Value,
    config: &NormalizeConfig,
    now: DateTime<Utc>,
) -> Vec<ProcessedAnalysis> {
    normalize_document(doc, config, now).into_analyses()
}

/// Normalizes `doc` and records which top-level entries were skipped.
pub fn normalize_document(
    doc: &Value,
    config: &NormalizeConfig,
    now: DateTime<Utc>,
) -> NormalizedDocument {
    let mut out = NormalizedDocument::default();

    let Some(entries) = doc.as_object() else {
        debug!("analysis document is not an object; nothing to normalize");
        return out;
    };

    let fallback_date = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    for (key, value) in entries {
        if !(value.is_object() || value.is_array()) {
            debug!(key = %key, "skipping scalar report entry");
            out.skipped.push(SkippedEntry {
                key: key.clone(),
                reason: SkipReason::NotStructured,
            });
            continue;
        }

        let Some(kind) = classify(key) else {
            debug!(key = %key, "skipping unrecognized report key");
            out.skipped.push(SkippedEntry {
                key: key.clone(),
                reason: SkipReason::UnrecognizedKey,
            });
            continue;
        };

        let body = match kind {
            ReportKind::KeyTrends => normalize_key_trends(value),
            ReportKind::Netnographic | ReportKind::Final => normalize_generic(value, config),
        };

        let date = report_date(key, value).unwrap_or_else(|| fallback_date.clone());

        out.entries.push(NormalizedEntry {
            key: key.clone(),
            analysis: ProcessedAnalysis {
                id: title::slug(key),
                title: derive_title(key, value),
                kind,
                date,
                body,
            },
        });
    }

    out
}

/// Explicit report date: a non-empty string, or a number kept in its
/// textual form (epoch timestamps).
fn report_date(key: &str, value: &Value) -> Option<String> {
    match value.get("date")? {
        Value::String(date) if !date.is_empty() => Some(date.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(_) | Value::Null => None,
        other => {
            debug!(key, date = %other, "ignoring report date that is not a string or number");
            None
        }
    }
}
