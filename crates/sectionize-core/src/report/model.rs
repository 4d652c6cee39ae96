use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::SCHEMA_VERSION;
use crate::analysis::model::{ProcessedAnalysis, ReportKind};
use crate::analysis::{NormalizedDocument, SkippedEntry};

/// Top-level sectionize report.
///
/// This struct is the JSON contract of the CLI output. Analyses appear in
/// the key order of the input document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub source: SourceInfo,
    pub status: StatusInfo,
    pub analyses: Vec<ReportEntry>,
}

impl Report {
    /// Assemble a report from a normalized document.
    ///
    /// `raw` is the document `normalized` was produced from; it supplies the
    /// raw-JSON fallback for analyses with nothing visible to show.
    pub fn new(tool: ToolInfo, source: SourceInfo, normalized: NormalizedDocument, raw: &Value) -> Self {
        let mut warnings: Vec<String> = normalized.skipped.iter().map(skip_warning).collect();

        let analyses: Vec<ReportEntry> = normalized
            .entries
            .into_iter()
            .map(|entry| {
                let raw_value = raw.get(&entry.key).unwrap_or(&Value::Null);
                ReportEntry::new(entry.analysis, raw_value)
            })
            .collect();

        for entry in analyses.iter().filter(|e| e.fallback.is_some()) {
            warn!(id = %entry.analysis.id, "analysis format not fully supported; attaching raw data");
            warnings.push(fallback_warning(&entry.analysis.id));
        }

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            source,
            status: StatusInfo::for_count(analyses.len(), warnings),
            analyses,
        }
    }

    /// Keep only analyses of `kind`.
    ///
    /// Fallback warnings of removed analyses go with them; skip warnings
    /// describe the whole document and stay.
    pub fn retain_kind(&mut self, kind: ReportKind) {
        let dropped: Vec<String> = self
            .analyses
            .iter()
            .filter(|e| e.analysis.kind != kind && e.fallback.is_some())
            .map(|e| fallback_warning(&e.analysis.id))
            .collect();

        self.analyses.retain(|e| e.analysis.kind == kind);
        self.status.warnings.retain(|w| !dropped.contains(w));
        self.status.status = StatusInfo::for_count(self.analyses.len(), vec![]).status;
    }
}

fn fallback_warning(id: &str) -> String {
    format!("{id}: format not fully supported; raw data attached")
}

fn skip_warning(skipped: &SkippedEntry) -> String {
    format!("skipped {}: {}", skipped.key, skipped.reason)
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub commit: Option<String>,
}

/// Input document metadata bound to this report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: Option<String>,
    pub size_bytes: u64,
    pub hash: SourceHash,
}

/// Cryptographic fingerprint of the input bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceHash {
    pub algorithm: String,
    pub value: String,
}

/// Normalization status.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusInfo {
    pub status: String,
    pub warnings: Vec<String>,
}

impl StatusInfo {
    pub fn ok(warnings: Vec<String>) -> Self {
        Self {
            status: "ok".into(),
            warnings,
        }
    }

    pub fn empty(warnings: Vec<String>) -> Self {
        Self {
            status: "empty".into(),
            warnings,
        }
    }

    fn for_count(count: usize, warnings: Vec<String>) -> Self {
        if count == 0 {
            Self::empty(warnings)
        } else {
            Self::ok(warnings)
        }
    }
}

/// One analysis as emitted in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub analysis: ProcessedAnalysis,

    /// Raw report value, present only when `analysis.body` is empty so
    /// consumers can still show the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Value>,
}

impl ReportEntry {
    pub fn new(analysis: ProcessedAnalysis, raw: &Value) -> Self {
        let fallback = (!analysis.has_visible_body()).then(|| raw.clone());
        Self { analysis, fallback }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::Section;
    use crate::analysis::{NormalizedEntry, SkipReason};
    use serde_json::json;

    fn tool() -> ToolInfo {
        ToolInfo {
            name: "sectionize".into(),
            version: "1.0.0".into(),
            commit: None,
        }
    }

    fn source() -> SourceInfo {
        SourceInfo {
            path: None,
            size_bytes: 10,
            hash: SourceHash {
                algorithm: "sha256".into(),
                value: "abc".into(),
            },
        }
    }

    fn analysis(id: &str, kind: ReportKind, body: Vec<Section>) -> ProcessedAnalysis {
        ProcessedAnalysis {
            id: id.into(),
            title: id.into(),
            kind,
            date: "2024-01-01".into(),
            body,
        }
    }

    #[test]
    fn empty_body_attaches_raw_fallback() {
        let raw = json!({ "final": { "score": null } });
        let normalized = NormalizedDocument {
            entries: vec![NormalizedEntry {
                key: "final".into(),
                analysis: analysis("final", ReportKind::Final, vec![]),
            }],
            skipped: vec![],
        };

        let report = Report::new(tool(), source(), normalized, &raw);

        assert_eq!(report.analyses[0].fallback, Some(json!({ "score": null })));
        assert_eq!(report.status.status, "ok");
        assert_eq!(
            report.status.warnings,
            vec!["final: format not fully supported; raw data attached"]
        );
    }

    #[test]
    fn skipped_keys_become_warnings_and_empty_status() {
        let normalized = NormalizedDocument {
            entries: vec![],
            skipped: vec![SkippedEntry {
                key: "personas".into(),
                reason: SkipReason::UnrecognizedKey,
            }],
        };

        let report = Report::new(tool(), source(), normalized, &json!({}));

        assert_eq!(report.status.status, "empty");
        assert_eq!(
            report.status.warnings,
            vec!["skipped personas: unrecognized report key"]
        );
    }

    #[test]
    fn entry_serializes_flattened_without_fallback() {
        let entry = ReportEntry::new(
            analysis("key_trends", ReportKind::KeyTrends, vec![Section::heading("1- Overview")]),
            &json!({}),
        );

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["id"], "key_trends");
        assert_eq!(value["kind"], "key_trends");
        assert_eq!(value["body"][0]["heading"], "1- Overview");
        assert!(value.get("fallback").is_none());
    }

    #[test]
    fn retain_kind_filters_and_updates_status() {
        let normalized = NormalizedDocument {
            entries: vec![NormalizedEntry {
                key: "final".into(),
                analysis: analysis("final", ReportKind::Final, vec![Section::content("x")]),
            }],
            skipped: vec![],
        };
        let mut report = Report::new(tool(), source(), normalized, &json!({}));

        report.retain_kind(ReportKind::Netnographic);

        assert!(report.analyses.is_empty());
        assert_eq!(report.status.status, "empty");
    }

    #[test]
    fn retain_kind_drops_fallback_warnings_of_removed_analyses() {
        let raw = json!({
            "key_trends": {},
            "final_notes": { "score": null },
        });
        let normalized = NormalizedDocument {
            entries: vec![
                NormalizedEntry {
                    key: "key_trends".into(),
                    analysis: analysis("key_trends", ReportKind::KeyTrends, vec![]),
                },
                NormalizedEntry {
                    key: "final_notes".into(),
                    analysis: analysis("final_notes", ReportKind::Final, vec![]),
                },
            ],
            skipped: vec![SkippedEntry {
                key: "personas".into(),
                reason: SkipReason::UnrecognizedKey,
            }],
        };
        let mut report = Report::new(tool(), source(), normalized, &raw);
        assert_eq!(report.status.warnings.len(), 3);

        report.retain_kind(ReportKind::Final);

        assert_eq!(report.analyses.len(), 1);
        assert_eq!(report.status.status, "ok");
        assert_eq!(
            report.status.warnings,
            vec![
                "skipped personas: unrecognized report key",
                "final_notes: format not fully supported; raw data attached",
            ]
        );
    }
}
