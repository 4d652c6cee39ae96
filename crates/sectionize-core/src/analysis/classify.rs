//! Report-kind classification from top-level document keys.
//!
//! Keys are normalized (lowercased, `_` and whitespace removed) and matched
//! by substring in a fixed priority order:
//!
//!   - contains `keytrend`     → key_trends
//!   - else `netnographic`     → netnographic
//!   - else `final`            → final
//!   - else                    → unrecognized (entry skipped)

use crate::analysis::model::ReportKind;

const PATTERNS: [(&str, ReportKind); 3] = [
    ("keytrend", ReportKind::KeyTrends),
    ("netnographic", ReportKind::Netnographic),
    ("final", ReportKind::Final),
];

/// Classifies a top-level key. `None` means the entry produces no report.
pub fn classify(key: &str) -> Option<ReportKind> {
    let normalized: String = key
        .chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    PATTERNS
        .iter()
        .find(|(needle, _)| normalized.contains(needle))
        .map(|(_, kind)| *kind)
}
