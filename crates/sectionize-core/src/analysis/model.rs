use serde::{Deserialize, Serialize};

/// Report family a top-level document key belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    KeyTrends,
    Netnographic,
    Final,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::KeyTrends => "key_trends",
            ReportKind::Netnographic => "netnographic",
            ReportKind::Final => "final",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "key_trends" => Ok(ReportKind::KeyTrends),
            "netnographic" => Ok(ReportKind::Netnographic),
            "final" => Ok(ReportKind::Final),
            other => Err(format!("unknown report kind: {other}")),
        }
    }
}

/// Canonical display unit produced by normalization.
///
/// Empty sections (no heading, content, bullets or subsections) are never
/// emitted by the normalizer; builders go through [`push_section`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Display order equals source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Section>,
}

impl Section {
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            heading: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn bullets(items: Vec<String>) -> Self {
        Self {
            bullets: items,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none()
            && self.content.is_none()
            && self.bullets.is_empty()
            && self.subsections.is_empty()
    }

    /// A headless section carrying only bullets.
    pub fn is_bullet_only(&self) -> bool {
        self.heading.is_none()
            && self.content.is_none()
            && self.subsections.is_empty()
            && !self.bullets.is_empty()
    }

    /// A headless section with no nested structure; its text can be folded
    /// into a parent section.
    pub fn is_headless_leaf(&self) -> bool {
        self.heading.is_none() && self.subsections.is_empty()
    }
}

/// Appends `section` unless it has nothing to show.
pub fn push_section(out: &mut Vec<Section>, section: Section) {
    if !section.is_empty() {
        out.push(section);
    }
}

/// One normalized analysis report, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedAnalysis {
    /// Slug of the source key.
    pub id: String,
    pub title: String,
    pub kind: ReportKind,
    /// Explicit `date` from the document, otherwise the normalization time.
    pub date: String,
    pub body: Vec<Section>,
}

impl ProcessedAnalysis {
    pub fn has_visible_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// Knobs for the generic structural walk.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Keyed strings longer than this many characters get their own heading.
    pub heading_threshold: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            heading_threshold: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_kind_serializes_snake_case() {
        let serialized = serde_json::to_string(&ReportKind::KeyTrends).unwrap();
        assert_eq!(serialized, "\"key_trends\"");
        assert_eq!(ReportKind::Final.to_string(), "final");
    }

    #[test]
    fn report_kind_parses_dash_and_underscore_forms() {
        assert_eq!("key-trends".parse(), Ok(ReportKind::KeyTrends));
        assert_eq!("KEY_TRENDS".parse(), Ok(ReportKind::KeyTrends));
        assert_eq!("netnographic".parse(), Ok(ReportKind::Netnographic));
        assert!("other".parse::<ReportKind>().is_err());
    }

    #[test]
    fn push_section_drops_empty_sections() {
        let mut out = vec![];
        push_section(&mut out, Section::default());
        push_section(&mut out, Section::heading("Kept"));

        assert_eq!(out, vec![Section::heading("Kept")]);
    }

    #[test]
    fn section_serialization_skips_absent_fields() {
        let json = serde_json::to_value(Section::bullets(vec!["a".into()])).unwrap();
        assert_eq!(json, serde_json::json!({ "bullets": ["a"] }));
    }

    #[test]
    fn bullet_only_requires_bullets_and_nothing_else() {
        assert!(Section::bullets(vec!["x".into()]).is_bullet_only());
        assert!(!Section::default().is_bullet_only());

        let mut mixed = Section::bullets(vec!["x".into()]);
        mixed.heading = Some("H".into());
        assert!(!mixed.is_bullet_only());
    }
}
