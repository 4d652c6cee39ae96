//! Normalization for the `key_trends` report family.
//!
//! The report has a fixed sub-schema: eight optional arrays of
//! `{subheading?, content?}` items. Output section order is the order of
//! [`KEY_TRENDS_SECTIONS`], never the key order of the raw document.

use serde_json::{Map, Value};
use tracing::debug;

use crate::analysis::model::{Section, push_section};

/// `(field, display heading)` pairs in authoritative output order.
pub const KEY_TRENDS_SECTIONS: [(&str, &str); 8] = [
    ("overview", "1- Overview"),
    ("emerging_trends", "2- Emerging Trends"),
    ("market_conditions", "3- Market Conditions"),
    ("competitive_benchmarks", "4- Competitive Benchmarks"),
    ("user_workarounds", "5- User Workarounds"),
    ("go_to_market", "6- Go-to-Market"),
    ("validation_signals", "7- Validation Signals"),
    ("recommendations", "8- Recommendations"),
];

/// Accumulator threaded through the item fold of one named array.
///
/// The last entry of `subsections` doubles as the pending subsection: a
/// subheading-only item leaves it with no content, and the next
/// content-only item fills it.
#[derive(Debug, Default)]
struct KeyTrendsFold {
    main_content: String,
    subsections: Vec<Section>,
}

/// One item after field extraction. Empty or non-string fields are absent.
enum Item<'a> {
    Full { subheading: &'a str, content: &'a str },
    SubheadingOnly(&'a str),
    ContentOnly(&'a str),
    Blank,
}

impl<'a> Item<'a> {
    fn from_value(value: &'a Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };

        match (field("subheading"), field("content")) {
            (Some(subheading), Some(content)) => Item::Full { subheading, content },
            (Some(subheading), None) => Item::SubheadingOnly(subheading),
            (None, Some(content)) => Item::ContentOnly(content),
            (None, None) => Item::Blank,
        }
    }
}

impl KeyTrendsFold {
    fn step(&mut self, item: Item<'_>) {
        match item {
            Item::Full { subheading, content } => {
                self.subsections.push(Section {
                    heading: Some(subheading.to_string()),
                    content: Some(content.to_string()),
                    ..Default::default()
                });
            }
            Item::SubheadingOnly(subheading) => {
                if self.subsections.is_empty() && self.main_content.is_empty() {
                    // Leading subheading with nothing before it is dropped.
                    debug!(subheading, "dropping leading subheading-only item");
                    return;
                }
                self.subsections.push(Section::heading(subheading));
            }
            Item::ContentOnly(content) => match self.pending_mut() {
                Some(pending) => pending.content = Some(content.to_string()),
                None => {
                    if !self.main_content.is_empty() {
                        self.main_content.push_str("\n\n");
                    }
                    self.main_content.push_str(content);
                }
            },
            Item::Blank => {}
        }
    }

    /// Most recent subsection, if it is still waiting for content.
    fn pending_mut(&mut self) -> Option<&mut Section> {
        self.subsections.last_mut().filter(|s| s.content.is_none())
    }

    fn finish(self, heading: &str) -> Section {
        Section {
            heading: Some(heading.to_string()),
            content: (!self.main_content.is_empty()).then_some(self.main_content),
            bullets: vec![],
            subsections: self.subsections,
        }
    }
}

/// Builds the fixed-order section list of a `key_trends` report.
///
/// Arrays that are missing (or not arrays) produce no section. Non-object
/// items are ignored.
pub fn normalize_key_trends(raw: &Value) -> Vec<Section> {
    let Some(object) = raw.as_object() else {
        return vec![];
    };

    let mut sections = Vec::new();
    for (field, heading) in KEY_TRENDS_SECTIONS {
        if let Some(section) = fold_named_array(object, field, heading) {
            push_section(&mut sections, section);
        }
    }
    sections
}

fn fold_named_array(object: &Map<String, Value>, field: &str, heading: &str) -> Option<Section> {
    let items = object.get(field)?.as_array()?;

    let mut fold = KeyTrendsFold::default();
    for item in items {
        fold.step(Item::from_value(item));
    }
    Some(fold.finish(heading))
}
