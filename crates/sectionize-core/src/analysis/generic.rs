//! Structural inference for reports without a fixed sub-schema.
//!
//! Documents that already carry a `sections` array are mapped field by
//! field. Anything else is walked recursively and its shape decides the
//! output:
//!
//!   - string  → bullets when most lines are list items, else content
//!   - array   → bullets when every element is bullet-shaped, else the
//!               flattened child sections
//!   - object  → keys in document order; long or structured values get a
//!               heading section followed by their own sections
//!
//! Every path is total. Values of unexpected types are treated as absent.

use serde_json::{Map, Value};

use crate::analysis::model::{NormalizeConfig, Section, push_section};
use crate::analysis::title::{format_key, numbered_key_heading};
use crate::util::text::{detect_list_style, split_list_items};

/// Metadata keys that never become sections. Compared case-insensitively.
pub const RESERVED_KEYS: [&str; 5] = ["title", "date", "subtitle", "type", "id"];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.iter().any(|r| r.eq_ignore_ascii_case(key))
}

/// Normalizes a non-`key_trends` report (or any nested value) into sections.
pub fn normalize_generic(raw: &Value, config: &NormalizeConfig) -> Vec<Section> {
    if let Some(items) = raw.get("sections").and_then(Value::as_array) {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            push_section(&mut out, normalize_section(item, config));
        }
        return out;
    }

    match raw {
        Value::Null => vec![],
        Value::Bool(_) | Value::Number(_) => vec![Section::content(raw.to_string())],
        Value::String(text) => infer_text(text),
        Value::Array(items) => infer_array(items, config),
        Value::Object(map) => walk_object(map, config),
    }
}

/// Maps one already-sectioned entry onto [`Section`].
///
/// Structured `content` is normalized generically: leading headless text
/// and bullets merge into this section, the rest becomes subsections ahead
/// of the entry's own `subsections`.
pub fn normalize_section(raw: &Value, config: &NormalizeConfig) -> Section {
    let map = match raw {
        Value::Object(map) => map,
        Value::String(text) if !text.trim().is_empty() => return Section::content(text.clone()),
        _ => return Section::default(),
    };

    let heading = ["heading", "title", "subheading"]
        .iter()
        .find_map(|k| non_empty_str(map.get(*k)))
        .map(str::to_string);

    let mut section = Section {
        heading,
        ..Default::default()
    };

    match map.get("content") {
        Some(Value::String(text)) if !text.is_empty() => section.content = Some(text.clone()),
        Some(Value::Array(lines)) if lines.iter().all(Value::is_string) => {
            let joined = lines
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n");
            let joined = joined.trim();
            if !joined.is_empty() {
                section.content = Some(joined.to_string());
            }
        }
        Some(other @ (Value::Array(_) | Value::Object(_))) => {
            absorb(&mut section, normalize_generic(other, config));
        }
        _ => {}
    }

    if let Some(Value::Array(items)) = map.get("bullets") {
        section.bullets.extend(
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|b| !b.is_empty())
                .map(str::to_string),
        );
    }

    if let Some(Value::Array(items)) = map.get("subsections") {
        for item in items {
            push_section(&mut section.subsections, normalize_section(item, config));
        }
    }

    section
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Folds `children` into `parent`: leading headless leaves contribute
/// content and bullets; from the first headed or nested child on,
/// everything is kept as subsections so headings stay with their text.
fn absorb(parent: &mut Section, children: Vec<Section>) {
    let mut nesting = false;
    for child in children {
        nesting |= !child.is_headless_leaf();
        if nesting {
            parent.subsections.push(child);
            continue;
        }
        if let Some(text) = child.content {
            match parent.content.as_mut() {
                Some(existing) => {
                    existing.push_str("\n\n");
                    existing.push_str(&text);
                }
                None => parent.content = Some(text),
            }
        }
        parent.bullets.extend(child.bullets);
    }
}

fn infer_text(text: &str) -> Vec<Section> {
    if text.trim().is_empty() {
        return vec![];
    }

    match detect_list_style(text) {
        Some(style) => {
            let items = split_list_items(text, style);
            if items.is_empty() {
                vec![]
            } else {
                vec![Section::bullets(items)]
            }
        }
        None => vec![Section::content(text)],
    }
}

fn infer_array(items: &[Value], config: &NormalizeConfig) -> Vec<Section> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Value::Null => {}
            Value::String(text) if text.trim().is_empty() => {}
            Value::String(text) => out.push(Section::bullets(vec![text.clone()])),
            Value::Bool(_) | Value::Number(_) => out.push(Section::bullets(vec![item.to_string()])),
            Value::Array(_) | Value::Object(_) => {
                for section in normalize_generic(item, config) {
                    push_section(&mut out, section);
                }
            }
        }
    }

    if !out.is_empty() && out.iter().all(Section::is_bullet_only) {
        let bullets = out.into_iter().flat_map(|s| s.bullets).collect();
        return vec![Section::bullets(bullets)];
    }
    out
}

fn walk_object(map: &Map<String, Value>, config: &NormalizeConfig) -> Vec<Section> {
    let mut out = Vec::new();

    for (key, value) in map {
        if is_reserved_key(key) {
            continue;
        }

        if let Some(heading) = numbered_key_heading(key) {
            let mut section = Section {
                heading: (!heading.is_empty()).then_some(heading),
                ..Default::default()
            };
            absorb(&mut section, normalize_generic(value, config));
            push_section(&mut out, section);
            continue;
        }

        match value {
            Value::Null => {}
            Value::String(text) if text.chars().count() <= config.heading_threshold => {
                if !text.trim().is_empty() {
                    out.push(Section::content(text.clone()));
                }
            }
            Value::Bool(_) | Value::Number(_) => out.push(Section::content(value.to_string())),
            Value::String(_) | Value::Array(_) | Value::Object(_) => {
                let heading = format_key(key);
                if !heading.is_empty() {
                    out.push(Section::heading(heading));
                }
                out.extend(normalize_generic(value, config));
            }
        }
    }

    out
}
