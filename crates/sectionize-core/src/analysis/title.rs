use serde_json::Value;

/// Display title for a report.
///
/// An explicit non-empty `title` string in the report wins verbatim;
/// otherwise the key is humanized with [`format_key`].
pub fn derive_title(key: &str, raw: &Value) -> String {
    match raw.get("title").and_then(Value::as_str) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => format_key(key),
    }
}

/// Humanizes a camelCase / snake_case / kebab-case key.
///
/// `"emerging_trends"` → `"Emerging Trends"`,
/// `"netnographicSummary"` → `"Netnographic Summary"`.
pub fn format_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        match c {
            '_' | '-' => spaced.push(' '),
            c if c.is_uppercase() && i > 0 => {
                spaced.push(' ');
                spaced.push(c);
            }
            c => spaced.push(c),
        }
    }

    spaced
        .to_lowercase()
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stable report id: lowercased, whitespace runs replaced by `_`.
pub fn slug(key: &str) -> String {
    let lower = key.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_space = false;
    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Heading for a numbered object key such as `"2. **Market Gaps**"`.
///
/// Returns `None` when the key does not start with `<digits>.`.
pub fn numbered_key_heading(key: &str) -> Option<String> {
    let digits = key.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = key[digits..].strip_prefix('.')?;
    Some(rest.replace("**", "").trim().to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_snake_and_camel_case() {
        assert_eq!(format_key("emerging_trends"), "Emerging Trends");
        assert_eq!(format_key("netnographicSummary"), "Netnographic Summary");
        assert_eq!(format_key("go-to-market"), "Go To Market");
        assert_eq!(format_key("KeyTrends"), "Key Trends");
    }

    #[test]
    fn format_collapses_whitespace_and_trims() {
        assert_eq!(format_key("  final__report "), "Final Report");
        assert_eq!(format_key(""), "");
    }

    #[test]
    fn explicit_title_is_used_verbatim() {
        let raw = json!({ "title": "market PULSE q3" });
        assert_eq!(derive_title("key_trends", &raw), "market PULSE q3");
    }

    #[test]
    fn empty_or_non_string_title_falls_back_to_key() {
        assert_eq!(derive_title("emerging_trends", &json!({ "title": "" })), "Emerging Trends");
        assert_eq!(derive_title("final_report", &json!({ "title": 7 })), "Final Report");
        assert_eq!(derive_title("final_report", &json!({})), "Final Report");
    }

    #[test]
    fn slug_lowercases_and_joins_whitespace() {
        assert_eq!(slug("Final  Report"), "final_report");
        assert_eq!(slug("key_trends"), "key_trends");
        assert_eq!(slug("NetnographicSummary"), "netnographicsummary");
    }

    #[test]
    fn numbered_key_heading_strips_number_and_bold() {
        assert_eq!(
            numbered_key_heading("2. **Market Gaps**"),
            Some("Market Gaps".to_string())
        );
        assert_eq!(numbered_key_heading("10.Risks"), Some("Risks".to_string()));
        assert_eq!(numbered_key_heading("overview"), None);
        assert_eq!(numbered_key_heading("3 items"), None);
    }
}
