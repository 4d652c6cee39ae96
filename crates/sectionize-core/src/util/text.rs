//! Plain-text list detection.
//!
//! Upstream generators often return a list flattened into a single string,
//! one item per line. These helpers recognize the two list styles that
//! occur in practice and strip their markers.

/// List style of a multi-line string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Lines shaped like `1. item`.
    Numbered,
    /// Lines shaped like `- item`, `* item` or `• item`.
    Bulleted,
}

/// Returns the remainder of `line` after a `<digits>.<whitespace>` marker.
fn strip_numbered(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

/// Returns the remainder of `line` after a `•`, `-` or `*` marker and whitespace.
fn strip_bulleted(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix('•')
        .or_else(|| line.strip_prefix('-'))
        .or_else(|| line.strip_prefix('*'))?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

fn strip_marker(style: ListStyle, line: &str) -> Option<&str> {
    match style {
        ListStyle::Numbered => strip_numbered(line),
        ListStyle::Bulleted => strip_bulleted(line),
    }
}

/// Detects the majority list style across the non-blank lines of `text`.
///
/// A style is reported only when strictly more than half of the non-blank
/// lines carry its marker.
pub fn detect_list_style(text: &str) -> Option<ListStyle> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }

    let majority = |style: ListStyle| {
        let hits = lines
            .iter()
            .filter(|l| strip_marker(style, l).is_some())
            .count();
        hits * 2 > lines.len()
    };

    [ListStyle::Numbered, ListStyle::Bulleted]
        .into_iter()
        .find(|style| majority(*style))
}

/// Splits `text` into list items, removing `style` markers where present.
///
/// Blank lines and items that are empty after stripping are dropped; order
/// is preserved.
pub fn split_list_items(text: &str, style: ListStyle) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .map(|line| strip_marker(style, line).unwrap_or(line).trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_numbered_list() {
        let text = "1. First\n2. Second\n3. Third";
        assert_eq!(detect_list_style(text), Some(ListStyle::Numbered));
        assert_eq!(
            split_list_items(text, ListStyle::Numbered),
            vec!["First", "Second", "Third"]
        );
    }

    #[test]
    fn detects_each_bullet_marker() {
        let text = "• one\n- two\n\n* three";
        assert_eq!(detect_list_style(text), Some(ListStyle::Bulleted));
        assert_eq!(
            split_list_items(text, ListStyle::Bulleted),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn plain_paragraph_is_not_a_list() {
        assert_eq!(detect_list_style("Just a plain paragraph."), None);
        assert_eq!(detect_list_style("   \n  "), None);
    }

    #[test]
    fn minority_markers_do_not_make_a_list() {
        let text = "Intro line\nAnother line\n- only bullet";
        assert_eq!(detect_list_style(text), None);
    }

    #[test]
    fn exact_half_is_not_a_majority() {
        assert_eq!(detect_list_style("1. a\nplain"), None);
    }

    #[test]
    fn markers_require_trailing_whitespace() {
        assert_eq!(detect_list_style("1.5 percent\n2.0 growth"), None);
        assert_eq!(detect_list_style("-dash\n*star"), None);
    }

    #[test]
    fn unmarked_lines_are_kept_in_order() {
        let text = "1. First\ncontinued\n2. Second";
        assert_eq!(
            split_list_items(text, ListStyle::Numbered),
            vec!["First", "continued", "Second"]
        );
    }
}
