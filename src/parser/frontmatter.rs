//! Frontmatter extraction
//!
//! Understands the subset of YAML that Obsidian properties use:
//! - `key: value` with quoted strings, `true` / `false`, numbers or raw strings
//! - `key: [a, b, c]` inline arrays
//! - `key:` followed by `- item` lines
//!
//! Anything else inside the `---` block is skipped, never reported.

use crate::ast::{FrontMatter, FrontMatterValue};

const DELIMITER: &str = "---";

/// Split `raw_text` into frontmatter and body
///
/// Without an opening `---` line or without a closing `---` line,
/// returns an empty [`FrontMatter`] and the whole input as body.
///
/// # Example
/// ```
/// use obsidian_markdown::parser::frontmatter::extract;
///
/// let (frontmatter, body) = extract("---\ntopic: life\n---\n\nBody");
///
/// assert_eq!(frontmatter["topic"], "life");
/// assert_eq!(body, "Body");
/// ```
#[must_use]
pub fn extract(raw_text: &str) -> (FrontMatter, &str) {
    let have_start_properties = raw_text
        .lines()
        .next()
        .is_some_and(|line| line.trim_end() == DELIMITER);

    if !have_start_properties {
        return (FrontMatter::new(), raw_text);
    }

    let Some((properties, content)) = split_at_closer(raw_text) else {
        #[cfg(feature = "tracing")]
        tracing::trace!("Not found closing `---`, frontmatter ignored");

        return (FrontMatter::new(), raw_text);
    };

    (parse_properties(properties), content.trim_start())
}

/// Split after the opening line at the first line that is exactly `---`
fn split_at_closer(raw_text: &str) -> Option<(&str, &str)> {
    let start = raw_text.find('\n')? + 1;
    let mut offset = start;

    for line in raw_text[start..].split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&raw_text[start..offset], &raw_text[offset + line.len()..]));
        }

        offset += line.len();
    }

    None
}

/// Parse the region between the delimiters
#[must_use]
pub fn parse_properties(text: &str) -> FrontMatter {
    let mut frontmatter = FrontMatter::new();
    let mut list_key: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = list_item(trimmed) {
            if let Some(key) = &list_key {
                push_list_item(&mut frontmatter, key, unquote(item));
            }

            continue;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            list_key = None;
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            list_key = None;
            continue;
        }

        let value = value.trim();
        if value.is_empty() {
            frontmatter.insert(key, FrontMatterValue::String(String::new()));
            list_key = Some(key.to_string());
        } else {
            frontmatter.insert(key, parse_value(value));
            list_key = None;
        }
    }

    frontmatter
}

fn list_item(line: &str) -> Option<&str> {
    if line == "-" {
        return Some("");
    }

    line.strip_prefix("- ").map(str::trim)
}

fn push_list_item(frontmatter: &mut FrontMatter, key: &str, item: &str) {
    let Some(value) = frontmatter.get_mut(key) else {
        return;
    };

    match value {
        FrontMatterValue::List(items) => items.push(item.to_string()),
        _ => *value = FrontMatterValue::List(vec![item.to_string()]),
    }
}

/// Parse a single scalar or inline array
fn parse_value(value: &str) -> FrontMatterValue {
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| unquote(item.trim()))
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect();

        return FrontMatterValue::List(items);
    }

    if is_quoted(value) {
        return FrontMatterValue::String(unquote(value).to_string());
    }

    match value {
        "true" => return FrontMatterValue::Bool(true),
        "false" => return FrontMatterValue::Bool(false),
        _ => {}
    }

    if looks_numeric(value) {
        if let Ok(number) = value.parse::<i64>() {
            return FrontMatterValue::Integer(number);
        }

        if let Ok(number) = value.parse::<f64>() {
            return FrontMatterValue::Float(number);
        }
    }

    FrontMatterValue::String(value.to_string())
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
}

fn unquote(value: &str) -> &str {
    if is_quoted(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// `f64::from_str` also accepts `inf` and `NaN`
fn looks_numeric(value: &str) -> bool {
    value.bytes().any(|b| b.is_ascii_digit())
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
}
