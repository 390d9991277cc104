//! Prompt template scanning and rendering.
//!
//! Placeholders are `{{name}}` tokens where `name` is a declared input.
//! Rendering is a single pass: substituted values are inserted verbatim and
//! never re-expanded, so a resolved value that itself contains placeholder
//! syntax stays literal.

use std::collections::HashMap;

/// One piece of a scanned template.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    /// A well-formed `{{name}}` token; holds the inner name.
    Placeholder(&'a str),
}

fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Split a template into literal runs and placeholder tokens. Anything that
/// looks like `{{...}}` but whose inner text is not a plain identifier is
/// kept literal.
fn scan(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let (head, tail) = rest.split_at(start);
        if !head.is_empty() {
            segments.push(Segment::Literal(head));
        }
        match tail[2..].find("}}") {
            Some(end) => {
                let token = &tail[2..2 + end];
                if is_placeholder_name(token) {
                    segments.push(Segment::Placeholder(token));
                } else {
                    segments.push(Segment::Literal(&tail[..end + 4]));
                }
                rest = &tail[end + 4..];
            }
            None => {
                // Unclosed braces: literal to the end.
                segments.push(Segment::Literal(tail));
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}

/// Placeholder names referenced by a template, in order of first appearance,
/// de-duplicated. Load-time validation checks these against declared inputs.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for segment in scan(template) {
        if let Segment::Placeholder(name) = segment {
            if !seen.iter().any(|n| n == name) {
                seen.push(name.to_string());
            }
        }
    }
    seen
}

/// Render a template against resolved input values.
///
/// Pure and total: a placeholder with no binding is left as-is (load-time
/// validation makes that unreachable for well-formed skills), and the output
/// does not depend on the map's iteration order.
pub fn render(template: &str, inputs: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    for segment in scan(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => match inputs.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str("{{");
                    out.push_str(name);
                    out.push_str("}}");
                }
            },
        }
    }
    out
}
