//! Interview variable names: `client`, `users[0].name.first`, `court['county']`.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

fn segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^(?:(\.?)([A-Za-z_][A-Za-z0-9_]*)|\[(\d+)\]|\['([^']*)'\]|\["([^"]*)"\])"#)
            .expect("segment pattern is a valid regex")
    })
}

/// Splits a variable name into its segments, or `None` if it is malformed.
/// The first segment is always a bare identifier.
pub(crate) fn parse(name: &str) -> Option<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut rest = name;
    while !rest.is_empty() {
        let caps = segment_pattern().captures(rest)?;
        let whole = caps.get(0)?;
        let segment = if let Some(ident) = caps.get(2) {
            let dotted = caps.get(1).is_some_and(|dot| !dot.as_str().is_empty());
            // identifiers need a leading dot everywhere except at the root
            if dotted == segments.is_empty() {
                return None;
            }
            Segment::Key(ident.as_str())
        } else if segments.is_empty() {
            return None;
        } else if let Some(index) = caps.get(3) {
            Segment::Index(index.as_str().parse().ok()?)
        } else {
            Segment::Key(caps.get(4).or_else(|| caps.get(5))?.as_str())
        };
        segments.push(segment);
        rest = &rest[whole.end()..];
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

pub(crate) fn is_valid(name: &str) -> bool {
    parse(name).is_some()
}
