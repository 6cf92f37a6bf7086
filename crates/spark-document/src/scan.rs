//! Line tokenizer and labeled-block extraction
//!
//! The legacy format is loosely templated markdown, so fields are located by
//! classifying lines rather than by regular expressions over the raw text.
//! [`extract_block`] is a pure `(text, label) -> Option<String>` function.

use once_cell::sync::Lazy;
use regex::Regex;

static HANDLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_.])@([A-Za-z0-9_-]+)").expect("valid handle regex")
});

/// Classification of a single source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only
    Blank,
    /// ATX heading (`#` to `######`)
    Heading {
        /// Heading level 1-6
        level: u8,
        /// Heading text without markers
        text: String,
    },
    /// Thematic break (`---`, `***`, `___`)
    Rule,
    /// List item
    Bullet {
        /// Leading whitespace width
        indent: usize,
    },
    /// Block quote line
    Quote,
    /// Code fence delimiter
    Fence,
    /// Anything else, including lines inside code fences
    Text,
}

/// A classified line with its byte offset in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// Byte offset of the line start
    pub offset: usize,
    /// Line text without the trailing newline
    pub raw: &'a str,
    /// Classification
    pub kind: LineKind,
}

impl Line<'_> {
    /// Heading level, if this line is a heading
    #[inline]
    #[must_use]
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            LineKind::Heading { level, .. } => Some(level),
            _ => None,
        }
    }
}

/// Classify every line of `text`
///
/// Lines between code fences are reported as [`LineKind::Text`] so that a
/// `#` comment in a code sample is never mistaken for a heading.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    let mut in_fence = false;

    for chunk in text.split_inclusive('\n') {
        let raw = chunk.trim_end_matches(['\n', '\r']);
        let kind = if is_fence(raw) {
            in_fence = !in_fence;
            LineKind::Fence
        } else if in_fence {
            LineKind::Text
        } else {
            classify(raw)
        };
        lines.push(Line { offset, raw, kind });
        offset += chunk.len();
    }

    lines
}

fn is_fence(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn classify(raw: &str) -> LineKind {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if let Some((level, text)) = parse_heading(raw) {
        return LineKind::Heading { level, text };
    }
    if is_rule(trimmed) {
        return LineKind::Rule;
    }
    if trimmed.starts_with('>') {
        return LineKind::Quote;
    }
    if bullet_body(trimmed).is_some() {
        let indent = raw.len() - raw.trim_start().len();
        return LineKind::Bullet { indent };
    }
    LineKind::Text
}

fn parse_heading(raw: &str) -> Option<(u8, String)> {
    let indent = raw.len() - raw.trim_start().len();
    if indent > 3 {
        return None;
    }
    let rest = raw.trim_start();
    let hashes = rest.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let after = &rest[hashes..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    let text = after.trim().trim_end_matches('#').trim_end();
    let level = u8::try_from(hashes).ok()?;
    Some((level, text.to_string()))
}

fn is_rule(trimmed: &str) -> bool {
    let mut marker = None;
    let mut count = 0;
    for c in trimmed.chars() {
        match c {
            ' ' | '\t' => {}
            '-' | '*' | '_' => {
                if marker.is_some_and(|m| m != c) {
                    return false;
                }
                marker = Some(c);
                count += 1;
            }
            _ => return false,
        }
    }
    count >= 3
}

/// Text after a list marker (`- `, `* `, `+ `, `1. `), if the line is a list item
fn bullet_body(trimmed: &str) -> Option<&str> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some(rest);
        }
    }
    if matches!(trimmed, "-" | "*" | "+") {
        return Some("");
    }
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = trimmed[digits..].strip_prefix(". ") {
            return Some(rest);
        }
    }
    None
}

/// Extract the content of the first block labeled `label`
///
/// Two block shapes are recognised, whichever appears first:
/// - a heading (level 3 or deeper) whose text starts with the label; content
///   runs to the next heading of any level, a rule line or a line opening
///   another bold label
/// - a bold inline label (`**Label:**`, `**Label**:` or `**Label**`),
///   optionally after a list marker; content is the rest of that line plus
///   following lines up to the next bold label, top-level bullet, heading or
///   rule line
///
/// Returns `None` when the label does not occur. The extracted text has
/// quote and list markers stripped and line breaks collapsed to spaces.
#[must_use]
pub fn extract_block(text: &str, label: &str) -> Option<String> {
    let lines = tokenize(text);

    for (index, line) in lines.iter().enumerate() {
        if let LineKind::Heading { level, text } = &line.kind {
            if *level >= 3 && label_prefix(text, label).is_some() {
                let body = lines[index + 1..]
                    .iter()
                    .take_while(|l| !ends_heading_block(l))
                    .map(|l| l.raw);
                return Some(normalize(body));
            }
            continue;
        }

        if let Some(first) = bold_label_rest(line.raw, label) {
            let rest = lines[index + 1..]
                .iter()
                .take_while(|l| !ends_bold_block(l))
                .map(|l| l.raw);
            return Some(normalize(std::iter::once(first).chain(rest)));
        }
    }

    None
}

fn ends_heading_block(line: &Line<'_>) -> bool {
    match line.kind {
        LineKind::Heading { .. } | LineKind::Rule => true,
        LineKind::Text | LineKind::Bullet { .. } => opens_bold_label(line.raw),
        _ => false,
    }
}

/// Line starts with `**`, optionally after a list marker
fn opens_bold_label(raw: &str) -> bool {
    let trimmed = raw.trim();
    bullet_body(trimmed)
        .unwrap_or(trimmed)
        .starts_with("**")
}

fn ends_bold_block(line: &Line<'_>) -> bool {
    match line.kind {
        LineKind::Heading { .. } | LineKind::Rule => true,
        LineKind::Bullet { indent } => indent == 0,
        _ => line.raw.trim_start().starts_with("**"),
    }
}

/// Remainder of the line after a bold `label`, if the line opens with one
fn bold_label_rest<'a>(raw: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = raw.trim();
    let body = bullet_body(trimmed).unwrap_or(trimmed);
    let inner = body.strip_prefix("**")?;
    let after = label_prefix(inner, label)?;

    for closer in [":**", "**:", "**"] {
        if let Some(rest) = after.strip_prefix(closer) {
            return Some(rest);
        }
    }
    None
}

/// Match `label` at the start of `candidate`, ignoring case, leading symbols
/// and curly quotes; returns the unmatched remainder
fn label_prefix<'a>(candidate: &'a str, label: &str) -> Option<&'a str> {
    let start = candidate
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric() || is_quote(*c))
        .map_or(candidate.len(), |(i, _)| i);
    let candidate = &candidate[start..];

    let mut chars = candidate.char_indices();
    for expected in label.chars() {
        let (_, actual) = chars.next()?;
        if fold(actual) != fold(expected) {
            return None;
        }
    }

    let end = chars.next().map_or(candidate.len(), |(i, _)| i);
    let rest = &candidate[end..];
    // Label must end on a word boundary
    if label.chars().last().is_some_and(char::is_alphanumeric)
        && rest.chars().next().is_some_and(char::is_alphanumeric)
    {
        return None;
    }
    Some(rest)
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\u{201c}' | '\u{201d}')
}

fn fold(c: char) -> char {
    if is_quote(c) {
        '"'
    } else {
        c.to_ascii_lowercase()
    }
}

/// Strip quote and list markers, drop empty lines and fences, join with spaces
fn normalize<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for line in lines {
        let mut line = line.trim();
        while let Some(rest) = line.strip_prefix('>') {
            line = rest.trim_start();
        }
        if let Some(rest) = bullet_body(line) {
            line = rest.trim_start();
        }
        if line.is_empty() || is_fence(line) {
            continue;
        }
        parts.push(line);
    }
    parts.join(" ")
}

/// First `@handle` in `text`, without the `@`
#[must_use]
pub fn first_handle(text: &str) -> Option<&str> {
    HANDLE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `text` mentions any `@handle`
#[inline]
#[must_use]
pub fn has_handle(text: &str) -> bool {
    HANDLE.is_match(text)
}
