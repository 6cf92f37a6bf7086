//! Spark document parser
//!
//! Turns raw document text into a [`SparkDocument`]. Parsing is total: any
//! input produces a document, with absent fields left empty.

use crate::frontmatter::FrontMatter;
use crate::model::{
    labels, DesignFields, DocumentFormat, LogicFields, Phase, PhaseContent, SparkDocument,
    SparkFields,
};
use crate::scan::{extract_block, first_handle, tokenize, Line, LineKind};
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, HeadingLevel, Parser as MdParser, Tag};
use regex::Regex;
use std::collections::BTreeMap;

/// Name used when neither front matter nor a heading supplies one
pub const UNTITLED: &str = "Untitled Spark";

/// Highest enhanced section number kept in the model
pub const MAX_SECTION: u8 = 8;

static BRAND_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:spark|template)(?:\s*:\s*|\s+)(.*)$").expect("valid brand regex")
});

static SECTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(?:\s|$)").expect("valid section regex"));

/// Parser for both Spark document formats
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkParser;

impl SparkParser {
    /// Create new parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse document text
    #[must_use]
    pub fn parse(&self, text: &str) -> SparkDocument {
        let (front_matter, body) = FrontMatter::split(text);
        let lines = tokenize(body);

        let name = resolve_name(front_matter.as_ref(), &lines);
        let id = front_matter
            .as_ref()
            .and_then(|fm| fm.get("id"))
            .map_or_else(|| slugify(&name), str::to_string);

        let format = if front_matter
            .as_ref()
            .is_some_and(|fm| fm.contains_key("spark_type"))
        {
            DocumentFormat::Enhanced
        } else {
            DocumentFormat::Legacy
        };

        let mut document = SparkDocument {
            id,
            name,
            format,
            phases: BTreeMap::new(),
            sections: BTreeMap::new(),
            contributors: BTreeMap::new(),
            source: text.to_string(),
        };

        match format {
            DocumentFormat::Enhanced => {
                document.sections = parse_sections(body);
                tracing::debug!(
                    id = %document.id,
                    sections = document.sections.len(),
                    "parsed enhanced document"
                );
            }
            DocumentFormat::Legacy => {
                for (phase, span) in phase_spans(body, &lines) {
                    if let Some(handle) = first_handle(span) {
                        document
                            .contributors
                            .insert(phase.role(), handle.to_string());
                    }
                    document.phases.insert(phase, extract_phase(phase, span));
                }
                tracing::debug!(
                    id = %document.id,
                    phases = document.phases.len(),
                    contributors = document.contributors.len(),
                    "parsed legacy document"
                );
            }
        }

        document
    }
}

fn resolve_name(front_matter: Option<&FrontMatter>, lines: &[Line<'_>]) -> String {
    if let Some(name) = front_matter.and_then(|fm| fm.get("name").or_else(|| fm.get("title"))) {
        return name.to_string();
    }

    lines
        .iter()
        .find_map(|line| match &line.kind {
            LineKind::Heading { level: 1, text } => Some(clean_heading_name(text)),
            _ => None,
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Strip leading symbols/emoji and an optional `Spark`/`Template` brand word
fn clean_heading_name(heading: &str) -> String {
    let start = heading
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map_or(heading.len(), |(i, _)| i);
    let stripped = &heading[start..];

    let name = BRAND_PREFIX
        .captures(stripped)
        .and_then(|caps| caps.get(1))
        .map_or(stripped, |m| m.as_str())
        .trim();

    if name.is_empty() {
        heading.trim().to_string()
    } else {
        name.to_string()
    }
}

/// Lower-case slug with spaces turned into hyphens
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Phase a level-2 heading introduces, if any
fn heading_phase(text: &str) -> Option<Phase> {
    let lower = text.to_lowercase();
    Phase::ALL.into_iter().find(|phase| {
        let numbered = format!("phase {}", phase.order());
        let by_number = lower.match_indices(&numbered).any(|(i, m)| {
            !lower[i + m.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        });
        by_number || lower.contains(&phase.tag().to_lowercase())
    })
}

/// Body text of each phase, from its header to the next level 1-2 heading
fn phase_spans<'a>(body: &'a str, lines: &[Line<'_>]) -> Vec<(Phase, &'a str)> {
    let mut spans: Vec<(Phase, &'a str)> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let LineKind::Heading { level: 2, text } = &line.kind else {
            continue;
        };
        let Some(phase) = heading_phase(text) else {
            continue;
        };
        if spans.iter().any(|(seen, _)| *seen == phase) {
            tracing::debug!(%phase, "duplicate phase header ignored");
            continue;
        }

        let start = lines
            .get(index + 1)
            .map_or(body.len(), |next| next.offset);
        let end = lines[index + 1..]
            .iter()
            .find(|l| l.heading_level().is_some_and(|level| level <= 2))
            .map_or(body.len(), |l| l.offset);
        spans.push((phase, &body[start..end]));
    }

    spans
}

fn field(span: &str, label: &str) -> String {
    extract_block(span, label).unwrap_or_default()
}

fn extract_phase(phase: Phase, span: &str) -> PhaseContent {
    match phase {
        Phase::Spark => PhaseContent::Spark(SparkFields {
            observation: field(span, labels::OBSERVATION),
            gap: field(span, labels::GAP),
            rationale: field(span, labels::WHY),
        }),
        Phase::Design => PhaseContent::Design(DesignFields {
            novel_core: field(span, labels::NOVEL_CORE),
            blueprint: field(span, labels::BLUEPRINT),
            interface: field(span, labels::INTERFACE),
            prior_art: field(span, labels::PRIOR_ART),
        }),
        Phase::Logic => PhaseContent::Logic(LogicFields {
            implementation: extract_block(span, labels::IMPLEMENTATION)
                .or_else(|| extract_block(span, labels::IMPLEMENTATION_ALT))
                .unwrap_or_default(),
            test: field(span, labels::CLUTCH_TEST),
            dependencies: field(span, labels::DEPENDENCIES),
        }),
    }
}

/// Split an enhanced body into numbered top-level sections
///
/// Every `# <n>.` heading is a boundary; sections 1-8 are kept, the first
/// occurrence of a number wins.
fn parse_sections(body: &str) -> BTreeMap<u8, String> {
    let mut headings: Vec<(Option<u8>, usize, usize)> = Vec::new();

    for (event, range) in MdParser::new(body).into_offset_iter() {
        let Event::Start(Tag::Heading {
            level: HeadingLevel::H1,
            ..
        }) = event
        else {
            continue;
        };
        let line_end = body[range.start..]
            .find('\n')
            .map_or(body.len(), |i| range.start + i + 1);
        let text = body[range.start..line_end].trim().trim_start_matches('#').trim();

        if let Some(caps) = SECTION_HEADING.captures(text) {
            let number = caps[1].parse::<u8>().ok();
            headings.push((number, range.start, line_end));
        }
    }

    let mut sections = BTreeMap::new();
    for (i, &(number, _, content_start)) in headings.iter().enumerate() {
        let Some(number) = number.filter(|n| (1..=MAX_SECTION).contains(n)) else {
            continue;
        };
        let content_end = headings.get(i + 1).map_or(body.len(), |(_, start, _)| *start);
        let content = trim_leading_blank_lines(&body[content_start..content_end]).trim_end();
        sections
            .entry(number)
            .or_insert_with(|| content.to_string());
    }

    sections
}

fn trim_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(newline) = rest.find('\n') {
        if rest[..newline].trim().is_empty() {
            rest = &rest[newline + 1..];
        } else {
            break;
        }
    }
    rest
}
