//! Novelty scoring
//!
//! Rule-based 0-100 estimate of how much a design differs from existing
//! work. Adjustments apply to a base of 50 in a fixed order and the sum is
//! clamped at the end.

use serde::{Deserialize, Serialize};

/// Starting score before adjustments
pub const BASE_SCORE: f64 = 50.0;

const KEYWORDS: [&str; 7] = ["novel", "unique", "new", "differentiat", "delta", "gap", "solve"];
const KEYWORD_THRESHOLD: usize = 3;
const RISK_TERMS: [&str; 4] = ["risk", "challenge", "limitation", "trade-off"];
const INTERFACE_TERMS: [&str; 3] = ["the interface", "snap", "integrat"];

/// Individual adjustments behind a novelty score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoveltyBreakdown {
    /// Word count of the scored text
    pub word_count: usize,
    /// Length adjustment (+25, +15, +5 or -20)
    pub length: f64,
    /// Distinct novelty keywords found
    pub keyword_hits: usize,
    /// Keyword adjustment (0 or +15)
    pub keywords: f64,
    /// Prior-art mention anywhere in the document (0 or +10)
    pub prior_art: f64,
    /// Risk awareness anywhere in the document (0 or +10)
    pub risk: f64,
    /// Integration clarity anywhere in the document (0 or +10)
    pub interface: f64,
}

impl NoveltyBreakdown {
    /// Clamped total
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        let raw =
            BASE_SCORE + self.length + self.keywords + self.prior_art + self.risk + self.interface;
        raw.clamp(0.0, 100.0)
    }
}

/// Novelty scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct NoveltyScorer;

impl NoveltyScorer {
    /// Create new scorer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Score the design text of a document
    ///
    /// `text` is the novel-core (or blueprint) description; `document` is the
    /// full source used for the document-level bonuses.
    #[must_use]
    pub fn score(&self, text: &str, document: &str) -> f64 {
        self.breakdown(text, document).total()
    }

    /// Score with every adjustment exposed
    #[must_use]
    pub fn breakdown(&self, text: &str, document: &str) -> NoveltyBreakdown {
        let word_count = text.split_whitespace().count();
        let length = match word_count {
            n if n > 100 => 25.0,
            n if n > 50 => 15.0,
            n if n > 15 => 5.0,
            _ => -20.0,
        };

        let lower_text = text.to_lowercase();
        let keyword_hits = KEYWORDS
            .iter()
            .filter(|kw| lower_text.contains(*kw))
            .count();
        let keywords = if keyword_hits >= KEYWORD_THRESHOLD {
            15.0
        } else {
            0.0
        };

        let lower_doc = document.to_lowercase();
        let bonus = |hit: bool| if hit { 10.0 } else { 0.0 };

        NoveltyBreakdown {
            word_count,
            length,
            keyword_hits,
            keywords,
            prior_art: bonus(lower_doc.contains("prior art")),
            risk: bonus(RISK_TERMS.iter().any(|t| lower_doc.contains(t))),
            interface: bonus(INTERFACE_TERMS.iter().any(|t| lower_doc.contains(t))),
        }
    }
}
