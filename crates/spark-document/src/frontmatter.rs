//! Front-matter reader
//!
//! A front-matter block is a `---` first line, key/value lines, and a closing
//! `---` line. Values are read with `serde_yaml`; when the block is not a
//! valid YAML mapping (template placeholders often are not) the reader falls
//! back to scanning `key: value` lines so that parsing stays total.

use std::collections::BTreeMap;

const DELIMITER: &str = "---";

/// Scalar key/value pairs from a front-matter block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: BTreeMap<String, String>,
}

impl FrontMatter {
    /// Split a document into its front matter (if any) and the remaining body
    ///
    /// Without a closing delimiter the whole text is treated as body.
    #[must_use]
    pub fn split(text: &str) -> (Option<Self>, &str) {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.split_inclusive('\n');

        match lines.next() {
            Some(first) if first.trim() == DELIMITER => {}
            _ => return (None, text),
        }

        let block_start = text.find('\n').map_or(text.len(), |i| i + 1);
        let mut offset = block_start;
        for line in lines {
            if line.trim() == DELIMITER {
                let block = &text[block_start..offset];
                let body = &text[offset + line.len()..];
                return (Some(Self::parse(block)), body);
            }
            offset += line.len();
        }

        (None, text)
    }

    /// Parse the inside of a front-matter block
    #[must_use]
    pub fn parse(block: &str) -> Self {
        match serde_yaml::from_str::<serde_yaml::Value>(block) {
            Ok(serde_yaml::Value::Mapping(mapping)) => Self::from_mapping(&mapping),
            Ok(_) | Err(_) => {
                tracing::debug!("front matter is not a YAML mapping, scanning lines");
                Self::scan_lines(block)
            }
        }
    }

    fn from_mapping(mapping: &serde_yaml::Mapping) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            let Some(key) = scalar_to_string(key) else {
                continue;
            };
            // Nested values keep the key present but carry no scalar text
            let value = scalar_to_string(value).unwrap_or_default();
            entries.insert(key, value);
        }
        Self { entries }
    }

    fn scan_lines(block: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in block.lines() {
            // Indented lines belong to a nested value
            if line.starts_with(char::is_whitespace) {
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                if !key.is_empty() && !key.starts_with('#') {
                    entries
                        .entry(key.to_string())
                        .or_insert_with(|| value.trim().to_string());
                }
            }
        }
        Self { entries }
    }

    /// Non-empty value for a key, with surrounding quotes removed
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = self.entries.get(key)?.trim();
        let value = strip_quotes(value).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Whether the key appears at all, even with an empty value
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block had no keys
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some(String::new()),
        _ => None,
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
