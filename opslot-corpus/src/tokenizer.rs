//! Event summary tokenization
//!
//! Normalizes a raw maintenance event summary into lowercase alphanumeric
//! tokens. The ignore list is an explicit configuration value so callers can
//! tune it per deployment instead of patching a process-wide constant.

use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// Stop fragments stripped from summaries before tokenization. These are
/// partial words and filler observed in historical maintenance tickets.
pub const DEFAULT_IGNORE: &[&str] = &[
    "and", "for", "not", "are", "can", "till", "non", "over", "from", "the",
    "when", "that", "only", "all", "out", "ifications", "some", "quick",
    "day", "within", "put", "making", "ker", "cloudfl", "aka", "any", "into",
    "according", "tor", "mcp", "rer", "nel", "need", "tbd", "remo", "more",
    "eir", "rese", "sent", "inst", "rine", "encement", "may", "comes", "exp",
    "ify", "bee", "shd", "ance", "come", "ocations", "now", "unt", "breas",
    "says", "most", "inea", "well", "rvation", "with", "acco", "ing", "unmo",
    "str", "add", "ject1", "umo", "except", "myxy", "ths", "manuy", "moed",
    "cess", "til", "but",
];

/// Tokenizer configuration
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Minimum token length to keep
    pub min_len: usize,

    /// Fragments removed (case-insensitively) before splitting
    pub ignore: Vec<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_len: 2,
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Compiled tokenizer
pub struct Tokenizer {
    min_len: usize,
    ignore_re: Option<Regex>,
}

impl Tokenizer {
    /// Compile a tokenizer from its configuration
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let ignore_re = if config.ignore.is_empty() {
            None
        } else {
            let pattern = config
                .ignore
                .iter()
                .map(|frag| regex::escape(frag))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(Self {
            min_len: config.min_len,
            ignore_re,
        })
    }

    /// Extract normalized tokens from an event summary
    ///
    /// Ignore-list fragments are deleted first (as substrings, matching the
    /// historical cleaning behavior), then everything non-alphanumeric
    /// becomes a separator, then short tokens are dropped.
    pub fn tokenize(&self, summary: &str) -> Vec<String> {
        let cleaned = match &self.ignore_re {
            Some(re) => re.replace_all(summary, "").into_owned(),
            None => summary.to_string(),
        };

        let spaced: String = cleaned
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
            .collect();

        spaced
            .split_whitespace()
            .filter(|tok| tok.len() >= self.min_len)
            .map(|tok| tok.to_lowercase())
            .collect()
    }
}
