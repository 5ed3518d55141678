//! Text preparation: cleaning and the position index queries run against.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

static SYMBOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid symbol regex"));

/// Replace symbols and underscores with spaces and lowercase the result.
pub fn pre_clean(text: &str) -> String {
    SYMBOLS.replace_all(text, " ").replace('_', " ").to_lowercase()
}

/// A cleaned text split into tokens, with each distinct token mapped to the
/// ascending zero-based positions where it occurs.
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    text: String,
    tokens: Vec<String>,
    distinct: HashSet<String>,
    positions: HashMap<String, Vec<usize>>,
}

impl TextIndex {
    /// Index an already cleaned text.
    pub fn new(cleaned: impl Into<String>) -> Self {
        let text = cleaned.into();
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, token) in tokens.iter().enumerate() {
            positions.entry(token.clone()).or_default().push(pos);
        }
        let distinct = positions.keys().cloned().collect();
        Self {
            text,
            tokens,
            distinct,
            positions,
        }
    }

    /// Clean `raw` with [`pre_clean`] and index the result.
    pub fn from_raw(raw: &str) -> Self {
        Self::new(pre_clean(raw))
    }

    /// The cleaned text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn distinct(&self) -> &HashSet<String> {
        &self.distinct
    }

    /// Positions of `word`, empty if it does not occur.
    pub fn positions(&self, word: &str) -> &[usize] {
        self.positions.get(word).map(Vec::as_slice).unwrap_or_default()
    }

    /// Positions of every token starting with `prefix`, sorted ascending.
    pub fn prefix_positions(&self, prefix: &str) -> Vec<usize> {
        self.positions
            .iter()
            .filter(|(token, _)| token.starts_with(prefix))
            .flat_map(|(_, found)| found.iter().copied())
            .sorted_unstable()
            .collect()
    }
}
