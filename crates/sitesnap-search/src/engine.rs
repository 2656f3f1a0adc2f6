//! Fuzzy search engine.
//!
//! Scores every record field against the query and returns ranked matches. Scores live in
//! `0.0..=1.0` where 0 is a perfect match:
//! - an exact, case-insensitive substring hit scores by how far into the value it starts
//! - otherwise each word of the value (and the value as a whole) is compared with a prefix
//!   Levenshtein automaton, scoring `edits / query length` plus the same position penalty
//!
//! A value matches when its score is at most the threshold. The allowed edit count grows with
//! the query length (`threshold * len`), capped by `max_edits`.

use levenshtein_automata::{DFA, Distance, LevenshteinAutomatonBuilder};
use serde::Serialize;
use sitesnap_config::SearchSettings;
use tracing::debug;

use crate::index::{SearchIndex, SearchKey};

/// Characters of offset that cost a full point of score.
const LOCATION_DISTANCE: f64 = 100.0;

/// Largest edit distance the automaton builder supports.
const MAX_SUPPORTED_EDITS: u8 = 4;

/// Options controlling a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Fields to search, in the order matches are reported.
    pub keys: Vec<SearchKey>,
    /// Maximum score for a value to count as a match.
    pub threshold: f64,
    /// Whether each result lists the field values that matched.
    pub include_matches: bool,
    /// Whether results are ordered by score. Ties keep record order.
    pub should_sort: bool,
    /// Maximum edits tolerated per fuzzy comparison.
    pub max_edits: u8,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keys: SearchKey::ALL.to_vec(),
            threshold: 0.3,
            include_matches: true,
            should_sort: true,
            max_edits: 2,
            limit: None,
        }
    }
}

impl From<&SearchSettings> for SearchOptions {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            threshold: settings.threshold,
            max_edits: settings.max_edits,
            limit: settings.limit,
            ..Self::default()
        }
    }
}

/// One matched field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    /// Field the value came from. `None` for values that cannot be attributed to a field.
    pub key: Option<SearchKey>,
    /// The matched value, as stored.
    pub value: String,
    /// Inclusive character ranges of the match within the lowercased value.
    pub indices: Vec<(usize, usize)>,
    /// Score of this value.
    pub score: f64,
}

/// A ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    /// Position of the record in the index.
    pub index: usize,
    /// Mean of the best score of each matching field.
    pub score: f64,
    /// Matched values; empty unless `include_matches` is set.
    pub matches: Vec<FieldMatch>,
}

/// A normalised query.
struct Pattern {
    /// Lowercased, trimmed query.
    text: String,
    /// Length in characters.
    len: usize,
}

/// Fuzzy search over a [`SearchIndex`].
pub struct SearchEngine {
    /// Search options.
    options: SearchOptions,
    /// Automaton builders indexed by edit distance.
    builders: Vec<LevenshteinAutomatonBuilder>,
}

impl SearchEngine {
    /// Creates an engine. Building the automaton tables is the expensive part, so engines are
    /// meant to be created once and reused across queries.
    pub fn new(options: SearchOptions) -> Self {
        let max_edits = options.max_edits.min(MAX_SUPPORTED_EDITS);
        let builders = (0..=max_edits)
            .map(|distance| LevenshteinAutomatonBuilder::new(distance, true))
            .collect();
        Self { options, builders }
    }

    /// The options this engine was built with.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs `query` against `index`.
    ///
    /// Blank queries return nothing.
    pub fn search(&self, index: &SearchIndex, query: &str) -> Vec<SearchMatch> {
        let text = query.trim().to_lowercase();
        if text.is_empty() {
            return Vec::new();
        }
        let pattern = Pattern {
            len: text.chars().count(),
            text,
        };

        let edits = self.allowed_edits(pattern.len);
        let dfa = (edits > 0).then(|| self.builders[edits].build_prefix_dfa(&pattern.text));

        let mut results = Vec::new();
        for (position, record) in index.records().iter().enumerate() {
            let mut field_matches = Vec::new();
            let mut key_scores = Vec::new();

            for &key in &self.options.keys {
                let mut best: Option<f64> = None;
                for value in record.values(key) {
                    let Some((score, indices)) = self.score_value(&pattern, dfa.as_ref(), value)
                    else {
                        continue;
                    };
                    best = Some(best.map_or(score, |b| b.min(score)));
                    field_matches.push(FieldMatch {
                        key: Some(key),
                        value: value.clone(),
                        indices,
                        score,
                    });
                }
                if let Some(best) = best {
                    key_scores.push(best);
                }
            }

            if key_scores.is_empty() {
                continue;
            }
            let score = key_scores.iter().sum::<f64>() / key_scores.len() as f64;
            results.push(SearchMatch {
                index: position,
                score,
                matches: if self.options.include_matches {
                    field_matches
                } else {
                    Vec::new()
                },
            });
        }

        if self.options.should_sort {
            results.sort_by(|a, b| a.score.total_cmp(&b.score));
        }
        if let Some(limit) = self.options.limit {
            results.truncate(limit);
        }

        debug!(query, results = results.len(), "search");
        results
    }

    /// Edits tolerated for a query of `len` characters.
    fn allowed_edits(&self, len: usize) -> usize {
        let by_threshold = (self.options.threshold.max(0.0) * len as f64).floor() as usize;
        by_threshold.min(self.builders.len() - 1)
    }

    /// Scores one value, returning the score and the matched range when within threshold.
    fn score_value(
        &self,
        pattern: &Pattern,
        dfa: Option<&DFA>,
        value: &str,
    ) -> Option<(f64, Vec<(usize, usize)>)> {
        let lowered = value.to_lowercase();
        let threshold = self.options.threshold;

        if let Some(byte_pos) = lowered.find(&pattern.text) {
            let start = lowered[..byte_pos].chars().count();
            let score = start as f64 / LOCATION_DISTANCE;
            if score <= threshold {
                return Some((score, vec![(start, start + pattern.len - 1)]));
            }
        }

        let dfa = dfa?;
        let mut best: Option<(f64, Vec<(usize, usize)>)> = None;
        for (offset, candidate) in candidates(&lowered) {
            let Distance::Exact(edits) = dfa.eval(candidate) else {
                continue;
            };
            let score = f64::from(edits) / pattern.len as f64 + offset as f64 / LOCATION_DISTANCE;
            if score <= threshold && best.as_ref().is_none_or(|(s, _)| score < *s) {
                let width = candidate.chars().count().min(pattern.len).max(1);
                best = Some((score, vec![(offset, offset + width - 1)]));
            }
        }
        best
    }
}

/// The whole value followed by each alphanumeric word, with character offsets.
fn candidates(text: &str) -> Vec<(usize, &str)> {
    let mut out = vec![(0, text)];
    let mut start: Option<(usize, usize)> = None;

    for (char_idx, (byte_idx, c)) in text.char_indices().enumerate() {
        if c.is_alphanumeric() {
            if start.is_none() {
                start = Some((char_idx, byte_idx));
            }
        } else if let Some((word_char, word_byte)) = start.take() {
            out.push((word_char, &text[word_byte..byte_idx]));
        }
    }
    if let Some((word_char, word_byte)) = start {
        out.push((word_char, &text[word_byte..]));
    }

    out
}
