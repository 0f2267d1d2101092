//! High score leaderboard
//!
//! Top 10 `{name, score}` pairs, sorted descending. Names are three-letter
//! initials.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_LEN;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Stored in place of an empty name
pub const ANONYMOUS_NAME: &str = "---";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(name: &str, score: u64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
        }
    }
}

/// Uppercase, keep ASCII alphanumerics, cap at three characters
pub fn sanitize_name(name: &str) -> String {
    let clean: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(MAX_NAME_LEN)
        .collect();
    if clean.is_empty() {
        ANONYMOUS_NAME.to_string()
    } else {
        clean
    }
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from untrusted entries (e.g. a score file): names are
    /// re-sanitized, order is fixed, and the list is truncated.
    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut entries: Vec<HighScoreEntry> = entries
            .into_iter()
            .map(|e| HighScoreEntry::new(&e.name, e.score))
            .collect();
        // Stable: equal scores keep their file order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// 0-based position `score` would take; ties rank ahead of existing entries
    pub fn rank_for(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score >= e.score)
            .unwrap_or(self.entries.len())
    }

    /// Insert a score and keep the top entries. Equal scores stay in
    /// insertion order (the newcomer goes after them). Returns the 0-based
    /// rank achieved, or None if it fell off the list.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, HighScoreEntry::new(name, score));
        self.entries.truncate(MAX_HIGH_SCORES);
        (pos < MAX_HIGH_SCORES).then_some(pos)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("abc"), "ABC");
        assert_eq!(sanitize_name("a-b!c d"), "ABC");
        assert_eq!(sanitize_name("zz9top"), "ZZ9");
        assert_eq!(sanitize_name(""), "---");
        assert_eq!(sanitize_name("!!"), "---");
    }

    #[test]
    fn test_record_orders_descending() {
        let mut scores = HighScores::new();
        scores.record("aaa", 100);
        scores.record("bbb", 300);
        scores.record("ccc", 200);
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut scores = HighScores::new();
        scores.record("one", 500);
        scores.record("two", 500);
        scores.record("thr", 500);
        let names: Vec<&str> = scores.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ONE", "TWO", "THR"]);
    }

    #[test]
    fn test_truncates_to_ten() {
        let mut scores = HighScores::new();
        for i in 0..15 {
            scores.record("p", i * 10);
        }
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(50));
        assert_eq!(scores.record("low", 1), None);
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_rank_for() {
        let scores = HighScores::from_entries(vec![
            HighScoreEntry::new("a", 300),
            HighScoreEntry::new("b", 100),
        ]);
        assert_eq!(scores.rank_for(500), 0);
        assert_eq!(scores.rank_for(300), 0);
        assert_eq!(scores.rank_for(200), 1);
        assert_eq!(scores.rank_for(50), 2);
    }

    #[test]
    fn test_from_entries_repairs_input() {
        let scores = HighScores::from_entries(vec![
            HighScoreEntry {
                name: "lowercase-name".into(),
                score: 10,
            },
            HighScoreEntry {
                name: "".into(),
                score: 90,
            },
        ]);
        assert_eq!(scores.entries[0], HighScoreEntry::new("---", 90));
        assert_eq!(scores.entries[1].name, "LOW");
    }

    proptest! {
        #[test]
        fn prop_record_sorted_and_bounded(list in proptest::collection::vec(0u64..1000, 0..40)) {
            let mut scores = HighScores::new();
            for (i, s) in list.iter().enumerate() {
                scores.record(&format!("p{i}"), *s);
            }
            prop_assert!(scores.len() <= MAX_HIGH_SCORES);
            prop_assert!(scores.entries.windows(2).all(|w| w[0].score >= w[1].score));

            // Same result as a stable sort of everything recorded
            let mut expected: Vec<(u64, usize)> = list.iter().copied().zip(0..).collect();
            expected.sort_by(|a, b| b.0.cmp(&a.0));
            expected.truncate(MAX_HIGH_SCORES);
            let names: Vec<String> = expected
                .iter()
                .map(|(_, i)| sanitize_name(&format!("p{i}")))
                .collect();
            let got: Vec<String> = scores.entries.iter().map(|e| e.name.clone()).collect();
            prop_assert_eq!(got, names);
        }
    }
}
