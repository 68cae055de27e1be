use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::{OrderedMap, ReportRecord};

/// Tokens of this many characters or fewer are ignored
const MIN_WORD_CHARS: usize = 3;

/// Short high-frequency function words of the reports' language
pub const DEFAULT_STOPWORDS: [&str; 11] = ["في", "من", "إلى", "هذا", "التي", "الذي", "على", "أو", "و", "أن", "ب"];

/// Word → frequency, in first-encounter order
pub type KeywordCounts = OrderedMap<usize>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// Counts words in member descriptions for the keyword cloud
pub struct KeywordExtractor {
    punctuation: Regex,
    stopwords: HashSet<String>,
}

impl KeywordExtractor {
    pub fn new<I, S>(stopwords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let punctuation = Self::compile_punctuation()?;
        let stopwords = stopwords.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        Ok(Self { punctuation, stopwords })
    }

    pub fn with_default_stopwords() -> Result<Self> {
        Self::new(DEFAULT_STOPWORDS)
    }

    fn compile_punctuation() -> Result<Regex> {
        Regex::new(r"[.,!?]").context("Failed to compile punctuation regex")
    }

    pub fn extract(&self, records: &[ReportRecord]) -> KeywordCounts {
        let mut counts = KeywordCounts::new();

        let descriptions = records
            .iter()
            .flat_map(|record| record.members.values())
            .filter_map(|entry| entry.description());

        for description in descriptions {
            for token in description.split_whitespace() {
                if let Some(word) = self.clean_token(token) {
                    *counts.entry_or_default(&word) += 1;
                }
            }
        }

        counts
    }

    fn clean_token(&self, token: &str) -> Option<String> {
        let word = self.punctuation.replace_all(token, "").to_lowercase();
        if word.chars().count() <= MIN_WORD_CHARS || self.stopwords.contains(&word) {
            None
        } else {
            Some(word)
        }
    }
}

/// Most frequent words first; equal counts keep encounter order
pub fn top_keywords(counts: &KeywordCounts, limit: usize) -> Vec<KeywordCount> {
    let mut sorted: Vec<KeywordCount> = counts
        .iter()
        .map(|(word, &count)| KeywordCount {
            word: word.to_string(),
            count,
        })
        .collect();

    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<ReportRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_stopwords_are_removed() {
        let records = records(json!([
            {"date": "2025-01-01", "members": {"A": {"rating": 5, "description": "ممتاز جداً في العمل"}}}
        ]));
        let extractor = KeywordExtractor::new(["في"]).unwrap();
        let counts = extractor.extract(&records);

        assert!(!counts.contains_key("في"));
        assert_eq!(counts.get("ممتاز"), Some(&1));
        assert_eq!(counts.get("جداً"), Some(&1));
        assert_eq!(counts.get("العمل"), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_punctuation_case_and_length() {
        let records = records(json!([
            {"date": "2025-01-01", "members": {
                "A": {"rating": 4, "description": "Great work, GREAT focus! ok?"},
                "B": {"rating": 0, "description": ["great", "team. work"]},
                "C": 3
            }}
        ]));
        let extractor = KeywordExtractor::new(Vec::<String>::new()).unwrap();
        let counts = extractor.extract(&records);

        assert_eq!(counts.get("great"), Some(&3));
        assert_eq!(counts.get("work"), Some(&2));
        assert_eq!(counts.get("focus"), Some(&1));
        assert_eq!(counts.get("team"), Some(&1));
        assert!(!counts.contains_key("ok"));
    }

    #[test]
    fn test_top_keywords_sorts_and_keeps_encounter_order_on_ties() {
        let records = records(json!([
            {"date": "2025-01-01", "members": {
                "A": {"rating": 4, "description": "alpha bravo charlie bravo"},
                "B": {"rating": 4, "description": "delta charlie"}
            }}
        ]));
        let extractor = KeywordExtractor::with_default_stopwords().unwrap();
        let top = top_keywords(&extractor.extract(&records), 3);

        let words: Vec<(&str, usize)> = top.iter().map(|k| (k.word.as_str(), k.count)).collect();
        assert_eq!(words, vec![("bravo", 2), ("charlie", 2), ("alpha", 1)]);
    }

    #[test]
    fn test_no_descriptions_yields_empty_counts() {
        let extractor = KeywordExtractor::with_default_stopwords().unwrap();
        assert!(extractor.extract(&[]).is_empty());
        assert!(top_keywords(&KeywordCounts::new(), 10).is_empty());
    }
}
