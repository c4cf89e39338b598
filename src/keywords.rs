// 🔤 Keyword Frequency - Most common words across matter labels

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const DEFAULT_KEYWORD_LIMIT: usize = 30;

/// Lowercase ASCII words of four letters or more
const WORD_PATTERN: &str = r"\b[a-z]{4,}\b";

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "re",
    "from", "by", "as", "is", "was", "be", "been", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "this", "that", "these",
    "those", "llc", "inc", "corp", "ltd", "vs", "v",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

pub struct KeywordExtractor {
    pattern: Regex,
    stop_words: HashSet<&'static str>,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self> {
        Ok(KeywordExtractor {
            pattern: Regex::new(WORD_PATTERN)?,
            stop_words: STOP_WORDS.iter().copied().collect(),
        })
    }

    /// Top `limit` words by count; equal counts keep first-seen order
    pub fn extract<'a, I>(&self, labels: I, limit: usize) -> Vec<KeywordCount>
    where
        I: IntoIterator<Item = &'a str>,
    {
        // word -> (count, first seen)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut seen = 0usize;

        for label in labels {
            let folded = label.to_lowercase();
            for word in self.pattern.find_iter(&folded).map(|m| m.as_str()) {
                if self.stop_words.contains(word) {
                    continue;
                }
                let slot = counts.entry(word.to_string()).or_insert((0, seen));
                slot.0 += 1;
                seen += 1;
            }
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(word, (count, _))| KeywordCount { word, count })
            .collect()
    }
}

/// Convenience wrapper with the default limit
pub fn extract_keywords<'a, I>(labels: I) -> Result<Vec<KeywordCount>>
where
    I: IntoIterator<Item = &'a str>,
{
    Ok(KeywordExtractor::new()?.extract(labels, DEFAULT_KEYWORD_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_order() {
        let labels = [
            "Acme Acquisition Agreement",
            "Widget Acquisition",
            "Lease Agreement for Acme",
            "Estate of Doe",
        ];
        let keywords = extract_keywords(labels).unwrap();

        assert_eq!(keywords[0], KeywordCount { word: "acme".into(), count: 2 });
        assert_eq!(keywords[1].word, "acquisition");
        assert_eq!(keywords[2].word, "agreement");
        assert!(keywords.iter().all(|k| k.word.len() >= 4));
    }

    #[test]
    fn test_stop_words_and_short_words_removed() {
        let keywords = extract_keywords(["This Corp v. That LLC with Deal"]).unwrap();
        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(words, vec!["deal"]);
    }

    #[test]
    fn test_limit() {
        let extractor = KeywordExtractor::new().unwrap();
        let keywords = extractor.extract(["alpha bravo charlie delta"], 2);
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].word, "alpha");
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keywords(Vec::<&str>::new()).unwrap().is_empty());
    }
}
