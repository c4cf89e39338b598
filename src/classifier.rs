// 🏷️ Classifier - Keyword scoring of free-text labels against a taxonomy
//
// Order of decisions:
//   1. empty label            → default category
//   2. override phrase found  → override category (never out-scored)
//   3. highest keyword score  → that category, ties to the earliest declared
//   4. nothing scored         → default category

use crate::entry::AnalyzedEntry;
use crate::taxonomy::{CategoryDefinition, Taxonomy, TaxonomyKind};
use serde::{Deserialize, Serialize};
use std::thread;
use tracing::debug;

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// No usable text or no keyword hit
    Default,

    /// Routed by an override trigger phrase
    Override,

    /// Won on keyword score
    Keywords,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub taxonomy: TaxonomyKind,
    pub category_id: String,
    pub automation_potential: f64,
    pub matched_by: MatchKind,

    /// Number of distinct keywords matched (0 for default/override)
    pub score: usize,
}

impl ClassificationResult {
    fn from_category(
        taxonomy: &Taxonomy,
        category: &CategoryDefinition,
        matched_by: MatchKind,
        score: usize,
    ) -> Self {
        ClassificationResult {
            taxonomy: taxonomy.kind(),
            category_id: category.id.clone(),
            automation_potential: category.automation_potential,
            matched_by,
            score,
        }
    }

    fn fallback(taxonomy: &Taxonomy) -> Self {
        Self::from_category(taxonomy, taxonomy.default_category(), MatchKind::Default, 0)
    }
}

// ============================================================================
// CLASSIFY
// ============================================================================

/// Assign exactly one category of `taxonomy` to `text`
pub fn classify(text: Option<&str>, taxonomy: &Taxonomy) -> ClassificationResult {
    let folded = match text {
        Some(t) if !t.trim().is_empty() => t.to_lowercase(),
        _ => return ClassificationResult::fallback(taxonomy),
    };

    if let (Some(rule), Some(category)) = (taxonomy.override_rule(), taxonomy.override_category()) {
        if rule.is_triggered_by(&folded) {
            return ClassificationResult::from_category(taxonomy, category, MatchKind::Override, 0);
        }
    }

    let mut best: Option<(&CategoryDefinition, usize)> = None;
    for category in taxonomy.scoring_categories() {
        let score = category.match_score(&folded);
        // Strictly greater: an equal score never displaces an earlier category
        if score > 0 && best.map_or(true, |(_, top)| score > top) {
            best = Some((category, score));
        }
    }

    match best {
        Some((category, score)) => {
            ClassificationResult::from_category(taxonomy, category, MatchKind::Keywords, score)
        }
        None => ClassificationResult::fallback(taxonomy),
    }
}

impl Taxonomy {
    pub fn classify(&self, text: Option<&str>) -> ClassificationResult {
        classify(text, self)
    }
}

// ============================================================================
// BATCH CLASSIFICATION
// ============================================================================

fn classify_one(entry: &mut AnalyzedEntry, taxonomy: &Taxonomy) {
    let source = taxonomy.kind().label_source();
    let result = classify(entry.entry.label(source), taxonomy);
    entry.attach(result);
}

/// Attach a `taxonomy` classification to every entry
pub fn classify_entries(entries: &mut [AnalyzedEntry], taxonomy: &Taxonomy) {
    for entry in entries.iter_mut() {
        classify_one(entry, taxonomy);
    }
    debug!(taxonomy = taxonomy.name(), entries = entries.len(), "classified entries");
}

/// Same result as `classify_entries`, spread over `workers` scoped threads
pub fn classify_entries_parallel(
    entries: &mut [AnalyzedEntry],
    taxonomy: &Taxonomy,
    workers: usize,
) {
    let workers = workers.max(1);
    if workers == 1 || entries.len() < workers * 2 {
        classify_entries(entries, taxonomy);
        return;
    }

    let chunk_size = entries.len().div_ceil(workers);
    thread::scope(|scope| {
        for chunk in entries.chunks_mut(chunk_size) {
            scope.spawn(move || {
                for entry in chunk.iter_mut() {
                    classify_one(entry, taxonomy);
                }
            });
        }
    });
    debug!(
        taxonomy = taxonomy.name(),
        entries = entries.len(),
        workers,
        "classified entries in parallel"
    );
}

// ============================================================================
// TESTS
// ============================================================================
