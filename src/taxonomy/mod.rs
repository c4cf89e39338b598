// 📚 Taxonomy Registry - Immutable category tables for each classification scheme
//
// Three taxonomies are registered:
// - practice-area: broad legal practice areas, scored from matter names
// - benchmark:     tiered automation benchmark, scored from matter names
// - task-level:    fine-grained task types, scored from task descriptions
//
// Tables are built once at startup and only ever read afterwards.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

pub mod benchmark;
pub mod practice_area;
pub mod task_level;

// ============================================================================
// TAXONOMY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxonomyKind {
    /// Broad practice areas (LegalBench-style)
    PracticeArea,

    /// Tiered automation benchmark (100% / 70% / 30% / 0%)
    Benchmark,

    /// Task-description level classification
    TaskLevel,
}

impl TaxonomyKind {
    pub const ALL: [TaxonomyKind; 3] = [
        TaxonomyKind::PracticeArea,
        TaxonomyKind::Benchmark,
        TaxonomyKind::TaskLevel,
    ];

    /// Canonical registry name
    pub fn name(&self) -> &'static str {
        match self {
            TaxonomyKind::PracticeArea => "practice-area",
            TaxonomyKind::Benchmark => "benchmark",
            TaxonomyKind::TaskLevel => "task-level",
        }
    }

    /// Alternative names accepted by the registry
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            TaxonomyKind::PracticeArea => &["legalbench", "practice"],
            TaxonomyKind::Benchmark => &["oli", "tiered"],
            TaxonomyKind::TaskLevel => &["task", "tasks"],
        }
    }

    /// Which free-text field of an entry this taxonomy reads
    pub fn label_source(&self) -> LabelSource {
        match self {
            TaxonomyKind::PracticeArea | TaxonomyKind::Benchmark => LabelSource::MatterName,
            TaxonomyKind::TaskLevel => LabelSource::TaskDescription,
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaxonomyKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        TaxonomyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted || kind.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| AnalysisError::UnknownTaxonomy(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelSource {
    MatterName,
    TaskDescription,
}

// ============================================================================
// CATEGORY DEFINITION
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDefinition {
    /// Unique within its taxonomy
    pub id: String,

    /// Human-readable name
    pub label: String,

    pub description: String,

    /// Estimated fraction of effort AI assistance could replace, in [0, 1]
    pub automation_potential: f64,

    /// Lower-cased substrings, in declaration order
    pub keywords: Vec<String>,

    pub examples: Vec<String>,

    /// Set by `Taxonomy::new` for the fallback category
    pub is_default: bool,

    /// Set by `Taxonomy::new` for the category reached only through the override rule
    pub is_override: bool,
}

impl CategoryDefinition {
    pub fn new(id: &str, label: &str, automation_potential: f64) -> Self {
        CategoryDefinition {
            id: id.to_string(),
            label: label.to_string(),
            description: String::new(),
            automation_potential,
            keywords: Vec::new(),
            examples: Vec::new(),
            is_default: false,
            is_override: false,
        }
    }

    /// Builder pattern: add description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Builder pattern: add keywords (case-folded here so matching never re-folds them)
    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_lowercase()).collect();
        self
    }

    /// Builder pattern: add examples
    pub fn with_examples(mut self, examples: &[&str]) -> Self {
        self.examples = examples.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Number of distinct keywords contained in already case-folded text
    pub fn match_score(&self, folded: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| folded.contains(keyword.as_str()))
            .count()
    }
}

// ============================================================================
// OVERRIDE RULE
// ============================================================================

/// Phrases that route a label straight to one category before any scoring
#[derive(Debug, Clone, Serialize)]
pub struct OverrideRule {
    pub triggers: Vec<String>,
    pub category_id: String,
}

impl OverrideRule {
    pub fn new(category_id: &str, triggers: &[&str]) -> Self {
        OverrideRule {
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            category_id: category_id.to_string(),
        }
    }

    pub fn is_triggered_by(&self, folded: &str) -> bool {
        self.triggers.iter().any(|trigger| folded.contains(trigger.as_str()))
    }
}

// ============================================================================
// TAXONOMY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Taxonomy {
    kind: TaxonomyKind,
    title: String,
    categories: Vec<CategoryDefinition>,
    default_index: usize,
    override_rule: Option<OverrideRule>,
    override_index: Option<usize>,
}

impl Taxonomy {
    /// Build a taxonomy, checking its invariants:
    /// unique ids, potentials in [0, 1], no empty keywords,
    /// default and override categories present.
    pub fn new(
        kind: TaxonomyKind,
        title: &str,
        mut categories: Vec<CategoryDefinition>,
        default_id: &str,
        override_rule: Option<OverrideRule>,
    ) -> Result<Self> {
        let invalid = |reason: String| AnalysisError::InvalidTaxonomy {
            taxonomy: kind.name().to_string(),
            reason,
        };

        if categories.is_empty() {
            return Err(invalid("no categories".to_string()));
        }

        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.as_str()) {
                return Err(invalid(format!("duplicate category id '{}'", category.id)));
            }
            let potential = category.automation_potential;
            if !potential.is_finite() || !(0.0..=1.0).contains(&potential) {
                return Err(invalid(format!(
                    "automation potential {} of '{}' is outside [0, 1]",
                    potential, category.id
                )));
            }
            if category.keywords.iter().any(|k| k.is_empty()) {
                return Err(invalid(format!("empty keyword in '{}'", category.id)));
            }
        }

        let default_index = categories
            .iter()
            .position(|c| c.id == default_id)
            .ok_or_else(|| invalid(format!("default category '{}' not declared", default_id)))?;
        categories[default_index].is_default = true;

        let override_index = match &override_rule {
            Some(rule) => {
                if rule.triggers.is_empty() || rule.triggers.iter().any(|t| t.is_empty()) {
                    return Err(invalid("override rule needs non-empty triggers".to_string()));
                }
                let index = categories
                    .iter()
                    .position(|c| c.id == rule.category_id)
                    .ok_or_else(|| {
                        invalid(format!("override category '{}' not declared", rule.category_id))
                    })?;
                categories[index].is_override = true;
                Some(index)
            }
            None => None,
        };

        Ok(Taxonomy {
            kind,
            title: title.to_string(),
            categories,
            default_index,
            override_rule,
            override_index,
        })
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// All categories in declaration order
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Categories taking part in keyword scoring, in declaration order
    pub fn scoring_categories(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.categories.iter().filter(|c| !c.is_override)
    }

    pub fn default_category(&self) -> &CategoryDefinition {
        &self.categories[self.default_index]
    }

    pub fn override_rule(&self) -> Option<&OverrideRule> {
        self.override_rule.as_ref()
    }

    pub fn override_category(&self) -> Option<&CategoryDefinition> {
        self.override_index.map(|index| &self.categories[index])
    }

    pub fn category(&self, id: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ============================================================================
// TAXONOMY REGISTRY
// ============================================================================

static REGISTRY: OnceLock<TaxonomyRegistry> = OnceLock::new();

/// Registry of all known taxonomies
///
/// Read-only once built; share it by reference (or through `global()`).
#[derive(Debug, Clone)]
pub struct TaxonomyRegistry {
    taxonomies: Vec<Taxonomy>,
}

impl TaxonomyRegistry {
    /// Build a registry from explicit taxonomies (one per kind)
    pub fn from_taxonomies(taxonomies: Vec<Taxonomy>) -> Result<Self> {
        let mut kinds = HashSet::new();
        for taxonomy in &taxonomies {
            if !kinds.insert(taxonomy.kind()) {
                return Err(AnalysisError::InvalidTaxonomy {
                    taxonomy: taxonomy.name().to_string(),
                    reason: "registered twice".to_string(),
                });
            }
        }
        Ok(TaxonomyRegistry { taxonomies })
    }

    /// Registry with the three built-in taxonomies
    pub fn with_defaults() -> Result<Self> {
        Self::from_taxonomies(vec![
            practice_area::taxonomy()?,
            benchmark::taxonomy()?,
            task_level::taxonomy()?,
        ])
    }

    /// Process-wide built-in registry, constructed on first use
    pub fn global() -> Result<&'static TaxonomyRegistry> {
        if let Some(registry) = REGISTRY.get() {
            return Ok(registry);
        }
        let registry = Self::with_defaults()?;
        Ok(REGISTRY.get_or_init(|| registry))
    }

    /// Look up a taxonomy by name or alias
    pub fn get_taxonomy(&self, name: &str) -> Result<&Taxonomy> {
        let kind: TaxonomyKind = name.parse()?;
        self.get(kind)
    }

    pub fn get(&self, kind: TaxonomyKind) -> Result<&Taxonomy> {
        self.taxonomies
            .iter()
            .find(|t| t.kind() == kind)
            .ok_or_else(|| AnalysisError::UnknownTaxonomy(kind.name().to_string()))
    }

    pub fn taxonomies(&self) -> &[Taxonomy] {
        &self.taxonomies
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.taxonomies.iter().map(|t| t.name()).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TaxonomyRegistry {
        TaxonomyRegistry::with_defaults().unwrap()
    }

    #[test]
    fn test_all_potentials_in_unit_interval() {
        for taxonomy in registry().taxonomies() {
            for category in taxonomy.categories() {
                assert!(
                    (0.0..=1.0).contains(&category.automation_potential),
                    "{} / {}",
                    taxonomy.name(),
                    category.id
                );
            }
        }
    }

    #[test]
    fn test_ids_unique_within_taxonomy() {
        for taxonomy in registry().taxonomies() {
            let ids: HashSet<_> = taxonomy.categories().iter().map(|c| &c.id).collect();
            assert_eq!(ids.len(), taxonomy.len());
        }
    }

    #[test]
    fn test_default_categories() {
        let registry = registry();

        let practice = registry.get(TaxonomyKind::PracticeArea).unwrap();
        assert_eq!(practice.default_category().id, "General-Matters");
        assert_eq!(practice.default_category().automation_potential, 0.65);

        let benchmark = registry.get(TaxonomyKind::Benchmark).unwrap();
        assert_eq!(benchmark.default_category().id, "Unclassified");
        assert_eq!(benchmark.default_category().automation_potential, 0.0);

        let task = registry.get(TaxonomyKind::TaskLevel).unwrap();
        assert_eq!(task.default_category().id, "General-Communication");
        assert_eq!(task.default_category().automation_potential, 0.50);
    }

    #[test]
    fn test_only_benchmark_has_override() {
        let registry = registry();
        assert!(registry.get(TaxonomyKind::PracticeArea).unwrap().override_rule().is_none());
        assert!(registry.get(TaxonomyKind::TaskLevel).unwrap().override_rule().is_none());

        let benchmark = registry.get(TaxonomyKind::Benchmark).unwrap();
        let category = benchmark.override_category().unwrap();
        assert!(category.is_override);
        assert_eq!(category.automation_potential, 0.0);
        assert!(benchmark.scoring_categories().all(|c| !c.is_override));
    }

    #[test]
    fn test_get_taxonomy_by_name_and_alias() {
        let registry = registry();
        assert_eq!(
            registry.get_taxonomy("practice-area").unwrap().kind(),
            TaxonomyKind::PracticeArea
        );
        assert_eq!(registry.get_taxonomy("LegalBench").unwrap().kind(), TaxonomyKind::PracticeArea);
        assert_eq!(registry.get_taxonomy(" oli ").unwrap().kind(), TaxonomyKind::Benchmark);
        assert_eq!(registry.get_taxonomy("task").unwrap().kind(), TaxonomyKind::TaskLevel);
    }

    #[test]
    fn test_unknown_taxonomy() {
        let err = registry().get_taxonomy("astrology").unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownTaxonomy(name) if name == "astrology"));
    }

    #[test]
    fn test_registry_missing_kind_is_unknown() {
        let only_practice =
            TaxonomyRegistry::from_taxonomies(vec![practice_area::taxonomy().unwrap()]).unwrap();
        assert!(matches!(
            only_practice.get_taxonomy("benchmark"),
            Err(AnalysisError::UnknownTaxonomy(_))
        ));
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let result = TaxonomyRegistry::from_taxonomies(vec![
            practice_area::taxonomy().unwrap(),
            practice_area::taxonomy().unwrap(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_registry_is_shared() {
        let first = TaxonomyRegistry::global().unwrap();
        let second = TaxonomyRegistry::global().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.names(), vec!["practice-area", "benchmark", "task-level"]);
    }

    #[test]
    fn test_invalid_taxonomies_rejected() {
        let duplicate = Taxonomy::new(
            TaxonomyKind::TaskLevel,
            "dup",
            vec![
                CategoryDefinition::new("A", "A", 0.5),
                CategoryDefinition::new("A", "A again", 0.4),
            ],
            "A",
            None,
        );
        assert!(duplicate.is_err());

        let out_of_range = Taxonomy::new(
            TaxonomyKind::TaskLevel,
            "range",
            vec![CategoryDefinition::new("A", "A", 1.2)],
            "A",
            None,
        );
        assert!(out_of_range.is_err());

        let missing_default = Taxonomy::new(
            TaxonomyKind::TaskLevel,
            "default",
            vec![CategoryDefinition::new("A", "A", 0.2)],
            "B",
            None,
        );
        assert!(missing_default.is_err());

        let missing_override = Taxonomy::new(
            TaxonomyKind::TaskLevel,
            "override",
            vec![CategoryDefinition::new("A", "A", 0.2)],
            "A",
            Some(OverrideRule::new("Z", &["vacation"])),
        );
        assert!(missing_override.is_err());
    }

    #[test]
    fn test_keywords_are_case_folded() {
        let category = CategoryDefinition::new("IP", "IP", 0.8).with_keywords(&["USPTO", " IP "]);
        assert_eq!(category.keywords, vec!["uspto".to_string(), " ip ".to_string()]);
        assert_eq!(category.match_score("uspto office action"), 1);
        assert_eq!(category.match_score("uspto office action for ip portfolio"), 2);
        // Padded keywords only match whole words
        assert_eq!(category.match_score("zip code lookup"), 0);
    }

    #[test]
    fn test_match_score_counts_each_keyword_once() {
        let category = CategoryDefinition::new("T", "T", 0.3).with_keywords(&["trust", "estate"]);
        assert_eq!(category.match_score("trust trust trust"), 1);
        assert_eq!(category.match_score("estate and trust"), 2);
        assert_eq!(category.match_score("nothing here"), 0);
    }
}
