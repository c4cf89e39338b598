// 🎯 Benchmark Taxonomy - Tiered automation benchmark (100% / 70% / 30% / 0%)
//
// Internal time is decided by phrase precedence, never by keyword score.
// Unmatched matters stay Unclassified at 0%.

use super::{CategoryDefinition, OverrideRule, Taxonomy, TaxonomyKind};
use crate::error::Result;

pub const DEFAULT_CATEGORY: &str = "Unclassified";
pub const OVERRIDE_CATEGORY: &str = "Internal-Strategic";

/// Phrases that force the zero-automation tier before scoring
pub const OVERRIDE_TRIGGERS: &[&str] = &["internal time", "vacation"];

pub fn taxonomy() -> Result<Taxonomy> {
    Taxonomy::new(
        TaxonomyKind::Benchmark,
        "Tiered automation benchmark",
        categories(),
        DEFAULT_CATEGORY,
        Some(OverrideRule::new(OVERRIDE_CATEGORY, OVERRIDE_TRIGGERS)),
    )
}

fn categories() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new(
            "Routine-Corporate-Documents",
            "100% AI Replaceable - Routine Corporate & Documents",
            1.00,
        )
        .with_description("Routine corporate counsel and document review")
        .with_keywords(&[
            "general corporate",
            "corporate matters",
            "general representation",
            "retainer",
            "general matters",
            "general",
            "advice and counsel",
            "corporate advice",
            "general corporate advice",
        ])
        .with_examples(&["General corporate matters", "Routine advice", "Document review"]),
        CategoryDefinition::new("Estate-Planning", "100% AI Replaceable - Estate Planning", 1.00)
            .with_description(
                "Estate planning documents and trust administration - highly templated",
            )
            .with_keywords(&[
                "estate planning",
                "estate",
                "trust",
                "will",
                "probate",
                "trust administration",
            ])
            .with_examples(&["Estate planning", "Trust documents", "Will preparation"]),
        CategoryDefinition::new(
            "Transactional-Work",
            "70% AI Replaceable - Transactional Work",
            0.70,
        )
        .with_description("M&A, financing, and complex transactional work")
        .with_keywords(&[
            "acquisition",
            "merger",
            "purchase",
            "sale",
            "transaction",
            "financing",
            "investment",
            "fund",
            "securities",
            "lease",
            "real estate",
            "property",
        ])
        .with_examples(&["Acquisitions", "Financings", "Real estate transactions"]),
        CategoryDefinition::new("IP-Regulatory", "70% AI Replaceable - IP & Regulatory", 0.70)
            .with_description("IP prosecution and regulatory compliance")
            .with_keywords(&[
                "patent",
                "trademark",
                "copyright",
                "intellectual property",
                "regulatory",
                "compliance",
                "permit",
                "license",
                "immigration",
                "visa",
            ])
            .with_examples(&["Patent filings", "Trademark prosecution", "Regulatory compliance"]),
        CategoryDefinition::new(
            "Litigation-Complex",
            "30% AI Replaceable - Litigation & Complex Matters",
            0.30,
        )
        .with_description("Litigation and complex disputes requiring significant judgment")
        .with_keywords(&[
            " v ",
            " v. ",
            " vs ",
            " vs. ",
            "litigation",
            "lawsuit",
            "dispute",
            "arbitration",
            "trial",
            "court",
            "motion",
            "discovery",
            "bankruptcy",
            "receiver",
            "settlement",
        ])
        .with_examples(&["Civil litigation", "Arbitrations", "Court proceedings"]),
        CategoryDefinition::new(
            "Employment-Family",
            "30% AI Replaceable - Employment & Family Law",
            0.30,
        )
        .with_description("Matters requiring nuanced human judgment and counseling")
        .with_keywords(&[
            "employment",
            "hr ",
            "labor",
            "termination",
            "divorce",
            "dissolution",
            "custody",
            "family law",
            "tax",
        ])
        .with_examples(&["Employment disputes", "Divorce matters", "Tax planning"]),
        CategoryDefinition::new(OVERRIDE_CATEGORY, "0% AI Replaceable - Internal & Strategic", 0.00)
            .with_description("Internal time and strategic work")
            .with_keywords(&[
                "internal time",
                "vacation",
                "pto",
                "holiday",
                "training",
                "business development",
                "marketing",
                "admin",
            ])
            .with_examples(&["Internal meetings", "Business development", "Training"]),
        CategoryDefinition::new(DEFAULT_CATEGORY, "Unclassified", 0.00)
            .with_description("No benchmark keyword matched"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wiring() {
        let taxonomy = taxonomy().unwrap();
        let rule = taxonomy.override_rule().unwrap();
        assert_eq!(rule.category_id, OVERRIDE_CATEGORY);
        assert!(rule.is_triggered_by("internal time - training"));
        assert!(rule.is_triggered_by("vacation"));
        assert!(!rule.is_triggered_by("training"));
    }

    #[test]
    fn test_tiers() {
        let taxonomy = taxonomy().unwrap();
        let potentials: Vec<f64> = taxonomy
            .categories()
            .iter()
            .map(|c| c.automation_potential)
            .collect();
        assert_eq!(potentials, vec![1.0, 1.0, 0.7, 0.7, 0.3, 0.3, 0.0, 0.0]);
    }
}
