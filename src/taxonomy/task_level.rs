// 🔬 Task-Level Taxonomy - Fine-grained task types scored from time-entry descriptions

use super::{CategoryDefinition, Taxonomy, TaxonomyKind};
use crate::error::Result;

pub const DEFAULT_CATEGORY: &str = "General-Communication";

pub fn taxonomy() -> Result<Taxonomy> {
    Taxonomy::new(
        TaxonomyKind::TaskLevel,
        "Task-level automation",
        categories(),
        DEFAULT_CATEGORY,
        None,
    )
}

fn task(
    id: &str,
    label: &str,
    potential: f64,
    description: &str,
    keywords: &[&str],
) -> CategoryDefinition {
    CategoryDefinition::new(id, label, potential)
        .with_description(description)
        .with_keywords(keywords)
}

fn categories() -> Vec<CategoryDefinition> {
    vec![
        task(
            "Document-Review-Standard",
            "Standard Document Review",
            0.95,
            "Review of standard documents",
            &[
                "review agreement",
                "review contract",
                "review and revise",
                "review draft",
                "review standard",
                "review form",
                "review template",
                "review nda",
                "review msa",
                "review amendment",
                "review lease",
            ],
        ),
        task(
            "Email-Status-Updates",
            "Status Update Emails",
            0.92,
            "Status update emails",
            &[
                "email regarding status",
                "email correspondence regarding",
                "status update",
                "follow up email",
                "exchange emails",
                "email to client regarding status",
            ],
        ),
        task(
            "Document-Drafting-Standard",
            "Standard Drafting",
            0.93,
            "Drafting standard forms",
            &[
                "draft amendment",
                "draft addendum",
                "draft standard",
                "draft form",
                "draft certificate",
                "draft notice",
                "draft letter agreement",
                "prepare draft amendment",
            ],
        ),
        task(
            "Research-Straightforward",
            "Straightforward Research",
            0.88,
            "Straightforward legal research",
            &[
                "research case law",
                "research statute",
                "research regulation",
                "research precedent",
                "legal research regarding",
            ],
        ),
        task(
            "Form-Completion",
            "Form Completion",
            0.96,
            "Completing forms",
            &[
                "complete form",
                "fill out",
                "prepare filing",
                "file notice",
                "file certificate",
                "submit form",
            ],
        ),
        task(
            "Document-Analysis",
            "Document Analysis",
            0.85,
            "Analyzing documents",
            &[
                "review and analyze",
                "analyze agreement",
                "analyze contract",
                "analyze terms",
                "analyze provision",
                "review for compliance",
                "analyze draft",
            ],
        ),
        task(
            "Due-Diligence-Review",
            "Due Diligence Review",
            0.82,
            "Due diligence review",
            &[
                "due diligence",
                "dd review",
                "review due diligence",
                "diligence materials",
                "data room review",
            ],
        ),
        task(
            "Discovery-Review",
            "Discovery Review",
            0.87,
            "Document discovery review",
            &[
                "review discovery",
                "review production",
                "review interrogator",
                "review request for production",
                "discovery response",
                "respond to discovery",
            ],
        ),
        task(
            "Clause-Extraction",
            "Clause Extraction",
            0.90,
            "Extracting specific clauses",
            &[
                "extract provision",
                "identify clause",
                "locate language",
                "find provision",
                "pull clause",
                "summarize terms",
            ],
        ),
        task(
            "Drafting-Complex",
            "Complex Drafting",
            0.65,
            "Drafting complex agreements",
            &[
                "draft purchase agreement",
                "draft psa",
                "draft merger agreement",
                "draft complex",
                "draft financing",
                "draft loan",
                "draft settlement",
            ],
        ),
        task(
            "Negotiation-Support",
            "Negotiation Support",
            0.60,
            "Supporting negotiations",
            &[
                "revise per comments",
                "address comments",
                "incorporate revisions",
                "revise based on",
                "respond to comments",
                "counter proposal",
            ],
        ),
        task(
            "Legal-Memos",
            "Legal Memoranda",
            0.55,
            "Legal memoranda",
            &[
                "draft memo",
                "memorandum",
                "legal opinion",
                "prepare memo",
                "draft analysis",
                "memo regarding",
            ],
        ),
        task(
            "Client-Calls",
            "Client Calls",
            0.45,
            "Client communications",
            &[
                "call with client",
                "telephone conference with",
                "conference call",
                "client meeting",
                "discuss with client",
                "call regarding",
                "phone call",
            ],
        ),
        task(
            "Court-Appearances",
            "Court Appearances",
            0.30,
            "Court appearances",
            &[
                "court appearance",
                "appear in court",
                "attend hearing",
                "oral argument",
                "trial",
                "deposition",
                "attend conference",
            ],
        ),
        task(
            "Strategic-Advice",
            "Strategic Advice",
            0.35,
            "Strategic legal counseling",
            &[
                "advise regarding",
                "counsel regarding",
                "discuss strategy",
                "strategic advice",
                "recommendation regarding",
                "consult on",
            ],
        ),
        task(
            "Negotiations",
            "Negotiations",
            0.25,
            "Negotiation sessions",
            &[
                "negotiate",
                "negotiation",
                "negotiating",
                "negotiate terms",
                "negotiate with",
                "settlement discussion",
            ],
        ),
        task(
            "Internal-Admin",
            "Internal Administration",
            0.10,
            "Internal administrative tasks",
            &[
                "internal",
                "administrative",
                "firm meeting",
                "training",
                "business development",
                "marketing",
                "time entry",
                "billing",
            ],
        ),
        task(
            DEFAULT_CATEGORY,
            "General Communication",
            0.50,
            "General correspondence",
            &[
                "email",
                "correspondence",
                "communicate",
                "discuss",
                "exchange",
                "speak with",
                "follow up",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_last_declared() {
        let taxonomy = taxonomy().unwrap();
        assert_eq!(taxonomy.len(), 18);
        let last = taxonomy.categories().last().unwrap();
        assert_eq!(last.id, DEFAULT_CATEGORY);
        assert!(last.is_default);
        assert!(!last.keywords.is_empty());
    }
}
