// ⚖️ Practice-Area Taxonomy - Broad legal practice areas scored from matter names
//
// Falls back to General-Matters (65%) when nothing matches.

use super::{CategoryDefinition, Taxonomy, TaxonomyKind};
use crate::error::Result;

pub const DEFAULT_CATEGORY: &str = "General-Matters";

/// Non-client time; scored like any other category here
pub const INTERNAL_CATEGORY: &str = "Internal-Time";

pub fn taxonomy() -> Result<Taxonomy> {
    Taxonomy::new(
        TaxonomyKind::PracticeArea,
        "LegalBench practice areas",
        categories(),
        DEFAULT_CATEGORY,
        None,
    )
}

fn categories() -> Vec<CategoryDefinition> {
    vec![
        // CONTRACT ANALYSIS & REVIEW
        CategoryDefinition::new(
            "Contract-Clause-Identification",
            "Contract Clause Identification",
            0.92,
        )
        .with_description("Identifying and extracting specific contract clauses")
        .with_keywords(&[
            "contract",
            "agreement",
            "lease",
            "license",
            "licensing",
            "amendment",
            "addendum",
            "nda",
            "msa",
            "sla",
            "consulting agreement",
            "service agreement",
            "vendor",
            "supplier",
            "procurement",
            "terms",
            "clause review",
        ])
        .with_examples(&["Contract review", "Lease agreements", "Service agreements"]),
        // M&A AND CORPORATE
        CategoryDefinition::new("MA-Deal-Terms", "M&A Deal Terms", 0.82)
            .with_description("M&A deal terms analysis and acquisition matters")
            .with_keywords(&[
                "acquisition",
                "acquisition agreement",
                "merger",
                "buyout",
                "purchase",
                "sale",
                "transaction",
                "m&a",
                "due diligence",
                "closing",
                "earnout",
                "escrow",
                "indemnit",
                "representation and warrant",
                "definitive agreement",
            ])
            .with_examples(&["M&A transactions", "Acquisitions", "Corporate sales"]),
        CategoryDefinition::new("Corporate-Governance", "Corporate Governance", 0.80)
            .with_description("Corporate governance, formation, and general corporate matters")
            .with_keywords(&[
                "general corporate",
                "corporate matters",
                "corporate governance",
                "formation",
                "incorporation",
                "llc",
                "corporation",
                "bylaws",
                "operating agreement",
                "shareholder",
                "board",
                "director",
                "officer",
                "corporate advice",
                "general representation",
                "retainer",
                "corporate counsel",
                "spv",
                "entity",
            ])
            .with_examples(&[
                "Corporate formation",
                "General corporate counsel",
                "Entity structuring",
            ]),
        CategoryDefinition::new("Securities-Compliance", "Securities Compliance", 0.78)
            .with_description("Securities matters and compliance")
            .with_keywords(&[
                "securities",
                "sec",
                "offering",
                "private placement",
                "regulation d",
                "stock",
                "equity",
                "financing",
                "investment",
                "fund",
                "investor",
            ])
            .with_examples(&["Securities filings", "Private placements", "Fund matters"]),
        // LITIGATION & PROCEDURE
        CategoryDefinition::new("Litigation-Matters", "Litigation Matters", 0.75)
            .with_description("Litigation, disputes, and court proceedings")
            .with_keywords(&[
                " v ",
                " v. ",
                " vs ",
                " vs. ",
                " versus ",
                "litigation",
                "lawsuit",
                "complaint",
                "dispute",
                "arbitration",
                "mediation",
                "trial",
                "hearing",
                "motion",
                "discovery",
                "deposition",
                "settlement",
                "judgment",
                "appeal",
                "court",
                "plaintiff",
                "defendant",
            ])
            .with_examples(&["Civil litigation", "Commercial disputes", "Court proceedings"]),
        CategoryDefinition::new("Bankruptcy-Receivership", "Bankruptcy & Receivership", 0.73)
            .with_description("Bankruptcy and receivership matters")
            .with_keywords(&[
                "bankruptcy",
                "chapter 11",
                "chapter 7",
                "receiver",
                "receivership",
                "creditor",
                "debtor",
                "insolvency",
                "reorganization",
                "liquidation",
            ])
            .with_examples(&["Bankruptcy proceedings", "Receivership matters", "Creditor rights"]),
        // EMPLOYMENT & HR
        CategoryDefinition::new("Employment-Law", "Employment Law", 0.80)
            .with_description("Employment contracts, disputes, and HR matters")
            .with_keywords(&[
                "employment",
                "employee",
                "hr ",
                "human resources",
                "labor",
                "termination",
                "severance",
                "discrimination",
                "harassment",
                "wage",
                "compensation",
                "benefits",
                "non-compete",
                "restrictive covenant",
                "wrongful termination",
                "employment agreement",
            ])
            .with_examples(&["Employment agreements", "HR compliance", "Wrongful termination"]),
        // REAL ESTATE
        CategoryDefinition::new("Real-Estate", "Real Estate", 0.75)
            .with_description("Real estate transactions and property matters")
            .with_keywords(&[
                "real estate",
                "property",
                "lease",
                "landlord",
                "tenant",
                "rental",
                "commercial lease",
                "retail lease",
                "office lease",
                "title",
                "escrow",
                "deed",
                "mortgage",
                "foreclosure",
                "easement",
                "zoning",
            ])
            .with_examples(&[
                "Lease negotiations",
                "Property acquisitions",
                "Real estate closings",
            ]),
        // INTELLECTUAL PROPERTY
        CategoryDefinition::new("Intellectual-Property", "Intellectual Property", 0.85)
            .with_description("IP matters including patents, trademarks, and copyrights")
            .with_keywords(&[
                "patent",
                "trademark",
                "copyright",
                "intellectual property",
                " ip ",
                "infringement",
                "licensing",
                "royalty",
                "trade secret",
                "confidential",
                "epo",
                "uspto",
                "office action",
                "prosecution",
                "portfolio",
            ])
            .with_examples(&["Patent prosecution", "Trademark filing", "IP licensing"]),
        // ESTATE PLANNING & TRUSTS
        CategoryDefinition::new("Estate-Planning", "Estate Planning", 0.88)
            .with_description("Estate planning, wills, trusts, and probate")
            .with_keywords(&[
                "estate planning",
                "estate",
                "trust",
                "will",
                "probate",
                "trustee",
                "beneficiary",
                "inheritance",
                "succession",
                "gift",
                "estate tax",
                "generation skipping",
                "living trust",
                "testamentary",
                "administration",
                "executor",
                "fiduciary",
            ])
            .with_examples(&["Estate planning", "Trust administration", "Will preparation"]),
        // FAMILY LAW
        CategoryDefinition::new("Family-Law", "Family Law", 0.68)
            .with_description("Divorce, custody, and family law matters")
            .with_keywords(&[
                "divorce",
                "dissolution",
                "marriage",
                "custody",
                "child support",
                "alimony",
                "spousal support",
                "marital",
                "family law",
                "prenup",
                "postnup",
                "separation",
                "domestic",
                "parenting",
                "visitation",
            ])
            .with_examples(&["Divorce proceedings", "Custody matters", "Support calculations"]),
        // TAX
        CategoryDefinition::new("Tax-Law", "Tax Law", 0.75)
            .with_description("Tax planning, compliance, and disputes")
            .with_keywords(&[
                "tax",
                "irs",
                "taxation",
                "tax planning",
                "tax compliance",
                "tax return",
                "audit",
                "tax dispute",
                "tax opinion",
                "tax structure",
            ])
            .with_examples(&["Tax planning", "IRS disputes", "Tax compliance"]),
        // IMMIGRATION
        CategoryDefinition::new("Immigration-Law", "Immigration Law", 0.78)
            .with_description("Immigration and visa matters")
            .with_keywords(&[
                "immigration",
                "visa",
                "h-1b",
                "green card",
                "citizenship",
                "naturalization",
                "deportation",
                "asylum",
                "refugee",
                "work permit",
                "uscis",
                "ice",
                "border",
                "immigrant",
            ])
            .with_examples(&["Visa applications", "Immigration compliance", "Citizenship matters"]),
        // REGULATORY & COMPLIANCE
        CategoryDefinition::new("Regulatory-Compliance", "Regulatory Compliance", 0.83)
            .with_description("Regulatory compliance and government affairs")
            .with_keywords(&[
                "regulatory",
                "compliance",
                "regulation",
                "permit",
                "license",
                "government",
                "agency",
                "fda",
                "epa",
                "osha",
                "ftc",
                "fcc",
                "administrative",
                "rulemaking",
                "enforcement",
                "investigation",
            ])
            .with_examples(&["Regulatory compliance", "Government permits", "Agency matters"]),
        CategoryDefinition::new("Cannabis-Law", "Cannabis Law", 0.72)
            .with_description("Cannabis industry legal matters")
            .with_keywords(&[
                "cannabis",
                "marijuana",
                "dispensary",
                "cultivation",
                "cbd",
                "thc",
                "hemp",
                "marijuana license",
                "cannabis license",
            ])
            .with_examples(&["Cannabis licensing", "Dispensary operations", "Cannabis compliance"]),
        CategoryDefinition::new("Healthcare-Law", "Healthcare Law", 0.74)
            .with_description("Healthcare and medical law matters")
            .with_keywords(&[
                "healthcare",
                "medical",
                "hospital",
                "physician",
                "hipaa",
                "health insurance",
                "medicare",
                "medicaid",
                "pharmaceutical",
            ])
            .with_examples(&[
                "Healthcare compliance",
                "Medical practice matters",
                "HIPAA compliance",
            ]),
        // GENERAL (fallback)
        CategoryDefinition::new(DEFAULT_CATEGORY, "General Matters", 0.65)
            .with_description("General advice, consultation, and miscellaneous matters")
            .with_keywords(&[
                "general matters",
                "general",
                "advice",
                "counsel",
                "consultation",
                "miscellaneous",
                "various",
                "other",
            ])
            .with_examples(&["General advice", "Consultations", "Miscellaneous matters"]),
        // INTERNAL TIME (not client work)
        CategoryDefinition::new(INTERNAL_CATEGORY, "Internal Time", 0.00)
            .with_description("Internal firm time - administrative and non-billable")
            .with_keywords(&[
                "internal time",
                "internal",
                "admin",
                "administrative",
                "training",
                "business development",
                "marketing",
                "firm",
                "vacation",
                "pto",
                "sick",
                "holiday",
            ])
            .with_examples(&["Internal meetings", "Training", "Administrative tasks"]),
    ]
}
