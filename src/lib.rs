// Matter Automation Analysis - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod taxonomy;    // Category tables + registry
pub mod entry;       // Time entries, flat-fee policy, filters
pub mod classifier;  // Keyword scoring
pub mod aggregate;   // Grouping + summaries
pub mod projection;  // Full-year forecasts + scenarios
pub mod config;
pub mod ingest;      // CSV exports → TimeEntry
pub mod keywords;
pub mod report;
pub mod cli;         // Shared by both binaries

// Re-export commonly used types
pub use error::{AnalysisError, Result};
pub use taxonomy::{
    CategoryDefinition, LabelSource, OverrideRule, Taxonomy, TaxonomyKind, TaxonomyRegistry,
};
pub use entry::{AnalyzedEntry, EntryFilter, HoursPolicy, RateType, TimeEntry};
pub use classifier::{
    classify, classify_entries, classify_entries_parallel, ClassificationResult, MatchKind,
};
pub use aggregate::{
    aggregate, latest_year, monthly_actuals, summarize,
    AggregateRecord, AutomationSummary, Dimension,
};
pub use projection::{
    MonthlyActual, ProjectionEngine, ProjectionParams, ProjectionRecord, ProjectionSummary,
    RecordKind, Scenario, ScenarioOutcome, SavingsEstimate,
};
pub use config::{AnalysisConfig, ConfigOverrides};
pub use ingest::{
    detect_task_dataset, load_task_entries, load_time_entries, Dataset, TaskDataset,
    DEFAULT_TASK_PATHS,
};
pub use keywords::{extract_keywords, KeywordCount, KeywordExtractor};
pub use report::{prepare_entries, AutomationReport, ReportBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
