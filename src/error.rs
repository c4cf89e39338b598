// ⚠️ Error Types - Failures surfaced by the analysis core

use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Requested taxonomy name is not registered
    #[error("Unknown taxonomy: {0}")]
    UnknownTaxonomy(String),

    /// Entries were never run through the requested taxonomy
    #[error("Entries have not been classified under taxonomy '{taxonomy}'")]
    NotClassified { taxonomy: String },

    /// Projection requested without any observed month
    #[error("Insufficient data: no observed months to project from")]
    InsufficientData,

    /// Grouping dimension name not recognised
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// Taxonomy table violates one of its construction invariants
    #[error("Invalid taxonomy '{taxonomy}': {reason}")]
    InvalidTaxonomy { taxonomy: String, reason: String },

    /// Configuration value out of range or unreadable
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl AnalysisError {
    /// Whether a presenter can recover by showing an empty/"no data" state
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::InsufficientData)
    }
}
