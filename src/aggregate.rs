// 📊 Aggregation Engine - Roll classified entries up by grouping dimensions
//
// Sums always use analysis hours (flat fees already clamped on the entry).
// Entries missing a grouping value land in the "Unknown" bucket, never dropped.

use crate::entry::AnalyzedEntry;
use crate::error::{AnalysisError, Result};
use crate::projection::MonthlyActual;
use crate::taxonomy::TaxonomyKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Bucket for entries without a value for a dimension
pub const UNKNOWN: &str = "Unknown";

/// Hours in a working week and a working year, for equivalence figures
pub const HOURS_PER_WEEK: f64 = 40.0;
pub const HOURS_PER_FTE_YEAR: f64 = 2080.0;

// ============================================================================
// DIMENSIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// Category assigned by the aggregated taxonomy
    Category,

    /// Calendar month, "YYYY-MM"
    Month,

    Year,

    User,

    /// Matter identifier
    Matter,

    /// Free-text matter label
    MatterName,

    RateType,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Category,
        Dimension::Month,
        Dimension::Year,
        Dimension::User,
        Dimension::Matter,
        Dimension::MatterName,
        Dimension::RateType,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Month => "month",
            Dimension::Year => "year",
            Dimension::User => "user",
            Dimension::Matter => "matter",
            Dimension::MatterName => "matter-name",
            Dimension::RateType => "rate-type",
        }
    }

    fn value(&self, entry: &AnalyzedEntry, category_id: &str) -> String {
        let raw = &entry.entry;
        let value = match self {
            Dimension::Category => Some(category_id.to_string()),
            Dimension::Month => raw.date.map(|d| d.format("%Y-%m").to_string()),
            Dimension::Year => raw.year().map(|y| y.to_string()),
            Dimension::User => raw.user_name.clone(),
            Dimension::Matter => raw.matter_id.clone(),
            Dimension::MatterName => raw.matter_name.clone(),
            Dimension::RateType => Some(raw.rate_type.as_str().to_string()),
        };
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Dimension::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| AnalysisError::UnknownDimension(s.to_string()))
    }
}

// ============================================================================
// AGGREGATE RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    /// One value per requested dimension, in request order
    pub key: Vec<String>,
    pub total_hours: f64,
    pub automatable_hours: f64,
    pub manual_hours: f64,
    pub entry_count: usize,

    /// Hours as recorded, before the flat-fee clamp
    pub raw_hours: f64,
    pub billable_amount: f64,
}

impl AggregateRecord {
    fn empty(key: Vec<String>) -> Self {
        AggregateRecord {
            key,
            total_hours: 0.0,
            automatable_hours: 0.0,
            manual_hours: 0.0,
            entry_count: 0,
            raw_hours: 0.0,
            billable_amount: 0.0,
        }
    }

    /// Automatable share of total hours, in percent (0 when there are no hours)
    pub fn automation_rate(&self) -> f64 {
        percentage(self.automatable_hours, self.total_hours)
    }

    /// Key rendered as "a / b / c"
    pub fn label(&self) -> String {
        self.key.join(" / ")
    }
}

/// `part / whole * 100`, short-circuiting to 0 for an empty whole
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

// ============================================================================
// AGGREGATE
// ============================================================================

/// Group `entries` by the Cartesian combination of `dimensions`.
///
/// Every entry must carry a classification for `taxonomy`. Output is ordered
/// by key for stable presentation; callers re-sort as needed.
pub fn aggregate(
    entries: &[AnalyzedEntry],
    dimensions: &[Dimension],
    taxonomy: TaxonomyKind,
) -> Result<Vec<AggregateRecord>> {
    let mut groups: BTreeMap<Vec<String>, AggregateRecord> = BTreeMap::new();

    for entry in entries {
        let classification = entry
            .classification(taxonomy)
            .ok_or_else(|| AnalysisError::NotClassified {
                taxonomy: taxonomy.name().to_string(),
            })?;

        let key: Vec<String> = dimensions
            .iter()
            .map(|d| d.value(entry, &classification.category_id))
            .collect();

        let automatable = entry.automatable_hours(taxonomy).unwrap_or_default();
        let record = groups
            .entry(key)
            .or_insert_with_key(|key| AggregateRecord::empty(key.clone()));
        record.total_hours += entry.analysis_hours;
        record.automatable_hours += automatable;
        record.raw_hours += entry.raw_hours();
        record.billable_amount += entry.entry.billable_amount;
        record.entry_count += 1;
    }

    let records: Vec<AggregateRecord> = groups
        .into_values()
        .map(|mut record| {
            record.manual_hours = record.total_hours - record.automatable_hours;
            record
        })
        .collect();

    debug!(
        taxonomy = taxonomy.name(),
        dimensions = ?dimensions,
        entries = entries.len(),
        groups = records.len(),
        "aggregated entries"
    );

    Ok(records)
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Headline figures for one taxonomy over a set of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationSummary {
    pub taxonomy: TaxonomyKind,
    pub entry_count: usize,
    pub total_hours: f64,
    pub automatable_hours: f64,
    pub manual_hours: f64,

    /// Percent of total hours
    pub automation_rate: f64,

    pub billable_amount: f64,
    pub unique_matters: usize,

    /// Mean per-entry automation potential
    pub average_potential: f64,

    pub flat_fee_entries: usize,
    pub work_weeks_equivalent: f64,
    pub fte_equivalent: f64,
}

pub fn summarize(entries: &[AnalyzedEntry], taxonomy: TaxonomyKind) -> Result<AutomationSummary> {
    let grand_total = aggregate(entries, &[], taxonomy)?;
    let total = grand_total
        .into_iter()
        .next()
        .unwrap_or_else(|| AggregateRecord::empty(Vec::new()));

    let potential_sum: f64 = entries
        .iter()
        .filter_map(|e| e.classification(taxonomy))
        .map(|c| c.automation_potential)
        .sum();
    let average_potential = if entries.is_empty() {
        0.0
    } else {
        potential_sum / entries.len() as f64
    };

    let unique_matters = entries
        .iter()
        .filter_map(|e| e.entry.matter_id.as_deref())
        .collect::<HashSet<_>>()
        .len();

    Ok(AutomationSummary {
        taxonomy,
        entry_count: total.entry_count,
        total_hours: total.total_hours,
        automatable_hours: total.automatable_hours,
        manual_hours: total.manual_hours,
        automation_rate: total.automation_rate(),
        billable_amount: total.billable_amount,
        unique_matters,
        average_potential,
        flat_fee_entries: entries.iter().filter(|e| e.entry.rate_type.is_flat_fee()).count(),
        work_weeks_equivalent: total.automatable_hours / HOURS_PER_WEEK,
        fte_equivalent: total.automatable_hours / HOURS_PER_FTE_YEAR,
    })
}

// ============================================================================
// MONTHLY ACTUALS (projection input)
// ============================================================================

/// Latest calendar year present in the entries
pub fn latest_year(entries: &[AnalyzedEntry]) -> Option<i32> {
    entries.iter().filter_map(|e| e.entry.year()).max()
}

/// Per-month sums for `year`, ordered by month. Entries without a date or
/// from other years are not part of any month.
pub fn monthly_actuals(
    entries: &[AnalyzedEntry],
    taxonomy: TaxonomyKind,
    year: i32,
) -> Result<Vec<MonthlyActual>> {
    let in_year: Vec<AnalyzedEntry> = entries
        .iter()
        .filter(|e| e.entry.year() == Some(year))
        .cloned()
        .collect();

    let skipped = entries.len() - in_year.len();
    if skipped > 0 {
        debug!(year, skipped, "entries outside the projection year");
    }

    let mut months = Vec::new();
    for record in aggregate(&in_year, &[Dimension::Month], taxonomy)? {
        // Key is "YYYY-MM"
        let month = record.key[0]
            .rsplit('-')
            .next()
            .and_then(|m| m.parse::<u32>().ok());
        if let Some(month) = month {
            months.push(MonthlyActual {
                month,
                total_hours: record.total_hours,
                automatable_hours: record.automatable_hours,
            });
        }
    }
    months.sort_by_key(|m| m.month);
    Ok(months)
}

// ============================================================================
// TESTS
// ============================================================================
