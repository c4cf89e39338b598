// 🕒 Time Entries - Recorded effort plus the fields the analysis attaches to it
//
// Raw entries are never modified. Derived values (analysis hours,
// per-taxonomy classifications) live on `AnalyzedEntry` next to the raw entry.

use crate::classifier::ClassificationResult;
use crate::taxonomy::{LabelSource, TaxonomyKind};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// RATE TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateType {
    /// Fixed-fee billing: recorded hours do not reflect effort. Keeps the
    /// tag as it appears in the export.
    FlatFee(String),

    /// Any time-based arrangement, with the raw tag kept for reporting
    TimeBased(String),
}

impl RateType {
    /// Map a raw rate-type tag, comparing against the configured flat-fee tag
    pub fn from_tag(tag: &str, flat_fee_tag: &str) -> Self {
        let tag = tag.trim().to_string();
        if tag.eq_ignore_ascii_case(flat_fee_tag.trim()) {
            RateType::FlatFee(tag)
        } else {
            RateType::TimeBased(tag)
        }
    }

    pub fn is_flat_fee(&self) -> bool {
        matches!(self, RateType::FlatFee(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            RateType::FlatFee(tag) | RateType::TimeBased(tag) => tag,
        }
    }
}

// ============================================================================
// TIME ENTRY
// ============================================================================

/// One recorded time entry as supplied by ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub date: Option<NaiveDate>,

    /// Hours as recorded (raw, never adjusted)
    pub hours: f64,

    pub billable_amount: f64,

    pub rate_type: RateType,

    pub matter_name: Option<String>,

    pub description: Option<String>,

    pub user_name: Option<String>,

    pub matter_id: Option<String>,
}

impl TimeEntry {
    pub fn new(date: Option<NaiveDate>, hours: f64, rate_type: RateType) -> Self {
        TimeEntry {
            date,
            hours,
            billable_amount: 0.0,
            rate_type,
            matter_name: None,
            description: None,
            user_name: None,
            matter_id: None,
        }
    }

    /// Builder pattern: add matter name
    pub fn with_matter(mut self, matter_id: &str, matter_name: &str) -> Self {
        self.matter_id = Some(matter_id.to_string());
        self.matter_name = Some(matter_name.to_string());
        self
    }

    /// Builder pattern: add task description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Builder pattern: add user
    pub fn with_user(mut self, user_name: &str) -> Self {
        self.user_name = Some(user_name.to_string());
        self
    }

    /// Builder pattern: add billable amount
    pub fn with_amount(mut self, billable_amount: f64) -> Self {
        self.billable_amount = billable_amount;
        self
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }

    /// Free-text label a taxonomy classifies
    pub fn label(&self, source: LabelSource) -> Option<&str> {
        match source {
            LabelSource::MatterName => self.matter_name.as_deref(),
            LabelSource::TaskDescription => self.description.as_deref(),
        }
    }
}

// ============================================================================
// HOURS POLICY
// ============================================================================

/// How raw hours become analysis hours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursPolicy {
    /// Nominal hours substituted for every flat-fee entry
    pub flat_fee_hours: f64,
}

impl Default for HoursPolicy {
    fn default() -> Self {
        HoursPolicy { flat_fee_hours: 1.0 }
    }
}

impl HoursPolicy {
    /// Flat fees count as the nominal value; negative or non-finite hours count as 0
    pub fn analysis_hours(&self, entry: &TimeEntry) -> f64 {
        let hours = if entry.rate_type.is_flat_fee() {
            self.flat_fee_hours
        } else {
            entry.hours
        };
        sanitize_hours(hours)
    }
}

pub(crate) fn sanitize_hours(hours: f64) -> f64 {
    if hours.is_finite() && hours > 0.0 {
        hours
    } else {
        0.0
    }
}

// ============================================================================
// ANALYZED ENTRY
// ============================================================================

/// A raw entry plus derived analysis fields
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedEntry {
    pub entry: TimeEntry,

    /// Hours used for every analysis sum (flat fees clamped)
    pub analysis_hours: f64,

    /// One result per taxonomy the entry has been run through
    pub classifications: BTreeMap<TaxonomyKind, ClassificationResult>,
}

impl AnalyzedEntry {
    pub fn new(entry: TimeEntry, policy: &HoursPolicy) -> Self {
        let analysis_hours = policy.analysis_hours(&entry);
        AnalyzedEntry {
            entry,
            analysis_hours,
            classifications: BTreeMap::new(),
        }
    }

    pub fn from_entries(entries: Vec<TimeEntry>, policy: &HoursPolicy) -> Vec<AnalyzedEntry> {
        entries
            .into_iter()
            .map(|entry| AnalyzedEntry::new(entry, policy))
            .collect()
    }

    /// Hours as originally recorded
    pub fn raw_hours(&self) -> f64 {
        self.entry.hours
    }

    pub fn attach(&mut self, result: ClassificationResult) {
        self.classifications.insert(result.taxonomy, result);
    }

    pub fn classification(&self, taxonomy: TaxonomyKind) -> Option<&ClassificationResult> {
        self.classifications.get(&taxonomy)
    }

    pub fn automatable_hours(&self, taxonomy: TaxonomyKind) -> Option<f64> {
        self.classification(taxonomy)
            .map(|c| self.analysis_hours * c.automation_potential)
    }

    pub fn manual_hours(&self, taxonomy: TaxonomyKind) -> Option<f64> {
        self.automatable_hours(taxonomy)
            .map(|automatable| self.analysis_hours - automatable)
    }
}

// ============================================================================
// ENTRY FILTER
// ============================================================================

/// Year/user selection applied before classification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Empty = all years (entries without a date are kept only when empty)
    pub years: BTreeSet<i32>,

    /// Empty = all users
    pub users: BTreeSet<String>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        let year_ok = self.years.is_empty()
            || entry.year().map_or(false, |year| self.years.contains(&year));
        let user_ok = self.users.is_empty()
            || entry
                .user_name
                .as_ref()
                .map_or(false, |user| self.users.contains(user));
        year_ok && user_ok
    }

    pub fn apply(&self, entries: Vec<TimeEntry>) -> Vec<TimeEntry> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
