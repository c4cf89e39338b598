// 📥 Ingestion - Billing-system CSV exports into TimeEntry values
//
// Both export flavours share the same shape:
//   line 1-2  report preamble (skipped)
//   line 3    header row (names may carry embedded newlines)
//   rest      one time entry per record
//
// Malformed values never fail the load: bad dates become None,
// bad numbers become 0. Unreadable records are skipped with a warning.

use crate::config::AnalysisConfig;
use crate::entry::{AnalyzedEntry, EntryFilter, RateType, TimeEntry};
use crate::report::prepare_entries;
use crate::taxonomy::{TaxonomyKind, TaxonomyRegistry};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PREAMBLE_LINES: usize = 2;
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Where the task-level export is looked for when no path is given
pub const DEFAULT_TASK_PATHS: &[&str] =
    &["./data/matter_description.csv", "matter_description.csv"];

// ============================================================================
// COLUMN LAYOUTS
// ============================================================================

/// Header names for one export flavour. Optional columns are read when present.
struct Layout {
    date: &'static str,
    hours: &'static str,
    amount: &'static str,
    matter_name: Option<&'static str>,
    rate_type: Option<&'static str>,
    matter_id: Option<&'static str>,
    user: Option<&'static str>,
    description: Option<&'static str>,

    /// Columns a file must carry to be loaded at all
    required: &'static [&'static str],
}

/// Matter-level export
const TIME_LAYOUT: Layout = Layout {
    date: "Date of Work",
    hours: "Billable Hours",
    amount: "Billable Amount",
    matter_name: Some("Matter Name"),
    rate_type: Some("Rate Type"),
    matter_id: Some("Matter ID"),
    user: Some("User Name"),
    description: Some("Description"),
    required: &["Date of Work", "Billable Hours", "Matter Name"],
};

/// Task-level export (one row per described task)
const TASK_LAYOUT: Layout = Layout {
    date: "Entry Date",
    hours: "Billable Time",
    amount: "Billable Amt",
    matter_name: Some("Matter"),
    rate_type: Some("Rate Type"),
    matter_id: Some("Matter ID"),
    user: Some("User"),
    description: Some("Description"),
    required: &["Entry Date", "Billable Time"],
};

struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (normalize_header(name), i))
            .collect();
        Columns { index }
    }

    fn require(&self, name: &str, path: &Path) -> Result<()> {
        if !self.index.contains_key(name) {
            bail!("Missing column '{}' in {}", name, path.display());
        }
        Ok(())
    }

    /// Trimmed, non-empty cell value
    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.index
            .get(name)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn optional<'r>(&self, record: &'r StringRecord, name: Option<&str>) -> Option<&'r str> {
        name.and_then(|n| self.get(record, n))
    }
}

fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}')
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}

// ============================================================================
// VALUE PARSING
// ============================================================================

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok())
}

/// Numbers may carry currency symbols and thousands separators
fn parse_number(value: Option<&str>) -> f64 {
    value
        .map(|v| v.replace(['$', ','], ""))
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

// ============================================================================
// LOADERS
// ============================================================================

/// Load the matter-level export
pub fn load_time_entries(path: &Path, flat_fee_tag: &str) -> Result<Vec<TimeEntry>> {
    load_entries(path, &TIME_LAYOUT, flat_fee_tag)
}

/// Load the task-level export (descriptions drive task classification)
pub fn load_task_entries(path: &Path, flat_fee_tag: &str) -> Result<Vec<TimeEntry>> {
    load_entries(path, &TASK_LAYOUT, flat_fee_tag)
}

fn load_entries(path: &Path, layout: &Layout, flat_fee_tag: &str) -> Result<Vec<TimeEntry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let text = text.trim_start_matches('\u{feff}');

    let body = text.splitn(PREAMBLE_LINES + 1, '\n').nth(PREAMBLE_LINES).unwrap_or("");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row in {}", path.display()))?
        .clone();
    let columns = Columns::from_headers(&headers);
    for required in layout.required {
        columns.require(required, path)?;
    }

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for (record_num, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                // +2 preamble, +1 header, +1 for 1-indexing
                warn!(
                    line = record_num + PREAMBLE_LINES + 2,
                    error = %e,
                    "skipping unreadable record"
                );
                skipped += 1;
                continue;
            }
        };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let rate_type = columns
            .optional(&record, layout.rate_type)
            .map(|tag| RateType::from_tag(tag, flat_fee_tag))
            .unwrap_or_else(|| RateType::TimeBased(String::new()));

        let mut entry = TimeEntry::new(
            parse_date(columns.get(&record, layout.date)),
            parse_number(columns.get(&record, layout.hours)),
            rate_type,
        )
        .with_amount(parse_number(columns.get(&record, layout.amount)));

        let matter_name = columns.optional(&record, layout.matter_name);
        entry.matter_name = matter_name.map(str::to_string);
        // Without an id column the matter label identifies the matter
        entry.matter_id = columns
            .optional(&record, layout.matter_id)
            .or(matter_name)
            .map(str::to_string);
        entry.user_name = columns.optional(&record, layout.user).map(str::to_string);
        entry.description = columns.optional(&record, layout.description).map(str::to_string);

        entries.push(entry);
    }

    info!(
        path = %path.display(),
        entries = entries.len(),
        skipped,
        "Loaded time entries"
    );
    Ok(entries)
}

// ============================================================================
// TASK DATASET DETECTION
// ============================================================================

/// Whether task-level analysis can run, and how the export was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDataset {
    /// Named by the caller; failing to load it is an error
    Explicit(PathBuf),

    /// Found in a default location; failing to load it disables task analysis
    Detected(PathBuf),

    Absent,
}

impl TaskDataset {
    pub fn is_present(&self) -> bool {
        !matches!(self, TaskDataset::Absent)
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, TaskDataset::Explicit(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            TaskDataset::Explicit(path) | TaskDataset::Detected(path) => Some(path),
            TaskDataset::Absent => None,
        }
    }
}

/// First existing candidate wins
pub fn detect_task_dataset<P: AsRef<Path>>(candidates: &[P]) -> TaskDataset {
    candidates
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.is_file())
        .map(|p| TaskDataset::Detected(p.to_path_buf()))
        .unwrap_or(TaskDataset::Absent)
}

// ============================================================================
// DATASET
// ============================================================================

/// Classified entries ready for reporting
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Matter-level entries, classified under practice-area and benchmark
    pub entries: Vec<AnalyzedEntry>,

    /// Task-level entries, classified under task-level
    pub tasks: Option<Vec<AnalyzedEntry>>,
}

impl Dataset {
    /// Load, filter and classify both exports. The task export is optional:
    /// an explicit path must load, a detected one that fails to load is
    /// logged and skipped so the matter-level analysis still runs.
    pub fn load(
        data_path: &Path,
        task_dataset: &TaskDataset,
        filter: &EntryFilter,
        config: &AnalysisConfig,
        registry: &TaxonomyRegistry,
    ) -> Result<Self> {
        let raw = load_time_entries(data_path, &config.flat_fee_tag)?;
        let entries = prepare_entries(
            raw,
            filter,
            config,
            registry,
            &[TaxonomyKind::PracticeArea, TaxonomyKind::Benchmark],
        )?;

        let tasks = match task_dataset {
            TaskDataset::Explicit(path) => Some(load_tasks(path, filter, config, registry)?),
            TaskDataset::Detected(path) => match load_tasks(path, filter, config, registry) {
                Ok(tasks) => Some(tasks),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Could not load task-level export, task analysis disabled"
                    );
                    None
                }
            },
            TaskDataset::Absent => {
                info!("No task-level export found, task analysis disabled");
                None
            }
        };

        Ok(Dataset { entries, tasks })
    }
}

fn load_tasks(
    path: &Path,
    filter: &EntryFilter,
    config: &AnalysisConfig,
    registry: &TaxonomyRegistry,
) -> Result<Vec<AnalyzedEntry>> {
    let raw = load_task_entries(path, &config.flat_fee_tag)?;
    Ok(prepare_entries(raw, filter, config, registry, &[TaxonomyKind::TaskLevel])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const TIME_EXPORT: &str = "\u{feff}Billable Hours Report\n\
        Generated 01/31/2025\n\
        Date of Work,Billable Hours,Billable Amount,Rate Type,Matter Name,User Name,Matter ID\n\
        01/15/2025,2.5,\"$1,250.00\",Hourly,Acme Acquisition,alice,M-1\n\
        01/16/2025,12.0,5000,Flat Fee,Widget NDA,bob,M-2\n\
        not a date,abc,,Hourly,,carol,M-3\n\
        ,,,,,,\n";

    #[test]
    fn test_load_time_entries() {
        let file = write_csv(TIME_EXPORT);
        let entries = load_time_entries(file.path(), "Flat Fee").unwrap();

        assert_eq!(entries.len(), 3);

        let first = &entries[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(first.hours, 2.5);
        assert_eq!(first.billable_amount, 1250.0);
        assert_eq!(first.matter_name.as_deref(), Some("Acme Acquisition"));
        assert_eq!(first.matter_id.as_deref(), Some("M-1"));
        assert_eq!(first.user_name.as_deref(), Some("alice"));
        assert_eq!(first.rate_type, RateType::TimeBased("Hourly".to_string()));

        assert!(entries[1].rate_type.is_flat_fee());
        assert_eq!(entries[1].hours, 12.0);
    }

    #[test]
    fn test_malformed_values_coerced() {
        let file = write_csv(TIME_EXPORT);
        let entries = load_time_entries(file.path(), "Flat Fee").unwrap();
        let bad = &entries[2];

        assert_eq!(bad.date, None);
        assert_eq!(bad.hours, 0.0);
        assert_eq!(bad.billable_amount, 0.0);
        assert_eq!(bad.matter_name, None);
    }

    #[test]
    fn test_missing_required_column() {
        let file = write_csv("preamble\npreamble\nDate of Work,Matter Name\n01/01/2025,Acme\n");
        let err = load_time_entries(file.path(), "Flat Fee").unwrap_err();
        assert!(err.to_string().contains("Billable Hours"));
    }

    #[test]
    fn test_load_task_entries_with_multiline_headers() {
        let file = write_csv(
            "Task Report\n\
             \n\
             \"Entry\nDate\",\"Billable\nTime\",Billable Amt,User,Matter,Description\n\
             02/03/2025,0.4,200,alice,Acme Acquisition,Email regarding status of closing\n\
             02/04/2025,1.1,550,bob,Smith v. Jones,Negotiate settlement\n",
        );
        let entries = load_task_entries(file.path(), "Flat Fee").unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2025, 2, 3));
        assert_eq!(entries[0].hours, 0.4);
        assert_eq!(
            entries[0].description.as_deref(),
            Some("Email regarding status of closing")
        );
        assert_eq!(entries[1].matter_id.as_deref(), Some("Smith v. Jones"));
        assert_eq!(entries[1].user_name.as_deref(), Some("bob"));
    }

    #[test]
    fn test_task_export_without_matter_column() {
        let file = write_csv(
            "Task Report\n\
             \n\
             Entry Date,Billable Time,Billable Amt,User,Description\n\
             02/03/2025,0.4,200,alice,Email regarding status of closing\n",
        );
        let entries = load_task_entries(file.path(), "Flat Fee").unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].matter_name, None);
        assert_eq!(entries[0].matter_id, None);
        assert_eq!(entries[0].user_name.as_deref(), Some("alice"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_time_entries(&dir.path().join("nope.csv"), "Flat Fee").is_err());
    }

    #[test]
    fn test_dataset_load() {
        let file = write_csv(TIME_EXPORT);
        let registry = TaxonomyRegistry::global().unwrap();
        let config = AnalysisConfig::default();

        let dataset = Dataset::load(
            file.path(),
            &TaskDataset::Absent,
            &EntryFilter::default(),
            &config,
            registry,
        )
        .unwrap();

        assert_eq!(dataset.entries.len(), 3);
        assert!(dataset.tasks.is_none());
        // Flat-fee row counts as one hour
        assert_eq!(dataset.entries[1].analysis_hours, 1.0);
        assert!(dataset.entries[0]
            .classification(TaxonomyKind::Benchmark)
            .is_some());
    }

    #[test]
    fn test_broken_detected_task_export_is_skipped() {
        let data = write_csv(TIME_EXPORT);
        let broken = write_csv("Task Report\n\nUser,Description\nalice,Email\n");
        let registry = TaxonomyRegistry::global().unwrap();
        let config = AnalysisConfig::default();

        let dataset = Dataset::load(
            data.path(),
            &TaskDataset::Detected(broken.path().to_path_buf()),
            &EntryFilter::default(),
            &config,
            registry,
        )
        .unwrap();
        assert_eq!(dataset.entries.len(), 3);
        assert!(dataset.tasks.is_none());

        let explicit = Dataset::load(
            data.path(),
            &TaskDataset::Explicit(broken.path().to_path_buf()),
            &EntryFilter::default(),
            &config,
            registry,
        );
        assert!(explicit.unwrap_err().to_string().contains("Entry Date"));
    }

    #[test]
    fn test_detect_task_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let present = dir.path().join("matter_description.csv");

        assert_eq!(detect_task_dataset(&[&missing]), TaskDataset::Absent);

        fs::write(&present, "x").unwrap();
        let detected = detect_task_dataset(&[&missing, &present]);
        assert!(detected.is_present());
        assert!(!detected.is_explicit());
        assert_eq!(detected.path(), Some(present.as_path()));
    }
}
