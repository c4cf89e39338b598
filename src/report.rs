// 📋 Automation Report - Every figure a presenter needs, computed in one pass
//
// Inputs:
//   matter entries  → classified under practice-area and benchmark
//   task entries    → classified under task-level (only when the export exists)
//
// Presenters render the report; nothing here formats or draws.

use crate::aggregate::{aggregate, latest_year, monthly_actuals, summarize};
use crate::aggregate::{AggregateRecord, AutomationSummary, Dimension, UNKNOWN};
use crate::classifier::classify_entries_parallel;
use crate::config::AnalysisConfig;
use crate::entry::{AnalyzedEntry, EntryFilter, TimeEntry};
use crate::error::Result;
use crate::keywords::{KeywordCount, KeywordExtractor, DEFAULT_KEYWORD_LIMIT};
use crate::projection::{months_observed, CumulativeSavings, ProjectionSummary, SavingsEstimate};
use crate::taxonomy::{benchmark, practice_area, Taxonomy, TaxonomyKind, TaxonomyRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::thread;
use tracing::{info, warn};

/// Category tables (opportunities, savings)
pub const CATEGORY_TABLE_LIMIT: usize = 12;

/// Matters ranked for AI implementation
pub const IMPLEMENTATION_MATTER_LIMIT: usize = 20;

/// Matter labels listed per category definition
pub const PROFILE_MATTER_LIMIT: usize = 5;

pub const SAMPLE_TASK_TYPES: usize = 10;
pub const SAMPLES_PER_TASK_TYPE: usize = 2;
pub const HIGH_AUTOMATION_TASK_LIMIT: usize = 20;

// ============================================================================
// REPORT TYPES
// ============================================================================

/// Hours for one category of a taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryHours {
    pub category_id: String,
    pub label: String,
    pub automation_potential: f64,
    pub entry_count: usize,
    pub total_hours: f64,
    pub automatable_hours: f64,
}

/// Hours for one user or matter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHours {
    pub name: String,
    pub total_hours: f64,
    pub automatable_hours: f64,

    /// Percent of the row's total hours
    pub automation_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySavings {
    pub category_id: String,
    pub automatable_hours: f64,
    pub hours_saved: f64,
    pub cost_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatterCount {
    pub matter_name: String,
    pub entries: usize,
}

/// A category definition alongside the matters it captured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub category_id: String,
    pub label: String,
    pub description: String,
    pub automation_potential: f64,
    pub keywords: Vec<String>,
    pub examples: Vec<String>,
    pub top_matters: Vec<MatterCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSample {
    pub description: String,
    pub task_type: String,
    pub automation_potential: f64,
    pub hours: f64,
}

/// Hours per distinct description among high-potential tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighAutomationTask {
    pub description: String,
    pub hours: f64,
    pub automation_potential: f64,
}

/// Task-level against matter-level automation rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    pub task_entries: usize,
    pub task_automatable_hours: f64,
    pub task_rate: f64,
    pub matter_entries: usize,
    pub matter_automatable_hours: f64,
    pub matter_rate: f64,

    /// task_rate − matter_rate, in percentage points
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDeepDive {
    pub summary: AutomationSummary,
    pub unique_task_types: usize,

    /// Every task type, most automatable hours first
    pub breakdown: Vec<CategoryHours>,

    pub samples: Vec<TaskSample>,
    pub high_automation_tasks: Vec<HighAutomationTask>,
    pub comparison: RateComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationReport {
    pub practice_area: AutomationSummary,
    pub benchmark: AutomationSummary,

    /// Practice areas by automatable hours, internal time excluded
    pub top_categories: Vec<CategoryHours>,
    pub top_users: Vec<RankedHours>,
    pub top_matters: Vec<RankedHours>,

    /// Benchmark tiers by automation potential, unclassified excluded
    pub benchmark_tiers: Vec<CategoryHours>,

    /// Matters by benchmark automatable hours, unclassified excluded
    pub implementation_matters: Vec<RankedHours>,

    pub savings: SavingsEstimate,

    /// Same parameters applied to benchmark automatable hours
    pub benchmark_savings: SavingsEstimate,

    pub savings_by_category: Vec<CategorySavings>,
    pub cumulative_savings: Vec<CumulativeSavings>,

    /// Automatable against manual hours per "YYYY-MM", in period order
    pub monthly_distribution: Vec<AggregateRecord>,
    pub benchmark_monthly_distribution: Vec<AggregateRecord>,

    /// None when no dated entries fall in the projection year
    pub projection: Option<ProjectionSummary>,

    pub category_profiles: Vec<CategoryProfile>,
    pub keywords: Vec<KeywordCount>,

    /// Present only when the task-level export was supplied
    pub task_deep_dive: Option<TaskDeepDive>,
}

// ============================================================================
// PREPARATION
// ============================================================================

/// Filter, clamp and classify raw entries under each of `kinds`
pub fn prepare_entries(
    entries: Vec<TimeEntry>,
    filter: &EntryFilter,
    config: &AnalysisConfig,
    registry: &TaxonomyRegistry,
    kinds: &[TaxonomyKind],
) -> Result<Vec<AnalyzedEntry>> {
    let loaded = entries.len();
    let kept = filter.apply(entries);
    if kept.len() < loaded {
        info!(loaded, kept = kept.len(), "Filtered time entries");
    }

    let mut analyzed = AnalyzedEntry::from_entries(kept, &config.hours_policy());
    let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    for &kind in kinds {
        let taxonomy = registry.get(kind)?;
        classify_entries_parallel(&mut analyzed, taxonomy, workers);
    }
    Ok(analyzed)
}

// ============================================================================
// REPORT BUILDER
// ============================================================================

pub struct ReportBuilder<'a> {
    config: &'a AnalysisConfig,
    registry: &'a TaxonomyRegistry,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a AnalysisConfig, registry: &'a TaxonomyRegistry) -> Self {
        ReportBuilder { config, registry }
    }

    /// `entries` must be classified under practice-area and benchmark;
    /// `tasks`, when given, under task-level.
    pub fn build(
        &self,
        entries: &[AnalyzedEntry],
        tasks: Option<&[AnalyzedEntry]>,
    ) -> Result<AutomationReport> {
        let practice = self.registry.get(TaxonomyKind::PracticeArea)?;
        let bench = self.registry.get(TaxonomyKind::Benchmark)?;
        let engine = self.config.projection_engine();

        let practice_summary = summarize(entries, TaxonomyKind::PracticeArea)?;
        let benchmark_summary = summarize(entries, TaxonomyKind::Benchmark)?;

        let by_category = aggregate(entries, &[Dimension::Category], TaxonomyKind::PracticeArea)?;
        let mut top_categories: Vec<CategoryHours> = by_category
            .iter()
            .filter(|r| r.key[0] != practice_area::INTERNAL_CATEGORY)
            .map(|r| category_hours(r, practice))
            .collect();
        top_categories.sort_by(|a, b| b.automatable_hours.total_cmp(&a.automatable_hours));
        top_categories.truncate(CATEGORY_TABLE_LIMIT);

        let mut benchmark_tiers: Vec<CategoryHours> =
            aggregate(entries, &[Dimension::Category], TaxonomyKind::Benchmark)?
                .iter()
                .filter(|r| r.key[0] != benchmark::DEFAULT_CATEGORY)
                .map(|r| category_hours(r, bench))
                .collect();
        benchmark_tiers.sort_by(|a, b| b.automation_potential.total_cmp(&a.automation_potential));

        let classified: Vec<AnalyzedEntry> = entries
            .iter()
            .filter(|e| {
                e.classification(TaxonomyKind::Benchmark)
                    .map_or(false, |c| c.category_id != benchmark::DEFAULT_CATEGORY)
            })
            .cloned()
            .collect();
        let mut implementation_matters = ranked(
            aggregate(&classified, &[Dimension::MatterName], TaxonomyKind::Benchmark)?,
        );
        implementation_matters.sort_by(|a, b| b.automatable_hours.total_cmp(&a.automatable_hours));
        implementation_matters.truncate(IMPLEMENTATION_MATTER_LIMIT);

        let top_users = self.top_by_hours(entries, Dimension::User)?;
        let top_matters = self.top_by_hours(entries, Dimension::MatterName)?;

        let savings = engine.estimate_savings(
            practice_summary.automatable_hours,
            practice_summary.total_hours,
        );
        let benchmark_savings = engine.estimate_savings(
            benchmark_summary.automatable_hours,
            benchmark_summary.total_hours,
        );
        let mut savings_by_category: Vec<CategorySavings> = by_category
            .iter()
            .map(|r| {
                let hours_saved = r.automatable_hours * self.config.efficiency_gain;
                CategorySavings {
                    category_id: r.key[0].clone(),
                    automatable_hours: r.automatable_hours,
                    hours_saved,
                    cost_savings: hours_saved * self.config.hourly_rate,
                }
            })
            .collect();
        savings_by_category.sort_by(|a, b| b.cost_savings.total_cmp(&a.cost_savings));
        savings_by_category.truncate(CATEGORY_TABLE_LIMIT);

        // Month keys are "YYYY-MM", so key order is period order
        let monthly_distribution =
            aggregate(entries, &[Dimension::Month], TaxonomyKind::PracticeArea)?;
        let benchmark_monthly_distribution =
            aggregate(entries, &[Dimension::Month], TaxonomyKind::Benchmark)?;
        let cumulative_savings = engine.cumulative_savings(&monthly_distribution);

        let projection = self.project(entries)?;

        let keywords = KeywordExtractor::new()?.extract(
            entries.iter().filter_map(|e| e.entry.matter_name.as_deref()),
            DEFAULT_KEYWORD_LIMIT,
        );

        let task_deep_dive = match tasks {
            Some(tasks) => Some(self.task_deep_dive(tasks, &practice_summary)?),
            None => None,
        };

        info!(
            entries = entries.len(),
            task_entries = tasks.map_or(0, |t| t.len()),
            automation_rate = practice_summary.automation_rate,
            "Built automation report"
        );

        Ok(AutomationReport {
            practice_area: practice_summary,
            benchmark: benchmark_summary,
            top_categories,
            top_users,
            top_matters,
            benchmark_tiers,
            implementation_matters,
            savings,
            benchmark_savings,
            savings_by_category,
            cumulative_savings,
            monthly_distribution,
            benchmark_monthly_distribution,
            projection,
            category_profiles: category_profiles(entries, practice),
            keywords,
            task_deep_dive,
        })
    }

    fn top_by_hours(
        &self,
        entries: &[AnalyzedEntry],
        dimension: Dimension,
    ) -> Result<Vec<RankedHours>> {
        let mut rows = ranked(aggregate(entries, &[dimension], TaxonomyKind::PracticeArea)?);
        rows.sort_by(|a, b| b.total_hours.total_cmp(&a.total_hours));
        rows.truncate(self.config.top_n);
        Ok(rows)
    }

    /// Full-year projection for the configured or latest year
    pub fn project(&self, entries: &[AnalyzedEntry]) -> Result<Option<ProjectionSummary>> {
        let year = match self.config.analysis_year.or_else(|| latest_year(entries)) {
            Some(year) => year,
            None => return Ok(None),
        };

        let actuals = monthly_actuals(entries, TaxonomyKind::PracticeArea, year)?;
        match self
            .config
            .projection_engine()
            .project(&actuals, months_observed(&actuals))
        {
            Ok(summary) => Ok(Some(summary)),
            Err(e) if e.is_recoverable() => {
                warn!(year, "No observed months to project from");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn task_deep_dive(
        &self,
        tasks: &[AnalyzedEntry],
        matter_summary: &AutomationSummary,
    ) -> Result<TaskDeepDive> {
        let task_taxonomy = self.registry.get(TaxonomyKind::TaskLevel)?;
        let summary = summarize(tasks, TaxonomyKind::TaskLevel)?;

        let mut breakdown: Vec<CategoryHours> =
            aggregate(tasks, &[Dimension::Category], TaxonomyKind::TaskLevel)?
                .iter()
                .map(|r| category_hours(r, task_taxonomy))
                .collect();
        breakdown.sort_by(|a, b| b.automatable_hours.total_cmp(&a.automatable_hours));

        let mut samples = Vec::new();
        for task_type in breakdown.iter().take(SAMPLE_TASK_TYPES) {
            let matching = tasks.iter().filter(|t| {
                t.classification(TaxonomyKind::TaskLevel)
                    .map_or(false, |c| c.category_id == task_type.category_id)
            });
            for task in matching.take(SAMPLES_PER_TASK_TYPE) {
                samples.push(TaskSample {
                    description: task
                        .entry
                        .description
                        .clone()
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    task_type: task_type.category_id.clone(),
                    automation_potential: task_type.automation_potential,
                    hours: task.analysis_hours,
                });
            }
        }

        let comparison = RateComparison {
            task_entries: summary.entry_count,
            task_automatable_hours: summary.automatable_hours,
            task_rate: summary.automation_rate,
            matter_entries: matter_summary.entry_count,
            matter_automatable_hours: matter_summary.automatable_hours,
            matter_rate: matter_summary.automation_rate,
            difference: summary.automation_rate - matter_summary.automation_rate,
        };

        Ok(TaskDeepDive {
            unique_task_types: breakdown.len(),
            high_automation_tasks: high_automation_tasks(
                tasks,
                self.config.high_automation_threshold,
            ),
            summary,
            breakdown,
            samples,
            comparison,
        })
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn category_hours(record: &AggregateRecord, taxonomy: &Taxonomy) -> CategoryHours {
    let id = &record.key[0];
    let (label, automation_potential) = taxonomy
        .category(id)
        .map(|c| (c.label.clone(), c.automation_potential))
        .unwrap_or_else(|| (id.clone(), 0.0));
    CategoryHours {
        category_id: id.clone(),
        label,
        automation_potential,
        entry_count: record.entry_count,
        total_hours: record.total_hours,
        automatable_hours: record.automatable_hours,
    }
}

fn ranked(records: Vec<AggregateRecord>) -> Vec<RankedHours> {
    records
        .into_iter()
        .map(|r| RankedHours {
            automation_rate: r.automation_rate(),
            name: r.label(),
            total_hours: r.total_hours,
            automatable_hours: r.automatable_hours,
        })
        .collect()
}

/// Definitions (internal time excluded) with the most frequent matter labels per category
fn category_profiles(entries: &[AnalyzedEntry], taxonomy: &Taxonomy) -> Vec<CategoryProfile> {
    let mut counts: HashMap<&str, HashMap<&str, usize>> = HashMap::new();
    for entry in entries {
        if let (Some(c), Some(name)) = (
            entry.classification(taxonomy.kind()),
            entry.entry.matter_name.as_deref(),
        ) {
            *counts
                .entry(c.category_id.as_str())
                .or_default()
                .entry(name)
                .or_default() += 1;
        }
    }

    taxonomy
        .categories()
        .iter()
        .filter(|c| c.id != practice_area::INTERNAL_CATEGORY)
        .map(|c| {
            let mut top_matters: Vec<MatterCount> = counts
                .get(c.id.as_str())
                .map(|matters| {
                    matters
                        .iter()
                        .map(|(name, &n)| MatterCount {
                            matter_name: name.to_string(),
                            entries: n,
                        })
                        .collect()
                })
                .unwrap_or_default();
            top_matters.sort_by(|a, b| {
                b.entries
                    .cmp(&a.entries)
                    .then(a.matter_name.cmp(&b.matter_name))
            });
            top_matters.truncate(PROFILE_MATTER_LIMIT);

            CategoryProfile {
                category_id: c.id.clone(),
                label: c.label.clone(),
                description: c.description.clone(),
                automation_potential: c.automation_potential,
                keywords: c.keywords.clone(),
                examples: c.examples.clone(),
                top_matters,
            }
        })
        .collect()
}

/// Tasks at or above `threshold`, hours summed per description
fn high_automation_tasks(tasks: &[AnalyzedEntry], threshold: f64) -> Vec<HighAutomationTask> {
    let mut rows: Vec<HighAutomationTask> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for task in tasks {
        let Some(c) = task.classification(TaxonomyKind::TaskLevel) else {
            continue;
        };
        if c.automation_potential < threshold {
            continue;
        }
        let description = task.entry.description.clone().unwrap_or_else(|| UNKNOWN.to_string());
        match index.get(&description) {
            Some(&i) => rows[i].hours += task.analysis_hours,
            None => {
                index.insert(description.clone(), rows.len());
                rows.push(HighAutomationTask {
                    description,
                    hours: task.analysis_hours,
                    automation_potential: c.automation_potential,
                });
            }
        }
    }

    rows.sort_by(|a, b| b.hours.total_cmp(&a.hours));
    rows.truncate(HIGH_AUTOMATION_TASK_LIMIT);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RateType;
    use chrono::NaiveDate;

    fn matter(month: u32, hours: f64, user: &str, name: &str) -> TimeEntry {
        TimeEntry::new(
            NaiveDate::from_ymd_opt(2025, month, 10),
            hours,
            RateType::TimeBased("Hourly".into()),
        )
        .with_matter(&format!("ID-{}", name), name)
        .with_user(user)
    }

    fn task(hours: f64, description: &str) -> TimeEntry {
        TimeEntry::new(
            NaiveDate::from_ymd_opt(2025, 2, 1),
            hours,
            RateType::TimeBased("Hourly".into()),
        )
        .with_matter("ID-Acme", "Acme Acquisition")
        .with_description(description)
    }

    fn registry() -> &'static TaxonomyRegistry {
        TaxonomyRegistry::global().unwrap()
    }

    fn matter_entries() -> Vec<AnalyzedEntry> {
        let raw = vec![
            matter(1, 10.0, "alice", "Acme Acquisition Agreement Review"),
            matter(1, 4.0, "bob", "Internal Time - Training"),
            matter(2, 6.0, "alice", "Smith v. Jones Litigation"),
            matter(2, 2.0, "carol", "Estate of Doe Trust"),
            matter(3, 3.0, "bob", "Acme Acquisition Agreement Review"),
        ];
        prepare_entries(
            raw,
            &EntryFilter::default(),
            &AnalysisConfig::default(),
            registry(),
            &[TaxonomyKind::PracticeArea, TaxonomyKind::Benchmark],
        )
        .unwrap()
    }

    fn task_entries() -> Vec<AnalyzedEntry> {
        let raw = vec![
            task(1.0, "Email regarding status of closing"),
            task(2.0, "Email regarding status of closing"),
            task(3.0, "Negotiate settlement"),
            task(0.5, "Review agreement"),
            task(1.5, "Telephone conference with client"),
        ];
        prepare_entries(
            raw,
            &EntryFilter::default(),
            &AnalysisConfig::default(),
            registry(),
            &[TaxonomyKind::TaskLevel],
        )
        .unwrap()
    }

    fn build(tasks: Option<&[AnalyzedEntry]>) -> AutomationReport {
        let config = AnalysisConfig::default();
        ReportBuilder::new(&config, registry())
            .build(&matter_entries(), tasks)
            .unwrap()
    }

    #[test]
    fn test_summary_totals() {
        let report = build(None);
        assert_eq!(report.practice_area.entry_count, 5);
        assert!((report.practice_area.total_hours - 25.0).abs() < 1e-9);
        assert!(report.task_deep_dive.is_none());
    }

    #[test]
    fn test_top_categories_exclude_internal_time() {
        let report = build(None);
        assert!(report
            .top_categories
            .iter()
            .all(|c| c.category_id != practice_area::INTERNAL_CATEGORY));
        assert_eq!(report.top_categories[0].category_id, "MA-Deal-Terms");
        assert!((report.top_categories[0].total_hours - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_benchmark_tiers_exclude_unclassified_and_sort_by_potential() {
        let report = build(None);
        assert!(report
            .benchmark_tiers
            .iter()
            .all(|t| t.category_id != benchmark::DEFAULT_CATEGORY));
        for pair in report.benchmark_tiers.windows(2) {
            assert!(pair[0].automation_potential >= pair[1].automation_potential);
        }
        assert!(report
            .benchmark_tiers
            .iter()
            .any(|t| t.category_id == benchmark::OVERRIDE_CATEGORY));
    }

    #[test]
    fn test_top_users_ordered_by_hours() {
        let report = build(None);
        let names: Vec<&str> = report.top_users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert!((report.top_users[0].total_hours - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_savings_match_summary() {
        let report = build(None);
        let expected = report.practice_area.automatable_hours * 0.60 * 500.0;
        assert!((report.savings.labor_saved - expected).abs() < 1e-6);

        let last = report.cumulative_savings.last().unwrap();
        assert_eq!(last.period, "2025-03");
        assert!((last.cumulative_savings - expected).abs() < 1e-6);
    }

    #[test]
    fn test_benchmark_savings_headline() {
        let report = build(None);
        let expected = report.benchmark.automatable_hours * 0.60 * 500.0;
        assert!((report.benchmark_savings.labor_saved - expected).abs() < 1e-6);
        assert!(report.benchmark.automatable_hours < report.benchmark.total_hours);
    }

    #[test]
    fn test_monthly_distribution_per_taxonomy() {
        let report = build(None);

        for (monthly, summary) in [
            (&report.monthly_distribution, &report.practice_area),
            (&report.benchmark_monthly_distribution, &report.benchmark),
        ] {
            let periods: Vec<&str> = monthly.iter().map(|r| r.key[0].as_str()).collect();
            assert_eq!(periods, vec!["2025-01", "2025-02", "2025-03"]);

            let hours: Vec<f64> = monthly.iter().map(|r| r.total_hours).collect();
            assert_eq!(hours, vec![14.0, 8.0, 3.0]);

            let automatable: f64 = monthly.iter().map(|r| r.automatable_hours).sum();
            assert!((automatable - summary.automatable_hours).abs() < 1e-9);
            for record in monthly.iter() {
                assert!(
                    (record.automatable_hours + record.manual_hours - record.total_hours).abs()
                        < 1e-9
                );
            }
        }
    }

    #[test]
    fn test_projection_from_latest_year() {
        let report = build(None);
        let projection = report.projection.unwrap();
        assert_eq!(projection.months_observed, 3);
        assert_eq!(projection.months_remaining, 9);
        assert!((projection.projected_total - (25.0 + 25.0 / 3.0 * 9.0)).abs() < 1e-6);
    }

    #[test]
    fn test_projection_absent_for_year_without_data() {
        let config = AnalysisConfig {
            analysis_year: Some(2019),
            ..AnalysisConfig::default()
        };
        let projection = ReportBuilder::new(&config, registry())
            .project(&matter_entries())
            .unwrap();
        assert!(projection.is_none());
    }

    #[test]
    fn test_category_profiles() {
        let report = build(None);
        assert_eq!(report.category_profiles.len(), 17);
        let ma = report
            .category_profiles
            .iter()
            .find(|p| p.category_id == "MA-Deal-Terms")
            .unwrap();
        assert_eq!(
            ma.top_matters,
            vec![MatterCount {
                matter_name: "Acme Acquisition Agreement Review".into(),
                entries: 2
            }]
        );
    }

    #[test]
    fn test_keywords_from_matter_names() {
        let report = build(None);
        assert_eq!(report.keywords[0].word, "acme");
        assert_eq!(report.keywords[0].count, 2);
    }

    #[test]
    fn test_task_deep_dive() {
        let tasks = task_entries();
        let report = build(Some(&tasks));
        let dive = report.task_deep_dive.unwrap();

        assert_eq!(dive.summary.entry_count, 5);
        assert_eq!(dive.unique_task_types, 4);
        assert_eq!(dive.breakdown[0].category_id, "Email-Status-Updates");

        // Two samples for the email type, one for each other type
        assert_eq!(dive.samples.len(), 5);

        assert_eq!(
            dive.high_automation_tasks[0],
            HighAutomationTask {
                description: "Email regarding status of closing".into(),
                hours: 3.0,
                automation_potential: 0.92,
            }
        );
        assert_eq!(dive.high_automation_tasks.len(), 2);

        let expected = dive.summary.automation_rate - report.practice_area.automation_rate;
        assert!((dive.comparison.difference - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unclassified_entries_are_an_error() {
        let raw = AnalyzedEntry::from_entries(
            vec![matter(1, 1.0, "alice", "Acme")],
            &AnalysisConfig::default().hours_policy(),
        );
        let config = AnalysisConfig::default();
        assert!(ReportBuilder::new(&config, registry()).build(&raw, None).is_err());
    }
}
