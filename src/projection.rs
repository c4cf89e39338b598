// 🔮 Projection Engine - Full-year forecasts and efficiency scenarios
//
// Extrapolation:
//   projected = Σ actual + monthly_average × months_remaining
//
// Scenario economics (per efficiency gain g, automatable hours A):
//   hours_saved = A × g
//   cost_saved  = hours_saved × hourly_rate
//   ai_cost     = A × ai_cost_per_hour
//   net         = cost_saved − ai_cost
//   roi         = net / ai_cost × 100   (0 when ai_cost is 0)

use crate::aggregate::{percentage, AggregateRecord, UNKNOWN};
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const MONTHS_PER_YEAR: u32 = 12;

// ============================================================================
// INPUT / OUTPUT TYPES
// ============================================================================

/// Observed sums for one calendar month (1-12)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActual {
    pub month: u32,
    pub total_hours: f64,
    pub automatable_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Actual,
    Projected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub month: u32,
    pub kind: RecordKind,
    pub total_hours: f64,
    pub automatable_hours: f64,
    pub monthly_savings: f64,
    pub cumulative_savings: f64,
}

/// Named efficiency gain to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub efficiency_gain: f64,
}

impl Scenario {
    pub fn new(name: &str, efficiency_gain: f64) -> Self {
        Scenario {
            name: name.to_string(),
            efficiency_gain,
        }
    }

    /// Conservative / Moderate / Optimistic at 40 / 60 / 80 %
    pub fn defaults() -> Vec<Scenario> {
        vec![
            Scenario::new("Conservative (40% efficiency)", 0.40),
            Scenario::new("Moderate (60% efficiency)", 0.60),
            Scenario::new("Optimistic (80% efficiency)", 0.80),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub efficiency_gain: f64,
    pub hours_saved: f64,
    pub cost_saved: f64,
    pub ai_cost_total: f64,
    pub net_savings: f64,

    /// Return on AI cost, in percent
    pub roi_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub months_observed: u32,
    pub months_remaining: u32,
    pub average_monthly_total: f64,
    pub average_monthly_automatable: f64,
    pub actual_total: f64,
    pub actual_automatable: f64,
    pub projected_total: f64,
    pub projected_automatable: f64,

    /// Percent of projected total
    pub projected_automation_rate: f64,

    /// projected_automatable × efficiency_gain × hourly_rate
    pub projected_annual_savings: f64,

    /// Months 1-12 in order
    pub records: Vec<ProjectionRecord>,

    pub scenarios: Vec<ScenarioOutcome>,
}

/// Savings for a fixed amount of automatable hours at the configured parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEstimate {
    pub hours_saved: f64,

    /// Percent of total hours
    pub share_of_total: f64,

    pub labor_saved: f64,
    pub ai_cost: f64,
    pub net_savings: f64,
    pub roi_percent: f64,
}

/// Running savings through the observed months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSavings {
    /// "YYYY-MM"
    pub period: String,
    pub hours_saved: f64,
    pub monthly_savings: f64,
    pub cumulative_savings: f64,
}

// ============================================================================
// PROJECTION ENGINE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Fraction of automatable time actually saved
    pub efficiency_gain: f64,
    pub hourly_rate: f64,
    pub ai_cost_per_hour: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        ProjectionParams {
            efficiency_gain: 0.60,
            hourly_rate: 500.0,
            ai_cost_per_hour: 10.0,
        }
    }
}

pub struct ProjectionEngine {
    pub params: ProjectionParams,
    pub scenarios: Vec<Scenario>,
}

impl ProjectionEngine {
    pub fn new() -> Self {
        ProjectionEngine {
            params: ProjectionParams::default(),
            scenarios: Scenario::defaults(),
        }
    }

    pub fn with_params(params: ProjectionParams, scenarios: Vec<Scenario>) -> Self {
        ProjectionEngine { params, scenarios }
    }

    /// Extrapolate `monthly_actuals` for the first `months_observed` months to a full year
    pub fn project(
        &self,
        monthly_actuals: &[MonthlyActual],
        months_observed: u32,
    ) -> Result<ProjectionSummary> {
        let observed: Vec<&MonthlyActual> = monthly_actuals
            .iter()
            .filter(|m| m.month >= 1 && m.month <= months_observed.min(MONTHS_PER_YEAR))
            .collect();

        let ignored = monthly_actuals.len() - observed.len();
        if ignored > 0 {
            warn!(ignored, months_observed, "monthly actuals outside the observed window ignored");
        }

        if months_observed == 0 || observed.is_empty() {
            return Err(AnalysisError::InsufficientData);
        }

        let months_observed = months_observed.min(MONTHS_PER_YEAR);
        let months_remaining = MONTHS_PER_YEAR - months_observed;

        let actual_total: f64 = observed.iter().map(|m| m.total_hours).sum();
        let actual_automatable: f64 = observed.iter().map(|m| m.automatable_hours).sum();
        let average_monthly_total = actual_total / observed.len() as f64;
        let average_monthly_automatable = actual_automatable / observed.len() as f64;

        let projected_total = actual_total + average_monthly_total * months_remaining as f64;
        let projected_automatable =
            actual_automatable + average_monthly_automatable * months_remaining as f64;

        let mut records = Vec::with_capacity(MONTHS_PER_YEAR as usize);
        let mut cumulative_savings = 0.0;
        for month in 1..=MONTHS_PER_YEAR {
            let kind = if month <= months_observed {
                RecordKind::Actual
            } else {
                RecordKind::Projected
            };
            // Observed months without data are filled with the averages
            let (total_hours, automatable_hours) = observed
                .iter()
                .find(|m| m.month == month)
                .map(|m| (m.total_hours, m.automatable_hours))
                .unwrap_or((average_monthly_total, average_monthly_automatable));

            let monthly_savings = self.monthly_savings(automatable_hours);
            cumulative_savings += monthly_savings;
            records.push(ProjectionRecord {
                month,
                kind,
                total_hours,
                automatable_hours,
                monthly_savings,
                cumulative_savings,
            });
        }

        debug!(
            months_observed,
            months_remaining,
            projected_total,
            projected_automatable,
            "projected full year"
        );

        Ok(ProjectionSummary {
            months_observed,
            months_remaining,
            average_monthly_total,
            average_monthly_automatable,
            actual_total,
            actual_automatable,
            projected_total,
            projected_automatable,
            projected_automation_rate: percentage(projected_automatable, projected_total),
            projected_annual_savings: self.monthly_savings(projected_automatable),
            records,
            scenarios: self.evaluate_scenarios(projected_automatable, &self.scenarios),
        })
    }

    /// Compare efficiency gains over the same projected automatable hours
    pub fn evaluate_scenarios(
        &self,
        projected_automatable: f64,
        scenarios: &[Scenario],
    ) -> Vec<ScenarioOutcome> {
        scenarios
            .iter()
            .map(|scenario| {
                let hours_saved = projected_automatable * scenario.efficiency_gain;
                let cost_saved = hours_saved * self.params.hourly_rate;
                let ai_cost_total = projected_automatable * self.params.ai_cost_per_hour;
                let net_savings = cost_saved - ai_cost_total;
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    efficiency_gain: scenario.efficiency_gain,
                    hours_saved,
                    cost_saved,
                    ai_cost_total,
                    net_savings,
                    roi_percent: percentage(net_savings, ai_cost_total),
                }
            })
            .collect()
    }

    /// Savings at the configured efficiency gain
    pub fn estimate_savings(&self, automatable_hours: f64, total_hours: f64) -> SavingsEstimate {
        let hours_saved = automatable_hours * self.params.efficiency_gain;
        let labor_saved = hours_saved * self.params.hourly_rate;
        let ai_cost = automatable_hours * self.params.ai_cost_per_hour;
        let net_savings = labor_saved - ai_cost;
        SavingsEstimate {
            hours_saved,
            share_of_total: percentage(hours_saved, total_hours),
            labor_saved,
            ai_cost,
            net_savings,
            roi_percent: percentage(net_savings, ai_cost),
        }
    }

    /// Running savings across month-keyed aggregate records, in period order.
    /// Records in the unknown bucket have no place on the timeline.
    pub fn cumulative_savings(&self, monthly: &[AggregateRecord]) -> Vec<CumulativeSavings> {
        let mut ordered: Vec<&AggregateRecord> = monthly
            .iter()
            .filter(|r| r.key.first().map_or(false, |k| k != UNKNOWN))
            .collect();
        ordered.sort_by(|a, b| a.key.cmp(&b.key));

        let mut running = 0.0;
        ordered
            .into_iter()
            .map(|record| {
                let monthly_savings = self.monthly_savings(record.automatable_hours);
                running += monthly_savings;
                CumulativeSavings {
                    period: record.key[0].clone(),
                    hours_saved: record.automatable_hours * self.params.efficiency_gain,
                    monthly_savings,
                    cumulative_savings: running,
                }
            })
            .collect()
    }

    fn monthly_savings(&self, automatable_hours: f64) -> f64 {
        automatable_hours * self.params.efficiency_gain * self.params.hourly_rate
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Latest month with data, used as the observed window
pub fn months_observed(monthly_actuals: &[MonthlyActual]) -> u32 {
    monthly_actuals.iter().map(|m| m.month).max().unwrap_or(0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn month(month: u32, total: f64, automatable: f64) -> MonthlyActual {
        MonthlyActual {
            month,
            total_hours: total,
            automatable_hours: automatable,
        }
    }

    #[test]
    fn test_scenario_example() {
        let engine = ProjectionEngine::with_params(
            ProjectionParams {
                efficiency_gain: 0.60,
                hourly_rate: 500.0,
                ai_cost_per_hour: 10.0,
            },
            Vec::new(),
        );
        let outcomes = engine.evaluate_scenarios(1000.0, &[Scenario::new("Moderate", 0.60)]);
        let outcome = &outcomes[0];

        assert!((outcome.hours_saved - 600.0).abs() < EPS);
        assert!((outcome.cost_saved - 300_000.0).abs() < EPS);
        assert!((outcome.ai_cost_total - 10_000.0).abs() < EPS);
        assert!((outcome.net_savings - 290_000.0).abs() < EPS);
        assert!((outcome.roi_percent - 2900.0).abs() < EPS);
    }

    #[test]
    fn test_zero_ai_cost_roi_is_zero() {
        let engine = ProjectionEngine::with_params(
            ProjectionParams {
                efficiency_gain: 0.5,
                hourly_rate: 400.0,
                ai_cost_per_hour: 0.0,
            },
            Scenario::defaults(),
        );
        for outcome in engine.evaluate_scenarios(250.0, &engine.scenarios) {
            assert_eq!(outcome.ai_cost_total, 0.0);
            assert_eq!(outcome.roi_percent, 0.0);
        }
        assert_eq!(engine.estimate_savings(250.0, 0.0).share_of_total, 0.0);
    }

    #[test]
    fn test_full_year_identity() {
        let actuals: Vec<MonthlyActual> =
            (1..=12).map(|m| month(m, 100.0 + m as f64, 50.0)).collect();
        let summary = ProjectionEngine::new().project(&actuals, 12).unwrap();
        let actual_total: f64 = actuals.iter().map(|m| m.total_hours).sum();

        assert_eq!(summary.months_remaining, 0);
        assert!((summary.projected_total - actual_total).abs() < EPS);
        assert!(summary.records.iter().all(|r| r.kind == RecordKind::Actual));
    }

    #[test]
    fn test_partial_year_extrapolation() {
        let actuals = vec![month(1, 100.0, 60.0), month(2, 200.0, 100.0), month(3, 300.0, 140.0)];
        let summary = ProjectionEngine::new().project(&actuals, 3).unwrap();

        assert_eq!(summary.months_remaining, 9);
        assert!((summary.average_monthly_total - 200.0).abs() < EPS);
        assert!((summary.average_monthly_automatable - 100.0).abs() < EPS);
        assert!((summary.projected_total - (600.0 + 200.0 * 9.0)).abs() < EPS);
        assert!((summary.projected_automatable - (300.0 + 100.0 * 9.0)).abs() < EPS);

        assert_eq!(summary.records.len(), 12);
        assert_eq!(summary.records[2].kind, RecordKind::Actual);
        assert_eq!(summary.records[2].total_hours, 300.0);
        assert_eq!(summary.records[3].kind, RecordKind::Projected);
        assert_eq!(summary.records[3].total_hours, 200.0);
        assert_eq!(summary.scenarios.len(), 3);
    }

    #[test]
    fn test_cumulative_savings_running_sum() {
        let actuals = vec![month(1, 10.0, 10.0), month(2, 10.0, 20.0)];
        let engine = ProjectionEngine::new();
        let summary = engine.project(&actuals, 2).unwrap();

        let mut expected = 0.0;
        for record in &summary.records {
            expected += record.automatable_hours * 0.60 * 500.0;
            assert!((record.cumulative_savings - expected).abs() < EPS);
        }
        let last = summary.records.last().unwrap();
        assert!((last.cumulative_savings - summary.projected_annual_savings).abs() < EPS);
    }

    #[test]
    fn test_gap_month_filled_with_average() {
        let actuals = vec![month(1, 100.0, 10.0), month(3, 300.0, 30.0)];
        let summary = ProjectionEngine::new().project(&actuals, 3).unwrap();

        let february = &summary.records[1];
        assert_eq!(february.kind, RecordKind::Actual);
        assert!((february.total_hours - 200.0).abs() < EPS);
        assert!((summary.projected_total - (400.0 + 200.0 * 9.0)).abs() < EPS);
    }

    #[test]
    fn test_insufficient_data() {
        let engine = ProjectionEngine::new();
        assert!(matches!(engine.project(&[], 0), Err(AnalysisError::InsufficientData)));
        assert!(matches!(
            engine.project(&[month(1, 1.0, 1.0)], 0),
            Err(AnalysisError::InsufficientData)
        ));
        assert!(matches!(engine.project(&[], 4), Err(AnalysisError::InsufficientData)));
    }

    #[test]
    fn test_months_observed_clamped() {
        let actuals: Vec<MonthlyActual> = (1..=12).map(|m| month(m, 10.0, 5.0)).collect();
        let summary = ProjectionEngine::new().project(&actuals, 15).unwrap();
        assert_eq!(summary.months_observed, 12);
        assert_eq!(summary.months_remaining, 0);
        assert!((summary.projected_total - 120.0).abs() < EPS);
    }

    #[test]
    fn test_estimate_savings() {
        let estimate = ProjectionEngine::new().estimate_savings(1000.0, 4000.0);
        assert!((estimate.hours_saved - 600.0).abs() < EPS);
        assert!((estimate.share_of_total - 15.0).abs() < EPS);
        assert!((estimate.labor_saved - 300_000.0).abs() < EPS);
        assert!((estimate.net_savings - 290_000.0).abs() < EPS);
    }

    #[test]
    fn test_cumulative_savings_sorted() {
        let record = |period: &str, automatable: f64| AggregateRecord {
            key: vec![period.to_string()],
            total_hours: automatable,
            automatable_hours: automatable,
            manual_hours: 0.0,
            entry_count: 1,
            raw_hours: automatable,
            billable_amount: 0.0,
        };
        let engine = ProjectionEngine::new();
        let rows = engine.cumulative_savings(&[
            record("2025-02", 2.0),
            record(UNKNOWN, 50.0),
            record("2024-12", 1.0),
        ]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, "2024-12");
        assert!((rows[1].cumulative_savings - 3.0 * 0.6 * 500.0).abs() < EPS);
        assert_eq!(months_observed(&[month(2, 0.0, 2.0), month(7, 0.0, 1.0)]), 7);
    }
}
