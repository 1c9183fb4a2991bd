use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::aggregator::DemandPoint;
use crate::model::impact::ImpactResult;
use crate::model::pool::ResourcePool;
use crate::model::scenario::Scenario;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioRow {
    pub id: Uuid,
    pub short_id: String,
    pub label: Option<String>,
    pub quantity: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
    // Whether this scenario counts toward the peak
    pub active_at_peak: bool,
}

impl ScenarioRow {
    pub fn from_entity(scenario: Scenario, peak_date: Option<NaiveDate>) -> Self {
        let active_at_peak = peak_date.is_some_and(|d| scenario.is_active_on(d));
        Self {
            id: scenario.id,
            short_id: scenario.short_id(),
            days: scenario.days(),
            label: scenario.label,
            quantity: scenario.quantity,
            start: scenario.start,
            end: scenario.end,
            active_at_peak,
        }
    }
}

/// Everything a view needs to render one evaluation, flattened.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImpactReport {
    pub pool: ResourcePool,
    pub peak_demand: i64,
    pub remaining_capacity: i64,
    pub utilization_delta: f64,
    pub utilization_display: f64,
    pub oversubscribed: bool,
    pub peak_date: Option<NaiveDate>,
    pub scenarios: Vec<ScenarioRow>,
    pub profile: Vec<DemandPoint>,
}

impl ImpactReport {
    pub fn new(
        pool: ResourcePool,
        result: ImpactResult,
        peak_date: Option<NaiveDate>,
        scenarios: Vec<Scenario>,
        profile: Vec<DemandPoint>,
    ) -> Self {
        // A floored zero peak has nothing contributing to it.
        let marker_date = peak_date.filter(|_| result.peak_demand > 0);
        Self {
            pool,
            peak_demand: result.peak_demand,
            remaining_capacity: result.remaining_capacity,
            utilization_delta: result.utilization_delta,
            utilization_display: result.utilization_display(),
            oversubscribed: result.is_oversubscribed(),
            peak_date,
            scenarios: scenarios
                .into_iter()
                .map(|s| ScenarioRow::from_entity(s, marker_date))
                .collect(),
            profile,
        }
    }
}
