use anyhow::Result;
use tracing::{debug, info};

use crate::aggregator::IntervalDemandAggregator;
use crate::error::PlannerError;
use crate::model::pool::ResourcePool;
use crate::model::scenario::Scenario;
use crate::repository::ScenarioRepository;
use crate::service::dto::ImpactReport;

/// Manages the working set of scenarios and evaluates it against a pool.
pub struct PlannerService<R: ScenarioRepository> {
    repo: R,
    aggregator: IntervalDemandAggregator,
}

impl<R: ScenarioRepository> PlannerService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            aggregator: IntervalDemandAggregator::new(),
        }
    }

    pub fn add_scenario(&self, scenario: Scenario) -> Result<Scenario> {
        let created = self.repo.create(scenario)?;
        info!(id = %created.short_id(), quantity = created.quantity, "added scenario");
        Ok(created)
    }

    /// Scenarios ordered by start, then end.
    pub fn list_scenarios(&self) -> Result<Vec<Scenario>> {
        let mut scenarios = self.repo.list()?;
        scenarios.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        Ok(scenarios)
    }

    /// Removes the one scenario whose id starts with `id_prefix`.
    pub fn remove_scenario(&self, id_prefix: &str) -> Result<Scenario> {
        let prefix = id_prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(PlannerError::ScenarioNotFound(id_prefix.to_string()).into());
        }

        let mut matches: Vec<Scenario> = self
            .repo
            .list()?
            .into_iter()
            .filter(|s| s.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => Err(PlannerError::ScenarioNotFound(id_prefix.to_string()).into()),
            1 => {
                let scenario = matches.remove(0);
                self.repo.delete(&scenario.id)?;
                info!(id = %scenario.short_id(), "removed scenario");
                Ok(scenario)
            }
            _ => Err(PlannerError::AmbiguousScenario(id_prefix.to_string()).into()),
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.repo.clear()
    }

    /// Recomputes the impact of the current working set on `pool`.
    pub fn evaluate(&self, pool: &ResourcePool) -> Result<ImpactReport> {
        let scenarios = self.list_scenarios()?;
        let result = self.aggregator.compute_impact(&scenarios, pool);
        let peak_date = self.aggregator.peak_date(&scenarios);
        let profile = self.aggregator.demand_profile(&scenarios);

        debug!(
            scenarios = scenarios.len(),
            peak = result.peak_demand,
            remaining = result.remaining_capacity,
            "evaluated working set"
        );

        Ok(ImpactReport::new(pool.clone(), result, peak_date, scenarios, profile))
    }
}
