use std::cell::RefCell;

use anyhow::Result;
use uuid::Uuid;

use crate::error::PlannerError;
use crate::model::scenario::Scenario;
use crate::repository::traits::ScenarioRepository;

/// Session-only working set, discarded when dropped.
#[derive(Default)]
pub struct InMemoryScenarioRepository {
    scenarios: RefCell<Vec<Scenario>>,
}

impl InMemoryScenarioRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioRepository for InMemoryScenarioRepository {
    fn create(&self, scenario: Scenario) -> Result<Scenario> {
        self.scenarios.borrow_mut().push(scenario.clone());
        Ok(scenario)
    }

    fn list(&self) -> Result<Vec<Scenario>> {
        Ok(self.scenarios.borrow().clone())
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut scenarios = self.scenarios.borrow_mut();
        let initial_len = scenarios.len();
        scenarios.retain(|s| s.id != *id);
        if scenarios.len() == initial_len {
            return Err(PlannerError::ScenarioNotFound(id.to_string()).into());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.scenarios.borrow_mut().clear();
        Ok(())
    }
}
