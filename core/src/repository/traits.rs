use crate::model::scenario::Scenario;
use anyhow::Result;
use uuid::Uuid;

/// Storage for the working set of scenarios. The aggregator never sees
/// this; callers list the scenarios and pass them in explicitly.
pub trait ScenarioRepository {
    fn create(&self, scenario: Scenario) -> Result<Scenario>;
    fn list(&self) -> Result<Vec<Scenario>>;
    fn delete(&self, id: &Uuid) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
