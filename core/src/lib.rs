pub mod aggregator;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use aggregator::{DemandPoint, IntervalDemandAggregator};
pub use config::{load_pool_snapshot, PlannerConfig};
pub use error::PlannerError;
pub use input::{expand_key, parse_args, parse_pool, parse_scenario, ParsedInput};
pub use model::impact::ImpactResult;
pub use model::pool::ResourcePool;
pub use model::scenario::Scenario;
pub use repository::{FileScenarioRepository, InMemoryScenarioRepository, ScenarioRepository};
pub use service::dto::{ImpactReport, ScenarioRow};
pub use service::planner_service::PlannerService;
pub use time::parse_scenario_date_from;
