use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::PlannerError;
use crate::model::scenario::Scenario;
use crate::repository::traits::ScenarioRepository;

const DEFAULT_FILE_NAME: &str = "scenarios.json";

/// Working set kept as a pretty-printed JSON array in the data directory.
#[derive(Clone)]
pub struct FileScenarioRepository {
    file_path: PathBuf,
}

impl FileScenarioRepository {
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Could not create data directory {}", data_dir.display()))?;
        let path = data_dir.join(DEFAULT_FILE_NAME);

        let repo = FileScenarioRepository { file_path: path };
        if !repo.file_path.exists() {
            repo.write_scenarios(&[])?;
            info!(path = %repo.file_path.display(), "initialized scenario store");
        }
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_scenarios(&self) -> Result<Vec<Scenario>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let scenarios = serde_json::from_reader(reader)
            .with_context(|| format!("Corrupt scenario file {}", self.file_path.display()))?;
        Ok(scenarios)
    }

    fn write_scenarios(&self, scenarios: &[Scenario]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, scenarios)?;
        writer.flush()?;
        debug!(count = scenarios.len(), "wrote scenario store");
        Ok(())
    }
}

impl ScenarioRepository for FileScenarioRepository {
    fn create(&self, scenario: Scenario) -> Result<Scenario> {
        let mut scenarios = self.read_scenarios()?;
        scenarios.push(scenario.clone());
        self.write_scenarios(&scenarios)?;
        Ok(scenario)
    }

    fn list(&self) -> Result<Vec<Scenario>> {
        self.read_scenarios()
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut scenarios = self.read_scenarios()?;
        let initial_len = scenarios.len();
        scenarios.retain(|s| s.id != *id);

        if scenarios.len() == initial_len {
            return Err(PlannerError::ScenarioNotFound(id.to_string()).into());
        }

        self.write_scenarios(&scenarios)
    }

    fn clear(&self) -> Result<()> {
        self.write_scenarios(&[])
    }
}
