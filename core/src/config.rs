use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::pool::ResourcePool;

pub const HOME_ENV_VAR: &str = "RMS_PLANNER_HOME";
const DEFAULT_DIR_NAME: &str = ".rms-planner";
const CONFIG_FILE_NAME: &str = "config.json";

/// Contents of `config.json` in the data directory. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub default_pool: Option<ResourcePool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub data_dir: PathBuf,
    pub default_pool: Option<ResourcePool>,
}

impl PlannerConfig {
    /// Resolves the data directory (explicit override, then
    /// `RMS_PLANNER_HOME`, then `~/.rms-planner`) and reads `config.json`
    /// from it if present.
    pub fn load(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let env_dir = std::env::var_os(HOME_ENV_VAR).map(PathBuf::from);
        let data_dir = resolve_data_dir(data_dir_override, env_dir)?;
        let file = read_config_file(&data_dir)?;
        debug!(data_dir = %data_dir.display(), has_default_pool = file.default_pool.is_some(), "loaded config");

        Ok(Self {
            data_dir,
            default_pool: file.default_pool,
        })
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit.or(from_env) {
        return Ok(dir);
    }
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

fn read_config_file(data_dir: &Path) -> Result<ConfigFile> {
    let path = data_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Reads a pool snapshot saved as JSON, e.g. `{"total_capacity": 100, "available_capacity": 40}`.
pub fn load_pool_snapshot(path: &Path) -> Result<ResourcePool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read pool snapshot {}", path.display()))?;
    let pool = serde_json::from_str(&content)
        .with_context(|| format!("Invalid pool snapshot {}", path.display()))?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/a")), Some(PathBuf::from("/b"))).unwrap();
        assert_eq!(dir, PathBuf::from("/a"));
        let dir = resolve_data_dir(None, Some(PathBuf::from("/b"))).unwrap();
        assert_eq!(dir, PathBuf::from("/b"));
    }

    #[test]
    fn test_load_reads_default_pool() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig::load(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.default_pool, None);

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"default_pool": {"item": "Excavator", "total_capacity": 12, "available_capacity": 7}}"#,
        )
        .unwrap();
        let config = PlannerConfig::load(Some(dir.path().to_path_buf())).unwrap();
        let pool = config.default_pool.unwrap();
        assert_eq!(pool.item.as_deref(), Some("Excavator"));
        assert_eq!(pool.total_capacity, 12);
        assert_eq!(pool.available_capacity, 7);
    }

    #[test]
    fn test_pool_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(&path, r#"{"total_capacity": 100, "available_capacity": 40}"#).unwrap();
        assert_eq!(load_pool_snapshot(&path).unwrap(), ResourcePool::new(100, 40));

        fs::write(&path, "not json").unwrap();
        assert!(load_pool_snapshot(&path).is_err());
    }
}
