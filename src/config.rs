use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::Path;

/// Callplan configuration
pub struct CallplanConfig {
    /// Path to the directory holding the callplan datastore file
    pub data_dir: String,
}

const EMPTY_CONFIG: &str = r#"### callplan configuration file

### directory for the call-routing datastore used by callplan
# data_dir = "~/.callplan"
"#;

impl Default for CallplanConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.callplan", home_dir),
        }
    }
}

impl CallplanConfig {
    /// Function to create and initialize a new configuration
    ///
    /// Reads the TOML file at `path` when given, otherwise
    /// `$HOME/.callplan/callplan.toml` (created with a commented template when
    /// absent). `CALLPLAN_*` environment variables override file settings.
    pub fn new(path: &Option<String>) -> Result<CallplanConfig> {
        let mut builder = Config::builder();

        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        let callplan_dir = format!("{}/.callplan", home_dir.as_str());

        // Add in toml configuration file
        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(callplan_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create callplan directory: {}", e))?;
                let p = format!("{}/callplan.toml", callplan_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of CALLPLAN)
        // E.g., `CALLPLAN_DATA_DIR=~/.callplan ./callplan` would set the data directory
        builder = builder.add_source(config::Environment::with_prefix("CALLPLAN"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        // Parse data directory
        let data_dir = match config.get("data_dir") {
            Some(p) => Path::new(p)
                .to_str()
                .ok_or_else(|| anyhow!("Could not convert data_dir path to string"))?
                .to_string(),
            None => {
                let dir = format!("{}/.callplan", home_dir.as_str());
                std::fs::create_dir_all(dir.as_str())
                    .map_err(|e| anyhow!("Unable to create data directory: {}", e))?;
                dir
            }
        };

        Ok(CallplanConfig { data_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CallplanConfig::default();
        assert!(config.data_dir.ends_with(".callplan"));
    }

    #[test]
    fn test_config_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("callplan.toml");
        std::fs::write(&path, "data_dir = \"/tmp/callplan-test\"\n").unwrap();

        let config =
            CallplanConfig::new(&Some(path.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.data_dir, "/tmp/callplan-test");
    }

    #[test]
    fn test_missing_explicit_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.toml");

        let _ = CallplanConfig::new(&Some(path.to_str().unwrap().to_string())).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("callplan configuration file"));
    }
}
