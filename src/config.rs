use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_PREFIX: &str = "workout-sheet-sync";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub runningahead: RunningAheadConfig,
    pub google: GoogleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RunningAheadConfig {
    /// JSON file holding named secrets
    pub secrets_file: PathBuf,
    /// Name of the secret holding the API access token
    pub token_key: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl Default for RunningAheadConfig {
    fn default() -> Self {
        Self {
            secrets_file: PathBuf::from("settings/access_tokens.json"),
            token_key: "runningahead_token".to_string(),
            api_base_url: "https://api.runningahead.com".to_string(),
            timeout_secs: 20,
        }
    }
}

impl RunningAheadConfig {
    pub fn workouts_url(&self) -> String {
        format!(
            "{}/rest/logs/me/workouts",
            self.api_base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GoogleConfig {
    pub service_account_key: PathBuf,
    /// Exact title of the spreadsheet in Google Drive
    pub spreadsheet_name: String,
    pub timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            service_account_key: PathBuf::from("settings/service_account.json"),
            spreadsheet_name: "Workout Metrics".to_string(),
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub max_bytes: usize,
    pub backups: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("logging.log"),
            max_bytes: 5 * 1024 * 1024,
            backups: 5,
        }
    }
}

impl Config {
    /// Load the config from an explicit path, or from the XDG config file if
    /// one exists. Without either, defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::config_file()?;
                match default_path.exists() {
                    true => Self::from_file(&default_path),
                    false => Ok(Self::default()),
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "Config file not found at {:?}",
                path
            )));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        if config.runningahead.token_key.is_empty() {
            return Err(AppError::Config(
                "runningahead.token_key must not be empty".to_string(),
            ));
        }

        if config.google.spreadsheet_name.is_empty() {
            return Err(AppError::Config(
                "google.spreadsheet_name must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the default config file path
    pub fn config_file() -> Result<PathBuf> {
        Self::xdg_dirs()
            .get_config_file("config.toml")
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            google: GoogleConfig {
                spreadsheet_name: "Runs".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.google.spreadsheet_name, "Runs");
        assert_eq!(
            deserialized.runningahead.token_key,
            config.runningahead.token_key
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [google]
            spreadsheet_name = "Training Log"
            "#,
        )
        .unwrap();

        assert_eq!(config.google.spreadsheet_name, "Training Log");
        assert_eq!(config.google.timeout_secs, 20);
        assert_eq!(config.runningahead.timeout_secs, 20);
        assert_eq!(config.logging.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.logging.backups, 5);
    }

    #[test]
    fn test_workouts_url() {
        let config = RunningAheadConfig {
            api_base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.workouts_url(),
            "http://localhost:8080/rest/logs/me/workouts"
        );
        assert_eq!(
            RunningAheadConfig::default().workouts_url(),
            "https://api.runningahead.com/rest/logs/me/workouts"
        );
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[runningahead]\ntoken_key = \"my_account\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.runningahead.token_key, "my_account");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_load_rejects_empty_spreadsheet_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[google]\nspreadsheet_name = \"\"").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("spreadsheet_name"));
    }
}
