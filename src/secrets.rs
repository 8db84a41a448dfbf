use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// Named secrets read once from a local JSON object file.
#[derive(Debug, Clone)]
pub struct Secrets {
    values: HashMap<String, String>,
}

impl Secrets {
    #[instrument(name = "Loading secrets", skip_all, fields(path = ?path))]
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read secrets file {:?}: {}", path, e))
        })?;
        let secrets = Self::from_json(&contents)?;
        debug!(count = secrets.values.len(), "Loaded secrets");

        Ok(secrets)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let values: HashMap<String, String> = serde_json::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse secrets file: {}", e)))?;

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AppError::MissingSecret(name.to_string()))
    }
}
