use crate::error::{Result, SpamError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Fail on malformed rows and unknown labels instead of dropping them
    pub strict: bool,
    pub test_size: f64,
    pub seed: u64,
    pub preview_rows: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub max_features: usize,
    pub max_iter: usize,
    /// Inverse L2 regularisation strength
    pub c: f64,
    pub tolerance: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8501".to_string(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mail_data.csv"),
            strict: false,
            test_size: 0.2,
            seed: 42,
            preview_rows: 10,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            max_iter: 1000,
            c: 1.0,
            tolerance: 1e-4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dataset: DatasetConfig::default(),
            model: ModelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| SpamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let test_size = self.dataset.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(SpamError::Config(format!(
                "dataset.test_size must be in (0, 1), got {}",
                test_size
            )));
        }
        if self.model.max_features == 0 {
            return Err(SpamError::Config("model.max_features must be > 0".to_string()));
        }
        if self.model.max_iter == 0 {
            return Err(SpamError::Config("model.max_iter must be > 0".to_string()));
        }
        if !(self.model.c > 0.0) {
            return Err(SpamError::Config("model.c must be > 0".to_string()));
        }
        if !(self.model.tolerance > 0.0) {
            return Err(SpamError::Config("model.tolerance must be > 0".to_string()));
        }
        match self.logging.format.as_str() {
            "pretty" | "json" | "compact" => Ok(()),
            other => Err(SpamError::Config(format!(
                "logging.format must be pretty, json or compact, got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dataset.path, PathBuf::from("mail_data.csv"));
        assert_eq!(config.model.max_features, 5000);
        assert_eq!(config.model.max_iter, 1000);
        assert_eq!(config.dataset.preview_rows, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dataset]\npath = \"data/emails.csv\"\nstrict = true").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/emails.csv"));
        assert!(config.dataset.strict);
        assert_eq!(config.dataset.seed, 42);
        assert_eq!(config.server.listen_addr, "127.0.0.1:8501");
    }

    #[test]
    fn test_invalid_test_size_rejected() {
        let mut config = Config::default();
        config.dataset.test_size = 1.0;
        assert!(matches!(config.validate(), Err(SpamError::Config(_))));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/nonexistent/spam-rs.toml").unwrap();
        assert_eq!(config.model.c, 1.0);
    }
}
