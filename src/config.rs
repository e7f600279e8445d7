use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

fn default_dataset_path() -> String {
    "merged_clean_ready.csv".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { path: default_dataset_path() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_top_states")]
    pub top_states: usize,
    #[serde(default = "default_top_institutions")]
    pub top_institutions: usize,
    /// Character budget for institution labels; longer names get a
    /// trailing ellipsis (display only).
    #[serde(default = "default_label_max_chars")]
    pub label_max_chars: usize,
}

fn default_top_states() -> usize { 10 }
fn default_top_institutions() -> usize { 15 }
fn default_label_max_chars() -> usize { 55 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_states: default_top_states(),
            top_institutions: default_top_institutions(),
            label_max_chars: default_label_max_chars(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_file() -> String { "grantboard.log".to_string() }
fn default_log_filter() -> String { "grantboard=info".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self { file: default_log_file(), filter: default_log_filter() }
    }
}

impl Config {
    /// Load config.toml. A missing file means defaults (the tool runs with
    /// zero setup); a file that exists but does not parse is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read config file: {}", path.display()))
            }
        };
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config TOML: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_config_parses() {
        let config = Config::load(Path::new("config.toml")).unwrap();
        assert_eq!(config.dataset.path, "merged_clean_ready.csv");
        assert_eq!(config.display.top_states, 10);
        assert_eq!(config.display.top_institutions, 15);
        assert_eq!(config.display.label_max_chars, 55);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("no-such-config.toml")).unwrap();
        assert_eq!(config.dataset.path, "merged_clean_ready.csv");
        assert_eq!(config.log.filter, "grantboard=info");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[display]\ntop_states = 5\n").unwrap();
        assert_eq!(config.display.top_states, 5);
        assert_eq!(config.display.top_institutions, 15);
        assert_eq!(config.dataset.path, "merged_clean_ready.csv");
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display\ntop_states = ").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
