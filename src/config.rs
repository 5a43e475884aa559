use crate::error::{OrganicAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// モック解析サービスの応答遅延
    pub analysis_delay_ms: u64,
    /// 解析サービスのタイムアウト
    pub timeout_seconds: u64,
    /// モック解析サービスが返すJSONペイロード（未指定なら既定の結果）
    pub fixture_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 2500,
            timeout_seconds: 30,
            fixture_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OrganicAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("organic-ai").join("config.json"))
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(OrganicAiError::Config("timeout_seconds は1以上を指定してください".into()));
        }
        if let Some(path) = &self.fixture_path {
            if !path.exists() {
                return Err(OrganicAiError::FileNotFound(path.display().to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis_delay(), Duration::from_millis(2500));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.fixture_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.analysis_delay_ms, 2500);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            analysis_delay_ms: 10,
            timeout_seconds: 5,
            fixture_path: None,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.analysis_delay_ms, 10);
        assert_eq!(loaded.timeout_seconds, 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeout_seconds": 7}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timeout_seconds, 7);
        assert_eq!(config.analysis_delay_ms, 2500);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config { timeout_seconds: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(OrganicAiError::Config(_))));
    }

    #[test]
    fn test_validate_missing_fixture() {
        let config = Config {
            fixture_path: Some(PathBuf::from("/nonexistent/fixture.json")),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(OrganicAiError::FileNotFound(_))));
    }
}
