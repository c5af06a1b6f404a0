//! TOML config file under the XDG config directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "notify-lab";
const FILE_NAME: &str = "config.toml";

/// Config file at `$XDG_CONFIG_HOME/notify-lab/config.toml`.
///
/// A missing or blank file reads as an empty config. Saves go through a
/// sibling temp file and a rename, so readers never see a half-written file.
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_default();
        Self {
            path: base.join(APP_DIR).join(FILE_NAME),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(&self, content: &str) -> Result<AppConfig, ConfigError> {
        if content.trim().is_empty() {
            return Ok(AppConfig::empty());
        }
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", self.path.display(), e)))
    }

    fn render(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, e: std::io::Error) -> ConfigError {
        ConfigError::WriteError(format!("{}: {}", self.path.display(), e))
    }

    async fn ensure_parent(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(parent) if parent != Path::new("") => fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e)),
            _ => Ok(()),
        }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}", self.path.display());
                return Ok(AppConfig::empty());
            }
            Err(e) => {
                return Err(ConfigError::ReadError(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let config = self.parse(&content)?;
        log::debug!("loaded config from {}", self.path.display());
        Ok(config)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = Self::render(config)?;
        self.ensure_parent().await?;

        let temp = self.temp_path();
        fs::write(&temp, content)
            .await
            .map_err(|e| self.write_error(e))?;
        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(self.write_error(e));
        }
        log::debug!("saved config to {}", self.path.display());
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        let content = Self::render(&AppConfig::defaults())?;
        self.ensure_parent().await?;

        // create_new refuses an existing file without a separate check
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(ConfigError::AlreadyExists(
                    self.path.to_string_lossy().to_string(),
                ))
            }
            Err(e) => return Err(self.write_error(e)),
        };
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| self.write_error(e))?;
        file.flush().await.map_err(|e| self.write_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store_in(dir: &tempfile::TempDir) -> XdgConfigStore {
        XdgConfigStore::with_path(dir.path().join("config.toml"))
    }

    #[test]
    fn default_path_is_xdg() {
        let store = XdgConfigStore::new();
        let path = store.path();
        assert!(path.ends_with("notify-lab/config.toml"));
    }

    #[test]
    fn parse_with_progress_section() {
        let content = r#"
backend = "memory"
enabled = false
blocked_channels = ["channel_low", "channel_medium"]

[progress]
interval_ms = 50
"#;

        let config = XdgConfigStore::with_path("config.toml").parse(content).unwrap();
        assert_eq!(config.backend_or_default(), "memory");
        assert!(!config.enabled_or_default());
        assert_eq!(config.blocked_channels_or_default().len(), 2);
        assert_eq!(
            config.progress_interval_or_default(),
            Duration::from_millis(50)
        );
    }

    #[test]
    fn parse_error_names_the_file() {
        let store = XdgConfigStore::with_path("/etc/lab/config.toml");
        let err = store.parse("enabled = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("/etc/lab/config.toml"));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.exists());
        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }

    #[tokio::test]
    async fn blank_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "\n  \n").unwrap();
        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }

    #[tokio::test]
    async fn directory_in_place_of_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir(store.path()).unwrap();

        assert!(!store.exists());
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
        assert_eq!(store.load_or_empty().await, AppConfig::empty());
    }

    #[tokio::test]
    async fn save_replaces_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join("config.toml"));

        store
            .save(&AppConfig {
                title: Some("first".to_string()),
                ..AppConfig::empty()
            })
            .await
            .unwrap();
        store
            .save(&AppConfig {
                title: Some("second".to_string()),
                ..AppConfig::empty()
            })
            .await
            .unwrap();

        assert_eq!(store.load().await.unwrap().title.as_deref(), Some("second"));
        assert!(!store.temp_path().exists());
        let entries = std::fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join("config.toml"));

        store.init().await.unwrap();
        assert_eq!(store.load().await.unwrap(), AppConfig::defaults());

        let err = store.init().await.unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
        assert_eq!(store.load().await.unwrap(), AppConfig::defaults());
    }

    #[tokio::test]
    async fn malformed_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not = [valid").unwrap();

        assert!(store.load().await.is_err());
        assert_eq!(store.load_or_empty().await, AppConfig::empty());
    }
}
