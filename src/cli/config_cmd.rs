//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ProgressConfig};
use crate::domain::error::ConfigError;
use crate::domain::notification::{ImportanceLevel, ALL_IMPORTANCE_LEVELS};
use crate::infrastructure::NotificationBackend;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` and store it under `key`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "app_name" => {
            let name = value.trim();
            if name.is_empty() {
                return Err(invalid(key, "Value must not be empty"));
            }
            config.app_name = Some(name.to_string());
        }
        "backend" => {
            let backend = value
                .parse::<NotificationBackend>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.backend = Some(backend.to_string());
        }
        "enabled" => {
            config.enabled = Some(
                parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))?,
            );
        }
        "blocked_channels" => config.blocked_channels = Some(parse_channel_list(key, value)?),
        "title" => config.title = Some(value.to_string()),
        "message" => config.message = Some(value.to_string()),
        "progress.interval_ms" => {
            let ms = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid(key, "Value must be a whole number of milliseconds"))?;
            config
                .progress
                .get_or_insert_with(ProgressConfig::default)
                .interval_ms = Some(ms);
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

/// Current value of `key` formatted for display
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "app_name" => config.app_name.clone(),
        "backend" => config.backend.clone(),
        "enabled" => config.enabled.map(|b| b.to_string()),
        "blocked_channels" => config.blocked_channels.as_ref().map(|c| c.join(",")),
        "title" => config.title.clone(),
        "message" => config.message.clone(),
        "progress.interval_ms" => config
            .progress
            .as_ref()
            .and_then(|p| p.interval_ms)
            .map(|ms| ms.to_string()),
        _ => None,
    }
}

/// Parse a comma-separated list of channel ids. Empty input clears the list.
fn parse_channel_list(key: &str, value: &str) -> Result<Vec<String>, ConfigError> {
    let mut channels = Vec::new();
    for raw in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if ImportanceLevel::from_channel_id(raw).is_none() {
            let valid: Vec<&str> = ALL_IMPORTANCE_LEVELS
                .iter()
                .map(|l| l.channel_id())
                .collect();
            return Err(invalid(
                key,
                format!("Unknown channel '{}'. Valid channels: {}", raw, valid.join(", ")),
            ));
        }
        if !channels.iter().any(|c| c == raw) {
            channels.push(raw.to_string());
        }
    }
    Ok(channels)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("NO"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn backend_is_normalised() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "backend", "Notify-Send").unwrap();
        assert_eq!(config.backend.as_deref(), Some("notify-send"));
        assert!(apply_value(&mut config, "backend", "fax").is_err());
    }

    #[test]
    fn channel_list_is_validated() {
        assert_eq!(
            parse_channel_list("blocked_channels", "channel_low, channel_high,channel_low")
                .unwrap(),
            vec!["channel_low".to_string(), "channel_high".to_string()]
        );
        assert!(parse_channel_list("blocked_channels", "").unwrap().is_empty());
        assert!(parse_channel_list("blocked_channels", "channel_loud").is_err());
    }

    #[test]
    fn interval_must_be_numeric() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "progress.interval_ms", "50").unwrap();
        assert_eq!(read_value(&config, "progress.interval_ms").as_deref(), Some("50"));
        assert!(apply_value(&mut config, "progress.interval_ms", "fast").is_err());
    }

    #[test]
    fn empty_app_name_rejected() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "app_name", "  ").is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        let err = check_key("api_key").unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[tokio::test]
    async fn set_then_get_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "enabled".to_string(),
                value: "no".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.enabled, Some(false));
        assert_eq!(config.backend, None);
    }
}
