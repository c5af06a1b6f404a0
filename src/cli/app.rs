//! Command runners

use std::process::ExitCode;
use std::sync::Arc;

use serde_json::json;

use crate::application::ports::{ConfigStore, NotificationService};
use crate::application::{
    ConsoleState, NotificationConsole, NotificationDispatcher, ProgressOutcome,
};
use crate::domain::config::AppConfig;
use crate::domain::notification::{Category, ImportanceLevel};
use crate::infrastructure::{create_notification_service, XdgConfigStore};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Console over whichever backend the config selects
pub type DynConsole = NotificationConsole<Box<dyn NotificationService>>;

/// Options for the `send` command
#[derive(Debug, Clone)]
pub struct SendOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    pub importance: ImportanceLevel,
    pub category: Option<Category>,
}

/// Load and merge configuration from file and CLI (env is folded into CLI by clap)
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < env/cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Build the console for `config`, registering channels with the host
pub async fn build_console(config: &AppConfig) -> Result<DynConsole, String> {
    let service = create_notification_service(config).map_err(|e| e.to_string())?;
    let dispatcher = Arc::new(NotificationDispatcher::new(service).await);
    Ok(NotificationConsole::new(
        dispatcher,
        ConsoleState::from_config(config),
        config.progress_interval_or_default(),
    )
    .await)
}

/// Load config from the default store and build the console
pub async fn console_from_cli(cli_config: AppConfig) -> Result<DynConsole, String> {
    let config = load_merged_config(&XdgConfigStore::new(), cli_config).await;
    build_console(&config).await
}

fn warn_if_disabled(console: &DynConsole, presenter: &Presenter) {
    if !console.state().notifications_enabled {
        presenter.warn("Notifications are disabled; nothing will be shown");
    }
}

/// Post a notification with custom text
pub async fn run_send(console: &DynConsole, options: SendOptions) -> ExitCode {
    let presenter = Presenter::new();
    warn_if_disabled(console, &presenter);

    if let Some(title) = options.title {
        console.set_title(title);
    }
    if let Some(message) = options.message {
        console.set_message(message);
    }
    console.select_importance(options.importance);
    console.select_category(options.category);

    match console.send_custom().await {
        Ok(id) => {
            presenter.success(&format!(
                "Posted {} on {}",
                id,
                options.importance.channel_id()
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Post the sample notification of an importance level
pub async fn run_importance(console: &DynConsole, level: ImportanceLevel) -> ExitCode {
    let presenter = Presenter::new();
    warn_if_disabled(console, &presenter);

    match console.send_by_importance(level).await {
        Ok(id) => {
            presenter.success(&format!("Posted {} ({})", id, level.description()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Post the sample notification of a category
pub async fn run_category(console: &DynConsole, category: Category) -> ExitCode {
    let presenter = Presenter::new();
    warn_if_disabled(console, &presenter);

    match console.send_by_category(category).await {
        Ok(id) => {
            presenter.success(&format!("Posted {} tagged {}", id, category.tag()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run a simulated download to completion. Ctrl-C cancels everything.
pub async fn run_progress(console: &DynConsole) -> ExitCode {
    let mut presenter = Presenter::new();
    warn_if_disabled(console, &presenter);

    let run = match console.start_progress().await {
        Ok(Some(run)) => run,
        Ok(None) => {
            presenter.warn("A progress session is already running");
            return ExitCode::from(EXIT_SUCCESS);
        }
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.start_progress("Downloading...");
    let mut updates = console.subscribe();
    let mut run = run;

    let outcome = loop {
        tokio::select! {
            result = &mut run.handle => {
                break result.unwrap_or(ProgressOutcome::Cancelled);
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    continue;
                }
                let percent = updates.borrow_and_update().progress_percent;
                presenter.update_progress(percent, &format!("{}%", percent));
            }
            _ = tokio::signal::ctrl_c() => {
                console.cancel_all().await;
            }
        }
    };

    match outcome {
        ProgressOutcome::Completed => {
            presenter.progress_success("Download Complete");
            ExitCode::from(EXIT_SUCCESS)
        }
        ProgressOutcome::Cancelled => {
            presenter.progress_fail("Cancelled");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print permission and channel status
pub async fn run_status(console: &DynConsole, as_json: bool) -> ExitCode {
    let presenter = Presenter::new();
    let enabled = console.check_notification_status().await;
    let channels = console.channel_statuses().await;

    if as_json {
        let body = json!({
            "notifications_enabled": enabled,
            "channels": channels,
        });
        match serde_json::to_string_pretty(&body) {
            Ok(text) => presenter.output(&text),
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        presenter.enabled(enabled);
        presenter.channels(&channels);
    }

    ExitCode::from(EXIT_SUCCESS)
}
