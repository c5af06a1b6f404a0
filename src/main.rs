//! notify-lab CLI entry point

use std::process::ExitCode;

use clap::Parser;

use notify_lab::cli::{
    app::{
        console_from_cli, run_category, run_importance, run_progress, run_send, run_status,
        SendOptions, EXIT_ERROR, EXIT_USAGE_ERROR,
    },
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_logger,
    presenter::Presenter,
    shell::run_shell,
};
use notify_lab::domain::config::AppConfig;
use notify_lab::domain::error::ConfigError;
use notify_lab::infrastructure::{NotificationBackend, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let presenter = Presenter::new();

    // Config commands work on the file alone
    let command = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            return match handle_config_command(action, &store, &presenter).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e @ ConfigError::ValidationError { .. }) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_USAGE_ERROR)
                }
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_ERROR)
                }
            };
        }
        other => other,
    };

    // Build CLI config from args; NOTIFY_LAB_BACKEND arrives through clap
    let cli_config = AppConfig {
        backend: cli
            .backend
            .map(|b| NotificationBackend::from(b).to_string()),
        ..AppConfig::empty()
    };

    let console = match console_from_cli(cli_config).await {
        Ok(console) => console,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    match command {
        Commands::Send {
            title,
            message,
            importance,
            category,
        } => {
            let options = SendOptions {
                title,
                message,
                importance: importance.into(),
                category: category.map(Into::into),
            };
            run_send(&console, options).await
        }
        Commands::Importance { level } => run_importance(&console, level.into()).await,
        Commands::Category { category } => run_category(&console, category.into()).await,
        Commands::Progress => run_progress(&console).await,
        Commands::Status { json } => run_status(&console, json).await,
        Commands::Shell | Commands::Config { .. } => run_shell(&console).await,
    }
}
