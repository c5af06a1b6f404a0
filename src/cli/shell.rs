//! Interactive shell
//!
//! One command per line on stdin. Each command maps to a console action;
//! a progress session keeps running in the background while the shell
//! reads further commands.

use std::fmt;
use std::process::ExitCode;
use std::str::FromStr;

use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::application::ProgressOutcome;
use crate::domain::notification::{Category, ImportanceLevel};

use super::app::{DynConsole, EXIT_ERROR, EXIT_SUCCESS};
use super::presenter::Presenter;

const HELP: &str = "\
Commands:
  send                       post with the current title, message, importance and category
  send importance <level>    post the sample for urgent|high|medium|low
  send category <category>   post the sample for a category
  importance <level>         select the importance used by `send`
  category <category|none>   select the category used by `send`
  title <text>               set the custom title
  message <text>             set the custom message
  progress                   start the simulated download
  cancel-all                 remove every notification and stop progress
  status                     show permission and channel status
  state                      show the current selection
  help                       show this help
  quit                       leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Quit,
    State,
    Status,
    Send,
    SendImportance(ImportanceLevel),
    SendCategory(Category),
    SelectImportance(ImportanceLevel),
    SelectCategory(Option<Category>),
    Title(String),
    Message(String),
    Progress,
    CancelAll,
}

/// Error returned for a line the shell does not understand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShellError(String);

impl fmt::Display for ParseShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseShellError {}

fn usage(text: &str) -> ParseShellError {
    ParseShellError(format!("usage: {}", text))
}

fn parse_importance(value: &str) -> Result<ImportanceLevel, ParseShellError> {
    value.parse().map_err(|e| ParseShellError(format!("{}", e)))
}

fn parse_category(value: &str) -> Result<Category, ParseShellError> {
    value.parse().map_err(|e| ParseShellError(format!("{}", e)))
}

impl FromStr for ShellCommand {
    type Err = ParseShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "state" => Ok(Self::State),
            "status" => Ok(Self::Status),
            "progress" => Ok(Self::Progress),
            "cancel-all" => Ok(Self::CancelAll),
            "send" => {
                if rest.is_empty() {
                    return Ok(Self::Send);
                }
                match rest.split_once(char::is_whitespace) {
                    Some(("importance", level)) => {
                        Ok(Self::SendImportance(parse_importance(level.trim())?))
                    }
                    Some(("category", category)) => {
                        Ok(Self::SendCategory(parse_category(category.trim())?))
                    }
                    _ => Err(usage("send [importance <level> | category <category>]")),
                }
            }
            "importance" if !rest.is_empty() => Ok(Self::SelectImportance(parse_importance(rest)?)),
            "importance" => Err(usage("importance <level>")),
            "category" if rest.eq_ignore_ascii_case("none") => Ok(Self::SelectCategory(None)),
            "category" if !rest.is_empty() => {
                Ok(Self::SelectCategory(Some(parse_category(rest)?)))
            }
            "category" => Err(usage("category <category|none>")),
            "title" if !rest.is_empty() => Ok(Self::Title(rest.to_string())),
            "title" => Err(usage("title <text>")),
            "message" if !rest.is_empty() => Ok(Self::Message(rest.to_string())),
            "message" => Err(usage("message <text>")),
            other => Err(ParseShellError(format!(
                "unknown command '{}', type 'help' for a list",
                other
            ))),
        }
    }
}

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the shell until `quit` or end of input
pub async fn run_shell(console: &DynConsole) -> ExitCode {
    let presenter = Presenter::new();
    presenter.info("notify-lab shell, type 'help' for commands");
    if !console.state().notifications_enabled {
        presenter.warn("Notifications are disabled; nothing will be shown");
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        presenter.prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                presenter.error(&format!("failed to read input: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ShellCommand>() {
            Ok(command) => {
                if execute(console, &presenter, command).await == Flow::Quit {
                    break;
                }
            }
            Err(e) => presenter.error(&e.to_string()),
        }
    }

    console.cancel_all().await;
    ExitCode::from(EXIT_SUCCESS)
}

async fn execute(console: &DynConsole, presenter: &Presenter, command: ShellCommand) -> Flow {
    let posted = match command {
        ShellCommand::Help => {
            presenter.output(HELP);
            return Flow::Continue;
        }
        ShellCommand::Quit => return Flow::Quit,
        ShellCommand::State => {
            presenter.state(&console.state());
            return Flow::Continue;
        }
        ShellCommand::Status => {
            presenter.enabled(console.check_notification_status().await);
            presenter.channels(&console.channel_statuses().await);
            return Flow::Continue;
        }
        ShellCommand::SelectImportance(level) => {
            console.select_importance(level);
            return Flow::Continue;
        }
        ShellCommand::SelectCategory(category) => {
            console.select_category(category);
            return Flow::Continue;
        }
        ShellCommand::Title(title) => {
            console.set_title(title);
            return Flow::Continue;
        }
        ShellCommand::Message(message) => {
            console.set_message(message);
            return Flow::Continue;
        }
        ShellCommand::CancelAll => {
            console.cancel_all().await;
            presenter.success("All notifications cancelled");
            return Flow::Continue;
        }
        ShellCommand::Progress => {
            start_progress(console, presenter).await;
            return Flow::Continue;
        }
        ShellCommand::Send => console.send_custom().await,
        ShellCommand::SendImportance(level) => console.send_by_importance(level).await,
        ShellCommand::SendCategory(category) => console.send_by_category(category).await,
    };

    match posted {
        Ok(id) => presenter.success(&format!("Posted {}", id)),
        Err(e) => presenter.error(&e.to_string()),
    }
    Flow::Continue
}

async fn start_progress(console: &DynConsole, presenter: &Presenter) {
    match console.start_progress().await {
        Ok(Some(run)) => {
            presenter.info(&format!("Progress started on {}", run.id));
            let id = run.id;
            tokio::spawn(async move {
                let presenter = Presenter::new();
                match run.wait().await {
                    ProgressOutcome::Completed => {
                        presenter.success(&format!("Progress on {} complete", id))
                    }
                    ProgressOutcome::Cancelled => {
                        presenter.warn(&format!("Progress on {} cancelled", id))
                    }
                }
            });
        }
        Ok(None) => presenter.warn("A progress session is already running"),
        Err(e) => presenter.error(&e.to_string()),
    }
}
