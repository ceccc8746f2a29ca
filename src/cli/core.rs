//! Core CLI dispatch, error types and shell context helpers.

use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use roomshare_config::{Config, ConfigError, ConfigManager};
use roomshare_core::{
    storage::{session_warnings, SessionStorage},
    CoreError,
};
use roomshare_storage_json::{JsonSessionStorage, StoragePaths};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::info;

use super::commands;
use super::formatting;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use crate::cli::shell_context::{CliMode, ShellContext};
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Opens the shell against the default application directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_app_dir(mode, utils::app_data_dir())
    }

    pub fn with_app_dir(mode: CliMode, app_dir: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(app_dir.clone())?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);

        let storage = open_storage(&app_dir, &config)?;
        let session = storage.load_session()?;
        info!(
            session_dir = %storage.session_dir().display(),
            expenses = session.expenses.len(),
            "session loaded"
        );

        let context = ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            app_dir,
            storage,
            config_manager,
            config,
            session,
            last_command: None,
            running: true,
        };
        context.report_session_warnings();
        Ok(context)
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn completion_table(&self) -> Vec<(&'static str, &'static [&'static str])> {
        self.registry.completion_table()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?", true).map_err(CliError::from)
    }

    /// Asks a yes/no question in interactive mode; scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, default)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(CoreError::Validation(message)) => {
                cli_io::print_error(format!("Invalid input: {}", message));
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn report_session_warnings(&self) {
        for warning in session_warnings(&self.session) {
            cli_io::print_warning(warning);
        }
    }

    /// Warns when two roster slots hold the same name.
    pub(crate) fn warn_roster_duplicates(&self) {
        for name in self.session.roster.duplicate_names() {
            cli_io::print_warning(format!(
                "Roommate name `{}` appears more than once; their balances are merged.",
                name
            ));
        }
    }

    pub(crate) fn persist_roster(&self) -> CommandResult {
        self.storage.save_roster(&self.session.roster)?;
        Ok(())
    }

    pub(crate) fn persist_expenses(&self) -> CommandResult {
        self.storage.save_expenses(&self.session.expenses)?;
        Ok(())
    }

    pub(crate) fn persist_settlements(&self) -> CommandResult {
        self.storage.save_settlements(&self.session.settlements)?;
        Ok(())
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Rebuilds storage after a path or retention change and reloads the session.
    pub(crate) fn reopen_storage(&mut self) -> CommandResult {
        self.storage = open_storage(&self.app_dir, &self.config)?;
        self.session = self.storage.load_session()?;
        info!(session_dir = %self.storage.session_dir().display(), "session storage reopened");
        self.report_session_warnings();
        Ok(())
    }

    pub(crate) fn format_amount(&self, amount: f64) -> String {
        formatting::format_amount(&self.config, amount)
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}

fn open_storage(app_dir: &Path, config: &Config) -> Result<JsonSessionStorage, CoreError> {
    let paths = StoragePaths {
        session_root: config.resolve_data_root(app_dir),
        backup_root: app_dir.join(utils::BACKUP_DIR),
    };
    JsonSessionStorage::with_retention(paths, config.backup_retention)
}

/// Parses a zero-based list index.
pub(crate) fn parse_index(input: &str) -> Result<usize, CommandError> {
    input.trim().parse::<usize>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid index `{}` (use 0, 1, 2, ...)", input))
    })
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid amount `{}`",
            input
        ))),
    }
}

/// Parses `YYYY-MM` into `(year, month)`.
pub(crate) fn parse_month(input: &str) -> Result<(i32, u32), CommandError> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map(|date| (date.year(), date.month()))
        .map_err(|_| {
            CommandError::InvalidArguments(format!("invalid month `{}` (use YYYY-MM)", input))
        })
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::Config(inner) => CliError::Config(inner),
            CommandError::Io(inner) => CliError::Io(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(app_dir: PathBuf, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_app_dir(CliMode::Script, app_dir)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}
