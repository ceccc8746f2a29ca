use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use roomshare_config::{Config, ConfigManager};
use roomshare_domain::Session;
use roomshare_storage_json::JsonSessionStorage;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Mutable state shared by every shell command.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub app_dir: PathBuf,
    pub storage: JsonSessionStorage,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub session: Session,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn prompt(&self) -> String {
        match self.session.roster.active_len() {
            0 => "roomshare> ".to_string(),
            1 => "roomshare [1 roommate]> ".to_string(),
            count => format!("roomshare [{count} roommates]> "),
        }
    }

    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, expenses: {}, settlements: {} }}",
            self.running,
            self.last_command,
            self.session.expenses.len(),
            self.session.settlements.len()
        )
    }
}
