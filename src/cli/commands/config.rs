use roomshare_config::Config;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section as output_section};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )
    .with_subcommands(&["show", "set"])]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [action] if action.eq_ignore_ascii_case("show") => show_config(context),
        [action, key, value @ ..] if action.eq_ignore_ascii_case("set") && !value.is_empty() => {
            set_config_value(context, key, &value.join(" "))
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config set <{}> <value>",
            Config::KEYS.join("|")
        ))),
    }
}

fn show_config(context: &mut ShellContext) -> CommandResult {
    output_section("Configuration");
    for key in Config::KEYS {
        let value = context.config.get(key).unwrap_or_default();
        line(format!("  {:<18} {}", key, value));
    }
    io::print_info(format!(
        "Stored at {}",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let key = key.to_ascii_lowercase();
    context.config.set(&key, value)?;
    context.persist_config()?;
    io::apply_config(&context.config);

    if matches!(key.as_str(), "data_root" | "backup_retention") {
        context.reopen_storage()?;
    }

    let shown = context.config.get(&key).unwrap_or_default();
    io::print_success(format!("`{}` set to `{}`.", key, shown));
    Ok(())
}
