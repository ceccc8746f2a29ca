use roomshare_core::{storage::SessionStorage, CoreError};

use crate::cli::core::{parse_index, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section as output_section};
use crate::cli::registry::CommandEntry;

const USAGE: &str = "backup <create [note]|list|restore <index>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "backup",
        "Snapshot the session or restore an earlier snapshot",
        USAGE,
        cmd_backup,
    )
    .with_subcommands(&["create", "list", "restore"])]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_backups(context);
    };

    match action.to_lowercase().as_str() {
        "create" => create_backup(context, rest),
        "list" | "ls" => list_backups(context),
        "restore" => restore_backup(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown backup action `{}`; usage: {}",
            other, USAGE
        ))),
    }
}

fn create_backup(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let note = rest.join(" ");
    let note = (!note.trim().is_empty()).then_some(note.trim());
    let info = context.storage.backup_session(&context.session, note)?;
    io::print_success(format!("Backup `{}` created.", info.id));
    Ok(())
}

fn list_backups(context: &mut ShellContext) -> CommandResult {
    let backups = context.storage.list_backups()?;
    output_section("Backups");
    if backups.is_empty() {
        io::print_info("No backups found. Use `backup create [note]`.");
        return Ok(());
    }
    for (index, backup) in backups.iter().enumerate() {
        line(format!("  [{}] {}  ({})", index, backup.id, backup.created_at));
    }
    io::print_info(format!(
        "Keeping the newest {} backup(s).",
        context.config.backup_retention
    ));
    Ok(())
}

fn restore_backup(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let raw = rest.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: backup restore <index>".into())
    })?;
    let index = parse_index(raw)?;
    let backup = context
        .storage
        .list_backups()?
        .into_iter()
        .nth(index)
        .ok_or_else(|| CoreError::BackupNotFound(format!("index {}", index)))?;

    if !context.confirm(
        &format!("Replace the current session with `{}`?", backup.id),
        false,
    )? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    context.session = context.storage.restore_backup(&backup)?;
    io::print_success(format!("Session restored from `{}`.", backup.id));
    context.report_session_warnings();
    Ok(())
}
