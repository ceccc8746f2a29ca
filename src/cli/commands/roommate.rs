use roomshare_core::SessionService;

use crate::cli::core::{parse_index, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section as output_section};
use crate::cli::registry::CommandEntry;

const USAGE: &str = "roommate <add [name]|set <index> <name>|remove <index>|list>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "roommate",
        "Manage the roster of roommates",
        USAGE,
        cmd_roommate,
    )
    .with_subcommands(&["add", "set", "remove", "list"])]
}

fn cmd_roommate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_roommates(context);
    };

    match action.to_lowercase().as_str() {
        "add" => add_roommate(context, rest),
        "set" => set_roommate(context, rest),
        "remove" | "rm" => remove_roommate(context, rest),
        "list" | "ls" => list_roommates(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown roommate action `{}`; usage: {}",
            other, USAGE
        ))),
    }
}

fn add_roommate(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let name = rest.join(" ");
    let index = SessionService::add_roommate(&mut context.session, name.as_str());
    context.persist_roster()?;
    if name.trim().is_empty() {
        io::print_success(format!("Blank roommate slot [{}] added.", index));
    } else {
        io::print_success(format!("Roommate `{}` added at [{}].", name.trim(), index));
    }
    context.warn_roster_duplicates();
    Ok(())
}

fn set_roommate(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let Some((index, name)) = rest.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: roommate set <index> <name>".into(),
        ));
    };
    let index = parse_index(index)?;
    let name = name.join(" ");
    SessionService::set_roommate(&mut context.session, index, name.as_str())?;
    context.persist_roster()?;
    if name.trim().is_empty() {
        io::print_success(format!("Roommate slot [{}] cleared.", index));
    } else {
        io::print_success(format!("Roommate slot [{}] set to `{}`.", index, name.trim()));
    }
    context.warn_roster_duplicates();
    Ok(())
}

fn remove_roommate(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let index = rest.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: roommate remove <index>".into())
    })?;
    let index = parse_index(index)?;
    let removed = SessionService::remove_roommate(&mut context.session, index)?;
    context.persist_roster()?;
    let label = if removed.trim().is_empty() {
        "blank slot".to_string()
    } else {
        format!("`{}`", removed)
    };
    io::print_success(format!("Removed {} from [{}].", label, index));
    let still_paying = context.session.expenses.iter().any(|e| e.paid_by == removed);
    if !removed.trim().is_empty() && still_paying {
        io::print_warning(format!(
            "`{}` still appears as a payer; those expenses keep counting toward balances.",
            removed
        ));
    }
    let narrowed = SessionService::balances(&context.session).narrowed.len();
    if narrowed > 0 {
        io::print_hint(format!(
            "{} expense(s) recorded for more people are now shared among the remaining roommates.",
            narrowed
        ));
    }
    Ok(())
}

fn list_roommates(context: &mut ShellContext) -> CommandResult {
    let roster = &context.session.roster;
    output_section("Roommates");
    if roster.slots().is_empty() {
        io::print_info("Roster is empty. Use `roommate add <name>`.");
        return Ok(());
    }
    for (index, slot) in roster.slots().iter().enumerate() {
        if slot.trim().is_empty() {
            line(format!("  [{}] (blank)", index));
        } else {
            line(format!("  [{}] {}", index, slot));
        }
    }
    io::print_info(format!(
        "{} active of {} slots.",
        roster.active_len(),
        roster.slots().len()
    ));
    context.warn_roster_duplicates();
    Ok(())
}
