use std::collections::HashMap;

use chrono::{Local, Utc};
use roomshare_core::{ExpenseDraft, SessionService, SummaryService};
use roomshare_domain::{Displayable, Expense};
use uuid::Uuid;

use crate::cli::core::{
    parse_amount, parse_index, parse_month, CommandError, CommandResult, ShellContext,
};
use crate::cli::formatting::format_timestamp;
use crate::cli::io;
use crate::cli::output::{line, section as output_section};
use crate::cli::registry::CommandEntry;

const USAGE: &str = "expense <add <description> <amount> <paid_by>|edit <index> <description> <amount> <paid_by>|remove <index>|list [YYYY-MM]>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Record, edit and list shared expenses",
        USAGE,
        cmd_expense,
    )
    .with_subcommands(&["add", "edit", "remove", "list"])]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_expenses(context, &[]);
    };

    match action.to_lowercase().as_str() {
        "add" => add_expense(context, rest),
        "edit" => edit_expense(context, rest),
        "remove" | "rm" => remove_expense(context, rest),
        "list" | "ls" => list_expenses(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown expense action `{}`; usage: {}",
            other, USAGE
        ))),
    }
}

fn parse_draft(args: &[&str]) -> Result<ExpenseDraft, CommandError> {
    match args {
        [description, amount, paid_by] => Ok(ExpenseDraft::new(
            *description,
            parse_amount(amount)?,
            *paid_by,
        )),
        _ => Err(CommandError::InvalidArguments(
            "expected <description> <amount> <paid_by>; quote descriptions with spaces".into(),
        )),
    }
}

fn expense_id_at(context: &ShellContext, raw_index: Option<&&str>) -> Result<Uuid, CommandError> {
    let raw_index = raw_index
        .ok_or_else(|| CommandError::InvalidArguments("missing expense index".into()))?;
    let index = parse_index(raw_index)?;
    context
        .session
        .expenses
        .get(index)
        .map(|expense| expense.id)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "no expense at index {} ({} recorded)",
                index,
                context.session.expenses.len()
            ))
        })
}

fn add_expense(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let draft = parse_draft(rest)?;
    let id = SessionService::add_expense(&mut context.session, draft, Utc::now())?;
    context.persist_expenses()?;
    if let Some(expense) = context.session.expense(id) {
        io::print_success(format!(
            "Expense `{}` added: {} paid by {}, split {} ways.",
            expense.description,
            context.format_amount(expense.amount),
            expense.paid_by,
            expense.participant_count
        ));
    }
    Ok(())
}

fn edit_expense(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let id = expense_id_at(context, rest.first())?;
    let draft = parse_draft(rest.get(1..).unwrap_or_default())?;
    SessionService::edit_expense(&mut context.session, id, draft)?;
    context.persist_expenses()?;
    io::print_success("Expense updated.");
    Ok(())
}

fn remove_expense(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let id = expense_id_at(context, rest.first())?;
    if !context.confirm("Remove this expense?", false)? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let removed = SessionService::remove_expense(&mut context.session, id)?;
    context.persist_expenses()?;
    io::print_success(format!("Removed expense {}.", removed.display_label()));
    Ok(())
}

fn list_expenses(context: &mut ShellContext, rest: &[&str]) -> CommandResult {
    let month = rest.first().map(|raw| parse_month(raw)).transpose()?;
    let expenses = &context.session.expenses;
    let visible: Vec<(usize, &Expense)> = match month {
        Some((year, month)) => {
            let in_month: Vec<Uuid> =
                SummaryService::expenses_in_month(expenses, year, month, &Local)
                    .into_iter()
                    .map(|expense| expense.id)
                    .collect();
            expenses
                .iter()
                .enumerate()
                .filter(|(_, expense)| in_month.contains(&expense.id))
                .collect()
        }
        None => expenses.iter().enumerate().collect(),
    };

    match month {
        Some((year, month)) => output_section(format!("Expenses for {:04}-{:02}", year, month)),
        None => output_section("Expenses"),
    }
    if visible.is_empty() {
        io::print_info("No expenses recorded.");
        return Ok(());
    }

    let skipped: HashMap<usize, String> = SessionService::balances(&context.session)
        .skipped
        .into_iter()
        .map(|skip| (skip.index, skip.issue.to_string()))
        .collect();

    let mut total = 0.0;
    for (index, expense) in &visible {
        total += expense.amount;
        let mut row = format!(
            "  [{}] {}  {:<20} {:>14}  paid by {:<12} split {}",
            index,
            format_timestamp(&expense.created_at),
            expense.description,
            context.format_amount(expense.amount),
            expense.paid_by,
            expense.participant_count
        );
        if let Some(issue) = skipped.get(index) {
            row.push_str(&format!("  (ignored: {})", issue));
        }
        line(row);
    }
    io::print_info(format!(
        "{} expense(s), total {}.",
        visible.len(),
        context.format_amount(total)
    ));
    Ok(())
}
