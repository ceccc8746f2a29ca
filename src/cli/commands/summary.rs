use chrono::Local;
use roomshare_core::SummaryService;

use crate::cli::core::{parse_month, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section as output_section, separator};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Totals, per-person shares and balances, optionally for one month",
        "summary [YYYY-MM]",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = args.first().map(|raw| parse_month(raw)).transpose()?;
    let session = &context.session;

    let summary = match month {
        Some((year, month)) => {
            output_section(format!("Summary for {:04}-{:02}", year, month));
            SummaryService::summarize_month(session, year, month, &Local)
        }
        None => {
            output_section("Summary");
            SummaryService::summarize_session(session)
        }
    };

    io::print_info(format!(
        "{} expense(s), total spent {}.",
        summary.expense_count,
        context.format_amount(summary.total_spent)
    ));
    if summary.expense_count == 0 {
        return Ok(());
    }

    line("  Share of expenses:");
    for (name, share) in summary.shares.iter() {
        line(format!("    {:<16} {:>14}", name, context.format_amount(share)));
    }

    line("  Balances:");
    for (name, balance) in summary.balances.iter() {
        line(format!("    {:<16} {:>14}", name, context.format_amount(balance)));
    }

    separator();
    if summary.pending.is_empty() {
        io::print_success("No transfers needed.");
    } else {
        for instruction in &summary.pending {
            line(format!(
                "  {} pays {} {}",
                instruction.from,
                instruction.to,
                context.format_amount(instruction.amount)
            ));
        }
    }
    if !summary.skipped.is_empty() {
        io::print_warning(format!(
            "{} expense(s) ignored as incomplete; see `expense list`.",
            summary.skipped.len()
        ));
    }
    if !summary.narrowed.is_empty() {
        io::print_warning(format!(
            "{} expense(s) shared among fewer roommates than recorded.",
            summary.narrowed.len()
        ));
    }
    Ok(())
}
