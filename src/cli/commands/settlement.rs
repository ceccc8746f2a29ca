use chrono::Utc;
use roomshare_core::{SessionService, SummaryService, EPSILON};
use roomshare_domain::SettlementRecord;

use crate::cli::core::{parse_index, CommandError, CommandResult, ShellContext};
use crate::cli::formatting::format_timestamp;
use crate::cli::io;
use crate::cli::output::{line, section as output_section};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "balances",
            "Show what each roommate owes or is owed",
            "balances",
            cmd_balances,
        ),
        CommandEntry::new(
            "settlements",
            "List the transfers that would settle every balance",
            "settlements",
            cmd_settlements,
        ),
        CommandEntry::new(
            "settle",
            "Record a pending settlement as paid",
            "settle <index|all>",
            cmd_settle,
        )
        .with_subcommands(&["all"]),
        CommandEntry::new(
            "history",
            "Show recorded settlements",
            "history",
            cmd_history,
        ),
    ]
}

fn cmd_balances(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = SessionService::balances(&context.session);
    output_section("Balances");
    if report.balances.is_empty() {
        io::print_info("No balances yet. Add roommates and expenses first.");
        return Ok(());
    }

    for (name, balance) in report.balances.iter() {
        let status = if balance > EPSILON {
            "is owed"
        } else if balance < -EPSILON {
            "owes"
        } else {
            "settled"
        };
        line(format!(
            "  {:<16} {:>14}  {}",
            name,
            context.format_amount(balance),
            status
        ));
    }
    for skip in &report.skipped {
        io::print_warning(format!("Expense [{}] ignored: {}.", skip.index, skip.issue));
    }
    for narrow in &report.narrowed {
        io::print_warning(format!(
            "Expense [{}] was split {} ways; now shared by the {} remaining roommate(s).",
            narrow.index, narrow.participant_count, narrow.covered
        ));
    }
    Ok(())
}

fn cmd_settlements(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let pending = SessionService::pending_settlements(&context.session);
    output_section("Pending settlements");
    if pending.is_empty() {
        io::print_success("Everyone is settled up.");
        return Ok(());
    }
    for (index, instruction) in pending.iter().enumerate() {
        line(format!(
            "  [{}] {} pays {} {}",
            index,
            instruction.from,
            instruction.to,
            context.format_amount(instruction.amount)
        ));
    }
    io::print_info("Use `settle <index>` or `settle all` once paid.");
    Ok(())
}

fn cmd_settle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: settle <index|all>".into()))?;

    let recorded: Vec<SettlementRecord> = if target.eq_ignore_ascii_case("all") {
        SessionService::settle_all(&mut context.session, Utc::now())
    } else {
        let index = parse_index(target)?;
        vec![SessionService::settle_pending(
            &mut context.session,
            index,
            Utc::now(),
        )?]
    };

    if recorded.is_empty() {
        io::print_info("Nothing to settle.");
        return Ok(());
    }
    context.persist_settlements()?;
    for record in &recorded {
        io::print_success(format!(
            "Recorded: {} paid {} {}.",
            record.from,
            record.to,
            context.format_amount(record.amount)
        ));
    }

    if SessionService::pending_settlements(&context.session).is_empty() {
        io::print_success("Everyone is settled up.");
    }
    Ok(())
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Settlement history");
    let history = &context.session.settlements;
    if history.is_empty() {
        io::print_info("No settlements recorded.");
        return Ok(());
    }
    for (index, record) in history.iter().enumerate() {
        line(format!(
            "  [{}] {}  {} -> {} {} ({})",
            index,
            format_timestamp(&record.timestamp),
            record.from,
            record.to,
            context.format_amount(record.amount),
            record.status
        ));
    }
    io::print_info(format!(
        "{} settlement(s), {} transferred in total.",
        history.len(),
        context.format_amount(SummaryService::total_amount(history))
    ));
    Ok(())
}
