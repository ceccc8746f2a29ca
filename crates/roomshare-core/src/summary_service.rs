//! Read-only totals and filtered views over a session.

use chrono::{Datelike, TimeZone};

use roomshare_domain::{
    Amounted, BalanceSheet, Expense, Roster, Session, SettlementInstruction, SettlementRecord,
};

use crate::{BalanceEngine, NarrowedSplit, SettlementPlanner, SkippedExpense};

/// Aggregate view rendered by summary screens.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub expense_count: usize,
    pub total_spent: f64,
    pub shares: BalanceSheet,
    pub balances: BalanceSheet,
    pub pending: Vec<SettlementInstruction>,
    pub skipped: Vec<SkippedExpense>,
    pub narrowed: Vec<NarrowedSplit>,
}

pub struct SummaryService;

impl SummaryService {
    /// Sum of every expense amount, malformed or not.
    pub fn total_spent(expenses: &[Expense]) -> f64 {
        Self::total_amount(expenses)
    }

    /// Sum of the finite amounts in `items`.
    pub fn total_amount<T: Amounted>(items: &[T]) -> f64 {
        items
            .iter()
            .map(Amounted::amount)
            .filter(|amount| amount.is_finite())
            .sum()
    }

    /// How much of the spending each roommate is responsible for, ignoring
    /// who actually paid.
    pub fn per_person_shares(expenses: &[Expense], roster: &Roster) -> BalanceSheet {
        let active = roster.active();
        let mut shares = BalanceSheet::zeroed(active.iter().copied());
        for expense in expenses {
            if expense.check().is_err() {
                continue;
            }
            let share = expense.share(active.len());
            for name in active.iter().take(expense.covered(active.len())) {
                shares.credit(name, share);
            }
        }
        shares
    }

    /// Expenses created during the given calendar month in timezone `tz`.
    pub fn expenses_in_month<'a, Tz: TimeZone>(
        expenses: &'a [Expense],
        year: i32,
        month: u32,
        tz: &Tz,
    ) -> Vec<&'a Expense> {
        expenses
            .iter()
            .filter(|expense| {
                let local = expense.created_at.with_timezone(tz);
                local.year() == year && local.month() == month
            })
            .collect()
    }

    /// Settlements recorded during the given calendar month in timezone `tz`.
    pub fn settlements_in_month<'a, Tz: TimeZone>(
        settlements: &'a [SettlementRecord],
        year: i32,
        month: u32,
        tz: &Tz,
    ) -> Vec<&'a SettlementRecord> {
        settlements
            .iter()
            .filter(|record| {
                let local = record.timestamp.with_timezone(tz);
                local.year() == year && local.month() == month
            })
            .collect()
    }

    /// Summarises `expenses` against the session roster, offset by `history`.
    pub fn summarize(
        session: &Session,
        expenses: &[Expense],
        history: &[SettlementRecord],
    ) -> SessionSummary {
        let report = BalanceEngine::compute_report(expenses, &session.roster, history);
        SessionSummary {
            expense_count: expenses.len(),
            total_spent: Self::total_spent(expenses),
            shares: Self::per_person_shares(expenses, &session.roster),
            pending: SettlementPlanner::plan(&report.balances),
            balances: report.balances,
            skipped: report.skipped,
            narrowed: report.narrowed,
        }
    }

    pub fn summarize_session(session: &Session) -> SessionSummary {
        Self::summarize(session, &session.expenses, &session.settlements)
    }

    /// Summary restricted to one month: only that month's expenses and the
    /// settlements recorded in the same month count toward its balances.
    pub fn summarize_month<Tz: TimeZone>(
        session: &Session,
        year: i32,
        month: u32,
        tz: &Tz,
    ) -> SessionSummary {
        let expenses: Vec<Expense> = Self::expenses_in_month(&session.expenses, year, month, tz)
            .into_iter()
            .cloned()
            .collect();
        let history: Vec<SettlementRecord> =
            Self::settlements_in_month(&session.settlements, year, month, tz)
                .into_iter()
                .cloned()
                .collect();
        Self::summarize(session, &expenses, &history)
    }
}
