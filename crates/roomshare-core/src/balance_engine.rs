//! Reduces expenses and recorded settlements into one net balance per roommate.

use tracing::{debug, warn};
use uuid::Uuid;

use roomshare_domain::{BalanceSheet, Expense, ExpenseIssue, Roster, SettlementRecord};

/// An expense that contributed nothing to the balances.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedExpense {
    pub index: usize,
    pub id: Uuid,
    pub issue: ExpenseIssue,
}

/// An expense whose split covers fewer roommates than it was recorded for.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrowedSplit {
    pub index: usize,
    pub id: Uuid,
    pub participant_count: u32,
    pub covered: usize,
}

/// Balances plus diagnostics about what was left out or narrowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceReport {
    pub balances: BalanceSheet,
    pub skipped: Vec<SkippedExpense>,
    pub narrowed: Vec<NarrowedSplit>,
}

/// Pure balance computation over caller-supplied collections.
pub struct BalanceEngine;

impl BalanceEngine {
    /// Computes net balances; see [`BalanceEngine::compute_report`].
    pub fn compute(
        expenses: &[Expense],
        roster: &Roster,
        history: &[SettlementRecord],
    ) -> BalanceSheet {
        Self::compute_report(expenses, roster, history).balances
    }

    /// Computes net balances and reports every skipped expense.
    ///
    /// Each valid expense credits its payer with the full amount and debits
    /// `amount / participant_count` from each of the first
    /// `participant_count` active roster names, in roster order. Recorded
    /// settlements are applied afterwards: the debtor is credited and the
    /// creditor debited by the settled amount.
    ///
    /// When fewer active names remain than `participant_count` (roommates
    /// removed after the expense was recorded), the full amount is spread
    /// over all remaining names and the expense is listed in `narrowed`.
    ///
    /// An empty active roster or an empty expense list yields an empty sheet.
    /// Names missing from the roster (a payer who was removed, a settlement
    /// party who was renamed) get a zero entry appended on first use.
    /// Names are compared after trimming surrounding whitespace.
    pub fn compute_report(
        expenses: &[Expense],
        roster: &Roster,
        history: &[SettlementRecord],
    ) -> BalanceReport {
        let active = roster.active();
        if active.is_empty() || expenses.is_empty() {
            return BalanceReport::default();
        }

        let mut balances = BalanceSheet::zeroed(active.iter().copied());
        let mut skipped = Vec::new();
        let mut narrowed = Vec::new();

        for (index, expense) in expenses.iter().enumerate() {
            if let Err(issue) = expense.check() {
                debug!(index, id = %expense.id, %issue, "skipping expense");
                skipped.push(SkippedExpense {
                    index,
                    id: expense.id,
                    issue,
                });
                continue;
            }

            let payer = expense.paid_by.trim();
            if !balances.contains(payer) {
                warn!(payer, "expense payer is not on the roster");
            }
            balances.credit(payer, expense.amount);

            let covered = expense.covered(active.len());
            if covered < expense.participant_count as usize {
                debug!(index, id = %expense.id, covered, "narrowing expense split");
                narrowed.push(NarrowedSplit {
                    index,
                    id: expense.id,
                    participant_count: expense.participant_count,
                    covered,
                });
            }
            let share = expense.share(active.len());
            for name in active.iter().take(covered) {
                balances.debit(name, share);
            }
        }

        for record in history {
            balances.credit(record.from.trim(), record.amount);
            balances.debit(record.to.trim(), record.amount);
        }

        BalanceReport {
            balances,
            skipped,
            narrowed,
        }
    }
}
