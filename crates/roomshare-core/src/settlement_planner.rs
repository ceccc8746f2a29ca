//! Greedy settlement planning over a balance sheet.

use tracing::debug;

use roomshare_domain::{round_to_cents, BalanceSheet, SettlementInstruction};

/// Balances within this many currency units of zero count as settled.
pub const EPSILON: f64 = 0.01;

/// Produces transfer instructions that clear a balance sheet.
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Plans payments by repeatedly matching the largest creditor with the
    /// largest debtor.
    ///
    /// Each round moves `min(credit, |debt|)` from the debtor to the creditor,
    /// so at least one of them reaches zero and the plan holds at most
    /// `balances.len() - 1` instructions. Ties go to the entry that comes
    /// first in sheet order. Emitted amounts are rounded to cents; the working
    /// balances are not. The caller's sheet is left untouched.
    ///
    /// Greedy matching is not guaranteed to find the fewest possible
    /// transfers when imbalances form cycles among four or more people.
    pub fn plan(balances: &BalanceSheet) -> Vec<SettlementInstruction> {
        let mut working = balances.clone();
        let mut instructions = Vec::new();

        loop {
            let mut creditor: Option<(String, f64)> = None;
            let mut debtor: Option<(String, f64)> = None;

            for (name, balance) in working.iter() {
                let max_credit = creditor.as_ref().map_or(EPSILON, |(_, credit)| *credit);
                if balance > max_credit {
                    creditor = Some((name.to_string(), balance));
                }
                let max_debt = debtor.as_ref().map_or(EPSILON, |(_, debt)| *debt);
                if -balance > max_debt {
                    debtor = Some((name.to_string(), -balance));
                }
            }

            let (Some((creditor, credit)), Some((debtor, debt))) = (creditor, debtor) else {
                break;
            };

            let transfer = credit.min(debt);
            if transfer <= EPSILON {
                break;
            }

            debug!(from = %debtor, to = %creditor, transfer, "planned settlement");
            working.debit(&creditor, transfer);
            working.credit(&debtor, transfer);
            instructions.push(SettlementInstruction::new(
                debtor,
                creditor,
                round_to_cents(transfer),
            ));
        }

        instructions
    }

    /// Applies instructions to a copy of `balances`, as if each were paid.
    pub fn apply(
        balances: &BalanceSheet,
        instructions: &[SettlementInstruction],
    ) -> BalanceSheet {
        let mut result = balances.clone();
        for instruction in instructions {
            result.debit(&instruction.to, instruction.amount);
            result.credit(&instruction.from, instruction.amount);
        }
        result
    }
}
