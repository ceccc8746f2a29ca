use chrono::Utc;
use proptest::prelude::*;
use roomshare_core::{BalanceEngine, SettlementPlanner, EPSILON};
use roomshare_domain::{Expense, Roster, SettlementInstruction};

const NAMES: [&str; 6] = ["Asha", "Ben", "Chen", "Dana", "Eli", "Farah"];

fn build_expenses(
    member_count: usize,
    amounts: &[u32],
    payers: &[usize],
    splits: &[usize],
) -> Vec<Expense> {
    amounts
        .iter()
        .enumerate()
        .map(|(idx, cents)| {
            let payer = NAMES[payers.get(idx).copied().unwrap_or(0) % member_count];
            let split = splits.get(idx).copied().unwrap_or(0) % member_count + 1;
            Expense::new(format!("expense {idx}"), *cents as f64 / 100.0, payer, split as u32)
        })
        .collect()
}

proptest! {
    #[test]
    fn balances_sum_to_zero(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(0u32..=500_000, 0..=30),
        payers in prop::collection::vec(0usize..=5, 0..=30),
        splits in prop::collection::vec(0usize..=5, 0..=30),
    ) {
        let roster = Roster::new(NAMES[..member_count].iter().copied());
        let expenses = build_expenses(member_count, &amounts, &payers, &splits);
        let balances = BalanceEngine::compute(&expenses, &roster, &[]);
        let scale = expenses.iter().map(|expense| expense.amount).sum::<f64>().max(1.0);
        prop_assert!(balances.total().abs() <= 1e-9 * scale);
    }
}

proptest! {
    #[test]
    fn plan_clears_every_balance_within_bound(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(1u32..=500_000, 0..=30),
        payers in prop::collection::vec(0usize..=5, 0..=30),
        splits in prop::collection::vec(0usize..=5, 0..=30),
    ) {
        let roster = Roster::new(NAMES[..member_count].iter().copied());
        let expenses = build_expenses(member_count, &amounts, &payers, &splits);
        let balances = BalanceEngine::compute(&expenses, &roster, &[]);
        let plan = SettlementPlanner::plan(&balances);

        prop_assert!(plan.len() <= member_count.saturating_sub(1));
        for step in &plan {
            prop_assert!(step.amount > 0.0);
            prop_assert_ne!(&step.from, &step.to);
        }

        // Each emitted amount is off by at most half a cent, so the residue
        // per roommate is bounded by the number of transfers they take part in.
        let settled = SettlementPlanner::apply(&balances, &plan);
        let slack = EPSILON + 0.005 * plan.len() as f64;
        for (name, balance) in settled.iter() {
            prop_assert!(balance.abs() <= slack, "{name} left with {balance}");
        }
    }
}

proptest! {
    #[test]
    fn recorded_settlement_reduces_pair_imbalance_by_its_amount(
        amounts in prop::collection::vec(1u32..=100_000, 1..=10),
        payers in prop::collection::vec(0usize..=2, 1..=10),
    ) {
        let roster = Roster::new(["Asha", "Ben", "Chen"]);
        let splits = vec![2usize; amounts.len()];
        let expenses = build_expenses(3, &amounts, &payers, &splits);
        let before = BalanceEngine::compute(&expenses, &roster, &[]);
        let plan = SettlementPlanner::plan(&before);
        prop_assume!(!plan.is_empty());

        let step: SettlementInstruction = plan[0].clone();
        let history = vec![step.clone().into_record(Utc::now())];
        let after = BalanceEngine::compute(&expenses, &roster, &history);

        let from_delta = after.get(&step.from).unwrap() - before.get(&step.from).unwrap();
        let to_delta = before.get(&step.to).unwrap() - after.get(&step.to).unwrap();
        prop_assert!((from_delta - step.amount).abs() < 1e-6);
        prop_assert!((to_delta - step.amount).abs() < 1e-6);
    }
}

proptest! {
    #[test]
    fn empty_inputs_yield_an_empty_sheet(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(1u32..=500_000, 1..=10),
        payers in prop::collection::vec(0usize..=5, 1..=10),
        splits in prop::collection::vec(0usize..=5, 1..=10),
    ) {
        let roster = Roster::new(NAMES[..member_count].iter().copied());
        let expenses = build_expenses(member_count, &amounts, &payers, &splits);
        let nobody = Roster::new(Vec::<String>::new());

        let without_expenses = BalanceEngine::compute(&[], &roster, &[]);
        let without_roster = BalanceEngine::compute(&expenses, &nobody, &[]);
        prop_assert!(without_expenses.is_empty());
        prop_assert!(without_roster.is_empty());
        prop_assert!(SettlementPlanner::plan(&without_expenses).is_empty());
    }
}

proptest! {
    #[test]
    fn shrinking_the_roster_keeps_balances_zero_sum(
        member_count in 2usize..=6,
        removed in 1usize..=5,
        amounts in prop::collection::vec(1u32..=500_000, 1..=20),
        payers in prop::collection::vec(0usize..=5, 1..=20),
        splits in prop::collection::vec(0usize..=5, 1..=20),
    ) {
        let expenses = build_expenses(member_count, &amounts, &payers, &splits);
        let remaining = member_count - removed.min(member_count - 1);
        let roster = Roster::new(NAMES[..remaining].iter().copied());

        let report = BalanceEngine::compute_report(&expenses, &roster, &[]);
        prop_assert!(report.skipped.is_empty());
        let scale = expenses.iter().map(|expense| expense.amount).sum::<f64>().max(1.0);
        prop_assert!(report.balances.total().abs() <= 1e-9 * scale);

        let plan = SettlementPlanner::plan(&report.balances);
        let settled = SettlementPlanner::apply(&report.balances, &plan);
        let slack = EPSILON + 0.005 * plan.len() as f64;
        for (name, balance) in settled.iter() {
            prop_assert!(balance.abs() <= slack, "{name} left with {balance}");
        }
    }
}
