use chrono::Utc;

use crate::{
    public_api::{compute_balances, plan_settlements},
    session_service::{ExpenseDraft, SessionService},
    summary_service::SummaryService,
    BalanceEngine, SettlementPlanner,
};
use roomshare_domain::{Expense, Roster, Session, SettlementInstruction};

#[test]
fn three_way_dinner_settles_to_the_payer() {
    let roster = Roster::new(["A", "B", "C"]);
    let expenses = vec![Expense::new("Dinner", 300.0, "A", 3)];

    let balances = compute_balances(&expenses, &roster, &[]);
    let entries: Vec<(&str, f64)> = balances.iter().collect();
    assert_eq!(entries, vec![("A", 200.0), ("B", -100.0), ("C", -100.0)]);

    let plan = plan_settlements(&balances);
    assert_eq!(
        plan,
        vec![
            SettlementInstruction::new("B", "A", 100.0),
            SettlementInstruction::new("C", "A", 100.0),
        ]
    );
}

#[test]
fn mutual_expenses_cancel_out() {
    let roster = Roster::new(["A", "B"]);
    let expenses = vec![
        Expense::new("Groceries", 100.0, "A", 2),
        Expense::new("Utilities", 100.0, "B", 2),
    ];
    let balances = compute_balances(&expenses, &roster, &[]);
    assert_eq!(balances.get("A"), Some(0.0));
    assert_eq!(balances.get("B"), Some(0.0));
    assert!(plan_settlements(&balances).is_empty());
}

#[test]
fn recorded_settlement_feeds_back_into_next_plan() {
    let mut session = Session::new(Roster::new(["A", "B", "C"]));
    session.expenses.push(Expense::new("Dinner", 300.0, "A", 3));

    SessionService::mark_settled(
        &mut session,
        SettlementInstruction::new("B", "A", 100.0),
        Utc::now(),
    );

    let balances = BalanceEngine::compute(&session.expenses, &session.roster, &session.settlements);
    let entries: Vec<(&str, f64)> = balances.iter().collect();
    assert_eq!(entries, vec![("A", 100.0), ("B", 0.0), ("C", -100.0)]);
    assert_eq!(
        SettlementPlanner::plan(&balances),
        vec![SettlementInstruction::new("C", "A", 100.0)]
    );
}

#[test]
fn uneven_thirds_settle_within_tolerance() {
    let mut session = Session::new(Roster::new(["Asha", "Ben", "Chen"]));
    for (description, amount, payer) in [
        ("Rent", 1000.0, "Asha"),
        ("Internet", 59.99, "Ben"),
        ("Cleaning", 25.0, "Chen"),
    ] {
        SessionService::add_expense(
            &mut session,
            ExpenseDraft::new(description, amount, payer),
            Utc::now(),
        )
        .expect("valid expense");
    }

    let balances = SessionService::balances(&session).balances;
    assert!(balances.total().abs() < 1e-9);

    let plan = SessionService::pending_settlements(&session);
    assert!(plan.len() <= 2);
    assert!(SettlementPlanner::apply(&balances, &plan).is_settled(crate::EPSILON));

    let summary = SummaryService::summarize_session(&session);
    assert!((summary.total_spent - 1084.99).abs() < 1e-9);
}
