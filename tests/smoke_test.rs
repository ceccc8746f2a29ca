use chrono::Utc;
use roomshare::init;
use roomshare_core::{
    public_api::{api_add_expense, api_mark_settled, api_pending_settlements},
    SessionService, SummaryService,
};
use roomshare_domain::{Roster, Session};

#[test]
fn session_settlement_smoke() {
    init();

    let mut session = Session::new(Roster::new(["Asha", "Ben", "Chen"]));
    api_add_expense(&mut session, "Electricity", 90.0, "Ben").expect("valid expense");

    let summary = SummaryService::summarize_session(&session);
    assert_eq!(summary.expense_count, 1);
    assert_eq!(summary.pending.len(), 2);

    for instruction in api_pending_settlements(&session) {
        api_mark_settled(&mut session, instruction, Utc::now());
    }
    assert_eq!(session.settlements.len(), 2);
    assert!(api_pending_settlements(&session).is_empty());
    assert!(SessionService::balances(&session).balances.is_settled(1e-9));
}

#[test]
fn rejected_expenses_leave_the_session_untouched() {
    let mut session = Session::new(Roster::new(["Asha", "Ben"]));
    assert!(api_add_expense(&mut session, "Snacks", -5.0, "Asha").is_err());
    assert!(api_add_expense(&mut session, "", 5.0, "Asha").is_err());
    assert!(api_add_expense(&mut session, "Snacks", 5.0, "Zoe").is_err());
    assert!(session.expenses.is_empty());
}
