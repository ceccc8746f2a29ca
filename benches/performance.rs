use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use roomshare_core::{storage::SessionStorage, BalanceEngine, SettlementPlanner, SummaryService};
use roomshare_domain::{Expense, Roster, Session, SettlementInstruction};
use roomshare_storage_json::{JsonSessionStorage, StoragePaths};
use tempfile::tempdir;

const ROOMMATES: usize = 8;

fn build_sample_session(expense_count: usize) -> Session {
    let names: Vec<String> = (0..ROOMMATES).map(|idx| format!("Roommate {idx}")).collect();
    let mut session = Session::new(Roster::new(names.iter().map(String::as_str)));
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();

    for idx in 0..expense_count {
        let payer = &names[idx % ROOMMATES];
        let participants = 2 + (idx % (ROOMMATES - 1)) as u32;
        let expense = Expense::new(
            format!("Expense {idx}"),
            25.0 + (idx % 200) as f64 * 1.37,
            payer.as_str(),
            participants,
        )
        .with_created_at(start + Duration::hours(idx as i64));
        session.expenses.push(expense);
    }

    for idx in 0..expense_count / 50 {
        let from = &names[(idx + 1) % ROOMMATES];
        let to = &names[idx % ROOMMATES];
        session
            .settlements
            .push(SettlementInstruction::new(from.as_str(), to.as_str(), 40.0).into_record(start));
    }
    session
}

fn bench_engine_and_planner(c: &mut Criterion) {
    let session = build_sample_session(black_box(10_000));

    c.bench_function("balances_10k", |b| {
        b.iter(|| {
            let sheet =
                BalanceEngine::compute(&session.expenses, &session.roster, &session.settlements);
            black_box(sheet);
        })
    });

    let sheet = BalanceEngine::compute(&session.expenses, &session.roster, &session.settlements);
    c.bench_function("plan_settlements_8", |b| {
        b.iter(|| black_box(SettlementPlanner::plan(&sheet)))
    });

    c.bench_function("summary_10k", |b| {
        b.iter(|| black_box(SummaryService::summarize_session(&session)))
    });
}

fn bench_session_io(c: &mut Criterion) {
    let session = build_sample_session(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let storage = JsonSessionStorage::new(StoragePaths {
        session_root: dir.path().join("session"),
        backup_root: dir.path().join("backups"),
    })
    .expect("storage");

    c.bench_function("session_save_10k", |b| {
        b.iter_batched(
            || session.clone(),
            |session| storage.save_session(&session).expect("save session"),
            BatchSize::LargeInput,
        )
    });

    storage.save_session(&session).expect("seed");

    c.bench_function("session_load_10k", |b| {
        b.iter(|| black_box(storage.load_session().expect("load session")))
    });
}

criterion_group!(benches, bench_engine_and_planner, bench_session_io);
criterion_main!(benches);
