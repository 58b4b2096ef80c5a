use chrono::Utc;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{
    Engine, EngineError, ExpenseCmd, IncomeCmd, ListTransactionsCmd, TransactionKind,
    UpdateTransactionCmd,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (id, name, email) VALUES (?, ?, ?)",
        vec!["alice".into(), "Alice".into(), "alice@example.com".into()],
    ))
    .await
    .unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn transaction_count(engine: &Engine) -> u64 {
    engine
        .list_transactions(ListTransactionsCmd::new("alice"))
        .await
        .unwrap()
        .pagination
        .total
}

#[tokio::test]
async fn income_and_expense_maintain_wallet_balance() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    engine
        .income(IncomeCmd::new("alice", wallet_id, 500_000, Utc::now()).note("salary"))
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 500_000);

    engine
        .expense(ExpenseCmd::new("alice", wallet_id, 200_000, Utc::now()).note("groceries"))
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 300_000);

    // 200_000 + 400_000 > 500_000 of monthly income: rejected, nothing changes.
    let err = engine
        .expense(ExpenseCmd::new("alice", wallet_id, 400_000, Utc::now()))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::BudgetExceeded(_)));
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 300_000);
    assert_eq!(transaction_count(&engine).await, 2);
}

#[tokio::test]
async fn balance_equals_opening_plus_net_effect() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Bank", 1_000).await.unwrap();

    for amount in [1_040, 2_500] {
        engine
            .income(IncomeCmd::new("alice", wallet_id, amount, Utc::now()))
            .await
            .unwrap();
    }
    for amount in [300, 700] {
        engine
            .expense(ExpenseCmd::new("alice", wallet_id, amount, Utc::now()))
            .await
            .unwrap();
    }

    assert_eq!(
        engine.wallet(wallet_id).await.unwrap().balance,
        1_000 + 1_040 + 2_500 - 300 - 700
    );
}

#[tokio::test]
async fn expense_without_income_is_rejected_and_leaves_no_state() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    let err = engine
        .expense(ExpenseCmd::new("alice", wallet_id, 100, Utc::now()))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::BudgetExceeded(_)));
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 0);
    assert_eq!(transaction_count(&engine).await, 0);
}

#[tokio::test]
async fn expense_up_to_monthly_income_is_allowed() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    engine
        .income(IncomeCmd::new("alice", wallet_id, 100, Utc::now()))
        .await
        .unwrap();

    // Spending exactly the month's income is still within budget.
    engine
        .expense(ExpenseCmd::new("alice", wallet_id, 100, Utc::now()))
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 0);
}

#[tokio::test]
async fn delete_reverses_balance_and_recreate_round_trips() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    engine
        .income(IncomeCmd::new("alice", wallet_id, 500_000, Utc::now()))
        .await
        .unwrap();
    let expense = engine
        .expense(ExpenseCmd::new("alice", wallet_id, 200_000, Utc::now()).note("rent"))
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 300_000);

    engine.delete_transaction(expense.id).await.unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 500_000);

    engine
        .expense(
            ExpenseCmd::new("alice", wallet_id, expense.amount_minor, expense.occurred_at)
                .note("rent"),
        )
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 300_000);
}

#[tokio::test]
async fn update_amount_adjusts_balance_by_the_delta() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    engine
        .income(IncomeCmd::new("alice", wallet_id, 1_000_000, Utc::now()))
        .await
        .unwrap();
    let expense = engine
        .expense(ExpenseCmd::new("alice", wallet_id, 100_000, Utc::now()))
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 900_000);

    engine
        .update_transaction(UpdateTransactionCmd::new(expense.id).amount_minor(150_000))
        .await
        .unwrap();

    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 850_000);
    let detail = engine.transaction(expense.id).await.unwrap();
    assert_eq!(detail.transaction.amount_minor, 150_000);
}

#[tokio::test]
async fn update_rejected_by_budget_leaves_wallet_and_transaction_untouched() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    engine
        .income(IncomeCmd::new("alice", wallet_id, 500_000, Utc::now()))
        .await
        .unwrap();
    let expense = engine
        .expense(ExpenseCmd::new("alice", wallet_id, 400_000, Utc::now()))
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 100_000);

    let err = engine
        .update_transaction(UpdateTransactionCmd::new(expense.id).amount_minor(600_000))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::BudgetExceeded(_)));
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 100_000);
    let detail = engine.transaction(expense.id).await.unwrap();
    assert_eq!(detail.transaction.amount_minor, 400_000);
}

#[tokio::test]
async fn update_retargets_balance_to_the_new_wallet() {
    let (engine, _db) = engine_with_db().await;
    let cash_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();
    let bank_id = engine.new_wallet("alice", "Bank", 0).await.unwrap();

    let income = engine
        .income(IncomeCmd::new("alice", cash_id, 300_000, Utc::now()))
        .await
        .unwrap();
    assert_eq!(engine.wallet(cash_id).await.unwrap().balance, 300_000);

    engine
        .update_transaction(UpdateTransactionCmd::new(income.id).wallet_id(bank_id))
        .await
        .unwrap();

    assert_eq!(engine.wallet(cash_id).await.unwrap().balance, 0);
    assert_eq!(engine.wallet(bank_id).await.unwrap().balance, 300_000);
}

#[tokio::test]
async fn update_kind_flips_the_balance_effect() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    engine
        .income(IncomeCmd::new("alice", wallet_id, 500_000, Utc::now()))
        .await
        .unwrap();
    let second = engine
        .income(IncomeCmd::new("alice", wallet_id, 200_000, Utc::now()))
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 700_000);

    engine
        .update_transaction(UpdateTransactionCmd::new(second.id).kind(TransactionKind::Expense))
        .await
        .unwrap();

    // +200_000 reversed, -200_000 applied.
    assert_eq!(engine.wallet(wallet_id).await.unwrap().balance, 300_000);
}

#[tokio::test]
async fn missing_entities_surface_not_found() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    let err = engine
        .income(IncomeCmd::new("alice", Uuid::new_v4(), 1_000, Utc::now()))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("wallet".to_string()));

    let err = engine
        .update_transaction(UpdateTransactionCmd::new(Uuid::new_v4()).amount_minor(1_000))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("transaction".to_string()));

    let err = engine.delete_transaction(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("transaction".to_string()));

    let err = engine
        .update_transaction(UpdateTransactionCmd::new(Uuid::new_v4()).wallet_id(wallet_id))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("transaction".to_string()));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let wallet_id = engine.new_wallet("alice", "Cash", 0).await.unwrap();

    let err = engine
        .income(IncomeCmd::new("alice", wallet_id, 0, Utc::now()))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .income(IncomeCmd::new("alice", wallet_id, -5, Utc::now()))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn wallet_names_are_unique_per_user() {
    let (engine, _db) = engine_with_db().await;
    engine.new_wallet("alice", "Cash", 0).await.unwrap();

    let err = engine.new_wallet("alice", "cash", 0).await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("cash".to_string()));
}

#[tokio::test]
async fn new_wallet_requires_an_existing_user() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.new_wallet("nobody", "Cash", 0).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("user".to_string()));
}

#[tokio::test]
async fn wallet_lookup_of_unknown_id_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.wallet(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("wallet".to_string()));
}

#[tokio::test]
async fn rename_wallet_keeps_balance_and_rejects_duplicates() {
    let (engine, _db) = engine_with_db().await;
    let cash_id = engine.new_wallet("alice", "Cash", 2_500).await.unwrap();
    engine.new_wallet("alice", "Bank", 0).await.unwrap();

    engine.rename_wallet(cash_id, "Pocket").await.unwrap();
    let wallet = engine.wallet(cash_id).await.unwrap();
    assert_eq!(wallet.name, "Pocket");
    assert_eq!(wallet.balance, 2_500);

    let err = engine.rename_wallet(cash_id, "bank").await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("bank".to_string()));
}
