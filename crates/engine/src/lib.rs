//! Ledger core for dompet.
//!
//! The engine keeps each wallet's cached balance consistent with its
//! transaction history and enforces the monthly budget rule (a user's
//! expenses for a calendar month may not exceed that month's income).
//! Every mutation runs inside a single database transaction, so a rejected
//! operation leaves no partial state behind.

pub use commands::{ExpenseCmd, IncomeCmd, ListTransactionsCmd, UpdateTransactionCmd};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use transactions::{Transaction, TransactionKind};
pub use views::{
    CategoryRef, ChartDay, MonthlySummary, PageInfo, TodayExpenseStats, TransactionDetail,
    TransactionPage, UserRef, WalletRef,
};
pub use wallets::Wallet;

mod categories;
mod commands;
mod error;
mod ops;
mod transactions;
mod users;
mod util;
mod views;
mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
