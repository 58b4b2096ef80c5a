//! Read models returned by the engine.
//!
//! These are the serialized shapes the HTTP layer renders: monthly summary
//! and chart, today's views, and paginated transaction listings with their
//! joined display fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::parse_uuid;
use crate::{EngineError, Transaction, categories, users, wallets};

/// Current-month totals plus the recommended-savings figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income_minor: i64,
    pub expense_minor: i64,
    pub balance_minor: i64,
    pub saving_minor: i64,
}

/// Recommended savings: 30% of the month's surplus plus 5% of the month's
/// income, floored to minor units. Integer arithmetic keeps this exact.
pub(crate) fn recommended_saving_minor(income_minor: i64, expense_minor: i64) -> i64 {
    let surplus_minor = (income_minor - expense_minor).max(0);
    (surplus_minor * 30 + income_minor * 5) / 100
}

/// One calendar day of the monthly chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDay {
    pub date: NaiveDate,
    pub income_minor: i64,
    pub expense_minor: i64,
}

/// Count and total over today's expense transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayExpenseStats {
    pub total_expense_minor: i64,
    pub count: u64,
}

/// Category display fields joined into a transaction view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub description: Option<String>,
}

impl From<categories::Model> for CategoryRef {
    fn from(model: categories::Model) -> Self {
        Self {
            name: model.name,
            description: model.description,
        }
    }
}

/// User display fields joined into a transaction view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
    pub email: String,
    pub number: Option<String>,
}

impl From<users::Model> for UserRef {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            number: model.number,
        }
    }
}

/// Wallet display fields joined into a transaction view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRef {
    pub id: Uuid,
    pub name: String,
    pub balance: i64,
}

impl TryFrom<wallets::Model> for WalletRef {
    type Error = EngineError;

    fn try_from(model: wallets::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "wallet")?,
            name: model.name,
            balance: model.balance,
        })
    }
}

/// A transaction with its joined display fields.
///
/// `wallet` is populated on single-transaction lookups only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub transaction: Transaction,
    pub category: Option<CategoryRef>,
    pub user: Option<UserRef>,
    pub wallet: Option<WalletRef>,
}

/// Pagination envelope for [`TransactionPage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// One page of a user's transactions, newest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub items: Vec<TransactionDetail>,
    pub pagination: PageInfo,
}
