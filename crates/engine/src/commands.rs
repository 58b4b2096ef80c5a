//! Command structs for engine operations.
//!
//! These types group parameters for write and list operations, keeping call
//! sites readable and avoiding long argument lists. Optional fields on
//! [`UpdateTransactionCmd`] mean "leave unchanged".

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::TransactionKind;

/// Create an income transaction.
#[derive(Clone, Debug)]
pub struct IncomeCmd {
    pub user_id: String,
    pub wallet_id: Uuid,
    pub amount_minor: i64,
    pub category_id: Option<Uuid>,
    pub note: Option<String>,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl IncomeCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        wallet_id: Uuid,
        amount_minor: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            wallet_id,
            amount_minor,
            category_id: None,
            note: None,
            description: None,
            occurred_at,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Create an expense transaction.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub user_id: String,
    pub wallet_id: Uuid,
    pub amount_minor: i64,
    pub category_id: Option<Uuid>,
    pub note: Option<String>,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        wallet_id: Uuid,
        amount_minor: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            wallet_id,
            amount_minor,
            category_id: None,
            note: None,
            description: None,
            occurred_at,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Update an existing transaction.
///
/// Absent fields are kept as-is; changing `wallet_id` retargets the balance
/// effect from the old wallet to the new one.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub transaction_id: Uuid,

    pub kind: Option<TransactionKind>,
    pub amount_minor: Option<i64>,
    pub wallet_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub note: Option<String>,
    pub description: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(transaction_id: Uuid) -> Self {
        Self {
            transaction_id,
            kind: None,
            amount_minor: None,
            wallet_id: None,
            category_id: None,
            note: None,
            description: None,
            occurred_at: None,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn amount_minor(mut self, amount_minor: i64) -> Self {
        self.amount_minor = Some(amount_minor);
        self
    }

    #[must_use]
    pub fn wallet_id(mut self, wallet_id: Uuid) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }
}

/// List a user's transactions with offset pagination and optional search.
#[derive(Clone, Debug)]
pub struct ListTransactionsCmd {
    pub user_id: String,
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
    /// Substring matched against `note` or `description`.
    pub search: Option<String>,
}

impl ListTransactionsCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            page: 1,
            limit: 10,
            search: None,
        }
    }

    #[must_use]
    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}
