use chrono::{DateTime, Utc};
use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, TransactionKind, transactions};

use super::super::{Engine, normalize_optional_text};

/// Income/expense totals over one user's transactions in a date range.
#[derive(Clone, Copy, Debug, Default)]
pub(in crate::ops) struct MonthTotals {
    pub(in crate::ops) income_minor: i64,
    pub(in crate::ops) expense_minor: i64,
}

impl Engine {
    /// Sums the user's income and expense amounts over `[range.0, range.1)`.
    ///
    /// The sums are user-wide (all wallets), while balance updates stay
    /// wallet-scoped. `exclude` drops one transaction from the sums, used
    /// when re-validating an update against its own month.
    pub(in crate::ops) async fn monthly_totals(
        &self,
        db: &DatabaseTransaction,
        user_id: &str,
        range: (DateTime<Utc>, DateTime<Utc>),
        exclude: Option<Uuid>,
    ) -> ResultEngine<MonthTotals> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::OccurredAt.gte(range.0))
            .filter(transactions::Column::OccurredAt.lt(range.1));
        if let Some(transaction_id) = exclude {
            query = query.filter(transactions::Column::Id.ne(transaction_id.to_string()));
        }

        let rows = query.all(db).await?;
        let mut totals = MonthTotals::default();
        for model in rows {
            match TransactionKind::try_from(model.kind.as_str())? {
                TransactionKind::Income => totals.income_minor += model.amount_minor,
                TransactionKind::Expense => totals.expense_minor += model.amount_minor,
            }
        }
        Ok(totals)
    }
}

/// The monthly budget rule: a month's expenses may not exceed its income.
pub(super) fn ensure_budget(totals: MonthTotals, added_expense_minor: i64) -> ResultEngine<()> {
    let projected_expense_minor = totals.expense_minor + added_expense_minor;
    if totals.income_minor < projected_expense_minor {
        return Err(EngineError::BudgetExceeded(format!(
            "expenses of {projected_expense_minor} against income of {}",
            totals.income_minor
        )));
    }
    Ok(())
}

pub(super) fn apply_optional_text_patch(
    existing: Option<String>,
    patch: Option<&str>,
) -> Option<String> {
    match patch {
        None => existing,
        Some(value) => normalize_optional_text(Some(value)),
    }
}

pub(super) fn apply_optional_datetime_patch(
    existing: DateTime<Utc>,
    patch: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    patch.unwrap_or(existing)
}
