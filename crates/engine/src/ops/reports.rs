//! Read-only derived views over a user's transaction history.
//!
//! Each method takes the reference instant `now` explicitly; the caller owns
//! clock and timezone policy. Pure reads, no side effects.

use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::util::{day_range, month_range};
use crate::views::recommended_saving_minor;
use crate::{
    ChartDay, MonthlySummary, ResultEngine, TodayExpenseStats, TransactionDetail, TransactionKind,
    transactions,
};

use super::{Engine, with_tx};

impl Engine {
    /// Sums the month of `now` into income/expense/balance plus the
    /// recommended-savings figure.
    pub async fn monthly_summary(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> ResultEngine<MonthlySummary> {
        with_tx!(self, |db_tx| {
            let range = month_range(now)?;
            let totals = self.monthly_totals(&db_tx, user_id, range, None).await?;
            Ok(MonthlySummary {
                income_minor: totals.income_minor,
                expense_minor: totals.expense_minor,
                balance_minor: totals.income_minor - totals.expense_minor,
                saving_minor: recommended_saving_minor(totals.income_minor, totals.expense_minor),
            })
        })
    }

    /// One entry per calendar day of the month of `now`, ascending; days
    /// without transactions stay at zero, so the length always equals the
    /// number of days in the month.
    pub async fn monthly_chart(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> ResultEngine<Vec<ChartDay>> {
        with_tx!(self, |db_tx| {
            let (start, end) = month_range(now)?;
            let first = start.date_naive();
            let mut days: Vec<ChartDay> = first
                .iter_days()
                .take_while(|day| *day < end.date_naive())
                .map(|date| ChartDay {
                    date,
                    income_minor: 0,
                    expense_minor: 0,
                })
                .collect();

            let rows = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id))
                .filter(transactions::Column::OccurredAt.gte(start))
                .filter(transactions::Column::OccurredAt.lt(end))
                .all(&db_tx)
                .await?;

            for model in rows {
                let offset = (model.occurred_at.date_naive() - first).num_days();
                let Some(day) = usize::try_from(offset).ok().and_then(|i| days.get_mut(i)) else {
                    continue;
                };
                match TransactionKind::try_from(model.kind.as_str())? {
                    TransactionKind::Income => day.income_minor += model.amount_minor,
                    TransactionKind::Expense => day.expense_minor += model.amount_minor,
                }
            }

            Ok(days)
        })
    }

    /// The day of `now`'s transactions, newest first, with category/user
    /// display fields joined.
    pub async fn today_transactions(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> ResultEngine<Vec<TransactionDetail>> {
        with_tx!(self, |db_tx| {
            let (start, end) = day_range(now)?;
            let models = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id))
                .filter(transactions::Column::OccurredAt.gte(start))
                .filter(transactions::Column::OccurredAt.lt(end))
                .order_by_desc(transactions::Column::OccurredAt)
                .order_by_desc(transactions::Column::Id)
                .all(&db_tx)
                .await?;
            self.to_details(&db_tx, models).await
        })
    }

    /// Count and total over the day of `now`'s expense transactions.
    pub async fn today_expense_stats(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> ResultEngine<TodayExpenseStats> {
        with_tx!(self, |db_tx| {
            let (start, end) = day_range(now)?;
            let models = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id))
                .filter(transactions::Column::Kind.eq(TransactionKind::Expense.as_str()))
                .filter(transactions::Column::OccurredAt.gte(start))
                .filter(transactions::Column::OccurredAt.lt(end))
                .all(&db_tx)
                .await?;

            Ok(TodayExpenseStats {
                total_expense_minor: models.iter().map(|model| model.amount_minor).sum(),
                count: models.len() as u64,
            })
        })
    }
}
