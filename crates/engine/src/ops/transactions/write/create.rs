use chrono::{DateTime, Utc};
use uuid::Uuid;

use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::util::month_range;
use crate::{
    ExpenseCmd, IncomeCmd, ResultEngine, Transaction, TransactionKind, transactions, wallets,
};

use super::super::helpers::ensure_budget;
use super::super::super::{Engine, normalize_optional_text, with_tx};

pub(super) struct EntryCmd {
    pub(super) user_id: String,
    pub(super) wallet_id: Uuid,
    pub(super) amount_minor: i64,
    pub(super) category_id: Option<Uuid>,
    pub(super) note: Option<String>,
    pub(super) description: Option<String>,
    pub(super) occurred_at: DateTime<Utc>,
    pub(super) kind: TransactionKind,
}

/// Generates an entry transaction method (income, expense).
macro_rules! impl_entry_tx {
    ($(#[$meta:meta])* $fn_name:ident, $cmd_type:ty, $kind:expr) => {
        $(#[$meta])*
        pub async fn $fn_name(&self, cmd: $cmd_type) -> ResultEngine<Transaction> {
            self.create_entry_transaction(EntryCmd {
                user_id: cmd.user_id,
                wallet_id: cmd.wallet_id,
                amount_minor: cmd.amount_minor,
                category_id: cmd.category_id,
                note: cmd.note,
                description: cmd.description,
                occurred_at: cmd.occurred_at,
                kind: $kind,
            })
            .await
        }
    };
}

impl Engine {
    impl_entry_tx!(
        /// Create an income transaction (increases the wallet balance).
        income,
        IncomeCmd,
        TransactionKind::Income
    );

    impl_entry_tx!(
        /// Create an expense transaction (decreases the wallet balance).
        ///
        /// Fails with [`EngineError::BudgetExceeded`] when the user's expenses
        /// for the calendar month of `occurred_at` would exceed that month's
        /// income; nothing is persisted in that case.
        ///
        /// [`EngineError::BudgetExceeded`]: crate::EngineError::BudgetExceeded
        expense,
        ExpenseCmd,
        TransactionKind::Expense
    );

    pub(super) async fn create_entry_transaction(
        &self,
        cmd: EntryCmd,
    ) -> ResultEngine<Transaction> {
        let note = normalize_optional_text(cmd.note.as_deref());
        let description = normalize_optional_text(cmd.description.as_deref());
        let tx = Transaction::new(
            cmd.user_id,
            cmd.wallet_id,
            cmd.category_id,
            cmd.kind,
            cmd.occurred_at,
            cmd.amount_minor,
            note,
            description,
        )?;

        with_tx!(self, |db_tx| {
            // The budget is validated user-wide over the month containing
            // `occurred_at` before any row is touched; only the target
            // wallet's balance is adjusted afterwards.
            let range = month_range(tx.occurred_at)?;
            let totals = self.monthly_totals(&db_tx, &tx.user_id, range, None).await?;
            if tx.kind == TransactionKind::Expense {
                ensure_budget(totals, tx.amount_minor)?;
            }

            let wallet_model = self.require_wallet(&db_tx, tx.wallet_id).await?;
            let new_balance = wallet_model.balance + tx.kind.signed_amount(tx.amount_minor);
            let wallet_active = wallets::ActiveModel {
                id: ActiveValue::Set(wallet_model.id),
                balance: ActiveValue::Set(new_balance),
                ..Default::default()
            };
            wallet_active.update(&db_tx).await?;

            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            tracing::debug!(
                transaction_id = %tx.id,
                wallet_id = %tx.wallet_id,
                kind = tx.kind.as_str(),
                new_balance,
                "transaction created"
            );
            Ok::<(), crate::EngineError>(())
        })?;

        Ok(tx)
    }
}
