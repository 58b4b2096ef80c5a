use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::util::{month_range, parse_uuid};
use crate::{EngineError, ResultEngine, TransactionKind, UpdateTransactionCmd, transactions, wallets};

use super::super::helpers::{
    apply_optional_datetime_patch, apply_optional_text_patch, ensure_budget,
};
use super::super::super::{Engine, with_tx};

impl Engine {
    /// Updates an existing transaction (kind, amount, date, wallet and/or
    /// metadata).
    ///
    /// The budget is re-validated against the month of the new effective date
    /// (excluding the transaction itself) before anything is written, so a
    /// rejected update leaves both the wallet and the transaction untouched.
    /// When `wallet_id` changes, the old effect is reversed on the old wallet
    /// and the new effect applied to the new one.
    pub async fn update_transaction(&self, cmd: UpdateTransactionCmd) -> ResultEngine<()> {
        let transaction_id = cmd.transaction_id;
        with_tx!(self, |db_tx| {
            let tx_model = self.require_transaction(&db_tx, transaction_id).await?;
            let old_kind = TransactionKind::try_from(tx_model.kind.as_str())?;
            let old_wallet_id = parse_uuid(&tx_model.wallet_id, "wallet")?;
            let old_wallet_model = self.require_wallet(&db_tx, old_wallet_id).await?;

            let new_kind = cmd.kind.unwrap_or(old_kind);
            let new_amount_minor = cmd.amount_minor.unwrap_or(tx_model.amount_minor);
            if new_amount_minor <= 0 {
                return Err(EngineError::InvalidAmount(
                    "amount_minor must be > 0".to_string(),
                ));
            }
            let new_occurred_at = apply_optional_datetime_patch(tx_model.occurred_at, cmd.occurred_at);
            let new_wallet_id = cmd.wallet_id.unwrap_or(old_wallet_id);
            let new_category_id = cmd
                .category_id
                .map(|id| id.to_string())
                .or_else(|| tx_model.category_id.clone());
            let new_note = apply_optional_text_patch(tx_model.note.clone(), cmd.note.as_deref());
            let new_description =
                apply_optional_text_patch(tx_model.description.clone(), cmd.description.as_deref());

            // Validate the budget before any write: the sums exclude the
            // transaction being updated, then project its new amount.
            let range = month_range(new_occurred_at)?;
            let totals = self
                .monthly_totals(&db_tx, &tx_model.user_id, range, Some(transaction_id))
                .await?;
            if new_kind == TransactionKind::Expense {
                ensure_budget(totals, new_amount_minor)?;
            }

            let reverse_minor = -old_kind.signed_amount(tx_model.amount_minor);
            let apply_minor = new_kind.signed_amount(new_amount_minor);

            if new_wallet_id == old_wallet_id {
                let wallet_active = wallets::ActiveModel {
                    id: ActiveValue::Set(old_wallet_model.id),
                    balance: ActiveValue::Set(
                        old_wallet_model.balance + reverse_minor + apply_minor,
                    ),
                    ..Default::default()
                };
                wallet_active.update(&db_tx).await?;
            } else {
                let new_wallet_model = self.require_wallet(&db_tx, new_wallet_id).await?;
                let old_active = wallets::ActiveModel {
                    id: ActiveValue::Set(old_wallet_model.id),
                    balance: ActiveValue::Set(old_wallet_model.balance + reverse_minor),
                    ..Default::default()
                };
                old_active.update(&db_tx).await?;
                let new_active = wallets::ActiveModel {
                    id: ActiveValue::Set(new_wallet_model.id),
                    balance: ActiveValue::Set(new_wallet_model.balance + apply_minor),
                    ..Default::default()
                };
                new_active.update(&db_tx).await?;
            }

            let tx_active = transactions::ActiveModel {
                id: ActiveValue::Set(tx_model.id.clone()),
                wallet_id: ActiveValue::Set(new_wallet_id.to_string()),
                category_id: ActiveValue::Set(new_category_id),
                kind: ActiveValue::Set(new_kind.as_str().to_string()),
                occurred_at: ActiveValue::Set(new_occurred_at),
                amount_minor: ActiveValue::Set(new_amount_minor),
                note: ActiveValue::Set(new_note),
                description: ActiveValue::Set(new_description),
                ..Default::default()
            };
            tx_active.update(&db_tx).await?;
            tracing::debug!(%transaction_id, kind = new_kind.as_str(), "transaction updated");
            Ok(())
        })
    }
}
