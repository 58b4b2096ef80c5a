use uuid::Uuid;

use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::util::parse_uuid;
use crate::{ResultEngine, TransactionKind, transactions, wallets};

use super::super::super::{Engine, with_tx};

impl Engine {
    /// Deletes a transaction and reverses its effect on the owning wallet's
    /// balance. No budget re-validation is performed on delete.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let tx_model = self.require_transaction(&db_tx, transaction_id).await?;
            let kind = TransactionKind::try_from(tx_model.kind.as_str())?;
            let wallet_id = parse_uuid(&tx_model.wallet_id, "wallet")?;
            let wallet_model = self.require_wallet(&db_tx, wallet_id).await?;

            let wallet_active = wallets::ActiveModel {
                id: ActiveValue::Set(wallet_model.id),
                balance: ActiveValue::Set(
                    wallet_model.balance - kind.signed_amount(tx_model.amount_minor),
                ),
                ..Default::default()
            };
            wallet_active.update(&db_tx).await?;

            transactions::Entity::delete_by_id(tx_model.id)
                .exec(&db_tx)
                .await?;
            tracing::debug!(%transaction_id, "transaction deleted");
            Ok(())
        })
    }
}
