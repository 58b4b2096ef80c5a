use sea_orm::{
    Condition, DatabaseTransaction, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    CategoryRef, ListTransactionsCmd, PageInfo, ResultEngine, Transaction, TransactionDetail,
    TransactionPage, UserRef, WalletRef, categories, transactions, users, wallets,
};

use super::super::{Engine, with_tx};

impl Engine {
    /// Returns one transaction with its category/user/wallet display fields.
    pub async fn transaction(&self, transaction_id: Uuid) -> ResultEngine<TransactionDetail> {
        with_tx!(self, |db_tx| {
            let tx_model = self.require_transaction(&db_tx, transaction_id).await?;

            let category = match tx_model.category_id.as_deref() {
                Some(id) => categories::Entity::find_by_id(id.to_string())
                    .one(&db_tx)
                    .await?,
                None => None,
            };
            let user = users::Entity::find_by_id(tx_model.user_id.clone())
                .one(&db_tx)
                .await?;
            let wallet = wallets::Entity::find_by_id(tx_model.wallet_id.clone())
                .one(&db_tx)
                .await?;

            Ok(TransactionDetail {
                transaction: Transaction::try_from(tx_model)?,
                category: category.map(CategoryRef::from),
                user: user.map(UserRef::from),
                wallet: wallet.map(WalletRef::try_from).transpose()?,
            })
        })
    }

    /// Lists a user's transactions, newest first, with offset pagination and
    /// an optional substring search over `note`/`description` (case
    /// sensitivity follows the store collation).
    pub async fn list_transactions(
        &self,
        cmd: ListTransactionsCmd,
    ) -> ResultEngine<TransactionPage> {
        let page = cmd.page.max(1);
        let limit = cmd.limit.max(1);
        with_tx!(self, |db_tx| {
            let mut query = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(cmd.user_id.as_str()))
                .order_by_desc(transactions::Column::OccurredAt)
                .order_by_desc(transactions::Column::Id);

            if let Some(search) = cmd.search.as_deref().filter(|s| !s.is_empty()) {
                let pattern = format!("%{search}%");
                query = query.filter(
                    Condition::any()
                        .add(transactions::Column::Note.like(pattern.clone()))
                        .add(transactions::Column::Description.like(pattern)),
                );
            }

            let paginator = query.paginate(&db_tx, limit);
            let total = paginator.num_items().await?;
            let models = paginator.fetch_page(page - 1).await?;
            let items = self.to_details(&db_tx, models).await?;

            Ok(TransactionPage {
                items,
                pagination: PageInfo {
                    total,
                    page,
                    limit,
                    total_pages: total.div_ceil(limit),
                },
            })
        })
    }

    /// Attaches category/user display fields to a batch of transaction rows.
    pub(in crate::ops) async fn to_details(
        &self,
        db_tx: &DatabaseTransaction,
        models: Vec<transactions::Model>,
    ) -> ResultEngine<Vec<TransactionDetail>> {
        let category_models = models.load_one(categories::Entity, db_tx).await?;
        let user_models = models.load_one(users::Entity, db_tx).await?;

        let mut out = Vec::with_capacity(models.len());
        for ((model, category), user) in models
            .into_iter()
            .zip(category_models)
            .zip(user_models)
        {
            out.push(TransactionDetail {
                transaction: Transaction::try_from(model)?,
                category: category.map(CategoryRef::from),
                user: user.map(UserRef::from),
                wallet: None,
            });
        }
        Ok(out)
    }
}
