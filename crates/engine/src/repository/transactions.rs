use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::errors::{ERR_TRANSACTION_NOT_FOUND, QUERY_FAILED, WRITE_FAILED};
use crate::{ResultEngine, TransactionStatus, transactions};

pub async fn search<C: ConnectionTrait>(
    db: &C,
    user_id: Option<&str>,
    status: Option<TransactionStatus>,
    offset: u64,
    limit: u64,
) -> ResultEngine<Vec<transactions::Model>> {
    let mut query = transactions::Entity::find();
    if let Some(user_id) = user_id {
        query = query.filter(transactions::Column::UserId.eq(user_id));
    }
    if let Some(status) = status {
        query = query.filter(transactions::Column::Status.eq(status.as_str()));
    }
    query
        .order_by_desc(transactions::Column::CreatedAt)
        .order_by_asc(transactions::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await
        .map_err(|err| QUERY_FAILED.wrap_source(&err, "search transactions failed"))
}

pub async fn by_id<C: ConnectionTrait>(db: &C, id: &str) -> ResultEngine<transactions::Model> {
    transactions::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|err| QUERY_FAILED.wrap_source(&err, format!("fetch transaction {id} failed")))?
        .ok_or_else(|| ERR_TRANSACTION_NOT_FOUND.clone())
}

pub async fn delete_for_user<C: ConnectionTrait>(db: &C, user_id: &str) -> ResultEngine<()> {
    transactions::Entity::delete_many()
        .filter(transactions::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|err| {
            WRITE_FAILED.wrap_source(&err, format!("delete transactions of {user_id} failed"))
        })?;
    Ok(())
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    model: transactions::ActiveModel,
) -> ResultEngine<transactions::Model> {
    model
        .insert(db)
        .await
        .map_err(|err| WRITE_FAILED.wrap_source(&err, "save transaction failed"))
}
