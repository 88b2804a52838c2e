use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
};

use crate::errors::{QUERY_FAILED, WRITE_FAILED};
use crate::{ResultEngine, utxos};

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    model: utxos::ActiveModel,
) -> ResultEngine<utxos::Model> {
    model
        .insert(db)
        .await
        .map_err(|err| WRITE_FAILED.wrap_source(&err, "save utxo failed"))
}

pub async fn unspent_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> ResultEngine<Vec<utxos::Model>> {
    utxos::Entity::find()
        .filter(utxos::Column::UserId.eq(user_id))
        .filter(utxos::Column::SpendingTxId.is_null())
        .all(db)
        .await
        .map_err(|err| QUERY_FAILED.wrap_source(&err, format!("fetch utxos of {user_id} failed")))
}

pub async fn count_unspent<C: ConnectionTrait>(db: &C, user_id: &str) -> ResultEngine<u64> {
    utxos::Entity::find()
        .filter(utxos::Column::UserId.eq(user_id))
        .filter(utxos::Column::SpendingTxId.is_null())
        .count(db)
        .await
        .map_err(|err| QUERY_FAILED.wrap_source(&err, format!("count utxos of {user_id} failed")))
}

pub async fn delete_for_user<C: ConnectionTrait>(db: &C, user_id: &str) -> ResultEngine<()> {
    utxos::Entity::delete_many()
        .filter(utxos::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|err| WRITE_FAILED.wrap_source(&err, format!("delete utxos of {user_id} failed")))?;
    Ok(())
}
