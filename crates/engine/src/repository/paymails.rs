use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::errors::{QUERY_FAILED, WRITE_FAILED};
use crate::{ResultEngine, paymails};

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    model: paymails::ActiveModel,
) -> ResultEngine<paymails::Model> {
    model
        .insert(db)
        .await
        .map_err(|err| WRITE_FAILED.wrap_source(&err, "save paymail failed"))
}

pub async fn for_user<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> ResultEngine<Vec<paymails::Model>> {
    paymails::Entity::find()
        .filter(paymails::Column::UserId.eq(user_id))
        .all(db)
        .await
        .map_err(|err| QUERY_FAILED.wrap_source(&err, format!("fetch paymails of {user_id} failed")))
}

pub async fn delete_for_user<C: ConnectionTrait>(db: &C, user_id: &str) -> ResultEngine<()> {
    paymails::Entity::delete_many()
        .filter(paymails::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|err| WRITE_FAILED.wrap_source(&err, format!("delete paymails of {user_id} failed")))?;
    Ok(())
}
