use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter};

use crate::errors::{ERR_USER_NOT_FOUND, QUERY_FAILED, WRITE_FAILED};
use crate::{ResultEngine, users};

pub async fn by_id<C: ConnectionTrait>(db: &C, id: &str) -> ResultEngine<users::Model> {
    users::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|err| QUERY_FAILED.wrap_source(&err, format!("fetch user {id} failed")))?
        .ok_or_else(|| ERR_USER_NOT_FOUND.clone())
}

pub async fn exists<C: ConnectionTrait>(db: &C, id: &str) -> ResultEngine<bool> {
    let found = users::Entity::find()
        .filter(users::Column::Id.eq(id))
        .one(db)
        .await
        .map_err(|err| QUERY_FAILED.wrap_source(&err, format!("check user {id} failed")))?;
    Ok(found.is_some())
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    model: users::ActiveModel,
) -> ResultEngine<users::Model> {
    model
        .insert(db)
        .await
        .map_err(|err| WRITE_FAILED.wrap_source(&err, "save user failed"))
}

pub async fn delete<C: ConnectionTrait>(db: &C, user: users::Model) -> ResultEngine<()> {
    user.delete(db)
        .await
        .map_err(|err| WRITE_FAILED.wrap_source(&err, "delete user failed"))?;
    Ok(())
}
