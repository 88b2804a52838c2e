//! Admin user API endpoints.

use api_types::user::{CreateUser, UserView, UtxoView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{NewUser, UserWithPaymails};

use crate::{ApiError, server::ServerState};

fn view(found: UserWithPaymails) -> UserView {
    UserView {
        id: found.user.id,
        pub_key: found.user.pub_key,
        paymails: found
            .paymails
            .into_iter()
            .map(|paymail| format!("{}@{}", paymail.alias, paymail.domain))
            .collect(),
        created_at: found.user.created_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let user = state
        .engine
        .create_user(NewUser {
            id: payload.id,
            pub_key: payload.pub_key,
            paymail: payload.paymail,
        })
        .await?;
    let found = state.engine.user_by_id(&user.id).await?;
    Ok((StatusCode::CREATED, Json(view(found))))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let found = state.engine.user_by_id(&id).await?;
    Ok(Json(view(found)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.engine.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn utxos(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<UtxoView>>, ApiError> {
    let utxos = state.engine.user_utxos(&id).await?;
    Ok(Json(
        utxos
            .into_iter()
            .map(|utxo| UtxoView {
                tx_id: utxo.tx_id,
                vout: utxo.vout,
                satoshis: utxo.satoshis,
            })
            .collect(),
    ))
}
