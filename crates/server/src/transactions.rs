//! Transactions API endpoints.

use api_types::transaction::{
    RecordTransaction, SearchTransactions, SearchTransactionsResponse, TransactionView,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{NewTransaction, TransactionFilter, TransactionStatus};

use crate::{ApiError, server::ServerState};

fn view(model: engine::transactions::Model) -> TransactionView {
    TransactionView {
        id: model.id,
        user_id: model.user_id,
        status: model.status,
        satoshis: model.satoshis,
        created_at: model.created_at,
    }
}

pub async fn search(
    State(state): State<ServerState>,
    Json(payload): Json<SearchTransactions>,
) -> Result<Json<SearchTransactionsResponse>, ApiError> {
    let defaults = TransactionFilter::default();
    let filter = TransactionFilter {
        user_id: payload.user_id,
        query: payload.query,
        page: payload.page.unwrap_or(defaults.page),
        size: payload.size.unwrap_or(defaults.size),
    };

    let found = state.engine.search_transactions(&filter).await?;
    Ok(Json(SearchTransactionsResponse {
        content: found.into_iter().map(view).collect(),
        page: filter.page,
        size: filter.size,
    }))
}

pub async fn record(
    State(state): State<ServerState>,
    Json(payload): Json<RecordTransaction>,
) -> Result<(StatusCode, Json<TransactionView>), ApiError> {
    let status = TransactionStatus::try_from(payload.status.as_str())?;
    let model = state
        .engine
        .record_transaction(NewTransaction {
            id: payload.id,
            user_id: payload.user_id,
            status,
            satoshis: payload.satoshis,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(view(model))))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionView>, ApiError> {
    let model = state.engine.transaction_by_id(&id).await?;
    Ok(Json(view(model)))
}
