use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};

use std::sync::Arc;

use engine::Engine;
use engine::errors::{ERR_MISSING_AUTH_HEADER, ERR_NOT_AN_ADMIN_KEY};

use crate::{ApiError, transactions, users};

static AUTH_XPUB_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-auth-xpub");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub admin_xpub: Arc<String>,
}

/// `TypedHeader` for the admin auth key.
///
/// Admin requests must carry the configured admin xpub in "x-auth-xpub".
#[derive(Debug)]
struct AuthXpubHeader(String);

impl Header for AuthXpubHeader {
    fn name() -> &'static axum::http::HeaderName {
        &AUTH_XPUB_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        Ok(AuthXpubHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-auth-xpub header"),
        }
    }
}

async fn admin_auth(
    auth_header: Option<TypedHeader<AuthXpubHeader>>,
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(TypedHeader(header)) = auth_header else {
        return Err(ERR_MISSING_AUTH_HEADER.clone().into());
    };
    if header.0 != *state.admin_xpub {
        return Err(ERR_NOT_AN_ADMIN_KEY.clone().into());
    }
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let admin = Router::new()
        .route("/v1/admin/users", post(users::create))
        .route(
            "/v1/admin/users/{id}",
            get(users::get_by_id).delete(users::delete),
        )
        .route("/v1/admin/users/{id}/utxos", get(users::utxos))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth));

    Router::new()
        .route("/v1/transactions/search", post(transactions::search))
        .route("/v1/transactions", post(transactions::record))
        .route("/v1/transactions/{id}", get(transactions::get_by_id))
        .merge(admin)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    admin_xpub: String,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        admin_xpub: Arc::new(admin_xpub),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    admin_xpub: String,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, admin_xpub, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
