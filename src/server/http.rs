//! HTTP issuance endpoint
//!
//! One route mints tokens; each request is handled independently, sharing
//! only the read-only credentials.

use crate::auth::{AccessToken, ApiCredentials, RoomGrant, TokenError};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shared state for the issuance handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: ApiCredentials,
    pub token_ttl: Duration,
}

/// Query parameters for a token request
#[derive(Debug, Deserialize)]
pub struct TokenParams {
    #[serde(default)]
    room: String,
    #[serde(default)]
    identity: String,
}

/// Create the issuance router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/token", get(token_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn token_handler(
    State(state): State<AppState>,
    Query(params): Query<TokenParams>,
) -> Response {
    match issue(&state, &params) {
        Ok(jwt) => {
            debug!(room = %params.room, identity = %params.identity, "Issued token");
            (StatusCode::OK, jwt).into_response()
        }
        Err(e @ (TokenError::EmptyRoom | TokenError::EmptyIdentity)) => {
            debug!(error = %e, "Rejected token request");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            // Internal causes stay in the logs; the body never carries them.
            warn!(error = %e, "Token issuance failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "token issuance failed".to_string(),
            )
                .into_response()
        }
    }
}

fn issue(state: &AppState, params: &TokenParams) -> Result<String, TokenError> {
    if params.identity.trim().is_empty() {
        return Err(TokenError::EmptyIdentity);
    }
    let grant = RoomGrant::new(params.room.as_str())?;

    AccessToken::with_credentials(state.credentials.clone())
        .with_identity(params.identity.as_str())
        .with_grant(grant)
        .with_ttl(state.token_ttl)
        .to_jwt()
}

/// Run the issuance server until the listener fails
pub async fn run_http_server(bind_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "Token server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
