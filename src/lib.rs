//! Roomgate - signed room-join credentials for real-time sessions
//!
//! Issues short-lived JWTs authorizing a named participant to join a named
//! room, signed with a process-wide API key pair.

pub mod auth;
pub mod server;

pub use auth::{verify, AccessToken, ApiCredentials, RoomGrant, TokenClaims, TokenError};
pub use server::{create_router, AppState};
