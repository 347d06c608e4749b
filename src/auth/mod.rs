//! Token issuance and grants
//!
//! Issued tokens are HS256 JWTs:
//! - `iss`: the API key identifier
//! - `sub`/`jti`: the participant identity
//! - `nbf`/`exp`: validity window
//! - `video`: the room-join grant
//!
//! Tokens are bearer credentials: anyone holding one can exercise its grant
//! until expiry. Treat them as secrets in transit and at rest.

mod grants;
mod tokens;

pub use grants::RoomGrant;
pub use tokens::{verify, AccessToken, ApiCredentials, TokenClaims, TokenError, DEFAULT_TTL};
