//! Room access grants

use crate::auth::tokens::TokenError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single capability: permission to join one named room.
///
/// Serializes in the wire format the downstream real-time infrastructure
/// verifies: `{"room": "...", "roomJoin": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomGrant {
    /// Name of the room the bearer may join
    pub room: String,
    /// Join permission flag (always true for grants built here)
    pub room_join: bool,
}

impl RoomGrant {
    /// Create a join grant for the given room.
    ///
    /// The room name must be non-empty; a blank name would produce a
    /// credential no session could ever match.
    pub fn new(room: impl Into<String>) -> Result<Self, TokenError> {
        let room = room.into();
        if room.trim().is_empty() {
            return Err(TokenError::EmptyRoom);
        }

        Ok(Self {
            room,
            room_join: true,
        })
    }

    pub fn room(&self) -> &str {
        &self.room
    }
}

impl fmt::Display for RoomGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "join:{}", self.room)
    }
}
