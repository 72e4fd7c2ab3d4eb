//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Participant entry in the presence listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub username: String,
    /// RFC 3339, server-local time
    pub joined_at: String,
}

/// Response of `GET /api/presence`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceDto {
    pub count: usize,
    pub participants: Vec<ParticipantDto>,
}
