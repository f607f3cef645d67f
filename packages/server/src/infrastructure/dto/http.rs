//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One registered connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSummaryDto {
    pub id: String,
    pub username: String,
    /// Remote address, `null` when unknown
    pub peer_addr: Option<String>,
}

/// Registry contents in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionListDto {
    pub total: usize,
    pub connections: Vec<ConnectionSummaryDto>,
}
