//! Request and response bodies for the gateway endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One player as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub online: bool,
}

/// Full player roster with the server-reported count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayersInfo {
    pub count: usize,
    pub players: BTreeMap<String, PlayerInfo>,
}

/// Server uptime broken into the units the server mentioned. Units absent
/// from the reply are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UptimeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
}

/// Form body for the save endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveForm {
    pub filename: Option<String>,
}

/// JSON body for the arbitrary-command endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}
