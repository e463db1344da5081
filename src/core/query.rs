//! Query data model: normalized request parameters, the engine's status
//! result, and the uniform response envelope.
use serde::{Deserialize, Serialize};

/// Default number of query attempts the engine may spend per request.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Fully-populated query parameters produced by the request validator.
///
/// Wire-format optionality stops here: `max_retries` always carries a
/// concrete value so downstream logic never re-applies defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Game id understood by the query engine (e.g. "minecraft", "cs2")
    pub game_type: String,
    /// Hostname or IP address of the target server
    pub host: String,
    /// Target port, if different from the game's default
    pub port: Option<u16>,
    /// Retry budget passed down to the engine
    pub max_retries: u32,
}

/// A player (or bot) slot reported by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    /// Protocol-specific payload, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

/// Live server status as reported by the query engine.
///
/// The gateway does not validate or reshape these fields beyond carrying
/// them into the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    pub name: String,
    pub map: String,
    pub password: bool,
    pub maxplayers: u32,
    pub players: Vec<Player>,
    pub bots: Vec<Player>,
    pub connect: String,
    /// Measured round-trip latency in milliseconds
    pub ping: u64,
    /// Engine-specific payload, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

/// Uniform response wrapper for every query outcome.
///
/// Exactly one of `data` / `error` is present and correlates with
/// `success`. Absent fields are omitted from the serialized JSON rather
/// than emitted as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<QueryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    /// Wrap a successful engine result.
    pub fn ok(data: QueryResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wrap a query failure message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
