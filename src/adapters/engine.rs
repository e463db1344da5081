//! Query engine adapter backed by the `gamedig` crate.
//!
//! All per-game wire protocols live inside the engine; this adapter only
//! resolves the game id and target address, hands the retry budget down,
//! and maps the engine's common response into the gateway's result shape.
//! The engine performs blocking socket I/O, so each call is confined to a
//! `spawn_blocking` task.
use std::{
    net::IpAddr,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use gamedig::{
    GAMES,
    games::query::query_with_timeout,
    protocols::types::{CommonResponse, TimeoutSettings},
};

use crate::{
    core::query::{Player, QueryParams, QueryResult},
    ports::query_engine::{QueryEngine, QueryEngineError, QueryEngineResult},
};

/// Production [`QueryEngine`] implementation over the gamedig library.
pub struct GamedigEngine {
    socket_timeout: Duration,
}

impl GamedigEngine {
    /// Create a new engine adapter with the given socket read/write timeout.
    pub fn new(socket_timeout: Duration) -> Self {
        Self { socket_timeout }
    }

    /// Resolve a hostname to an IP address, preferring IPv4 records.
    async fn resolve(&self, host: &str, port: u16) -> QueryEngineResult<IpAddr> {
        // Literal IP addresses skip DNS entirely.
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
            QueryEngineError::HostResolution {
                host: host.to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut fallback = None;
        for addr in addrs {
            if addr.is_ipv4() {
                return Ok(addr.ip());
            }
            fallback.get_or_insert(addr.ip());
        }

        fallback.ok_or_else(|| QueryEngineError::HostResolution {
            host: host.to_string(),
            reason: "no addresses found".to_string(),
        })
    }
}

#[async_trait]
impl QueryEngine for GamedigEngine {
    async fn query(&self, params: &QueryParams) -> QueryEngineResult<QueryResult> {
        let game = GAMES
            .get(params.game_type.as_str())
            .ok_or_else(|| QueryEngineError::UnknownGameType(params.game_type.clone()))?;

        let port = params.port.unwrap_or(game.default_port);
        let ip = self.resolve(&params.host, port).await?;

        // The engine counts retries beyond the first attempt; the wire
        // field carries a total attempt budget.
        let retries = params.max_retries.saturating_sub(1) as usize;
        let timeouts = TimeoutSettings::new(
            Some(self.socket_timeout),
            Some(self.socket_timeout),
            Some(self.socket_timeout),
            retries,
        )
        .map_err(|error| QueryEngineError::Query(error.to_string()))?;

        let connect = format!("{}:{}", params.host, port);

        tracing::debug!(
            game = game.name,
            %ip,
            port,
            retries,
            "Querying game server"
        );

        let outcome = tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            query_with_timeout(game, &ip, Some(port), Some(timeouts))
                .map(|response| {
                    let ping = started.elapsed().as_millis() as u64;
                    build_result(response.as_ref(), connect, ping)
                })
                .map_err(|error| QueryEngineError::Query(error.to_string()))
        })
        .await;

        match outcome {
            Ok(result) => result,
            Err(join_error) => {
                tracing::error!(error = %join_error, "Query engine task failed");
                Err(QueryEngineError::Internal)
            }
        }
    }
}

/// Map the engine's protocol-agnostic response into the gateway result.
fn build_result(response: &dyn CommonResponse, connect: String, ping: u64) -> QueryResult {
    let players = response
        .players()
        .map(|players| {
            players
                .iter()
                .map(|player| Player {
                    name: player.name().to_string(),
                    score: player.score(),
                    raw: None,
                })
                .collect()
        })
        .unwrap_or_default();

    QueryResult {
        name: response.name().unwrap_or_default().to_string(),
        map: response.map().unwrap_or_default().to_string(),
        password: response.has_password().unwrap_or(false),
        maxplayers: response.players_maximum(),
        players,
        // The common response only exposes a bot count, not a roster.
        bots: Vec::new(),
        connect,
        ping,
        raw: Some(serde_json::json!({
            "description": response.description(),
            "game_mode": response.game_mode(),
            "game_version": response.game_version(),
            "players_online": response.players_online(),
            "players_bots": response.players_bots(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_game_type_is_rejected_before_any_io() {
        let engine = GamedigEngine::new(Duration::from_secs(1));
        let params = QueryParams {
            game_type: "definitely-not-a-game".to_string(),
            host: "203.0.113.1".to_string(),
            port: None,
            max_retries: 1,
        };

        let err = engine.query(&params).await.unwrap_err();
        assert!(matches!(err, QueryEngineError::UnknownGameType(_)));
        assert!(err.to_string().contains("definitely-not-a-game"));
    }

    #[tokio::test]
    async fn literal_ip_addresses_skip_dns() {
        let engine = GamedigEngine::new(Duration::from_secs(1));
        let ip = engine.resolve("192.0.2.7", 27015).await.unwrap();
        assert_eq!(ip, "192.0.2.7".parse::<IpAddr>().unwrap());
    }
}
