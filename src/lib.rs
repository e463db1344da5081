//! Scout - a game server status gateway.
//!
//! Scout exposes a single operation, "query a game server for live status",
//! over a RESTful endpoint, normalizing dozens of per-game query protocols
//! behind a single JSON request/response contract. It implements a
//! **hexagonal architecture**: the multi-protocol query engine sits behind
//! a port, so the HTTP pipeline never depends on wire-protocol details.
//!
//! # Features
//! - `POST /api/query` with a uniform `{success, data?, error?}` envelope
//! - Request validation with structured, deterministic field issues
//! - Optional HTTP Basic access control with a `/health` carve-out
//! - Static OpenAPI 3.0 document plus interactive `/docs` rendering
//! - Environment-first configuration with optional file sources
//! - Structured tracing via `tracing` & graceful shutdown
//!
//! # Quick Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use scout::{
//!     adapters::{AppState, GamedigEngine, build_router},
//!     config::models::ServerConfig,
//!     core::QueryDispatcher,
//! };
//!
//! # #[tokio::main] async fn main() -> eyre::Result<()> {
//! let config = ServerConfig::default();
//! let engine = Arc::new(GamedigEngine::new(std::time::Duration::from_secs(
//!     config.query_timeout_secs,
//! )));
//! let app = build_router(
//!     AppState::new(QueryDispatcher::new(engine)),
//!     config.credentials().map(Arc::new),
//! );
//! // Hand `app` to axum::serve (see the binary crate)
//! # Ok(()) }
//! ```
//!
//! # Architecture
//! The crate separates **ports** (traits) from **adapters**
//! (implementations) while keeping request semantics inside `core`. End
//! users should prefer the re-exports documented below instead of reaching
//! into internal modules directly.
//!
//! # Error Handling
//! All fallible APIs return `eyre::Result<T>` or a domain specific error
//! type. Query failures are request-scoped and never fatal to the process.
// Re-export public modules with explicit visibility controls
pub mod config;
pub mod ports;
pub mod tracing_setup;
pub mod utils;

// These modules are implementation details and should not be directly used by users
pub mod adapters;
pub mod core;

// Re-export the specific types needed by the binary crate
pub use crate::{
    adapters::{AppState, GamedigEngine, build_router},
    core::QueryDispatcher,
    ports::query_engine::QueryEngine,
    utils::GracefulShutdown,
};
