pub mod engine;
pub mod http_handler;
pub mod middleware;
pub mod openapi;

/// Re-export commonly used types from adapters
pub use engine::GamedigEngine;
pub use http_handler::{AppState, build_router};
pub use middleware::*;
