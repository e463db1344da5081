//! Static OpenAPI 3.0 description of the HTTP surface.
//!
//! The document is built once and served as-is; it describes behavior, it
//! does not drive it.
use once_cell::sync::Lazy;
use serde_json::{Value, json};

/// Lazily-built OpenAPI document shared by `/openapi.json` and `/docs`.
pub static OPENAPI_DOCUMENT: Lazy<Value> = Lazy::new(build_document);

fn build_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Scout",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "A RESTful gateway for querying live game server status across dozens of protocols.",
        },
        "paths": {
            "/api/query": {
                "post": {
                    "summary": "Query a game server",
                    "description": "Query live status information from a game server.",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["type", "host"],
                                    "properties": {
                                        "type": {
                                            "type": "string",
                                            "description": "The game type to query (e.g., minecraft, cs2, etc.)",
                                        },
                                        "host": {
                                            "type": "string",
                                            "description": "The hostname or IP address of the game server",
                                        },
                                        "port": {
                                            "type": "number",
                                            "description": "The port number of the game server (if different from default)",
                                        },
                                        "maxRetries": {
                                            "type": "number",
                                            "default": 1,
                                            "description": "Maximum number of query attempts",
                                        },
                                    },
                                },
                            },
                        },
                    },
                    "responses": {
                        "200": {
                            "description": "Successful response",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "required": ["success", "data"],
                                        "properties": {
                                            "success": {
                                                "type": "boolean",
                                                "description": "Whether the query was successful",
                                            },
                                            "data": {
                                                "type": "object",
                                                "properties": {
                                                    "name": { "type": "string" },
                                                    "map": { "type": "string" },
                                                    "password": { "type": "boolean" },
                                                    "maxplayers": { "type": "number" },
                                                    "players": {
                                                        "type": "array",
                                                        "items": {
                                                            "type": "object",
                                                            "additionalProperties": true,
                                                        },
                                                    },
                                                    "bots": {
                                                        "type": "array",
                                                        "items": {
                                                            "type": "object",
                                                            "additionalProperties": true,
                                                        },
                                                    },
                                                    "connect": { "type": "string" },
                                                    "ping": { "type": "number" },
                                                    "raw": {
                                                        "type": "object",
                                                        "additionalProperties": true,
                                                    },
                                                },
                                            },
                                        },
                                    },
                                },
                            },
                        },
                        "400": {
                            "description": "Error response",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "required": ["success", "error"],
                                        "properties": {
                                            "success": {
                                                "type": "boolean",
                                                "example": false,
                                            },
                                            "error": {
                                                "description": "Error message or field issues",
                                            },
                                        },
                                    },
                                },
                            },
                        },
                    },
                },
            },
            "/health": {
                "get": {
                    "summary": "Health check",
                    "description": "Check if the gateway is running",
                    "responses": {
                        "200": {
                            "description": "Gateway is healthy",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "status": {
                                                "type": "string",
                                                "example": "ok",
                                            },
                                        },
                                    },
                                },
                            },
                        },
                    },
                },
            },
        },
    })
}

/// Interactive documentation page pointing the reference renderer at the
/// OpenAPI document.
pub fn docs_page() -> String {
    r#"<!doctype html>
<html>
  <head>
    <title>Scout</title>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
  </head>
  <body>
    <script id="api-reference" data-url="/openapi.json"></script>
    <script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference"></script>
  </body>
</html>
"#
    .to_string()
}
