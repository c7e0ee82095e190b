//! HTTP server for the activity registry
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               Activity Server                 │
//! │                                               │
//! │  ┌─────────────────────────────────────────┐  │
//! │  │           Activity Registry             │  │
//! │  │  - Seeded once at startup               │  │
//! │  │  - Per-activity roster locks            │  │
//! │  └─────────────────────────────────────────┘  │
//! │                                               │
//! │  ┌─────────────────────────────────────────┐  │
//! │  │               REST API                  │  │
//! │  │  GET    /activities                     │  │
//! │  │  POST   /activities/{name}/signup       │  │
//! │  │  DELETE /activities/{name}/unregister   │  │
//! │  │  GET    /health, /metrics               │  │
//! │  └─────────────────────────────────────────┘  │
//! │                                               │
//! │  GET / -> 307 /static/index.html              │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use mergington::registry::ActivityRegistry;
//! use mergington::server::{ActivityServer, ServerConfig};
//!
//! let server = ActivityServer::new(ServerConfig::default(), ActivityRegistry::default())?;
//! server.start().await?;
//! ```

pub mod api;
pub mod config;
#[allow(clippy::module_inception)]
pub mod server;

pub use api::create_router;
pub use config::{ServerConfig, ServerConfigBuilder};
pub use server::{ActivityServer, AppState, ServerError, ServerInfo};
