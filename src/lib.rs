//! mergington - Extracurricular activity signups for Mergington High School
//!
//! A small web service that lists school activities and lets students sign
//! up for or leave them by email.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`registry`] - In-memory activity store with enroll/withdraw rules
//! - [`models`] - Core data structures and types
//! - [`server`] - HTTP server, REST API and static front-end
//! - [`config`] - Configuration management and settings
//! - [`metrics`] - Prometheus metrics
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use mergington::registry::ActivityRegistry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = ActivityRegistry::with_default_activities();
//!     registry.enroll("Chess Club", "newstudent@mergington.edu").await?;
//!     let catalog = registry.list_activities().await;
//!     println!("{}", serde_json::to_string_pretty(&catalog)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod server;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Activity, ActivityCatalog, Enrollment};
    pub use crate::registry::{ActivityRegistry, RegistryError, RegistryStats};
    pub use crate::server::{ActivityServer, ServerConfig};
}

// Direct re-exports for convenience
pub use models::{Activity, ActivityCatalog, Enrollment};
pub use registry::{ActivityRegistry, RegistryError};
