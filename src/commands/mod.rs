pub mod list;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use mergington::registry::ActivityRegistry;

// Re-export command functions for convenience
pub use list::list_activities;
pub use serve::{activity_server, ServeParams};

/// Build the registry from a seed file, or the built-in list when none is given
pub fn load_registry(seed: Option<&Path>) -> Result<ActivityRegistry> {
    match seed {
        Some(path) => {
            let registry = ActivityRegistry::from_seed_file(path)
                .with_context(|| format!("Failed to load seed file: {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                activities = registry.len(),
                "Loaded activities from seed file"
            );
            Ok(registry)
        }
        None => Ok(ActivityRegistry::with_default_activities()),
    }
}
