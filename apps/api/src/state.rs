use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::scoring::profiles::RoleRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Predefined roles plus any loaded from `ROLE_PROFILES_PATH`. Read-only
    /// after startup; handlers pass it into the scoring engine explicitly.
    pub roles: Arc<RoleRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let mut roles = RoleRegistry::predefined();
        if let Some(path) = &config.role_profiles_path {
            let loaded = roles.load_custom_file(path)?;
            info!(path = %path.display(), loaded, "Loaded custom role profiles");
        }
        info!("Role registry ready ({} profiles)", roles.len());

        Ok(Self {
            config,
            roles: Arc::new(roles),
        })
    }
}
