use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{self, GenerativeClient};
use crate::optimizer::roles::RoleCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Role tables used by the decision engine and both rewriters.
    pub catalog: Arc<RoleCatalog>,
    /// Pluggable generative client. `Unavailable` when no API key is configured.
    pub generator: Arc<dyn GenerativeClient>,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let generator = llm_client::from_config(&config);
        Self::new(config, RoleCatalog::builtin(), generator)
    }

    pub fn new(config: Config, catalog: RoleCatalog, generator: Arc<dyn GenerativeClient>) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
            generator,
        }
    }
}
