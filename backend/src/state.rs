//! Shared application state handed to every handler.

use std::sync::Arc;

use adapters::IdentityProvider;

use crate::auth::middleware::SessionGate;
use crate::config::{Config, CookieSettings};
use crate::services::Relay;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: Relay,
    pub gate: Arc<SessionGate>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn IdentityProvider>) -> Self {
        let gate = Arc::new(SessionGate::from_config(&config));
        Self {
            config: Arc::new(config),
            relay: Relay::new(provider),
            gate,
        }
    }

    pub fn cookie_settings(&self) -> CookieSettings {
        self.config.cookie_settings()
    }
}
