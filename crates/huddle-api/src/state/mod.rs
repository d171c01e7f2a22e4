//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, session validation and configuration.

use std::sync::Arc;

use huddle_common::{AppConfig, SessionService};
use huddle_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Session token validation
    session_service: Arc<SessionService>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState, deriving the session service from config
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let session_service =
            SessionService::new(&config.session.secret, config.session.token_expiry);

        Self {
            service_context: Arc::new(service_context),
            session_service: Arc::new(session_service),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the session service
    pub fn session_service(&self) -> &SessionService {
        &self.session_service
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("session_service", &self.session_service)
            .field("config", &"AppConfig")
            .finish()
    }
}
