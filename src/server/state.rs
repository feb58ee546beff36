//! Server shared state
//!
//! Holds configuration and the one game session served over HTTP.

use crate::config::Config;
use crate::session::Session;
use tokio::sync::{Mutex, MutexGuard};

/// Shared state for the HTTP server
///
/// The session sits behind a single mutex: every handler holds the guard for
/// its whole read or mutation, so requests are applied one at a time.
pub struct AppState {
    /// Configuration
    pub config: Config,

    session: Mutex<Session>,
}

impl AppState {
    /// Create application state with an empty session
    pub fn new(config: Config) -> Self {
        Self::with_session(config, Session::new())
    }

    /// Create application state around an existing session
    pub fn with_session(config: Config, session: Session) -> Self {
        Self {
            config,
            session: Mutex::new(session),
        }
    }

    /// Lock the session
    pub async fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }
}
