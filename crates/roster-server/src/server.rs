// crates/roster-server/src/server.rs
// ============================================================================
// Module: Roster Server
// Description: HTTP server lifecycle for the directory API.
// Purpose: Bind a listener and serve the router until the transport fails.
// Dependencies: axum, roster-config, tokio
// ============================================================================

//! ## Overview
//! [`RosterServer`] owns a built router and the address to bind. Tests and
//! embedders that already hold a listener use [`RosterServer::serve_listener`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;

use axum::Router;
use roster_config::RosterConfig;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::routes::build_router;
use crate::state::AppState;

// ============================================================================
// SECTION: Server
// ============================================================================

/// Directory HTTP server.
pub struct RosterServer {
    /// Address to bind.
    bind: SocketAddr,
    /// Fully layered router.
    router: Router,
}

impl RosterServer {
    /// Builds a server from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration or initialization fails.
    pub fn from_config(config: &RosterConfig) -> Result<Self, ServerError> {
        let bind = config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let state = AppState::from_config(config)?;
        Ok(Self::from_state(bind, state, config.server.max_body_bytes))
    }

    /// Builds a server over pre-assembled state.
    #[must_use]
    pub fn from_state(bind: SocketAddr, state: AppState, max_body_bytes: usize) -> Self {
        Self {
            bind,
            router: build_router(state, max_body_bytes),
        }
    }

    /// Returns the configured bind address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind
    }

    /// Binds the configured address and serves requests.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        self.serve_listener(listener).await
    }

    /// Serves requests on an already bound listener.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when the server fails.
    pub async fn serve_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        axum::serve(listener, self.router)
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server startup and transport errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}
