//! HTTP server for the review bot.
//!
//! This module implements the HTTP surface that:
//! - Accepts webhooks from GitHub, validates signatures, and fires review
//!   pipelines as background tasks
//! - Provides a health check for liveness probes
//!
//! # Endpoints
//!
//! - `POST /webhook` - Accepts GitHub webhook deliveries
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

use crate::config::Config;
use crate::github::GitHubClient;
use crate::llm::GroqClient;

/// Shared application state.
///
/// Passed to handlers via axum's `State` extractor. Everything inside is
/// immutable after startup; concurrent pipelines share it read-only.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Process configuration, loaded once at startup.
    config: Config,

    /// GitHub client used for diff fetches and comment posts.
    github: GitHubClient,

    /// Completion client used for review generation.
    llm: GroqClient,
}

impl AppState {
    /// Builds the state, constructing the HTTP clients from configuration.
    pub fn new(config: Config) -> AppState {
        let github = GitHubClient::new(&config);
        let llm = GroqClient::new(&config);

        AppState {
            inner: Arc::new(AppStateInner {
                config,
                github,
                llm,
            }),
        }
    }

    /// The webhook shared secret; empty disables signature verification.
    pub fn webhook_secret(&self) -> &str {
        &self.inner.config.webhook_secret
    }

    /// The GitHub API client.
    pub fn github(&self) -> &GitHubClient {
        &self.inner.github
    }

    /// The completion API client.
    pub fn llm(&self) -> &GroqClient {
        &self.inner.llm
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
