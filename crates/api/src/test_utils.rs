//! Shared test utilities for API handler tests.
//!
//! Provides common mock factories and a flexible `TestStateBuilder` for
//! constructing `AppState` instances with only the mocks needed for each test.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::{TestStateBuilder, player};
//!
//! let mut boards = MockLeaderboardStore::new();
//! boards.expect_score_of().returning(|_, _| Ok(Some(500.0)));
//!
//! let state = TestStateBuilder::new()
//!     .with_leaderboard(boards)
//!     .build();
//! ```

use std::sync::Arc;

use axum::response::Response;
use http_body_util::BodyExt;

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::context::Identity;
use crate::models::StoredState;
use crate::services::{MockPostService, PostService};
use crate::state::AppState;
use crate::stores::{MockLeaderboardStore, MockStateStore, Stores};

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        redis_url: "redis://test".to_string(),
        gateway_url: "http://gateway.test".to_string(),
        gateway_token: None,
        post_title: "Play now!".to_string(),
        env: "test".to_string(),
        sentry_dsn: None,
    }
}

/// Identity for a logged-in player.
pub fn player(username: &str) -> Identity {
    Identity {
        username: Some(username.to_string()),
    }
}

/// Identity for an anonymous session.
pub fn anonymous() -> Identity {
    Identity { username: None }
}

/// Creates a stored state record with the given best score and no data.
pub fn mock_record(username: &str, best_score: Option<f64>) -> StoredState {
    StoredState {
        username: username.to_string(),
        best_score,
        data: None,
        updated_at: 1_700_000_000_000,
    }
}

/// Collects a response body and parses it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Unwraps the error arm of a handler result. The success arm is an opaque
/// `impl IntoResponse`, so `unwrap_err` cannot be used directly.
pub fn expect_err<T>(result: Result<T, AppError>) -> AppError {
    match result {
        Ok(_) => panic!("expected an error response"),
        Err(err) => err,
    }
}

/// Builder for constructing test `AppState` with custom mocks.
///
/// Uses default (empty) mocks for any store/service not explicitly set.
/// This allows tests to only configure the mocks they actually need.
pub struct TestStateBuilder {
    leaderboard: Option<MockLeaderboardStore>,
    player_state: Option<MockStateStore>,
    posts: Option<MockPostService>,
}

impl TestStateBuilder {
    /// Creates a new builder with no mocks configured.
    pub fn new() -> Self {
        Self {
            leaderboard: None,
            player_state: None,
            posts: None,
        }
    }

    pub fn with_leaderboard(mut self, store: MockLeaderboardStore) -> Self {
        self.leaderboard = Some(store);
        self
    }

    pub fn with_player_state(mut self, store: MockStateStore) -> Self {
        self.player_state = Some(store);
        self
    }

    pub fn with_posts(mut self, service: MockPostService) -> Self {
        self.posts = Some(service);
        self
    }

    /// Builds the `AppState` using configured mocks or defaults.
    pub fn build(self) -> AppState {
        let stores = Stores {
            leaderboard: Arc::new(self.leaderboard.unwrap_or_else(MockLeaderboardStore::new)),
            player_state: Arc::new(self.player_state.unwrap_or_else(MockStateStore::new)),
        };

        let posts =
            Arc::new(self.posts.unwrap_or_else(MockPostService::new)) as Arc<dyn PostService>;

        AppState {
            config: test_config(),
            stores,
            posts,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
