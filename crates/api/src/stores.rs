//! Persistent stores (Redis).
//!
//! This module contains traits and implementations for the key-value and
//! sorted-set storage behind scores and game progress.
//!
//! ## Stores
//!
//! - **leaderboard** - Per-post sorted sets of player best scores
//! - **player_state** - Per-post, per-player progress records
//!
//! ## Redis Key Patterns
//!
//! ```text
//! state:{post_id}:{username}   → StoredState JSON
//! scores:{post_id}             → global sorted set (member = username, score = best)
//! scores:{post_id}:{YYYYMMDD}  → daily sorted set, one per UTC calendar day
//! ```
//!
//! Daily sets are never expired by this service; retention is an external
//! concern.
//!
//! ## Usage in Handlers
//!
//! Stores are accessed via `state.stores`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     state.stores.leaderboard.record_score(&key, &username, score).await?;
//!     let record = state.stores.player_state.get(&post_id, &username).await?;
//! }
//! ```

mod leaderboard;
mod player_state;

pub use leaderboard::{LeaderboardStore, RedisLeaderboardStore, daily_key, global_key};
pub use player_state::{RedisStateStore, StateStore};

#[cfg(test)]
pub use leaderboard::MockLeaderboardStore;
#[cfg(test)]
pub use player_state::MockStateStore;

use std::sync::Arc;

/// Collection of all stores.
#[derive(Clone)]
pub struct Stores {
    pub leaderboard: Arc<dyn LeaderboardStore>,
    pub player_state: Arc<dyn StateStore>,
}
