//! HTTP endpoint handlers.
//!
//! - `/health` - liveness for load balancers
//! - `/api/*` - game-facing endpoints (init, state, score, leaderboard)
//! - `/internal/*` - platform lifecycle hooks

pub mod health;
pub mod init;
pub mod leaderboard;
pub mod lifecycle;
pub mod player_state;
pub mod score;
