//! Score submission endpoint.
//!
//! Each submission updates two leaderboards (all-time and the current UTC
//! day's) and mirrors the running best into the player's state record.
//!
//! ## Redis Structure
//!
//! ```text
//! scores:{post_id}            → global sorted set (member = username)
//! scores:{post_id}:{YYYYMMDD} → daily sorted set, one per UTC calendar day
//! state:{post_id}:{username}  → StoredState JSON (best score mirrored here)
//! ```
//!
//! Scores only move upward: both sorted sets are written with an atomic
//! set-if-greater, and `bestScore` in the mirrored record is the running max.
//! The mirror itself is a read-modify-write and can lose a concurrent
//! update's copy; the sorted sets stay authoritative.
//!
//! ## Endpoints
//!
//! - POST /api/score - Submit a run's score (logged-in players only)

use arcade_shared::api::{MAX_SCORE, ScoreResponse, SubmitScorePayload};
use axum::{
    Json, Router, debug_handler, extract::State, response::IntoResponse, routing::post,
};
use chrono::Utc;
use garde::Validate;
use serde_json::{Map, Value};

use crate::{
    error::AppError,
    middleware::context::{Identity, PostContext},
    models::StoredState,
    state::AppState,
    stores::{daily_key, global_key},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/score", post(submit_score))
}

/// Current UTC calendar day as a YYYYMMDD bucket label.
pub(crate) fn today_bucket() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

#[debug_handler]
async fn submit_score(
    identity: Identity,
    post: PostContext,
    State(state): State<AppState>,
    Json(payload): Json<SubmitScorePayload>,
) -> Result<impl IntoResponse, AppError> {
    let username = identity.require()?.to_string();

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let sanitized = payload.score.clamp(0.0, MAX_SCORE);
    let day = today_bucket();

    let global = global_key(&post.post_id);
    let daily = daily_key(&post.post_id, &day);
    let boards = &state.stores.leaderboard;

    // An absent prior record ranks below any valid submission.
    let previous_best = boards.score_of(&global, &username).await?.unwrap_or(-1.0);
    let is_new_best = sanitized > previous_best;
    let best = previous_best.max(sanitized);

    // Independent upserts; the set-if-greater keeps each scope's max with no
    // ordering dependency between the two.
    boards.record_score(&global, &username, sanitized).await?;
    boards.record_score(&daily, &username, sanitized).await?;

    let updated_at = Utc::now().timestamp_millis();
    mirror_state(&state, &post.post_id, &username, best, &day, updated_at).await?;

    // Global set here; the leaderboard query reports the daily set's count.
    let total_players = boards.member_count(&global).await?;
    // The upsert above guarantees membership; an absent rank means the store
    // is inconsistent.
    let rank = boards
        .rank_of(&global, &username)
        .await?
        .map(|r| r + 1)
        .ok_or_else(|| {
            anyhow::anyhow!("player {} missing from {} after upsert", username, global)
        })?;

    tracing::info!(
        post_id = %post.post_id,
        username = %username,
        score = sanitized,
        is_new_best,
        "score submitted"
    );

    Ok(Json(ScoreResponse {
        success: true,
        score: best,
        rank,
        total_players,
        is_new_best,
        updated_at,
        date_bucket: day,
    }))
}

/// Mirrors the running best and day bucket into the player's state record.
/// Shallow merge: only the `date` key of `data` is overwritten.
async fn mirror_state(
    state: &AppState,
    post_id: &str,
    username: &str,
    best: f64,
    day: &str,
    updated_at: i64,
) -> Result<(), AppError> {
    let previous = state.stores.player_state.get(post_id, username).await?;

    let mut data = match previous.and_then(|p| p.data) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    data.insert("date".to_string(), Value::String(day.to_string()));

    let record = StoredState {
        username: username.to_string(),
        best_score: Some(best),
        data: Some(Value::Object(data)),
        updated_at,
    };

    state
        .stores
        .player_state
        .put(post_id, username, &record)
        .await?;

    Ok(())
}
