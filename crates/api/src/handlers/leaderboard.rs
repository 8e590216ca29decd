//! Daily leaderboard query endpoint.
//!
//! Serves the top-N standings for one UTC day bucket plus the caller's own
//! rank. There is no all-time view here; the score endpoint's response is the
//! only place global standings surface.
//!
//! ## Redis Structure
//!
//! ```text
//! scores:{post_id}:{YYYYMMDD} → daily sorted set (member = username)
//! ```
//!
//! ## Endpoints
//!
//! - GET /api/leaderboard?limit=&date= - Top standings for a day bucket

use arcade_shared::api::{
    LeaderboardEntry, LeaderboardQuery, LeaderboardResponse, PlayerStanding,
};
use axum::{
    Json, Router, debug_handler,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use crate::{
    error::AppError,
    middleware::context::{Identity, PostContext},
    state::AppState,
    stores::daily_key,
};

use super::score::today_bucket;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

pub fn router() -> Router<AppState> {
    Router::new().route("/leaderboard", get(get_leaderboard))
}

#[debug_handler]
async fn get_leaderboard(
    identity: Identity,
    post: PostContext,
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize;

    let day = match query.date {
        Some(date) => {
            if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AppError::Validation(
                    "date must be a YYYYMMDD day bucket".to_string(),
                ));
            }
            date
        }
        None => today_bucket(),
    };

    let key = daily_key(&post.post_id, &day);
    let boards = &state.stores.leaderboard;

    // Descending head of the set: rank 1 = highest score of the day.
    let top: Vec<LeaderboardEntry> = boards
        .top(&key, limit)
        .await?
        .into_iter()
        .enumerate()
        .map(|(i, (username, score))| LeaderboardEntry {
            rank: i as u64 + 1,
            username,
            score,
            date: day.clone(),
        })
        .collect();

    let me = match &identity.username {
        Some(username) => match boards.rank_of(&key, username).await? {
            Some(rank) => boards
                .score_of(&key, username)
                .await?
                .map(|score| PlayerStanding {
                    rank: rank + 1,
                    username: username.clone(),
                    score,
                }),
            None => None,
        },
        None => None,
    };

    // Daily set here; the score endpoint reports the global set's count.
    let total_players = boards.member_count(&key).await?;

    Ok(Json(LeaderboardResponse {
        top,
        me,
        total_players,
        generated_at: Utc::now().timestamp_millis(),
        filter_date: day,
    }))
}
