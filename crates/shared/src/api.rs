//! Shared API request/response types used by the embedded game client and the
//! API server.

use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Upper bound applied to submitted scores to bound abuse.
pub const MAX_SCORE: f64 = 1_000_000_000.0;

/// Submit a run's score for the current post.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SubmitScorePayload {
    #[garde(custom(validate_finite))]
    pub score: f64,
}

fn validate_finite(value: &f64, _: &()) -> garde::Result {
    if !value.is_finite() {
        return Err(garde::Error::new("score must be a finite number"));
    }
    Ok(())
}

/// Returned after a score submission.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub success: bool,
    /// Best score on record after this submission.
    pub score: f64,
    /// 1-indexed rank on the global leaderboard (rank 1 = highest score).
    pub rank: u64,
    /// Number of players on the global leaderboard.
    pub total_players: u64,
    pub is_new_best: bool,
    pub updated_at: i64,
    /// UTC day bucket (YYYYMMDD) the submission was recorded under.
    pub date_bucket: String,
}

/// Save game progress for the current post.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveStatePayload {
    /// Opaque progress blob; must be a JSON object when present. Omitting the
    /// field keeps the previous blob; an explicit `null` is rejected. The
    /// double option keeps those two wire shapes distinguishable.
    #[garde(custom(validate_object))]
    #[serde(
        default,
        deserialize_with = "some_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Option<Value>>,
}

/// Maps a present field (including JSON `null`) to `Some`, so that `default`
/// covers only the absent case.
fn some_or_null<'de, D>(deserializer: D) -> Result<Option<Option<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(Some)
}

fn validate_object(value: &Option<Option<Value>>, _: &()) -> garde::Result {
    match value {
        None => Ok(()),
        Some(None) => Err(garde::Error::new("data must be a JSON object")),
        Some(Some(v)) if !v.is_object() => Err(garde::Error::new("data must be a JSON object")),
        Some(Some(_)) => Ok(()),
    }
}

/// Query parameters for the leaderboard endpoint.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
    /// UTC day bucket (YYYYMMDD); defaults to today.
    pub date: Option<String>,
}

/// One row of the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u64,
    pub username: String,
    pub score: f64,
    pub date: String,
}

/// The caller's own standing within the queried day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub rank: u64,
    pub username: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub top: Vec<LeaderboardEntry>,
    pub me: Option<PlayerStanding>,
    /// Number of players in the queried day's set (not the global set).
    pub total_players: u64,
    pub generated_at: i64,
    pub filter_date: String,
}

/// Bootstrap payload for the embedded game webview.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub post_id: String,
    pub username: String,
}

/// Acknowledgment returned by the platform lifecycle hooks.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreatedResponse {
    pub status: String,
    pub post_id: String,
    /// Post URL the client should navigate to (menu action only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
}
