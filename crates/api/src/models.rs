use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-post, per-player persisted record.
///
/// Created lazily on first write and never deleted. `bestScore` is owned by
/// the score endpoint and is monotonically non-decreasing; the state endpoint
/// carries it forward untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f64>,
    /// Opaque game-progress payload. Last write wins, except the `date` key
    /// which the score handler overwrites with the day bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Epoch milliseconds of the last mutation.
    pub updated_at: i64,
}
