//! Leaderboard storage for Redis (sorted sets).

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;

/// Key of the all-time leaderboard for a post.
pub fn global_key(post_id: &str) -> String {
    format!("scores:{}", post_id)
}

/// Key of the daily leaderboard for a post and UTC day bucket (YYYYMMDD).
pub fn daily_key(post_id: &str, day: &str) -> String {
    format!("scores:{}:{}", post_id, day)
}

/// Store for leaderboard operations (sorted sets of player best scores).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Health check - verify Redis connectivity.
    async fn health_check(&self) -> Result<bool>;

    /// Record a score for a member, keeping the higher of the stored and
    /// submitted values. Atomic on the store side.
    async fn record_score(&self, key: &str, username: &str, score: f64) -> Result<()>;

    /// A member's stored score, or `None` if absent.
    async fn score_of(&self, key: &str, username: &str) -> Result<Option<f64>>;

    /// A member's 0-indexed rank in descending score order.
    async fn rank_of(&self, key: &str, username: &str) -> Result<Option<u64>>;

    /// The top `limit` members by descending score, with scores.
    async fn top(&self, key: &str, limit: usize) -> Result<Vec<(String, f64)>>;

    /// Number of members in the set.
    async fn member_count(&self, key: &str) -> Result<u64>;
}

/// Redis implementation of LeaderboardStore.
#[derive(Clone)]
pub struct RedisLeaderboardStore {
    client: redis::Client,
}

impl RedisLeaderboardStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LeaderboardStore for RedisLeaderboardStore {
    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(result == "PONG")
    }

    async fn record_score(&self, key: &str, username: &str, score: f64) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        // ZADD GT only moves a member's score upward, so the per-set max
        // invariant holds without a read-modify-write round trip.
        let _: () = redis::cmd("ZADD")
            .arg(key)
            .arg("GT")
            .arg(score)
            .arg(username)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn score_of(&self, key: &str, username: &str) -> Result<Option<f64>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let score: Option<f64> = conn.zscore(key, username).await?;
        Ok(score)
    }

    async fn rank_of(&self, key: &str, username: &str) -> Result<Option<u64>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let rank: Option<u64> = conn.zrevrank(key, username).await?;
        Ok(rank)
    }

    async fn top(&self, key: &str, limit: usize) -> Result<Vec<(String, f64)>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let stop = limit.saturating_sub(1) as isize;
        let entries: Vec<(String, f64)> = conn.zrevrange_withscores(key, 0, stop).await?;
        Ok(entries)
    }

    async fn member_count(&self, key: &str) -> Result<u64> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let count: u64 = conn.zcard(key).await?;
        Ok(count)
    }
}
