//! Player state storage for Redis.

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;

use crate::models::StoredState;

/// Store for per-post, per-player progress records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get a player's record, or `None` if never written.
    async fn get(&self, post_id: &str, username: &str) -> Result<Option<StoredState>>;

    /// Write a player's record. Blind overwrite, last writer wins.
    async fn put(&self, post_id: &str, username: &str, record: &StoredState) -> Result<()>;
}

/// Redis implementation of StateStore.
#[derive(Clone)]
pub struct RedisStateStore {
    client: redis::Client,
}

impl RedisStateStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn state_key(post_id: &str, username: &str) -> String {
        format!("state:{}:{}", post_id, username)
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn get(&self, post_id: &str, username: &str) -> Result<Option<StoredState>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = Self::state_key(post_id, username);

        let json: Option<String> = conn.get(&key).await?;

        match json {
            Some(j) => Ok(Some(serde_json::from_str(&j)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, post_id: &str, username: &str, record: &StoredState) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = Self::state_key(post_id, username);
        let json = serde_json::to_string(record)?;

        let _: () = conn.set(&key, &json).await?;
        Ok(())
    }
}
