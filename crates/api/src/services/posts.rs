//! Game post creation via the platform gateway.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A post created through the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPost {
    pub id: String,
    pub url: String,
}

/// Trait for creating game posts on the hosting platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostService: Send + Sync {
    /// Create a post hosting the game in the given community.
    async fn create_post(&self, community: &str, title: &str) -> Result<CreatedPost>;
}

#[derive(Serialize)]
struct CreatePostRequest<'a> {
    community: &'a str,
    title: &'a str,
}

/// Platform gateway implementation of PostService.
pub struct HttpPostGateway {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpPostGateway {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }
}

#[async_trait]
impl PostService for HttpPostGateway {
    async fn create_post(&self, community: &str, title: &str) -> Result<CreatedPost> {
        let mut request = self
            .http
            .post(format!("{}/posts", self.base_url))
            .json(&CreatePostRequest { community, title });

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("gateway post creation failed: {} {}", status, body));
        }

        Ok(response.json().await?)
    }
}
