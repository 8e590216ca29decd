use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub redis_url: String,
    /// Base URL of the platform gateway used to create game posts.
    pub gateway_url: String,
    /// Bearer token for gateway calls.
    #[serde(default)]
    pub gateway_token: Option<String>,
    /// Title for posts created by the lifecycle hooks.
    #[serde(default = "default_post_title")]
    pub post_title: String,
    /// Set to "production" for JSON logging, anything else for human-readable.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

fn default_post_title() -> String {
    "Play now!".to_string()
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}
