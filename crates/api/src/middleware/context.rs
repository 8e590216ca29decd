//! Request-scoped identity and content context from the platform gateway.
//!
//! The hosting platform terminates authentication and resolves the viewed
//! post before proxying to this service, passing the results as trusted
//! headers (the gateway strips them from client traffic):
//!
//! ```text
//! x-arcade-user       → resolved username (absent for anonymous sessions)
//! x-arcade-post       → id of the post hosting the game
//! x-arcade-community  → community the post lives in
//! ```
//!
//! Usage: add `Identity` and/or `PostContext` as extractor parameters.
//!
//! ```ignore
//! async fn my_handler(identity: Identity, post: PostContext, ...) -> ... {
//!     let username = identity.require()?; // 401 for anonymous sessions
//! }
//! ```

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub const USER_HEADER: &str = "x-arcade-user";
pub const POST_HEADER: &str = "x-arcade-post";
pub const COMMUNITY_HEADER: &str = "x-arcade-community";

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Identity resolved by the platform gateway. Never rejects; anonymous
/// sessions carry no username.
pub struct Identity {
    pub username: Option<String>,
}

impl Identity {
    /// Username for read paths, falling back to the shared anonymous bucket
    /// the same way the platform client does.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("anonymous")
    }

    /// Requires a resolved, non-anonymous identity. Write paths call this.
    pub fn require(&self) -> Result<&str, AppError> {
        self.username
            .as_deref()
            .ok_or(AppError::External(
                StatusCode::UNAUTHORIZED,
                "Must be logged in",
            ))
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Identity {
            username: header_value(parts, USER_HEADER),
        })
    }
}

/// The post hosting the game. Rejects when the gateway did not resolve one.
pub struct PostContext {
    pub post_id: String,
}

impl<S> FromRequestParts<S> for PostContext
where
    S: Send + Sync,
{
    type Rejection = ContextError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match header_value(parts, POST_HEADER) {
            Some(post_id) => Ok(PostContext { post_id }),
            None => Err(ContextError::MissingPost),
        }
    }
}

/// The community an internal lifecycle hook fired in.
pub struct CommunityContext {
    pub community: String,
}

impl<S> FromRequestParts<S> for CommunityContext
where
    S: Send + Sync,
{
    type Rejection = ContextError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match header_value(parts, COMMUNITY_HEADER) {
            Some(community) => Ok(CommunityContext { community }),
            None => Err(ContextError::MissingCommunity),
        }
    }
}

pub enum ContextError {
    MissingPost,
    MissingCommunity,
}

impl IntoResponse for ContextError {
    fn into_response(self) -> Response {
        let message = match self {
            ContextError::MissingPost => "No post context available",
            ContextError::MissingCommunity => "No community context available",
        };

        let body = serde_json::json!({ "error": message });

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
