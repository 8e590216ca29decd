//! Webview bootstrap endpoint.
//!
//! The embedded game calls this first to learn which post it is running in
//! and who is playing.
//!
//! ## Endpoints
//!
//! - GET /api/init - Post id and username for the current session

use arcade_shared::api::InitResponse;
use axum::{
    Json, Router, debug_handler,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    error::AppError,
    middleware::context::{Identity, POST_HEADER},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/init", get(init))
}

#[debug_handler]
async fn init(identity: Identity, headers: HeaderMap) -> Result<Response, AppError> {
    let post_id = headers
        .get(POST_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    // The webview matches on this exact `{status, message}` error shape.
    let Some(post_id) = post_id else {
        let body = serde_json::json!({
            "status": "error",
            "message": "postId is required but missing from context",
        });
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    };

    let response = InitResponse {
        kind: "init".to_string(),
        post_id: post_id.to_string(),
        username: identity.display_name().to_string(),
    };

    Ok(Json(response).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{anonymous, body_json, player};

    #[tokio::test]
    async fn init_returns_post_and_username() {
        let mut headers = HeaderMap::new();
        headers.insert(POST_HEADER, "p1".parse().unwrap());

        let result = init(player("alice"), headers).await.unwrap();
        assert_eq!(result.status(), StatusCode::OK);

        let body = body_json(result).await;
        assert_eq!(body["type"], "init");
        assert_eq!(body["postId"], "p1");
        assert_eq!(body["username"], "alice");
    }

    #[tokio::test]
    async fn init_falls_back_to_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(POST_HEADER, "p1".parse().unwrap());

        let result = init(anonymous(), headers).await.unwrap();

        let body = body_json(result).await;
        assert_eq!(body["username"], "anonymous");
    }

    #[tokio::test]
    async fn init_without_post_context_is_an_error() {
        let result = init(anonymous(), HeaderMap::new()).await.unwrap();
        assert_eq!(result.status(), StatusCode::BAD_REQUEST);

        let body = body_json(result).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("postId"));
    }
}
