//! Platform lifecycle hooks.
//!
//! The hosting platform calls these when the app is installed in a community
//! and when a moderator uses the "create post" menu action. Both create a
//! game post through the gateway.
//!
//! ## Endpoints
//!
//! - POST /internal/on-app-install - Create the initial game post
//! - POST /internal/menu/post-create - Create a post from the moderator menu

use arcade_shared::api::PostCreatedResponse;
use axum::{
    Json, Router, debug_handler, extract::State, response::IntoResponse, routing::post,
};

use crate::{error::AppError, middleware::context::CommunityContext, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/on-app-install", post(on_app_install))
        .route("/menu/post-create", post(menu_post_create))
}

#[debug_handler]
async fn on_app_install(
    community: CommunityContext,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let created = state
        .posts
        .create_post(&community.community, &state.config.post_title)
        .await?;

    tracing::info!(
        community = %community.community,
        post_id = %created.id,
        "install post created"
    );

    Ok(Json(PostCreatedResponse {
        status: "ok".to_string(),
        post_id: created.id,
        navigate_to: None,
    }))
}

#[debug_handler]
async fn menu_post_create(
    community: CommunityContext,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let created = state
        .posts
        .create_post(&community.community, &state.config.post_title)
        .await?;

    tracing::info!(
        community = %community.community,
        post_id = %created.id,
        "menu post created"
    );

    Ok(Json(PostCreatedResponse {
        status: "ok".to_string(),
        post_id: created.id,
        navigate_to: Some(created.url),
    }))
}
