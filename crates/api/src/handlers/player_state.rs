//! Game progress endpoints.
//!
//! Progress is an opaque JSON object owned by the game client. The server
//! stores it per post and player, carries `bestScore` forward from the score
//! endpoint, and otherwise treats writes as last-writer-wins.
//!
//! ## Redis Structure
//!
//! ```text
//! state:{post_id}:{username} → StoredState JSON
//! ```
//!
//! ## Endpoints
//!
//! - GET /api/state - Read the caller's progress (404 when never written)
//! - POST /api/state - Save progress (logged-in players only)

use arcade_shared::api::SaveStatePayload;
use axum::{
    Json, Router, debug_handler, extract::State, http::StatusCode, response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use garde::Validate;

use crate::{
    error::AppError,
    middleware::context::{Identity, PostContext},
    models::StoredState,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/state", get(get_state).post(put_state))
}

#[debug_handler]
async fn get_state(
    identity: Identity,
    post: PostContext,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    // Anonymous sessions read the shared "anonymous" record.
    let username = identity.display_name();

    let record = state
        .stores
        .player_state
        .get(&post.post_id, username)
        .await?
        .ok_or(AppError::External(StatusCode::NOT_FOUND, "No saved state"))?;

    Ok(Json(record))
}

#[debug_handler]
async fn put_state(
    identity: Identity,
    post: PostContext,
    State(state): State<AppState>,
    Json(payload): Json<SaveStatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let username = identity.require()?.to_string();

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let previous = state
        .stores
        .player_state
        .get(&post.post_id, &username)
        .await?;

    // bestScore is owned by the score endpoint; a progress save carries it
    // forward untouched. Omitted data keeps the previous blob.
    let record = StoredState {
        username: username.clone(),
        best_score: previous.as_ref().and_then(|p| p.best_score),
        data: payload.data.flatten().or(previous.and_then(|p| p.data)),
        updated_at: Utc::now().timestamp_millis(),
    };

    state
        .stores
        .player_state
        .put(&post.post_id, &username, &record)
        .await?;

    tracing::info!(post_id = %post.post_id, username = %username, "state saved");

    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MockStateStore;
    use crate::test_utils::{TestStateBuilder, anonymous, body_json, expect_err, mock_record, player};
    use mockall::predicate::eq;
    use serde_json::json;

    fn post_p1() -> PostContext {
        PostContext {
            post_id: "p1".to_string(),
        }
    }

    #[tokio::test]
    async fn get_returns_404_when_never_written() {
        let mut store = MockStateStore::new();
        store
            .expect_get()
            .with(eq("p1"), eq("alice"))
            .returning(|_, _| Ok(None));

        let state = TestStateBuilder::new().with_player_state(store).build();

        let err = expect_err(get_state(player("alice"), post_p1(), State(state)).await);

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_returns_stored_record() {
        let mut record = mock_record("alice", Some(500.0));
        record.data = Some(json!({"level": 3}));

        let mut store = MockStateStore::new();
        let returned = record.clone();
        store
            .expect_get()
            .with(eq("p1"), eq("alice"))
            .returning(move |_, _| Ok(Some(returned.clone())));

        let state = TestStateBuilder::new().with_player_state(store).build();

        let result = get_state(player("alice"), post_p1(), State(state))
            .await
            .unwrap();

        let body = body_json(result.into_response()).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["bestScore"], 500.0);
        assert_eq!(body["data"]["level"], 3);
    }

    #[tokio::test]
    async fn get_for_anonymous_reads_anonymous_record() {
        let mut store = MockStateStore::new();
        store
            .expect_get()
            .with(eq("p1"), eq("anonymous"))
            .returning(|_, _| Ok(None));

        let state = TestStateBuilder::new().with_player_state(store).build();

        let err = expect_err(get_state(anonymous(), post_p1(), State(state)).await);

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn put_requires_login() {
        let state = TestStateBuilder::new().build();

        let err = expect_err(
            put_state(
                anonymous(),
                post_p1(),
                State(state),
                Json(SaveStatePayload { data: None }),
            )
            .await,
        );

        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn put_rejects_non_object_data() {
        let state = TestStateBuilder::new().build();

        let err = expect_err(
            put_state(
                player("alice"),
                post_p1(),
                State(state),
                Json(SaveStatePayload {
                    data: Some(Some(json!([1, 2, 3]))),
                }),
            )
            .await,
        );

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn put_rejects_explicit_null_data() {
        let state = TestStateBuilder::new().build();

        // `{"data": null}` on the wire deserializes to `Some(None)`.
        let payload: SaveStatePayload = serde_json::from_str(r#"{"data":null}"#).unwrap();

        let err = expect_err(put_state(player("alice"), post_p1(), State(state), Json(payload)).await);

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn put_preserves_best_score_and_replaces_data() {
        let mut previous = mock_record("alice", Some(500.0));
        previous.data = Some(json!({"level": 3}));

        let mut store = MockStateStore::new();
        store
            .expect_get()
            .returning(move |_, _| Ok(Some(previous.clone())));
        store
            .expect_put()
            .withf(|_, _, record| {
                record.best_score == Some(500.0)
                    && record.data.as_ref().unwrap()["level"] == 7
            })
            .returning(|_, _, _| Ok(()));

        let state = TestStateBuilder::new().with_player_state(store).build();

        let result = put_state(
            player("alice"),
            post_p1(),
            State(state),
            Json(SaveStatePayload {
                data: Some(Some(json!({"level": 7}))),
            }),
        )
        .await
        .unwrap();

        let body = body_json(result.into_response()).await;
        assert_eq!(body["bestScore"], 500.0);
        assert_eq!(body["data"]["level"], 7);
    }

    #[tokio::test]
    async fn put_without_data_keeps_previous_blob() {
        let mut previous = mock_record("alice", None);
        previous.data = Some(json!({"level": 3}));

        let mut store = MockStateStore::new();
        store
            .expect_get()
            .returning(move |_, _| Ok(Some(previous.clone())));
        store
            .expect_put()
            .withf(|_, _, record| record.data.as_ref().unwrap()["level"] == 3)
            .returning(|_, _, _| Ok(()));

        let state = TestStateBuilder::new().with_player_state(store).build();

        let result = put_state(
            player("alice"),
            post_p1(),
            State(state),
            Json(SaveStatePayload { data: None }),
        )
        .await
        .unwrap();

        let body = body_json(result.into_response()).await;
        assert_eq!(body["data"]["level"], 3);
        assert!(body.get("bestScore").is_none());
    }
}
