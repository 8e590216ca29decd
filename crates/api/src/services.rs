//! External service abstractions.
//!
//! Each service is abstracted behind a trait to enable mocking in tests.
//!
//! ## Services
//!
//! - **posts** - Game post creation via the platform gateway
//!
//! ## Usage in Handlers
//!
//! Services are accessed via `AppState`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let post = state.posts.create_post(&community, &title).await?;
//! }
//! ```

mod posts;

pub use posts::{HttpPostGateway, PostService};

#[cfg(test)]
pub use posts::{CreatedPost, MockPostService};
