use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::get_post::PostResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Public listing of every post, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ListPostsResponseData>, ApiError> {
    let posts = state.post_service.list_posts().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListPostsResponseData {
            posts: posts.iter().map(PostResponseData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPostsResponseData {
    pub posts: Vec<PostResponseData>,
}
