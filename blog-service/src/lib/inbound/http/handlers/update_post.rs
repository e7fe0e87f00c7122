use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_post::PostResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Edit a post in place; the post id travels in the body.
pub async fn update_post(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<ApiSuccess<PostResponseData>, ApiError> {
    let Json(body) = payload?;
    let (post_id, command) = body.try_into_command()?;

    state
        .post_service
        .update_post(post_id, command, current_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePostRequest {
    id: String,
    title: Option<String>,
    content: Option<String>,
}

impl UpdatePostRequest {
    fn try_into_command(self) -> Result<(PostId, UpdatePostCommand), PostError> {
        let post_id = PostId::from_string(&self.id)?;
        let title = self.title.map(PostTitle::new).transpose()?;
        let content = self.content.map(PostContent::new).transpose()?;

        Ok((post_id, UpdatePostCommand { title, content }))
    }
}
