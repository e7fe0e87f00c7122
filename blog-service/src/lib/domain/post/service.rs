use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::PostError;
use super::models::CreatePostCommand;
use super::models::Post;
use super::models::PostId;
use super::models::UpdatePostCommand;
use super::ports::PostRepository;
use super::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of PostServicePort.
///
/// Generic over repository for testability.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    post_repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(post_repository: Arc<PR>) -> Self {
        Self { post_repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        command: CreatePostCommand,
        author_id: UserId,
    ) -> Result<Post, PostError> {
        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            title: command.title,
            content: command.content,
            author_id,
            created_at: now,
            updated_at: now,
        };

        let post = self.post_repository.create(post).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(post)
    }

    async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.post_repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.post_repository.list_all().await
    }

    async fn update_post(
        &self,
        id: PostId,
        command: UpdatePostCommand,
        editor_id: UserId,
    ) -> Result<Post, PostError> {
        let mut post = self.get_post(id).await?;

        if post.author_id != editor_id {
            tracing::warn!(post_id = %id, editor_id = %editor_id, "Rejected update by non-author");
            return Err(PostError::NotAuthor(editor_id));
        }

        if let Some(title) = command.title {
            post.title = title;
        }

        if let Some(content) = command.content {
            post.content = content;
        }

        post.updated_at = Utc::now();

        self.post_repository.update(post).await
    }
}
