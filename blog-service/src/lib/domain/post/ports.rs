use async_trait::async_trait;

use super::errors::PostError;
use super::models::CreatePostCommand;
use super::models::Post;
use super::models::PostId;
use super::models::UpdatePostCommand;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a new post authored by `author_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        command: CreatePostCommand,
        author_id: UserId,
    ) -> Result<Post, PostError>;

    /// Retrieve a single post.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: PostId) -> Result<Post, PostError>;

    /// Retrieve all posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// Update a post on behalf of `editor_id`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotAuthor` - `editor_id` did not write the post
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        id: PostId,
        command: UpdatePostCommand,
        editor_id: UserId,
    ) -> Result<Post, PostError>;
}

/// Persistence operations for post aggregate.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// # Returns
    /// Optional post (None if not found)
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// # Returns
    /// All posts ordered by creation time, newest first
    async fn list_all(&self) -> Result<Vec<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update(&self, post: Post) -> Result<Post, PostError>;
}
