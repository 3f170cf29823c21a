use async_trait::async_trait;

use crate::domain::{
    NewPost, NewTag, NewUser, Post, PostChanges, PostTag, Tag, Tagging, User, UserChanges,
};
use crate::error::RepoError;

/// Generic repository trait defining the read side shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Load every entity in storage order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError>;

    /// Delete a user together with their posts and those posts' tag links.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Post repository, including the post side of the post/tag association.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Insert a post and its tag links in one transaction.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply field changes and replace the tag set in one transaction.
    /// `created_at` is never modified.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    /// Delete a post and its tag links.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// Tags carried by a post. An unknown post yields an empty list.
    async fn tags_for_post(&self, post_id: i32) -> Result<Vec<Tagging>, RepoError>;

    /// Drop every tag link of the post and insert one per id in `tag_ids`, atomically.
    async fn replace_tags(
        &self,
        post_id: i32,
        tag_ids: &[i32],
    ) -> Result<Vec<PostTag>, RepoError>;
}

/// Tag repository, including the tag side of the post/tag association.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i32> {
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RepoError>;

    /// Fails with [`RepoError::UniqueViolation`] when the name is taken.
    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError>;

    /// Fails with [`RepoError::UniqueViolation`] when the name is taken.
    async fn rename(&self, id: i32, tag: NewTag) -> Result<Tag, RepoError>;

    /// Delete a tag and every link to it.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// Posts carrying a tag. An unknown tag yields an empty list.
    async fn posts_for_tag(&self, tag_id: i32) -> Result<Vec<Tagging>, RepoError>;
}
