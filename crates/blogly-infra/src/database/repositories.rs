//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    IntoActiveModel, NotSet, QueryFilter, Set, TransactionTrait,
};

use blogly_core::domain::{
    NewPost, NewTag, NewUser, Post, PostChanges, PostTag, Tag, Tagging, User, UserChanges,
};
use blogly_core::error::RepoError;
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};

use super::base::{SqlRepository, map_db_err};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};

/// SQL user repository.
pub type SqlUserRepository = SqlRepository<UserEntity>;

/// SQL post repository.
pub type SqlPostRepository = SqlRepository<PostEntity>;

/// SQL tag repository.
pub type SqlTagRepository = SqlRepository<TagEntity>;

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            id: NotSet,
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            image_url: Set(user.image_url),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = UserEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| RepoError::not_found("user", id))?;

        let mut user = User::from(existing.clone());
        changes.apply(&mut user);

        let mut active = existing.into_active_model();
        active.first_name = Set(user.first_name);
        active.last_name = Set(user.last_name);
        active.image_url = Set(user.image_url);
        let model = active.update(&txn).await.map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(user_id = id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let owned_posts = Query::select()
            .column(post::Column::Id)
            .from(PostEntity)
            .and_where(post::Column::UserId.eq(id))
            .to_owned();
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.in_subquery(owned_posts))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let posts = PostEntity::delete_many()
            .filter(post::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found("user", id));
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(user_id = id, posts = posts.rows_affected, "Deleted user");
        Ok(())
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if UserEntity::find_by_id(post.user_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(RepoError::not_found("user", post.user_id));
        }

        let model = post::ActiveModel {
            id: NotSet,
            title: Set(post.title),
            content: Set(post.content),
            created_at: Set(Utc::now().into()),
            user_id: Set(post.user_id),
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        let links = insert_links(&txn, model.id, &post.tag_ids).await?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(
            post_id = model.id,
            user_id = model.user_id,
            tags = links.len(),
            "Created post"
        );
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = find_post(&txn, id).await?;

        let mut active = existing.clone().into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }
        let model = if active.is_changed() {
            active.update(&txn).await.map_err(map_db_err)?
        } else {
            existing
        };

        let links = replace_links(&txn, id, &changes.tag_ids).await?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id = id, tags = links.len(), "Updated post");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found("post", id));
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(post_id = id, "Deleted post");
        Ok(())
    }

    async fn tags_for_post(&self, post_id: i32) -> Result<Vec<Tagging>, RepoError> {
        let Some(post) = PostEntity::find_by_id(post_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(Vec::new());
        };
        let post = Post::from(post);

        let rows = PostTagEntity::find()
            .filter(post_tag::Column::PostId.eq(post_id))
            .find_also_related(TagEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, tag)| {
                tag.map(|tag| Tagging {
                    link: link.into(),
                    tag: tag.into(),
                    post: post.clone(),
                })
            })
            .collect())
    }

    async fn replace_tags(
        &self,
        post_id: i32,
        tag_ids: &[i32],
    ) -> Result<Vec<PostTag>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        find_post(&txn, post_id).await?;
        let links = replace_links(&txn, post_id, tag_ids).await?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id, tags = links.len(), "Replaced post tags");
        Ok(links)
    }
}

#[async_trait]
impl TagRepository for SqlTagRepository {
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RepoError> {
        tags_by_ids(&self.db, ids).await
    }

    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError> {
        let model = tag::ActiveModel {
            id: NotSet,
            name: Set(tag.name.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| log_duplicate(map_db_err(e), &tag.name))?;

        tracing::info!(tag_id = model.id, "Created tag");
        Ok(model.into())
    }

    async fn rename(&self, id: i32, tag: NewTag) -> Result<Tag, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut active = TagEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| RepoError::not_found("tag", id))?
            .into_active_model();
        active.name = Set(tag.name.clone());

        let model = active
            .update(&txn)
            .await
            .map_err(|e| log_duplicate(map_db_err(e), &tag.name))?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(tag_id = id, "Renamed tag");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let links = PostTagEntity::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = TagEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found("tag", id));
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(tag_id = id, links = links.rows_affected, "Deleted tag");
        Ok(())
    }

    async fn posts_for_tag(&self, tag_id: i32) -> Result<Vec<Tagging>, RepoError> {
        let Some(tag) = TagEntity::find_by_id(tag_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(Vec::new());
        };
        let tag = Tag::from(tag);

        let rows = PostTagEntity::find()
            .filter(post_tag::Column::TagId.eq(tag_id))
            .find_also_related(PostEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, post)| {
                post.map(|post| Tagging {
                    link: link.into(),
                    tag: tag.clone(),
                    post: post.into(),
                })
            })
            .collect())
    }
}

async fn find_post(txn: &DatabaseTransaction, id: i32) -> Result<post::Model, RepoError> {
    PostEntity::find_by_id(id)
        .one(txn)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| RepoError::not_found("post", id))
}

/// Clear every link of the post, then link it to `tag_ids`.
async fn replace_links(
    txn: &DatabaseTransaction,
    post_id: i32,
    tag_ids: &[i32],
) -> Result<Vec<PostTag>, RepoError> {
    let cleared = PostTagEntity::delete_many()
        .filter(post_tag::Column::PostId.eq(post_id))
        .exec(txn)
        .await
        .map_err(map_db_err)?;
    tracing::debug!(post_id, cleared = cleared.rows_affected, "Cleared post tags");

    insert_links(txn, post_id, tag_ids).await
}

async fn tags_by_ids<C>(conn: &C, ids: &[i32]) -> Result<Vec<Tag>, RepoError>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let result = TagEntity::find()
        .filter(tag::Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok(result.into_iter().map(Into::into).collect())
}

/// Link a post to each tag. A repeated id violates the composite key and fails the batch.
async fn insert_links(
    txn: &DatabaseTransaction,
    post_id: i32,
    tag_ids: &[i32],
) -> Result<Vec<PostTag>, RepoError> {
    if tag_ids.is_empty() {
        return Ok(Vec::new());
    }

    let known = tags_by_ids(txn, tag_ids).await?;
    if let Some(&missing) = tag_ids
        .iter()
        .find(|&&id| !known.iter().any(|tag| tag.id == id))
    {
        return Err(RepoError::not_found("tag", missing));
    }

    let links: Vec<PostTag> = tag_ids
        .iter()
        .map(|&tag_id| PostTag { post_id, tag_id })
        .collect();

    PostTagEntity::insert_many(links.iter().copied().map(post_tag::ActiveModel::from))
        .exec_without_returning(txn)
        .await
        .map_err(map_db_err)?;

    Ok(links)
}

fn log_duplicate(err: RepoError, name: &str) -> RepoError {
    if err.is_unique_violation() {
        tracing::warn!(tag_name = %name, "Tag name already exists");
    }
    err
}
