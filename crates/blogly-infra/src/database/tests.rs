use blogly_core::domain::{
    DEFAULT_IMAGE_URL, NewPost, NewTag, NewUser, Post, PostChanges, Tag, UserChanges,
};
use blogly_core::error::RepoError;
use blogly_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ColumnTrait, DatabaseBackend, DbConn, EntityTrait, MockDatabase, QueryFilter};

use super::entity::{post, post_tag, tag};
use super::{
    DatabaseConfig, DatabaseHandle, SqlPostRepository, SqlTagRepository, SqlUserRepository,
};

struct Repos {
    db: DbConn,
    users: Box<dyn UserRepository>,
    posts: Box<dyn PostRepository>,
    tags: Box<dyn TagRepository>,
}

async fn setup() -> Repos {
    let config = DatabaseConfig {
        log_queries: false,
        ..DatabaseConfig::new("sqlite::memory:")
    };
    let handle = DatabaseHandle::connect(&config).await.unwrap();
    Migrator::up(&handle.conn, None).await.unwrap();

    Repos {
        db: handle.conn.clone(),
        users: Box::new(SqlUserRepository::new(handle.conn.clone())),
        posts: Box::new(SqlPostRepository::new(handle.conn.clone())),
        tags: Box::new(SqlTagRepository::new(handle.conn)),
    }
}

async fn create_ann(repos: &Repos) -> i32 {
    let user = NewUser::new(Some("Ann".into()), None, None).unwrap();
    repos.users.create(user).await.unwrap().id
}

async fn create_tag(repos: &Repos, name: &str) -> i32 {
    let tag = NewTag::new(Some(name.into())).unwrap();
    repos.tags.create(tag).await.unwrap().id
}

async fn create_post(repos: &Repos, user_id: i32, tag_ids: Vec<i32>) -> Post {
    let post = NewPost::new(user_id, Some("Hi".into()), Some("Body".into()), tag_ids).unwrap();
    repos.posts.create(post).await.unwrap()
}

async fn links_for_post(db: &DbConn, post_id: i32) -> Vec<post_tag::Model> {
    post_tag::Entity::find()
        .filter(post_tag::Column::PostId.eq(post_id))
        .all(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_find_post_by_id() {
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: 7,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            created_at: now.into(),
            user_id: 3,
        }]])
        .into_connection();

    let repo = SqlPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(7).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 7);
    assert_eq!(post.user_id, 3);
}

#[tokio::test]
async fn test_find_missing_tag_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<tag::Model>::new()])
        .into_connection();

    let repo = SqlTagRepository::new(db);

    let result: Option<Tag> = repo.find_by_id(42).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn user_with_only_first_name_gets_defaults() {
    let repos = setup().await;
    let id = create_ann(&repos).await;

    let stored = repos.users.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Ann");
    assert_eq!(stored.last_name, None);
    assert_eq!(stored.image_url, DEFAULT_IMAGE_URL);
}

#[tokio::test]
async fn user_update_keeps_blank_fields() {
    let repos = setup().await;
    let id = create_ann(&repos).await;

    let changes = UserChanges::new(Some(" ".into()), Some("Smith".into()), None);
    let updated = repos.users.update(id, changes).await.unwrap();
    assert_eq!(updated.first_name, "Ann");
    assert_eq!(updated.last_name.as_deref(), Some("Smith"));
    assert_eq!(updated.image_url, DEFAULT_IMAGE_URL);

    let changes = UserChanges::new(Some("Anne".into()), None, Some("https://img/a.png".into()));
    repos.users.update(id, changes).await.unwrap();

    let stored = repos.users.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Anne");
    assert_eq!(stored.last_name.as_deref(), Some("Smith"));
    assert_eq!(stored.image_url, "https://img/a.png");
}

#[tokio::test]
async fn updating_missing_user_is_not_found() {
    let repos = setup().await;

    let changes = UserChanges::new(Some("Bob".into()), None, None);
    let err = repos.users.update(9, changes).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity_type: "user", id: 9 }));
}

#[tokio::test]
async fn find_by_ids_returns_only_known_tags() {
    let repos = setup().await;
    let fun = create_tag(&repos, "fun").await;
    let news = create_tag(&repos, "news").await;
    create_tag(&repos, "rust").await;

    let mut names: Vec<String> = repos
        .tags
        .find_by_ids(&[news, fun, 999])
        .await
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    names.sort();
    assert_eq!(names, ["fun", "news"]);

    assert!(repos.tags.find_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn post_created_at_survives_edits() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let fun = create_tag(&repos, "fun").await;
    let created = create_post(&repos, user_id, vec![]).await;

    let changes = PostChanges::new(Some("Hello".into()), None, vec![fun]);
    let edited = repos.posts.update(created.id, changes).await.unwrap();

    assert_eq!(edited.title, "Hello");
    assert_eq!(edited.content, "Body");
    assert_eq!(edited.created_at, created.created_at);

    let reloaded = repos.posts.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.created_at, created.created_at);
}

#[tokio::test]
async fn replacing_tags_leaves_no_residual_links() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let a = create_tag(&repos, "a").await;
    let b = create_tag(&repos, "b").await;
    let c = create_tag(&repos, "c").await;
    let post = create_post(&repos, user_id, vec![]).await;

    repos.posts.replace_tags(post.id, &[a, b]).await.unwrap();
    assert_eq!(links_for_post(&repos.db, post.id).await.len(), 2);

    let links = repos.posts.replace_tags(post.id, &[c]).await.unwrap();
    assert_eq!(links.len(), 1);

    let stored = links_for_post(&repos.db, post.id).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].tag_id, c);
}

#[tokio::test]
async fn failed_replacement_keeps_previous_tags() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let a = create_tag(&repos, "a").await;
    let b = create_tag(&repos, "b").await;
    let post = create_post(&repos, user_id, vec![a]).await;

    let err = repos.posts.replace_tags(post.id, &[b, b]).await.unwrap_err();
    assert!(err.is_unique_violation(), "unexpected error: {err}");

    let err = repos.posts.replace_tags(post.id, &[b, 999]).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity_type: "tag", id: 999 }));

    let stored = links_for_post(&repos.db, post.id).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].tag_id, a);
}

#[tokio::test]
async fn replacing_tags_of_missing_post_is_not_found() {
    let repos = setup().await;
    let err = repos.posts.replace_tags(404, &[]).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity_type: "post", id: 404 }));
}

#[tokio::test]
async fn duplicate_tag_name_is_rejected() {
    let repos = setup().await;
    create_tag(&repos, "fun").await;

    let err = repos
        .tags
        .create(NewTag::new(Some("fun".into())).unwrap())
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(), "unexpected error: {err}");

    let named_fun = tag::Entity::find()
        .filter(tag::Column::Name.eq("fun"))
        .all(&repos.db)
        .await
        .unwrap();
    assert_eq!(named_fun.len(), 1);
}

#[tokio::test]
async fn renaming_to_taken_name_keeps_original() {
    let repos = setup().await;
    create_tag(&repos, "fun").await;
    let work = create_tag(&repos, "work").await;

    let err = repos
        .tags
        .rename(work, NewTag::new(Some("fun".into())).unwrap())
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());

    let stored = repos.tags.find_by_id(work).await.unwrap().unwrap();
    assert_eq!(stored.name, "work");

    let renamed = repos
        .tags
        .rename(work, NewTag::new(Some("chores".into())).unwrap())
        .await
        .unwrap();
    assert_eq!(renamed.name, "chores");
}

#[tokio::test]
async fn post_without_tags_has_empty_tag_list() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let post = create_post(&repos, user_id, vec![]).await;

    assert!(repos.posts.tags_for_post(post.id).await.unwrap().is_empty());
    assert!(repos.posts.tags_for_post(12345).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_tag_removes_its_links() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let fun = create_tag(&repos, "fun").await;
    let work = create_tag(&repos, "work").await;
    let post = create_post(&repos, user_id, vec![fun, work]).await;

    repos.tags.delete(fun).await.unwrap();

    let remaining = repos.posts.tags_for_post(post.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].tag.name, "work");
    assert!(repos.tags.posts_for_tag(fun).await.unwrap().is_empty());

    let err = repos.tags.delete(fun).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity_type: "tag", .. }));
}

#[tokio::test]
async fn deleting_user_cascades_to_posts_and_links() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let fun = create_tag(&repos, "fun").await;
    let first = create_post(&repos, user_id, vec![fun]).await;
    let second = create_post(&repos, user_id, vec![]).await;

    repos.users.delete(user_id).await.unwrap();

    assert!(repos.users.find_by_id(user_id).await.unwrap().is_none());
    assert!(repos.posts.find_by_id(first.id).await.unwrap().is_none());
    assert!(repos.posts.find_by_id(second.id).await.unwrap().is_none());
    assert!(links_for_post(&repos.db, first.id).await.is_empty());
    assert!(repos.tags.find_by_id(fun).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_post_removes_links_only() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let fun = create_tag(&repos, "fun").await;
    let post = create_post(&repos, user_id, vec![fun]).await;

    repos.posts.delete(post.id).await.unwrap();

    assert!(links_for_post(&repos.db, post.id).await.is_empty());
    assert!(repos.users.find_by_id(user_id).await.unwrap().is_some());
    assert!(repos.tags.find_by_id(fun).await.unwrap().is_some());

    let err = repos.posts.delete(post.id).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity_type: "post", .. }));
}

#[tokio::test]
async fn creating_post_checks_owner_and_tags() {
    let repos = setup().await;

    let orphan = NewPost::new(77, Some("Hi".into()), Some("Body".into()), vec![]).unwrap();
    let err = repos.posts.create(orphan).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity_type: "user", id: 77 }));

    let user_id = create_ann(&repos).await;
    let bad_tag = NewPost::new(user_id, Some("Hi".into()), Some("Body".into()), vec![5]).unwrap();
    let err = repos.posts.create(bad_tag).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity_type: "tag", id: 5 }));

    assert!(repos.posts.find_by_user_id(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn posts_for_tag_lists_every_tagged_post() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let fun = create_tag(&repos, "fun").await;
    let tagged = create_post(&repos, user_id, vec![fun]).await;
    create_post(&repos, user_id, vec![]).await;

    let taggings = repos.tags.posts_for_tag(fun).await.unwrap();
    assert_eq!(taggings.len(), 1);
    assert_eq!(taggings[0].post.id, tagged.id);
    assert_eq!(taggings[0].tag.name, "fun");
    assert_eq!(taggings[0].link.post_id, tagged.id);
    assert_eq!(taggings[0].link.tag_id, fun);
}

#[tokio::test]
async fn tagging_a_fresh_post() {
    let repos = setup().await;
    let user_id = create_ann(&repos).await;
    let post = create_post(&repos, user_id, vec![]).await;
    let fun = create_tag(&repos, "fun").await;

    repos.posts.replace_tags(post.id, &[fun]).await.unwrap();

    let tags = repos.posts.tags_for_post(post.id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].tag.name, "fun");
    assert_eq!(tags[0].post.title, "Hi");
}
