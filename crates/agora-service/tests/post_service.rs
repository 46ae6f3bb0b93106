//! Posts, comments, analytics and demo seeding

mod common;

use agora_core::entities::Role;
use agora_core::value_objects::{DeleteOutcome, PageRequest};
use agora_service::services::post::{INVALID_MEMBER_ID, POST_NOT_FOUND};
use agora_service::{AdminService, AuthService, DataSeeder, MemberService, PostService, ServiceError};
use common::{member_request, TestContext};

async fn with_members(t: &TestContext) {
    let members = MemberService::new(&t.ctx);
    members
        .create(&member_request("jane.doe", 1), Role::User)
        .await
        .unwrap();
    members
        .create(&member_request("john.doe", 2), Role::User)
        .await
        .unwrap();
    members
        .create(&member_request("admin", 3), Role::Admin)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_post_and_comment() {
    let t = TestContext::new();
    with_members(&t).await;
    let posts = PostService::new(&t.ctx);

    let post = posts.create("jane.doe", "Hello", "World").await.unwrap();
    assert!(post.comment_ids.is_empty());
    assert_eq!(post.author.username, "jane.doe");

    let comment = posts.add_comment(&post.id, "john.doe", "Nice").await.unwrap();
    assert_eq!(comment.post_id, post.id);

    let view = posts.get(&post.id).await.unwrap();
    assert_eq!(view.comments.len(), 1);
    assert_eq!(view.comments[0].content, "Nice");
    assert_eq!(view.member.email, "j****e@email.com");
}

#[tokio::test]
async fn test_get_orders_comments_newest_first_and_list_oldest_first() {
    let t = TestContext::new();
    with_members(&t).await;
    let posts = PostService::new(&t.ctx);

    let post = posts.create("jane.doe", "Hello", "World").await.unwrap();
    posts.add_comment(&post.id, "john.doe", "first").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    posts.add_comment(&post.id, "john.doe", "second").await.unwrap();

    let single = posts.get(&post.id).await.unwrap();
    assert_eq!(single.comments[0].content, "second");

    let page = posts.list(PageRequest::new(0, 10)).await.unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].comments[0].content, "first");
}

#[tokio::test]
async fn test_add_comment_errors() {
    let t = TestContext::new();
    with_members(&t).await;
    let posts = PostService::new(&t.ctx);

    match posts.add_comment("missing", "jane.doe", "hi").await.unwrap_err() {
        ServiceError::Application(msg) => assert_eq!(msg, POST_NOT_FOUND),
        other => panic!("unexpected {other:?}"),
    }

    let post = posts.create("jane.doe", "Hello", "World").await.unwrap();
    match posts.add_comment(&post.id, "nobody", "hi").await.unwrap_err() {
        ServiceError::NotFound(msg) => assert_eq!(msg, INVALID_MEMBER_ID),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_create_post_for_unknown_author() {
    let t = TestContext::new();
    let err = PostService::new(&t.ctx)
        .create("nobody", "Hello", "World")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_non_owner_delete_leaves_post() {
    let t = TestContext::new();
    with_members(&t).await;
    let posts = PostService::new(&t.ctx);
    let post = posts.create("jane.doe", "Hello", "World").await.unwrap();

    let outcome = posts.delete_post("john.doe", &post.id).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::NoMatchingOwnedRecord);
    assert!(posts.get(&post.id).await.is_ok());

    let outcome = posts.delete_post("jane.doe", &post.id).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(posts.get(&post.id).await.is_err());
}

#[tokio::test]
async fn test_admin_deletes_any_comment() {
    let t = TestContext::new();
    with_members(&t).await;
    let posts = PostService::new(&t.ctx);
    let post = posts.create("jane.doe", "Hello", "World").await.unwrap();
    let comment = posts.add_comment(&post.id, "john.doe", "Nice").await.unwrap();

    assert_eq!(
        posts.delete_comment("jane.doe", &comment.id).await.unwrap(),
        DeleteOutcome::NoMatchingOwnedRecord
    );
    assert_eq!(
        posts.delete_comment("admin", &comment.id).await.unwrap(),
        DeleteOutcome::Deleted
    );
    assert!(posts.get(&post.id).await.unwrap().comments.is_empty());
}

#[tokio::test]
async fn test_analytics_on_empty_store() {
    let t = TestContext::new();
    let analytics = AdminService::new(&t.ctx).analytics().await.unwrap();

    assert_eq!(analytics.total_users, 0);
    assert_eq!(analytics.total_posts, 0);
    assert_eq!(analytics.total_comments, 0);
    assert!(analytics.members.is_empty());
    assert!(analytics.top_post.is_none());

    let json = serde_json::to_value(&analytics).unwrap();
    assert!(json.get("topPost").is_none());
}

#[tokio::test]
async fn test_analytics_top_post_prefers_first_on_tie() {
    let t = TestContext::new();
    with_members(&t).await;
    let posts = PostService::new(&t.ctx);

    let first = posts.create("jane.doe", "First", "a").await.unwrap();
    let second = posts.create("john.doe", "Second", "b").await.unwrap();
    posts.add_comment(&first.id, "john.doe", "x").await.unwrap();
    posts.add_comment(&second.id, "jane.doe", "y").await.unwrap();

    let analytics = AdminService::new(&t.ctx).analytics().await.unwrap();
    let top = analytics.top_post.unwrap();
    assert_eq!(top.post_id, first.id);
    assert_eq!(top.member, "Jane Doe");
    assert_eq!(top.total_comments, 1);

    assert_eq!(analytics.members.len(), 3);
    assert_eq!(analytics.members[2].total_posts, 0);
}

#[tokio::test]
async fn test_member_delete_keeps_comments_on_other_posts() {
    let t = TestContext::new();
    with_members(&t).await;
    let posts = PostService::new(&t.ctx);
    let members = MemberService::new(&t.ctx);

    let post = posts.create("jane.doe", "Hello", "World").await.unwrap();
    posts.add_comment(&post.id, "john.doe", "Nice").await.unwrap();

    let john = members.find_by_username("john.doe").await.unwrap();
    members.delete(john.member_id).await.unwrap();

    let analytics = AdminService::new(&t.ctx).analytics().await.unwrap();
    assert_eq!(analytics.total_users, 2);
    assert_eq!(analytics.total_posts, 1);
    assert_eq!(analytics.total_comments, 1);
    assert_eq!(analytics.members[0].username, "jane.doe");
    assert_eq!(analytics.members[0].posts[0].total_comments, 1);
    assert_eq!(analytics.top_post.unwrap().post_id, post.id);

    // The post still resolves; the orphaned comment is no longer listed
    let view = posts.get(&post.id).await.unwrap();
    assert_eq!(view.member.username, "jane.doe");
    assert!(view.comments.is_empty());
}

#[tokio::test]
async fn test_end_to_end_flow() {
    let t = TestContext::new();
    let auth = AuthService::new(&t.ctx);
    auth.register(&member_request("jane.doe", 1)).await.unwrap();

    let posts = PostService::new(&t.ctx);
    let post = posts.create("jane.doe", "Hello", "World").await.unwrap();
    posts.add_comment(&post.id, "jane.doe", "Me too").await.unwrap();

    let analytics = AdminService::new(&t.ctx).analytics().await.unwrap();
    assert!(analytics.total_users >= 1);
    assert!(analytics.total_posts >= 1);
    assert!(analytics.total_comments >= 1);

    let jane = analytics
        .members
        .iter()
        .find(|m| m.username == "jane.doe")
        .unwrap();
    assert_eq!(jane.posts[0].post_id, post.id);
    assert_eq!(jane.posts[0].total_comments, 1);
}

#[tokio::test]
async fn test_seeding_is_repeatable() {
    let t = TestContext::new();
    let seeder = DataSeeder::new(&t.ctx);

    assert_eq!(seeder.seed(false).await.unwrap(), 2);
    assert_eq!(t.store.sizes(), (2, 4, 8));

    // Existing members are skipped
    assert_eq!(seeder.seed(false).await.unwrap(), 0);
    assert_eq!(t.store.sizes(), (2, 4, 8));

    let john = MemberService::new(&t.ctx)
        .find_by_username("john.doe")
        .await
        .unwrap();
    assert_eq!(john.role, Role::Admin);

    let page = PostService::new(&t.ctx)
        .list(PageRequest::new(0, 10))
        .await
        .unwrap();
    assert_eq!(page.content[0].title, "First Post by john.doe");
    assert_eq!(page.content[0].comments.len(), 2);
}
