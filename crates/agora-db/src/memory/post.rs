//! In-memory implementation of PostRepository

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use agora_core::entities::{NewPost, Post};
use agora_core::traits::{PostRepository, RepoResult};
use agora_core::value_objects::{Page, PageRequest};

use super::store::{InMemoryStore, PostRecord};

#[derive(Debug, Clone)]
pub struct InMemoryPostRepository {
    store: InMemoryStore,
}

impl InMemoryPostRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        let data = self.store.inner.read();
        Ok(data
            .posts
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| data.hydrate_post(p)))
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<Post>> {
        let posts = self.list_all().await?;
        Ok(Page::from_slice(&posts, page))
    }

    async fn list_all(&self) -> RepoResult<Vec<Post>> {
        let data = self.store.inner.read();
        Ok(data
            .posts
            .iter()
            .filter_map(|p| data.hydrate_post(p))
            .collect())
    }

    async fn find_by_author(&self, member_id: i64) -> RepoResult<Vec<Post>> {
        let data = self.store.inner.read();
        let mut posts: Vec<Post> = data
            .posts
            .iter()
            .filter(|p| p.author_member_id == member_id)
            .filter_map(|p| data.hydrate_post(p))
            .collect();
        // Stable sort keeps later insertions first among equal timestamps
        posts.reverse();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn create(&self, post: NewPost) -> RepoResult<Post> {
        let post = post.into_post(Uuid::new_v4().to_string());
        let record = PostRecord {
            id: post.id.clone(),
            author_member_id: post.author.member_id,
            title: post.title.clone(),
            content: post.content.clone(),
            comment_ids: post.comment_ids.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        };
        self.store.inner.write().posts.push(record);
        Ok(post)
    }

    async fn append_comment_id(&self, post_id: &str, comment_id: &str) -> RepoResult<()> {
        let mut data = self.store.inner.write();
        if let Some(post) = data.posts.iter_mut().find(|p| p.id == post_id) {
            post.comment_ids.push(comment_id.to_string());
            post.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_comment_ids(&self, post_id: &str, comment_ids: &[String]) -> RepoResult<()> {
        let mut data = self.store.inner.write();
        if let Some(post) = data.posts.iter_mut().find(|p| p.id == post_id) {
            post.comment_ids = comment_ids.to_vec();
            post.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        let mut data = self.store.inner.write();
        let before = data.posts.len();
        data.posts.retain(|p| p.id != id);
        Ok(data.posts.len() < before)
    }

    async fn delete_by_id_and_author(&self, id: &str, author_member_id: i64) -> RepoResult<bool> {
        let mut data = self.store.inner.write();
        let before = data.posts.len();
        data.posts
            .retain(|p| !(p.id == id && p.author_member_id == author_member_id));
        Ok(data.posts.len() < before)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.store.inner.read().posts.len() as i64)
    }

    async fn delete_all(&self) -> RepoResult<()> {
        self.store.inner.write().posts.clear();
        Ok(())
    }
}
