//! In-memory implementation of CommentRepository

use async_trait::async_trait;
use uuid::Uuid;

use agora_core::entities::{Comment, NewComment};
use agora_core::traits::{CommentRepository, RepoResult};
use agora_core::value_objects::SortDirection;

use super::store::{CommentRecord, InMemoryStore};

#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    store: InMemoryStore,
}

impl InMemoryCommentRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Comment>> {
        let data = self.store.inner.read();
        Ok(data
            .comments
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| data.hydrate_comment(c)))
    }

    async fn find_by_post_id(
        &self,
        post_id: &str,
        order: SortDirection,
    ) -> RepoResult<Vec<Comment>> {
        let data = self.store.inner.read();
        let mut comments: Vec<Comment> = data
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .filter_map(|c| data.hydrate_comment(c))
            .collect();

        if order == SortDirection::Descending {
            comments.reverse();
            comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        } else {
            comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }
        Ok(comments)
    }

    async fn count_by_post_id(&self, post_id: &str) -> RepoResult<i64> {
        let data = self.store.inner.read();
        Ok(data.comments.iter().filter(|c| c.post_id == post_id).count() as i64)
    }

    async fn create(&self, comment: NewComment) -> RepoResult<Comment> {
        let comment = comment.into_comment(Uuid::new_v4().to_string());
        let record = CommentRecord {
            id: comment.id.clone(),
            author_member_id: comment.author.member_id,
            post_id: comment.post_id.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        };
        self.store.inner.write().comments.push(record);
        Ok(comment)
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        let mut data = self.store.inner.write();
        let before = data.comments.len();
        data.comments.retain(|c| c.id != id);
        Ok(data.comments.len() < before)
    }

    async fn delete_by_id_and_author(&self, id: &str, author_member_id: i64) -> RepoResult<bool> {
        let mut data = self.store.inner.write();
        let before = data.comments.len();
        data.comments
            .retain(|c| !(c.id == id && c.author_member_id == author_member_id));
        Ok(data.comments.len() < before)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.store.inner.read().comments.len() as i64)
    }

    async fn delete_all(&self) -> RepoResult<()> {
        self.store.inner.write().comments.clear();
        Ok(())
    }
}
