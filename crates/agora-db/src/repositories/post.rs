//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use agora_core::entities::{NewPost, Post};
use agora_core::traits::{PostRepository, RepoResult};
use agora_core::value_objects::{Page, PageRequest};

use crate::models::PostModel;

use super::error::map_db_error;

/// Posts joined with their author
const POST_SELECT: &str = r"
    SELECT p.id, p.title, p.content, p.comment_ids, p.created_at, p.updated_at,
           m.record_id AS author_record_id, m.member_id AS author_member_id,
           m.username AS author_username, m.first_name AS author_first_name,
           m.last_name AS author_last_name, m.email AS author_email,
           m.phone_number AS author_phone_number, m.role AS author_role,
           m.created_at AS author_created_at, m.updated_at AS author_updated_at
    FROM posts p
    JOIN members m ON m.member_id = p.author_member_id
";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        let sql = format!("{POST_SELECT} WHERE p.id = $1");
        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Page<Post>> {
        let sql = format!("{POST_SELECT} ORDER BY p.created_at, p.id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, PostModel>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = self.count().await?;
        Ok(Page::new(
            rows.into_iter().map(Post::from).collect(),
            page,
            total,
        ))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Post>> {
        let sql = format!("{POST_SELECT} ORDER BY p.created_at, p.id");
        let rows = sqlx::query_as::<_, PostModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, member_id: i64) -> RepoResult<Vec<Post>> {
        let sql = format!(
            "{POST_SELECT} WHERE p.author_member_id = $1 ORDER BY p.created_at DESC, p.id DESC"
        );
        let rows = sqlx::query_as::<_, PostModel>(&sql)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(author = %post.author.username))]
    async fn create(&self, post: NewPost) -> RepoResult<Post> {
        let post = post.into_post(Uuid::new_v4().to_string());
        sqlx::query(
            r"
            INSERT INTO posts (id, author_member_id, title, content, comment_ids, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&post.id)
        .bind(post.author.member_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.comment_ids)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(post)
    }

    #[instrument(skip(self))]
    async fn append_comment_id(&self, post_id: &str, comment_id: &str) -> RepoResult<()> {
        sqlx::query(
            "UPDATE posts SET comment_ids = array_append(comment_ids, $2), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(post_id)
        .bind(comment_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_comment_ids(&self, post_id: &str, comment_ids: &[String]) -> RepoResult<()> {
        sqlx::query("UPDATE posts SET comment_ids = $2, updated_at = NOW() WHERE id = $1")
            .bind(post_id)
            .bind(comment_ids)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_id_and_author(&self, id: &str, author_member_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_member_id = $2")
            .bind(id)
            .bind(author_member_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> RepoResult<()> {
        sqlx::query("DELETE FROM posts")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
