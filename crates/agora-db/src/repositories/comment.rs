//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use agora_core::entities::{Comment, NewComment};
use agora_core::traits::{CommentRepository, RepoResult};
use agora_core::value_objects::SortDirection;

use crate::models::CommentModel;

use super::error::map_db_error;

/// Comments joined with their author
const COMMENT_SELECT: &str = r"
    SELECT c.id, c.post_id, c.content, c.created_at, c.updated_at,
           m.record_id AS author_record_id, m.member_id AS author_member_id,
           m.username AS author_username, m.first_name AS author_first_name,
           m.last_name AS author_last_name, m.email AS author_email,
           m.phone_number AS author_phone_number, m.role AS author_role,
           m.created_at AS author_created_at, m.updated_at AS author_updated_at
    FROM comments c
    JOIN members m ON m.member_id = c.author_member_id
";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Comment>> {
        let sql = format!("{COMMENT_SELECT} WHERE c.id = $1");
        let result = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_post_id(
        &self,
        post_id: &str,
        order: SortDirection,
    ) -> RepoResult<Vec<Comment>> {
        let direction = match order {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        let sql = format!(
            "{COMMENT_SELECT} WHERE c.post_id = $1 ORDER BY c.created_at {direction}, c.id {direction}"
        );
        let rows = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_post_id(&self, post_id: &str) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, comment), fields(post_id = %comment.post_id))]
    async fn create(&self, comment: NewComment) -> RepoResult<Comment> {
        let comment = comment.into_comment(Uuid::new_v4().to_string());
        sqlx::query(
            r"
            INSERT INTO comments (id, author_member_id, post_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&comment.id)
        .bind(comment.author.member_id)
        .bind(&comment.post_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(comment)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_id_and_author(&self, id: &str, author_member_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND author_member_id = $2")
            .bind(id)
            .bind(author_member_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> RepoResult<()> {
        sqlx::query("DELETE FROM comments")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
