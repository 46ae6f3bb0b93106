//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use agora_core::entities::{Member, MemberIdentifier, NewMember};
use agora_core::traits::{MemberRepository, RepoResult};
use agora_core::value_objects::{Page, PageRequest};

use crate::models::MemberModel;

use super::error::{map_db_error, map_member_write_error, member_not_found};

/// Advisory lock key serializing member id assignment
const MEMBER_ID_LOCK: i64 = 0x6167_6f72_615f_6d69;

const MEMBER_COLUMNS: &str = "record_id, member_id, username, first_name, last_name, email, \
                              phone_number, role, created_at, updated_at";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> RepoResult<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE {filter}");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_member_id(&self, member_id: i64) -> RepoResult<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE member_id = $1");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
        self.find_one("lower(email) = lower($1)", email).await
    }

    #[instrument(skip(self))]
    async fn find_by_phone_number(&self, phone_number: &str) -> RepoResult<Option<Member>> {
        self.find_one("phone_number = $1", phone_number).await
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        self.find_one("lower(username) = lower($1)", username).await
    }

    #[instrument(skip(self))]
    async fn find_by_email_or_username(&self, identifier: &str) -> RepoResult<Option<Member>> {
        self.find_one(
            "lower(email) = lower($1) OR lower(username) = lower($1) ORDER BY member_id LIMIT 1",
            identifier,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn find_conflicting(
        &self,
        email: Option<&str>,
        phone_number: Option<&str>,
        exclude: &MemberIdentifier,
    ) -> RepoResult<Option<Member>> {
        if email.is_none() && phone_number.is_none() {
            return Ok(None);
        }

        let owner_filter = match exclude {
            MemberIdentifier::MemberId(_) => "member_id <> $3",
            MemberIdentifier::Username(_) => "lower(username) <> lower($3)",
        };
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM members \
             WHERE ((lower(email) = lower($1)) OR (phone_number = $2)) AND {owner_filter} \
             ORDER BY member_id LIMIT 1"
        );

        let query = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(email)
            .bind(phone_number);
        let query = match exclude {
            MemberIdentifier::MemberId(id) => query.bind(*id),
            MemberIdentifier::Username(name) => query.bind(name.clone()),
        };

        let result = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Page<Member>> {
        let sql =
            format!("SELECT {MEMBER_COLUMNS} FROM members ORDER BY member_id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = self.count().await?;
        Ok(Page::new(
            rows.into_iter().map(Member::from).collect(),
            page,
            total,
        ))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members ORDER BY member_id");
        let rows = sqlx::query_as::<_, MemberModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self), fields(username = %member.username))]
    async fn create_with_next_id(&self, member: NewMember) -> RepoResult<Member> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Held until commit/rollback, so concurrent creations queue here
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(MEMBER_ID_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let next_id: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(member_id), 0) + 1 FROM members")
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;

        let member = member.into_member(Uuid::new_v4().to_string(), next_id);
        sqlx::query(
            r"
            INSERT INTO members (record_id, member_id, username, first_name, last_name, email,
                                 phone_number, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&member.record_id)
        .bind(member.member_id)
        .bind(&member.username)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone_number)
        .bind(member.role.as_str())
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_member_write_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(member)
    }

    #[instrument(skip(self), fields(member_id = member.member_id))]
    async fn update(&self, member: &Member) -> RepoResult<Member> {
        let sql = format!(
            "UPDATE members \
             SET username = $2, first_name = $3, last_name = $4, email = $5, phone_number = $6, \
                 role = $7, updated_at = NOW() \
             WHERE record_id = $1 \
             RETURNING {MEMBER_COLUMNS}"
        );
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(&member.record_id)
            .bind(&member.username)
            .bind(&member.first_name)
            .bind(&member.last_name)
            .bind(&member.email)
            .bind(&member.phone_number)
            .bind(member.role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_member_write_error)?;

        result
            .map(Member::from)
            .ok_or_else(|| member_not_found(member.member_id))
    }

    #[instrument(skip(self))]
    async fn delete_by_member_id(&self, member_id: i64) -> RepoResult<bool> {
        // Posts and comments keep their author_member_id and stay behind
        let result = sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(member_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> RepoResult<()> {
        sqlx::query("DELETE FROM members")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
