//! Admin area: analytics, the member listing and role elevation

use agora_core::entities::{Member, Role};
use agora_core::events::{DualWriteGap, DualWriteOperation};
use agora_core::value_objects::{Page, PageRequest};
use agora_core::IdentityError;
use tracing::{info, instrument};

use crate::dto::{AnalyticsResponse, MemberAnalytics, PostAnalytics, TopPost};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::member::MemberService;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Platform-wide activity summary.
    ///
    /// Members appear in member id order, each with their posts newest
    /// first. The top post is the first post in store order holding the
    /// highest comment count.
    #[instrument(skip(self))]
    pub async fn analytics(&self) -> ServiceResult<AnalyticsResponse> {
        let total_users = self.ctx.member_repo().count().await?;
        let total_posts = self.ctx.post_repo().count().await?;
        let total_comments = self.ctx.comment_repo().count().await?;

        let mut members = Vec::new();
        for member in self.ctx.member_repo().list_all().await? {
            let authored = self.ctx.post_repo().find_by_author(member.member_id).await?;

            let mut posts = Vec::with_capacity(authored.len());
            for post in authored {
                posts.push(PostAnalytics {
                    total_comments: self.ctx.comment_repo().count_by_post_id(&post.id).await?,
                    post_title: post.title,
                    post_id: post.id,
                });
            }

            members.push(MemberAnalytics {
                username: member.username,
                total_posts: posts.len(),
                posts,
            });
        }

        let mut top_post: Option<TopPost> = None;
        for post in self.ctx.post_repo().list_all().await? {
            let count = self.ctx.comment_repo().count_by_post_id(&post.id).await?;
            if top_post.as_ref().is_none_or(|top| count > top.total_comments) {
                top_post = Some(TopPost {
                    member: post.author.full_name(),
                    post_title: post.title,
                    post_id: post.id,
                    total_comments: count,
                });
            }
        }

        Ok(AnalyticsResponse {
            total_users,
            total_posts,
            total_comments,
            members,
            top_post,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, page: PageRequest) -> ServiceResult<Page<Member>> {
        MemberService::new(self.ctx).list(page).await
    }

    /// Grant the admin realm role, then record it on the local member
    #[instrument(skip(self))]
    pub async fn assign_admin_roles(&self, username: &str) -> ServiceResult<Member> {
        let members = MemberService::new(self.ctx);
        let member = members.find_by_username(username).await?;

        let idp = self.ctx.identity_provider();
        let token = idp.admin_token().await?;
        let user_id = idp
            .find_user_id(&token, &member.username)
            .await?
            .ok_or(IdentityError::UserNotFound)?;
        let role = idp.find_role(&token, Role::Admin.as_str()).await?;
        idp.assign_role(&token, &user_id, &role).await?;

        match members.assign_admin_role(member).await {
            Ok(updated) => {
                info!(member_id = updated.member_id, "Member elevated to admin");
                Ok(updated)
            }
            Err(e) => {
                self.ctx
                    .reconciler()
                    .record_gap(DualWriteGap::new(
                        DualWriteOperation::RoleElevation,
                        username,
                        e.to_string(),
                    ))
                    .await;
                Err(e)
            }
        }
    }
}
