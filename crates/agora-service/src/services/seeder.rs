//! Start-up demo data
//!
//! Registers two demo members through the normal registration path and
//! gives each a couple of posts with comments. Members that already exist
//! are skipped, so seeding is safe to run on every start.

use agora_core::entities::{Member, NewComment, NewPost, Role};
use rand::seq::SliceRandom;
use tracing::{info, instrument, warn};

use crate::dto::MemberRequest;

use super::auth::AuthService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::member::MemberService;

const SAMPLE_COMMENTS: &[&str] = &[
    "This is a great post!",
    "Thanks for sharing your thoughts.",
    "Very insightful!",
    "I totally agree!",
    "Could you elaborate more on this?",
    "Interesting perspective!",
];

const COMMENTS_PER_POST: usize = 2;

struct DemoMember {
    username: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    phone_number: &'static str,
    password: &'static str,
    role: Role,
}

const DEMO_MEMBERS: &[DemoMember] = &[
    DemoMember {
        username: "john.doe",
        first_name: "John",
        last_name: "Doe",
        email: "john.doe@email.com",
        phone_number: "9876543210",
        password: "Admin@123",
        role: Role::Admin,
    },
    DemoMember {
        username: "jane.doe",
        first_name: "Jane",
        last_name: "Doe",
        email: "jane.doe@email.com",
        phone_number: "9876543211",
        password: "User@1234",
        role: Role::User,
    },
];

impl DemoMember {
    fn request(&self) -> MemberRequest {
        MemberRequest {
            member_id: None,
            username: self.username.to_string(),
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            email: self.email.to_string(),
            phone_number: self.phone_number.to_string(),
            password: self.password.to_string(),
            repeat_password: self.password.to_string(),
            user_role: Some(self.role.as_str().to_string()),
        }
    }
}

/// Demo data seeder
pub struct DataSeeder<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DataSeeder<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Seed the demo members, optionally wiping members, posts and comments
    /// first. Returns how many members were inserted.
    #[instrument(skip(self))]
    pub async fn seed(&self, refresh_database: bool) -> ServiceResult<usize> {
        if refresh_database {
            warn!("Refreshing database: deleting all members, posts and comments");
            self.ctx.member_repo().delete_all().await?;
            self.ctx.post_repo().delete_all().await?;
            self.ctx.comment_repo().delete_all().await?;
            if let Some(cache) = self.ctx.member_cache() {
                cache.clear().await;
            }
        }

        let mut inserted = 0;
        for demo in DEMO_MEMBERS {
            if self.ctx.member_repo().find_by_username(demo.username).await?.is_some() {
                info!(username = demo.username, "Member already exists, skipping");
                continue;
            }

            info!(username = demo.username, "Inserting member");
            AuthService::new(self.ctx).register(&demo.request()).await?;

            let member = MemberService::new(self.ctx)
                .find_by_username(demo.username)
                .await?;
            self.generate_posts_and_comments(&member).await?;
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn generate_posts_and_comments(&self, member: &Member) -> ServiceResult<()> {
        let drafts = [
            (
                format!("First Post by {}", member.username),
                "This is a sample post content.",
            ),
            (
                format!("Another Post by {}", member.username),
                "Exploring content creation.",
            ),
        ];

        for (title, content) in drafts {
            let post = self
                .ctx
                .post_repo()
                .create(NewPost::new(member.clone(), title, content))
                .await?;

            let picked: Vec<&str> = {
                let mut rng = rand::thread_rng();
                (0..COMMENTS_PER_POST)
                    .filter_map(|_| SAMPLE_COMMENTS.choose(&mut rng).copied())
                    .collect()
            };

            let mut comment_ids = Vec::with_capacity(picked.len());
            for text in picked {
                let comment = self
                    .ctx
                    .comment_repo()
                    .create(NewComment::new(member.clone(), &post.id, text))
                    .await?;
                comment_ids.push(comment.id);
            }

            self.ctx
                .post_repo()
                .set_comment_ids(&post.id, &comment_ids)
                .await?;
        }

        info!(username = %member.username, "Generated demo posts and comments");
        Ok(())
    }
}
