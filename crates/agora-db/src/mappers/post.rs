//! Post entity <-> model mapper

use agora_core::entities::{Member, Post};

use super::member::parse_role;
use crate::models::PostModel;

/// Convert a joined posts/members row to a Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        let author = Member {
            record_id: model.author_record_id,
            member_id: model.author_member_id,
            username: model.author_username,
            first_name: model.author_first_name,
            last_name: model.author_last_name,
            email: model.author_email,
            phone_number: model.author_phone_number,
            role: parse_role(&model.author_role),
            created_at: model.author_created_at,
            updated_at: model.author_updated_at,
        };

        Post {
            id: model.id,
            author,
            title: model.title,
            content: model.content,
            comment_ids: model.comment_ids,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
