//! Comment entity <-> model mapper

use agora_core::entities::{Comment, Member};

use super::member::parse_role;
use crate::models::CommentModel;

/// Convert a joined comments/members row to a Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            author: Member {
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
            },
            post_id: model.post_id,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
