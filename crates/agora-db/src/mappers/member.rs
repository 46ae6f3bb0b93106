//! Member entity <-> model mapper

use agora_core::entities::{Member, Role};

use crate::models::MemberModel;

/// Stored role names are written by this crate; anything unreadable is
/// treated as the least privileged role
pub(crate) fn parse_role(raw: &str) -> Role {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(role = raw, "Unknown role in members row, treating as user");
        Role::User
    })
}

/// Convert MemberModel to Member entity
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            record_id: model.record_id,
            member_id: model.member_id,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone_number: model.phone_number,
            role: parse_role(&model.role),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
