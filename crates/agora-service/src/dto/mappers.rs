//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use agora_core::entities::{Comment, Member, NewMember, Post};
use agora_core::value_objects::{mask_email, mask_phone};

use super::requests::MemberRequest;
use super::responses::{CommentResponse, MemberResponse, PostResponse};

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.member_id,
            username: member.username.clone(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            phone_number: member.phone_number.clone(),
            user_role: member.role,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

impl MemberResponse {
    /// View with email and phone masked; every other field unchanged
    pub fn masked(member: &Member) -> Self {
        Self {
            email: mask_email(Some(&member.email)),
            phone_number: mask_phone(Some(&member.phone_number)),
            ..Self::from(member)
        }
    }

    /// Rebuild a member from the view (record id and timestamps are fresh)
    pub fn into_member(self, record_id: String) -> Member {
        NewMember {
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            role: self.user_role,
        }
        .into_member(record_id, self.member_id)
    }
}

impl MemberRequest {
    /// Candidate member carrying the resolved role
    pub fn to_new_member(&self, role: agora_core::entities::Role) -> NewMember {
        NewMember {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            role,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            content: comment.content.clone(),
            member: MemberResponse::masked(&comment.author),
            post_id: comment.post_id.clone(),
            created_at: comment.created_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

impl PostResponse {
    /// Build a post view with its hydrated comments
    pub fn new(post: &Post, comments: &[Comment]) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            member: MemberResponse::masked(&post.author),
            created_at: post.created_at,
            comments: comments.iter().map(CommentResponse::from).collect(),
        }
    }
}
