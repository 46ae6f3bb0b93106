//! Member entity - a registered account, keyed by a sequential business id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;

/// Member entity
///
/// `record_id` is the store key; `member_id` is the business key handed out
/// sequentially at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub record_id: String,
    pub member_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// "First Last", as shown in analytics
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Apply the present fields of a patch; absent fields are left untouched
    pub fn apply_patch(&mut self, patch: &MemberPatch) {
        if let Some(first_name) = &patch.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name.clone_from(last_name);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        if let Some(phone_number) = &patch.phone_number {
            self.phone_number.clone_from(phone_number);
        }
        self.updated_at = Utc::now();
    }

    /// Promote to the admin role
    pub fn promote_to_admin(&mut self) {
        self.role = Role::Admin;
        self.updated_at = Utc::now();
    }
}

/// A member that has not been persisted yet (no record id, no member id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
}

impl NewMember {
    /// Materialize into a member with the ids assigned by the store
    pub fn into_member(self, record_id: String, member_id: i64) -> Member {
        let now = Utc::now();
        Member {
            record_id,
            member_id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            role: self.role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a member's profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl MemberPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
    }
}

/// How a member is addressed by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberIdentifier {
    MemberId(i64),
    Username(String),
}

impl std::fmt::Display for MemberIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemberId(id) => write!(f, "member #{id}"),
            Self::Username(name) => write!(f, "member '{name}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Member {
        NewMember {
            username: "jane.doe".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane.doe@email.com".to_string(),
            phone_number: "9876543211".to_string(),
            role: Role::User,
        }
        .into_member("rec-1".to_string(), 2)
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "Jane Doe");
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut member = sample();
        member.apply_patch(&MemberPatch {
            first_name: Some("Janet".to_string()),
            phone_number: Some("9123456780".to_string()),
            ..MemberPatch::default()
        });

        assert_eq!(member.first_name, "Janet");
        assert_eq!(member.last_name, "Doe");
        assert_eq!(member.email, "jane.doe@email.com");
        assert_eq!(member.phone_number, "9123456780");
    }

    #[test]
    fn test_promote_to_admin() {
        let mut member = sample();
        assert!(!member.is_admin());
        member.promote_to_admin();
        assert!(member.is_admin());
    }

    #[test]
    fn test_empty_patch() {
        assert!(MemberPatch::default().is_empty());
        assert!(!MemberPatch {
            email: Some("x@y.com".to_string()),
            ..MemberPatch::default()
        }
        .is_empty());
    }
}
