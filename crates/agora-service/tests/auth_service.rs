//! Registration, login and profile flows across the identity provider and
//! the member store

mod common;

use agora_core::entities::Role;
use agora_core::events::DualWriteOperation;
use agora_core::IdentityError;
use agora_service::dto::{LoginRequest, UpdateMemberRequest};
use agora_service::services::member::PASSWORDS_DO_NOT_MATCH;
use agora_service::services::uniqueness::USERNAME_TAKEN;
use agora_service::{AdminService, AuthService, MemberService, ProfileService, ServiceError};
use common::{member_request, TestContext, PASSWORD};

fn login(identifier: &str, password: &str) -> LoginRequest {
    LoginRequest {
        user_identifier: identifier.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_writes_both_sides() {
    let t = TestContext::new();

    let member = AuthService::new(&t.ctx)
        .register(&member_request("jane.doe", 1))
        .await
        .unwrap();

    assert_eq!(member.member_id, 1);
    assert_eq!(member.role, Role::User);
    assert_eq!(t.idp.user_count(), 1);
    assert_eq!(t.idp.roles_of("jane.doe"), vec![Role::User]);
    assert!(t.reconciler.gaps().is_empty());
}

#[tokio::test]
async fn test_register_with_requested_admin_role() {
    let t = TestContext::new();
    let mut request = member_request("john.doe", 2);
    request.user_role = Some("ADMIN".to_string());

    let member = AuthService::new(&t.ctx).register(&request).await.unwrap();
    assert_eq!(member.role, Role::Admin);
    assert_eq!(t.idp.roles_of("john.doe"), vec![Role::Admin]);
}

#[tokio::test]
async fn test_register_unknown_role_touches_nothing() {
    let t = TestContext::new();
    let mut request = member_request("jane.doe", 1);
    request.user_role = Some("superuser".to_string());

    match AuthService::new(&t.ctx).register(&request).await.unwrap_err() {
        ServiceError::Validation(messages) => {
            assert_eq!(messages, vec!["Unknown role: superuser"]);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(t.idp.user_count(), 0);
}

#[tokio::test]
async fn test_register_duplicate_username_is_rejected_before_provider() {
    let t = TestContext::new();
    let auth = AuthService::new(&t.ctx);
    auth.register(&member_request("jane.doe", 1)).await.unwrap();

    match auth
        .register(&member_request("JANE.DOE", 2))
        .await
        .unwrap_err()
    {
        ServiceError::Validation(messages) => assert!(messages.contains(&USERNAME_TAKEN.to_string())),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(t.idp.user_count(), 1);
}

#[tokio::test]
async fn test_failed_local_write_is_reported_as_gap() {
    let t = TestContext::new();
    let mut request = member_request("jane.doe", 1);
    request.repeat_password = "Different@123".to_string();

    match AuthService::new(&t.ctx).register(&request).await.unwrap_err() {
        ServiceError::Validation(messages) => assert_eq!(messages, vec![PASSWORDS_DO_NOT_MATCH]),
        other => panic!("unexpected {other:?}"),
    }

    // The provider user stays; the gap is handed to the reconciler
    assert_eq!(t.idp.user_count(), 1);
    let gaps = t.reconciler.gaps();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].operation, DualWriteOperation::Registration);
    assert_eq!(gaps[0].username, "jane.doe");
    assert_eq!(t.store.sizes().0, 0);
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let t = TestContext::new();
    let auth = AuthService::new(&t.ctx);
    auth.register(&member_request("jane.doe", 1)).await.unwrap();

    let by_name = auth.login(&login("jane.doe", PASSWORD)).await.unwrap();
    assert_eq!(by_name.member_id, 1);
    assert_eq!(by_name.role, "[ROLE_USER]");
    assert!(!by_name.access_token.is_empty());

    let by_email = auth
        .login(&login("jane.doe@email.com", PASSWORD))
        .await
        .unwrap();
    assert_eq!(by_email.member_id, 1);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let t = TestContext::new();
    let auth = AuthService::new(&t.ctx);
    auth.register(&member_request("jane.doe", 1)).await.unwrap();

    let err = auth
        .login(&login("jane.doe", "Wrong@1234"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Identity(IdentityError::InvalidCredentials)
    ));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let t = TestContext::new();
    let auth = AuthService::new(&t.ctx);
    auth.register(&member_request("jane.doe", 1)).await.unwrap();
    let session = auth.login(&login("jane.doe", PASSWORD)).await.unwrap();

    let refreshed = auth.refresh(&session.refresh_token).await.unwrap();
    assert!(!refreshed.access_token.is_empty());
    assert_eq!(refreshed.token_type.as_deref(), Some("Bearer"));
    assert_eq!(refreshed.expires_in.as_deref(), Some("300"));

    assert!(auth.refresh("not-a-token").await.is_err());
}

#[tokio::test]
async fn test_profile_update_reaches_provider_and_store() {
    let t = TestContext::new();
    let auth = AuthService::new(&t.ctx);
    auth.register(&member_request("jane.doe", 1)).await.unwrap();

    let request = UpdateMemberRequest {
        // Re-submitting one's own email is fine
        email: Some("jane.doe@email.com".to_string()),
        first_name: Some("Janet".to_string()),
        password: Some("Changed@123".to_string()),
        ..UpdateMemberRequest::default()
    };
    let updated = ProfileService::new(&t.ctx)
        .update("jane.doe", &request)
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Janet");

    // The new password is live at the provider
    assert!(auth.login(&login("jane.doe", PASSWORD)).await.is_err());
    assert!(auth.login(&login("jane.doe", "Changed@123")).await.is_ok());
}

#[tokio::test]
async fn test_profile_update_rejects_taken_phone() {
    let t = TestContext::new();
    let auth = AuthService::new(&t.ctx);
    auth.register(&member_request("jane.doe", 1)).await.unwrap();
    auth.register(&member_request("john.doe", 2)).await.unwrap();

    let request = UpdateMemberRequest {
        phone_number: Some("9876543202".to_string()),
        ..UpdateMemberRequest::default()
    };
    let err = ProfileService::new(&t.ctx)
        .update("jane.doe", &request)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_profile_update_without_provider_user() {
    let t = TestContext::new();
    // Local member only; the provider never heard of them
    MemberService::new(&t.ctx)
        .create(&member_request("ghost", 3), Role::User)
        .await
        .unwrap();

    let request = UpdateMemberRequest {
        last_name: Some("Gone".to_string()),
        ..UpdateMemberRequest::default()
    };
    match ProfileService::new(&t.ctx)
        .update("ghost", &request)
        .await
        .unwrap_err()
    {
        ServiceError::Application(msg) => assert_eq!(msg, "User not found in Keycloak."),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        MemberService::new(&t.ctx)
            .find_by_username("ghost")
            .await
            .unwrap()
            .last_name,
        "Doe"
    );
}

#[tokio::test]
async fn test_elevation_grants_admin_on_both_sides() {
    let t = TestContext::new();
    let auth = AuthService::new(&t.ctx);
    auth.register(&member_request("jane.doe", 1)).await.unwrap();

    let elevated = AdminService::new(&t.ctx)
        .assign_admin_roles("jane.doe")
        .await
        .unwrap();
    assert_eq!(elevated.role, Role::Admin);
    assert!(t.idp.roles_of("jane.doe").contains(&Role::Admin));

    let session = auth.login(&login("jane.doe", PASSWORD)).await.unwrap();
    assert!(session.role.contains("ROLE_ADMIN"));
}

#[tokio::test]
async fn test_elevation_of_unknown_member() {
    let t = TestContext::new();
    let err = AdminService::new(&t.ctx)
        .assign_admin_roles("nobody")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}
