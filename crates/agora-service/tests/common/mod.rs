//! Shared fixtures for service tests: in-memory store, identity provider
//! and cache wired into a `ServiceContext`

#![allow(dead_code)]

use std::sync::Arc;

use agora_cache::InMemoryMemberCache;
use agora_common::{TokenSigner, TokenVerifier};
use agora_core::events::DualWriteGap;
use agora_core::traits::RegistrationReconciler;
use agora_db::{
    InMemoryCommentRepository, InMemoryMemberRepository, InMemoryPostRepository, InMemoryStore,
};
use agora_idp::InMemoryIdentityProvider;
use agora_service::dto::MemberRequest;
use agora_service::ServiceContext;
use async_trait::async_trait;
use parking_lot::Mutex;

pub const SECRET: &str = "service-test-secret";
pub const PASSWORD: &str = "Secret@123";

/// Keeps every gap it is handed
#[derive(Default)]
pub struct RecordingReconciler {
    gaps: Mutex<Vec<DualWriteGap>>,
}

impl RecordingReconciler {
    pub fn gaps(&self) -> Vec<DualWriteGap> {
        self.gaps.lock().clone()
    }
}

#[async_trait]
impl RegistrationReconciler for RecordingReconciler {
    async fn record_gap(&self, gap: DualWriteGap) {
        self.gaps.lock().push(gap);
    }
}

pub struct TestContext {
    pub ctx: ServiceContext,
    pub store: InMemoryStore,
    pub idp: Arc<InMemoryIdentityProvider>,
    pub reconciler: Arc<RecordingReconciler>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let idp = Arc::new(InMemoryIdentityProvider::new(TokenSigner::new(
            SECRET, None, 300, 1800,
        )));
        let reconciler = Arc::new(RecordingReconciler::default());

        let ctx = ServiceContext::builder()
            .member_repo(Arc::new(InMemoryMemberRepository::new(store.clone())))
            .post_repo(Arc::new(InMemoryPostRepository::new(store.clone())))
            .comment_repo(Arc::new(InMemoryCommentRepository::new(store.clone())))
            .identity_provider(idp.clone())
            .token_verifier(Arc::new(TokenVerifier::hs256(SECRET)))
            .member_cache(Arc::new(InMemoryMemberCache::new()))
            .reconciler(reconciler.clone())
            .build()
            .expect("context builds");

        Self {
            ctx,
            store,
            idp,
            reconciler,
        }
    }
}

/// A valid registration request; `n` keeps email and phone distinct
pub fn member_request(username: &str, n: u8) -> MemberRequest {
    MemberRequest {
        member_id: None,
        username: username.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: format!("{username}@email.com"),
        phone_number: format!("98765432{n:02}"),
        password: PASSWORD.to_string(),
        repeat_password: PASSWORD.to_string(),
        user_role: None,
    }
}
