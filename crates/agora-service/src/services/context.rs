//! Service context - dependency container for services
//!
//! Holds the repositories, the identity provider, the optional member cache
//! and the dual-write reconciler needed by services.

use std::sync::Arc;

use agora_common::TokenVerifier;
use agora_core::traits::{
    CommentRepository, IdentityProvider, MemberCache, MemberRepository, PostRepository,
    RegistrationReconciler,
};

use super::error::{ServiceError, ServiceResult};
use super::reconciler::LoggingReconciler;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Member, post and comment repositories
/// - The identity provider
/// - The token verifier used to read roles out of freshly issued tokens
/// - The member read cache, when one is configured
/// - The reconciler that receives dual-write gaps
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    // Identity
    identity_provider: Arc<dyn IdentityProvider>,
    token_verifier: Arc<TokenVerifier>,

    // Cache
    member_cache: Option<Arc<dyn MemberCache>>,

    // Dual-write gaps
    reconciler: Arc<dyn RegistrationReconciler>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    // === Identity ===

    /// Get the identity provider
    pub fn identity_provider(&self) -> &dyn IdentityProvider {
        self.identity_provider.as_ref()
    }

    pub fn token_verifier(&self) -> &TokenVerifier {
        self.token_verifier.as_ref()
    }

    // === Cache ===

    /// Get the member cache, if one is configured
    pub fn member_cache(&self) -> Option<&dyn MemberCache> {
        self.member_cache.as_deref()
    }

    // === Reconciliation ===

    pub fn reconciler(&self) -> &dyn RegistrationReconciler {
        self.reconciler.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("identity_provider", &"...")
            .field("member_cache", &self.member_cache.is_some())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    token_verifier: Option<Arc<TokenVerifier>>,
    member_cache: Option<Arc<dyn MemberCache>>,
    reconciler: Option<Arc<dyn RegistrationReconciler>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn token_verifier(mut self, verifier: Arc<TokenVerifier>) -> Self {
        self.token_verifier = Some(verifier);
        self
    }

    /// Optional; without a cache every read goes to the store
    pub fn member_cache(mut self, cache: Arc<dyn MemberCache>) -> Self {
        self.member_cache = Some(cache);
        self
    }

    /// Optional; defaults to [`LoggingReconciler`]
    pub fn reconciler(mut self, reconciler: Arc<dyn RegistrationReconciler>) -> Self {
        self.reconciler = Some(reconciler);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::internal("member_repo is required"))?,
            post_repo: self
                .post_repo
                .ok_or_else(|| ServiceError::internal("post_repo is required"))?,
            comment_repo: self
                .comment_repo
                .ok_or_else(|| ServiceError::internal("comment_repo is required"))?,
            identity_provider: self
                .identity_provider
                .ok_or_else(|| ServiceError::internal("identity_provider is required"))?,
            token_verifier: self
                .token_verifier
                .ok_or_else(|| ServiceError::internal("token_verifier is required"))?,
            member_cache: self.member_cache,
            reconciler: self
                .reconciler
                .unwrap_or_else(|| Arc::new(LoggingReconciler)),
        })
    }
}
