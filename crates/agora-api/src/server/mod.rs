//! Server setup and initialization
//!
//! Selects the store, cache and identity provider adapters from the
//! configuration, builds the router and runs it.

use std::sync::Arc;

use agora_cache::{RedisMemberCache, RedisPool};
use agora_common::{
    AppConfig, AppError, IdentityProviderMode, StorageBackend, TokenSigner, TokenVerifier,
};
use agora_core::traits::{CommentRepository, IdentityProvider, MemberRepository, PostRepository};
use agora_db::{
    create_pool, run_migrations, InMemoryCommentRepository, InMemoryMemberRepository,
    InMemoryPostRepository, InMemoryStore, PgCommentRepository, PgMemberRepository,
    PgPostRepository,
};
use agora_idp::{InMemoryIdentityProvider, KeycloakClient};
use agora_service::{DataSeeder, LoggingReconciler, ServiceContext, ServiceContextBuilder};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::{AppState, Probes};

type Repositories = (
    Arc<dyn MemberRepository>,
    Arc<dyn PostRepository>,
    Arc<dyn CommentRepository>,
);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let mut probes = Probes::default();

    let (member_repo, post_repo, comment_repo) = create_repositories(&config, &mut probes).await?;

    let mut builder = ServiceContextBuilder::new()
        .member_repo(member_repo)
        .post_repo(post_repo)
        .comment_repo(comment_repo)
        .identity_provider(create_identity_provider(&config)?)
        .token_verifier(Arc::new(TokenVerifier::from_config(&config.token)?))
        .reconciler(Arc::new(LoggingReconciler));

    if let Some(redis_config) = &config.redis {
        info!("Connecting to Redis...");
        let redis = RedisPool::from_config(redis_config).map_err(|e| AppError::Config(e.to_string()))?;
        builder = builder.member_cache(Arc::new(RedisMemberCache::new(
            redis.clone(),
            redis_config.ttl_seconds,
        )));
        probes.redis = Some(redis);
        info!("Redis member cache enabled");
    } else {
        info!("REDIS_URL not set, member cache disabled");
    }

    let service_context = builder.build()?;

    if config.seed.enabled {
        seed(&service_context, config.seed.refresh_database).await?;
    }

    Ok(AppState::new(service_context, config, probes))
}

async fn create_repositories(config: &AppConfig, probes: &mut Probes) -> Result<Repositories, AppError> {
    match config.storage {
        StorageBackend::Postgres => {
            let db_config = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required for postgres storage".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(db_config)
                .await
                .map_err(|e| AppError::Config(format!("Failed to connect to PostgreSQL: {e}")))?;
            info!("PostgreSQL connection established");

            if db_config.run_migrations {
                run_migrations(&pool)
                    .await
                    .map_err(|e| AppError::Config(format!("Failed to run migrations: {e}")))?;
            }

            probes.database = Some(pool.clone());
            Ok((
                Arc::new(PgMemberRepository::new(pool.clone())),
                Arc::new(PgPostRepository::new(pool.clone())),
                Arc::new(PgCommentRepository::new(pool)),
            ))
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            let store = InMemoryStore::new();
            Ok((
                Arc::new(InMemoryMemberRepository::new(store.clone())),
                Arc::new(InMemoryPostRepository::new(store.clone())),
                Arc::new(InMemoryCommentRepository::new(store)),
            ))
        }
    }
}

fn create_identity_provider(config: &AppConfig) -> Result<Arc<dyn IdentityProvider>, AppError> {
    match config.identity.mode {
        IdentityProviderMode::Keycloak => {
            info!(realm = %config.identity.realm, "Using Keycloak identity provider");
            let client = KeycloakClient::new(config.identity.clone())?;
            Ok(Arc::new(client))
        }
        IdentityProviderMode::Memory => {
            warn!("Using the in-memory identity provider");
            let signer = TokenSigner::from_config(&config.token)?;
            Ok(Arc::new(InMemoryIdentityProvider::new(signer)))
        }
    }
}

async fn seed(ctx: &ServiceContext, refresh_database: bool) -> Result<(), AppError> {
    let inserted = DataSeeder::new(ctx).seed(refresh_database).await?;
    info!(inserted, "Data seeding completed");
    Ok(())
}

/// Bind the listening socket
pub async fn bind(address: &str) -> Result<TcpListener, AppError> {
    TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    info!("Starting HTTP server on {}", address);
    let listener = bind(&address).await?;
    run_server(app, listener).await
}
