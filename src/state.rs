//! Central application state
//!
//! Single source of truth for handler dependencies: wired once at startup,
//! cloned per worker. No scattered globals; everything handlers need goes
//! through `AppState`.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::cache::{spawn_invalidation_listener, InvalidationBus, QueryCache};
use crate::config::Config;
use crate::db;
use crate::identity::{IdentityClient, ProfileProvider, SessionVerifier};
use crate::services::{FeedService, PostService};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub sessions: SessionVerifier,
    pub cache: Arc<QueryCache>,
    pub bus: InvalidationBus,
    pub posts: PostService,
    pub feed: FeedService,
}

impl AppState {
    /// Wire all dependencies. The only place construction happens outside
    /// of tests.
    pub async fn initialize(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application state...");

        let pool = db::create_pool(&config.database).await?;
        info!("Database pool ready");

        db::run_migrations(&pool).await?;
        info!("Migrations completed");

        let provider: Arc<dyn ProfileProvider> =
            Arc::new(IdentityClient::new(config.identity.clone())?);

        Ok(Self::with_provider(pool, config, provider))
    }

    /// Assemble state around an existing pool and profile provider. Tests
    /// use this to substitute an in-memory provider.
    ///
    /// Spawns the cache invalidation listener; must be called from within
    /// a tokio runtime.
    pub fn with_provider(
        pool: PgPool,
        config: Config,
        provider: Arc<dyn ProfileProvider>,
    ) -> Self {
        let sessions = SessionVerifier::new(&config.session);
        let cache = Arc::new(QueryCache::new());
        let bus = InvalidationBus::default();
        spawn_invalidation_listener(cache.clone(), &bus);

        let posts = PostService::new(
            pool.clone(),
            bus.clone(),
            config.rate_limit.posts_per_minute,
        );
        let feed = FeedService::new(pool.clone(), provider, cache.clone(), &config.cache);

        Self {
            db: pool,
            config: Arc::new(config),
            sessions,
            cache,
            bus,
            posts,
            feed,
        }
    }
}
