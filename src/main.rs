use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use timekeeper::modules::time_entries::repository::CacheAsideRepository;
use timekeeper::shared::infrastructure::cache::Cache;
use timekeeper::shared::infrastructure::cache::in_memory::InMemoryCache;
use timekeeper::shared::infrastructure::cache::redis_impl::RedisCache;
use timekeeper::shared::infrastructure::store::in_memory::InMemoryStore;
use timekeeper::shell::config::Config;
use timekeeper::shell::http::router;
use timekeeper::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;

    let store = Arc::new(InMemoryStore::new());
    let cache: Arc<dyn Cache> = match &config.redis_url {
        Some(url) => {
            let redis = RedisCache::connect(url)
                .await
                .map_err(|err| anyhow::anyhow!("redis connect failed: {err}"))?;
            tracing::info!(%url, "connected to redis");
            Arc::new(redis)
        }
        None => {
            tracing::info!("REDIS_URL not set, using in-memory cache");
            Arc::new(InMemoryCache::new())
        }
    };

    let repository = Arc::new(CacheAsideRepository::new(store, cache));
    let app = router(AppState { repository }).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
