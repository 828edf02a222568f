use sqlx::PgPool;

use sociograph_cache::{Cache, CacheConfig};
use sociograph_config::cors::CorsConfig;
use sociograph_config::server::ServerConfig;
use sociograph_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub cache: Cache,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        // Lazy: no Redis round-trip happens until the first cached read.
        cache: Cache::new(&CacheConfig::from_env()),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
    }
}
