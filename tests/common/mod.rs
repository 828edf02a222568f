use axum::Router;
use sqlx::postgres::PgPoolOptions;

use sociograph::router::init_router;
use sociograph::state::AppState;
use sociograph_cache::{Cache, CacheConfig};
use sociograph_config::{CorsConfig, ServerConfig};

/// An app whose database pool and cache are lazily connected to addresses
/// nothing listens on. Routing, validation and degradation behavior can be
/// exercised without any infrastructure; anything that reaches the
/// database fails with a 500.
#[allow(dead_code)]
pub fn offline_app() -> Router {
    let db = PgPoolOptions::new()
        .connect_lazy("postgres://localhost:1/unused")
        .expect("lazy pool construction cannot fail on a well-formed URL");

    let cache_config = CacheConfig {
        redis_url: "redis://127.0.0.1:1".into(),
        connect_timeout_ms: 100,
        response_timeout_ms: 100,
        ..Default::default()
    };

    init_router(AppState {
        db,
        cache: Cache::new(&cache_config),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".into()],
        },
        server_config: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
    })
}

/// An app wired to the real `DATABASE_URL`/`REDIS_URL`, with migrations
/// applied. Used by the `#[ignore]`d end-to-end tests.
#[allow(dead_code)]
pub async fn live_app() -> Router {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("Failed to run migrations");

    init_router(AppState {
        db,
        cache: Cache::new(&CacheConfig::from_env()),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
    })
}
