use crate::logging::init_tracing;
use crate::router::init_router;
use crate::state::init_app_state;
use dotenvy::dotenv;
use tracing::info;

pub(crate) mod docs;
pub(crate) mod logging;
pub(crate) mod modules;
pub(crate) mod router;
pub(crate) mod state;
pub mod validator;

#[tokio::main]
async fn main() {
    dotenv().ok();

    init_tracing();

    let state = init_app_state().await;

    sqlx::migrate!()
        .run(&state.db)
        .await
        .expect("Failed to run database migrations");

    let addr = state.server_config.bind_addr();
    let cache = state.cache.clone();
    let db = state.db.clone();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    println!("🚀 Server running on http://{}", addr);
    println!("📚 Swagger UI available at http://{}/swagger-ui", addr);
    println!("📖 Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Teardown order mirrors startup in reverse; both steps tolerate a
    // backend that is already gone.
    cache.shutdown().await;
    db.close().await;
    info!("Shutdown complete");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received");
}
