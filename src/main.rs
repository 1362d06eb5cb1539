//! TechSurvey - Application Entry Point
//!
//! This is the main entry point for the survey server.

use std::net::SocketAddr;
use std::sync::Arc;

use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use techsurvey::{
    build_router,
    config::CONFIG,
    db::{self, PgSubmissionStore, SubmissionStore},
    services::{AuthService, FileService},
    sink::{ForwardingSink, RemoteForwarder, StoreSink, SubmissionSink},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TechSurvey server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    AuthService::seed_admin(&db_pool, &CONFIG.admin).await?;

    // Initialize Redis connection
    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    let files = Arc::new(FileService::new(
        CONFIG.storage.uploads_path.clone(),
        CONFIG.server.public_base_url.clone(),
    ));

    // Submissions are recorded in Postgres and optionally forwarded
    let store: Arc<dyn SubmissionStore> = Arc::new(PgSubmissionStore::new(db_pool.clone()));
    let remote = match &CONFIG.forward.url {
        Some(url) => {
            tracing::info!(url = %url, "Forwarding submissions to remote collector");
            let forwarder = RemoteForwarder::new(url.clone(), CONFIG.forward.timeout)?
                .with_files(files.clone());
            Some(Arc::new(forwarder))
        }
        None => None,
    };
    let sink: Arc<dyn SubmissionSink> =
        Arc::new(ForwardingSink::new(StoreSink::new(store.clone()), remote));

    // Create application state
    let state = AppState::new(db_pool, redis_conn, store, sink, files, CONFIG.clone());

    let app = build_router(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
