use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidadmin::api::build_router;
use vidadmin::bootstrap;
use vidadmin::config::Config;
use vidadmin::database::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidadmin=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let db = Database::connect(&config.database_url)
        .await
        .context("connecting to database")?;
    tracing::info!("Database connection established");

    db.run_migrations().await.context("running migrations")?;
    tracing::info!("Database migrations applied");

    bootstrap::seed_system_roles(&db).await?;
    bootstrap::initialize_admin(&db, &config).await?;

    let state = bootstrap::build_app_state(db, &config);
    let cleanup = bootstrap::spawn_session_cleanup(
        state.session_service.clone(),
        Duration::from_secs(15 * 60),
    );

    let mut app = build_router(state);
    if let Some(origin) = &config.cors_allowed_origin {
        let origin = origin
            .parse::<http::HeaderValue>()
            .context("parsing CORS_ALLOWED_ORIGIN")?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(origin))
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        );
    }

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .context("parsing server address")?;
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await?;

    cleanup.abort();
    Ok(())
}
