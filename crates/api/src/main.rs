use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = travelml_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let app = routes::router();

    let addr = settings.listen_addr();
    tracing::info!(%addr, "api listening");

    if let Err(e) = serve(addr, app).await {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "api server stopped with error");
        return Err(e);
    }

    Ok(())
}

async fn serve(addr: std::net::SocketAddr, app: axum::Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

fn init_sentry(settings: &travelml_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.require_sentry_dsn().ok()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
