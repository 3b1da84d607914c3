//! `pictweetd`: the Pictweet server binary.
//!
//! Usage:
//!   pictweetd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/pictweet/<name>.toml`.
//! If a path with `/` or ending in `.toml` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use clap::Parser;
use tokio::signal;
use tracing::info;

use pictweet_core::Module;

use config::ServerConfig;

/// Pictweet server.
#[derive(Parser, Debug)]
#[command(name = "pictweetd", about = "Pictweet server", version)]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:3000")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&server_config)?;

    // Initialize storage (shared by all modules).
    let core_config = bootstrap::service_config(&server_config, &cli.listen);
    let sql = bootstrap::open_store(&core_config)?;

    // Auth first: the tweet tables reference `users`.
    let auth_config = auth::service::AuthConfig {
        jwt_secret: server_config.session.secret.clone(),
        session_ttl: server_config.session.expire_secs,
        secure_cookie: server_config.session.secure_cookie,
    };
    let auth_module = auth::AuthModule::new(sql.clone(), auth_config)?;
    info!("Auth module initialized");

    let tweet_module = tweet::TweetModule::new(sql)?;
    info!("Tweet module initialized");

    let modules: [&dyn Module; 2] = [&auth_module, &tweet_module];
    let app = routes::build_router(&modules, auth_module.resolver());

    // Start server.
    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("Pictweet server listening on {}", core_config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
