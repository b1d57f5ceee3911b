//! Contact relay web server.
//!
//! Serves the contact form endpoint and relays submissions as email
//! notifications. Configuration comes from the environment and is read once.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use contacto::{router, AppState, Config, SmtpNotifier, SmtpRelay};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("contact_relay_starting");

    // Load configuration
    let config = Config::from_env();
    let mail_configured = config.mail.is_configured();
    info!(
        port = config.port,
        allowed_origins = ?config.allowed_origins,
        smtp_timeout_ms = config.smtp_timeout.as_millis() as u64,
        mail_configured = mail_configured,
        "config_loaded"
    );

    if !mail_configured {
        warn!(
            missing_settings = ?config.mail.missing_settings(),
            "mail_not_configured_notifications_disabled"
        );
    }

    let relay = SmtpRelay::default();
    let notifier = SmtpNotifier::new(&config.mail, relay.clone(), config.smtp_timeout)
        .context("Failed to create SMTP notifier")?;
    info!(
        relay_host = %relay.host,
        relay_port = relay.port,
        "smtp_notifier_created"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, Arc::new(notifier));
    let app = router(state);

    // Bind to address
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("contact_relay_stopped");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM so in-flight submissions can finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    info!(signal = signal_name, "contact_relay_draining_requests");
}
