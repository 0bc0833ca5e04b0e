use {
    order_hook::{
        AppState,
        adapters::{resend::ResendClient, stripe::StripeSignatureVerifier},
        config::{Config, LogFormat},
        infra::postgres::order_repo::PgOrderRepository,
        services::email_worker::{self, WorkerConfig},
    },
    secrecy::ExposeSecret,
    sqlx::postgres::PgPoolOptions,
    std::sync::Arc,
    tokio::{signal, sync::watch},
    tracing_subscriber::EnvFilter,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.database_acquire_timeout)
        .connect(config.database_url.expose_secret())
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    let sender = Arc::new(ResendClient::new(
        config.resend_api_url.clone(),
        config.resend_api_key.clone(),
    )?);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = tokio::spawn(email_worker::run_worker(
        pool.clone(),
        sender,
        WorkerConfig {
            from: config.email_from.clone(),
            batch_size: config.email_worker_batch_size,
            poll_interval: config.email_worker_poll_interval,
        },
        shutdown_rx.clone(),
    ));
    let reaper = tokio::spawn(email_worker::run_reaper(pool.clone(), shutdown_rx));

    let state = AppState {
        orders: Arc::new(PgOrderRepository::new(pool)),
        verifier: Arc::new(StripeSignatureVerifier::new(
            config.stripe_webhook_secret.clone(),
        )),
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, order_hook::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tx.send(true).ok();
    let _ = tokio::join!(worker, reaper);
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
