use {
    crate::domain::{
        address::NewAddress,
        checkout::ConfirmationEmail,
        email::{EmailSender, OutboundEmail},
        error::PipelineError,
    },
    crate::infra::postgres::email_job_repo,
    askama::Template,
    sqlx::PgPool,
    std::{sync::Arc, time::Duration},
    tokio::sync::watch,
};

#[derive(Template)]
#[template(path = "email/order_received.html")]
struct OrderReceivedHtml<'a> {
    order_id: &'a str,
    order_date: &'a str,
    shipping: &'a NewAddress,
}

#[derive(Template)]
#[template(path = "email/order_received.txt")]
struct OrderReceivedText<'a> {
    order_id: &'a str,
    order_date: &'a str,
    shipping: &'a NewAddress,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub from: String,
    pub batch_size: i64,
    pub poll_interval: Duration,
}

/// Render both bodies of the order confirmation.
pub fn render_confirmation(
    from: &str,
    email: &ConfirmationEmail,
) -> Result<OutboundEmail, PipelineError> {
    let order_date = email.order_date_display();
    let order_id = email.order_id.as_str();

    let html = OrderReceivedHtml {
        order_id,
        order_date: &order_date,
        shipping: &email.shipping,
    }
    .render()?;
    let text = OrderReceivedText {
        order_id,
        order_date: &order_date,
        shipping: &email.shipping,
    }
    .render()?;

    Ok(OutboundEmail {
        from: from.to_string(),
        to: email.to.clone(),
        subject: ConfirmationEmail::SUBJECT.to_string(),
        html,
        text,
    })
}

/// Render and send one confirmation email.
pub async fn deliver(
    sender: &dyn EmailSender,
    from: &str,
    email: &ConfirmationEmail,
) -> Result<(), PipelineError> {
    let outbound = render_confirmation(from, email)?;
    sender.send(&outbound).await
}

/// Poll for pending email jobs and deliver them.
pub async fn run_worker(
    pool: PgPool,
    sender: Arc<dyn EmailSender>,
    config: WorkerConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!("email worker started");

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::info!("email worker shutting down");
                return;
            }
            _ = tokio::time::sleep(config.poll_interval) => {}
        }

        if let Err(e) = poll_once(&pool, &*sender, &config).await {
            tracing::error!(error = %e, "email worker poll error");
        }
    }
}

/// Claim one batch and settle every job in it.
pub async fn poll_once(
    pool: &PgPool,
    sender: &dyn EmailSender,
    config: &WorkerConfig,
) -> Result<(), PipelineError> {
    let mut tx = pool.begin().await?;
    let jobs = email_job_repo::claim(&mut tx, config.batch_size).await?;
    tx.commit().await?;

    for job in jobs {
        let email: ConfirmationEmail = match serde_json::from_value(job.payload) {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!(job_id = %job.id, error = %e, "undecodable email payload, completing as garbage");
                email_job_repo::complete(pool, job.id).await?;
                continue;
            }
        };

        match deliver(sender, &config.from, &email).await {
            Ok(()) => {
                tracing::info!(job_id = %job.id, order_id = %job.order_id, "confirmation email delivered");
                email_job_repo::complete(pool, job.id).await?;
            }
            Err(PipelineError::Validation(msg)) => {
                tracing::warn!(job_id = %job.id, error = %msg, "validation error, completing (no retry)");
                email_job_repo::complete(pool, job.id).await?;
            }
            Err(e) => {
                let dead = email_job_repo::fail(pool, job.id, &e.to_string()).await?;
                if dead {
                    tracing::error!(
                        job_id = %job.id,
                        event_id = %job.event_id,
                        order_id = %job.order_id,
                        attempts = job.attempts + 1,
                        error = %e,
                        "confirmation email failed permanently"
                    );
                } else {
                    tracing::warn!(job_id = %job.id, error = %e, "email delivery failed, scheduling retry");
                }
            }
        }
    }

    Ok(())
}

/// Periodically reset jobs stuck in 'processing' back to 'pending'.
pub async fn run_reaper(pool: PgPool, mut shutdown: watch::Receiver<bool>) {
    tracing::info!("stale email job reaper started");

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::info!("stale email job reaper shutting down");
                return;
            }
            _ = tokio::time::sleep(Duration::from_secs(60)) => {}
        }

        match email_job_repo::reap_stale(&pool).await {
            Ok(0) => {}
            Ok(n) => tracing::info!(count = n, "reaped stale email jobs"),
            Err(e) => tracing::error!(error = %e, "reaper error"),
        }
    }
}
