use {
    crate::domain::{checkout::ConfirmationEmail, error::PipelineError},
    uuid::Uuid,
};

#[derive(Debug, sqlx::FromRow)]
pub struct EmailJobRow {
    pub id: Uuid,
    pub event_id: String,
    pub order_id: String,
    pub payload: serde_json::Value,
    pub attempts: i32,
}

/// Enqueue a confirmation email inside the caller's transaction, so the job
/// commits or rolls back together with the order update.
/// Returns `true` if inserted, `false` if already enqueued for this event.
pub async fn enqueue(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event_id: &str,
    email: &ConfirmationEmail,
) -> Result<bool, PipelineError> {
    let payload = serde_json::to_value(email)?;

    let inserted: Option<bool> = sqlx::query_scalar(
        r#"
        INSERT INTO email_jobs (id, event_id, order_id, recipient, payload)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (event_id) DO NOTHING
        RETURNING true
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(event_id)
    .bind(email.order_id.as_str())
    .bind(email.to.expose())
    .bind(&payload)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(inserted.is_some())
}

/// Claim up to `limit` pending jobs for processing.
/// Uses SKIP LOCKED to avoid contention with other workers.
pub async fn claim(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    limit: i64,
) -> Result<Vec<EmailJobRow>, PipelineError> {
    let rows = sqlx::query_as::<_, EmailJobRow>(
        r#"
        UPDATE email_jobs
        SET status = 'processing', updated_at = now()
        WHERE id IN (
            SELECT id FROM email_jobs
            WHERE status = 'pending' AND scheduled_at <= now()
            ORDER BY scheduled_at
            LIMIT $1
            FOR UPDATE SKIP LOCKED
        )
        RETURNING id, event_id, order_id, payload, attempts
        "#,
    )
    .bind(limit)
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows)
}

/// Mark a job as completed.
pub async fn complete(pool: &sqlx::PgPool, id: Uuid) -> Result<(), PipelineError> {
    sqlx::query("UPDATE email_jobs SET status = 'completed', updated_at = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Record a failure. The retry waits `2^attempts` seconds, counting attempts
/// before this failure (1 s, 2 s, 4 s, ...).
/// Returns `true` if max attempts were reached and the job is now 'failed'.
pub async fn fail(pool: &sqlx::PgPool, id: Uuid, error: &str) -> Result<bool, PipelineError> {
    let status: Option<String> = sqlx::query_scalar(
        r#"
        UPDATE email_jobs
        SET attempts = attempts + 1,
            last_error = $2,
            status = CASE
                WHEN attempts + 1 >= max_attempts THEN 'failed'
                ELSE 'pending'
            END,
            scheduled_at = CASE
                WHEN attempts + 1 >= max_attempts THEN scheduled_at
                ELSE now() + make_interval(secs => power(2, attempts)::int)
            END,
            updated_at = now()
        WHERE id = $1
        RETURNING status
        "#,
    )
    .bind(id)
    .bind(error)
    .fetch_optional(pool)
    .await?;

    Ok(status.as_deref() == Some("failed"))
}

/// Reset jobs stuck in 'processing' for >2 minutes back to 'pending'.
/// Returns the number of reaped jobs.
pub async fn reap_stale(pool: &sqlx::PgPool) -> Result<u64, PipelineError> {
    let result = sqlx::query(
        r#"
        UPDATE email_jobs
        SET status = 'pending', updated_at = now()
        WHERE status = 'processing' AND updated_at < now() - interval '2 minutes'
        "#,
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
