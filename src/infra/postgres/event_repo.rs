use crate::domain::error::PipelineError;

/// Record a provider event we are about to act on.
/// Returns `true` if inserted, `false` if this event id was already recorded.
pub async fn insert_provider_event(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event_id: &str,
    object_id: &str,
    event_type: &str,
    provider_ts: i64,
) -> Result<bool, PipelineError> {
    let inserted: Option<bool> = sqlx::query_scalar(
        r#"
        INSERT INTO provider_events (event_id, object_id, event_type, provider_ts)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (event_id) DO NOTHING
        RETURNING true
        "#,
    )
    .bind(event_id)
    .bind(object_id)
    .bind(event_type)
    .bind(provider_ts)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(inserted.is_some())
}
