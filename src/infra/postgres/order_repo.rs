use {
    super::{email_job_repo, event_repo::insert_provider_event},
    crate::domain::{
        address::NewAddress,
        checkout::{CheckoutCompletion, ConfirmationEmail, MarkPaidOutcome},
        error::PipelineError,
        orders::OrderRepository,
    },
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn mark_paid_inner(
        &self,
        completion: &CheckoutCompletion,
    ) -> Result<MarkPaidOutcome, PipelineError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET LOCAL lock_timeout = '5s'")
            .execute(&mut *tx)
            .await?;

        // Row lock serializes concurrent deliveries for the same order.
        let order: Option<(bool, DateTime<Utc>)> =
            sqlx::query_as("SELECT is_paid, created_at FROM orders WHERE id = $1 FOR UPDATE")
                .bind(completion.order_id.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        // Unknown order: roll back without recording the event so a
        // redelivery can still apply it.
        let Some((is_paid, created_at)) = order else {
            return Err(PipelineError::OrderNotFound(completion.order_id.clone()));
        };

        let is_new = insert_provider_event(
            &mut tx,
            completion.event_id.as_str(),
            &completion.session_id,
            &completion.event_type,
            completion.provider_ts,
        )
        .await?;

        if !is_new {
            tx.commit().await?;
            return Ok(MarkPaidOutcome::DuplicateEvent);
        }

        if is_paid {
            tx.commit().await?;
            return Ok(MarkPaidOutcome::AlreadyPaid);
        }

        let billing_id = insert_address(&mut tx, &completion.billing).await?;
        let shipping_id = insert_address(&mut tx, &completion.shipping).await?;

        sqlx::query(
            r#"
            UPDATE orders
            SET is_paid = true, billing_address_id = $2, shipping_address_id = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(completion.order_id.as_str())
        .bind(billing_id)
        .bind(shipping_id)
        .execute(&mut *tx)
        .await?;

        let email = ConfirmationEmail::for_order(completion, created_at);
        email_job_repo::enqueue(&mut tx, completion.event_id.as_str(), &email).await?;

        tx.commit().await?;
        Ok(MarkPaidOutcome::Paid {
            order_created_at: created_at,
        })
    }
}

impl OrderRepository for PgOrderRepository {
    fn mark_paid<'a>(
        &'a self,
        completion: &'a CheckoutCompletion,
    ) -> Pin<Box<dyn Future<Output = Result<MarkPaidOutcome, PipelineError>> + Send + 'a>> {
        Box::pin(self.mark_paid_inner(completion))
    }
}

async fn insert_address(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    address: &NewAddress,
) -> Result<Uuid, PipelineError> {
    let id = Uuid::now_v7();
    sqlx::query(
        r#"
        INSERT INTO addresses (id, kind, name, street, city, postal_code, country, region)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(address.kind().as_str())
    .bind(address.name())
    .bind(address.street())
    .bind(address.city())
    .bind(address.postal_code())
    .bind(address.country())
    .bind(address.region())
    .execute(&mut **tx)
    .await?;

    Ok(id)
}
