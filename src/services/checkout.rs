use crate::domain::{
    checkout::{CheckoutCompletion, MarkPaidOutcome},
    error::PipelineError,
    orders::OrderRepository,
};

/// Apply a completed checkout: one transactional order update which also
/// enqueues the confirmation email. Delivery happens in the email worker.
pub async fn process_checkout_completed(
    orders: &dyn OrderRepository,
    completion: &CheckoutCompletion,
) -> Result<MarkPaidOutcome, PipelineError> {
    let outcome = orders.mark_paid(completion).await?;

    match &outcome {
        MarkPaidOutcome::Paid { order_created_at } => {
            tracing::info!(
                order_id = %completion.order_id,
                user_id = %completion.user_id,
                %order_created_at,
                "order marked paid, confirmation email enqueued"
            );
        }
        MarkPaidOutcome::DuplicateEvent => {
            tracing::info!(order_id = %completion.order_id, "duplicate event, already processed");
        }
        MarkPaidOutcome::AlreadyPaid => {
            tracing::warn!(order_id = %completion.order_id, "order already paid, event ignored");
        }
    }

    Ok(outcome)
}
