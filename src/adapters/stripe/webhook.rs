use {
    super::{
        checkout::completion_from_session,
        event::{CheckoutSession, StripeEvent, StripeEventType},
    },
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{error::PipelineError, pii::RedactedEmail},
        services::checkout::process_checkout_completed,
    },
    axum::{Json, extract::State, http::HeaderMap},
};

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(event_id = tracing::field::Empty, event_type = tracing::field::Empty)
)]
pub async fn wh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sig = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| PipelineError::WebhookSignature("missing Stripe-Signature header".into()))?;

    state.verifier.verify(&body, sig)?;

    let raw_event: serde_json::Value = serde_json::from_str(&body).map_err(PipelineError::from)?;
    let event: StripeEvent =
        serde_json::from_value(raw_event.clone()).map_err(PipelineError::from)?;
    let event_type = raw_event
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    tracing::Span::current()
        .record("event_id", tracing::field::display(&event.id))
        .record("event_type", tracing::field::display(&event_type));
    tracing::debug!(livemode = event.livemode, created = event.created, "event verified");

    match event.event_type {
        StripeEventType::CheckoutSessionCompleted => {
            let session: CheckoutSession =
                serde_json::from_value(event.data.object).map_err(PipelineError::from)?;
            let completion =
                completion_from_session(&session, &event.id, &event_type, event.created)?;

            tracing::debug!(
                session_id = %completion.session_id,
                order_id = %completion.order_id,
                user_id = %completion.user_id,
                customer = %RedactedEmail(completion.customer_email.expose()),
                "checkout session validated"
            );

            process_checkout_completed(state.orders.as_ref(), &completion).await?;
        }
        StripeEventType::Other => {
            tracing::info!("event type not handled, acknowledged");
        }
    }

    Ok(Json(serde_json::json!({"result": raw_event, "ok": true})))
}
