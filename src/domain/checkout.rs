use {
    super::address::NewAddress,
    super::id::{EventId, OrderId, UserId},
    super::pii::Masked,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// A verified, validated `checkout.session.completed` event, ready to apply.
#[derive(Debug, Clone)]
pub struct CheckoutCompletion {
    pub event_id: EventId,
    pub event_type: String,
    pub session_id: String,
    pub provider_ts: i64,
    pub user_id: UserId,
    pub order_id: OrderId,
    pub customer_email: Masked<String>,
    pub billing: NewAddress,
    pub shipping: NewAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkPaidOutcome {
    /// Order marked paid, both addresses attached, confirmation email enqueued.
    Paid { order_created_at: DateTime<Utc> },
    /// This provider event was already applied (redelivery).
    DuplicateEvent,
    /// The order was paid by an earlier event; nothing changed.
    AlreadyPaid,
}

/// Outbox payload for the order confirmation email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationEmail {
    pub to: Masked<String>,
    pub order_id: OrderId,
    pub order_date: DateTime<Utc>,
    pub shipping: NewAddress,
}

impl ConfirmationEmail {
    pub const SUBJECT: &'static str = "Thanks for your order!";

    pub fn for_order(completion: &CheckoutCompletion, order_created_at: DateTime<Utc>) -> Self {
        Self {
            to: completion.customer_email.clone(),
            order_id: completion.order_id.clone(),
            order_date: order_created_at,
            shipping: completion.shipping.clone(),
        }
    }

    /// Short US-style date, e.g. `3/7/2026`.
    pub fn order_date_display(&self) -> String {
        self.order_date.format("%-m/%-d/%Y").to_string()
    }
}
