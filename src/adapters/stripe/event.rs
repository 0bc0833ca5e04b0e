use {serde::Deserialize, std::collections::HashMap};

/// Envelope of a Stripe webhook event. `data.object` stays untyped until the
/// event type tells us what it is.
#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: String, // evt_xxx, idempotency key
    #[serde(rename = "type")]
    pub event_type: StripeEventType,
    pub created: i64, // unix timestamp
    #[serde(default)]
    pub livemode: bool,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StripeEventType {
    #[serde(rename = "checkout.session.completed")]
    CheckoutSessionCompleted,

    #[serde(other)]
    Other,
}

/// The subset of a Checkout Session this service reads. Every field is
/// optional so that a sparse payload reaches validation instead of failing
/// to parse.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub shipping_details: Option<ShippingDetails>,
    /// Newer API versions nest shipping details here instead.
    #[serde(default)]
    pub collected_information: Option<CollectedInformation>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<StripeAddress>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShippingDetails {
    #[serde(default)]
    pub address: Option<StripeAddress>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CollectedInformation {
    #[serde(default)]
    pub shipping_details: Option<ShippingDetails>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StripeAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl CheckoutSession {
    pub fn shipping_address(&self) -> Option<&StripeAddress> {
        self.shipping_details
            .as_ref()
            .and_then(|d| d.address.as_ref())
            .or_else(|| {
                self.collected_information
                    .as_ref()
                    .and_then(|c| c.shipping_details.as_ref())
                    .and_then(|d| d.address.as_ref())
            })
    }

    pub fn billing_address(&self) -> Option<&StripeAddress> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.address.as_ref())
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
