use {
    super::event::{CheckoutSession, StripeAddress},
    crate::domain::{
        address::{AddressKind, AddressParts, NewAddress},
        checkout::CheckoutCompletion,
        error::PipelineError,
        id::{EventId, OrderId, UserId},
        pii::Masked,
    },
};

fn address_parts<'a>(name: Option<&'a str>, address: &'a StripeAddress) -> AddressParts<'a> {
    AddressParts {
        name,
        street: address.line1.as_deref(),
        city: address.city.as_deref(),
        postal_code: address.postal_code.as_deref(),
        country: address.country.as_deref(),
        region: address.state.as_deref(),
    }
}

/// Validate a completed Checkout Session. Checks run in a fixed order:
/// customer email, then `userId`/`orderId` metadata, then both addresses.
pub fn completion_from_session(
    session: &CheckoutSession,
    event_id: &str,
    event_type: &str,
    provider_ts: i64,
) -> Result<CheckoutCompletion, PipelineError> {
    let customer = session.customer_details.as_ref();

    let email = customer
        .and_then(|c| c.email.as_deref())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| PipelineError::Validation("missing customer email".into()))?;

    let (user_id, order_id) = match (
        session.metadata_value("userId"),
        session.metadata_value("orderId"),
    ) {
        (Some(user_id), Some(order_id)) => (UserId::new(user_id)?, OrderId::new(order_id)?),
        _ => {
            tracing::warn!(session_id = %session.id, "missing userId or orderId in session metadata");
            return Err(PipelineError::Validation("invalid request metadata".into()));
        }
    };

    let (billing, shipping) = match (session.billing_address(), session.shipping_address()) {
        (Some(billing), Some(shipping)) => (billing, shipping),
        (billing, shipping) => {
            tracing::warn!(
                order_id = %order_id,
                has_billing = billing.is_some(),
                has_shipping = shipping.is_some(),
                "missing billing or shipping address"
            );
            return Err(PipelineError::Validation("missing address information".into()));
        }
    };

    let name = customer.and_then(|c| c.name.as_deref());

    Ok(CheckoutCompletion {
        event_id: EventId::new(event_id)?,
        event_type: event_type.to_string(),
        session_id: session.id.clone(),
        provider_ts,
        user_id,
        order_id,
        customer_email: Masked(email.to_string()),
        billing: NewAddress::from_parts(AddressKind::Billing, address_parts(name, billing)),
        shipping: NewAddress::from_parts(AddressKind::Shipping, address_parts(name, shipping)),
    })
}
