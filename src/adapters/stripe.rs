pub mod checkout;
pub mod event;
pub mod webhook;

use {
    crate::domain::{error::PipelineError, signature::SignatureVerifier},
    secrecy::{ExposeSecret, SecretString},
};

/// Verifies `Stripe-Signature` headers with async-stripe's webhook support
/// (HMAC-SHA256 over `t.payload`, with timestamp tolerance).
///
/// `construct_event` only parses the body after the signature and timestamp
/// checks pass, so a `BadParse` still means the payload is authentic. The body
/// is classified by [`event::StripeEvent`] instead of async-stripe's types.
pub struct StripeSignatureVerifier {
    webhook_secret: SecretString,
}

impl StripeSignatureVerifier {
    pub fn new(webhook_secret: SecretString) -> Self {
        Self { webhook_secret }
    }
}

impl SignatureVerifier for StripeSignatureVerifier {
    fn verify(&self, payload: &str, signature: &str) -> Result<(), PipelineError> {
        match stripe::Webhook::construct_event(
            payload,
            signature,
            self.webhook_secret.expose_secret(),
        ) {
            Ok(_) => Ok(()),
            Err(stripe::WebhookError::BadParse(e)) => {
                tracing::debug!(error = %e, "signature valid, payload not typed by async-stripe");
                Ok(())
            }
            Err(e) => Err(PipelineError::WebhookSignature(e.to_string())),
        }
    }
}
