use super::error::PipelineError;

/// Authenticates a raw webhook body against its signature header.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, payload: &str, signature: &str) -> Result<(), PipelineError>;
}
