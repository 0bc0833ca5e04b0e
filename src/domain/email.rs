use {
    super::error::PipelineError,
    super::pii::Masked,
    std::{future::Future, pin::Pin},
};

/// A fully rendered message, ready for the provider.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Masked<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub trait EmailSender: Send + Sync {
    fn send<'a>(
        &'a self,
        email: &'a OutboundEmail,
    ) -> Pin<Box<dyn Future<Output = Result<(), PipelineError>> + Send + 'a>>;
}
