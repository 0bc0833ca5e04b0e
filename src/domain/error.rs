use {super::id::OrderId, thiserror::Error};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("webhook signature: {0}")]
    WebhookSignature(String),

    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("email delivery: {0}")]
    Email(String),

    #[error("template: {0}")]
    Template(#[from] askama::Error),
}
