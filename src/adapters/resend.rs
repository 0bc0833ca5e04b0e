use {
    crate::domain::{
        email::{EmailSender, OutboundEmail},
        error::PipelineError,
        pii::RedactedEmail,
    },
    secrecy::{ExposeSecret, SecretString},
    serde::Serialize,
    std::{future::Future, pin::Pin, time::Duration},
};

pub const DEFAULT_API_URL: &str = "https://api.resend.com";

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Email delivery through the Resend HTTP API.
pub struct ResendClient {
    http: reqwest::Client,
    api_url: String,
    api_key: SecretString,
}

impl ResendClient {
    pub fn new(api_url: impl Into<String>, api_key: SecretString) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PipelineError::Email(format!("http client: {e}")))?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn send_inner(&self, email: &OutboundEmail) -> Result<(), PipelineError> {
        let request = SendEmailRequest {
            from: &email.from,
            to: [email.to.expose().as_str()],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .http
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Email(format!("Resend API: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Email(format!("Resend API {status}: {body}")));
        }

        tracing::info!(to = %RedactedEmail(email.to.expose()), subject = %email.subject, "email sent");
        Ok(())
    }
}

impl EmailSender for ResendClient {
    fn send<'a>(
        &'a self,
        email: &'a OutboundEmail,
    ) -> Pin<Box<dyn Future<Output = Result<(), PipelineError>> + Send + 'a>> {
        Box::pin(self.send_inner(email))
    }
}
