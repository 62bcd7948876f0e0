use serde::Serialize;

use crate::domain::repository::MailPort;
use crate::error::HelpdeskError;

/// Mail client posting JSON to an HTTP mail-gateway API. Dispatch is
/// synchronous; callers decide what a failure means for their flow.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct OutgoingMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

impl MailPort for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), HelpdeskError> {
        let mail = OutgoingMail {
            from: &self.from,
            to,
            subject,
            text: body,
        };
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&mail)
            .send()
            .await
            .map_err(|e| HelpdeskError::MailDelivery(e.into()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HelpdeskError::MailDelivery(anyhow::anyhow!(
                "mail gateway returned {status}: {body}"
            )));
        }
        Ok(())
    }
}
