use crate::config::MailRelayConfig;
use crate::domain::model::OutboundMessage;
use crate::domain::ports::Mailer;
use crate::utils::error::{MailError, Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: Option<String>,
}

/// Hands notifications to an HTTP mail gateway as a JSON `{from, to,
/// subject, body}` document. One attempt per message. Selected with
/// `transport = "http"`; SMTP is the default relay.
#[derive(Debug, Clone)]
pub struct HttpMailRelay {
    client: Client,
    endpoint: Url,
    credentials: Option<Credentials>,
}

impl HttpMailRelay {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| SiteError::InvalidConfigValueError {
            field: "mail.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            credentials: None,
        })
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password,
        });
        self
    }

    pub fn from_config(config: &MailRelayConfig) -> Result<Self> {
        let relay = Self::new(&config.endpoint(), config.timeout())?;
        Ok(match &config.username {
            Some(username) => relay.with_credentials(username.clone(), config.password.clone()),
            None => relay,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Mailer for HttpMailRelay {
    async fn send(&self, message: &OutboundMessage) -> std::result::Result<(), MailError> {
        tracing::debug!("Posting lead notification to {}", self.endpoint);

        let mut request = self.client.post(self.endpoint.clone()).json(message);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, credentials.password.as_ref());
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Mail relay response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    fn describe(&self) -> String {
        match (self.endpoint.host_str(), self.endpoint.port_or_known_default()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            _ => self.endpoint.to_string(),
        }
    }
}
