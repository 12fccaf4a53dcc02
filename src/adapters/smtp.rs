use crate::config::MailRelayConfig;
use crate::domain::model::OutboundMessage;
use crate::domain::ports::Mailer;
use crate::utils::error::{MailError, Result, SiteError};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Submits notifications to an SMTP server.
///
/// With `secure` the connection is TLS from the first byte (port 465
/// style). Otherwise the session starts in plain text and upgrades with
/// STARTTLS when the server advertises it. Credentials are sent with AUTH
/// when a username is configured. One attempt per message, no pooling.
pub struct SmtpMailRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpMailRelay {
    pub fn from_config(config: &MailRelayConfig) -> Result<Self> {
        let tls_parameters = TlsParameters::new(config.host.clone()).map_err(|e| {
            SiteError::InvalidConfigValueError {
                field: "mail.host".to_string(),
                value: config.host.clone(),
                reason: format!("Cannot be used as a TLS server name: {}", e),
            }
        })?;
        let tls = if config.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let port = config.port();
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
                .port(port)
                .tls(tls)
                .timeout(Some(config.timeout()));
        if let Some(username) = &config.username {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                config.password.clone().unwrap_or_default(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            host: config.host.clone(),
            port,
        })
    }
}

fn mailbox(field: &str, value: &str) -> std::result::Result<Mailbox, MailError> {
    value.parse().map_err(|e| MailError::InvalidMessage {
        reason: format!("{} address '{}': {}", field, value, e),
    })
}

fn build_message(message: &OutboundMessage) -> std::result::Result<Message, MailError> {
    Message::builder()
        .from(mailbox("sender", &message.from)?)
        .to(mailbox("recipient", &message.to)?)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| MailError::InvalidMessage {
            reason: e.to_string(),
        })
}

#[async_trait]
impl Mailer for SmtpMailRelay {
    async fn send(&self, message: &OutboundMessage) -> std::result::Result<(), MailError> {
        let email = build_message(message)?;
        tracing::debug!("Submitting lead notification to {}:{}", self.host, self.port);

        let response = self.transport.send(email).await?;
        tracing::debug!("SMTP server replied {}", response.code());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("smtp://{}:{}", self.host, self.port)
    }
}
