use crate::config::MailRelayConfig;
use crate::domain::model::OutboundMessage;
use crate::utils::error::MailError;
use async_trait::async_trait;

/// Capability to hand a notification to a mail relay. Implementations report
/// relay problems as `MailError`; they must not retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError>;

    /// Short label for logs and the status endpoint.
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    fn mail_relay(&self) -> Option<&MailRelayConfig>;
}
