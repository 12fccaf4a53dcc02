use crate::config::{MailRelayConfig, DEFAULT_RECIPIENT, DEFAULT_SENDER};
use crate::core::{Accepted, DeliveryOutcome, LeadError, LeadSubmission, Mailer, OutboundMessage};
use crate::utils::monitor::IntakeMonitor;
use serde_json::Value;
use std::sync::Arc;

pub const ACK_MESSAGE: &str = "Inquiry received";
pub const SERVER_FAILURE_MESSAGE: &str = "Server error";

const NOT_PROVIDED: &str = "Not provided";

/// Envelope addresses for lead notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRouting {
    pub sender: String,
    pub recipient: String,
}

impl Default for MailRouting {
    fn default() -> Self {
        Self {
            sender: DEFAULT_SENDER.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

impl From<&MailRelayConfig> for MailRouting {
    fn from(config: &MailRelayConfig) -> Self {
        Self {
            sender: config.sender.clone(),
            recipient: config.recipient.clone(),
        }
    }
}

/// Builds the plaintext notification for an accepted lead.
pub fn compose_notification(lead: &LeadSubmission, routing: &MailRouting) -> OutboundMessage {
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_PROVIDED.to_string());
    let services = match &lead.services {
        Some(services) if !services.is_empty() => services.join(", "),
        _ => NOT_PROVIDED.to_string(),
    };

    let body = format!(
        "New inquiry received via the website contact form.\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Company: {}\n\
         Budget: {}\n\
         Services: {}\n\n\
         Message:\n{}\n",
        lead.name,
        lead.email,
        optional(&lead.phone),
        optional(&lead.company),
        optional(&lead.budget),
        services,
        lead.message,
    );

    OutboundMessage {
        from: routing.sender.clone(),
        to: routing.recipient.clone(),
        subject: format!("New Lead: {}", lead.name),
        body,
    }
}

/// Validates contact-form submissions and notifies the office.
///
/// Relay failures are logged and counted but never change the visitor's
/// response. Only a send task that dies without returning is a server fault.
pub struct LeadIntake {
    mailer: Option<Arc<dyn Mailer>>,
    routing: MailRouting,
    monitor: Arc<IntakeMonitor>,
}

impl LeadIntake {
    pub fn new(mailer: Option<Arc<dyn Mailer>>, routing: MailRouting) -> Self {
        Self {
            mailer,
            routing,
            monitor: Arc::new(IntakeMonitor::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self::new(None, MailRouting::default())
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>, routing: MailRouting) -> Self {
        Self::new(Some(mailer), routing)
    }

    pub fn monitor(&self) -> &IntakeMonitor {
        &self.monitor
    }

    /// `None` when no relay is configured.
    pub fn relay_description(&self) -> Option<String> {
        self.mailer.as_ref().map(|m| m.describe())
    }

    pub async fn submit_lead(&self, raw: &Value) -> Result<Accepted, LeadError> {
        let lead = match LeadSubmission::parse(raw) {
            Ok(lead) => lead,
            Err(issues) => {
                self.monitor.record_rejected();
                tracing::info!("Lead rejected with {} validation issue(s)", issues.len());
                return Err(LeadError::Validation(issues));
            }
        };

        // TODO: persist accepted leads once a lead store exists
        let delivery = self.notify(&lead).await?;
        self.monitor.record_accepted();
        tracing::info!(
            services = lead.services.as_ref().map_or(0, |s| s.len()),
            delivery = ?delivery,
            "✅ Lead accepted"
        );

        Ok(Accepted {
            message: ACK_MESSAGE.to_string(),
            delivery,
        })
    }

    async fn notify(&self, lead: &LeadSubmission) -> Result<DeliveryOutcome, LeadError> {
        let Some(mailer) = &self.mailer else {
            self.monitor.record_delivery_skipped();
            tracing::debug!("No mail relay configured, skipping lead notification");
            return Ok(DeliveryOutcome::Skipped);
        };

        let message = compose_notification(lead, &self.routing);
        let relay = mailer.describe();
        let mailer = Arc::clone(mailer);

        // The send runs on its own task so a panicking relay client surfaces
        // as a JoinError instead of tearing down the connection.
        let send = tokio::spawn(async move { mailer.send(&message).await });

        match send.await {
            Ok(Ok(())) => {
                self.monitor.record_delivered();
                tracing::debug!(relay = %relay, "Lead notification delivered");
                Ok(DeliveryOutcome::Delivered)
            }
            Ok(Err(e)) => {
                self.monitor.record_delivery_failed();
                tracing::warn!(
                    relay = %relay,
                    error = %e,
                    "⚠️ Lead notification was not delivered"
                );
                Ok(DeliveryOutcome::Failed)
            }
            Err(e) => {
                self.monitor.record_server_failure();
                tracing::error!(relay = %relay, error = %e, "❌ Mail relay task aborted");
                Err(LeadError::Server {
                    message: e.to_string(),
                })
            }
        }
    }
}
