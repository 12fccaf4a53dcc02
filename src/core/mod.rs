pub mod intake;

pub use crate::domain::lead::LeadSubmission;
pub use crate::domain::model::{Accepted, DeliveryOutcome, OutboundMessage};
pub use crate::domain::ports::{ConfigProvider, Mailer};
pub use crate::utils::error::LeadError;
