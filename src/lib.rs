pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::adapters::http::{router, serve, AppState};
pub use crate::adapters::mail::HttpMailRelay;
pub use crate::adapters::smtp::SmtpMailRelay;
pub use crate::config::{AppConfig, MailRelayConfig, RelayTransport};
pub use crate::core::intake::{LeadIntake, MailRouting};
pub use crate::utils::error::{LeadError, MailError, Result, SiteError};
