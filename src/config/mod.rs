#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_mailbox, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_RECIPIENT: &str = "admin@onedigitaloffice.com";
pub const DEFAULT_SENDER: &str = "\"One Digital Office\" <no-reply@onedigitaloffice.com>";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Absent means no relay: leads are accepted but nobody is emailed.
    #[serde(default)]
    pub mail: Option<MailRelayConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

/// How notifications leave the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayTransport {
    /// SMTP submission. `secure` selects implicit TLS, otherwise STARTTLS is
    /// used whenever the server offers it.
    #[default]
    Smtp,
    /// JSON POST to an HTTP mail gateway at `path`.
    Http,
}

impl RelayTransport {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "smtp" => Ok(RelayTransport::Smtp),
            "http" => Ok(RelayTransport::Http),
            _ => Err(SiteError::InvalidConfigValueError {
                field: "MAIL_RELAY_TRANSPORT".to_string(),
                value: value.to_string(),
                reason: "Expected 'smtp' or 'http'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailRelayConfig {
    #[serde(default)]
    pub transport: RelayTransport,
    pub host: String,
    /// Falls back to the transport's usual port, see [`MailRelayConfig::port`].
    #[serde(default)]
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub secure: bool,
    /// Only used by the HTTP transport.
    #[serde(default = "default_relay_path")]
    pub path: String,
    #[serde(default = "default_recipient")]
    pub recipient: String,
    #[serde(default = "default_sender")]
    pub sender: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_relay_path() -> String {
    "/send".to_string()
}

fn default_recipient() -> String {
    DEFAULT_RECIPIENT.to_string()
}

fn default_sender() -> String {
    DEFAULT_SENDER.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl MailRelayConfig {
    /// SMTP relay on `host` with the default port and addresses.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            transport: RelayTransport::Smtp,
            host: host.into(),
            port: None,
            username: None,
            password: None,
            secure: false,
            path: default_relay_path(),
            recipient: default_recipient(),
            sender: default_sender(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    pub fn http(host: impl Into<String>) -> Self {
        Self {
            transport: RelayTransport::Http,
            ..Self::new(host)
        }
    }

    /// The configured port, or 587 (submission) for SMTP and 80/443 for
    /// HTTP depending on `secure`.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(match (self.transport, self.secure) {
            (RelayTransport::Smtp, _) => 587,
            (RelayTransport::Http, false) => 80,
            (RelayTransport::Http, true) => 443,
        })
    }

    /// URL of the HTTP gateway. Meaningless for SMTP.
    pub fn endpoint(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!("{}://{}:{}{}", scheme, self.host, self.port(), path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SiteError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Expected a number".to_string(),
        })
}

impl AppConfig {
    /// Loads a config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// Overlays environment settings. `lookup` returns the value of a
    /// variable, if set. Relay settings also answer to their `SMTP_*`
    /// names.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let relay_var = |name: &str, alias: &str| lookup(name).or_else(|| lookup(alias));

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_number("PORT", &port)?;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.json = format.eq_ignore_ascii_case("json");
        }

        if let Some(host) =
            relay_var("MAIL_RELAY_HOST", "SMTP_HOST").filter(|h| !h.trim().is_empty())
        {
            let existing = self.mail.take();
            let mut mail = existing.unwrap_or_else(|| MailRelayConfig::new(host.clone()));
            mail.host = host;
            self.mail = Some(mail);
        }

        if let Some(mail) = self.mail.as_mut() {
            if let Some(transport) = lookup("MAIL_RELAY_TRANSPORT") {
                mail.transport = RelayTransport::parse(&transport)?;
            }
            if let Some(port) = relay_var("MAIL_RELAY_PORT", "SMTP_PORT") {
                mail.port = Some(parse_number("MAIL_RELAY_PORT", &port)?);
            }
            if let Some(user) = relay_var("MAIL_RELAY_USER", "SMTP_USER") {
                mail.username = Some(user);
            }
            if let Some(pass) = relay_var("MAIL_RELAY_PASS", "SMTP_PASS") {
                mail.password = Some(pass);
            }
            if let Some(secure) = relay_var("MAIL_RELAY_SECURE", "SMTP_SECURE") {
                mail.secure = parse_bool(&secure);
            }
            if let Some(path) = lookup("MAIL_RELAY_PATH") {
                mail.path = path;
            }
            if let Some(recipient) = lookup("CONTACT_EMAIL") {
                mail.recipient = recipient;
            }
            if let Some(sender) = lookup("MAIL_FROM") {
                mail.sender = sender;
            }
            if let Some(timeout) = lookup("MAIL_RELAY_TIMEOUT_SECONDS") {
                mail.timeout_seconds = parse_number("MAIL_RELAY_TIMEOUT_SECONDS", &timeout)?;
            }
        }

        Ok(())
    }

    /// Checks that the loaded values can be used to start the server.
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;

        if let Some(mail) = &self.mail {
            validate_non_empty_string("mail.host", &mail.host)?;
            validate_range("mail.port", mail.port(), 1, u16::MAX)?;
            if mail.transport == RelayTransport::Http {
                validate_url("mail.endpoint", &mail.endpoint())?;
            }
            validate_mailbox("mail.recipient", &mail.recipient)?;
            validate_mailbox("mail.sender", &mail.sender)?;
            validate_range("mail.timeout_seconds", mail.timeout_seconds, 1, 120)?;

            if mail.password.is_some() && mail.username.is_none() {
                return Err(SiteError::MissingConfigError {
                    field: "mail.username".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn mail_relay(&self) -> Option<&MailRelayConfig> {
        self.mail.as_ref()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
