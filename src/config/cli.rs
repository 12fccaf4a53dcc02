use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "odo-site")]
#[command(about = "API server for the One Digital Office website")]
pub struct CliArgs {
    #[arg(long, short, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to bind, overrides HOST")]
    pub host: Option<String>,

    #[arg(long, short, help = "Port to listen on, overrides PORT")]
    pub port: Option<u16>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliArgs {
    /// Defaults, then the config file, then the environment, then flags.
    pub fn load_config(&self) -> Result<AppConfig> {
        self.load_config_with(|key| std::env::var(key).ok())
    }

    /// Same as [`CliArgs::load_config`] with the environment read through
    /// `lookup`.
    pub fn load_config_with<F>(&self, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        config.apply_env(lookup)?;

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.log_json;

        Ok(config)
    }
}
