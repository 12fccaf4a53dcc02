use clap::Parser;
use odo_site::utils::error::{ErrorSeverity, SiteError};
use odo_site::utils::{logger, validation::Validate};
use odo_site::{serve, CliArgs};

fn exit_code(e: &SiteError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: SiteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            logger::init_logger(args.verbose, args.log_json);
            fail(e);
        }
    };

    logger::init_logger(config.logging.verbose, config.logging.json);
    tracing::info!("Starting odo-site {}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Server config: {:?}", config.server);

    if let Err(e) = config.validate() {
        fail(e);
    }

    if let Err(e) = serve(&config).await {
        fail(e);
    }

    tracing::info!("✅ Server stopped");
    Ok(())
}
