//! Cert Sentry Command Line Tool
//!
//! This binary is the command-line interface for Cert Sentry.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{info, warn};

// Import our library
use cert_sentry::common::{init_logger, parse_socket_addr, Result, SentryError};
use cert_sentry::config::{
    defaults, validate_config, ConfigBuilder, ConfigValidator, ConfigValues, SentryConfig,
    ValueSource, ENV_PREFIX,
};
use cert_sentry::inspect::{BrowserEndpoint, CdpSnapshotFetcher, Monitor, VerdictCache};
use cert_sentry::status::{start_status_server, StatusServerConfig};
use cert_sentry::{APP_NAME, VERSION};

/// Cert Sentry: TLS security sentinel for Microsoft sign-in pages
#[derive(Parser, Debug)]
#[clap(author, version = VERSION, about, long_about = None)]
struct Args {
    /// Browser remote-debugging endpoint (host:port)
    #[clap(long)]
    browser: Option<String>,

    /// Status API listen address (host:port)
    #[clap(long)]
    status_listen: Option<String>,

    /// Watched sign-in domain; repeat to replace the default list
    #[clap(long = "watch")]
    watch: Vec<String>,

    /// Target poll interval in seconds
    #[clap(long)]
    poll_interval: Option<u64>,

    /// Security-state fetch timeout in milliseconds
    #[clap(long)]
    fetch_timeout: Option<u64>,

    /// Log level
    #[clap(long)]
    log_level: Option<String>,

    /// Configuration file path
    #[clap(long, default_value = defaults::DEFAULT_CONFIG_FILE)]
    config_file: String,
}

impl Args {
    /// Convert command-line arguments into a partial configuration
    fn to_config(&self) -> Result<SentryConfig> {
        let mut values = ConfigValues::default();

        if let Some(browser) = &self.browser {
            values.browser_endpoint = Some(parse_socket_addr(browser)?);
        }

        if let Some(status_listen) = &self.status_listen {
            values.status_listen = Some(parse_socket_addr(status_listen)?);
        }

        if !self.watch.is_empty() {
            values.watched_domains = Some(self.watch.clone());
        }

        values.poll_interval_secs = self.poll_interval;
        values.fetch_timeout_ms = self.fetch_timeout;
        values.log_level = self.log_level.clone();

        Ok(SentryConfig {
            values,
            config_file: None,
            sources: Default::default(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger early; the configured level applies from here on
    init_logger(args.log_level.as_deref().unwrap_or(defaults::LOG_LEVEL_STR));

    info!("Starting {} v{}", APP_NAME, VERSION);

    // Build configuration: defaults < file < environment < command line
    let config = ConfigBuilder::new()
        .with_defaults()
        .with_file(&args.config_file)
        .with_env(ENV_PREFIX)
        .without_validation()
        .build()?;

    let config = config.merge(&args.to_config()?, ValueSource::CommandLine);
    validate_config(&config)?;

    info!("Configuration loaded successfully");
    config.log();

    for warning in config.check_warnings() {
        warn!("{}", warning);
    }

    info!("Browser endpoint: {}", config.browser_endpoint());
    info!("Watched domains: {}", config.watched_domains().join(", "));
    info!("Status API: http://{}", config.status_listen());

    // Probe the browser endpoint; a browser that is not up yet is fine,
    // the monitor keeps retrying on its poll interval
    let endpoint = BrowserEndpoint::new(config.browser_endpoint());
    match endpoint.version().await {
        Ok(version) => info!(
            "Connected to {} (protocol {})",
            version.browser, version.protocol_version
        ),
        Err(e) => warn!("Browser endpoint not reachable yet: {}", e),
    }

    // Wire up the monitor and the status server around a shared cache
    let cache = Arc::new(VerdictCache::new());
    let fetcher = CdpSnapshotFetcher::new(Duration::from_millis(config.fetch_timeout_ms()));
    let monitor = Monitor::new(
        endpoint,
        fetcher,
        config.watchlist(),
        Arc::clone(&cache),
        Duration::from_secs(config.poll_interval_secs()),
    );

    let status_config = StatusServerConfig {
        listen_addr: config.status_listen(),
    };
    let status_server = tokio::spawn(start_status_server(status_config, Arc::clone(&cache)));

    info!("Sentry ready, press Ctrl+C to stop");

    tokio::select! {
        result = monitor.run() => {
            result?;
        }
        result = status_server => {
            match result {
                Ok(inner) => inner?,
                Err(e) => return Err(SentryError::Other(format!("status server task failed: {}", e))),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
