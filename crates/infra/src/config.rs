use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Seconds between deadline sweeps. The engine is documented to run
    /// every 30 minutes, so that is the default; the interval stays
    /// configurable for tests and for tighter deployments.
    pub sweep_interval_secs: u64,
    /// Maximum number of reminder/notification records processed
    /// concurrently within one sweep tick. Bounds the pressure a sweep
    /// can put on the email transport.
    pub sweep_concurrency: usize,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// When false the transport connects without TLS, which is only
    /// acceptable against a local development relay.
    pub use_tls: bool,
}

const DEFAULT_PORT: &str = "5000";
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30 * 60;
const DEFAULT_SWEEP_CONCURRENCY: usize = 10;

impl Config {
    pub fn new() -> Self {
        let port = std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, DEFAULT_PORT
                );
                DEFAULT_PORT.parse::<usize>().unwrap()
            }
        };

        let sweep_interval_secs = match std::env::var("SWEEP_INTERVAL_SECS") {
            Ok(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "The given SWEEP_INTERVAL_SECS: {} is not valid, falling back to the default: {}.",
                        secs, DEFAULT_SWEEP_INTERVAL_SECS
                    );
                    DEFAULT_SWEEP_INTERVAL_SECS
                }
            },
            Err(_) => DEFAULT_SWEEP_INTERVAL_SECS,
        };

        let sweep_concurrency = std::env::var("SWEEP_CONCURRENCY")
            .ok()
            .and_then(|c| c.parse::<usize>().ok())
            .filter(|c| *c > 0)
            .unwrap_or(DEFAULT_SWEEP_CONCURRENCY);

        Self {
            port,
            sweep_interval_secs,
            sweep_concurrency,
            smtp: SmtpConfig::new(),
        }
    }
}

impl SmtpConfig {
    pub fn new() -> Self {
        let host = match std::env::var("SMTP_HOST") {
            Ok(host) => host,
            Err(_) => {
                warn!("Did not find SMTP_HOST environment variable. Falling back to a local relay on localhost, emails will not leave this machine.");
                "localhost".into()
            }
        };
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(587);
        let username = std::env::var("SMTP_USERNAME").ok();
        let password = std::env::var("SMTP_PASSWORD").ok();
        let use_tls = host != "localhost";
        if username.is_none() {
            info!("No SMTP credentials configured, connecting unauthenticated.");
        }

        Self {
            host,
            port,
            username,
            password,
            use_tls,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self::new()
    }
}
