use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

const DEFAULT_OPERATOR_EMAIL: &str = "bookings@mmafricasafaris.com";
const DEFAULT_FROM_EMAIL: &str = "no-reply@mmafricasafaris.com";
const DEFAULT_MEDIA_URL: &str = "/media/";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub mail: MailConfig,
    pub media: MediaConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let operator_email =
            env::var("OPERATOR_EMAIL").unwrap_or_else(|_| DEFAULT_OPERATOR_EMAIL.to_string());
        let from_email =
            env::var("DEFAULT_FROM_EMAIL").unwrap_or_else(|_| DEFAULT_FROM_EMAIL.to_string());

        let smtp = match non_empty_var("SMTP_HOST") {
            Some(host) => {
                let port = match non_empty_var("SMTP_PORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidSmtpPort)?,
                    None => DEFAULT_SMTP_PORT,
                };
                Some(SmtpConfig {
                    host,
                    port,
                    username: non_empty_var("SMTP_USERNAME"),
                    password: non_empty_var("SMTP_PASSWORD"),
                })
            }
            None => None,
        };

        let media_base_url =
            env::var("MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            mail: MailConfig {
                operator_email,
                from_email,
                smtp,
            },
            media: MediaConfig { media_base_url },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Addresses used for outbound notifications, plus the optional SMTP relay.
///
/// Without an SMTP relay the site logs outgoing mail instead of sending it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub operator_email: String,
    pub from_email: String,
    pub smtp: Option<SmtpConfig>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            operator_email: DEFAULT_OPERATOR_EMAIL.to_string(),
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            smtp: None,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Where uploaded tour photos are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    pub media_base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            media_base_url: DEFAULT_MEDIA_URL.to_string(),
        }
    }
}

impl MediaConfig {
    /// Resolve a stored asset reference to a URL a browser can load.
    pub fn url_for(&self, asset: &str) -> String {
        if asset.starts_with("http://") || asset.starts_with("https://") {
            return asset.to_string();
        }

        let base = self.media_base_url.trim_end_matches('/');
        let path = asset.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidSmtpPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidSmtpPort => write!(f, "SMTP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSmtpPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
