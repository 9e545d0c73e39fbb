use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub token: TokenConfig,
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the externally visible origin URL, falling back to the bind
    /// address when none is configured.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.clone()
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// The only hostname calendar feeds may be fetched from.
    pub allowed_host: String,
    /// Upper bound on the upstream response body, in bytes.
    pub max_body_size: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Secret used to seal upstream URLs into opaque tokens.
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Value of the `X-WR-CALNAME` header on rewritten feeds.
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml` into a `Settings`. Environment variables take
    /// precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8742)?
            .set_default("upstream.allowed_host", "srh-community.campusweb.cloud")?
            .set_default("upstream.max_body_size", 10_485_760_i64)?
            .set_default("upstream.user_agent", "Calveil-Proxy/1.0")?
            // Local development fallback only; set TOKEN_SECRET in production.
            .set_default("token.secret", "dev-secret-do-not-use-in-prod-change-me")?
            .set_default("calendar.display_name", "My Schedule+")?
            .set_default("logging.level", "debug")?
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
