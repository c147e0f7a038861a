use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,
    pub session_duration_hours: i64,
    pub search_debounce_ms: u64,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let admin_email = get("ADMIN_EMAIL").ok_or(ConfigError::MissingAdminEmail)?;
        let admin_password = get("ADMIN_PASSWORD").ok_or(ConfigError::MissingAdminPassword)?;

        let server_port = get("SERVER_PORT")
            .map(|port| port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(3000);

        let session_duration_hours =
            parse_or(get("SESSION_DURATION_HOURS"), "SESSION_DURATION_HOURS", 9)?;
        if session_duration_hours <= 0 {
            return Err(ConfigError::InvalidValue("SESSION_DURATION_HOURS"));
        }

        Ok(Config {
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://vidadmin.db?mode=rwc".to_string()),
            server_host: get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port,
            admin_email,
            admin_password,
            admin_name: get("ADMIN_NAME").unwrap_or_else(|| "Super Admin".to_string()),
            session_duration_hours,
            search_debounce_ms: parse_or(get("SEARCH_DEBOUNCE_MS"), "SEARCH_DEBOUNCE_MS", 500)?,
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn parse_or<T: FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key)),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ADMIN_EMAIL environment variable not set")]
    MissingAdminEmail,

    #[error("ADMIN_PASSWORD environment variable not set")]
    MissingAdminPassword,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid value for {0}")]
    InvalidValue(&'static str),
}
