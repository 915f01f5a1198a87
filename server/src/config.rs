//! Server configuration module.
//!
//! This module provides configuration loading for the FinTrust server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: Secret used to sign and verify bearer tokens (required)
//! - `ADMIN_PASSWORD`: Password of the seeded admin account (required)
//! - `ADMIN_EMAIL`: Email of the seeded admin account (default: `admin@fintrust.com`)
//! - `BCRYPT_COST`: bcrypt work factor for every password hash (default: `12`)
//! - `PORT`: Port to listen on (default: `3000`)
//!
//! # Invariants
//!
//! - `jwt_secret` and `admin_password` are never empty
//! - `bcrypt_cost` is always within bcrypt's accepted range (4-31)
//! - `listen_port` is always a valid port number

/// Server configuration.
///
/// Contains all configuration parameters needed to run the FinTrust server.
///
/// # Post-conditions
///
/// - `jwt_secret` is non-empty
/// - `bcrypt_cost` is in `MIN_BCRYPT_COST..=MAX_BCRYPT_COST`
#[derive(Clone)]
pub struct ServerConfig {
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: String,
    /// Email of the admin account seeded at startup.
    pub admin_email: String,
    /// Password of the admin account seeded at startup.
    pub admin_password: String,
    /// bcrypt work factor shared by the admin and self-registered users.
    pub bcrypt_cost: u32,
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("jwt_secret", &"<redacted>")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("listen_port", &self.listen_port)
            .finish()
    }
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default email of the seeded admin account.
    pub const DEFAULT_ADMIN_EMAIL: &'static str = "admin@fintrust.com";
    /// Default bcrypt work factor.
    pub const DEFAULT_BCRYPT_COST: u32 = 12;
    /// Lowest work factor bcrypt accepts.
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Highest work factor bcrypt accepts.
    pub const MAX_BCRYPT_COST: u32 = 31;

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` or `ADMIN_PASSWORD` is not set or is empty
    /// - `PORT` is set but not a valid port number
    /// - `BCRYPT_COST` is set but not an integer in 4-31
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = load_required(&lookup, "JWT_SECRET")?;
        let admin_password = load_required(&lookup, "ADMIN_PASSWORD")?;
        let admin_email = load_admin_email(&lookup)?;
        let bcrypt_cost = load_bcrypt_cost(&lookup)?;
        let listen_port = load_listen_port(&lookup)?;

        Ok(Self {
            jwt_secret,
            admin_email,
            admin_password,
            bcrypt_cost,
            listen_port,
        })
    }
}

/// Load a variable that must be present and non-empty.
fn load_required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;

    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "must not be empty".to_string(),
        });
    }

    Ok(value)
}

fn load_admin_email<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("ADMIN_EMAIL") {
        Some(value) if value.is_empty() => Err(ConfigError::InvalidValue {
            name: "ADMIN_EMAIL".to_string(),
            message: "must not be empty".to_string(),
        }),
        Some(value) => Ok(value),
        None => Ok(ServerConfig::DEFAULT_ADMIN_EMAIL.to_string()),
    }
}

/// Load the bcrypt work factor.
///
/// Returns the default if not set.
fn load_bcrypt_cost<F>(lookup: &F) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup("BCRYPT_COST") else {
        return Ok(ServerConfig::DEFAULT_BCRYPT_COST);
    };

    let range = ServerConfig::MIN_BCRYPT_COST..=ServerConfig::MAX_BCRYPT_COST;
    match value.parse::<u32>() {
        Ok(cost) if range.contains(&cost) => Ok(cost),
        _ => Err(ConfigError::InvalidValue {
            name: "BCRYPT_COST".to_string(),
            message: format!(
                "'{value}' is not a valid bcrypt cost (must be {}-{})",
                range.start(),
                range.end()
            ),
        }),
    }
}

/// Load the listen port.
///
/// Returns the default if not set.
fn load_listen_port<F>(lookup: &F) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("PORT") {
        Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            name: "PORT".to_string(),
            message: format!("'{value}' is not a valid port number (must be 0-65535)"),
        }),
        None => Ok(ServerConfig::DEFAULT_PORT),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [("JWT_SECRET", "s3cret"), ("ADMIN_PASSWORD", "pw")];

    #[test]
    fn test_default_values() {
        let config = ServerConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.listen_port, 3000);
        assert_eq!(config.admin_email, "admin@fintrust.com");
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.jwt_secret, "s3cret");
    }

    #[test]
    fn test_missing_jwt_secret() {
        let result = ServerConfig::from_lookup(lookup_from(&[("ADMIN_PASSWORD", "pw")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvVar("JWT_SECRET".to_string())
        );
    }

    #[test]
    fn test_empty_jwt_secret_rejected() {
        let result = ServerConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", ""),
            ("ADMIN_PASSWORD", "pw"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref name, .. }) if name == "JWT_SECRET"
        ));
    }

    #[test]
    fn test_missing_admin_password() {
        let result = ServerConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string())
        );
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("ADMIN_PASSWORD", "pw"),
            ("ADMIN_EMAIL", "root@bank.test"),
            ("BCRYPT_COST", "4"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.admin_email, "root@bank.test");
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.listen_port, 8080);
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("ADMIN_PASSWORD", "pw"),
            ("PORT", "http"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref name, .. }) if name == "PORT"
        ));
    }

    #[test]
    fn test_bcrypt_cost_out_of_range() {
        for bad in ["3", "32", "twelve"] {
            let result = ServerConfig::from_lookup(lookup_from(&[
                ("JWT_SECRET", "s"),
                ("ADMIN_PASSWORD", "pw"),
                ("BCRYPT_COST", bad),
            ]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { ref name, .. }) if name == "BCRYPT_COST"),
                "cost {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ServerConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_config_error_display_missing() {
        let error = ConfigError::MissingEnvVar("TEST_VAR".to_string());
        assert_eq!(
            error.to_string(),
            "missing required environment variable: TEST_VAR"
        );
    }

    #[test]
    fn test_config_error_display_invalid() {
        let error = ConfigError::InvalidValue {
            name: "TEST_VAR".to_string(),
            message: "bad value".to_string(),
        };
        assert_eq!(error.to_string(), "invalid value for TEST_VAR: bad value");
    }
}
