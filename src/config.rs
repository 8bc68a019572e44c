use std::{env, fmt::Display, str::FromStr, time::Duration};

use crate::error::{config_error, Error};

pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_address: String,
    pub jwt_secret: String,
    pub session_ttl: chrono::Duration,
    pub quote_feed_base: Option<String>,
    pub quote_feed_timeout: Duration,
    pub admin_emails: Vec<String>,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: try_load("DATABASE_MAX_CONNECTIONS", "5")?,
            bind_address: try_load("BIND_ADDRESS", "127.0.0.1:3000")?,
            jwt_secret: env::var("JWT_SECRET")?,
            session_ttl: chrono::Duration::minutes(try_load("SESSION_TTL_MINUTES", "43200")?),
            quote_feed_base: env::var("QUOTE_FEED_BASE").ok().filter(|v| !v.is_empty()),
            quote_feed_timeout: Duration::from_secs(try_load("QUOTE_FEED_TIMEOUT_SECS", "5")?),
            admin_emails: parse_list(&env::var("ADMIN_EMAILS").unwrap_or_default()),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, Error>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        tracing::info!("{key} not set, using default: {default}");
        default.to_string()
    });

    parse_value(key, &value)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, Error>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|e| {
        tracing::warn!("invalid {key} value: {e}");
        config_error(key)
    })
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

#[test]
fn parse_value_test() {
    let port: u32 = parse_value("DATABASE_MAX_CONNECTIONS", " 12 ").unwrap();
    assert_eq!(port, 12);

    let err = parse_value::<u64>("QUOTE_FEED_TIMEOUT_SECS", "soon").unwrap_err();
    assert_eq!(err.code, 8);
}

#[test]
fn parse_list_test() {
    assert_eq!(
        parse_list(" Admin@Example.com, ,ops@example.com"),
        vec!["admin@example.com".to_string(), "ops@example.com".to_string()]
    );
    assert!(parse_list("").is_empty());
}
