use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use goalsync_core::settings::CheckInSettings;
use goalsync_core::window::CheckInWindow;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Identity used when a request carries no `x-user-id` header.
    pub default_user: String,
    pub check_in: CheckInSettings,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, std::env::var(key).ok(), default)
}

/// Parses a raw setting. Unset or blank falls back to `default`, anything
/// else must parse.
fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|err| anyhow!("Invalid {} '{}': {}", key, value, err)),
    }
}

fn risk_threshold(minutes: i64) -> anyhow::Result<chrono::Duration> {
    chrono::Duration::try_minutes(minutes)
        .ok_or_else(|| anyhow!("Invalid GS_STREAK_RISK_MINUTES: {} is out of range", minutes))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("GS_LISTEN_ADDR", "0.0.0.0:8088")
            .parse()
            .context("Invalid GS_LISTEN_ADDR")?;
        let db_path = env_or("GS_DB_PATH", "./db/goalsync.db");
        let cors_allow = env_or("GS_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_env("GS_REQUEST_TIMEOUT_MS", 30000)?;
        let default_user = env_or("GS_DEFAULT_USER", "demo-user");

        let defaults = CheckInSettings::default();
        let window = CheckInWindow::parse(
            &env_or("GS_CHECKIN_WINDOW_START", "08:00"),
            &env_or("GS_CHECKIN_WINDOW_END", "22:00"),
        )
        .context("Invalid GS_CHECKIN_WINDOW_START/GS_CHECKIN_WINDOW_END")?;
        let timezone = CheckInSettings::parse_timezone(&env_or("GS_TIMEZONE", "UTC"))
            .context("Invalid GS_TIMEZONE")?;
        let check_in = CheckInSettings {
            window,
            timezone,
            enforce_window: parse_env("GS_ENFORCE_WINDOW", defaults.enforce_window)?,
            consistency_window_days: parse_env(
                "GS_CONSISTENCY_WINDOW_DAYS",
                defaults.consistency_window_days,
            )?,
            feed_limit: parse_env("GS_FEED_LIMIT", defaults.feed_limit)?,
            streak_risk_threshold: risk_threshold(parse_env(
                "GS_STREAK_RISK_MINUTES",
                defaults.streak_risk_threshold.num_minutes(),
            )?)?,
            ..defaults
        };
        check_in.validate().context("Invalid check-in settings")?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            default_user,
            check_in,
        })
    }
}
