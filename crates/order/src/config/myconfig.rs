use anyhow::{Context, Result, anyhow};
use std::{env, str::FromStr};

const DEFAULT_OTEL_ENDPOINT: &str = "http://otel-collector:4317";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    /// Reject checkouts that reference unknown listings.
    pub strict_fan_out: bool,
    pub otel_endpoint: String,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("Missing environment variable: {name}"))
}

fn parsed_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Unable to parse {name}: '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

impl Config {
    pub fn init() -> Result<Self> {
        let run_migrations = parse_bool("RUN_MIGRATIONS", &required("RUN_MIGRATIONS")?)?;
        let strict_fan_out = match env::var("STRICT_FANOUT") {
            Ok(raw) => parse_bool("STRICT_FANOUT", &raw)?,
            Err(_) => false,
        };

        let port = required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            run_migrations,
            port,
            db_max_conn: parsed_or("DB_MAX_CONNECTION", 5)?,
            db_min_conn: parsed_or("DB_MIN_CONNECTION", 1)?,
            strict_fan_out,
            otel_endpoint: env::var("OTEL_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_OTEL_ENDPOINT.to_string()),
        })
    }
}
