use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://recruitment_portal.db";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
    pub max_upload_bytes: usize,
    pub seed_default_admin: bool,
}

impl DatabaseConfig {
    /// Database settings only; the admin tools need nothing else.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            url: get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            database: DatabaseConfig::from_env()?,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_ttl_minutes: get_env_parse_or("JWT_TTL_MINUTES", 720)?,
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            seed_default_admin: get_env_parse_or("SEED_DEFAULT_ADMIN", true)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
