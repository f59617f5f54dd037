// src/config.rs

use dotenvy::dotenv;
use std::env;

/// First page returned when the client sends no (or unparseable) `page`.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client sends no (or unparseable) `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            port,
            rust_log,
        }
    }
}
