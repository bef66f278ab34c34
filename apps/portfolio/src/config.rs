use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::contact::registry::DEFAULT_CAPACITY;

/// Application configuration loaded from environment variables.
/// Everything has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Overrides the CV dataset compiled into the binary.
    pub cv_data_path: Option<PathBuf>,
    /// When unset, contact messages go to the log.
    pub contact_webhook_url: Option<String>,
    pub cors_permissive: bool,
    /// Upper bound on mounted contact forms kept in memory.
    pub contact_form_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            cv_data_path: optional("CV_DATA_PATH").map(PathBuf::from),
            contact_webhook_url: optional("CONTACT_WEBHOOK_URL"),
            cors_permissive: match optional("CORS_PERMISSIVE") {
                None => true,
                Some(v) => parse_bool(&v)
                    .with_context(|| format!("CORS_PERMISSIVE must be true or false, got '{v}'"))?,
            },
            contact_form_capacity: match optional("CONTACT_FORM_CAPACITY") {
                None => DEFAULT_CAPACITY,
                Some(v) => v
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .with_context(|| {
                        format!("CONTACT_FORM_CAPACITY must be a positive integer, got '{v}'")
                    })?,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
