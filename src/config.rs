use std::str::FromStr;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_SCRAPER_URL: &str = "https://en.wikipedia.org/wiki/Python_(programming_language)";
const DEFAULT_SCRAPER_CAPTION: &str = "Summary of Python 3's built-in types";
const DEFAULT_SCRAPER_KEY: &str = "dry_run";

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub ip: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub db_name: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    pub url: String,
    pub caption: String,
    /// Long name of the loader flag that selects console output.
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub db: DbConfig,
    pub api: ApiConfig,
    pub scraper: ScraperConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let db = DbConfig {
            ip: or_default("DB_IP", "localhost"),
            port: parse_or(&lookup, "DB_PORT", 5432)?,
            username: required("DB_USERNAME")?,
            password: required("DB_PASSWORD")?,
            db_name: required("DB_NAME")?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
        };
        let api = ApiConfig {
            host: or_default("API_HOST", "0.0.0.0"),
            port: parse_or(&lookup, "API_PORT", 8080)?,
        };
        let scraper = ScraperConfig {
            url: or_default("SCRAPER_URL", DEFAULT_SCRAPER_URL),
            caption: or_default("SCRAPER_CAPTION", DEFAULT_SCRAPER_CAPTION),
            key: or_default("SCRAPER_KEY", DEFAULT_SCRAPER_KEY),
        };

        if scraper.key.trim().is_empty() {
            anyhow::bail!("SCRAPER_KEY must not be blank");
        }

        Ok(Self { db, api, scraper })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const DB_VARS: [(&str, &str); 3] = [
        ("DB_USERNAME", "postgres"),
        ("DB_PASSWORD", "p@ss:word"),
        ("DB_NAME", "catalog"),
    ];

    #[test]
    fn defaults_fill_optional_fields() {
        let cfg = AppConfig::from_lookup(lookup_from(&DB_VARS)).expect("config");
        assert_eq!(cfg.db.ip, "localhost");
        assert_eq!(cfg.db.port, 5432);
        assert_eq!(cfg.db.password, "p@ss:word");
        assert_eq!(cfg.api.port, 8080);
        assert_eq!(cfg.scraper.key, "dry_run");
        assert_eq!(cfg.scraper.caption, "Summary of Python 3's built-in types");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let mut vars = DB_VARS.to_vec();
        vars.extend([
            ("DB_IP", "10.0.0.5"),
            ("DB_PORT", "6543"),
            ("API_PORT", "9000"),
            ("SCRAPER_URL", "http://localhost/page"),
            ("SCRAPER_CAPTION", "Types"),
            ("SCRAPER_KEY", "print"),
        ]);
        let cfg = AppConfig::from_lookup(lookup_from(&vars)).expect("config");
        assert_eq!(cfg.db.ip, "10.0.0.5");
        assert_eq!(cfg.db.port, 6543);
        assert_eq!(cfg.api.port, 9000);
        assert_eq!(cfg.scraper.url, "http://localhost/page");
        assert_eq!(cfg.scraper.caption, "Types");
        assert_eq!(cfg.scraper.key, "print");
    }

    #[test]
    fn missing_credentials_are_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("DB_NAME", "catalog")])).unwrap_err();
        assert!(err.to_string().contains("DB_USERNAME"));
    }

    #[test]
    fn malformed_port_is_rejected() {
        let mut vars = DB_VARS.to_vec();
        vars.push(("API_PORT", "eighty"));
        let err = AppConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }
}
