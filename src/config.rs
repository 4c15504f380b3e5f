use std::collections::HashMap;
use std::env;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("CHAIR_TOKENS entry `{0}` must look like `<token>:<user id>`")]
    MalformedToken(String),
    #[error("invalid token format in CHAIR_TOKENS (at least 32 characters of [A-Za-z0-9_-])")]
    InvalidToken,
}

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Public origin used in export links; derived per request when unset
    pub public_base_url: Option<String>,
    /// Bearer token -> user id
    pub chair_tokens: HashMap<String, i64>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());
        let chair_tokens = parse_chair_tokens(&env::var("CHAIR_TOKENS").unwrap_or_default())?;
        let run_migrations = env::var("RUN_MIGRATIONS")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        if chair_tokens.is_empty() {
            tracing::warn!("CHAIR_TOKENS is empty, every chair request will be rejected");
        }

        Ok(Config {
            database_url,
            bind_addr,
            public_base_url,
            chair_tokens,
            run_migrations,
        })
    }
}

/// Tokens must be at least 32 characters, alphanumeric plus `-` and `_`.
pub fn is_valid_token(token: &str) -> bool {
    token.len() >= 32
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Parse `token:user_id` pairs separated by commas.
pub fn parse_chair_tokens(raw: &str) -> Result<HashMap<String, i64>, ConfigError> {
    let mut tokens = HashMap::new();
    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (token, user_id) = entry
            .split_once(':')
            .ok_or_else(|| ConfigError::MalformedToken(redact(entry)))?;
        let user_id = user_id
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::MalformedToken(redact(entry)))?;
        let token = token.trim();
        if !is_valid_token(token) {
            return Err(ConfigError::InvalidToken);
        }
        tokens.insert(token.to_string(), user_id);
    }
    Ok(tokens)
}

/// Keep secrets out of error messages
pub fn redact(entry: &str) -> String {
    let visible: String = entry.chars().take(4).collect();
    format!("{}...", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_parse_tokens() {
        let raw = format!(" {}:7 , {}-x:12,", TOKEN, TOKEN);
        let tokens = parse_chair_tokens(&raw).unwrap();
        assert_eq!(tokens.get(TOKEN), Some(&7));
        assert_eq!(tokens.get(&format!("{}-x", TOKEN)), Some(&12));
        assert!(parse_chair_tokens("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(
            parse_chair_tokens("abcdefgh"),
            Err(ConfigError::MalformedToken("abcd...".to_string()))
        );
        assert_eq!(
            parse_chair_tokens(&format!("{}:seven", TOKEN)),
            Err(ConfigError::MalformedToken("0123...".to_string()))
        );
        assert_eq!(parse_chair_tokens("short:1"), Err(ConfigError::InvalidToken));
        assert_eq!(
            parse_chair_tokens(&format!("{}!:1", TOKEN)),
            Err(ConfigError::InvalidToken)
        );
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("DATABASE_URL", "postgres://localhost/chair");
        env::set_var("PUBLIC_BASE_URL", "https://chair.example.org/");
        env::set_var("CHAIR_TOKENS", format!("{}:1", TOKEN));
        env::set_var("RUN_MIGRATIONS", "true");
        env::remove_var("BIND_ADDR");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url, "postgres://localhost/chair");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.public_base_url.as_deref(), Some("https://chair.example.org"));
        assert_eq!(config.chair_tokens.get(TOKEN), Some(&1));
        assert!(config.run_migrations);

        env::remove_var("PUBLIC_BASE_URL");
        env::remove_var("CHAIR_TOKENS");
        env::remove_var("RUN_MIGRATIONS");
    }
}
