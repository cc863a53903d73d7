use std::env;

use anyhow::bail;

use crate::middleware::wallet_gate::{PathPattern, PathRules};

/// Two weeks, matching the default lifetime of a browser session cookie.
const DEFAULT_SESSION_TTL_SECS: i64 = 1_209_600;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub signup_url: String,
    pub static_dir: String,
    pub session_ttl_secs: i64,
    pub path_rules: PathRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            signup_url: "/signup/".to_string(),
            static_dir: "static".to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            path_rules: PathRules::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = PathRules::default();

        let public = match env::var("WALLET_PUBLIC_PATHS") {
            Ok(raw) => parse_patterns("WALLET_PUBLIC_PATHS", &raw)?,
            Err(_) => defaults.public().to_vec(),
        };
        let protected = match env::var("WALLET_PROTECTED_PATHS") {
            Ok(raw) => parse_patterns("WALLET_PROTECTED_PATHS", &raw)?,
            Err(_) => defaults.protected().to_vec(),
        };
        let api_prefix = env::var("WALLET_API_PREFIX")
            .unwrap_or_else(|_| defaults.api_prefix().to_string());
        if !api_prefix.starts_with('/') {
            bail!("WALLET_API_PREFIX must start with '/', got {api_prefix:?}");
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            signup_url: env::var("SIGNUP_URL")
                .unwrap_or_else(|_| "/signup/".to_string()),
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string()),
            session_ttl_secs: match env::var("SESSION_TTL_SECS") {
                Ok(raw) => parse_session_ttl(&raw)?,
                Err(_) => DEFAULT_SESSION_TTL_SECS,
            },
            path_rules: PathRules::new(public, protected, api_prefix),
        })
    }
}

/// Session idle lifetime in seconds. Must be positive and fit a
/// `chrono::Duration`.
pub fn parse_session_ttl(raw: &str) -> anyhow::Result<i64> {
    let secs: i64 = match raw.trim().parse() {
        Ok(secs) => secs,
        Err(_) => bail!("SESSION_TTL_SECS must be a whole number of seconds, got {raw:?}"),
    };
    if secs <= 0 || chrono::Duration::try_seconds(secs).is_none() {
        bail!("SESSION_TTL_SECS out of range: {secs}");
    }
    Ok(secs)
}

/// Parses a comma-separated pattern list. `=/path` is an exact match, a bare
/// `/` is always exact, anything else is a prefix.
pub fn parse_patterns(var: &str, raw: &str) -> anyhow::Result<Vec<PathPattern>> {
    let mut patterns = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (exact, path) = match entry.strip_prefix('=') {
            Some(rest) => (true, rest),
            None => (false, entry),
        };
        if !path.starts_with('/') {
            bail!("{var}: pattern {entry:?} must start with '/'");
        }
        patterns.push(if exact || path == "/" {
            PathPattern::Exact(path.to_string())
        } else {
            PathPattern::Prefix(path.to_string())
        });
    }
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_and_prefix_entries() {
        let patterns = parse_patterns("X", "/, =/about, /docs/ ,,").unwrap();
        assert_eq!(
            patterns,
            vec![
                PathPattern::Exact("/".into()),
                PathPattern::Exact("/about".into()),
                PathPattern::Prefix("/docs/".into()),
            ]
        );
    }

    #[test]
    fn rejects_relative_patterns() {
        let err = parse_patterns("WALLET_PUBLIC_PATHS", "/ok/, static/").unwrap_err();
        assert!(err.to_string().contains("static/"));
    }

    #[test]
    fn session_ttl_must_be_positive_and_bounded() {
        assert_eq!(parse_session_ttl("3600").unwrap(), 3600);
        assert_eq!(parse_session_ttl(" 60 ").unwrap(), 60);

        for bad in ["0", "-5", "9300000000000000", "abc", ""] {
            assert!(parse_session_ttl(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn default_session_ttl_is_accepted() {
        let raw = DEFAULT_SESSION_TTL_SECS.to_string();
        assert_eq!(parse_session_ttl(&raw).unwrap(), DEFAULT_SESSION_TTL_SECS);
    }
}
