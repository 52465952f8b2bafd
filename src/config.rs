// Runtime configuration. Every value has a built-in default; a few can be
// overridden from the environment the same way the gateway URL used to be.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_LOG_FILE: &str = "login_attempts.log";
pub const DEFAULT_PASSCODE: &str = "1234";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chat completions endpoint (full URL, not a base).
    pub api_url: String,
    pub model: String,
    /// Append-only login attempt log, relative to the working directory by default.
    pub log_path: PathBuf,
    /// Local passcode gating the login flow. Not the API key.
    pub passcode: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.into(),
            model: DEFAULT_MODEL.into(),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            passcode: DEFAULT_PASSCODE.into(),
        }
    }
}

impl Config {
    /// Build a config from `KEYCHAT_API_URL`, `KEYCHAT_MODEL` and
    /// `KEYCHAT_LOG_FILE`, falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Config {
            api_url: non_empty("KEYCHAT_API_URL").unwrap_or(defaults.api_url),
            model: non_empty("KEYCHAT_MODEL").unwrap_or(defaults.model),
            log_path: non_empty("KEYCHAT_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_path),
            passcode: defaults.passcode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_openai_endpoint() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(config.log_path, PathBuf::from("login_attempts.log"));
        assert_eq!(config.passcode, "1234");
    }

    #[test]
    fn env_overrides_are_applied() {
        let vars: HashMap<&str, &str> = [
            ("KEYCHAT_API_URL", "http://localhost:9999/v1/chat/completions"),
            ("KEYCHAT_MODEL", "gpt-4o-mini"),
            ("KEYCHAT_LOG_FILE", "/tmp/attempts.log"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.api_url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.log_path, PathBuf::from("/tmp/attempts.log"));
        // the passcode never comes from the environment
        assert_eq!(config.passcode, DEFAULT_PASSCODE);
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_lookup(|_| Some("  ".into()));
        assert_eq!(config, Config::default());
    }
}
