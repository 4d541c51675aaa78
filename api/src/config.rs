//! Runtime settings read from the environment.

use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: String,
    pub cors_origin: String,
    pub jwt_secret: String,
    pub production: bool,
    pub notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            cors_origin: "http://localhost:5173".to_string(),
            jwt_secret: "dev-secret-change-me".to_string(),
            production: false,
            notifications: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let production = lookup("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));
        // live updates are off in production unless asked for
        let notifications = match lookup("NOTIFICATIONS").as_deref() {
            Some("on") | Some("true") | Some("1") => true,
            Some("off") | Some("false") | Some("0") => false,
            _ => !production,
        };

        Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            production,
            notifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config(&[]), Config::default());
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&[("APP_ENV", "production")], false)]
    #[case(&[("APP_ENV", "production"), ("NOTIFICATIONS", "on")], true)]
    #[case(&[("NOTIFICATIONS", "off")], false)]
    fn notifications_follow_environment(#[case] vars: &[(&str, &str)], #[case] enabled: bool) {
        assert_eq!(config(vars).notifications, enabled);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = config(&[("LISTEN_ADDR", "127.0.0.1:9000"), ("JWT_SECRET", "s3cret")]);
        assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
        assert_eq!(cfg.jwt_secret, "s3cret");
    }
}
