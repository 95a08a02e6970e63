// Endpoint configuration. There is no config file: the public Google
// endpoints are used unless overridden from the environment.

pub const DEFAULT_API_URL: &str = "https://apps-apis.google.com/a/feeds/emailsettings/2.0";
pub const DEFAULT_LOGIN_URL: &str = "https://www.google.com/accounts/ClientLogin";

/// Application name sent as the ClientLogin `source`.
pub const APPLICATION_NAME: &str = "exampleCo-exampleApp-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub api_url: String,
    pub login_url: String,
    pub source: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            api_url: DEFAULT_API_URL.into(),
            login_url: DEFAULT_LOGIN_URL.into(),
            source: APPLICATION_NAME.into(),
        }
    }
}

impl ServiceConfig {
    /// Read `GMAIL_SETTINGS_API_URL` and `GMAIL_SETTINGS_LOGIN_URL`,
    /// falling back to the defaults for whichever is unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ServiceConfig::default();
        ServiceConfig {
            api_url: lookup("GMAIL_SETTINGS_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            login_url: lookup("GMAIL_SETTINGS_LOGIN_URL").unwrap_or(defaults.login_url),
            source: defaults.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_use_google_endpoints() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn api_url_override_drops_trailing_slash() {
        let config = ServiceConfig::from_lookup(|key| match key {
            "GMAIL_SETTINGS_API_URL" => Some("http://localhost:8080/feeds/".into()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://localhost:8080/feeds");
        assert_eq!(config.login_url, DEFAULT_LOGIN_URL);
    }
}
