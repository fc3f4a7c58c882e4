use std::time::Duration;

use crate::ConfigError;

/// URL and key the Supabase REST sink authenticates with.
#[derive(Clone)]
pub struct StoreCredentials {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url)
            .field("key", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub database_url: Option<String>,
    pub log_level: String,
    pub overpass_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub batch_size: usize,
    pub success_cooldown_secs: u64,
    pub failure_cooldown_secs: u64,
}

impl AppConfig {
    /// Validated Supabase credentials for the REST sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if the URL or key is unset, or
    /// [`ConfigError::PlaceholderValue`] if either still holds the template
    /// value shipped with the web app.
    pub fn store_credentials(&self) -> Result<StoreCredentials, ConfigError> {
        let url = self
            .supabase_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_URL".to_string()))?;
        if is_placeholder_url(url) {
            return Err(ConfigError::PlaceholderValue {
                var: "SUPABASE_URL".to_string(),
            });
        }

        let key = self
            .supabase_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_KEY".to_string()))?;
        if key.contains("placeholder") {
            return Err(ConfigError::PlaceholderValue {
                var: "SUPABASE_KEY".to_string(),
            });
        }

        Ok(StoreCredentials {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    /// The Postgres connection string for the direct database sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `DATABASE_URL` is unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }

    #[must_use]
    pub fn success_cooldown(&self) -> Duration {
        Duration::from_secs(self.success_cooldown_secs)
    }

    #[must_use]
    pub fn failure_cooldown(&self) -> Duration {
        Duration::from_secs(self.failure_cooldown_secs)
    }
}

fn is_placeholder_url(url: &str) -> bool {
    url.trim_end_matches('/') == "https://placeholder.supabase.co"
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_key",
                &self.supabase_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("overpass_url", &self.overpass_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("batch_size", &self.batch_size)
            .field("success_cooldown_secs", &self.success_cooldown_secs)
            .field("failure_cooldown_secs", &self.failure_cooldown_secs)
            .finish()
    }
}
