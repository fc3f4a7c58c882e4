use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "moto-directory/0.1 (osm-ingest)";

/// Load application configuration from environment variables.
///
/// Loads `.env.local` (shared with the web app) and then `.env` before
/// reading env vars. Neither file overrides variables already set in the
/// process, so `.env.local` wins over `.env`.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Store credentials are read but not validated here; which of them are
/// required depends on the sink the caller selects (see
/// [`AppConfig::store_credentials`] and [`AppConfig::require_database_url`]).
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // First variable that is set wins; the NEXT_PUBLIC_* names are shared
    // with the directory web app.
    let first_of = |vars: &[&str]| -> Option<String> { vars.iter().find_map(|v| lookup(v).ok()) };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let supabase_url = first_of(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]);
    let supabase_key = first_of(&["SUPABASE_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]);
    let database_url = lookup("DATABASE_URL").ok();

    let log_level = or_default("MOTO_LOG_LEVEL", "info");
    let overpass_url = or_default("MOTO_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    let request_timeout_secs = parse_u64("MOTO_REQUEST_TIMEOUT_SECS", "90")?;
    let user_agent = or_default("MOTO_USER_AGENT", DEFAULT_USER_AGENT);

    let batch_size = parse_usize("MOTO_BATCH_SIZE", "100")?;
    if batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MOTO_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let success_cooldown_secs = parse_u64("MOTO_SUCCESS_COOLDOWN_SECS", "10")?;
    let failure_cooldown_secs = parse_u64("MOTO_FAILURE_COOLDOWN_SECS", "20")?;

    Ok(AppConfig {
        supabase_url,
        supabase_key,
        database_url,
        log_level,
        overpass_url,
        request_timeout_secs,
        user_agent,
        batch_size,
        success_cooldown_secs,
        failure_cooldown_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
