pub mod app_config;
pub mod config;
pub mod country;
pub mod shop;

use thiserror::Error;

pub use app_config::{AppConfig, StoreCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use country::{CountryCode, CountryError, EU_COUNTRIES};
pub use shop::{Address, Contact, ShopRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("{var} still holds a placeholder value")]
    PlaceholderValue { var: String },
}

impl ConfigError {
    /// Human-readable steps for fixing the error, printed by the CLI before it
    /// exits.
    #[must_use]
    pub fn remediation(&self) -> &'static str {
        let var = match self {
            Self::MissingEnvVar(var) | Self::PlaceholderValue { var } => var.as_str(),
            Self::InvalidEnvVar { .. } => {
                return "Check the value in .env.local (or .env) and run again.";
            }
        };

        if var.contains("SUPABASE_URL") {
            "Steps to fix:\n  \
             1. Go to https://supabase.com and select your project\n  \
             2. Open Settings -> API\n  \
             3. Copy the 'Project URL'\n  \
             4. Set SUPABASE_URL (or NEXT_PUBLIC_SUPABASE_URL) in .env.local"
        } else if var.contains("SUPABASE") {
            "Steps to fix:\n  \
             1. Go to https://supabase.com -> Your Project -> Settings -> API\n  \
             2. Copy the 'anon public' key\n  \
             3. Set SUPABASE_KEY (or NEXT_PUBLIC_SUPABASE_ANON_KEY) in .env.local"
        } else if var == "DATABASE_URL" {
            "Set DATABASE_URL to the project's Postgres connection string in .env.local."
        } else {
            "Set the variable in .env.local (or .env) and run again."
        }
    }
}
