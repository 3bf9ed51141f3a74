use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: env::var("CLINIC_DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DATABASE_URL not set, using empty value");
                    String::new()
                }),
            database_api_key: env::var("CLINIC_DATABASE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DATABASE_API_KEY not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.database_url.is_empty() && !self.database_api_key.is_empty()
    }
}
