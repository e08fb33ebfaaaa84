use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Sales channel the engine serves by default.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Layer the current environment file on top (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables win, e.g. PAYMENT_DATABASE__URL
            .add_source(
                config::Environment::with_prefix("PAYMENT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_environment_overrides() {
        env::set_var("PAYMENT_DATABASE__URL", "postgres://localhost/payment_test");
        env::set_var("PAYMENT_STORE__NAME", "DE");

        let config = Config::load().unwrap();
        assert_eq!(config.database.url, "postgres://localhost/payment_test");
        assert_eq!(config.store.name, "DE");
        // Currency falls back to the default when not configured.
        assert_eq!(config.store.currency, "EUR");
    }
}

