//! Configuration loading
//!
//! Layers, lowest precedence first:
//! 1. Per-environment defaults from [`AppConfig::from_env`] (after `.env`
//!    has been loaded)
//! 2. The optional environment config file (`config/development.toml`, ...)
//! 3. `ACCOUNT__*` environment variables, e.g. `ACCOUNT__DATABASE__URL`

use acct_shared::config::AppConfig;

use crate::InfrastructureError;

/// Prefix of environment variables overriding configuration keys
pub const ENV_PREFIX: &str = "ACCOUNT";

/// Load the full configuration
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let base = AppConfig::from_env();
    let file = base.environment.config_file().to_string();
    let config = layered(&base, &file, ENV_PREFIX)?;

    tracing::debug!(
        environment = %config.environment,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );
    Ok(config)
}

/// Layer an optional config file and prefixed environment variables over `base`
pub fn layered(
    base: &AppConfig,
    file: &str,
    env_prefix: &str,
) -> Result<AppConfig, InfrastructureError> {
    let config = ::config::Config::builder()
        .add_source(::config::Config::try_from(base)?)
        .add_source(::config::File::with_name(file).required(false))
        .add_source(
            ::config::Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize::<AppConfig>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acct_shared::config::Environment;

    #[test]
    fn test_layered_without_overrides_keeps_base() {
        let base = AppConfig::production();
        let loaded = layered(&base, "config/does-not-exist", "ACCTTEST_NONE").unwrap();

        assert_eq!(loaded.environment, Environment::Production);
        assert_eq!(loaded.database, base.database);
        assert_eq!(loaded.logging, base.logging);
    }

    #[test]
    fn test_layered_env_overrides() {
        std::env::set_var("ACCTTEST_OVR__DATABASE__MAX_CONNECTIONS", "7");
        std::env::set_var("ACCTTEST_OVR__LOGGING__LEVEL", "trace");

        let loaded = layered(&AppConfig::development(), "config/does-not-exist", "ACCTTEST_OVR")
            .unwrap();

        assert_eq!(loaded.database.max_connections, 7);
        assert_eq!(loaded.logging.level, "trace");
        assert_eq!(loaded.environment, Environment::Development);

        std::env::remove_var("ACCTTEST_OVR__DATABASE__MAX_CONNECTIONS");
        std::env::remove_var("ACCTTEST_OVR__LOGGING__LEVEL");
    }
}
