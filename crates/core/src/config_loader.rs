use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

/// Environment prefix for overrides, e.g. `NIFTY_BROKER__API_KEY`.
const ENV_PREFIX: &str = "NIFTY_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging defaults, TOML, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the result fails validation.
    pub fn load() -> Result<AppConfig> {
        Self::load_from("config/Config.toml", None)
    }

    /// Loads application configuration with a specific profile layered over the base file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the result fails validation.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        Self::load_from("config/Config.toml", Some(profile))
    }

    /// Loads from an explicit base file. The profile file sits next to it as
    /// `Config.{profile}.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the result fails validation.
    pub fn load_from(path: &str, profile: Option<&str>) -> Result<AppConfig> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path));

        if let Some(profile) = profile {
            let profile_path = match path.rsplit_once('.') {
                Some((stem, ext)) => format!("{stem}.{profile}.{ext}"),
                None => format!("{path}.{profile}"),
            };
            figment = figment.merge(Toml::file(profile_path));
        }

        let config: AppConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        tracing::debug!(path, ?profile, "Configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use figment::Jail;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.strategy.lot_size, 50);
            assert_eq!(config.server.port, 5000);
            Ok(())
        });
    }

    #[test]
    fn toml_then_profile_then_env() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [strategy]
                lot_size = 75
                expiry_weekday = "Tue"

                [risk]
                stop_loss_percent = 25
                "#,
            )?;
            jail.create_file(
                "config/Config.paper.toml",
                r#"
                [risk]
                stop_loss_percent = 40
                "#,
            )?;
            jail.set_env("NIFTY_BROKER__API_KEY", "kite-key");

            let config = ConfigLoader::load_with_profile("paper").map_err(|e| e.to_string())?;
            assert_eq!(config.strategy.lot_size, 75);
            assert_eq!(config.strategy.expiry_weekday, Weekday::Tue);
            assert_eq!(config.risk.stop_loss_percent, dec!(40));
            assert_eq!(config.broker.api_key.as_deref(), Some("kite-key"));
            // untouched fields keep defaults
            assert_eq!(config.strategy.strike_step, 50);
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/Config.toml", "[strategy]\nstrike_step = 0\n")?;
            assert!(ConfigLoader::load().is_err());
            Ok(())
        });
    }
}
