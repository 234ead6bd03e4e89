//! Configuration model loaded from external sources.

use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::types::{MAX_PAGE_SIZE, PageSize};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_take_bounds"))]
/// Tuning shared by every list screen.
pub struct ListConfig {
    /// Search debounce quiet period.
    #[validate(range(max = 10_000))]
    pub quiet_period_ms: u64,
    #[validate(range(min = 1, max = 200))]
    pub default_take: usize,
    #[validate(range(min = 1, max = 200))]
    pub max_take: usize,
}

fn validate_take_bounds(config: &ListConfig) -> Result<(), ValidationError> {
    if config.default_take > config.max_take {
        return Err(ValidationError::new("default_take_exceeds_max_take"));
    }
    Ok(())
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: 500,
            default_take: 10,
            max_take: MAX_PAGE_SIZE,
        }
    }
}

impl ListConfig {
    /// Loads `config/default`, then `config/{profile}`, then `APP_*`
    /// environment variables. Every file is optional.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true));
        Self::finish(builder.build()?)
    }

    /// Loads from an in-memory YAML document layered over the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::from_str(yaml, FileFormat::Yaml));
        Self::finish(builder.build()?)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Self::default();
        Ok(Config::builder()
            .set_default("quiet_period_ms", defaults.quiet_period_ms as i64)?
            .set_default("default_take", defaults.default_take as i64)?
            .set_default("max_take", defaults.max_take as i64)?)
    }

    fn finish(settings: Config) -> Result<Self, ConfigError> {
        let config = settings.try_deserialize::<ListConfig>()?;
        config.validate()?;
        Ok(config)
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn default_page_size(&self) -> PageSize {
        PageSize::bounded(self.default_take, self.max_take).unwrap_or_default()
    }
}
