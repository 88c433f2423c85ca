//! Layered application configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Bundled defaults (`include_str!` from `storypal.toml`)
//! 2. `~/.config/storypal/storypal.toml`
//! 3. `./storypal.toml`
//! 4. An explicit file passed with `--config`
//! 5. `STORYPAL_*` environment variables, sections separated by `__`

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storypal_error::{ConfigError, StorypalError, StorypalResult};
use storypal_models::GeminiConfig;
use storypal_narrative::{GeneratorConfig, ResolverConfig};
use tracing::debug;

const DEFAULT_CONFIG: &str = include_str!("../../../storypal.toml");

/// `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct StorageConfig {
    /// Data directory; `None` selects the platform data directory
    #[serde(default)]
    data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Directory the file-backed store writes to.
    ///
    /// Falls back to `./.storypal` when the platform has no data directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join("storypal"))
                .unwrap_or_else(|| PathBuf::from(".storypal")),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Complete Storypal configuration.
///
/// # Example
///
/// ```no_run
/// use storypal::StorypalConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StorypalConfig::load()?;
/// println!("Images time out after {}s", config.resolver().image_timeout_secs());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct StorypalConfig {
    /// Persistence settings
    #[serde(default)]
    storage: StorageConfig,

    /// Gemini provider settings
    #[serde(default)]
    provider: GeminiConfig,

    /// Narrative generator settings
    #[serde(default)]
    generator: GeneratorConfig,

    /// Illustration resolver settings
    #[serde(default)]
    resolver: ResolverConfig,

    /// Log output settings
    #[serde(default)]
    logging: LoggingConfig,
}

impl StorypalConfig {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any present source fails to parse.
    pub fn load() -> StorypalResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration, layering `path` above the standard files.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `path` is missing or any source
    /// fails to parse.
    pub fn load_with(path: Option<&Path>) -> StorypalResult<Self> {
        debug!(
            explicit = ?path,
            "Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults"
        );

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storypal/storypal.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storypal").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("STORYPAL").separator("__"));

        Self::finish(builder)
    }

    /// Parse `toml` layered over the bundled defaults.
    ///
    /// Ignores the filesystem and environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `toml` does not parse.
    pub fn from_toml(toml: &str) -> StorypalResult<Self> {
        let builder = Self::defaults().add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> StorypalResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                StorypalError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StorypalError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        if config.resolver.fallback_images().is_empty() {
            return Err(ConfigError::in_section("resolver", "fallback_images must not be empty").into());
        }
        Ok(config)
    }
}
