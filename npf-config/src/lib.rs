//! Shared configuration loader for the npf toolchain.
//!
//! `defaults/npf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`NpfConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use npf_babel::common::inline::{FormatTags, TagMapping};
use npf_babel::post::PostDefaults;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/npf.default.toml");

/// Top-level configuration consumed by npf applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NpfConfig {
    pub formatting: FormattingConfig,
    pub convert: ConvertConfig,
    pub import: ImportConfig,
}

/// Inline formatting: which tag each format type renders as.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    /// Ordered outermost first.
    pub tags: Vec<TagMapping>,
}

impl From<&FormattingConfig> for FormatTags {
    fn from(config: &FormattingConfig) -> Self {
        FormatTags::new(config.tags.iter().cloned())
    }
}

impl From<FormattingConfig> for FormatTags {
    fn from(config: FormattingConfig) -> Self {
        FormatTags::new(config.tags)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Output format when none is requested.
    pub format: String,
}

/// Fields applied to every imported post record.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub status: String,
    pub author: u64,
}

impl From<&ImportConfig> for PostDefaults {
    fn from(config: &ImportConfig) -> Self {
        PostDefaults {
            status: config.status.clone(),
            author: config.author,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<NpfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NpfConfig, ConfigError> {
    Loader::new().build()
}
