//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Device base URL, e.g. `https://panorama.example.com`
    pub host: String,

    /// API key for the XML API
    pub api_key: String,

    /// Default output format
    pub output_format: String,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Accept self-signed device certificates
    pub insecure: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key: String::new(),
            output_format: "table".to_string(),
            verbose: false,
            timeout: 10,
            insecure: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from file, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).context("Failed to read CLI config file")?;

            toml::from_str(&content).context("Failed to parse CLI config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;

        std::fs::write(&config_path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".config")
        } else {
            return Err(anyhow::anyhow!("Cannot determine config directory"));
        };

        Ok(config_dir.join("panosctl").join("cli.toml"))
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    host: Option<String>,
    api_key: Option<String>,
    output_format: Option<String>,
    verbose: Option<bool>,
    timeout: Option<u64>,
    insecure: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set device host URL (with validation)
    pub fn with_host(mut self, host: impl Into<String>) -> Result<Self> {
        let host = host.into();
        Self::validate_host(&host)?;
        self.host = Some(host);
        Ok(self)
    }

    /// Set API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set timeout (with validation)
    pub fn with_timeout(mut self, timeout: u64) -> Result<Self> {
        Self::validate_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Set whether to accept self-signed device certificates
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }

    /// Load configuration from file
    pub fn with_config_file(self, load_file: bool) -> Result<Self> {
        if !load_file {
            return Ok(self);
        }

        match CliConfig::load() {
            Ok(config) => {
                let builder = self;
                // Only use file values if they weren't already set (preserving priority)
                Ok(Self {
                    host: builder.host.or(Some(config.host)),
                    api_key: builder.api_key.or(Some(config.api_key)),
                    output_format: builder.output_format.or(Some(config.output_format)),
                    verbose: builder.verbose.or(Some(config.verbose)),
                    timeout: builder.timeout.or(Some(config.timeout)),
                    insecure: builder.insecure.or(Some(config.insecure)),
                })
            }
            Err(_) => {
                // If file doesn't exist or can't be loaded, continue with current builder
                Ok(self)
            }
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        // Only apply env vars if values weren't already set (preserving priority)
        if self.host.is_none() {
            if let Ok(host) = std::env::var("PANOSCTL_HOST") {
                if Self::validate_host(&host).is_ok() {
                    self.host = Some(host);
                }
            }
        }

        if self.api_key.is_none() {
            if let Ok(api_key) = std::env::var("PANOSCTL_API_KEY") {
                self.api_key = Some(api_key);
            }
        }

        if self.output_format.is_none() {
            if let Ok(format) = std::env::var("PANOSCTL_FORMAT") {
                if Self::validate_output_format(&format).is_ok() {
                    self.output_format = Some(format);
                }
            }
        }

        if self.verbose.is_none() {
            if let Ok(verbose) = std::env::var("PANOSCTL_VERBOSE") {
                self.verbose = Some(verbose.to_lowercase() == "true" || verbose == "1");
            }
        }

        if self.timeout.is_none() {
            if let Ok(timeout) = std::env::var("PANOSCTL_TIMEOUT") {
                if let Ok(timeout) = timeout.parse() {
                    if Self::validate_timeout(timeout).is_ok() {
                        self.timeout = Some(timeout);
                    }
                }
            }
        }

        if self.insecure.is_none() {
            if let Ok(insecure) = std::env::var("PANOSCTL_INSECURE") {
                self.insecure = Some(insecure.to_lowercase() == "true" || insecure == "1");
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let host = self.host.unwrap_or(defaults.host);
        let output_format = self.output_format.unwrap_or(defaults.output_format);
        let timeout = self.timeout.unwrap_or(defaults.timeout);

        // Validate final values; the host stays optional here so commands
        // can report its absence with a better message than the builder.
        if !host.is_empty() {
            Self::validate_host(&host)?;
        }
        Self::validate_output_format(&output_format)?;
        Self::validate_timeout(timeout)?;

        Ok(CliConfig {
            host,
            api_key: self.api_key.unwrap_or(defaults.api_key),
            output_format,
            verbose: self.verbose.unwrap_or(defaults.verbose),
            timeout,
            insecure: self.insecure.unwrap_or(defaults.insecure),
        })
    }

    /// Validate host URL format
    fn validate_host(host: &str) -> Result<()> {
        if host.is_empty() {
            return Err(anyhow::anyhow!("Device host cannot be empty"));
        }

        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "Device host must start with http:// or https://"
            ));
        }

        Ok(())
    }

    /// Validate output format
    fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "table" | "json" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'table' or 'json'",
                format
            )),
        }
    }

    /// Validate timeout value
    fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than 0"));
        }

        if timeout > 300 {
            return Err(anyhow::anyhow!(
                "Timeout must be less than or equal to 300 seconds"
            ));
        }

        Ok(())
    }
}
