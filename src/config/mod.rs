use crate::bus::MAX_CAPACITY;
use crate::models::{AppConfig, ControllerSnapshot};
use anyhow::{Context, Result, ensure};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Prefix for environment overrides, e.g. `SITECRAFT__BUS__CAPACITY=128`.
pub const ENV_PREFIX: &str = "SITECRAFT";

/// Configuration manager for the application config and the persisted session snapshot.
///
/// Manages two files inside the configuration directory:
/// - `sitecraft.yaml`: application settings (logging, bus, demo host)
/// - `session.yaml`: the progress controller snapshot kept across teardown
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    app_config_path: Utf8PathBuf,
    snapshot_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the given configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "Sitecraft Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            app_config_path: config_dir.join("sitecraft.yaml"),
            snapshot_path: config_dir.join("session.yaml"),
            config_dir,
        })
    }

    /// Load the application configuration.
    ///
    /// Layers, lowest precedence first: built-in defaults, `sitecraft.yaml`
    /// (optional), then `SITECRAFT__`-prefixed environment variables with `__`
    /// separating nested keys.
    pub fn load_app_config(&self) -> Result<AppConfig> {
        if !self.app_config_path.exists() {
            tracing::warn!(
                "App config file not found at {}, using defaults",
                self.app_config_path
            );
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::from(self.app_config_path.as_std_path())
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read app config: {}", self.app_config_path))?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse app config: {}", self.app_config_path))?;

        ensure!(
            (1..=MAX_CAPACITY).contains(&config.bus.capacity),
            "bus.capacity must be between 1 and {}, got {}",
            MAX_CAPACITY,
            config.bus.capacity
        );

        tracing::info!("Loaded app config from {}", self.app_config_path);
        Ok(config)
    }

    /// Save the application configuration.
    pub fn save_app_config(&self, config: &AppConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize app config to YAML")?;

        fs::write(&self.app_config_path, yaml_string)
            .with_context(|| format!("Failed to write app config: {}", self.app_config_path))?;

        tracing::info!("Saved app config to {}", self.app_config_path);
        Ok(())
    }

    /// Persist the controller snapshot of a session being torn down.
    pub fn save_snapshot(&self, snapshot: &ControllerSnapshot) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(snapshot).context("Failed to serialize session snapshot")?;

        fs::write(&self.snapshot_path, yaml_string)
            .with_context(|| format!("Failed to write session snapshot: {}", self.snapshot_path))?;

        tracing::debug!("Saved session snapshot {:?}", snapshot);
        Ok(())
    }

    /// Load the persisted controller snapshot.
    ///
    /// # Returns
    /// `None` when no snapshot was saved, meaning the next session is a fresh one
    pub fn load_snapshot(&self) -> Result<Option<ControllerSnapshot>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }

        let file_contents = fs::read_to_string(&self.snapshot_path)
            .with_context(|| format!("Failed to read session snapshot: {}", self.snapshot_path))?;

        let snapshot: ControllerSnapshot = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse session snapshot: {}", self.snapshot_path))?;

        Ok(Some(snapshot))
    }

    /// Remove the persisted snapshot, if any.
    pub fn clear_snapshot(&self) -> Result<()> {
        if self.snapshot_path.exists() {
            fs::remove_file(&self.snapshot_path).with_context(|| {
                format!("Failed to remove session snapshot: {}", self.snapshot_path)
            })?;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
