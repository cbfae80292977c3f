//! src/config.rs
//! ============================================================================
//! # Config: Viewer Configuration Loader and Saver
//!
//! User-editable settings stored as TOML in the platform config directory
//! (resolved with the [`directories`](https://docs.rs/directories) crate),
//! or at an explicit path given on the command line.
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Defaults for every field, so partial files are fine
//! - Async load/save with `tokio::fs`
//! - Validation into engine types (`NonZeroUsize` page size, parsed fields)
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load(None).await?;
//! let state = config.view.initial_state()?;
//! ```

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use compact_str::CompactString;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs as TokioFs;
use tracing::info;

use crate::{
    engine::sort::{SortDirection, SortKey},
    error::AppError,
    model::{record::RecordField, view_state::ViewState},
};

/// Colour scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Default,

    HighContrast,
}

/// Table and engine defaults applied when the view mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows per page
    pub page_size: usize,

    pub sort_field: RecordField,

    pub sort_direction: SortDirection,

    /// One search input is shown per field, in this order
    pub search_fields: Vec<RecordField>,

    /// Show the id column
    pub show_id: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            sort_field: RecordField::FirstName,
            sort_direction: SortDirection::Ascending,
            search_fields: vec![RecordField::Email, RecordField::Gender],
            show_id: false,
        }
    }
}

impl ViewConfig {
    pub fn page_size(&self) -> Result<NonZeroUsize, AppError> {
        NonZeroUsize::new(self.page_size)
            .ok_or_else(|| AppError::invalid_input("page_size", "must be greater than zero"))
    }

    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        SortKey::new(self.sort_field, self.sort_direction)
    }

    /// Validate and build the state a freshly mounted view starts from.
    pub fn initial_state(&self) -> Result<ViewState, AppError> {
        self.validate()?;
        Ok(ViewState::new(self.page_size()?, self.sort_key()))
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.page_size()?;

        if self.search_fields.is_empty() {
            return Err(AppError::invalid_input(
                "search_fields",
                "at least one search field is required",
            ));
        }

        for (i, field) in self.search_fields.iter().enumerate() {
            if self.search_fields[..i].contains(field) {
                return Err(AppError::invalid_input(
                    "search_fields",
                    format!("'{field}' is listed twice"),
                ));
            }
        }
        Ok(())
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub dir: PathBuf,

    /// `EnvFilter` directive, e.g. "info" or "roster_core=debug"
    pub level: CompactString,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            level: CompactString::const_new("info"),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,

    /// Dataset to open when `--data` is not given. `None` uses the bundled
    /// sample.
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Config {
    /// Load from `path`, or from the platform config dir when `None`.
    ///
    /// A missing platform file is created with defaults; a missing explicit
    /// path is an error.
    pub async fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::load_from(path).await,
            None => {
                let path = Self::config_path()?;
                if TokioFs::try_exists(&path).await.unwrap_or(false) {
                    Self::load_from(&path).await
                } else {
                    info!(
                        "No config file found at {}, using default configuration. Creating it now.",
                        path.display()
                    );
                    let default_config = Self::default();
                    default_config.save_to(&path).await?;
                    Ok(default_config)
                }
            }
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        info!("Loading config from {}", path.display());
        let text = TokioFs::read_to_string(path)
            .await
            .map_err(|e| AppError::config_io(path, e))?;
        let cfg: Self = toml::from_str(&text)?;
        cfg.view.validate()?;
        Ok(cfg)
    }

    /// Saves config to TOML at `path`, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::config_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str)
            .await
            .map_err(|e| AppError::config_io(path, e))?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> Result<PathBuf, AppError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> Result<PathBuf, AppError> {
        let proj_dirs = ProjectDirs::from("org", "roster", "Roster").ok_or(AppError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}
