//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bemtools/bemtools.toml`
//! 3. Local config: `<dir>/.bemtools.toml` (usually the working directory)
//! 4. Environment variables: `BEMTOOLS_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::builder::DEFAULT_RESOLVE_LIMIT;
use crate::domain::expand::{ExpansionMode, DEFAULT_LOOP_LIMIT};
use crate::domain::line::DEFAULT_TAG;

/// Which notifications reach the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Show error notifications
    pub show_errors: bool,
    /// Show info notifications (e.g. "BEM JSON code generated")
    pub show_info: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            show_errors: true,
            show_info: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawNotificationConfig {
    pub show_errors: Option<bool>,
    pub show_info: Option<bool>,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_tag: Option<String>,
    pub mod_separator: Option<String>,
    pub elem_separator: Option<String>,
    pub indent: Option<String>,
    pub expansion: Option<ExpansionMode>,
    pub loop_limit: Option<usize>,
    pub max_nodes: Option<usize>,
    pub max_depth: Option<usize>,
    pub notifications: RawNotificationConfig,
}

/// Unified configuration for bemtools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tag used when a shorthand token has no `tag.` prefix
    pub default_tag: String,
    /// Separator between a block/element and its modifier in class names
    pub mod_separator: String,
    /// Separator between a block and its element in class names
    pub elem_separator: String,
    /// Indentation unit for generated HTML and stylesheets
    pub indent: String,
    /// Whether expanded siblings are copies or aliases of one node
    pub expansion: ExpansionMode,
    /// Maximum number of multiplicity expansion steps
    pub loop_limit: usize,
    /// Optional ceiling on nodes in an expanded document; unset means no ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,
    /// Maximum tree nesting for ancestry walks and sanitizing
    pub max_depth: usize,
    pub notifications: NotificationConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_tag: DEFAULT_TAG.to_string(),
            mod_separator: "--".to_string(),
            elem_separator: "__".to_string(),
            indent: "  ".to_string(),
            expansion: ExpansionMode::default(),
            loop_limit: DEFAULT_LOOP_LIMIT,
            max_nodes: None,
            max_depth: DEFAULT_RESOLVE_LIMIT,
            notifications: NotificationConfig::default(),
        }
    }
}

/// Get the XDG config directory for bemtools.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bemtools").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bemtools.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".bemtools.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay values win where specified, base values are kept otherwise.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_tag: overlay
                .default_tag
                .clone()
                .unwrap_or_else(|| self.default_tag.clone()),
            mod_separator: overlay
                .mod_separator
                .clone()
                .unwrap_or_else(|| self.mod_separator.clone()),
            elem_separator: overlay
                .elem_separator
                .clone()
                .unwrap_or_else(|| self.elem_separator.clone()),
            indent: overlay.indent.clone().unwrap_or_else(|| self.indent.clone()),
            expansion: overlay.expansion.unwrap_or(self.expansion),
            loop_limit: overlay.loop_limit.unwrap_or(self.loop_limit),
            max_nodes: overlay.max_nodes.or(self.max_nodes),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            notifications: NotificationConfig {
                show_errors: overlay
                    .notifications
                    .show_errors
                    .unwrap_or(self.notifications.show_errors),
                show_info: overlay
                    .notifications
                    .show_info
                    .unwrap_or(self.notifications.show_info),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.bemtools.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;

        Ok(current)
    }

    /// Apply BEMTOOLS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("BEMTOOLS").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_tag") {
            settings.default_tag = val;
        }
        if let Ok(val) = config.get_string("mod_separator") {
            settings.mod_separator = val;
        }
        if let Ok(val) = config.get_string("elem_separator") {
            settings.elem_separator = val;
        }
        if let Ok(val) = config.get_string("indent") {
            settings.indent = val;
        }
        if let Ok(val) = config.get::<ExpansionMode>("expansion") {
            settings.expansion = val;
        }
        if let Ok(val) = config.get::<usize>("loop_limit") {
            settings.loop_limit = val;
        }
        if let Ok(val) = config.get::<usize>("max_nodes") {
            settings.max_nodes = Some(val);
        }
        if let Ok(val) = config.get::<usize>("max_depth") {
            settings.max_depth = val;
        }
        if let Ok(val) = config.get_bool("notifications.show_errors") {
            settings.notifications.show_errors = val;
        }
        if let Ok(val) = config.get_bool("notifications.show_info") {
            settings.notifications.show_info = val;
        }

        Ok(settings)
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let invalid = |message: &str| {
            Err(ApplicationError::Config {
                message: message.to_string(),
            })
        };
        if self.default_tag.trim().is_empty() {
            return invalid("default_tag must not be empty");
        }
        if self.mod_separator.is_empty() || self.elem_separator.is_empty() {
            return invalid("separators must not be empty");
        }
        if self.max_depth == 0 {
            return invalid("max_depth must be at least 1");
        }
        Ok(())
    }

    /// Settings as TOML, for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay: RawSettings = toml::from_str(
            r#"
default_tag = "section"
expansion = "alias"

[notifications]
show_info = false
"#,
        )
        .unwrap();

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.default_tag, "section");
        assert_eq!(merged.expansion, ExpansionMode::Alias);
        assert!(!merged.notifications.show_info);
        assert!(merged.notifications.show_errors);
        assert_eq!(merged.loop_limit, DEFAULT_LOOP_LIMIT);
    }

    #[test]
    fn given_empty_separator_when_validating_then_config_error() {
        let settings = Settings {
            mod_separator: String::new(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }
}
