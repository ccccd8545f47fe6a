// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::{Path, PathBuf};

use monarrange_interaction::InteractionConfig;
use monarrange_topology::CommitPolicy;
use monarrange_view2d::{GridSpacing, ViewConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from loading an [`EditorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parse but are out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings applied to each new commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitConfig {
    /// What happens to edits whose apply failed.
    pub policy: CommitPolicy,
}

/// Configuration of an [`Editor`](crate::Editor), usually loaded from TOML.
///
/// Every section and field is optional and falls back to its default:
///
/// ```toml
/// [view]
/// default_scale = 0.1
/// default_offset = { x = 100, y = 100 }
/// min_scale = 0.01
/// max_scale = 1.0
/// zoom_step = 1.1
/// scroll_step = 50
///
/// [grid]
/// minor = 100
/// major = 500
///
/// [interaction]
/// pan_modifier = "control"
/// zoom_modifier = "control"
/// drag_anchor = "pointer"
/// suppress_zoom_while_dragging = false
/// zoom_about_pointer = false
///
/// [commit]
/// policy = "clear-all"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Canvas transform defaults and limits.
    pub view: ViewConfig,
    /// Background grid spacing.
    pub grid: GridSpacing,
    /// Gesture bindings.
    pub interaction: InteractionConfig,
    /// Commit behavior.
    pub commit: CommitConfig,
}

impl EditorConfig {
    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, and otherwise
    /// whatever [`EditorConfig::from_toml_str`] returns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] if [`EditorConfig::validate`] rejects the values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error; this does not happen for values built from
    /// the public fields.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let view = &self.view;
        for (name, value) in [
            ("view.default_scale", view.default_scale),
            ("view.min_scale", view.min_scale),
            ("view.max_scale", view.max_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if view.min_scale > view.max_scale {
            return Err(ConfigError::Invalid(format!(
                "view.min_scale ({}) is greater than view.max_scale ({})",
                view.min_scale, view.max_scale
            )));
        }
        if !(view.min_scale..=view.max_scale).contains(&view.default_scale) {
            return Err(ConfigError::Invalid(format!(
                "view.default_scale ({}) is outside [{}, {}]",
                view.default_scale, view.min_scale, view.max_scale
            )));
        }
        if !(view.zoom_step.is_finite() && view.zoom_step > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "view.zoom_step must be greater than 1, got {}",
                view.zoom_step
            )));
        }
        if view.scroll_step <= 0 {
            return Err(ConfigError::Invalid(format!(
                "view.scroll_step must be positive, got {}",
                view.scroll_step
            )));
        }
        if self.grid.minor == 0 || self.grid.major == 0 {
            return Err(ConfigError::Invalid("grid steps must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use monarrange_interaction::{DragAnchor, ModifierKey};
    use monarrange_topology::CommitPolicy;
    use monarrange_view2d::ViewPoint;

    use super::{ConfigError, EditorConfig};

    #[test]
    fn empty_document_is_the_default() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.view.default_scale, 0.1);
        assert_eq!(config.view.default_offset, ViewPoint::new(100, 100));
        assert_eq!(config.grid.minor, 100);
        assert_eq!(config.commit.policy, CommitPolicy::ClearAll);
    }

    #[test]
    fn sections_override_fields_individually() {
        let config = EditorConfig::from_toml_str(
            r#"
            [view]
            default_offset = { x = 0, y = 40 }
            scroll_step = 120

            [interaction]
            pan_modifier = "shift"
            drag_anchor = "grab-offset"

            [commit]
            policy = "retain-failed"
            "#,
        )
        .unwrap();
        assert_eq!(config.view.default_offset, ViewPoint::new(0, 40));
        assert_eq!(config.view.scroll_step, 120);
        assert_eq!(config.view.zoom_step, 1.1);
        assert_eq!(config.interaction.pan_modifier, ModifierKey::Shift);
        assert_eq!(config.interaction.zoom_modifier, ModifierKey::Control);
        assert_eq!(config.interaction.drag_anchor, DragAnchor::GrabOffset);
        assert_eq!(config.commit.policy, CommitPolicy::RetainFailed);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for text in [
            "[view]\nmin_scale = 0.0",
            "[view]\nmin_scale = 0.5\nmax_scale = 0.2\ndefault_scale = 0.3",
            "[view]\ndefault_scale = 2.0",
            "[view]\nzoom_step = 1.0",
            "[view]\nscroll_step = 0",
            "[view]\nscroll_step = -50",
            "[grid]\nminor = 0",
        ] {
            assert!(
                matches!(EditorConfig::from_toml_str(text), Err(ConfigError::Invalid(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn unknown_keys_fail_to_parse() {
        assert!(matches!(
            EditorConfig::from_toml_str("[viewport]\nscale = 2.0"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EditorConfig::from_toml_str("[commit]\npolicy = \"sometimes\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn misspelled_keys_inside_sections_fail_to_parse() {
        for text in [
            "[view]\nzoom_stpe = 3.0",
            "[grid]\nminro = 50",
            "[interaction]\npan_modifer = \"shift\"",
        ] {
            assert!(
                matches!(EditorConfig::from_toml_str(text), Err(ConfigError::Parse(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut config = EditorConfig::default();
        config.view.scroll_step = 80;
        let text = config.to_toml_string().unwrap();
        assert_eq!(EditorConfig::from_toml_str(&text).unwrap(), config);
    }
}
