use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use gpui::{Hsla, SharedString};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ThemeMode;

/// Color overrides of a [`ThemeConfig`], written as hex strings, e.g. `"#3498db"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ThemeConfigColors {
    #[serde(rename = "progress.bar")]
    pub progress_bar: Option<Hsla>,
    #[serde(rename = "progress.track")]
    pub progress_track: Option<Hsla>,
    #[serde(rename = "progress.fill")]
    pub progress_fill: Option<Hsla>,
}

/// A theme file for the progress components.
///
/// ```json
/// {
///   "name": "Ocean",
///   "mode": "dark",
///   "colors": { "progress.bar": "#1abc9c" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: SharedString,
    pub mode: Option<ThemeMode>,
    pub colors: ThemeConfigColors,
}

impl ThemeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid theme config")
    }

    /// Load a theme config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file: {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("failed to parse theme file: {}", path.display()))?;

        tracing::info!("loaded theme {:?} from {}", config.name, path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeColor};
    use gpui::{Rgba, rgb};
    use indoc::indoc;

    #[test]
    fn test_from_json() {
        let config = ThemeConfig::from_json(indoc! {r##"
            {
                "name": "Ocean",
                "mode": "dark",
                "colors": {
                    "progress.bar": "#1abc9c"
                }
            }
        "##})
        .unwrap();

        assert_eq!(config.name.to_string(), "Ocean");
        assert_eq!(config.mode, Some(ThemeMode::Dark));
        assert!(config.colors.progress_bar.is_some());
        assert_eq!(config.colors.progress_track, None);

        let mut theme = Theme::from(ThemeColor::light());
        theme.apply_config(&config);
        assert!(theme.is_dark());
        assert_eq!(theme.progress_track, ThemeColor::dark().progress_track);

        let bar: Rgba = theme.progress_bar.into();
        let expected: Rgba = rgb(0x1abc9c);
        assert!((bar.g - expected.g).abs() < 1e-3);
    }

    #[test]
    fn test_empty_config_keeps_theme() {
        let config = ThemeConfig::from_json("{}").unwrap();
        assert_eq!(config, ThemeConfig::default());

        let mut theme = Theme::from(ThemeColor::light());
        theme.apply_config(&config);
        assert_eq!(theme.colors, ThemeColor::light());
    }

    #[test]
    fn test_invalid_config() {
        let err = ThemeConfig::from_json(r#"{ "mode": "sepia" }"#).unwrap_err();
        assert!(err.to_string().contains("invalid theme config"));

        let err = ThemeConfig::load("/path/does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("failed to read theme file"));
    }
}
