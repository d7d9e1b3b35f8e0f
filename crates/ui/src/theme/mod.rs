use gpui::{App, Global, Hsla, Rgba, Window, WindowAppearance, rgb};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

mod config;
pub use config::*;

pub fn init(cx: &mut App) {
    Theme::sync_system_appearance(None, cx);
}

pub trait ActiveTheme {
    fn theme(&self) -> &Theme;
}

impl ActiveTheme for App {
    #[inline(always)]
    fn theme(&self) -> &Theme {
        Theme::global(self)
    }
}

/// Colors used by the progress components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ThemeColor {
    /// The filled arc of a circle and the filled segment of a bar.
    pub progress_bar: Hsla,
    /// The unfilled track.
    pub progress_track: Hsla,
    /// The disc inside a progress circle.
    pub progress_fill: Hsla,
}

impl ThemeColor {
    pub fn light() -> Self {
        Self {
            progress_bar: color(0x3498db),
            progress_track: color(0xecf0f1),
            progress_fill: Hsla::transparent_black(),
        }
    }

    pub fn dark() -> Self {
        Self {
            progress_bar: color(0x3498db),
            progress_track: color(0x34495e),
            progress_fill: Hsla::transparent_black(),
        }
    }
}

#[inline]
fn color(hex: u32) -> Hsla {
    let rgba: Rgba = rgb(hex);
    rgba.into()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Theme {
    pub colors: ThemeColor,
    pub mode: ThemeMode,
}

impl Deref for Theme {
    type Target = ThemeColor;

    fn deref(&self) -> &Self::Target {
        &self.colors
    }
}

impl DerefMut for Theme {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.colors
    }
}

impl Global for Theme {}

impl Theme {
    /// Returns the global theme reference
    #[inline(always)]
    pub fn global(cx: &App) -> &Theme {
        cx.global::<Theme>()
    }

    /// Returns the global theme mutable reference
    #[inline(always)]
    pub fn global_mut(cx: &mut App) -> &mut Theme {
        cx.global_mut::<Theme>()
    }

    /// Returns true if the theme is dark.
    #[inline(always)]
    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    /// Sync the theme with the system appearance
    pub fn sync_system_appearance(window: Option<&mut Window>, cx: &mut App) {
        let appearance = window
            .as_ref()
            .map(|window| window.appearance())
            .unwrap_or_else(|| cx.window_appearance());

        Self::change(appearance, window, cx);
    }

    pub fn change(mode: impl Into<ThemeMode>, window: Option<&mut Window>, cx: &mut App) {
        let mode = mode.into();
        let colors = match mode {
            ThemeMode::Light => ThemeColor::light(),
            ThemeMode::Dark => ThemeColor::dark(),
        };

        if !cx.has_global::<Theme>() {
            cx.set_global(Theme::from(colors));
        }

        let theme = cx.global_mut::<Theme>();
        theme.mode = mode;
        theme.colors = colors;

        if let Some(window) = window {
            window.refresh();
        }
    }

    /// Apply a [`ThemeConfig`], its mode first and then its color overrides.
    pub fn apply_config(&mut self, config: &ThemeConfig) {
        if let Some(mode) = config.mode {
            self.mode = mode;
            self.colors = match mode {
                ThemeMode::Light => ThemeColor::light(),
                ThemeMode::Dark => ThemeColor::dark(),
            };
        }

        let colors = &config.colors;
        if let Some(color) = colors.progress_bar {
            self.colors.progress_bar = color;
        }
        if let Some(color) = colors.progress_track {
            self.colors.progress_track = color;
        }
        if let Some(color) = colors.progress_fill {
            self.colors.progress_fill = color;
        }
    }
}

impl From<ThemeColor> for Theme {
    fn from(colors: ThemeColor) -> Self {
        Theme {
            mode: ThemeMode::default(),
            colors,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, PartialOrd, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[inline(always)]
    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl From<WindowAppearance> for ThemeMode {
    fn from(appearance: WindowAppearance) -> Self {
        match appearance {
            WindowAppearance::Dark | WindowAppearance::VibrantDark => Self::Dark,
            WindowAppearance::Light | WindowAppearance::VibrantLight => Self::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode() {
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
        assert!(ThemeMode::Dark.is_dark());
        assert_eq!(ThemeMode::from(WindowAppearance::VibrantLight), ThemeMode::Light);
        assert_eq!(
            serde_json::to_string(&ThemeMode::Dark).unwrap(),
            r#""dark""#
        );
    }

    #[test]
    fn test_light_colors() {
        let colors = ThemeColor::light();
        let bar: Rgba = colors.progress_bar.into();
        assert_eq!(
            (bar.r * 255.).round() as u8,
            0x34,
            "progress bar color should be #3498db"
        );
        assert_eq!((bar.b * 255.).round() as u8, 0xdb);
        assert_eq!(colors.progress_fill.a, 0.);
    }
}
