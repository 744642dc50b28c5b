use crate::error::Result;
use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The one persisted user preference: the color scheme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub fn cycle(self) -> Self {
        match self {
            Theme::Auto => Theme::Light,
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prefs {
    pub theme: Theme,
}

fn default_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".locmap.json")
}

/// Load preferences; a missing file is not an error, just defaults.
pub fn load_prefs(path: Option<&Path>) -> Result<Prefs> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_path);
    if !path.exists() {
        return Ok(Prefs::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_prefs(path: Option<&Path>, prefs: &Prefs) -> Result<()> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_path);
    std::fs::write(path, serde_json::to_string_pretty(prefs)?)?;
    Ok(())
}

/// Resolved TUI palette for a theme. `Auto` follows the terminal's own
/// colors by using defaults that read on either background.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub grid: Color,
    pub point: Color,
    pub selected: Color,
    pub background: Option<Color>,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Auto => Self {
                fg: Color::Reset,
                dim: Color::DarkGray,
                accent: Color::Yellow,
                grid: Color::DarkGray,
                point: Color::Cyan,
                selected: Color::LightRed,
                background: None,
            },
            Theme::Light => Self {
                fg: Color::Black,
                dim: Color::Gray,
                accent: Color::Blue,
                grid: Color::Gray,
                point: Color::Blue,
                selected: Color::Red,
                background: Some(Color::White),
            },
            Theme::Dark => Self {
                fg: Color::White,
                dim: Color::DarkGray,
                accent: Color::Yellow,
                grid: Color::DarkGray,
                point: Color::Cyan,
                selected: Color::LightRed,
                background: Some(Color::Black),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cycle_walks_all_three_schemes() {
        assert_eq!(Theme::Auto.cycle(), Theme::Light);
        assert_eq!(Theme::Light.cycle(), Theme::Dark);
        assert_eq!(Theme::Dark.cycle(), Theme::Auto);
    }

    #[test]
    fn prefs_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let prefs = Prefs { theme: Theme::Dark };
        save_prefs(Some(&path), &prefs).unwrap();
        let loaded = load_prefs(Some(&path)).unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
    }

    #[test]
    fn missing_prefs_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let loaded = load_prefs(Some(&path)).unwrap();
        assert_eq!(loaded.theme, Theme::Auto);
    }
}
