//! Appearance settings: a validated theme + font form with file-backed
//! persistence. The storage mechanism sits behind `SettingsStore` so tests
//! can substitute an in-memory backend, and the theme engine behind
//! `ThemeSink`.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::DvError;

/// File stem of the stored settings record.
pub const SETTINGS_KEY: &str = "appearance-settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: &[Theme] = &[Theme::Light, Theme::Dark, Theme::System];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    #[default]
    Sans,
    Mono,
}

impl Font {
    pub const ALL: &[Font] = &[Font::Sans, Font::Mono];

    pub fn as_str(self) -> &'static str {
        match self {
            Font::Sans => "sans",
            Font::Mono => "mono",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sans" => Some(Font::Sans),
            "mono" => Some(Font::Mono),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppearanceSettings {
    pub theme: Theme,
    pub font: Font,
}

/// Read/write access to the persisted settings record.
pub trait SettingsStore {
    fn load(&self) -> Result<Option<AppearanceSettings>, DvError>;
    fn save(&mut self, settings: &AppearanceSettings) -> Result<(), DvError>;
}

/// JSON file under the project config directory (or an explicit override).
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(settings_dir: Option<&Path>) -> Option<Self> {
        let dir = match settings_dir {
            Some(dir) => dir.to_path_buf(),
            None => ProjectDirs::from("", "", "dv")?.config_dir().to_path_buf(),
        };
        Some(Self {
            path: dir.join(format!("{SETTINGS_KEY}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Option<AppearanceSettings>, DvError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&raw)?;
        Ok(Some(settings))
    }

    fn save(&mut self, settings: &AppearanceSettings) -> Result<(), DvError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        debug!("Saved appearance settings to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store for tests and for running without a config directory.
#[derive(Default)]
pub struct MemoryStore {
    pub settings: Option<AppearanceSettings>,
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<AppearanceSettings>, DvError> {
        Ok(self.settings)
    }

    fn save(&mut self, settings: &AppearanceSettings) -> Result<(), DvError> {
        self.settings = Some(*settings);
        Ok(())
    }
}

/// The theme engine as the form sees it: current theme and a setter.
pub trait ThemeSink {
    fn current_theme(&self) -> Option<Theme>;
    fn set_theme(&mut self, theme: Theme);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    pub theme: Option<String>,
    pub font: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.font.is_none()
    }
}

/// Which form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Font,
    Theme,
}

/// The two-field settings form. Field values are raw strings until
/// validation, so unknown selections surface as per-field messages instead
/// of submitting partial data.
pub struct AppearanceForm {
    pub theme_choice: String,
    pub font_choice: String,
    pub focus: FormField,
    pub errors: FieldErrors,
}

impl AppearanceForm {
    /// Seeds from the established theme (if any) and the stored font,
    /// defaulting to system/sans when the store is empty or unreadable.
    pub fn new(sink: &dyn ThemeSink, store: &dyn SettingsStore) -> Self {
        let stored = store.load().unwrap_or_default();
        let theme = sink
            .current_theme()
            .or(stored.map(|s| s.theme))
            .unwrap_or_default();
        let font = stored.map(|s| s.font).unwrap_or_default();
        Self {
            theme_choice: theme.as_str().to_string(),
            font_choice: font.as_str().to_string(),
            focus: FormField::Font,
            errors: FieldErrors::default(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Font => FormField::Theme,
            FormField::Theme => FormField::Font,
        };
    }

    /// Cycles the focused field through its valid values.
    pub fn cycle(&mut self, forward: bool) {
        fn step<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> T {
            let len = all.len() as isize;
            let pos = current
                .and_then(|c| all.iter().position(|v| *v == c))
                .unwrap_or(0) as isize;
            let delta = if forward { 1 } else { -1 };
            all[(pos + delta).rem_euclid(len) as usize]
        }
        match self.focus {
            FormField::Theme => {
                let next = step(Theme::ALL, Theme::parse(&self.theme_choice), forward);
                self.theme_choice = next.as_str().to_string();
            }
            FormField::Font => {
                let next = step(Font::ALL, Font::parse(&self.font_choice), forward);
                self.font_choice = next.as_str().to_string();
            }
        }
    }

    /// Enum-membership validation. Failures populate per-field messages and
    /// block submission.
    pub fn validate(&mut self) -> Option<AppearanceSettings> {
        let theme = Theme::parse(&self.theme_choice);
        let font = Font::parse(&self.font_choice);
        self.errors = FieldErrors {
            theme: theme.is_none().then(|| "Please select a theme.".to_string()),
            font: font.is_none().then(|| "Please select a font.".to_string()),
        };
        match (theme, font) {
            (Some(theme), Some(font)) => Some(AppearanceSettings { theme, font }),
            _ => None,
        }
    }

    /// On valid input: persist both fields, apply the theme, hand the font
    /// back for the UI to apply. Invalid input returns the field errors and
    /// submits nothing.
    pub fn submit(
        &mut self,
        store: &mut dyn SettingsStore,
        sink: &mut dyn ThemeSink,
    ) -> Result<Option<AppearanceSettings>, DvError> {
        let Some(settings) = self.validate() else {
            return Ok(None);
        };
        store.save(&settings)?;
        sink.set_theme(settings.theme);
        info!(
            "Appearance updated: theme={}, font={}",
            settings.theme.as_str(),
            settings.font.as_str()
        );
        Ok(Some(settings))
    }
}
