use serde::{Deserialize, Serialize};

pub const ENABLED_SECTION_TITLE: &str = "Personal Hotspot Enabled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_enabled() -> bool {
    true
}

fn default_password() -> String {
    "hello".to_string()
}

impl Default for Hotspot {
    fn default() -> Self {
        Self {
            is_enabled: default_enabled(),
            password: default_password(),
        }
    }
}

impl Hotspot {
    /// Footer shown under the toggle section; absent while the hotspot is off.
    pub fn enabled_section_title(&self) -> Option<&'static str> {
        if self.is_enabled {
            Some(ENABLED_SECTION_TITLE)
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub initial: Hotspot,
    #[serde(default)]
    pub theme: ThemeName,
}

fn default_title() -> String {
    "Personal Hotspot Settings".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            initial: Hotspot::default(),
            theme: ThemeName::default(),
        }
    }
}
