use serde::{Deserialize, Serialize};

/// Where the theme control lives and what it shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Settings key holding the dark-mode flag
    pub storage_key: String,
    /// Id of the toggle button
    pub toggle_id: String,
    /// Selector of the label inside the toggle
    pub label_selector: String,
    /// Selector of the icon inside the toggle
    pub icon_selector: String,
    /// Class set on `<body>` while dark
    pub dark_class: String,
    /// Icon shown while dark (offers light)
    pub sun_icon: String,
    /// Icon shown while light (offers dark)
    pub moon_icon: String,
    /// Label shown while dark
    pub to_light_label: String,
    /// Label shown while light
    pub to_dark_label: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            toggle_id: "toggle-theme".to_string(),
            label_selector: ".btn-label".to_string(),
            icon_selector: "i".to_string(),
            dark_class: "dark-mode".to_string(),
            sun_icon: "fa-sun".to_string(),
            moon_icon: "fa-moon".to_string(),
            to_light_label: "Tryb dzienny".to_string(),
            to_dark_label: "Tryb nocny".to_string(),
        }
    }
}
