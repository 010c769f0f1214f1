use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Selector of the elements to reveal
    pub selector: String,
    /// Class added when an element becomes visible
    pub visible_class: String,
    /// Visible-area fraction that counts as "entered the viewport"
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".reveal".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.12,
        }
    }
}
