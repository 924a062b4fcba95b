//! Display preferences.

use serde::{Deserialize, Serialize};

/// Display preferences for the terminal UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Whether the status bar shows how many tasks are completed.
    #[serde(default = "default_show_completed_count")]
    pub show_completed_count: bool,

    /// Terminal background colour as `[r, g, b]`.
    ///
    /// Terminals cannot draw translucent cells, so the translucent task
    /// colours are blended over this colour instead.
    #[serde(default)]
    pub background: [u8; 3],
}

fn default_show_completed_count() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_completed_count: true,
            background: [0, 0, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let ui: UiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(ui, UiConfig::default());
    }

    #[test]
    fn background_is_an_rgb_triple() {
        let ui: UiConfig = serde_json::from_str(r#"{"background": [30, 30, 46]}"#).unwrap();
        assert_eq!(ui.background, [30, 30, 46]);
        assert!(ui.show_completed_count);
    }
}
