//! Game settings and preferences
//!
//! Persisted to LocalStorage on the web build; fresh defaults elsewhere.
//! Game state itself is never persisted - only these preferences.

use serde::{Deserialize, Serialize};

use crate::paint::PaintColor;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Active ink color (also published to the world state each frame)
    pub paint_color: PaintColor,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the overhead minimap
    pub minimap: bool,
    /// Recompute coverage automatically after a clear
    pub coverage_after_clear: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paint_color: PaintColor::Orange,
            show_fps: true,
            minimap: true,
            coverage_after_clear: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "splat_range_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
