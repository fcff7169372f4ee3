//! Player audio preferences
//!
//! Persisted separately from the game in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::sim::InputEvent;

/// Volume change per key press
pub const VOLUME_STEP: f32 = 1.0 / 16.0;

/// Audio settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play jump/score/hit/death cues
    pub sound_enabled: bool,
    /// Play the background drone
    pub music_enabled: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            sfx_volume: 0.25,
            // Music starts silent until turned up
            music_volume: 0.0,
        }
    }
}

impl Settings {
    /// Apply an audio key. Returns true if anything changed.
    pub fn apply(&mut self, input: InputEvent) -> bool {
        let before = self.clone();
        match input {
            InputEvent::ToggleMusic => self.music_enabled = !self.music_enabled,
            InputEvent::ToggleSound => self.sound_enabled = !self.sound_enabled,
            InputEvent::MusicVolumeUp => self.step_music(VOLUME_STEP),
            InputEvent::MusicVolumeDown => self.step_music(-VOLUME_STEP),
            _ => return false,
        }
        *self != before
    }

    fn step_music(&mut self, delta: f32) {
        self.music_volume = (self.music_volume + delta).clamp(0.0, 1.0);
    }

    /// Gain the effects bus should use right now
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sound_enabled {
            self.sfx_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Gain the music bus should use right now
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_enabled {
            self.music_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Short status line for the HUD
    pub fn status_line(&self) -> String {
        let onoff = |on: bool| if on { "on" } else { "off" };
        format!(
            "sound {} | music {} ({:.0}%)",
            onoff(self.sound_enabled),
            onoff(self.music_enabled),
            self.music_volume * 100.0
        )
    }

    /// Parse stored settings; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappy_bird_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, using default settings");
            return Self::default();
        };

        if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Discarding stored settings: {}", e),
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
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save settings");
                } else {
                    log::debug!("Settings saved");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings store on native ({})", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mix() {
        let s = Settings::default();
        assert_eq!(s.effective_sfx_volume(), 0.25);
        assert_eq!(s.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_toggles() {
        let mut s = Settings::default();
        assert!(s.apply(InputEvent::ToggleSound));
        assert!(!s.sound_enabled);
        assert_eq!(s.effective_sfx_volume(), 0.0);
        assert!(s.apply(InputEvent::ToggleSound));
        assert!(s.sound_enabled);

        assert!(s.apply(InputEvent::ToggleMusic));
        assert!(!s.music_enabled);
    }

    #[test]
    fn test_music_volume_clamps() {
        let mut s = Settings::default();
        // Already at the floor
        assert!(!s.apply(InputEvent::MusicVolumeDown));
        assert_eq!(s.music_volume, 0.0);

        for _ in 0..40 {
            s.apply(InputEvent::MusicVolumeUp);
        }
        assert_eq!(s.music_volume, 1.0);
        assert!(!s.apply(InputEvent::MusicVolumeUp));

        assert!(s.apply(InputEvent::MusicVolumeDown));
        assert_eq!(s.music_volume, 1.0 - VOLUME_STEP);
    }

    #[test]
    fn test_gameplay_inputs_ignored() {
        let mut s = Settings::default();
        for input in [InputEvent::Start, InputEvent::Impulse, InputEvent::Restart, InputEvent::Quit] {
            assert!(!s.apply(input));
        }
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{"music_volume":0.5}"#).unwrap();
        assert_eq!(s.music_volume, 0.5);
        assert!(s.sound_enabled);
        assert_eq!(s.sfx_volume, 0.25);

        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_status_line() {
        let s = Settings::default();
        assert_eq!(s.status_line(), "sound on | music on (0%)");
    }
}
