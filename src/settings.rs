//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::sim::SpawnTuning;

/// Host capability profile.
///
/// Reduced hosts (phones, mostly) get a lower frame target and lighter
/// spawn pressure; everything else about the game is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PerfProfile {
    #[default]
    Standard,
    Reduced,
}

impl PerfProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerfProfile::Standard => "Standard",
            PerfProfile::Reduced => "Reduced",
        }
    }

    /// Frame target; the loop skips work between eligible frames on the
    /// reduced profile.
    pub fn target_fps(&self) -> u32 {
        match self {
            PerfProfile::Standard => 60,
            PerfProfile::Reduced => 30,
        }
    }

    /// Minimum interval between executed frames.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps() as f64
    }

    /// Whether frames arriving early should be skipped at all.
    pub fn throttled(&self) -> bool {
        matches!(self, PerfProfile::Reduced)
    }

    pub fn spawn_tuning(&self) -> SpawnTuning {
        match self {
            PerfProfile::Standard => SpawnTuning::default(),
            PerfProfile::Reduced => SpawnTuning::reduced(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Capability profile override; `None` means auto-detect from the host
    pub profile: Option<PerfProfile>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: None,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Resolve the effective profile, falling back to host detection.
    pub fn effective_profile(&self, host_is_constrained: bool) -> PerfProfile {
        self.profile.unwrap_or(if host_is_constrained {
            PerfProfile::Reduced
        } else {
            PerfProfile::Standard
        })
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "star_strafe_settings";

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
