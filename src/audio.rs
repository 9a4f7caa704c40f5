//! Audio sink
//!
//! Fire-and-forget playback of the loaded sound effects plus the ambient
//! radio channel. The simulation issues events; this sink may silently
//! drop any of them: asset still loading, audio muted, or the browser's
//! autoplay policy rejecting the play() promise. No outcome ever flows
//! back into the game.

use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::assets::{AssetStore, SoundKind};
use crate::settings::Settings;

/// Gameplay sound effects (the radio is a separate side channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet-enemy kill
    Splat,
    /// Ultimate beam firing
    Ultimate,
}

impl SoundEffect {
    fn kind(self) -> SoundKind {
        match self {
            SoundEffect::Splat => SoundKind::Splat,
            SoundEffect::Ultimate => SoundKind::Ultimate,
        }
    }

    /// Per-effect base volume before the user's settings apply.
    fn base_volume(self) -> f64 {
        match self {
            SoundEffect::Splat => 0.5,
            SoundEffect::Ultimate => 0.7,
        }
    }
}

const RADIO_VOLUME: f64 = 0.7;

/// Audio output for the game.
pub struct AudioSink {
    assets: AssetStore,
    master_volume: f64,
    sfx_volume: f64,
    muted: bool,
    /// Mobile browsers refuse playback until a user gesture; adapters
    /// flip this on the first interaction.
    unlocked: bool,
}

impl AudioSink {
    pub fn new(assets: AssetStore, settings: &Settings) -> Self {
        Self {
            assets,
            master_volume: settings.master_volume as f64,
            sfx_volume: settings.sfx_volume as f64,
            muted: settings.muted,
            unlocked: false,
        }
    }

    /// Mark the audio context usable (first user gesture seen).
    pub fn unlock(&mut self) {
        if !self.unlocked {
            self.unlocked = true;
            log::info!("Audio unlocked");
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, base: f64) -> f64 {
        if self.muted {
            0.0
        } else {
            (base * self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Play a sound effect, best effort.
    pub fn play(&self, effect: SoundEffect) {
        if !self.unlocked {
            return;
        }
        let vol = self.effective_volume(effect.base_volume());
        if vol <= 0.0 {
            return;
        }
        let Some(audio) = self.assets.sound(effect.kind()) else {
            return;
        };

        // Clone the element so rapid kills can overlap instead of
        // restarting one another.
        let Ok(node) = audio.clone_node() else {
            return;
        };
        let Ok(clone) = node.dyn_into::<HtmlAudioElement>() else {
            return;
        };
        clone.set_volume(vol);
        fire_and_forget(&clone);
    }

    /// Ambient radio: play from the start, restarting if already going.
    ///
    /// Reachable from a dedicated key and a UI control, independent of
    /// the game phase. The click itself is a user gesture, so this also
    /// unlocks audio.
    pub fn play_radio(&mut self) {
        self.unlock();
        let Some(radio) = self.assets.sound(SoundKind::Radio) else {
            return;
        };
        if !radio.paused() {
            let _ = radio.pause();
            radio.set_current_time(0.0);
        }
        radio.set_volume(self.effective_volume(RADIO_VOLUME));
        fire_and_forget(&radio);
    }

    /// Is the ambient track currently audible? (Display only.)
    pub fn radio_playing(&self) -> bool {
        self.assets
            .sound(SoundKind::Radio)
            .map(|radio| !radio.paused() && !radio.ended())
            .unwrap_or(false)
    }
}

/// Start playback and swallow the promise outcome; autoplay rejections
/// land here and go nowhere.
fn fire_and_forget(audio: &HtmlAudioElement) {
    if let Ok(promise) = audio.play() {
        let ignore = Closure::<dyn FnMut(JsValue)>::new(|_| {});
        let _ = promise.catch(&ignore);
        ignore.forget();
    }
}
