//! Asset provider
//!
//! Two sprite images and three sound effects, each loading in the
//! background behind an independently optional handle. A missing asset
//! is a diagnostic, never an error: the renderer falls back to primitive
//! shapes and the audio sink stays silent. Nothing blocks on the
//! all-attempted signal.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlAudioElement, HtmlImageElement};

use crate::renderer::{SpriteImages, SpriteStatus};

const PLAYER_IMAGE_SRC: &str = "assets/ship.png";
const ENEMY_IMAGE_SRC: &str = "assets/invader.png";
const SPLAT_SOUND_SRC: &str = "sound_effects/splat.mp3";
const ULTIMATE_SOUND_SRC: &str = "sound_effects/ultimate.mp3";
const RADIO_SOUND_SRC: &str = "sound_effects/radio.mp3";

const ASSET_COUNT: u8 = 5;

/// The three sound slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    Splat,
    Ultimate,
    Radio,
}

#[derive(Default)]
struct Slots {
    player_image: Option<HtmlImageElement>,
    enemy_image: Option<HtmlImageElement>,
    splat_sound: Option<HtmlAudioElement>,
    ultimate_sound: Option<HtmlAudioElement>,
    radio_sound: Option<HtmlAudioElement>,
    attempted: u8,
}

/// Shared handle to the asset slots; clones are cheap and refer to the
/// same store.
#[derive(Clone, Default)]
pub struct AssetStore {
    inner: Rc<RefCell<Slots>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kick off every load. Callbacks fill the slots as results arrive.
    pub fn begin_loading(&self) {
        self.load_image(PLAYER_IMAGE_SRC, |slots, img| slots.player_image = img);
        self.load_image(ENEMY_IMAGE_SRC, |slots, img| slots.enemy_image = img);
        self.load_sound(SPLAT_SOUND_SRC, |slots, audio| slots.splat_sound = audio);
        self.load_sound(ULTIMATE_SOUND_SRC, |slots, audio| {
            slots.ultimate_sound = audio
        });
        self.load_sound(RADIO_SOUND_SRC, |slots, audio| slots.radio_sound = audio);
    }

    /// Have all five loads finished, one way or the other?
    pub fn all_attempted(&self) -> bool {
        self.inner.borrow().attempted >= ASSET_COUNT
    }

    /// Snapshot of which sprites the scene builder may reference.
    pub fn sprite_status(&self) -> SpriteStatus {
        let slots = self.inner.borrow();
        SpriteStatus {
            player: slots
                .player_image
                .as_ref()
                .map(|img| img.complete())
                .unwrap_or(false),
            enemy: slots
                .enemy_image
                .as_ref()
                .map(|img| img.complete())
                .unwrap_or(false),
        }
    }

    /// Borrow the image handles for the duration of a paint.
    pub fn with_images<R>(&self, f: impl FnOnce(SpriteImages<'_>) -> R) -> R {
        let slots = self.inner.borrow();
        f(SpriteImages {
            player: slots.player_image.as_ref(),
            enemy: slots.enemy_image.as_ref(),
        })
    }

    /// Handle to a loaded sound, if it arrived.
    pub fn sound(&self, kind: SoundKind) -> Option<HtmlAudioElement> {
        let slots = self.inner.borrow();
        match kind {
            SoundKind::Splat => slots.splat_sound.clone(),
            SoundKind::Ultimate => slots.ultimate_sound.clone(),
            SoundKind::Radio => slots.radio_sound.clone(),
        }
    }

    fn mark_attempted(&self) {
        let mut slots = self.inner.borrow_mut();
        slots.attempted = (slots.attempted + 1).min(ASSET_COUNT);
        if slots.attempted == ASSET_COUNT {
            log::info!("All asset loads attempted");
        }
    }

    fn load_image(
        &self,
        src: &'static str,
        store: fn(&mut Slots, Option<HtmlImageElement>),
    ) {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(_) => {
                log::warn!("Could not create image element for {src}");
                self.mark_attempted();
                return;
            }
        };

        {
            let this = self.clone();
            let img = img.clone();
            let onload = Closure::<dyn FnMut()>::new(move || {
                log::info!("Image loaded: {src}");
                store(&mut this.inner.borrow_mut(), Some(img.clone()));
                this.mark_attempted();
            });
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
        }
        {
            let this = self.clone();
            let onerror = Closure::<dyn FnMut()>::new(move || {
                log::warn!("Failed to load {src}, using placeholder shapes");
                store(&mut this.inner.borrow_mut(), None);
                this.mark_attempted();
            });
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        }

        img.set_src(src);
    }

    fn load_sound(
        &self,
        src: &'static str,
        store: fn(&mut Slots, Option<HtmlAudioElement>),
    ) {
        use std::cell::Cell;

        let audio = match HtmlAudioElement::new() {
            Ok(audio) => audio,
            Err(_) => {
                log::warn!("Could not create audio element for {src}");
                self.mark_attempted();
                return;
            }
        };
        audio.set_preload("auto");

        // canplaythrough can refire on seeks; only the first settle of
        // either callback counts toward the attempted tally.
        let settled = Rc::new(Cell::new(false));

        {
            let this = self.clone();
            let audio = audio.clone();
            let settled = settled.clone();
            let onready = Closure::<dyn FnMut()>::new(move || {
                if settled.replace(true) {
                    return;
                }
                log::info!("Sound loaded: {src}");
                store(&mut this.inner.borrow_mut(), Some(audio.clone()));
                this.mark_attempted();
            });
            audio.set_oncanplaythrough(Some(onready.as_ref().unchecked_ref()));
            onready.forget();
        }
        {
            let this = self.clone();
            let onerror = Closure::<dyn FnMut()>::new(move || {
                if settled.replace(true) {
                    return;
                }
                log::warn!("Failed to load {src}, sound disabled");
                store(&mut this.inner.borrow_mut(), None);
                this.mark_attempted();
            });
            audio.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        }

        audio.set_src(src);
    }
}
