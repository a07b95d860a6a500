//! Audio cues
//!
//! The game plays two fire-and-forget cues, each backed by a bundled WAV
//! file. Playback failures are logged and swallowed so a missing or broken
//! asset never stops the simulation.

use std::fmt;
#[cfg(not(target_arch = "wasm32"))]
use std::{cell::RefCell, collections::HashMap, io::Cursor, path::PathBuf, sync::Arc};

use crate::config::AudioSettings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball destroys a block
    BlockHit,
    /// Ball hits paddle
    PaddleHit,
}

impl SoundEffect {
    /// Asset file the cue resolves to
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::BlockHit => "hits_block.wav",
            SoundEffect::PaddleHit => "hits_bat.wav",
        }
    }

    /// The cue a simulation event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BlockDestroyed { .. } => Some(SoundEffect::BlockHit),
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::FieldCleared => None,
        }
    }
}

impl fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SoundEffect::BlockHit => "block hit",
            SoundEffect::PaddleHit => "paddle hit",
        })
    }
}

/// A cue could not be played (asset missing or playback failed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCueUnavailable {
    pub cue: SoundEffect,
    pub reason: String,
}

impl AudioCueUnavailable {
    pub fn new(cue: SoundEffect, reason: impl Into<String>) -> Self {
        Self {
            cue,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AudioCueUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "couldn't play {} cue: {}", self.cue, self.reason)
    }
}

impl std::error::Error for AudioCueUnavailable {}

/// Something that can start a cue playing
pub trait AudioBackend {
    /// Start playback and return immediately. `volume` is in 0..=1.
    fn play(&self, cue: SoundEffect, volume: f32) -> Result<(), AudioCueUnavailable>;
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>, settings: &AudioSettings) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        let mut manager = Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: settings.muted,
        };
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. Failures are logged, never returned.
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = &self.backend else { return };

        if let Err(e) = backend.play(effect, vol) {
            log::warn!("{e}");
        }
    }

    /// Play whatever cues a batch of simulation events calls for
    pub fn handle_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

/// Cues decoded from a directory of WAV files and played on the default
/// output device.
///
/// Files are read on first use and cached. Every cue gets its own detached
/// sink, so playback never blocks the simulation.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileAudio {
    asset_dir: PathBuf,
    loaded: RefCell<HashMap<SoundEffect, Arc<[u8]>>>,
    /// The stream must outlive every sink played through its handle
    output: Option<(rodio::OutputStream, rodio::OutputStreamHandle)>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileAudio {
    /// Open the default output device. Without one, cues still resolve and
    /// decode but playing them fails.
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        let output = match rodio::OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(e) => {
                log::warn!("No audio output device: {e}");
                None
            }
        };
        Self::with_output(asset_dir, output)
    }

    fn with_output(
        asset_dir: impl Into<PathBuf>,
        output: Option<(rodio::OutputStream, rodio::OutputStreamHandle)>,
    ) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            loaded: Default::default(),
            output,
        }
    }

    fn path(&self, cue: SoundEffect) -> PathBuf {
        self.asset_dir.join(cue.file_name())
    }

    fn load(&self, cue: SoundEffect) -> Result<Arc<[u8]>, AudioCueUnavailable> {
        if let Some(bytes) = self.loaded.borrow().get(&cue) {
            return Ok(bytes.clone());
        }
        let path = self.path(cue);
        let bytes: Arc<[u8]> = std::fs::read(&path)
            .map_err(|e| AudioCueUnavailable::new(cue, format!("{}: {e}", path.display())))?
            .into();
        self.loaded.borrow_mut().insert(cue, bytes.clone());
        Ok(bytes)
    }

    fn decode(
        &self,
        cue: SoundEffect,
    ) -> Result<rodio::Decoder<Cursor<Arc<[u8]>>>, AudioCueUnavailable> {
        let bytes = self.load(cue)?;
        rodio::Decoder::new(Cursor::new(bytes)).map_err(|e| {
            AudioCueUnavailable::new(cue, format!("{}: {e}", self.path(cue).display()))
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioBackend for FileAudio {
    fn play(&self, cue: SoundEffect, volume: f32) -> Result<(), AudioCueUnavailable> {
        let source = self.decode(cue)?;
        let Some((_, handle)) = &self.output else {
            return Err(AudioCueUnavailable::new(cue, "no output device"));
        };
        let sink = rodio::Sink::try_new(handle)
            .map_err(|e| AudioCueUnavailable::new(cue, e.to_string()))?;
        sink.set_volume(volume);
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

/// Cues played through `<audio>` elements
#[cfg(target_arch = "wasm32")]
pub struct WebAudio {
    base_url: String,
}

#[cfg(target_arch = "wasm32")]
impl WebAudio {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioBackend for WebAudio {
    fn play(&self, cue: SoundEffect, volume: f32) -> Result<(), AudioCueUnavailable> {
        use wasm_bindgen::JsValue;
        use wasm_bindgen::closure::Closure;

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), cue.file_name());
        let element = web_sys::HtmlAudioElement::new_with_src(&url)
            .map_err(|e| AudioCueUnavailable::new(cue, format!("{e:?}")))?;
        element.set_volume(volume as f64);
        let promise = element
            .play()
            .map_err(|e| AudioCueUnavailable::new(cue, format!("{e:?}")))?;

        // Decode errors and autoplay blocks arrive asynchronously
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |e: JsValue| {
            log::warn!("{}", AudioCueUnavailable::new(cue, format!("{e:?}")));
        });
        let _ = promise.catch(&on_error);
        on_error.forget();
        Ok(())
    }
}
