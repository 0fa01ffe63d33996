//! Audio backend seam.
//!
//! The engine drives one [`VoiceOutput`] per pitched color. Where no real
//! audio is available every voice gets a [`SilentOutput`], so the voice
//! collection looks the same with or without sound.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::pitch::Pitch;

/// A single controllable voice on the audio side.
pub trait VoiceOutput {
    /// Begin a sustained note.
    fn attack(&mut self, pitch: &Pitch);
    /// End the note.
    fn release(&mut self);
    /// Linear gain in [0, 1].
    fn set_gain(&mut self, gain: f64);
}

/// Something that can hand out voices.
pub trait AudioBackend {
    /// One-time startup handshake (e.g. resuming a suspended AudioContext).
    fn start(&mut self) -> Result<(), BackendError>;
    fn create_voice(&mut self, pitch: &Pitch) -> Result<Box<dyn VoiceOutput>, BackendError>;
}

/// Voice output for when there is nothing to play through.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentOutput;

impl VoiceOutput for SilentOutput {
    fn attack(&mut self, _pitch: &Pitch) {}
    fn release(&mut self) {}
    fn set_gain(&mut self, _gain: f64) {}
}

// ── Command queue backend ───────────────────────────────────

/// A backend call, recorded for the host to replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AudioCommand {
    Start,
    Attack {
        voice: usize,
        pitch: String,
        frequency: f64,
    },
    Release {
        voice: usize,
    },
    SetGain {
        voice: usize,
        gain: f64,
    },
}

type SharedLog = Rc<RefCell<Vec<AudioCommand>>>;

/// Backend that queues [`AudioCommand`]s instead of making sound.
///
/// A WASM host drains the queue once per frame and applies it to its own
/// synths. Cloning gives another handle onto the same queue, so the caller
/// can keep one while the engine owns the other.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    log: SharedLog,
    voices: usize,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every command queued so far.
    pub fn drain(&self) -> Vec<AudioCommand> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}

impl AudioBackend for CommandQueue {
    fn start(&mut self) -> Result<(), BackendError> {
        self.log.borrow_mut().push(AudioCommand::Start);
        Ok(())
    }

    fn create_voice(&mut self, _pitch: &Pitch) -> Result<Box<dyn VoiceOutput>, BackendError> {
        let voice = self.voices;
        self.voices += 1;
        Ok(Box::new(QueuedVoice {
            voice,
            log: Rc::clone(&self.log),
        }))
    }
}

struct QueuedVoice {
    voice: usize,
    log: SharedLog,
}

impl VoiceOutput for QueuedVoice {
    fn attack(&mut self, pitch: &Pitch) {
        self.log.borrow_mut().push(AudioCommand::Attack {
            voice: self.voice,
            pitch: pitch.name.clone(),
            frequency: pitch.frequency,
        });
    }

    fn release(&mut self) {
        self.log
            .borrow_mut()
            .push(AudioCommand::Release { voice: self.voice });
    }

    fn set_gain(&mut self, gain: f64) {
        self.log.borrow_mut().push(AudioCommand::SetGain {
            voice: self.voice,
            gain,
        });
    }
}
