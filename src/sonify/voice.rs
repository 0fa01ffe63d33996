//! Voice — the sustained note belonging to one pitched palette color.
//!
//! Pixel counts are quantized into loudness bands, loudness glides toward
//! the band with an exponential moving average, and the note is attacked or
//! released only on edges of "color present in the column".

use serde::Serialize;

use crate::pitch::Pitch;

use super::backend::{SilentOutput, VoiceOutput};

/// Banding and smoothing constants shared by every voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    /// Pixels per loudness step. Must be >= 1.
    pub band_size: u32,
    /// Number of steps above silence. Must be >= 1.
    pub max_band: u32,
    /// Smoothing rate in (0, 1].
    pub smoothing_factor: f64,
}

impl VoiceParams {
    /// `min(max_band, count / band_size) / max_band`
    pub fn target_for(&self, count: u32) -> f64 {
        if self.band_size == 0 || self.max_band == 0 {
            return 0.0;
        }
        let band = (count / self.band_size).min(self.max_band);
        band as f64 / self.max_band as f64
    }
}

/// Snapshot of a voice for hosts and UI meters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceState {
    pub color: usize,
    pub pitch: String,
    pub is_active: bool,
    pub target_loudness: f64,
    pub current_loudness: f64,
}

pub struct Voice {
    /// Index of the palette entry this voice sonifies.
    pub color_index: usize,
    pub pitch: Pitch,
    is_active: bool,
    target_loudness: f64,
    current_loudness: f64,
    output: Box<dyn VoiceOutput>,
}

impl std::fmt::Debug for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Voice")
            .field("color_index", &self.color_index)
            .field("pitch", &self.pitch.name)
            .field("is_active", &self.is_active)
            .field("target_loudness", &self.target_loudness)
            .field("current_loudness", &self.current_loudness)
            .finish()
    }
}

impl Voice {
    pub fn new(color_index: usize, pitch: Pitch, output: Box<dyn VoiceOutput>) -> Self {
        Voice {
            color_index,
            pitch,
            is_active: false,
            target_loudness: 0.0,
            current_loudness: 0.0,
            output,
        }
    }

    /// A voice with no audio behind it.
    pub fn silent(color_index: usize, pitch: Pitch) -> Self {
        Self::new(color_index, pitch, Box::new(SilentOutput))
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn target_loudness(&self) -> f64 {
        self.target_loudness
    }

    pub fn current_loudness(&self) -> f64 {
        self.current_loudness
    }

    /// Feed this frame's pixel count for the voice's color.
    ///
    /// Any nonzero count keeps the note sounding, even one that falls in
    /// band 0 and so glides toward silence.
    pub fn update(&mut self, count: u32, params: &VoiceParams) {
        if count == 0 {
            self.target_loudness = 0.0;
            if self.is_active {
                self.output.release();
                self.is_active = false;
                tracing::trace!(pitch = %self.pitch.name, "release");
            }
        } else {
            self.target_loudness = params.target_for(count);
            if !self.is_active {
                self.output.attack(&self.pitch);
                self.is_active = true;
                tracing::trace!(pitch = %self.pitch.name, count, "attack");
            }
        }

        let k = params.smoothing_factor;
        self.current_loudness += k * (self.target_loudness - self.current_loudness);
        self.current_loudness = self.current_loudness.clamp(0.0, 1.0);
        self.output.set_gain(self.current_loudness);
    }

    /// Release if sounding and drop straight to zero gain.
    pub fn silence(&mut self) {
        if self.is_active {
            self.output.release();
            self.is_active = false;
        }
        self.target_loudness = 0.0;
        self.current_loudness = 0.0;
        self.output.set_gain(0.0);
    }

    pub fn state(&self) -> VoiceState {
        VoiceState {
            color: self.color_index,
            pitch: self.pitch.name.clone(),
            is_active: self.is_active,
            target_loudness: self.target_loudness,
            current_loudness: self.current_loudness,
        }
    }
}
