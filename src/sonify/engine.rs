//! Sonification Engine — turns the scan column under the cursor into voice
//! loudness, once per host frame.
//!
//! The engine owns one [`Voice`] per pitched palette color. Each `tick`
//! samples the column at the scan position, feeds every voice its color's
//! pixel count, and leaves gains at the freshly smoothed values. It has no
//! clock of its own; the host render loop decides the cadence.

use crate::config::SonifierConfig;
use crate::error::SonifierError;
use crate::palette::Palette;
use crate::raster::Raster;

use super::backend::{AudioBackend, SilentOutput, VoiceOutput};
use super::sampler::{ColumnCounts, sample_column};
use super::voice::{Voice, VoiceParams, VoiceState};

pub struct SonificationEngine {
    config: SonifierConfig,
    palette: Palette,
    params: VoiceParams,
    voices: Vec<Voice>,
    backend: Option<Box<dyn AudioBackend>>,
    running: bool,
    /// Set once the backend start handshake has been attempted.
    audio_started: bool,
    last_counts: ColumnCounts,
}

impl SonificationEngine {
    /// Build the engine and its voices.
    ///
    /// With no backend, or for any voice the backend refuses, the voice is
    /// backed by a [`SilentOutput`]; it still tracks loudness and activity.
    pub fn new(
        config: SonifierConfig,
        mut backend: Option<Box<dyn AudioBackend>>,
    ) -> Result<Self, SonifierError> {
        config.validate()?;
        let palette = config.palette()?;

        if backend.is_none() {
            tracing::warn!("No audio backend available; sonification will be silent");
        }

        let mut voices = Vec::new();
        for (index, entry) in palette.entries().iter().enumerate() {
            let Some(pitch) = &entry.pitch else {
                continue;
            };
            let output: Box<dyn VoiceOutput> = match backend.as_mut().map(|b| b.create_voice(pitch)) {
                Some(Ok(output)) => output,
                Some(Err(e)) => {
                    tracing::warn!("{e}. Voice for '{}' disabled.", entry.name);
                    Box::new(SilentOutput)
                }
                None => Box::new(SilentOutput),
            };
            voices.push(Voice::new(index, pitch.clone(), output));
        }

        Ok(SonificationEngine {
            params: config.voice_params(),
            last_counts: ColumnCounts::zeroed(palette.len()),
            config,
            palette,
            voices,
            backend,
            running: false,
            audio_started: false,
        })
    }

    /// Engine with the default palette and no audio output.
    pub fn silent() -> Result<Self, SonifierError> {
        Self::new(SonifierConfig::default(), None)
    }

    /// Start scanning. The first call also performs the backend's start
    /// handshake; later calls skip it. The flag lives on the engine, so a
    /// host that rebuilds the engine (e.g. a new `WasmSonifier` after a
    /// config change) gets the handshake again.
    pub fn activate(&mut self) {
        if !self.audio_started {
            self.audio_started = true;
            if let Some(backend) = self.backend.as_mut() {
                match backend.start() {
                    Ok(()) => tracing::info!("Audio backend started"),
                    Err(e) => tracing::warn!("{e}. Continuing without sound."),
                }
            }
        }
        if !self.running {
            self.running = true;
            tracing::info!(voices = self.voices.len(), "Scanner activated");
        }
    }

    /// Stop scanning and silence every voice. Safe to call at any time.
    pub fn deactivate(&mut self) {
        let sounding = self.voices.iter().filter(|v| v.is_active()).count();
        for voice in &mut self.voices {
            voice.silence();
        }
        self.last_counts = ColumnCounts::zeroed(self.palette.len());
        self.running = false;
        tracing::debug!(released = sounding, "Scanner deactivated");
    }

    /// Process one frame at column `scan_x` over rows `y_top..=y_bottom`.
    ///
    /// Does nothing unless active. The column must lie inside the raster;
    /// keeping it there is the caller's job (see
    /// [`ScanCursor`](super::scanner::ScanCursor)).
    pub fn tick<R: Raster + ?Sized>(&mut self, raster: &R, scan_x: u32, y_top: u32, y_bottom: u32) {
        if !self.running || self.voices.is_empty() {
            return;
        }

        let counts = sample_column(
            raster,
            &self.palette,
            scan_x,
            y_top,
            y_bottom,
            self.config.opacity_threshold,
        );
        for voice in &mut self.voices {
            voice.update(counts.get(voice.color_index), &self.params);
        }
        self.last_counts = counts;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Voice for the named palette color, if it is pitched.
    pub fn voice_for(&self, color: &str) -> Option<&Voice> {
        let index = self.palette.index_of(color)?;
        self.voices.iter().find(|v| v.color_index == index)
    }

    pub fn voice_states(&self) -> Vec<VoiceState> {
        self.voices.iter().map(Voice::state).collect()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &SonifierConfig {
        &self.config
    }

    /// Counts from the most recent sampled frame.
    pub fn last_counts(&self) -> &ColumnCounts {
        &self.last_counts
    }
}
