//! Sonifier configuration.
//!
//! Every tuning constant of the engine lives here and is fixed when the
//! engine is built. The JSON form uses camelCase keys:
//!
//! ```json
//! {
//!   "palette": [
//!     { "name": "red", "color": "#ff0000", "pitch": "C4" },
//!     { "name": "white", "color": "#ffffff" }
//!   ],
//!   "bandSize": 10,
//!   "maxBand": 5,
//!   "smoothingFactor": 0.2,
//!   "opacityThreshold": 10
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SonifierError;
use crate::palette::{Palette, PaletteEntry, Rgb};
use crate::pitch::Pitch;
use crate::sonify::voice::VoiceParams;

// ── Palette colors ──────────────────────────────────────────

/// One palette color as written in the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    /// Unique name (e.g. "red").
    pub name: String,
    /// Hex color, `#rrggbb` or `#rgb`.
    pub color: String,
    /// Note name; omit for a silent color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
}

impl ColorSpec {
    fn new(name: &str, color: &str, pitch: Option<&str>) -> Self {
        ColorSpec {
            name: name.to_string(),
            color: color.to_string(),
            pitch: pitch.map(str::to_string),
        }
    }

    fn resolve(&self) -> Result<PaletteEntry, SonifierError> {
        let rgb = Rgb::from_hex(&self.color).ok_or_else(|| SonifierError::InvalidColor {
            name: self.name.clone(),
            value: self.color.clone(),
        })?;
        let pitch = match &self.pitch {
            Some(p) => Some(Pitch::parse(p).ok_or_else(|| SonifierError::InvalidPitch {
                name: self.name.clone(),
                pitch: p.clone(),
            })?),
            None => None,
        };
        Ok(PaletteEntry {
            name: self.name.clone(),
            rgb,
            pitch,
        })
    }
}

// ── Engine configuration ────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SonifierConfig {
    /// Ordered palette; order decides classifier ties.
    pub palette: Vec<ColorSpec>,
    /// Pixels per loudness step.
    pub band_size: u32,
    /// Number of discrete loudness steps above silence.
    pub max_band: u32,
    /// Exponential-average rate, 0 = frozen, 1 = instant snap.
    pub smoothing_factor: f64,
    /// Pixels with alpha below this are treated as transparent.
    pub opacity_threshold: u8,
}

impl Default for SonifierConfig {
    fn default() -> Self {
        SonifierConfig {
            palette: vec![
                ColorSpec::new("black", "#000000", Some("C3")),
                ColorSpec::new("red", "#ff0000", Some("C4")),
                ColorSpec::new("orange", "#ff8000", Some("D4")),
                ColorSpec::new("yellow", "#ffff00", Some("E4")),
                ColorSpec::new("green", "#00c000", Some("G4")),
                ColorSpec::new("blue", "#0000ff", Some("A4")),
                ColorSpec::new("purple", "#8000c0", Some("C5")),
                ColorSpec::new("white", "#ffffff", None),
            ],
            band_size: 10,
            max_band: 5,
            smoothing_factor: 0.2,
            opacity_threshold: 10,
        }
    }
}

impl SonifierConfig {
    /// Parse from JSON; missing fields take their defaults. The result is
    /// validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self, SonifierError> {
        let config: SonifierConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SonifierError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the numeric constants and that the palette resolves.
    pub fn validate(&self) -> Result<(), SonifierError> {
        if self.band_size == 0 {
            return Err(SonifierError::InvalidBandSize);
        }
        if self.max_band == 0 {
            return Err(SonifierError::InvalidMaxBand);
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(SonifierError::InvalidSmoothing(self.smoothing_factor));
        }
        self.palette().map(|_| ())
    }

    /// Resolve hex colors and note names into a [`Palette`].
    pub fn palette(&self) -> Result<Palette, SonifierError> {
        let entries = self
            .palette
            .iter()
            .map(ColorSpec::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(entries)
    }

    pub fn voice_params(&self) -> VoiceParams {
        VoiceParams {
            band_size: self.band_size,
            max_band: self.max_band,
            smoothing_factor: self.smoothing_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SonifierConfig::default();
        config.validate().unwrap();
        let palette = config.palette().unwrap();
        assert_eq!(palette.len(), 8);
        let white = palette.get(palette.index_of("white").unwrap()).unwrap();
        assert!(white.is_silent());
        assert_eq!(palette.entries().iter().filter(|e| !e.is_silent()).count(), 7);
    }

    #[test]
    fn json_partial_uses_defaults() {
        let config = SonifierConfig::from_json(r#"{ "bandSize": 4 }"#).unwrap();
        assert_eq!(config.band_size, 4);
        assert_eq!(config.max_band, 5);
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn json_palette() {
        let json = r##"{
            "palette": [
                { "name": "ink", "color": "#101010", "pitch": "F#3" },
                { "name": "paper", "color": "#fff" }
            ],
            "smoothingFactor": 0.5,
            "opacityThreshold": 32
        }"##;
        let config = SonifierConfig::from_json(json).unwrap();
        let palette = config.palette().unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(0).unwrap().pitch.as_ref().unwrap().midi, 54);
        assert!(palette.get(1).unwrap().is_silent());
        assert_eq!(config.opacity_threshold, 32);
    }

    #[test]
    fn json_roundtrip_keeps_config() {
        let config = SonifierConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"bandSize\""));
        assert_eq!(SonifierConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_bad_constants() {
        let mut config = SonifierConfig::default();
        config.band_size = 0;
        assert_eq!(config.validate(), Err(SonifierError::InvalidBandSize));

        let mut config = SonifierConfig::default();
        config.max_band = 0;
        assert_eq!(config.validate(), Err(SonifierError::InvalidMaxBand));

        for k in [0.0, -0.1, 1.5, f64::NAN] {
            let mut config = SonifierConfig::default();
            config.smoothing_factor = k;
            assert!(
                matches!(config.validate(), Err(SonifierError::InvalidSmoothing(_))),
                "smoothing {k} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_bad_palette() {
        let mut config = SonifierConfig::default();
        config.palette[0].color = "#12345".to_string();
        assert!(matches!(
            config.validate(),
            Err(SonifierError::InvalidColor { .. })
        ));

        let mut config = SonifierConfig::default();
        config.palette[1].pitch = Some("X9".to_string());
        assert_eq!(
            config.validate(),
            Err(SonifierError::InvalidPitch {
                name: "red".to_string(),
                pitch: "X9".to_string()
            })
        );

        let json = r##"{"palette":[{"name":"x","color":"#000","pitch":"C2147483647"}]}"##;
        assert_eq!(
            SonifierConfig::from_json(json),
            Err(SonifierError::InvalidPitch {
                name: "x".to_string(),
                pitch: "C2147483647".to_string()
            })
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            SonifierConfig::from_json("{ not json"),
            Err(SonifierError::Json(_))
        ));
    }
}
