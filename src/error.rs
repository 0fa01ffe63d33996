use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SonifierError {
    InvalidColor { name: String, value: String },
    InvalidPitch { name: String, pitch: String },
    DuplicateColor { name: String },
    InvalidBandSize,
    InvalidMaxBand,
    InvalidSmoothing(f64),
    RasterSize { expected: usize, found: usize },
    RasterOverflow { width: u32, height: u32 },
    Json(String),
}

/// Failure reported by an audio backend. Never reaches the render loop;
/// the engine logs it and carries on with silent outputs.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    Unavailable(String),
    VoiceRefused { pitch: String, reason: String },
}

impl fmt::Display for SonifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SonifierError::InvalidColor { name, value } => {
                write!(f, "Invalid color '{value}' for palette entry '{name}'")
            }
            SonifierError::InvalidPitch { name, pitch } => {
                write!(f, "Invalid pitch '{pitch}' for palette entry '{name}'")
            }
            SonifierError::DuplicateColor { name } => {
                write!(f, "Palette entry '{name}' is defined more than once")
            }
            SonifierError::InvalidBandSize => write!(f, "bandSize must be at least 1"),
            SonifierError::InvalidMaxBand => write!(f, "maxBand must be at least 1"),
            SonifierError::InvalidSmoothing(k) => {
                write!(f, "smoothingFactor must be in (0, 1], got {k}")
            }
            SonifierError::RasterSize { expected, found } => {
                write!(f, "RGBA buffer should hold {expected} bytes, found {found}")
            }
            SonifierError::RasterOverflow { width, height } => {
                write!(f, "Raster of {width}x{height} pixels is too large")
            }
            SonifierError::Json(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for SonifierError {}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Unavailable(reason) => write!(f, "Audio backend unavailable: {reason}"),
            BackendError::VoiceRefused { pitch, reason } => {
                write!(f, "Audio backend refused voice {pitch}: {reason}")
            }
        }
    }
}

impl std::error::Error for BackendError {}

impl From<serde_json::Error> for SonifierError {
    fn from(e: serde_json::Error) -> Self {
        SonifierError::Json(e.to_string())
    }
}
