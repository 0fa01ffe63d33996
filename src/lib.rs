pub mod config;
pub mod error;
pub mod palette;
pub mod pitch;
pub mod raster;
pub mod sonify;

use crate::config::SonifierConfig;
use crate::raster::RgbaBuffer;
use crate::sonify::backend::CommandQueue;
use crate::sonify::engine::SonificationEngine;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the sonicanvas-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed sonifier. Audio is not produced here: every backend call is
/// queued and handed to JS through `drainCommands()` once per frame.
#[wasm_bindgen]
pub struct WasmSonifier {
    engine: SonificationEngine,
    commands: CommandQueue,
}

#[wasm_bindgen]
impl WasmSonifier {
    /// Build from a JSON config, or the default palette when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmSonifier, JsValue> {
        let config = match config_json {
            Some(json) => SonifierConfig::from_json(&json),
            None => Ok(SonifierConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&format!("{e}")))?;

        let commands = CommandQueue::new();
        let engine = SonificationEngine::new(config, Some(Box::new(commands.clone())))
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(WasmSonifier { engine, commands })
    }

    pub fn activate(&mut self) {
        self.engine.activate();
    }

    pub fn deactivate(&mut self) {
        self.engine.deactivate();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Sonify one frame from canvas `ImageData` bytes.
    pub fn tick(
        &mut self,
        rgba: Vec<u8>,
        width: u32,
        height: u32,
        scan_x: u32,
        y_top: u32,
        y_bottom: u32,
    ) -> Result<(), JsValue> {
        let raster = RgbaBuffer::from_rgba(width, height, rgba)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        self.engine.tick(&raster, scan_x, y_top, y_bottom);
        Ok(())
    }

    /// Queued audio commands since the last drain, as a JS array.
    #[wasm_bindgen(js_name = drainCommands)]
    pub fn drain_commands(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.commands.drain())
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    #[wasm_bindgen(js_name = voiceStates)]
    pub fn voice_states(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.voice_states())
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }
}
