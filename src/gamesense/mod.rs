//! GameSense integration: endpoint discovery, HTTP transport and the JSON
//! payloads that register the screen handler and push frames to it.

pub mod client;
pub mod discovery;
pub mod fake;

pub use client::HttpTransport;
pub use discovery::{discover_endpoint, Endpoint};
pub use fake::RecordingTransport;

use crate::display::Frame;
use crate::Result;
use serde_json::{json, Value};

pub const GAME: &str = "OLEDTHERM";
pub const GAME_DISPLAY_NAME: &str = "OLED Thermal Monitor";
pub const DEVELOPER: &str = "oledtherm";
pub const EVENT: &str = "SYS_MONITOR";
pub const LINE1_KEY: &str = "text_line_1";
pub const LINE2_KEY: &str = "text_line_2";

pub const METADATA_PATH: &str = "/game_metadata";
pub const REGISTER_EVENT_PATH: &str = "/register_game_event";
pub const BIND_EVENT_PATH: &str = "/bind_game_event";
pub const GAME_EVENT_PATH: &str = "/game_event";

/// Fire-and-forget JSON POSTs to the local engine.
pub trait Transport {
    fn post_json(&self, path: &str, body: &Value) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, path: &str, body: &Value) -> Result<()> {
        (**self).post_json(path, body)
    }
}

pub fn game_metadata() -> Value {
    json!({
        "game": GAME,
        "game_display_name": GAME_DISPLAY_NAME,
        "developer": DEVELOPER,
    })
}

pub fn register_event() -> Value {
    json!({
        "game": GAME,
        "event": EVENT,
        "min_value": 0,
        "max_value": 100,
        "icon_id": 0,
        "value_optional": true,
    })
}

/// Bind the event to a two-line text screen on the keyboard OLED.
pub fn bind_event() -> Value {
    json!({
        "game": GAME,
        "event": EVENT,
        "handlers": [{
            "device-type": "keyboard",
            "zone": "one",
            "mode": "screen",
            "datas": [{
                "lines": [
                    { "has-text": true, "context-frame-key": LINE1_KEY },
                    { "has-text": true, "context-frame-key": LINE2_KEY },
                ]
            }]
        }]
    })
}

pub fn game_event(value: u8, frame: &Frame) -> Value {
    json!({
        "game": GAME,
        "event": EVENT,
        "data": {
            "value": value,
            "frame": {
                LINE1_KEY: frame.line1,
                LINE2_KEY: frame.line2,
            }
        }
    })
}

/// Registration calls made once at startup, in order.
pub fn registration() -> [(&'static str, Value); 3] {
    [
        (METADATA_PATH, game_metadata()),
        (REGISTER_EVENT_PATH, register_event()),
        (BIND_EVENT_PATH, bind_event()),
    ]
}

/// Rotating event value; the engine only redraws when the value changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventValue(u8);

impl EventValue {
    /// Yields 1, 2, 0, 1, 2, 0, ...
    pub fn next(&mut self) -> u8 {
        self.0 = (self.0 + 1) % 3;
        self.0
    }
}
