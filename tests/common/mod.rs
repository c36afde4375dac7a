#![allow(dead_code)]

use myrtio_lamp::{
    Device, DeviceConfig, HttpMethod, LampOutput, MemoryStore, RandomSource, Request,
    RequestSource, Response, WebAsset,
};

/// Lamp output that records every level written
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub levels: Vec<bool>,
    pub pin: Option<u8>,
}

impl RecordingOutput {
    pub fn level(&self) -> Option<bool> {
        self.levels.last().copied()
    }
}

impl LampOutput for RecordingOutput {
    fn set_level(&mut self, on: bool) {
        self.levels.push(on);
    }

    fn switch_pin(&mut self, pin: u8, on: bool) {
        self.pin = Some(pin);
        self.levels.push(on);
    }
}

/// Random source replaying a fixed sequence, clamped to the requested range
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRandom {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            index: 0,
        }
    }

    /// Number of values handed out so far
    pub fn calls(&self) -> usize {
        self.index
    }
}

impl RandomSource for SequenceRandom {
    fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(min, max.max(min))
    }
}

pub const INDEX_HTML_GZ: &[u8] = &[0x1f, 0x8b, 0x08, 0x00, 0x01];
pub const APP_JS_GZ: &[u8] = &[0x1f, 0x8b, 0x08, 0x00, 0x02];

pub static ASSETS: [WebAsset; 2] = [
    WebAsset {
        path: "/index.html",
        mime_type: "text/html",
        data: INDEX_HTML_GZ,
    },
    WebAsset {
        path: "/app.js",
        mime_type: "application/javascript",
        data: APP_JS_GZ,
    },
];

pub type TestDevice = Device<MemoryStore, RecordingOutput, SequenceRandom>;

pub fn boot_device(store: MemoryStore) -> TestDevice {
    let config = DeviceConfig {
        assets: &ASSETS,
        ..DeviceConfig::default()
    };
    Device::boot(
        store,
        RecordingOutput::default(),
        SequenceRandom::new(&[8_000, 3, 60]),
        config,
    )
}

/// Queue of requests served through [`RequestSource`]
#[derive(Debug, Default)]
pub struct QueuedRequests {
    pub pending: Vec<(HttpMethod, String, String)>,
    pub responses: Vec<Response>,
}

impl QueuedRequests {
    pub fn push(&mut self, method: HttpMethod, path: &str, body: &str) {
        self.pending.push((method, path.to_string(), body.to_string()));
    }
}

impl RequestSource for QueuedRequests {
    fn dispatch<F: FnMut(&Request<'_>) -> Response>(&mut self, mut handler: F) {
        for (method, path, body) in self.pending.drain(..) {
            let request = Request::new(method, &path).with_body(&body);
            self.responses.push(handler(&request));
        }
    }
}
