#![no_std]

pub mod api;
pub mod codec;
pub mod config;
pub mod device;
pub mod effect;
pub mod random;
pub mod scheduler;
pub mod settings;
pub mod storage;
pub mod sync;
pub mod time;

pub use api::{HttpMethod, Request, RequestSource, Response, WebAsset};
pub use device::{Device, DeviceConfig};
pub use effect::{EffectSlot, EffectState, LampMode};
pub use random::{RandomSource, XorShiftRandom};
pub use scheduler::{LampConfig, LampScheduler};
pub use settings::{DeviceSettings, SettingsError, SettingsField, SettingsPatch};
pub use storage::{KeyValueStore, MemoryStore, PersistenceError, SettingsStore};
pub use sync::SharedDevice;
pub use time::Timestamp;

pub use embassy_time::{Duration, Instant};

/// Abstract lamp pin driver
///
/// Implement this trait to support different hardware platforms.
/// The scheduler is generic over this trait.
pub trait LampOutput {
    /// Drive the lamp pin high (`true`) or low
    fn set_level(&mut self, on: bool);

    /// Release the current pin and drive `pin` at `on` instead
    fn switch_pin(&mut self, pin: u8, on: bool);
}
