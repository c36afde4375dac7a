//! Settings persistence on top of a typed key/value store.
//!
//! The platform provides the store (flash-backed preferences on the device,
//! [`MemoryStore`] on the host). [`SettingsStore`] maps the settings record
//! and the lamp mode onto stable keys and repairs anything corrupted or
//! out of range at load time.

mod memory;

pub use memory::MemoryStore;

#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::String;

use crate::config::{
    DEFAULT_LED_PIN, DEFAULT_MQTT_PORT, DEFAULT_MQTT_TOPIC, STORED_VALUE_CAPACITY,
};
use crate::effect::LampMode;
use crate::settings::{DeviceSettings, led_pin_from, mqtt_port_from};

const KEY_WIFI_ENABLED: &str = "wifi_en";
const KEY_WIFI_SSID: &str = "wifi_ssid";
const KEY_WIFI_PASSWORD: &str = "wifi_pass";
const KEY_MQTT_ENABLED: &str = "mqtt_en";
const KEY_MQTT_HOST: &str = "mqtt_host";
const KEY_MQTT_PORT: &str = "mqtt_port";
const KEY_MQTT_TOPIC: &str = "mqtt_topic";
const KEY_LED_PIN: &str = "led_pin";
const KEY_MODE: &str = "mode";

/// Error type for the persistence operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceError {
    Busy,
    DriverError,
    /// No room left for the key or value
    Full,
}

/// Typed key/value store with per-read defaults.
///
/// Reads never fail: a missing key, a value of another type or a value
/// that does not fit returns the default.
pub trait KeyValueStore {
    /// Select the namespace for all later reads and writes
    fn open(&mut self, namespace: &str) -> Result<(), PersistenceError>;

    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn get_u32(&self, key: &str, default: u32) -> u32;
    fn get_i32(&self, key: &str, default: i32) -> i32;
    fn get_str<const N: usize>(&self, key: &str, default: &str) -> String<N>;

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PersistenceError>;
    fn put_u32(&mut self, key: &str, value: u32) -> Result<(), PersistenceError>;
    fn put_i32(&mut self, key: &str, value: i32) -> Result<(), PersistenceError>;
    fn put_str(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Settings and mode adapter over a [`KeyValueStore`]
#[derive(Debug)]
pub struct SettingsStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Open the namespace of the underlying store
    pub fn open(&mut self, namespace: &str) -> Result<(), PersistenceError> {
        self.store.open(namespace)
    }

    /// Load the settings, substituting defaults for missing or
    /// out-of-range values
    pub fn load(&self) -> DeviceSettings {
        let store = &self.store;
        let stored_port = store.get_u32(KEY_MQTT_PORT, u32::from(DEFAULT_MQTT_PORT));
        let stored_pin = store.get_i32(KEY_LED_PIN, i32::from(DEFAULT_LED_PIN));

        DeviceSettings {
            wifi_enabled: store.get_bool(KEY_WIFI_ENABLED, false),
            wifi_ssid: store.get_str(KEY_WIFI_SSID, ""),
            wifi_password: store.get_str(KEY_WIFI_PASSWORD, ""),
            mqtt_enabled: store.get_bool(KEY_MQTT_ENABLED, false),
            mqtt_host: store.get_str(KEY_MQTT_HOST, ""),
            mqtt_port: mqtt_port_from(i64::from(stored_port)).unwrap_or(DEFAULT_MQTT_PORT),
            mqtt_topic: store.get_str(KEY_MQTT_TOPIC, DEFAULT_MQTT_TOPIC),
            led_pin: led_pin_from(i64::from(stored_pin)).unwrap_or(DEFAULT_LED_PIN),
        }
    }

    /// Write every settings field
    pub fn save(&mut self, settings: &DeviceSettings) -> Result<(), PersistenceError> {
        let store = &mut self.store;
        store.put_bool(KEY_WIFI_ENABLED, settings.wifi_enabled)?;
        store.put_str(KEY_WIFI_SSID, &settings.wifi_ssid)?;
        store.put_str(KEY_WIFI_PASSWORD, &settings.wifi_password)?;
        store.put_bool(KEY_MQTT_ENABLED, settings.mqtt_enabled)?;
        store.put_str(KEY_MQTT_HOST, &settings.mqtt_host)?;
        store.put_u32(KEY_MQTT_PORT, u32::from(settings.mqtt_port))?;
        store.put_str(KEY_MQTT_TOPIC, &settings.mqtt_topic)?;
        store.put_i32(KEY_LED_PIN, i32::from(settings.led_pin))?;

        #[cfg(feature = "esp32-log")]
        println!("storage: settings written");
        Ok(())
    }

    /// Load the lamp mode, falling back to static
    pub fn load_mode(&self) -> LampMode {
        let stored: String<STORED_VALUE_CAPACITY> =
            self.store.get_str(KEY_MODE, LampMode::Static.as_str());
        LampMode::from_stored(&stored)
    }

    pub fn save_mode(&mut self, mode: LampMode) -> Result<(), PersistenceError> {
        self.store.put_str(KEY_MODE, mode.as_str())
    }

    pub const fn inner(&self) -> &S {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
