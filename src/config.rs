//! Device constants

/// Access point name, also reported by the status endpoint
pub const AP_SSID: &str = "MeowMeow";

/// Base URL the captive portal redirects to
pub const PORTAL_URL: &str = "http://192.168.4.1/";

/// Persistent key/value namespace holding settings and mode
pub const STORAGE_NAMESPACE: &str = "meowlamp";

pub const DEFAULT_LED_PIN: u8 = 4;
pub const LED_PIN_MIN: i64 = 0;
pub const LED_PIN_MAX: i64 = 40;

pub const DEFAULT_MQTT_PORT: u16 = 1883;
pub const MQTT_PORT_MIN: i64 = 1;
pub const MQTT_PORT_MAX: i64 = 65_535;
pub const DEFAULT_MQTT_TOPIC: &str = "meow/lamp";

// Capacities of the settings strings, in bytes
pub const WIFI_SSID_CAPACITY: usize = 32;
pub const WIFI_PASSWORD_CAPACITY: usize = 64;
pub const MQTT_HOST_CAPACITY: usize = 64;
pub const MQTT_TOPIC_CAPACITY: usize = 64;

/// Capacity of a JSON response body.
///
/// Fits the settings object with every string at full capacity and every
/// character escaped as `\u00XX`.
pub const RESPONSE_BODY_CAPACITY: usize = 1_536;

/// Longest persisted string value
pub const STORED_VALUE_CAPACITY: usize = 64;
