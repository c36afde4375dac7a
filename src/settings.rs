//! Device settings record and its partial-update rules.
//!
//! Updates arrive as flat JSON objects holding any subset of the fields.
//! Absent keys leave the current value unchanged, a present key with a value
//! of the wrong type rejects the whole update, and a well-typed number
//! outside its range is ignored.

use core::fmt::Write;

use heapless::String;

use crate::codec::{self, CodecError, ObjectWriter};
use crate::config::{
    DEFAULT_LED_PIN, DEFAULT_MQTT_PORT, DEFAULT_MQTT_TOPIC, LED_PIN_MAX, LED_PIN_MIN,
    MQTT_HOST_CAPACITY, MQTT_PORT_MAX, MQTT_PORT_MIN, MQTT_TOPIC_CAPACITY, WIFI_PASSWORD_CAPACITY,
    WIFI_SSID_CAPACITY,
};

/// Settings field, named as in the JSON payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    WifiEnabled,
    WifiSsid,
    WifiPassword,
    MqttEnabled,
    MqttHost,
    MqttPort,
    MqttTopic,
    LedPin,
}

impl SettingsField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WifiEnabled => "wifi_enabled",
            Self::WifiSsid => "wifi_ssid",
            Self::WifiPassword => "wifi_password",
            Self::MqttEnabled => "mqtt_enabled",
            Self::MqttHost => "mqtt_host",
            Self::MqttPort => "mqtt_port",
            Self::MqttTopic => "mqtt_topic",
            Self::LedPin => "led_pin",
        }
    }
}

/// Rejected settings update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsError {
    /// First field that failed to parse
    pub field: SettingsField,
    pub cause: CodecError,
}

/// Validate a lamp pin number
pub fn led_pin_from(value: i64) -> Option<u8> {
    if (LED_PIN_MIN..=LED_PIN_MAX).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}

/// Validate an MQTT port number
pub fn mqtt_port_from(value: i64) -> Option<u16> {
    if (MQTT_PORT_MIN..=MQTT_PORT_MAX).contains(&value) {
        u16::try_from(value).ok()
    } else {
        None
    }
}

/// Persisted device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    pub wifi_enabled: bool,
    pub wifi_ssid: String<WIFI_SSID_CAPACITY>,
    pub wifi_password: String<WIFI_PASSWORD_CAPACITY>,
    pub mqtt_enabled: bool,
    pub mqtt_host: String<MQTT_HOST_CAPACITY>,
    pub mqtt_port: u16,
    pub mqtt_topic: String<MQTT_TOPIC_CAPACITY>,
    pub led_pin: u8,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            wifi_enabled: false,
            wifi_ssid: String::new(),
            wifi_password: String::new(),
            mqtt_enabled: false,
            mqtt_host: String::new(),
            mqtt_port: DEFAULT_MQTT_PORT,
            mqtt_topic: String::try_from(DEFAULT_MQTT_TOPIC).unwrap_or_default(),
            led_pin: DEFAULT_LED_PIN,
        }
    }
}

impl DeviceSettings {
    /// Apply a parsed update.
    ///
    /// Returns the new lamp pin if it changed.
    pub fn apply(&mut self, patch: SettingsPatch) -> Option<u8> {
        if let Some(value) = patch.wifi_enabled {
            self.wifi_enabled = value;
        }
        if let Some(value) = patch.wifi_ssid {
            self.wifi_ssid = value;
        }
        if let Some(value) = patch.wifi_password {
            self.wifi_password = value;
        }
        if let Some(value) = patch.mqtt_enabled {
            self.mqtt_enabled = value;
        }
        if let Some(value) = patch.mqtt_host {
            self.mqtt_host = value;
        }
        if let Some(value) = patch.mqtt_port {
            self.mqtt_port = value;
        }
        if let Some(value) = patch.mqtt_topic {
            self.mqtt_topic = value;
        }

        let pin = patch.led_pin.filter(|&pin| pin != self.led_pin)?;
        self.led_pin = pin;
        Some(pin)
    }

    /// Write the settings as a JSON object
    pub fn write_json(&self, out: &mut impl Write) -> Result<(), CodecError> {
        ObjectWriter::new(out)?
            .bool_field(SettingsField::WifiEnabled.as_str(), self.wifi_enabled)?
            .str_field(SettingsField::WifiSsid.as_str(), &self.wifi_ssid)?
            .str_field(SettingsField::WifiPassword.as_str(), &self.wifi_password)?
            .bool_field(SettingsField::MqttEnabled.as_str(), self.mqtt_enabled)?
            .str_field(SettingsField::MqttHost.as_str(), &self.mqtt_host)?
            .int_field(SettingsField::MqttPort.as_str(), self.mqtt_port)?
            .str_field(SettingsField::MqttTopic.as_str(), &self.mqtt_topic)?
            .int_field(SettingsField::LedPin.as_str(), self.led_pin)?
            .finish()
    }
}

/// Validated partial update of [`DeviceSettings`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub wifi_enabled: Option<bool>,
    pub wifi_ssid: Option<String<WIFI_SSID_CAPACITY>>,
    pub wifi_password: Option<String<WIFI_PASSWORD_CAPACITY>>,
    pub mqtt_enabled: Option<bool>,
    pub mqtt_host: Option<String<MQTT_HOST_CAPACITY>>,
    pub mqtt_port: Option<u16>,
    pub mqtt_topic: Option<String<MQTT_TOPIC_CAPACITY>>,
    pub led_pin: Option<u8>,
}

fn field<T>(field: SettingsField, value: Result<Option<T>, CodecError>) -> Result<Option<T>, SettingsError> {
    value.map_err(|cause| SettingsError { field, cause })
}

impl SettingsPatch {
    /// Parse an update body.
    ///
    /// Fails on the first present field that can't be read as its type.
    /// Out-of-range port and pin numbers parse as absent.
    pub fn parse(body: &str) -> Result<Self, SettingsError> {
        use SettingsField as F;

        let wifi_enabled = field(F::WifiEnabled, codec::get_bool(body, F::WifiEnabled.as_str()))?;
        let wifi_ssid = field(F::WifiSsid, codec::get_string(body, F::WifiSsid.as_str()))?;
        let wifi_password =
            field(F::WifiPassword, codec::get_string(body, F::WifiPassword.as_str()))?;
        let mqtt_enabled = field(F::MqttEnabled, codec::get_bool(body, F::MqttEnabled.as_str()))?;
        let mqtt_host = field(F::MqttHost, codec::get_string(body, F::MqttHost.as_str()))?;
        let mqtt_port = field(F::MqttPort, codec::get_int(body, F::MqttPort.as_str()))?;
        let mqtt_topic = field(F::MqttTopic, codec::get_string(body, F::MqttTopic.as_str()))?;
        let led_pin = field(F::LedPin, codec::get_int(body, F::LedPin.as_str()))?;

        Ok(Self {
            wifi_enabled,
            wifi_ssid,
            wifi_password,
            mqtt_enabled,
            mqtt_host,
            mqtt_port: mqtt_port.and_then(|port| mqtt_port_from(i64::from(port))),
            mqtt_topic,
            led_pin: led_pin.and_then(|pin| led_pin_from(i64::from(pin))),
        })
    }
}
