//! Device aggregate.
//!
//! Owns the settings, their store and the lamp scheduler. Built once at
//! boot and passed by reference to the request handlers and the main loop.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::LampOutput;
use crate::api::{self, Request, RequestSource, Response, WebAsset};
use crate::config::{AP_SSID, PORTAL_URL, STORAGE_NAMESPACE};
use crate::effect::LampMode;
use crate::random::RandomSource;
use crate::scheduler::{LampConfig, LampScheduler};
use crate::settings::{DeviceSettings, SettingsPatch};
use crate::storage::{KeyValueStore, PersistenceError, SettingsStore};
use crate::time::Timestamp;

/// Configuration for the device
#[derive(Debug, Clone, Copy)]
pub struct DeviceConfig {
    pub lamp: LampConfig,
    /// Access point name reported by the status endpoint
    pub ap_ssid: &'static str,
    /// Redirect target of the captive portal
    pub portal_url: &'static str,
    /// Bundled web interface
    pub assets: &'static [WebAsset],
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            lamp: LampConfig::default(),
            ap_ssid: AP_SSID,
            portal_url: PORTAL_URL,
            assets: &[],
        }
    }
}

pub struct Device<S: KeyValueStore, O: LampOutput, R: RandomSource> {
    settings: DeviceSettings,
    store: SettingsStore<S>,
    lamp: LampScheduler<O, R>,
    config: DeviceConfig,
}

impl<S: KeyValueStore, O: LampOutput, R: RandomSource> Device<S, O, R> {
    /// Load the persisted state and bring the lamp up switched off
    /// on the configured pin.
    pub fn boot(store: S, output: O, random: R, config: DeviceConfig) -> Self {
        let mut store = SettingsStore::new(store);
        if let Err(_error) = store.open(STORAGE_NAMESPACE) {
            #[cfg(feature = "esp32-log")]
            println!("storage: failed to open namespace: {:?}", _error);
        }
        let settings = store.load();
        let mode = store.load_mode();

        #[cfg(feature = "esp32-log")]
        println!(
            "lamp: boot with pin {} mode {}",
            settings.led_pin,
            mode.as_str()
        );

        let mut lamp = LampScheduler::new(config.lamp, output, random);
        lamp.set_pin(settings.led_pin);
        lamp.set_mode(mode);
        lamp.set_power(false);

        Self {
            settings,
            store,
            lamp,
            config,
        }
    }

    /// Answer a single HTTP request
    pub fn handle(&mut self, request: &Request<'_>, now: Timestamp) -> Response {
        api::handle_request(self, request, now)
    }

    /// Run one main loop iteration: serve pending requests, then advance
    /// the lamp once
    pub fn service<N: RequestSource>(&mut self, requests: &mut N, now: Timestamp) {
        requests.dispatch(|request| self.handle(request, now));
        self.lamp.advance(now);
    }

    pub fn advance(&mut self, now: Timestamp) {
        self.lamp.advance(now);
    }

    pub fn set_power(&mut self, on: bool) {
        self.lamp.set_power(on);
    }

    /// Switch the lamp mode and persist it.
    ///
    /// The lamp switches even if persisting fails.
    pub fn set_mode(&mut self, mode: LampMode) -> Result<(), PersistenceError> {
        self.lamp.set_mode(mode);
        self.store.save_mode(mode)
    }

    /// Apply a settings update and persist all settings.
    ///
    /// The update stays in effect even if persisting fails.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<(), PersistenceError> {
        if let Some(pin) = self.settings.apply(patch) {
            self.lamp.set_pin(pin);
        }
        self.store.save(&self.settings)?;
        self.store.save_mode(self.lamp.mode())?;

        #[cfg(feature = "esp32-log")]
        println!("settings: saved {:?}", self.settings);
        Ok(())
    }

    pub const fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    pub const fn lamp(&self) -> &LampScheduler<O, R> {
        &self.lamp
    }

    pub const fn store(&self) -> &SettingsStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore<S> {
        &mut self.store
    }

    pub const fn ap_ssid(&self) -> &'static str {
        self.config.ap_ssid
    }

    pub const fn portal_url(&self) -> &'static str {
        self.config.portal_url
    }

    pub const fn assets(&self) -> &'static [WebAsset] {
        self.config.assets
    }
}
