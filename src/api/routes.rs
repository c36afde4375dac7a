#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::String;

use super::assets::find_asset;
use super::http::{
    HttpMethod, Request, Response, STATUS_BAD_REQUEST, STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND,
    STATUS_OK,
};
use crate::LampOutput;
use crate::codec::{self, ObjectWriter};
use crate::device::Device;
use crate::effect::LampMode;
use crate::random::RandomSource;
use crate::settings::SettingsPatch;
use crate::storage::KeyValueStore;
use crate::time::Timestamp;

/// Connectivity checks that operating systems send to detect a portal
const CAPTIVE_PROBE_PATHS: [&str; 6] = [
    "/generate_204",
    "/gen_204",
    "/hotspot-detect.html",
    "/ncsi.txt",
    "/success.txt",
    "/fwlink",
];

const API_PREFIX: &str = "/api/";
const MODE_VALUE_CAPACITY: usize = 16;

const POWER_ON_WORDS: [&str; 3] = ["on", "1", "true"];
const POWER_OFF_WORDS: [&str; 3] = ["off", "0", "false"];

pub(crate) fn handle_request<S, O, R>(
    device: &mut Device<S, O, R>,
    request: &Request<'_>,
    now: Timestamp,
) -> Response
where
    S: KeyValueStore,
    O: LampOutput,
    R: RandomSource,
{
    match (request.method, request.path) {
        (HttpMethod::Get, "/api/paw") => handle_get_status(device, now),
        (HttpMethod::Post, "/api/paw") => handle_set_lamp(device, request, now),
        (HttpMethod::Get, "/api/settings") => handle_get_settings(device),
        (HttpMethod::Post, "/api/settings") => handle_save_settings(device, request),
        (HttpMethod::Post, "/api/mode") => handle_set_mode(device, request),
        (HttpMethod::Get, path) if CAPTIVE_PROBE_PATHS.contains(&path) => {
            Response::redirect(device.portal_url())
        }
        _ => handle_not_found(device, request),
    }
}

fn bad_request(_path: &str, token: &str) -> Response {
    #[cfg(feature = "esp32-log")]
    println!("api: {} rejected: {}", _path, token);
    Response::error(STATUS_BAD_REQUEST, token)
}

fn storage_failure(_path: &str) -> Response {
    #[cfg(feature = "esp32-log")]
    println!("api: {} not persisted", _path);
    Response::error(STATUS_INTERNAL_ERROR, "storage")
}

/// Parse a requested power state.
///
/// Accepts `on/off/1/0/true/false/toggle` in any case, ignoring surrounding
/// whitespace. An empty value toggles; a blank but non-empty one is rejected.
fn parse_power_state(raw: &str, current: bool) -> Option<bool> {
    if raw.is_empty() {
        return Some(!current);
    }
    let value = raw.trim();
    let is_any = |words: &[&str]| words.iter().any(|word| value.eq_ignore_ascii_case(word));

    if value.eq_ignore_ascii_case("toggle") {
        Some(!current)
    } else if is_any(&POWER_ON_WORDS) {
        Some(true)
    } else if is_any(&POWER_OFF_WORDS) {
        Some(false)
    } else {
        None
    }
}

fn handle_get_status<S, O, R>(device: &Device<S, O, R>, now: Timestamp) -> Response
where
    S: KeyValueStore,
    O: LampOutput,
    R: RandomSource,
{
    let lamp = device.lamp();
    Response::json(STATUS_OK, |body| {
        ObjectWriter::new(body)?
            .bool_field("led_on", lamp.is_on())?
            .int_field("uptime_s", now.as_secs())?
            .str_field("ssid", device.ap_ssid())?
            .str_field("mode", lamp.mode().as_str())?
            .finish()
    })
}

fn handle_set_lamp<S, O, R>(
    device: &mut Device<S, O, R>,
    request: &Request<'_>,
    now: Timestamp,
) -> Response
where
    S: KeyValueStore,
    O: LampOutput,
    R: RandomSource,
{
    let raw = request
        .state
        .filter(|state| !state.is_empty())
        .unwrap_or(request.body);
    let Some(on) = parse_power_state(raw, device.lamp().is_on()) else {
        return bad_request(request.path, "unknown_state");
    };

    device.set_power(on);
    handle_get_status(device, now)
}

fn handle_get_settings<S, O, R>(device: &Device<S, O, R>) -> Response
where
    S: KeyValueStore,
    O: LampOutput,
    R: RandomSource,
{
    Response::json(STATUS_OK, |body| device.settings().write_json(body))
}

fn handle_save_settings<S, O, R>(device: &mut Device<S, O, R>, request: &Request<'_>) -> Response
where
    S: KeyValueStore,
    O: LampOutput,
    R: RandomSource,
{
    if request.body.is_empty() {
        return bad_request(request.path, "missing_body");
    }
    let patch = match SettingsPatch::parse(request.body) {
        Ok(patch) => patch,
        Err(error) => return bad_request(request.path, error.field.as_str()),
    };

    if device.update_settings(patch).is_err() {
        return storage_failure(request.path);
    }
    handle_get_settings(device)
}

fn handle_set_mode<S, O, R>(device: &mut Device<S, O, R>, request: &Request<'_>) -> Response
where
    S: KeyValueStore,
    O: LampOutput,
    R: RandomSource,
{
    if request.body.is_empty() {
        return bad_request(request.path, "missing_body");
    }
    let requested = codec::get_string::<MODE_VALUE_CAPACITY>(request.body, "mode");
    let Some(mode) = requested
        .ok()
        .flatten()
        .and_then(|name: String<MODE_VALUE_CAPACITY>| LampMode::parse_from_str(&name))
    else {
        return bad_request(request.path, "mode");
    };

    if device.set_mode(mode).is_err() {
        return storage_failure(request.path);
    }
    Response::json(STATUS_OK, |body| {
        ObjectWriter::new(body)?
            .str_field("mode", mode.as_str())?
            .finish()
    })
}

fn handle_not_found<S, O, R>(device: &Device<S, O, R>, request: &Request<'_>) -> Response
where
    S: KeyValueStore,
    O: LampOutput,
    R: RandomSource,
{
    if request.path.starts_with(API_PREFIX) {
        return Response::error(STATUS_NOT_FOUND, "unknown_api");
    }
    if let Some(asset) = find_asset(device.assets(), request.path) {
        return Response::gzip_asset(asset.mime_type, asset.data);
    }
    Response::redirect(device.portal_url())
}
