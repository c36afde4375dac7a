//! HTTP API of the lamp
//!
//! The platform HTTP server hands every request to [`Device::handle`] and
//! sends back the returned [`Response`]. Routing:
//!
//! | Method | Path            | Handler                               |
//! |--------|-----------------|---------------------------------------|
//! | GET    | `/api/paw`      | power, uptime, SSID and mode          |
//! | POST   | `/api/paw`      | switch power (`state` or raw body)    |
//! | GET    | `/api/settings` | device settings                       |
//! | POST   | `/api/settings` | partial settings update               |
//! | POST   | `/api/mode`     | select lamp mode                      |
//!
//! Any other `/api/` path answers 404. Connectivity probes and unknown
//! paths redirect to the portal, bundled assets are served as is.
//!
//! [`Device::handle`]: crate::Device::handle

mod assets;
mod http;
mod routes;

pub use assets::{WebAsset, find_asset};
pub use http::{
    Body, ContentEncoding, ContentType, HttpMethod, Request, Response, ResponseBody, STATUS_BAD_REQUEST,
    STATUS_FOUND, STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND, STATUS_OK, StatusCode,
};
pub(crate) use routes::handle_request;

/// Source of pending HTTP requests, polled once per loop iteration
pub trait RequestSource {
    /// Hand every pending request to `handler` and send its response
    fn dispatch<F: FnMut(&Request<'_>) -> Response>(&mut self, handler: F);
}
