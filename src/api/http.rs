use core::fmt::Write;

use heapless::String;

use crate::codec::{CodecError, ObjectWriter};
use crate::config::RESPONSE_BODY_CAPACITY;

pub type StatusCode = u16;

pub const STATUS_OK: StatusCode = 200;
pub const STATUS_FOUND: StatusCode = 302;
pub const STATUS_BAD_REQUEST: StatusCode = 400;
pub const STATUS_NOT_FOUND: StatusCode = 404;
pub const STATUS_INTERNAL_ERROR: StatusCode = 500;

/// Fixed-capacity text body
pub type Body = String<RESPONSE_BODY_CAPACITY>;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    /// Any method without a route of its own
    Other,
}

/// HTTP Content Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    TextPlain,
    /// Mime type of a bundled asset
    Asset(&'static str),
}

impl ContentType {
    /// Convert the content type to a string.
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::TextPlain => "text/plain",
            ContentType::Asset(mime_type) => mime_type,
        }
    }
}

/// HTTP Content Encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    /// Convert the content encoding to a string.
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }
}

/// Request as delivered by the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub method: HttpMethod,
    /// Path without the query string
    pub path: &'a str,
    /// `state` argument from the query string or form body
    pub state: Option<&'a str>,
    /// Raw request body
    pub body: &'a str,
}

impl<'a> Request<'a> {
    pub const fn new(method: HttpMethod, path: &'a str) -> Self {
        Self {
            method,
            path,
            state: None,
            body: "",
        }
    }

    #[must_use]
    pub const fn with_body(mut self, body: &'a str) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub const fn with_state(mut self, state: &'a str) -> Self {
        self.state = Some(state);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Text(Body),
    Static(&'static [u8]),
}

impl ResponseBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ResponseBody::Text(text) => text.as_bytes(),
            ResponseBody::Static(bytes) => bytes,
        }
    }
}

/// Response for the HTTP server to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: ContentType,
    pub content_encoding: Option<ContentEncoding>,
    pub location: Option<&'static str>,
    /// Send `Cache-Control: no-store`
    pub no_store: bool,
    pub body: ResponseBody,
}

impl Response {
    const fn new(status: StatusCode, content_type: ContentType, body: ResponseBody) -> Self {
        Self {
            status,
            content_type,
            content_encoding: None,
            location: None,
            no_store: false,
            body,
        }
    }

    /// JSON response written by `write`.
    ///
    /// Falls back to a 500 response if the body does not fit.
    pub fn json(
        status: StatusCode,
        write: impl FnOnce(&mut Body) -> Result<(), CodecError>,
    ) -> Self {
        let mut body = Body::new();
        match write(&mut body) {
            Ok(()) => Self::new(status, ContentType::Json, ResponseBody::Text(body)),
            Err(_) => Self::error(STATUS_INTERNAL_ERROR, "overflow"),
        }
    }

    /// `{"error":"<token>"}` response
    pub fn error(status: StatusCode, token: &str) -> Self {
        let mut body = Body::new();
        // Tokens are short literals and field names
        let _ = ObjectWriter::new(&mut body)
            .and_then(|object| object.str_field("error", token))
            .and_then(ObjectWriter::finish);
        Self::new(status, ContentType::Json, ResponseBody::Text(body))
    }

    /// Redirect to `location` with a short plain-text body
    pub fn redirect(location: &'static str) -> Self {
        let mut body = Body::new();
        let _ = body.write_str("Meow.");
        let mut response = Self::new(STATUS_FOUND, ContentType::TextPlain, ResponseBody::Text(body));
        response.location = Some(location);
        response
    }

    /// Gzip-compressed static asset, never cached
    pub fn gzip_asset(mime_type: &'static str, data: &'static [u8]) -> Self {
        let mut response = Self::new(STATUS_OK, ContentType::Asset(mime_type), ResponseBody::Static(data));
        response.content_encoding = Some(ContentEncoding::Gzip);
        response.no_store = true;
        response
    }

    /// Body as text, empty for binary bodies
    pub fn text(&self) -> &str {
        match &self.body {
            ResponseBody::Text(text) => text.as_str(),
            ResponseBody::Static(_) => "",
        }
    }
}
