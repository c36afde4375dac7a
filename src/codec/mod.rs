//! Minimal flat-object JSON codec
//!
//! Reads one named field at a time from a flat JSON object and writes flat
//! objects back, without building a document tree. Nested objects and
//! arrays are not supported.

mod reader;
mod writer;

pub use reader::{
    find_field, get_bool, get_int, get_string, read_bool, read_integer, read_string,
};
pub use writer::{ObjectWriter, escape, escape_into};

/// Error type for the codec operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Value is malformed or has the wrong type
    Syntax,
    /// Value does not fit into the output buffer
    Overflow,
}

impl From<core::fmt::Error> for CodecError {
    fn from(_error: core::fmt::Error) -> Self {
        CodecError::Overflow
    }
}
