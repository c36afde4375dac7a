use core::fmt::Write;

use heapless::String;

use super::CodecError;

/// Write `input` escaped for use inside a JSON string literal.
///
/// Escapes quote, backslash, `\n`, `\r`, `\t` and writes every other
/// control character as a `\u00XX` escape.
pub fn escape_into(out: &mut impl Write, input: &str) -> core::fmt::Result {
    for c in input.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if u32::from(c) < 0x20 => write!(out, "\\u{:04x}", u32::from(c))?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

/// Escape `input` into a new fixed-capacity string
pub fn escape<const N: usize>(input: &str) -> Result<String<N>, CodecError> {
    let mut out = String::new();
    escape_into(&mut out, input)?;
    Ok(out)
}

/// Writer for a flat JSON object.
///
/// Fields are written in call order; call [`ObjectWriter::finish`] to close
/// the object.
///
/// ```ignore
/// let mut body = heapless::String::<64>::new();
/// ObjectWriter::new(&mut body)?
///     .bool_field("led_on", true)?
///     .str_field("mode", "purr")?
///     .finish()?;
/// ```
pub struct ObjectWriter<'a, W: Write> {
    out: &'a mut W,
    has_fields: bool,
}

impl<'a, W: Write> ObjectWriter<'a, W> {
    /// Open a new object
    pub fn new(out: &'a mut W) -> Result<Self, CodecError> {
        out.write_char('{')?;
        Ok(Self {
            out,
            has_fields: false,
        })
    }

    fn key(&mut self, key: &str) -> Result<(), CodecError> {
        if self.has_fields {
            self.out.write_char(',')?;
        }
        self.has_fields = true;
        self.out.write_char('"')?;
        escape_into(&mut *self.out, key)?;
        self.out.write_str("\":")?;
        Ok(())
    }

    /// Write a boolean field
    pub fn bool_field(mut self, key: &str, value: bool) -> Result<Self, CodecError> {
        self.key(key)?;
        self.out.write_str(if value { "true" } else { "false" })?;
        Ok(self)
    }

    /// Write an integer field
    pub fn int_field(mut self, key: &str, value: impl Into<i64>) -> Result<Self, CodecError> {
        self.key(key)?;
        write!(self.out, "{}", value.into())?;
        Ok(self)
    }

    /// Write an escaped string field
    pub fn str_field(mut self, key: &str, value: &str) -> Result<Self, CodecError> {
        self.key(key)?;
        self.out.write_char('"')?;
        escape_into(&mut *self.out, value)?;
        self.out.write_char('"')?;
        Ok(self)
    }

    /// Close the object
    pub fn finish(self) -> Result<(), CodecError> {
        self.out.write_char('}')?;
        Ok(())
    }
}
