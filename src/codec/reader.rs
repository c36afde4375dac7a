use heapless::String;

use super::CodecError;

/// Whitespace as understood by C `isspace`
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn skip_whitespace(bytes: &[u8], mut index: usize) -> usize {
    while index < bytes.len() && is_space(bytes[index]) {
        index += 1;
    }
    index
}

fn is_quoted_key_at(bytes: &[u8], index: usize, key: &[u8]) -> bool {
    let close = index + 1 + key.len();
    bytes[index] == b'"'
        && bytes[index + 1..].starts_with(key)
        && bytes.get(close) == Some(&b'"')
}

/// Find the value of `key`.
///
/// Locates the first `"key"` in `text`, requires a `:` after optional
/// whitespace and returns the index of the value after any further
/// whitespace. Matches inside string values are not excluded, so field
/// names must not collide with values.
pub fn find_field(text: &str, key: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let key = key.as_bytes();
    let start = (0..bytes.len()).find(|&index| is_quoted_key_at(bytes, index, key))?;

    let separator = skip_whitespace(bytes, start + key.len() + 2);
    if bytes.get(separator) != Some(&b':') {
        return None;
    }
    Some(skip_whitespace(bytes, separator + 1))
}

/// Decode the four hex digits of a `\u` escape
fn decode_unicode(chars: &core::str::Chars<'_>) -> Option<char> {
    let digits = chars.as_str().get(..4)?;
    if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

/// Read a quoted string starting at `index`.
///
/// Recognizes `\"`, `\\`, `\n`, `\r`, `\t` and `\uXXXX`; any other escaped
/// character is taken literally.
pub fn read_string<const N: usize>(text: &str, index: usize) -> Result<String<N>, CodecError> {
    let mut chars = text.get(index..).ok_or(CodecError::Syntax)?.chars();
    if chars.next() != Some('"') {
        return Err(CodecError::Syntax);
    }

    let mut result = String::new();
    let mut escape = false;
    while let Some(c) = chars.next() {
        if escape {
            let decoded = match c {
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'u' => match decode_unicode(&chars) {
                    Some(decoded) => {
                        chars.nth(3);
                        decoded
                    }
                    None => 'u',
                },
                other => other,
            };
            result.push(decoded).map_err(|()| CodecError::Overflow)?;
            escape = false;
            continue;
        }
        match c {
            '\\' => escape = true,
            '"' => return Ok(result),
            _ => result.push(c).map_err(|()| CodecError::Overflow)?,
        }
    }

    // Unterminated string
    Err(CodecError::Syntax)
}

/// Read a `true` or `false` literal starting at `index`
pub fn read_bool(text: &str, index: usize) -> Result<bool, CodecError> {
    let rest = text.get(index..).ok_or(CodecError::Syntax)?;
    if rest.starts_with("true") {
        Ok(true)
    } else if rest.starts_with("false") {
        Ok(false)
    } else {
        Err(CodecError::Syntax)
    }
}

/// Read a decimal integer with optional leading `-` starting at `index`.
///
/// Wraps on overflow like the device's 32-bit arithmetic.
pub fn read_integer(text: &str, index: usize) -> Result<i32, CodecError> {
    let bytes = text.as_bytes();
    let mut i = index;
    let negative = bytes.get(i) == Some(&b'-');
    if negative {
        i += 1;
    }

    let mut value: i32 = 0;
    let mut has_digits = false;
    while let Some(&byte) = bytes.get(i).filter(|byte| byte.is_ascii_digit()) {
        has_digits = true;
        value = value.wrapping_mul(10).wrapping_add(i32::from(byte - b'0'));
        i += 1;
    }
    if !has_digits {
        return Err(CodecError::Syntax);
    }

    Ok(if negative { value.wrapping_neg() } else { value })
}

/// Get a boolean field.
///
/// Returns `Ok(None)` if the key is absent and an error if it is present
/// with a value of another type.
pub fn get_bool(text: &str, key: &str) -> Result<Option<bool>, CodecError> {
    find_field(text, key)
        .map(|index| read_bool(text, index))
        .transpose()
}

/// Get an integer field, see [`get_bool`]
pub fn get_int(text: &str, key: &str) -> Result<Option<i32>, CodecError> {
    find_field(text, key)
        .map(|index| read_integer(text, index))
        .transpose()
}

/// Get a string field, see [`get_bool`]
pub fn get_string<const N: usize>(text: &str, key: &str) -> Result<Option<String<N>>, CodecError> {
    find_field(text, key)
        .map(|index| read_string(text, index))
        .transpose()
}
