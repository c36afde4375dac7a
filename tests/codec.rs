#[cfg(test)]
mod tests {
    use heapless::String;
    use myrtio_lamp::codec::{
        CodecError, ObjectWriter, escape, find_field, get_bool, get_int, get_string, read_bool,
        read_integer, read_string,
    };

    #[test]
    fn test_find_field_skips_whitespace() {
        assert_eq!(find_field(r#"{"a": 1}"#, "a"), Some(6));
        assert_eq!(find_field(r#"{"a"  :	true}"#, "a"), Some(8));
        assert_eq!(find_field(r#"{"a":1}"#, "a"), Some(5));
    }

    #[test]
    fn test_find_field_missing_key_or_separator() {
        assert_eq!(find_field(r#"{"a": 1}"#, "b"), None);
        assert_eq!(find_field(r#"{"ab": 1}"#, "a"), None);
        assert_eq!(find_field(r#"{"a" 1}"#, "a"), None);
        assert_eq!(find_field("", "a"), None);
    }

    #[test]
    fn test_find_field_uses_first_occurrence() {
        // The first "a" is not followed by a colon
        assert_eq!(find_field(r#"{"x": "a", "a": 1}"#, "a"), None);
        assert_eq!(find_field(r#"{"a": 1, "a": 2}"#, "a"), Some(6));
    }

    #[test]
    fn test_read_string_escapes() {
        let text = r#""a\"b\\c\nd\te\rf\xg""#;
        let value: String<32> = read_string(text, 0).unwrap();
        assert_eq!(value.as_str(), "a\"b\\c\nd\te\rfxg");
    }

    #[test]
    fn test_read_string_unicode_escape() {
        let value: String<16> = read_string(r#""\u0041\u00e9""#, 0).unwrap();
        assert_eq!(value.as_str(), "Aé");

        // Not followed by four hex digits: taken literally
        let value: String<16> = read_string(r#""\uzz""#, 0).unwrap();
        assert_eq!(value.as_str(), "uzz");
    }

    #[test]
    fn test_read_string_errors() {
        assert_eq!(read_string::<16>(r#""open"#, 0), Err(CodecError::Syntax));
        assert_eq!(read_string::<16>("plain", 0), Err(CodecError::Syntax));
        assert_eq!(read_string::<16>(r#""x""#, 10), Err(CodecError::Syntax));
        assert_eq!(read_string::<4>(r#""hello""#, 0), Err(CodecError::Overflow));
    }

    #[test]
    fn test_read_bool() {
        assert_eq!(read_bool("true}", 0), Ok(true));
        assert_eq!(read_bool("x false", 2), Ok(false));
        assert_eq!(read_bool("TRUE", 0), Err(CodecError::Syntax));
        assert_eq!(read_bool("tru", 0), Err(CodecError::Syntax));
        assert_eq!(read_bool("1", 0), Err(CodecError::Syntax));
    }

    #[test]
    fn test_read_integer() {
        assert_eq!(read_integer("42", 0), Ok(42));
        assert_eq!(read_integer("-42,", 0), Ok(-42));
        assert_eq!(read_integer("123abc", 0), Ok(123));
        assert_eq!(read_integer("-", 0), Err(CodecError::Syntax));
        assert_eq!(read_integer("abc", 0), Err(CodecError::Syntax));
        assert_eq!(read_integer("\"7\"", 0), Err(CodecError::Syntax));
        assert_eq!(read_integer("2147483648", 0), Ok(i32::MIN));
    }

    #[test]
    fn test_get_field_helpers() {
        let body = r#"{"on": true, "port": 7000, "name": "kitchen"}"#;
        assert_eq!(get_bool(body, "on"), Ok(Some(true)));
        assert_eq!(get_int(body, "port"), Ok(Some(7000)));
        assert_eq!(
            get_string::<16>(body, "name").unwrap().as_deref(),
            Some("kitchen")
        );

        assert_eq!(get_bool(body, "missing"), Ok(None));
        assert_eq!(get_int(body, "missing"), Ok(None));
        assert_eq!(get_string::<16>(body, "missing"), Ok(None));

        assert_eq!(get_bool(body, "port"), Err(CodecError::Syntax));
        assert_eq!(get_int(body, "name"), Err(CodecError::Syntax));
        assert_eq!(get_string::<16>(body, "on"), Err(CodecError::Syntax));
    }

    #[test]
    fn test_escape() {
        let escaped: String<32> = escape("a\"b\\c").unwrap();
        assert_eq!(escaped.as_str(), r#"a\"b\\c"#);

        let escaped: String<32> = escape("\n\r\t\u{1}").unwrap();
        assert_eq!(escaped.as_str(), r"\n\r\t\u0001");

        assert_eq!(escape::<2>("abc"), Err(CodecError::Overflow));
    }

    #[test]
    fn test_escaped_strings_read_back() {
        for input in ["", "plain", "qu\"ote", "back\\slash", "lines\n\r\t", "\u{1f}ctl", "кот 🐱"] {
            let escaped: String<64> = escape(input).unwrap();
            let mut body: String<96> = String::new();
            body.push_str("{\"k\": \"").unwrap();
            body.push_str(&escaped).unwrap();
            body.push_str("\"}").unwrap();

            let value = get_string::<64>(&body, "k").unwrap().unwrap();
            assert_eq!(value.as_str(), input);
        }
    }

    #[test]
    fn test_object_writer() {
        let mut body: String<96> = String::new();
        ObjectWriter::new(&mut body)
            .and_then(|writer| writer.bool_field("led_on", true))
            .and_then(|writer| writer.int_field("uptime_s", 5u32))
            .and_then(|writer| writer.str_field("mode", "pu\"rr"))
            .and_then(ObjectWriter::finish)
            .unwrap();
        assert_eq!(body.as_str(), r#"{"led_on":true,"uptime_s":5,"mode":"pu\"rr"}"#);

        let mut empty: String<4> = String::new();
        ObjectWriter::new(&mut empty)
            .and_then(ObjectWriter::finish)
            .unwrap();
        assert_eq!(empty.as_str(), "{}");
    }

    #[test]
    fn test_object_writer_overflow() {
        let mut body: String<8> = String::new();
        let result = ObjectWriter::new(&mut body)
            .and_then(|writer| writer.str_field("mode", "static"))
            .and_then(ObjectWriter::finish);
        assert_eq!(result, Err(CodecError::Overflow));
    }
}
