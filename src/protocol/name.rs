//! Label-sequence encoding of domain names.
//!
//! Names are held in fully-qualified dotted form (`"example.com."`), the
//! root being `"."`. Compression pointers are recognised on decode but never
//! followed: the two pointer bytes are consumed and the name ends there.

use crate::cursor::Cursor;
use crate::error::{DnsError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const ROOT: &str = ".";
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_LABEL_LEN: usize = 63;

const POINTER_MASK: u8 = 0xC0;

static LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("label grammar is a valid regex")
});

pub fn validate_domain_name(name: &str) -> bool {
    if name == ROOT {
        return true;
    }
    if name.is_empty() || name.len() > MAX_NAME_LEN || name.contains("..") {
        return false;
    }
    match name.strip_suffix('.') {
        Some(labels) => labels.split('.').all(is_valid_label),
        None => false,
    }
}

pub fn check_domain_name(name: &str) -> Result<()> {
    if validate_domain_name(name) {
        Ok(())
    } else {
        Err(DnsError::validation("Bad domain name", name))
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && label.len() <= MAX_LABEL_LEN && LABEL_REGEX.is_match(label)
}

fn labels(name: &str) -> impl Iterator<Item = &str> {
    name.split('.').filter(|label| !label.is_empty())
}

pub fn encode_name(name: &str, buf: &mut Vec<u8>) {
    for label in labels(name) {
        buf.push(label.len() as u8);
        buf.extend(label.bytes());
    }
    buf.push(0);
}

pub fn encoded_name_len(name: &str) -> usize {
    labels(name).map(|label| label.len() + 1).sum::<usize>() + 1
}

pub fn decode_name(cursor: &mut Cursor) -> Result<String> {
    let mut name = String::new();
    loop {
        let seg_len = cursor.take()?;
        if seg_len == 0 {
            break;
        }
        if seg_len & POINTER_MASK == POINTER_MASK {
            cursor.take()?;
            break;
        }
        let segment = cursor.take_slice(seg_len as usize)?;
        if !segment.is_ascii() {
            return Err(DnsError::validation(
                "Non-ASCII byte in domain name label",
                String::from_utf8_lossy(segment),
            ));
        }
        segment.iter().for_each(|b| name.push(*b as char));
        name.push('.');
        if name.len() > MAX_NAME_LEN {
            return Err(DnsError::validation("Domain name too long", name));
        }
    }
    if name.is_empty() {
        name.push('.');
    }
    check_domain_name(&name)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::protocol::name::{decode_name, encode_name, encoded_name_len, validate_domain_name};

    fn encode(name: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_name(name, &mut buf);
        buf
    }

    #[test]
    fn should_accept_name_when_validate_given_fully_qualified_names() {
        assert!(validate_domain_name("."));
        assert!(validate_domain_name("example.com."));
        assert!(validate_domain_name("a-b_c.D9."));
        assert!(validate_domain_name(&format!("{}.", "a".repeat(63))));
    }

    #[test]
    fn should_reject_name_when_validate_given_malformed_names() {
        assert!(!validate_domain_name(""));
        assert!(!validate_domain_name("example.com"));
        assert!(!validate_domain_name("example..com."));
        assert!(!validate_domain_name(".."));
        assert!(!validate_domain_name("9lives.com."));
        assert!(!validate_domain_name("-dash.com."));
        assert!(!validate_domain_name("sp ace.com."));
        assert!(!validate_domain_name(&format!("{}.", "a".repeat(64))));
    }

    #[test]
    fn should_reject_name_when_validate_given_name_longer_than_255() {
        let label = "a".repeat(50);
        let name = format!("{}.{}.{}.{}.{}.{}.", label, label, label, label, label, label);

        let result = validate_domain_name(&name);

        assert!(name.len() > 255);
        assert!(!result);
    }

    #[test]
    fn should_write_single_zero_when_encode_given_root() {
        let result = encode(".");

        assert_eq!(vec![0u8], result);
        assert_eq!(1, encoded_name_len("."));
    }

    #[test]
    fn should_write_labels_when_encode_given_dotted_name() {
        let result = encode("example.com.");

        let mut expected = vec![7u8];
        expected.extend(b"example");
        expected.push(3);
        expected.extend(b"com");
        expected.push(0);
        assert_eq!(expected, result);
        assert_eq!(expected.len(), encoded_name_len("example.com."));
    }

    #[test]
    fn should_return_equal_name_ignoring_case_when_decode_given_encoded_name() {
        let names = [".", "foo.", "Example.COM.", "a.b-c.d_e.f."];
        for name in names.iter() {
            let bytes = encode(name);
            let mut cursor = Cursor::new(&bytes);

            let result = decode_name(&mut cursor).unwrap();

            assert!(result.eq_ignore_ascii_case(name));
            assert!(cursor.is_exhausted());
        }
    }

    #[test]
    fn should_stop_after_two_bytes_when_decode_given_compression_pointer() {
        let bytes = [3u8, b'f', b'o', b'o', 0xC0, 0x0C, 0xAA];
        let mut cursor = Cursor::new(&bytes);

        let result = decode_name(&mut cursor).unwrap();

        assert_eq!("foo.", result);
        assert_eq!(1, cursor.remaining());
    }

    #[test]
    fn should_return_root_when_decode_given_bare_pointer() {
        let bytes = [0xC0u8, 0x0C];
        let mut cursor = Cursor::new(&bytes);

        let result = decode_name(&mut cursor).unwrap();

        assert_eq!(".", result);
    }

    #[test]
    fn should_return_incomplete_when_decode_given_missing_terminator() {
        let bytes = [3u8, b'f', b'o', b'o'];
        let mut cursor = Cursor::new(&bytes);

        let result = decode_name(&mut cursor);

        assert!(result.unwrap_err().is_incomplete());
    }

    #[test]
    fn should_return_incomplete_when_decode_given_truncated_label() {
        let bytes = [5u8, b'f', b'o'];
        let mut cursor = Cursor::new(&bytes);

        let result = decode_name(&mut cursor);

        assert!(result.unwrap_err().is_incomplete());
    }

    #[test]
    fn should_return_validation_when_decode_given_bad_label_grammar() {
        let bytes = [3u8, b'1', b'a', b'b', 0];
        let mut cursor = Cursor::new(&bytes);

        let result = decode_name(&mut cursor).unwrap_err();

        assert!(result.is_validation());
        assert_eq!(Some("1ab."), result.bad_token());
    }

    #[test]
    fn should_return_validation_when_decode_given_name_over_255_chars() {
        let mut bytes = Vec::new();
        for _ in 0..5 {
            bytes.push(60u8);
            bytes.extend(std::iter::repeat(b'a').take(60));
        }
        bytes.push(0);
        let mut cursor = Cursor::new(&bytes);

        let result = decode_name(&mut cursor);

        assert!(result.unwrap_err().is_validation());
    }
}
