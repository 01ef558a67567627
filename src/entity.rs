use std::borrow::Cow;
use std::char;
use std::cmp::min;

use crate::ctype::{isdigit, isxdigit};

include!(concat!(env!("OUT_DIR"), "/entitydata.rs"));

pub const ENTITY_MIN_LENGTH: usize = 2;
pub const ENTITY_MAX_LENGTH: usize = 32;

const MAX_DECIMAL_DIGITS: usize = 7;
const MAX_HEX_DIGITS: usize = 6;

/// Decodes the entity at the start of `text`, which is everything after the
/// `&`. Returns the decoded text and the number of bytes consumed, including
/// the trailing `;`.
pub fn unescape(text: &str) -> Option<(Cow<'static, str>, usize)> {
    let bytes = text.as_bytes();

    if bytes.len() >= 3 && bytes[0] == b'#' {
        let mut codepoint: u32 = 0;
        let mut i = 0;

        let num_digits = if isdigit(bytes[1]) {
            i = 1;
            while i < bytes.len() && isdigit(bytes[i]) {
                codepoint = (codepoint * 10) + (bytes[i] - b'0') as u32;
                codepoint = min(codepoint, 0x11_0000);
                i += 1;
            }
            if i - 1 > MAX_DECIMAL_DIGITS {
                return None;
            }
            i - 1
        } else if bytes[1] == b'x' || bytes[1] == b'X' {
            i = 2;
            while i < bytes.len() && isxdigit(bytes[i]) {
                codepoint = (codepoint * 16) + (bytes[i] as char).to_digit(16).unwrap_or(0);
                codepoint = min(codepoint, 0x11_0000);
                i += 1;
            }
            if i - 2 > MAX_HEX_DIGITS {
                return None;
            }
            i - 2
        } else {
            0
        };

        if num_digits >= 1 && i < bytes.len() && bytes[i] == b';' {
            let ch = if codepoint == 0 {
                char::REPLACEMENT_CHARACTER
            } else {
                char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER)
            };
            return Some((Cow::Owned(ch.to_string()), i + 1));
        }

        return None;
    }

    let size = min(bytes.len(), ENTITY_MAX_LENGTH);
    for i in ENTITY_MIN_LENGTH..size {
        if bytes[i] == b' ' {
            return None;
        }

        if bytes[i] == b';' {
            return lookup(&text[..i]).map(|e| (Cow::Borrowed(e), i + 1));
        }
    }

    None
}

fn lookup(text: &str) -> Option<&'static str> {
    let entities = entitydata::TRANSLATED_ENTITIES;
    entities
        .binary_search_by_key(&text, |&(name, _)| name)
        .ok()
        .map(|ix| entities[ix].1)
}

/// Replaces every valid entity reference in `src` with its text.
pub fn unescape_html(src: &str) -> Cow<'_, str> {
    let bytes = src.as_bytes();
    let size = bytes.len();
    let mut i = 0;
    let mut v = String::new();

    while i < size {
        let org = i;
        while i < size && bytes[i] != b'&' {
            i += 1;
        }

        if i > org {
            if org == 0 && i >= size {
                return Cow::Borrowed(src);
            }

            v.push_str(&src[org..i]);
        }

        if i >= size {
            return Cow::Owned(v);
        }

        i += 1;
        match unescape(&src[i..]) {
            Some((chs, size)) => {
                v.push_str(&chs);
                i += size;
            }
            None => v.push('&'),
        }
    }

    Cow::Owned(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named() {
        assert_eq!(unescape("amp;x"), Some((Cow::Borrowed("&"), 4)));
        assert_eq!(unescape("ouml;"), Some((Cow::Borrowed("ö"), 5)));
        assert_eq!(unescape("MadeUpEntity;"), None);
        assert_eq!(unescape("amp"), None);
    }

    #[test]
    fn numeric() {
        assert_eq!(unescape("#35;").map(|(s, n)| (s.into_owned(), n)), Some(("#".into(), 4)));
        assert_eq!(
            unescape("#X22;").map(|(s, n)| (s.into_owned(), n)),
            Some(("\"".into(), 5))
        );
        assert_eq!(
            unescape("#0;").map(|(s, n)| (s.into_owned(), n)),
            Some(("\u{fffd}".into(), 3))
        );
        assert_eq!(unescape("#87654321;"), None);
        assert_eq!(unescape("#abcdef0;"), None);
        assert_eq!(unescape("#;"), None);
    }

    #[test]
    fn whole_strings() {
        assert_eq!(unescape_html("a &amp; b &bogus; &#65;"), "a & b &bogus; A");
        assert!(matches!(unescape_html("plain"), Cow::Borrowed(_)));
    }
}
