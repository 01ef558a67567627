//! Link reference definitions, and the destination scanner shared with
//! inline links.

use rustc_hash::FxHashMap;

use crate::ctype::{ispunct, isspace};
use crate::lexer::Cursor;
use crate::scanners;
use crate::strings;

pub(crate) const MAX_LINK_LABEL_LENGTH: usize = 999;

// Raw destinations may nest parentheses this deep.
const MAX_LINK_PAREN_DEPTH: usize = 32;

/// A reference link's resolved details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// The destination URL of the reference link.
    pub url: String,

    /// The text of the link.
    pub title: String,
}

/// Link reference definitions, keyed by normalized label.
pub type RefMap = FxHashMap<String, ResolvedReference>;

/// Scans a link destination at the start of `input`: either `<…>` or a raw
/// run with balanced parentheses.  Returns the destination and the number of
/// bytes consumed.
pub(crate) fn manual_scan_link_url(input: &str) -> Option<(&str, usize)> {
    let bytes = input.as_bytes();
    let len = bytes.len();

    if bytes.first() != Some(&b'<') {
        return manual_scan_link_url_raw(input);
    }

    let mut i = 1;
    while i < len {
        match bytes[i] {
            b'>' => return Some((&input[1..i], i + 1)),
            b'\\' if i + 1 < len && ispunct(bytes[i + 1]) => i += 2,
            b'\n' | b'<' => return None,
            _ => i += 1,
        }
    }
    None
}

fn manual_scan_link_url_raw(input: &str) -> Option<(&str, usize)> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    let mut nb_p = 0;

    while i < len {
        if bytes[i] == b'\\' && i + 1 < len && ispunct(bytes[i + 1]) {
            i += 2;
        } else if bytes[i] == b'(' {
            nb_p += 1;
            i += 1;
            if nb_p > MAX_LINK_PAREN_DEPTH {
                return None;
            }
        } else if bytes[i] == b')' {
            if nb_p == 0 {
                break;
            }
            nb_p -= 1;
            i += 1;
        } else if isspace(bytes[i]) || bytes[i].is_ascii_control() {
            break;
        } else {
            i += 1;
        }
    }

    if nb_p != 0 {
        None
    } else {
        Some((&input[..i], i))
    }
}

/// Parses one definition at the start of `content`.  Returns the number of
/// bytes it spans (through its line ending) and the normalized label with its
/// reference.
pub(crate) fn parse_reference_inline(content: &str) -> Option<(usize, String, ResolvedReference)> {
    let mut cursor = Cursor::new(content);

    let lab = match cursor.link_label(MAX_LINK_LABEL_LENGTH) {
        Some(lab) if !lab.is_empty() => lab,
        _ => return None,
    };

    if cursor.peek() != Some(b':') {
        return None;
    }
    cursor.advance(1);
    cursor.spnl();

    let (url, matchlen) = manual_scan_link_url(cursor.rest())?;
    if matchlen == 0 {
        return None;
    }
    cursor.advance(matchlen);

    let beforetitle = cursor.save();
    cursor.spnl();
    let title_search = if cursor.pos == beforetitle {
        None
    } else {
        scanners::link_title(cursor.rest())
    };
    let title = match title_search {
        Some(matchlen) => {
            let t = cursor.slice(cursor.pos, cursor.pos + matchlen);
            cursor.advance(matchlen);
            t
        }
        None => {
            cursor.restore(beforetitle);
            ""
        }
    };

    cursor.skip_spaces();
    if !cursor.skip_line_end() {
        if title.is_empty() {
            return None;
        }
        cursor.restore(beforetitle);
        cursor.skip_spaces();
        if !cursor.skip_line_end() {
            return None;
        }
        return finish(cursor.pos, lab, url, "");
    }

    finish(cursor.pos, lab, url, title)
}

fn finish(
    consumed: usize,
    lab: &str,
    url: &str,
    title: &str,
) -> Option<(usize, String, ResolvedReference)> {
    let lab = strings::normalize_label(lab);
    if lab.is_empty() {
        return None;
    }
    Some((
        consumed,
        lab,
        ResolvedReference {
            url: strings::clean_url(url),
            title: strings::clean_title(title),
        },
    ))
}

/// Strips every definition from the start of `content`, recording each
/// in `refmap` unless its label is already defined.  Returns whether any
/// non-blank content remains.
pub(crate) fn extract_reference_definitions(content: &mut String, refmap: &mut RefMap) -> bool {
    let mut pos = 0;

    while content.as_bytes().get(pos) == Some(&b'[') {
        match parse_reference_inline(&content[pos..]) {
            Some((consumed, lab, rr)) => {
                pos += consumed;
                refmap.entry(lab).or_insert(rr);
            }
            None => break,
        }
    }

    if pos != 0 {
        strings::remove_from_start(content, pos);
    }

    !strings::is_blank(content)
}

/// Whether `content` would be left blank once its leading definitions were
/// stripped.  Records nothing.
pub(crate) fn only_reference_definitions(content: &str) -> bool {
    let mut pos = 0;
    while content.as_bytes().get(pos) == Some(&b'[') {
        match parse_reference_inline(&content[pos..]) {
            Some((consumed, ..)) => pos += consumed,
            None => break,
        }
    }
    pos != 0 && strings::is_blank(&content[pos..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations() {
        assert_eq!(manual_scan_link_url("<a b>c"), Some(("a b", 5)));
        assert_eq!(manual_scan_link_url("<a\nb>"), None);
        assert_eq!(manual_scan_link_url("/u(r(l)) x"), Some(("/u(r(l))", 8)));
        assert_eq!(manual_scan_link_url("/u(rl x"), None);
        assert_eq!(manual_scan_link_url(") x"), Some(("", 0)));
    }

    #[test]
    fn definitions_are_first_wins() {
        let mut refmap = RefMap::default();
        let mut content = "[Foo]: /one 'a'\n[FOO]: /two\nrest\n".to_string();
        assert!(extract_reference_definitions(&mut content, &mut refmap));
        assert_eq!(content, "rest\n");
        assert_eq!(refmap.len(), 1);
        assert_eq!(refmap["foo"].url, "/one");
        assert_eq!(refmap["foo"].title, "a");
    }

    #[test]
    fn title_on_next_line() {
        let (n, lab, rr) = parse_reference_inline("[x]:\n/url\n\"t\"\n").unwrap();
        assert_eq!((n, lab.as_str()), (14, "x"));
        assert_eq!(rr.title, "t");
    }

    #[test]
    fn bad_title_falls_back_to_bare_destination() {
        let (n, _, rr) = parse_reference_inline("[x]: /url\n\"t\" junk\n").unwrap();
        assert_eq!(n, 10);
        assert_eq!(rr.title, "");

        assert!(parse_reference_inline("[x]: /url \"t\" junk\n").is_none());
    }

    #[test]
    fn only_definitions() {
        assert!(only_reference_definitions("[a]: /b\n"));
        assert!(!only_reference_definitions("[a]: /b\nc\n"));
        assert!(!only_reference_definitions("plain\n"));
    }
}
