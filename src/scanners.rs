//! Hand-written recognizers for the fixed pieces of block and inline syntax.
//!
//! Each scanner is handed the text starting at the position of interest and
//! returns how many bytes it matched. Block scanners see a single line with
//! its terminator already removed, so "end of line" is end of input.

use crate::ctype::{isalnum, isalpha, isdigit, isspace};

include!(concat!(env!("OUT_DIR"), "/blocktags.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetextChar {
    Equals,
    Hyphen,
}

#[inline]
fn is_space_or_tab(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn rest_is_blank(bytes: &[u8], from: usize) -> bool {
    bytes[from.min(bytes.len())..].iter().all(|&b| isspace(b))
}

/// `#{1,6}` followed by a space, a tab, or the end of the line. The match
/// includes any following spaces and tabs.
pub fn atx_heading_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let level = bytes.iter().take_while(|&&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    match bytes.get(level) {
        None => Some(level),
        Some(&b) if is_space_or_tab(b) => {
            Some(level + bytes[level..].iter().take_while(|&&b| is_space_or_tab(b)).count())
        }
        _ => None,
    }
}

/// Three or more backticks or tildes. A backtick fence's info string may not
/// contain a backtick. Returns the fence length.
pub fn open_code_fence(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let c = *bytes.first()?;
    if c != b'`' && c != b'~' {
        return None;
    }
    let len = bytes.iter().take_while(|&&b| b == c).count();
    if len < 3 {
        return None;
    }
    if c == b'`' && bytes[len..].contains(&b'`') {
        return None;
    }
    Some(len)
}

/// A fence run followed only by spaces and tabs. Returns the run length.
pub fn close_code_fence(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let c = *bytes.first()?;
    if c != b'`' && c != b'~' {
        return None;
    }
    let len = bytes.iter().take_while(|&&b| b == c).count();
    if len < 3 || !bytes[len..].iter().all(|&b| is_space_or_tab(b)) {
        return None;
    }
    Some(len)
}

pub fn setext_heading_line(line: &str) -> Option<SetextChar> {
    let bytes = line.as_bytes();
    let c = *bytes.first()?;
    if c != b'=' && c != b'-' {
        return None;
    }
    let len = bytes.iter().take_while(|&&b| b == c).count();
    if !bytes[len..].iter().all(|&b| is_space_or_tab(b)) {
        return None;
    }
    Some(if c == b'=' {
        SetextChar::Equals
    } else {
        SetextChar::Hyphen
    })
}

/// Three or more of the same `*`, `-` or `_`, optionally interspersed with
/// spaces and tabs, and nothing else.
pub fn thematic_break(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let c = *bytes.first()?;
    if c != b'*' && c != b'-' && c != b'_' {
        return None;
    }
    let mut count = 0;
    for &b in bytes {
        if b == c {
            count += 1;
        } else if !is_space_or_tab(b) {
            return None;
        }
    }
    if count >= 3 {
        Some(bytes.len())
    } else {
        None
    }
}

fn tag_name_len(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if !bytes.get(i).map_or(false, |&b| isalpha(b)) {
        return 0;
    }
    i += 1;
    while bytes.get(i).map_or(false, |&b| isalnum(b) || b == b'-') {
        i += 1;
    }
    i - start
}

fn starts_with_ignore_case(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes.len() >= at + needle.len() && bytes[at..at + needle.len()].eq_ignore_ascii_case(needle)
}

/// Start conditions 1 through 6. Returns the block type.
pub fn html_block_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }

    for tag in [&b"script"[..], b"pre", b"style", b"textarea"] {
        if starts_with_ignore_case(bytes, 1, tag) {
            match bytes.get(1 + tag.len()) {
                None | Some(b'>') => return Some(1),
                Some(&b) if isspace(b) => return Some(1),
                _ => {}
            }
        }
    }

    if bytes[1..].starts_with(b"!--") {
        return Some(2);
    }
    if bytes[1..].starts_with(b"?") {
        return Some(3);
    }
    if bytes.get(1) == Some(&b'!') && bytes.get(2).map_or(false, |&b| isalpha(b)) {
        return Some(4);
    }
    if bytes[1..].starts_with(b"![CDATA[") {
        return Some(5);
    }

    let name_start = if bytes.get(1) == Some(&b'/') { 2 } else { 1 };
    let name_len = tag_name_len(bytes, name_start);
    if name_len > 0 {
        let name = line[name_start..name_start + name_len].to_ascii_lowercase();
        if BLOCK_TAGS.contains(name.as_str()) {
            let after = name_start + name_len;
            match bytes.get(after) {
                None | Some(b'>') => return Some(6),
                Some(b'/') if bytes.get(after + 1) == Some(&b'>') => return Some(6),
                Some(&b) if isspace(b) => return Some(6),
                _ => {}
            }
        }
    }

    None
}

/// Start condition 7: one complete open or closing tag, alone on the line.
pub fn html_block_start_7(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }

    let name_start = if bytes.get(1) == Some(&b'/') { 2 } else { 1 };
    let name_len = tag_name_len(bytes, name_start);
    if name_len == 0 {
        return None;
    }
    let name = line[name_start..name_start + name_len].to_ascii_lowercase();
    if matches!(name.as_str(), "script" | "style" | "pre" | "textarea") {
        return None;
    }

    let matched = if name_start == 2 {
        closing_tag(bytes, 1)
    } else {
        open_tag(bytes, 1)
    }?;

    if rest_is_blank(bytes, 1 + matched) {
        Some(7)
    } else {
        None
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(needle)
}

pub fn html_block_end_1(line: &str) -> bool {
    contains_ignore_case(line, "</script>")
        || contains_ignore_case(line, "</pre>")
        || contains_ignore_case(line, "</style>")
        || contains_ignore_case(line, "</textarea>")
}

pub fn html_block_end_2(line: &str) -> bool {
    line.contains("-->")
}

pub fn html_block_end_3(line: &str) -> bool {
    line.contains("?>")
}

pub fn html_block_end_4(line: &str) -> bool {
    line.contains('>')
}

pub fn html_block_end_5(line: &str) -> bool {
    line.contains("]]>")
}

/// A URI autolink, given the text after `<`. The match includes the `>`.
pub fn autolink_uri(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if !bytes.first().map_or(false, |&b| isalpha(b)) {
        return None;
    }
    let mut i = 1;
    while bytes
        .get(i)
        .map_or(false, |&b| isalnum(b) || b == b'+' || b == b'.' || b == b'-')
    {
        i += 1;
    }
    if !(2..=32).contains(&i) || bytes.get(i) != Some(&b':') {
        return None;
    }
    i += 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'>' => return Some(i + 1),
            b'<' => return None,
            b if b <= 0x20 => return None,
            _ => i += 1,
        }
    }
    None
}

fn is_email_local_char(b: u8) -> bool {
    isalnum(b) || b".!#$%&'*+/=?^_`{|}~-".contains(&b)
}

/// An email autolink, given the text after `<`. The match includes the `>`.
pub fn autolink_email(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = bytes.iter().take_while(|&&b| is_email_local_char(b)).count();
    if i == 0 || bytes.get(i) != Some(&b'@') {
        return None;
    }
    i += 1;

    loop {
        let label_start = i;
        if !bytes.get(i).map_or(false, |&b| isalnum(b)) {
            return None;
        }
        while bytes.get(i).map_or(false, |&b| isalnum(b) || b == b'-') {
            i += 1;
        }
        if i - label_start > 63 || bytes[i - 1] == b'-' {
            return None;
        }
        match bytes.get(i) {
            Some(b'.') => i += 1,
            Some(b'>') => return Some(i + 1),
            _ => return None,
        }
    }
}

/// Whitespace, including line endings.
pub fn spacechars(s: &str) -> Option<usize> {
    let n = s.bytes().take_while(|&b| isspace(b)).count();
    if n > 0 {
        Some(n)
    } else {
        None
    }
}

/// A link title in `"…"`, `'…'` or `(…)`, with backslash escapes.
pub fn link_title(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let close = match bytes.first()? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };

    let mut i = 1;
    while let Some(&b) = bytes.get(i) {
        if b == b'\\' && bytes.get(i + 1).map_or(false, |&n| n.is_ascii_punctuation()) {
            i += 2;
        } else if b == close {
            return Some(i + 1);
        } else if close == b')' && b == b'(' {
            return None;
        } else {
            i += 1;
        }
    }
    None
}

fn skip_tag_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).map_or(false, |&b| isspace(b)) {
        i += 1;
    }
    i
}

fn attribute_value(bytes: &[u8], i: usize) -> Option<usize> {
    match *bytes.get(i)? {
        q @ b'"' | q @ b'\'' => {
            let end = bytes[i + 1..].iter().position(|&b| b == q)?;
            Some(i + 1 + end + 1)
        }
        _ => {
            let n = bytes[i..]
                .iter()
                .take_while(|&&b| !isspace(b) && !b"\"'=<>`".contains(&b))
                .count();
            if n == 0 {
                None
            } else {
                Some(i + n)
            }
        }
    }
}

// `start` indexes the tag name; returns bytes consumed from `start` through `>`.
fn open_tag(bytes: &[u8], start: usize) -> Option<usize> {
    let name_len = tag_name_len(bytes, start);
    if name_len == 0 {
        return None;
    }
    let mut i = start + name_len;

    loop {
        let after_ws = skip_tag_whitespace(bytes, i);
        let attr_start = bytes
            .get(after_ws)
            .map_or(false, |&b| isalpha(b) || b == b'_' || b == b':');
        if after_ws == i || !attr_start {
            i = after_ws;
            break;
        }

        i = after_ws + 1;
        while bytes
            .get(i)
            .map_or(false, |&b| isalnum(b) || b"_.:-".contains(&b))
        {
            i += 1;
        }

        let before_eq = skip_tag_whitespace(bytes, i);
        if bytes.get(before_eq) == Some(&b'=') {
            let value_start = skip_tag_whitespace(bytes, before_eq + 1);
            i = attribute_value(bytes, value_start)?;
        }
    }

    if bytes.get(i) == Some(&b'/') {
        i += 1;
    }
    if bytes.get(i) == Some(&b'>') {
        Some(i + 1 - start)
    } else {
        None
    }
}

// `start` indexes the `/`.
fn closing_tag(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) != Some(&b'/') {
        return None;
    }
    let name_len = tag_name_len(bytes, start + 1);
    if name_len == 0 {
        return None;
    }
    let i = skip_tag_whitespace(bytes, start + 1 + name_len);
    if bytes.get(i) == Some(&b'>') {
        Some(i + 1 - start)
    } else {
        None
    }
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

/// Inline raw HTML, given the text after `<`: an open tag, a closing tag, a
/// comment, a processing instruction, a declaration or a CDATA section. The
/// match includes the final `>`.
pub fn html_tag(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    match bytes.first()? {
        b'/' => closing_tag(bytes, 0),
        b'?' => find_from(bytes, 1, b"?>").map(|p| p + 2),
        b'!' => {
            if bytes[1..].starts_with(b"--") {
                if bytes[3..].starts_with(b">") {
                    Some(4)
                } else if bytes[3..].starts_with(b"->") {
                    Some(5)
                } else {
                    find_from(bytes, 3, b"-->").map(|p| p + 3)
                }
            } else if bytes[1..].starts_with(b"[CDATA[") {
                find_from(bytes, 8, b"]]>").map(|p| p + 3)
            } else if bytes.get(1).map_or(false, |&b| isalpha(b)) {
                bytes[2..].iter().position(|&b| b == b'>').map(|p| p + 3)
            } else {
                None
            }
        }
        _ => open_tag(bytes, 0),
    }
}

/// Digits of an ordered list marker, at most nine.
pub fn list_ordinal(bytes: &[u8]) -> usize {
    bytes.iter().take(10).take_while(|&&b| isdigit(b)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atx() {
        assert_eq!(atx_heading_start("# foo"), Some(2));
        assert_eq!(atx_heading_start("###"), Some(3));
        assert_eq!(atx_heading_start("#5 bolt"), None);
        assert_eq!(atx_heading_start("####### foo"), None);
        assert_eq!(atx_heading_start("##\t\tx"), Some(4));
    }

    #[test]
    fn fences() {
        assert_eq!(open_code_fence("```rust"), Some(3));
        assert_eq!(open_code_fence("``` aa ` "), None);
        assert_eq!(open_code_fence("~~~~ a ` b"), Some(4));
        assert_eq!(open_code_fence("``"), None);
        assert_eq!(close_code_fence("````  "), Some(4));
        assert_eq!(close_code_fence("``` x"), None);
    }

    #[test]
    fn breaks_and_underlines() {
        assert_eq!(thematic_break("* * *"), Some(5));
        assert_eq!(thematic_break("-_-"), None);
        assert_eq!(thematic_break("--"), None);
        assert_eq!(setext_heading_line("===  "), Some(SetextChar::Equals));
        assert_eq!(setext_heading_line("- -"), None);
    }

    #[test]
    fn html_block_types() {
        assert_eq!(html_block_start("<script type=x>"), Some(1));
        assert_eq!(html_block_start("<TEXTAREA"), Some(1));
        assert_eq!(html_block_start("<!-- c"), Some(2));
        assert_eq!(html_block_start("<?php"), Some(3));
        assert_eq!(html_block_start("<!DOCTYPE html>"), Some(4));
        assert_eq!(html_block_start("<![CDATA["), Some(5));
        assert_eq!(html_block_start("<DIV class=\"x\""), Some(6));
        assert_eq!(html_block_start("</table>"), Some(6));
        assert_eq!(html_block_start("<custom>"), None);
        assert_eq!(html_block_start_7("<custom a=\"1\">  "), Some(7));
        assert_eq!(html_block_start_7("<custom> text"), None);
        assert_eq!(html_block_start_7("</custom>"), Some(7));
    }

    #[test]
    fn autolinks() {
        assert_eq!(autolink_uri("http://a.b/c>x"), Some(13));
        assert_eq!(autolink_uri("a:b>"), None);
        assert_eq!(autolink_uri("http://a b>"), None);
        assert_eq!(autolink_email("foo@bar.example.com>"), Some(20));
        assert_eq!(autolink_email("foo@-bar.com>"), None);
        assert_eq!(autolink_email("foo@bar->"), None);
    }

    #[test]
    fn inline_html() {
        assert_eq!(html_tag("a href=\"x\" b c='d'/>"), Some(20));
        assert_eq!(html_tag("a  />"), Some(5));
        assert_eq!(html_tag("a href=\"x>"), None);
        assert_eq!(html_tag("/a >"), Some(4));
        assert_eq!(html_tag("!-- x -->"), Some(9));
        assert_eq!(html_tag("!-->"), Some(4));
        assert_eq!(html_tag("?php x ?>"), Some(9));
        assert_eq!(html_tag("!DOCTYPE html>"), Some(14));
        assert_eq!(html_tag("![CDATA[x]]>"), Some(12));
        assert_eq!(html_tag("33>"), None);
    }

    #[test]
    fn titles() {
        assert_eq!(link_title("\"a \\\" b\" rest"), Some(8));
        assert_eq!(link_title("(a (b))"), None);
        assert_eq!(link_title("'open"), None);
    }
}
