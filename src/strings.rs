use crate::ctype::{ispunct, isspace};
use crate::entity;
use crate::parser::AutolinkType;

pub fn unescape(v: &mut String) {
    if !v.contains('\\') {
        return;
    }

    let bytes = v.as_bytes();
    let mut r = String::with_capacity(v.len());
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() && ispunct(bytes[i + 1]) {
            r.push_str(&v[last..i]);
            last = i + 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    r.push_str(&v[last..]);
    *v = r;
}

pub fn clean_autolink(url: &str, kind: AutolinkType) -> String {
    let url = trim_slice(url);

    if url.is_empty() {
        return String::new();
    }

    let mut buf = String::with_capacity(url.len());
    if kind == AutolinkType::Email {
        buf.push_str("mailto:");
    }

    buf.push_str(&entity::unescape_html(url));
    buf
}

pub fn normalize_code(v: &str) -> String {
    let mut r = String::with_capacity(v.len());
    let mut contains_nonspace = false;

    for c in v.chars() {
        match c {
            '\n' => r.push(' '),
            c => {
                if c != ' ' {
                    contains_nonspace = true;
                }
                r.push(c)
            }
        }
    }

    if contains_nonspace && r.len() >= 2 && r.starts_with(' ') && r.ends_with(' ') {
        r.pop();
        r.remove(0);
    }

    r
}

/// Strips trailing lines made only of spaces and tabs, along with the final
/// line terminator. Returns the number of blank lines removed.
pub fn remove_trailing_blank_lines(line: &mut String) -> usize {
    let bytes = line.as_bytes();
    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], b' ' | b'\t' | b'\n' | b'\r') {
        end -= 1;
    }

    if end == 0 {
        let removed = bytes.iter().filter(|&&b| b == b'\n').count();
        line.clear();
        return removed;
    }

    // Keep whatever trailing spaces belong to the last non-blank line.
    let keep = bytes[end..]
        .iter()
        .position(|&b| is_line_end_char(b))
        .map_or(bytes.len(), |p| end + p);

    let removed = bytes[keep..].iter().filter(|&&b| b == b'\n').count();
    line.truncate(keep);
    removed.saturating_sub(1)
}

pub fn is_line_end_char(ch: u8) -> bool {
    matches!(ch, 10 | 13)
}

pub fn is_space_or_tab(ch: u8) -> bool {
    matches!(ch, 9 | 32)
}

/// Removes an ATX closing sequence: a run of `#` preceded by a space or tab
/// (or making up the whole line).
pub fn chop_trailing_hashes(line: &str) -> &str {
    let line = rtrim_slice(line);
    let bytes = line.as_bytes();

    let mut n = bytes.len();
    while n > 0 && bytes[n - 1] == b'#' {
        n -= 1;
    }

    if n == bytes.len() {
        line
    } else if n == 0 {
        ""
    } else if is_space_or_tab(bytes[n - 1]) {
        rtrim_slice(&line[..n])
    } else {
        line
    }
}

pub fn ltrim_slice(i: &str) -> &str {
    i.trim_start_matches(|c: char| c.is_ascii() && isspace(c as u8))
}

pub fn rtrim_slice(i: &str) -> &str {
    i.trim_end_matches(|c: char| c.is_ascii() && isspace(c as u8))
}

pub fn trim_slice(i: &str) -> &str {
    rtrim_slice(ltrim_slice(i))
}

pub fn remove_from_start(s: &mut String, n: usize) {
    s.drain(..n);
}

pub fn clean_url(url: &str) -> String {
    let url = trim_slice(url);
    if url.is_empty() {
        return String::new();
    }

    let mut b = entity::unescape_html(url).into_owned();
    unescape(&mut b);
    b
}

pub fn clean_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let bytes = title.as_bytes();
    let first = bytes[0];
    let last = bytes[bytes.len() - 1];

    let mut b = if title.len() >= 2
        && ((first == b'\'' && last == b'\'')
            || (first == b'(' && last == b')')
            || (first == b'"' && last == b'"'))
    {
        entity::unescape_html(&title[1..title.len() - 1]).into_owned()
    } else {
        entity::unescape_html(title).into_owned()
    };

    unescape(&mut b);
    b
}

pub fn is_blank(s: &str) -> bool {
    s.bytes()
        .all(|c| matches!(c, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Label matching is case-insensitive under Unicode case folding, ignores
/// leading and trailing whitespace, and treats internal whitespace runs as a
/// single space.
pub fn normalize_label(i: &str) -> String {
    let i = trim_slice(i);

    let mut v = String::with_capacity(i.len());
    let mut last_was_whitespace = false;
    for c in i.chars() {
        if c.is_whitespace() {
            if !last_was_whitespace {
                last_was_whitespace = true;
                v.push(' ');
            }
        } else {
            last_was_whitespace = false;
            v.push(c);
        }
    }
    caseless::default_case_fold_str(&v)
}
