//! Byte classification, ASCII only.

pub fn isspace(ch: u8) -> bool {
    matches!(ch, b'\t' | b'\n' | 0x0b | 0x0c | b'\r' | b' ')
}

pub fn ispunct(ch: u8) -> bool {
    ch.is_ascii_punctuation()
}

pub fn isdigit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

pub fn isxdigit(ch: u8) -> bool {
    ch.is_ascii_hexdigit()
}

pub fn isalpha(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn isalnum(ch: u8) -> bool {
    ch.is_ascii_alphanumeric()
}
