//! A byte cursor over a string slice.
//!
//! Both the inline engine and the link reference definition parser walk
//! their input with a [`Cursor`]: peek, advance by predicate, back up, and
//! cut substrings out by saved positions.

use crate::ctype::ispunct;

#[derive(Debug, Clone)]
pub struct Cursor<'i> {
    input: &'i str,
    pub pos: usize,
}

impl<'i> Cursor<'i> {
    pub fn new(input: &'i str) -> Self {
        Cursor { input, pos: 0 }
    }

    #[inline]
    pub fn bytes(&self) -> &'i [u8] {
        self.input.as_bytes()
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.peek_n(0)
    }

    #[inline]
    pub fn peek_n(&self, n: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + n).copied()
    }

    /// The byte just behind the cursor.
    #[inline]
    pub fn peek_back(&self) -> Option<u8> {
        self.pos
            .checked_sub(1)
            .and_then(|p| self.input.as_bytes().get(p).copied())
    }

    /// The remainder of the input from the cursor.
    #[inline]
    pub fn rest(&self) -> &'i str {
        &self.input[self.pos.min(self.input.len())..]
    }

    #[inline]
    pub fn slice(&self, from: usize, to: usize) -> &'i str {
        &self.input[from..to]
    }

    #[inline]
    pub fn save(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn restore(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Moves forward while `pred` holds; returns the number of bytes passed.
    pub fn advance_while<F>(&mut self, pred: F) -> usize
    where
        F: Fn(u8) -> bool,
    {
        let start = self.pos;
        while self.peek().map_or(false, &pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Moves backward while the byte behind the cursor satisfies `pred`, never
    /// past `floor`.
    pub fn reverse_while<F>(&mut self, floor: usize, pred: F) -> usize
    where
        F: Fn(u8) -> bool,
    {
        let start = self.pos;
        while self.pos > floor && self.peek_back().map_or(false, &pred) {
            self.pos -= 1;
        }
        start - self.pos
    }

    pub fn take_while_byte(&mut self, c: u8) -> usize {
        self.advance_while(|b| b == c)
    }

    pub fn skip_spaces(&mut self) -> bool {
        self.advance_while(|c| c == b' ' || c == b'\t') > 0
    }

    /// Consumes a line ending if one is next. Also reports success at the end
    /// of input.
    pub fn skip_line_end(&mut self) -> bool {
        let old_pos = self.pos;
        if self.peek() == Some(b'\r') {
            self.pos += 1;
        }
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
        self.pos > old_pos || self.eof()
    }

    /// Spaces, then at most one line ending, then spaces.
    pub fn spnl(&mut self) {
        self.skip_spaces();
        if self.skip_line_end() {
            self.skip_spaces();
        }
    }

    /// Scans a link label starting at `[`. Returns the raw label text, trimmed,
    /// on success; restores the cursor on failure.
    pub fn link_label(&mut self, max_length: usize) -> Option<&'i str> {
        let startpos = self.pos;

        if self.peek() != Some(b'[') {
            return None;
        }
        self.pos += 1;

        let mut length = 0;
        while let Some(c) = self.peek() {
            if c == b'[' || c == b']' {
                break;
            }
            if c == b'\\' {
                self.pos += 1;
                length += 1;
                if self.peek().map_or(false, ispunct) {
                    self.pos += 1;
                    length += 1;
                }
            } else {
                self.pos += 1;
                length += 1;
            }
            if length > max_length {
                self.pos = startpos;
                return None;
            }
        }

        if self.peek() == Some(b']') {
            let raw = crate::strings::trim_slice(&self.input[startpos + 1..self.pos]);
            self.pos += 1;
            Some(raw)
        } else {
            self.pos = startpos;
            None
        }
    }
}
