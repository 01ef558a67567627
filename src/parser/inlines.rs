//! Inline parsing.  The content of every paragraph and heading is scanned
//! once, left to right, into spans and emphasis delimiters; the spans are
//! then rebuilt into a sequence of [`Inline`]s.

mod delimiters;
mod spans;

use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::debug;
use unicode_categories::UnicodeCategories;

use crate::arena::{Arena, NodeId};
use crate::ctype::ispunct;
use crate::entity;
use crate::lexer::Cursor;
use crate::nodes::{Ast, Inline, NodeCode, NodeLink};
use crate::parser::links::{self, RefMap, MAX_LINK_LABEL_LENGTH};
use crate::parser::{AutolinkType, Options};
use crate::scanners;
use crate::strings;

use self::delimiters::DelimiterList;
use self::spans::{Span, SpanKind};

const MAXBACKTICKS: usize = 80;

/// Parses the inline content of every leaf under `root`.  Leaves are
/// independent of each other once definitions are known, so they are
/// handled in parallel; results are written back on this thread.
#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn process_inlines(
    arena: &mut Arena<Ast>,
    root: NodeId,
    refmap: &RefMap,
    options: &Options,
) {
    let leaves: Vec<NodeId> = arena
        .descendants(root)
        .filter(|&node| arena.get(node).value.contains_inlines())
        .collect();
    debug!(leaves = leaves.len(), "parsing inlines");

    let parsed: Vec<(NodeId, Vec<Inline>)> = {
        let arena = &*arena;
        leaves
            .par_iter()
            .map(|&leaf| {
                let inlines = parse_inlines(arena.get(leaf).content(), refmap, options);
                (leaf, inlines)
            })
            .collect()
    };

    for (leaf, inlines) in parsed {
        arena.get_mut(leaf).inlines = inlines;
    }
}

pub(crate) fn parse_inlines(content: &str, refmap: &RefMap, options: &Options) -> Vec<Inline> {
    let mut subj = Subject::new(strings::rtrim_slice(content), refmap, options);
    while subj.parse_inline() {}
    subj.delimiters.process_emphasis(0, &mut subj.spans);
    spans::reconstruct(subj.input, subj.spans)
}

#[derive(Debug, Clone, Copy)]
struct Bracket {
    /// Where the `[` or `![` starts.
    position: usize,
    text_start: usize,
    image: bool,
    active: bool,
    bracket_after: bool,
    /// Delimiters from this index on were pushed inside the brackets.
    delim_bottom: usize,
    /// Spans from this index on were pushed inside the brackets.
    span_mark: usize,
}

struct Subject<'i, 'r> {
    input: &'i str,
    cursor: Cursor<'i>,
    refmap: &'r RefMap,
    spans: Vec<Span>,
    delimiters: DelimiterList,
    brackets: SmallVec<[Bracket; 8]>,
    backticks: [usize; MAXBACKTICKS + 1],
    scanned_for_backticks: bool,
    special_chars: [bool; 256],
    emph_chars: [bool; 256],
}

impl<'i, 'r> Subject<'i, 'r> {
    fn new(input: &'i str, refmap: &'r RefMap, options: &Options) -> Self {
        let mut special_chars = [false; 256];
        for &c in b"\n`\\&<[]!*_" {
            special_chars[c as usize] = true;
        }
        let mut emph_chars = [false; 256];
        emph_chars[b'*' as usize] = true;
        emph_chars[b'_' as usize] = true;
        for c in options.parse.extra_delimiters() {
            special_chars[c as usize] = true;
            emph_chars[c as usize] = true;
        }

        Subject {
            input,
            cursor: Cursor::new(input),
            refmap,
            spans: Vec::new(),
            delimiters: DelimiterList::new(),
            brackets: SmallVec::new(),
            backticks: [0; MAXBACKTICKS + 1],
            scanned_for_backticks: false,
            special_chars,
            emph_chars,
        }
    }

    fn parse_inline(&mut self) -> bool {
        let Some(c) = self.cursor.peek() else {
            return false;
        };

        match c {
            b'\n' => self.handle_newline(),
            b'`' => self.handle_backticks(),
            b'\\' => self.handle_backslash(),
            b'&' => self.handle_entity(),
            b'<' => self.handle_pointy_brace(),
            b'[' => {
                let pos = self.cursor.pos;
                self.push_bracket(false, pos, pos + 1);
                self.cursor.advance(1);
            }
            b'!' => {
                let pos = self.cursor.pos;
                if self.cursor.peek_n(1) == Some(b'[') {
                    self.push_bracket(true, pos, pos + 2);
                    self.cursor.advance(2);
                } else {
                    self.cursor.advance(1);
                }
            }
            b']' => self.handle_close_bracket(),
            c if self.emph_chars[c as usize] => self.handle_delim(c),
            _ => {
                let endpos = self.find_special_char();
                self.cursor.restore(endpos);
            }
        }

        true
    }

    fn push_span(&mut self, start: usize, kind: SpanKind) {
        self.spans.push(Span::new(start, self.cursor.pos, kind));
    }

    fn find_special_char(&self) -> usize {
        let bytes = self.cursor.bytes();
        (self.cursor.pos + 1..bytes.len())
            .find(|&n| self.special_chars[bytes[n] as usize])
            .unwrap_or(bytes.len())
    }

    fn handle_newline(&mut self) {
        let nlpos = self.cursor.pos;
        let floor = self.spans.last().map_or(0, |span| span.end);
        let trailing = self.cursor.reverse_while(floor, |b| b == b' ');
        let start = self.cursor.pos;

        self.cursor.restore(nlpos + 1);
        self.cursor.skip_spaces();
        let kind = if trailing >= 2 {
            SpanKind::LineBreak
        } else {
            SpanKind::SoftBreak
        };
        self.push_span(start, kind);
    }

    fn handle_backslash(&mut self) {
        let start = self.cursor.pos;
        self.cursor.advance(1);

        match self.cursor.peek() {
            Some(c) if ispunct(c) => {
                self.cursor.advance(1);
                self.push_span(start, SpanKind::Escaped(c as char));
            }
            Some(b'\n') => {
                self.cursor.advance(1);
                self.cursor.skip_spaces();
                self.push_span(start, SpanKind::LineBreak);
            }
            _ => (),
        }
    }

    fn handle_entity(&mut self) {
        let start = self.cursor.pos;
        self.cursor.advance(1);

        if let Some((text, consumed)) = entity::unescape(self.cursor.rest()) {
            self.cursor.advance(consumed);
            self.push_span(start, SpanKind::Entity(text.into_owned()));
        }
    }

    fn handle_backticks(&mut self) {
        let startpos = self.cursor.pos;
        let openticks = self.cursor.take_while_byte(b'`');
        let afteropen = self.cursor.pos;

        match self.scan_to_closing_backtick(openticks) {
            None => self.cursor.restore(afteropen),
            Some(endpos) => {
                let literal = strings::normalize_code(&self.input[afteropen..endpos - openticks]);
                self.push_span(
                    startpos,
                    SpanKind::Code(NodeCode {
                        num_backticks: openticks,
                        literal,
                    }),
                );
            }
        }
    }

    // Remembers where the last run of each length was seen, so a subject
    // full of unmatched backticks is only scanned to the end once.
    fn scan_to_closing_backtick(&mut self, openticklength: usize) -> Option<usize> {
        if openticklength > MAXBACKTICKS {
            return None;
        }
        if self.scanned_for_backticks && self.backticks[openticklength] <= self.cursor.pos {
            return None;
        }

        loop {
            self.cursor.advance_while(|c| c != b'`');
            if self.cursor.eof() {
                self.scanned_for_backticks = true;
                return None;
            }
            let numticks = self.cursor.take_while_byte(b'`');
            if numticks <= MAXBACKTICKS {
                self.backticks[numticks] = self.cursor.pos - numticks;
            }
            if numticks == openticklength {
                return Some(self.cursor.pos);
            }
        }
    }

    fn handle_pointy_brace(&mut self) {
        let start = self.cursor.pos;
        self.cursor.advance(1);
        let rest = self.cursor.rest();

        if let Some(matchlen) = scanners::autolink_uri(rest) {
            self.push_autolink(start, &rest[..matchlen - 1], matchlen, AutolinkType::Uri);
        } else if let Some(matchlen) = scanners::autolink_email(rest) {
            self.push_autolink(start, &rest[..matchlen - 1], matchlen, AutolinkType::Email);
        } else if let Some(matchlen) = scanners::html_tag(rest) {
            self.cursor.advance(matchlen);
            let raw = self.input[start..self.cursor.pos].to_string();
            self.push_span(start, SpanKind::HtmlInline(raw));
        }
    }

    fn push_autolink(&mut self, start: usize, inner: &str, matchlen: usize, kind: AutolinkType) {
        let link = NodeLink {
            url: strings::clean_autolink(inner, kind),
            title: String::new(),
        };
        let text = entity::unescape_html(inner).into_owned();
        self.cursor.advance(matchlen);
        self.push_span(start, SpanKind::Autolink { link, text });
    }

    fn handle_delim(&mut self, c: u8) {
        let position = self.cursor.pos;
        let (numdelims, can_open, can_close) = self.scan_delims(c);
        if can_open || can_close {
            self.delimiters
                .push(position, numdelims, c, can_open, can_close);
        }
    }

    fn scan_delims(&mut self, c: u8) -> (usize, bool, bool) {
        let before_char = self.input[..self.cursor.pos]
            .chars()
            .next_back()
            .unwrap_or('\n');
        let numdelims = self.cursor.take_while_byte(c);
        let after_char = self.cursor.rest().chars().next().unwrap_or('\n');

        let left_flanking = !after_char.is_whitespace()
            && (!is_punctuation(after_char)
                || before_char.is_whitespace()
                || is_punctuation(before_char));
        let right_flanking = !before_char.is_whitespace()
            && (!is_punctuation(before_char)
                || after_char.is_whitespace()
                || is_punctuation(after_char));

        if c == b'_' {
            (
                numdelims,
                left_flanking && (!right_flanking || is_punctuation(before_char)),
                right_flanking && (!left_flanking || is_punctuation(after_char)),
            )
        } else {
            (numdelims, left_flanking, right_flanking)
        }
    }

    fn push_bracket(&mut self, image: bool, position: usize, text_start: usize) {
        if let Some(last) = self.brackets.last_mut() {
            last.bracket_after = true;
        }
        self.brackets.push(Bracket {
            position,
            text_start,
            image,
            active: true,
            bracket_after: false,
            delim_bottom: self.delimiters.next_index(),
            span_mark: self.spans.len(),
        });
    }

    fn handle_close_bracket(&mut self) {
        let close = self.cursor.pos;
        self.cursor.advance(1);
        let after = self.cursor.pos;

        let Some(opener) = self.brackets.last().copied() else {
            return;
        };
        if !opener.active {
            self.brackets.pop();
            return;
        }

        let found = self
            .scan_inline_link(after)
            .or_else(|| self.scan_reference(after, &opener, close));
        let Some((link, end)) = found else {
            self.brackets.pop();
            self.cursor.restore(after);
            return;
        };
        self.cursor.restore(end);

        self.delimiters
            .process_emphasis(opener.delim_bottom, &mut self.spans);
        let mut nested = self.spans.split_off(opener.span_mark);
        for span in &mut nested {
            span.shift_back(opener.text_start);
        }
        self.spans.push(Span::new(
            opener.position,
            end,
            SpanKind::Link {
                image: opener.image,
                link,
                text_start: opener.text_start,
                text_end: close,
                nested,
            },
        ));
        self.brackets.pop();

        // Links may not contain other links.  Brackets below an inactive
        // one were deactivated along with it.
        if !opener.image {
            for bracket in self.brackets.iter_mut().rev().filter(|b| !b.image) {
                if !bracket.active {
                    break;
                }
                bracket.active = false;
            }
        }
    }

    /// `(destination "title")` right after the `]`.
    fn scan_inline_link(&self, after: usize) -> Option<(NodeLink, usize)> {
        let input = self.input;
        if input.as_bytes().get(after) != Some(&b'(') {
            return None;
        }

        let starturl = after + 1 + scanners::spacechars(&input[after + 1..]).unwrap_or(0);
        let (url, n) = links::manual_scan_link_url(&input[starturl..])?;
        let endurl = starturl + n;

        let starttitle = endurl + scanners::spacechars(&input[endurl..]).unwrap_or(0);
        let endtitle = if starttitle == endurl {
            starttitle
        } else {
            starttitle + scanners::link_title(&input[starttitle..]).unwrap_or(0)
        };
        let endall = endtitle + scanners::spacechars(&input[endtitle..]).unwrap_or(0);

        if input.as_bytes().get(endall) != Some(&b')') {
            return None;
        }

        Some((
            NodeLink {
                url: strings::clean_url(url),
                title: strings::clean_title(&input[starttitle..endtitle]),
            },
            endall + 1,
        ))
    }

    /// A full, collapsed or shortcut reference to a known definition.
    fn scan_reference(&self, after: usize, opener: &Bracket, close: usize) -> Option<(NodeLink, usize)> {
        let mut cursor = Cursor::new(self.input);
        cursor.restore(after);

        let text = &self.input[opener.text_start..close];
        let (label, end) = match cursor.link_label(MAX_LINK_LABEL_LENGTH) {
            Some(lab) if !lab.is_empty() => (lab, cursor.pos),
            Some(_) if !opener.bracket_after => (text, cursor.pos),
            None if !opener.bracket_after => (text, after),
            _ => return None,
        };
        if label.len() > MAX_LINK_LABEL_LENGTH {
            return None;
        }

        let reference = self.refmap.get(&strings::normalize_label(label))?;
        Some((
            NodeLink {
                url: reference.url.clone(),
                title: reference.title.clone(),
            },
            end,
        ))
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_punctuation() || c.is_symbol()
}
