//! Located spans, and the rebuilding of an inline sequence from them.
//!
//! Scanning never builds nodes directly: every recognized construct is
//! recorded as a span over the subject. Whatever no span covers is text.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::nodes::{Container, Inline, NodeCode, NodeLink};

#[derive(Debug, Clone)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

#[derive(Debug, Clone)]
pub(crate) enum SpanKind {
    Code(NodeCode),
    Escaped(char),
    Entity(String),
    Autolink {
        link: NodeLink,
        text: String,
    },
    HtmlInline(String),
    SoftBreak,
    LineBreak,
    /// The delimiters are the first and last one or two characters of the
    /// span.
    Emph {
        strong: bool,
        delim: char,
    },
    /// `nested` holds the spans found inside the link text, positioned
    /// relative to `text_start`; they rejoin the queue when the link is
    /// reached.
    Link {
        image: bool,
        link: NodeLink,
        text_start: usize,
        text_end: usize,
        nested: Vec<Span>,
    },
}

impl Span {
    pub fn new(start: usize, end: usize, kind: SpanKind) -> Self {
        debug_assert!(start <= end);
        Span { start, end, kind }
    }

    /// Moves the span `by` bytes towards the start of the subject.
    pub fn shift_back(&mut self, by: usize) {
        self.start -= by;
        self.end -= by;
        if let SpanKind::Link {
            ref mut text_start,
            ref mut text_end,
            ..
        } = self.kind
        {
            *text_start -= by;
            *text_end -= by;
        }
    }

    /// Undoes [`Span::shift_back`].
    pub fn shift_forward(&mut self, by: usize) {
        self.start += by;
        self.end += by;
        if let SpanKind::Link {
            ref mut text_start,
            ref mut text_end,
            ..
        } = self.kind
        {
            *text_start += by;
            *text_end += by;
        }
    }
}

// Spans come off the heap in order of their start; of two spans starting at
// the same place, the longer one encloses the other and comes first.
impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .start
            .cmp(&self.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Span {}

/// Turns `input` and the spans found in it into inline nodes.
pub(crate) fn reconstruct(input: &str, spans: Vec<Span>) -> Vec<Inline> {
    let mut heap: BinaryHeap<Span> = spans.into_iter().collect();
    let mut out = Vec::new();
    // Containers entered and not yet left, innermost last.
    let mut open: Vec<Frame> = Vec::new();
    let mut pos = 0;

    loop {
        let limit = open.last().map_or(input.len(), |frame| frame.content_end);
        let inside = heap.peek().map_or(false, |top| top.start < limit);
        let span = if inside { heap.pop() } else { None };

        let Some(span) = span else {
            push_text(&mut out, &input[pos..limit]);
            match open.pop() {
                Some(frame) => {
                    out.push(Inline::End);
                    pos = frame.resume;
                    continue;
                }
                None => break,
            }
        };

        if span.start < pos {
            debug_assert!(false, "overlapping span at {}..{}", span.start, span.end);
            continue;
        }

        push_text(&mut out, &input[pos..span.start]);
        pos = span.end;

        match span.kind {
            SpanKind::Code(code) => out.push(Inline::Code(code)),
            SpanKind::Escaped(c) => out.push(Inline::Escaped(c)),
            SpanKind::Entity(text) => out.push(Inline::Entity(text)),
            SpanKind::Autolink { link, text } => out.push(Inline::Autolink { link, text }),
            SpanKind::HtmlInline(raw) => out.push(Inline::HtmlInline(raw)),
            SpanKind::SoftBreak => out.push(Inline::SoftBreak),
            SpanKind::LineBreak => out.push(Inline::LineBreak),
            SpanKind::Emph { strong, delim } => {
                let width = if strong { 2 } else { 1 };
                out.push(Inline::Start(Container::Emph { strong, delim }));
                open.push(Frame {
                    content_end: span.end - width,
                    resume: span.end,
                });
                pos = span.start + width;
            }
            SpanKind::Link {
                image,
                link,
                text_start,
                text_end,
                nested,
            } => {
                // Back into this frame's coordinates.
                for mut inner in nested {
                    inner.shift_forward(text_start);
                    heap.push(inner);
                }
                out.push(Inline::Start(if image {
                    Container::Image(link)
                } else {
                    Container::Link(link)
                }));
                open.push(Frame {
                    content_end: text_end,
                    resume: span.end,
                });
                pos = text_start;
            }
        }
    }

    debug_assert!(heap.is_empty(), "{} spans outside the subject", heap.len());
    out
}

struct Frame {
    content_end: usize,
    resume: usize,
}

fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Inline::Text(text.to_string()));
    }
}
