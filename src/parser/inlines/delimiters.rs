//! The emphasis delimiter list and its resolution.

use rustc_hash::FxHashMap;

use super::spans::{Span, SpanKind};

/// A run of one emphasis character.  Matching eats the opener from its
/// inner (right) end and the closer from its inner (left) end.
#[derive(Debug, Clone)]
struct Delimiter {
    position: usize,
    // First character of the closer side not yet matched.
    start: usize,
    len: usize,
    orig_len: usize,
    delim_char: u8,
    can_open: bool,
    can_close: bool,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked through indices into `delimiters`; removed entries stay in
/// the vector but are unlinked.  Indices grow with position, so "above a
/// bottom" is simply an index comparison.
#[derive(Debug, Default)]
pub(crate) struct DelimiterList {
    delimiters: Vec<Delimiter>,
    last: Option<usize>,
}

impl DelimiterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index the next pushed delimiter will get.
    pub fn next_index(&self) -> usize {
        self.delimiters.len()
    }

    pub fn push(
        &mut self,
        position: usize,
        len: usize,
        delim_char: u8,
        can_open: bool,
        can_close: bool,
    ) {
        let ix = self.delimiters.len();
        if let Some(last) = self.last {
            self.delimiters[last].next = Some(ix);
        }
        self.delimiters.push(Delimiter {
            position,
            start: position,
            len,
            orig_len: len,
            delim_char,
            can_open,
            can_close,
            prev: self.last,
            next: None,
        });
        self.last = Some(ix);
    }

    fn remove(&mut self, ix: usize) {
        let (prev, next) = {
            let d = &self.delimiters[ix];
            (d.prev, d.next)
        };
        match next {
            Some(next) => self.delimiters[next].prev = prev,
            None => self.last = prev,
        }
        if let Some(prev) = prev {
            self.delimiters[prev].next = next;
        }
    }

    fn remove_above(&mut self, stack_bottom: usize) {
        while let Some(last) = self.last.filter(|&l| l >= stack_bottom) {
            self.remove(last);
        }
    }

    /// Pairs up the delimiters above `stack_bottom`, pushing an emphasis span
    /// for every match, then drops them all from the list.
    pub fn process_emphasis(&mut self, stack_bottom: usize, spans: &mut Vec<Span>) {
        // (character, closer can open, closer length mod 3) -> lowest index
        // worth searching for an opener.
        let mut openers_bottom: FxHashMap<(u8, bool, usize), usize> = FxHashMap::default();

        let mut candidate = self.last;
        let mut closer = None;
        while let Some(c) = candidate.filter(|&c| c >= stack_bottom) {
            closer = Some(c);
            candidate = self.delimiters[c].prev;
        }

        while let Some(c) = closer {
            let cd = &self.delimiters[c];
            if !cd.can_close {
                closer = cd.next;
                continue;
            }

            let key = (cd.delim_char, cd.can_open, cd.orig_len % 3);
            let bottom = openers_bottom
                .get(&key)
                .copied()
                .unwrap_or(stack_bottom)
                .max(stack_bottom);

            let mut opener = cd.prev;
            let mut opener_found = None;
            let mut mod_three_rule_invoked = false;

            while let Some(o) = opener.filter(|&o| o >= bottom) {
                let od = &self.delimiters[o];
                if od.can_open && od.delim_char == cd.delim_char {
                    let odd_match = (cd.can_open || od.can_close)
                        && (od.orig_len + cd.orig_len) % 3 == 0
                        && !(od.orig_len % 3 == 0 && cd.orig_len % 3 == 0);
                    if !odd_match {
                        opener_found = Some(o);
                        break;
                    }
                    mod_three_rule_invoked = true;
                }
                opener = od.prev;
            }

            match opener_found {
                Some(o) => closer = self.insert_emph(o, c, spans),
                None => {
                    closer = self.delimiters[c].next;
                    if !mod_three_rule_invoked {
                        openers_bottom.insert(key, c);
                    }
                    if !self.delimiters[c].can_open {
                        self.remove(c);
                    }
                }
            }
        }

        self.remove_above(stack_bottom);
    }

    /// Records emphasis between `opener` and `closer`.  Returns the closer
    /// to continue from.
    fn insert_emph(&mut self, opener: usize, closer: usize, spans: &mut Vec<Span>) -> Option<usize> {
        let use_delims = if self.delimiters[closer].len >= 2 && self.delimiters[opener].len >= 2 {
            2
        } else {
            1
        };

        let od = &mut self.delimiters[opener];
        od.len -= use_delims;
        let span_start = od.position + od.len;
        let delim_char = od.delim_char;

        let cd = &mut self.delimiters[closer];
        let span_end = cd.start + use_delims;
        cd.start += use_delims;
        cd.len -= use_delims;

        spans.push(Span::new(
            span_start,
            span_end,
            SpanKind::Emph {
                strong: use_delims == 2,
                delim: delim_char as char,
            },
        ));

        let mut between = self.delimiters[closer].prev;
        while let Some(d) = between.filter(|&d| d != opener) {
            self.remove(d);
            between = self.delimiters[d].prev;
        }

        if self.delimiters[opener].len == 0 {
            self.remove(opener);
        }

        if self.delimiters[closer].len == 0 {
            let next = self.delimiters[closer].next;
            self.remove(closer);
            next
        } else {
            Some(closer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(runs: &[(usize, usize, bool, bool)]) -> Vec<(usize, usize, bool)> {
        let mut list = DelimiterList::new();
        for &(position, len, can_open, can_close) in runs {
            list.push(position, len, b'*', can_open, can_close);
        }
        let mut spans = Vec::new();
        list.process_emphasis(0, &mut spans);
        let mut out: Vec<_> = spans
            .into_iter()
            .map(|s| match s.kind {
                SpanKind::Emph { strong, .. } => (s.start, s.end, strong),
                _ => unreachable!(),
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn triple_run_nests_em_outside_strong() {
        // ***a***
        assert_eq!(
            resolved(&[(0, 3, true, false), (4, 3, false, true)]),
            [(0, 7, false), (1, 6, true)]
        );
    }

    #[test]
    fn closer_spans_two_openers() {
        // *a **b***
        assert_eq!(
            resolved(&[(0, 1, true, false), (3, 2, true, false), (6, 3, false, true)]),
            [(0, 9, false), (3, 8, true)]
        );
    }

    #[test]
    fn multiple_of_three_rule() {
        // *a**b*  the middle run both opens and closes: 1 + 2 is rejected.
        assert_eq!(
            resolved(&[(0, 1, true, false), (2, 2, true, true), (5, 1, false, true)]),
            [(0, 6, false)]
        );
        // ***a** : 3 + 2 pairs.
        assert_eq!(
            resolved(&[(0, 3, true, false), (4, 2, false, true)]),
            [(1, 6, true)]
        );
    }

    #[test]
    fn bottom_is_respected() {
        let mut list = DelimiterList::new();
        list.push(0, 1, b'*', true, false);
        let bottom = list.next_index();
        list.push(3, 1, b'*', false, true);
        let mut spans = Vec::new();
        list.process_emphasis(bottom, &mut spans);
        assert!(spans.is_empty());
    }
}
