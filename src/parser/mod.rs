//! The block-structure engine.
//!
//! Lines are fed one at a time. Each line walks the open spine from the
//! root, opens whatever new blocks it starts, and finally lands as text in
//! the deepest block that takes it. Once the input is exhausted the tree is
//! normalized, then every leaf's inline content is parsed.

mod inlines;
mod links;
mod normalize;
pub mod options;

use std::borrow::Cow;
use std::cmp::min;
use std::mem;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::arena::{Arena, NodeId};
use crate::ctype::{isdigit, isspace};
use crate::entity;
use crate::nodes::{
    can_contain_type, Ast, Document, ListDelimType, ListType, NodeCodeBlock, NodeHeading,
    NodeHtmlBlock, NodeList, NodeParagraph, NodeValue,
};
use crate::scanners::{self, SetextChar};
use crate::strings;

pub use self::links::{RefMap, ResolvedReference};
pub use self::options::{Options, ParseOptions, RenderOptions};

const TAB_STOP: usize = 4;
const CODE_INDENT: usize = 4;

// Very deeply nested lists can cause quadratic performance issues.
// This constant is used in open_new_blocks() to limit the nesting
// depth. It is unlikely that a non-contrived markdown document will
// be nested this deeply.
const MAX_LIST_DEPTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AutolinkType {
    Uri,
    Email,
}

/// Parse a Markdown document to a [`Document`].
///
/// Lines may end in `\n`, `\r\n` or `\r`.
#[tracing::instrument(level = "debug", skip_all, fields(len = md.len()))]
pub fn parse_document(md: &str, options: &Options) -> Document {
    let md = md.strip_prefix('\u{feff}').unwrap_or(md);
    let sb = md.as_bytes();
    let end = sb.len();

    let mut parser = Parser::new(options);
    let matcher = jetscii::bytes!(b'\r', b'\n');
    let mut ix = 0;

    while ix < end {
        let (eol, next) = match matcher.find(&sb[ix..]) {
            Some(offset) => {
                let eol = ix + offset;
                if sb[eol] == b'\r' && sb.get(eol + 1) == Some(&b'\n') {
                    (eol, eol + 2)
                } else {
                    (eol, eol + 1)
                }
            }
            None => (end, end),
        };

        parser.feed(&md[ix..eol]);
        ix = next;
    }

    parser.finish()
}

/// Parse a document given as a sequence of lines, with their terminators
/// already stripped.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_lines<I, S>(lines: I, options: &Options) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = Parser::new(options);
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}

pub(crate) struct Parser<'o> {
    arena: Arena<Ast>,
    options: &'o Options,
    root: NodeId,
    current: NodeId,
    line_number: usize,
    offset: usize,
    column: usize,
    first_nonspace: usize,
    first_nonspace_column: usize,
    indent: usize,
    blank: bool,
    partially_consumed_tab: bool,
}

impl<'o> Parser<'o> {
    pub(crate) fn new(options: &'o Options) -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(Ast::new(NodeValue::Document, 0));
        Parser {
            arena,
            options,
            root,
            current: root,
            line_number: 0,
            offset: 0,
            column: 0,
            first_nonspace: 0,
            first_nonspace_column: 0,
            indent: 0,
            blank: false,
            partially_consumed_tab: false,
        }
    }

    /// Feeds one line, without its terminator.
    pub(crate) fn feed(&mut self, line: &str) {
        let line = if line.contains('\0') {
            Cow::Owned(line.replace('\0', "\u{fffd}"))
        } else {
            Cow::Borrowed(line)
        };
        self.process_line(&line);
    }

    /// Closes everything still open, normalizes the tree and resolves
    /// inlines.
    pub(crate) fn finish(mut self) -> Document {
        while self.current != self.root {
            self.current = self.finalize(self.current).unwrap_or(self.root);
        }
        self.finalize(self.root);

        debug!(
            lines = self.line_number,
            nodes = self.arena.len(),
            "block structure complete"
        );

        let refmap = Arc::new(normalize::normalize(&mut self.arena, self.root));
        inlines::process_inlines(&mut self.arena, self.root, &refmap, self.options);

        Document {
            arena: self.arena,
            root: self.root,
            refmap,
        }
    }

    fn process_line(&mut self, line: &str) {
        self.offset = 0;
        self.column = 0;
        self.first_nonspace = 0;
        self.first_nonspace_column = 0;
        self.indent = 0;
        self.blank = false;
        self.partially_consumed_tab = false;

        self.line_number += 1;

        if let Some((last_matched_container, all_matched)) = self.check_open_blocks(line) {
            trace!(
                line = self.line_number,
                all_matched,
                container = ?last_matched_container,
                "checked open blocks"
            );
            let mut container = last_matched_container;
            self.open_new_blocks(&mut container, line);
            self.add_text_to_container(container, last_matched_container, line);
        }
    }

    fn value(&self, node: NodeId) -> &NodeValue {
        &self.arena.get(node).value
    }

    fn is_plain_paragraph(&self, node: NodeId) -> bool {
        matches!(
            self.value(node),
            NodeValue::Paragraph(NodeParagraph { setext: None })
        )
    }

    ///////////////////////
    // Check open blocks //
    ///////////////////////

    /// Returns the deepest open block the line continues, and whether every
    /// open block matched. `None` means the line closed a code fence and has
    /// been used up.
    fn check_open_blocks(&mut self, line: &str) -> Option<(NodeId, bool)> {
        let mut container = self.root;
        let mut all_matched = true;

        while let Some(child) = self
            .arena
            .last_child(container)
            .filter(|&c| self.arena.get(c).open)
        {
            container = child;
            self.find_first_nonspace(line);

            let matched = match self.value(container).clone() {
                NodeValue::BlockQuote => self.parse_block_quote_prefix(line),
                NodeValue::Item(nl) => self.parse_node_item_prefix(line, container, &nl),
                NodeValue::CodeBlock(ncb) => self.parse_code_block_prefix(line, container, &ncb)?,
                NodeValue::HtmlBlock(nhb) => self.parse_html_block_prefix(nhb.block_type),
                NodeValue::Paragraph(NodeParagraph { setext: None }) => !self.blank,
                NodeValue::Paragraph(..) | NodeValue::Heading(..) | NodeValue::ThematicBreak => {
                    false
                }
                NodeValue::Document | NodeValue::List(..) | NodeValue::BlankLine(..) => true,
            };

            if !matched {
                all_matched = false;
                break;
            }
        }

        if !all_matched {
            container = self.arena.parent(container).unwrap_or(self.root);
        }

        Some((container, all_matched))
    }

    fn find_first_nonspace(&mut self, line: &str) {
        let mut chars_to_tab = TAB_STOP - (self.column % TAB_STOP);
        let bytes = line.as_bytes();

        if self.first_nonspace <= self.offset {
            self.first_nonspace = self.offset;
            self.first_nonspace_column = self.column;

            loop {
                match bytes.get(self.first_nonspace) {
                    Some(b' ') => {
                        self.first_nonspace += 1;
                        self.first_nonspace_column += 1;
                        chars_to_tab -= 1;
                        if chars_to_tab == 0 {
                            chars_to_tab = TAB_STOP;
                        }
                    }
                    Some(b'\t') => {
                        self.first_nonspace += 1;
                        self.first_nonspace_column += chars_to_tab;
                        chars_to_tab = TAB_STOP;
                    }
                    _ => break,
                }
            }
        }

        self.indent = self.first_nonspace_column - self.column;
        self.blank = self.first_nonspace >= bytes.len();
    }

    fn parse_block_quote_prefix(&mut self, line: &str) -> bool {
        let bytes = line.as_bytes();
        let indent = self.indent;
        if indent <= 3 && bytes.get(self.first_nonspace) == Some(&b'>') {
            self.advance_offset(line, indent + 1, true);

            if bytes
                .get(self.offset)
                .map_or(false, |&b| strings::is_space_or_tab(b))
            {
                self.advance_offset(line, 1, true);
            }

            return true;
        }

        false
    }

    fn parse_node_item_prefix(&mut self, line: &str, container: NodeId, nl: &NodeList) -> bool {
        if self.indent >= nl.indent() {
            self.advance_offset(line, nl.indent(), true);
            true
        } else if self.blank && self.arena.first_child(container).is_some() {
            let offset = self.first_nonspace - self.offset;
            self.advance_offset(line, offset, false);
            true
        } else {
            false
        }
    }

    fn parse_code_block_prefix(
        &mut self,
        line: &str,
        container: NodeId,
        ncb: &NodeCodeBlock,
    ) -> Option<bool> {
        if !ncb.fenced {
            if self.indent >= CODE_INDENT {
                self.advance_offset(line, CODE_INDENT, true);
                return Some(true);
            } else if self.blank {
                let offset = self.first_nonspace - self.offset;
                self.advance_offset(line, offset, false);
                return Some(true);
            }
            return Some(false);
        }

        let bytes = line.as_bytes();
        let matched =
            if self.indent <= 3 && bytes.get(self.first_nonspace) == Some(&ncb.fence_char) {
                scanners::close_code_fence(&line[self.first_nonspace..]).unwrap_or(0)
            } else {
                0
            };

        if matched >= ncb.fence_length {
            trace!(line = self.line_number, "closing fence");
            let offset = self.first_nonspace + matched - self.offset;
            self.advance_offset(line, offset, false);
            self.current = self.finalize(container).unwrap_or(self.root);
            return None;
        }

        let mut i = ncb.fence_offset;
        while i > 0
            && bytes
                .get(self.offset)
                .map_or(false, |&b| strings::is_space_or_tab(b))
        {
            self.advance_offset(line, 1, true);
            i -= 1;
        }
        Some(true)
    }

    fn parse_html_block_prefix(&self, t: u8) -> bool {
        match t {
            1..=5 => true,
            6 | 7 => !self.blank,
            _ => unreachable!("html block type {}", t),
        }
    }

    /////////////////////
    // Open new blocks //
    /////////////////////

    fn open_new_blocks(&mut self, container: &mut NodeId, line: &str) {
        let mut maybe_lazy = self.is_plain_paragraph(self.current);
        let mut depth = 0;

        while !matches!(
            self.value(*container),
            NodeValue::CodeBlock(..) | NodeValue::HtmlBlock(..)
        ) {
            depth += 1;
            self.find_first_nonspace(line);
            let indented = self.indent >= CODE_INDENT;

            if !((!indented
                && (self.handle_blockquote(container, line)
                    || self.handle_atx_heading(container, line)
                    || self.handle_code_fence(container, line)
                    || self.handle_html_block(container, line, maybe_lazy)
                    || self.handle_setext_heading(container, line)
                    || self.handle_thematic_break(container, line)))
                || self.handle_list(container, line, indented, depth)
                || self.handle_code_block(container, line, indented, maybe_lazy))
            {
                break;
            }

            if self.value(*container).accepts_lines() {
                break;
            }

            maybe_lazy = false;
        }
    }

    fn handle_blockquote(&mut self, container: &mut NodeId, line: &str) -> bool {
        if line.as_bytes().get(self.first_nonspace) != Some(&b'>') {
            return false;
        }

        let offset = self.first_nonspace + 1 - self.offset;
        self.advance_offset(line, offset, false);
        if line
            .as_bytes()
            .get(self.offset)
            .map_or(false, |&b| strings::is_space_or_tab(b))
        {
            self.advance_offset(line, 1, true);
        }
        *container = self.add_child(*container, NodeValue::BlockQuote);

        true
    }

    fn handle_atx_heading(&mut self, container: &mut NodeId, line: &str) -> bool {
        let Some(matched) = scanners::atx_heading_start(&line[self.first_nonspace..]) else {
            return false;
        };

        let level = line.as_bytes()[self.first_nonspace..]
            .iter()
            .take_while(|&&c| c == b'#')
            .count() as u8;

        let offset = self.first_nonspace + matched - self.offset;
        self.advance_offset(line, offset, false);
        *container = self.add_child(*container, NodeValue::Heading(NodeHeading { level }));

        true
    }

    fn handle_code_fence(&mut self, container: &mut NodeId, line: &str) -> bool {
        let Some(matched) = scanners::open_code_fence(&line[self.first_nonspace..]) else {
            return false;
        };

        let first_nonspace = self.first_nonspace;
        let offset = self.offset;
        let ncb = NodeCodeBlock {
            fenced: true,
            fence_char: line.as_bytes()[first_nonspace],
            fence_length: matched,
            fence_offset: first_nonspace - offset,
            info: String::new(),
            literal: String::new(),
        };
        *container = self.add_child(*container, NodeValue::CodeBlock(ncb));
        self.advance_offset(line, first_nonspace + matched - offset, false);

        true
    }

    fn handle_html_block(&mut self, container: &mut NodeId, line: &str, maybe_lazy: bool) -> bool {
        let rest = &line[self.first_nonspace..];
        let matched = scanners::html_block_start(rest).or_else(|| {
            if !matches!(self.value(*container), NodeValue::Paragraph(..)) && !maybe_lazy {
                scanners::html_block_start_7(rest)
            } else {
                None
            }
        });
        let Some(block_type) = matched else {
            return false;
        };

        let nhb = NodeHtmlBlock {
            block_type: block_type as u8,
            literal: String::new(),
        };
        *container = self.add_child(*container, NodeValue::HtmlBlock(nhb));

        true
    }

    fn handle_setext_heading(&mut self, container: &mut NodeId, line: &str) -> bool {
        if !self.is_plain_paragraph(*container) {
            return false;
        }
        let Some(sc) = scanners::setext_heading_line(&line[self.first_nonspace..]) else {
            return false;
        };

        // A paragraph made only of link reference definitions is no heading;
        // the underline joins it as text instead.
        let ast = self.arena.get_mut(*container);
        if !links::only_reference_definitions(&ast.content) {
            ast.value = NodeValue::Paragraph(NodeParagraph {
                setext: Some(match sc {
                    SetextChar::Equals => 1,
                    SetextChar::Hyphen => 2,
                }),
            });
            let adv = line.len() - self.offset;
            self.advance_offset(line, adv, false);
        }

        true
    }

    fn handle_thematic_break(&mut self, container: &mut NodeId, line: &str) -> bool {
        if scanners::thematic_break(&line[self.first_nonspace..]).is_none() {
            return false;
        }

        *container = self.add_child(*container, NodeValue::ThematicBreak);
        let adv = line.len() - self.offset;
        self.advance_offset(line, adv, false);

        true
    }

    fn handle_list(
        &mut self,
        container: &mut NodeId,
        line: &str,
        indented: bool,
        depth: usize,
    ) -> bool {
        if indented || depth >= MAX_LIST_DEPTH {
            return false;
        }
        let interrupts_paragraph = matches!(self.value(*container), NodeValue::Paragraph(..));
        let Some((matched, mut nl)) =
            parse_list_marker(line, self.first_nonspace, interrupts_paragraph)
        else {
            return false;
        };

        let offset = self.first_nonspace + matched - self.offset;
        self.advance_offset(line, offset, false);
        let (save_partially_consumed_tab, save_offset, save_column) =
            (self.partially_consumed_tab, self.offset, self.column);

        let bytes = line.as_bytes();
        while self.column - save_column <= 5
            && bytes
                .get(self.offset)
                .map_or(false, |&b| strings::is_space_or_tab(b))
        {
            self.advance_offset(line, 1, true);
        }

        let i = self.column - save_column;
        if !(1..5).contains(&i) || self.offset >= bytes.len() {
            nl.padding = matched + 1;
            self.offset = save_offset;
            self.column = save_column;
            self.partially_consumed_tab = save_partially_consumed_tab;
            if i > 0 {
                self.advance_offset(line, 1, true);
            }
        } else {
            nl.padding = matched + i;
        }

        nl.marker_offset = self.indent;

        *container = self.add_child(*container, NodeValue::Item(nl));

        true
    }

    fn handle_code_block(
        &mut self,
        container: &mut NodeId,
        line: &str,
        indented: bool,
        maybe_lazy: bool,
    ) -> bool {
        if !indented || maybe_lazy || self.blank {
            return false;
        }

        self.advance_offset(line, CODE_INDENT, true);
        *container = self.add_child(*container, NodeValue::CodeBlock(NodeCodeBlock::default()));

        true
    }

    fn advance_offset(&mut self, line: &str, mut count: usize, columns: bool) {
        let bytes = line.as_bytes();
        while count > 0 {
            let Some(&b) = bytes.get(self.offset) else {
                break;
            };
            match b {
                b'\t' => {
                    let chars_to_tab = TAB_STOP - (self.column % TAB_STOP);
                    if columns {
                        self.partially_consumed_tab = chars_to_tab > count;
                        let chars_to_advance = min(count, chars_to_tab);
                        self.column += chars_to_advance;
                        if !self.partially_consumed_tab {
                            self.offset += 1;
                        };
                        count -= chars_to_advance;
                    } else {
                        self.partially_consumed_tab = false;
                        self.column += chars_to_tab;
                        self.offset += 1;
                        count -= 1;
                    }
                }
                _ => {
                    self.partially_consumed_tab = false;
                    self.offset += 1;
                    self.column += 1;
                    count -= 1;
                }
            }
        }
    }

    fn add_child(&mut self, mut parent: NodeId, value: NodeValue) -> NodeId {
        while !can_contain_type(self.value(parent), &value) {
            parent = self.finalize(parent).unwrap_or(self.root);
        }

        trace!(line = self.line_number, ?value, "opening block");
        let node = self.arena.alloc(Ast::new(value, self.line_number));
        self.arena.append(parent, node);
        node
    }

    /////////////////
    // Adding text //
    /////////////////

    fn add_text_to_container(
        &mut self,
        mut container: NodeId,
        last_matched_container: NodeId,
        line: &str,
    ) {
        self.find_first_nonspace(line);

        if self.current != last_matched_container
            && container == last_matched_container
            && !self.blank
            && self.is_plain_paragraph(self.current)
        {
            trace!(line = self.line_number, "lazy continuation");
            self.add_line(self.current, line);
            return;
        }

        while self.current != last_matched_container {
            self.current = self.finalize(self.current).unwrap_or(self.root);
        }

        match *self.value(container) {
            NodeValue::CodeBlock(..) => self.add_line(container, line),
            NodeValue::HtmlBlock(ref nhb) => {
                let block_type = nhb.block_type;
                self.add_line(container, line);

                let rest = &line[self.first_nonspace..];
                let matches_end_condition = match block_type {
                    1 => scanners::html_block_end_1(rest),
                    2 => scanners::html_block_end_2(rest),
                    3 => scanners::html_block_end_3(rest),
                    4 => scanners::html_block_end_4(rest),
                    5 => scanners::html_block_end_5(rest),
                    _ => false,
                };

                if matches_end_condition {
                    container = self.finalize(container).unwrap_or(self.root);
                }
            }
            _ if self.blank => self.add_blank_line(container),
            ref value if value.accepts_lines() => {
                let mut line = line;
                if let NodeValue::Heading(..) = value {
                    line = strings::chop_trailing_hashes(line);
                }

                // Chopping the closing sequence can leave the line shorter
                // than `first_nonspace`, as in `###     ###`.  There is no
                // text to add then.
                if self.first_nonspace <= line.len() {
                    let count = self.first_nonspace - self.offset;
                    self.advance_offset(line, count, false);
                    self.add_line(container, line);
                }
            }
            _ => {
                container = self.add_child(
                    container,
                    NodeValue::Paragraph(NodeParagraph::default()),
                );
                let count = self.first_nonspace - self.offset;
                self.advance_offset(line, count, false);
                self.add_line(container, line);
            }
        }

        self.current = container;
    }

    fn add_line(&mut self, node: NodeId, line: &str) {
        let ast = self.arena.get_mut(node);
        debug_assert!(ast.open);
        if self.partially_consumed_tab {
            self.offset += 1;
            let chars_to_tab = TAB_STOP - (self.column % TAB_STOP);
            ast.content.extend(std::iter::repeat(' ').take(chars_to_tab));
        }
        if self.offset < line.len() {
            ast.content.push_str(&line[self.offset..]);
        }
        ast.content.push('\n');
    }

    /// Records a blank line in a container.  Consecutive blank lines share
    /// one node.
    fn add_blank_line(&mut self, container: NodeId) {
        let value = self.value(container);
        if !value.is_container() {
            return;
        }
        if matches!(value, NodeValue::Item(..)) && self.arena.first_child(container).is_none() {
            return;
        }

        if let Some(last_child) = self.arena.last_child(container) {
            if let NodeValue::BlankLine(ref mut n) = self.arena.get_mut(last_child).value {
                *n += 1;
                return;
            }
        }

        let mut ast = Ast::new(NodeValue::BlankLine(1), self.line_number);
        ast.open = false;
        let node = self.arena.alloc(ast);
        self.arena.append(container, node);
    }

    fn finalize(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.arena.parent(node);
        let options = self.options;
        let ast = self.arena.get_mut(node);
        debug_assert!(ast.open, "finalizing closed block {:?}", node);
        ast.open = false;

        let content = &mut ast.content;
        let mut trailing_blank_lines = 0;

        match ast.value {
            NodeValue::CodeBlock(ref mut ncb) => {
                if !ncb.fenced {
                    trailing_blank_lines = strings::remove_trailing_blank_lines(content);
                    content.push('\n');
                } else {
                    let pos = content
                        .bytes()
                        .position(strings::is_line_end_char)
                        .unwrap_or(content.len());

                    let mut info = {
                        let unescaped = entity::unescape_html(&content[..pos]);
                        strings::trim_slice(&unescaped).to_string()
                    };
                    strings::unescape(&mut info);
                    if info.is_empty() {
                        ncb.info = options
                            .parse
                            .default_info_string
                            .as_ref()
                            .map_or(info, |s| s.clone());
                    } else {
                        ncb.info = info;
                    }

                    strings::remove_from_start(content, min(pos + 1, content.len()));
                }
                mem::swap(&mut ncb.literal, content);
            }
            NodeValue::HtmlBlock(ref mut nhb) => {
                mem::swap(&mut nhb.literal, content);
            }
            _ => (),
        }

        if trailing_blank_lines > 0 {
            let mut blank = Ast::new(NodeValue::BlankLine(trailing_blank_lines), self.line_number);
            blank.open = false;
            let blank = self.arena.alloc(blank);
            self.arena.insert_after(node, blank);
        }

        parent
    }

    /// Whether the open blocks form a single path from the root down to
    /// the current block.
    #[cfg(test)]
    pub(crate) fn open_blocks_form_spine(&self) -> bool {
        let open: Vec<NodeId> = self
            .arena
            .descendants(self.root)
            .filter(|&n| self.arena.get(n).open)
            .collect();
        let mut spine: Vec<NodeId> = std::iter::once(self.current)
            .chain(self.arena.ancestors(self.current))
            .collect();
        spine.reverse();
        open == spine
    }

    /// Whether every block below a closed block is closed too.
    #[cfg(test)]
    pub(crate) fn closed_blocks_are_closed_below(&self) -> bool {
        self.arena
            .descendants(self.root)
            .filter(|&n| !self.arena.get(n).open)
            .all(|n| self.arena.descendants(n).all(|d| !self.arena.get(d).open))
    }
}

fn parse_list_marker(
    line: &str,
    mut pos: usize,
    interrupts_paragraph: bool,
) -> Option<(usize, NodeList)> {
    let bytes = line.as_bytes();
    let startpos = pos;
    let c = *bytes.get(pos)?;

    // "However, an empty list item cannot interrupt a paragraph."
    let empty_after = |pos: usize| bytes[pos..].iter().all(|&b| strings::is_space_or_tab(b));

    if c == b'*' || c == b'-' || c == b'+' {
        pos += 1;
        if !bytes.get(pos).map_or(true, |&b| isspace(b)) {
            return None;
        }

        if interrupts_paragraph && empty_after(pos) {
            return None;
        }

        return Some((
            pos - startpos,
            NodeList {
                list_type: ListType::Bullet,
                start: 1,
                bullet_char: c,
                ..NodeList::default()
            },
        ));
    }

    if isdigit(c) {
        let digits = scanners::list_ordinal(&bytes[pos..]);
        if digits > 9 {
            return None;
        }
        let start = bytes[pos..pos + digits]
            .iter()
            .fold(0, |acc, &d| acc * 10 + (d - b'0') as usize);
        pos += digits;

        if interrupts_paragraph && start != 1 {
            return None;
        }

        let delimiter = match bytes.get(pos) {
            Some(b'.') => ListDelimType::Period,
            Some(b')') => ListDelimType::Paren,
            _ => return None,
        };
        pos += 1;

        if !bytes.get(pos).map_or(true, |&b| isspace(b)) {
            return None;
        }

        if interrupts_paragraph && empty_after(pos) {
            return None;
        }

        return Some((
            pos - startpos,
            NodeList {
                list_type: ListType::Ordered,
                start,
                delimiter,
                ..NodeList::default()
            },
        ));
    }

    None
}
