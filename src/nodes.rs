//! The document tree.
//!
//! Blocks live in an [`Arena`] owned by the [`Document`]; each block that
//! holds inline content carries its parsed [`Inline`] sequence directly.

use std::sync::Arc;

use crate::arena::{Arena, NodeId};
use crate::parser::RefMap;

/// The core block enum.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// The root of every document.  Contains **blocks**.
    Document,

    /// **Block**. A block quote.  Contains other **blocks**.
    ///
    /// ``` md
    /// > A block quote.
    /// ```
    BlockQuote,

    /// **Block**.  A list.  Contains list items, and possibly the blank
    /// lines between them.
    ///
    /// Lists are never produced by the block parser itself; normalization
    /// wraps runs of compatible items in one.
    ///
    /// ``` md
    /// * An unordered list
    /// * Another item
    ///
    /// 1. An ordered list
    /// 2. Another item
    /// ```
    List(NodeList),

    /// **Block**.  A list item.  Contains other **blocks**.
    Item(NodeList),

    /// **Block**. A paragraph.  Contains **inlines**.  A paragraph followed
    /// by a setext underline keeps this variant and records the heading
    /// level.
    Paragraph(NodeParagraph),

    /// **Block**. An ATX heading.  Contains **inlines**.
    Heading(NodeHeading),

    /// **Block**. A thematic break.  Has no children.
    ThematicBreak,

    /// **Block**. A code block; may be fenced or indented.  Contains raw
    /// text which is not parsed, although it is HTML escaped.
    CodeBlock(NodeCodeBlock),

    /// **Block**. An HTML block.  Contains raw text which is neither parsed
    /// nor HTML escaped.
    HtmlBlock(NodeHtmlBlock),

    /// **Block**. One or more consecutive blank lines.  Renders as nothing.
    BlankLine(usize),
}

/// The metadata of a list or list item.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NodeList {
    /// The kind of list (bullet (unordered) or ordered).
    pub list_type: ListType,

    /// Number of columns before the list marker.
    pub marker_offset: usize,

    /// Number of columns between the start of the list marker and the item
    /// text (including the list marker(s)).
    pub padding: usize,

    /// For ordered lists, the ordinal the list starts at.
    pub start: usize,

    /// For ordered lists, the delimiter after each number.
    pub delimiter: ListDelimType,

    /// For bullet lists, the character used for each bullet.
    pub bullet_char: u8,

    /// Whether the list is tight, i.e. whether its paragraphs are rendered
    /// without `<p>` tags.  Only meaningful on [`NodeValue::List`].
    pub tight: bool,
}

impl NodeList {
    /// The item's content column relative to its container.
    pub fn indent(&self) -> usize {
        self.marker_offset + self.padding
    }

    /// Whether two items belong in the same list.
    pub fn same_family(&self, other: &NodeList) -> bool {
        self.list_type == other.list_type
            && self.delimiter == other.delimiter
            && self.bullet_char == other.bullet_char
    }
}

/// The type of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    /// A bullet list, i.e. an unordered list.
    Bullet,

    /// An ordered list.
    Ordered,
}

impl Default for ListType {
    fn default() -> ListType {
        ListType::Bullet
    }
}

/// The delimiter for ordered lists, i.e. the character which appears after
/// each number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDelimType {
    /// A period character `.`.
    Period,

    /// A paren character `)`.
    Paren,
}

impl Default for ListDelimType {
    fn default() -> ListDelimType {
        ListDelimType::Period
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NodeParagraph {
    /// Set once a setext underline has turned the paragraph into a heading
    /// of level 1 (`=`) or 2 (`-`).
    pub setext: Option<u8>,
}

/// The metadata of an ATX heading.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct NodeHeading {
    /// The level of the header, from 1 to 6.
    pub level: u8,
}

/// The metadata and data of a code block (fenced or indented).
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NodeCodeBlock {
    /// Whether the code block is fenced.
    pub fenced: bool,

    /// For fenced code blocks, the fence character itself (`` ` `` or `~`).
    pub fence_char: u8,

    /// For fenced code blocks, the length of the fence.
    pub fence_length: usize,

    /// For fenced code blocks, the indentation level of the fence, which is
    /// stripped from each content line.
    pub fence_offset: usize,

    /// For fenced code blocks, the info string after the opening fence, with
    /// escapes and entities resolved.
    pub info: String,

    /// The literal contents of the code block.
    pub literal: String,
}

impl NodeCodeBlock {
    /// The first word of the info string, used as the language.
    pub fn language(&self) -> Option<&str> {
        self.info.split_whitespace().next()
    }
}

/// The metadata of an HTML block.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NodeHtmlBlock {
    /// Which of the seven start conditions opened the block.
    pub block_type: u8,

    /// The literal contents of the HTML block.
    pub literal: String,
}

/// An inline code span.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCode {
    /// The length of the backtick runs delimiting the span.
    pub num_backticks: usize,

    /// The normalized content of the span.
    pub literal: String,
}

/// The details of a link's destination, or an image's source.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLink {
    /// The URL for the link destination or image source.
    pub url: String,

    /// The title for the link or image.
    pub title: String,
}

/// Inline content.  Produced once per leaf block and never modified
/// afterwards.
///
/// A leaf's inlines form a flat sequence: emphasis, links and images open
/// with [`Inline::Start`] and close with the matching [`Inline::End`], and
/// everything in between is their content.  Arbitrarily deep nesting is
/// therefore walked, rendered and dropped without recursion.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Textual content.
    Text(String),

    /// A soft line break.  Rendered as a newline unless `render.hardbreaks`
    /// is set.
    SoftBreak,

    /// A hard line break.
    LineBreak,

    /// A code span.
    Code(NodeCode),

    /// A backslash-escaped ASCII punctuation character.
    Escaped(char),

    /// A decoded entity or numeric character reference.
    Entity(String),

    /// A `<scheme:…>` or `<user@host>` autolink.  The URL includes any
    /// `mailto:` prefix; the text is what appeared between the brackets.
    Autolink { link: NodeLink, text: String },

    /// Raw HTML contained inline.
    HtmlInline(String),

    /// Opens a container.
    Start(Container),

    /// Closes the innermost open container.
    End,
}

/// Inline content that holds other inlines.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    /// Emphasis, weak or strong, with the delimiter character that made it.
    Emph { strong: bool, delim: char },

    /// A link.  Its content is the link text.
    Link(NodeLink),

    /// An image.  Its content is the alt text.
    Image(NodeLink),
}

impl Inline {
    /// Appends the plain text of this inline.  Container markers have none;
    /// walking a whole sequence yields the text of everything in it.
    pub fn collect_text(&self, out: &mut String) {
        match self {
            Inline::Text(t) | Inline::Entity(t) => out.push_str(t),
            Inline::Code(code) => out.push_str(&code.literal),
            Inline::Escaped(c) => out.push(*c),
            Inline::Autolink { text, .. } => out.push_str(text),
            Inline::SoftBreak | Inline::LineBreak => out.push(' '),
            Inline::HtmlInline(raw) => out.push_str(raw),
            Inline::Start(_) | Inline::End => (),
        }
    }
}

/// A single block in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    /// The node value itself.
    pub value: NodeValue,

    /// The line (1-based) the block started on.
    pub start_line: usize,

    /// Parsed inline content, for paragraphs and headings.
    pub inlines: Vec<Inline>,

    pub(crate) content: String,
    pub(crate) open: bool,
}

impl Ast {
    /// Create a new, open block with the given value.
    pub fn new(value: NodeValue, start_line: usize) -> Self {
        Ast {
            value,
            start_line,
            inlines: Vec::new(),
            content: String::new(),
            open: true,
        }
    }

    /// The raw text gathered for this block, before inline parsing.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl NodeValue {
    /// Whether this block holds other blocks.
    pub fn is_container(&self) -> bool {
        matches!(
            *self,
            NodeValue::Document | NodeValue::BlockQuote | NodeValue::List(..) | NodeValue::Item(..)
        )
    }

    /// Whether inline parsing applies to this block.
    pub fn contains_inlines(&self) -> bool {
        matches!(*self, NodeValue::Paragraph(..) | NodeValue::Heading(..))
    }

    /// Whether lines are added to this block as text rather than matched for
    /// new children.
    pub fn accepts_lines(&self) -> bool {
        matches!(
            *self,
            NodeValue::Paragraph(..) | NodeValue::Heading(..) | NodeValue::CodeBlock(..)
        )
    }

    pub fn is_blank_line(&self) -> bool {
        matches!(*self, NodeValue::BlankLine(..))
    }
}

/// Returns true if a block of kind `node` may hold a child of kind `child`.
pub fn can_contain_type(node: &NodeValue, child: &NodeValue) -> bool {
    match *node {
        NodeValue::Document | NodeValue::BlockQuote | NodeValue::Item(..) => {
            !matches!(*child, NodeValue::Document)
        }
        NodeValue::List(..) => matches!(*child, NodeValue::Item(..) | NodeValue::BlankLine(..)),
        _ => false,
    }
}

/// A parsed document: the block tree, with inlines resolved, and the link
/// reference definitions that were found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) arena: Arena<Ast>,
    pub(crate) root: NodeId,
    pub(crate) refmap: Arc<RefMap>,
}

impl Document {
    /// The `Document` node at the root of the tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &Ast {
        self.arena.get(id)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.arena.children(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.parent(id)
    }

    /// Every block reachable from the root, in document order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena.descendants(self.root)
    }

    /// The link reference definitions, keyed by normalized label.
    pub fn refmap(&self) -> &RefMap {
        &self.refmap
    }

    /// An indented outline of the block tree, one node per line.  Mostly
    /// useful in tests and when debugging.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for id in self.descendants() {
            let depth = self.arena.ancestors(id).count();
            let ast = self.get(id);
            let name = match &ast.value {
                NodeValue::Document => "document".to_string(),
                NodeValue::BlockQuote => "block_quote".to_string(),
                NodeValue::List(nl) => format!(
                    "list {} {}",
                    if nl.list_type == ListType::Ordered { "ordered" } else { "bullet" },
                    if nl.tight { "tight" } else { "loose" }
                ),
                NodeValue::Item(_) => "item".to_string(),
                NodeValue::Paragraph(p) => match p.setext {
                    Some(level) => format!("setext_heading {}", level),
                    None => "paragraph".to_string(),
                },
                NodeValue::Heading(h) => format!("heading {}", h.level),
                NodeValue::ThematicBreak => "thematic_break".to_string(),
                NodeValue::CodeBlock(cb) if cb.fenced => "fenced_code".to_string(),
                NodeValue::CodeBlock(_) => "indented_code".to_string(),
                NodeValue::HtmlBlock(hb) => format!("html_block {}", hb.block_type),
                NodeValue::BlankLine(n) => format!("blank_line {}", n),
            };
            out.push_str(&"  ".repeat(depth));
            out.push_str(&name);
            out.push('\n');
        }
        out
    }
}
