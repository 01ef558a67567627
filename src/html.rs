//! The HTML renderer for the CommonMark AST.

mod context;

use std::io::{self, Write};

use crate::arena::NodeId;
use crate::ctype::isxdigit;
use crate::nodes::{Container, Document, Inline, ListType, NodeLink, NodeList, NodeValue};
use crate::Options;

pub use self::context::Context;

/// Formats a parsed document as HTML.
#[tracing::instrument(level = "debug", skip_all)]
pub fn format_document(doc: &Document, options: &Options, output: &mut dyn Write) -> io::Result<()> {
    let mut context = Context::new(output, options);

    enum Phase {
        Pre,
        Post,
    }
    let mut stack = vec![(doc.root(), Phase::Pre)];

    while let Some((node, phase)) = stack.pop() {
        match phase {
            Phase::Pre => {
                if format_block(&mut context, doc, node, true)? {
                    stack.push((node, Phase::Post));
                    let children: Vec<NodeId> = doc.children(node).collect();
                    for child in children.into_iter().rev() {
                        stack.push((child, Phase::Pre));
                    }
                }
            }
            Phase::Post => {
                format_block(&mut context, doc, node, false)?;
            }
        }
    }

    context.flush()
}

/// Writes the opening (`entering`) or closing part of a block.  Returns
/// whether the block's children should be formatted.
fn format_block(
    context: &mut Context,
    doc: &Document,
    node: NodeId,
    entering: bool,
) -> io::Result<bool> {
    let ast = doc.get(node);

    match ast.value {
        NodeValue::Document => (),
        NodeValue::BlockQuote => {
            context.cr()?;
            if entering {
                context.write_all(b"<blockquote>\n")?;
            } else {
                context.write_all(b"</blockquote>\n")?;
            }
        }
        NodeValue::List(ref nl) => {
            if entering {
                context.cr()?;
                if nl.list_type == ListType::Bullet {
                    context.write_all(b"<ul>\n")?;
                } else if nl.start == 1 {
                    context.write_all(b"<ol>\n")?;
                } else {
                    writeln!(context, "<ol start=\"{}\">", nl.start)?;
                }
            } else if nl.list_type == ListType::Bullet {
                context.write_all(b"</ul>\n")?;
            } else {
                context.write_all(b"</ol>\n")?;
            }
        }
        NodeValue::Item(..) => {
            if entering {
                context.cr()?;
                context.write_all(b"<li>")?;
            } else {
                context.write_all(b"</li>\n")?;
            }
        }
        NodeValue::Paragraph(ref np) => {
            if let Some(level) = np.setext {
                format_heading(context, level, &ast.inlines)?;
            } else if in_tight_list(doc, node) {
                format_inlines(context, &ast.inlines)?;
            } else {
                context.cr()?;
                context.write_all(b"<p>")?;
                format_inlines(context, &ast.inlines)?;
                context.write_all(b"</p>\n")?;
            }
            return Ok(false);
        }
        NodeValue::Heading(ref nh) => {
            format_heading(context, nh.level, &ast.inlines)?;
            return Ok(false);
        }
        NodeValue::ThematicBreak => {
            context.cr()?;
            context.write_all(b"<hr />\n")?;
            return Ok(false);
        }
        NodeValue::CodeBlock(ref ncb) => {
            context.cr()?;
            context.write_all(b"<pre><code")?;
            if let Some(lang) = ncb.language() {
                context.write_all(b" class=\"language-")?;
                context.escape(lang)?;
                context.write_all(b"\"")?;
            }
            context.write_all(b">")?;
            context.escape(&ncb.literal)?;
            context.write_all(b"</code></pre>\n")?;
            return Ok(false);
        }
        NodeValue::HtmlBlock(ref nhb) => {
            context.cr()?;
            if context.options.render.unsafe_ {
                context.write_all(nhb.literal.as_bytes())?;
            } else {
                context.write_all(b"<!-- raw HTML omitted -->")?;
            }
            context.cr()?;
            return Ok(false);
        }
        NodeValue::BlankLine(..) => return Ok(false),
    }

    Ok(true)
}

fn format_heading(context: &mut Context, level: u8, inlines: &[Inline]) -> io::Result<()> {
    context.cr()?;
    write!(context, "<h{}>", level)?;
    format_inlines(context, inlines)?;
    writeln!(context, "</h{}>", level)
}

fn in_tight_list(doc: &Document, node: NodeId) -> bool {
    doc.parent(node)
        .and_then(|item| doc.parent(item))
        .map_or(false, |list| {
            matches!(doc.get(list).value, NodeValue::List(NodeList { tight: true, .. }))
        })
}

fn format_inlines(context: &mut Context, inlines: &[Inline]) -> io::Result<()> {
    let mut open: Vec<&Container> = Vec::new();
    let mut iter = inlines.iter();

    while let Some(inline) = iter.next() {
        match inline {
            Inline::Text(literal) | Inline::Entity(literal) => context.escape(literal)?,
            Inline::Escaped(c) => context.escape(c.encode_utf8(&mut [0; 4]))?,
            Inline::SoftBreak => {
                if context.options.render.hardbreaks {
                    context.write_all(b"<br />\n")?;
                } else {
                    context.write_all(b"\n")?;
                }
            }
            Inline::LineBreak => context.write_all(b"<br />\n")?,
            Inline::Code(code) => {
                context.write_all(b"<code>")?;
                context.escape(&code.literal)?;
                context.write_all(b"</code>")?;
            }
            Inline::HtmlInline(raw) => {
                if context.options.render.unsafe_ {
                    context.write_all(raw.as_bytes())?;
                } else {
                    context.write_all(b"<!-- raw HTML omitted -->")?;
                }
            }
            Inline::Autolink { link, text } => {
                context.write_all(b"<a href=\"")?;
                context.escape_href(&link.url)?;
                context.write_all(b"\">")?;
                context.escape(text)?;
                context.write_all(b"</a>")?;
            }
            Inline::Start(container @ Container::Emph { strong, .. }) => {
                let tag: &[u8] = if *strong { b"<strong>" } else { b"<em>" };
                context.write_all(tag)?;
                open.push(container);
            }
            Inline::Start(container @ Container::Link(link)) => {
                context.write_all(b"<a href=\"")?;
                context.escape_href(&link.url)?;
                format_title(context, link)?;
                context.write_all(b">")?;
                open.push(container);
            }
            Inline::Start(Container::Image(link)) => {
                context.write_all(b"<img src=\"")?;
                context.escape_href(&link.url)?;
                context.write_all(b"\" alt=\"")?;
                let alt = alt_text(&mut iter);
                context.escape(&alt)?;
                format_title(context, link)?;
                context.write_all(b" />")?;
            }
            Inline::End => match open.pop() {
                Some(Container::Emph { strong: true, .. }) => context.write_all(b"</strong>")?,
                Some(Container::Emph { strong: false, .. }) => context.write_all(b"</em>")?,
                Some(Container::Link(_)) => context.write_all(b"</a>")?,
                Some(Container::Image(_)) | None => {
                    debug_assert!(false, "unbalanced inline end");
                }
            },
        }
    }

    debug_assert!(open.is_empty(), "unclosed inline containers");
    Ok(())
}

/// The plain text of an image's content, consuming everything up to and
/// including the image's own [`Inline::End`].
fn alt_text<'a, I>(iter: &mut I) -> String
where
    I: Iterator<Item = &'a Inline>,
{
    let mut alt = String::new();
    let mut depth = 0usize;
    for inline in iter {
        match inline {
            Inline::Start(_) => depth += 1,
            Inline::End if depth == 0 => break,
            Inline::End => depth -= 1,
            other => other.collect_text(&mut alt),
        }
    }
    alt
}

/// Closes the `href`/`src` attribute, adding a `title` if there is one.
fn format_title(context: &mut Context, link: &NodeLink) -> io::Result<()> {
    context.write_all(b"\"")?;
    if !link.title.is_empty() {
        context.write_all(b" title=\"")?;
        context.escape(&link.title)?;
        context.write_all(b"\"")?;
    }
    Ok(())
}

/// Writes `buffer` to `output`, escaping anything that has special meaning
/// in HTML text or attribute values.
pub fn escape(output: &mut dyn Write, buffer: &[u8]) -> io::Result<()> {
    let mut offset = 0;
    for (i, &byte) in buffer.iter().enumerate() {
        let esc: &[u8] = match byte {
            b'"' => b"&quot;",
            b'&' => b"&amp;",
            b'<' => b"&lt;",
            b'>' => b"&gt;",
            _ => continue,
        };
        output.write_all(&buffer[offset..i])?;
        output.write_all(esc)?;
        offset = i + 1;
    }
    output.write_all(&buffer[offset..])
}

const HREF_SAFE: [bool; 256] = {
    let mut a = [false; 256];
    let safe = b"-_.+!*(),#@?=;:/$~";
    let mut i = 0;
    while i < safe.len() {
        a[safe[i] as usize] = true;
        i += 1;
    }
    let mut c = 0;
    while c < 256 {
        if (c as u8).is_ascii_alphanumeric() {
            a[c] = true;
        }
        c += 1;
    }
    a
};

/// Writes a URL to `output` for use in an `href` or `src` attribute.
/// Everything outside the URL-safe set is percent-encoded byte by byte,
/// except that existing `%XX` escapes are left alone; `&` and `'` are
/// written as character references.
pub fn escape_href(output: &mut dyn Write, buffer: &[u8]) -> io::Result<()> {
    const HEX_CHARS: &[u8] = b"0123456789ABCDEF";
    let size = buffer.len();
    let mut i = 0;

    while i < size {
        let org = i;
        while i < size && HREF_SAFE[buffer[i] as usize] {
            i += 1;
        }

        if i > org {
            output.write_all(&buffer[org..i])?;
        }

        if i >= size {
            break;
        }

        match buffer[i] {
            b'&' => output.write_all(b"&amp;")?,
            b'\'' => output.write_all(b"&#x27;")?,
            b'%' if i + 2 < size && isxdigit(buffer[i + 1]) && isxdigit(buffer[i + 2]) => {
                output.write_all(b"%")?
            }
            b => output.write_all(&[
                b'%',
                HEX_CHARS[(b >> 4) as usize],
                HEX_CHARS[(b & 0xF) as usize],
            ])?,
        }

        i += 1;
    }

    Ok(())
}

const DANGEROUS_SCHEMES: [&[u8]; 3] = [b"javascript:", b"vbscript:", b"file:"];
const SAFE_DATA_TYPES: [&[u8]; 4] = [b"image/png", b"image/gif", b"image/jpeg", b"image/webp"];

fn starts_with_ignore_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Whether a URL uses a scheme that can run script or reach local files.
/// `data:` is only allowed for a few image types.
pub fn dangerous_url(url: &str) -> bool {
    let url = url.as_bytes();

    if starts_with_ignore_case(url, b"data:") {
        let media = &url[5..];
        return !SAFE_DATA_TYPES
            .iter()
            .any(|ty| starts_with_ignore_case(media, ty));
    }

    DANGEROUS_SCHEMES
        .iter()
        .any(|scheme| starts_with_ignore_case(url, scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn href(url: &str) -> String {
        let mut out = Vec::new();
        escape_href(&mut out, url.as_bytes()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn hrefs() {
        assert_eq!(href("/a b"), "/a%20b");
        assert_eq!(href("foo%20bä"), "foo%20b%C3%A4");
        assert_eq!(href("100%"), "100%25");
        assert_eq!(href("?a=1&b='2'"), "?a=1&amp;b=&#x27;2&#x27;");
    }

    #[test]
    fn escaping() {
        let mut out = Vec::new();
        escape(&mut out, b"<a href=\"x\">&</a>").unwrap();
        assert_eq!(out, b"&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn dangerous_urls() {
        assert!(dangerous_url("javascript:alert(1)"));
        assert!(dangerous_url("JaVaScRiPt:alert(1)"));
        assert!(dangerous_url("vbscript:x"));
        assert!(dangerous_url("FILE:///etc/passwd"));
        assert!(dangerous_url("data:text/html,x"));
        assert!(!dangerous_url("data:image/png;base64,AAAA"));
        assert!(!dangerous_url("https://example.com"));
        assert!(!dangerous_url("/javascript:"));
    }
}
