use super::*;

#[test]
fn atx_headings() {
    html(
        "# foo *bar* \\*baz\\*\n",
        "<h1>foo <em>bar</em> *baz*</h1>\n",
    );
    html("####### foo\n", "<p>####### foo</p>\n");
    html("#5 bolt\n", "<p>#5 bolt</p>\n");
    html("## foo ##\n", "<h2>foo</h2>\n");
    html("### foo ### b\n", "<h3>foo ### b</h3>\n");
    html("#\n", "<h1></h1>\n");
}

#[test]
fn heading_interrupts_paragraph() {
    html(
        "Foo bar\n# baz\nBar foo\n",
        "<p>Foo bar</p>\n<h1>baz</h1>\n<p>Bar foo</p>\n",
    );
}

#[test]
fn setext_heading_spans_lines() {
    html(
        "Foo *bar\nbaz*\n====\n",
        "<h1>Foo <em>bar\nbaz</em></h1>\n",
    );
}

#[test]
fn setext_heading_after_definition() {
    html(
        "[foo]: /url\nbar\n===\n[foo]\n",
        "<h1>bar</h1>\n<p><a href=\"/url\">foo</a></p>\n",
    );
    html("[foo]: /url\n===\n", "<p>===</p>\n");
}

#[test]
fn setext_underline_is_not_lazy() {
    html(
        "> foo\n---\n",
        "<blockquote>\n<p>foo</p>\n</blockquote>\n<hr />\n",
    );
}

#[test]
fn thematic_break_interrupts_paragraph() {
    html(
        "Foo\n***\nbar\n",
        "<p>Foo</p>\n<hr />\n<p>bar</p>\n",
    );
    html(
        "- foo\n---\n",
        "<ul>\n<li>foo</li>\n</ul>\n<hr />\n",
    );
}

#[test]
fn indented_code() {
    html(
        "    a simple\n      indented code block\n",
        "<pre><code>a simple\n  indented code block\n</code></pre>\n",
    );
    html(
        "    chunk1\n\n    chunk2\n  \n \n \n    chunk3\n",
        "<pre><code>chunk1\n\nchunk2\n\n\n\nchunk3\n</code></pre>\n",
    );
}

#[test]
fn indented_code_cannot_interrupt_paragraph() {
    html("Foo\n    bar\n", "<p>Foo\nbar</p>\n");
}

#[test]
fn tabs() {
    html(
        "\tfoo\tbaz\t\tbim\n",
        "<pre><code>foo\tbaz\t\tbim\n</code></pre>\n",
    );
    html(
        ">\t\tfoo\n",
        "<blockquote>\n<pre><code>  foo\n</code></pre>\n</blockquote>\n",
    );
}

#[test]
fn fenced_code() {
    html(
        "~~~\naaa\n```\n~~~\n",
        "<pre><code>aaa\n```\n</code></pre>\n",
    );
    html("```\naaa\n", "<pre><code>aaa\n</code></pre>\n");
    html(
        " ```\n aaa\naaa\n```\n",
        "<pre><code>aaa\naaa\n</code></pre>\n",
    );
    html(
        "```\naaa\n  ```\nafter\n",
        "<pre><code>aaa\n</code></pre>\n<p>after</p>\n",
    );
}

#[test]
fn fenced_code_info_string() {
    html(
        "``` foo\\+bar&amp; baz\nx\n```\n",
        "<pre><code class=\"language-foo+bar&amp;\">x\n</code></pre>\n",
    );
    html("``` aa ```\nfoo\n", "<p><code>aa</code>\nfoo</p>\n");
}

#[test]
fn fence_interrupts_paragraph() {
    html(
        "foo\n```\nbar\n```\nbaz\n",
        "<p>foo</p>\n<pre><code>bar\n</code></pre>\n<p>baz</p>\n",
    );
}

#[test]
fn lazy_continuation() {
    html(
        "> # Foo\n> bar\nbaz\n",
        "<blockquote>\n<h1>Foo</h1>\n<p>bar\nbaz</p>\n</blockquote>\n",
    );
}

#[test]
fn blank_line_separates_block_quotes() {
    html(
        "> foo\n\n> bar\n",
        "<blockquote>\n<p>foo</p>\n</blockquote>\n<blockquote>\n<p>bar</p>\n</blockquote>\n",
    );
}

#[test]
fn nested_block_quotes() {
    html(
        "> > > foo\nbar\n",
        concat!(
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<p>foo\nbar</p>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n"
        ),
    );
}

#[test]
fn paragraph_strips_leading_space() {
    html("  aaa\n bbb\n", "<p>aaa\nbbb</p>\n");
    html("foo  \n", "<p>foo</p>\n");
}

#[test]
fn outlines() {
    assert_eq!(
        outline("# a\n\n> b\n\n    c\n\n```\nd\n```\n***\n"),
        concat!(
            "document\n",
            "  heading 1\n",
            "  blank_line 1\n",
            "  block_quote\n",
            "    paragraph\n",
            "  blank_line 1\n",
            "  indented_code\n",
            "  blank_line 1\n",
            "  fenced_code\n",
            "  thematic_break\n"
        )
    );
}
