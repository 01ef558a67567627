use super::*;

#[test]
fn basic() {
    html(
        concat!(
            "My **document**.\n",
            "\n",
            "It's mine.\n",
            "\n",
            "> Yes.\n",
            "\n",
            "## Hi!\n",
            "\n",
            "Okay.\n"
        ),
        concat!(
            "<p>My <strong>document</strong>.</p>\n",
            "<p>It's mine.</p>\n",
            "<blockquote>\n",
            "<p>Yes.</p>\n",
            "</blockquote>\n",
            "<h2>Hi!</h2>\n",
            "<p>Okay.</p>\n"
        ),
    );
}

#[test]
fn atx_heading() {
    html("# Title\n", "<h1>Title</h1>\n");
}

#[test]
fn block_quote_with_continuation() {
    html(
        "> foo\n> bar\n",
        "<blockquote>\n<p>foo\nbar</p>\n</blockquote>\n",
    );
}

#[test]
fn tight_list() {
    html(
        "- a\n- b\n",
        concat!("<ul>\n", "<li>a</li>\n", "<li>b</li>\n", "</ul>\n"),
    );
}

#[test]
fn loose_list() {
    html(
        "- a\n\n- b\n",
        concat!(
            "<ul>\n",
            "<li>\n",
            "<p>a</p>\n",
            "</li>\n",
            "<li>\n",
            "<p>b</p>\n",
            "</li>\n",
            "</ul>\n"
        ),
    );
}

#[test]
fn reference_link() {
    html(
        "[foo]: /url \"title\"\n\n[foo]\n",
        "<p><a href=\"/url\" title=\"title\">foo</a></p>\n",
    );
}

#[test]
fn strong_inside_emphasis() {
    html(
        "***strong and em***\n",
        "<p><em><strong>strong and em</strong></em></p>\n",
    );
}

#[test]
fn codefence() {
    html(
        concat!("``` rust yum\n", "fn main<'a>();\n", "```\n"),
        concat!(
            "<pre><code class=\"language-rust\">fn main&lt;'a&gt;();\n",
            "</code></pre>\n"
        ),
    );
}

#[test]
fn lists() {
    html(
        concat!("2. Hello.\n", "3. Hi.\n"),
        concat!(
            "<ol start=\"2\">\n",
            "<li>Hello.</li>\n",
            "<li>Hi.</li>\n",
            "</ol>\n"
        ),
    );

    html(
        concat!("- Hello.\n", "- Hi.\n"),
        concat!("<ul>\n", "<li>Hello.</li>\n", "<li>Hi.</li>\n", "</ul>\n"),
    );
}

#[test]
fn thematic_breaks() {
    html(
        concat!("---\n", "\n", "- - -\n", "\n", "\n", "_        _   _\n"),
        concat!("<hr />\n", "<hr />\n", "<hr />\n"),
    );
}

#[test]
fn setext_heading() {
    html(
        concat!("Hi\n", "==\n", "\n", "Ok\n", "-----\n"),
        concat!("<h1>Hi</h1>\n", "<h2>Ok</h2>\n"),
    );
}

#[test]
fn empty_input() {
    html("", "");
    html("\n\n\n", "");
}

#[test]
fn line_endings() {
    html("a\r\nb\rc\n", "<p>a\nb\nc</p>\n");
}

#[test]
fn nul_is_replaced() {
    html("a\0b\n", "<p>a\u{fffd}b</p>\n");
}

#[test]
fn no_trailing_newline() {
    html("*hi*", "<p><em>hi</em></p>\n");
}

#[test]
fn bytes_must_be_utf8() {
    let options = Options::default();
    assert_eq!(
        markdown_bytes_to_html(b"# ok\n", &options).unwrap(),
        "<h1>ok</h1>\n"
    );

    match markdown_bytes_to_html(b"one\ntwo\nthr\xc3\n", &options) {
        Err(Error::InvalidUtf8 { line, .. }) => assert_eq!(line, 3),
        other => panic!("unexpected {:?}", other),
    }
}
