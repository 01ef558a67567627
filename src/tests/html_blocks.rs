use super::*;

#[test]
fn block_ends_at_blank_line() {
    html_opts!(
        [render.unsafe_],
        concat!(
            "<table><tr><td>\n",
            "<pre>\n",
            "**Hello**,\n",
            "\n",
            "_world_.\n",
            "</pre>\n",
            "</td></tr></table>\n"
        ),
        concat!(
            "<table><tr><td>\n",
            "<pre>\n",
            "**Hello**,\n",
            "<p><em>world</em>.\n",
            "</pre></p>\n",
            "</td></tr></table>\n"
        )
    );
}

#[test]
fn raw_block_is_omitted_by_default() {
    html(
        "<div>\n*hi*\n</div>\n\nok\n",
        "<!-- raw HTML omitted -->\n<p>ok</p>\n",
    );
}

#[test]
fn script_ends_at_close_tag() {
    html_opts!(
        [render.unsafe_],
        concat!("<script>\n", "foo\n", "</script>bar\n", "*baz*\n"),
        concat!("<script>\n", "foo\n", "</script>bar\n", "<p><em>baz</em></p>\n")
    );
}

#[test]
fn comment_ends_on_same_line() {
    html_opts!(
        [render.unsafe_],
        "<!-- foo -->*bar*\n*baz*\n",
        "<!-- foo -->*bar*\n<p><em>baz</em></p>\n"
    );
}

#[test]
fn processing_instruction_and_declaration() {
    html_opts!(
        [render.unsafe_],
        concat!(" <? o\n", "k ?> *a*\n", "*a*\n"),
        concat!(" <? o\n", "k ?> *a*\n", "<p><em>a</em></p>\n")
    );
    html_opts!(
        [render.unsafe_],
        concat!("<!X >\n", "ok\n", "<!X\n", "um > h\n", "ok\n"),
        concat!("<!X >\n", "<p>ok</p>\n", "<!X\n", "um > h\n", "<p>ok</p>\n")
    );
}

#[test]
fn cdata() {
    html_opts!(
        [render.unsafe_],
        concat!("<![CDATA[\n", "\n", "ok\n", "]]> h\n", "*ok*\n"),
        concat!("<![CDATA[\n", "\n", "ok\n", "]]> h\n", "<p><em>ok</em></p>\n")
    );
}

#[test]
fn open_tag_cannot_interrupt_paragraph() {
    html_opts!(
        [render.unsafe_],
        "Foo\n<a href=\"bar\">\nbaz\n",
        "<p>Foo\n<a href=\"bar\">\nbaz</p>\n"
    );
}

#[test]
fn open_tag_alone_on_line() {
    html_opts!(
        [render.unsafe_],
        "<del>\n\n*foo*\n\n</del>\n",
        "<del>\n<p><em>foo</em></p>\n</del>\n"
    );
    html_opts!(
        [render.unsafe_],
        "<del>*foo*</del>\n",
        "<p><del><em>foo</em></del></p>\n"
    );
}

#[test]
fn html_block_in_list() {
    html_opts!(
        [render.unsafe_],
        "- <div>\n  x\n- y\n",
        "<ul>\n<li>\n<div>\nx\n</li>\n<li>y</li>\n</ul>\n"
    );
}
