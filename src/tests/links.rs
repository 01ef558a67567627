use super::*;
use ntest::test_case;

#[test_case("[link](/uri \"title\")", "<p><a href=\"/uri\" title=\"title\">link</a></p>\n")]
#[test_case("[link](/uri)", "<p><a href=\"/uri\">link</a></p>\n")]
#[test_case("[link]()", "<p><a href=\"\">link</a></p>\n")]
#[test_case("[link](<>)", "<p><a href=\"\">link</a></p>\n")]
#[test_case("[link](</my uri>)", "<p><a href=\"/my%20uri\">link</a></p>\n")]
#[test_case("[link](/my uri)", "<p>[link](/my uri)</p>\n")]
#[test_case("[link](foo(and(bar)))", "<p><a href=\"foo(and(bar))\">link</a></p>\n")]
#[test_case("[link](foo\\)\\:)", "<p><a href=\"foo):\">link</a></p>\n")]
#[test_case("[link](foo%20b&auml;)", "<p><a href=\"foo%20b%C3%A4\">link</a></p>\n")]
#[test_case("[link](/url 'title')", "<p><a href=\"/url\" title=\"title\">link</a></p>\n")]
#[test_case("[link](/url (title))", "<p><a href=\"/url\" title=\"title\">link</a></p>\n")]
#[test_case("[link](/url \"title \\\"&quot;\")", "<p><a href=\"/url\" title=\"title &quot;&quot;\">link</a></p>\n")]
#[test_case("[link](   /uri\n  \"title\"  )", "<p><a href=\"/uri\" title=\"title\">link</a></p>\n")]
fn inline_links(input: &str, expected: &str) {
    html(input, expected);
}

#[test]
fn link_text() {
    html(
        "[link [foo [bar]]](/uri)\n",
        "<p><a href=\"/uri\">link [foo [bar]]</a></p>\n",
    );
    html(
        "[link *foo **bar** `#`*](/uri)\n",
        "<p><a href=\"/uri\">link <em>foo <strong>bar</strong> <code>#</code></em></a></p>\n",
    );
    html(
        "[foo *bar](baz*)\n",
        "<p><a href=\"baz*\">foo *bar</a></p>\n",
    );
    html(
        "[foo`](/uri)`\n",
        "<p>[foo<code>](/uri)</code></p>\n",
    );
}

#[test]
fn links_do_not_nest() {
    html(
        "[foo [bar](/uri)](/uri)\n",
        "<p>[foo <a href=\"/uri\">bar</a>](/uri)</p>\n",
    );
}

#[test]
fn images() {
    html(
        "![foo](/url \"title\")\n",
        "<p><img src=\"/url\" alt=\"foo\" title=\"title\" /></p>\n",
    );
    html(
        "![foo *bar*](/url)\n",
        "<p><img src=\"/url\" alt=\"foo bar\" /></p>\n",
    );
    html(
        "![[[foo](uri1)](uri2)](uri3)\n",
        "<p><img src=\"uri3\" alt=\"[foo](uri2)\" /></p>\n",
    );
    html("!\\[foo]\n", "<p>![foo]</p>\n");
}

#[test]
fn references() {
    html(
        "[foo][bar]\n\n[bar]: /url \"title\"\n",
        "<p><a href=\"/url\" title=\"title\">foo</a></p>\n",
    );
    html(
        "[foo][]\n\n[foo]: /url \"title\"\n",
        "<p><a href=\"/url\" title=\"title\">foo</a></p>\n",
    );
    html(
        "[foo] bar\n\n[foo]: /url\n",
        "<p><a href=\"/url\">foo</a> bar</p>\n",
    );
    html(
        "[foo][bar]\n\n[foo]: /url\n",
        "<p>[foo][bar]</p>\n",
    );
    html(
        "![foo]\n\n[foo]: /url \"title\"\n",
        "<p><img src=\"/url\" alt=\"foo\" title=\"title\" /></p>\n",
    );
}

#[test]
fn reference_labels_fold_case() {
    html("[ẞ]\n\n[SS]: /url\n", "<p><a href=\"/url\">ẞ</a></p>\n");
    html(
        "[Foo\n  bar]: /url\n\n[Baz][Foo bar]\n",
        "<p><a href=\"/url\">Baz</a></p>\n",
    );
}

#[test]
fn first_definition_wins() {
    html(
        "[foo]\n\n[foo]: /first\n[foo]: /second\n",
        "<p><a href=\"/first\">foo</a></p>\n",
    );
}

#[test]
fn definitions() {
    html(
        "[foo]:\n/url\n\n[foo]\n",
        "<p><a href=\"/url\">foo</a></p>\n",
    );
    html(
        "[foo]: /url \"title\" ok\n",
        "<p>[foo]: /url &quot;title&quot; ok</p>\n",
    );
    html(
        "[foo]: /url\n\"title\" ok\n",
        "<p>&quot;title&quot; ok</p>\n",
    );
    html(
        "    [foo]: /url \"title\"\n\n[foo]\n",
        "<pre><code>[foo]: /url &quot;title&quot;\n</code></pre>\n<p>[foo]</p>\n",
    );
    html(
        "> [foo]: /url\n\n[foo]\n",
        "<blockquote>\n</blockquote>\n<p><a href=\"/url\">foo</a></p>\n",
    );
}

#[test]
fn definitions_are_exposed() {
    let doc = parse_document("[A  b]: /u 't'\n", &Options::default());
    let rr = &doc.refmap()["a b"];
    assert_eq!(rr.url, "/u");
    assert_eq!(rr.title, "t");
}

#[test]
fn dangerous_urls() {
    html(
        "[a](javascript:alert(1)) ![b](data:text/html,x) ![c](data:image/png;base64,AA)\n",
        concat!(
            "<p><a href=\"\">a</a> <img src=\"\" alt=\"b\" /> ",
            "<img src=\"data:image/png;base64,AA\" alt=\"c\" /></p>\n"
        ),
    );
    html_opts!(
        [render.unsafe_],
        "[a](javascript:alert(1))\n",
        "<p><a href=\"javascript:alert(1)\">a</a></p>\n"
    );
    html(
        "<vbscript:x>\n",
        "<p><a href=\"\">vbscript:x</a></p>\n",
    );
}
