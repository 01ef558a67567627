use super::*;
use crate::parser::Parser;

const SAMPLE: &str = concat!(
    "# Heading\n",
    "\n",
    "> quote with *emphasis*\n",
    "lazy line\n",
    "> - item in quote\n",
    ">   continued\n",
    "\n",
    "1. one\n",
    "2. two\n",
    "   - nested [link][ref]\n",
    "\n",
    "     code in item\n",
    "\n",
    "```rust\n",
    "fn main() {}\n",
    "```\n",
    "\n",
    "<div>\n",
    "raw\n",
    "</div>\n",
    "\n",
    "Setext\n",
    "------\n",
    "\n",
    "[ref]: /target 'Title'\n",
    "***\n",
    "    indented\n",
);

#[test]
fn determinism() {
    let options = Options::default();
    let first = parse_document(SAMPLE, &options);
    let second = parse_document(SAMPLE, &options);
    assert_eq!(first, second);
    assert_eq!(
        markdown_to_html(SAMPLE, &options),
        markdown_to_html(SAMPLE, &options)
    );
}

#[test]
fn inline_results_do_not_depend_on_threads() {
    let options = Options::default();
    let doc: String = std::iter::repeat(SAMPLE).take(20).collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let sequential = pool.install(|| parse_document(&doc, &options));
    let parallel = parse_document(&doc, &options);

    assert_eq!(sequential, parallel);
}

#[test]
fn lines_and_string_agree() {
    let options = Options::default();
    let from_str = parse_document(SAMPLE, &options);
    let from_lines = parse_lines(SAMPLE.lines(), &options);
    assert_eq!(from_str, from_lines);
}

#[test]
fn open_blocks_form_a_spine_after_every_line() {
    let options = Options::default();
    let mut parser = Parser::new(&options);

    for (i, line) in SAMPLE.lines().enumerate() {
        parser.feed(line);
        assert!(
            parser.open_blocks_form_spine(),
            "open blocks branch after line {}: {:?}",
            i + 1,
            line
        );
        assert!(
            parser.closed_blocks_are_closed_below(),
            "open block under a closed one after line {}: {:?}",
            i + 1,
            line
        );
    }

    let doc = parser.finish();
    assert!(doc.descendants().all(|id| !doc.get(id).is_open()));
}

#[test]
fn every_leaf_has_inlines_parsed() {
    let doc = parse_document(SAMPLE, &Options::default());
    for id in doc.descendants() {
        let ast = doc.get(id);
        if ast.value.contains_inlines() && !ast.content().trim().is_empty() {
            assert!(!ast.inlines.is_empty(), "no inlines for {:?}", ast.value);
        } else if !ast.value.contains_inlines() {
            assert!(ast.inlines.is_empty());
        }
    }
}

#[test]
fn parents_and_children_agree() {
    let doc = parse_document(SAMPLE, &Options::default());
    for id in doc.descendants() {
        for child in doc.children(id) {
            assert_eq!(doc.parent(child), Some(id));
        }
    }
    assert_eq!(doc.parent(doc.root()), None);
}
