//! Rewrites applied to the raw block tree before inline parsing.
//!
//! The block engine leaves link reference definitions inside paragraphs,
//! blank lines where they fell and list items without any list around them.
//! The passes here run in a fixed order, each over a post-order snapshot of
//! the tree, repeated until nothing changes.

use tracing::debug;

use crate::arena::{Arena, NodeId};
use crate::nodes::{Ast, NodeList, NodeParagraph, NodeValue};
use crate::parser::links::{self, RefMap};

// Every pass settles in one or two rounds; the bound only guards against a
// pass that keeps reporting changes.
const MAX_ROUNDS: usize = 8;

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn normalize(arena: &mut Arena<Ast>, root: NodeId) -> RefMap {
    let mut refmap = RefMap::default();

    to_fixpoint(|| extract_reference_definitions(arena, root, &mut refmap));
    to_fixpoint(|| propagate_blank_lines(arena, root));
    to_fixpoint(|| group_list_items(arena, root));
    to_fixpoint(|| merge_paragraphs(arena, root));

    debug!(
        definitions = refmap.len(),
        nodes = arena.descendants(root).count(),
        "normalized block tree"
    );
    refmap
}

fn to_fixpoint<F: FnMut() -> bool>(mut pass: F) {
    for _ in 0..MAX_ROUNDS {
        if !pass() {
            return;
        }
    }
}

fn post_order(arena: &Arena<Ast>, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![(root, false)];

    while let Some((node, visited)) = stack.pop() {
        if visited {
            out.push(node);
            continue;
        }
        stack.push((node, true));
        let children: Vec<NodeId> = arena.children(node).collect();
        for child in children.into_iter().rev() {
            stack.push((child, false));
        }
    }

    out
}

fn is_plain_paragraph(value: &NodeValue) -> bool {
    matches!(value, NodeValue::Paragraph(NodeParagraph { setext: None }))
}

/// Strips leading definitions from every paragraph, in document order, so
/// the first definition of a label wins.  Paragraphs left empty go away,
/// unless they carry a setext underline.
fn extract_reference_definitions(
    arena: &mut Arena<Ast>,
    root: NodeId,
    refmap: &mut RefMap,
) -> bool {
    let mut changed = false;

    for node in post_order(arena, root) {
        let ast = arena.get_mut(node);
        let setext = match ast.value {
            NodeValue::Paragraph(NodeParagraph { setext }) => setext.is_some(),
            _ => continue,
        };
        if !ast.content.starts_with('[') {
            continue;
        }

        let before = ast.content.len();
        let has_content = links::extract_reference_definitions(&mut ast.content, refmap);
        if ast.content.len() == before {
            continue;
        }
        changed = true;

        if !has_content && !setext {
            arena.detach(node);
        }
    }

    changed
}

/// Moves a blank line that ends a list item out to follow the item, merging
/// it with a blank line already there.  Nested items are handled first, so
/// a blank line can climb through several levels of items.
fn propagate_blank_lines(arena: &mut Arena<Ast>, root: NodeId) -> bool {
    let mut changed = false;

    for item in post_order(arena, root) {
        if !matches!(arena.get(item).value, NodeValue::Item(..)) {
            continue;
        }
        let Some(blank) = arena.last_child(item) else {
            continue;
        };
        let NodeValue::BlankLine(count) = arena.get(blank).value else {
            continue;
        };

        changed = true;
        match arena.next_sibling(item) {
            Some(next) if arena.get(next).value.is_blank_line() => {
                arena.detach(blank);
                if let NodeValue::BlankLine(ref mut n) = arena.get_mut(next).value {
                    *n += count;
                }
            }
            _ => arena.insert_after(item, blank),
        }
    }

    changed
}

/// Wraps each run of items of one marker family in a list.  Blank lines
/// between the items go inside the list; one trailing blank line is moved
/// back out after it.
fn group_list_items(arena: &mut Arena<Ast>, root: NodeId) -> bool {
    let mut changed = false;

    for container in post_order(arena, root) {
        if !matches!(
            arena.get(container).value,
            NodeValue::Document | NodeValue::BlockQuote | NodeValue::Item(..)
        ) {
            continue;
        }

        let children: Vec<NodeId> = arena.children(container).collect();
        let mut open_list: Option<(NodeId, NodeList)> = None;

        for child in children {
            match arena.get(child).value {
                NodeValue::Item(nl) => {
                    if let Some((list, family)) = open_list {
                        if family.same_family(&nl) {
                            arena.append(list, child);
                            continue;
                        }
                        close_list(arena, list);
                    }

                    let start_line = arena.get(child).start_line;
                    let mut ast = Ast::new(NodeValue::List(nl), start_line);
                    ast.open = false;
                    let list = arena.alloc(ast);
                    arena.insert_before(child, list);
                    arena.append(list, child);
                    open_list = Some((list, nl));
                    changed = true;
                }
                NodeValue::BlankLine(..) if open_list.is_some() => {
                    if let Some((list, _)) = open_list {
                        arena.append(list, child);
                    }
                }
                _ => {
                    if let Some((list, _)) = open_list.take() {
                        close_list(arena, list);
                    }
                }
            }
        }

        if let Some((list, _)) = open_list {
            close_list(arena, list);
        }
    }

    changed
}

fn close_list(arena: &mut Arena<Ast>, list: NodeId) {
    if let Some(last) = arena.last_child(list) {
        if arena.get(last).value.is_blank_line() {
            arena.insert_after(list, last);
        }
    }

    let loose = arena.children(list).any(|child| {
        arena.get(child).value.is_blank_line()
            || arena
                .children(child)
                .any(|grandchild| arena.get(grandchild).value.is_blank_line())
    });

    if let NodeValue::List(ref mut nl) = arena.get_mut(list).value {
        nl.tight = !loose;
    }
}

/// Joins each plain paragraph with the plain paragraph right after it.
fn merge_paragraphs(arena: &mut Arena<Ast>, root: NodeId) -> bool {
    let mut changed = false;

    for node in post_order(arena, root) {
        // Already merged into a predecessor.
        if arena.parent(node).is_none() || !is_plain_paragraph(&arena.get(node).value) {
            continue;
        }

        while let Some(next) = arena
            .next_sibling(node)
            .filter(|&n| is_plain_paragraph(&arena.get(n).value))
        {
            let content = std::mem::take(&mut arena.get_mut(next).content);
            arena.get_mut(node).content.push_str(&content);
            arena.detach(next);
            changed = true;
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse_document, Options};

    fn outline(md: &str) -> String {
        parse_document(md, &Options::default()).outline()
    }

    #[test]
    fn definitions_leave_no_paragraph() {
        assert_eq!(outline("[a]: /b\n"), "document\n");
        assert_eq!(
            outline("[a]: /b\nBar\n===\n"),
            "document\n  setext_heading 1\n"
        );
    }

    #[test]
    fn items_are_grouped_by_family() {
        assert_eq!(
            outline("- a\n- b\n+ c\n"),
            "document\n  list bullet tight\n    item\n      paragraph\n    item\n      paragraph\n  list bullet tight\n    item\n      paragraph\n"
        );
        assert_eq!(
            outline("1. a\n2) b\n"),
            "document\n  list ordered tight\n    item\n      paragraph\n  list ordered tight\n    item\n      paragraph\n"
        );
    }

    #[test]
    fn blank_between_items_is_loose() {
        assert_eq!(
            outline("- a\n\n- b\n"),
            "document\n  list bullet loose\n    item\n      paragraph\n    blank_line 1\n    item\n      paragraph\n"
        );
    }

    #[test]
    fn trailing_blank_leaves_the_list() {
        assert_eq!(
            outline("- a\n- b\n\n\nc\n"),
            "document\n  list bullet tight\n    item\n      paragraph\n    item\n      paragraph\n  blank_line 2\n  paragraph\n"
        );
    }

    #[test]
    fn blank_climbs_out_of_nested_items() {
        assert_eq!(
            outline("- a\n  - b\n\n- c\n"),
            "document\n  list bullet loose\n    item\n      paragraph\n      list bullet tight\n        item\n          paragraph\n    blank_line 1\n    item\n      paragraph\n"
        );
    }

    #[test]
    fn blank_inside_item_makes_it_loose() {
        assert_eq!(
            outline("- a\n\n  b\n- c\n"),
            "document\n  list bullet loose\n    item\n      paragraph\n      blank_line 1\n      paragraph\n    item\n      paragraph\n"
        );
    }
}
