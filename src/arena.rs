//! An index-based tree.
//!
//! Nodes live in one `Vec` owned by the [`Arena`]; every link between them
//! (parent, siblings, children) is a [`NodeId`]. Nodes are never freed, so
//! an id stays valid for the life of its arena. Detaching a node only
//! unlinks it.

use std::fmt;

/// A handle to a node in an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The node's position in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node inside the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    parent: Option<NodeId>,
    previous_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,

    /// The data held by the node.
    pub data: T,
}

impl<T> Node<T> {
    fn new(data: T) -> Node<T> {
        Node {
            parent: None,
            previous_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arena<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena { nodes: Vec::new() }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, unlinked node.
    pub fn alloc(&mut self, data: T) -> NodeId {
        self.nodes.push(Node::new(data));
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> &T {
        &self.nodes[id.0].data
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id.0].data
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].last_child
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].previous_sibling
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }

    /// The node's ancestors, starting with its parent.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            arena: self,
            next: self.parent(id),
        }
    }

    pub fn children(&self, id: NodeId) -> Children<'_, T> {
        Children {
            arena: self,
            next: self.first_child(id),
        }
    }

    /// The node and everything below it, in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_, T> {
        Descendants {
            arena: self,
            root: id,
            next: Some(id),
        }
    }

    /// Unlinks a node (and its subtree) from its parent and siblings.
    pub fn detach(&mut self, id: NodeId) {
        let parent = self.nodes[id.0].parent.take();
        let previous_sibling = self.nodes[id.0].previous_sibling.take();
        let next_sibling = self.nodes[id.0].next_sibling.take();

        if let Some(next_sibling) = next_sibling {
            self.nodes[next_sibling.0].previous_sibling = previous_sibling;
        } else if let Some(parent) = parent {
            self.nodes[parent.0].last_child = previous_sibling;
        }

        if let Some(previous_sibling) = previous_sibling {
            self.nodes[previous_sibling.0].next_sibling = next_sibling;
        } else if let Some(parent) = parent {
            self.nodes[parent.0].first_child = next_sibling;
        }
    }

    /// Appends a new child, detaching it first.
    pub fn append(&mut self, parent: NodeId, new_child: NodeId) {
        self.detach(new_child);
        self.nodes[new_child.0].parent = Some(parent);
        if let Some(last_child) = self.nodes[parent.0].last_child.take() {
            self.nodes[new_child.0].previous_sibling = Some(last_child);
            self.nodes[last_child.0].next_sibling = Some(new_child);
        } else {
            self.nodes[parent.0].first_child = Some(new_child);
        }
        self.nodes[parent.0].last_child = Some(new_child);
    }

    /// Inserts a new sibling after `id`, detaching it first.
    pub fn insert_after(&mut self, id: NodeId, new_sibling: NodeId) {
        self.detach(new_sibling);
        let parent = self.nodes[id.0].parent;
        self.nodes[new_sibling.0].parent = parent;
        self.nodes[new_sibling.0].previous_sibling = Some(id);
        if let Some(next_sibling) = self.nodes[id.0].next_sibling.take() {
            self.nodes[next_sibling.0].previous_sibling = Some(new_sibling);
            self.nodes[new_sibling.0].next_sibling = Some(next_sibling);
        } else if let Some(parent) = parent {
            self.nodes[parent.0].last_child = Some(new_sibling);
        }
        self.nodes[id.0].next_sibling = Some(new_sibling);
    }

    /// Inserts a new sibling before `id`, detaching it first.
    pub fn insert_before(&mut self, id: NodeId, new_sibling: NodeId) {
        self.detach(new_sibling);
        let parent = self.nodes[id.0].parent;
        self.nodes[new_sibling.0].parent = parent;
        self.nodes[new_sibling.0].next_sibling = Some(id);
        if let Some(previous_sibling) = self.nodes[id.0].previous_sibling.take() {
            self.nodes[new_sibling.0].previous_sibling = Some(previous_sibling);
            self.nodes[previous_sibling.0].next_sibling = Some(new_sibling);
        } else if let Some(parent) = parent {
            self.nodes[parent.0].first_child = Some(new_sibling);
        }
        self.nodes[id.0].previous_sibling = Some(new_sibling);
    }
}

#[derive(Debug)]
pub struct Ancestors<'a, T> {
    arena: &'a Arena<T>,
    next: Option<NodeId>,
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next.take()?;
        self.next = self.arena.parent(node);
        Some(node)
    }
}

#[derive(Debug)]
pub struct Children<'a, T> {
    arena: &'a Arena<T>,
    next: Option<NodeId>,
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next.take()?;
        self.next = self.arena.next_sibling(node);
        Some(node)
    }
}

#[derive(Debug)]
pub struct Descendants<'a, T> {
    arena: &'a Arena<T>,
    root: NodeId,
    next: Option<NodeId>,
}

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next.take()?;
        let (arena, root) = (self.arena, self.root);

        self.next = arena.first_child(node).or_else(|| {
            let mut current = node;
            loop {
                if current == root {
                    return None;
                }
                if let Some(sibling) = arena.next_sibling(current) {
                    return Some(sibling);
                }
                current = arena.parent(current)?;
            }
        });

        Some(node)
    }
}
