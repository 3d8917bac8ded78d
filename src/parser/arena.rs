//! In-progress tree storage for the parser
//!
//! Nodes live in a flat vector and are addressed by [`NodeId`]. Anything the
//! parser holds onto (the paren stack, the indentation stack, the last attached
//! term, the pairing receptacle) is an index, so rewriting a node in place
//! never invalidates those holders.

use crate::base::{Position, TextSize};
use crate::term::Term;

/// Stable handle to a node in an [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Atom(String),
    List(Vec<NodeId>),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    position: Position,
    offset: TextSize,
}

#[derive(Debug)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    /// The list of root lines, created with the arena
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::List(Vec::new()),
                position: Position::default(),
                offset: TextSize::new(0),
            }],
        }
    }

    pub fn atom(&mut self, value: String, position: Position, offset: TextSize) -> NodeId {
        self.alloc(NodeKind::Atom(value), position, offset)
    }

    pub fn list(&mut self, position: Position, offset: TextSize) -> NodeId {
        self.alloc(NodeKind::List(Vec::new()), position, offset)
    }

    fn alloc(&mut self, kind: NodeKind, position: Position, offset: TextSize) -> NodeId {
        self.nodes.push(Node {
            kind,
            position,
            offset,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn position(&self, id: NodeId) -> Position {
        self.nodes[id.0].position
    }

    pub fn offset(&self, id: NodeId) -> TextSize {
        self.nodes[id.0].offset
    }

    /// Append `child` to `parent`, upgrading `parent` first if it is an atom
    pub fn push_child(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Atom(_) = self.nodes[parent.0].kind {
            self.upgrade(parent);
        }
        if let NodeKind::List(children) = &mut self.nodes[parent.0].kind {
            children.push(child);
        }
    }

    /// Re-tag `id` as a one-element list whose element is what `id` held before
    ///
    /// `id` keeps its position and its place in its parent; the old content
    /// moves to a fresh node.
    pub fn upgrade(&mut self, id: NodeId) {
        let (position, offset) = (self.nodes[id.0].position, self.nodes[id.0].offset);
        let old = std::mem::replace(&mut self.nodes[id.0].kind, NodeKind::List(Vec::new()));
        let moved = self.alloc(old, position, offset);
        self.nodes[id.0].kind = NodeKind::List(vec![moved]);
    }

    /// If `line` is a list with exactly one element, put that element in
    /// `line`'s slot within `parent`; returns whether anything changed
    pub fn collapse(&mut self, parent: NodeId, line: NodeId) -> bool {
        let sole = match &self.nodes[line.0].kind {
            NodeKind::List(children) if children.len() == 1 => children[0],
            _ => return false,
        };
        let NodeKind::List(siblings) = &mut self.nodes[parent.0].kind else {
            return false;
        };
        match siblings.iter().rposition(|&s| s == line) {
            Some(slot) => {
                siblings[slot] = sole;
                true
            }
            None => false,
        }
    }

    /// The first node, in document order, lying more than `limit` levels
    /// below the root
    ///
    /// Walks with an explicit stack, so it is safe on any depth; [`build`](Self::build)
    /// is only called once this has found nothing.
    pub fn find_deeper_than(&self, limit: usize) -> Option<NodeId> {
        let mut stack = vec![(Self::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if depth > limit {
                return Some(id);
            }
            if let NodeKind::List(children) = &self.nodes[id.0].kind {
                stack.extend(children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        None
    }

    /// Convert the subtree at `id` into an immutable [`Term`]
    pub fn build(&self, id: NodeId) -> Term {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Atom(value) => Term::atom_at(value.as_str(), node.position),
            NodeKind::List(children) => Term::list_at(
                children.iter().map(|&c| self.build(c)).collect::<Vec<_>>(),
                node.position,
            ),
        }
    }
}
