//! Depth-first traversal with ancestor information.
//!
//! [`walk`] visits nodes in preorder (NLR), [`walk_reverse`] in reverse
//! preorder (NRL). The visitor decides how to go on through the returned
//! [`Action`], and may restructure the tree while it is being walked:
//!
//! - the walker keeps the position of the current node as a path of child
//!   indices from the root instead of holding references into the tree;
//! - the length of a parent's children is re-read on every step of its
//!   sibling loop, so splices made by the visitor are seen immediately;
//! - a visitor that replaced the current node reports where to resume
//!   with [`Action::Resume`], so inserted nodes are neither skipped nor
//!   visited twice.
//!
//! # Example
//!
//! ```rust
//! use hardbreaks_ast::{Node, NodeType};
//! use hardbreaks_core::walk::{Action, walk};
//!
//! let mut tree = Node::new_parent(
//!     NodeType::Paragraph,
//!     vec![Node::text("a"), Node::new_leaf(NodeType::Break), Node::text("b")],
//! );
//!
//! // Drop every break, resuming at the slot the removed node occupied.
//! walk(&mut tree, NodeType::Break, |visit| {
//!     let index = visit.index().unwrap_or_default();
//!     if let Some(children) = visit.parent_mut().and_then(Node::children_mut) {
//!         children.remove(index);
//!     }
//!     Action::Resume(index)
//! });
//!
//! assert_eq!(tree.to_plain_string(), "ab");
//! assert_eq!(tree.children().len(), 2);
//! ```

use hardbreaks_ast::Node;

use crate::node_test::{Check, NodeTest};

/// What the walker should do after a visitor returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Continue traversing as normal, into the node's children.
    #[default]
    Continue,
    /// Do not traverse this node's children.
    Skip,
    /// Stop traversing immediately.
    Exit,
    /// Continue with the sibling at this index.
    ///
    /// Unlike [`Action::Continue`], the children of the node just visited
    /// are not walked. The walker does not descend into the slot the visitor
    /// reported from, since that slot may now hold a different node.
    Resume(usize),
}

impl From<()> for Action {
    fn from(_: ()) -> Self {
        Action::Continue
    }
}

impl From<bool> for Action {
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Action::Continue
        } else {
            Action::Exit
        }
    }
}

impl From<usize> for Action {
    fn from(index: usize) -> Self {
        Action::Resume(index)
    }
}

/// The node being visited, with access to its surroundings.
///
/// Lookups go through the index path from the root, so they reflect any
/// change the visitor has already made. After removing the current node,
/// [`Visit::node`] returns whatever now sits in its slot, or `None`.
///
/// A visitor that inserts or removes siblings, the current node included,
/// must say where to go on with [`Action::Resume`]. Returning
/// [`Action::Continue`] descends into whatever now occupies the slot.
pub struct Visit<'t> {
    root: &'t mut Node,
    path: &'t [usize],
}

impl<'t> Visit<'t> {
    /// Child indices leading from the root to this node.
    #[inline]
    pub fn path(&self) -> &[usize] {
        self.path
    }

    /// Index of this node in its parent, `None` for the root.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.path.last().copied()
    }

    /// Number of ancestors.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The node being visited.
    pub fn node(&self) -> Option<&Node> {
        node_at(&*self.root, self.path)
    }

    /// The node being visited, for mutation.
    pub fn node_mut(&mut self) -> Option<&mut Node> {
        node_at_mut(&mut *self.root, self.path)
    }

    /// The immediate parent, `None` for the root.
    pub fn parent(&self) -> Option<&Node> {
        let (_, parent_path) = self.path.split_last()?;
        node_at(&*self.root, parent_path)
    }

    /// The immediate parent, for mutation.
    pub fn parent_mut(&mut self) -> Option<&mut Node> {
        let (_, parent_path) = self.path.split_last()?;
        node_at_mut(&mut *self.root, parent_path)
    }

    /// Ancestors from the root down to the immediate parent.
    pub fn ancestors(&self) -> Vec<&Node> {
        let mut ancestors = Vec::with_capacity(self.path.len());
        let mut current: &Node = &*self.root;
        for &index in self.path {
            ancestors.push(current);
            match current.children().get(index) {
                Some(child) => current = child,
                None => break,
            }
        }
        ancestors
    }
}

/// Visits `tree` in preorder, calling `visitor` for each node passing `test`.
pub fn walk<F, R>(tree: &mut Node, test: impl Into<NodeTest>, visitor: F)
where
    F: FnMut(&mut Visit<'_>) -> R,
    R: Into<Action>,
{
    Walker::new(test.into().check(), visitor, false).run(tree);
}

/// Visits `tree` in reverse preorder (children right to left).
pub fn walk_reverse<F, R>(tree: &mut Node, test: impl Into<NodeTest>, visitor: F)
where
    F: FnMut(&mut Visit<'_>) -> R,
    R: Into<Action>,
{
    Walker::new(test.into().check(), visitor, true).run(tree);
}

/// Outcome of visiting one subtree.
enum Step {
    Exit,
    Next(Option<usize>),
}

struct Walker<F> {
    check: Check,
    visitor: F,
    reverse: bool,
}

impl<F, R> Walker<F>
where
    F: FnMut(&mut Visit<'_>) -> R,
    R: Into<Action>,
{
    fn new(check: Check, visitor: F, reverse: bool) -> Self {
        Self {
            check,
            visitor,
            reverse,
        }
    }

    fn run(&mut self, tree: &mut Node) {
        let mut path = Vec::new();
        self.step(tree, &mut path);
    }

    fn step(&mut self, root: &mut Node, path: &mut Vec<usize>) -> Step {
        let passes = {
            let tree: &Node = root;
            let Some(node) = node_at(tree, path) else {
                return Step::Next(None);
            };
            let parent = path
                .split_last()
                .and_then(|(_, parent_path)| node_at(tree, parent_path));
            self.check.matches(node, path.last().copied(), parent)
        };

        if passes {
            let mut visit = Visit {
                root: &mut *root,
                path: path.as_slice(),
            };
            match (self.visitor)(&mut visit).into() {
                Action::Continue => {}
                Action::Skip => return Step::Next(None),
                Action::Exit => return Step::Exit,
                Action::Resume(index) => return Step::Next(Some(index)),
            }
        }

        let Some(len) = child_count(root, path) else {
            return Step::Next(None);
        };
        let step: isize = if self.reverse { -1 } else { 1 };
        let mut offset: isize = if self.reverse { len as isize - 1 } else { 0 };

        while let Some(len) = child_count(root, path) {
            if offset < 0 || offset as usize >= len {
                break;
            }

            path.push(offset as usize);
            let result = self.step(root, path);
            path.pop();

            match result {
                Step::Exit => return Step::Exit,
                Step::Next(Some(index)) => offset = index as isize,
                Step::Next(None) => offset += step,
            }
        }

        Step::Next(None)
    }
}

fn node_at<'n>(root: &'n Node, path: &[usize]) -> Option<&'n Node> {
    path.iter()
        .try_fold(root, |node, &index| node.children().get(index))
}

fn node_at_mut<'n>(root: &'n mut Node, path: &[usize]) -> Option<&'n mut Node> {
    path.iter()
        .try_fold(root, |node, &index| node.children.as_mut()?.get_mut(index))
}

fn child_count(root: &Node, path: &[usize]) -> Option<usize> {
    node_at(root, path)?.children.as_ref().map(Vec::len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardbreaks_ast::NodeType;
    use pretty_assertions::assert_eq;

    /// `root{a{x,y},b}`, with names stored in `value`.
    fn sample() -> Node {
        let named = |name: &str| Node::new_leaf("leaf").with_data("name", name);
        let parent = |name: &str, children: Vec<Node>| {
            Node::new_parent("parent", children).with_data("name", name)
        };

        parent(
            "root",
            vec![parent("a", vec![named("x"), named("y")]), named("b")],
        )
    }

    fn name(visit: &Visit<'_>) -> String {
        visit
            .node()
            .and_then(|n| n.data.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    fn visited_with<F>(tree: &mut Node, reverse: bool, mut decide: F) -> Vec<String>
    where
        F: FnMut(&str) -> Action,
    {
        let mut seen = Vec::new();
        let visitor = |visit: &mut Visit<'_>| {
            let name = name(visit);
            let action = decide(&name);
            seen.push(name);
            action
        };
        if reverse {
            walk_reverse(tree, NodeTest::Any, visitor);
        } else {
            walk(tree, NodeTest::Any, visitor);
        }
        seen
    }

    #[test]
    fn test_preorder() {
        let seen = visited_with(&mut sample(), false, |_| Action::Continue);
        assert_eq!(seen, vec!["root", "a", "x", "y", "b"]);
    }

    #[test]
    fn test_reverse_preorder() {
        let seen = visited_with(&mut sample(), true, |_| Action::Continue);
        assert_eq!(seen, vec!["root", "b", "a", "y", "x"]);
    }

    #[test]
    fn test_skip() {
        let seen = visited_with(&mut sample(), false, |name| {
            if name == "a" {
                Action::Skip
            } else {
                Action::Continue
            }
        });
        assert_eq!(seen, vec!["root", "a", "b"]);
    }

    #[test]
    fn test_exit() {
        let seen = visited_with(&mut sample(), false, |name| {
            if name == "x" {
                Action::Exit
            } else {
                Action::Continue
            }
        });
        assert_eq!(seen, vec!["root", "a", "x"]);
    }

    #[test]
    fn test_visitor_return_conversions() {
        let mut tree = sample();
        let mut count = 0;
        walk(&mut tree, NodeTest::Any, |_| {
            count += 1;
        });
        assert_eq!(count, 5);

        let mut count = 0;
        walk(&mut tree, NodeTest::Any, |_| {
            count += 1;
            count < 2
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_filter_still_descends_into_unmatched_nodes() {
        let mut tree = sample();
        let mut seen = Vec::new();
        walk(&mut tree, "leaf", |visit| seen.push(name(visit)));
        assert_eq!(seen, vec!["x", "y", "b"]);
    }

    #[test]
    fn test_root_has_no_ancestors() {
        let mut tree = sample();
        let mut checked = false;
        walk(&mut tree, NodeTest::Any, |visit| {
            if visit.depth() == 0 {
                assert!(visit.ancestors().is_empty());
                assert_eq!(visit.index(), None);
                assert!(visit.parent().is_none());
                checked = true;
            }
        });
        assert!(checked);
    }

    #[test]
    fn test_ancestor_path() {
        let mut tree = sample();
        let mut paths = Vec::new();
        walk(&mut tree, "leaf", |visit| {
            let ancestors: Vec<String> = visit
                .ancestors()
                .iter()
                .map(|n| n.data["name"].as_str().unwrap_or_default().to_string())
                .collect();
            paths.push((name(visit), ancestors, visit.index()));
        });

        assert_eq!(
            paths,
            vec![
                ("x".to_string(), vec!["root".to_string(), "a".to_string()], Some(0)),
                ("y".to_string(), vec!["root".to_string(), "a".to_string()], Some(1)),
                ("b".to_string(), vec!["root".to_string()], Some(1)),
            ]
        );
    }

    #[test]
    fn test_delete_and_resume_at_same_index() {
        let mut tree = Node::new_parent(
            NodeType::Root,
            vec![
                Node::text("keep-1"),
                Node::text("drop-1"),
                Node::text("drop-2"),
                Node::text("keep-2"),
            ],
        );

        let mut seen = Vec::new();
        walk(&mut tree, NodeType::Text, |visit| {
            let value = visit.node().and_then(|n| n.value.clone()).unwrap_or_default();
            seen.push(value.clone());
            if value.starts_with("drop") {
                let index = visit.index().unwrap_or_default();
                if let Some(children) = visit.parent_mut().and_then(Node::children_mut) {
                    children.remove(index);
                }
                return Action::Resume(index);
            }
            Action::Continue
        });

        assert_eq!(seen, vec!["keep-1", "drop-1", "drop-2", "keep-2"]);
        assert_eq!(tree.to_plain_string(), "keep-1keep-2");
    }

    #[test]
    fn test_insert_and_resume_after_inserted() {
        let mut tree = Node::new_parent(
            NodeType::Paragraph,
            vec![Node::text("a|b"), Node::text("c")],
        );

        let mut seen = Vec::new();
        walk(&mut tree, NodeType::Text, |visit| {
            let value = visit.node().and_then(|n| n.value.clone()).unwrap_or_default();
            seen.push(value.clone());
            let index = visit.index().unwrap_or_default();
            let parts: Vec<Node> = value.split('|').map(Node::text).collect();
            let produced = parts.len();
            if let Some(children) = visit.parent_mut().and_then(Node::children_mut) {
                children.splice(index..=index, parts);
            }
            Action::Resume(index + produced)
        });

        assert_eq!(seen, vec!["a|b", "c"]);
        assert_eq!(tree.children().len(), 3);
    }

    #[test]
    fn test_resume_backwards_revisits() {
        let mut tree = Node::new_parent(NodeType::Root, vec![Node::text("a"), Node::text("b")]);

        let mut seen = Vec::new();
        let mut rewound = false;
        walk(&mut tree, NodeType::Text, |visit| {
            let value = visit.node().and_then(|n| n.value.clone()).unwrap_or_default();
            seen.push(value.clone());
            if value == "b" && !rewound {
                rewound = true;
                return Action::Resume(0);
            }
            Action::Continue
        });

        assert_eq!(seen, vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn test_resume_does_not_descend() {
        let seen = visited_with(&mut sample(), false, |name| match name {
            "a" => Action::Resume(1),
            _ => Action::Continue,
        });
        assert_eq!(seen, vec!["root", "a", "b"]);
    }

    #[test]
    fn test_reverse_delete_and_resume() {
        let mut tree = Node::new_parent(
            NodeType::Root,
            vec![Node::text("a"), Node::text("drop"), Node::text("c")],
        );

        let mut seen = Vec::new();
        walk_reverse(&mut tree, NodeType::Text, |visit| {
            let value = visit.node().and_then(|n| n.value.clone()).unwrap_or_default();
            seen.push(value.clone());
            if value == "drop" {
                let index = visit.index().unwrap_or_default();
                if let Some(children) = visit.parent_mut().and_then(Node::children_mut) {
                    children.remove(index);
                }
                return Action::Resume(index - 1);
            }
            Action::Continue
        });

        assert_eq!(seen, vec!["c", "drop", "a"]);
        assert_eq!(tree.to_plain_string(), "ac");
    }

    #[test]
    fn test_reverse_insert_and_resume_before_inserted() {
        let mut tree = Node::new_parent(
            NodeType::Paragraph,
            vec![Node::text("a"), Node::text("b|c")],
        );

        let mut seen = Vec::new();
        walk_reverse(&mut tree, NodeType::Text, |visit| {
            let value = visit.node().and_then(|n| n.value.clone()).unwrap_or_default();
            seen.push(value.clone());
            let index = visit.index().unwrap_or_default();
            if value.contains('|') {
                let parts: Vec<Node> = value.split('|').map(Node::text).collect();
                if let Some(children) = visit.parent_mut().and_then(Node::children_mut) {
                    children.splice(index..=index, parts);
                }
            }
            match index.checked_sub(1) {
                Some(previous) => Action::Resume(previous),
                None => Action::Skip,
            }
        });

        assert_eq!(seen, vec!["b|c", "a"]);
        assert_eq!(tree.to_plain_string(), "abc");
    }

    #[test]
    fn test_node_mut_changes_are_kept() {
        let mut tree = sample();
        walk(&mut tree, "leaf", |visit| {
            if let Some(node) = visit.node_mut() {
                node.value = Some("seen".to_string());
            }
        });

        assert_eq!(tree.to_plain_string(), "seenseenseen");
    }

    #[test]
    fn test_children_added_during_visit_are_walked() {
        let mut tree = Node::new_parent(NodeType::Root, vec![]);
        let mut seen = Vec::new();

        walk(&mut tree, NodeTest::Any, |visit| {
            seen.push(visit.node().map(|n| n.node_type.clone()).unwrap_or_default());
            if visit.depth() == 0 {
                if let Some(children) = visit.node_mut().and_then(Node::children_mut) {
                    children.push(Node::text("late"));
                }
            }
        });

        assert_eq!(seen, vec!["root", "text"]);
    }
}
