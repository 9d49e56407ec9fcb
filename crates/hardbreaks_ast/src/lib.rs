//! # hardbreaks_ast
//!
//! Node tree definitions for hardbreaks.
//!
//! The tree follows the unist/mdast shape: every node carries a `type`
//! tag, leaves may carry a textual `value`, parents carry ordered
//! `children`. Unlike an arena-backed AST, nodes are owned values so that
//! tree transforms can splice children in place.
//!
//! ## Example
//!
//! ```rust
//! use hardbreaks_ast::{Node, NodeType};
//!
//! let paragraph = Node::new_parent(
//!     NodeType::Paragraph,
//!     vec![Node::text("hello"), Node::new_leaf(NodeType::Break)],
//! );
//!
//! assert!(paragraph.is_parent());
//! assert_eq!(paragraph.children().len(), 2);
//! assert!(paragraph.children()[1].is(NodeType::Break));
//! ```

mod node;
mod node_type;
mod position;

pub use node::Node;
pub use node_type::NodeType;
pub use position::{Point, Position};
