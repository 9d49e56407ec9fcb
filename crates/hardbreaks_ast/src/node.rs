//! Node definition.
//!
//! The core tree node type used throughout hardbreaks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{NodeType, Position};

/// A node in an mdast-style tree.
///
/// A node with `children` is a parent, a node without is a leaf. Text-like
/// leaves carry a `value`. Any other field (`depth`, `lang`, `url`, ...)
/// is kept in `data` and serialized back at the top level, so a tree read
/// from JSON is written out unchanged apart from the transforms applied to
/// it.
///
/// # Example
///
/// ```rust
/// use hardbreaks_ast::{Node, NodeType};
///
/// let heading = Node::new_parent(NodeType::Heading, vec![Node::text("Title")])
///     .with_data("depth", 1);
///
/// let json = serde_json::to_value(&heading).unwrap();
/// assert_eq!(json["type"], "heading");
/// assert_eq!(json["depth"], 1);
/// assert_eq!(json["children"][0]["value"], "Title");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// The type tag of this node.
    #[serde(rename = "type")]
    pub node_type: String,

    /// Text value (for literal nodes like text, inlineCode, code).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Child nodes (for parent nodes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    /// Source position, when the node came from a parser.
    ///
    /// Kept as raw JSON so that positions with extra keys or partial points
    /// survive a round trip; [`Node::position`] reads the typed form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,

    /// Additional node-specific fields.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Node {
    /// Creates a new parent node with children.
    pub fn new_parent(node_type: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            node_type: node_type.into(),
            value: None,
            children: Some(children),
            position: None,
            data: Map::new(),
        }
    }

    /// Creates a new literal node with a value.
    pub fn new_literal(node_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            value: Some(value.into()),
            children: None,
            position: None,
            data: Map::new(),
        }
    }

    /// Creates a new leaf node (no children, no value).
    pub fn new_leaf(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            value: None,
            children: None,
            position: None,
            data: Map::new(),
        }
    }

    /// Creates a `text` node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::new_literal(NodeType::Text, value)
    }

    /// Sets an additional field.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Sets the source position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = serde_json::to_value(position).ok();
        self
    }

    /// Returns the source position, if present and in the unist shape.
    pub fn position(&self) -> Option<Position> {
        self.position
            .as_ref()
            .and_then(|p| Position::deserialize(p).ok())
    }

    /// Returns true if this node has the given type.
    #[inline]
    pub fn is(&self, node_type: impl AsRef<str>) -> bool {
        self.node_type == node_type.as_ref()
    }

    /// Returns true if this node is a parent (has a children list, even an empty one).
    #[inline]
    pub fn is_parent(&self) -> bool {
        self.children.is_some()
    }

    /// Returns true if this node has at least one child.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Returns the text value of a literal node.
    #[inline]
    pub fn text_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the children, or an empty slice for leaves.
    #[inline]
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns the children list for mutation, `None` for leaves.
    #[inline]
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.children.as_mut()
    }

    /// Looks up a field by its serialized name.
    ///
    /// `type`, `value` and `position` resolve to the typed fields, anything
    /// else to `data`. `children` never resolves: children are compared by
    /// identity in unist tests, so they cannot equal a given value.
    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            "type" => Some(Value::String(self.node_type.clone())),
            "value" => self.value.clone().map(Value::String),
            "position" => self.position.clone(),
            "children" => None,
            _ => self.data.get(key).cloned(),
        }
    }

    /// Concatenates the values of all literal descendants, in document order.
    pub fn to_plain_string(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(value) = &self.value {
            out.push_str(value);
        }
        for child in self.children() {
            child.collect_text(out);
        }
    }
}
