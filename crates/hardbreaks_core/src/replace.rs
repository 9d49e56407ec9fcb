//! Find patterns in text nodes and replace them with nodes.
//!
//! The tree is searched in preorder for `text` nodes. Each pattern pair is
//! a separate pass, so later pairs see the output of earlier ones. Matches
//! are found within a single text node; a match spanning two text nodes is
//! never found.
//!
//! # Example
//!
//! ```rust
//! use hardbreaks_ast::{Node, NodeType};
//! use hardbreaks_core::replace::{Options, find_and_replace};
//!
//! let mut tree = Node::new_parent(NodeType::Paragraph, vec![Node::text("a (c) b")]);
//!
//! find_and_replace(&mut tree, ("(c)", "©"), &Options::default()).unwrap();
//!
//! let values: Vec<_> = tree.children().iter().filter_map(Node::text_value).collect();
//! assert_eq!(values, vec!["a ", "©", " b"]);
//! ```

use std::fmt;

use hardbreaks_ast::{Node, NodeType};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::TransformError;
use crate::error::kind_of;
use crate::escape::{escape_string_regexp, escape_value};
use crate::node_test::{Check, NodeTest};
use crate::walk::{Action, Visit, walk};

/// Something to search for.
#[derive(Debug, Clone)]
pub enum Find {
    /// Literal text, matched case-sensitively, every occurrence.
    Literal(String),
    /// A compiled expression. When `global` is false only the first match
    /// in each text node is processed.
    Expression { regex: Regex, global: bool },
}

impl Find {
    /// Creates a literal find.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Creates a find processing every match of `regex`.
    pub fn global(regex: Regex) -> Self {
        Self::Expression {
            regex,
            global: true,
        }
    }

    /// Creates a find processing only the first match of `regex` per node.
    pub fn first(regex: Regex) -> Self {
        Self::Expression {
            regex,
            global: false,
        }
    }

    /// Builds a find from its JSON form.
    ///
    /// A string is a literal; `{ "regex": "...", "global": bool }` is an
    /// expression (`global` defaults to true).
    pub fn from_value(value: &Value) -> Result<Self, TransformError> {
        let Some(source) = value.as_object().and_then(|object| object.get("regex")) else {
            return Ok(Self::global(Regex::new(&escape_value(value)?)?));
        };
        let global = value
            .get("global")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let Value::String(source) = source else {
            return Err(TransformError::InvalidFind(kind_of(source).to_string()));
        };
        Ok(Self::Expression {
            regex: Regex::new(source)?,
            global,
        })
    }

    /// Turns this find into an expression and its global flag.
    fn compile(self) -> Result<(Regex, bool), TransformError> {
        match self {
            Find::Literal(text) => Ok((Regex::new(&escape_string_regexp(&text))?, true)),
            Find::Expression { regex, global } => Ok((regex, global)),
        }
    }
}

impl From<&str> for Find {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for Find {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl From<Regex> for Find {
    fn from(regex: Regex) -> Self {
        Self::global(regex)
    }
}

/// What a replacement produced for one match.
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    /// Text, wrapped in a `text` node. Empty text produces no node.
    Text(String),
    /// A single node.
    Node(Node),
    /// Zero or more nodes.
    Nodes(Vec<Node>),
    /// Not a match after all: keep the original text.
    Decline,
}

impl Replacement {
    /// Builds a replacement from its JSON form.
    ///
    /// A string is text, an object a node, an array a list of nodes,
    /// `false` declines and `null` removes the match.
    pub fn from_value(value: &Value) -> Result<Self, TransformError> {
        match value {
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map(Self::Node)
                .map_err(|e| TransformError::replacement(e.to_string())),
            Value::Array(_) => serde_json::from_value(value.clone())
                .map(Self::Nodes)
                .map_err(|e| TransformError::replacement(e.to_string())),
            Value::Bool(false) => Ok(Self::Decline),
            Value::Null => Ok(Self::Nodes(Vec::new())),
            other => Err(TransformError::replacement(format!(
                "unsupported {}",
                kind_of(other)
            ))),
        }
    }

    /// Appends the produced nodes. Returns false for [`Replacement::Decline`].
    fn append_to(self, nodes: &mut Vec<Node>) -> bool {
        match self {
            Replacement::Text(text) => {
                if !text.is_empty() {
                    nodes.push(Node::text(text));
                }
            }
            Replacement::Node(node) => nodes.push(node),
            Replacement::Nodes(produced) => nodes.extend(produced),
            Replacement::Decline => return false,
        }
        true
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Node> for Replacement {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Vec<Node>> for Replacement {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<Option<Node>> for Replacement {
    fn from(node: Option<Node>) -> Self {
        match node {
            Some(node) => Self::Node(node),
            None => Self::Nodes(Vec::new()),
        }
    }
}

/// A match handed to a replacement function.
#[derive(Debug)]
pub struct Match<'a> {
    groups: Vec<Option<&'a str>>,
    /// Byte offset of the match in `input`.
    pub index: usize,
    /// The whole value of the text node.
    pub input: &'a str,
    /// Ancestors of the text node followed by the text node itself.
    pub stack: &'a [&'a Node],
}

impl<'a> Match<'a> {
    /// The matched text.
    pub fn as_str(&self) -> &'a str {
        self.group(0).unwrap_or_default()
    }

    /// A capture group; 0 is the whole match.
    pub fn group(&self, index: usize) -> Option<&'a str> {
        self.groups.get(index).copied().flatten()
    }

    /// All capture groups, starting with the whole match.
    pub fn groups(&self) -> &[Option<&'a str>] {
        &self.groups
    }

    /// The text node being searched.
    pub fn node(&self) -> Option<&'a Node> {
        self.stack.last().copied()
    }
}

type ReplaceFn<'f> = dyn FnMut(&Match<'_>) -> Replacement + 'f;

/// How to replace a match.
pub enum Replace<'f> {
    /// The same replacement for every match.
    Value(Replacement),
    /// Compute the replacement from the match.
    With(Box<ReplaceFn<'f>>),
}

impl<'f> Replace<'f> {
    /// Creates a replacement computed by `f`.
    pub fn with<F, R>(mut f: F) -> Self
    where
        F: FnMut(&Match<'_>) -> R + 'f,
        R: Into<Replacement>,
    {
        Self::With(Box::new(move |m: &Match<'_>| f(m).into()))
    }

    fn produce(&mut self, m: &Match<'_>) -> Replacement {
        match self {
            Replace::Value(value) => value.clone(),
            Replace::With(f) => f(m),
        }
    }
}

impl fmt::Debug for Replace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replace::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Replace::With(_) => f.write_str("With(..)"),
        }
    }
}

impl From<Replacement> for Replace<'_> {
    fn from(value: Replacement) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Replace<'_> {
    fn from(text: &str) -> Self {
        Self::Value(text.into())
    }
}

impl From<String> for Replace<'_> {
    fn from(text: String) -> Self {
        Self::Value(text.into())
    }
}

impl From<Node> for Replace<'_> {
    fn from(node: Node) -> Self {
        Self::Value(node.into())
    }
}

impl From<Vec<Node>> for Replace<'_> {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Value(nodes.into())
    }
}

/// Ordered list of find/replace pairs.
#[derive(Debug, Default)]
pub struct Schema<'f> {
    pairs: Vec<(Find, Replace<'f>)>,
}

impl<'f> Schema<'f> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a pair.
    pub fn pair(mut self, find: impl Into<Find>, replace: impl Into<Replace<'f>>) -> Self {
        self.pairs.push((find.into(), replace.into()));
        self
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Builds a schema from its JSON form.
    ///
    /// An object maps literal finds to replacements, in key order. An array
    /// holds `[find, replace]` pairs; a missing replace removes the match.
    pub fn from_value(value: &Value) -> Result<Schema<'static>, TransformError> {
        let mut schema = Schema::new();
        match value {
            Value::Object(map) => {
                for (find, replace) in map {
                    schema.pairs.push((
                        Find::literal(find.as_str()),
                        Replace::Value(Replacement::from_value(replace)?),
                    ));
                }
            }
            Value::Array(entries) => {
                for entry in entries {
                    let Some(pair) = entry.as_array().filter(|pair| !pair.is_empty()) else {
                        return Err(TransformError::schema(format!(
                            "{} where a [find, replace] pair was expected",
                            kind_of(entry)
                        )));
                    };
                    let replace = pair.get(1).unwrap_or(&Value::Null);
                    schema.pairs.push((
                        Find::from_value(&pair[0])?,
                        Replace::Value(Replacement::from_value(replace)?),
                    ));
                }
            }
            other => return Err(TransformError::schema(kind_of(other))),
        }
        Ok(schema)
    }

    fn compile(self) -> Result<Vec<Pair<'f>>, TransformError> {
        self.pairs
            .into_iter()
            .map(|(find, replace)| {
                let (regex, global) = find.compile()?;
                Ok(Pair {
                    regex,
                    global,
                    replace,
                })
            })
            .collect()
    }
}

impl<'f, F, R> From<(F, R)> for Schema<'f>
where
    F: Into<Find>,
    R: Into<Replace<'f>>,
{
    fn from((find, replace): (F, R)) -> Self {
        Schema::new().pair(find, replace)
    }
}

impl<'f> From<Vec<(Find, Replace<'f>)>> for Schema<'f> {
    fn from(pairs: Vec<(Find, Replace<'f>)>) -> Self {
        Self { pairs }
    }
}

impl<'f> FromIterator<(Find, Replace<'f>)> for Schema<'f> {
    fn from_iter<I: IntoIterator<Item = (Find, Replace<'f>)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Find-and-replace configuration.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Text below an ancestor matching this test is left alone.
    pub ignore: Option<NodeTest>,
}

impl Options {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ignore test.
    pub fn ignore(mut self, test: impl Into<NodeTest>) -> Self {
        self.ignore = Some(test.into());
        self
    }
}

/// A compiled find/replace pair.
struct Pair<'f> {
    regex: Regex,
    global: bool,
    replace: Replace<'f>,
}

impl Pair<'_> {
    /// Replaces matches in `value`, returning the new nodes if any match was
    /// accepted.
    fn scan(&mut self, value: &str, stack: &[&Node]) -> Option<Vec<Node>> {
        let limit = if self.global { usize::MAX } else { 1 };
        let mut nodes = Vec::new();
        let mut start = 0;
        let mut changed = false;

        for captures in self.regex.captures_iter(value).take(limit) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let position = whole.start();
            let m = Match {
                groups: captures.iter().map(|g| g.map(|g| g.as_str())).collect(),
                index: position,
                input: value,
                stack,
            };

            let replacement = self.replace.produce(&m);
            if replacement == Replacement::Decline {
                continue;
            }

            if start != position {
                nodes.push(Node::text(&value[start..position]));
            }
            replacement.append_to(&mut nodes);
            start = whole.end();
            changed = true;
        }

        if !changed {
            return None;
        }
        if start < value.len() {
            nodes.push(Node::text(&value[start..]));
        }
        Some(nodes)
    }
}

/// Finds patterns in `tree` and replaces them.
///
/// Returns the given tree. Errors are only raised while compiling the
/// schema, before the tree is touched.
pub fn find_and_replace<'t, 'f>(
    tree: &'t mut Node,
    schema: impl Into<Schema<'f>>,
    options: &Options,
) -> Result<&'t mut Node, TransformError> {
    let ignored = options
        .ignore
        .as_ref()
        .map(NodeTest::check)
        .unwrap_or_else(|| NodeTest::none().check());
    let mut pairs = schema.into().compile()?;

    for pair in &mut pairs {
        let mut replaced = 0usize;
        walk(tree, NodeType::Text, |visit| {
            replace_in_text(visit, pair, &ignored, &mut replaced)
        });
        debug!(
            pattern = pair.regex.as_str(),
            global = pair.global,
            replaced,
            "find-and-replace pass complete"
        );
    }

    Ok(tree)
}

/// Handles one text node that is not below an ignored ancestor.
fn replace_in_text(
    visit: &mut Visit<'_>,
    pair: &mut Pair<'_>,
    ignored: &Check,
    replaced: &mut usize,
) -> Action {
    // A text root has nowhere to splice into.
    let Some(index) = visit.index() else {
        return Action::Continue;
    };

    let nodes = {
        let ancestors = visit.ancestors();
        let path = visit.path();
        let is_ignored = ancestors.iter().enumerate().any(|(depth, ancestor)| {
            let position = depth.checked_sub(1);
            ignored.matches(
                ancestor,
                position.map(|d| path[d]),
                position.map(|d| ancestors[d]),
            )
        });
        if is_ignored {
            return Action::Continue;
        }

        let Some(node) = visit.node() else {
            return Action::Continue;
        };
        let mut stack = ancestors.clone();
        stack.push(node);

        match pair.scan(node.text_value().unwrap_or_default(), &stack) {
            Some(nodes) => nodes,
            None => return Action::Resume(index + 1),
        }
    };

    let produced = nodes.len();
    if let Some(children) = visit.parent_mut().and_then(Node::children_mut) {
        children.splice(index..=index, nodes);
    }
    *replaced += 1;
    trace!(index, produced, "spliced text node");

    Action::Resume(index + produced)
}
