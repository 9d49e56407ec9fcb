//! Hard line breaks.
//!
//! Markdown only turns a line ending into a `break` node when it follows two
//! spaces or a backslash. [`newline_to_break`] turns every remaining line
//! ending inside text into one, so soft breaks render as written.

use hardbreaks_ast::{Node, NodeType};
use regex::Regex;
use tracing::debug;

use crate::TransformError;
use crate::replace::{Find, Options, Replacement, find_and_replace};
use crate::transform::Transform;

/// A line ending: `\r\n`, `\n` or a lone `\r`.
pub const LINE_ENDING: &str = r"\r?\n|\r";

/// Replaces every line ending in text nodes with a `break` node.
pub fn newline_to_break(tree: &mut Node) -> Result<(), TransformError> {
    newline_to_break_with(tree, &Options::default())
}

/// Like [`newline_to_break`], leaving text below ignored ancestors alone.
pub fn newline_to_break_with(tree: &mut Node, options: &Options) -> Result<(), TransformError> {
    let line_ending = Find::global(Regex::new(LINE_ENDING)?);
    let brk = Replacement::Node(Node::new_leaf(NodeType::Break));

    find_and_replace(tree, (line_ending, brk), options)?;
    Ok(())
}

/// The line-break rule as a [`Transform`].
#[derive(Debug, Clone, Default)]
pub struct Breaks {
    options: Options,
}

impl Breaks {
    /// Creates the rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the rule with find-and-replace options.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Transform for Breaks {
    fn name(&self) -> &str {
        "breaks"
    }

    fn transform(&self, tree: &mut Node) -> Result<(), TransformError> {
        debug!(ignore = ?self.options.ignore, "turning line endings into breaks");
        newline_to_break_with(tree, &self.options)
    }
}

/// Returns the line-break rule with default options.
pub fn remark_breaks() -> Breaks {
    Breaks::new()
}
