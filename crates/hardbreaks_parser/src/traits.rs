//! Parser trait definition.

use hardbreaks_ast::Node;

use crate::ParseError;

/// Trait for turning source text into a node tree.
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["md", "markdown"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree rooted at a `root` node.
    fn parse(&self, source: &str) -> Result<Node, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Parses a unist tree serialized as JSON.
pub fn parse_json_tree(source: &str) -> Result<Node, ParseError> {
    Ok(serde_json::from_str(source)?)
}
