//! Well-known node types.
//!
//! Nodes store their type as a plain string so that any unist-compatible
//! tree can be carried through a transform. These are the mdast names the
//! markdown parser produces.
//! See: https://github.com/syntax-tree/mdast

use serde::{Deserialize, Serialize};

/// Node types defined by mdast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum NodeType {
    // Document structure
    /// Root document node.
    Root,

    // Block elements
    /// Paragraph containing inline content.
    Paragraph,
    /// Heading (H1-H6).
    Heading,
    /// Block quote.
    Blockquote,
    /// Ordered or unordered list.
    List,
    /// Item in a list.
    ListItem,
    /// Fenced or indented code block.
    Code,
    /// Thematic break (horizontal rule).
    ThematicBreak,
    /// Raw HTML.
    Html,
    /// Reference definition.
    Definition,

    // Inline elements
    /// Plain text.
    Text,
    /// Hard line break.
    Break,
    /// Emphasis (italic).
    Emphasis,
    /// Strong emphasis (bold).
    Strong,
    /// Strikethrough text.
    Delete,
    /// Inline code.
    InlineCode,
    /// Hyperlink.
    Link,
    /// Image.
    Image,
    /// Link reference.
    LinkReference,
    /// Image reference.
    ImageReference,

    // Extension elements (GFM, frontmatter)
    /// Table (GFM).
    Table,
    /// Table row (GFM).
    TableRow,
    /// Table cell (GFM).
    TableCell,
    /// Footnote definition.
    FootnoteDefinition,
    /// Footnote reference.
    FootnoteReference,
    /// YAML frontmatter.
    Yaml,
}

impl NodeType {
    /// Returns the mdast name of this type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading => "heading",
            NodeType::Blockquote => "blockquote",
            NodeType::List => "list",
            NodeType::ListItem => "listItem",
            NodeType::Code => "code",
            NodeType::ThematicBreak => "thematicBreak",
            NodeType::Html => "html",
            NodeType::Definition => "definition",
            NodeType::Text => "text",
            NodeType::Break => "break",
            NodeType::Emphasis => "emphasis",
            NodeType::Strong => "strong",
            NodeType::Delete => "delete",
            NodeType::InlineCode => "inlineCode",
            NodeType::Link => "link",
            NodeType::Image => "image",
            NodeType::LinkReference => "linkReference",
            NodeType::ImageReference => "imageReference",
            NodeType::Table => "table",
            NodeType::TableRow => "tableRow",
            NodeType::TableCell => "tableCell",
            NodeType::FootnoteDefinition => "footnoteDefinition",
            NodeType::FootnoteReference => "footnoteReference",
            NodeType::Yaml => "yaml",
        }
    }
}

impl AsRef<str> for NodeType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        node_type.as_str().to_string()
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::root(NodeType::Root, "root")]
    #[case::list_item(NodeType::ListItem, "listItem")]
    #[case::inline_code(NodeType::InlineCode, "inlineCode")]
    #[case::thematic_break(NodeType::ThematicBreak, "thematicBreak")]
    #[case::footnote_reference(NodeType::FootnoteReference, "footnoteReference")]
    fn test_display_matches_serde(#[case] node_type: NodeType, #[case] expected: &str) {
        assert_eq!(node_type.to_string(), expected);
        assert_eq!(
            serde_json::to_string(&node_type).unwrap(),
            format!("\"{}\"", expected)
        );
    }

    #[test]
    fn test_into_string() {
        let name: String = NodeType::Break.into();
        assert_eq!(name, "break");
    }
}
