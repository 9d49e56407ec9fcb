//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! The `markdown` crate already produces mdast; this module converts its
//! typed nodes into the generic [`Node`] tree the transforms operate on.

use hardbreaks_ast::{Node, NodeType, Point, Position};
use markdown::mdast;
use markdown::{ParseOptions, to_mdast};
use serde_json::{Map, Value};

use crate::{ParseError, Parser};

/// Markdown parser implementation.
///
/// Uses `markdown-rs` with GFM enabled, which supports:
/// - CommonMark
/// - GFM tables, strikethrough, footnotes, task lists and autolinks
///
/// Line endings inside a paragraph stay in the text nodes, which is exactly
/// what the line-break rule works on.
pub struct MarkdownParser {
    options: ParseOptions,
}

impl MarkdownParser {
    /// Creates a new Markdown parser with GFM options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::gfm(),
        }
    }

    /// Creates a parser with plain CommonMark options.
    pub fn commonmark() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Converts an mdast node to a generic node.
    fn convert_node(&self, node: &mdast::Node) -> Node {
        let node_type = Self::type_name(node);

        let mut converted = match (node.children(), Self::literal_value(node)) {
            (Some(children), _) => Node::new_parent(node_type, self.convert_children(children)),
            (None, Some(value)) => Node::new_literal(node_type, value),
            (None, None) => Node::new_leaf(node_type),
        };

        if let Some(position) = node.position() {
            converted = converted.with_position(Self::convert_position(position));
        }
        Self::copy_fields(node, &mut converted.data);

        converted
    }

    /// Converts a list of mdast children.
    fn convert_children(&self, children: &[mdast::Node]) -> Vec<Node> {
        children
            .iter()
            .map(|child| self.convert_node(child))
            .collect()
    }

    /// Returns the mdast type name of a node.
    fn type_name(node: &mdast::Node) -> &'static str {
        use mdast::Node as M;

        match node {
            M::Root(_) => NodeType::Root.as_str(),
            M::Paragraph(_) => NodeType::Paragraph.as_str(),
            M::Heading(_) => NodeType::Heading.as_str(),
            M::Blockquote(_) => NodeType::Blockquote.as_str(),
            M::List(_) => NodeType::List.as_str(),
            M::ListItem(_) => NodeType::ListItem.as_str(),
            M::Code(_) => NodeType::Code.as_str(),
            M::ThematicBreak(_) => NodeType::ThematicBreak.as_str(),
            M::Html(_) => NodeType::Html.as_str(),
            M::Definition(_) => NodeType::Definition.as_str(),
            M::Text(_) => NodeType::Text.as_str(),
            M::Break(_) => NodeType::Break.as_str(),
            M::Emphasis(_) => NodeType::Emphasis.as_str(),
            M::Strong(_) => NodeType::Strong.as_str(),
            M::Delete(_) => NodeType::Delete.as_str(),
            M::InlineCode(_) => NodeType::InlineCode.as_str(),
            M::Link(_) => NodeType::Link.as_str(),
            M::Image(_) => NodeType::Image.as_str(),
            M::LinkReference(_) => NodeType::LinkReference.as_str(),
            M::ImageReference(_) => NodeType::ImageReference.as_str(),
            M::Table(_) => NodeType::Table.as_str(),
            M::TableRow(_) => NodeType::TableRow.as_str(),
            M::TableCell(_) => NodeType::TableCell.as_str(),
            M::FootnoteDefinition(_) => NodeType::FootnoteDefinition.as_str(),
            M::FootnoteReference(_) => NodeType::FootnoteReference.as_str(),
            M::Yaml(_) => NodeType::Yaml.as_str(),
            M::Toml(_) => "toml",
            M::Math(_) => "math",
            M::InlineMath(_) => "inlineMath",
            M::MdxjsEsm(_) => "mdxjsEsm",
            M::MdxFlowExpression(_) => "mdxFlowExpression",
            M::MdxTextExpression(_) => "mdxTextExpression",
            M::MdxJsxFlowElement(_) => "mdxJsxFlowElement",
            M::MdxJsxTextElement(_) => "mdxJsxTextElement",
        }
    }

    /// Returns the literal value of text-like nodes.
    fn literal_value(node: &mdast::Node) -> Option<&str> {
        use mdast::Node as M;

        match node {
            M::Text(n) => Some(&n.value),
            M::InlineCode(n) => Some(&n.value),
            M::Code(n) => Some(&n.value),
            M::Html(n) => Some(&n.value),
            M::Yaml(n) => Some(&n.value),
            M::Toml(n) => Some(&n.value),
            M::Math(n) => Some(&n.value),
            M::InlineMath(n) => Some(&n.value),
            M::MdxjsEsm(n) => Some(&n.value),
            M::MdxFlowExpression(n) => Some(&n.value),
            M::MdxTextExpression(n) => Some(&n.value),
            _ => None,
        }
    }

    /// Copies the scalar attributes of a node into its extra fields.
    fn copy_fields(node: &mdast::Node, data: &mut Map<String, Value>) {
        use mdast::Node as M;

        fn put(data: &mut Map<String, Value>, key: &str, value: impl Into<Value>) {
            data.insert(key.to_string(), value.into());
        }

        fn put_opt(data: &mut Map<String, Value>, key: &str, value: Option<&String>) {
            if let Some(value) = value {
                put(data, key, value.as_str());
            }
        }

        match node {
            M::Heading(heading) => put(data, "depth", heading.depth),
            M::List(list) => {
                put(data, "ordered", list.ordered);
                put(data, "spread", list.spread);
                if let Some(start) = list.start {
                    put(data, "start", start);
                }
            }
            M::ListItem(item) => {
                put(data, "spread", item.spread);
                if let Some(checked) = item.checked {
                    put(data, "checked", checked);
                }
            }
            M::Code(code) => {
                put_opt(data, "lang", code.lang.as_ref());
                put_opt(data, "meta", code.meta.as_ref());
            }
            M::Math(math) => put_opt(data, "meta", math.meta.as_ref()),
            M::Link(link) => {
                put(data, "url", link.url.as_str());
                put_opt(data, "title", link.title.as_ref());
            }
            M::Image(image) => {
                put(data, "url", image.url.as_str());
                put(data, "alt", image.alt.as_str());
                put_opt(data, "title", image.title.as_ref());
            }
            M::Definition(def) => {
                put(data, "identifier", def.identifier.as_str());
                put(data, "url", def.url.as_str());
                put_opt(data, "title", def.title.as_ref());
                put_opt(data, "label", def.label.as_ref());
            }
            M::LinkReference(reference) => {
                put(data, "identifier", reference.identifier.as_str());
                put_opt(data, "label", reference.label.as_ref());
            }
            M::ImageReference(reference) => {
                put(data, "identifier", reference.identifier.as_str());
                put(data, "alt", reference.alt.as_str());
                put_opt(data, "label", reference.label.as_ref());
            }
            M::FootnoteDefinition(def) => {
                put(data, "identifier", def.identifier.as_str());
                put_opt(data, "label", def.label.as_ref());
            }
            M::FootnoteReference(reference) => {
                put(data, "identifier", reference.identifier.as_str());
                put_opt(data, "label", reference.label.as_ref());
            }
            _ => {}
        }
    }

    fn convert_position(position: &markdown::unist::Position) -> Position {
        Position::new(
            Point::new(
                position.start.line,
                position.start.column,
                position.start.offset,
            ),
            Point::new(position.end.line, position.end.column, position.end.offset),
        )
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse(&self, source: &str) -> Result<Node, ParseError> {
        let mdast =
            to_mdast(source, &self.options).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        Ok(self.convert_node(&mdast))
    }
}
