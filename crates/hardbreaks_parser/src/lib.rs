//! # hardbreaks_parser
//!
//! Parser front end for hardbreaks.
//!
//! Turning markdown into a tree is the job of the host pipeline; this crate
//! stands in for it so that the transforms can be driven from the command
//! line and exercised end to end in tests.
//!
//! ## Example
//!
//! ```rust
//! use hardbreaks_parser::{MarkdownParser, Parser};
//!
//! let tree = MarkdownParser::new().parse("line1\nline2").unwrap();
//! let paragraph = &tree.children()[0];
//!
//! assert_eq!(paragraph.children()[0].text_value(), Some("line1\nline2"));
//! ```

mod error;
mod markdown;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use traits::{Parser, parse_json_tree};
