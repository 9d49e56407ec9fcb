//! # hardbreaks_core
//!
//! Tree transforms for hardbreaks.
//!
//! This crate provides:
//! - Node tests and a depth-first walker that tolerates in-place edits
//! - Pattern find-and-replace over text nodes
//! - The line-break rule, turning line endings into `break` nodes
//! - Transform registration and configuration loading
//!
//! ## Example
//!
//! ```rust
//! use hardbreaks_core::BreaksConfig;
//! use hardbreaks_parser::{MarkdownParser, Parser};
//!
//! let mut tree = MarkdownParser::new().parse("Mars is\nthe fourth planet").unwrap();
//!
//! let transforms = BreaksConfig::default().build().unwrap();
//! transforms.run(&mut tree).unwrap();
//!
//! let paragraph = &tree.children()[0];
//! assert_eq!(paragraph.children()[1].node_type, "break");
//! ```

mod breaks;
mod config;
mod error;
mod escape;
pub mod replace;
mod transform;
pub mod walk;

pub use breaks::{Breaks, LINE_ENDING, newline_to_break, newline_to_break_with, remark_breaks};
pub use config::{BreaksConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, TransformError};
pub use escape::{escape_string_regexp, escape_value};
pub use node_test::{Check, NodeTest, TestFn};
pub use replace::{Find, Match, Options, Replace, Replacement, Schema, find_and_replace};
pub use transform::{BreaksPlugin, SchemaTransform, Transform, TransformList};
pub use walk::{Action, Visit, walk, walk_reverse};
