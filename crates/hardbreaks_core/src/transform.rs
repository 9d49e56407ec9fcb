//! Tree transforms and their registration.
//!
//! A renderer owns a [`TransformList`] and runs it over every parsed tree.
//! Plugins add their transforms to the list when activated and take them
//! out again when deactivated, without disturbing anything else in it.

use std::fmt;
use std::sync::Arc;

use hardbreaks_ast::Node;
use serde_json::Value;
use tracing::debug;

use crate::TransformError;
use crate::breaks::Breaks;
use crate::replace::{Options, Schema, find_and_replace};

/// A transform over a whole tree.
///
/// Implementations modify the tree in place. They are shared between
/// renderers, so they must not keep per-run state.
pub trait Transform: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Transforms `tree` in place.
    fn transform(&self, tree: &mut Node) -> Result<(), TransformError>;
}

impl fmt::Debug for dyn Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transform({})", self.name())
    }
}

/// Ordered list of transforms.
#[derive(Clone, Default)]
pub struct TransformList {
    transforms: Vec<Arc<dyn Transform>>,
}

impl TransformList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transform to run before all others.
    pub fn insert_front(&mut self, transform: Arc<dyn Transform>) {
        self.transforms.insert(0, transform);
    }

    /// Adds a transform to run after all others.
    pub fn push(&mut self, transform: Arc<dyn Transform>) {
        self.transforms.push(transform);
    }

    /// Removes this exact instance. Other instances of the same transform
    /// stay in the list.
    ///
    /// Returns `true` if it was present.
    pub fn remove(&mut self, transform: &Arc<dyn Transform>) -> bool {
        let Some(index) = self.position(transform) else {
            return false;
        };
        self.transforms.remove(index);
        true
    }

    /// Returns true if this exact instance is in the list.
    pub fn contains(&self, transform: &Arc<dyn Transform>) -> bool {
        self.position(transform).is_some()
    }

    fn position(&self, transform: &Arc<dyn Transform>) -> Option<usize> {
        self.transforms.iter().position(|t| Arc::ptr_eq(t, transform))
    }

    /// Number of transforms.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Transform names, in run order.
    pub fn names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Runs every transform over `tree`, in order. Stops at the first error.
    pub fn run(&self, tree: &mut Node) -> Result<(), TransformError> {
        for transform in &self.transforms {
            debug!(transform = transform.name(), "running transform");
            transform.transform(tree)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TransformList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Registers the line-break rule with a renderer's transform list.
#[derive(Debug, Clone)]
pub struct BreaksPlugin {
    transform: Arc<dyn Transform>,
}

impl BreaksPlugin {
    /// Creates the plugin with the default line-break rule.
    pub fn new() -> Self {
        Self::with_transform(Breaks::new())
    }

    /// Wraps a configured transform.
    pub fn with_transform(transform: impl Transform + 'static) -> Self {
        Self {
            transform: Arc::new(transform),
        }
    }

    /// Adds the rule at the front of `list`. Does nothing if it is already
    /// there.
    pub fn activate(&self, list: &mut TransformList) {
        if list.contains(&self.transform) {
            return;
        }
        list.insert_front(Arc::clone(&self.transform));
        debug!(transforms = list.len(), "breaks plugin activated");
    }

    /// Removes the rule added by [`BreaksPlugin::activate`] from `list`.
    pub fn deactivate(&self, list: &mut TransformList) {
        if list.remove(&self.transform) {
            debug!(transforms = list.len(), "breaks plugin deactivated");
        }
    }

    /// Returns true if the rule is in `list`.
    pub fn is_active(&self, list: &TransformList) -> bool {
        list.contains(&self.transform)
    }
}

impl Default for BreaksPlugin {
    fn default() -> Self {
        Self::new()
    }
}

/// Find-and-replace driven by a JSON schema.
#[derive(Debug, Clone)]
pub struct SchemaTransform {
    schema: Value,
    options: Options,
}

impl SchemaTransform {
    /// Creates the transform, rejecting schemas that do not compile.
    pub fn new(schema: Value, options: Options) -> Result<Self, TransformError> {
        Schema::from_value(&schema)?;
        Ok(Self { schema, options })
    }
}

impl Transform for SchemaTransform {
    fn name(&self) -> &str {
        "replacements"
    }

    fn transform(&self, tree: &mut Node) -> Result<(), TransformError> {
        let schema = Schema::from_value(&self.schema)?;
        find_and_replace(tree, schema, &self.options)?;
        Ok(())
    }
}
