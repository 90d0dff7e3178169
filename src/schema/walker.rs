//! Depth-first traversal over a record descriptor.

use super::descriptor::{Field, Leaf, Nested, Record};
use crate::utils::{to_kebab, to_screaming_snake};
use std::fmt;

/// Location of a field inside the schema, one segment per nesting level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    names: Vec<&'static str>,
    keys: Vec<&'static str>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, name: &'static str, key: &'static str) -> Self {
        let mut next = self.clone();
        next.names.push(name);
        next.keys.push(key);
        next
    }

    /// Declared names from the root down, e.g. `["Internal", "Value"]`.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Snapshot keys from the root down, e.g. `["internal", "value"]`.
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// Number of segments; top-level fields have depth 1.
    pub fn depth(&self) -> usize {
        self.names.len()
    }

    /// Command-line switch name: kebab-case segments joined by `-`.
    pub fn flag_name(&self) -> String {
        self.names.iter().map(|n| to_kebab(n)).collect::<Vec<_>>().join("-")
    }

    /// Environment variable name: upper snake case segments joined by `.`.
    pub fn env_name(&self) -> String {
        self.names.iter().map(|n| to_screaming_snake(n)).collect::<Vec<_>>().join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join("."))
    }
}

/// Callbacks invoked by [`walk`].
pub trait Visitor<T> {
    type Error;

    fn leaf(&mut self, path: &FieldPath, leaf: &Leaf<T>) -> Result<(), Self::Error>;

    fn enter_record(&mut self, _path: &FieldPath, _nested: &Nested<T>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_record(&mut self, _path: &FieldPath, _nested: &Nested<T>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Visit every leaf exactly once, depth-first in declaration order.
///
/// Nested records are announced through `enter_record` before their first
/// leaf and `exit_record` after their last. The first visitor error stops
/// the walk.
pub fn walk<T, V: Visitor<T>>(record: &Record<T>, visitor: &mut V) -> Result<(), V::Error> {
    walk_at(&FieldPath::root(), record, visitor)
}

fn walk_at<T, V: Visitor<T>>(
    prefix: &FieldPath,
    record: &Record<T>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    for field in record.fields() {
        match field {
            Field::Leaf(leaf) => visitor.leaf(&prefix.child(leaf.name(), leaf.key()), leaf)?,
            Field::Record(nested) => {
                let path = prefix.child(nested.name(), nested.key());
                visitor.enter_record(&path, nested)?;
                walk_at(&path, nested.record(), visitor)?;
                visitor.exit_record(&path, nested)?;
            }
        }
    }
    Ok(())
}

/// Flattened `(path, leaf)` list in walk order.
pub fn leaves<T>(record: &Record<T>) -> Vec<(FieldPath, &Leaf<T>)> {
    fn collect<'a, T>(
        prefix: &FieldPath,
        record: &'a Record<T>,
        out: &mut Vec<(FieldPath, &'a Leaf<T>)>,
    ) {
        for field in record.fields() {
            match field {
                Field::Leaf(leaf) => out.push((prefix.child(leaf.name(), leaf.key()), leaf)),
                Field::Record(nested) => {
                    collect(&prefix.child(nested.name(), nested.key()), nested.record(), out)
                }
            }
        }
    }

    let mut out = Vec::new();
    collect(&FieldPath::root(), record, &mut out);
    out
}
