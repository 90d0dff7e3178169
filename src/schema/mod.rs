//! Typed schema descriptors and the walk over them

pub mod descriptor;
pub mod kind;
pub mod walker;

pub use descriptor::{find_leaf, Field, Leaf, Nested, Primitive, Record, Schema, RESERVED_FLAGS};
pub use kind::{Kind, ParseValueError, Value};
pub use walker::{leaves, walk, FieldPath, Visitor};
