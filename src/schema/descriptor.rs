//! Field descriptor tables for configuration records.
//!
//! A configuration type describes its shape once through [`Schema::schema`],
//! pairing every leaf with an accessor pair, its [`Kind`], an optional
//! description, and its serialization key. Nested records are lifted into
//! the parent's type so that every accessor in a root descriptor works on
//! the root value.

use super::kind::{Kind, Value};
use super::walker::{leaves, FieldPath};
use crate::config::ConfigError;
use std::collections::HashSet;
use std::sync::Arc;

/// Switch names owned by the loader itself.
pub const RESERVED_FLAGS: &[&str] = &["config", "help", "version"];

/// A configuration record that can describe its own fields.
///
/// ```rust,ignore
/// impl Schema for Database {
///     fn schema() -> Record<Self> {
///         Record::<Self>::new()
///             .leaf("Url", "url", Some("database url"), |c| &c.url, |c| &mut c.url)
///             .leaf("Password", "password", None, |c| &c.password, |c| &mut c.password)
///     }
/// }
/// ```
pub trait Schema: Sized + 'static {
    fn schema() -> Record<Self>;
}

/// Rust types that map onto a leaf [`Kind`].
pub trait Primitive: Sized + 'static {
    const KIND: Kind;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Option<Self>;
}

impl Primitive for String {
    const KIND: Kind = Kind::String;

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Primitive for i64 {
    const KIND: Kind = Kind::Int;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl Primitive for f64 {
    const KIND: Kind = Kind::Float;

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(x),
            _ => None,
        }
    }
}

impl Primitive for bool {
    const KIND: Kind = Kind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

type Getter<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;
type Setter<T> = Arc<dyn Fn(&mut T, Value) -> bool + Send + Sync>;

/// A primitive field of a record.
pub struct Leaf<T> {
    name: &'static str,
    key: &'static str,
    kind: Kind,
    description: Option<&'static str>,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T: 'static> Leaf<T> {
    fn new<P: Primitive>(
        name: &'static str,
        key: &'static str,
        description: Option<&'static str>,
        get: fn(&T) -> &P,
        get_mut: fn(&mut T) -> &mut P,
    ) -> Self {
        Self {
            name,
            key,
            kind: P::KIND,
            description,
            get: Arc::new(move |config: &T| get(config).to_value()),
            set: Arc::new(move |config: &mut T, value: Value| match P::from_value(value) {
                Some(v) => {
                    *get_mut(config) = v;
                    true
                }
                None => false,
            }),
        }
    }

    fn lift<O: 'static>(self, project: fn(&O) -> &T, project_mut: fn(&mut O) -> &mut T) -> Leaf<O> {
        let get = self.get;
        let set = self.set;
        Leaf {
            name: self.name,
            key: self.key,
            kind: self.kind,
            description: self.description,
            get: Arc::new(move |outer: &O| get(project(outer))),
            set: Arc::new(move |outer: &mut O, value: Value| set(project_mut(outer), value)),
        }
    }
}

impl<T> Leaf<T> {
    /// Declared field identifier, e.g. `IntField1`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Key used in the on-disk snapshot, e.g. `int_field_1`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Help text; an empty description counts as none.
    pub fn description(&self) -> Option<&'static str> {
        self.description.filter(|d| !d.is_empty())
    }

    pub fn get(&self, config: &T) -> Value {
        (self.get)(config)
    }

    /// Overwrite the field. Returns `false`, leaving the field untouched,
    /// when `value` is not of this leaf's kind.
    pub fn set(&self, config: &mut T, value: Value) -> bool {
        (self.set)(config, value)
    }
}

impl<T> Clone for Leaf<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            key: self.key,
            kind: self.kind,
            description: self.description,
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

/// A nested record field.
pub struct Nested<T> {
    name: &'static str,
    key: &'static str,
    record: Record<T>,
}

impl<T> Nested<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn record(&self) -> &Record<T> {
        &self.record
    }
}

impl<T> Clone for Nested<T> {
    fn clone(&self) -> Self {
        Self { name: self.name, key: self.key, record: self.record.clone() }
    }
}

pub enum Field<T> {
    Leaf(Leaf<T>),
    Record(Nested<T>),
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(leaf) => Self::Leaf(leaf.clone()),
            Self::Record(nested) => Self::Record(nested.clone()),
        }
    }
}

/// Ordered field table of one record type.
pub struct Record<T> {
    fields: Vec<Field<T>>,
}

impl<T: 'static> Record<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a primitive field. Fields without a description are still read
    /// from the file and the environment but get no command-line switch.
    pub fn leaf<P: Primitive>(
        mut self,
        name: &'static str,
        key: &'static str,
        description: Option<&'static str>,
        get: fn(&T) -> &P,
        get_mut: fn(&mut T) -> &mut P,
    ) -> Self {
        self.fields.push(Field::Leaf(Leaf::new(name, key, description, get, get_mut)));
        self
    }

    /// Append a nested record field described by its own [`Schema`].
    pub fn nested<N: Schema>(
        mut self,
        name: &'static str,
        key: &'static str,
        get: fn(&T) -> &N,
        get_mut: fn(&mut T) -> &mut N,
    ) -> Self {
        let record = N::schema().lift(get, get_mut);
        self.fields.push(Field::Record(Nested { name, key, record }));
        self
    }

    fn lift<O: 'static>(self, project: fn(&O) -> &T, project_mut: fn(&mut O) -> &mut T) -> Record<O> {
        let fields = self
            .fields
            .into_iter()
            .map(|field| match field {
                Field::Leaf(leaf) => Field::Leaf(leaf.lift(project, project_mut)),
                Field::Record(nested) => Field::Record(Nested {
                    name: nested.name,
                    key: nested.key,
                    record: nested.record.lift(project, project_mut),
                }),
            })
            .collect();
        Record { fields }
    }
}

impl<T> Record<T> {
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Check that snapshot paths, switch names and variable names are unique
    /// and that no switch shadows one owned by the loader.
    ///
    /// Switch names are only checked for described leaves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut keys = HashSet::new();
        let mut flags = HashSet::new();
        let mut vars = HashSet::new();

        for (path, leaf) in leaves(self) {
            let key_path = path.keys().join(".");
            if !keys.insert(key_path.clone()) {
                return Err(ConfigError::invalid_schema(format!(
                    "duplicate snapshot key '{key_path}'"
                )));
            }

            // Undescribed leaves get no switch, so they cannot collide.
            if leaf.description().is_some() {
                let flag = path.flag_name();
                if RESERVED_FLAGS.contains(&flag.as_str()) {
                    return Err(ConfigError::invalid_schema(format!(
                        "field '{path}' maps to reserved switch --{flag}"
                    )));
                }
                if !flags.insert(flag.clone()) {
                    return Err(ConfigError::invalid_schema(format!(
                        "field '{path}' maps to duplicate switch --{flag}"
                    )));
                }
            }

            let var = path.env_name();
            if !vars.insert(var.clone()) {
                return Err(ConfigError::invalid_schema(format!(
                    "field '{path}' maps to duplicate environment variable {var}"
                )));
            }
        }
        Ok(())
    }
}

impl<T: 'static> Default for Record<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Record<T> {
    fn clone(&self) -> Self {
        Self { fields: self.fields.clone() }
    }
}

/// Look up a leaf by its dotted display path, e.g. `Internal.Value`.
pub fn find_leaf<'a, T>(record: &'a Record<T>, dotted: &str) -> Option<(FieldPath, &'a Leaf<T>)> {
    leaves(record).into_iter().find(|(path, _)| path.to_string() == dotted)
}
