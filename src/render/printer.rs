//! Human-readable configuration dump.

use std::io::{self, Write};

use crate::schema::{walk, FieldPath, Leaf, Nested, Schema, Visitor};

/// Width of the name column at the top level; nested levels give up one
/// indent unit of it.
const NAME_COLUMN: usize = 25;
const INDENT: &str = "   ";

/// Print a banner followed by one line per field, nested records indented
/// under a bare header line.
///
/// ```text
///
/// my-service (version 1.0.0) running with params:
///
///  - Port                      : 8080
///  - Database
///     - PoolSize               : 4
///
/// ```
///
/// This is a diagnostic view, not a serialization format.
pub fn print_config<T: Schema, W: Write>(
    w: &mut W,
    config: &T,
    app_name: &str,
    version: &str,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{app_name} (version {version}) running with params:")?;
    writeln!(w)?;
    walk(&T::schema(), &mut LinePrinter { w: &mut *w, config })?;
    writeln!(w)
}

struct LinePrinter<'a, T, W> {
    w: &'a mut W,
    config: &'a T,
}

impl<T, W> LinePrinter<'_, T, W> {
    /// Indent prefix and name column width for a field at `path`.
    fn layout(path: &FieldPath) -> (String, usize) {
        let prefix = INDENT.repeat(path.depth().saturating_sub(1));
        let width = NAME_COLUMN.saturating_sub(prefix.len());
        (prefix, width)
    }
}

impl<T, W: Write> Visitor<T> for LinePrinter<'_, T, W> {
    type Error = io::Error;

    fn leaf(&mut self, path: &FieldPath, leaf: &Leaf<T>) -> io::Result<()> {
        let (prefix, width) = Self::layout(path);
        writeln!(self.w, "{prefix} - {:<width$} : {}", leaf.name(), leaf.get(self.config))
    }

    fn enter_record(&mut self, path: &FieldPath, nested: &Nested<T>) -> io::Result<()> {
        let (prefix, width) = Self::layout(path);
        writeln!(self.w, "{prefix} - {:<width$}", nested.name())
    }
}
