//! JSON snapshot load and save

use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value as Json};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::error::ConfigError;
use crate::schema::{leaves, Field, Record, Value};

/// On-disk snapshot of a configuration record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overlay the fields present in the snapshot onto `config`.
    ///
    /// An unreadable or malformed file is returned as `Err` with `config`
    /// untouched. Entries holding the wrong JSON type are skipped and
    /// returned as `Ok` issues; every other present entry is applied.
    pub fn load<T>(&self, record: &Record<T>, config: &mut T) -> Result<Vec<ConfigError>, ConfigError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| ConfigError::read_file(&self.path, e))?;
        let snapshot: Map<String, Json> =
            serde_json::from_str(&content).map_err(|e| ConfigError::parse_file(&self.path, e))?;

        let mut issues = Vec::new();
        let mut applied = 0usize;
        for (path, leaf) in leaves(record) {
            let Some(json) = lookup(&snapshot, path.keys()) else {
                continue;
            };
            if leaf.kind().decode_json(json).is_some_and(|value| leaf.set(config, value)) {
                applied += 1;
            } else {
                let err = ConfigError::field_type(&self.path, path.keys().join("."), leaf.kind());
                tracing::warn!(error = %err, "Skipping snapshot entry");
                issues.push(err);
            }
        }

        tracing::debug!(path = %self.path.display(), applied, "Loaded config file");
        Ok(issues)
    }

    /// Write the whole record, tab-indented in declaration order.
    ///
    /// The snapshot is staged next to the target and renamed over it, so a
    /// failed write never leaves a truncated file behind. An existing file
    /// keeps its permissions, and a symlinked path is written through.
    /// Non-finite floats have no JSON form and fail with
    /// [`ConfigError::Serialize`].
    pub fn save<T>(&self, record: &Record<T>, config: &T) -> Result<(), ConfigError> {
        let bytes = render_snapshot(record, config)?;

        let target = resolve_symlink(&self.path);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;

        let mut staged =
            NamedTempFile::new_in(&dir).map_err(|e| ConfigError::write_file(&self.path, e))?;
        if let Ok(existing) = fs::metadata(&target) {
            staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| ConfigError::write_file(&self.path, e))?;
        }
        staged
            .write_all(&bytes)
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|e| ConfigError::write_file(&self.path, e))?;
        staged.persist(&target).map_err(|e| ConfigError::write_file(&self.path, e.error))?;

        tracing::debug!(path = %self.path.display(), "Saved config file");
        Ok(())
    }
}

/// Serialize `config` the way [`FileStore::save`] writes it.
pub fn render_snapshot<T>(record: &Record<T>, config: &T) -> Result<Vec<u8>, ConfigError> {
    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"\t"));
    RecordView { record, config }.serialize(&mut serializer)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Follow a symlinked snapshot path to the file it names.
fn resolve_symlink(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn lookup<'a>(snapshot: &'a Map<String, Json>, keys: &[&str]) -> Option<&'a Json> {
    let (last, parents) = keys.split_last()?;
    let mut object = snapshot;
    for key in parents {
        object = object.get(*key)?.as_object()?;
    }
    object.get(*last)
}

struct RecordView<'a, T> {
    record: &'a Record<T>,
    config: &'a T,
}

impl<T> Serialize for RecordView<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.fields().len()))?;
        for field in self.record.fields() {
            match field {
                Field::Leaf(leaf) => {
                    let value = leaf.get(self.config);
                    if let Value::Float(x) = &value {
                        if !x.is_finite() {
                            return Err(S::Error::custom(format!(
                                "field '{}' holds {x}, which has no JSON form",
                                leaf.key()
                            )));
                        }
                    }
                    map.serialize_entry(leaf.key(), &value)?
                }
                Field::Record(nested) => map.serialize_entry(
                    nested.key(),
                    &RecordView { record: nested.record(), config: self.config },
                )?,
            }
        }
        map.end()
    }
}
