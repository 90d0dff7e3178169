//! Environment variable overlay
//!
//! Each leaf reads the variable named by its upper snake case path, with
//! `.` between nesting levels (`INTERNAL.VALUE`).

use std::collections::HashMap;

use crate::config::ConfigError;
use crate::schema::{leaves, Record};

/// Where variable values come from.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

pub struct EnvBinder<'a> {
    source: &'a dyn EnvSource,
}

impl<'a> EnvBinder<'a> {
    pub fn new(source: &'a dyn EnvSource) -> Self {
        Self { source }
    }

    /// Overwrite every leaf whose variable is set and non-empty.
    ///
    /// A value that does not parse as the leaf's kind leaves that leaf as it
    /// was; the failure is logged and returned while the remaining leaves are
    /// still processed.
    pub fn overlay<T>(&self, record: &Record<T>, config: &mut T) -> Vec<ConfigError> {
        let mut issues = Vec::new();
        for (path, leaf) in leaves(record) {
            let name = path.env_name();
            let Some(raw) = self.source.var(&name).filter(|v| !v.is_empty()) else {
                continue;
            };

            match leaf.kind().parse(&raw) {
                Ok(value) => {
                    if leaf.set(config, value) {
                        tracing::debug!(variable = %name, field = %path, "Applied environment value");
                    }
                }
                Err(source) => {
                    let err = ConfigError::env_parse(name, source);
                    tracing::error!(field = %path, error = %err, "Ignoring environment value");
                    issues.push(err);
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestConfiguration;
    use crate::schema::Schema;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_overlay_sets_matching_fields() {
        let vars = env(&[
            ("INT_FIELD_2", "-321"),
            ("STRING_FIELD_1", "test string 1"),
            ("BOOL_FIELD_2", "true"),
            ("FLOAT_64_FIELD_2", "0.5"),
            ("INTERNAL.VALUE", "4444"),
        ]);
        let mut config = TestConfiguration::default();
        let issues = EnvBinder::new(&vars).overlay(&TestConfiguration::schema(), &mut config);

        assert!(issues.is_empty());
        assert_eq!(config.int_field_2, -321);
        assert_eq!(config.string_field_1, "test string 1");
        assert!(config.bool_field_2);
        assert_eq!(config.float64_field_2, 0.5);
        assert_eq!(config.internal.value, 4444);
        assert_eq!(config.int_field_1, 123);
    }

    #[test]
    fn test_unparseable_value_skips_only_that_field() {
        let vars = env(&[("INT_FIELD_1", "not a number"), ("INTERNAL.VALUE", "7")]);
        let mut config = TestConfiguration::default();
        let issues = EnvBinder::new(&vars).overlay(&TestConfiguration::schema(), &mut config);

        assert_eq!(issues.len(), 1);
        assert!(matches!(&issues[0], ConfigError::EnvParse { name, .. } if name == "INT_FIELD_1"));
        assert_eq!(config.int_field_1, 123);
        assert_eq!(config.internal.value, 7);
    }

    #[test]
    fn test_empty_value_is_ignored() {
        let vars = env(&[("STRING_FIELD_2", ""), ("BOOL_FIELD_1", "")]);
        let mut config = TestConfiguration::default();
        let issues = EnvBinder::new(&vars).overlay(&TestConfiguration::schema(), &mut config);

        assert!(issues.is_empty());
        assert_eq!(config, TestConfiguration::default());
    }
}
