//! Command-line switches derived from a schema
//!
//! Every described leaf becomes one `--kebab-path` switch whose default is
//! the leaf's value at registration time. Parsed values are staged in clap's
//! matches and copied back only when the switch was given on the command line.

use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};

use crate::schema::{leaves, FieldPath, Kind, Record, Value};

/// Id of the switch that selects the snapshot file.
pub const CONFIG_ARG: &str = "config";

/// Base command carrying the application banner and `--config`.
pub fn base_command(app_name: &str, version: &str, default_path: &Path) -> Command {
    Command::new(app_name.to_string())
        .version(version.to_string())
        .before_help(format!("{app_name} (version {version})"))
        .max_term_width(100)
        .arg(
            Arg::new(CONFIG_ARG)
                .long(CONFIG_ARG)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .default_value(default_path.as_os_str().to_os_string())
                .help("path to config"),
        )
}

/// Snapshot path selected on the command line, or the default.
pub fn config_path(matches: &ArgMatches, default_path: &Path) -> PathBuf {
    matches
        .get_one::<PathBuf>(CONFIG_ARG)
        .cloned()
        .unwrap_or_else(|| default_path.to_path_buf())
}

/// One registered switch.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagBinding {
    pub flag: String,
    pub path: FieldPath,
    pub kind: Kind,
}

/// Switch table for a single load.
#[derive(Debug, Default)]
pub struct FlagRegistry {
    bindings: Vec<FlagBinding>,
    undescribed: Vec<FieldPath>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one switch per described leaf of `record` to `command`.
    ///
    /// Leaves without a description are skipped and remembered in
    /// [`FlagRegistry::undescribed`].
    pub fn register<T>(&mut self, record: &Record<T>, config: &T, mut command: Command) -> Command {
        for (path, leaf) in leaves(record) {
            let Some(help) = leaf.description() else {
                tracing::info!(field = %path, "No description, not exposed as a switch");
                self.undescribed.push(path);
                continue;
            };

            let flag = path.flag_name();
            command = command.arg(build_arg(&flag, leaf.kind(), &leaf.get(config), help));
            self.bindings.push(FlagBinding { flag, path, kind: leaf.kind() });
        }
        command
    }

    pub fn bindings(&self) -> &[FlagBinding] {
        &self.bindings
    }

    pub fn undescribed(&self) -> &[FieldPath] {
        &self.undescribed
    }

    /// Copy switches given on the command line back into `config`.
    ///
    /// Switches left at their default are not applied, so they cannot mask
    /// a value loaded from the file. Returns the number of fields written.
    pub fn apply_parsed<T>(&self, record: &Record<T>, matches: &ArgMatches, config: &mut T) -> usize {
        let mut applied = 0;
        for (path, leaf) in leaves(record) {
            let Some(binding) = self.bindings.iter().find(|b| b.path == path) else {
                continue;
            };
            if matches.value_source(&binding.flag) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Some(value) = staged_value(matches, &binding.flag) else {
                continue;
            };
            if leaf.set(config, value) {
                tracing::debug!(field = %path, flag = %binding.flag, "Applied command-line value");
                applied += 1;
            }
        }
        applied
    }
}

fn build_arg(flag: &str, kind: Kind, default: &Value, help: &str) -> Arg {
    let arg = Arg::new(flag.to_string())
        .long(flag.to_string())
        .help(help.to_string())
        .value_name(kind.as_str().to_uppercase())
        .value_parser(move |raw: &str| kind.parse(raw))
        .default_value(default.to_arg())
        .action(ArgAction::Set);

    match kind {
        Kind::String => arg,
        Kind::Int | Kind::Float => arg.allow_negative_numbers(true),
        Kind::Bool => arg.num_args(0..=1).require_equals(true).default_missing_value("true"),
    }
}

fn staged_value(matches: &ArgMatches, flag: &str) -> Option<Value> {
    matches.try_get_one::<Value>(flag).ok()?.cloned()
}
