//! Shared helpers

pub mod case;

pub use case::{to_kebab, to_screaming_snake};
