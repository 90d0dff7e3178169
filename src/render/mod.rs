//! Diagnostic rendering

pub mod printer;

pub use printer::print_config;
