//! YAML helpers

pub mod diagnostics;

pub use diagnostics::YamlSyntaxError;
