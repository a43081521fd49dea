//! Command-line front end for jfir.
//!
//! Loads a JSON class model, synthesizes the requested classes and prints
//! them as text or JSON.

pub mod args;
pub mod driver;
pub mod tracing_config;

pub use args::{CliArgs, OutputFormat};
pub use driver::run;
