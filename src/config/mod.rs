//! Configuration system for VoidSpark
//!
//! TOML-backed configuration with embedded defaults, a thread-safe global
//! instance, and environment/CLI overrides. Schema structs are defined once
//! with the `config_struct!` macro; loading, saving, and access helpers live
//! in `utils`.

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::*;
