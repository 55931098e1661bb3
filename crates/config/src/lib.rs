//! Configuration resolution for Herald.
//!
//! Settings are looked up in the environment first and fall back to a TOML
//! config file organised in `[Section]` tables. See [`ConfigResolver`].

pub mod error;
pub mod resolver;
pub mod settings;

pub use error::ConfigError;
pub use resolver::{ConfigResolver, Environment};
pub use settings::Setting;
