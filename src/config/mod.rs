//! Configuration module

mod wiki;

pub use wiki::WikiConfig;
pub use wiki::CONFIG_FILE;
