//! Common utilities and types shared across infotree

pub mod config;
pub mod error;
pub mod utils;

pub use self::config::{Config, FailurePolicy, Overrides};
pub use error::{Error, Result};
pub use utils::{display_width, pad_to_width, parse_duration};
