// Library surface for the binary, headless integration tests and other front-ends.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod countdown;
pub mod error;
pub mod language;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod typing_policy;
pub mod ui;

pub use error::{Error, Result};

pub const TICK_RATE_MS: u64 = 100;
