//! VectorPad Application
//!
//! Command line shell around the core library: configuration loading and
//! the `check`, `fmt` and `export` commands.

pub mod cli;
pub mod config;
pub mod error;

pub use cli::{Cli, Command, run};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
