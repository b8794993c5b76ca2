pub mod archive;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod process;
pub mod project;
pub mod runtime;
pub mod sequence;
pub mod template;
pub mod ui;
pub mod warning;

pub use error::{ReleaseError, Result};
