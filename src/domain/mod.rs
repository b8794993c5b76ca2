//! Domain logic - the version model, independent of any work area

pub mod mode;
pub mod token;
pub mod version;

pub use mode::ReleaseMode;
pub use token::{tokenize, VersionToken};
pub use version::Version;
