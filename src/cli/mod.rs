//! Command-line workflow, kept separate from argument parsing
pub mod orchestration;
