//! Document source strategies.
//!
//! Only the filesystem strategy exists; the run loop in `lib.rs` calls it
//! directly rather than through a trait.

pub mod fs;

/// Content format for dispatching to the correct parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Yaml,
    Json,
}
