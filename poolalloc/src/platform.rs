//! Abstraction over OS differences.

mod malloc;

pub use malloc::SystemPlatform;
