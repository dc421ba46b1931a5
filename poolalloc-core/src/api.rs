//! The API of poolalloc-core.

mod configuration;
mod error;
mod heap;
mod platform;
mod pool;

pub use configuration::{MAX_ALIGNMENT, PoolConfiguration};
pub use error::AllocError;
pub use heap::AlignedRawAllocator;
pub use platform::Platform;
pub use pool::PoolAllocator;
pub use crate::utils::PowerOf2;
