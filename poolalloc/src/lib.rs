#![no_std]
#![deny(missing_docs)]

//! Aligned heap and dynamic pool allocators, on top of the system allocator.
//!
//! The type `HeapAllocator` provides aligned allocations straight from the system allocator, whilst the type
//! `DynamicPoolAllocator` recycles fixed-size blocks, only calling into the system allocator once its free-list is
//! exhausted.
//!
//! #   Warning
//!
//! Neither allocator tracks the memory it lends out: deallocating foreign pointers, double deallocations, or use after
//! deallocation are Undefined Behavior, and blocks still lent out when a pool is dropped are leaked.
//!
//! #   Example
//!
//! ```
//! use poolalloc::{DynamicPoolAllocator, PoolConfiguration};
//!
//! let pool = DynamicPoolAllocator::new(PoolConfiguration::of::<u64>().with_initial_count(1)).expect("Pool");
//!
//! let raw = pool.allocate().expect("Block");
//!
//! //  Safety:
//! //  -   `raw` was freshly allocated for a `u64`.
//! let value = unsafe { pool.construct(raw, 42u64) };
//! assert_eq!(42, unsafe { *value.as_ptr() });
//!
//! //  Safety:
//! //  -   `value` is no longer used.
//! unsafe { pool.deallocate(pool.destruct(value)) };
//!
//! assert_eq!(raw, pool.allocate().expect("Block"));
//! ```

mod platform;

pub use platform::SystemPlatform;

pub use poolalloc_core::{
    AlignedRawAllocator, AllocError, MAX_ALIGNMENT, Platform, PoolAllocator, PoolConfiguration, PowerOf2,
};

/// Aligned allocator over the system allocator.
///
/// Usable as `#[global_allocator]`, for alignments up to `MAX_ALIGNMENT`.
pub type HeapAllocator = AlignedRawAllocator<SystemPlatform>;

/// Dynamic pool allocator over the system allocator.
pub type DynamicPoolAllocator = PoolAllocator<SystemPlatform>;
