#![no_std]

#![deny(missing_docs)]

//! Building blocks for aligned manual memory management.
//!
//! poolalloc-core is a set of building blocks to replace general-purpose allocation in hot paths. It contains:
//! -   A platform trait, used to request raw, possibly misaligned, memory from the system.
//! -   An aligned raw allocator, padding each allocation to the requested alignment and recording the padding in the
//!     byte preceding the returned pointer.
//! -   A dynamic pool allocator, recycling fixed-size blocks through an intrusive free-list and only requesting more
//!     memory from the platform once the free-list is exhausted.

#[cfg(test)]
extern crate std;

mod api;
mod internals;
mod utils;

pub use api::*;
