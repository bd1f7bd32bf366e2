//! Release queue backends.

pub mod memory;

pub use memory::InMemoryReleaseQueue;
