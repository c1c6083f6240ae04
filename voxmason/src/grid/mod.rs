//! Reference grid implementations.
//!
//! The engine writes through [`CellWriter`](crate::engine::CellWriter) and
//! never owns storage. [`MemoryGrid`] is a concurrent in-memory grid used by
//! the CLI and by tests.

mod memory;

pub use memory::MemoryGrid;
