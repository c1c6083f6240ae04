//! Logging abstraction layer.
//!
//! Engine components never reach for a global logger. They receive an
//! `Arc<dyn Logger>` when constructed and log through the macros exported at
//! the crate root, so tests can swap in a silent or capturing logger and
//! embedding applications can route messages wherever they like.
//!
//! # Implementations
//!
//! - [`TracingLogger`]: forwards to the `tracing` crate (production default)
//! - [`NoOpLogger`]: discards everything
//! - [`MemoryLogger`]: keeps records in memory for assertions
//!
//! # Usage
//!
//! ```
//! use voxmason::log::{Logger, NoOpLogger};
//! use voxmason::{log_info, log_warn};
//! use std::sync::Arc;
//!
//! struct Placer {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! impl Placer {
//!     fn place(&self, count: usize) {
//!         log_info!(self.logger, "Placing {} cells", count);
//!         if count == 0 {
//!             log_warn!(self.logger, "Nothing to place");
//!         }
//!     }
//! }
//!
//! let placer = Placer { logger: Arc::new(NoOpLogger) };
//! placer.place(0);
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
