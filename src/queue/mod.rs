//! Bounded Blocking Queue Component
//!
//! A fixed-capacity FIFO hand-off buffer between producer threads and a
//! consumer thread, plus the asynchronous line writer built on top of it.
//!
//! # Overview
//!
//! - **Backpressure**: `push` never blocks; a full queue rejects the item
//! - **Timed dequeue**: `pop` blocks until an item arrives or a deadline passes
//! - **Strict FIFO**: a single consumer sees items in acceptance order
//! - **Shutdown**: `close` wakes blocked consumers once the queue is drained
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ push               │ push               │ push
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │           BoundedBlockingQueue (Mutex + CondVar)        │
//! │      ┌───┬───┬───┬───┬───┬───┬───┬───┐                  │
//! │      │ 1 │ 2 │ 3 │ 4 │   │   │   │   │  ring buffer     │
//! │      └───┴───┴───┴───┴───┴───┴───┴───┘                  │
//! │        ▲ front       ▲ back                             │
//! └────────┼────────────────────────────────────────────────┘
//!          │ pop(timeout)
//!   ┌──────┴──────┐
//!   │  Consumer   │  (AsyncWriter thread: write, flush on idle)
//!   └─────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use blockqueue::queue::{AsyncWriter, PushError, WriterConfig};
//! use std::fs::File;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let writer = AsyncWriter::spawn(File::create("app.log")?, WriterConfig::default())?;
//! let publisher = writer.publisher();
//!
//! match publisher.submit("service started") {
//!     Ok(()) => {}
//!     Err(PushError::Full { item, .. }) => eprintln!("log line dropped: {}", item),
//!     Err(e) => return Err(e.into()),
//! }
//!
//! let stats = writer.shutdown();
//! println!("wrote {} lines", stats.written);
//! # Ok(())
//! # }
//! ```

mod bounded;
mod error;
mod publisher;
mod ring;
mod writer;

pub use bounded::{BoundedBlockingQueue, DEFAULT_CAPACITY};
pub use error::{PushError, PushResult, QueueError, QueueResult};
pub use publisher::LinePublisher;
pub use writer::{AsyncWriter, WriterConfig, WriterStats};

#[cfg(test)]
mod tests;
