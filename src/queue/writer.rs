//! Asynchronous line writer
//!
//! The consumer side of the queue: a dedicated thread pops lines with a
//! timeout and writes them to any [`Write`] sink. A timeout is treated as
//! idle time and used to flush buffered output. Producers hand lines over
//! through [`LinePublisher`] handles and never block on I/O.

use crate::queue::bounded::{BoundedBlockingQueue, DEFAULT_CAPACITY};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::publisher::LinePublisher;
use crate::sync::CountingSemaphore;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Unit of work travelling through the writer queue
#[derive(Debug)]
pub(crate) enum Entry {
    Line(String),
    /// Flush the sink, then post the requester's own confirmation
    Flush(Arc<CountingSemaphore>),
}

impl Entry {
    /// Text of a line entry; a flush marker carries none
    pub(crate) fn into_line(self) -> String {
        match self {
            Entry::Line(line) => line,
            Entry::Flush(_) => String::new(),
        }
    }
}

/// Settings for [`AsyncWriter::spawn`]
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Maximum number of lines buffered between producers and the writer thread
    pub capacity: usize,
    /// How long the writer thread waits for a line before flushing
    pub idle_timeout: Duration,
    pub thread_name: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            idle_timeout: Duration::from_millis(100),
            thread_name: "blockqueue-writer".to_string(),
        }
    }
}

/// Counters snapshot returned by [`AsyncWriter::stats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Lines accepted into the queue
    pub accepted: u64,
    /// Lines rejected because the queue was full
    pub rejected: u64,
    /// Lines written to the sink
    pub written: u64,
    /// Lines whose write failed
    pub failed: u64,
}

#[derive(Debug, Default)]
pub(crate) struct WriterCounters {
    pub(crate) accepted: AtomicU64,
    pub(crate) rejected: AtomicU64,
    pub(crate) written: AtomicU64,
    pub(crate) failed: AtomicU64,
}

impl WriterCounters {
    fn snapshot(&self) -> WriterStats {
        WriterStats {
            accepted: self.accepted.load(Ordering::Acquire),
            rejected: self.rejected.load(Ordering::Acquire),
            written: self.written.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
        }
    }
}

/// State shared between the writer, its publishers and the writer thread
#[derive(Debug)]
pub(crate) struct WriterShared {
    pub(crate) queue: BoundedBlockingQueue<Entry>,
    pub(crate) counters: WriterCounters,
}

/// Owns the writer thread; dropping it closes the queue and joins the thread
///
/// # Example
///
/// ```
/// use blockqueue::queue::{AsyncWriter, WriterConfig};
///
/// let writer = AsyncWriter::spawn(Vec::<u8>::new(), WriterConfig::default()).unwrap();
/// let publisher = writer.publisher();
/// publisher.submit("hello").unwrap();
///
/// let stats = writer.shutdown();
/// assert_eq!(stats.written, 1);
/// ```
#[derive(Debug)]
pub struct AsyncWriter {
    shared: Arc<WriterShared>,
    handle: Option<JoinHandle<()>>,
}

impl AsyncWriter {
    /// Start the writer thread draining into `sink`
    ///
    /// # Errors
    /// * [`QueueError::InvalidCapacity`] / [`QueueError::ResourceInit`] from the queue
    /// * [`QueueError::Io`] if the thread cannot be spawned
    pub fn spawn<W>(sink: W, config: WriterConfig) -> QueueResult<Self>
    where
        W: Write + Send + 'static,
    {
        let shared = Arc::new(WriterShared {
            queue: BoundedBlockingQueue::new(config.capacity)?,
            counters: WriterCounters::default(),
        });

        let thread_shared = Arc::clone(&shared);
        let idle_timeout = config.idle_timeout;
        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || drain(&thread_shared, sink, idle_timeout))?;

        log::debug!(
            "Started writer thread '{}' (capacity: {}, idle timeout: {:?})",
            config.thread_name,
            config.capacity,
            config.idle_timeout
        );

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// New producer handle feeding this writer
    pub fn publisher(&self) -> LinePublisher {
        LinePublisher::new(Arc::clone(&self.shared))
    }

    /// Lines queued but not yet written
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn stats(&self) -> WriterStats {
        self.shared.counters.snapshot()
    }

    /// Close the queue, let the thread write what is left, and wait for it
    pub fn shutdown(mut self) -> WriterStats {
        self.finish();
        self.stats()
    }

    fn finish(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.shared.queue.close();
        if handle.join().is_err() {
            log::error!("Writer thread panicked before draining its queue");
        }
        let stats = self.stats();
        log::debug!(
            "Writer stopped: {} written, {} failed, {} rejected",
            stats.written,
            stats.failed,
            stats.rejected
        );
    }
}

impl Drop for AsyncWriter {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Writer thread body
fn drain<W: Write>(shared: &WriterShared, mut sink: W, idle_timeout: Duration) {
    let mut dirty = false;

    loop {
        match shared.queue.pop(idle_timeout) {
            Ok(Entry::Line(line)) => match writeln!(sink, "{}", line) {
                Ok(()) => {
                    shared.counters.written.fetch_add(1, Ordering::AcqRel);
                    dirty = true;
                }
                Err(e) => {
                    shared.counters.failed.fetch_add(1, Ordering::AcqRel);
                    log::error!("Failed to write line: {}", e);
                }
            },
            Ok(Entry::Flush(confirmed)) => {
                flush_sink(&mut sink);
                dirty = false;
                confirmed.post();
            }
            Err(QueueError::Timeout { .. }) => {
                if dirty {
                    flush_sink(&mut sink);
                    dirty = false;
                }
            }
            Err(QueueError::Closed) => {
                flush_sink(&mut sink);
                break;
            }
            Err(e) => {
                log::error!("Writer thread stopping on unexpected error: {}", e);
                flush_sink(&mut sink);
                break;
            }
        }
    }
}

fn flush_sink<W: Write>(sink: &mut W) {
    if let Err(e) = sink.flush() {
        log::error!("Failed to flush writer: {}", e);
    }
}
