//! Producer/consumer run driving an AsyncWriter
//!
//! Spawns the configured number of producer threads, each emitting its lines
//! through a [`LinePublisher`], while a single writer thread drains the queue
//! into the output.

use crate::app::cli::{FullPolicy, RunConfig};
use crate::queue::{
    AsyncWriter, LinePublisher, PushError, QueueError, QueueResult, WriterConfig, WriterStats,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines the producers tried to emit
    pub attempted: u64,
    /// Lines given up on under [`FullPolicy::Drop`]
    pub dropped: u64,
    pub stats: WriterStats,
    pub elapsed: Duration,
}

/// Run producers against a writer until every line is accepted or dropped
pub fn run(config: &RunConfig) -> QueueResult<RunSummary> {
    let sink: Box<dyn Write + Send> = match &config.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    let writer = AsyncWriter::spawn(
        sink,
        WriterConfig {
            capacity: config.capacity,
            idle_timeout: config.pop_timeout,
            ..WriterConfig::default()
        },
    )?;

    log::info!(
        "Running {} producer(s) x {} line(s) through a queue of capacity {} (on full: {:?})",
        config.producers,
        config.lines_per_producer,
        config.capacity,
        config.on_full
    );

    let start = Instant::now();
    let produced: Vec<QueueResult<u64>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.producers)
            .map(|producer_id| {
                let publisher = writer.publisher();
                let lines = config.lines_per_producer;
                let policy = config.on_full;
                scope.spawn(move || produce(producer_id, &publisher, lines, policy))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut dropped = 0;
    for result in produced {
        dropped += result?;
    }

    writer.publisher().flush(config.flush_timeout)?;
    let stats = writer.shutdown();
    let elapsed = start.elapsed();

    log::info!(
        "Run finished in {:?}: {} written, {} dropped",
        elapsed,
        stats.written,
        dropped
    );

    Ok(RunSummary {
        attempted: attempted_lines(config.producers, config.lines_per_producer),
        dropped,
        stats,
        elapsed,
    })
}

/// Total lines a run will try to emit, clamped instead of overflowing
fn attempted_lines(producers: usize, lines_per_producer: usize) -> u64 {
    (producers as u64).saturating_mul(lines_per_producer as u64)
}

/// Emit `lines` lines; returns how many were dropped
fn produce(
    producer_id: usize,
    publisher: &LinePublisher,
    lines: usize,
    policy: FullPolicy,
) -> QueueResult<u64> {
    let mut dropped = 0;

    for line_no in 0..lines {
        let mut line = format!("producer-{} line-{}", producer_id, line_no);
        loop {
            match publisher.submit(line) {
                Ok(()) => break,
                Err(PushError::Full { item, .. }) if policy == FullPolicy::Retry => {
                    line = item;
                    thread::yield_now();
                }
                Err(PushError::Full { .. }) => {
                    dropped += 1;
                    break;
                }
                Err(PushError::Closed { .. }) => return Err(QueueError::Closed),
            }
        }
    }

    log::debug!("Producer {} done ({} dropped)", producer_id, dropped);
    Ok(dropped)
}
