use std::{
    cell::Cell,
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use crate::error::ConvertError;

use super::{
    cancel::CancellationToken,
    item::{ItemProcessor, ItemReader, ItemWriter, PassThroughProcessor},
};

/// How a step that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The reader ran out of items.
    Completed,
    /// Cancellation was requested; items written so far are valid output.
    Stopped,
}

/// Summary of one step run.
#[derive(Debug)]
pub struct StepExecution {
    pub name: String,
    pub start: Instant,
    pub end: Instant,
    pub duration: Duration,
    pub status: StepStatus,
    pub read_count: usize,
    pub write_count: usize,
}

/// Streams items from a reader through a processor into a writer, one item at
/// a time.
///
/// Each item is written as soon as it is processed; nothing is buffered by the
/// step itself. The cancellation token is checked before every read.
pub struct Step<'a, R, W> {
    name: String,
    reader: &'a dyn ItemReader<R>,
    processor: &'a dyn ItemProcessor<R, W>,
    writer: &'a dyn ItemWriter<W>,
    cancellation: CancellationToken,
    read_count: Cell<usize>,
    write_count: Cell<usize>,
}

impl<R, W> Step<'_, R, W> {
    /// Runs the step to the end of the reader, to cancellation, or to the first
    /// error.
    ///
    /// On success the writer is flushed and the first flush error, if any,
    /// becomes the result. On failure the writer is flushed on a best-effort
    /// basis so already written items reach the sink, and the original error
    /// is returned.
    pub fn execute(&self) -> Result<StepExecution, ConvertError> {
        let start = Instant::now();

        debug!("Start of step: {}", self.name);

        self.writer.open()?;

        let status = match self.stream_items() {
            Ok(status) => status,
            Err(err) => {
                self.flush_quietly();
                return Err(err);
            }
        };

        self.writer.flush()?;
        self.writer.close()?;

        let execution = StepExecution {
            name: self.name.clone(),
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            status,
            read_count: self.read_count.get(),
            write_count: self.write_count.get(),
        };

        info!(
            "End of step: {}, status: {:?}, read: {}, written: {}, duration: {:?}",
            execution.name,
            execution.status,
            execution.read_count,
            execution.write_count,
            execution.duration
        );

        Ok(execution)
    }

    fn stream_items(&self) -> Result<StepStatus, ConvertError> {
        loop {
            if self.cancellation.is_cancelled() {
                warn!(
                    "Step {} cancelled after {} items",
                    self.name,
                    self.write_count.get()
                );
                return Ok(StepStatus::Stopped);
            }

            let Some(item) = self.reader.read()? else {
                debug!("Reader exhausted");
                return Ok(StepStatus::Completed);
            };
            self.inc_read_count();

            let processed = self.processor.process(&item)?;
            self.writer.write(&processed)?;
            self.inc_write_count();
        }
    }

    fn flush_quietly(&self) {
        if let Err(err) = self.writer.flush() {
            warn!("Could not flush rows written before failure: {}", err);
        }
    }

    fn inc_read_count(&self) {
        self.read_count.set(self.read_count.get() + 1);
    }

    fn inc_write_count(&self) {
        self.write_count.set(self.write_count.get() + 1);
    }
}

pub struct StepBuilder<'a, R, W> {
    name: Option<String>,
    reader: &'a dyn ItemReader<R>,
    processor: Option<&'a dyn ItemProcessor<R, W>>,
    writer: &'a dyn ItemWriter<W>,
    cancellation: CancellationToken,
}

impl<'a, R, W> StepBuilder<'a, R, W> {
    pub fn new(
        reader: &'a impl ItemReader<R>,
        writer: &'a impl ItemWriter<W>,
    ) -> StepBuilder<'a, R, W> {
        Self {
            name: None,
            reader,
            processor: None,
            writer,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> StepBuilder<'a, R, W> {
        self.name = Some(name.into());
        self
    }

    pub fn processor(mut self, processor: &'a impl ItemProcessor<R, W>) -> StepBuilder<'a, R, W> {
        self.processor = Some(processor);
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> StepBuilder<'a, R, W> {
        self.cancellation = token;
        self
    }

    pub fn build(self) -> Step<'a, R, W>
    where
        PassThroughProcessor: ItemProcessor<R, W>,
    {
        let default_processor = &PassThroughProcessor {};
        Step {
            name: self.name.unwrap_or_else(|| "step".to_string()),
            reader: self.reader,
            processor: self.processor.unwrap_or(default_processor),
            writer: self.writer,
            cancellation: self.cancellation,
            read_count: Cell::new(0),
            write_count: Cell::new(0),
        }
    }
}
