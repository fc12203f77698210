use crate::error::ConvertError;

/// Result of reading one item: `Ok(None)` once the source is exhausted.
pub type ItemReaderResult<R> = Result<Option<R>, ConvertError>;

pub type ItemProcessorResult<W> = Result<W, ConvertError>;

pub type ItemWriterResult = Result<(), ConvertError>;

/// Pulls items one at a time from a source.
pub trait ItemReader<R> {
    fn read(&self) -> ItemReaderResult<R>;
}

/// Turns a read item into the item handed to the writer.
pub trait ItemProcessor<R, W> {
    fn process(&self, item: &R) -> ItemProcessorResult<W>;
}

/// Pushes items to a sink.
///
/// `flush` must push any buffered state to the underlying sink; the step calls
/// it once after the last item.
pub trait ItemWriter<W> {
    fn write(&self, item: &W) -> ItemWriterResult;
    fn flush(&self) -> ItemWriterResult;
    fn open(&self) -> ItemWriterResult {
        Ok(())
    }
    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}

/// Hands every item through unchanged.
#[derive(Default)]
pub struct PassThroughProcessor {}

impl<R: Clone> ItemProcessor<R, R> for PassThroughProcessor {
    fn process(&self, item: &R) -> ItemProcessorResult<R> {
        Ok(item.clone())
    }
}
