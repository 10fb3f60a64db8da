//! Shared fixtures for the ABP integration tests and benches.
//!
//! The main fixture is [`pipe`], an in-memory producer/consumer source.
//! Unlike a tokio reader it returns `Ok(0)` while empty without being at
//! its end, the way a shared memory buffer that another task is still
//! filling behaves. That is exactly the case the accumulator's backoff
//! exists for.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use abp_reader::{ByteSource, SourceState};

#[derive(Debug, Default)]
struct Shared {
    buf: VecDeque<u8>,
    finished: bool,
    closed: bool,
    reads: usize,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Create a connected writer/reader pair over one shared buffer.
pub fn pipe() -> (PipeWriter, PipeReader) {
    let shared = Arc::new(Mutex::new(Shared::default()));
    (
        PipeWriter {
            shared: Arc::clone(&shared),
        },
        PipeReader { shared },
    )
}

/// Producer half. Dropping it marks the data as finished.
#[derive(Debug)]
pub struct PipeWriter {
    shared: Arc<Mutex<Shared>>,
}

impl PipeWriter {
    /// Append bytes for the reader to pick up.
    pub fn write(&self, bytes: &[u8]) {
        lock(&self.shared).buf.extend(bytes);
    }

    /// Declare that no more bytes will be written.
    pub fn finish(&self) {
        lock(&self.shared).finished = true;
    }
}

impl Drop for PipeWriter {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Consumer half, a [`ByteSource`].
#[derive(Debug)]
pub struct PipeReader {
    shared: Arc<Mutex<Shared>>,
}

impl PipeReader {
    /// Make the reader unreadable, like closing a stream.
    pub fn close(&self) {
        lock(&self.shared).closed = true;
    }

    /// How many times `poll_read_some` has been called.
    pub fn reads(&self) -> usize {
        lock(&self.shared).reads
    }

    /// Bytes written but not yet consumed.
    pub fn buffered(&self) -> usize {
        lock(&self.shared).buf.len()
    }
}

impl ByteSource for PipeReader {
    fn state(&self) -> SourceState {
        if lock(&self.shared).closed {
            SourceState::Closed
        } else {
            SourceState::Open
        }
    }

    fn is_at_end(&self) -> bool {
        let shared = lock(&self.shared);
        shared.finished && shared.buf.is_empty()
    }

    fn poll_read_some(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        out: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let mut shared = lock(&self.shared);
        shared.reads += 1;

        let n = out.len().min(shared.buf.len());
        for (slot, byte) in out.iter_mut().zip(shared.buf.drain(..n)) {
            *slot = byte;
        }
        Poll::Ready(Ok(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abp_reader::read_bytes;

    #[tokio::test]
    async fn pipe_delivers_written_bytes() {
        let (writer, mut reader) = pipe();
        writer.write(b"hello");
        assert_eq!(read_bytes(&mut reader, 5).await.unwrap(), b"hello");
        assert_eq!(reader.buffered(), 0);
    }

    #[test]
    fn dropping_writer_ends_data() {
        let (writer, reader) = pipe();
        assert!(!reader.is_at_end());
        drop(writer);
        assert!(reader.is_at_end());
    }

    #[test]
    fn close_makes_reader_unreadable() {
        let (_writer, reader) = pipe();
        reader.close();
        assert_eq!(reader.state(), SourceState::Closed);
    }
}
