use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::{AsyncRead, ReadBuf};

/// Readiness of a [`ByteSource`] as seen before a read sequence starts.
///
/// ```text
///   Open      → reads may proceed
///   Closed    → the source exists but can no longer be read
///   Detached  → there is no source behind the handle at all
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceState {
  Open,
  Closed,
  Detached,
}

/// An asynchronous source of bytes that may deliver data incrementally.
///
/// This is the stream capability the accumulator consumes. A source
/// reports whether it is readable at all, reads up to `buf.len()` bytes
/// per poll, and may report that its data is definitively exhausted.
///
/// A read that completes with `Ok(0)` is **not** taken as end-of-data on
/// its own. Sources that know they are exhausted say so through
/// [`is_at_end`](Self::is_at_end); sources that merely have nothing
/// buffered yet return `Ok(0)` and leave `is_at_end` false, and the
/// accumulator backs off and retries.
///
/// Plain [`tokio::io::AsyncRead`] types are adapted through
/// [`AsyncReadSource`].
pub trait ByteSource {
  /// Current readiness. Defaults to [`SourceState::Open`].
  fn state(&self) -> SourceState {
    SourceState::Open
  }

  /// Whether the source has definitively run out of data.
  fn is_at_end(&self) -> bool {
    false
  }

  /// Attempt to read up to `buf.len()` bytes into the front of `buf`.
  ///
  /// Returns the number of bytes written, which may be zero or less than
  /// `buf.len()`.
  ///
  /// # Errors
  ///
  /// Any I/O error raised by the underlying transport.
  fn poll_read_some(
    self: Pin<&mut Self>,
    cx: &mut Context<'_>,
    buf: &mut [u8],
  ) -> Poll<io::Result<usize>>;
}

impl<S: ByteSource + Unpin + ?Sized> ByteSource for &mut S {
  fn state(&self) -> SourceState {
    (**self).state()
  }

  fn is_at_end(&self) -> bool {
    (**self).is_at_end()
  }

  fn poll_read_some(
    mut self: Pin<&mut Self>,
    cx: &mut Context<'_>,
    buf: &mut [u8],
  ) -> Poll<io::Result<usize>> {
    Pin::new(&mut **self).poll_read_some(cx, buf)
  }
}

impl<S: ByteSource + Unpin + ?Sized> ByteSource for Box<S> {
  fn state(&self) -> SourceState {
    (**self).state()
  }

  fn is_at_end(&self) -> bool {
    (**self).is_at_end()
  }

  fn poll_read_some(
    mut self: Pin<&mut Self>,
    cx: &mut Context<'_>,
    buf: &mut [u8],
  ) -> Poll<io::Result<usize>> {
    Pin::new(&mut **self).poll_read_some(cx, buf)
  }
}

/// A missing source. `None` reports [`SourceState::Detached`] and is
/// rejected before any read is attempted.
impl<S: ByteSource + Unpin> ByteSource for Option<S> {
  fn state(&self) -> SourceState {
    match self {
      Some(source) => source.state(),
      None => SourceState::Detached,
    }
  }

  fn is_at_end(&self) -> bool {
    self.as_ref().is_some_and(|source| source.is_at_end())
  }

  fn poll_read_some(
    self: Pin<&mut Self>,
    cx: &mut Context<'_>,
    buf: &mut [u8],
  ) -> Poll<io::Result<usize>> {
    match self.get_mut() {
      Some(source) => Pin::new(source).poll_read_some(cx, buf),
      None => Poll::Ready(Err(io::Error::new(
        io::ErrorKind::NotConnected,
        "no source attached",
      ))),
    }
  }
}

/// Adapts a [`tokio::io::AsyncRead`] into a [`ByteSource`].
///
/// tokio defines a zero-length read into a non-empty buffer as end of
/// file, so the adapter latches [`is_at_end`](ByteSource::is_at_end) the
/// first time that happens. Files, sockets, pipes and in-memory readers
/// (`&[u8]`, `Cursor`) all go through here.
#[derive(Debug)]
pub struct AsyncReadSource<R> {
  inner: R,
  eof: bool,
}

impl<R> AsyncReadSource<R> {
  /// Wrap `inner`, starting before its end.
  #[must_use]
  pub fn new(inner: R) -> Self {
    Self { inner, eof: false }
  }

  /// The wrapped reader.
  pub fn get_ref(&self) -> &R {
    &self.inner
  }

  /// The wrapped reader, mutably. Reading from it directly bypasses the
  /// end-of-file latch.
  pub fn get_mut(&mut self) -> &mut R {
    &mut self.inner
  }

  /// Unwrap the reader, keeping whatever it has not yet delivered.
  pub fn into_inner(self) -> R {
    self.inner
  }
}

impl<R: AsyncRead + Unpin> ByteSource for AsyncReadSource<R> {
  fn is_at_end(&self) -> bool {
    self.eof
  }

  fn poll_read_some(
    self: Pin<&mut Self>,
    cx: &mut Context<'_>,
    buf: &mut [u8],
  ) -> Poll<io::Result<usize>> {
    let this = self.get_mut();
    let mut read_buf = ReadBuf::new(buf);
    ready!(Pin::new(&mut this.inner).poll_read(cx, &mut read_buf))?;

    let n = read_buf.filled().len();
    if n == 0 && read_buf.capacity() > 0 {
      this.eof = true;
    }
    Poll::Ready(Ok(n))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::future::poll_fn;

  async fn read_some<S: ByteSource + Unpin>(source: &mut S, buf: &mut [u8]) -> io::Result<usize> {
    poll_fn(|cx| Pin::new(&mut *source).poll_read_some(cx, buf)).await
  }

  #[tokio::test]
  async fn adapter_reads_and_latches_eof() {
    let mut source = AsyncReadSource::new(&b"abc"[..]);
    let mut buf = [0u8; 8];

    assert_eq!(read_some(&mut source, &mut buf).await.unwrap(), 3);
    assert!(!source.is_at_end());
    assert_eq!(&buf[..3], b"abc");

    assert_eq!(read_some(&mut source, &mut buf).await.unwrap(), 0);
    assert!(source.is_at_end());
  }

  #[tokio::test]
  async fn adapter_empty_buffer_is_not_eof() {
    let mut source = AsyncReadSource::new(&b"abc"[..]);
    assert_eq!(read_some(&mut source, &mut []).await.unwrap(), 0);
    assert!(!source.is_at_end());
  }

  #[test]
  fn option_state_reflects_presence() {
    let missing: Option<AsyncReadSource<&[u8]>> = None;
    assert_eq!(missing.state(), SourceState::Detached);
    assert!(!missing.is_at_end());

    let present = Some(AsyncReadSource::new(&b""[..]));
    assert_eq!(present.state(), SourceState::Open);
  }

  #[tokio::test]
  async fn option_none_refuses_to_read() {
    let mut missing: Option<AsyncReadSource<&[u8]>> = None;
    let err = read_some(&mut missing, &mut [0u8; 4]).await.unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotConnected);
  }

  #[tokio::test]
  async fn boxed_and_borrowed_sources_forward() {
    let mut boxed: Box<AsyncReadSource<&[u8]>> = Box::new(AsyncReadSource::new(&b"xy"[..]));
    let mut borrowed = &mut *boxed;
    let mut buf = [0u8; 2];
    assert_eq!(read_some(&mut borrowed, &mut buf).await.unwrap(), 2);
    assert_eq!(borrowed.state(), SourceState::Open);
    assert_eq!(&buf, b"xy");
  }

  #[tokio::test]
  async fn adapter_exposes_the_wrapped_reader() {
    let mut source = AsyncReadSource::new(&b"abcd"[..]);
    let mut buf = [0u8; 1];
    read_some(&mut source, &mut buf).await.unwrap();
    assert_eq!(source.get_ref().len(), 3);

    *source.get_mut() = &b"z"[..];
    read_some(&mut source, &mut buf).await.unwrap();
    assert_eq!(&buf, b"z");

    let rest: &[u8] = source.into_inner();
    assert!(rest.is_empty());
  }
}
