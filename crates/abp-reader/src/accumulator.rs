use std::future::{Future, poll_fn};
use std::io;
use std::pin::Pin;

use tracing::{debug, trace};

use crate::config::ReadOptions;
use crate::error::ReadError;
use crate::source::{ByteSource, SourceState};

/// Read exactly `count` bytes from `stream`, accumulating partial reads.
///
/// The checks run in a fixed order, before any byte is read:
///
/// ```text
///   Detached source          → InvalidArgument
///   Closed source            → InvalidState
///   count > max_len          → OutOfRange
///   count == 0               → Ok(empty), source untouched
///   token already cancelled  → Cancelled
/// ```
///
/// Then the loop below runs until `count` bytes are held:
///
/// ```text
///   ┌─► cancelled? ── yes ──► Err(Cancelled)
///   │      │ no
///   │   read into buf[count - remaining..]   (races the token)
///   │      │
///   │   n == 0 ── source at end? ── yes ──► Err(EndOfStream)
///   │      │            │ no
///   │      │         sleep(backoff)          (races the token)
///   │      │            │
///   │   remaining -= n  │
///   └──────┴────────────┘
/// ```
///
/// A zero-byte read is only fatal when the source reports
/// [`ByteSource::is_at_end`]; otherwise data may still be on its way and
/// the call waits `options.backoff` before retrying. Every wait is an
/// await point, so the task yields to the runtime rather than spinning.
///
/// On success the returned vector has length `count` and the source has
/// advanced by exactly `count` bytes. On failure the partially filled
/// buffer is dropped.
///
/// `count` is bounded by `options.max_len`, which defaults to
/// [`DEFAULT_MAX_LEN`](crate::config::DEFAULT_MAX_LEN) (64 MiB). A larger
/// count fails with [`ReadError::OutOfRange`] even when the source holds
/// enough data; callers that expect larger reads must raise the limit with
/// [`ReadOptions::with_max_len`] (`usize::MAX` removes it).
///
/// # Errors
///
/// - [`ReadError::InvalidArgument`] if the source is detached.
/// - [`ReadError::InvalidState`] if the source is closed.
/// - [`ReadError::OutOfRange`] if `count` exceeds `options.max_len`.
/// - [`ReadError::Cancelled`] if the token fires before completion.
/// - [`ReadError::EndOfStream`] if the source runs dry first.
/// - [`ReadError::Io`] for errors raised by the source itself, or of kind
///   [`InvalidData`](io::ErrorKind::InvalidData) when the source reports
///   more bytes than the window it was handed.
pub async fn read_exact<S>(
  stream: &mut S,
  count: usize,
  options: &ReadOptions,
) -> Result<Vec<u8>, ReadError>
where
  S: ByteSource + Unpin + ?Sized,
{
  match stream.state() {
    SourceState::Detached => return Err(ReadError::InvalidArgument),
    SourceState::Closed => return Err(ReadError::InvalidState),
    SourceState::Open => {}
  }

  if count > options.max_len {
    return Err(ReadError::OutOfRange {
      requested: count,
      limit: options.max_len,
    });
  }

  if count == 0 {
    return Ok(Vec::new());
  }

  let mut buf = vec![0u8; count];
  let mut remaining = count;

  while remaining > 0 {
    if options.is_cancelled() {
      debug!(requested = count, received = count - remaining, "read cancelled");
      return Err(ReadError::Cancelled);
    }

    let offset = count - remaining;
    let read = until_cancelled(
      options,
      poll_fn(|cx| Pin::new(&mut *stream).poll_read_some(cx, &mut buf[offset..])),
    )
    .await??;

    if read == 0 {
      if stream.is_at_end() {
        debug!(requested = count, received = offset, "source exhausted");
        return Err(ReadError::EndOfStream {
          requested: count,
          received: offset,
        });
      }

      trace!(remaining, backoff = ?options.backoff, "zero-byte read, backing off");
      until_cancelled(options, tokio::time::sleep(options.backoff)).await?;
    } else if read > remaining {
      return Err(ReadError::Io(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("source reported {read} bytes for a {remaining}-byte window"),
      )));
    } else {
      remaining -= read;
    }
  }

  Ok(buf)
}

/// [`read_exact`] with default [`ReadOptions`].
///
/// # Errors
///
/// Same as [`read_exact`], minus cancellation.
pub async fn read_bytes<S>(stream: &mut S, count: usize) -> Result<Vec<u8>, ReadError>
where
  S: ByteSource + Unpin + ?Sized,
{
  read_exact(stream, count, &ReadOptions::default()).await
}

/// Drive `fut` to completion unless the options' token fires first.
async fn until_cancelled<F: Future>(options: &ReadOptions, fut: F) -> Result<F::Output, ReadError> {
  match &options.cancel {
    None => Ok(fut.await),
    Some(token) => tokio::select! {
      biased;
      () = token.cancelled() => Err(ReadError::Cancelled),
      out = fut => Ok(out),
    },
  }
}
