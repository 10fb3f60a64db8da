use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Delay between retries after a source reports zero bytes without
/// being at its end.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(10);

/// Largest byte count a single accumulation accepts by default (64 MiB).
///
/// Counts above it fail with `OutOfRange` before any allocation, so a
/// corrupt length prefix cannot request gigabytes. Set
/// `max_len = usize::MAX` to accept any count.
pub const DEFAULT_MAX_LEN: usize = 64 * 1024 * 1024;

/// Options for one accumulation call and the decoders built on it.
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────────────┐
/// │ Field    │ Purpose                                              │
/// ├──────────┼──────────────────────────────────────────────────────┤
/// │ backoff  │ Sleep after a transient zero-byte read               │
/// │ max_len  │ Upper bound on the requested byte count              │
/// │ cancel   │ Cooperative cancellation signal, checked every loop  │
/// └──────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// Cloning is cheap: the cancellation token is reference counted, and
/// cancelling any clone cancels them all.
#[derive(Clone, Debug)]
pub struct ReadOptions {
  /// How long to wait before retrying after a zero-byte read.
  pub backoff: Duration,

  /// Requests above this many bytes fail with
  /// [`ReadError::OutOfRange`](crate::ReadError::OutOfRange) before
  /// anything is allocated or read.
  pub max_len: usize,

  /// When set, the read fails with
  /// [`ReadError::Cancelled`](crate::ReadError::Cancelled) as soon as the
  /// token is cancelled.
  pub cancel: Option<CancellationToken>,
}

impl Default for ReadOptions {
  fn default() -> Self {
    Self {
      backoff: DEFAULT_BACKOFF,
      max_len: DEFAULT_MAX_LEN,
      cancel: None,
    }
  }
}

impl ReadOptions {
  #[must_use]
  pub fn with_backoff(mut self, backoff: Duration) -> Self {
    self.backoff = backoff;
    self
  }

  #[must_use]
  pub fn with_max_len(mut self, max_len: usize) -> Self {
    self.max_len = max_len;
    self
  }

  #[must_use]
  pub fn with_cancel(mut self, token: CancellationToken) -> Self {
    self.cancel = Some(token);
    self
  }

  /// True once the attached token, if any, has been cancelled.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let opts = ReadOptions::default();
    assert_eq!(opts.backoff, Duration::from_millis(10));
    assert_eq!(opts.max_len, DEFAULT_MAX_LEN);
    assert!(opts.cancel.is_none());
    assert!(!opts.is_cancelled());
  }

  #[test]
  fn cancelling_a_clone_is_observed() {
    let token = CancellationToken::new();
    let opts = ReadOptions::default().with_cancel(token.clone());
    let copy = opts.clone();
    token.cancel();
    assert!(opts.is_cancelled());
    assert!(copy.is_cancelled());
  }

  #[test]
  fn builders_override_fields() {
    let opts = ReadOptions::default()
      .with_backoff(Duration::from_millis(1))
      .with_max_len(16);
    assert_eq!(opts.backoff, Duration::from_millis(1));
    assert_eq!(opts.max_len, 16);
  }
}
