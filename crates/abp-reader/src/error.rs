use abp_wire::WireError;

/// Errors raised while accumulating bytes from a source or decoding
/// primitives from them.
///
/// ```text
///   ReadError
///   ├── InvalidArgument     ← no source behind the handle
///   ├── InvalidState        ← source closed, cannot be read
///   ├── OutOfRange          ← requested count above the configured limit
///   ├── Cancelled           ← cancellation token fired
///   ├── EndOfStream         ← source exhausted before the request was met
///   ├── Wire(WireError)     ← from abp-wire slice decoding
///   └── Io(std::io::Error)  ← from the underlying read
/// ```
///
/// No variant carries partially read bytes: a failed read discards them.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
  /// The source handle is empty (`None`).
  #[error("invalid argument: no source to read from")]
  InvalidArgument,

  /// The source exists but is not readable.
  #[error("invalid state: source is not readable")]
  InvalidState,

  /// The requested byte count exceeds [`ReadOptions::max_len`](crate::ReadOptions::max_len).
  #[error("requested {requested} bytes, limit is {limit}")]
  OutOfRange { requested: usize, limit: usize },

  /// The read was cancelled through its token.
  #[error("read cancelled")]
  Cancelled,

  /// The source signalled end of data before `requested` bytes arrived.
  #[error("end of stream after {received} of {requested} bytes")]
  EndOfStream { requested: usize, received: usize },

  /// The accumulated bytes could not be decoded as the requested kind.
  #[error(transparent)]
  Wire(#[from] WireError),

  /// An I/O error from the underlying source.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
