/// Errors raised while turning raw bytes into primitive values.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The slice handed to a decoder was shorter than the primitive width.
    #[error("short buffer: expected {expected} bytes, found {found}")]
    ShortBuffer { expected: usize, found: usize },

    /// A primitive kind name did not match any of the ten known kinds.
    #[error("unknown primitive kind {name:?}")]
    UnknownKind { name: String },
}
