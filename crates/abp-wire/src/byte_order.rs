/// Byte order used to lay out multi-byte primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

/// The byte order every decoder in the workspace applies.
///
/// This is a compatibility boundary: producers must write multi-byte
/// values least-significant byte first. It is deliberately a constant
/// and not a parameter, there is no negotiation.
///
/// ```text
///   u32 0x1234_5678 on the wire:  78 56 34 12
/// ```
pub const BYTE_ORDER: ByteOrder = ByteOrder::Little;

impl ByteOrder {
    /// Short display name (`"little-endian"` / `"big-endian"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Little => "little-endian",
            Self::Big => "big-endian",
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_order_is_little_endian() {
        assert_eq!(BYTE_ORDER, ByteOrder::Little);
        assert_eq!(BYTE_ORDER.to_string(), "little-endian");
    }
}
