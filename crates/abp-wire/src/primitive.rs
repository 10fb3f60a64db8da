use std::fmt;
use std::str::FromStr;

use crate::byte_order::{BYTE_ORDER, ByteOrder};
use crate::error::WireError;

/// The ten fixed-width primitive kinds understood by the decoders.
///
/// ```text
/// ┌──────┬───────┐   ┌──────┬───────┐
/// │ Kind │ Width │   │ Kind │ Width │
/// ├──────┼───────┤   ├──────┼───────┤
/// │ i8   │ 1     │   │ u8   │ 1     │
/// │ i16  │ 2     │   │ u16  │ 2     │
/// │ i32  │ 4     │   │ u32  │ 4     │
/// │ i64  │ 8     │   │ u64  │ 8     │
/// │ f32  │ 4     │   │ f64  │ 8     │
/// └──────┴───────┘   └──────┴───────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 10] = [
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    /// Number of bytes one value of this kind occupies.
    #[must_use]
    pub fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// Rust type name of the kind (`"u32"`, `"f64"`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = WireError;

    /// Parse a kind from its type name. Matching is case-insensitive and
    /// ignores surrounding whitespace, so `" U16 "` parses as `U16`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WireError::UnknownKind {
                name: wanted.to_string(),
            })
    }
}

/// A decoded value of any primitive kind.
///
/// Used where the kind is only known at runtime. Statically typed call
/// sites decode straight into the Rust type through [`Primitive`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Value {
    /// The kind this value was decoded as.
    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::I8(_) => PrimitiveKind::I8,
            Self::U8(_) => PrimitiveKind::U8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::U16(_) => PrimitiveKind::U16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::U32(_) => PrimitiveKind::U32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::U64(_) => PrimitiveKind::U64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
        }
    }

    /// Decode the leading `kind.width()` bytes of `bytes` as `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::ShortBuffer`] if `bytes` is shorter than the
    /// width of `kind`.
    pub fn decode(kind: PrimitiveKind, bytes: &[u8]) -> Result<Self, WireError> {
        Ok(match kind {
            PrimitiveKind::I8 => i8::decode(bytes)?.into_value(),
            PrimitiveKind::U8 => u8::decode(bytes)?.into_value(),
            PrimitiveKind::I16 => i16::decode(bytes)?.into_value(),
            PrimitiveKind::U16 => u16::decode(bytes)?.into_value(),
            PrimitiveKind::I32 => i32::decode(bytes)?.into_value(),
            PrimitiveKind::U32 => u32::decode(bytes)?.into_value(),
            PrimitiveKind::I64 => i64::decode(bytes)?.into_value(),
            PrimitiveKind::U64 => u64::decode(bytes)?.into_value(),
            PrimitiveKind::F32 => f32::decode(bytes)?.into_value(),
            PrimitiveKind::F64 => f64::decode(bytes)?.into_value(),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
        }
    }
}

mod private {
    pub trait Sealed {}
}

/// A fixed-width numeric type that can be decoded from raw bytes in
/// [`BYTE_ORDER`].
///
/// Sealed: implemented for exactly the ten kinds of [`PrimitiveKind`].
pub trait Primitive: Copy + private::Sealed {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// The runtime kind tag for this type.
    const KIND: PrimitiveKind;

    /// Decode a value from the leading [`Self::WIDTH`] bytes of `bytes`.
    /// Any trailing bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::ShortBuffer`] if `bytes` holds fewer than
    /// [`Self::WIDTH`] bytes.
    fn decode(bytes: &[u8]) -> Result<Self, WireError>;

    /// Wrap the value into a dynamically typed [`Value`].
    fn into_value(self) -> Value;
}

// One impl per kind. The byte order match is on a constant, so only one
// arm survives compilation.
macro_rules! impl_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl private::Sealed for $ty {}

        impl Primitive for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();
            const KIND: PrimitiveKind = PrimitiveKind::$kind;

            fn decode(bytes: &[u8]) -> Result<Self, WireError> {
                let Some(head) = bytes.first_chunk::<{ std::mem::size_of::<$ty>() }>() else {
                    return Err(WireError::ShortBuffer {
                        expected: Self::WIDTH,
                        found: bytes.len(),
                    });
                };
                Ok(match BYTE_ORDER {
                    ByteOrder::Little => <$ty>::from_le_bytes(*head),
                    ByteOrder::Big => <$ty>::from_be_bytes(*head),
                })
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }
        }
    )*};
}

impl_primitive! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_rust_type_sizes() {
        assert_eq!(PrimitiveKind::I8.width(), i8::WIDTH);
        assert_eq!(PrimitiveKind::U16.width(), u16::WIDTH);
        assert_eq!(PrimitiveKind::I32.width(), i32::WIDTH);
        assert_eq!(PrimitiveKind::U64.width(), u64::WIDTH);
        assert_eq!(PrimitiveKind::F32.width(), f32::WIDTH);
        assert_eq!(PrimitiveKind::F64.width(), f64::WIDTH);
    }

    #[test]
    fn kind_constants_line_up() {
        assert_eq!(i8::KIND, PrimitiveKind::I8);
        assert_eq!(u32::KIND, PrimitiveKind::U32);
        assert_eq!(f64::KIND, PrimitiveKind::F64);
    }

    #[test]
    fn decodes_least_significant_byte_first() {
        let bytes = [0x78, 0x56, 0x34, 0x12];
        assert_eq!(u32::decode(&bytes).unwrap(), 0x1234_5678);
        assert_eq!(u16::decode(&bytes).unwrap(), 0x5678);
    }

    #[test]
    fn signed_values_use_twos_complement() {
        assert_eq!(i16::decode(&[0xFF, 0xFF]).unwrap(), -1);
        assert_eq!(i8::decode(&[0x80]).unwrap(), i8::MIN);
        assert_eq!(i64::decode(&[0, 0, 0, 0, 0, 0, 0, 0x80]).unwrap(), i64::MIN);
    }

    #[test]
    fn floats_decode_ieee754_bits() {
        assert_eq!(f32::decode(&[0x00, 0x00, 0x80, 0x3F]).unwrap(), 1.0);
        assert_eq!(
            f64::decode(&[0, 0, 0, 0, 0, 0, 0xF0, 0xBF]).unwrap(),
            -1.0
        );
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        assert_eq!(u8::decode(&[7, 8, 9]).unwrap(), 7);
    }

    #[test]
    fn reject_short_buffer() {
        let result = u64::decode(&[1, 2, 3]);
        assert!(matches!(
            result,
            Err(WireError::ShortBuffer {
                expected: 8,
                found: 3
            })
        ));
    }

    #[test]
    fn value_decode_dispatches_on_kind() {
        let bytes = 0xBEEF_u16.to_le_bytes();
        let value = Value::decode(PrimitiveKind::U16, &bytes).unwrap();
        assert_eq!(value, Value::U16(0xBEEF));
        assert_eq!(value.kind(), PrimitiveKind::U16);
        assert_eq!(value.to_string(), "48879");
    }

    #[test]
    fn parse_kind_names() {
        assert_eq!("u32".parse::<PrimitiveKind>().unwrap(), PrimitiveKind::U32);
        assert_eq!(" F64 ".parse::<PrimitiveKind>().unwrap(), PrimitiveKind::F64);
        for kind in PrimitiveKind::ALL {
            assert_eq!(kind.name().parse::<PrimitiveKind>().unwrap(), kind);
        }
    }

    #[test]
    fn reject_unknown_kind_name() {
        let result = "u128".parse::<PrimitiveKind>();
        assert!(matches!(result, Err(WireError::UnknownKind { name }) if name == "u128"));
    }
}
