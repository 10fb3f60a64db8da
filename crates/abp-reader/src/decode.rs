//! Typed decoders over [`read_exact`].
//!
//! Each decoder requests exactly the width of its type from the
//! accumulator and reinterprets the bytes in [`abp_wire::BYTE_ORDER`]
//! (little-endian). Accumulator errors pass through unchanged.

use abp_wire::{Primitive, PrimitiveKind, Value};

use crate::accumulator::read_exact;
use crate::config::ReadOptions;
use crate::error::ReadError;
use crate::source::ByteSource;

/// Read one `T` from `stream`.
///
/// # Errors
///
/// Any error of [`read_exact`] for a request of `T::WIDTH` bytes.
pub async fn read_primitive<T, S>(stream: &mut S, options: &ReadOptions) -> Result<T, ReadError>
where
  T: Primitive,
  S: ByteSource + Unpin + ?Sized,
{
  let bytes = read_exact(stream, T::WIDTH, options).await?;
  Ok(T::decode(&bytes)?)
}

/// Read one value whose kind is only known at runtime.
///
/// # Errors
///
/// Any error of [`read_exact`] for a request of `kind.width()` bytes.
pub async fn read_value<S>(
  stream: &mut S,
  kind: PrimitiveKind,
  options: &ReadOptions,
) -> Result<Value, ReadError>
where
  S: ByteSource + Unpin + ?Sized,
{
  let bytes = read_exact(stream, kind.width(), options).await?;
  Ok(Value::decode(kind, &bytes)?)
}

macro_rules! decoders {
  ($($name:ident => $ty:ty),* $(,)?) => {$(
    #[doc = concat!("Read one `", stringify!($ty), "` from `stream`.")]
    ///
    /// # Errors
    ///
    /// Any error of [`read_exact`] for this width.
    pub async fn $name<S>(stream: &mut S, options: &ReadOptions) -> Result<$ty, ReadError>
    where
      S: ByteSource + Unpin + ?Sized,
    {
      read_primitive::<$ty, S>(stream, options).await
    }
  )*};
}

decoders! {
  read_i8 => i8,
  read_u8 => u8,
  read_i16 => i16,
  read_u16 => u16,
  read_i32 => i32,
  read_u32 => u32,
  read_i64 => i64,
  read_u64 => u64,
  read_f32 => f32,
  read_f64 => f64,
}
