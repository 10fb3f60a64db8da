use std::future::Future;

use abp_wire::{PrimitiveKind, Value};

use crate::config::ReadOptions;
use crate::error::ReadError;
use crate::source::ByteSource;
use crate::{accumulator, decode};

/// Method-call sugar over the free functions of this crate.
///
/// Implemented for every [`ByteSource`], so `source.read_u32(&opts).await`
/// is the same call as `read_u32(&mut source, &opts).await`.
///
/// ```rust,no_run
/// use abp_reader::{AsyncReadSource, ReadBinaryExt, ReadOptions};
///
/// # async fn demo() -> Result<(), abp_reader::ReadError> {
/// let file = tokio::fs::File::open("samples.bin").await?;
/// let mut source = AsyncReadSource::new(file);
/// let opts = ReadOptions::default();
/// let count = source.read_u32(&opts).await?;
/// let scale = source.read_f64(&opts).await?;
/// # let _ = (count, scale);
/// # Ok(())
/// # }
/// ```
pub trait ReadBinaryExt: ByteSource + Unpin {
  /// See [`read_bytes`](crate::read_bytes).
  fn read_bytes(&mut self, count: usize) -> impl Future<Output = Result<Vec<u8>, ReadError>> {
    accumulator::read_bytes(self, count)
  }

  /// See [`read_exact`](crate::read_exact).
  fn read_exact_with<'a>(
    &'a mut self,
    count: usize,
    options: &'a ReadOptions,
  ) -> impl Future<Output = Result<Vec<u8>, ReadError>> + 'a {
    accumulator::read_exact(self, count, options)
  }

  /// See [`read_value`](crate::read_value).
  fn read_value<'a>(
    &'a mut self,
    kind: PrimitiveKind,
    options: &'a ReadOptions,
  ) -> impl Future<Output = Result<Value, ReadError>> + 'a {
    decode::read_value(self, kind, options)
  }

  fn read_i8<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<i8, ReadError>> + 'a {
    decode::read_i8(self, options)
  }

  fn read_u8<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<u8, ReadError>> + 'a {
    decode::read_u8(self, options)
  }

  fn read_i16<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<i16, ReadError>> + 'a {
    decode::read_i16(self, options)
  }

  fn read_u16<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<u16, ReadError>> + 'a {
    decode::read_u16(self, options)
  }

  fn read_i32<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<i32, ReadError>> + 'a {
    decode::read_i32(self, options)
  }

  fn read_u32<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<u32, ReadError>> + 'a {
    decode::read_u32(self, options)
  }

  fn read_i64<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<i64, ReadError>> + 'a {
    decode::read_i64(self, options)
  }

  fn read_u64<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<u64, ReadError>> + 'a {
    decode::read_u64(self, options)
  }

  fn read_f32<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<f32, ReadError>> + 'a {
    decode::read_f32(self, options)
  }

  fn read_f64<'a>(&'a mut self, options: &'a ReadOptions) -> impl Future<Output = Result<f64, ReadError>> + 'a {
    decode::read_f64(self, options)
  }
}

impl<S: ByteSource + Unpin + ?Sized> ReadBinaryExt for S {}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::AsyncReadSource;

  #[tokio::test]
  async fn method_calls_chain_over_one_source() {
    let mut data = 258u16.to_le_bytes().to_vec();
    data.extend_from_slice(&(-1i32).to_le_bytes());
    data.extend_from_slice(b"tail");

    let opts = ReadOptions::default();
    let mut source = AsyncReadSource::new(&data[..]);
    assert_eq!(source.read_u16(&opts).await.unwrap(), 258);
    assert_eq!(source.read_i32(&opts).await.unwrap(), -1);
    assert_eq!(source.read_bytes(4).await.unwrap(), b"tail");
  }

  #[tokio::test]
  async fn options_and_dynamic_kinds_through_methods() {
    let mut data = b"hdr".to_vec();
    data.extend_from_slice(&(-7i64).to_le_bytes());
    data.extend_from_slice(&2.5f32.to_le_bytes());

    let opts = ReadOptions::default().with_max_len(8);
    let mut source = AsyncReadSource::new(&data[..]);
    assert_eq!(source.read_exact_with(3, &opts).await.unwrap(), b"hdr");
    assert_eq!(
      source.read_value(PrimitiveKind::I64, &opts).await.unwrap(),
      Value::I64(-7)
    );
    assert_eq!(
      source.read_value(PrimitiveKind::F32, &opts).await.unwrap(),
      Value::F32(2.5)
    );
    assert!(matches!(
      source.read_exact_with(9, &opts).await,
      Err(ReadError::OutOfRange { requested: 9, limit: 8 })
    ));
  }
}
