#![warn(clippy::pedantic)]

//! Asynchronous exact-length reads and fixed-width primitive decoding.
//!
//! [`read_exact`] accumulates partial reads from a [`ByteSource`] until
//! the requested number of bytes is held; the typed decoders in
//! [`decode`] sit on top of it and interpret the bytes in
//! [`abp_wire::BYTE_ORDER`].

pub mod accumulator;
pub mod config;
pub mod decode;
pub mod error;
pub mod ext;
pub mod source;

pub use abp_wire::{BYTE_ORDER, ByteOrder, Primitive, PrimitiveKind, Value};
pub use accumulator::{read_bytes, read_exact};
pub use config::ReadOptions;
pub use decode::{
  read_f32, read_f64, read_i8, read_i16, read_i32, read_i64, read_primitive, read_u8, read_u16,
  read_u32, read_u64, read_value,
};
pub use error::ReadError;
pub use ext::ReadBinaryExt;
pub use source::{AsyncReadSource, ByteSource, SourceState};
pub use tokio_util::sync::CancellationToken;
