#![warn(clippy::pedantic)]

pub mod byte_order;
pub mod error;
pub mod primitive;

pub use byte_order::{BYTE_ORDER, ByteOrder};
pub use error::WireError;
pub use primitive::{Primitive, PrimitiveKind, Value};
