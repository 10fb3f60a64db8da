/// Implementation of `abp kinds`.
///
/// ```text
/// byte order: little-endian
/// i8    1
/// u8    1
/// i16   2
/// ...
/// ```
use abp_wire::{BYTE_ORDER, PrimitiveKind};

pub fn run() {
    println!("byte order: {BYTE_ORDER}");
    for kind in PrimitiveKind::ALL {
        println!("{:<5} {}", kind.name(), kind.width());
    }
}
