#![no_main]

use bitstream::{BitReader, ByteOrder, Transform};
use libfuzzer_sys::fuzz_target;

const ORDERS: [ByteOrder; 4] = [
    ByteOrder::Big,
    ByteOrder::Little,
    ByteOrder::Middle,
    ByteOrder::InverseMiddle,
];

const TRANSFORMS: [Transform; 4] = [
    Transform::None,
    Transform::Add,
    Transform::Negate,
    Transform::Subtract,
];

fuzz_target!(|data: &[u8]| {
    let mut reader = BitReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let selector = data[idx];
        idx += 1;
        let order = ORDERS[usize::from(selector >> 3) % ORDERS.len()];
        let transform = TRANSFORMS[usize::from(selector >> 5) % TRANSFORMS.len()];

        match selector % 8 {
            0 => {
                let _ = reader.read_bit();
            }
            1 => {
                let bits = (selector % 40).saturating_add(1);
                let _ = reader.read_bits(bits);
            }
            2 => {
                let _ = reader.align_to_byte();
            }
            3 => {
                let _ = reader.read_u8(transform);
            }
            4 => {
                let _ = reader.read_u16(order, transform);
            }
            5 => {
                let _ = reader.read_u32(order, transform);
            }
            6 => {
                let _ = reader.read_str();
            }
            _ => {
                let _ = reader.remaining_bytes();
            }
        }
    }
});
