use bitstream::{BitReader, ByteOrder, PacketBuilder, Transform};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bit(bool),
    Bits { bits: u8, value: u32 },
    Align,
    U8(u8, Transform),
    U16(u16, ByteOrder, Transform),
    U32(u32, ByteOrder, Transform),
    Str(String),
}

fn mask_value(bits: u8, value: u32) -> u32 {
    if bits >= 32 {
        value
    } else {
        let mask = (1u32 << bits) - 1;
        value & mask
    }
}

fn transform_strategy() -> impl Strategy<Value = Transform> {
    prop_oneof![
        Just(Transform::None),
        Just(Transform::Add),
        Just(Transform::Negate),
        Just(Transform::Subtract),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Bit),
        (1u8..=32, any::<u32>()).prop_map(|(bits, value)| Op::Bits {
            bits,
            value: mask_value(bits, value),
        }),
        Just(Op::Align),
        (any::<u8>(), transform_strategy()).prop_map(|(v, t)| Op::U8(v, t)),
        (
            any::<u16>(),
            prop_oneof![Just(ByteOrder::Big), Just(ByteOrder::Little)],
            transform_strategy()
        )
            .prop_map(|(v, o, t)| Op::U16(v, o, t)),
        (
            any::<u32>(),
            prop_oneof![Just(ByteOrder::Big), Just(ByteOrder::Little)],
            transform_strategy()
        )
            .prop_map(|(v, o, t)| Op::U32(v, o, t)),
        (
            any::<u32>(),
            prop_oneof![Just(ByteOrder::Middle), Just(ByteOrder::InverseMiddle)]
        )
            .prop_map(|(v, o)| Op::U32(v, o, Transform::None)),
        prop::collection::vec(prop_oneof![0u8..10, 11u8..=255], 0..24)
            .prop_map(|bytes| Op::Str(bytes.into_iter().map(char::from).collect())),
    ]
}

fn is_bit_op(op: &Op) -> bool {
    matches!(op, Op::Bit(_) | Op::Bits { .. })
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut builder = PacketBuilder::new();

        for op in &ops {
            if is_bit_op(op) {
                builder.switch_to_bit_access();
            } else {
                builder.switch_to_byte_access();
            }
            match op {
                Op::Bit(b) => builder.write_bit(*b).unwrap(),
                Op::Bits { bits, value } => builder.write_bits(*value, *bits).unwrap(),
                Op::Align => {}
                Op::U8(v, t) => builder.write_u8(*v, *t).unwrap(),
                Op::U16(v, o, t) => builder.write_u16(*v, *o, *t).unwrap(),
                Op::U32(v, o, t) => builder.write_u32(*v, *o, *t).unwrap(),
                Op::Str(s) => builder.write_str(s).unwrap(),
            }
        }

        let bytes = builder.finish();
        let mut reader = BitReader::new(&bytes);

        for op in &ops {
            if !is_bit_op(op) {
                reader.align_to_byte().unwrap();
            }
            match op {
                Op::Bit(b) => {
                    prop_assert_eq!(reader.read_bit().unwrap(), *b);
                }
                Op::Bits { bits, value } => {
                    prop_assert_eq!(reader.read_bits(*bits).unwrap(), *value);
                }
                Op::Align => {}
                Op::U8(v, t) => {
                    prop_assert_eq!(reader.read_u8(*t).unwrap(), *v);
                }
                Op::U16(v, o, t) => {
                    prop_assert_eq!(reader.read_u16(*o, *t).unwrap(), *v);
                }
                Op::U32(v, o, t) => {
                    prop_assert_eq!(reader.read_u32(*o, *t).unwrap(), *v);
                }
                Op::Str(s) => {
                    prop_assert_eq!(&reader.read_str().unwrap(), s);
                }
            }
        }
    }
}
