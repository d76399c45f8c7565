use proptest::prelude::*;
use wire::{decode_frame, encode_frame, GamePacket, Limits, PacketType};

fn packet_type_strategy() -> impl Strategy<Value = PacketType> {
    prop_oneof![
        Just(PacketType::Fixed),
        Just(PacketType::VariableByte),
        Just(PacketType::VariableShort),
    ]
}

proptest! {
    #[test]
    fn prop_frame_roundtrip(
        opcode in any::<u8>(),
        packet_type in packet_type_strategy(),
        payload in prop::collection::vec(any::<u8>(), 0..255),
    ) {
        let packet = GamePacket::new(opcode, packet_type, payload.clone());
        let frame = encode_frame(&packet).unwrap();
        prop_assert_eq!(frame.len(), 1 + packet_type.prefix_len() + payload.len());

        let decoded = decode_frame(&frame, packet_type, &Limits::default()).unwrap();
        prop_assert_eq!(decoded.opcode, opcode);
        prop_assert_eq!(decoded.payload, payload.as_slice());
    }
}
