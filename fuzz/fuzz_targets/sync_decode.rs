#![no_main]

use codec::{
    decode_npc_synchronization, encode_npc_synchronization, CodecLimits, PacketType, Position,
    WireLimits,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = CodecLimits::for_testing();

    if let Ok(decoded) = decode_npc_synchronization(data, &limits) {
        let event = decoded.resolve(Position::new(3200, 3200));
        let payload = encode_npc_synchronization(&event).expect("decoded events re-encode");
        let again = decode_npc_synchronization(&payload, &limits);
        assert_eq!(again.as_ref().ok(), Some(&decoded));
    }

    if let Ok(frame) = wire::decode_frame(data, PacketType::VariableShort, &WireLimits::for_testing()) {
        let _ = decode_npc_synchronization(frame.payload, &limits);
    }
});
