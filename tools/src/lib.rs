//! Introspection and debugging tools for npcsync payloads.
//!
//! This crate provides utilities for producing and understanding NPC
//! synchronization packets:
//!
//! - Encode a JSON event description into payload or frame bytes
//! - Decode payloads or frames into structured JSON or readable text
//! - Explain payload size by region and block kind
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use codec::{
    decode_npc_synchronization, encode_npc_synchronization, encode_npc_synchronization_packet,
    BlockKind, CodecLimits, DecodedSegment, DecodedSync, NpcSynchronizationEvent, Step,
    WireLimits, NPC_SYNCHRONIZATION_OPCODE, NPC_SYNCHRONIZATION_PACKET_TYPE,
};
use serde::Serialize;

/// Whether bytes carry the outer frame or are a bare payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    #[default]
    Payload,
    Frame,
}

/// Parses a JSON event description and encodes it.
pub fn encode_event_json(json: &str, framing: Framing) -> Result<Vec<u8>> {
    let event: NpcSynchronizationEvent =
        serde_json::from_str(json).context("parse event json")?;
    match framing {
        Framing::Payload => encode_npc_synchronization(&event).context("encode payload"),
        Framing::Frame => {
            let packet = encode_npc_synchronization_packet(&event).context("encode packet")?;
            wire::encode_frame(&packet).context("frame packet")
        }
    }
}

/// Strips the outer frame when present, checking the opcode.
pub fn payload_of<'a>(bytes: &'a [u8], framing: Framing, limits: &WireLimits) -> Result<&'a [u8]> {
    match framing {
        Framing::Payload => Ok(bytes),
        Framing::Frame => {
            let frame = wire::decode_frame(bytes, NPC_SYNCHRONIZATION_PACKET_TYPE, limits)
                .context("decode frame")?;
            if frame.opcode != NPC_SYNCHRONIZATION_OPCODE {
                bail!(
                    "unexpected opcode {} (expected {NPC_SYNCHRONIZATION_OPCODE})",
                    frame.opcode
                );
            }
            Ok(frame.payload)
        }
    }
}

/// Decodes a payload or frame.
pub fn decode_bytes(
    bytes: &[u8],
    framing: Framing,
    wire_limits: &WireLimits,
    codec_limits: &CodecLimits,
) -> Result<DecodedSync> {
    let payload = payload_of(bytes, framing, wire_limits)?;
    decode_npc_synchronization(payload, codec_limits).context("decode payload")
}

/// Size and content breakdown of one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub frame_bytes: Option<usize>,
    pub payload_bytes: usize,
    pub bit_region_bytes: usize,
    pub block_region_bytes: usize,
    pub local_count: u8,
    pub removed: usize,
    pub idle: usize,
    pub walking: usize,
    pub running: usize,
    pub added: usize,
    pub updated: usize,
    pub block_kinds: BTreeMap<BlockKind, usize>,
}

/// Decodes `bytes` and summarizes where its bytes go.
pub fn inspect_bytes(
    bytes: &[u8],
    framing: Framing,
    wire_limits: &WireLimits,
    codec_limits: &CodecLimits,
) -> Result<InspectReport> {
    let payload = payload_of(bytes, framing, wire_limits)?;
    let decoded = decode_npc_synchronization(payload, codec_limits).context("decode payload")?;

    let mut report = InspectReport {
        frame_bytes: (framing == Framing::Frame).then_some(bytes.len()),
        payload_bytes: payload.len(),
        bit_region_bytes: 0,
        block_region_bytes: 0,
        local_count: decoded.local_count,
        removed: 0,
        idle: 0,
        walking: 0,
        running: 0,
        added: 0,
        updated: 0,
        block_kinds: BTreeMap::new(),
    };

    for segment in &decoded.segments {
        match segment {
            DecodedSegment::Remove => report.removed += 1,
            DecodedSegment::Add { .. } => report.added += 1,
            DecodedSegment::Movement { step, .. } => match step {
                Step::None => report.idle += 1,
                Step::Walk(_) => report.walking += 1,
                Step::Run(_) => report.running += 1,
            },
        }
        if let Some(blocks) = segment.blocks().filter(|blocks| !blocks.is_empty()) {
            report.updated += 1;
            report.block_region_bytes += blocks.encoded_len();
            for block in blocks.iter() {
                *report.block_kinds.entry(block.kind()).or_default() += 1;
            }
        }
    }
    report.bit_region_bytes = report.payload_bytes - report.block_region_bytes;
    Ok(report)
}

/// Renders a report as indented text.
pub fn format_inspect_report(report: &InspectReport) -> String {
    let mut out = String::new();
    if let Some(frame) = report.frame_bytes {
        let _ = writeln!(out, "frame: {frame} bytes (opcode {NPC_SYNCHRONIZATION_OPCODE})");
    }
    let _ = writeln!(
        out,
        "payload: {} bytes (bit region {}, block region {})",
        report.payload_bytes, report.bit_region_bytes, report.block_region_bytes
    );
    let _ = writeln!(out, "local count: {}", report.local_count);
    let _ = writeln!(
        out,
        "segments: {} removed, {} idle, {} walking, {} running, {} added",
        report.removed, report.idle, report.walking, report.running, report.added
    );
    let _ = writeln!(out, "updated: {}", report.updated);
    if !report.block_kinds.is_empty() {
        let _ = writeln!(out, "blocks:");
        for (kind, count) in &report.block_kinds {
            let _ = writeln!(out, "  {kind:?}: {count}");
        }
    }
    out
}

/// Renders a decoded payload one segment per line.
pub fn format_decode_pretty(decoded: &DecodedSync) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "local count: {}", decoded.local_count);
    for (idx, segment) in decoded.segments.iter().enumerate() {
        let line = match segment {
            DecodedSegment::Remove => "remove".to_string(),
            DecodedSegment::Movement { step, .. } => match step {
                Step::None => "idle".to_string(),
                Step::Walk(direction) => format!("walk {direction:?}"),
                Step::Run([first, second]) => format!("run {first:?} {second:?}"),
            },
            DecodedSegment::Add {
                index,
                npc_id,
                dx,
                dy,
                ..
            } => format!("add index={} npc_id={npc_id} dx={dx} dy={dy}", index.raw()),
        };
        let _ = writeln!(out, "[{idx}] {line}");
        if let Some(blocks) = segment.blocks() {
            for block in blocks.iter() {
                let _ = writeln!(out, "      {block:?}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &str = r#"{
        "reference_position": { "x": 3222, "y": 3218 },
        "local_count": 2,
        "segments": [
            { "type": "remove" },
            {
                "type": "movement",
                "step": { "walk": "north" },
                "blocks": [
                    { "kind": "animation", "id": 1, "delay": 0 },
                    { "kind": "force_chat", "message": "Hi" }
                ]
            },
            {
                "type": "add",
                "index": 4,
                "npc_id": 1,
                "position": { "x": 3220, "y": 3220 }
            }
        ]
    }"#;

    #[test]
    fn encode_and_decode_json_event() {
        let payload = encode_event_json(EVENT, Framing::Payload).unwrap();
        let decoded = decode_bytes(
            &payload,
            Framing::Payload,
            &WireLimits::default(),
            &CodecLimits::default(),
        )
        .unwrap();
        assert_eq!(decoded.local_count, 2);
        assert_eq!(decoded.segments.len(), 3);
        assert_eq!(decoded.segments[0], DecodedSegment::Remove);
        assert!(matches!(
            decoded.segments[2],
            DecodedSegment::Add { dx: -2, dy: 2, .. }
        ));
    }

    #[test]
    fn frame_roundtrip_and_opcode_check() {
        let frame = encode_event_json(EVENT, Framing::Frame).unwrap();
        assert_eq!(frame[0], NPC_SYNCHRONIZATION_OPCODE);
        let decoded = decode_bytes(
            &frame,
            Framing::Frame,
            &WireLimits::default(),
            &CodecLimits::default(),
        );
        assert!(decoded.is_ok());

        let mut wrong = frame;
        wrong[0] = 1;
        let err = payload_of(&wrong, Framing::Frame, &WireLimits::default()).unwrap_err();
        assert!(err.to_string().contains("unexpected opcode"));
    }

    #[test]
    fn inspect_splits_regions() {
        let payload = encode_event_json(EVENT, Framing::Payload).unwrap();
        let report = inspect_bytes(
            &payload,
            Framing::Payload,
            &WireLimits::default(),
            &CodecLimits::default(),
        )
        .unwrap();
        // mask + animation (3) + "Hi\n" (3)
        assert_eq!(report.block_region_bytes, 7);
        assert_eq!(report.bit_region_bytes + 7, payload.len());
        assert_eq!(report.removed, 1);
        assert_eq!(report.walking, 1);
        assert_eq!(report.added, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(report.block_kinds.get(&BlockKind::ForceChat), Some(&1));

        let text = format_inspect_report(&report);
        assert!(text.contains("1 removed"));
        assert!(text.contains("ForceChat: 1"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["block_kinds"]["ForceChat"], 1);
        assert_eq!(json["frame_bytes"], serde_json::Value::Null);
    }

    #[test]
    fn pretty_lists_every_segment() {
        let payload = encode_event_json(EVENT, Framing::Payload).unwrap();
        let decoded = decode_npc_synchronization(&payload, &CodecLimits::default()).unwrap();
        let text = format_decode_pretty(&decoded);
        assert!(text.contains("[0] remove"));
        assert!(text.contains("[1] walk North"));
        assert!(text.contains("[2] add index=4 npc_id=1 dx=-2 dy=2"));
    }

    #[test]
    fn rejects_bad_json() {
        let err = encode_event_json("{}", Framing::Payload).unwrap_err();
        assert!(err.to_string().contains("parse event json"));
    }

    #[test]
    fn hex_rendering() {
        assert_eq!(hex::encode([0x00, 0xAB, 0x10]), "00ab10");
        let payload = encode_event_json(EVENT, Framing::Payload).unwrap();
        assert_eq!(hex::decode(hex::encode(&payload)).unwrap(), payload);
    }
}
