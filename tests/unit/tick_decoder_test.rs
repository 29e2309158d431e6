//! Unit tests for flywheel tick decoding.

use monark_processing::flywheel::tick::{decode_tick, split_ticks};
use monark_processing::DecodeError;

/// Deterministic pseudo-random u32 sequence.
fn lcg_values(count: usize) -> Vec<u32> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 32) as u32
        })
        .collect()
}

#[test]
fn test_decode_known_vectors() {
    assert_eq!(decode_tick("01000000").unwrap(), 1);
    assert_eq!(decode_tick("FFFFFFFF").unwrap(), 4_294_967_295);
    assert_eq!(decode_tick("00000000").unwrap(), 0);
    assert_eq!(decode_tick("00000080").unwrap(), 0x8000_0000);
}

#[test]
fn test_reversed_byte_encoding_decodes_to_value() {
    let mut values = lcg_values(2000);
    values.extend([0, 1, 255, 256, 65_535, 65_536, u32::MAX - 1, u32::MAX]);

    for value in values {
        let chunk: String = value
            .to_be_bytes()
            .iter()
            .rev()
            .map(|b| format!("{:02x}", b))
            .collect();

        assert_eq!(decode_tick(&chunk).unwrap(), value, "chunk {}", chunk);
        assert_eq!(decode_tick(&chunk.to_uppercase()).unwrap(), value);
    }
}

#[test]
fn test_decode_is_deterministic() {
    for value in lcg_values(100) {
        let chunk = format!("{:08X}", value.swap_bytes());
        assert_eq!(decode_tick(&chunk), decode_tick(&chunk));
    }
}

#[test]
fn test_decode_rejects_invalid_chunks() {
    assert_eq!(
        decode_tick(""),
        Err(DecodeError::InvalidLength { len: 0 })
    );
    assert_eq!(
        decode_tick("0100000"),
        Err(DecodeError::InvalidLength { len: 7 })
    );
    assert!(matches!(
        decode_tick("01 00000"),
        Err(DecodeError::InvalidDigit { .. })
    ));
    assert!(matches!(
        decode_tick("-1000000"),
        Err(DecodeError::InvalidDigit { .. })
    ));
}

#[test]
fn test_split_ticks_partitions_in_order() {
    let log = "0100000002000000030000000400000005";
    let chunks = split_ticks(log);

    assert_eq!(chunks.len(), 4);
    assert_eq!(chunks[3], "04000000");
    let decoded: Vec<u32> = chunks.iter().map(|c| decode_tick(c).unwrap()).collect();
    assert_eq!(decoded, vec![1, 2, 3, 4]);
}
