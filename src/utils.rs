//! # Checksum and Timestamp Utilities
//!
//! This module provides the CRC-CCITT (XMODEM) checksum engine shared by every
//! IEEE C37.118.2 frame type, the two-step finalize pass that patches the frame
//! size and checksum trailer into an encoded buffer, and helpers for converting
//! between wall-clock time and the SOC/FRACSEC timestamp fields.
//!
//! ## Key Components
//!
//! - `crc16`: Table-driven CRC16 over a byte slice with a caller-supplied seed.
//! - `calculate_crc`: The protocol convention, `crc16` seeded with `0xFFFF`.
//! - `validate_checksum`: Compares a frame's trailing checksum with a recomputed one.
//! - `finalize_frame`: Patches the FRAMESIZE field and checksum trailer in place.
//! - `now_to_soc_fracsec` / `timestamp_nanos`: SOC/FRACSEC timestamp conversions.
//!
//! ## Usage
//!
//! Frame encoders serialize their body with placeholder size and checksum bytes,
//! then call `finalize_frame` once. Frame decoders call `validate_checksum` before
//! interpreting any body bytes.

use crate::common::FrameError;
use std::time::SystemTime;

/// Lookup table for the CRC-CCITT (XMODEM) polynomial 0x1021, one entry per byte value.
pub const CRC16_TABLE: [u16; 256] = build_crc16_table();

const fn build_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Calculates the CRC-CCITT (XModem) variant of CRC16 over a byte slice.
///
/// # Parameters
///
/// * `data`: The bytes to checksum.
/// * `seed`: Initial CRC register value.
///
/// # Returns
///
/// The 16-bit CRC value.
pub fn crc16(data: &[u8], seed: u16) -> u16 {
    let mut crc = seed;
    for &byte in data {
        crc = (crc << 8) ^ CRC16_TABLE[((crc >> 8) ^ byte as u16) as usize];
    }
    crc
}

/// Calculates the frame checksum as required by IEEE C37.118.2: CRC16-XMODEM
/// seeded with `0xFFFF` over every frame byte except the two-byte trailer.
///
/// # Parameters
///
/// * `data`: The frame bytes, excluding the trailing checksum field.
///
/// # Returns
///
/// The 16-bit checksum to place in the frame trailer.
pub fn calculate_crc(data: &[u8]) -> u16 {
    crc16(data, 0xFFFF)
}

/// Validates the checksum of a complete frame buffer.
///
/// # Parameters
///
/// * `buffer`: The full frame, where the last two bytes are the expected CRC.
///
/// # Returns
///
/// * `Ok(())`: The recomputed checksum matches the trailer.
/// * `Err(FrameError)`: The buffer is too short or the checksum does not match.
pub fn validate_checksum(buffer: &[u8]) -> Result<(), FrameError> {
    if buffer.len() < 2 {
        return Err(FrameError::TruncatedInput {
            needed: 2,
            available: buffer.len(),
        });
    }

    let expected = u16::from_be_bytes([buffer[buffer.len() - 2], buffer[buffer.len() - 1]]);
    let computed = calculate_crc(&buffer[..buffer.len() - 2]);

    if expected != computed {
        return Err(FrameError::ChecksumMismatch { expected, computed });
    }

    Ok(())
}

/// Finalizes an encoded frame in place by patching the FRAMESIZE field and the
/// checksum trailer.
///
/// The size is written first so that the checksum covers the final length value.
/// The buffer must hold a complete frame: a 14-byte prefix, the body, and two
/// trailer bytes reserved for the checksum.
///
/// # Parameters
///
/// * `frame`: The full encoded frame with placeholder size and checksum bytes.
pub fn finalize_frame(frame: &mut [u8]) {
    let total = frame.len();
    frame[2..4].copy_from_slice(&(total as u16).to_be_bytes());

    let crc = calculate_crc(&frame[..total - 2]);
    frame[total - 2..].copy_from_slice(&crc.to_be_bytes());
}

/// Converts the current system time into SOC and FRACSEC field values.
///
/// # Parameters
///
/// * `time_base`: FRACSEC resolution in ticks per second, from the configuration frame.
///
/// # Returns
///
/// A `(soc, fraction)` pair where `fraction` counts `time_base` ticks into the
/// current second, masked to the 24 bits available on the wire.
pub fn now_to_soc_fracsec(time_base: u32) -> (u32, u32) {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();

    let soc = now.as_secs() as u32;
    let ticks = now.subsec_nanos() as u64 * time_base as u64 / 1_000_000_000;

    (soc, ticks as u32 & 0x00FF_FFFF)
}

/// Converts SOC and FRACSEC field values into nanoseconds since the Unix epoch.
///
/// # Parameters
///
/// * `soc`: Second-of-century field value.
/// * `fraction`: 24-bit fraction-of-second field value.
/// * `time_base`: FRACSEC resolution in ticks per second.
///
/// # Returns
///
/// The timestamp in nanoseconds. A zero `time_base` yields whole-second resolution.
pub fn timestamp_nanos(soc: u32, fraction: u32, time_base: u32) -> i64 {
    let mut nanos = soc as i64 * 1_000_000_000;
    if time_base > 0 {
        nanos += fraction as i64 * 1_000_000_000 / time_base as i64;
    }
    nanos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn test_crc16_known_vectors() {
        // Standard CCITT/XMODEM check value
        assert_eq!(crc16(b"123456789", 0), 0x31C3);
        // Same input with the protocol seed
        assert_eq!(crc16(b"123456789", 0xFFFF), 0x29B1);
    }

    #[test]
    fn test_crc16_table_entries() {
        assert_eq!(CRC16_TABLE[0], 0x0000);
        assert_eq!(CRC16_TABLE[1], 0x1021);
        assert_eq!(CRC16_TABLE[255], 0x1EF0);
    }

    #[test]
    fn test_calculate_crc_uses_protocol_seed() {
        let data = [0xAA, 0x01, 0x00, 0x12, 0x1E, 0x36];
        assert_eq!(calculate_crc(&data), crc16(&data, 0xFFFF));
    }

    #[test]
    fn test_validate_checksum() {
        let mut frame = b"123456789".to_vec();
        frame.extend_from_slice(&0x29B1u16.to_be_bytes());
        assert!(validate_checksum(&frame).is_ok());

        // Flip one payload bit and the trailer no longer matches
        frame[3] ^= 0x01;
        let err = validate_checksum(&frame).unwrap_err();
        assert!(matches!(err, FrameError::ChecksumMismatch { expected, .. } if expected == 0x29B1));

        assert!(matches!(
            validate_checksum(&[0xAA]),
            Err(FrameError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_finalize_frame_patches_size_then_checksum() {
        let mut frame = vec![0u8; 20];
        frame[0] = 0xAA;
        frame[1] = 0x41;
        finalize_frame(&mut frame);

        assert_eq!(u16::from_be_bytes([frame[2], frame[3]]), 20);
        assert!(validate_checksum(&frame).is_ok());

        // The checksum must cover the patched size field
        let mut altered = frame.clone();
        altered[2] ^= 0x80;
        assert!(validate_checksum(&altered).is_err());
    }

    #[test]
    fn test_timestamp_nanos_sample_frame() {
        // SOC/FRACSEC taken from the IEEE C37.118.2 sample data frame with the
        // standard 1 MHz time base
        let nanos = timestamp_nanos(1_149_580_800, 16_817, 1_000_000);
        assert_eq!(nanos, 1_149_580_800_000_000_000 + 16_817_000);
    }

    #[test]
    fn test_timestamp_nanos_zero_time_base() {
        assert_eq!(timestamp_nanos(100, 999, 0), 100_000_000_000);
    }

    #[test]
    fn test_now_to_soc_fracsec() {
        let time_base = 1_000_000;
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as u32;
        let (soc, fraction) = now_to_soc_fracsec(time_base);
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as u32;

        assert!(soc >= before && soc <= after);
        assert!(fraction < time_base);
    }
}
