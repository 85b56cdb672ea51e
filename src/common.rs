//! # Shared Frame Types
//!
//! This module defines the types shared by every IEEE C37.118.2-2011 frame: the
//! decode error enumeration, the SYNC word, the FRACSEC timestamp word, the
//! 14-byte frame prefix, and the per-PMU STAT word carried in data frames.
//!
//! ## Key Components
//!
//! - `FrameError`: Typed decode failures returned by every frame codec.
//! - `FrameType`: The 3-bit frame type carried in the SYNC word.
//! - `SyncWord`: Decoded first two bytes of every frame.
//! - `FracSec`: Leap-second flags, clock quality, and fraction-of-second count.
//! - `FrameHeader`: The common 14-byte prefix shared by all frame types.
//! - `StatWord`: The bit-packed per-PMU status word from data frames.
//!
//! ## Usage
//!
//! Frame codecs parse the prefix through `FrameHeader::from_hex` and re-emit it
//! through `FrameHeader::to_hex`, leaving the FRAMESIZE field zeroed for the
//! finalize pass. Enumerated bit-fields decode to their raw values; the label
//! methods map them to human-readable descriptions for diagnostics only.

use crate::utils::{timestamp_nanos, validate_checksum};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Leading byte of every frame.
pub const SYNC_BYTE: u8 = 0xAA;

/// Byte length of the common frame prefix.
pub const PREFIX_SIZE: usize = 14;

/// Byte length of the smallest well-formed frame: a prefix plus the checksum trailer.
pub const MIN_FRAME_SIZE: usize = PREFIX_SIZE + 2;

/// Errors returned when decoding IEEE C37.118.2 frames.
///
/// All failures are fatal for the frame being decoded; no partial frame is
/// produced. Reserved bit patterns inside enumerated fields are not errors and
/// decode to their raw values.
///
/// # Variants
///
/// * `InvalidSync`: First byte is not `0xAA` or the frame type code is reserved.
/// * `LengthMismatch`: Declared FRAMESIZE differs from the buffer length.
/// * `ChecksumMismatch`: Recomputed CRC differs from the frame trailer.
/// * `TruncatedInput`: A count field demands more bytes than remain.
/// * `UnsupportedVariant`: Configuration frames 1 and 3 are not implemented.
/// * `UnexpectedFrameType`: A typed decoder was handed a different frame type.
/// * `MissingConfig`: Data frames cannot be decoded without a configuration frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("invalid sync word 0x{sync:04X}")]
    InvalidSync { sync: u16 },
    #[error("declared frame size {declared} does not match buffer length {actual}")]
    LengthMismatch { declared: u16, actual: usize },
    #[error("checksum mismatch: frame carries 0x{expected:04X}, computed 0x{computed:04X}")]
    ChecksumMismatch { expected: u16, computed: u16 },
    #[error("truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },
    #[error("{frame_type} decoding is not implemented")]
    UnsupportedVariant { frame_type: FrameType },
    #[error("expected a {expected}, found a {actual}")]
    UnexpectedFrameType {
        expected: FrameType,
        actual: FrameType,
    },
    #[error("data frame decoding requires a configuration frame")]
    MissingConfig,
}

/// Frame type carried in bits 6-4 of the second SYNC byte.
///
/// Codes 0b110 and 0b111 are reserved by the standard and rejected as
/// `InvalidSync` when decoding a SYNC word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    Data,
    Header,
    Config1,
    Config2,
    Command,
    Config3,
}

impl FrameType {
    /// Maps a 3-bit frame type code to its variant.
    ///
    /// # Parameters
    ///
    /// * `bits`: Frame type code, must already be masked to 3 bits.
    ///
    /// # Returns
    ///
    /// * `Some(FrameType)`: One of the six defined codes.
    /// * `None`: A reserved code (0b110 or 0b111).
    pub fn from_bits(bits: u8) -> Option<FrameType> {
        match bits {
            0b000 => Some(FrameType::Data),
            0b001 => Some(FrameType::Header),
            0b010 => Some(FrameType::Config1),
            0b011 => Some(FrameType::Config2),
            0b100 => Some(FrameType::Command),
            0b101 => Some(FrameType::Config3),
            _ => None,
        }
    }

    /// Returns the 3-bit frame type code for this variant.
    pub fn to_bits(self) -> u8 {
        match self {
            FrameType::Data => 0b000,
            FrameType::Header => 0b001,
            FrameType::Config1 => 0b010,
            FrameType::Config2 => 0b011,
            FrameType::Command => 0b100,
            FrameType::Config3 => 0b101,
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            FrameType::Data => "data frame",
            FrameType::Header => "header frame",
            FrameType::Config1 => "configuration frame 1",
            FrameType::Config2 => "configuration frame 2",
            FrameType::Command => "command frame",
            FrameType::Config3 => "configuration frame 3",
        };
        write!(f, "{}", name)
    }
}

/// Decoded SYNC word, the first two bytes of every frame.
///
/// # Fields
///
/// * `reserved`: Bit 7 of the second byte, transmitted as zero.
/// * `frame_type`: Frame type from bits 6-4 of the second byte.
/// * `version`: Standard version from bits 3-0 (1 = 2005, 2 = 2011).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncWord {
    pub reserved: bool,
    pub frame_type: FrameType,
    pub version: u8,
}

impl SyncWord {
    /// Decodes a raw 16-bit SYNC word.
    ///
    /// # Parameters
    ///
    /// * `raw`: The first two frame bytes as a big-endian integer.
    ///
    /// # Returns
    ///
    /// * `Ok(SyncWord)`: The leading byte is `0xAA` and the type code is defined.
    /// * `Err(FrameError::InvalidSync)`: Otherwise, carrying the raw word.
    pub fn from_raw(raw: u16) -> Result<SyncWord, FrameError> {
        if (raw >> 8) as u8 != SYNC_BYTE {
            return Err(FrameError::InvalidSync { sync: raw });
        }

        let frame_type = FrameType::from_bits(((raw >> 4) & 0b111) as u8)
            .ok_or(FrameError::InvalidSync { sync: raw })?;

        Ok(SyncWord {
            reserved: raw & 0x0080 != 0,
            frame_type,
            version: (raw & 0x000F) as u8,
        })
    }

    /// Encodes the SYNC word as a raw 16-bit value.
    pub fn to_raw(&self) -> u16 {
        // Leading byte is always 0xAA.
        // Second byte:
        // Bit 7: reserved
        // Bits 6-4: 000 data frame
        //           001 header frame
        //           010 configuration frame 1
        //           011 configuration frame 2
        //           100 command frame
        //           101 configuration frame 3
        // Bits 3-0: version number (1 = 2005, 2 = 2011)
        let mut raw = (SYNC_BYTE as u16) << 8;
        if self.reserved {
            raw |= 0x0080;
        }
        raw |= (self.frame_type.to_bits() as u16) << 4;
        raw |= (self.version & 0x0F) as u16;
        raw
    }

    /// Describes the version code for diagnostics.
    pub fn version_label(&self) -> &'static str {
        match self.version {
            1 => "Version 1",
            2 => "Version 2",
            _ => "Reserved",
        }
    }
}

/// Decoded FRACSEC word: leap-second flags, clock quality, and the 24-bit
/// fraction-of-second count.
///
/// The fraction counts ticks of the time base declared in the configuration
/// frame; combined with the SOC field it gives the frame timestamp to
/// sub-second resolution.
///
/// # Fields
///
/// * `reserved`: Bit 31, transmitted as zero.
/// * `leap_second_direction`: Set when the pending leap second is a deletion.
/// * `leap_second_occurred`: Set during the first second after a leap second.
/// * `leap_second_pending`: Set up to 60 s before a leap second.
/// * `time_quality`: 4-bit clock error bound code.
/// * `fraction`: 24-bit fraction-of-second in time base ticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FracSec {
    pub reserved: bool,
    pub leap_second_direction: bool,
    pub leap_second_occurred: bool,
    pub leap_second_pending: bool,
    pub time_quality: u8,
    pub fraction: u32,
}

impl FracSec {
    /// Decodes the four FRACSEC bytes as a big-endian integer.
    ///
    /// Every bit pattern is valid; reserved time quality codes decode to their
    /// raw value.
    pub fn from_raw(raw: u32) -> FracSec {
        FracSec {
            reserved: raw & 0x8000_0000 != 0,
            leap_second_direction: raw & 0x4000_0000 != 0,
            leap_second_occurred: raw & 0x2000_0000 != 0,
            leap_second_pending: raw & 0x1000_0000 != 0,
            time_quality: ((raw >> 24) & 0x0F) as u8,
            fraction: raw & 0x00FF_FFFF,
        }
    }

    /// Encodes the FRACSEC word as a raw 32-bit value.
    pub fn to_raw(&self) -> u32 {
        let mut raw = 0u32;
        if self.reserved {
            raw |= 0x8000_0000;
        }
        if self.leap_second_direction {
            raw |= 0x4000_0000;
        }
        if self.leap_second_occurred {
            raw |= 0x2000_0000;
        }
        if self.leap_second_pending {
            raw |= 0x1000_0000;
        }
        raw |= ((self.time_quality & 0x0F) as u32) << 24;
        raw | (self.fraction & 0x00FF_FFFF)
    }

    /// Describes the clock time quality code for diagnostics.
    pub fn time_quality_label(&self) -> &'static str {
        match self.time_quality {
            0b0000 => "Normal operation, clock locked to UTC traceable source",
            0b0001 => "Time within 10^-9 s of UTC",
            0b0010 => "Time within 10^-8 s of UTC",
            0b0011 => "Time within 10^-7 s of UTC",
            0b0100 => "Time within 10^-6 s of UTC",
            0b0101 => "Time within 10^-5 s of UTC",
            0b0110 => "Time within 10^-4 s of UTC",
            0b0111 => "Time within 10^-3 s of UTC",
            0b1000 => "Time within 10^-2 s of UTC",
            0b1001 => "Time within 10^-1 s of UTC",
            0b1010 => "Time within 1 s of UTC",
            0b1011 => "Time within 10 s of UTC",
            0b1111 => "Fault, clock failure",
            _ => "Reserved",
        }
    }
}

/// The common 14-byte prefix shared by every frame type.
///
/// The FRAMESIZE field at bytes 2-3 is not stored: it always equals the encoded
/// frame length and is written by the finalize pass, so `to_hex` leaves those
/// bytes zeroed.
///
/// # Fields
///
/// * `sync`: Decoded SYNC word.
/// * `idcode`: PMU or data stream identifier.
/// * `soc`: Second-of-century timestamp.
/// * `fracsec`: Fraction-of-second word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameHeader {
    pub sync: SyncWord,
    pub idcode: u16,
    pub soc: u32,
    pub fracsec: FracSec,
}

impl FrameHeader {
    /// Creates a prefix for a version 1 frame of the given type.
    ///
    /// # Parameters
    ///
    /// * `frame_type`: Frame type to place in the SYNC word.
    /// * `idcode`: PMU or data stream identifier.
    /// * `soc`: Second-of-century timestamp.
    /// * `fracsec`: Fraction-of-second word.
    pub fn new(frame_type: FrameType, idcode: u16, soc: u32, fracsec: FracSec) -> FrameHeader {
        FrameHeader {
            sync: SyncWord {
                reserved: false,
                frame_type,
                version: 1,
            },
            idcode,
            soc,
            fracsec,
        }
    }

    /// Parses the common prefix from the first 14 bytes of a frame.
    ///
    /// The FRAMESIZE field is skipped here; frame decoders compare it against
    /// the actual buffer length themselves.
    ///
    /// # Parameters
    ///
    /// * `bytes`: Buffer holding at least the 14 prefix bytes.
    ///
    /// # Returns
    ///
    /// * `Ok(FrameHeader)`: The parsed prefix.
    /// * `Err(FrameError)`: The buffer is too short or the SYNC word is invalid.
    pub fn from_hex(bytes: &[u8]) -> Result<FrameHeader, FrameError> {
        if bytes.len() < PREFIX_SIZE {
            return Err(FrameError::TruncatedInput {
                needed: PREFIX_SIZE,
                available: bytes.len(),
            });
        }

        let sync = SyncWord::from_raw(u16::from_be_bytes([bytes[0], bytes[1]]))?;
        let idcode = u16::from_be_bytes([bytes[4], bytes[5]]);
        let soc = u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        let fracsec = FracSec::from_raw(u32::from_be_bytes([
            bytes[10], bytes[11], bytes[12], bytes[13],
        ]));

        Ok(FrameHeader {
            sync,
            idcode,
            soc,
            fracsec,
        })
    }

    /// Parses the prefix of a complete frame and validates its envelope: the
    /// SYNC word, the declared FRAMESIZE against the buffer length, and the
    /// checksum trailer, in that order.
    ///
    /// # Parameters
    ///
    /// * `bytes`: A complete frame buffer.
    ///
    /// # Returns
    ///
    /// * `Ok(FrameHeader)`: The envelope is intact; body bytes may be decoded.
    /// * `Err(FrameError)`: The first envelope check that failed.
    pub fn from_frame(bytes: &[u8]) -> Result<FrameHeader, FrameError> {
        if bytes.len() < MIN_FRAME_SIZE {
            return Err(FrameError::TruncatedInput {
                needed: MIN_FRAME_SIZE,
                available: bytes.len(),
            });
        }

        let header = FrameHeader::from_hex(bytes)?;

        let declared = u16::from_be_bytes([bytes[2], bytes[3]]);
        if declared as usize != bytes.len() {
            return Err(FrameError::LengthMismatch {
                declared,
                actual: bytes.len(),
            });
        }

        validate_checksum(bytes)?;
        Ok(header)
    }

    /// Checks that this prefix carries the frame type a decoder expects.
    pub fn expect_frame_type(&self, expected: FrameType) -> Result<(), FrameError> {
        if self.sync.frame_type != expected {
            return Err(FrameError::UnexpectedFrameType {
                expected,
                actual: self.sync.frame_type,
            });
        }
        Ok(())
    }

    /// Serializes the prefix, leaving the FRAMESIZE bytes zeroed for the
    /// finalize pass.
    pub fn to_hex(&self) -> [u8; PREFIX_SIZE] {
        let mut bytes = [0u8; PREFIX_SIZE];
        bytes[0..2].copy_from_slice(&self.sync.to_raw().to_be_bytes());
        bytes[4..6].copy_from_slice(&self.idcode.to_be_bytes());
        bytes[6..10].copy_from_slice(&self.soc.to_be_bytes());
        bytes[10..14].copy_from_slice(&self.fracsec.to_raw().to_be_bytes());
        bytes
    }

    /// Returns the frame timestamp in nanoseconds since the Unix epoch.
    ///
    /// # Parameters
    ///
    /// * `time_base`: FRACSEC resolution in ticks per second, from the
    ///   configuration frame.
    pub fn timestamp_nanos(&self, time_base: u32) -> i64 {
        timestamp_nanos(self.soc, self.fracsec.fraction, time_base)
    }
}

/// The bit-packed STAT word leading each PMU section of a data frame.
///
/// Packed MSB-first: dataError(2), pmuSync(1), dataSorting(1),
/// triggerDetected(1), configChange(1), dataModified(1), timeQuality(3),
/// unlockedTime(2), triggerReason(4).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatWord {
    pub data_error: u8,
    pub pmu_sync: bool,
    pub data_sorting: bool,
    pub trigger_detected: bool,
    pub config_change: bool,
    pub data_modified: bool,
    pub time_quality: u8,
    pub unlocked_time: u8,
    pub trigger_reason: u8,
}

impl StatWord {
    /// Unpacks a raw 16-bit STAT word. Every bit pattern is valid.
    pub fn from_raw(raw: u16) -> StatWord {
        StatWord {
            data_error: ((raw >> 14) & 0b11) as u8,
            pmu_sync: raw & 0x2000 != 0,
            data_sorting: raw & 0x1000 != 0,
            trigger_detected: raw & 0x0800 != 0,
            config_change: raw & 0x0400 != 0,
            data_modified: raw & 0x0200 != 0,
            time_quality: ((raw >> 6) & 0b111) as u8,
            unlocked_time: ((raw >> 4) & 0b11) as u8,
            trigger_reason: (raw & 0b1111) as u8,
        }
    }

    /// Packs the STAT word into its raw 16-bit form.
    pub fn to_raw(&self) -> u16 {
        let mut raw = ((self.data_error & 0b11) as u16) << 14;
        if self.pmu_sync {
            raw |= 0x2000;
        }
        if self.data_sorting {
            raw |= 0x1000;
        }
        if self.trigger_detected {
            raw |= 0x0800;
        }
        if self.config_change {
            raw |= 0x0400;
        }
        if self.data_modified {
            raw |= 0x0200;
        }
        raw |= ((self.time_quality & 0b111) as u16) << 6;
        raw |= ((self.unlocked_time & 0b11) as u16) << 4;
        raw | (self.trigger_reason & 0b1111) as u16
    }

    /// Describes the data error code for diagnostics.
    pub fn data_error_label(&self) -> &'static str {
        match self.data_error {
            0b00 => "Good measurement data, no errors",
            0b01 => "PMU error, no information about data",
            0b10 => "PMU in test mode or absent data tags have been inserted",
            _ => "PMU error",
        }
    }

    /// Describes the PMU time quality code for diagnostics.
    pub fn time_quality_label(&self) -> &'static str {
        match self.time_quality {
            0b000 => "Not used",
            0b001 => "Estimated maximum time error < 100 ns",
            0b010 => "Estimated maximum time error < 1 us",
            0b011 => "Estimated maximum time error < 10 us",
            0b100 => "Estimated maximum time error < 100 us",
            0b101 => "Estimated maximum time error < 1 ms",
            0b110 => "Estimated maximum time error < 10 ms",
            _ => "Estimated maximum time error > 10 ms or time error unknown",
        }
    }

    /// Describes the unlocked time code for diagnostics.
    pub fn unlocked_time_label(&self) -> &'static str {
        match self.unlocked_time {
            0b00 => "Sync locked or unlocked < 10 s",
            0b01 => "Unlocked time between 10 s and 100 s",
            0b10 => "Unlocked time between 100 s and 1000 s",
            _ => "Unlocked time > 1000 s",
        }
    }

    /// Describes the trigger reason code for diagnostics.
    pub fn trigger_reason_label(&self) -> &'static str {
        match self.trigger_reason {
            0b0000 => "Manual",
            0b0001 => "Magnitude low",
            0b0010 => "Magnitude high",
            0b0011 => "Phase angle diff",
            0b0100 => "Frequency high or low",
            0b0101 => "df/dt high",
            0b0111 => "Digital",
            _ => "Reserved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_word_roundtrip() {
        let sync = SyncWord::from_raw(0xAA31).unwrap();
        assert_eq!(sync.frame_type, FrameType::Config2);
        assert_eq!(sync.version, 1);
        assert!(!sync.reserved);
        assert_eq!(sync.to_raw(), 0xAA31);

        let data = SyncWord::from_raw(0xAA02).unwrap();
        assert_eq!(data.frame_type, FrameType::Data);
        assert_eq!(data.version, 2);
        assert_eq!(data.version_label(), "Version 2");
    }

    #[test]
    fn test_sync_word_rejects_bad_marker() {
        let err = SyncWord::from_raw(0xAB31).unwrap_err();
        assert_eq!(err, FrameError::InvalidSync { sync: 0xAB31 });
    }

    #[test]
    fn test_sync_word_rejects_reserved_frame_type() {
        // 0b110 and 0b111 type codes are reserved
        assert!(SyncWord::from_raw(0xAA61).is_err());
        assert!(SyncWord::from_raw(0xAA71).is_err());
    }

    #[test]
    fn test_frame_type_codes() {
        let codes = [
            (0b000, FrameType::Data),
            (0b001, FrameType::Header),
            (0b010, FrameType::Config1),
            (0b011, FrameType::Config2),
            (0b100, FrameType::Command),
            (0b101, FrameType::Config3),
        ];
        for (bits, frame_type) in codes {
            assert_eq!(FrameType::from_bits(bits), Some(frame_type));
            assert_eq!(frame_type.to_bits(), bits);
        }
        assert_eq!(FrameType::from_bits(0b110), None);
        assert_eq!(FrameType::from_bits(0b111), None);
    }

    #[test]
    fn test_fracsec_roundtrip() {
        // FRACSEC word from the sample configuration frame: leap second delete
        // pending, time within 10^-4 s of UTC, fraction 463000
        let fracsec = FracSec::from_raw(0x5607_1098);
        assert!(fracsec.leap_second_direction);
        assert!(!fracsec.leap_second_occurred);
        assert!(fracsec.leap_second_pending);
        assert_eq!(fracsec.time_quality, 0b0110);
        assert_eq!(fracsec.fraction, 463_000);
        assert_eq!(fracsec.to_raw(), 0x5607_1098);

        // Sample command frame: clock fault, fraction 770000
        let fault = FracSec::from_raw(0x0F0B_BFD0);
        assert_eq!(fault.time_quality, 0b1111);
        assert_eq!(fault.fraction, 770_000);
        assert_eq!(fault.time_quality_label(), "Fault, clock failure");
    }

    #[test]
    fn test_fracsec_reserved_time_quality_is_not_an_error() {
        let fracsec = FracSec::from_raw(0x0C00_0000);
        assert_eq!(fracsec.time_quality, 0b1100);
        assert_eq!(fracsec.time_quality_label(), "Reserved");
    }

    #[test]
    fn test_stat_word_roundtrip() {
        let stat = StatWord::from_raw(0xA123);
        assert_eq!(stat.data_error, 0b10);
        assert!(stat.pmu_sync);
        assert!(!stat.data_sorting);
        assert!(!stat.trigger_detected);
        assert!(!stat.config_change);
        assert!(!stat.data_modified);
        assert_eq!(stat.time_quality, 0b100);
        assert_eq!(stat.unlocked_time, 0b10);
        assert_eq!(stat.trigger_reason, 0b0011);
        assert_eq!(stat.to_raw(), 0xA123);

        assert_eq!(StatWord::default().to_raw(), 0);
    }

    #[test]
    fn test_stat_word_labels() {
        let stat = StatWord::from_raw(0x4006);
        assert_eq!(stat.data_error, 0b01);
        assert_eq!(stat.data_error_label(), "PMU error, no information about data");
        assert_eq!(stat.trigger_reason, 0b0110);
        assert_eq!(stat.trigger_reason_label(), "Reserved");
    }

    #[test]
    fn test_frame_header_from_hex() {
        // Prefix of the sample configuration frame
        let bytes = [
            0xAA, 0x31, 0x01, 0xC6, 0x1E, 0x36, 0x44, 0x85, 0x27, 0xF0, 0x56, 0x07, 0x10, 0x98,
        ];
        let header = FrameHeader::from_hex(&bytes).unwrap();

        assert_eq!(header.sync.frame_type, FrameType::Config2);
        assert_eq!(header.sync.version, 1);
        assert_eq!(header.idcode, 7734);
        assert_eq!(header.soc, 1_149_577_200);
        assert_eq!(header.fracsec.fraction, 463_000);

        // Re-encoding zeroes the FRAMESIZE field for the finalize pass
        let encoded = header.to_hex();
        assert_eq!(&encoded[0..2], &bytes[0..2]);
        assert_eq!(&encoded[2..4], &[0, 0]);
        assert_eq!(&encoded[4..14], &bytes[4..14]);
    }

    #[test]
    fn test_frame_header_truncated() {
        let err = FrameHeader::from_hex(&[0xAA, 0x01, 0x00]).unwrap_err();
        assert_eq!(
            err,
            FrameError::TruncatedInput {
                needed: PREFIX_SIZE,
                available: 3
            }
        );
    }

    #[test]
    fn test_frame_header_timestamp() {
        let header = FrameHeader::new(
            FrameType::Data,
            7734,
            1_149_580_800,
            FracSec::from_raw(16_817),
        );
        assert_eq!(
            header.timestamp_nanos(1_000_000),
            1_149_580_800_000_000_000 + 16_817_000
        );
    }
}
