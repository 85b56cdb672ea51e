//! # Measurement Unit Fields
//!
//! This module handles the per-channel unit and scaling fields carried in a
//! configuration frame entry: PHUNIT conversion factors for phasor channels,
//! ANUNIT factors for analog channels, DIGUNIT masks for digital status words,
//! and the FNOM nominal frequency selector.
//!
//! ## Key Components
//!
//! - `PhasorUnit`: Voltage/current selector and 24-bit unsigned scale factor.
//! - `AnalogUnit`: Analog channel type and 24-bit signed scale factor.
//! - `DigitalUnit`: Normal status and valid input masks for one digital word.
//! - `NominalFrequency`: The 50/60 Hz FNOM selector.
//! - `frames_per_second`: Interprets the signed DATA_RATE field.
//!
//! ## Usage
//!
//! Configuration entry codecs decode one unit field per declared channel; the
//! scale factors feed the engineering-unit conversions in the `phasors` module.

use crate::common::FrameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// PHUNIT field: channel type and conversion factor for one phasor channel.
///
/// # Fields
///
/// * `kind`: 0 for voltage, 1 for current.
/// * `scale_factor`: 24-bit unsigned conversion factor in 10^-5 V or A per count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasorUnit {
    pub kind: u8,
    pub scale_factor: u32,
}

impl PhasorUnit {
    /// Decodes a PHUNIT field from the first four bytes of `bytes`.
    pub fn from_hex(bytes: &[u8]) -> Result<PhasorUnit, FrameError> {
        if bytes.len() < 4 {
            return Err(FrameError::TruncatedInput {
                needed: 4,
                available: bytes.len(),
            });
        }

        Ok(PhasorUnit {
            kind: bytes[0],
            scale_factor: u32::from_be_bytes([0, bytes[1], bytes[2], bytes[3]]),
        })
    }

    /// Serializes the PHUNIT field.
    pub fn to_hex(&self) -> [u8; 4] {
        let scale = self.scale_factor.to_be_bytes();
        [self.kind, scale[1], scale[2], scale[3]]
    }

    /// Returns true when the channel measures current.
    pub fn is_current(&self) -> bool {
        self.kind == 1
    }

    /// Describes the channel type for diagnostics.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            0 => "voltage",
            1 => "current",
            _ => "reserved",
        }
    }
}

/// ANUNIT field: channel type and conversion factor for one analog channel.
///
/// # Fields
///
/// * `kind`: 0 single point-on-wave, 1 RMS, 2 peak; 65-255 user definable.
/// * `scale_factor`: 24-bit signed conversion factor, user defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogUnit {
    pub kind: u8,
    pub scale_factor: i32,
}

impl AnalogUnit {
    /// Decodes an ANUNIT field from the first four bytes of `bytes`.
    pub fn from_hex(bytes: &[u8]) -> Result<AnalogUnit, FrameError> {
        if bytes.len() < 4 {
            return Err(FrameError::TruncatedInput {
                needed: 4,
                available: bytes.len(),
            });
        }

        // Sign-extend the 24-bit scale factor
        let raw = u32::from_be_bytes([0, bytes[1], bytes[2], bytes[3]]);
        let scale_factor = ((raw << 8) as i32) >> 8;

        Ok(AnalogUnit {
            kind: bytes[0],
            scale_factor,
        })
    }

    /// Serializes the ANUNIT field.
    pub fn to_hex(&self) -> [u8; 4] {
        let scale = self.scale_factor.to_be_bytes();
        [self.kind, scale[1], scale[2], scale[3]]
    }

    /// Describes the channel type for diagnostics.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            0 => "single point-on-wave",
            1 => "rms of analog input",
            2 => "peak of analog input",
            65..=255 => "user definable",
            _ => "reserved",
        }
    }
}

/// DIGUNIT field: status masks for one 16-bit digital word.
///
/// # Fields
///
/// * `normal_status`: Expected state of each input bit.
/// * `valid_inputs`: Mask of bits carrying a real input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalUnit {
    pub normal_status: u16,
    pub valid_inputs: u16,
}

impl DigitalUnit {
    /// Decodes a DIGUNIT field from the first four bytes of `bytes`.
    pub fn from_hex(bytes: &[u8]) -> Result<DigitalUnit, FrameError> {
        if bytes.len() < 4 {
            return Err(FrameError::TruncatedInput {
                needed: 4,
                available: bytes.len(),
            });
        }

        Ok(DigitalUnit {
            normal_status: u16::from_be_bytes([bytes[0], bytes[1]]),
            valid_inputs: u16::from_be_bytes([bytes[2], bytes[3]]),
        })
    }

    /// Serializes the DIGUNIT field.
    pub fn to_hex(&self) -> [u8; 4] {
        let mut bytes = [0u8; 4];
        bytes[0..2].copy_from_slice(&self.normal_status.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.valid_inputs.to_be_bytes());
        bytes
    }
}

/// FNOM field: nominal line frequency. Bit 0 of the wire word selects 50 Hz
/// when set, 60 Hz when clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NominalFrequency {
    Hz50,
    Hz60,
}

impl NominalFrequency {
    /// Decodes the FNOM word; the upper 15 bits are reserved and ignored.
    pub fn from_raw(raw: u16) -> NominalFrequency {
        if raw & 0x0001 != 0 {
            NominalFrequency::Hz50
        } else {
            NominalFrequency::Hz60
        }
    }

    /// Encodes the FNOM word.
    pub fn to_raw(&self) -> u16 {
        match self {
            NominalFrequency::Hz50 => 0x0001,
            NominalFrequency::Hz60 => 0x0000,
        }
    }

    /// Nominal frequency in hertz.
    pub fn frequency(&self) -> f32 {
        match self {
            NominalFrequency::Hz50 => 50.0,
            NominalFrequency::Hz60 => 60.0,
        }
    }
}

impl fmt::Display for NominalFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NominalFrequency::Hz50 => write!(f, "50 Hz"),
            NominalFrequency::Hz60 => write!(f, "60 Hz"),
        }
    }
}

/// Interprets the signed DATA_RATE field: non-negative values count frames per
/// second, negative values count seconds per frame.
pub fn frames_per_second(data_rate: i16) -> f32 {
    if data_rate >= 0 {
        data_rate as f32
    } else {
        -1.0 / data_rate as f32
    }
}
