//! # Phasor and Scalar Value Codec
//!
//! This module handles the three mutually exclusive wire representations of a
//! phasor measurement (16-bit rectangular, 16-bit polar, 32-bit float pair) and
//! the two representations of frequency and analog scalars (16-bit integer,
//! 32-bit float). Which representation a channel uses is fixed by the FORMAT
//! word of the owning configuration entry, never by inspecting values.
//!
//! ## Key Components
//!
//! - `ScalarFormat` / `ScalarValue`: Frequency and analog channel codec.
//! - `PhasorKind` / `PhasorFormat` / `PhasorValue`: Phasor channel codec.
//! - `scale_phasor_value`: Applies a configuration scale factor to integer data.
//!
//! ## Usage
//!
//! Data frame decoders derive one `PhasorFormat` and the scalar formats per PMU
//! from the matching configuration entry, then decode every channel of that PMU
//! with them. Integer phasors convert to engineering units through the
//! `to_float_rect` and `to_float_polar` methods using the per-channel scale
//! factor; float phasors are transmitted in engineering units already.

use crate::common::FrameError;
use serde::{Deserialize, Serialize};

/// Inverse of the 10^5 divisor applied to integer phasor scale factors.
pub const SCALE_DENOMINATOR_INVERSE: f32 = 0.00001;

/// Converts a raw integer measurement to engineering units.
///
/// The conversion factor transmitted in a PHUNIT field is the scale in
/// 10^-5 volts or amperes per count.
///
/// # Parameters
///
/// * `value`: Raw measurement value.
/// * `scale_factor`: 24-bit conversion factor from the configuration entry.
pub fn scale_phasor_value(value: f32, scale_factor: u32) -> f32 {
    value * SCALE_DENOMINATOR_INVERSE * scale_factor as f32
}

/// Calculates the magnitude of a rectangular phasor.
pub fn calc_magnitude(real: f32, imag: f32) -> f32 {
    (real * real + imag * imag).sqrt()
}

/// Wire representation of a frequency or analog scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarFormat {
    Int16,
    Float32,
}

impl ScalarFormat {
    /// Selects the representation from a FORMAT word size bit (set = float).
    pub fn from_float_flag(is_float: bool) -> ScalarFormat {
        if is_float {
            ScalarFormat::Float32
        } else {
            ScalarFormat::Int16
        }
    }

    /// Encoded size in bytes.
    pub fn size(self) -> usize {
        match self {
            ScalarFormat::Int16 => 2,
            ScalarFormat::Float32 => 4,
        }
    }

    /// Describes the representation for diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ScalarFormat::Int16 => "16-bit integer",
            ScalarFormat::Float32 => "floating point",
        }
    }
}

/// A decoded frequency or analog value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Int16(i16),
    Float32(f32),
}

impl ScalarValue {
    /// Decodes a scalar from the start of `bytes` using the given representation.
    ///
    /// # Parameters
    ///
    /// * `bytes`: Buffer holding at least `format.size()` bytes.
    /// * `format`: Representation declared by the configuration entry.
    ///
    /// # Returns
    ///
    /// * `Ok(ScalarValue)`: The decoded value.
    /// * `Err(FrameError::TruncatedInput)`: Not enough bytes remain.
    pub fn from_hex(bytes: &[u8], format: ScalarFormat) -> Result<ScalarValue, FrameError> {
        if bytes.len() < format.size() {
            return Err(FrameError::TruncatedInput {
                needed: format.size(),
                available: bytes.len(),
            });
        }

        match format {
            ScalarFormat::Int16 => Ok(ScalarValue::Int16(i16::from_be_bytes([
                bytes[0], bytes[1],
            ]))),
            ScalarFormat::Float32 => Ok(ScalarValue::Float32(f32::from_be_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ]))),
        }
    }

    /// Serializes the scalar in its wire representation.
    pub fn to_hex(&self) -> Vec<u8> {
        match *self {
            ScalarValue::Int16(value) => value.to_be_bytes().to_vec(),
            ScalarValue::Float32(value) => value.to_be_bytes().to_vec(),
        }
    }

    /// Returns the representation this value encodes as.
    pub fn format(&self) -> ScalarFormat {
        match self {
            ScalarValue::Int16(_) => ScalarFormat::Int16,
            ScalarValue::Float32(_) => ScalarFormat::Float32,
        }
    }

    /// Returns the value widened to `f32`.
    pub fn as_f32(&self) -> f32 {
        match *self {
            ScalarValue::Int16(value) => value as f32,
            ScalarValue::Float32(value) => value,
        }
    }
}

/// Coordinate system of a phasor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhasorKind {
    Rectangular,
    Polar,
}

impl PhasorKind {
    /// Describes the coordinate system for diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            PhasorKind::Rectangular => "rectangular",
            PhasorKind::Polar => "polar",
        }
    }
}

/// Wire representation of a phasor channel, from the FORMAT word of the owning
/// configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasorFormat {
    pub scalar: ScalarFormat,
    pub kind: PhasorKind,
}

impl PhasorFormat {
    /// Encoded size in bytes: 4 for 16-bit representations, 8 for floats.
    pub fn size(self) -> usize {
        self.scalar.size() * 2
    }
}

/// A decoded phasor measurement.
///
/// The 16-bit integer representations carry the coordinate system in the
/// variant. Float phasors encode as two big-endian singles regardless of
/// coordinate system, so `Float32` holds the pair as transmitted and its
/// interpretation follows the owning configuration entry.
///
/// # Variants
///
/// * `Rectangular16`: Signed real and imaginary parts in raw counts.
/// * `Polar16`: Unsigned magnitude in raw counts, signed angle in 10^-4 radians.
/// * `Float32`: Two floats in engineering units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhasorValue {
    Rectangular16 { real: i16, imag: i16 },
    Polar16 { magnitude: u16, angle: i16 },
    Float32(f32, f32),
}

impl PhasorValue {
    /// Decodes a phasor from the start of `bytes` using the given format.
    ///
    /// # Parameters
    ///
    /// * `bytes`: Buffer holding at least `format.size()` bytes.
    /// * `format`: Representation declared by the configuration entry.
    ///
    /// # Returns
    ///
    /// * `Ok(PhasorValue)`: The decoded phasor.
    /// * `Err(FrameError::TruncatedInput)`: Not enough bytes remain.
    pub fn from_hex(bytes: &[u8], format: PhasorFormat) -> Result<PhasorValue, FrameError> {
        if bytes.len() < format.size() {
            return Err(FrameError::TruncatedInput {
                needed: format.size(),
                available: bytes.len(),
            });
        }

        match format.scalar {
            ScalarFormat::Float32 => Ok(PhasorValue::Float32(
                f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
                f32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            )),
            ScalarFormat::Int16 => match format.kind {
                PhasorKind::Rectangular => Ok(PhasorValue::Rectangular16 {
                    real: i16::from_be_bytes([bytes[0], bytes[1]]),
                    imag: i16::from_be_bytes([bytes[2], bytes[3]]),
                }),
                PhasorKind::Polar => Ok(PhasorValue::Polar16 {
                    magnitude: u16::from_be_bytes([bytes[0], bytes[1]]),
                    angle: i16::from_be_bytes([bytes[2], bytes[3]]),
                }),
            },
        }
    }

    /// Serializes the phasor in its wire representation.
    pub fn to_hex(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.wire_size());
        match *self {
            PhasorValue::Rectangular16 { real, imag } => {
                bytes.extend_from_slice(&real.to_be_bytes());
                bytes.extend_from_slice(&imag.to_be_bytes());
            }
            PhasorValue::Polar16 { magnitude, angle } => {
                bytes.extend_from_slice(&magnitude.to_be_bytes());
                bytes.extend_from_slice(&angle.to_be_bytes());
            }
            PhasorValue::Float32(a, b) => {
                bytes.extend_from_slice(&a.to_be_bytes());
                bytes.extend_from_slice(&b.to_be_bytes());
            }
        }
        bytes
    }

    /// Encoded size in bytes.
    pub fn wire_size(&self) -> usize {
        match self {
            PhasorValue::Rectangular16 { .. } | PhasorValue::Polar16 { .. } => 4,
            PhasorValue::Float32(..) => 8,
        }
    }

    /// Converts to rectangular engineering units.
    ///
    /// Integer values are scaled by the configuration conversion factor; polar
    /// integers are projected through their angle. A `Float32` pair is returned
    /// as stored since its coordinate system is fixed by the owning
    /// configuration entry.
    ///
    /// # Parameters
    ///
    /// * `scale_factor`: PHUNIT conversion factor for this channel.
    ///
    /// # Returns
    ///
    /// A `(real, imaginary)` pair.
    pub fn to_float_rect(&self, scale_factor: u32) -> (f32, f32) {
        match *self {
            PhasorValue::Rectangular16 { real, imag } => (
                scale_phasor_value(real as f32, scale_factor),
                scale_phasor_value(imag as f32, scale_factor),
            ),
            PhasorValue::Polar16 { magnitude, angle } => {
                let magnitude = scale_phasor_value(magnitude as f32, scale_factor);
                // Angle transmitted in 10^-4 radians
                let angle = angle as f32 * 0.0001;
                (magnitude * angle.cos(), magnitude * angle.sin())
            }
            PhasorValue::Float32(a, b) => (a, b),
        }
    }

    /// Converts to polar engineering units.
    ///
    /// # Parameters
    ///
    /// * `scale_factor`: PHUNIT conversion factor for this channel.
    ///
    /// # Returns
    ///
    /// A `(magnitude, angle)` pair with the angle in radians; see
    /// `to_float_rect` for how `Float32` pairs are handled.
    pub fn to_float_polar(&self, scale_factor: u32) -> (f32, f32) {
        match *self {
            PhasorValue::Rectangular16 { real, imag } => {
                let real = scale_phasor_value(real as f32, scale_factor);
                let imag = scale_phasor_value(imag as f32, scale_factor);
                (calc_magnitude(real, imag), imag.atan2(real))
            }
            PhasorValue::Polar16 { magnitude, angle } => (
                scale_phasor_value(magnitude as f32, scale_factor),
                angle as f32 * 0.0001,
            ),
            PhasorValue::Float32(a, b) => (a, b),
        }
    }
}
