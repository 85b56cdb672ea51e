//! # Data Frame Codec
//!
//! This module parses and constructs data frames, the measurement-bearing
//! frames of a stream. A data frame is not self-describing: the number of
//! channels, their order, and their number formats all come from the stream's
//! Configuration Frame 2, so every operation here takes the configuration (or
//! one PMU's entry of it) alongside the bytes.
//!
//! ## Key Components
//!
//! - `DataFrameEntry`: One PMU's STAT word and measurement values.
//! - `DataFrame`: The complete frame with one entry per configured PMU.
//!
//! ## Usage
//!
//! Decode the stream's Configuration Frame 2 first, then hand it to
//! `DataFrame::from_hex` for each data frame. Scaled engineering values are
//! produced by pairing each phasor with the matching PHUNIT conversion factor
//! from the configuration entry.

use crate::common::{FrameError, FrameHeader, FrameType, StatWord, PREFIX_SIZE};
use crate::config::{ConfigEntry, ConfigFrame2};
use crate::phasors::{PhasorValue, ScalarValue};
use crate::utils::finalize_frame;
use serde::{Deserialize, Serialize};

/// One PMU's section of a data frame.
///
/// # Fields
///
/// * `stat`: Decoded STAT word flags.
/// * `phasors`: Phasor values in channel order.
/// * `freq`: FREQ field, frequency or its deviation from nominal.
/// * `dfreq`: DFREQ field, rate of change of frequency.
/// * `analogs`: Analog values in channel order.
/// * `digitals`: Digital status words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrameEntry {
    pub stat: StatWord,
    pub phasors: Vec<PhasorValue>,
    pub freq: ScalarValue,
    pub dfreq: ScalarValue,
    pub analogs: Vec<ScalarValue>,
    pub digitals: Vec<u16>,
}

impl DataFrameEntry {
    /// Parses one PMU's section from the start of `bytes`.
    ///
    /// The channel counts and number formats are taken from `config`, which
    /// must be the configuration entry for the same PMU.
    ///
    /// # Parameters
    ///
    /// * `bytes`: Buffer starting at the section's STAT word.
    /// * `config`: Configuration entry describing the section layout.
    ///
    /// # Returns
    ///
    /// * `Ok((DataFrameEntry, usize))`: The section and the number of bytes consumed.
    /// * `Err(FrameError::TruncatedInput)`: The buffer is shorter than the
    ///   configured section size.
    pub fn from_hex(
        bytes: &[u8],
        config: &ConfigEntry,
    ) -> Result<(DataFrameEntry, usize), FrameError> {
        let section_size = config.data_size();
        if bytes.len() < section_size {
            return Err(FrameError::TruncatedInput {
                needed: section_size,
                available: bytes.len(),
            });
        }

        let stat = StatWord::from_raw(u16::from_be_bytes([bytes[0], bytes[1]]));
        let mut offset = 2;

        let phasor_format = config.phasor_format();
        let mut phasors = Vec::with_capacity(config.phasor_units.len());
        for _ in 0..config.phasor_units.len() {
            let value = PhasorValue::from_hex(&bytes[offset..], phasor_format)?;
            offset += value.wire_size();
            phasors.push(value);
        }

        let freq_format = config.freq_format();
        let freq = ScalarValue::from_hex(&bytes[offset..], freq_format)?;
        offset += freq_format.size();
        let dfreq = ScalarValue::from_hex(&bytes[offset..], freq_format)?;
        offset += freq_format.size();

        let analog_format = config.analog_format();
        let mut analogs = Vec::with_capacity(config.analog_units.len());
        for _ in 0..config.analog_units.len() {
            analogs.push(ScalarValue::from_hex(&bytes[offset..], analog_format)?);
            offset += analog_format.size();
        }

        let mut digitals = Vec::with_capacity(config.digital_units.len());
        for _ in 0..config.digital_units.len() {
            digitals.push(u16::from_be_bytes([bytes[offset], bytes[offset + 1]]));
            offset += 2;
        }

        Ok((
            DataFrameEntry {
                stat,
                phasors,
                freq,
                dfreq,
                analogs,
                digitals,
            },
            offset,
        ))
    }

    /// Serializes the section in wire order.
    pub fn to_hex(&self) -> Vec<u8> {
        let mut result = Vec::new();
        result.extend_from_slice(&self.stat.to_raw().to_be_bytes());
        for phasor in &self.phasors {
            result.extend_from_slice(&phasor.to_hex());
        }
        result.extend_from_slice(&self.freq.to_hex());
        result.extend_from_slice(&self.dfreq.to_hex());
        for analog in &self.analogs {
            result.extend_from_slice(&analog.to_hex());
        }
        for digital in &self.digitals {
            result.extend_from_slice(&digital.to_be_bytes());
        }
        result
    }

    /// Phasors as scaled rectangular pairs, in volts or amperes.
    ///
    /// Each phasor is paired with the PHUNIT conversion factor at the same
    /// channel index in `config`.
    pub fn scaled_phasors_rect(&self, config: &ConfigEntry) -> Vec<(f32, f32)> {
        self.phasors
            .iter()
            .zip(&config.phasor_units)
            .map(|(phasor, unit)| phasor.to_float_rect(unit.scale_factor))
            .collect()
    }

    /// Phasors as scaled polar pairs: magnitude in volts or amperes, angle in
    /// radians.
    pub fn scaled_phasors_polar(&self, config: &ConfigEntry) -> Vec<(f32, f32)> {
        self.phasors
            .iter()
            .zip(&config.phasor_units)
            .map(|(phasor, unit)| phasor.to_float_polar(unit.scale_factor))
            .collect()
    }
}

/// A complete data frame.
///
/// # Fields
///
/// * `header`: Common frame prefix.
/// * `entries`: One measurement section per configured PMU, in configuration
///   order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    pub header: FrameHeader,
    pub entries: Vec<DataFrameEntry>,
}

impl DataFrame {
    /// Parses a complete data frame using the stream's configuration.
    ///
    /// The envelope is validated first: SYNC word, declared size against the
    /// buffer length, then the checksum trailer. One section is read per
    /// configuration entry, each laid out by the matching entry's formats and
    /// counts.
    ///
    /// # Parameters
    ///
    /// * `bytes`: A complete frame buffer.
    /// * `config`: The stream's Configuration Frame 2.
    ///
    /// # Returns
    ///
    /// * `Ok(DataFrame)`: The parsed frame.
    /// * `Err(FrameError)`: The envelope is invalid, the frame type is not
    ///   Data, or a section overruns the buffer.
    pub fn from_hex(bytes: &[u8], config: &ConfigFrame2) -> Result<DataFrame, FrameError> {
        let header = FrameHeader::from_frame(bytes)?;
        header.expect_frame_type(FrameType::Data)?;

        let mut offset = PREFIX_SIZE;
        let mut entries = Vec::with_capacity(config.entries.len());
        for entry_config in &config.entries {
            let (entry, consumed) = DataFrameEntry::from_hex(&bytes[offset..], entry_config)?;
            entries.push(entry);
            offset += consumed;
        }

        Ok(DataFrame { header, entries })
    }

    /// Serializes the frame, then patches the FRAMESIZE field and checksum
    /// trailer in a final pass.
    pub fn to_hex(&self) -> Vec<u8> {
        let mut result = Vec::new();
        result.extend_from_slice(&self.header.to_hex());
        for entry in &self.entries {
            result.extend_from_slice(&entry.to_hex());
        }
        result.extend_from_slice(&[0, 0]);

        finalize_frame(&mut result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    #[test]
    fn test_sample_data_frame_values() {
        let config = samples::config_frame();
        let frame = samples::data_frame();
        let bytes = frame.to_hex();

        assert_eq!(bytes.len(), config.data_frame_size());
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]), 52);

        let decoded = DataFrame::from_hex(&bytes, &config).unwrap();
        assert_eq!(decoded, frame);

        let entry = &decoded.entries[0];
        assert_eq!(entry.stat.to_raw(), 0);
        assert_eq!(
            entry.phasors[0],
            PhasorValue::Rectangular16 {
                real: 14635,
                imag: 0
            }
        );
        assert_eq!(
            entry.phasors[1],
            PhasorValue::Rectangular16 {
                real: -7318,
                imag: -12676
            }
        );
        assert_eq!(entry.freq, ScalarValue::Int16(2500));
        assert_eq!(entry.dfreq, ScalarValue::Int16(0));
        assert_eq!(entry.analogs[0], ScalarValue::Float32(100.0));
        assert_eq!(entry.analogs[2], ScalarValue::Float32(10000.0));
        assert_eq!(entry.digitals, vec![0b0011_1100_0001_0010]);
    }

    #[test]
    fn test_sample_data_frame_bytes() {
        let frame = samples::data_frame();
        let bytes = frame.to_hex();

        // STAT directly after the prefix, then the first phasor
        assert_eq!(&bytes[14..16], &[0x00, 0x00]);
        assert_eq!(&bytes[16..20], &[0x39, 0x2B, 0x00, 0x00]);
        assert_eq!(&bytes[20..24], &[0xE3, 0x6A, 0xCE, 0x7C]);
        // FREQ after four phasors
        assert_eq!(&bytes[32..34], &[0x09, 0xC4]);
    }

    #[test]
    fn test_entry_roundtrip() {
        let config = samples::config_entry();
        let frame = samples::data_frame();
        let section = frame.entries[0].to_hex();

        assert_eq!(section.len(), config.data_size());
        let (decoded, consumed) = DataFrameEntry::from_hex(&section, &config).unwrap();
        assert_eq!(consumed, section.len());
        assert_eq!(decoded, frame.entries[0]);
    }

    #[test]
    fn test_entry_truncated() {
        let config = samples::config_entry();
        let section = samples::data_frame().entries[0].to_hex();

        assert!(matches!(
            DataFrameEntry::from_hex(&section[..10], &config),
            Err(FrameError::TruncatedInput { needed: 36, .. })
        ));
    }

    #[test]
    fn test_scaled_phasors() {
        let config = samples::config_entry();
        let entry = &samples::data_frame().entries[0];

        let rect = entry.scaled_phasors_rect(&config);
        // 14635 counts at 915527e-5 V per count
        assert!((rect[0].0 - 133987.38).abs() < 0.5);
        assert_eq!(rect[0].1, 0.0);

        let polar = entry.scaled_phasors_polar(&config);
        assert!((polar[0].0 - 133987.38).abs() < 0.5);
        assert_eq!(polar[0].1, 0.0);
        // Phase B lags by 120 degrees
        assert!((polar[1].1 + 2.0944).abs() < 0.001);

        // Channel 4 is a current at 45776e-5 A per count
        assert!((rect[3].0 - 499.87).abs() < 0.5);
    }

    #[test]
    fn test_data_frame_rejects_other_frame_types() {
        let config = samples::config_frame();
        let config_bytes = config.to_hex();

        let err = DataFrame::from_hex(&config_bytes, &config).unwrap_err();
        assert_eq!(
            err,
            FrameError::UnexpectedFrameType {
                expected: FrameType::Data,
                actual: FrameType::Config2,
            }
        );
    }

    #[test]
    fn test_data_frame_needs_matching_config() {
        let mut config = samples::config_frame();
        let bytes = samples::data_frame().to_hex();

        // A second configured PMU demands a second section
        config.entries.push(samples::config_entry());
        assert!(matches!(
            DataFrame::from_hex(&bytes, &config),
            Err(FrameError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_float_phasor_sections() {
        let mut config = samples::config_entry();
        // All-float, polar FORMAT word
        config.format = 0x000F;

        let entry = DataFrameEntry {
            stat: StatWord::default(),
            phasors: vec![
                PhasorValue::Float32(14635.0, 0.0),
                PhasorValue::Float32(14635.0, -2.0944),
                PhasorValue::Float32(14635.0, 2.0944),
                PhasorValue::Float32(499.0, 0.0),
            ],
            freq: ScalarValue::Float32(60.0),
            dfreq: ScalarValue::Float32(0.0),
            analogs: vec![
                ScalarValue::Float32(100.0),
                ScalarValue::Float32(1000.0),
                ScalarValue::Float32(10000.0),
            ],
            digitals: vec![0x1234],
        };

        let section = entry.to_hex();
        assert_eq!(section.len(), config.data_size());
        assert_eq!(config.data_size(), 2 + 8 * 4 + 4 * 2 + 4 * 3 + 2);

        let (decoded, consumed) = DataFrameEntry::from_hex(&section, &config).unwrap();
        assert_eq!(consumed, section.len());
        assert_eq!(decoded, entry);
    }
}
