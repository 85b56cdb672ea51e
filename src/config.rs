//! # Configuration Frame 2 Codec
//!
//! This module parses and constructs Configuration Frame 2, the frame that
//! describes the channel layout, number formats, and scaling needed to
//! interpret the data frames of a stream. A frame carries one entry per PMU;
//! each entry declares its channel counts before the count-dependent name and
//! unit tables, so the decoder reads the counts first and sizes every
//! following list from them.
//!
//! ## Key Components
//!
//! - `TimeBase`: FRACSEC resolution declared for the whole stream.
//! - `ConfigEntry`: One PMU's station name, formats, channels, and scaling.
//! - `ConfigFrame2`: The complete frame with its entry list and data rate.
//!
//! ## Usage
//!
//! A decoded `ConfigFrame2` is handed to the data frame codec, which derives
//! each PMU's phasor and scalar formats from the matching entry. Counts are
//! not stored on the model: PHNMR, ANNMR, DGNMR, and NUM_PMU are the lengths
//! of the corresponding lists and are written from them on encode.

use crate::common::{FrameError, FrameHeader, FrameType, MIN_FRAME_SIZE, PREFIX_SIZE};
use crate::phasors::{PhasorFormat, PhasorKind, ScalarFormat};
use crate::units::{frames_per_second, AnalogUnit, DigitalUnit, NominalFrequency, PhasorUnit};
use crate::utils::finalize_frame;
use serde::{Deserialize, Serialize};

/// Fixed-size portion of a configuration entry before the channel name table.
const ENTRY_FIXED_SIZE: usize = 26;

/// Builds a FORMAT word from the representations of each channel group.
///
/// # Parameters
///
/// * `phasors`: Phasor size and coordinate selection (bits 1 and 0).
/// * `analogs`: Analog size selection (bit 2).
/// * `freq`: FREQ/DFREQ size selection (bit 3).
pub fn format_word(phasors: PhasorFormat, analogs: ScalarFormat, freq: ScalarFormat) -> u16 {
    let mut format = 0;
    if freq == ScalarFormat::Float32 {
        format |= 0x0008;
    }
    if analogs == ScalarFormat::Float32 {
        format |= 0x0004;
    }
    if phasors.scalar == ScalarFormat::Float32 {
        format |= 0x0002;
    }
    if phasors.kind == PhasorKind::Polar {
        format |= 0x0001;
    }
    format
}

/// TIME_BASE field: flags byte and the 24-bit FRACSEC resolution in ticks per
/// second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBase {
    pub flags: u8,
    pub value: u32,
}

impl TimeBase {
    /// Decodes the four TIME_BASE bytes as a big-endian integer.
    pub fn from_raw(raw: u32) -> TimeBase {
        TimeBase {
            flags: (raw >> 24) as u8,
            value: raw & 0x00FF_FFFF,
        }
    }

    /// Encodes the TIME_BASE word.
    pub fn to_raw(&self) -> u32 {
        ((self.flags as u32) << 24) | (self.value & 0x00FF_FFFF)
    }
}

impl Default for TimeBase {
    /// The customary 1 MHz time base.
    fn default() -> TimeBase {
        TimeBase {
            flags: 0,
            value: 1_000_000,
        }
    }
}

/// One PMU's section of a Configuration Frame 2.
///
/// The channel counts are derived from the unit lists: PHNMR is the number of
/// phasor units, ANNMR the number of analog units, DGNMR the number of digital
/// units. A well-formed entry carries `phnmr + annmr + 16 * dgnmr` channel
/// names, one per phasor, analog, and digital input bit.
///
/// # Fields
///
/// * `station_name`: 16-byte space-padded station identifier.
/// * `idcode`: Data source identifier of this PMU.
/// * `format`: FORMAT word declaring the number representations.
/// * `channel_names`: 16-byte space-padded channel names.
/// * `phasor_units`: PHUNIT conversion factor per phasor channel.
/// * `analog_units`: ANUNIT conversion factor per analog channel.
/// * `digital_units`: DIGUNIT masks per digital status word.
/// * `nominal_freq`: FNOM nominal line frequency.
/// * `cfg_count`: Configuration change count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub station_name: [u8; 16],
    pub idcode: u16,
    pub format: u16,
    pub channel_names: Vec<[u8; 16]>,
    pub phasor_units: Vec<PhasorUnit>,
    pub analog_units: Vec<AnalogUnit>,
    pub digital_units: Vec<DigitalUnit>,
    pub nominal_freq: NominalFrequency,
    pub cfg_count: u16,
}

impl ConfigEntry {
    /// Number of phasor channels.
    pub fn phnmr(&self) -> u16 {
        self.phasor_units.len() as u16
    }

    /// Number of analog channels.
    pub fn annmr(&self) -> u16 {
        self.analog_units.len() as u16
    }

    /// Number of digital status words.
    pub fn dgnmr(&self) -> u16 {
        self.digital_units.len() as u16
    }

    /// Parses one configuration entry from the start of `bytes`.
    ///
    /// The counts at fixed offsets size the name and unit tables that follow,
    /// so they are read before any count-dependent list.
    ///
    /// # Parameters
    ///
    /// * `bytes`: Buffer starting at the entry's station name.
    ///
    /// # Returns
    ///
    /// * `Ok((ConfigEntry, usize))`: The entry and the number of bytes consumed.
    /// * `Err(FrameError::TruncatedInput)`: A count demanded more bytes than remain.
    pub fn from_hex(bytes: &[u8]) -> Result<(ConfigEntry, usize), FrameError> {
        if bytes.len() < ENTRY_FIXED_SIZE {
            return Err(FrameError::TruncatedInput {
                needed: ENTRY_FIXED_SIZE,
                available: bytes.len(),
            });
        }

        let mut station_name = [0u8; 16];
        station_name.copy_from_slice(&bytes[0..16]);
        let idcode = u16::from_be_bytes([bytes[16], bytes[17]]);
        let format = u16::from_be_bytes([bytes[18], bytes[19]]);
        let phnmr = u16::from_be_bytes([bytes[20], bytes[21]]) as usize;
        let annmr = u16::from_be_bytes([bytes[22], bytes[23]]) as usize;
        let dgnmr = u16::from_be_bytes([bytes[24], bytes[25]]) as usize;

        let name_count = phnmr + annmr + 16 * dgnmr;
        let unit_bytes = 4 * (phnmr + annmr + dgnmr);
        // Counts, name table, unit tables, FNOM, CFGCNT
        let entry_size = ENTRY_FIXED_SIZE + 16 * name_count + unit_bytes + 4;
        if bytes.len() < entry_size {
            return Err(FrameError::TruncatedInput {
                needed: entry_size,
                available: bytes.len(),
            });
        }

        let mut offset = ENTRY_FIXED_SIZE;

        let mut channel_names = Vec::with_capacity(name_count);
        for _ in 0..name_count {
            let mut name = [0u8; 16];
            name.copy_from_slice(&bytes[offset..offset + 16]);
            channel_names.push(name);
            offset += 16;
        }

        let mut phasor_units = Vec::with_capacity(phnmr);
        for _ in 0..phnmr {
            phasor_units.push(PhasorUnit::from_hex(&bytes[offset..])?);
            offset += 4;
        }

        let mut analog_units = Vec::with_capacity(annmr);
        for _ in 0..annmr {
            analog_units.push(AnalogUnit::from_hex(&bytes[offset..])?);
            offset += 4;
        }

        let mut digital_units = Vec::with_capacity(dgnmr);
        for _ in 0..dgnmr {
            digital_units.push(DigitalUnit::from_hex(&bytes[offset..])?);
            offset += 4;
        }

        let nominal_freq =
            NominalFrequency::from_raw(u16::from_be_bytes([bytes[offset], bytes[offset + 1]]));
        let cfg_count = u16::from_be_bytes([bytes[offset + 2], bytes[offset + 3]]);
        offset += 4;

        Ok((
            ConfigEntry {
                station_name,
                idcode,
                format,
                channel_names,
                phasor_units,
                analog_units,
                digital_units,
                nominal_freq,
                cfg_count,
            },
            offset,
        ))
    }

    /// Serializes the entry, writing the channel counts from the unit list
    /// lengths.
    pub fn to_hex(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(
            ENTRY_FIXED_SIZE + 16 * self.channel_names.len() + 4 * self.unit_count() + 4,
        );

        result.extend_from_slice(&self.station_name);
        result.extend_from_slice(&self.idcode.to_be_bytes());
        result.extend_from_slice(&self.format.to_be_bytes());
        result.extend_from_slice(&self.phnmr().to_be_bytes());
        result.extend_from_slice(&self.annmr().to_be_bytes());
        result.extend_from_slice(&self.dgnmr().to_be_bytes());

        for name in &self.channel_names {
            result.extend_from_slice(name);
        }
        for unit in &self.phasor_units {
            result.extend_from_slice(&unit.to_hex());
        }
        for unit in &self.analog_units {
            result.extend_from_slice(&unit.to_hex());
        }
        for unit in &self.digital_units {
            result.extend_from_slice(&unit.to_hex());
        }

        result.extend_from_slice(&self.nominal_freq.to_raw().to_be_bytes());
        result.extend_from_slice(&self.cfg_count.to_be_bytes());
        result
    }

    fn unit_count(&self) -> usize {
        self.phasor_units.len() + self.analog_units.len() + self.digital_units.len()
    }

    /// Phasor representation declared by the FORMAT word.
    pub fn phasor_format(&self) -> PhasorFormat {
        PhasorFormat {
            // FORMAT bit 1: 0 = 16-bit integer phasors, 1 = floating point
            scalar: ScalarFormat::from_float_flag(self.format & 0x0002 != 0),
            // FORMAT bit 0: 0 = rectangular, 1 = polar
            kind: if self.format & 0x0001 != 0 {
                PhasorKind::Polar
            } else {
                PhasorKind::Rectangular
            },
        }
    }

    /// FREQ/DFREQ representation declared by the FORMAT word (bit 3).
    pub fn freq_format(&self) -> ScalarFormat {
        ScalarFormat::from_float_flag(self.format & 0x0008 != 0)
    }

    /// Analog representation declared by the FORMAT word (bit 2).
    pub fn analog_format(&self) -> ScalarFormat {
        ScalarFormat::from_float_flag(self.format & 0x0004 != 0)
    }

    /// Encoded size of one phasor value in bytes.
    pub fn phasor_size(&self) -> usize {
        self.phasor_format().size()
    }

    /// Encoded size of the FREQ and DFREQ values in bytes.
    pub fn freq_dfreq_size(&self) -> usize {
        self.freq_format().size()
    }

    /// Encoded size of one analog value in bytes.
    pub fn analog_size(&self) -> usize {
        self.analog_format().size()
    }

    /// True when phasors are transmitted in polar coordinates.
    pub fn is_phasor_polar(&self) -> bool {
        self.format & 0x0001 != 0
    }

    /// Encoded size of this PMU's section in a data frame.
    pub fn data_size(&self) -> usize {
        2 + self.phasor_size() * self.phasor_units.len()
            + 2 * self.freq_dfreq_size()
            + self.analog_size() * self.analog_units.len()
            + 2 * self.digital_units.len()
    }

    /// Station name with the trailing padding removed.
    pub fn station_label(&self) -> String {
        String::from_utf8_lossy(&self.station_name).trim().to_string()
    }

    /// Channel names with the trailing padding removed, in wire order.
    pub fn channel_labels(&self) -> Vec<String> {
        self.channel_names
            .iter()
            .map(|name| String::from_utf8_lossy(name).trim().to_string())
            .collect()
    }
}

/// A complete Configuration Frame 2.
///
/// # Fields
///
/// * `header`: Common frame prefix.
/// * `time_base`: FRACSEC resolution for the stream.
/// * `entries`: One configuration entry per PMU.
/// * `data_rate`: Signed transmission rate field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFrame2 {
    pub header: FrameHeader,
    pub time_base: TimeBase,
    pub entries: Vec<ConfigEntry>,
    pub data_rate: i16,
}

impl ConfigFrame2 {
    /// Number of PMUs described by this frame.
    pub fn num_pmu(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Parses a complete Configuration Frame 2.
    ///
    /// The envelope is validated first: SYNC word, declared size against the
    /// buffer length, then the checksum trailer. Body bytes are only
    /// interpreted once those checks pass.
    ///
    /// # Parameters
    ///
    /// * `bytes`: A complete frame buffer.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigFrame2)`: The parsed frame.
    /// * `Err(FrameError)`: The envelope is invalid, the frame type is not
    ///   Config-2, or a count field overruns the buffer.
    pub fn from_hex(bytes: &[u8]) -> Result<ConfigFrame2, FrameError> {
        let header = FrameHeader::from_frame(bytes)?;
        header.expect_frame_type(FrameType::Config2)?;

        // TIME_BASE, NUM_PMU, DATA_RATE, and the checksum beyond the prefix
        if bytes.len() < MIN_FRAME_SIZE + 8 {
            return Err(FrameError::TruncatedInput {
                needed: MIN_FRAME_SIZE + 8,
                available: bytes.len(),
            });
        }

        let time_base = TimeBase::from_raw(u32::from_be_bytes([
            bytes[14], bytes[15], bytes[16], bytes[17],
        ]));
        let num_pmu = u16::from_be_bytes([bytes[18], bytes[19]]) as usize;

        let mut offset = PREFIX_SIZE + 6;
        let mut entries = Vec::with_capacity(num_pmu.min(64));
        for _ in 0..num_pmu {
            let (entry, consumed) = ConfigEntry::from_hex(&bytes[offset..])?;
            entries.push(entry);
            offset += consumed;
        }

        if offset + 4 > bytes.len() {
            return Err(FrameError::TruncatedInput {
                needed: offset + 4,
                available: bytes.len(),
            });
        }
        let data_rate = i16::from_be_bytes([bytes[offset], bytes[offset + 1]]);

        Ok(ConfigFrame2 {
            header,
            time_base,
            entries,
            data_rate,
        })
    }

    /// Serializes the frame, then patches the FRAMESIZE field and checksum
    /// trailer in a final pass.
    pub fn to_hex(&self) -> Vec<u8> {
        let mut result = Vec::new();
        result.extend_from_slice(&self.header.to_hex());
        result.extend_from_slice(&self.time_base.to_raw().to_be_bytes());
        result.extend_from_slice(&self.num_pmu().to_be_bytes());
        for entry in &self.entries {
            result.extend_from_slice(&entry.to_hex());
        }
        result.extend_from_slice(&self.data_rate.to_be_bytes());
        result.extend_from_slice(&[0, 0]);

        finalize_frame(&mut result);
        result
    }

    /// Encoded size of a data frame following this configuration.
    pub fn data_frame_size(&self) -> usize {
        MIN_FRAME_SIZE
            + self
                .entries
                .iter()
                .map(|entry| entry.data_size())
                .sum::<usize>()
    }

    /// Transmission rate in frames per second.
    pub fn frames_per_second(&self) -> f32 {
        frames_per_second(self.data_rate)
    }
}
