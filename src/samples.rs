//! # Sample Frames
//!
//! Builders for the worked example stream that accompanies the standard: one
//! PMU named "Station A" with four phasors, three analogs, and one digital
//! word, transmitting at 30 frames per second. The frames here encode to the
//! exact byte sequences of that example, which makes them useful as golden
//! fixtures in tests and as a quick way to produce valid traffic against a
//! real device.

use crate::commands::CommandFrame;
use crate::common::{FracSec, FrameHeader, FrameType, StatWord};
use crate::config::{ConfigEntry, ConfigFrame2, TimeBase};
use crate::data_frame::{DataFrame, DataFrameEntry};
use crate::header::HeaderFrame;
use crate::phasors::{PhasorValue, ScalarValue};
use crate::units::{AnalogUnit, DigitalUnit, NominalFrequency, PhasorUnit};

/// IDCODE shared by every sample frame.
pub const SAMPLE_IDCODE: u16 = 7734;

/// Space-pads a label to the 16-byte name format.
fn padded_name(label: &str) -> [u8; 16] {
    let mut name = [b' '; 16];
    name[..label.len()].copy_from_slice(label.as_bytes());
    name
}

/// The sample PMU's configuration entry.
///
/// FORMAT word 4: floating point analogs, 16-bit rectangular phasors, 16-bit
/// FREQ/DFREQ. Three voltage phasors and one current phasor, each with the
/// conversion factor that makes the sample data frame come out at nominal
/// line values.
pub fn config_entry() -> ConfigEntry {
    let mut channel_names = vec![
        padded_name("VA"),
        padded_name("VB"),
        padded_name("VC"),
        padded_name("I1"),
        padded_name("ANALOG1"),
        padded_name("ANALOG2"),
        padded_name("ANALOG3"),
    ];
    for digit in [
        "1", "2", "3", "4", "5", "6", "7", "8", "9", "A", "B", "C", "D", "E", "F", "G",
    ] {
        channel_names.push(padded_name(&format!("BREAKER {} STATUS", digit)));
    }

    ConfigEntry {
        station_name: padded_name("Station A"),
        idcode: SAMPLE_IDCODE,
        format: 4,
        channel_names,
        phasor_units: vec![
            PhasorUnit {
                kind: 0,
                scale_factor: 915_527,
            },
            PhasorUnit {
                kind: 0,
                scale_factor: 915_527,
            },
            PhasorUnit {
                kind: 0,
                scale_factor: 915_527,
            },
            PhasorUnit {
                kind: 1,
                scale_factor: 45_776,
            },
        ],
        analog_units: vec![
            AnalogUnit {
                kind: 0,
                scale_factor: 1,
            },
            AnalogUnit {
                kind: 1,
                scale_factor: 1,
            },
            AnalogUnit {
                kind: 2,
                scale_factor: 1,
            },
        ],
        digital_units: vec![DigitalUnit {
            normal_status: 0x0000,
            valid_inputs: 0xFFFF,
        }],
        nominal_freq: NominalFrequency::Hz60,
        cfg_count: 22,
    }
}

/// The sample Configuration Frame 2: one PMU, microsecond time base, 30
/// frames per second. Encodes to 454 bytes.
pub fn config_frame() -> ConfigFrame2 {
    ConfigFrame2 {
        header: FrameHeader::new(
            FrameType::Config2,
            SAMPLE_IDCODE,
            1_149_577_200,
            FracSec::from_raw(0x5607_1098),
        ),
        time_base: TimeBase {
            flags: 0,
            value: 1_000_000,
        },
        entries: vec![config_entry()],
        data_rate: 30,
    }
}

/// The sample data frame: balanced three-phase voltages at 133.99 kV, one
/// 499.9 A current, nominal 60 Hz frequency. Encodes to 52 bytes.
pub fn data_frame() -> DataFrame {
    DataFrame {
        header: FrameHeader::new(
            FrameType::Data,
            SAMPLE_IDCODE,
            1_149_580_800,
            FracSec::from_raw(0x0000_41B1),
        ),
        entries: vec![DataFrameEntry {
            stat: StatWord::default(),
            phasors: vec![
                PhasorValue::Rectangular16 {
                    real: 14635,
                    imag: 0,
                },
                PhasorValue::Rectangular16 {
                    real: -7318,
                    imag: -12676,
                },
                PhasorValue::Rectangular16 {
                    real: -7318,
                    imag: 12675,
                },
                PhasorValue::Rectangular16 { real: 1092, imag: 0 },
            ],
            freq: ScalarValue::Int16(2500),
            dfreq: ScalarValue::Int16(0),
            analogs: vec![
                ScalarValue::Float32(100.0),
                ScalarValue::Float32(1000.0),
                ScalarValue::Float32(10000.0),
            ],
            digitals: vec![0b0011_1100_0001_0010],
        }],
    }
}

/// The sample command frame: turn on transmission, addressed to the sample
/// PMU. Encodes to 18 bytes.
pub fn command_frame() -> CommandFrame {
    CommandFrame::new_turn_on_transmission(SAMPLE_IDCODE, Some((1_149_591_600, 0x0F0B_BFD0)))
}

/// The sample header frame carrying the text "HI!". Encodes to 19 bytes.
pub fn header_frame() -> HeaderFrame {
    HeaderFrame::new(SAMPLE_IDCODE, b"HI!".to_vec(), 1_149_577_200, 0x0007_1098)
}
