//! # Random Frame Generation
//!
//! Generators for randomized but internally consistent frames, used to stress
//! the codecs with layouts and number formats the fixed samples never touch.
//! A generated configuration picks its own FORMAT words; the matching data
//! frame generator reads those words back so its values always encode in the
//! layout the configuration promises.

use crate::common::{FracSec, FrameHeader, FrameType, StatWord};
use crate::config::{format_word, ConfigEntry, ConfigFrame2, TimeBase};
use crate::data_frame::{DataFrame, DataFrameEntry};
use crate::phasors::{PhasorFormat, PhasorKind, PhasorValue, ScalarFormat, ScalarValue};
use crate::units::{AnalogUnit, DigitalUnit, NominalFrequency, PhasorUnit};
use crate::utils::now_to_soc_fracsec;
use rand::Rng;

/// Number of PMUs generated when the caller does not choose one.
pub const DEFAULT_NUM_PMUS: usize = 10;

/// Typical voltage channel conversion factor, in 1e-5 V per count.
const VOLTAGE_SCALE: u32 = 915_527;

/// Typical current channel conversion factor, in 1e-5 A per count.
const CURRENT_SCALE: u32 = 45_776;

fn padded_name(label: &str) -> [u8; 16] {
    let mut name = [b' '; 16];
    let len = label.len().min(16);
    name[..len].copy_from_slice(&label.as_bytes()[..len]);
    name
}

/// Generates a configuration entry with four phasors, three analogs, and one
/// digital word.
///
/// # Parameters
///
/// * `idcode`: Data source identifier for the entry.
/// * `polar`: Phasor coordinate selection, or `None` to pick at random.
pub fn random_config_entry(idcode: u16, polar: Option<bool>) -> ConfigEntry {
    let mut rng = rand::rng();

    let phasor_format = PhasorFormat {
        scalar: ScalarFormat::from_float_flag(rng.random::<bool>()),
        kind: if polar.unwrap_or_else(|| rng.random::<bool>()) {
            PhasorKind::Polar
        } else {
            PhasorKind::Rectangular
        },
    };
    let analog_format = ScalarFormat::from_float_flag(rng.random::<bool>());
    let freq_format = ScalarFormat::from_float_flag(rng.random::<bool>());

    let mut channel_names = Vec::with_capacity(23);
    for index in 0..4 {
        channel_names.push(padded_name(&format!("PH_{:02}", index)));
    }
    for index in 0..3 {
        channel_names.push(padded_name(&format!("AN_{:02}", index)));
    }
    for index in 0..16 {
        channel_names.push(padded_name(&format!("DG_{:02}", index)));
    }

    let mut phasor_units = vec![
        PhasorUnit {
            kind: 0,
            scale_factor: VOLTAGE_SCALE,
        };
        3
    ];
    phasor_units.push(PhasorUnit {
        kind: 1,
        scale_factor: CURRENT_SCALE,
    });

    ConfigEntry {
        station_name: padded_name(&format!("STATION{:02}", idcode % 100)),
        idcode,
        format: format_word(phasor_format, analog_format, freq_format),
        channel_names,
        phasor_units,
        analog_units: (0..3)
            .map(|kind| AnalogUnit {
                kind,
                scale_factor: 1,
            })
            .collect(),
        digital_units: vec![DigitalUnit {
            normal_status: 0x0000,
            valid_inputs: 0xFFFF,
        }],
        nominal_freq: if rng.random::<bool>() {
            NominalFrequency::Hz50
        } else {
            NominalFrequency::Hz60
        },
        cfg_count: rng.random_range(0..100),
    }
}

/// Generates a Configuration Frame 2 stamped with the current time.
///
/// # Parameters
///
/// * `num_pmus`: Number of PMU entries, or `None` for [`DEFAULT_NUM_PMUS`].
/// * `polar`: Phasor coordinate selection for every entry, or `None` to pick
///   at random per entry.
pub fn random_config_frame(num_pmus: Option<usize>, polar: Option<bool>) -> ConfigFrame2 {
    let mut rng = rand::rng();
    let num_pmus = num_pmus.unwrap_or(DEFAULT_NUM_PMUS);
    let base_idcode: u16 = rng.random_range(1..1000);

    let (soc, fracsec) = now_to_soc_fracsec(1_000_000);
    ConfigFrame2 {
        header: FrameHeader::new(
            FrameType::Config2,
            base_idcode,
            soc,
            FracSec::from_raw(fracsec),
        ),
        time_base: TimeBase::default(),
        entries: (0..num_pmus)
            .map(|index| random_config_entry(base_idcode + index as u16, polar))
            .collect(),
        data_rate: 30,
    }
}

fn random_scalar(format: ScalarFormat, rng: &mut impl Rng) -> ScalarValue {
    match format {
        ScalarFormat::Int16 => ScalarValue::Int16(rng.random_range(-5000..5000)),
        ScalarFormat::Float32 => ScalarValue::Float32(rng.random_range(-5000.0..5000.0)),
    }
}

fn random_phasor(format: PhasorFormat, rng: &mut impl Rng) -> PhasorValue {
    match (format.scalar, format.kind) {
        (ScalarFormat::Float32, _) => PhasorValue::Float32(
            rng.random_range(-15000.0..15000.0),
            rng.random_range(-15000.0..15000.0),
        ),
        (ScalarFormat::Int16, PhasorKind::Rectangular) => PhasorValue::Rectangular16 {
            real: rng.random_range(-15000..15000),
            imag: rng.random_range(-15000..15000),
        },
        (ScalarFormat::Int16, PhasorKind::Polar) => PhasorValue::Polar16 {
            magnitude: rng.random_range(0..15000),
            // Angle in 1e-4 radians, spanning -pi to pi
            angle: rng.random_range(-31_416..31_416),
        },
    }
}

/// Generates a data frame laid out by `config`, stamped with the current
/// time.
///
/// Every PMU section draws its formats and channel counts from the matching
/// configuration entry, so the result always decodes against `config`.
pub fn random_data_frame(config: &ConfigFrame2) -> DataFrame {
    let mut rng = rand::rng();

    let (soc, fracsec) = now_to_soc_fracsec(config.time_base.value);
    let entries = config
        .entries
        .iter()
        .map(|entry_config| {
            let phasor_format = entry_config.phasor_format();
            let freq_format = entry_config.freq_format();
            let analog_format = entry_config.analog_format();

            DataFrameEntry {
                stat: StatWord::default(),
                phasors: (0..entry_config.phasor_units.len())
                    .map(|_| random_phasor(phasor_format, &mut rng))
                    .collect(),
                freq: random_scalar(freq_format, &mut rng),
                dfreq: random_scalar(freq_format, &mut rng),
                analogs: (0..entry_config.analog_units.len())
                    .map(|_| random_scalar(analog_format, &mut rng))
                    .collect(),
                digitals: (0..entry_config.digital_units.len())
                    .map(|_| rng.random::<u16>())
                    .collect(),
            }
        })
        .collect();

    DataFrame {
        header: FrameHeader::new(
            FrameType::Data,
            config.header.idcode,
            soc,
            FracSec::from_raw(fracsec),
        ),
        entries,
    }
}
