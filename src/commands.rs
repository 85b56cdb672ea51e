//! # Command Frame Codec
//!
//! This module parses and constructs command frames, the frames a consumer
//! sends back toward the data source to start and stop transmission or to
//! request configuration and header frames. The command word sits directly
//! after the common prefix; an optional extension blob for user-defined
//! commands fills the rest of the body.
//!
//! ## Key Components
//!
//! - `CommandType`: The standard command codes and their meanings.
//! - `CommandFrame`: The complete frame with typed constructors for each
//!   standard command.
//!
//! ## Usage
//!
//! The `new_*` constructors build ready-to-send frames. Passing `None` for
//! the time stamps the frame with the current system time at microsecond
//! resolution.

use crate::common::{FracSec, FrameError, FrameHeader, FrameType, MIN_FRAME_SIZE};
use crate::utils::{finalize_frame, now_to_soc_fracsec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard command codes.
///
/// # Variants
///
/// Codes 1 through 6 and 8 are assigned by the standard; the remaining code
/// points are reserved or user-defined and carry no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandType {
    TurnOffTransmission = 1,
    TurnOnTransmission = 2,
    SendHeaderFrame = 3,
    SendConfigFrame1 = 4,
    SendConfigFrame2 = 5,
    SendConfigFrame3 = 6,
    ExtendedFrame = 8,
}

impl TryFrom<u16> for CommandType {
    type Error = ();

    fn try_from(value: u16) -> Result<CommandType, ()> {
        match value {
            1 => Ok(CommandType::TurnOffTransmission),
            2 => Ok(CommandType::TurnOnTransmission),
            3 => Ok(CommandType::SendHeaderFrame),
            4 => Ok(CommandType::SendConfigFrame1),
            5 => Ok(CommandType::SendConfigFrame2),
            6 => Ok(CommandType::SendConfigFrame3),
            8 => Ok(CommandType::ExtendedFrame),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CommandType::TurnOffTransmission => "Turn off transmission of data frames",
            CommandType::TurnOnTransmission => "Turn on transmission of data frames",
            CommandType::SendHeaderFrame => "Send HDR frame",
            CommandType::SendConfigFrame1 => "Send CFG-1 frame",
            CommandType::SendConfigFrame2 => "Send CFG-2 frame",
            CommandType::SendConfigFrame3 => "Send CFG-3 frame",
            CommandType::ExtendedFrame => "Extended frame",
        };
        write!(f, "{}", label)
    }
}

/// A complete command frame.
///
/// # Fields
///
/// * `header`: Common frame prefix. The IDCODE addresses the device the
///   command is for.
/// * `command`: The CMD word.
/// * `extension`: Extended frame data, empty when the command carries none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandFrame {
    pub header: FrameHeader,
    pub command: u16,
    pub extension: Vec<u8>,
}

impl CommandFrame {
    fn new_command(command: u16, idcode: u16, time: Option<(u32, u32)>) -> CommandFrame {
        let (soc, fracsec_raw) = match time {
            Some(time) => time,
            None => now_to_soc_fracsec(1_000_000),
        };
        CommandFrame {
            header: FrameHeader::new(
                FrameType::Command,
                idcode,
                soc,
                FracSec::from_raw(fracsec_raw),
            ),
            command,
            extension: Vec::new(),
        }
    }

    /// Builds a command to stop data frame transmission.
    ///
    /// # Parameters
    ///
    /// * `idcode`: Device the command addresses.
    /// * `time`: SOC and raw FRACSEC word, or `None` for the current time.
    pub fn new_turn_off_transmission(idcode: u16, time: Option<(u32, u32)>) -> CommandFrame {
        CommandFrame::new_command(CommandType::TurnOffTransmission as u16, idcode, time)
    }

    /// Builds a command to start data frame transmission.
    pub fn new_turn_on_transmission(idcode: u16, time: Option<(u32, u32)>) -> CommandFrame {
        CommandFrame::new_command(CommandType::TurnOnTransmission as u16, idcode, time)
    }

    /// Builds a command requesting the header frame.
    pub fn new_send_header_frame(idcode: u16, time: Option<(u32, u32)>) -> CommandFrame {
        CommandFrame::new_command(CommandType::SendHeaderFrame as u16, idcode, time)
    }

    /// Builds a command requesting Configuration Frame 1.
    pub fn new_send_config_frame1(idcode: u16, time: Option<(u32, u32)>) -> CommandFrame {
        CommandFrame::new_command(CommandType::SendConfigFrame1 as u16, idcode, time)
    }

    /// Builds a command requesting Configuration Frame 2.
    pub fn new_send_config_frame2(idcode: u16, time: Option<(u32, u32)>) -> CommandFrame {
        CommandFrame::new_command(CommandType::SendConfigFrame2 as u16, idcode, time)
    }

    /// Builds a command requesting Configuration Frame 3.
    pub fn new_send_config_frame3(idcode: u16, time: Option<(u32, u32)>) -> CommandFrame {
        CommandFrame::new_command(CommandType::SendConfigFrame3 as u16, idcode, time)
    }

    /// Builds an extended frame command carrying user-defined data.
    pub fn new_extended_command(
        idcode: u16,
        extension: Vec<u8>,
        time: Option<(u32, u32)>,
    ) -> CommandFrame {
        let mut frame = CommandFrame::new_command(CommandType::ExtendedFrame as u16, idcode, time);
        frame.extension = extension;
        frame
    }

    /// Parses a complete command frame.
    ///
    /// The envelope is validated first: SYNC word, declared size against the
    /// buffer length, then the checksum trailer. Everything between the CMD
    /// word and the checksum is kept as the extension.
    ///
    /// # Parameters
    ///
    /// * `bytes`: A complete frame buffer.
    ///
    /// # Returns
    ///
    /// * `Ok(CommandFrame)`: The parsed frame.
    /// * `Err(FrameError)`: The envelope is invalid, the frame type is not
    ///   Command, or the body is too short for the CMD word.
    pub fn from_hex(bytes: &[u8]) -> Result<CommandFrame, FrameError> {
        let header = FrameHeader::from_frame(bytes)?;
        header.expect_frame_type(FrameType::Command)?;

        if bytes.len() < MIN_FRAME_SIZE + 2 {
            return Err(FrameError::TruncatedInput {
                needed: MIN_FRAME_SIZE + 2,
                available: bytes.len(),
            });
        }
        let command = u16::from_be_bytes([bytes[14], bytes[15]]);
        let extension = bytes[16..bytes.len() - 2].to_vec();

        Ok(CommandFrame {
            header,
            command,
            extension,
        })
    }

    /// Serializes the frame, then patches the FRAMESIZE field and checksum
    /// trailer in a final pass.
    pub fn to_hex(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(MIN_FRAME_SIZE + 2 + self.extension.len());
        result.extend_from_slice(&self.header.to_hex());
        result.extend_from_slice(&self.command.to_be_bytes());
        result.extend_from_slice(&self.extension);
        result.extend_from_slice(&[0, 0]);

        finalize_frame(&mut result);
        result
    }

    /// The CMD word as a standard command, if it maps to one.
    pub fn command_type(&self) -> Option<CommandType> {
        CommandType::try_from(self.command).ok()
    }

    /// Human-readable meaning of the CMD word, covering the reserved and
    /// user-defined ranges.
    pub fn command_label(&self) -> &'static str {
        match self.command {
            1 => "Turn off transmission of data frames",
            2 => "Turn on transmission of data frames",
            3 => "Send HDR frame",
            4 => "Send CFG-1 frame",
            5 => "Send CFG-2 frame",
            6 => "Send CFG-3 frame",
            8 => "Extended frame",
            266..=4095 => "User defined",
            _ => "Reserved",
        }
    }
}

impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (command {}, idcode {})",
            self.command_label(),
            self.command,
            self.header.idcode
        )
    }
}
