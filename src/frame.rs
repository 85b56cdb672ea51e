//! # Frame Dispatch
//!
//! This module ties the per-type codecs together behind a single enum.
//! `Frame::decode` validates the envelope once, reads the frame type from the
//! SYNC word, and hands the buffer to the matching codec; `Frame::encode`
//! serializes whichever variant is held. Configuration Frames 1 and 3 are
//! recognized but not decoded, and data frames cannot be interpreted without
//! a configuration, so both conditions surface as typed errors rather than
//! panics or silent misreads.

use crate::commands::CommandFrame;
use crate::common::{FrameError, FrameHeader, FrameType};
use crate::config::ConfigFrame2;
use crate::data_frame::DataFrame;
use crate::header::HeaderFrame;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Any frame this crate can fully decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Frame {
    Config2(ConfigFrame2),
    Data(DataFrame),
    Command(CommandFrame),
    Header(HeaderFrame),
}

impl Frame {
    /// Decodes any supported frame from a complete buffer.
    ///
    /// The envelope is validated before the frame type is acted on, so a
    /// corrupted buffer reports its corruption even when the type code says
    /// the frame would be unsupported.
    ///
    /// # Parameters
    ///
    /// * `bytes`: A complete frame buffer.
    /// * `config`: The stream's Configuration Frame 2, required to decode
    ///   data frames and ignored for every other type.
    ///
    /// # Returns
    ///
    /// * `Ok(Frame)`: The decoded frame.
    /// * `Err(FrameError::MissingConfig)`: The buffer holds a data frame and
    ///   `config` is `None`.
    /// * `Err(FrameError::UnsupportedVariant)`: Configuration Frame 1 or 3.
    /// * `Err(FrameError)`: The envelope or body is invalid.
    pub fn decode(bytes: &[u8], config: Option<&ConfigFrame2>) -> Result<Frame, FrameError> {
        let header = match FrameHeader::from_frame(bytes) {
            Ok(header) => header,
            Err(error) => {
                warn!("rejecting a {}-byte buffer: {}", bytes.len(), error);
                return Err(error);
            }
        };

        let frame = match header.sync.frame_type {
            FrameType::Data => {
                let config = config.ok_or(FrameError::MissingConfig)?;
                Frame::Data(DataFrame::from_hex(bytes, config)?)
            }
            FrameType::Config2 => Frame::Config2(ConfigFrame2::from_hex(bytes)?),
            FrameType::Command => Frame::Command(CommandFrame::from_hex(bytes)?),
            FrameType::Header => Frame::Header(HeaderFrame::from_hex(bytes)?),
            FrameType::Config1 | FrameType::Config3 => {
                warn!(
                    "received a {} from idcode {}, which this decoder does not support",
                    header.sync.frame_type, header.idcode
                );
                return Err(FrameError::UnsupportedVariant {
                    frame_type: header.sync.frame_type,
                });
            }
        };

        debug!(
            "decoded a {} from idcode {} ({} bytes)",
            frame.frame_type(),
            frame.header().idcode,
            bytes.len()
        );
        Ok(frame)
    }

    /// Serializes the held frame, including the patched FRAMESIZE field and
    /// checksum trailer.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Frame::Config2(frame) => frame.to_hex(),
            Frame::Data(frame) => frame.to_hex(),
            Frame::Command(frame) => frame.to_hex(),
            Frame::Header(frame) => frame.to_hex(),
        }
    }

    /// Type of the held frame.
    pub fn frame_type(&self) -> FrameType {
        self.header().sync.frame_type
    }

    /// Common prefix of the held frame.
    pub fn header(&self) -> &FrameHeader {
        match self {
            Frame::Config2(frame) => &frame.header,
            Frame::Data(frame) => &frame.header,
            Frame::Command(frame) => &frame.header,
            Frame::Header(frame) => &frame.header,
        }
    }
}
