//! # Header Frame Codec
//!
//! Header frames carry free-form descriptive text from the data source, sent
//! in response to a "Send HDR frame" command. The body is an opaque byte
//! string between the common prefix and the checksum trailer; the standard
//! puts no structure on it beyond that.

use crate::common::{FracSec, FrameError, FrameHeader, FrameType};
use crate::utils::finalize_frame;
use serde::{Deserialize, Serialize};

/// A complete header frame.
///
/// # Fields
///
/// * `header`: Common frame prefix.
/// * `data`: The descriptive text bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderFrame {
    pub header: FrameHeader,
    pub data: Vec<u8>,
}

impl HeaderFrame {
    /// Builds a header frame around the given text.
    ///
    /// # Parameters
    ///
    /// * `idcode`: Data source identifier.
    /// * `data`: Descriptive text bytes.
    /// * `soc`: Second-of-century timestamp.
    /// * `fracsec`: Raw FRACSEC word.
    pub fn new(idcode: u16, data: Vec<u8>, soc: u32, fracsec: u32) -> HeaderFrame {
        HeaderFrame {
            header: FrameHeader::new(FrameType::Header, idcode, soc, FracSec::from_raw(fracsec)),
            data,
        }
    }

    /// Parses a complete header frame.
    ///
    /// The envelope is validated first: SYNC word, declared size against the
    /// buffer length, then the checksum trailer. Everything between the
    /// prefix and the checksum is kept as the body.
    pub fn from_hex(bytes: &[u8]) -> Result<HeaderFrame, FrameError> {
        let header = FrameHeader::from_frame(bytes)?;
        header.expect_frame_type(FrameType::Header)?;

        let data = bytes[14..bytes.len() - 2].to_vec();
        Ok(HeaderFrame { header, data })
    }

    /// Serializes the frame, then patches the FRAMESIZE field and checksum
    /// trailer in a final pass.
    pub fn to_hex(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(16 + self.data.len());
        result.extend_from_slice(&self.header.to_hex());
        result.extend_from_slice(&self.data);
        result.extend_from_slice(&[0, 0]);

        finalize_frame(&mut result);
        result
    }

    /// Body bytes as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use crate::utils::validate_checksum;

    #[test]
    fn test_sample_header_frame() {
        let frame = samples::header_frame();
        let bytes = frame.to_hex();

        assert_eq!(bytes.len(), 19);
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]), 19);
        assert_eq!(&bytes[14..17], b"HI!");
        assert!(validate_checksum(&bytes).is_ok());

        let decoded = HeaderFrame::from_hex(&bytes).unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(decoded.text(), "HI!");
    }

    #[test]
    fn test_empty_body() {
        let frame = HeaderFrame::new(7734, Vec::new(), 1_149_577_200, 0x0007_1098);
        let bytes = frame.to_hex();
        assert_eq!(bytes.len(), 16);

        let decoded = HeaderFrame::from_hex(&bytes).unwrap();
        assert!(decoded.data.is_empty());
        assert_eq!(decoded.text(), "");
    }

    #[test]
    fn test_longer_body_roundtrip() {
        let text = b"PMU station metadata, firmware 2.4.1, contact ops@example.org".to_vec();
        let frame = HeaderFrame::new(7734, text.clone(), 1_149_577_200, 0x0007_1098);

        let decoded = HeaderFrame::from_hex(&frame.to_hex()).unwrap();
        assert_eq!(decoded.data, text);
        assert_eq!(decoded.header.idcode, 7734);
    }

    #[test]
    fn test_header_frame_rejects_other_frame_types() {
        let command_bytes = samples::command_frame().to_hex();
        let err = HeaderFrame::from_hex(&command_bytes).unwrap_err();
        assert_eq!(
            err,
            FrameError::UnexpectedFrameType {
                expected: FrameType::Header,
                actual: FrameType::Command,
            }
        );
    }
}
