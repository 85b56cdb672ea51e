//! # synchroframe
//!
//! Encoder and decoder for IEEE C37.118.2-2011 synchrophasor frames: the
//! measurement, configuration, command, and header messages exchanged between
//! PMUs, PDCs, and the tools that monitor them. The crate works on complete
//! frame buffers and stays out of transport concerns; feed it the bytes of
//! one frame and it hands back typed structures, or the reverse.
//!
//! ## Key Components
//!
//! - `frame`: The `Frame` enum and type-dispatched decoding.
//! - `config`: Configuration Frame 2, the layout contract for a stream.
//! - `data_frame`: Measurement frames, decoded against a configuration.
//! - `commands`, `header`: Command and header frame codecs.
//! - `common`: The shared 14-byte prefix, SYNC word, and STAT word.
//! - `phasors`, `units`: Value representations and conversion factors.
//! - `samples`, `random`: Fixed and randomized frame builders.
//!
//! ## Usage
//!
//! ```
//! use synchroframe::frame::Frame;
//! use synchroframe::samples;
//!
//! let config = samples::config_frame();
//! let bytes = samples::data_frame().to_hex();
//!
//! let decoded = Frame::decode(&bytes, Some(&config))?;
//! assert_eq!(decoded.header().idcode, 7734);
//! # Ok::<(), synchroframe::common::FrameError>(())
//! ```

pub mod commands;
pub mod common;
pub mod config;
pub mod data_frame;
pub mod frame;
pub mod header;
pub mod phasors;
pub mod random;
pub mod samples;
pub mod units;
pub mod utils;

/// TCP port assigned to this protocol.
pub const TCP_PORT: u16 = 4712;

/// UDP port assigned to this protocol.
pub const UDP_PORT: u16 = 4713;

#[cfg(test)]
mod tests;
