//! # ARINC 429 Word Codec
//!
//! A Rust library for encoding and decoding 32-bit ARINC 429 data words.
//!
//! ARINC 429 is the avionics data bus standard used between flight-deck systems.
//! Each word carries five fields: an octal label (transmitted LSB first), a
//! 19-bit data field, the Sign/Status Matrix, the Source/Destination Identifier
//! and an odd parity bit. This library provides:
//!
//! - Encoding with eager range validation
//! - Decoding with parity verification
//! - Optional step-by-step traces of both
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```
//! use arinc429_codec::{decode, encode};
//!
//! // Label 010 (octal), data 1000
//! let word = encode(0o010, 1000, 0, 0)?;
//! assert_eq!(word, 0x1000_7D00);
//!
//! let decoded = decode(word);
//! assert_eq!(decoded.label(), 0o010);
//! assert_eq!(decoded.data(), 1000);
//! assert!(decoded.parity_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod core;
pub mod decoded;
pub mod encoding;
pub mod error;
pub mod trace;

pub use crate::core::{
    odd_parity_bit, reverse_label, ArincWord, Data, Fields, Label, LabelRange, Sdi, Ssm,
};
pub use codec::{Codec, CodecBuilder};
pub use decoded::DecodedWord;
pub use error::{CodecError, Field, Result};
pub use trace::{Trace, TraceStep};

/// ARINC 429 word layout constants
pub mod layout {
    /// Word length in bits
    pub const WORD_BITS: u32 = 32;

    /// Bits covered by parity (everything but the parity bit)
    pub const PAYLOAD_BITS: u32 = 31;

    /// Mask of the bits covered by parity
    pub const PAYLOAD_MASK: u32 = 0xFFFF_FFFE;

    /// Label field width
    pub const LABEL_BITS: u32 = 8;

    /// Largest label, 0o377
    pub const LABEL_MAX: u16 = 0o377;

    /// Largest label under the extended range, 0o3777
    pub const LABEL_MAX_EXTENDED: u16 = 0o3777;

    /// Data field width
    pub const DATA_BITS: u32 = 19;

    /// Largest data value, 2^19 - 1
    pub const DATA_MAX: u32 = (1 << DATA_BITS) - 1;

    /// Largest SSM value
    pub const SSM_MAX: u8 = 0b11;

    /// Largest SDI value
    pub const SDI_MAX: u8 = 0b11;
}

/// Encode a word with the default codec
///
/// Fails with [`CodecError::InvalidArgument`] if any field is out of range.
pub fn encode(label: u16, data: u32, ssm: u8, sdi: u8) -> Result<u32> {
    Codec::default().encode(label, data, ssm, sdi)
}

/// Decode a word with the default codec
pub fn decode(word: u32) -> DecodedWord {
    Codec::default().decode(word)
}

/// Decode a word held in a wider signed integer
pub fn decode_wide(word: i64) -> Result<DecodedWord> {
    Codec::default().decode_wide(word)
}
