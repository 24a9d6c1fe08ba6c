//! Decoded ARINC 429 word

use crate::core::{reverse_label, Fields};

/// Fields read back from an ARINC 429 word
///
/// Only the decoder creates these. A word with bad parity still decodes;
/// the mismatch shows up as `parity_valid() == false`. Serializable but not
/// deserializable, so every instance holds fields that fit their widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedWord {
    label: u16,
    data: u32,
    ssm: u8,
    sdi: u8,
    parity: u8,
    parity_valid: bool,
}

impl DecodedWord {
    pub(crate) fn new(
        label: u8,
        data: u32,
        ssm: u8,
        sdi: u8,
        parity: u8,
        parity_valid: bool,
    ) -> Self {
        DecodedWord {
            label: label.into(),
            data,
            ssm,
            sdi,
            parity,
            parity_valid,
        }
    }

    /// Label in normal bit order
    pub fn label(&self) -> u16 {
        self.label
    }

    /// 19-bit data field
    pub fn data(&self) -> u32 {
        self.data
    }

    /// Sign/Status Matrix
    pub fn ssm(&self) -> u8 {
        self.ssm
    }

    /// Source/Destination Identifier
    pub fn sdi(&self) -> u8 {
        self.sdi
    }

    /// Received parity bit
    pub fn parity(&self) -> u8 {
        self.parity
    }

    /// Whether the received parity matches odd parity over the first 31 bits
    pub fn parity_valid(&self) -> bool {
        self.parity_valid
    }

    /// The four payload fields, comparable with encoder input
    pub fn fields(&self) -> Fields {
        Fields {
            label: self.label,
            data: self.data,
            ssm: self.ssm,
            sdi: self.sdi,
        }
    }

    /// Re-compose the received word, parity bit included as received
    pub fn word(&self) -> u32 {
        (u32::from(reverse_label(self.label as u8)) << 24)
            | (self.data << 5)
            | (u32::from(self.ssm) << 3)
            | (u32::from(self.sdi) << 1)
            | u32::from(self.parity)
    }
}

impl std::fmt::Display for DecodedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "label={:03o} data={} ssm={} sdi={} parity={} ({})",
            self.label,
            self.data,
            self.ssm,
            self.sdi,
            self.parity,
            if self.parity_valid { "valid" } else { "invalid" }
        )
    }
}
