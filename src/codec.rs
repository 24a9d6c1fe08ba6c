//! High-level ARINC 429 encoder/decoder

use crate::core::{ArincWord, Data, Fields, Label, LabelRange, Sdi, Ssm};
use crate::decoded::DecodedWord;
use crate::encoding::{WordDecoder, WordEncoder};
use crate::error::{check_range, Field, Result};
use crate::layout;
use crate::trace::{Trace, TraceStep};
use tracing::debug;

/// ARINC 429 word codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    /// Labels accepted by the encoder
    pub label_range: LabelRange,
}

impl Codec {
    /// Create a codec with the given label range
    pub fn new(label_range: LabelRange) -> Self {
        Codec { label_range }
    }

    /// Encode a word
    ///
    /// All four inputs are checked before any bit is placed, in the order
    /// label, data, SSM, SDI.
    pub fn encode(&self, label: u16, data: u32, ssm: u8, sdi: u8) -> Result<u32> {
        let (label, data, ssm, sdi) = self.validate(&Fields {
            label,
            data,
            ssm,
            sdi,
        })?;
        Ok(WordEncoder::compose(label, data, ssm, sdi).raw())
    }

    /// Encode a word from a [`Fields`] record
    pub fn encode_fields(&self, fields: &Fields) -> Result<u32> {
        self.encode(fields.label, fields.data, fields.ssm, fields.sdi)
    }

    /// Encode a word from signed inputs
    ///
    /// Negative values fail like any other out-of-range value.
    pub fn encode_signed(&self, label: i64, data: i64, ssm: i64, sdi: i64) -> Result<u32> {
        check_range(Field::Label, label, self.label_range.max().into())?;
        check_range(Field::Data, data, layout::DATA_MAX.into())?;
        check_range(Field::Ssm, ssm, layout::SSM_MAX.into())?;
        check_range(Field::Sdi, sdi, layout::SDI_MAX.into())?;
        self.encode(label as u16, data as u32, ssm as u8, sdi as u8)
    }

    /// Encode a word, recording every intermediate step
    pub fn encode_traced(&self, fields: &Fields) -> Result<(u32, Trace)> {
        let (label, data, ssm, sdi) = self.validate(fields)?;

        let mut trace = Trace::new();
        trace.record(TraceStep::Inputs {
            label: fields.label,
            data: fields.data,
            ssm: fields.ssm,
            sdi: fields.sdi,
        });
        let word = WordEncoder::compose_with(label, data, ssm, sdi, |step| trace.record(step));

        debug!("encoded label {} data {} as {:#010x}", label, fields.data, word.raw());
        Ok((word.raw(), trace))
    }

    /// Decode a word
    pub fn decode(&self, word: u32) -> DecodedWord {
        WordDecoder::extract(ArincWord::new(word))
    }

    /// Decode a word held in a wider signed integer
    ///
    /// Values outside [0, 2^32 - 1] are rejected before any field is read.
    pub fn decode_wide(&self, word: i64) -> Result<DecodedWord> {
        let word = ArincWord::try_from(word)?;
        Ok(WordDecoder::extract(word))
    }

    /// Decode a word, recording every intermediate step
    pub fn decode_traced(&self, word: u32) -> (DecodedWord, Trace) {
        let mut trace = Trace::new();
        let decoded = WordDecoder::extract_with(ArincWord::new(word), |step| trace.record(step));

        debug!("decoded {:#010x}: {}", word, decoded);
        (decoded, trace)
    }

    fn validate(&self, fields: &Fields) -> Result<(Label, Data, Ssm, Sdi)> {
        Ok((
            Label::with_range(fields.label, self.label_range)?,
            Data::new(fields.data)?,
            Ssm::new(fields.ssm)?,
            Sdi::new(fields.sdi)?,
        ))
    }
}

/// Builder for configuring a [`Codec`]
pub struct CodecBuilder {
    label_range: LabelRange,
}

impl CodecBuilder {
    /// Create a new codec builder
    pub fn new() -> Self {
        CodecBuilder {
            label_range: LabelRange::Standard,
        }
    }

    /// Set the accepted label range
    pub fn with_label_range(mut self, label_range: LabelRange) -> Self {
        self.label_range = label_range;
        self
    }

    /// Build the codec
    pub fn build(self) -> Codec {
        Codec::new(self.label_range)
    }
}

impl Default for CodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}
