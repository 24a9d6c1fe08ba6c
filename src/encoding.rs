//! Bit-level composition and extraction of ARINC 429 words

use crate::core::{odd_parity_bit, ArincWord, Data, Label, Sdi, Ssm};
use crate::decoded::DecodedWord;
use crate::trace::TraceStep;

/// ARINC 429 word encoder
pub struct WordEncoder;

impl WordEncoder {
    /// Compose a word from validated fields
    ///
    /// Label (reversed), data, SSM and SDI fill the first 31 bits; the
    /// last bit is odd parity over them.
    pub fn compose(label: Label, data: Data, ssm: Ssm, sdi: Sdi) -> ArincWord {
        Self::compose_with(label, data, ssm, sdi, |_| {})
    }

    /// Compose a word, reporting each intermediate step to `observe`
    pub fn compose_with(
        label: Label,
        data: Data,
        ssm: Ssm,
        sdi: Sdi,
        mut observe: impl FnMut(TraceStep),
    ) -> ArincWord {
        let mut word = ArincWord::default();

        let transmitted = label.transmitted();
        observe(TraceStep::LabelReversed {
            label: label.value(),
            transmitted,
        });

        word.set_label_transmitted(transmitted);
        word.set_data(data.value());
        word.set_ssm(ssm.value());
        word.set_sdi(sdi.value());
        observe(TraceStep::FieldsCombined {
            payload: word.payload(),
        });

        let parity = odd_parity_bit(word.raw());
        observe(TraceStep::ParityComputed {
            ones: word.payload_ones(),
            parity,
        });

        word.set_parity(parity == 1);
        observe(TraceStep::WordComposed { word: word.raw() });

        word
    }
}

/// ARINC 429 word decoder
pub struct WordDecoder;

impl WordDecoder {
    /// Split a word into its fields and check parity
    ///
    /// A parity mismatch is reported through `parity_valid`, never as an error.
    pub fn extract(word: ArincWord) -> DecodedWord {
        Self::extract_with(word, |_| {})
    }

    /// Split a word, reporting each intermediate step to `observe`
    pub fn extract_with(word: ArincWord, mut observe: impl FnMut(TraceStep)) -> DecodedWord {
        observe(TraceStep::WordReceived { word: word.raw() });

        let label = word.label();
        let parity = u8::from(word.parity());
        observe(TraceStep::FieldsExtracted {
            transmitted_label: word.label_transmitted(),
            label,
            data: word.data(),
            ssm: word.ssm(),
            sdi: word.sdi(),
            parity,
        });

        let expected = word.expected_parity();
        let parity_valid = parity == expected;
        observe(TraceStep::ParityChecked {
            ones: word.payload_ones(),
            expected,
            actual: parity,
            valid: parity_valid,
        });

        DecodedWord::new(label, word.data(), word.ssm(), word.sdi(), parity, parity_valid)
    }
}
