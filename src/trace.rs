//! Step-by-step record of an encode or decode

use tracing::trace;

/// One intermediate step of encoding or decoding a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceStep {
    /// Encoder inputs as given, before any truncation
    Inputs {
        /// Label as given
        label: u16,
        /// Data as given
        data: u32,
        /// SSM as given
        ssm: u8,
        /// SDI as given
        sdi: u8,
    },
    /// Label bits reversed into transmission order
    LabelReversed {
        /// Label in normal bit order
        label: u8,
        /// Label in transmission order
        transmitted: u8,
    },
    /// First 31 bits assembled, right-aligned
    FieldsCombined {
        /// Label, data, SSM and SDI bits
        payload: u32,
    },
    /// Odd parity bit computed over the first 31 bits
    ParityComputed {
        /// Set bits in the first 31 bits
        ones: u32,
        /// Parity bit appended
        parity: u8,
    },
    /// Final 32-bit word
    WordComposed {
        /// Encoded word
        word: u32,
    },
    /// Word handed to the decoder
    WordReceived {
        /// Raw word
        word: u32,
    },
    /// Fields sliced out of the word
    FieldsExtracted {
        /// Label bits as transmitted
        transmitted_label: u8,
        /// Label in normal bit order
        label: u8,
        /// Data field
        data: u32,
        /// Sign/Status Matrix
        ssm: u8,
        /// Source/Destination Identifier
        sdi: u8,
        /// Received parity bit
        parity: u8,
    },
    /// Received parity compared against the recomputed one
    ParityChecked {
        /// Set bits in the first 31 bits
        ones: u32,
        /// Parity bit the first 31 bits call for
        expected: u8,
        /// Parity bit received
        actual: u8,
        /// Whether they agree
        valid: bool,
    },
}

impl std::fmt::Display for TraceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            TraceStep::Inputs {
                label,
                data,
                ssm,
                sdi,
            } => write!(
                f,
                "inputs: label={:#o} ({}), data={}, ssm={}, sdi={}",
                label, label, data, ssm, sdi
            ),
            TraceStep::LabelReversed { label, transmitted } => write!(
                f,
                "label {:08b} reversed -> {:08b} (LSB first)",
                label, transmitted
            ),
            TraceStep::FieldsCombined { payload } => write!(
                f,
                "combined (no parity): {:031b} [label {:08b} | data {:019b} | ssm {:02b} | sdi {:02b}]",
                payload,
                payload >> 23,
                (payload >> 4) & 0x7_FFFF,
                (payload >> 2) & 0b11,
                payload & 0b11
            ),
            TraceStep::ParityComputed { ones, parity } => write!(
                f,
                "{} ones in first 31 bits ({}), parity bit {}",
                ones,
                if ones % 2 == 0 { "even" } else { "odd" },
                parity
            ),
            TraceStep::WordComposed { word } => {
                write!(f, "word {:032b} = {} = {:#010x}", word, word, word)
            }
            TraceStep::WordReceived { word } => {
                write!(f, "received {} = {:#010x} = {:032b}", word, word, word)
            }
            TraceStep::FieldsExtracted {
                transmitted_label,
                label,
                data,
                ssm,
                sdi,
                parity,
            } => write!(
                f,
                "label {:08b} -> {:08b} = {:#o}, data={}, ssm={}, sdi={}, parity={}",
                transmitted_label, label, label, data, ssm, sdi, parity
            ),
            TraceStep::ParityChecked {
                ones,
                expected,
                actual,
                valid,
            } => write!(
                f,
                "{} ones in first 31 bits, expected parity {}, actual {}, valid={}",
                ones, expected, actual, valid
            ),
        }
    }
}

/// Ordered record of the steps taken by one encode or decode call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Trace { steps: Vec::new() }
    }

    /// Append a step and mirror it as a `tracing` event
    pub fn record(&mut self, step: TraceStep) {
        trace!("{}", step);
        self.steps.push(step);
    }

    /// Recorded steps, in order
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over the recorded steps
    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceStep;
    type IntoIter = std::slice::Iter<'a, TraceStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, step)?;
        }
        Ok(())
    }
}
