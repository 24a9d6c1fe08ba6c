//! Core types and structures for ARINC 429 words

use crate::error::{check_range, CodecError, Field, Result};
use crate::layout;
use bitfield::bitfield;

/// Accepted label values
///
/// ARINC labels are written as three octal digits and occupy the 8-bit label
/// field. `Extended` accepts four octal digits (up to 0o3777) for callers that
/// validate against that range; only the low 8 bits reach the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelRange {
    /// 0o000 to 0o377
    #[default]
    Standard,
    /// 0o0000 to 0o3777, truncated to 8 bits on encode
    Extended,
}

impl LabelRange {
    /// Largest label accepted under this range
    pub fn max(&self) -> u16 {
        match self {
            LabelRange::Standard => layout::LABEL_MAX,
            LabelRange::Extended => layout::LABEL_MAX_EXTENDED,
        }
    }
}

/// Label (octal identifier), in normal bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u8"))]
pub struct Label(u8);

impl Label {
    /// Create a new label, validating it's within [0, 0o377]
    pub fn new(label: u16) -> Result<Self> {
        Self::with_range(label, LabelRange::Standard)
    }

    /// Create a label under the given range; values above 0o377 keep their low 8 bits
    pub fn with_range(label: u16, range: LabelRange) -> Result<Self> {
        check_range(Field::Label, label.into(), range.max().into())?;
        Ok(Label((label & 0xFF) as u8))
    }

    /// Get the raw label value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Label bits in transmission order (LSB first)
    pub fn transmitted(&self) -> u8 {
        reverse_label(self.0)
    }
}

impl TryFrom<u16> for Label {
    type Error = CodecError;

    fn try_from(value: u16) -> Result<Self> {
        Label::new(value)
    }
}

impl From<Label> for u8 {
    fn from(value: Label) -> Self {
        value.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03o}", self.0)
    }
}

/// 19-bit data field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Data(u32);

impl Data {
    /// Create a new data field, validating it fits in 19 bits
    pub fn new(data: u32) -> Result<Self> {
        check_range(Field::Data, data.into(), layout::DATA_MAX.into())?;
        Ok(Data(data))
    }

    /// Get the raw data value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Data {
    type Error = CodecError;

    fn try_from(value: u32) -> Result<Self> {
        Data::new(value)
    }
}

impl From<Data> for u32 {
    fn from(value: Data) -> Self {
        value.0
    }
}

/// Sign/Status Matrix (0-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Ssm(u8);

impl Ssm {
    /// Create a new SSM, validating it's within [0, 3]
    pub fn new(ssm: u8) -> Result<Self> {
        check_range(Field::Ssm, ssm.into(), layout::SSM_MAX.into())?;
        Ok(Ssm(ssm))
    }

    /// Get the raw SSM value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Ssm {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self> {
        Ssm::new(value)
    }
}

impl From<Ssm> for u8 {
    fn from(value: Ssm) -> Self {
        value.0
    }
}

impl std::fmt::Display for Ssm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02b}", self.0)
    }
}

/// Source/Destination Identifier (0-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Sdi(u8);

impl Sdi {
    /// Create a new SDI, validating it's within [0, 3]
    pub fn new(sdi: u8) -> Result<Self> {
        check_range(Field::Sdi, sdi.into(), layout::SDI_MAX.into())?;
        Ok(Sdi(sdi))
    }

    /// Get the raw SDI value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Sdi {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self> {
        Sdi::new(value)
    }
}

impl From<Sdi> for u8 {
    fn from(value: Sdi) -> Self {
        value.0
    }
}

impl std::fmt::Display for Sdi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02b}", self.0)
    }
}

/// Unvalidated encoder inputs
///
/// SSM and SDI default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fields {
    /// Label in normal bit order
    pub label: u16,
    /// Data field
    pub data: u32,
    /// Sign/Status Matrix
    pub ssm: u8,
    /// Source/Destination Identifier
    pub sdi: u8,
}

impl Fields {
    /// Fields with SSM and SDI set to 0
    pub fn new(label: u16, data: u32) -> Self {
        Fields {
            label,
            data,
            ssm: 0,
            sdi: 0,
        }
    }

    /// Set the SSM
    pub fn with_ssm(mut self, ssm: u8) -> Self {
        self.ssm = ssm;
        self
    }

    /// Set the SDI
    pub fn with_sdi(mut self, sdi: u8) -> Self {
        self.sdi = sdi;
        self
    }
}

bitfield! {
    /// A 32-bit ARINC 429 word
    ///
    /// Bits are numbered as integer bits, 31 being the first bit composed:
    /// - Bits 31-24: Label, bit-reversed
    /// - Bits 23-5: Data
    /// - Bits 4-3: SSM
    /// - Bits 2-1: SDI
    /// - Bit 0: Parity (odd over the whole word)
    #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ArincWord(u32);
    impl Debug;
    /// Label bits as transmitted (LSB first)
    pub u8, label_transmitted, set_label_transmitted: 31, 24;
    /// Data field
    pub u32, data, set_data: 23, 5;
    /// Sign/Status Matrix
    pub u8, ssm, set_ssm: 4, 3;
    /// Source/Destination Identifier
    pub u8, sdi, set_sdi: 2, 1;
    /// Parity bit
    pub parity, set_parity: 0;
}

impl ArincWord {
    /// Wrap a raw 32-bit word
    pub fn new(raw: u32) -> Self {
        ArincWord(raw)
    }

    /// Get the raw 32-bit value
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Label in normal bit order
    pub fn label(&self) -> u8 {
        reverse_label(self.label_transmitted())
    }

    /// The first 31 bits (everything but parity), right-aligned
    pub fn payload(&self) -> u32 {
        self.0 >> 1
    }

    /// Number of set bits in the first 31 bits
    pub fn payload_ones(&self) -> u32 {
        (self.0 & layout::PAYLOAD_MASK).count_ones()
    }

    /// Number of set bits in the whole word
    pub fn ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Parity bit the first 31 bits call for
    pub fn expected_parity(&self) -> u8 {
        odd_parity_bit(self.0)
    }

    /// Check odd parity across all 32 bits
    pub fn has_valid_parity(&self) -> bool {
        self.ones() % 2 == 1
    }

    /// MSB-first binary rendering, always 32 characters
    pub fn to_binary_string(&self) -> String {
        format!("{:032b}", self.0)
    }
}

impl From<u32> for ArincWord {
    fn from(raw: u32) -> Self {
        ArincWord(raw)
    }
}

impl From<ArincWord> for u32 {
    fn from(word: ArincWord) -> Self {
        word.0
    }
}

impl TryFrom<i64> for ArincWord {
    type Error = CodecError;

    fn try_from(value: i64) -> Result<Self> {
        check_range(Field::Word, value, u32::MAX.into())?;
        Ok(ArincWord(value as u32))
    }
}

impl std::str::FromStr for ArincWord {
    type Err = CodecError;

    /// Parse `0x`, `0o` or `0b` prefixed text, or plain decimal
    ///
    /// Underscores between digits are ignored. A single leading `-` is read
    /// so negative values fail as out of range rather than as bad text.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (digits, radix) = split_radix(unsigned);

        let mut magnitude: u64 = 0;
        let mut seen_digit = false;
        for c in digits.chars().filter(|c| *c != '_') {
            let digit = c.to_digit(radix).ok_or_else(|| {
                CodecError::invalid_word(format!("invalid digit {:?} in {:?}", c, s))
            })?;
            magnitude = magnitude
                .checked_mul(u64::from(radix))
                .and_then(|m| m.checked_add(u64::from(digit)))
                .ok_or_else(|| CodecError::invalid_word(format!("{:?} is too large", s)))?;
            seen_digit = true;
        }

        if !seen_digit {
            return Err(CodecError::invalid_word(format!("no digits in {:?}", s)));
        }

        let magnitude = i64::try_from(magnitude)
            .map_err(|_| CodecError::invalid_word(format!("{:?} is too large", s)))?;
        let value = if negative { -magnitude } else { magnitude };
        ArincWord::try_from(value)
    }
}

/// Split a `0x`/`0o`/`0b` prefix (any case) from the digits
fn split_radix(text: &str) -> (&str, u32) {
    let radix = match text.as_bytes() {
        [b'0', b'x' | b'X', ..] => 16,
        [b'0', b'o' | b'O', ..] => 8,
        [b'0', b'b' | b'B', ..] => 2,
        _ => return (text, 10),
    };
    (&text[2..], radix)
}

impl std::fmt::Display for ArincWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ArincWord(label={:03o}, data={}, ssm={}, sdi={}, parity={}, raw=0x{:08X})",
            self.label(),
            self.data(),
            self.ssm(),
            self.sdi(),
            u8::from(self.parity()),
            self.0
        )
    }
}

impl std::fmt::LowerHex for ArincWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::LowerHex::fmt(&self.0, f)
    }
}

impl std::fmt::UpperHex for ArincWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::UpperHex::fmt(&self.0, f)
    }
}

impl std::fmt::Binary for ArincWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Binary::fmt(&self.0, f)
    }
}

impl std::fmt::Octal for ArincWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Octal::fmt(&self.0, f)
    }
}

/// Reverse label bits (ARINC 429 transmits the label LSB first)
pub fn reverse_label(label: u8) -> u8 {
    label.reverse_bits()
}

/// Calculate the odd parity bit for a word
///
/// Only the first 31 bits (integer bits 31-1) are counted; bit 0 is ignored.
pub fn odd_parity_bit(word: u32) -> u8 {
    // For odd parity, an even number of 1s needs a parity bit of 1
    if (word & layout::PAYLOAD_MASK).count_ones() % 2 == 0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_creation() {
        assert!(Label::new(0).is_ok());
        assert!(Label::new(0o377).is_ok());
        assert!(Label::new(0o400).is_err());
        assert_eq!(Label::new(0o010).unwrap().to_string(), "010");
    }

    #[test]
    fn test_label_extended_range() -> Result<()> {
        let label = Label::with_range(0o3777, LabelRange::Extended)?;
        assert_eq!(label.value(), 0xFF);

        let label = Label::with_range(0o1010, LabelRange::Extended)?;
        assert_eq!(label.value(), 0o010);

        let err = Label::with_range(0o4000, LabelRange::Extended).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidArgument {
                field: Field::Label,
                value: 0o4000,
                min: 0,
                max: 0o3777
            }
        );
        Ok(())
    }

    #[test]
    fn test_label_transmitted() -> Result<()> {
        assert_eq!(Label::new(0o010)?.transmitted(), 0b0001_0000);
        assert_eq!(Label::new(0b0000_0001)?.transmitted(), 0b1000_0000);
        Ok(())
    }

    #[test]
    fn test_field_limits() {
        assert!(Data::new(layout::DATA_MAX).is_ok());
        assert!(Data::new(1 << 19).is_err());
        assert!(Ssm::new(3).is_ok());
        assert!(Ssm::new(4).is_err());
        assert!(Sdi::new(3).is_ok());
        assert!(Sdi::new(4).is_err());
    }

    #[test]
    fn test_field_conversions() {
        assert_eq!(Ssm::try_from(3u8).map(u8::from), Ok(3));
        assert!(Sdi::try_from(4u8).is_err());
        assert!(Data::try_from(1u32 << 19).is_err());
        assert_eq!(Label::try_from(0o203u16).map(u8::from), Ok(0o203));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_field_deserialize_validates() {
        assert_eq!(serde_json::from_str::<Ssm>("2").unwrap().value(), 2);
        assert!(serde_json::from_str::<Ssm>("4").is_err());
        assert!(serde_json::from_str::<Sdi>("7").is_err());
        assert!(serde_json::from_str::<Data>("524288").is_err());
        assert!(serde_json::from_str::<Label>("256").is_err());
        assert_eq!(serde_json::to_string(&Label::new(0o010).unwrap()).unwrap(), "8");
    }

    #[test]
    fn test_fields_defaults() {
        let fields = Fields::new(0o010, 1000);
        assert_eq!(fields.ssm, 0);
        assert_eq!(fields.sdi, 0);

        let fields = fields.with_ssm(2).with_sdi(1);
        assert_eq!(fields, Fields { label: 0o010, data: 1000, ssm: 2, sdi: 1 });
    }

    #[test]
    fn test_word_accessors() {
        let word = ArincWord::new(0x1000_7D00);
        assert_eq!(word.label_transmitted(), 0b0001_0000);
        assert_eq!(word.label(), 0o010);
        assert_eq!(word.data(), 1000);
        assert_eq!(word.ssm(), 0);
        assert_eq!(word.sdi(), 0);
        assert!(!word.parity());
        assert!(word.has_valid_parity());
    }

    #[test]
    fn test_word_setters_stay_in_field() {
        let mut word = ArincWord::default();
        word.set_data(layout::DATA_MAX);
        assert_eq!(word.raw(), 0x00FF_FFE0);
        assert_eq!(word.ssm(), 0);
        assert_eq!(word.label_transmitted(), 0);

        word.set_ssm(3);
        word.set_sdi(3);
        word.set_parity(true);
        assert_eq!(word.raw(), 0x00FF_FFFF);
    }

    #[test]
    fn test_binary_string_width() {
        assert_eq!(ArincWord::new(0).to_binary_string().len(), 32);
        assert_eq!(ArincWord::new(1).to_binary_string(), format!("{}1", "0".repeat(31)));
        assert_eq!(ArincWord::new(u32::MAX).to_binary_string(), "1".repeat(32));
    }

    #[test]
    fn test_odd_parity_bit() {
        // 0 ones (even) → parity=1 to make total odd
        assert_eq!(odd_parity_bit(0), 1);
        // Parity bit position is not counted
        assert_eq!(odd_parity_bit(1), 1);
        assert_eq!(odd_parity_bit(0b10), 0);
        // 31 ones (odd) → parity=0
        assert_eq!(odd_parity_bit(u32::MAX), 0);
    }

    #[test]
    fn test_word_from_wide() {
        assert_eq!(ArincWord::try_from(0xFFFF_FFFFi64).unwrap().raw(), u32::MAX);
        assert!(ArincWord::try_from(1i64 << 32).is_err());
        assert!(ArincWord::try_from(-1i64).is_err());
    }

    #[test]
    fn test_word_from_str() -> Result<()> {
        assert_eq!("0x10007D00".parse::<ArincWord>()?.raw(), 0x1000_7D00);
        assert_eq!("0X1000_7d00".parse::<ArincWord>()?.raw(), 0x1000_7D00);
        assert_eq!("268467456".parse::<ArincWord>()?.raw(), 0x1000_7D00);
        assert_eq!("0o17".parse::<ArincWord>()?.raw(), 15);
        assert_eq!("0b101".parse::<ArincWord>()?.raw(), 5);

        assert!(matches!(
            "0xZZ".parse::<ArincWord>(),
            Err(CodecError::InvalidWord(_))
        ));
        assert!(matches!("0x".parse::<ArincWord>(), Err(CodecError::InvalidWord(_))));
        assert_eq!(
            "0x100000000".parse::<ArincWord>().unwrap_err().field(),
            Some(Field::Word)
        );
        assert_eq!("-1".parse::<ArincWord>().unwrap_err().field(), Some(Field::Word));
        Ok(())
    }

    #[test]
    fn test_word_from_str_rejects_malformed_signs() {
        for text in ["--1", "+5", "0x-5", "0x+5", "-+1", "--9223372036854775808", "-0x-1"] {
            assert!(
                matches!(text.parse::<ArincWord>(), Err(CodecError::InvalidWord(_))),
                "{:?} should be rejected as text",
                text
            );
        }
    }

    #[test]
    fn test_word_from_str_overflow() {
        for text in [
            "9223372036854775808",
            "-9223372036854775808",
            "99999999999999999999999",
            "0xFFFFFFFFFFFFFFFFFF",
        ] {
            assert!(
                matches!(text.parse::<ArincWord>(), Err(CodecError::InvalidWord(_))),
                "{:?} should overflow",
                text
            );
        }
        assert_eq!(
            "-9223372036854775807".parse::<ArincWord>().unwrap_err().field(),
            Some(Field::Word)
        );
    }

    #[test]
    fn test_word_from_str_underscores_and_case() -> Result<()> {
        assert_eq!("  0B1_0_1 ".parse::<ArincWord>()?.raw(), 5);
        assert_eq!("0O1_7".parse::<ArincWord>()?.raw(), 15);
        assert_eq!("4_294_967_295".parse::<ArincWord>()?.raw(), u32::MAX);
        assert!(matches!("_".parse::<ArincWord>(), Err(CodecError::InvalidWord(_))));
        Ok(())
    }

    #[test]
    fn test_word_formatting() {
        let word = ArincWord::new(0x1000_7D00);
        assert_eq!(format!("{:#010x}", word), "0x10007d00");
        assert_eq!(format!("{:X}", word), "10007D00");
        assert_eq!(
            word.to_string(),
            "ArincWord(label=010, data=1000, ssm=0, sdi=0, parity=0, raw=0x10007D00)"
        );
    }
}
