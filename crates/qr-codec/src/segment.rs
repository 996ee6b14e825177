//! Segment mode indicators and the full payload bit-stream emission
//! described in spec.md §4.5: ECI prefix, mode indicator, character-count
//! indicator, payload, terminator, byte alignment, and padding.
//!
//! The teacher split this across `SegmentMode` (just the indicator bits and
//! count-field widths) and `Segment`'s static factory functions (just the
//! payload, no terminator/padding — those lived inline in
//! `QrCode::encode_segments_advanced`). This folds ECI awareness in (the
//! teacher never emitted an ECI designator at all) and moves the
//! terminator/alignment/padding logic here, next to the payload it follows.

use crate::analyzer::{Analysis, EciMode};
use crate::bitstream::BitWriter;
use crate::error::QrError;
use crate::tables;
use crate::version::Version;

/// Describes how a segment's data bits are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
    Eci,
}

impl EncodingMode {
    /// The 4-bit mode indicator value.
    pub fn indicator_bits(self) -> u32 {
        use EncodingMode::*;
        match self {
            Numeric => 0b0001,
            Alphanumeric => 0b0010,
            Byte => 0b0100,
            Kanji => 0b1000,
            Eci => 0b0111,
        }
    }

    /// Bit width of the character-count indicator for this mode at `version`.
    pub fn char_count_bits(self, version: Version) -> u8 {
        use EncodingMode::*;
        let bracket = usize::from((version.value() + 7) / 17); // 0: 1-9, 1: 10-26, 2: 27-40
        (match self {
            Numeric => [10, 12, 14],
            Alphanumeric => [9, 11, 13],
            Byte => [8, 16, 16],
            Kanji => [8, 10, 12],
            Eci => [0, 0, 0],
        })[bracket]
    }
}

/// Writes the complete bit stream for one piece of analyzed text, sized
/// exactly to `target_bits` (== `ECCInfo.total_data_codewords * 8`).
///
/// `utf8_bom` only has an effect when the effective ECI ends up being UTF-8.
pub fn encode_payload(
    text: &str,
    analysis: &Analysis,
    version: Version,
    target_bits: usize,
    utf8_bom: bool,
) -> Result<BitWriter, QrError> {
    let mut w = BitWriter::new();

    if !analysis.eci.is_default() {
        write_eci_designator(&mut w, analysis.eci);
    }

    w.append_bits(analysis.mode.indicator_bits(), 4);

    let cc_bits = analysis.mode.char_count_bits(version);
    let count_limit = 1usize << cc_bits;
    if analysis.length >= count_limit {
        return Err(QrError::CapacityExceeded {
            data_bits: analysis.length,
            capacity_bits: count_limit - 1,
        });
    }
    w.append_bits(analysis.length as u32, cc_bits);

    match analysis.mode {
        EncodingMode::Numeric => write_numeric_payload(&mut w, text),
        EncodingMode::Alphanumeric => write_alphanumeric_payload(&mut w, text),
        EncodingMode::Byte => write_byte_payload(&mut w, text, analysis.eci, utf8_bom),
        EncodingMode::Kanji => {
            return Err(QrError::UnsupportedMode("Kanji encoding is not implemented".into()));
        }
        EncodingMode::Eci => unreachable!("ECI is a prefix, never the chosen payload mode"),
    }

    if w.len() > target_bits {
        return Err(QrError::CapacityExceeded {
            data_bits: w.len(),
            capacity_bits: target_bits,
        });
    }

    let terminator_len = (target_bits - w.len()).min(4);
    w.append_bits(0, terminator_len as u8);
    w.align_to_byte();

    for &pad in [0xECu32, 0x11].iter().cycle() {
        if w.len() >= target_bits {
            break;
        }
        w.append_bits(pad, 8);
    }
    debug_assert_eq!(w.len(), target_bits);

    Ok(w)
}

fn write_eci_designator(w: &mut BitWriter, eci: EciMode) {
    w.append_bits(EncodingMode::Eci.indicator_bits(), 4);
    let assignment = eci.value();
    if assignment < (1 << 7) {
        w.append_bits(assignment, 8);
    } else if assignment < (1 << 14) {
        w.append_bits(0b10, 2);
        w.append_bits(assignment, 14);
    } else {
        w.append_bits(0b110, 3);
        w.append_bits(assignment, 21);
    }
}

fn write_numeric_payload(w: &mut BitWriter, text: &str) {
    let digits: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
    for chunk in digits.chunks(3) {
        let value = chunk.iter().fold(0u32, |acc, &d| acc * 10 + u32::from(d));
        let bits = match chunk.len() {
            3 => 10,
            2 => 7,
            1 => 4,
            _ => unreachable!(),
        };
        w.append_bits(value, bits);
    }
}

fn write_alphanumeric_payload(w: &mut BitWriter, text: &str) {
    let values: Vec<u8> = text
        .chars()
        .map(|c| tables::alphanumeric_value(c).expect("analyzer already proved alphanumeric"))
        .collect();
    for pair in values.chunks(2) {
        if pair.len() == 2 {
            let value = u32::from(pair[0]) * 45 + u32::from(pair[1]);
            w.append_bits(value, 11);
        } else {
            w.append_bits(u32::from(pair[0]), 6);
        }
    }
}

fn write_byte_payload(w: &mut BitWriter, text: &str, eci: EciMode, utf8_bom: bool) {
    let bytes = encode_byte_payload_bytes(text, eci, utf8_bom);
    for b in bytes {
        w.append_bits(u32::from(b), 8);
    }
}

/// The raw byte payload Byte mode would emit, independent of bit packing —
/// shared with [`analyzer::analyze`]'s length accounting so the two never
/// disagree about how many bytes a piece of text encodes to.
pub fn encode_byte_payload_bytes(text: &str, eci: EciMode, utf8_bom: bool) -> Vec<u8> {
    if eci == EciMode::UTF8 {
        let mut bytes = Vec::with_capacity(text.len() + 3);
        if utf8_bom {
            bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
        }
        bytes.extend_from_slice(text.as_bytes());
        bytes
    } else {
        // Default (proven ISO-8859-1-representable by the analyzer) or
        // forced ISO-8859-1.
        text.chars().map(|c| c as u8).collect()
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::analyzer::analyze;

    #[test]
    fn emit_numeric_payload_in_groups_of_three_digits() {
        let mut w = BitWriter::new();
        write_numeric_payload(&mut w, "01234567");
        // "012" -> 10 bits, "345" -> 10 bits, "67" -> 7 bits = 27 bits
        assert_eq!(w.len(), 27);
    }

    #[test]
    fn emit_alphanumeric_payload_in_pairs() {
        let mut w = BitWriter::new();
        write_alphanumeric_payload(&mut w, "HELLO WORLD");
        // 11 chars -> 5 pairs (11 bits each) + 1 single (6 bits) = 61 bits
        assert_eq!(w.len(), 61);
    }

    #[test]
    fn pad_to_the_exact_target_bit_count() {
        let analysis = analyze("01234567", EciMode::DEFAULT, false);
        let version = Version::new(1);
        let target_bits = 19 * 8; // version 1, level L: 19 data codewords
        let w = encode_payload("01234567", &analysis, version, target_bits, false).unwrap();
        assert_eq!(w.len(), target_bits);
    }

    #[test]
    fn alternate_pad_bytes_starting_with_0xec() {
        let analysis = analyze("1", EciMode::DEFAULT, false);
        let version = Version::new(1);
        let target_bits = 19 * 8;
        let w = encode_payload("1", &analysis, version, target_bits, false).unwrap();
        let bytes = w.into_bytes();
        // mode(4) + count(10) + payload(4) + terminator/align leaves some
        // whole bytes before padding kicks in; whichever byte padding starts
        // on, it must begin with 0xEC.
        assert!(bytes.contains(&0xEC));
    }

    #[test]
    fn prefix_eci_designator_for_a_forced_non_default_eci() {
        let analysis = analyze("hi", EciMode::UTF8, false);
        let version = Version::new(1);
        let target_bits = 19 * 8;
        let w = encode_payload("hi", &analysis, version, target_bits, false).unwrap();
        // 4 (ECI indicator) + 8 (assignment 26 fits in 7 bits -> single byte form)
        let first_byte = w.as_bytes()[0];
        assert_eq!(first_byte >> 4, EncodingMode::Eci.indicator_bits() as u8);
    }

    #[test]
    fn prepend_utf8_bom_when_requested() {
        let bytes = encode_byte_payload_bytes("x", EciMode::UTF8, true);
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn reject_kanji_mode_as_unsupported() {
        let analysis = Analysis {
            mode: EncodingMode::Kanji,
            eci: EciMode::DEFAULT,
            length: 1,
        };
        let err = encode_payload("x", &analysis, Version::new(1), 19 * 8, false).unwrap_err();
        assert!(matches!(err, QrError::UnsupportedMode(_)));
    }
}
