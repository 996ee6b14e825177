//! Single-pass classification of input text into a segment mode, an
//! effective ECI designator, and the data length that sizes the symbol.
//!
//! The teacher's `Segment::is_numeric`/`is_alphanumeric` each re-scan the
//! whole string independently and never considered ECI at all (its
//! `make_segments` only ever produces Numeric, Alphanumeric, or Byte with the
//! implicit platform encoding). This does the narrowing and the ECI choice in
//! one pass, short-circuiting once every flag of interest is pinned.

use crate::segment::EncodingMode;

/// An ECI (Extended Channel Interpretation) assignment number.
///
/// Only three values are recognized by this crate's auto-detection; a caller
/// may still force an arbitrary assignment via [`EciMode::new`] when encoding
/// Byte-mode data under a scheme this crate doesn't otherwise choose.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct EciMode(u32);

impl EciMode {
    pub const DEFAULT: EciMode = EciMode(0);
    pub const ISO_8859_1: EciMode = EciMode(3);
    pub const UTF8: EciMode = EciMode(26);

    /// Builds an ECI designator from an arbitrary assignment number.
    pub fn new(assignment: u32) -> Self {
        EciMode(assignment)
    }

    /// The assignment number.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Whether this is the default (no ECI prefix emitted) designator.
    pub fn is_default(self) -> bool {
        self == EciMode::DEFAULT
    }
}

/// The outcome of analyzing a piece of input text.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Analysis {
    pub mode: EncodingMode,
    pub eci: EciMode,
    /// Character count for Numeric/Alphanumeric, encoded byte count for Byte.
    pub length: usize,
}

/// Classifies `text` into the narrowest applicable mode and, when
/// `requested_eci` is [`EciMode::DEFAULT`], the narrowest applicable ECI.
///
/// A caller-supplied non-default `requested_eci` always wins over
/// auto-detection, per spec.md §4.4. `utf8_bom` must match the option the
/// caller will pass to [`crate::segment::encode_payload`], so the reported
/// length (used to size the symbol) agrees with what actually gets encoded.
pub fn analyze(text: &str, requested_eci: EciMode, utf8_bom: bool) -> Analysis {
    if text.is_empty() {
        // Documented convention, not an ISO mandate: empty input is Numeric
        // of length 0.
        return Analysis {
            mode: EncodingMode::Numeric,
            eci: requested_eci,
            length: 0,
        };
    }

    let mut has_non_numeric = false;
    let mut has_non_alphanumeric = false;
    let mut has_non_ascii = false;
    let mut has_non_iso8859_1 = false;

    for c in text.chars() {
        if !c.is_ascii_digit() {
            has_non_numeric = true;
        }
        if crate::tables::alphanumeric_value(c).is_none() {
            has_non_alphanumeric = true;
        }
        if !c.is_ascii() {
            has_non_ascii = true;
        }
        if (c as u32) > 0xFF {
            has_non_iso8859_1 = true;
        }
        if has_non_numeric && has_non_alphanumeric && has_non_ascii && has_non_iso8859_1 {
            break; // every flag of interest is pinned; no further narrowing possible
        }
    }

    let mode = if !has_non_numeric {
        EncodingMode::Numeric
    } else if !has_non_alphanumeric {
        EncodingMode::Alphanumeric
    } else {
        EncodingMode::Byte
    };

    let eci = if !requested_eci.is_default() {
        requested_eci
    } else if !has_non_ascii {
        EciMode::DEFAULT
    } else if !has_non_iso8859_1 {
        EciMode::ISO_8859_1
    } else {
        EciMode::UTF8
    };

    let length = match mode {
        EncodingMode::Numeric | EncodingMode::Alphanumeric => text.chars().count(),
        EncodingMode::Byte => byte_length_under(text, eci, utf8_bom),
        EncodingMode::Kanji | EncodingMode::Eci => unreachable!("analyzer never selects these"),
    };

    Analysis { mode, eci, length }
}

/// The encoded byte length of `text` under `eci`, matching the payload this
/// crate will actually emit for Byte mode (§4.5): ISO-8859-1 when the
/// effective ECI is ISO-8859-1 or Default-with-ISO-8859-1-representable
/// content, UTF-8 (optionally BOM-prefixed) otherwise.
fn byte_length_under(text: &str, eci: EciMode, utf8_bom: bool) -> usize {
    if eci == EciMode::UTF8 {
        text.len() + if utf8_bom { 3 } else { 0 }
    } else {
        // Default (already proven ISO-8859-1-representable by the caller's
        // has_non_ascii/has_non_iso8859_1 check) or forced ISO-8859-1: one
        // byte per code point.
        text.chars().count()
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn classify_digit_only_input_as_numeric() {
        let a = analyze("0123456789", EciMode::DEFAULT, false);
        assert_eq!(a.mode, EncodingMode::Numeric);
        assert_eq!(a.length, 10);
    }

    #[test]
    fn classify_alphanumeric_charset_with_a_non_digit_as_alphanumeric() {
        let a = analyze("HELLO WORLD", EciMode::DEFAULT, false);
        assert_eq!(a.mode, EncodingMode::Alphanumeric);
        assert_eq!(a.length, 11);
    }

    #[test]
    fn classify_lowercase_ascii_as_byte_with_default_eci() {
        let a = analyze("hello world", EciMode::DEFAULT, false);
        assert_eq!(a.mode, EncodingMode::Byte);
        assert_eq!(a.eci, EciMode::DEFAULT);
        assert_eq!(a.length, 11);
    }

    #[test]
    fn classify_latin1_extended_text_as_byte_with_iso_8859_1() {
        let a = analyze("h\u{e9}llo", EciMode::DEFAULT, false); // "héllo"
        assert_eq!(a.mode, EncodingMode::Byte);
        assert_eq!(a.eci, EciMode::ISO_8859_1);
        assert_eq!(a.length, 5);
    }

    #[test]
    fn classify_text_outside_latin1_as_byte_with_utf8() {
        let a = analyze("caf\u{e9}\u{2615}", EciMode::DEFAULT, false); // "café☕"
        assert_eq!(a.mode, EncodingMode::Byte);
        assert_eq!(a.eci, EciMode::UTF8);
        assert_eq!(a.length, "caf\u{e9}\u{2615}".len());
    }

    #[test]
    fn honor_a_forced_eci_over_auto_detection() {
        let a = analyze("HELLO", EciMode::UTF8, false);
        assert_eq!(a.eci, EciMode::UTF8);
    }

    #[test]
    fn treat_empty_input_as_numeric_length_zero() {
        let a = analyze("", EciMode::DEFAULT, false);
        assert_eq!(a.mode, EncodingMode::Numeric);
        assert_eq!(a.length, 0);
    }

    #[test]
    fn count_the_bom_toward_length_when_requested() {
        let a = analyze("caf\u{e9}\u{2615}", EciMode::DEFAULT, true);
        assert_eq!(a.length, "caf\u{e9}\u{2615}".len() + 3);
    }
}
