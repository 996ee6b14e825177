//! Public entry point and auto-version-selection (spec.md §4.10, §6).
//!
//! Generalized out of the teacher's `encode_segments_advanced`, which
//! searched versions inline with `Segment::get_total_bits` and boosted ECC
//! level in the same loop. `select_version` is pulled out as its own
//! function operating on an [`Analysis`] so it can be unit-tested without a
//! full encode, and the pipeline itself (analyze -> segment -> block ->
//! place -> mask-select -> overlay) now reads as one straight-line function
//! instead of one `QrCode` constructor doing everything.

use crate::analyzer::{analyze, Analysis, EciMode};
use crate::block;
use crate::ecc_level::ECCLevel;
use crate::error::QrError;
use crate::mask::{self, Mask, ALL_MASKS};
use crate::matrix::QRMatrix;
use crate::placer::Placer;
use crate::segment;
use crate::tables::capacity_info;
use crate::version::Version;

/// Options accepted by [`encode`], mirroring the teacher's positional
/// `encode_segments_advanced(segs, ecl, minversion, maxversion, mask,
/// boostecl)` parameter list collapsed into named fields (spec.md §6, §5.3).
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Prefix a U+FEFF BOM to the payload when the effective encoding is UTF-8.
    pub utf8_bom: bool,
    /// Forces a specific ECI; `EciMode::DEFAULT` auto-detects (spec.md §4.4).
    pub eci_mode: EciMode,
    /// Forces a specific version instead of auto-selecting the smallest fit.
    pub requested_version: Option<Version>,
    /// Width of the light border added after mask selection.
    pub quiet_zone_size: u32,
    /// Allow boosting the ECC level above the requested one while staying at
    /// the chosen version, carried forward from the teacher's `boostecl`.
    pub boost_ecc_level: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            utf8_bom: false,
            eci_mode: EciMode::DEFAULT,
            requested_version: None,
            quiet_zone_size: 4,
            boost_ecc_level: true,
        }
    }
}

/// Encodes `text` into a QR Code symbol at (at least) `level`, per spec.md §6.
pub fn encode(text: &str, level: ECCLevel, options: &EncodeOptions) -> Result<QRMatrix, QrError> {
    let analysis = analyze(text, options.eci_mode, options.utf8_bom);

    if analysis.mode == crate::segment::EncodingMode::Kanji {
        return Err(QrError::UnsupportedMode("Kanji encoding is not implemented".into()));
    }

    let (version, mut chosen_level) = match options.requested_version {
        Some(v) => {
            if !fits(&analysis, v, level) {
                let required = required_bits(&analysis, v);
                let capacity = capacity_info(v, level).total_data_codewords * 8;
                return Err(QrError::CapacityExceeded {
                    data_bits: required,
                    capacity_bits: capacity,
                });
            }
            (v, level)
        }
        None => (select_version(&analysis, level)?, level),
    };

    if options.boost_ecc_level {
        let mut candidate = chosen_level;
        while let Some(next) = candidate.next() {
            if fits(&analysis, version, next) {
                candidate = next;
            } else {
                break;
            }
        }
        chosen_level = candidate;
    }

    let info = capacity_info(version, chosen_level);
    let target_bits = info.total_data_codewords * 8;
    let payload = segment::encode_payload(text, &analysis, version, target_bits, options.utf8_bom)?;
    let data_codewords = payload.into_bytes();
    let interleaved = block::interleave_to_bitstream(&data_codewords, &info, version);

    let mut placer = Placer::new(version);
    placer.place_function_patterns();
    placer.place_data(&interleaved);

    let chosen_mask = select_mask(&mut placer, chosen_level);

    placer.apply_mask(chosen_mask);
    placer.overlay_format(chosen_level, chosen_mask);
    placer.overlay_version();

    let core = placer.into_modules();
    Ok(QRMatrix::from_core(version, chosen_level, chosen_mask, options.quiet_zone_size, core))
}

/// Picks the smallest version 1..=40 whose data capacity (in bits) fits the
/// analyzed text at `level`, per spec.md §4.10.
pub fn select_version(analysis: &Analysis, level: ECCLevel) -> Result<Version, QrError> {
    let mut version = Version::MIN;
    loop {
        if fits(analysis, version, level) {
            return Ok(version);
        }
        match version.next() {
            Some(next) => version = next,
            None => {
                let required = required_bits(analysis, Version::MAX);
                let capacity = capacity_info(Version::MAX, level).total_data_codewords * 8;
                return Err(QrError::CapacityExceeded {
                    data_bits: required,
                    capacity_bits: capacity,
                });
            }
        }
    }
}

fn fits(analysis: &Analysis, version: Version, level: ECCLevel) -> bool {
    required_bits(analysis, version) <= capacity_info(version, level).total_data_codewords * 8
}

/// The exact bit count the payload requires at `version`: ECI prefix (if
/// any) + mode indicator + count indicator + payload bits, per the formula
/// in spec.md §4.10 (never a rounded upper bound).
fn required_bits(analysis: &Analysis, version: Version) -> usize {
    let eci_bits = if analysis.eci.is_default() {
        0
    } else if analysis.eci.value() < (1 << 7) {
        4 + 8
    } else if analysis.eci.value() < (1 << 14) {
        4 + 2 + 14
    } else {
        4 + 3 + 21
    };

    let mode_bits = 4 + usize::from(analysis.mode.char_count_bits(version));

    let payload_bits = match analysis.mode {
        crate::segment::EncodingMode::Numeric => {
            let n = analysis.length;
            (n / 3) * 10 + [0, 4, 7][n % 3]
        }
        crate::segment::EncodingMode::Alphanumeric => {
            let n = analysis.length;
            (n / 2) * 11 + (n % 2) * 6
        }
        crate::segment::EncodingMode::Byte => analysis.length * 8,
        crate::segment::EncodingMode::Kanji | crate::segment::EncodingMode::Eci => 0,
    };

    eci_bits + mode_bits + payload_bits
}

/// Evaluates all eight masks against the placed matrix and returns the one
/// with the lowest ISO penalty score, ties resolved to the lowest index
/// (spec.md §4.8, §5 concurrency note).
///
/// Per spec.md §4.8(c), each trial overlays that candidate's format
/// information (and, for version >= 7, version information) before scoring,
/// since those reserved cells are mask-dependent and their N4 contribution
/// can move the arg-min, the same way the teacher's `get_penalty_score` is
/// scored after `draw_format_bits(i)` on each candidate. The final winning
/// mask's format and version bits are written again by the caller once the
/// loop picks a winner, so the last trial's leftover overlay never leaks
/// into the result.
fn select_mask(placer: &mut Placer, level: ECCLevel) -> Mask {
    let size = placer.size();
    let mut best: Option<(Mask, i32)> = None;

    for candidate in ALL_MASKS {
        placer.overlay_format(level, candidate);
        placer.overlay_version();

        let score = mask::penalty_score(size, |x, y| {
            let base = placer.get(x, y);
            if placer.is_blocked(x, y) {
                base
            } else {
                base ^ candidate.invert(x, y)
            }
        });

        let is_better = match best {
            Some((_, best_score)) => score < best_score,
            None => true,
        };
        if is_better {
            best = Some((candidate, score));
        }
    }

    best.unwrap().0
}
