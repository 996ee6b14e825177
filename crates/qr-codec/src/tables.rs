//! Compile-time lookup tables and BCH generators from ISO/IEC 18004.
//!
//! Everything here is a pure function or `static` table keyed by `(version,
//! level)` or `version` alone; nothing allocates behind a lock and nothing is
//! mutable after the program starts.

use crate::ecc_level::ECCLevel;
use crate::version::Version;

/// The set of all legal characters in alphanumeric mode, where each
/// character value maps to the index in the string.
pub const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Per-(version, ECC level) capacity and block-structure parameters.
///
/// Invariant: `blocks_in_group1 * codewords_in_group1 + blocks_in_group2 *
/// codewords_in_group2 == total_data_codewords`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ECCInfo {
    pub total_data_codewords: usize,
    pub ecc_per_block: usize,
    pub blocks_in_group1: usize,
    pub codewords_in_group1: usize,
    pub blocks_in_group2: usize,
    pub codewords_in_group2: usize,
}

// Number of ECC codewords appended to every block, indexed [level][version].
// Index 0 is unused padding (versions are 1-based).
static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28,
        30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30,
        24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

// Number of error-correction blocks the data is split into, indexed [level][version].
static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

fn table_get(table: &'static [[i8; 41]; 4], version: Version, level: ECCLevel) -> usize {
    table[level.ordinal()][usize::from(version.value())] as usize
}

/// Number of data-bearing bits available in a symbol of the given version,
/// ignoring error correction and function modules. Includes remainder bits,
/// so this is not necessarily a multiple of 8. Range `[208, 29648]`.
fn num_raw_data_modules(version: Version) -> usize {
    let ver = usize::from(version.value());
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let num_align = ver / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

/// Number of zero bits appended after the interleaved ECC stream to pad the
/// raw module count out to a whole number of codewords. One of `{0, 3, 4, 7}`.
pub fn remainder_bits(version: Version) -> u8 {
    (num_raw_data_modules(version) % 8) as u8
}

/// Capacity and block-structure parameters for the given `(version, level)`.
pub fn capacity_info(version: Version, level: ECCLevel) -> ECCInfo {
    let ecc_per_block = table_get(&ECC_CODEWORDS_PER_BLOCK, version, level);
    let num_blocks = table_get(&NUM_ERROR_CORRECTION_BLOCKS, version, level);
    let raw_codewords = num_raw_data_modules(version) / 8;

    let num_short_blocks = num_blocks - raw_codewords % num_blocks;
    let short_block_len = raw_codewords / num_blocks;

    let codewords_in_group1 = short_block_len - ecc_per_block;
    let blocks_in_group1 = num_short_blocks;
    let blocks_in_group2 = num_blocks - num_short_blocks;
    let codewords_in_group2 = if blocks_in_group2 > 0 {
        codewords_in_group1 + 1
    } else {
        0
    };

    let total_data_codewords = blocks_in_group1 * codewords_in_group1
        + blocks_in_group2 * codewords_in_group2;

    ECCInfo {
        total_data_codewords,
        ecc_per_block,
        blocks_in_group1,
        codewords_in_group1,
        blocks_in_group2,
        codewords_in_group2,
    }
}

/// Ascending list of alignment-pattern center coordinates (shared by both
/// axes) for the given version. Empty for version 1.
pub fn alignment_centers(version: Version) -> Vec<u16> {
    let ver = version.value();
    if ver == 1 {
        return Vec::new();
    }
    let size = i32::from(version.size());
    let num_align = i32::from(ver) / 7 + 2;
    let step = if ver == 32 {
        26
    } else {
        (i32::from(ver) * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };
    let mut result: Vec<u16> = (0..num_align - 1)
        .map(|i| (size - 7 - i * step) as u16)
        .collect();
    result.push(6);
    result.reverse();
    result
}

/// Maps an alphanumeric-mode character to its 0..=44 value, or `None` if the
/// character is not in [`ALPHANUMERIC_CHARSET`].
pub fn alphanumeric_value(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        ' ' => Some(36),
        '$' => Some(37),
        '%' => Some(38),
        '*' => Some(39),
        '+' => Some(40),
        '-' => Some(41),
        '.' => Some(42),
        '/' => Some(43),
        ':' => Some(44),
        _ => None,
    }
}

/// Computes the 15-bit format information field for the given level and
/// mask, as a BCH(15,5) codeword XORed with the fixed mask per ISO §7.9.
pub fn format_bits(level: ECCLevel, mask: u8) -> u16 {
    debug_assert!(mask <= 7);
    let data = u32::from(level.format_bits()) << 3 | u32::from(mask);
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    let bits = (data << 10 | rem) ^ 0x5412;
    debug_assert_eq!(bits >> 15, 0);
    bits as u16
}

/// Computes the 18-bit version information field for versions >= 7, as a
/// BCH(18,6) codeword per ISO §7.9 (Annex D). Callers must not place this for
/// versions below 7; the standard has no version information field there.
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.value());
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    let bits = data << 12 | rem;
    debug_assert_eq!(bits >> 18, 0);
    bits
}
