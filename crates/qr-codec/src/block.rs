//! Block splitting, per-block error correction, and column-major
//! interleaving (spec.md §4.6).
//!
//! Generalized out of the teacher's `add_ecc_and_interleave`, which recomputed
//! the short/long block split directly from the raw ISO tables inline; this
//! takes an already-looked-up [`ECCInfo`] instead so the split arithmetic
//! lives in one place (`tables::capacity_info`).

use crate::bitstream::BitWriter;
use crate::reed_solomon;
use crate::tables::ECCInfo;
use crate::version::Version;

/// Splits `data` into the two ISO-prescribed groups, computes per-block ECC,
/// interleaves both, and appends the version's remainder bits.
///
/// `data.len()` must equal `info.total_data_codewords`.
pub fn interleave(data: &[u8], info: &ECCInfo, version: Version) -> Vec<u8> {
    assert_eq!(data.len(), info.total_data_codewords, "data length must match total_data_codewords");

    let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::with_capacity(info.blocks_in_group1 + info.blocks_in_group2);
    let mut offset = 0;
    for _ in 0..info.blocks_in_group1 {
        let block = &data[offset..offset + info.codewords_in_group1];
        offset += info.codewords_in_group1;
        let ecc = reed_solomon::encode(block, info.ecc_per_block);
        blocks.push((block, ecc));
    }
    for _ in 0..info.blocks_in_group2 {
        let block = &data[offset..offset + info.codewords_in_group2];
        offset += info.codewords_in_group2;
        let ecc = reed_solomon::encode(block, info.ecc_per_block);
        blocks.push((block, ecc));
    }
    debug_assert_eq!(offset, data.len());

    let max_data_len = info.codewords_in_group1.max(info.codewords_in_group2);
    let mut result = Vec::with_capacity(
        info.total_data_codewords + info.ecc_per_block * blocks.len(),
    );
    for i in 0..max_data_len {
        for (block, _) in &blocks {
            if i < block.len() {
                result.push(block[i]);
            }
        }
    }
    for i in 0..info.ecc_per_block {
        for (_, ecc) in &blocks {
            result.push(ecc[i]);
        }
    }

    result
}

/// Packs [`interleave`]'s output into a bit stream with
/// `crate::tables::remainder_bits(version)` zero bits appended.
pub fn interleave_to_bitstream(data: &[u8], info: &ECCInfo, version: Version) -> BitWriter {
    let codewords = interleave(data, info, version);
    let mut w = BitWriter::new();
    for b in codewords {
        w.append_bits(u32::from(b), 8);
    }
    let remainder = crate::tables::remainder_bits(version);
    if remainder > 0 {
        w.append_bits(0, remainder);
    }
    w
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::ecc_level::ECCLevel;
    use crate::tables::capacity_info;

    #[test]
    fn produce_the_documented_total_raw_codeword_count() {
        let version = Version::new(5);
        let level = ECCLevel::Quartile;
        let info = capacity_info(version, level);
        let data: Vec<u8> = (0..info.total_data_codewords as u32).map(|i| i as u8).collect();
        let interleaved = interleave(&data, &info, version);
        let expected_blocks = info.blocks_in_group1 + info.blocks_in_group2;
        assert_eq!(
            interleaved.len(),
            info.total_data_codewords + info.ecc_per_block * expected_blocks
        );
    }

    #[test]
    fn append_remainder_bits_to_the_bitstream() {
        let version = Version::new(2); // remainder_bits(2) == 7
        let level = ECCLevel::Medium;
        let info = capacity_info(version, level);
        let data: Vec<u8> = vec![0u8; info.total_data_codewords];
        let w = interleave_to_bitstream(&data, &info, version);
        let codeword_count = info.total_data_codewords + info.ecc_per_block * (info.blocks_in_group1 + info.blocks_in_group2);
        assert_eq!(w.len(), codeword_count * 8 + usize::from(crate::tables::remainder_bits(version)));
    }

    #[test]
    fn interleave_single_group_data_in_column_major_order() {
        // Version 1 level L has exactly one block, so interleaving is the
        // identity on the data portion followed by that block's ECC.
        let version = Version::new(1);
        let level = ECCLevel::Low;
        let info = capacity_info(version, level);
        assert_eq!(info.blocks_in_group2, 0);
        let data: Vec<u8> = (0..info.total_data_codewords as u32).map(|i| i as u8).collect();
        let interleaved = interleave(&data, &info, version);
        assert_eq!(&interleaved[..data.len()], &data[..]);
    }

    #[test]
    #[should_panic]
    fn reject_data_of_the_wrong_length() {
        let version = Version::new(1);
        let level = ECCLevel::Low;
        let info = capacity_info(version, level);
        let data = vec![0u8; info.total_data_codewords + 1];
        interleave(&data, &info, version);
    }
}
