//! The compact matrix serialization format (spec.md §4.9): a `"QRR"` magic,
//! a single core-side byte, row-major MSB-first packed bits, and an optional
//! Deflate/GZip wrapper.
//!
//! The teacher has no serializer of its own — `q-rs` hands a `QrCode` to
//! `q-rs-png` for pixel rendering and nothing persists the matrix itself.
//! The bit-packing idiom here follows the pack's `j4ncp-qr-gen` serialization
//! reference; the compression back-ends follow the sibling
//! `eljojo-estrella`'s `flate2::write::GzEncoder`/`read::GzDecoder` usage
//! (`eljojo-estrella/src/server/state.rs::CachedLayer`), with `flate2`'s
//! `DeflateEncoder`/`DeflateDecoder` covering the Deflate back-end the same
//! way.

use std::io::{Read, Write};

use flate2::read::{DeflateDecoder, GzDecoder};
use flate2::write::{DeflateEncoder, GzEncoder};

use crate::error::QrError;
use crate::matrix::QRMatrix;
use crate::version::Version;

const MAGIC: [u8; 3] = [0x51, 0x52, 0x52]; // ASCII "QRR"

/// The stream-compression back-end applied to a serialized matrix blob.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Deflate,
    GZip,
}

impl QRMatrix {
    /// Serializes the core (non-quiet-zone) matrix: magic, core side, packed
    /// bits, then `compression`'s wrapper.
    pub fn to_bytes(&self, compression: Compression) -> Vec<u8> {
        let core_size = self.core_size();
        let mut payload = Vec::with_capacity(3 + 1 + usize::from(core_size).pow(2) / 8 + 1);
        payload.extend_from_slice(&MAGIC);
        payload.push(core_size as u8);

        let mut bit_len = 0usize;
        let mut cur = 0u8;
        for y in 0..core_size {
            for x in 0..core_size {
                if self.core_get(x, y) {
                    cur |= 1 << (7 - (bit_len % 8));
                }
                bit_len += 1;
                if bit_len % 8 == 0 {
                    payload.push(cur);
                    cur = 0;
                }
            }
        }
        if bit_len % 8 != 0 {
            payload.push(cur);
        }

        compress(&payload, compression)
    }

    /// Deserializes a blob produced by [`QRMatrix::to_bytes`], applying
    /// `quiet_zone_size` to the reconstructed matrix (it need not match the
    /// zone the original was serialized with, since the quiet zone itself is
    /// never persisted).
    pub fn from_bytes(
        bytes: &[u8],
        compression: Compression,
        quiet_zone_size: u32,
    ) -> Result<Self, QrError> {
        let payload = decompress(bytes, compression)?;

        if payload.len() < 4 {
            return Err(QrError::MalformedInput("blob shorter than the 4-byte header".into()));
        }
        if payload[0..3] != MAGIC {
            return Err(QrError::MalformedInput(format!(
                "bad magic bytes {:02x}{:02x}{:02x}",
                payload[0], payload[1], payload[2]
            )));
        }
        let core_size = payload[3];
        if !(21..=177).contains(&core_size) {
            return Err(QrError::MalformedInput(format!(
                "core side {core_size} out of range [21, 177]"
            )));
        }
        if (core_size - 21) % 4 != 0 {
            return Err(QrError::MalformedInput(format!(
                "core side {core_size} is not 21 + 4*(version-1) for any version"
            )));
        }
        let version = Version::new((core_size - 21) / 4 + 1);

        let num_bits = usize::from(core_size) * usize::from(core_size);
        let packed = &payload[4..];
        let available_bits = packed.len() * 8;
        if available_bits < num_bits {
            return Err(QrError::TruncatedInput {
                expected: num_bits,
                actual: available_bits,
            });
        }

        let mut core = vec![false; num_bits];
        for (i, cell) in core.iter_mut().enumerate() {
            *cell = (packed[i / 8] >> (7 - (i % 8))) & 1 != 0;
        }

        Ok(QRMatrix::from_deserialized_core(version, quiet_zone_size, core))
    }
}

fn compress(data: &[u8], compression: Compression) -> Vec<u8> {
    match compression {
        Compression::None => data.to_vec(),
        Compression::Deflate => {
            let mut encoder = DeflateEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data).expect("in-memory compression never fails");
            encoder.finish().expect("in-memory compression never fails")
        }
        Compression::GZip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data).expect("in-memory compression never fails");
            encoder.finish().expect("in-memory compression never fails")
        }
    }
}

fn decompress(data: &[u8], compression: Compression) -> Result<Vec<u8>, QrError> {
    match compression {
        Compression::None => Ok(data.to_vec()),
        Compression::Deflate => {
            let mut decoder = DeflateDecoder::new(data);
            let mut out = Vec::new();
            decoder.read_to_end(&mut out)?;
            Ok(out)
        }
        Compression::GZip => {
            let mut decoder = GzDecoder::new(data);
            let mut out = Vec::new();
            decoder.read_to_end(&mut out)?;
            Ok(out)
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::ecc_level::ECCLevel;
    use crate::mask::Mask;

    fn sample_matrix() -> QRMatrix {
        let mut core = vec![false; 21 * 21];
        for (i, cell) in core.iter_mut().enumerate() {
            *cell = i % 3 == 0;
        }
        QRMatrix::from_core(Version::new(1), ECCLevel::Low, Mask::M0, 4, core)
    }

    #[test]
    fn begin_with_the_qrr_magic_and_a_valid_core_side() {
        let m = sample_matrix();
        let bytes = m.to_bytes(Compression::None);
        assert_eq!(&bytes[0..3], &MAGIC);
        assert_eq!(bytes[3], 21);
    }

    #[test]
    fn round_trip_uncompressed() {
        let m = sample_matrix();
        let bytes = m.to_bytes(Compression::None);
        let back = QRMatrix::from_bytes(&bytes, Compression::None, 0).unwrap();
        for y in 0..21u16 {
            for x in 0..21u16 {
                assert_eq!(m.core_get(x, y), back.core_get(x, y), "mismatch at ({x},{y})");
            }
        }
    }

    #[test]
    fn round_trip_through_deflate() {
        let m = sample_matrix();
        let bytes = m.to_bytes(Compression::Deflate);
        let back = QRMatrix::from_bytes(&bytes, Compression::Deflate, 2).unwrap();
        assert_eq!(back.core_size(), 21);
        assert_eq!(back.size(), 21 + 4);
    }

    #[test]
    fn round_trip_through_gzip() {
        let m = sample_matrix();
        let bytes = m.to_bytes(Compression::GZip);
        let back = QRMatrix::from_bytes(&bytes, Compression::GZip, 0).unwrap();
        for y in 0..21u16 {
            for x in 0..21u16 {
                assert_eq!(m.core_get(x, y), back.core_get(x, y));
            }
        }
    }

    #[test]
    fn reject_bad_magic() {
        let mut bytes = sample_matrix().to_bytes(Compression::None);
        bytes[0] = 0;
        assert!(matches!(
            QRMatrix::from_bytes(&bytes, Compression::None, 0),
            Err(QrError::MalformedInput(_))
        ));
    }

    #[test]
    fn reject_truncated_payloads() {
        let mut bytes = sample_matrix().to_bytes(Compression::None);
        bytes.truncate(10);
        assert!(matches!(
            QRMatrix::from_bytes(&bytes, Compression::None, 0),
            Err(QrError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn reject_an_out_of_range_core_side() {
        let mut bytes = sample_matrix().to_bytes(Compression::None);
        bytes[3] = 200;
        assert!(matches!(
            QRMatrix::from_bytes(&bytes, Compression::None, 0),
            Err(QrError::MalformedInput(_))
        ));
    }
}
