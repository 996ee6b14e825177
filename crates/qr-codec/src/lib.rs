//! Encodes text and byte data into QR Code Model 2 symbols (ISO/IEC 18004).
//!
//! The pipeline mirrors the standard's own stages: text analysis picks a
//! mode and ECI, the segment encoder packs a bit stream, Reed-Solomon adds
//! error correction per block, the module placer lays out function patterns
//! and data, and a mask selector picks the symbol with the lowest ISO
//! penalty score. [`QRMatrix`] holds the finished result and can round-trip
//! through a compact serialized form.
//!
//! # Examples
//!
//! ```
//! use qr_codec::{encode, ECCLevel, EncodeOptions};
//!
//! let matrix = encode("HELLO WORLD", ECCLevel::Quartile, &EncodeOptions::default()).unwrap();
//! for y in 0..matrix.size() {
//!     for x in 0..matrix.size() {
//!         let _dark = matrix.get(y, x);
//!     }
//! }
//! ```

mod analyzer;
mod bitstream;
mod block;
mod ecc_level;
mod encode;
mod error;
mod gf256;
mod mask;
mod matrix;
mod placer;
mod reed_solomon;
mod segment;
mod serialize;
mod tables;
mod version;

pub use analyzer::EciMode;
pub use ecc_level::ECCLevel;
pub use encode::{encode, select_version, EncodeOptions};
pub use error::QrError;
pub use mask::Mask;
pub use matrix::QRMatrix;
pub use serialize::Compression;
pub use version::Version;
