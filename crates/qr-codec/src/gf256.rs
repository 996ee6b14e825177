//! Arithmetic in GF(256) under the QR Code primitive polynomial
//! x^8 + x^4 + x^3 + x^2 + 1 (0x11D), with primitive element alpha = 2.
//!
//! The exponent/log tables are process-wide immutable state, built once
//! behind a `OnceLock` rather than recomputed per call or kept as a mutable
//! global singleton.

use std::sync::OnceLock;

struct Tables {
    exp: [u8; 512],
    log: [u8; 256],
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];

        let mut x: u32 = 1;
        for i in 0..255usize {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= 0x11D;
            }
        }
        // Duplicate the period so `exp[i + 255] == exp[i]` lets callers add
        // two log values without reducing modulo 255 themselves.
        for i in 255..511 {
            exp[i] = exp[i - 255];
        }
        exp[511] = exp[0];

        Tables { exp, log }
    })
}

/// Multiplies two GF(256) field elements.
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    let i = usize::from(t.log[usize::from(a)]) + usize::from(t.log[usize::from(b)]);
    t.exp[i]
}

/// Divides `a` by `b` in GF(256). Panics if `b` is zero.
pub fn div(a: u8, b: u8) -> u8 {
    assert!(b != 0, "division by zero in GF(256)");
    if a == 0 {
        return 0;
    }
    let t = tables();
    let i = usize::from(t.log[usize::from(a)]) + 255 - usize::from(t.log[usize::from(b)]);
    t.exp[i]
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn hold_multiplicative_identity() {
        for a in 1..=255u16 {
            assert_eq!(mul(a as u8, 1), a as u8);
        }
    }

    #[test]
    fn zero_out_on_either_operand() {
        assert_eq!(mul(0, 200), 0);
        assert_eq!(mul(200, 0), 0);
    }

    #[test]
    fn invert_multiplication_with_division() {
        for a in 1..=255u16 {
            for b in 1..=255u16 {
                let product = mul(a as u8, b as u8);
                assert_eq!(div(product, b as u8), a as u8);
            }
        }
    }

    #[test]
    #[should_panic]
    fn reject_division_by_zero() {
        div(5, 0);
    }

    #[test]
    fn agree_with_russian_peasant_multiplication() {
        fn peasant(x: u8, y: u8) -> u8 {
            let mut z: u8 = 0;
            for i in (0..8).rev() {
                z = (z << 1) ^ ((z >> 7) * 0x1D);
                z ^= ((y >> i) & 1) * x;
            }
            z
        }
        for a in 0..=255u16 {
            for b in 0..=255u16 {
                assert_eq!(mul(a as u8, b as u8), peasant(a as u8, b as u8));
            }
        }
    }
}
