//! The additive kernel: same-sign magnitude addition with carry, opposite-
//! sign magnitude subtraction with borrow, and the sign dispatch that turns
//! those two primitives into signed `add`/`sub`.

use std::cmp::Ordering;

use crate::bigint::{BigInt, Sign};
use crate::config::Config;
use crate::error::Result;

/// Adds two magnitudes (little-endian base-81 digit slices), returning a
/// digit vector of length `max(|a|, |b|) + 1` before normalization; any
/// carry out of the top limb extends the length exactly once.
pub(crate) fn magnitude_add(a: &[u8], b: &[u8]) -> Vec<u8> {
    let len = a.len().max(b.len());
    let mut out = Vec::with_capacity(len + 1);
    let mut carry: u16 = 0;
    for i in 0..len {
        let da = *a.get(i).unwrap_or(&0) as u16;
        let db = *b.get(i).unwrap_or(&0) as u16;
        let sum = da + db + carry;
        out.push((sum % 81) as u8);
        carry = sum / 81;
    }
    if carry > 0 {
        out.push(carry as u8);
    }
    out
}

/// Subtracts magnitude `b` from magnitude `a`, where `a >= b`. Proceeds
/// right-to-left with borrow; never underflows past the most significant
/// limb given the precondition.
pub(crate) fn magnitude_sub(a: &[u8], b: &[u8]) -> Vec<u8> {
    debug_assert!(magnitude_cmp(a, b) != Ordering::Less);
    let mut out = Vec::with_capacity(a.len());
    let mut borrow: i16 = 0;
    for i in 0..a.len() {
        let da = a[i] as i16;
        let db = *b.get(i).unwrap_or(&0) as i16;
        let mut diff = da - db - borrow;
        if diff < 0 {
            diff += 81;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(diff as u8);
    }
    out
}

/// Subtracts `b` from `a` where the two slices may have different lengths
/// and `a >= b` numerically; pads the shorter slice with zero limbs before
/// delegating to [`magnitude_sub`]. Used by Karatsuba, where the three
/// partial products rarely share a length.
pub(crate) fn magnitude_sub_aligned(a: &[u8], b: &[u8]) -> Vec<u8> {
    let len = a.len().max(b.len());
    let mut pa = a.to_vec();
    pa.resize(len, 0);
    let mut pb = b.to_vec();
    pb.resize(len, 0);
    magnitude_sub(&pa, &pb)
}

/// Adds `addend` into `base`, shifted `offset` limbs (i.e. scaled by
/// `81^offset`). Used by Karatsuba to recombine partial products.
pub(crate) fn magnitude_add_shifted(base: &[u8], addend: &[u8], offset: usize) -> Vec<u8> {
    if addend.iter().all(|&d| d == 0) {
        return base.to_vec();
    }
    let mut shifted = vec![0u8; offset];
    shifted.extend_from_slice(addend);
    magnitude_add(base, &shifted)
}

/// Compares two magnitudes without requiring normalized lengths (used
/// internally where inputs may carry a pending high zero limb).
pub(crate) fn magnitude_cmp(a: &[u8], b: &[u8]) -> Ordering {
    fn effective_len(d: &[u8]) -> usize {
        let mut len = d.len();
        while len > 0 && d[len - 1] == 0 {
            len -= 1;
        }
        len
    }
    let (la, lb) = (effective_len(a), effective_len(b));
    match la.cmp(&lb) {
        Ordering::Equal => {
            for i in (0..la).rev() {
                match a[i].cmp(&b[i]) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            Ordering::Equal
        }
        other => other,
    }
}

/// Signed addition. Same-sign (or one-zero) operands add magnitudes and
/// keep the shared sign; opposite-sign operands compare magnitudes and
/// subtract the smaller from the larger, taking the larger operand's sign.
pub fn add(a: &BigInt, b: &BigInt, cfg: &Config) -> Result<BigInt> {
    if a.is_zero() {
        return Ok(b.clone());
    }
    if b.is_zero() {
        return Ok(a.clone());
    }
    if a.sign() == b.sign() {
        let digits = magnitude_add(a.magnitude(), b.magnitude());
        BigInt::from_magnitude(a.sign(), digits, cfg)
    } else {
        match BigInt::cmp_magnitude(a, b) {
            Ordering::Equal => Ok(BigInt::zero()),
            Ordering::Greater => {
                let digits = magnitude_sub(a.magnitude(), b.magnitude());
                BigInt::from_magnitude(a.sign(), digits, cfg)
            }
            Ordering::Less => {
                let digits = magnitude_sub(b.magnitude(), a.magnitude());
                BigInt::from_magnitude(b.sign(), digits, cfg)
            }
        }
    }
}

/// Signed subtraction: `a - b = a + (-b)`, semantically (no textual negation).
pub fn sub(a: &BigInt, b: &BigInt, cfg: &Config) -> Result<BigInt> {
    add(a, &b.neg(), cfg)
}
