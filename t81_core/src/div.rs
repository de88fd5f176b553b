//! The divisive kernel: base-81 long division by trial-digit search in
//! `[0, 80]` (the kernel's design notes reject the reciprocal-iteration
//! approach of the original source in favor of this simpler, directly
//! verifiable method), plus the shift operators built on top of it and the
//! cached multiplier.

use std::cmp::Ordering;

use crate::add::{magnitude_cmp, magnitude_sub_aligned};
use crate::bigint::{magnitude_is_zero, BigInt, Sign};
use crate::cancel::{self, CancelToken, NeverCancel};
use crate::error::{Error, Result};
use crate::mul::{mul, pow};
use crate::Kernel;

fn shift_up_one_digit(remainder: &[u8], digit: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(remainder.len() + 1);
    out.push(digit);
    out.extend_from_slice(remainder);
    out
}

fn scale_magnitude(a: &[u8], scalar: u8) -> Vec<u8> {
    if scalar == 0 {
        return vec![0];
    }
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry: u32 = 0;
    for &d in a {
        let v = d as u32 * scalar as u32 + carry;
        out.push((v % 81) as u8);
        carry = v / 81;
    }
    while carry > 0 {
        out.push((carry % 81) as u8);
        carry /= 81;
    }
    out
}

/// Short division by a single base-81 digit (`0..=80`): one pass from the
/// most significant limb down, carrying the remainder `*81` into the next
/// limb. Used for scalar operations (base conversion) where the divisor
/// always fits in one digit.
pub(crate) fn magnitude_divmod_small(a: &[u8], divisor: u32) -> (Vec<u8>, u32) {
    let mut quotient = vec![0u8; a.len()];
    let mut rem: u32 = 0;
    for i in (0..a.len()).rev() {
        let cur = rem * 81 + a[i] as u32;
        quotient[i] = (cur / divisor) as u8;
        rem = cur % divisor;
    }
    (quotient, rem)
}

/// Divides magnitude `dividend` by magnitude `divisor` (both little-endian,
/// `divisor` nonzero), returning `(quotient, remainder)` digit vectors.
/// Processes one dividend digit per step, most significant first, and at
/// each step finds the largest trial digit `q` in `[0, 80]` with
/// `divisor * q <= remainder` by binary search over that range.
pub(crate) fn divmod_magnitude(
    dividend: &[u8],
    divisor: &[u8],
    token: &dyn CancelToken,
) -> Result<(Vec<u8>, Vec<u8>)> {
    if magnitude_cmp(dividend, divisor) == Ordering::Less {
        return Ok((vec![0], dividend.to_vec()));
    }

    let n = dividend.len();
    let mut quotient = vec![0u8; n];
    let mut remainder: Vec<u8> = vec![0];

    for i in (0..n).rev() {
        cancel::check("div::long_division", token)?;
        remainder = shift_up_one_digit(&remainder, dividend[i]);

        let (mut lo, mut hi) = (0u8, 80u8);
        let mut best = 0u8;
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            let trial = scale_magnitude(divisor, mid);
            if magnitude_cmp(&trial, &remainder) != Ordering::Greater {
                best = mid;
                if mid == 80 {
                    break;
                }
                lo = mid + 1;
            } else {
                if mid == 0 {
                    break;
                }
                hi = mid - 1;
            }
        }

        let trial = scale_magnitude(divisor, best);
        remainder = magnitude_sub_aligned(&remainder, &trial);
        quotient[i] = best;
    }

    Ok((quotient, remainder))
}

/// Signed, truncating division and remainder: the quotient's sign is the
/// XOR of the operand signs; the remainder takes the dividend's sign (or
/// `Zero`), matching truncation toward zero.
pub(crate) fn divmod_cancellable(
    kernel: &Kernel,
    a: &BigInt,
    b: &BigInt,
    token: &dyn CancelToken,
) -> Result<(BigInt, BigInt)> {
    if b.is_zero() {
        return Err(Error::DivByZero { op: "divmod" });
    }
    if a.is_zero() {
        return Ok((BigInt::zero(), BigInt::zero()));
    }

    let (q_digits, r_digits) = divmod_magnitude(a.magnitude(), b.magnitude(), token)?;
    let quotient_sign = if magnitude_is_zero(&q_digits) {
        Sign::Zero
    } else {
        Sign::xor(a.sign(), b.sign())
    };
    let remainder_sign = if magnitude_is_zero(&r_digits) { Sign::Zero } else { a.sign() };

    let quotient = BigInt::from_magnitude(quotient_sign, q_digits, &kernel.config)?;
    let remainder = BigInt::from_magnitude(remainder_sign, r_digits, &kernel.config)?;
    Ok((quotient, remainder))
}

pub(crate) fn divmod(kernel: &Kernel, a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
    divmod_cancellable(kernel, a, b, &NeverCancel)
}

pub(crate) fn modulus(kernel: &Kernel, a: &BigInt, b: &BigInt) -> Result<BigInt> {
    Ok(divmod(kernel, a, b)?.1)
}

/// Left shift: `a * 3^k`, computed via the cached multiplier against a
/// precomputed power of three (not a limb-level shift — the limb radix is
/// 81, not 3, so no shift of `k` trits lines up with a whole number of
/// limbs in general).
pub(crate) fn shl(kernel: &Kernel, a: &BigInt, k: u32) -> Result<BigInt> {
    let three = BigInt::from_i64(3);
    let factor = pow(kernel, &three, k as i64)?;
    mul(kernel, a, &factor)
}

/// Right shift: `a / 3^k`, truncating, via the same precomputed power of
/// three.
pub(crate) fn shr(kernel: &Kernel, a: &BigInt, k: u32) -> Result<BigInt> {
    let three = BigInt::from_i64(3);
    let factor = pow(kernel, &three, k as i64)?;
    Ok(divmod(kernel, a, &factor)?.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn kernel() -> Kernel {
        Kernel::new(Config::default())
    }

    #[test]
    fn divmod_matches_i64_reference() {
        let kernel = kernel();
        for (x, y) in [(100i64, 7i64), (-100, 7), (100, -7), (-100, -7), (0, 5), (81, 81)] {
            let (q, r) = divmod(&kernel, &BigInt::from_i64(x), &BigInt::from_i64(y)).unwrap();
            assert_eq!(q.to_i64().unwrap(), x / y, "{x} / {y}");
            assert_eq!(r.to_i64().unwrap(), x % y, "{x} % {y}");
        }
    }

    #[test]
    fn divmod_by_zero_errors() {
        let kernel = kernel();
        assert!(divmod(&kernel, &BigInt::from_i64(5), &BigInt::zero()).is_err());
    }

    #[test]
    fn divmod_handles_multi_limb_divisor() {
        let kernel = kernel();
        let a = BigInt::from_i64(987_654_321);
        let b = BigInt::from_i64(12_345);
        let (q, r) = divmod(&kernel, &a, &b).unwrap();
        assert_eq!(q.to_i64().unwrap(), 987_654_321 / 12_345);
        assert_eq!(r.to_i64().unwrap(), 987_654_321 % 12_345);
    }

    #[test]
    fn shl_and_shr_invert_each_other() {
        let kernel = kernel();
        let a = BigInt::from_i64(40);
        let shifted = shl(&kernel, &a, 3).unwrap();
        assert_eq!(shifted.to_i64().unwrap(), 40 * 27);
        let back = shr(&kernel, &shifted, 3).unwrap();
        assert_eq!(back.to_i64().unwrap(), 40);
    }

    #[test]
    fn modulus_matches_divmod_remainder() {
        let kernel = kernel();
        let a = BigInt::from_i64(200);
        let b = BigInt::from_i64(9);
        assert_eq!(
            modulus(&kernel, &a, &b).unwrap().to_i64().unwrap(),
            divmod(&kernel, &a, &b).unwrap().1.to_i64().unwrap()
        );
    }
}
