//! The multiplicative kernel: schoolbook convolution for small operands,
//! recursive Karatsuba above `karatsuba_threshold`, an optional FFT
//! convolution path above `fft_threshold` (falling back to Karatsuba on a
//! failed postcondition), and the cached, sign-aware entry point used by
//! the rest of the crate.

use crate::add::{magnitude_add, magnitude_add_shifted, magnitude_sub_aligned};
use crate::bigint::{BigInt, Sign};
use crate::cache::cache_key;
use crate::cancel::{self, CancelToken, NeverCancel};
use crate::error::{Error, Result};
use crate::fft::fft_multiply;
use crate::Kernel;

/// Operand size, in limbs, below which Karatsuba's recursion overhead isn't
/// worth it even once the top-level dispatch has already chosen Karatsuba
/// over schoolbook; mirrors the schoolbook/Karatsuba crossover used by the
/// kernel's design notes for the recursive base case.
const KARATSUBA_RECURSION_FLOOR: usize = 8;

/// Convolves two base-81 magnitudes the schoolbook way: O(n*m) digit
/// products with carry propagation. Returns an unnormalized digit vector.
pub(crate) fn schoolbook(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut acc = vec![0u32; a.len() + b.len()];
    for (i, &da) in a.iter().enumerate() {
        if da == 0 {
            continue;
        }
        let mut carry: u32 = 0;
        for (j, &db) in b.iter().enumerate() {
            let idx = i + j;
            let sum = acc[idx] + da as u32 * db as u32 + carry;
            acc[idx] = sum % 81;
            carry = sum / 81;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let sum = acc[k] + carry;
            acc[k] = sum % 81;
            carry = sum / 81;
            k += 1;
        }
    }
    acc.into_iter().map(|v| v as u8).collect()
}

fn pad(v: &[u8], n: usize) -> Vec<u8> {
    let mut out = v.to_vec();
    out.resize(n, 0);
    out
}

/// Recursive Karatsuba multiplication. Polls `token` once per recursive
/// call, so a cancellation request is observed between halves rather than
/// only at the top level.
pub(crate) fn karatsuba(a: &[u8], b: &[u8], token: &dyn CancelToken) -> Result<Vec<u8>> {
    cancel::check("mul::karatsuba", token)?;

    let n = a.len().max(b.len());
    if n <= KARATSUBA_RECURSION_FLOOR {
        return Ok(schoolbook(a, b));
    }

    let a = pad(a, n);
    let b = pad(b, n);
    let half = n / 2;
    let (a0, a1) = (&a[..half], &a[half..]);
    let (b0, b1) = (&b[..half], &b[half..]);

    let p1 = karatsuba(a0, b0, token)?;
    let p2 = karatsuba(a1, b1, token)?;
    let sum_a = magnitude_add(a0, a1);
    let sum_b = magnitude_add(b0, b1);
    let p3 = karatsuba(&sum_a, &sum_b, token)?;

    // middle = p3 - p1 - p2; always non-negative since p3 = a0*b0 + a1*b1 +
    // (a0*b1 + a1*b0) and the cross terms are themselves non-negative.
    let middle = magnitude_sub_aligned(&magnitude_sub_aligned(&p3, &p1), &p2);

    let result = magnitude_add_shifted(&p1, &middle, half);
    let result = magnitude_add_shifted(&result, &p2, 2 * half);
    Ok(result)
}

/// Multiplies two magnitudes using the kernel's configured thresholds:
/// schoolbook below `karatsuba_threshold`, FFT above `fft_threshold` (with
/// a Karatsuba fallback on postcondition failure), Karatsuba otherwise.
fn multiply_magnitudes(kernel: &Kernel, a: &[u8], b: &[u8], token: &dyn CancelToken) -> Result<Vec<u8>> {
    let n = a.len().max(b.len());
    let cfg = &kernel.config;
    if n <= cfg.karatsuba_threshold {
        return Ok(schoolbook(a, b));
    }
    if let Some(fft_threshold) = cfg.fft_threshold {
        if n >= fft_threshold {
            if let Some(digits) = fft_multiply(a, b) {
                return Ok(digits);
            }
            tracing::warn!(op = "mul::fft", "FFT postcondition failed, falling back to Karatsuba");
        }
    }
    karatsuba(a, b, token)
}

/// Signed, cached multiplication: the entry point used by [`Kernel::mul`].
#[tracing::instrument(level = "trace", skip(kernel, a, b, token))]
pub(crate) fn mul_cancellable(
    kernel: &Kernel,
    a: &BigInt,
    b: &BigInt,
    token: &dyn CancelToken,
) -> Result<BigInt> {
    if a.is_zero() || b.is_zero() {
        return Ok(BigInt::zero());
    }

    let key = cache_key(a, b);
    if let Some(hit) = kernel.cache.get(&key) {
        tracing::trace!(op = "mul::cache", "hit");
        return Ok(hit);
    }
    tracing::trace!(op = "mul::cache", "miss");

    let sign = Sign::xor(a.sign(), b.sign());
    let digits = multiply_magnitudes(kernel, a.magnitude(), b.magnitude(), token)?;
    let result = BigInt::from_magnitude(sign, digits, &kernel.config)?;
    kernel.cache.insert(key, result.clone());
    Ok(result)
}

pub(crate) fn mul(kernel: &Kernel, a: &BigInt, b: &BigInt) -> Result<BigInt> {
    mul_cancellable(kernel, a, b, &NeverCancel)
}

/// Repeated-squaring exponentiation over the cached multiplier. `0^0 = 1`
/// per the kernel's convention; negative exponents are rejected and
/// exponents above `exponent_limit` overflow rather than run unbounded.
pub(crate) fn pow(kernel: &Kernel, base: &BigInt, exponent: i64) -> Result<BigInt> {
    if exponent < 0 {
        return Err(Error::NegativeExponent { op: "pow" });
    }
    let exponent = exponent as u64;
    if exponent > kernel.config.exponent_limit as u64 {
        return Err(Error::overflow("pow", format!("exponent {exponent} exceeds configured limit")));
    }
    if exponent == 0 {
        return Ok(BigInt::from_i64(1));
    }
    if base.is_zero() {
        return Ok(BigInt::zero());
    }

    let mut result = BigInt::from_i64(1);
    let mut base_pow = base.clone();
    let mut e = exponent;
    while e > 0 {
        if e & 1 == 1 {
            result = mul(kernel, &result, &base_pow)?;
        }
        e >>= 1;
        if e > 0 {
            base_pow = mul(kernel, &base_pow, &base_pow)?;
        }
    }
    Ok(result)
}

/// Factorial, bounded by `factorial_limit` (small inputs only — the
/// accumulator walks up through the cached multiplier but the loop bound
/// itself is a plain `i64` count).
pub(crate) fn fact(kernel: &Kernel, n: &BigInt) -> Result<BigInt> {
    let n = n.to_i64().map_err(|_| Error::overflow("fact", "argument does not fit in i64"))?;
    if n < 0 {
        return Err(Error::Negative { op: "fact" });
    }
    if n > kernel.config.factorial_limit {
        return Err(Error::overflow("fact", format!("{n} exceeds configured factorial_limit")));
    }
    let mut result = BigInt::from_i64(1);
    for k in 2..=n {
        result = mul(kernel, &result, &BigInt::from_i64(k))?;
    }
    Ok(result)
}
