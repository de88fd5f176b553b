//! Kleene trit logic: `and` (min), `or` (max), `not` (negate), `xor`
//! (`(a + b) % 3`), operating position-wise over the unsigned trit
//! decomposition of a value's magnitude. Trits are encoded `0` = false,
//! `1` = unknown, `2` = true. Shorter operands are zero-padded; results
//! always carry `Sign::Pos` (or `Sign::Zero` if every trit is zero) —
//! logic results have no notion of sign.

use crate::bigint::{magnitude_is_zero, BigInt, Sign};
use crate::config::Config;
use crate::error::Result;

fn magnitude_to_trits(mag: &[u8]) -> Vec<u8> {
    let mut trits = Vec::with_capacity(mag.len() * 4);
    for &limb in mag {
        let mut d = limb;
        for _ in 0..4 {
            trits.push(d % 3);
            d /= 3;
        }
    }
    trits
}

fn trits_to_magnitude(trits: &[u8]) -> Vec<u8> {
    let mut mag = Vec::with_capacity(trits.len().div_ceil(4));
    for chunk in trits.chunks(4) {
        let mut d: u32 = 0;
        for (i, &t) in chunk.iter().enumerate() {
            d += t as u32 * 3u32.pow(i as u32);
        }
        mag.push(d as u8);
    }
    if mag.is_empty() {
        mag.push(0);
    }
    mag
}

fn combine(a: &BigInt, b: &BigInt, cfg: &Config, op: impl Fn(u8, u8) -> u8) -> Result<BigInt> {
    let mut ta = magnitude_to_trits(a.magnitude());
    let mut tb = magnitude_to_trits(b.magnitude());
    let len = ta.len().max(tb.len());
    ta.resize(len, 0);
    tb.resize(len, 0);
    let out: Vec<u8> = ta.iter().zip(tb.iter()).map(|(&x, &y)| op(x, y)).collect();
    let mag = trits_to_magnitude(&out);
    let sign = if magnitude_is_zero(&mag) { Sign::Zero } else { Sign::Pos };
    BigInt::from_magnitude(sign, mag, cfg)
}

pub fn and(a: &BigInt, b: &BigInt, cfg: &Config) -> Result<BigInt> {
    combine(a, b, cfg, |x, y| x.min(y))
}

pub fn or(a: &BigInt, b: &BigInt, cfg: &Config) -> Result<BigInt> {
    combine(a, b, cfg, |x, y| x.max(y))
}

pub fn xor(a: &BigInt, b: &BigInt, cfg: &Config) -> Result<BigInt> {
    combine(a, b, cfg, |x, y| (x + y) % 3)
}

pub fn not(a: &BigInt, cfg: &Config) -> Result<BigInt> {
    let trits = magnitude_to_trits(a.magnitude());
    let negated: Vec<u8> = trits.iter().map(|&t| 2 - t).collect();
    let mag = trits_to_magnitude(&negated);
    let sign = if magnitude_is_zero(&mag) { Sign::Zero } else { Sign::Pos };
    BigInt::from_magnitude(sign, mag, cfg)
}
