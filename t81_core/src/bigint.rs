//! `BigInt`: sign plus a base-81 limb store, normalized so that every public
//! operation leaves high-order zero limbs stripped and zero itself
//! represented as a single `0` limb with `Sign::Zero`.

use std::cmp::Ordering;
use std::fmt;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::limb::LimbStore;

/// The sign of a [`BigInt`]. Zero always carries `Sign::Zero`; every nonzero
/// value carries `Sign::Neg` or `Sign::Pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Neg,
    Zero,
    Pos,
}

impl Sign {
    pub(crate) fn of_i64(n: i64) -> Sign {
        match n.cmp(&0) {
            Ordering::Less => Sign::Neg,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Pos,
        }
    }

    /// Sign of a product/quotient: XOR of two nonzero signs.
    pub(crate) fn xor(a: Sign, b: Sign) -> Sign {
        match (a, b) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (Sign::Pos, Sign::Pos) | (Sign::Neg, Sign::Neg) => Sign::Pos,
            _ => Sign::Neg,
        }
    }

    pub(crate) fn negate(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Zero => Sign::Zero,
            Sign::Pos => Sign::Neg,
        }
    }
}

/// True when every digit of a little-endian magnitude slice is zero.
pub(crate) fn magnitude_is_zero(d: &[u8]) -> bool {
    d.iter().all(|&x| x == 0)
}

/// An arbitrary-precision integer: a sign and a magnitude of base-81 limbs,
/// limb `i` carrying weight `81^i`.
pub struct BigInt {
    pub(crate) sign: Sign,
    pub(crate) limbs: LimbStore,
}

impl Clone for BigInt {
    fn clone(&self) -> Self {
        BigInt {
            sign: self.sign,
            limbs: self.limbs.clone(),
        }
    }
}

impl BigInt {
    /// The canonical zero value (single limb `[0]`, sign `Zero`).
    pub fn zero() -> BigInt {
        BigInt {
            sign: Sign::Zero,
            limbs: LimbStore::allocate(1, &Config::default())
                .expect("single-limb allocation cannot fail"),
        }
    }

    /// Builds a normalized `BigInt` from a sign and a little-endian (weight
    /// `81^i` at index `i`) magnitude digit vector. High-order zero digits
    /// are stripped; an all-zero magnitude forces `Sign::Zero` regardless of
    /// the `sign` argument.
    pub(crate) fn from_magnitude(sign: Sign, mut digits: Vec<u8>, cfg: &Config) -> Result<BigInt> {
        if digits.is_empty() {
            digits.push(0);
        }
        let mut len = digits.len();
        while len > 1 && digits[len - 1] == 0 {
            len -= 1;
        }
        digits.truncate(len);
        let sign = if digits.iter().all(|&d| d == 0) {
            Sign::Zero
        } else {
            sign
        };
        let mut store =
            LimbStore::allocate(digits.len(), cfg).map_err(|_| Error::allocation("bigint::from_magnitude", "limb store"))?;
        store.view_mut().copy_from_slice(&digits);
        Ok(BigInt { sign, limbs: store })
    }

    /// Magnitude digits, little-endian by weight `81^i`.
    pub fn magnitude(&self) -> &[u8] {
        self.limbs.view()
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.sign, Sign::Zero)
    }

    /// Negation: flips the sign, leaves the magnitude untouched. `-0 = 0`.
    pub fn neg(&self) -> BigInt {
        BigInt {
            sign: self.sign.negate(),
            limbs: self.limbs.clone(),
        }
    }

    /// Compares the magnitudes of two normalized `BigInt`s, ignoring sign.
    pub fn cmp_magnitude(a: &BigInt, b: &BigInt) -> Ordering {
        let (da, db) = (a.magnitude(), b.magnitude());
        match da.len().cmp(&db.len()) {
            Ordering::Equal => {
                for i in (0..da.len()).rev() {
                    match da[i].cmp(&db[i]) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                Ordering::Equal
            }
            other => other,
        }
    }

    /// Converts a signed machine integer into base-81 limbs.
    pub fn from_i64(n: i64) -> BigInt {
        let sign = Sign::of_i64(n);
        if sign == Sign::Zero {
            return BigInt::zero();
        }
        // i128 avoids the i64::MIN.abs() overflow.
        let mut mag = (n as i128).unsigned_abs();
        let mut digits = Vec::new();
        while mag > 0 {
            digits.push((mag % 81) as u8);
            mag /= 81;
        }
        BigInt::from_magnitude(sign, digits, &Config::default())
            .expect("from_i64 cannot exceed the inline allocation path")
    }

    /// Converts this value back to `i64`, or signals `Overflow` if it does
    /// not fit.
    pub fn to_i64(&self) -> Result<i64> {
        if self.is_zero() {
            return Ok(0);
        }
        let mut acc: i128 = 0;
        for &limb in self.magnitude().iter().rev() {
            acc = acc
                .checked_mul(81)
                .and_then(|v| v.checked_add(limb as i128))
                .ok_or_else(|| Error::overflow("bigint::to_i64", "magnitude exceeds i128 scratch space"))?;
        }
        if self.sign == Sign::Neg {
            acc = -acc;
        }
        i64::try_from(acc).map_err(|_| Error::overflow("bigint::to_i64", "value does not fit in i64"))
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.magnitude() == other.magnitude()
    }
}
impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        use Sign::*;
        match (self.sign, other.sign) {
            (Neg, Pos) | (Neg, Zero) | (Zero, Pos) => Ordering::Less,
            (Pos, Neg) | (Zero, Neg) | (Pos, Zero) => Ordering::Greater,
            (Zero, Zero) => Ordering::Equal,
            (Pos, Pos) => BigInt::cmp_magnitude(self, other),
            (Neg, Neg) => BigInt::cmp_magnitude(other, self),
        }
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigInt")
            .field("sign", &self.sign)
            .field("limbs", &self.magnitude())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_canonical() {
        let z = BigInt::zero();
        assert_eq!(z.magnitude(), &[0]);
        assert_eq!(z.sign(), Sign::Zero);
    }

    #[test]
    fn from_i64_round_trips() {
        for n in [0i64, 1, -1, 80, 81, 82, -82, i64::MAX, i64::MIN, 12345] {
            let b = BigInt::from_i64(n);
            assert_eq!(b.to_i64().unwrap(), n, "round trip failed for {n}");
        }
    }

    #[test]
    fn to_i64_overflow_is_reported() {
        let huge = BigInt::from_magnitude(
            Sign::Pos,
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            &Config::default(),
        )
        .unwrap();
        assert!(huge.to_i64().is_err());
    }

    #[test]
    fn cmp_magnitude_orders_by_length_then_digits() {
        let a = BigInt::from_i64(80);
        let b = BigInt::from_i64(81);
        assert_eq!(BigInt::cmp_magnitude(&a, &b), Ordering::Less);
    }

    #[test]
    fn ordering_respects_sign() {
        let neg = BigInt::from_i64(-5);
        let zero = BigInt::zero();
        let pos = BigInt::from_i64(5);
        assert!(neg < zero);
        assert!(zero < pos);
        assert!(neg < pos);
    }

    #[test]
    fn neg_flips_sign_only() {
        let five = BigInt::from_i64(5);
        let neg_five = five.neg();
        assert_eq!(neg_five.to_i64().unwrap(), -5);
        assert_eq!(neg_five.magnitude(), five.magnitude());
    }
}
