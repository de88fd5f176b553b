//! The base converter: ternary and balanced-ternary text surfaces over the
//! base-81 limb representation.
//!
//! Both radices are decoded as a direct positional-weight Horner evaluation
//! (`acc = acc*3 + digit`, most significant digit first) rather than the
//! shift-then-reparse transform the original source used for balanced
//! ternary — that shift is an artifact of the source's own internal
//! representation, not a contract worth preserving here.

use crate::add::add as signed_add;
use crate::bigint::{magnitude_is_zero, BigInt, Sign};
use crate::config::Config;
use crate::div::magnitude_divmod_small;
use crate::error::{Error, Result};

/// Which text surface a string is read from / rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    /// Unsigned digits `0`, `1`, `2`, with an optional leading `-` carrying
    /// the overall sign.
    Ternary,
    /// Self-signed digits `T` (-1), `0`, `1`; no separate sign marker.
    BalancedTernary,
}

fn magnitude_mul3(a: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry: u32 = 0;
    for &d in a {
        let v = d as u32 * 3 + carry;
        out.push((v % 81) as u8);
        carry = v / 81;
    }
    while carry > 0 {
        out.push((carry % 81) as u8);
        carry /= 81;
    }
    if out.is_empty() {
        out.push(0);
    }
    out
}

fn magnitude_add_small(a: &[u8], add: u32) -> Vec<u8> {
    let mut out = a.to_vec();
    if out.is_empty() {
        out.push(0);
    }
    let mut carry = add;
    let mut i = 0;
    while carry > 0 {
        if i == out.len() {
            out.push(0);
        }
        let v = out[i] as u32 + carry;
        out[i] = (v % 81) as u8;
        carry = v / 81;
        i += 1;
    }
    out
}

/// Parses `text` under `radix` into a normalized [`BigInt`].
pub fn parse(text: &str, radix: Radix, cfg: &Config) -> Result<BigInt> {
    if text.is_empty() {
        return Err(Error::invalid("convert::parse", 0, "empty input"));
    }
    match radix {
        Radix::Ternary => parse_ternary(text, cfg),
        Radix::BalancedTernary => parse_balanced(text, cfg),
    }
}

fn parse_ternary(text: &str, cfg: &Config) -> Result<BigInt> {
    let neg = text.starts_with('-');
    let rest: &str = if neg { &text[1..] } else { text };
    if rest.is_empty() {
        return Err(Error::invalid("convert::parse", 0, "no digits after sign"));
    }

    let mut magnitude = vec![0u8];
    for (i, c) in rest.chars().enumerate() {
        let digit = match c {
            '0' => 0u32,
            '1' => 1,
            '2' => 2,
            _ => {
                return Err(Error::invalid(
                    "convert::parse",
                    i + (neg as usize),
                    format!("invalid ternary digit '{c}'"),
                ))
            }
        };
        magnitude = magnitude_mul3(&magnitude);
        magnitude = magnitude_add_small(&magnitude, digit);
    }

    let sign = if magnitude_is_zero(&magnitude) {
        Sign::Zero
    } else if neg {
        Sign::Neg
    } else {
        Sign::Pos
    };
    BigInt::from_magnitude(sign, magnitude, cfg)
}

fn parse_balanced(text: &str, cfg: &Config) -> Result<BigInt> {
    let mut acc = BigInt::zero();
    for (i, c) in text.chars().enumerate() {
        let trit: i64 = match c {
            'T' | 't' => -1,
            '0' => 0,
            '1' => 1,
            _ => {
                return Err(Error::invalid(
                    "convert::parse",
                    i,
                    format!("invalid balanced-ternary digit '{c}'"),
                ))
            }
        };
        let tripled_mag = magnitude_mul3(acc.magnitude());
        let tripled = BigInt::from_magnitude(acc.sign(), tripled_mag, cfg)?;
        acc = signed_add(&tripled, &BigInt::from_i64(trit), cfg)?;
    }
    Ok(acc)
}

/// Renders a normalized [`BigInt`] as text under `radix`.
pub fn to_text(n: &BigInt, radix: Radix) -> String {
    match radix {
        Radix::Ternary => to_ternary_text(n),
        Radix::BalancedTernary => to_balanced_text(n),
    }
}

fn to_ternary_text(n: &BigInt) -> String {
    if n.is_zero() {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    let mut cur = n.magnitude().to_vec();
    while !magnitude_is_zero(&cur) {
        let (q, r) = magnitude_divmod_small(&cur, 3);
        digits.push(r as u8);
        cur = q;
    }
    digits.reverse();
    let mut s = String::with_capacity(digits.len() + 1);
    if n.sign() == Sign::Neg {
        s.push('-');
    }
    for d in digits {
        s.push((b'0' + d) as char);
    }
    s
}

fn to_balanced_text(n: &BigInt) -> String {
    if n.is_zero() {
        return "0".to_string();
    }
    let mut trits: Vec<i8> = Vec::new();
    let mut cur = n.magnitude().to_vec();
    while !magnitude_is_zero(&cur) {
        let (q, r) = magnitude_divmod_small(&cur, 3);
        let (trit, q) = if r == 2 {
            (-1i8, magnitude_add_small(&q, 1))
        } else {
            (r as i8, q)
        };
        trits.push(trit);
        cur = q;
    }
    if n.sign() == Sign::Neg {
        for t in trits.iter_mut() {
            *t = -*t;
        }
    }
    trits.reverse();
    trits
        .iter()
        .map(|&t| match t {
            -1 => 'T',
            0 => '0',
            1 => '1',
            _ => unreachable!("balanced trit out of range"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ternary_round_trips() {
        let cfg = Config::default();
        for n in [0i64, 1, -1, 2, 80, 81, -12345, 999_999] {
            let big = BigInt::from_i64(n);
            let text = to_text(&big, Radix::Ternary);
            let back = parse(&text, Radix::Ternary, &cfg).unwrap();
            assert_eq!(back.to_i64().unwrap(), n, "text was {text}");
        }
    }

    #[test]
    fn balanced_round_trips() {
        let cfg = Config::default();
        for n in [0i64, 1, -1, 2, -2, 80, 81, -12345, 999_999] {
            let big = BigInt::from_i64(n);
            let text = to_text(&big, Radix::BalancedTernary);
            let back = parse(&text, Radix::BalancedTernary, &cfg).unwrap();
            assert_eq!(back.to_i64().unwrap(), n, "text was {text}");
        }
    }

    #[test]
    fn balanced_digits_are_minus_one_zero_one() {
        let n = BigInt::from_i64(5); // 5 = 9 - 3 - 1 = 1*9 + (-1)*3 + (-1)*1
        let text = to_text(&n, Radix::BalancedTernary);
        assert!(text.chars().all(|c| matches!(c, 'T' | '0' | '1')));
    }

    #[test]
    fn ternary_digits_are_zero_one_two() {
        let n = BigInt::from_i64(17);
        let text = to_text(&n, Radix::Ternary);
        assert!(text.chars().all(|c| matches!(c, '0' | '1' | '2')));
    }

    #[test]
    fn rejects_invalid_digit() {
        let cfg = Config::default();
        assert!(matches!(
            parse("012", Radix::BalancedTernary, &cfg),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            parse("T01T3", Radix::BalancedTernary, &cfg),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        let cfg = Config::default();
        assert!(matches!(parse("", Radix::Ternary, &cfg), Err(Error::InvalidInput { .. })));
        assert!(matches!(parse("-", Radix::Ternary, &cfg), Err(Error::InvalidInput { .. })));
    }
}
