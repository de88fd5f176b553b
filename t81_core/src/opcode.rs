//! The discrete checksummed opcode surface: a compact wire format for a
//! single binary operation over `i64` operands, meant for callers that want
//! a fixed-width instruction rather than the free-form expression
//! evaluator. Encodes as `<op>:<a>:<b>:<checksum>`, each field a ternary
//! digit string (see [`crate::convert`]), with `checksum` the sum of every
//! trit in the first three fields, mod 9.

use strum::FromRepr;

use crate::bigint::BigInt;
use crate::config::Config;
use crate::convert::{self, Radix};
use crate::error::{Error, Result};

/// The eight operations the opcode surface supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(usize)]
pub enum DiscreteOp {
    Add = 0,
    Sub = 1,
    Mul = 2,
    Mod = 3,
    And = 4,
    Or = 5,
    Exp = 6,
    Gcd = 7,
}

fn trit_checksum(body: &str) -> u32 {
    body.chars().filter_map(|c| c.to_digit(3)).sum::<u32>() % 9
}

/// Encodes an operation and its two operands into the wire format.
pub fn encode(op: DiscreteOp, a: i64, b: i64) -> String {
    let op_text = convert::to_text(&BigInt::from_i64(op as i64), Radix::Ternary);
    let a_text = convert::to_text(&BigInt::from_i64(a), Radix::Ternary);
    let b_text = convert::to_text(&BigInt::from_i64(b), Radix::Ternary);
    let body = format!("{op_text}:{a_text}:{b_text}");
    let checksum = trit_checksum(&body);
    format!("{body}:{checksum}")
}

/// Decodes and checksum-validates a wire-format instruction.
pub fn decode(text: &str) -> Result<(DiscreteOp, i64, i64)> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 4 {
        return Err(Error::invalid(
            "opcode::decode",
            0,
            "expected 4 ':'-separated fields",
        ));
    }
    let body = format!("{}:{}:{}", parts[0], parts[1], parts[2]);
    let expected = trit_checksum(&body);
    let given: u32 = parts[3]
        .parse()
        .map_err(|_| Error::invalid("opcode::decode", 3, "checksum is not a base-10 number"))?;
    if given != expected {
        return Err(Error::invalid(
            "opcode::decode",
            3,
            format!("checksum mismatch: expected {expected}, got {given}"),
        ));
    }

    let cfg = Config::default();
    let op_val = convert::parse(parts[0], Radix::Ternary, &cfg)?.to_i64()?;
    let op = DiscreteOp::from_repr(usize::try_from(op_val).unwrap_or(usize::MAX))
        .ok_or_else(|| Error::invalid("opcode::decode", 0, format!("unknown opcode {op_val}")))?;
    let a = convert::parse(parts[1], Radix::Ternary, &cfg)?.to_i64()?;
    let b = convert::parse(parts[2], Radix::Ternary, &cfg)?.to_i64()?;
    Ok((op, a, b))
}

/// `true` iff `text` decodes and its checksum validates.
pub fn validate(text: &str) -> bool {
    decode(text).is_ok()
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Executes a decoded operation over its two `i64` operands.
pub fn execute(op: DiscreteOp, a: i64, b: i64) -> Result<i64> {
    match op {
        DiscreteOp::Add => a.checked_add(b).ok_or_else(|| Error::overflow("opcode::execute", "ADD overflowed i64")),
        DiscreteOp::Sub => a.checked_sub(b).ok_or_else(|| Error::overflow("opcode::execute", "SUB overflowed i64")),
        DiscreteOp::Mul => a.checked_mul(b).ok_or_else(|| Error::overflow("opcode::execute", "MUL overflowed i64")),
        DiscreteOp::Mod => {
            if b == 0 {
                return Err(Error::DivByZero { op: "opcode::execute" });
            }
            a.checked_rem(b).ok_or_else(|| Error::overflow("opcode::execute", "MOD overflowed i64"))
        }
        DiscreteOp::And => Ok(a & b),
        DiscreteOp::Or => Ok(a | b),
        DiscreteOp::Exp => {
            if b < 0 {
                return Err(Error::NegativeExponent { op: "opcode::execute" });
            }
            let exp = u32::try_from(b).map_err(|_| Error::overflow("opcode::execute", "EXP exponent too large"))?;
            a.checked_pow(exp).ok_or_else(|| Error::overflow("opcode::execute", "EXP overflowed i64"))
        }
        DiscreteOp::Gcd => Ok(gcd(a.abs(), b.abs())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trips() {
        for (op, a, b) in [
            (DiscreteOp::Add, 5i64, 7i64),
            (DiscreteOp::Sub, -3, 9),
            (DiscreteOp::Gcd, 48, 18),
        ] {
            let text = encode(op, a, b);
            let (got_op, got_a, got_b) = decode(&text).unwrap();
            assert_eq!(got_op, op);
            assert_eq!((got_a, got_b), (a, b));
        }
    }

    #[test]
    fn decode_rejects_tampered_checksum() {
        let mut text = encode(DiscreteOp::Add, 1, 2);
        let last = text.pop().unwrap();
        let bumped = ((last.to_digit(10).unwrap() + 1) % 9).to_string();
        text.push_str(&bumped);
        assert!(!validate(&text));
    }

    #[test]
    fn decode_rejects_malformed_text() {
        assert!(decode("not-an-opcode").is_err());
        assert!(decode("0:1:2").is_err());
    }

    #[test]
    fn execute_matches_known_results() {
        assert_eq!(execute(DiscreteOp::Add, 2, 3).unwrap(), 5);
        assert_eq!(execute(DiscreteOp::Sub, 5, 3).unwrap(), 2);
        assert_eq!(execute(DiscreteOp::Mul, 4, 5).unwrap(), 20);
        assert_eq!(execute(DiscreteOp::Mod, 10, 3).unwrap(), 1);
        assert_eq!(execute(DiscreteOp::And, 0b110, 0b011).unwrap(), 0b010);
        assert_eq!(execute(DiscreteOp::Or, 0b110, 0b011).unwrap(), 0b111);
        assert_eq!(execute(DiscreteOp::Exp, 2, 10).unwrap(), 1024);
        assert_eq!(execute(DiscreteOp::Gcd, 48, 18).unwrap(), 6);
    }

    #[test]
    fn execute_rejects_mod_by_zero_and_negative_exponent() {
        assert!(execute(DiscreteOp::Mod, 5, 0).is_err());
        assert!(execute(DiscreteOp::Exp, 2, -1).is_err());
    }
}
