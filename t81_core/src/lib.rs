//! `t81_core`: an arbitrary-precision ternary (base-3) arithmetic kernel.
//!
//! Values are stored sign-and-magnitude, with the magnitude packed into
//! base-81 limbs (four trits per limb). The additive kernel, base
//! conversion, and Kleene trit logic need no shared state and are plain
//! functions over [`BigInt`]; the multiplicative and divisive kernels share
//! a bounded multiplication cache, so those — along with the matrix layer
//! and expression evaluator that are built on top of them — are reached
//! through a [`Kernel`], an explicit context built from a [`Config`].
//!
//! ```
//! use t81_core::{Config, Kernel};
//!
//! let kernel = Kernel::new(Config::default());
//! let result = kernel.eval("1 + 1 * 2").unwrap();
//! assert_eq!(result.to_i64().unwrap(), 3);
//! ```

mod add;
mod bigint;
mod cache;
mod cancel;
mod config;
mod convert;
mod div;
mod error;
mod eval;
mod fft;
mod limb;
mod logic;
mod matrix;
mod mul;
mod opcode;

pub use add::{add, sub};
pub use bigint::{BigInt, Sign};
pub use cancel::{CancelToken, NeverCancel};
pub use config::Config;
pub use convert::{parse, to_text, Radix};
pub use error::{Error, Result};
pub use logic::{and, not, or, xor};
pub use matrix::Matrix;
pub use opcode::{decode, encode, execute, validate, DiscreteOp};

use cache::MulCache;

/// The shared kernel context: a [`Config`] plus the bounded multiplication
/// cache every multiplication, division, `pow`, `fact`, shift, matrix
/// multiply, and expression evaluation routes through.
pub struct Kernel {
    config: Config,
    cache: MulCache,
}

impl Kernel {
    /// Builds a fresh kernel with an empty cache sized from
    /// `config.cache_capacity`.
    pub fn new(config: Config) -> Self {
        let cache = MulCache::new(config.cache_capacity);
        Kernel { config, cache }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Signed multiplication. Consults and populates the shared cache; runs
    /// schoolbook, Karatsuba, or FFT convolution depending on operand size
    /// and `config`.
    #[tracing::instrument(level = "trace", skip(self, a, b))]
    pub fn mul(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        mul::mul(self, a, b)
    }

    /// As [`Kernel::mul`], but polls `token` between Karatsuba recursive
    /// halves so a long multiplication can be aborted cooperatively.
    pub fn mul_cancellable(&self, a: &BigInt, b: &BigInt, token: &dyn CancelToken) -> Result<BigInt> {
        mul::mul_cancellable(self, a, b, token)
    }

    /// Exponentiation by repeated squaring over the cached multiplier.
    /// Rejects negative exponents and exponents past `config.exponent_limit`.
    pub fn pow(&self, base: &BigInt, exponent: i64) -> Result<BigInt> {
        mul::pow(self, base, exponent)
    }

    /// Factorial, bounded by `config.factorial_limit`.
    pub fn fact(&self, n: &BigInt) -> Result<BigInt> {
        mul::fact(self, n)
    }

    /// Truncating division and remainder. The remainder takes the
    /// dividend's sign.
    #[tracing::instrument(level = "trace", skip(self, a, b))]
    pub fn divmod(&self, a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
        div::divmod(self, a, b)
    }

    /// As [`Kernel::divmod`], polling `token` between digit positions.
    pub fn divmod_cancellable(&self, a: &BigInt, b: &BigInt, token: &dyn CancelToken) -> Result<(BigInt, BigInt)> {
        div::divmod_cancellable(self, a, b, token)
    }

    pub fn modulus(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        div::modulus(self, a, b)
    }

    /// `a * 3^k`. Rejects a negative `k`.
    pub fn shl(&self, a: &BigInt, k: i64) -> Result<BigInt> {
        let k = u32::try_from(k).map_err(|_| Error::invalid("kernel::shl", 1, "shift amount must be non-negative"))?;
        div::shl(self, a, k)
    }

    /// `a / 3^k`, truncating. Rejects a negative `k`.
    pub fn shr(&self, a: &BigInt, k: i64) -> Result<BigInt> {
        let k = u32::try_from(k).map_err(|_| Error::invalid("kernel::shr", 1, "shift amount must be non-negative"))?;
        div::shr(self, a, k)
    }

    /// Evaluates an infix expression (`+ - * / % & |`, unary minus, parens,
    /// ternary/balanced-ternary literals) to a single [`BigInt`].
    pub fn eval(&self, text: &str) -> Result<BigInt> {
        eval::eval(self, text)
    }

    /// Matrix multiplication, routing every inner-product term through
    /// this kernel's cached multiplier.
    pub fn matrix_mul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.mul(b, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_eval_matches_manual_arithmetic() {
        let kernel = Kernel::new(Config::default());
        assert_eq!(kernel.eval("2 * (1 + 1)").unwrap().to_i64().unwrap(), 4);
    }

    #[test]
    fn kernel_shl_shr_round_trip() {
        let kernel = Kernel::new(Config::default());
        let a = BigInt::from_i64(7);
        let shifted = kernel.shl(&a, 2).unwrap();
        assert_eq!(shifted.to_i64().unwrap(), 7 * 9);
        let back = kernel.shr(&shifted, 2).unwrap();
        assert_eq!(back.to_i64().unwrap(), 7);
    }

    #[test]
    fn kernel_shl_rejects_negative_shift() {
        let kernel = Kernel::new(Config::default());
        assert!(kernel.shl(&BigInt::from_i64(1), -1).is_err());
    }

    #[test]
    fn free_functions_cover_the_uncached_kernels() {
        let cfg = Config::default();
        let a = BigInt::from_i64(5);
        let b = BigInt::from_i64(3);
        assert_eq!(add(&a, &b, &cfg).unwrap().to_i64().unwrap(), 8);
        assert_eq!(sub(&a, &b, &cfg).unwrap().to_i64().unwrap(), 2);
        let text = to_text(&a, Radix::Ternary);
        assert_eq!(parse(&text, Radix::Ternary, &cfg).unwrap(), a);
    }
}
