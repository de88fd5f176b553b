//! Error taxonomy for the ternary arithmetic kernel.
//!
//! Every variant carries the name of the operation that failed and enough
//! context (an argument index, a short detail string) to diagnose the
//! failure without the kernel synthesizing a message at the call site.

use thiserror::Error;

/// Result alias used throughout the kernel.
pub type Result<T> = std::result::Result<T, Error>;

/// The exhaustive error taxonomy described in the kernel's design: malformed
/// input, resource exhaustion, and the handful of operations with a
/// declared numeric limit all report through this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed text, an out-of-alphabet digit, a negative shift, or an
    /// empty string where a value was required.
    #[error("invalid input to `{op}` (argument {arg}): {detail}")]
    InvalidInput {
        op: &'static str,
        arg: usize,
        detail: String,
    },

    /// Heap allocation or memory-map acquisition failed.
    #[error("allocation failed in `{op}`: {detail}")]
    Allocation { op: &'static str, detail: String },

    /// The divisor of a div/mod/`%`/evaluator operator was zero.
    #[error("division by zero in `{op}`")]
    DivByZero { op: &'static str },

    /// A declared limit was exceeded: `pow` past `exponent_limit`, `fact`
    /// past `factorial_limit`, an `i64` conversion out of range, or a
    /// residual carry left over after FFT convolution.
    #[error("`{op}` exceeded its limit: {detail}")]
    Overflow { op: &'static str, detail: String },

    /// `pow` was called with a negative exponent.
    #[error("`{op}` received a negative exponent")]
    NegativeExponent { op: &'static str },

    /// `fact` was called on a negative argument.
    #[error("`{op}` received a negative argument where only non-negative is defined")]
    Negative { op: &'static str },

    /// A matrix operation's operands have incompatible shapes.
    #[error("shape mismatch in `{op}`: {detail}")]
    ShapeMismatch { op: &'static str, detail: String },

    /// The expression evaluator hit a syntactic failure.
    #[error("parse error at position {pos}: {detail}")]
    ParseError { pos: usize, detail: String },

    /// A caller-provided cancellation token observed cancellation.
    #[error("operation `{op}` was cancelled")]
    Cancelled { op: &'static str },
}

impl Error {
    pub(crate) fn invalid(op: &'static str, arg: usize, detail: impl Into<String>) -> Self {
        Error::InvalidInput {
            op,
            arg,
            detail: detail.into(),
        }
    }

    pub(crate) fn allocation(op: &'static str, detail: impl Into<String>) -> Self {
        Error::Allocation {
            op,
            detail: detail.into(),
        }
    }

    pub(crate) fn overflow(op: &'static str, detail: impl Into<String>) -> Self {
        Error::Overflow {
            op,
            detail: detail.into(),
        }
    }

    pub(crate) fn shape_mismatch(op: &'static str, detail: impl Into<String>) -> Self {
        Error::ShapeMismatch {
            op,
            detail: detail.into(),
        }
    }
}
