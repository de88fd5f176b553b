//! Cooperative cancellation. The kernel has no suspension points of its own;
//! a caller that wants to abort a long Karatsuba multiplication or a long
//! division supplies a [`CancelToken`] that is polled between recursive
//! halves or division positions. The default token never cancels, matching
//! the design note that cancellation support may be omitted by a caller
//! that doesn't need it.

/// Polled cooperatively between the kernel's internal work units.
pub trait CancelToken {
    fn is_cancelled(&self) -> bool;
}

/// A token that never signals cancellation; used wherever no token is
/// supplied.
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

pub(crate) fn check(op: &'static str, token: &dyn CancelToken) -> crate::error::Result<()> {
    if token.is_cancelled() {
        Err(crate::error::Error::Cancelled { op })
    } else {
        Ok(())
    }
}
