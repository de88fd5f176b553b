//! Tunable constants for the kernel, gathered into a single context struct
//! so the multiplication cache and every size threshold are explicit state
//! instead of process-wide globals (see the kernel's design notes on
//! removing hidden state).

/// Tunables for a [`crate::Kernel`] instance.
///
/// All fields have defaults matching the kernel's stated defaults; override
/// individual fields for testing (e.g. a tiny `mmap_threshold` to exercise
/// the mapped backing without allocating megadigit numbers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Limb-vector byte size above which [`crate::limb::LimbStore`] backs
    /// itself with a memory map instead of a heap buffer. Default ≈500 KiB.
    pub mmap_threshold: usize,

    /// Operand length (in limbs) above which multiplication switches from
    /// schoolbook to Karatsuba. Default 16.
    pub karatsuba_threshold: usize,

    /// Operand length (in limbs) above which multiplication attempts the
    /// FFT convolution path before falling back to Karatsuba. `None`
    /// disables the FFT path entirely (Karatsuba-only). Default `Some(4096)`.
    pub fft_threshold: Option<usize>,

    /// Maximum non-negative exponent accepted by `pow`. Default 1000.
    pub exponent_limit: u32,

    /// Maximum non-negative argument accepted by `fact`. Default 20 (the
    /// largest factorial that fits a 64-bit accumulator during expansion).
    pub factorial_limit: i64,

    /// Number of entries held by the multiplication result cache. Default 64.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mmap_threshold: 500 * 1024,
            karatsuba_threshold: 16,
            fft_threshold: Some(4096),
            exponent_limit: 1000,
            factorial_limit: 20,
            cache_capacity: 64,
        }
    }
}
