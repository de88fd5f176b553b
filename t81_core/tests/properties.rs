//! Generative checks for the laws `scenarios.rs` pins at fixed values:
//! add/mul commutativity, round-trip text conversion in both radixes, and
//! Karatsuba/schoolbook agreement, each over a wide spread of `i64` inputs.

use proptest::prelude::*;
use t81_core::{parse, to_text, BigInt, Config, Kernel, Radix};

fn kernel() -> Kernel {
    Kernel::new(Config::default())
}

proptest! {
    #[test]
    fn add_is_commutative(x: i64, y: i64) {
        let cfg = Config::default();
        let a = BigInt::from_i64(x);
        let b = BigInt::from_i64(y);
        prop_assert_eq!(
            t81_core::add(&a, &b, &cfg).unwrap(),
            t81_core::add(&b, &a, &cfg).unwrap(),
        );
    }

    #[test]
    fn mul_is_commutative(x in -1_000_000_000i64..1_000_000_000, y in -1_000_000_000i64..1_000_000_000) {
        let kernel = kernel();
        let a = BigInt::from_i64(x);
        let b = BigInt::from_i64(y);
        prop_assert_eq!(kernel.mul(&a, &b).unwrap(), kernel.mul(&b, &a).unwrap());
    }

    #[test]
    fn ternary_text_round_trips(x: i64) {
        let cfg = Config::default();
        let original = BigInt::from_i64(x);
        let text = to_text(&original, Radix::Ternary);
        let parsed = parse(&text, Radix::Ternary, &cfg).unwrap();
        prop_assert_eq!(parsed.to_i64().unwrap(), x);
    }

    #[test]
    fn balanced_text_round_trips(x: i64) {
        let cfg = Config::default();
        let original = BigInt::from_i64(x);
        let text = to_text(&original, Radix::BalancedTernary);
        let parsed = parse(&text, Radix::BalancedTernary, &cfg).unwrap();
        prop_assert_eq!(parsed.to_i64().unwrap(), x);
    }

    #[test]
    fn karatsuba_agrees_with_schoolbook(
        x in -1_000_000_000i64..1_000_000_000,
        y in -1_000_000_000i64..1_000_000_000,
    ) {
        let mut forced_kara = Config::default();
        forced_kara.karatsuba_threshold = 1;
        forced_kara.fft_threshold = None;
        let kara_kernel = Kernel::new(forced_kara);

        let mut forced_school = Config::default();
        forced_school.karatsuba_threshold = usize::MAX;
        forced_school.fft_threshold = None;
        let school_kernel = Kernel::new(forced_school);

        let a = BigInt::from_i64(x);
        let b = BigInt::from_i64(y);
        prop_assert_eq!(kara_kernel.mul(&a, &b).unwrap(), school_kernel.mul(&a, &b).unwrap());
    }
}
