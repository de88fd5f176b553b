//! Real-valued FFT convolution for large multiplications, as described in
//! the kernel's design notes: double-precision Cooley-Tukey FFT, round to
//! nearest integer, carry-normalize to base 81, then verify the
//! postcondition (every digit in `[0, 80]`, no residual carry or energy
//! outside the allotted length) before trusting the result. A failed
//! postcondition falls back to Karatsuba rather than erroring — the
//! resolution the kernel's design notes recommend for the FFT path's known
//! precision risk at moderate sizes.

#[derive(Clone, Copy)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    fn add(self, o: Complex) -> Complex {
        Complex::new(self.re + o.re, self.im + o.im)
    }

    fn sub(self, o: Complex) -> Complex {
        Complex::new(self.re - o.re, self.im - o.im)
    }

    fn mul(self, o: Complex) -> Complex {
        Complex::new(
            self.re * o.re - self.im * o.im,
            self.re * o.im + self.im * o.re,
        )
    }
}

fn fft(a: &mut [Complex], invert: bool) {
    let n = a.len();
    if n <= 1 {
        return;
    }
    // Bit-reversal permutation.
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            a.swap(i, j);
        }
    }

    let mut len = 2usize;
    while len <= n {
        let ang = 2.0 * std::f64::consts::PI / len as f64 * if invert { -1.0 } else { 1.0 };
        let wlen = Complex::new(ang.cos(), ang.sin());
        let mut i = 0;
        while i < n {
            let mut w = Complex::new(1.0, 0.0);
            for k in 0..len / 2 {
                let u = a[i + k];
                let v = a[i + k + len / 2].mul(w);
                a[i + k] = u.add(v);
                a[i + k + len / 2] = u.sub(v);
                w = w.mul(wlen);
            }
            i += len;
        }
        len <<= 1;
    }

    if invert {
        for x in a.iter_mut() {
            x.re /= n as f64;
            x.im /= n as f64;
        }
    }
}

/// Multiplies two base-81 magnitudes via FFT convolution. Returns `None`
/// when the post-convolution carry/energy check fails, signalling the
/// caller to fall back to Karatsuba.
pub(crate) fn fft_multiply(a: &[u8], b: &[u8]) -> Option<Vec<u8>> {
    let result_len = a.len() + b.len();
    let mut n = 1usize;
    while n < result_len {
        n <<= 1;
    }

    let mut fa: Vec<Complex> = a.iter().map(|&d| Complex::new(d as f64, 0.0)).collect();
    fa.resize(n, Complex::ZERO);
    let mut fb: Vec<Complex> = b.iter().map(|&d| Complex::new(d as f64, 0.0)).collect();
    fb.resize(n, Complex::ZERO);

    fft(&mut fa, false);
    fft(&mut fb, false);
    for i in 0..n {
        fa[i] = fa[i].mul(fb[i]);
    }
    fft(&mut fa, true);

    let mut carry: i64 = 0;
    let mut digits = Vec::with_capacity(result_len);
    for c in fa.iter().take(result_len) {
        let val = c.re.round() as i64 + carry;
        let digit = val.rem_euclid(81);
        carry = (val - digit) / 81;
        digits.push(digit as u8);
    }
    if carry != 0 {
        return None;
    }
    for c in fa.iter().skip(result_len) {
        if c.re.round().abs() > 0.5 {
            return None;
        }
    }
    Some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_digits(mut n: u64) -> Vec<u8> {
        if n == 0 {
            return vec![0];
        }
        let mut out = Vec::new();
        while n > 0 {
            out.push((n % 81) as u8);
            n /= 81;
        }
        out
    }

    fn from_digits(d: &[u8]) -> u64 {
        d.iter().rev().fold(0u64, |acc, &x| acc * 81 + x as u64)
    }

    #[test]
    fn agrees_with_manual_multiplication_on_small_values() {
        for (x, y) in [(0u64, 5u64), (5, 0), (1, 1), (80, 80), (12345, 6789)] {
            let got = fft_multiply(&to_digits(x), &to_digits(y)).expect("fft should not overflow here");
            assert_eq!(from_digits(&got), x * y, "{x} * {y}");
        }
    }
}
