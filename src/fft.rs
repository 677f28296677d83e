//! Radix-2 Fourier transform over a Fermat prime field.
//!
//! With q − 1 a power of two the field carries an n-th root of unity for
//! every power-of-two n up to q − 1, so the transform is a plain iterative
//! Cooley-Tukey butterfly with no ring extension: a length-n coefficient
//! vector goes to its evaluations at the n powers of the root. The inverse
//! transform runs the same schedule on r^(-1) and scales by n^(-1).
//!
//! The packet form applies one butterfly schedule pointwise across the
//! `pkt_size` lanes of a [`Buffers`], amortizing the plan over many
//! parallel codewords.

use crate::field::PrimeField;
use crate::vect::Buffers;
use crate::word::FieldWord;
use crate::Error;

/// Transform plan for a fixed length n, n a power of two dividing q − 1.
///
/// Immutable after construction; holds its own copy of the field.
#[derive(Debug, Clone, Copy)]
pub struct Radix2<T: FieldWord> {
    gf: PrimeField<T>,
    n: usize,
    w: T,
    w_inv: T,
    n_inv: T,
}

impl<T: FieldWord> Radix2<T> {
    /// Builds a plan of length `n` over `gf`.
    ///
    /// Fails when no root of unity of order `n` exists, i.e. when `n` does
    /// not divide q − 1.
    pub fn new(gf: PrimeField<T>, n: usize) -> Result<Self, Error> {
        let w = gf.nth_root(n)?;
        debug_assert!(n.is_power_of_two());
        let w_inv = gf.inv(w)?;
        let n_inv = gf.inv(T::from_usize(n))?;
        Ok(Self {
            gf,
            n,
            w,
            w_inv,
            n_inv,
        })
    }

    /// Transform length.
    #[inline]
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The n-th root of unity the plan evaluates at.
    #[inline]
    #[must_use]
    pub fn root(&self) -> T {
        self.w
    }

    /// Forward transform: `output[j] = Σ_i input[i] · r^(i·j)`.
    ///
    /// `input` may be shorter than n; missing positions read as zero.
    pub fn fft(&self, output: &mut [T], input: &[T]) {
        self.transform(output, input, self.w);
    }

    /// Inverse transform: `output[j] = n^(-1) · Σ_i input[i] · r^(-i·j)`.
    pub fn ifft(&self, output: &mut [T], input: &[T]) {
        self.transform(output, input, self.w_inv);
        for v in output.iter_mut() {
            *v = self.gf.mul(*v, self.n_inv);
        }
    }

    /// Forward transform of `pkt_size` lanes at once.
    ///
    /// `input` may have fewer than n buffers; missing buffers read as zero.
    pub fn fft_buffers(&self, output: &mut Buffers<T>, input: &Buffers<T>) {
        self.transform_buffers(output, input, self.w);
    }

    /// Inverse transform of `pkt_size` lanes at once.
    pub fn ifft_buffers(&self, output: &mut Buffers<T>, input: &Buffers<T>) {
        self.transform_buffers(output, input, self.w_inv);
        for i in 0..self.n {
            for v in output.row_mut(i) {
                *v = self.gf.mul(*v, self.n_inv);
            }
        }
    }

    fn transform(&self, output: &mut [T], input: &[T], w: T) {
        debug_assert_eq!(output.len(), self.n);
        debug_assert!(input.len() <= self.n);

        let bits = self.n.trailing_zeros();
        for (i, out) in output.iter_mut().enumerate() {
            let src = bit_reverse(i, bits);
            *out = if src < input.len() { input[src] } else { T::ZERO };
        }

        let mut len = 2;
        while len <= self.n {
            let step = self.gf.exp(w, T::from_usize(self.n / len));
            let half = len / 2;
            for start in (0..self.n).step_by(len) {
                let mut tw = T::ONE;
                for off in 0..half {
                    let lo = start + off;
                    let hi = lo + half;
                    let u = output[lo];
                    let v = self.gf.mul(tw, output[hi]);
                    output[lo] = self.gf.add(u, v);
                    output[hi] = self.gf.sub(u, v);
                    tw = self.gf.mul(tw, step);
                }
            }
            len <<= 1;
        }
    }

    fn transform_buffers(&self, output: &mut Buffers<T>, input: &Buffers<T>, w: T) {
        let pkt_size = output.pkt_size();
        debug_assert_eq!(output.n(), self.n);
        debug_assert!(input.n() <= self.n);
        debug_assert_eq!(input.pkt_size(), pkt_size);

        let bits = self.n.trailing_zeros();
        for i in 0..self.n {
            let src = bit_reverse(i, bits);
            if src < input.n() {
                output.row_mut(i).copy_from_slice(input.row(src));
            } else {
                output.row_mut(i).fill(T::ZERO);
            }
        }

        let mut len = 2;
        while len <= self.n {
            let step = self.gf.exp(w, T::from_usize(self.n / len));
            let half = len / 2;
            for start in (0..self.n).step_by(len) {
                let mut tw = T::ONE;
                for off in 0..half {
                    let lo = start + off;
                    let hi = lo + half;
                    for j in 0..pkt_size {
                        let u = output.get(lo, j);
                        let v = self.gf.mul(tw, output.get(hi, j));
                        output.set(lo, j, self.gf.add(u, v));
                        output.set(hi, j, self.gf.sub(u, v));
                    }
                    tw = self.gf.mul(tw, step);
                }
            }
            len <<= 1;
        }
    }
}

#[inline]
fn bit_reverse(i: usize, bits: u32) -> usize {
    if bits == 0 {
        0
    } else {
        i.reverse_bits() >> (usize::BITS - bits)
    }
}
