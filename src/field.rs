//! Prime-field arithmetic modulo a Fermat number q = 2^(8·w) + 1.
//!
//! The usable fields are F_3 = 257 (1-byte symbols) and F_4 = 65537 (2-byte
//! symbols); every Fermat number from F_5 = 2^32 + 1 upward is composite.
//! Because q − 1 is a power of two, the multiplicative group is a 2-group:
//! a candidate g generates it exactly when its Jacobi symbol is −1, and
//! every code length dividing q − 1 is a power of two.

use crate::word::FieldWord;
use crate::Error;

/// Jacobi symbol (a/n) for odd positive n.
///
/// Returns 1 for quadratic residues, −1 for non-residues, 0 when a and n
/// share a factor.
#[must_use]
pub fn jacobi(mut a: u64, mut n: u64) -> i32 {
    debug_assert!(n > 0 && n % 2 == 1);

    a %= n;
    let mut t = 1i32;
    while a != 0 {
        while a % 2 == 0 {
            a /= 2;
            if matches!(n % 8, 3 | 5) {
                t = -t;
            }
        }
        core::mem::swap(&mut a, &mut n);
        if a % 4 == 3 && n % 4 == 3 {
            t = -t;
        }
        a %= n;
    }
    if n == 1 { t } else { 0 }
}

/// The field GF(q) with q = 2^(8·word_size) + 1.
///
/// Immutable after construction and `Copy`, so polynomials, transform plans
/// and coders each hold their own handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField<T: FieldWord> {
    p: T,
    word_size: usize,
    root: T,
}

/// Candidates tried before the modulus is declared composite. A primitive
/// root of a Fermat prime is always found within the first few candidates
/// (3 works for both 257 and 65537); composite moduli admit none at all.
const ROOT_SEARCH_LIMIT: usize = 256;

impl<T: FieldWord> PrimeField<T> {
    /// Builds the field of cardinality 2^(8·word_size) + 1.
    ///
    /// `word_size` 0 and >= 4 are rejected outright; word_size 3 passes the
    /// gate but names the composite 2^24 + 1, which the primitive-root
    /// search rejects with a field error.
    pub fn fermat(word_size: usize) -> Result<Self, Error> {
        if word_size == 0 || word_size >= 4 {
            return Err(Error::UnsupportedWordSize { word_size });
        }
        if 8 * word_size as u32 + 1 > T::BITS {
            return Err(Error::WordTooNarrow {
                word_size,
                bits: T::BITS,
            });
        }

        let p = T::from_usize((1usize << (8 * word_size)) + 1);
        let mut field = Self {
            p,
            word_size,
            root: T::ZERO,
        };
        field.root = field.find_primitive_root()?;
        Ok(field)
    }

    /// Cardinality q of the field.
    #[inline]
    #[must_use]
    pub fn card(&self) -> T {
        self.p
    }

    /// Number of bytes of a stored symbol.
    #[inline]
    #[must_use]
    pub fn word_size(&self) -> usize {
        self.word_size
    }

    /// `(a + b) mod q`.
    #[inline]
    #[must_use]
    pub fn add(&self, a: T, b: T) -> T {
        a.add_mod(b, self.p)
    }

    /// `(a - b) mod q`.
    #[inline]
    #[must_use]
    pub fn sub(&self, a: T, b: T) -> T {
        a.sub_mod(b, self.p)
    }

    /// `-a mod q`, i.e. `sub(0, a)`.
    #[inline]
    #[must_use]
    pub fn neg(&self, a: T) -> T {
        T::ZERO.sub_mod(a, self.p)
    }

    /// `(a · b) mod q`.
    #[inline]
    #[must_use]
    pub fn mul(&self, a: T, b: T) -> T {
        a.mul_mod(b, self.p)
    }

    /// `b^e mod q` by square-and-multiply.
    #[must_use]
    pub fn exp(&self, base: T, e: T) -> T {
        let mut e = e.to_usize();
        let mut base = base;
        let mut acc = T::ONE;
        while e > 0 {
            if e & 1 == 1 {
                acc = self.mul(acc, base);
            }
            base = self.mul(base, base);
            e >>= 1;
        }
        acc
    }

    /// Multiplicative inverse, via Fermat's little theorem: `a^(q-2)`.
    pub fn inv(&self, a: T) -> Result<T, Error> {
        if a == T::ZERO {
            return Err(Error::ZeroDivisor {
                modulus: self.p.to_usize() as u64,
            });
        }
        Ok(self.exp(a, T::from_usize(self.p.to_usize() - 2)))
    }

    /// `a / b mod q`.
    pub fn div(&self, a: T, b: T) -> Result<T, Error> {
        Ok(self.mul(a, self.inv(b)?))
    }

    /// Jacobi symbol (a/q).
    #[must_use]
    pub fn jacobi(&self, a: T) -> i32 {
        jacobi(a.to_usize() as u64, self.p.to_usize() as u64)
    }

    /// The cached generator of the multiplicative group.
    #[inline]
    #[must_use]
    pub fn primitive_root(&self) -> T {
        self.root
    }

    /// An n-th root of unity: `g^((q-1)/n)`, defined for n dividing q − 1.
    pub fn nth_root(&self, n: usize) -> Result<T, Error> {
        let order = self.p.to_usize() - 1;
        if n == 0 || order % n != 0 {
            return Err(Error::NoNthRoot {
                n,
                modulus: self.p.to_usize() as u64,
            });
        }
        Ok(self.exp(self.root, T::from_usize(order / n)))
    }

    /// Smallest divisor of q − 1 that is at least `m`.
    ///
    /// q − 1 is a power of two, so this is m rounded up to a power of two.
    pub fn code_len_high_compo(&self, m: usize) -> Result<usize, Error> {
        let order = self.p.to_usize() - 1;
        if m > order {
            return Err(Error::CodeTooLong {
                required: m,
                card: self.p.to_usize() as u64,
            });
        }
        Ok(m.next_power_of_two())
    }

    /// Searches for a generator of the multiplicative group.
    ///
    /// The group order q − 1 is 2^m, so g generates it iff g^((q-1)/2) = −1,
    /// equivalently iff (g/q) = −1. For a composite modulus no candidate can
    /// pass (the group exponent has too small a 2-part), so exhausting the
    /// search identifies a non-prime q.
    fn find_primitive_root(&self) -> Result<T, Error> {
        let half = T::from_usize((self.p.to_usize() - 1) / 2);
        let minus_one = self.neg(T::ONE);
        for g in 2..ROOT_SEARCH_LIMIT {
            let g = T::from_usize(g);
            if self.exp(g, half) == minus_one && self.jacobi(g) == -1 {
                return Ok(g);
            }
        }
        Err(Error::NoPrimitiveRoot {
            modulus: self.p.to_usize() as u64,
        })
    }
}
