//! Polynomials over a Fermat prime field.
//!
//! Coefficients are stored sparsely by degree. The decoder's numerator
//! polynomial N'(x) has only k nonzero terms out of n, and evaluating it
//! through the dense range would cost O(n·k) per point; the sparse map keeps
//! evaluation proportional to the populated terms.

use alloc::collections::BTreeMap;

use crate::field::PrimeField;
use crate::word::FieldWord;

/// Polynomial with coefficients in GF(q), absent degrees reading as zero.
#[derive(Debug, Clone)]
pub struct Poly<T: FieldWord> {
    gf: PrimeField<T>,
    terms: BTreeMap<usize, T>,
}

impl<T: FieldWord> Poly<T> {
    /// The zero polynomial.
    #[must_use]
    pub fn new(gf: PrimeField<T>) -> Self {
        Self {
            gf,
            terms: BTreeMap::new(),
        }
    }

    /// Assigns the coefficient at `degree`. A zero coefficient removes the
    /// term.
    pub fn set(&mut self, degree: usize, coeff: T) {
        if coeff == T::ZERO {
            self.terms.remove(&degree);
        } else {
            self.terms.insert(degree, coeff);
        }
    }

    /// Coefficient at `degree`, zero when absent.
    #[must_use]
    pub fn get(&self, degree: usize) -> T {
        self.terms.get(&degree).copied().unwrap_or(T::ZERO)
    }

    /// Degree of the polynomial; the zero polynomial reports 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.terms.keys().next_back().copied().unwrap_or(0)
    }

    /// Whether no term is populated.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// `self := self · other`, by schoolbook convolution of the populated
    /// terms.
    pub fn mul(&mut self, other: &Poly<T>) {
        let mut product: BTreeMap<usize, T> = BTreeMap::new();
        for (&da, &ca) in &self.terms {
            for (&db, &cb) in &other.terms {
                let c = self.gf.mul(ca, cb);
                let acc = product.entry(da + db).or_insert(T::ZERO);
                *acc = self.gf.add(*acc, c);
            }
        }
        product.retain(|_, c| *c != T::ZERO);
        self.terms = product;
    }

    /// `self := self'`, the formal derivative. Each term i·c_i·x^(i-1) uses
    /// field multiplication by the canonical representative of i.
    pub fn derivative(&mut self) {
        let card = self.gf.card().to_usize();
        let mut terms = BTreeMap::new();
        for (&d, &c) in &self.terms {
            if d == 0 {
                continue;
            }
            let c = self.gf.mul(c, T::from_usize(d % card));
            if c != T::ZERO {
                terms.insert(d - 1, c);
            }
        }
        self.terms = terms;
    }

    /// Multiplies every coefficient by −1.
    pub fn neg(&mut self) {
        let gf = self.gf;
        for c in self.terms.values_mut() {
            *c = gf.neg(*c);
        }
    }

    /// Evaluates at `x` by Horner's rule over the populated terms, bridging
    /// degree gaps with a single exponentiation each.
    #[must_use]
    pub fn eval(&self, x: T) -> T {
        let mut acc = T::ZERO;
        let mut prev: Option<usize> = None;
        for (&d, &c) in self.terms.iter().rev() {
            acc = match prev {
                None => c,
                Some(p) => self.gf.add(self.gf.mul(acc, self.gf.exp(x, T::from_usize(p - d))), c),
            };
            prev = Some(d);
        }
        match prev {
            None => T::ZERO,
            Some(d) => self.gf.mul(acc, self.gf.exp(x, T::from_usize(d))),
        }
    }
}
