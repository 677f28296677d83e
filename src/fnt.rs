//! Reed-Solomon erasure codes built on the Fermat Number Transform.
//!
//! After Soro & Lacan, "FNT-based Reed-Solomon Erasure Codes": the encoder
//! evaluates the source polynomial at the n powers of an n-th root of unity
//! (one radix-2 transform), and the decoder is a Lagrange interpolation
//! rewritten so each coefficient of the reconstruction comes from one
//! evaluation of a sparse numerator polynomial. Both sides cost roughly
//! O(n log n) field operations plus the O(n·k) numerator sweeps.
//!
//! The code is non-systematic: every output symbol is a transform
//! coefficient, and any n_data of the n outputs recover the source.

use alloc::vec::Vec;

use crate::fec::{Fec, FecKind};
use crate::fft::Radix2;
use crate::field::PrimeField;
use crate::poly::Poly;
use crate::props::{Properties, PropertyIter, OOR_MARK};
use crate::vect::Buffers;
use crate::word::FieldWord;
use crate::Error;

/// FNT Reed-Solomon coder over GF(2^(8·word_size) + 1).
///
/// Stateless after construction; the field and the transform plan are
/// read-only, so one instance can serve many threads as long as each call
/// gets its own (output, props, words) buffers.
#[derive(Debug, Clone, Copy)]
pub struct FntRs<T: FieldWord> {
    word_size: usize,
    n_data: usize,
    n_parities: usize,
    pkt_size: usize,
    code_len: usize,
    r: T,
    gf: PrimeField<T>,
    fft: Radix2<T>,
}

impl<T: FieldWord> FntRs<T> {
    /// Builds a coder for `n_data` source symbols of `word_size` bytes and
    /// `n_parities` parities, `pkt_size` symbols per packet in buffer mode.
    ///
    /// The codeword length is `n_data + n_parities` rounded up to the next
    /// divisor of q − 1 (a power of two); [`Fec::n_outputs`] reports it.
    pub fn new(
        word_size: usize,
        n_data: usize,
        n_parities: usize,
        pkt_size: usize,
    ) -> Result<Self, Error> {
        if n_data == 0 {
            return Err(Error::ZeroParam { name: "n_data" });
        }
        if n_parities == 0 {
            return Err(Error::ZeroParam { name: "n_parities" });
        }
        if pkt_size == 0 {
            return Err(Error::ZeroParam { name: "pkt_size" });
        }

        let gf = PrimeField::<T>::fermat(word_size)?;
        debug_assert_eq!(gf.jacobi(gf.primitive_root()), -1);

        let code_len = gf.code_len_high_compo(n_data + n_parities)?;
        let r = gf.nth_root(code_len)?;
        let fft = Radix2::new(gf, code_len)?;

        Ok(Self {
            word_size,
            n_data,
            n_parities,
            pkt_size,
            code_len,
            r,
            gf,
            fft,
        })
    }

    /// The underlying field.
    #[must_use]
    pub fn field(&self) -> PrimeField<T> {
        self.gf
    }

    /// The n-th root of unity the codeword is evaluated at.
    #[must_use]
    pub fn root(&self) -> T {
        self.r
    }

    /// Clips one transform output: q − 1 does not fit in `word_size` bytes,
    /// so it is stored as 0 and reported through the property channel.
    ///
    /// The masked test sees only the bit above the word mask; the assert
    /// pins down that q − 1 is the single representative out there.
    #[inline]
    fn clip(&self, value: T) -> Option<T> {
        let thres = self.gf.card().to_usize() - 1;
        let v = value.to_usize();
        debug_assert!(v <= thres);
        (v & thres != 0).then_some(T::ZERO)
    }

    /// Master polynomial A(x) = Π (x − x_i) over the survivor points and
    /// the inverses 1/A'(x_i). A repeated fragment id makes A'(x_i) vanish,
    /// which surfaces as a zero-divisor error.
    fn decode_prepare(&self, fragments_ids: &[usize]) -> Result<(Poly<T>, Vec<T>), Error> {
        let vx: Vec<T> = fragments_ids
            .iter()
            .map(|&id| self.gf.exp(self.r, T::from_usize(id)))
            .collect();

        let mut a = Poly::new(self.gf);
        a.set(0, T::ONE);
        for &x in &vx {
            let mut root = Poly::new(self.gf);
            root.set(1, T::ONE);
            root.set(0, self.gf.neg(x));
            a.mul(&root);
        }

        let mut da = a.clone();
        da.derivative();

        let mut dinv = Vec::with_capacity(vx.len());
        for &x in &vx {
            dinv.push(self.gf.inv(da.eval(x))?);
        }
        Ok((a, dinv))
    }

    /// The evaluation grid r^(−(t+1)) for t in 0..n.
    fn eval_grid(&self) -> Result<Vec<T>, Error> {
        let r_inv = self.gf.inv(self.r)?;
        let mut grid = Vec::with_capacity(self.code_len);
        let mut x = T::ONE;
        for _ in 0..self.code_len {
            x = self.gf.mul(x, r_inv);
            grid.push(x);
        }
        Ok(grid)
    }

    /// Expands the partial-fraction sum into the interpolating polynomial:
    /// S[t] = N'(r^(−(t+1))), then S := −S · A. The low n_data coefficients
    /// of the product are the source words, so no reduction mod x^n is
    /// needed.
    fn reconstruct(&self, a: &Poly<T>, np: &Poly<T>, grid: &[T]) -> Poly<T> {
        let mut s = Poly::new(self.gf);
        for (t, &x) in grid.iter().enumerate() {
            s.set(t, np.eval(x));
        }
        s.neg();
        s.mul(a);
        s
    }
}

impl<T: FieldWord> Fec<T> for FntRs<T> {
    fn kind(&self) -> FecKind {
        FecKind::NonSystematic
    }

    fn word_size(&self) -> usize {
        self.word_size
    }

    fn n_data(&self) -> usize {
        self.n_data
    }

    fn n_parities(&self) -> usize {
        self.n_parities
    }

    fn pkt_size(&self) -> usize {
        self.pkt_size
    }

    fn n_outputs(&self) -> usize {
        self.code_len
    }

    fn encode(&self, output: &mut [T], props: &mut [Properties], offset: usize, words: &[T]) {
        debug_assert_eq!(output.len(), self.code_len);
        debug_assert_eq!(props.len(), self.code_len);
        debug_assert_eq!(words.len(), self.n_data);

        self.fft.fft(output, words);
        for (i, out) in output.iter_mut().enumerate() {
            if let Some(stored) = self.clip(*out) {
                props[i].add(offset, OOR_MARK);
                *out = stored;
            }
        }
    }

    fn encode_buffers(
        &self,
        output: &mut Buffers<T>,
        props: &mut [Properties],
        offset: usize,
        words: &Buffers<T>,
    ) {
        debug_assert_eq!(output.n(), self.code_len);
        debug_assert_eq!(props.len(), self.code_len);
        debug_assert_eq!(words.n(), self.n_data);

        self.fft.fft_buffers(output, words);
        for i in 0..self.code_len {
            for j in 0..output.pkt_size() {
                if let Some(stored) = self.clip(output.get(i, j)) {
                    props[i].add(offset + j * self.word_size, OOR_MARK);
                    output.set(i, j, stored);
                }
            }
        }
    }

    fn decode(
        &self,
        output: &mut [T],
        props: &[Properties],
        offset: usize,
        fragments_ids: &[usize],
        words: &[T],
    ) -> Result<(), Error> {
        let k = self.n_data;
        debug_assert_eq!(output.len(), k);
        debug_assert_eq!(props.len(), self.code_len);
        debug_assert_eq!(fragments_ids.len(), k);
        debug_assert_eq!(words.len(), k);

        let (a, dinv) = self.decode_prepare(fragments_ids)?;

        // numerators n_i = v_i / A'(x_i), placed at degree fragments_ids[i];
        // a stored 0 with a mark at this offset really carried q − 1
        let mut np = Poly::new(self.gf);
        for i in 0..k {
            let mut v = words[i];
            if props[fragments_ids[i]].iter().is_marked(offset) {
                v = self.gf.neg(T::ONE);
            }
            np.set(fragments_ids[i], self.gf.mul(v, dinv[i]));
        }

        let grid = self.eval_grid()?;
        let s = self.reconstruct(&a, &np, &grid);
        for (i, out) in output.iter_mut().enumerate() {
            *out = s.get(i);
        }
        Ok(())
    }

    fn decode_buffers(
        &self,
        output: &mut Buffers<T>,
        props: &[Properties],
        offset: usize,
        fragments_ids: &[usize],
        words: &Buffers<T>,
    ) -> Result<(), Error> {
        let k = self.n_data;
        let pkt_size = words.pkt_size();
        debug_assert_eq!(output.n(), k);
        debug_assert_eq!(output.pkt_size(), pkt_size);
        debug_assert_eq!(props.len(), self.code_len);
        debug_assert_eq!(fragments_ids.len(), k);
        debug_assert_eq!(words.n(), k);

        // A, A' and the evaluation grid depend only on the fragment ids, so
        // every lane shares them; the per-fragment cursors walk the marked
        // locations once as the lanes advance
        let (a, dinv) = self.decode_prepare(fragments_ids)?;
        let grid = self.eval_grid()?;
        let mut marks: Vec<PropertyIter<'_>> = fragments_ids
            .iter()
            .map(|&id| props[id].iter())
            .collect();

        for j in 0..pkt_size {
            let loc = offset + j * self.word_size;
            let mut np = Poly::new(self.gf);
            for i in 0..k {
                let mut v = words.get(i, j);
                if marks[i].is_marked(loc) {
                    v = self.gf.neg(T::ONE);
                }
                np.set(fragments_ids[i], self.gf.mul(v, dinv[i]));
            }
            let s = self.reconstruct(&a, &np, &grid);
            for i in 0..k {
                output.set(i, j, s.get(i));
            }
        }
        Ok(())
    }
}
