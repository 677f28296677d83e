use alloc::vec::Vec;
use rand_chacha::rand_core::{RngCore, SeedableRng};

/// Deterministic tiny RNG for repeatable tests
pub struct TestRng {
    rng: rand_chacha::ChaCha8Rng,
}

impl TestRng {
    pub fn new() -> Self {
        let rng = rand_chacha::ChaCha8Rng::seed_from_u64(0xdead_beef);
        Self { rng }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    pub fn gen_usize(&mut self, upper: usize) -> usize {
        (self.next_u32() as usize) % upper
    }

    /// A data word valid for a field of the given cardinality: in [0, q − 1),
    /// since q − 1 itself never appears in stored form.
    pub fn gen_symbol(&mut self, card: usize) -> usize {
        self.gen_usize(card - 1)
    }

    /// `k` distinct codeword positions out of `n`, in random order.
    pub fn gen_ids(&mut self, k: usize, n: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            pool.swap(i, self.gen_usize(i + 1));
        }
        pool.truncate(k);
        pool
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::new()
    }
}
