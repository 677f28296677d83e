#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test_util;

/// Machine-word representatives and internal widening
mod word;

/// GF(2^(8·w) + 1) arithmetic
mod field;

/// Sparse polynomials over the field
mod poly;

/// Radix-2 transform plans
mod fft;

/// Packet-mode symbol buffers
mod vect;

/// Out-of-range side channel
mod props;

/// Erasure-code base interface
mod fec;

/// The FNT Reed-Solomon coder
mod fnt;

pub use fec::{Fec, FecKind};
pub use field::{jacobi, PrimeField};
pub use fft::Radix2;
pub use fnt::FntRs;
pub use poly::Poly;
pub use props::{Properties, PropertyIter, OOR_MARK};
pub use vect::Buffers;
pub use word::FieldWord;

/// Errors surfaced by coder construction, field arithmetic and decoding.
///
/// Encoding never fails: an out-of-range transform output is routine flow
/// handled through the property channel, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Symbols wider than two bytes would put the code over a composite
    /// Fermat number.
    #[error("unsupported word size: {word_size} bytes")]
    UnsupportedWordSize {
        /// The rejected symbol width in bytes.
        word_size: usize,
    },

    /// The representative word cannot hold the field cardinality.
    #[error("{bits}-bit words cannot represent GF(2^(8*{word_size}) + 1)")]
    WordTooNarrow {
        /// Requested symbol width in bytes.
        word_size: usize,
        /// Width of the representative word in bits.
        bits: u32,
    },

    /// A structural parameter that must be at least one was zero.
    #[error("parameter {name} must be at least 1")]
    ZeroParam {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// The codeword does not fit the evaluation domain of the field.
    #[error("cannot fit {required} symbols into a field of cardinality {card}")]
    CodeTooLong {
        /// Requested n_data + n_parities.
        required: usize,
        /// Field cardinality q.
        card: u64,
    },

    /// No generator of the multiplicative group was found: the modulus is
    /// not prime (every Fermat number from 2^32 + 1 upward is composite).
    #[error("no primitive root modulo {modulus}: modulus is not prime")]
    NoPrimitiveRoot {
        /// The composite modulus.
        modulus: u64,
    },

    /// Roots of unity of order n exist only for n dividing q − 1.
    #[error("no root of unity of order {n} modulo {modulus}")]
    NoNthRoot {
        /// The requested order.
        n: usize,
        /// Field cardinality q.
        modulus: u64,
    },

    /// Inverse or quotient of the zero element. During decode this means
    /// the caller passed duplicate fragment ids.
    #[error("division by zero in GF({modulus})")]
    ZeroDivisor {
        /// Field cardinality q.
        modulus: u64,
    },

    /// Data fragments cannot be registered with a non-systematic code:
    /// no output symbol carries a source word verbatim.
    #[error("code is not systematic: data fragments cannot be registered")]
    NotSystematic,
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid coder parameters; rejected at construction.
    Config,
    /// Field construction failed; the requested modulus is unusable.
    Field,
    /// Division or inversion by zero; a precondition was violated.
    Arithmetic,
}

impl Error {
    /// The class this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedWordSize { .. }
            | Error::WordTooNarrow { .. }
            | Error::ZeroParam { .. }
            | Error::CodeTooLong { .. }
            | Error::NotSystematic => ErrorKind::Config,
            Error::NoPrimitiveRoot { .. } | Error::NoNthRoot { .. } => ErrorKind::Field,
            Error::ZeroDivisor { .. } => ErrorKind::Arithmetic,
        }
    }
}
