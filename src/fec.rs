//! Forward-erasure-code base interface.
//!
//! Coders come in two shapes. Systematic codes emit the source symbols
//! verbatim plus parities, and can fold received fragments into a decoder
//! matrix one at a time. Non-systematic codes emit a transform of the
//! source, and must decode in one shot: there is no "data fragment" to
//! distinguish from a parity, and nothing useful to precompute per arrival.
//! The staged hooks below exist for callers driving either shape through
//! one interface; their behavior is keyed off [`Fec::kind`] rather than
//! overridden per coder.

use crate::props::Properties;
use crate::vect::Buffers;
use crate::word::FieldWord;
use crate::Error;

/// Whether the codeword embeds the source symbols verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FecKind {
    /// The first n_data output symbols are the source words.
    Systematic,
    /// The output is a transform of the source; every symbol is a parity.
    NonSystematic,
}

/// An (n, k) erasure code over word-sized symbols.
pub trait Fec<T: FieldWord> {
    /// Shape of the code.
    fn kind(&self) -> FecKind;

    /// Bytes per stored symbol.
    fn word_size(&self) -> usize;

    /// Number of source symbols k.
    fn n_data(&self) -> usize;

    /// Number of parity symbols requested by the caller.
    fn n_parities(&self) -> usize;

    /// Symbols per packet in buffer mode.
    fn pkt_size(&self) -> usize;

    /// Codeword length n. May exceed n_data + n_parities when the code
    /// rounds the length up.
    fn n_outputs(&self) -> usize;

    /// Encodes `words` (length n_data) into `output` (length n_outputs),
    /// recording out-of-range symbols in `props` (length n_outputs).
    /// `offset` locates this codeword's symbols in the source stream.
    fn encode(&self, output: &mut [T], props: &mut [Properties], offset: usize, words: &[T]);

    /// Packet-mode encode: `pkt_size` codewords at once.
    fn encode_buffers(
        &self,
        output: &mut Buffers<T>,
        props: &mut [Properties],
        offset: usize,
        words: &Buffers<T>,
    );

    /// Recovers the n_data source words into `output` from any n_data
    /// received symbols: `words[i]` is the value observed at codeword
    /// position `fragments_ids[i]`. The ids must be distinct.
    fn decode(
        &self,
        output: &mut [T],
        props: &[Properties],
        offset: usize,
        fragments_ids: &[usize],
        words: &[T],
    ) -> Result<(), Error>;

    /// Packet-mode decode: `pkt_size` codewords at once, sharing one set of
    /// fragment ids.
    fn decode_buffers(
        &self,
        output: &mut Buffers<T>,
        props: &[Properties],
        offset: usize,
        fragments_ids: &[usize],
        words: &Buffers<T>,
    ) -> Result<(), Error>;

    /// Registers a received data fragment ahead of [`Fec::decode_build`].
    ///
    /// Only meaningful for systematic codes; a non-systematic code has no
    /// data fragments and rejects the call.
    fn decode_add_data(&mut self, _fragment_index: usize, _row: usize) -> Result<(), Error> {
        match self.kind() {
            FecKind::Systematic => Ok(()),
            FecKind::NonSystematic => Err(Error::NotSystematic),
        }
    }

    /// Registers a received parity fragment ahead of [`Fec::decode_build`].
    ///
    /// One-shot decoders cannot anticipate anything per arrival; inert.
    fn decode_add_parities(&mut self, _fragment_index: usize, _row: usize) -> Result<(), Error> {
        Ok(())
    }

    /// Finalizes registered fragments before [`Fec::decode`]. Inert for
    /// one-shot decoders.
    fn decode_build(&mut self) -> Result<(), Error> {
        Ok(())
    }
}
