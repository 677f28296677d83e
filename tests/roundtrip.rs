//! End-to-end erasure recovery across word sizes, survivor subsets and
//! packet lanes.

use fntrs::{Buffers, Error, ErrorKind, Fec, FieldWord, FntRs, Properties};
use proptest::prelude::*;

/// Encode `words`, keep only the symbols named by `ids`, decode, and demand
/// the source back.
fn roundtrip<T: FieldWord>(word_size: usize, words: &[T], n_parities: usize, ids: &[usize]) {
    let coder = FntRs::<T>::new(word_size, words.len(), n_parities, 1).unwrap();
    let n = coder.n_outputs();

    let mut output = vec![T::ZERO; n];
    let mut props = vec![Properties::new(); n];
    coder.encode(&mut output, &mut props, 0, words);

    let received: Vec<T> = ids.iter().map(|&i| output[i]).collect();
    let mut restored = vec![T::ZERO; words.len()];
    coder
        .decode(&mut restored, &props, 0, ids, &received)
        .unwrap();
    assert_eq!(restored, words);
}

/// Random (words, n_parities, survivor subset) triples for one word size.
fn code_and_survivors(word_size: usize) -> impl Strategy<Value = (Vec<u64>, usize, Vec<usize>)> {
    let card = (1u64 << (8 * word_size)) + 1;
    (1usize..=8, 1usize..=8).prop_flat_map(move |(k, m)| {
        let n = (k + m).next_power_of_two();
        (
            prop::collection::vec(0..card - 1, k),
            Just(m),
            prop::sample::subsequence((0..n).collect::<Vec<usize>>(), k),
        )
    })
}

proptest! {
    #[test]
    fn recovers_from_any_survivor_subset_one_byte(
        (words, m, ids) in code_and_survivors(1)
    ) {
        let words: Vec<u16> = words.iter().map(|&w| w as u16).collect();
        roundtrip(1, &words, m, &ids);
    }

    #[test]
    fn recovers_from_any_survivor_subset_two_byte(
        (words, m, ids) in code_and_survivors(2)
    ) {
        let words: Vec<u32> = words.iter().map(|&w| w as u32).collect();
        roundtrip(2, &words, m, &ids);
    }

    #[test]
    fn packet_lanes_match_scalar_runs(
        columns in (1usize..=4).prop_flat_map(|pkt_size| {
            prop::collection::vec(prop::collection::vec(0u64..256, pkt_size), 4)
        }),
        ids in prop::sample::subsequence((0usize..8).collect::<Vec<usize>>(), 4)
    ) {
        let k = 4;
        let pkt_size = columns[0].len();
        let coder = FntRs::<u16>::new(1, k, 4, pkt_size).unwrap();
        let n = coder.n_outputs();

        let mut words = Buffers::<u16>::zeroed(k, pkt_size);
        for (i, column) in columns.iter().enumerate() {
            for (j, &w) in column.iter().enumerate() {
                words.set(i, j, w as u16);
            }
        }

        let mut output = Buffers::<u16>::zeroed(n, pkt_size);
        let mut props = vec![Properties::new(); n];
        coder.encode_buffers(&mut output, &mut props, 0, &words);

        let mut received = Buffers::<u16>::zeroed(k, pkt_size);
        for (row, &id) in ids.iter().enumerate() {
            for j in 0..pkt_size {
                received.set(row, j, output.get(id, j));
            }
        }
        let mut restored = Buffers::<u16>::zeroed(k, pkt_size);
        coder.decode_buffers(&mut restored, &props, 0, &ids, &received).unwrap();
        prop_assert_eq!(&restored, &words);

        // lane j of the packet run must agree with a scalar run of column j
        for j in 0..pkt_size {
            let lane: Vec<u16> = (0..k).map(|i| words.get(i, j)).collect();
            let mut lane_out = vec![0u16; n];
            let mut lane_props = vec![Properties::new(); n];
            coder.encode(&mut lane_out, &mut lane_props, j * coder.word_size(), &lane);
            for i in 0..n {
                prop_assert_eq!(output.get(i, j), lane_out[i]);
            }
        }
    }
}

#[test]
fn transform_output_differs_from_source() {
    let coder = FntRs::<u32>::new(2, 4, 4, 1).unwrap();
    let words = [1000u32, 2000, 3000, 4000];
    let mut output = vec![0u32; coder.n_outputs()];
    let mut props = vec![Properties::new(); coder.n_outputs()];
    coder.encode(&mut output, &mut props, 0, &words);
    assert_ne!(&output[..4], &words);
}

#[test]
fn duplicate_ids_fail_with_an_arithmetic_error() {
    let coder = FntRs::<u16>::new(1, 3, 1, 1).unwrap();
    let words = [1u16, 2, 3];
    let mut output = vec![0u16; 4];
    let mut props = vec![Properties::new(); 4];
    coder.encode(&mut output, &mut props, 0, &words);

    let mut restored = [0u16; 3];
    let err = coder
        .decode(&mut restored, &props, 0, &[2, 2, 1], &[output[2], output[2], output[1]])
        .unwrap_err();
    assert_eq!(err, Error::ZeroDivisor { modulus: 257 });
    assert_eq!(err.kind(), ErrorKind::Arithmetic);
}

#[test]
fn clipped_symbols_survive_erasure_patterns() {
    // one transform output lands on q - 1 = 65536 and rides the side channel
    let coder = FntRs::<u32>::new(2, 4, 3, 1).unwrap();
    let words = [65533u32, 1, 1, 1];
    let n = coder.n_outputs();
    let mut output = vec![0u32; n];
    let mut props = vec![Properties::new(); n];
    coder.encode(&mut output, &mut props, 0, &words);

    assert_eq!(output[0], 0);
    assert!(props[0].iter().is_marked(0));

    for ids in [[0usize, 1, 2, 3], [0, 2, 4, 6], [4, 5, 6, 7], [7, 0, 3, 5]] {
        let received: Vec<u32> = ids.iter().map(|&i| output[i]).collect();
        let mut restored = [0u32; 4];
        coder.decode(&mut restored, &props, 0, &ids, &received).unwrap();
        assert_eq!(restored, words, "ids = {ids:?}");
    }
}
