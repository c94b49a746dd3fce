// tests/rng_tests.rs
//
// RNG-реализации из infra:
//  - DeterministicRng воспроизводим по seed;
//  - shuffle — перестановка (ничего не теряется);
//  - pick_index всегда в диапазоне;
//  - SystemRng не падает на граничных размерах.

use std::collections::HashSet;

use blackjack_engine::engine::RandomSource;
use blackjack_engine::infra::rng::{DeterministicRng, SystemRng};

#[test]
fn same_seed_same_shuffle() {
    let mut a = DeterministicRng::from_u64(123);
    let mut b = DeterministicRng::from_u64(123);

    let mut xs: Vec<u32> = (0..13).collect();
    let mut ys: Vec<u32> = (0..13).collect();
    a.shuffle(&mut xs);
    b.shuffle(&mut ys);

    assert_eq!(xs, ys);
}

#[test]
fn byte_seed_constructor_is_reproducible() {
    let mut a = DeterministicRng::from_seed([7u8; 32]);
    let mut b = DeterministicRng::from_seed([7u8; 32]);

    let picks_a: Vec<usize> = (0..20).map(|_| a.pick_index(13)).collect();
    let picks_b: Vec<usize> = (0..20).map(|_| b.pick_index(13)).collect();
    assert_eq!(picks_a, picks_b);
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rng = DeterministicRng::from_u64(9);
    let mut xs: Vec<u32> = (1..=13).collect();
    rng.shuffle(&mut xs);

    let set: HashSet<u32> = xs.iter().copied().collect();
    assert_eq!(set.len(), 13);
    assert_eq!(set, (1..=13).collect::<HashSet<u32>>());
}

#[test]
fn pick_index_stays_in_range_and_covers_it() {
    let mut rng = DeterministicRng::from_u64(5);
    let mut seen = HashSet::new();
    for _ in 0..2_000 {
        let i = rng.pick_index(13);
        assert!(i < 13);
        seen.insert(i);
    }
    assert_eq!(seen.len(), 13);

    assert_eq!(rng.pick_index(1), 0);
}

#[test]
fn system_rng_handles_edge_sizes() {
    let mut rng = SystemRng;

    let mut empty: Vec<u8> = Vec::new();
    rng.shuffle(&mut empty);
    assert!(empty.is_empty());

    let mut one = vec![42];
    rng.shuffle(&mut one);
    assert_eq!(one, vec![42]);

    for _ in 0..100 {
        assert!(rng.pick_index(3) < 3);
    }
}
