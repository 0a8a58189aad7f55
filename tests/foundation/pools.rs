//! Integration tests for candidate pools and seeded randomness

use cmdgen_foundation::{Pool, random_pick, seeded, select_uniform, shuffle_copy};
use proptest::prelude::*;

#[test]
fn pops_consume_candidates() {
    let mut pool: Pool<u32> = (1..=6).collect();
    assert_eq!(pool.pop_first(|n| n % 2 == 0), Some(2));
    assert_eq!(pool.pop_last(), Some(6));
    assert_eq!(pool.pop_last_where(|n| n % 2 == 1), Some(5));
    assert_eq!(pool.iter().copied().collect::<Vec<_>>(), [1, 3, 4]);
    assert_eq!(pool.pop_first(|n| *n > 10), None);
}

#[test]
fn shuffled_copy_leaves_master_alone() {
    let master: Pool<u32> = (0..50).collect();
    let mut copy = master.shuffled(&mut seeded(3));
    while copy.pop_last().is_some() {}
    assert_eq!(master.len(), 50);
}

#[test]
fn same_seed_same_shuffle() {
    let items: Vec<u32> = (0..20).collect();
    assert_eq!(shuffle_copy(&items, &mut seeded(11)), shuffle_copy(&items, &mut seeded(11)));
}

#[test]
fn empty_selection() {
    assert_eq!(select_uniform(&mut seeded(0), 0), None);
    assert_eq!(random_pick::<u8, _>(&mut seeded(0), &[]), None);
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(items in prop::collection::vec(any::<u16>(), 0..64), seed in any::<u64>()) {
        let mut shuffled = shuffle_copy(&items, &mut seeded(seed));
        let mut original = items.clone();
        shuffled.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(shuffled, original);
    }

    #[test]
    fn selection_in_range(len in 1usize..1000, seed in any::<u64>()) {
        let index = select_uniform(&mut seeded(seed), len).unwrap();
        prop_assert!(index < len);
    }
}
