//! # Permutation operators
//!
//! Ordered crossover (OX) and swap mutation on city index sequences. Both keep
//! every sequence a permutation: no city is dropped or repeated.

use std::collections::HashSet;

use crate::rng::RandomNumberGenerator;

/// Draws the `[r1, r2)` slice shared by both parents.
///
/// Both bounds are drawn from `0..=len`. Equal bounds are widened by one
/// position, upwards unless already at the end, so the slice is never empty.
pub fn cut_points(len: usize, rng: &mut RandomNumberGenerator) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }

    let mut r1 = rng.index_inclusive(len);
    let mut r2 = rng.index_inclusive(len);
    if r1 > r2 {
        std::mem::swap(&mut r1, &mut r2);
    } else if r1 == r2 {
        if r2 < len {
            r2 += 1;
        } else {
            r1 -= 1;
        }
    }
    (r1, r2)
}

/// Ordered crossover with random cut points.
///
/// # Panics
///
/// Panics if the parents differ in length.
pub fn ordered_crossover(
    seq1: &[usize],
    seq2: &[usize],
    rng: &mut RandomNumberGenerator,
) -> (Vec<usize>, Vec<usize>) {
    let (r1, r2) = cut_points(seq1.len(), rng);
    ordered_crossover_at(seq1, seq2, r1, r2)
}

/// Ordered crossover around the slice `[r1, r2)`.
///
/// The first child is `seq2` with `seq2[r1..r2]` kept in place; cities of
/// `seq1[r1..r2]` found outside that slice are moved to the end. The second
/// child is built the same way from `seq1`, with the roles of the slices
/// swapped.
///
/// Both children filter the head and the tail of their base against the
/// other parent's slice. The one-sided OX variant that filters the second
/// child's tail only against its own slice leaves such cities in place
/// instead, so for `[0, 1, 2, 3]` and `[1, 0, 3, 2]` cut at `[0, 1)` it yields
/// `[0, 1, 2, 3]` where this function yields `[0, 2, 3, 1]`.
///
/// # Panics
///
/// Panics if the parents differ in length or `r1 > r2` or `r2` exceeds the
/// length.
pub fn ordered_crossover_at(
    seq1: &[usize],
    seq2: &[usize],
    r1: usize,
    r2: usize,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(seq1.len(), seq2.len(), "parents must have equal length");

    let middle1 = &seq1[r1..r2];
    let middle2 = &seq2[r1..r2];

    let child1 = build_child(seq2, middle2, middle1, r1, r2);
    let child2 = build_child(seq1, middle1, middle2, r1, r2);
    (child1, child2)
}

fn build_child(base: &[usize], kept: &[usize], moved: &[usize], r1: usize, r2: usize) -> Vec<usize> {
    let kept_set: HashSet<usize> = kept.iter().copied().collect();
    let moved_set: HashSet<usize> = moved.iter().copied().collect();

    let mut child = Vec::with_capacity(base.len());
    let mut placed = HashSet::with_capacity(base.len());

    for &city in &base[..r1] {
        if !kept_set.contains(&city) && !moved_set.contains(&city) && placed.insert(city) {
            child.push(city);
        }
    }
    for &city in kept {
        if placed.insert(city) {
            child.push(city);
        }
    }
    for &city in &base[r2..] {
        if !moved_set.contains(&city) && placed.insert(city) {
            child.push(city);
        }
    }
    for &city in moved {
        if placed.insert(city) {
            child.push(city);
        }
    }

    child
}

/// Swaps each position, with independent `probability`, with another random
/// position. Returns the number of swaps made.
///
/// A partner drawn equal to the position itself is shifted one step, towards
/// the start when it sits at the last position.
pub fn swap_mutation(
    sequence: &mut [usize],
    probability: f64,
    rng: &mut RandomNumberGenerator,
) -> usize {
    let len = sequence.len();
    if len < 2 {
        return 0;
    }

    let mut swaps = 0;
    for i in 0..len {
        if rng.probability() < probability {
            let mut j = rng.index(len);
            if j == i {
                j = if j < len - 1 { j + 1 } else { j - 1 };
            }
            sequence.swap(i, j);
            swaps += 1;
        }
    }
    swaps
}

/// Whether `sequence` holds each of `0..len` exactly once.
pub fn is_permutation(sequence: &[usize], len: usize) -> bool {
    if sequence.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &city in sequence {
        if city >= len || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
