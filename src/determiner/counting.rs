use crate::config::Propagation;
use crate::data::{DocId, Signature};

/// Exact signature counts from sorted posting lists.
///
/// Walks all lists with one cursor each. Every document in the union of the
/// lists is visited once and bumps the counter of exactly the positions whose
/// list contains it. `counts[0]` is never touched.
///
/// # Arguments
/// * `postings` - one ascending, repeat-free list per word-set position
///
/// # Returns
/// * `Vec<u32>` - `2^W` exact counts indexed by signature
pub fn exact_counts(postings: &[&[DocId]]) -> Vec<u32> {
    let word_count = postings.len();
    let mut counts = vec![0u32; 1usize << word_count];
    let mut cursors = vec![0usize; word_count];

    loop {
        let mut next_doc: Option<DocId> = None;
        let mut signature: Signature = 0;
        for (i, list) in postings.iter().enumerate() {
            let Some(&doc) = list.get(cursors[i]) else {
                continue;
            };
            match next_doc {
                Some(current) if doc > current => {}
                Some(current) if doc == current => signature |= 1 << i,
                // smaller id (or first live cursor) restarts the signature
                _ => {
                    next_doc = Some(doc);
                    signature = 1 << i;
                }
            }
        }
        if next_doc.is_none() {
            break;
        }

        counts[signature as usize] += 1;
        for (i, cursor) in cursors.iter_mut().enumerate() {
            if signature & (1 << i) != 0 {
                *cursor += 1;
            }
        }
    }
    counts
}

/// Turn exact counts into "at least" counts in place.
/// Signature 0 is left out, so `counts[0]` keeps whatever it held.
pub fn propagate(counts: &mut [u32], propagation: Propagation) {
    match propagation {
        Propagation::Naive => propagate_naive(counts),
        Propagation::SubsetSum => propagate_subset_sum(counts),
    }
}

/// Adds every superset's exact count to each subset, O(4^W).
/// Ascending `i` only reads `counts[j]` with `j > i`, which are still exact.
fn propagate_naive(counts: &mut [u32]) {
    let len = counts.len();
    for i in 1..len {
        for j in (i + 1)..len {
            // i is a subset of j
            if i & j == i {
                counts[i] += counts[j];
            }
        }
    }
}

/// Superset sums one bit at a time, O(W * 2^W).
fn propagate_subset_sum(counts: &mut [u32]) {
    let len = counts.len();
    let mut bit = 1usize;
    while bit < len {
        for mask in 1..len {
            if mask & bit == 0 {
                counts[mask] += counts[mask | bit];
            }
        }
        bit <<= 1;
    }
}
