/// Fast u32 radix sort for posting lists.
/// - Sorts ascending in place
/// - LSD, one byte per pass; passes where every key shares the byte are skipped
///
/// Complexity: at most 4 passes, each O(n + 256)
#[inline]
pub fn radix_sort_u32(keys: &mut [u32]) {
    let n = keys.len();
    if n <= 1 {
        return;
    }

    // Small sizes: insertion sort is often faster than allocating scratch.
    if n <= 32 {
        insertion_sort_u32(keys);
        return;
    }

    // adapters usually hand out lists already in doc order
    if keys.windows(2).all(|w| w[0] <= w[1]) {
        return;
    }

    // Scratch buffer (allocate once per call)
    let mut tmp = vec![0u32; n];
    // true while the latest pass output lives in `tmp`
    let mut in_tmp = false;

    for shift in [0u32, 8, 16, 24] {
        let (src, dst): (&[u32], &mut [u32]) = if in_tmp {
            (&tmp[..], &mut keys[..])
        } else {
            (&keys[..], &mut tmp[..])
        };

        let mut count = [0usize; 256];

        // Count
        for &k in src.iter() {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }

        // 全キーが同じバケットならこのパスは不要
        if count.iter().any(|&c| c == n) {
            continue;
        }

        // Prefix sum -> starting positions
        let mut sum = 0usize;
        for c in count.iter_mut() {
            let prev = *c;
            *c = sum;
            sum += prev;
        }

        // Distribute (stable)
        for &k in src.iter() {
            let b = ((k >> shift) & 0xFF) as usize;
            dst[count[b]] = k;
            count[b] += 1;
        }

        in_tmp = !in_tmp;
    }

    // skipped passes break the even pass count, so the result may sit in scratch
    if in_tmp {
        keys.copy_from_slice(&tmp);
    }
}

/// Sort ascending and drop repeated ids
#[inline]
pub fn sort_dedup_postings(postings: &mut Vec<u32>) {
    radix_sort_u32(postings);
    postings.dedup();
}

/// Tiny insertion sort for small n.
#[inline(always)]
fn insertion_sort_u32(keys: &mut [u32]) {
    let n = keys.len();
    for i in 1..n {
        let mut j = i;
        while j > 0 && keys[j] < keys[j - 1] {
            keys.swap(j, j - 1);
            j -= 1;
        }
    }
}
