//! Levenshtein edit distance over Unicode scalar values.
//!
//! Used by the scorer to compare a normalized transcript against the
//! normalized target. Inputs are vocabulary words or short sentences, so the
//! quadratic table is never large.

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character insertions, deletions and
/// substitutions (unit cost each) required to transform `a` into `b`.
/// Characters are compared as `char`s, so `"ё"` counts as one character.
///
/// Only two rows of the `(m+1) x (n+1)` table are kept alive; the values are
/// the same as the full table's.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Base row: transforming "" into the first j chars of b.
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            curr[j] = if a_chars[i - 1] == b_chars[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j - 1] // substitution
                    .min(prev[j]) // deletion
                    .min(curr[j - 1]) // insertion
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity as a whole percentage, rounded half up:
/// `round((max_len - distance) / max_len * 100)`.
///
/// `max_len` is the longer input's character count. Computed in integers so
/// an exact half (23 of 40 is 57.5) always rounds up. Two empty strings are
/// 100% similar; callers that treat empty input specially must check first.
#[allow(clippy::cast_possible_truncation)]
pub fn similarity_percent(a: &str, b: &str) -> u8 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let same = max_len - distance(a, b);
    // floor(100 * same / max + 1/2) == (200 * same + max) / (2 * max)
    ((200 * same + max_len) / (2 * max_len)) as u8
}
