//! String similarity metrics used by the score engine.
//!
//! The metrics are fully specified here so that scores are reproducible across
//! implementations:
//!
//! - Strings are compared as sequences of Unicode scalar values.
//! - `indel_distance(a, b) = |a| + |b| - 2 * LCS(a, b)`, i.e. edit distance with
//!   insertions and deletions only.
//! - [`ratio`] is `1 - indel_distance / (|a| + |b|)`, and `1.0` for two empty strings.
//! - [`partial_ratio`] aligns the shorter string against every window of the
//!   longer one (including the partial windows at both ends) and keeps the best
//!   [`ratio`].
//!
//! Callers normalize (trim, lower-case) before comparing.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

/// Version of the similarity definitions above. Bump when any formula changes.
pub const SIMILARITY_VERSION: u32 = 1;

lazy_static! {
    static ref WORD_PATTERN: Regex = Regex::new(r"\w+").unwrap();
}

/// Positions of each distinct character of a pattern as bit vectors, 64
/// positions per word.
///
/// LCS lengths against the pattern are computed with the bit-parallel
/// recurrence `V' = (V + (V & M)) | (V & !M)` (Hyyrö), so one text character
/// costs `ceil(|pattern| / 64)` word operations instead of `|pattern|` cells.
struct PatternMasks {
    len: usize,
    words: usize,
    /// Distinct pattern characters mapped to their row in `masks`
    rows: HashMap<char, usize>,
    /// `words` masks per distinct character
    masks: Vec<u64>,
    /// Occurrences of each distinct character in the pattern
    counts: Vec<usize>,
}

impl PatternMasks {
    fn new(pattern: &[char]) -> Self {
        let words = pattern.len().div_ceil(64);
        let mut rows: HashMap<char, usize> = HashMap::new();
        let mut masks = Vec::new();
        let mut counts = Vec::new();

        for (i, &c) in pattern.iter().enumerate() {
            let row = *rows.entry(c).or_insert_with(|| {
                masks.extend(std::iter::repeat_n(0u64, words));
                counts.push(0);
                counts.len() - 1
            });
            masks[row * words + i / 64] |= 1u64 << (i % 64);
            counts[row] += 1;
        }

        Self {
            len: pattern.len(),
            words,
            rows,
            masks,
            counts,
        }
    }

    /// Pattern row of every character of `text`; `None` for characters the
    /// pattern does not contain.
    fn encode(&self, text: &[char]) -> Vec<Option<usize>> {
        text.iter().map(|c| self.rows.get(c).copied()).collect()
    }

    /// LCS length of the pattern and an encoded text.
    fn lcs_len(&self, text: &[Option<usize>]) -> usize {
        if self.len == 0 || text.is_empty() {
            return 0;
        }

        let mut v = vec![u64::MAX; self.words];
        for row in text.iter().flatten() {
            let mask = &self.masks[row * self.words..(row + 1) * self.words];
            let mut carry = false;
            for (vw, &m) in v.iter_mut().zip(mask) {
                let u = *vw & m;
                let (sum, c1) = vw.overflowing_add(u);
                let (sum, c2) = sum.overflowing_add(carry as u64);
                carry = c1 || c2;
                *vw = sum | (*vw - u);
            }
        }

        // Cleared bits below the pattern length count matched positions
        let mut matched = 0;
        for (w, vw) in v.iter().enumerate() {
            let bits = (self.len - w * 64).min(64);
            let live = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
            matched += (!vw & live).count_ones() as usize;
        }
        matched
    }
}

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let masks = PatternMasks::new(short);
    masks.lcs_len(&masks.encode(long))
}

/// Insertion/deletion edit distance between `a` and `b`.
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * lcs_len(&a, &b)
}

fn ratio_from_lcs(total: usize, lcs: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    let distance = total - 2 * lcs;
    1.0 - distance as f64 / total as f64
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    ratio_from_lcs(a.len() + b.len(), lcs_len(a, b))
}

/// Normalized similarity in `[0, 1]`; `1.0` means identical strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best local-alignment similarity in `[0, 1]` of the shorter string against
/// the longer one.
///
/// Returns `0.0` when the shorter string is empty.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    if short.is_empty() {
        return 0.0;
    }
    if short.len() == long.len() {
        return ratio_chars(short, long);
    }

    let width = short.len();
    let masks = PatternMasks::new(short);
    let encoded = masks.encode(long);
    let mut best = 0.0f64;

    // Partial windows hanging off the start
    for end in 1..width {
        best = best.max(ratio_from_lcs(width + end, masks.lcs_len(&encoded[..end])));
    }

    // Full-width windows. The multiset overlap between the pattern and the
    // window bounds the LCS from above, so windows that cannot beat `best`
    // are skipped without running the recurrence.
    let mut window_counts = vec![0usize; masks.counts.len()];
    let mut overlap = 0usize;
    for end in 0..encoded.len() {
        if let Some(row) = encoded[end] {
            if window_counts[row] < masks.counts[row] {
                overlap += 1;
            }
            window_counts[row] += 1;
        }
        if end >= width {
            if let Some(row) = encoded[end - width] {
                window_counts[row] -= 1;
                if window_counts[row] < masks.counts[row] {
                    overlap -= 1;
                }
            }
        }
        if end + 1 < width || ratio_from_lcs(2 * width, overlap) <= best {
            continue;
        }

        let window = &encoded[end + 1 - width..=end];
        best = best.max(ratio_from_lcs(2 * width, masks.lcs_len(window)));
        if best >= 1.0 {
            return 1.0;
        }
    }

    // Partial windows hanging off the end
    for start in (long.len() - width + 1)..long.len() {
        let window = &encoded[start..];
        best = best.max(ratio_from_lcs(width + window.len(), masks.lcs_len(window)));
    }

    best
}

/// Split text into lower-cased word tokens (maximal runs of `\w`).
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Distinct lower-cased word tokens of `text`.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}
