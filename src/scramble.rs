use crate::profile::DifficultyProfile;
use rand::seq::SliceRandom;
use rand::Rng;

/// Produce a permutation of `word`'s letters according to the difficulty
/// profile. For words longer than one letter the result is guaranteed to
/// differ from the input; shorter inputs are returned as-is.
pub fn scramble(word: &str, profile: &DifficultyProfile, rng: &mut impl Rng) -> Vec<char> {
    let original: Vec<char> = word.chars().collect();
    if original.len() <= 1 {
        return original;
    }

    let mut letters = original.clone();
    let complexity = profile.scramble_complexity;

    if profile.preserve_first_last && letters.len() > 3 {
        // Easy mode: first and last letters stay put, the middle gets a
        // fixed number of random pairwise swaps. Indices may repeat, so
        // this is intentionally a weak shuffle.
        let end = letters.len() - 1;
        let middle = &mut letters[1..end];
        let swaps = intensity(middle.len(), complexity);
        for _ in 0..swaps {
            let a = rng.gen_range(0..middle.len());
            let b = rng.gen_range(0..middle.len());
            middle.swap(a, b);
        }
    } else {
        // Full-word scramble: one Fisher-Yates pass is already a uniform
        // permutation; the pass count is an intensity knob, not a
        // correctness requirement.
        let passes = intensity(letters.len(), complexity);
        for _ in 0..passes {
            letters.shuffle(rng);
        }
    }

    if profile.extra_scrambling {
        let swaps = (letters.len() as f64 * 0.7).floor() as usize;
        for _ in 0..swaps {
            let a = rng.gen_range(0..letters.len());
            let b = rng.gen_range(0..letters.len());
            letters.swap(a, b);
        }
    }

    // Anti-identity guard: the shuffles above may land back on the
    // original order. Force one content-changing swap, confined to the
    // middle in preserve mode so the fixed end letters stay fixed unless
    // the middle has only one distinct letter.
    if letters == original {
        let len = letters.len();
        let forced = if profile.preserve_first_last && len > 3 {
            let end = len - 1;
            forced_swap(&mut letters[1..end], rng)
        } else {
            false
        };
        if !forced {
            forced_swap(&mut letters, rng);
        }
    }

    letters
}

/// Swap two positions holding different letters, chosen uniformly.
/// Returns false when no such pair exists (all letters equal), the one
/// case where no permutation can differ from the input.
fn forced_swap(letters: &mut [char], rng: &mut impl Rng) -> bool {
    let len = letters.len();
    if len < 2 || letters.iter().all(|c| *c == letters[0]) {
        return false;
    }
    loop {
        let a = rng.gen_range(0..len);
        let b = (a + rng.gen_range(1..len)) % len;
        if letters[a] != letters[b] {
            letters.swap(a, b);
            return true;
        }
    }
}

/// Number of shuffle iterations for a segment of `len` letters, at least 1.
fn intensity(len: usize, complexity: f64) -> usize {
    ((len as f64 * complexity).ceil() as usize).max(1)
}
