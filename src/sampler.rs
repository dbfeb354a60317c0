use crate::words::WordEntry;
use rand::seq::SliceRandom;
use rand::Rng;

/// Draw `count` distinct entries from the pool uniformly at random,
/// without replacement. Returns `min(count, pool.len())` entries; an
/// empty pool yields an empty Vec (callers treat that as a load failure).
pub fn sample(pool: &[WordEntry], count: usize, rng: &mut impl Rng) -> Vec<WordEntry> {
    pool.choose_multiple(rng, count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(words: &[&str]) -> Vec<WordEntry> {
        words.iter().map(|w| WordEntry::new(*w)).collect()
    }

    #[test]
    fn test_sample_returns_requested_count() {
        let pool = pool(&["one", "two", "three", "four", "five"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample(&pool, 3, &mut rng).len(), 3);
    }

    #[test]
    fn test_sample_caps_at_pool_size() {
        let pool = pool(&["one", "two"]);
        let mut rng = StdRng::seed_from_u64(2);
        // Asking for more than the pool holds must terminate and cap.
        assert_eq!(sample(&pool, 10, &mut rng).len(), 2);
    }

    #[test]
    fn test_sample_empty_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(sample(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_zero_count() {
        let pool = pool(&["one", "two"]);
        let mut rng = StdRng::seed_from_u64(4);
        assert!(sample(&pool, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let pool = pool(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = sample(&pool, 5, &mut rng);
            let mut words: Vec<&str> = picked.iter().map(|e| e.word.as_str()).collect();
            words.sort_unstable();
            words.dedup();
            assert_eq!(words.len(), 5, "duplicate entry with seed {seed}");
        }
    }

    #[test]
    fn test_sample_draws_from_pool_only() {
        let pool = pool(&["red", "green", "blue"]);
        let mut rng = StdRng::seed_from_u64(5);
        for e in sample(&pool, 2, &mut rng) {
            assert!(pool.contains(&e));
        }
    }

    #[test]
    fn test_sample_eventually_covers_pool() {
        // Statistical: over many draws of one entry, every word shows up.
        let pool = pool(&["ant", "bee", "cow", "doe"]);
        let mut seen = std::collections::HashSet::new();
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            for e in sample(&pool, 1, &mut rng) {
                seen.insert(e.word);
            }
        }
        assert_eq!(seen.len(), pool.len());
    }
}
