//! Bias-free selection of a uniformly distributed integer.
//!
//! Reducing a 32-bit draw modulo `max + 1` over-weights the low values
//! whenever `max + 1` does not divide 2^32. Instead the 2^32 possible words
//! are split into `max + 1` equal buckets and words landing in the leftover
//! tail are redrawn.

use rand::RngCore;

/// Size of the range of a single `u32` draw.
const WORD_RANGE: u64 = 1 << 32;

/// Returns an integer uniformly distributed over `[0, max]`.
///
/// `max == 0` returns 0 without consuming any randomness. The expected
/// number of draws is below 2 for every `max`.
///
/// # Examples
///
/// ```rust
/// use hpmc_moves::rng::{select_index, MoveRng, Stage, StreamKey};
///
/// let mut rng = MoveRng::from_key(StreamKey::new(1, 0, 0, Stage::MOVE_KIND));
/// assert_eq!(select_index(&mut rng, 0), 0);
/// assert!(select_index(&mut rng, 9) <= 9);
/// ```
pub fn select_index<R: RngCore + ?Sized>(rng: &mut R, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }

    let num_bins = u64::from(max) + 1;
    let bin_size = WORD_RANGE / num_bins;
    let limit = WORD_RANGE - WORD_RANGE % num_bins;

    loop {
        let x = u64::from(rng.next_u32());
        if x < limit {
            // x / bin_size < num_bins <= 2^32
            return (x / bin_size) as u32;
        }
    }
}

/// [`select_index`] for `usize` bounds.
///
/// # Panics
///
/// Panics if `max` exceeds `u32::MAX`.
pub fn select_index_usize<R: RngCore + ?Sized>(rng: &mut R, max: usize) -> usize {
    match u32::try_from(max) {
        Ok(bound) => select_index(rng, bound) as usize,
        Err(_) => panic!("selection bound {} exceeds u32::MAX", max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{MoveRng, Stage, StreamKey};

    /// Replays a fixed sequence of words.
    struct SequenceRng {
        words: Vec<u32>,
        pos: usize,
    }

    impl SequenceRng {
        fn new(words: Vec<u32>) -> Self {
            Self { words, pos: 0 }
        }
    }

    impl RngCore for SequenceRng {
        fn next_u32(&mut self) -> u32 {
            let w = self.words[self.pos];
            self.pos += 1;
            w
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest.iter_mut() {
                *b = self.next_u32() as u8;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_zero_bound_consumes_nothing() {
        let mut rng = SequenceRng::new(vec![]);
        assert_eq!(select_index(&mut rng, 0), 0);
        assert_eq!(rng.pos, 0);
    }

    #[test]
    fn test_tail_words_are_rejected() {
        // 2^32 mod 3 == 1, so only u32::MAX falls in the tail
        let mut rng = SequenceRng::new(vec![u32::MAX, 2_863_311_530]);
        assert_eq!(select_index(&mut rng, 2), 2);
        assert_eq!(rng.pos, 2);
    }

    #[test]
    fn test_bucket_boundaries() {
        let bin = (WORD_RANGE / 3) as u32;
        let mut rng = SequenceRng::new(vec![0, bin - 1, bin, 2 * bin - 1, 2 * bin]);

        let picks: Vec<u32> = (0..5).map(|_| select_index(&mut rng, 2)).collect();
        assert_eq!(picks, vec![0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_power_of_two_never_rejects() {
        let mut rng = SequenceRng::new(vec![u32::MAX]);
        assert_eq!(select_index(&mut rng, 3), 3);
    }

    #[test]
    fn test_full_range() {
        let mut rng = SequenceRng::new(vec![u32::MAX, 17]);
        assert_eq!(select_index(&mut rng, u32::MAX), u32::MAX);
        assert_eq!(select_index(&mut rng, u32::MAX), 17);
    }

    #[test]
    fn test_small_sample_frequencies() {
        let mut rng = MoveRng::from_key(StreamKey::new(123, 456, 789, Stage::MOVE_KIND));
        let mut counts = [0usize; 7];
        let n = 70_000;
        for _ in 0..n {
            counts[select_index(&mut rng, 6) as usize] += 1;
        }
        for &c in &counts {
            let freq = c as f64 / n as f64;
            assert!((freq - 1.0 / 7.0).abs() < 0.01, "frequency {}", freq);
        }
    }

    #[test]
    #[should_panic(expected = "exceeds u32::MAX")]
    #[cfg(target_pointer_width = "64")]
    fn test_usize_bound_overflow_panics() {
        let mut rng = SequenceRng::new(vec![0]);
        select_index_usize(&mut rng, u32::MAX as usize + 1);
    }

    #[test]
    fn test_usize_wrapper() {
        let mut rng = SequenceRng::new(vec![u32::MAX]);
        assert_eq!(select_index_usize(&mut rng, 1), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn test_result_never_exceeds_bound(seed in any::<u64>(), max in any::<u32>()) {
                let mut rng = MoveRng::from_key(StreamKey::new(seed, 0, 0, Stage::MOVE_KIND));
                for _ in 0..16 {
                    prop_assert!(select_index(&mut rng, max) <= max);
                }
            }

            #[test]
            fn test_accepted_word_maps_to_its_bucket(word in any::<u32>(), max in 1u32..1000) {
                let num_bins = u64::from(max) + 1;
                let limit = WORD_RANGE - WORD_RANGE % num_bins;
                prop_assume!(u64::from(word) < limit);

                let mut rng = SequenceRng::new(vec![word]);
                let expected = (u64::from(word) / (WORD_RANGE / num_bins)) as u32;
                prop_assert_eq!(select_index(&mut rng, max), expected);
            }
        }
    }
}
