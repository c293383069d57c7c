//! Fisher-Yates shuffling.

use rand::Rng;

/// Return a uniformly shuffled copy of `items` using the thread-local RNG.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Return a uniformly shuffled copy of `items`. The input is left untouched.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sorted(mut v: Vec<u32>) -> Vec<u32> {
        v.sort_unstable();
        v
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let input: Vec<u32> = (0..50).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let first = shuffle_with(&input, &mut rng);
        let second = shuffle_with(&input, &mut rng);
        assert_eq!(sorted(first), input);
        assert_eq!(sorted(second), input);
    }

    #[test]
    fn shuffle_keeps_duplicates() {
        let input = vec![3, 1, 3, 3, 2, 1];
        let out = shuffle(&input);
        assert_eq!(sorted(out), sorted(input));
    }

    #[test]
    fn shuffle_does_not_mutate_input() {
        let input = vec![1, 2, 3, 4];
        let _ = shuffle(&input);
        assert_eq!(input, vec![1, 2, 3, 4]);
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let empty: Vec<u32> = vec![];
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&[9]), vec![9]);
    }

    #[test]
    fn shuffle_reaches_every_position() {
        // Each element should land in the first slot at least once over many draws.
        let input = vec![0usize, 1, 2, 3];
        let mut seen = [false; 4];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            seen[shuffle_with(&input, &mut rng)[0]] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
