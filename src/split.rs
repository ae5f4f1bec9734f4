use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::validate_fraction;
use crate::error::Result;

/// Shuffles `0..len` with a seeded RNG and cuts it into train and test
/// indices. The train side gets `floor(len * train_fraction)` entries.
pub fn train_test_split(
    len: usize,
    train_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    validate_fraction(train_fraction)?;

    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let cut = (len as f64 * train_fraction).floor() as usize;
    let test = indices.split_off(cut.min(len));
    Ok((indices, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_the_fraction() {
        let (train, test) = train_test_split(10, 0.8, 0).unwrap();
        assert_eq!((train.len(), test.len()), (8, 2));
        let (train, test) = train_test_split(7, 0.5, 0).unwrap();
        assert_eq!((train.len(), test.len()), (3, 4));
    }

    #[test]
    fn is_a_partition() {
        let (train, test) = train_test_split(100, 0.8, 7).unwrap();
        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn deterministic_per_seed() {
        assert_eq!(
            train_test_split(50, 0.8, 3).unwrap(),
            train_test_split(50, 0.8, 3).unwrap()
        );
        assert_ne!(
            train_test_split(50, 0.8, 3).unwrap(),
            train_test_split(50, 0.8, 4).unwrap()
        );
    }

    #[test]
    fn empty_and_invalid() {
        assert_eq!(train_test_split(0, 0.8, 1).unwrap(), (vec![], vec![]));
        assert!(train_test_split(10, 1.5, 1).is_err());
        assert!(train_test_split(10, 0.0, 1).is_err());
    }
}
