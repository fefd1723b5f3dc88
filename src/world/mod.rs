/// Procedural world content generators
///
/// Seeded generators for quests and exploration zones. The same seed always
/// produces the same content, so clients can share a seed instead of a whole
/// payload. Unseeded calls draw a random seed and report it back.
pub mod quest;
pub mod zone;

pub use quest::{generate_quest, Quest, QuestReward};
pub use zone::{generate_zone, Zone, ZoneResource};

use rand::Rng;

/// Resolve an optional caller seed to the effective seed used for generation
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::thread_rng().gen_range(1..=10_000_000))
}

/// Round to two decimal places for presentation values
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_seed_passthrough() {
        assert_eq!(resolve_seed(Some(42)), 42);
        assert_eq!(resolve_seed(Some(0)), 0);
    }

    #[test]
    fn test_resolve_seed_random_range() {
        for _ in 0..50 {
            let seed = resolve_seed(None);
            assert!((1..=10_000_000).contains(&seed));
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.123456), 0.12);
        assert_eq!(round2(0.995), 1.0);
        assert_eq!(round2(0.7), 0.7);
    }
}
