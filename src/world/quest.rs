use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Reward attached to a generated quest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestReward {
    Token { amount: u32 },
    Item { name: String },
}

/// One generated quest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub title: String,
    pub zone: String,
    pub objective: String,
    pub target_count: u32,
    pub reward: QuestReward,
    /// ISO-8601 UTC timestamp, not covered by the seed
    pub expires_at: String,
}

/// Generate a quest from an optional seed
///
/// Returns the effective seed alongside the quest so unseeded callers can
/// reproduce the result. Only `expires_at` varies between calls with the
/// same seed.
pub fn generate_quest(seed: Option<u64>) -> (u64, Quest) {
    let seed = super::resolve_seed(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let targets = ["Sentinel", "Wraith", "Marauder", "Crawler", "Revenant"];
    let zones = ["Obsidian Flats", "Neon Mire", "Fracture Ridge", "Echo Dunes"];
    let items = ["Ion Blade", "Aether Core", "Flux Capacitor"];

    // Both reward candidates are drawn before the pick so a seed pins down
    // the full set of rolls, not just the chosen branch.
    let rewards = [
        QuestReward::Token {
            amount: rng.gen_range(5..=25),
        },
        QuestReward::Item {
            name: items.choose(&mut rng).unwrap().to_string(),
        },
    ];

    let quest = Quest {
        title: format!("Cull the {}", targets.choose(&mut rng).unwrap()),
        zone: zones.choose(&mut rng).unwrap().to_string(),
        objective: "Eliminate hostiles and recover components".to_string(),
        target_count: rng.gen_range(3..=12),
        reward: rewards.choose(&mut rng).unwrap().clone(),
        expires_at: Utc::now().to_rfc3339(),
    };

    (seed, quest)
}
