use serde::{Deserialize, Serialize};

// Constants for reward calculations
const EXP_PER_ENEMY: u32 = 10;
const COINS_PER_ENEMY: u32 = 5;

/// Experience and coins granted for winning a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleRewards {
    pub exp: u32,
    pub coins: u32,
}

impl BattleRewards {
    /// Rewards scale with the size of the full roster, not the survivors
    /// at the time of victory.
    pub fn for_roster(enemy_count: usize) -> Self {
        let count = u32::try_from(enemy_count).unwrap_or(u32::MAX);
        BattleRewards {
            exp: EXP_PER_ENEMY.saturating_mul(count),
            coins: COINS_PER_ENEMY.saturating_mul(count),
        }
    }
}
