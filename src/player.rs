use serde::{Deserialize, Serialize};

/// The intents a player can submit on their turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    // Normal attack against the selected enemy.
    Attack,

    // Casts the selected skill. Damage skills go at the selected enemy,
    // heals and buffs at the player.
    Skill,
}

/// The player's current choices. Selections persist across turns until changed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    // Index into the player's skill list, if a skill has been picked.
    pub skill: Option<usize>,

    // Index into the enemy roster. May point at a defeated enemy; that is only
    // rejected when an action is submitted.
    pub target: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            skill: None,
            target: 0,
        }
    }
}
