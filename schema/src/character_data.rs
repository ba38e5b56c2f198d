use crate::Skill;
use serde::{Deserialize, Serialize};

fn default_crit_damage() -> f64 {
    1.5
}

/// Base stats and skills used to build a combatant.
///
/// This is also the shape a player's persisted stats take when they are
/// loaded from storage before a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTemplate {
    pub name: String,
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub attack_multiplier: f64,
    #[serde(default)]
    pub crit_rate: f64,
    #[serde(default = "default_crit_damage")]
    pub crit_damage: f64,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl CharacterTemplate {
    /// A template with no crit chance, the default crit multiplier and no skills.
    pub fn new(
        name: &str,
        max_hp: u32,
        max_mp: u32,
        attack: u32,
        defense: u32,
        attack_multiplier: f64,
    ) -> Self {
        CharacterTemplate {
            name: name.to_string(),
            max_hp,
            max_mp,
            attack,
            defense,
            attack_multiplier,
            crit_rate: 0.0,
            crit_damage: default_crit_damage(),
            skills: Vec::new(),
        }
    }

    pub fn with_crit(mut self, crit_rate: f64, crit_damage: f64) -> Self {
        self.crit_rate = crit_rate;
        self.crit_damage = crit_damage;
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }
}
