use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants, EnumIter};

/// The stat or resource a buff modifies.
///
/// The `Display` text is the short label used in battle log lines
/// ("gains ATK of 10!").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum BuffKind {
    #[strum(to_string = "ATK")]
    AttackPercent,
    #[strum(to_string = "DEF")]
    DefensePercent,
    #[strum(to_string = "Crit Rate")]
    CritRatePercent,
    #[strum(to_string = "Crit Damage")]
    CritDamagePercent,
    #[strum(to_string = "Shield")]
    Shield,
}

impl BuffKind {
    /// Percent buffs scale a base stat; the shield buff feeds the shield cap instead.
    pub fn is_percent(self) -> bool {
        !matches!(self, BuffKind::Shield)
    }
}

fn default_multiplier() -> f64 {
    1.0
}

/// What a skill does when it resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(SkillKind), derive(Hash, Display, Serialize, Deserialize))]
pub enum SkillEffect {
    /// Direct damage against the chosen target, mitigated by its defense.
    Damage {
        power: f64,
        #[serde(default = "default_multiplier")]
        multiplier: f64,
    },
    /// Restores hit points to the caster.
    Heal { amount: u32 },
    /// Adds a timed buff to the caster.
    Buff {
        kind: BuffKind,
        magnitude: f64,
        turns: u32,
    },
}

impl SkillEffect {
    pub fn kind(&self) -> SkillKind {
        SkillKind::from(self)
    }

    /// Damage skills go at an enemy; heals and buffs land on the caster.
    pub fn targets_enemy(&self) -> bool {
        matches!(self, SkillEffect::Damage { .. })
    }
}

/// Immutable skill content. Characters share their skill lists rather than
/// owning a copy each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub mana_cost: u32,
    pub effect: SkillEffect,
}

impl Skill {
    pub fn damage(name: &str, mana_cost: u32, power: f64, multiplier: f64) -> Self {
        Skill {
            name: name.to_string(),
            mana_cost,
            effect: SkillEffect::Damage { power, multiplier },
        }
    }

    pub fn heal(name: &str, mana_cost: u32, amount: u32) -> Self {
        Skill {
            name: name.to_string(),
            mana_cost,
            effect: SkillEffect::Heal { amount },
        }
    }

    pub fn buff(name: &str, mana_cost: u32, kind: BuffKind, magnitude: f64, turns: u32) -> Self {
        Skill {
            name: name.to_string(),
            mana_cost,
            effect: SkillEffect::Buff {
                kind,
                magnitude,
                turns,
            },
        }
    }
}
