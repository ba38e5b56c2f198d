use crate::battle::calculators::{base_damage, critical_damage};
use crate::battle::state::TurnRng;
use crate::battle::stats::{derive_stats, floor_to_u32, BaseStats, DerivedStats};
use crate::errors::ActionError;
use schema::{BuffKind, CharacterTemplate, Skill, SkillEffect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A timed modifier owned by exactly one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub kind: BuffKind,
    pub magnitude: f64,
    // Decremented once per end of turn; the buff is dropped when this reaches 0.
    pub turns_remaining: u32,
}

/// Result of pushing damage into a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDamage {
    /// Absorbed plus HP lost: the full incoming hit, even when fully absorbed.
    pub total: u32,
    pub absorbed: u32,
}

/// Result of a crit roll against a base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRoll {
    pub amount: u32,
    pub critical: bool,
}

/// Result of an attack or damage skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub total: u32,
    pub absorbed: u32,
    pub critical: bool,
}

/// What a successfully cast skill did.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillOutcome {
    Damage(DamageOutcome),
    /// HP actually restored, which may be less than the skill's amount.
    Healed(u32),
    /// The nominal magnitude granted.
    Buffed { kind: BuffKind, magnitude: f64 },
}

/// Who a skill lands on. Heals and damage can go at the caster or another
/// character; buffs always land on the caster.
#[derive(Debug)]
pub enum SkillTarget<'a> {
    Caster,
    Other(&'a mut Character),
}

#[derive(Debug, Clone)]
pub struct Character {
    name: String,
    max_hp: u32,
    hp: u32,
    max_mp: u32,
    mp: u32,
    attack_multiplier: f64,
    base: BaseStats,
    derived: DerivedStats,
    // Persistent resource, only clamped when the cap shrinks.
    shield: u32,
    buffs: Vec<Buff>,
    skills: Arc<[Skill]>,
}

impl Character {
    /// Create a character at full HP and MP with no crit chance and no skills.
    pub fn new(
        name: &str,
        max_hp: u32,
        max_mp: u32,
        attack: u32,
        defense: u32,
        attack_multiplier: f64,
    ) -> Self {
        let base = BaseStats {
            attack,
            defense,
            crit_rate: 0.0,
            crit_damage: 1.5,
        };
        Character {
            name: name.to_string(),
            max_hp,
            hp: max_hp,
            max_mp,
            mp: max_mp,
            attack_multiplier,
            base,
            derived: derive_stats(&base, &[]),
            shield: 0,
            buffs: Vec::new(),
            skills: Arc::from(Vec::new()),
        }
    }

    /// Build a character from its stored template.
    pub fn from_template(template: &CharacterTemplate) -> Self {
        Character::new(
            &template.name,
            template.max_hp,
            template.max_mp,
            template.attack,
            template.defense,
            template.attack_multiplier,
        )
        .with_crit(template.crit_rate, template.crit_damage)
        .with_skills(Arc::from(template.skills.clone()))
    }

    pub fn with_crit(mut self, crit_rate: f64, crit_damage: f64) -> Self {
        self.base.crit_rate = crit_rate;
        self.base.crit_damage = crit_damage;
        self.recompute_derived_stats();
        self
    }

    pub fn with_skills(mut self, skills: Arc<[Skill]>) -> Self {
        self.skills = skills;
        self
    }

    // === Accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn mp(&self) -> u32 {
        self.mp
    }

    pub fn max_mp(&self) -> u32 {
        self.max_mp
    }

    pub fn attack(&self) -> u32 {
        self.derived.attack
    }

    pub fn defense(&self) -> u32 {
        self.derived.defense
    }

    pub fn crit_rate(&self) -> f64 {
        self.derived.crit_rate
    }

    pub fn crit_damage(&self) -> f64 {
        self.derived.crit_damage
    }

    pub fn attack_multiplier(&self) -> f64 {
        self.attack_multiplier
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base
    }

    pub fn shield(&self) -> u32 {
        self.shield
    }

    pub fn max_shield(&self) -> u32 {
        self.derived.max_shield
    }

    pub fn buffs(&self) -> &[Buff] {
        &self.buffs
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skill(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Set current HP, clamped to max.
    pub(crate) fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Set current MP, clamped to max.
    pub(crate) fn set_mp(&mut self, mp: u32) {
        self.mp = mp.min(self.max_mp);
    }

    // === Resolution ===

    /// Shield soaks damage first; the rest comes off HP, floored at 0.
    pub fn apply_damage(&mut self, amount: u32) -> AppliedDamage {
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;

        let remainder = amount - absorbed;
        self.hp = self.hp.saturating_sub(remainder);

        AppliedDamage {
            total: remainder + absorbed,
            absorbed,
        }
    }

    /// Rolls for a critical hit against the current crit rate.
    pub fn roll_damage(&self, base_amount: u32, rng: &mut TurnRng) -> DamageRoll {
        let critical = rng.next_roll("critical hit") < self.derived.crit_rate;
        DamageRoll {
            amount: critical_damage(base_amount, self.derived.crit_damage, critical),
            critical,
        }
    }

    /// A normal attack: `attack × attack_multiplier − target.defense`, at least 1,
    /// then crit roll, then the target's shield and HP.
    pub fn perform_attack(&self, target: &mut Character, rng: &mut TurnRng) -> DamageOutcome {
        let base = base_damage(
            self.derived.attack as f64,
            self.attack_multiplier,
            target.defense(),
        );
        let roll = self.roll_damage(base, rng);
        let applied = target.apply_damage(roll.amount);

        DamageOutcome {
            total: applied.total,
            absorbed: applied.absorbed,
            critical: roll.critical,
        }
    }

    /// Casts the skill at `skill_index`. Mana is only spent when the skill
    /// actually resolves.
    pub fn cast_skill(
        &mut self,
        skill_index: usize,
        target: SkillTarget<'_>,
        rng: &mut TurnRng,
    ) -> Result<SkillOutcome, ActionError> {
        let skill = self
            .skills
            .get(skill_index)
            .cloned()
            .ok_or(ActionError::UnknownSkill(skill_index))?;

        if self.mp < skill.mana_cost {
            return Err(ActionError::InsufficientMana {
                required: skill.mana_cost,
                available: self.mp,
            });
        }
        self.mp -= skill.mana_cost;

        let outcome = match skill.effect {
            SkillEffect::Damage { power, multiplier } => {
                let outcome = match target {
                    SkillTarget::Caster => {
                        let base = base_damage(power, multiplier, self.defense());
                        let roll = self.roll_damage(base, rng);
                        let applied = self.apply_damage(roll.amount);
                        DamageOutcome {
                            total: applied.total,
                            absorbed: applied.absorbed,
                            critical: roll.critical,
                        }
                    }
                    SkillTarget::Other(other) => {
                        let base = base_damage(power, multiplier, other.defense());
                        let roll = self.roll_damage(base, rng);
                        let applied = other.apply_damage(roll.amount);
                        DamageOutcome {
                            total: applied.total,
                            absorbed: applied.absorbed,
                            critical: roll.critical,
                        }
                    }
                };
                SkillOutcome::Damage(outcome)
            }
            SkillEffect::Heal { amount } => {
                let restored = match target {
                    SkillTarget::Caster => self.heal(amount),
                    SkillTarget::Other(other) => other.heal(amount),
                };
                SkillOutcome::Healed(restored)
            }
            SkillEffect::Buff {
                kind,
                magnitude,
                turns,
            } => {
                self.add_buff(kind, magnitude, turns);
                SkillOutcome::Buffed { kind, magnitude }
            }
        };

        Ok(outcome)
    }

    /// Restores HP up to max and returns how much was actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Restores MP up to max and returns how much was actually restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let before = self.mp;
        self.mp = self.mp.saturating_add(amount).min(self.max_mp);
        self.mp - before
    }

    /// Pushes a buff instance. Shield buffs grant their magnitude as shield
    /// straight away; the cap then clamps it.
    pub fn add_buff(&mut self, kind: BuffKind, magnitude: f64, turns: u32) {
        self.buffs.push(Buff {
            kind,
            magnitude,
            turns_remaining: turns,
        });

        if kind == BuffKind::Shield {
            self.shield = self.shield.saturating_add(floor_to_u32(magnitude));
        }

        self.recompute_derived_stats();
    }

    /// Re-derives stats from base values and active buffs, then clamps the
    /// current shield into the (possibly smaller) cap.
    ///
    /// Not triggered by buff mutation on its own; every mutation path calls it.
    pub fn recompute_derived_stats(&mut self) {
        self.derived = derive_stats(&self.base, &self.buffs);
        self.shield = self.shield.min(self.derived.max_shield);
    }

    /// Ticks every buff down by one turn, drops the ones that ran out and
    /// recomputes. Returns the kinds that expired, in list order.
    pub fn end_turn(&mut self) -> Vec<BuffKind> {
        let mut expired = Vec::new();
        self.buffs.retain_mut(|buff| {
            buff.turns_remaining = buff.turns_remaining.saturating_sub(1);
            if buff.turns_remaining == 0 {
                expired.push(buff.kind);
                false
            } else {
                true
            }
        });

        self.recompute_derived_stats();
        expired
    }
}
