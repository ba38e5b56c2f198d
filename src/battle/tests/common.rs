use crate::battle::state::{BattleState, TurnRng};
use crate::character::Character;
use crate::prefab_rosters;
use schema::Skill;
use std::sync::Arc;

/// A builder for creating test characters with common defaults.
///
/// # Example
/// ```ignore
/// let hero = TestCharacterBuilder::new("Hero")
///     .with_stats(25, 15, 0.8)
///     .with_skills(vec![Skill::heal("Mend", 5, 20)])
///     .with_hp(50)
///     .build();
/// ```
pub struct TestCharacterBuilder {
    name: String,
    max_hp: u32,
    max_mp: u32,
    attack: u32,
    defense: u32,
    attack_multiplier: f64,
    crit_rate: f64,
    crit_damage: f64,
    skills: Vec<Skill>,
    current_hp: Option<u32>,
    current_mp: Option<u32>,
}

impl TestCharacterBuilder {
    /// Creates a new builder with 100 HP, no MP, 10 attack and no defense.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            max_hp: 100,
            max_mp: 0,
            attack: 10,
            defense: 0,
            attack_multiplier: 1.0,
            crit_rate: 0.0,
            crit_damage: 1.5,
            skills: Vec::new(),
            current_hp: None,
            current_mp: None,
        }
    }

    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn with_max_mp(mut self, max_mp: u32) -> Self {
        self.max_mp = max_mp;
        self
    }

    pub fn with_stats(mut self, attack: u32, defense: u32, attack_multiplier: f64) -> Self {
        self.attack = attack;
        self.defense = defense;
        self.attack_multiplier = attack_multiplier;
        self
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

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Sets the current MP. If not set, MP will be max.
    pub fn with_mp(mut self, mp: u32) -> Self {
        self.current_mp = Some(mp);
        self
    }

    pub fn build(self) -> Character {
        let mut character = Character::new(
            &self.name,
            self.max_hp,
            self.max_mp,
            self.attack,
            self.defense,
            self.attack_multiplier,
        )
        .with_crit(self.crit_rate, self.crit_damage)
        .with_skills(Arc::from(self.skills));

        if let Some(hp) = self.current_hp {
            character.set_hp(hp);
        }
        if let Some(mp) = self.current_mp {
            character.set_mp(mp);
        }

        character
    }
}

/// The default hero, Goblin and Orc.
pub fn hero() -> Character {
    Character::from_template(&prefab_rosters::default_hero())
}

pub fn goblin() -> Character {
    Character::from_template(&prefab_rosters::goblin())
}

pub fn orc() -> Character {
    Character::from_template(&prefab_rosters::orc())
}

// Indices into the default hero's skill list.
pub const FIREBALL: usize = 0;
pub const SHADOW_STRIKE: usize = 1;
pub const FLAME_BURST: usize = 2;
pub const CRITICAL_BOOST: usize = 3;
pub const PROTECTIVE_BARRIER: usize = 4;

/// Creates a battle state for testing.
pub fn create_test_battle(player: Character, enemies: Vec<Character>) -> BattleState {
    BattleState::new("test_battle".to_string(), player, enemies)
}

/// Rolls that never crit (any crit rate below 1.0).
/// Provides a generous buffer of values so tests never exhaust it.
pub fn no_crit_rng() -> TurnRng {
    TurnRng::new_for_test(vec![0.999; 100])
}

/// Rolls that always crit (any crit rate above 0.0).
pub fn always_crit_rng() -> TurnRng {
    TurnRng::new_for_test(vec![0.0; 100])
}
