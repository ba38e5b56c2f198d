//! Battle setups loaded from RON content files or JSON player records.

use crate::battle::runner::{BattleRunner, Pacing};
use crate::battle::state::{BattleState, TurnRng};
use crate::character::Character;
use crate::errors::{ConfigError, ConfigResult};
use schema::{CharacterTemplate, SkillEffect};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything needed to start a battle: who fights and how rounds are paced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSetup {
    pub player: CharacterTemplate,
    pub enemies: Vec<CharacterTemplate>,
    #[serde(default)]
    pub pacing: Pacing,
}

impl BattleSetup {
    pub fn new(player: CharacterTemplate, enemies: Vec<CharacterTemplate>) -> Self {
        BattleSetup {
            player,
            enemies,
            pacing: Pacing::default(),
        }
    }

    pub fn from_ron_str(content: &str) -> ConfigResult<Self> {
        let setup: BattleSetup = ron::from_str(content)?;
        setup.validate()?;
        Ok(setup)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let setup: BattleSetup = serde_json::from_str(content)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Load a setup file, picking the format from its extension (`.ron` or `.json`).
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::from_ron_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.enemies.is_empty() {
            return Err(ConfigError::Invalid("enemy roster is empty".to_string()));
        }

        validate_template(&self.player)?;
        for enemy in &self.enemies {
            validate_template(enemy)?;
        }
        Ok(())
    }

    pub fn into_battle_state(self, battle_id: String) -> BattleState {
        let player = Character::from_template(&self.player);
        let enemies = self.enemies.iter().map(Character::from_template).collect();
        BattleState::new(battle_id, player, enemies)
    }

    pub fn into_runner(self, battle_id: String, rng: TurnRng) -> BattleRunner {
        let pacing = self.pacing;
        let player = Character::from_template(&self.player);
        let enemies = self.enemies.iter().map(Character::from_template).collect();
        BattleRunner::new(battle_id, player, enemies, rng, pacing)
    }
}

/// Parse a persisted player record (JSON) into a template.
pub fn player_from_json(content: &str) -> ConfigResult<CharacterTemplate> {
    let template: CharacterTemplate = serde_json::from_str(content)?;
    validate_template(&template)?;
    Ok(template)
}

fn validate_template(template: &CharacterTemplate) -> ConfigResult<()> {
    let invalid = |reason: &str| -> ConfigResult<()> {
        Err(ConfigError::Invalid(format!("{}: {}", template.name, reason)))
    };

    if template.name.trim().is_empty() {
        return Err(ConfigError::Invalid("character name is empty".to_string()));
    }
    if template.max_hp == 0 {
        return invalid("max_hp must be positive");
    }
    if !template.attack_multiplier.is_finite() || template.attack_multiplier < 0.0 {
        return invalid("attack_multiplier must be a non-negative number");
    }
    if !template.crit_rate.is_finite() {
        return invalid("crit_rate must be a number");
    }
    if !template.crit_damage.is_finite() || template.crit_damage < 0.0 {
        return invalid("crit_damage must be a non-negative number");
    }

    for skill in &template.skills {
        match &skill.effect {
            SkillEffect::Damage { power, multiplier } => {
                if !power.is_finite() || !multiplier.is_finite() {
                    return invalid(&format!("skill {} has a non-numeric power", skill.name));
                }
            }
            SkillEffect::Heal { .. } => {}
            SkillEffect::Buff {
                magnitude, turns, ..
            } => {
                if !magnitude.is_finite() {
                    return invalid(&format!("skill {} has a non-numeric magnitude", skill.name));
                }
                if *turns == 0 {
                    return invalid(&format!("skill {} must last at least one turn", skill.name));
                }
            }
        }
    }

    Ok(())
}
