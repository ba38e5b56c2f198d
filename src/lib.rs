// In: src/lib.rs

//! RPG Battle Resolver
//!
//! A turn-based battle engine: one player character against a roster of
//! enemies, with crits, stacking buffs and shields as a persistent resource.
//! The engine is pure data in, data out; UI and HTTP layers drive it through
//! [`BattleRunner`] or the turn orchestrator functions and read back snapshots
//! and the battle log.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod character;
pub mod config;
pub mod errors;
pub mod player;
pub mod prefab_rosters;
pub mod rewards;
pub mod script;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Re-export the immutable content definitions.
pub use schema::{BuffKind, CharacterTemplate, Skill, SkillEffect, SkillKind};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::runner::{
    BattleInfo, BattleRunner, BattleRunnerError, CharacterInfo, ExecutionResult, Pacing,
};
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState, TurnRng};
pub use battle::turn_orchestrator::{
    check_battle_end, execute_enemy_phase, execute_player_phase, submit_player_action,
};

// Core runtime types for a battle.
pub use character::{Buff, Character, DamageOutcome, SkillOutcome, SkillTarget};
pub use player::{PlayerAction, Selection};
pub use rewards::BattleRewards;

// Setup loading.
pub use config::{player_from_json, BattleSetup};
pub use script::{parse_script, ScriptStep};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, ConfigError, ConfigResult, ErrorKind,
};
