use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState, TurnRng};
use crate::battle::turn_orchestrator::{execute_enemy_phase, execute_player_phase};
use crate::character::Character;
use crate::errors::ActionError;
use crate::player::{PlayerAction, Selection};
use crate::rewards::BattleRewards;
use serde::{Deserialize, Serialize};

/// When the enemy phase runs after a successful player action.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pacing {
    /// Enemies retaliate inside the same `submit_action` call.
    #[default]
    Immediate,
    /// The battle waits in `ResolvingEnemyTurn` until `resume_enemy_phase`,
    /// so a UI can pause between the two halves of a round.
    Deferred,
}

/// High-level battle management interface over the turn orchestrator.
/// Owns the RNG so UI and API layers only deal in intents and snapshots.
#[derive(Debug)]
pub struct BattleRunner {
    battle_state: BattleState,
    rng: TurnRng,
    pacing: Pacing,
}

/// Information about the current battle state for API queries
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleInfo {
    pub battle_id: String,
    pub turn_number: u32,
    pub game_state: GameState,
    pub selection: Selection,
    pub player: CharacterInfo,
    pub enemies: Vec<CharacterInfo>,
}

/// Information about a combatant for API queries
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CharacterInfo {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub shield: u32,
    pub max_shield: u32,
    pub is_defeated: bool,
}

impl From<&Character> for CharacterInfo {
    fn from(character: &Character) -> Self {
        CharacterInfo {
            name: character.name().to_string(),
            hp: character.hp(),
            max_hp: character.max_hp(),
            mp: character.mp(),
            max_mp: character.max_mp(),
            attack: character.attack(),
            defense: character.defense(),
            shield: character.shield(),
            max_shield: character.max_shield(),
            is_defeated: character.is_defeated(),
        }
    }
}

/// Result of executing a battle action or phase
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub events: Vec<BattleEvent>,
    pub new_game_state: GameState,
    pub battle_ended: bool,
    pub rewards: Option<BattleRewards>,
}

/// Errors that can occur when driving the battle runner
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleRunnerError {
    #[error("no enemy phase is pending (battle is in {0})")]
    NoEnemyPhasePending(GameState),
}

impl BattleRunner {
    /// Create a runner around a fresh battle. The opening log line is written
    /// immediately.
    pub fn new(
        battle_id: String,
        player: Character,
        enemies: Vec<Character>,
        rng: TurnRng,
        pacing: Pacing,
    ) -> Self {
        let mut battle_state = BattleState::new(battle_id, player, enemies);
        battle_state.start();

        Self {
            battle_state,
            rng,
            pacing,
        }
    }

    pub fn battle_state(&self) -> &BattleState {
        &self.battle_state
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Get current battle information for API queries
    pub fn get_battle_info(&self) -> BattleInfo {
        BattleInfo {
            battle_id: self.battle_state.battle_id.clone(),
            turn_number: self.battle_state.turn_number,
            game_state: self.battle_state.game_state(),
            selection: self.battle_state.selection(),
            player: CharacterInfo::from(self.battle_state.player()),
            enemies: self
                .battle_state
                .enemies()
                .iter()
                .map(CharacterInfo::from)
                .collect(),
        }
    }

    pub fn log(&self) -> &[String] {
        self.battle_state.log()
    }

    pub fn rewards(&self) -> Option<BattleRewards> {
        self.battle_state.rewards()
    }

    /// Check if the battle has ended
    pub fn is_battle_ended(&self) -> bool {
        self.battle_state.is_over()
    }

    pub fn select_target(&mut self, index: usize) -> Result<(), ActionError> {
        self.battle_state.select_target(index)
    }

    pub fn select_skill(&mut self, index: Option<usize>) -> Result<(), ActionError> {
        self.battle_state.select_skill(index)
    }

    /// Submit the player's action. With `Pacing::Immediate` the enemy phase
    /// follows in the same call; with `Pacing::Deferred` it waits for
    /// [`BattleRunner::resume_enemy_phase`].
    pub fn submit_action(&mut self, action: PlayerAction) -> ExecutionResult {
        let mut bus = execute_player_phase(&mut self.battle_state, action, &mut self.rng);

        if self.pacing == Pacing::Immediate
            && self.battle_state.game_state() == GameState::ResolvingEnemyTurn
        {
            bus.extend(execute_enemy_phase(&mut self.battle_state, &mut self.rng));
        }

        self.execution_result(bus)
    }

    /// Run the enemy phase held back by `Pacing::Deferred`.
    pub fn resume_enemy_phase(&mut self) -> Result<ExecutionResult, BattleRunnerError> {
        let game_state = self.battle_state.game_state();
        if game_state != GameState::ResolvingEnemyTurn {
            return Err(BattleRunnerError::NoEnemyPhasePending(game_state));
        }

        let bus = execute_enemy_phase(&mut self.battle_state, &mut self.rng);
        Ok(self.execution_result(bus))
    }

    fn execution_result(&self, bus: EventBus) -> ExecutionResult {
        ExecutionResult {
            events: bus.into_events(),
            new_game_state: self.battle_state.game_state(),
            battle_ended: self.battle_state.is_over(),
            rewards: self.battle_state.rewards(),
        }
    }
}
