use crate::character::Character;
use crate::errors::ActionError;
use crate::player::{PlayerAction, Selection};
use crate::rewards::BattleRewards;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::BuffKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    PlayerTurn,
    ResolvingEnemyTurn, // Player has acted, enemies have not yet retaliated
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            GameState::PlayerTurn => "the player's turn",
            GameState::ResolvingEnemyTurn => "the enemies' turn",
            GameState::Won => "a won battle",
            GameState::Lost => "a lost battle",
        };
        write!(f, "{}", display_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted,

    // Normal attacks, from the player or an enemy
    Attacked {
        attacker: String,
        target: String,
        damage: u32,
        absorbed: u32,
        critical: bool,
    },
    ManaRestored {
        target: String,
        amount: u32,
    },

    // Skills
    SkillDamage {
        caster: String,
        skill: String,
        target: String,
        damage: u32,
        absorbed: u32,
        critical: bool,
    },
    SkillHealed {
        caster: String,
        skill: String,
        amount: u32,
    },
    SkillBuffed {
        caster: String,
        skill: String,
        kind: BuffKind,
        magnitude: f64,
    },

    // Refused actions
    ActionRejected {
        actor: String,
        action: PlayerAction,
        reason: ActionError,
    },

    // End of turn
    BuffExpired {
        target: String,
        kind: BuffKind,
    },
    TurnEnded {
        turn_number: u32,
    },

    // Battle end
    Victory {
        rewards: BattleRewards,
    },
    Defeat,
}

impl BattleEvent {
    /// Formats the event into a human-readable log line.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted => Some("Battle started!".to_string()),

            BattleEvent::Attacked {
                attacker,
                target,
                damage,
                absorbed,
                critical,
            } => Some(format!(
                "{} attacks {} for {} damage!{}",
                attacker,
                target,
                damage,
                Self::hit_notes(*absorbed, *critical)
            )),
            BattleEvent::ManaRestored { .. } => None,

            BattleEvent::SkillDamage {
                caster,
                skill,
                target,
                damage,
                absorbed,
                critical,
            } => Some(format!(
                "{} uses {} on {} for {} damage!{}",
                caster,
                skill,
                target,
                damage,
                Self::hit_notes(*absorbed, *critical)
            )),
            BattleEvent::SkillHealed {
                caster,
                skill,
                amount,
            } => Some(format!("{} uses {} and heals for {} HP!", caster, skill, amount)),
            BattleEvent::SkillBuffed {
                caster,
                skill,
                kind,
                magnitude,
            } => Some(format!(
                "{} uses {} and gains {} of {}!",
                caster, skill, kind, magnitude
            )),

            BattleEvent::ActionRejected {
                actor,
                action,
                reason,
            } => Some(format!(
                "{} {}",
                actor,
                Self::format_rejection(*action, reason)
            )),

            BattleEvent::BuffExpired { .. } => None, // Visible through the stat change
            BattleEvent::TurnEnded { .. } => None,

            BattleEvent::Victory { rewards } => Some(format!(
                "You win! Gained {} EXP and {} coins.",
                rewards.exp, rewards.coins
            )),
            BattleEvent::Defeat => Some("You lose!".to_string()),
        }
    }

    // --- Private Helper Functions ---

    fn hit_notes(absorbed: u32, critical: bool) -> String {
        let mut notes = String::new();
        if absorbed > 0 {
            notes.push_str(&format!(" ({} absorbed by shield!)", absorbed));
        }
        if critical {
            notes.push_str(" (Critical!)");
        }
        notes
    }

    fn format_rejection(action: PlayerAction, reason: &ActionError) -> String {
        match (action, reason) {
            (_, ActionError::InsufficientMana { .. }) => "doesn't have enough MP!".to_string(),
            (
                PlayerAction::Attack,
                ActionError::NoTarget(_) | ActionError::TargetDefeated(_),
            ) => "tries to attack but target is defeated!".to_string(),
            (_, ActionError::NoTarget(_) | ActionError::TargetDefeated(_)) => {
                "invalid target!".to_string()
            }
            (_, ActionError::NoSkillSelected) => "has no skill selected!".to_string(),
            (_, ActionError::UnknownSkill(_)) => "doesn't know that skill!".to_string(),
            (_, ActionError::WrongPhase { phase }) => format!("can't act during {}!", phase),
        }
    }
}

/// Event bus for collecting the events produced by one call into the engine.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Log lines for every non-silent event, in order.
    pub fn formatted(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Source of the uniform [0, 1) rolls that decide critical hits.
///
/// This is the engine's only randomness. Tests script the exact rolls; replays
/// use a seed.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RollSource,
}

#[derive(Debug, Clone)]
enum RollSource {
    Scripted { outcomes: Vec<f64>, index: usize },
    Seeded(StdRng),
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self {
            source: RollSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Deterministic rolls: the same seed replays the same battle.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RollSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RollSource::Seeded(StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn next_roll(&mut self, reason: &str) -> f64 {
        let roll = match &mut self.source {
            RollSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    // Add the reason to the panic message for better debugging!
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more scripted rolls.",
                        reason
                    );
                }
                let roll = outcomes[*index];
                *index += 1;
                roll
            }
            RollSource::Seeded(rng) => rng.random::<f64>(),
        };

        tracing::trace!(roll, reason, "rng consumed");
        roll
    }
}

#[derive(Debug, Clone)]
pub struct BattleState {
    pub battle_id: String,
    pub turn_number: u32,
    player: Character,
    enemies: Vec<Character>,
    game_state: GameState,
    selection: Selection,
    rewards: Option<BattleRewards>,
    started: bool,
    log: Vec<String>,
}

impl BattleState {
    pub fn new(id: String, player: Character, enemies: Vec<Character>) -> Self {
        Self {
            battle_id: id,
            turn_number: 1,
            player,
            enemies,
            game_state: GameState::PlayerTurn,
            selection: Selection::default(),
            rewards: None,
            started: false,
            log: Vec::new(),
        }
    }

    /// Logs the opening line. Calling it again does nothing.
    pub fn start(&mut self) -> EventBus {
        let mut bus = EventBus::new();
        if !self.started {
            self.started = true;
            self.record(&mut bus, BattleEvent::BattleStarted);
        }
        bus
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn enemies(&self) -> &[Character] {
        &self.enemies
    }

    pub fn enemy(&self, index: usize) -> Option<&Character> {
        self.enemies.get(index)
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn is_over(&self) -> bool {
        self.game_state.is_terminal()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The append-only battle log, oldest line first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Set once the battle is won.
    pub fn rewards(&self) -> Option<BattleRewards> {
        self.rewards
    }

    /// Choose which enemy attacks and damage skills go at. Only accepted on
    /// the player's turn; a defeated enemy may be selected.
    pub fn select_target(&mut self, index: usize) -> Result<(), ActionError> {
        self.ensure_player_turn()?;
        self.selection.target = index;
        Ok(())
    }

    /// Choose the skill used by [`PlayerAction::Skill`]. Only accepted on the
    /// player's turn.
    pub fn select_skill(&mut self, index: Option<usize>) -> Result<(), ActionError> {
        self.ensure_player_turn()?;
        self.selection.skill = index;
        Ok(())
    }

    fn ensure_player_turn(&self) -> Result<(), ActionError> {
        if self.game_state == GameState::PlayerTurn {
            Ok(())
        } else {
            Err(ActionError::WrongPhase {
                phase: self.game_state.to_string(),
            })
        }
    }

    // --- Engine-internal mutation ---

    pub(crate) fn player_mut(&mut self) -> &mut Character {
        &mut self.player
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [Character] {
        &mut self.enemies
    }

    /// Split borrow of the player and the enemy roster.
    pub(crate) fn combatants_mut(&mut self) -> (&mut Character, &mut [Character]) {
        (&mut self.player, &mut self.enemies)
    }

    pub(crate) fn set_game_state(&mut self, game_state: GameState) {
        self.game_state = game_state;
    }

    pub(crate) fn set_rewards(&mut self, rewards: BattleRewards) {
        self.rewards = Some(rewards);
    }

    /// Appends the event's log line (if any) and hands the event to the bus.
    pub(crate) fn record(&mut self, bus: &mut EventBus, event: BattleEvent) {
        if let Some(line) = event.format() {
            self.log.push(line);
        }
        bus.push(event);
    }
}
