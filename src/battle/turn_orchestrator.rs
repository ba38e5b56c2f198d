use crate::battle::ai::{collect_enemy_actions, EnemyAction};
use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState, TurnRng};
use crate::character::{SkillOutcome, SkillTarget};
use crate::errors::ActionError;
use crate::player::PlayerAction;
use crate::rewards::BattleRewards;
use tracing::{debug, info, warn};

/// Mana the player recovers after landing a normal attack.
pub const ATTACK_MANA_REGEN: u32 = 5;

/// Main entry point for a full round.
/// Resolves the player's action and, if the battle continues, the enemy phase
/// straight after it. Returns every event that occurred.
pub fn submit_player_action(
    battle_state: &mut BattleState,
    action: PlayerAction,
    rng: &mut TurnRng,
) -> EventBus {
    let mut bus = execute_player_phase(battle_state, action, rng);

    if battle_state.game_state() == GameState::ResolvingEnemyTurn {
        bus.extend(execute_enemy_phase(battle_state, rng));
    }

    bus
}

/// Resolves only the player's half of the round.
///
/// On success the battle is either over or waiting in `ResolvingEnemyTurn`
/// for [`execute_enemy_phase`], which the caller may run whenever it likes.
/// A refused action is logged and leaves the battle in `PlayerTurn`.
pub fn execute_player_phase(
    battle_state: &mut BattleState,
    action: PlayerAction,
    rng: &mut TurnRng,
) -> EventBus {
    let mut bus = EventBus::new();

    if let Err(reason) = resolve_player_action(battle_state, action, rng, &mut bus) {
        warn!(?action, %reason, "player action rejected");
        let actor = battle_state.player().name().to_string();
        battle_state.record(
            &mut bus,
            BattleEvent::ActionRejected {
                actor,
                action,
                reason,
            },
        );
        return bus;
    }

    if !check_battle_end(battle_state, &mut bus) {
        debug!(turn = battle_state.turn_number, "handing over to enemies");
        battle_state.set_game_state(GameState::ResolvingEnemyTurn);
    }

    bus
}

/// Every living enemy attacks the player in roster order, then buffs tick
/// down (player first, then enemies in order) and the battle end is checked.
///
/// Does nothing unless the battle is in `ResolvingEnemyTurn`.
pub fn execute_enemy_phase(battle_state: &mut BattleState, rng: &mut TurnRng) -> EventBus {
    let mut bus = EventBus::new();

    if battle_state.game_state() != GameState::ResolvingEnemyTurn {
        debug!(state = ?battle_state.game_state(), "no enemy phase pending");
        return bus;
    }

    for action in collect_enemy_actions(battle_state) {
        execute_enemy_action(battle_state, action, rng, &mut bus);
    }

    execute_end_turn_phase(battle_state, &mut bus);

    if !check_battle_end(battle_state, &mut bus) {
        battle_state.set_game_state(GameState::PlayerTurn);
    }

    bus
}

/// Moves the battle into `Lost` or `Won` when one side is out of fighters.
/// Player defeat is checked first and wins any tie.
/// Returns true if the battle is over.
pub fn check_battle_end(battle_state: &mut BattleState, bus: &mut EventBus) -> bool {
    if battle_state.is_over() {
        return true;
    }

    if battle_state.player().is_defeated() {
        info!(turn = battle_state.turn_number, "battle lost");
        battle_state.set_game_state(GameState::Lost);
        battle_state.record(bus, BattleEvent::Defeat);
        return true;
    }

    if battle_state.enemies().iter().all(|enemy| enemy.is_defeated()) {
        let rewards = BattleRewards::for_roster(battle_state.enemies().len());
        info!(
            turn = battle_state.turn_number,
            exp = rewards.exp,
            coins = rewards.coins,
            "battle won"
        );
        battle_state.set_game_state(GameState::Won);
        battle_state.set_rewards(rewards);
        battle_state.record(bus, BattleEvent::Victory { rewards });
        return true;
    }

    false
}

fn resolve_player_action(
    battle_state: &mut BattleState,
    action: PlayerAction,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Result<(), ActionError> {
    if battle_state.game_state() != GameState::PlayerTurn {
        return Err(ActionError::WrongPhase {
            phase: battle_state.game_state().to_string(),
        });
    }

    match action {
        PlayerAction::Attack => resolve_attack(battle_state, rng, bus),
        PlayerAction::Skill => resolve_skill(battle_state, rng, bus),
    }
}

fn resolve_attack(
    battle_state: &mut BattleState,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Result<(), ActionError> {
    let target_index = battle_state.selection().target;
    let (player, enemies) = battle_state.combatants_mut();

    let enemy = enemies
        .get_mut(target_index)
        .ok_or(ActionError::NoTarget(target_index))?;
    if enemy.is_defeated() {
        return Err(ActionError::TargetDefeated(enemy.name().to_string()));
    }

    let outcome = player.perform_attack(enemy, rng);
    debug!(target = enemy.name(), ?outcome, "player attack resolved");

    let attacked = BattleEvent::Attacked {
        attacker: player.name().to_string(),
        target: enemy.name().to_string(),
        damage: outcome.total,
        absorbed: outcome.absorbed,
        critical: outcome.critical,
    };
    let regenerated = player.restore_mana(ATTACK_MANA_REGEN);
    let player_name = player.name().to_string();

    battle_state.record(bus, attacked);
    if regenerated > 0 {
        battle_state.record(
            bus,
            BattleEvent::ManaRestored {
                target: player_name,
                amount: regenerated,
            },
        );
    }

    Ok(())
}

fn resolve_skill(
    battle_state: &mut BattleState,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Result<(), ActionError> {
    let selection = battle_state.selection();
    let skill_index = selection.skill.ok_or(ActionError::NoSkillSelected)?;
    let (player, enemies) = battle_state.combatants_mut();

    let skill = player
        .skill(skill_index)
        .cloned()
        .ok_or(ActionError::UnknownSkill(skill_index))?;

    // Mana is checked before the target so the message names the real problem.
    if player.mp() < skill.mana_cost {
        return Err(ActionError::InsufficientMana {
            required: skill.mana_cost,
            available: player.mp(),
        });
    }

    let (outcome, target_name) = if skill.effect.targets_enemy() {
        let enemy = enemies
            .get_mut(selection.target)
            .ok_or(ActionError::NoTarget(selection.target))?;
        if enemy.is_defeated() {
            return Err(ActionError::TargetDefeated(enemy.name().to_string()));
        }
        let target_name = enemy.name().to_string();
        let outcome = player.cast_skill(skill_index, SkillTarget::Other(enemy), rng)?;
        (outcome, target_name)
    } else {
        let target_name = player.name().to_string();
        let outcome = player.cast_skill(skill_index, SkillTarget::Caster, rng)?;
        (outcome, target_name)
    };
    debug!(skill = %skill.name, target = %target_name, ?outcome, "skill resolved");

    let caster = player.name().to_string();
    let event = match outcome {
        SkillOutcome::Damage(damage) => BattleEvent::SkillDamage {
            caster,
            skill: skill.name,
            target: target_name,
            damage: damage.total,
            absorbed: damage.absorbed,
            critical: damage.critical,
        },
        SkillOutcome::Healed(amount) => BattleEvent::SkillHealed {
            caster,
            skill: skill.name,
            amount,
        },
        SkillOutcome::Buffed { kind, magnitude } => BattleEvent::SkillBuffed {
            caster,
            skill: skill.name,
            kind,
            magnitude,
        },
    };
    battle_state.record(bus, event);

    Ok(())
}

fn execute_enemy_action(
    battle_state: &mut BattleState,
    action: EnemyAction,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    match action {
        EnemyAction::AttackPlayer { enemy_index } => {
            let (player, enemies) = battle_state.combatants_mut();
            let Some(enemy) = enemies.get(enemy_index) else {
                return;
            };

            let outcome = enemy.perform_attack(player, rng);
            debug!(enemy = enemy.name(), ?outcome, "enemy attack resolved");

            let event = BattleEvent::Attacked {
                attacker: enemy.name().to_string(),
                target: player.name().to_string(),
                damage: outcome.total,
                absorbed: outcome.absorbed,
                critical: outcome.critical,
            };
            battle_state.record(bus, event);
        }
    }
}

fn execute_end_turn_phase(battle_state: &mut BattleState, bus: &mut EventBus) {
    let mut expired = Vec::new();

    let player = battle_state.player_mut();
    for kind in player.end_turn() {
        expired.push((player.name().to_string(), kind));
    }
    for enemy in battle_state.enemies_mut() {
        for kind in enemy.end_turn() {
            expired.push((enemy.name().to_string(), kind));
        }
    }

    for (target, kind) in expired {
        debug!(%target, %kind, "buff expired");
        battle_state.record(bus, BattleEvent::BuffExpired { target, kind });
    }

    let turn_number = battle_state.turn_number;
    battle_state.record(bus, BattleEvent::TurnEnded { turn_number });
    battle_state.turn_number += 1;
}
