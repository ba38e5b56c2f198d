//! Driving a battle from a compact command string or a simple autopilot.

use crate::battle::runner::{BattleRunner, BattleRunnerError, ExecutionResult};
use crate::battle::state::BattleState;
use crate::errors::ActionError;
use crate::player::PlayerAction;
use schema::SkillKind;
use std::str::FromStr;

/// One step of a scripted battle.
///
/// Written as `a` (attack), `s` (cast the selected skill), `s<N>` (select skill
/// N and cast it), `t<N>` (select target N) or `r` (resume a deferred enemy
/// phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Attack,
    Skill(Option<usize>),
    Target(usize),
    Resume,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("unrecognised script step '{0}'")]
    UnknownStep(String),
    #[error("bad index in script step '{0}'")]
    BadIndex(String),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Runner(#[from] BattleRunnerError),
}

impl FromStr for ScriptStep {
    type Err = ScriptError;

    fn from_str(step: &str) -> Result<Self, Self::Err> {
        let step = step.trim();
        let index = |digits: &str| {
            digits
                .parse::<usize>()
                .map_err(|_| ScriptError::BadIndex(step.to_string()))
        };

        match step {
            "a" => Ok(ScriptStep::Attack),
            "s" => Ok(ScriptStep::Skill(None)),
            "r" => Ok(ScriptStep::Resume),
            _ => {
                if let Some(digits) = step.strip_prefix('s') {
                    Ok(ScriptStep::Skill(Some(index(digits)?)))
                } else if let Some(digits) = step.strip_prefix('t') {
                    Ok(ScriptStep::Target(index(digits)?))
                } else {
                    Err(ScriptError::UnknownStep(step.to_string()))
                }
            }
        }
    }
}

/// Parses a comma separated script such as `"t1,s0,a,a"`. Empty entries are
/// skipped.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    script
        .split(',')
        .filter(|step| !step.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Applies one step to the runner. Selection steps return `None`; steps that
/// resolve battle actions return what happened.
pub fn apply_step(
    runner: &mut BattleRunner,
    step: ScriptStep,
) -> Result<Option<ExecutionResult>, ScriptError> {
    match step {
        ScriptStep::Attack => Ok(Some(runner.submit_action(PlayerAction::Attack))),
        ScriptStep::Skill(index) => {
            if index.is_some() {
                runner.select_skill(index)?;
            }
            Ok(Some(runner.submit_action(PlayerAction::Skill)))
        }
        ScriptStep::Target(index) => {
            runner.select_target(index)?;
            Ok(None)
        }
        ScriptStep::Resume => Ok(Some(runner.resume_enemy_phase()?)),
    }
}

/// A plain autopilot: target the first enemy still standing, heal below half
/// HP, otherwise use the first affordable damage skill, otherwise attack.
pub fn auto_steps(battle_state: &BattleState) -> Vec<ScriptStep> {
    let mut steps = Vec::new();
    let player = battle_state.player();

    if let Some(target) = battle_state
        .enemies()
        .iter()
        .position(|enemy| !enemy.is_defeated())
    {
        if target != battle_state.selection().target {
            steps.push(ScriptStep::Target(target));
        }
    }

    let affordable = |kind: SkillKind| {
        player
            .skills()
            .iter()
            .position(|skill| skill.effect.kind() == kind && skill.mana_cost <= player.mp())
    };

    let hurt = player.hp().saturating_mul(2) < player.max_hp();
    let heal = if hurt { affordable(SkillKind::Heal) } else { None };

    match heal.or_else(|| affordable(SkillKind::Damage)) {
        Some(index) => steps.push(ScriptStep::Skill(Some(index))),
        None => steps.push(ScriptStep::Attack),
    }

    steps
}
