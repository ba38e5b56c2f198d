#[cfg(test)]
mod tests {
    use crate::battle::runner::{BattleRunner, BattleRunnerError, Pacing};
    use crate::battle::state::{GameState, TurnRng};
    use crate::battle::tests::common::{goblin, hero, orc, FIREBALL};
    use crate::player::PlayerAction;
    use pretty_assertions::assert_eq;

    fn runner(pacing: Pacing, seed: u64) -> BattleRunner {
        BattleRunner::new(
            "pacing_battle".to_string(),
            hero(),
            vec![goblin(), orc()],
            TurnRng::from_seed(seed),
            pacing,
        )
    }

    #[test]
    fn test_runner_logs_battle_start() {
        let runner = runner(Pacing::Immediate, 1);
        assert_eq!(runner.log(), &["Battle started!"]);
        assert!(!runner.is_battle_ended());
    }

    #[test]
    fn test_immediate_pacing_runs_whole_round() {
        let mut runner = runner(Pacing::Immediate, 7);

        let result = runner.submit_action(PlayerAction::Attack);

        assert_eq!(result.new_game_state, GameState::PlayerTurn);
        assert!(!result.battle_ended);
        assert_eq!(runner.battle_state().turn_number, 2);
        assert_eq!(runner.log().len(), 4);
    }

    #[test]
    fn test_deferred_pacing_waits_for_resume() {
        let mut runner = runner(Pacing::Deferred, 7);

        let result = runner.submit_action(PlayerAction::Attack);
        assert_eq!(result.new_game_state, GameState::ResolvingEnemyTurn);
        assert_eq!(runner.log().len(), 2);
        assert_eq!(runner.battle_state().player().hp(), 200);

        // No selection changes while the enemies are pending.
        assert!(runner.select_target(1).is_err());

        let resumed = runner.resume_enemy_phase().expect("enemy phase pending");
        assert_eq!(resumed.new_game_state, GameState::PlayerTurn);
        assert_eq!(runner.log().len(), 4);
        assert_eq!(runner.battle_state().player().hp(), 198);
    }

    #[test]
    fn test_resume_without_pending_phase_is_an_error() {
        let mut runner = runner(Pacing::Deferred, 7);

        assert_eq!(
            runner.resume_enemy_phase().map(|result| result.new_game_state),
            Err(BattleRunnerError::NoEnemyPhasePending(GameState::PlayerTurn))
        );
    }

    #[test]
    fn test_pacing_does_not_change_outcome() {
        let mut immediate = runner(Pacing::Immediate, 99);
        let mut deferred = runner(Pacing::Deferred, 99);

        for round in 0..6 {
            let action = if round % 2 == 0 {
                PlayerAction::Attack
            } else {
                PlayerAction::Skill
            };
            for runner in [&mut immediate, &mut deferred] {
                runner.select_target(1).expect("player turn");
                runner.select_skill(Some(FIREBALL)).expect("player turn");
            }

            immediate.submit_action(action);
            deferred.submit_action(action);
            deferred.resume_enemy_phase().expect("enemy phase pending");
        }

        assert_eq!(immediate.log(), deferred.log());
        assert_eq!(immediate.get_battle_info(), deferred.get_battle_info());
    }

    #[test]
    fn test_same_seed_replays_same_battle() {
        let mut first = runner(Pacing::Immediate, 2024);
        let mut second = runner(Pacing::Immediate, 2024);

        for _ in 0..5 {
            first.submit_action(PlayerAction::Attack);
            second.submit_action(PlayerAction::Attack);
        }

        assert_eq!(first.log(), second.log());
    }

    #[test]
    fn test_battle_info_snapshot() {
        let mut runner = runner(Pacing::Immediate, 3);
        runner.select_target(1).expect("player turn");

        let info = runner.get_battle_info();

        assert_eq!(info.battle_id, "pacing_battle");
        assert_eq!(info.turn_number, 1);
        assert_eq!(info.game_state, GameState::PlayerTurn);
        assert_eq!(info.selection.target, 1);
        assert_eq!(info.player.name, "Hero A");
        assert_eq!((info.player.hp, info.player.max_hp), (200, 200));
        assert_eq!((info.player.mp, info.player.max_mp), (50, 50));
        assert_eq!(info.player.attack, 25);
        assert_eq!(info.player.defense, 15);
        assert_eq!((info.player.shield, info.player.max_shield), (0, 0));
        assert_eq!(
            info.enemies
                .iter()
                .map(|enemy| enemy.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Goblin", "Orc"]
        );
        assert!(info.enemies.iter().all(|enemy| !enemy.is_defeated));
    }

    #[test]
    fn test_battle_info_serializes_to_json() {
        let runner = runner(Pacing::Immediate, 3);
        let info = runner.get_battle_info();

        let json = serde_json::to_string(&info).expect("snapshot serializes");
        let back: crate::battle::runner::BattleInfo =
            serde_json::from_str(&json).expect("snapshot deserializes");

        assert_eq!(back, info);
    }
}
