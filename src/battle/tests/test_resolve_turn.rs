#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, GameState};
    use crate::battle::tests::common::{
        create_test_battle, goblin, hero, no_crit_rng, orc, FIREBALL, FLAME_BURST,
        PROTECTIVE_BARRIER,
    };
    use crate::battle::turn_orchestrator::submit_player_action;
    use crate::player::PlayerAction;
    use pretty_assertions::assert_eq;
    use schema::BuffKind;

    #[test]
    fn test_full_round_attack() {
        // Arrange
        let mut battle_state = create_test_battle(hero(), vec![goblin(), orc()]);
        battle_state.start();
        let mut rng = no_crit_rng();

        // Act
        let event_bus = submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);

        // Assert
        event_bus.print_debug_with_message("Events for test_full_round_attack:");

        // floor(25 * 0.8) - 5 = 15 against the Goblin; both enemies are held to
        // the 1 damage minimum by the hero's 15 defense.
        assert_eq!(
            battle_state.log(),
            &[
                "Battle started!",
                "Hero A attacks Goblin for 15 damage!",
                "Goblin attacks Hero A for 1 damage!",
                "Orc attacks Hero A for 1 damage!",
            ]
        );
        assert_eq!(battle_state.enemies()[0].hp(), 85);
        assert_eq!(battle_state.enemies()[1].hp(), 120);
        assert_eq!(battle_state.player().hp(), 198);
        assert_eq!(battle_state.game_state(), GameState::PlayerTurn);
        assert_eq!(battle_state.turn_number, 2);

        assert!(matches!(
            event_bus.events().last(),
            Some(BattleEvent::TurnEnded { turn_number: 1 })
        ));
    }

    #[test]
    fn test_event_order_player_then_enemies_in_roster_order() {
        let mut battle_state = create_test_battle(hero(), vec![orc(), goblin()]);
        let mut rng = no_crit_rng();

        let event_bus = submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);

        let attackers: Vec<&str> = event_bus
            .events()
            .iter()
            .filter_map(|event| match event {
                BattleEvent::Attacked { attacker, .. } => Some(attacker.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(attackers, vec!["Hero A", "Orc", "Goblin"]);
    }

    #[test]
    fn test_attack_regenerates_mana() {
        let mut battle_state = create_test_battle(hero(), vec![goblin()]);
        battle_state.player_mut().set_mp(30);
        let mut rng = no_crit_rng();

        let event_bus = submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);

        assert_eq!(battle_state.player().mp(), 35);
        assert!(event_bus.events().iter().any(|event| matches!(
            event,
            BattleEvent::ManaRestored { amount: 5, .. }
        )));
    }

    #[test]
    fn test_mana_regen_is_capped() {
        let mut battle_state = create_test_battle(hero(), vec![goblin()]);
        battle_state.player_mut().set_mp(48);
        let mut rng = no_crit_rng();

        submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);

        assert_eq!(battle_state.player().mp(), 50);
    }

    #[test]
    fn test_damage_skill_round() {
        let mut battle_state = create_test_battle(hero(), vec![goblin(), orc()]);
        battle_state.select_target(1).expect("player turn");
        battle_state.select_skill(Some(FIREBALL)).expect("player turn");
        let mut rng = no_crit_rng();

        submit_player_action(&mut battle_state, PlayerAction::Skill, &mut rng);

        // floor(40 * 1.2) - 24 = 24
        assert_eq!(battle_state.log()[0], "Hero A uses Fireball on Orc for 24 damage!");
        assert_eq!(battle_state.enemies()[1].hp(), 96);
        assert_eq!(battle_state.player().mp(), 40);
    }

    #[test]
    fn test_shield_round_absorbs_enemy_hits() {
        let mut battle_state = create_test_battle(hero(), vec![goblin(), orc()]);
        battle_state
            .select_skill(Some(PROTECTIVE_BARRIER))
            .expect("player turn");
        let mut rng = no_crit_rng();

        submit_player_action(&mut battle_state, PlayerAction::Skill, &mut rng);

        assert_eq!(
            battle_state.log(),
            &[
                "Hero A uses Protective Barrier and gains Shield of 30!",
                "Goblin attacks Hero A for 1 damage! (1 absorbed by shield!)",
                "Orc attacks Hero A for 1 damage! (1 absorbed by shield!)",
            ]
        );
        assert_eq!(battle_state.player().hp(), 200);
        assert_eq!(battle_state.player().shield(), 28);
        assert_eq!(battle_state.player().max_shield(), 30);
    }

    #[test]
    fn test_shield_carries_over_and_expires_with_its_buff() {
        let mut battle_state = create_test_battle(hero(), vec![goblin()]);
        battle_state
            .select_skill(Some(PROTECTIVE_BARRIER))
            .expect("player turn");
        let mut rng = no_crit_rng();

        // Turn 1: shield granted, Goblin chips 1 off it.
        submit_player_action(&mut battle_state, PlayerAction::Skill, &mut rng);
        assert_eq!(battle_state.player().shield(), 29);

        // Turn 2: not reset, still absorbing; buff expires at the end.
        let event_bus = submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);
        assert_eq!(
            battle_state.log().last().map(String::as_str),
            Some("Goblin attacks Hero A for 1 damage! (1 absorbed by shield!)")
        );
        assert!(event_bus.events().iter().any(|event| matches!(
            event,
            BattleEvent::BuffExpired {
                kind: BuffKind::Shield,
                ..
            }
        )));
        assert_eq!(battle_state.player().shield(), 0);
        assert_eq!(battle_state.player().max_shield(), 0);
        assert_eq!(battle_state.player().hp(), 200);
    }

    #[test]
    fn test_defense_buff_lasts_two_rounds() {
        let mut battle_state = create_test_battle(hero(), vec![goblin()]);
        battle_state.select_skill(Some(FLAME_BURST)).expect("player turn");
        let mut rng = no_crit_rng();

        submit_player_action(&mut battle_state, PlayerAction::Skill, &mut rng);
        assert_eq!(
            battle_state.log()[0],
            "Hero A uses Flame Burst and gains DEF of 10!"
        );
        assert_eq!(battle_state.player().defense(), 16);

        submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);
        assert_eq!(battle_state.player().defense(), 15);
        assert!(battle_state.player().buffs().is_empty());
    }

    #[test]
    fn test_enemy_buffs_tick_down_too() {
        let mut battle_state = create_test_battle(hero(), vec![goblin()]);
        battle_state.enemies_mut()[0].add_buff(BuffKind::AttackPercent, 50.0, 1);
        assert_eq!(battle_state.enemies()[0].attack(), 15);
        let mut rng = no_crit_rng();

        let event_bus = submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);

        assert_eq!(battle_state.enemies()[0].attack(), 10);
        assert!(event_bus.events().iter().any(|event| matches!(
            event,
            BattleEvent::BuffExpired { target, kind: BuffKind::AttackPercent } if target == "Goblin"
        )));
    }

    #[test]
    fn test_selection_persists_across_turns() {
        let mut battle_state = create_test_battle(hero(), vec![goblin(), orc()]);
        battle_state.select_target(1).expect("player turn");
        let mut rng = no_crit_rng();

        submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);
        submit_player_action(&mut battle_state, PlayerAction::Attack, &mut rng);

        assert_eq!(battle_state.selection().target, 1);
        // floor(25 * 0.8) - 24 is below 1, so each attack lands the minimum.
        assert_eq!(battle_state.enemies()[1].hp(), 118);
        assert_eq!(battle_state.enemies()[0].hp(), 100);
    }
}
