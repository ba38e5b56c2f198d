use crate::battle::state::BattleState;

/// What an enemy does on its turn. Enemies only ever attack the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    AttackPlayer { enemy_index: usize },
}

/// Collects the actions of every enemy still standing, in roster order.
pub fn collect_enemy_actions(battle_state: &BattleState) -> Vec<EnemyAction> {
    battle_state
        .enemies()
        .iter()
        .enumerate()
        .filter(|(_, enemy)| !enemy.is_defeated())
        .map(|(enemy_index, _)| EnemyAction::AttackPlayer { enemy_index })
        .collect()
}
