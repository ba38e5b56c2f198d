use crate::config::BattleSetup;
use schema::{BuffKind, CharacterTemplate, Skill};

/// A predefined player-versus-enemies matchup
#[derive(Debug, Clone)]
pub struct PrefabRoster {
    pub id: String,
    pub name: String,
    pub description: String,
    pub setup: BattleSetup,
}

/// The default hero and skill loadout.
pub fn default_hero() -> CharacterTemplate {
    CharacterTemplate::new("Hero A", 200, 50, 25, 15, 0.8)
        .with_crit(0.2, 1.5)
        .with_skills(vec![
            Skill::damage("Fireball", 10, 40.0, 1.2),
            Skill::heal("Shadow Strike", 12, 30),
            Skill::buff("Flame Burst", 10, BuffKind::DefensePercent, 10.0, 2),
            Skill::buff("Critical Boost", 15, BuffKind::CritRatePercent, 20.0, 2),
            Skill::buff("Protective Barrier", 12, BuffKind::Shield, 30.0, 2),
        ])
}

pub fn goblin() -> CharacterTemplate {
    CharacterTemplate::new("Goblin", 100, 0, 10, 5, 1.0)
}

pub fn orc() -> CharacterTemplate {
    CharacterTemplate::new("Orc", 120, 0, 15, 24, 1.0)
}

/// Get all available prefab rosters
pub fn get_prefab_rosters() -> Vec<PrefabRoster> {
    vec![
        PrefabRoster {
            id: "zone1".to_string(),
            name: "Zone 1 Ambush".to_string(),
            description: "Hero A against a Goblin and a heavily armoured Orc".to_string(),
            setup: BattleSetup::new(default_hero(), vec![goblin(), orc()]),
        },
        PrefabRoster {
            id: "lone_goblin".to_string(),
            name: "Lone Goblin".to_string(),
            description: "A short warm-up fight against a single Goblin".to_string(),
            setup: BattleSetup::new(default_hero(), vec![goblin()]),
        },
        PrefabRoster {
            id: "goblin_pack".to_string(),
            name: "Goblin Pack".to_string(),
            description: "Three Goblins at once; shields and heals matter here".to_string(),
            setup: BattleSetup::new(
                default_hero(),
                vec![
                    goblin(),
                    CharacterTemplate {
                        name: "Goblin Scout".to_string(),
                        ..goblin()
                    },
                    CharacterTemplate {
                        name: "Goblin Brute".to_string(),
                        attack: 14,
                        ..goblin()
                    },
                ],
            ),
        },
    ]
}

/// Look up a prefab roster by id
pub fn get_prefab_roster(id: &str) -> Option<PrefabRoster> {
    get_prefab_rosters().into_iter().find(|roster| roster.id == id)
}
