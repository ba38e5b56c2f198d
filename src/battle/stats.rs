use crate::character::Buff;
use schema::BuffKind;

/// Stats a character is created with. Never modified during a battle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub crit_rate: f64,
    pub crit_damage: f64,
}

/// Stats after every active buff has been folded in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub attack: u32,
    pub defense: u32,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub max_shield: u32,
}

/// Summed buff contributions, one bucket per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct BuffTotals {
    attack_percent: f64,
    defense_percent: f64,
    crit_rate_percent: f64,
    crit_damage_percent: f64,
    shield: f64,
}

impl BuffTotals {
    fn from_buffs(buffs: &[Buff]) -> Self {
        buffs.iter().fold(BuffTotals::default(), |mut totals, buff| {
            match buff.kind {
                BuffKind::AttackPercent => totals.attack_percent += buff.magnitude,
                BuffKind::DefensePercent => totals.defense_percent += buff.magnitude,
                BuffKind::CritRatePercent => totals.crit_rate_percent += buff.magnitude,
                BuffKind::CritDamagePercent => totals.crit_damage_percent += buff.magnitude,
                BuffKind::Shield => totals.shield += buff.magnitude,
            }
            totals
        })
    }
}

/// Derive the effective stats from base values and the active buff list.
///
/// Buffs of the same kind stack additively: +10% and +20% attack give +30%,
/// not 1.1 × 1.2. Shield buffs contribute their magnitude to the shield cap.
pub fn derive_stats(base: &BaseStats, buffs: &[Buff]) -> DerivedStats {
    let totals = BuffTotals::from_buffs(buffs);

    DerivedStats {
        attack: scale_stat(base.attack, totals.attack_percent),
        defense: scale_stat(base.defense, totals.defense_percent),
        crit_rate: (base.crit_rate + totals.crit_rate_percent / 100.0).clamp(0.0, 1.0),
        crit_damage: (base.crit_damage * (1.0 + totals.crit_damage_percent / 100.0)).max(0.0),
        max_shield: floor_to_u32(totals.shield),
    }
}

fn scale_stat(base: u32, percent: f64) -> u32 {
    floor_to_u32(base as f64 * (1.0 + percent / 100.0))
}

/// Floors a value into `u32`, treating negatives as zero.
pub(crate) fn floor_to_u32(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value.floor().min(u32::MAX as f64) as u32
    }
}
