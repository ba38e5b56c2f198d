use crate::battle::stats::floor_to_u32;

/// Minimum pre-mitigation damage of any attack or damage skill.
pub const MIN_BASE_DAMAGE: u32 = 1;

/// Base damage before crit and shield: `floor(power × multiplier − defense)`,
/// never below [`MIN_BASE_DAMAGE`].
///
/// Normal attacks pass the attacker's derived attack as `power`; damage skills
/// pass the skill's own power.
pub fn base_damage(power: f64, multiplier: f64, defense: u32) -> u32 {
    let raw = (power * multiplier - defense as f64).floor();
    if raw < MIN_BASE_DAMAGE as f64 {
        MIN_BASE_DAMAGE
    } else {
        floor_to_u32(raw)
    }
}

/// Scales a base amount by the crit multiplier when the hit is critical.
/// The result is floored and never negative.
pub fn critical_damage(base_amount: u32, crit_damage: f64, is_critical: bool) -> u32 {
    if is_critical {
        floor_to_u32(base_amount as f64 * crit_damage)
    } else {
        base_amount
    }
}
