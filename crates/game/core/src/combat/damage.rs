//! Damage calculation.

// ============================================================================
// Damage Calculation
// ============================================================================

/// Outgoing damage before mitigation.
///
/// # Formula
///
/// ```text
/// raw = base_damage * attack_coefficient * timing_multiplier * item_multiplier
/// ```
///
/// Negative or non-finite products collapse to 0.
pub fn raw_damage(
    base_damage: f32,
    attack_coefficient: f32,
    timing_multiplier: f32,
    item_multiplier: f32,
) -> f32 {
    let raw = base_damage * attack_coefficient * timing_multiplier * item_multiplier;
    if raw.is_finite() { raw.max(0.0) } else { 0.0 }
}

/// Defense coefficient safe to divide by. Values below `epsilon` read as 1.0.
pub fn guarded_divisor(defense_coefficient: f32, epsilon: f32) -> f32 {
    if defense_coefficient.is_finite() && defense_coefficient >= epsilon {
        defense_coefficient
    } else {
        1.0
    }
}

/// Damage the defender actually takes from `raw`.
pub fn mitigate(raw: f32, defense_coefficient: f32, epsilon: f32) -> f32 {
    let mitigated = raw / guarded_divisor(defense_coefficient, epsilon);
    if mitigated.is_finite() { mitigated.max(0.0) } else { 0.0 }
}
