use serde::{Deserialize, Serialize};

/// Base rate in currency units per hectare, by crop type. Lookups are
/// trimmed and case-insensitive; unknown crops fall back to [`OTHER_RATE`].
const CROP_RATES: &[(&str, f64)] = &[
    ("rice", 15_000.0),
    ("corn", 12_000.0),
    ("mango", 20_000.0),
    ("coconut", 18_000.0),
    ("banana", 14_000.0),
    ("sugarcane", 16_000.0),
    ("vegetables", 8_000.0),
];

const OTHER_RATE: f64 = 10_000.0;

/// Damage multiplier tiers, evaluated top-down, first match wins. A degree
/// below every threshold still earns the 0.1 floor multiplier.
const DAMAGE_TIERS: &[(f64, f64)] = &[
    (80.0, 1.0),
    (60.0, 0.8),
    (40.0, 0.6),
    (20.0, 0.4),
    (10.0, 0.2),
];

const FLOOR_MULTIPLIER: f64 = 0.1;

const MIN_COMPENSATION: f64 = 1_000.0;
const MAX_COMPENSATION: f64 = 20_000.0;

/// Full audit trail of a compensation computation, exposed so callers can
/// render every intermediate alongside the final award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    pub crop_rate: f64,
    pub damage_multiplier: f64,
    pub base_compensation: f64,
    pub final_compensation: f64,
}

/// Compute the bounded monetary award for a damage claim.
///
/// Never fails: non-finite numeric inputs are treated as zero, unknown crops
/// use the fallback rate, and the result is clamped to the program bounds
/// before rounding to a whole currency unit. `degree_of_damage` is taken as
/// given; out-of-range values simply flow through the tier table.
pub fn compute_compensation(
    area_damaged: f64,
    degree_of_damage: f64,
    crop_type: &str,
) -> CompensationBreakdown {
    let area = sanitize(area_damaged);
    let degree = sanitize(degree_of_damage);

    let crop_rate = rate_for(crop_type);
    let damage_multiplier = multiplier_for(degree);
    let base_compensation = area * crop_rate * damage_multiplier;
    let final_compensation = base_compensation
        .clamp(MIN_COMPENSATION, MAX_COMPENSATION)
        .round();

    CompensationBreakdown {
        crop_rate,
        damage_multiplier,
        base_compensation,
        final_compensation,
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn rate_for(crop_type: &str) -> f64 {
    let needle = crop_type.trim().to_lowercase();
    CROP_RATES
        .iter()
        .find(|(crop, _)| *crop == needle)
        .map(|(_, rate)| *rate)
        .unwrap_or(OTHER_RATE)
}

fn multiplier_for(degree: f64) -> f64 {
    DAMAGE_TIERS
        .iter()
        .find(|(threshold, _)| degree >= *threshold)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(FLOOR_MULTIPLIER)
}
