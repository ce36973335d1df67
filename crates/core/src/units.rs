//! Bar weight, spacing and unit primitives shared by the element calculators.
//!
//! Lengths are millimeters unless a name says otherwise.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Divisor of the `d²/162` rule: a bar of diameter `d` mm weighs `d²/162` kg/m.
pub const BAR_WEIGHT_DIVISOR: f64 = 162.0;

/// Millimeters per meter.
pub const MM_PER_M: f64 = 1_000.0;

/// Cubic millimeters per cubic meter.
pub const MM3_PER_M3: f64 = 1_000_000_000.0;

/// Concrete density (kg/m³), denominator of the beam steel percentage.
pub const CONCRETE_DENSITY: f64 = 2_400.0;

/// Steel density (kg/m³), denominator of the column, footing and slab
/// steel percentage.
pub const STEEL_DENSITY: f64 = 7_850.0;

pub const UNIT_MM: &str = "mm";
pub const UNIT_M: &str = "m";
pub const UNIT_M2: &str = "m²";
pub const UNIT_M3: &str = "m³";
pub const UNIT_KG: &str = "kg";

// ---------------------------------------------------------------------------
// Reinforcement primitives
// ---------------------------------------------------------------------------

/// Weight of one meter of bar (kg/m) for a diameter in millimeters.
pub fn bar_unit_weight(diameter_mm: f64) -> f64 {
    diameter_mm * diameter_mm / BAR_WEIGHT_DIVISOR
}

/// Weight (kg) of `length_m` meters of bar.
pub fn bar_weight(diameter_mm: f64, length_m: f64) -> f64 {
    bar_unit_weight(diameter_mm) * length_m
}

/// Number of bars or links laid at `spacing` along `span`, counting both ends.
///
/// `floor(span / spacing) + 1`. A spacing longer than the span still yields
/// a single bar; no upper or lower bound is applied.
pub fn spacing_count(span: f64, spacing: f64) -> u32 {
    ((span / spacing).floor() as u32).saturating_add(1)
}

/// Centerline perimeter of a closed rectangular link inside `cover` on all
/// faces: `2(width - 2c) + 2(depth - 2c)`.
pub fn link_perimeter(width: f64, depth: f64, cover: f64) -> f64 {
    2.0 * (width - 2.0 * cover) + 2.0 * (depth - 2.0 * cover)
}

/// Steel as a percentage of the concrete mass at the given density.
pub fn steel_percentage(steel_kg: f64, concrete_m3: f64, density: f64) -> f64 {
    steel_kg / (concrete_m3 * density) * 100.0
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn mm_to_m(mm: f64) -> f64 {
    mm / MM_PER_M
}

pub fn mm3_to_m3(mm3: f64) -> f64 {
    mm3 / MM3_PER_M3
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_weight_follows_d_squared_over_162() {
        assert!((bar_unit_weight(16.0) - 1.580_246_9).abs() < 1e-6);
        assert!((bar_unit_weight(8.0) - 0.395_061_7).abs() < 1e-6);
        assert_eq!(bar_unit_weight(18.0), 2.0);
    }

    #[test]
    fn bar_weight_scales_with_length() {
        assert_eq!(bar_weight(18.0, 12.0), 24.0);
    }

    #[test]
    fn spacing_count_includes_both_ends() {
        assert_eq!(spacing_count(5000.0, 150.0), 34);
        assert_eq!(spacing_count(3000.0, 150.0), 21);
    }

    #[test]
    fn spacing_beyond_span_yields_one() {
        assert_eq!(spacing_count(100.0, 150.0), 1);
        assert_eq!(spacing_count(150.0, 150.0), 2);
    }

    #[test]
    fn link_perimeter_subtracts_cover_on_every_face() {
        assert_eq!(link_perimeter(300.0, 450.0, 25.0), 1300.0);
        // Column ties: 2(l + w - 4c).
        assert_eq!(link_perimeter(400.0, 400.0, 40.0), 1280.0);
    }

    #[test]
    fn steel_percentage_uses_given_density() {
        assert!((steel_percentage(24.0, 1.0, 2400.0) - 1.0).abs() < 1e-12);
        assert!((steel_percentage(78.5, 1.0, STEEL_DENSITY) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(0.283_168, 2), 0.28);
        assert_eq!(round_to(3.009_297, 2), 3.01);
        assert_eq!(round_to(625.0, 2), 625.0);
    }

    #[test]
    fn conversions() {
        assert_eq!(mm_to_m(4950.0), 4.95);
        assert_eq!(mm3_to_m3(675_000_000.0), 0.675);
    }
}
