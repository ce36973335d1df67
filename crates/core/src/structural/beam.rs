//! Rectangular beam: concrete volume, main bars and stirrups.
//!
//! All dimensions are millimeters. The steel percentage is taken against the
//! concrete mass at 2400 kg/m³.

use serde::{Deserialize, Serialize};

use super::bars::{CountedBars, Links};
use super::ConcreteQuantity;
use crate::error::CoreError;
use crate::units::{
    bar_unit_weight, bar_weight, link_perimeter, mm3_to_m3, mm_to_m, spacing_count,
    steel_percentage, CONCRETE_DENSITY, UNIT_KG,
};
use crate::validation::{require_positive, Validate};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamInput {
    pub dimensions: BeamDimensions,
    pub reinforcement: BeamReinforcement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamDimensions {
    pub length: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamReinforcement {
    pub main_bars: CountedBars,
    pub stirrups: Links,
}

impl Validate for BeamInput {
    fn validate(&self) -> Result<(), CoreError> {
        let dims = &self.dimensions;
        require_positive("dimensions.length", dims.length)?;
        require_positive("dimensions.width", dims.width)?;
        require_positive("dimensions.depth", dims.depth)?;
        self.reinforcement.main_bars.check("reinforcement.mainBars")?;

        let stirrups = &self.reinforcement.stirrups;
        stirrups.check("reinforcement.stirrups")?;

        // Cover on both faces must leave a core for the bars and links.
        let smallest = dims.width.min(dims.depth).min(dims.length);
        if 2.0 * stirrups.cover >= smallest {
            return Err(CoreError::InvalidField {
                field: "reinforcement.stirrups.cover".to_string(),
                reason: format!(
                    "cover {} leaves no room for reinforcement in a {} x {} x {} beam",
                    stirrups.cover, dims.length, dims.width, dims.depth
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamResult {
    pub concrete: ConcreteQuantity,
    pub steel: BeamSteel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamSteel {
    pub main_bars: BeamMainBars,
    pub stirrups: StirrupQuantity,
    pub total_weight: f64,
    pub percentage: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamMainBars {
    pub count: u32,
    pub diameter: f64,
    /// Effective length of one bar (mm).
    pub total_length: f64,
    pub weight: f64,
    /// kg per meter.
    pub unit_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StirrupQuantity {
    pub count: u32,
    pub diameter: f64,
    pub spacing: f64,
    pub perimeter: f64,
    /// Combined length of all stirrups (mm).
    pub total_length: f64,
    pub weight: f64,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Compute the beam quantity report. Expects a validated input.
pub fn calculate_beam(input: &BeamInput) -> BeamResult {
    let dims = &input.dimensions;
    let main = &input.reinforcement.main_bars;
    let stirrups = &input.reinforcement.stirrups;

    let concrete_volume = mm3_to_m3(dims.length * dims.width * dims.depth);

    // Main bars run the full length less cover at each end.
    let main_unit_weight = bar_unit_weight(main.diameter);
    let main_bar_length = dims.length - 2.0 * stirrups.cover;
    let main_weight = main_unit_weight * mm_to_m(main_bar_length * f64::from(main.count));

    let stirrup_count = spacing_count(dims.length, stirrups.spacing);
    let stirrup_perimeter = link_perimeter(dims.width, dims.depth, stirrups.cover);
    let stirrup_total_length = f64::from(stirrup_count) * stirrup_perimeter;
    let stirrup_weight = bar_weight(stirrups.diameter, mm_to_m(stirrup_total_length));

    let total_weight = main_weight + stirrup_weight;

    BeamResult {
        concrete: ConcreteQuantity::cubic_meters(concrete_volume),
        steel: BeamSteel {
            main_bars: BeamMainBars {
                count: main.count,
                diameter: main.diameter,
                total_length: main_bar_length,
                weight: main_weight,
                unit_weight: main_unit_weight,
            },
            stirrups: StirrupQuantity {
                count: stirrup_count,
                diameter: stirrups.diameter,
                spacing: stirrups.spacing,
                perimeter: stirrup_perimeter,
                total_length: stirrup_total_length,
                weight: stirrup_weight,
            },
            total_weight,
            percentage: steel_percentage(total_weight, concrete_volume, CONCRETE_DENSITY),
            unit: UNIT_KG.to_string(),
        },
    }
}
