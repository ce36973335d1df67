//! Rectangular column with longitudinal bars and closed ties.
//!
//! Dimensions in millimeters. The steel percentage is taken against
//! 7850 kg/m³, unlike the beam.

use serde::{Deserialize, Serialize};

use super::bars::{CountedBars, Links};
use super::ConcreteQuantity;
use crate::error::CoreError;
use crate::units::{
    bar_unit_weight, bar_weight, link_perimeter, mm3_to_m3, mm_to_m, spacing_count,
    steel_percentage, STEEL_DENSITY, UNIT_KG,
};
use crate::validation::{require_positive, Validate};

/// Development-length allowance added to every main bar (mm).
pub const DEVELOPMENT_ALLOWANCE_MM: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInput {
    pub dimensions: ColumnDimensions,
    pub reinforcement: ColumnReinforcement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReinforcement {
    pub main_bars: CountedBars,
    pub ties: Links,
}

impl Validate for ColumnInput {
    fn validate(&self) -> Result<(), CoreError> {
        let dims = &self.dimensions;
        require_positive("dimensions.length", dims.length)?;
        require_positive("dimensions.width", dims.width)?;
        require_positive("dimensions.height", dims.height)?;
        self.reinforcement.main_bars.check("reinforcement.mainBars")?;

        let ties = &self.reinforcement.ties;
        ties.check("reinforcement.ties")?;

        if 4.0 * ties.cover >= dims.length + dims.width {
            return Err(CoreError::InvalidField {
                field: "reinforcement.ties.cover".to_string(),
                reason: format!(
                    "cover {} leaves no tie perimeter in a {} x {} section",
                    ties.cover, dims.length, dims.width
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnResult {
    pub concrete: ConcreteQuantity,
    pub steel: ColumnSteel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSteel {
    pub main_bars: ColumnMainBars,
    pub ties: TieQuantity,
    pub total_weight: f64,
    pub percentage: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMainBars {
    pub count: u32,
    pub diameter: f64,
    /// Length of one bar including the allowance (mm).
    pub length: f64,
    pub weight: f64,
    pub unit_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieQuantity {
    pub count: u32,
    pub perimeter: f64,
    pub total_length: f64,
    pub weight: f64,
}

/// Compute the column quantity report. Expects a validated input.
pub fn calculate_column(input: &ColumnInput) -> ColumnResult {
    let dims = &input.dimensions;
    let main = &input.reinforcement.main_bars;
    let ties = &input.reinforcement.ties;

    let concrete_volume = mm3_to_m3(dims.length * dims.width * dims.height);

    let main_unit_weight = bar_unit_weight(main.diameter);
    let main_bar_length = dims.height + DEVELOPMENT_ALLOWANCE_MM;
    let main_weight = main_unit_weight * mm_to_m(main_bar_length) * f64::from(main.count);

    let tie_count = spacing_count(dims.height, ties.spacing);
    let tie_perimeter = link_perimeter(dims.length, dims.width, ties.cover);
    let tie_total_length = f64::from(tie_count) * tie_perimeter;
    let tie_weight = bar_weight(ties.diameter, mm_to_m(tie_total_length));

    let total_weight = main_weight + tie_weight;

    ColumnResult {
        concrete: ConcreteQuantity::cubic_meters(concrete_volume),
        steel: ColumnSteel {
            main_bars: ColumnMainBars {
                count: main.count,
                diameter: main.diameter,
                length: main_bar_length,
                weight: main_weight,
                unit_weight: main_unit_weight,
            },
            ties: TieQuantity {
                count: tie_count,
                perimeter: tie_perimeter,
                total_length: tie_total_length,
                weight: tie_weight,
            },
            total_weight,
            percentage: steel_percentage(total_weight, concrete_volume, STEEL_DENSITY),
            unit: UNIT_KG.to_string(),
        },
    }
}
