//! Isolated pad footing, rectangular or trapezoidal, with a two-way mesh.
//!
//! Dimensions in millimeters. A trapezoidal footing is treated as a frustum
//! between the base (`length` x `width`) and the top (`topLength` x `topWidth`).

use serde::{Deserialize, Serialize};

use super::bars::SpacedBars;
use super::ConcreteQuantity;
use crate::error::{CoreError, CoreResult};
use crate::units::{
    bar_weight, mm3_to_m3, mm_to_m, spacing_count, steel_percentage, STEEL_DENSITY, UNIT_KG,
};
use crate::validation::{require_positive, require_present, Validate};

const TRAPEZOIDAL_CONTEXT: &str = "trapezoidal footings";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootingShape {
    #[default]
    Rectangular,
    Trapezoidal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootingInput {
    #[serde(default)]
    pub shape: FootingShape,
    pub dimensions: FootingDimensions,
    pub reinforcement: FootingReinforcement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootingDimensions {
    pub length: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootingReinforcement {
    pub main_bars: SpacedBars,
}

impl FootingInput {
    /// Top face area (mm²) of a trapezoidal footing.
    fn top_area(&self) -> CoreResult<f64> {
        let dims = &self.dimensions;
        let top_length = require_present("dimensions.topLength", dims.top_length, TRAPEZOIDAL_CONTEXT)?;
        let top_width = require_present("dimensions.topWidth", dims.top_width, TRAPEZOIDAL_CONTEXT)?;
        Ok(top_length * top_width)
    }
}

impl Validate for FootingInput {
    fn validate(&self) -> Result<(), CoreError> {
        let dims = &self.dimensions;
        require_positive("dimensions.length", dims.length)?;
        require_positive("dimensions.width", dims.width)?;
        require_positive("dimensions.depth", dims.depth)?;
        if let Some(top_length) = dims.top_length {
            require_positive("dimensions.topLength", top_length)?;
        }
        if let Some(top_width) = dims.top_width {
            require_positive("dimensions.topWidth", top_width)?;
        }
        if self.shape == FootingShape::Trapezoidal {
            self.top_area()?;
        }
        self.reinforcement.main_bars.check("reinforcement.mainBars")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootingResult {
    pub shape: FootingShape,
    pub concrete: ConcreteQuantity,
    pub steel: FootingSteel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootingSteel {
    pub main_bars: MeshQuantity,
    pub total_weight: f64,
    pub percentage: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshQuantity {
    /// Bars running along the length, spaced across the width.
    pub length_direction: u32,
    /// Bars running along the width, spaced across the length.
    pub width_direction: u32,
    /// Combined bar length (mm).
    pub total_length: f64,
    pub weight: f64,
}

/// Compute the footing quantity report.
///
/// Fails only when a trapezoidal footing lacks its top dimensions, which
/// validation already rejects.
pub fn calculate_footing(input: &FootingInput) -> CoreResult<FootingResult> {
    let dims = &input.dimensions;
    let bars = &input.reinforcement.main_bars;

    let base_area = dims.length * dims.width;
    let volume_mm3 = match input.shape {
        FootingShape::Rectangular => base_area * dims.depth,
        FootingShape::Trapezoidal => {
            let top_area = input.top_area()?;
            dims.depth * (base_area + top_area + (base_area * top_area).sqrt()) / 3.0
        }
    };
    let concrete_volume = mm3_to_m3(volume_mm3);

    let length_direction = spacing_count(dims.width, bars.spacing);
    let width_direction = spacing_count(dims.length, bars.spacing);
    let total_length =
        f64::from(length_direction) * dims.length + f64::from(width_direction) * dims.width;
    let weight = bar_weight(bars.diameter, mm_to_m(total_length));

    Ok(FootingResult {
        shape: input.shape,
        concrete: ConcreteQuantity::cubic_meters(concrete_volume),
        steel: FootingSteel {
            main_bars: MeshQuantity {
                length_direction,
                width_direction,
                total_length,
                weight,
            },
            total_weight: weight,
            percentage: steel_percentage(weight, concrete_volume, STEEL_DENSITY),
            unit: UNIT_KG.to_string(),
        },
    })
}
