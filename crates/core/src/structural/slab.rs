//! One-way slab: main bars across the width, distribution bars across the
//! length, plus edge shuttering.
//!
//! Slab dimensions are meters while bar diameters and spacings stay in
//! millimeters, so bar lengths come out directly in meters.

use serde::{Deserialize, Serialize};

use super::bars::SpacedBars;
use super::ConcreteQuantity;
use crate::error::CoreError;
use crate::units::{
    bar_weight, spacing_count, steel_percentage, MM_PER_M, STEEL_DENSITY, UNIT_KG, UNIT_M2,
};
use crate::validation::{require_positive, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabInput {
    pub dimensions: SlabDimensions,
    pub reinforcement: SlabReinforcement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabDimensions {
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabReinforcement {
    pub main_bars: SpacedBars,
    pub distribution_bars: SpacedBars,
}

impl Validate for SlabInput {
    fn validate(&self) -> Result<(), CoreError> {
        let dims = &self.dimensions;
        require_positive("dimensions.length", dims.length)?;
        require_positive("dimensions.width", dims.width)?;
        require_positive("dimensions.thickness", dims.thickness)?;
        self.reinforcement.main_bars.check("reinforcement.mainBars")?;
        self.reinforcement
            .distribution_bars
            .check("reinforcement.distributionBars")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabResult {
    pub concrete: ConcreteQuantity,
    pub steel: SlabSteel,
    pub shuttering: Shuttering,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabSteel {
    pub main_bars: BarRun,
    pub distribution_bars: BarRun,
    pub total_weight: f64,
    pub percentage: f64,
    pub unit: String,
}

/// One group of parallel bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarRun {
    pub count: u32,
    pub diameter: f64,
    pub spacing: f64,
    /// Combined length of the group (m).
    pub total_length: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shuttering {
    pub area: f64,
    pub unit: String,
}

/// Bars spaced across `span_m`, each running `run_m`.
fn bar_run(bars: &SpacedBars, span_m: f64, run_m: f64) -> BarRun {
    let count = spacing_count(span_m * MM_PER_M, bars.spacing);
    let total_length = f64::from(count) * run_m;
    BarRun {
        count,
        diameter: bars.diameter,
        spacing: bars.spacing,
        total_length,
        weight: bar_weight(bars.diameter, total_length),
    }
}

/// Compute the slab quantity report. Expects a validated input.
pub fn calculate_slab(input: &SlabInput) -> SlabResult {
    let dims = &input.dimensions;
    let reinforcement = &input.reinforcement;

    let concrete_volume = dims.length * dims.width * dims.thickness;

    let main_bars = bar_run(&reinforcement.main_bars, dims.width, dims.length);
    let distribution_bars = bar_run(&reinforcement.distribution_bars, dims.length, dims.width);
    let total_weight = main_bars.weight + distribution_bars.weight;

    let perimeter = 2.0 * (dims.length + dims.width);

    SlabResult {
        concrete: ConcreteQuantity::cubic_meters(concrete_volume),
        steel: SlabSteel {
            main_bars,
            distribution_bars,
            total_weight,
            percentage: steel_percentage(total_weight, concrete_volume, STEEL_DENSITY),
            unit: UNIT_KG.to_string(),
        },
        shuttering: Shuttering {
            area: perimeter * dims.thickness,
            unit: UNIT_M2.to_string(),
        },
    }
}
