//! Excavation quantities: bank volume, bulked volume and cost.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{require_non_empty, require_non_negative, require_positive, Validate};

/// Currency applied when a cost block omits one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Bulking factor for soils that are neither loose nor medium.
pub const DEFAULT_BULKING_FACTOR: f64 = 1.15;

const VOLUME_UNIT: &str = "m³";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Length unit of the excavation dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    M,
    Cm,
    Mm,
}

impl LengthUnit {
    /// Divisor turning a cubed length in this unit into cubic meters.
    pub fn cubic_divisor(self) -> f64 {
        match self {
            Self::M => 1.0,
            Self::Cm => 1_000_000.0,
            Self::Mm => 1_000_000_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthworkInput {
    pub project_section: String,
    pub dimensions: ExcavationDimensions,
    pub soil: Soil,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcavationDimensions {
    pub length: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(default)]
    pub unit: LengthUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Soil {
    #[serde(rename = "type")]
    pub soil_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture_content: Option<f64>,
}

impl Soil {
    /// Swell factor applied to the bank volume.
    pub fn bulking_factor(&self) -> f64 {
        match self.soil_type.trim().to_ascii_lowercase().as_str() {
            "loose" => 1.25,
            "medium" => 1.2,
            _ => DEFAULT_BULKING_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostInput {
    pub rate_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Validate for EarthworkInput {
    fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("projectSection", &self.project_section)?;
        require_positive("dimensions.length", self.dimensions.length)?;
        require_positive("dimensions.width", self.dimensions.width)?;
        require_positive("dimensions.depth", self.dimensions.depth)?;
        require_non_empty("soil.type", &self.soil.soil_type)?;
        if let Some(density) = self.soil.density {
            require_positive("soil.density", density)?;
        }
        if let Some(moisture) = self.soil.moisture_content {
            require_non_negative("soil.moistureContent", moisture)?;
        }
        if let Some(cost) = &self.cost {
            require_positive("cost.ratePerUnit", cost.rate_per_unit)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthworkResult {
    pub calculations: VolumeSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSummary {
    pub volume: f64,
    pub volume_unit: String,
    pub bulking_factor: f64,
    pub final_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub rate_per_unit: f64,
    pub total_cost: f64,
    pub currency: String,
}

/// Compute excavation volume, bulked volume and cost. Expects a validated input.
pub fn calculate_earthwork(input: &EarthworkInput) -> EarthworkResult {
    let dims = &input.dimensions;
    let volume = dims.length * dims.width * dims.depth / dims.unit.cubic_divisor();
    let bulking_factor = input.soil.bulking_factor();
    let final_volume = volume * bulking_factor;

    let cost = input.cost.as_ref().map(|cost| CostSummary {
        rate_per_unit: cost.rate_per_unit,
        total_cost: cost.rate_per_unit * final_volume,
        currency: cost
            .currency
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    });

    EarthworkResult {
        calculations: VolumeSummary {
            volume,
            volume_unit: VOLUME_UNIT.to_string(),
            bulking_factor,
            final_volume,
        },
        cost,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn trench() -> EarthworkInput {
        serde_json::from_value(json!({
            "projectSection": "Basement",
            "dimensions": { "length": 10, "width": 5, "depth": 2 },
            "soil": { "type": "medium" },
            "cost": { "ratePerUnit": 250 }
        }))
        .unwrap()
    }

    #[test]
    fn medium_soil_in_meters() {
        let input = trench();
        assert!(input.validate().is_ok());

        let result = calculate_earthwork(&input);
        assert_eq!(result.calculations.volume, 100.0);
        assert_eq!(result.calculations.bulking_factor, 1.2);
        assert_eq!(result.calculations.final_volume, 120.0);

        let cost = result.cost.unwrap();
        assert_eq!(cost.total_cost, 30_000.0);
        assert_eq!(cost.currency, "INR");
    }

    #[test]
    fn bulking_factor_by_soil_type() {
        let soil = |t: &str| Soil {
            soil_type: t.to_string(),
            density: None,
            moisture_content: None,
        };
        assert_eq!(soil("loose").bulking_factor(), 1.25);
        assert_eq!(soil("Medium").bulking_factor(), 1.2);
        assert_eq!(soil("rock").bulking_factor(), DEFAULT_BULKING_FACTOR);
    }

    #[test]
    fn centimeters_convert_to_cubic_meters() {
        let mut input = trench();
        input.dimensions = ExcavationDimensions {
            length: 200.0,
            width: 100.0,
            depth: 50.0,
            unit: LengthUnit::Cm,
        };
        assert_eq!(calculate_earthwork(&input).calculations.volume, 1.0);
    }

    #[test]
    fn cost_block_is_optional() {
        let mut input = trench();
        input.cost = None;
        assert!(calculate_earthwork(&input).cost.is_none());
    }

    #[test]
    fn blank_section_is_rejected() {
        let mut input = trench();
        input.project_section = " ".into();
        assert_matches!(
            input.validate(),
            Err(CoreError::InvalidField { field, .. }) if field == "projectSection"
        );
    }

    #[test]
    fn unknown_length_unit_fails_to_parse() {
        let result = serde_json::from_value::<EarthworkInput>(json!({
            "projectSection": "Basement",
            "dimensions": { "length": 10, "width": 5, "depth": 2, "unit": "ft" },
            "soil": { "type": "medium" }
        }));
        assert!(result.is_err());
    }
}
