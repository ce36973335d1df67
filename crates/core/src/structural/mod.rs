//! Structural element calculators.
//!
//! One module per element type. Each exposes a typed request shape that
//! implements [`Validate`] and a pure `calculate_*` function producing the
//! concrete and steel quantity report. [`StructuralInput`] is the tagged
//! union over the four request shapes, used by the combined endpoint and as
//! the stored form of every calculation input.

pub mod bars;
pub mod beam;
pub mod column;
pub mod footing;
pub mod slab;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::units::UNIT_M3;
use crate::validation::Validate;

pub use beam::{calculate_beam, BeamInput, BeamResult};
pub use column::{calculate_column, ColumnInput, ColumnResult};
pub use footing::{calculate_footing, FootingInput, FootingResult, FootingShape};
pub use slab::{calculate_slab, SlabInput, SlabResult};

/// Number of records returned by the calculation history endpoints.
pub const HISTORY_LIMIT: i64 = 10;

// ---------------------------------------------------------------------------
// Element kind
// ---------------------------------------------------------------------------

/// The structural element types the calculators cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Beam,
    Column,
    Footing,
    Slab,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [Self::Beam, Self::Column, Self::Footing, Self::Slab];

    /// Value stored in the `element_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beam => "beam",
            Self::Column => "column",
            Self::Footing => "footing",
            Self::Slab => "slab",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Beam => "BeamCalculation",
            Self::Column => "ColumnCalculation",
            Self::Footing => "FootingCalculation",
            Self::Slab => "SlabCalculation",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Parse(format!(
                    "Unknown element type '{s}', expected one of beam, column, footing, slab"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Shared report blocks
// ---------------------------------------------------------------------------

/// Concrete quantity block common to every element report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteQuantity {
    pub volume: f64,
    pub unit: String,
}

impl ConcreteQuantity {
    pub(crate) fn cubic_meters(volume: f64) -> Self {
        Self {
            volume,
            unit: UNIT_M3.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tagged union over element inputs
// ---------------------------------------------------------------------------

/// A calculation request for any element type, tagged by `"type"`.
///
/// The tag is matched case-insensitively (`"Beam"` selects a beam) and is
/// always written back in lowercase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructuralInput {
    Beam(BeamInput),
    Column(ColumnInput),
    Footing(FootingInput),
    Slab(SlabInput),
}

impl<'de> Deserialize<'de> for StructuralInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut body = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let kind: ElementKind = match body.remove("type") {
            Some(Value::String(tag)) => tag.parse().map_err(de::Error::custom)?,
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "element type must be a string, got {other}"
                )))
            }
            None => return Err(de::Error::missing_field("type")),
        };

        let body = Value::Object(body);
        match kind {
            ElementKind::Beam => BeamInput::deserialize(body).map(Self::Beam),
            ElementKind::Column => ColumnInput::deserialize(body).map(Self::Column),
            ElementKind::Footing => FootingInput::deserialize(body).map(Self::Footing),
            ElementKind::Slab => SlabInput::deserialize(body).map(Self::Slab),
        }
        .map_err(|e| de::Error::custom(format!("{kind}: {e}")))
    }
}

impl StructuralInput {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Beam(_) => ElementKind::Beam,
            Self::Column(_) => ElementKind::Column,
            Self::Footing(_) => ElementKind::Footing,
            Self::Slab(_) => ElementKind::Slab,
        }
    }

    /// Validate the request, then run the matching calculator.
    pub fn calculate(&self) -> CoreResult<StructuralResult> {
        self.validate()?;
        Ok(match self {
            Self::Beam(input) => StructuralResult::Beam(calculate_beam(input)),
            Self::Column(input) => StructuralResult::Column(calculate_column(input)),
            Self::Footing(input) => StructuralResult::Footing(calculate_footing(input)?),
            Self::Slab(input) => StructuralResult::Slab(calculate_slab(input)),
        })
    }
}

impl Validate for StructuralInput {
    fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::Beam(input) => input.validate(),
            Self::Column(input) => input.validate(),
            Self::Footing(input) => input.validate(),
            Self::Slab(input) => input.validate(),
        }
    }
}

/// The quantity report produced for a [`StructuralInput`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuralResult {
    Beam(BeamResult),
    Column(ColumnResult),
    Footing(FootingResult),
    Slab(SlabResult),
}

impl StructuralResult {
    pub fn concrete_volume(&self) -> f64 {
        match self {
            Self::Beam(r) => r.concrete.volume,
            Self::Column(r) => r.concrete.volume,
            Self::Footing(r) => r.concrete.volume,
            Self::Slab(r) => r.concrete.volume,
        }
    }

    pub fn total_steel_weight(&self) -> f64 {
        match self {
            Self::Beam(r) => r.steel.total_weight,
            Self::Column(r) => r.steel.total_weight,
            Self::Footing(r) => r.steel.total_weight,
            Self::Slab(r) => r.steel.total_weight,
        }
    }
}

/// A request shape served by its own per-element router.
pub trait ElementInput: Validate + Into<StructuralInput> + Send + 'static {
    const KIND: ElementKind;
}

impl ElementInput for BeamInput {
    const KIND: ElementKind = ElementKind::Beam;
}

impl ElementInput for ColumnInput {
    const KIND: ElementKind = ElementKind::Column;
}

impl ElementInput for FootingInput {
    const KIND: ElementKind = ElementKind::Footing;
}

impl ElementInput for SlabInput {
    const KIND: ElementKind = ElementKind::Slab;
}

impl From<BeamInput> for StructuralInput {
    fn from(input: BeamInput) -> Self {
        Self::Beam(input)
    }
}

impl From<ColumnInput> for StructuralInput {
    fn from(input: ColumnInput) -> Self {
        Self::Column(input)
    }
}

impl From<FootingInput> for StructuralInput {
    fn from(input: FootingInput) -> Self {
        Self::Footing(input)
    }
}

impl From<SlabInput> for StructuralInput {
    fn from(input: SlabInput) -> Self {
        Self::Slab(input)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn beam_body() -> serde_json::Value {
        json!({
            "type": "beam",
            "dimensions": { "length": 5000, "width": 300, "depth": 450, "unit": "mm" },
            "reinforcement": {
                "mainBars": { "diameter": 16, "count": 4 },
                "stirrups": { "diameter": 8, "spacing": 150, "cover": 25 }
            }
        })
    }

    #[test]
    fn element_kind_round_trips_through_str() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.as_str().parse::<ElementKind>().unwrap(), kind);
        }
        assert_eq!("Beam".parse::<ElementKind>().unwrap(), ElementKind::Beam);
        assert_matches!("truss".parse::<ElementKind>(), Err(CoreError::Parse(_)));
    }

    #[test]
    fn tagged_body_selects_beam() {
        let input: StructuralInput = serde_json::from_value(beam_body()).unwrap();
        assert_eq!(input.kind(), ElementKind::Beam);

        let result = input.calculate().unwrap();
        assert_matches!(result, StructuralResult::Beam(_));
        assert_eq!(result.concrete_volume(), 0.675);
    }

    #[test]
    fn type_tag_ignores_case() {
        let mut body = beam_body();
        body["type"] = json!("Beam");
        let input: StructuralInput = serde_json::from_value(body).unwrap();
        assert_eq!(input.kind(), ElementKind::Beam);

        let stored = serde_json::to_value(&input).unwrap();
        assert_eq!(stored["type"], "beam");
    }

    #[test]
    fn missing_type_is_rejected() {
        let mut body = beam_body();
        body.as_object_mut().unwrap().remove("type");
        let err = serde_json::from_value::<StructuralInput>(body).unwrap_err();
        assert!(err.to_string().contains("missing field `type`"));
    }

    #[test]
    fn unknown_type_is_rejected_by_serde() {
        let mut body = beam_body();
        body["type"] = json!("truss");
        let err = serde_json::from_value::<StructuralInput>(body).unwrap_err();
        assert!(err.to_string().contains("truss"));
    }

    #[test]
    fn calculate_validates_before_computing() {
        let mut body = beam_body();
        body["dimensions"]["width"] = json!(0);
        let input: StructuralInput = serde_json::from_value(body).unwrap();
        assert_matches!(
            input.calculate(),
            Err(CoreError::InvalidField { field, .. }) if field == "dimensions.width"
        );
    }

    #[test]
    fn calculation_is_deterministic() {
        let input: StructuralInput = serde_json::from_value(beam_body()).unwrap();
        let first = input.calculate().unwrap();
        let second = input.calculate().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.total_steel_weight().to_bits(),
            second.total_steel_weight().to_bits()
        );
    }

    #[test]
    fn stored_input_keeps_type_tag() {
        let input: StructuralInput = serde_json::from_value(beam_body()).unwrap();
        let stored = serde_json::to_value(&input).unwrap();
        assert_eq!(stored["type"], "beam");
        assert_eq!(stored["reinforcement"]["mainBars"]["count"], 4);
    }

    #[test]
    fn positive_inputs_never_produce_negative_quantities() {
        for length in [500.0, 3000.0, 12_000.0] {
            for spacing in [75.0, 200.0, 20_000.0] {
                let beam = StructuralInput::Beam(
                    serde_json::from_value(json!({
                        "dimensions": { "length": length, "width": 230, "depth": 300 },
                        "reinforcement": {
                            "mainBars": { "diameter": 12, "count": 2 },
                            "stirrups": { "diameter": 6, "spacing": spacing, "cover": 20 }
                        }
                    }))
                    .unwrap(),
                );
                let column = StructuralInput::Column(
                    serde_json::from_value(json!({
                        "dimensions": { "length": 300, "width": 300, "height": length },
                        "reinforcement": {
                            "mainBars": { "diameter": 12, "count": 4 },
                            "ties": { "diameter": 8, "spacing": spacing, "cover": 40 }
                        }
                    }))
                    .unwrap(),
                );
                for input in [beam, column] {
                    let result = input.calculate().unwrap();
                    assert!(result.concrete_volume() >= 0.0);
                    assert!(result.total_steel_weight() >= 0.0);
                }
            }
        }
    }
}
