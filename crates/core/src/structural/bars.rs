//! Reinforcement bar groups shared by the element request shapes.
//!
//! All diameters, spacings and covers are millimeters. The optional `unit`
//! label is carried through to storage but never validated.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{field_path, require_positive, require_positive_count};

/// A fixed number of longitudinal bars (beam and column main bars).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountedBars {
    pub diameter: f64,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl CountedBars {
    pub(crate) fn check(&self, path: &str) -> Result<(), CoreError> {
        require_positive(&field_path(path, "diameter"), self.diameter)?;
        require_positive_count(&field_path(path, "count"), self.count)
    }
}

/// Closed links placed at a spacing inside a cover (beam stirrups, column ties).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    pub diameter: f64,
    pub spacing: f64,
    pub cover: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Links {
    pub(crate) fn check(&self, path: &str) -> Result<(), CoreError> {
        require_positive(&field_path(path, "diameter"), self.diameter)?;
        require_positive(&field_path(path, "spacing"), self.spacing)?;
        require_positive(&field_path(path, "cover"), self.cover)
    }
}

/// Straight bars laid at a spacing (footing mesh, slab main and distribution bars).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacedBars {
    pub diameter: f64,
    pub spacing: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl SpacedBars {
    pub(crate) fn check(&self, path: &str) -> Result<(), CoreError> {
        require_positive(&field_path(path, "diameter"), self.diameter)?;
        require_positive(&field_path(path, "spacing"), self.spacing)
    }
}
