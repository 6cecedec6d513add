// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The instance document: the caller supplied description of one production
//! line and its single station.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DataMode, Error, Numeric, StationType};

/// Configuration of a single work cell, as submitted by a caller.
///
/// Every field is optional at this level.  Required-ness of the fields the
/// compiler reads is checked by [`compile_twin`][crate::compile_twin], and
/// ranges are published by the template [`registry`][crate::registry].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<StationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataConfig>,
}

impl InstanceDocument {
    /// Decodes an instance document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(|e| Error::invalid_document(format!("Invalid instance document: {e}")))
    }

    /// Decodes an instance document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value)
            .map_err(|e| Error::invalid_document(format!("Invalid instance document: {e}")))
    }
}

/// The production line the station belongs to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::numeric::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub shift_hours: Option<Numeric>,
    #[serde(
        default,
        deserialize_with = "crate::numeric::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_throughput_pph: Option<Numeric>,
}

/// The single station of the work cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub station_type: Option<StationType>,
    #[serde(
        default,
        deserialize_with = "crate::numeric::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub cycle_time_s: Option<Numeric>,
    #[serde(
        default,
        deserialize_with = "crate::numeric::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub availability_pct: Option<Numeric>,
    #[serde(
        default,
        deserialize_with = "crate::numeric::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub setup_time_s: Option<Numeric>,
    #[serde(
        default,
        deserialize_with = "crate::numeric::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub scrap_rate_pct: Option<Numeric>,
}

/// Quality settings.  The compiler carries them into the twin untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rework_enabled: Option<bool>,
    #[serde(
        default,
        deserialize_with = "crate::numeric::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub rework_cycle_time_s: Option<Numeric>,
    /// Keys not known to this library, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QualityConfig {
    /// Whether inspection is enabled, `true` unless stated otherwise.
    pub fn inspection_enabled(&self) -> bool {
        self.inspection_enabled.unwrap_or(true)
    }

    /// Whether rework is enabled, `false` unless stated otherwise.
    pub fn rework_enabled(&self) -> bool {
        self.rework_enabled.unwrap_or(false)
    }

    /// The rework cycle time in seconds, 60 unless stated otherwise.
    ///
    /// Returns `None` if the configured value is not a real number.
    pub fn rework_cycle_time_s(&self) -> Option<f64> {
        match &self.rework_cycle_time_s {
            Some(value) => value.to_f64(),
            None => Some(60.0),
        }
    }
}

/// Where runtime data for the twin comes from.  The compiler carries it into
/// the twin untouched; `endpoint` and `topic` are opaque.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DataMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Keys not known to this library, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataConfig {
    /// The data mode, `simulation` unless stated otherwise.
    pub fn mode(&self) -> DataMode {
        self.mode.clone().unwrap_or_default()
    }
}
