// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Records produced by the KPI evaluator.

use serde::{Deserialize, Serialize};

use crate::TwinDocument;

/// Steady-state performance indicators of a twin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KpiRecord {
    /// Good units per hour, rounded to two decimals.
    pub throughput_pph: f64,
    pub cycle_time_s: f64,
    /// Availability as a fraction in `[0, 1]`.
    pub availability: f64,
    /// Scrap rate as a fraction in `[0, 1]`.
    pub scrap_rate: f64,
    /// Id of the station limiting throughput.
    pub bottleneck: String,
}

/// A compiled twin together with its KPIs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    pub twin_id: String,
    pub kpis: KpiRecord,
    pub twin: TwinDocument,
}
