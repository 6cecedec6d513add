// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the KPI evaluator.
//!
//! The evaluator only relies on the shape of a [`TwinDocument`], so it works
//! the same for twins fresh out of the compiler, twins loaded from storage and
//! twins built by hand.

use crate::node_kind::find_station;
use crate::{
    compile_twin, Error, InstanceDocument, KpiRecord, KpiReport, Numeric, StationParams,
    TwinDocument, TwinNode,
};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Computes the KPIs of the given twin.
///
/// Throughput is the number of good units per hour:
/// `(3600 / cycle_time_s) * availability * (1 - scrap_rate)`.
pub fn compute_kpis(twin: &TwinDocument) -> Result<KpiRecord, Error> {
    KpiEvaluator::try_new(twin)?.evaluate()
}

/// Compiles the given instance and computes the KPIs of the resulting twin.
pub fn compute_kpi_report(instance: &InstanceDocument) -> Result<KpiReport, Error> {
    let twin = compile_twin(instance)?;
    let kpis = compute_kpis(&twin)?;
    Ok(KpiReport {
        twin_id: twin.twin_id.clone(),
        kpis,
        twin,
    })
}

pub(crate) struct KpiEvaluator<'a> {
    station: &'a TwinNode,
    params: Option<&'a StationParams>,
}

impl<'a> KpiEvaluator<'a> {
    pub fn try_new(twin: &'a TwinDocument) -> Result<Self, Error> {
        let station = find_station(&twin.nodes)?;
        Ok(Self {
            station,
            params: station.params.as_ref(),
        })
    }

    pub fn evaluate(self) -> Result<KpiRecord, Error> {
        tracing::debug!("Computing KPIs for station {}.", self.station.id);

        let params = self.params;
        let cycle_time_s =
            self.required(params.and_then(|p| p.cycle_time_s.as_ref()), "cycle_time_s")?;
        let availability_pct =
            self.required(params.and_then(|p| p.availability_pct.as_ref()), "availability_pct")?;
        let scrap_rate_pct = match params.and_then(|p| p.scrap_rate_pct.as_ref()) {
            Some(value) => self.coerce(value, "scrap_rate_pct")?,
            None => 0.0,
        };

        let availability = availability_pct / 100.0;
        let scrap_rate = scrap_rate_pct / 100.0;

        if cycle_time_s == 0.0 {
            return Err(Error::division_by_zero(format!(
                "Station {} has a cycle_time_s of 0.",
                self.station.id
            )));
        }
        let throughput_pph = (SECONDS_PER_HOUR / cycle_time_s) * availability * (1.0 - scrap_rate);

        Ok(KpiRecord {
            throughput_pph: round_to_hundredths(throughput_pph)?,
            cycle_time_s,
            availability,
            scrap_rate,
            bottleneck: self.station.id.clone(),
        })
    }

    fn required(&self, value: Option<&Numeric>, field: &str) -> Result<f64, Error> {
        let value = value.ok_or_else(|| {
            Error::invalid_numeric(format!(
                "Station {} has no {field} parameter.",
                self.station.id
            ))
        })?;
        self.coerce(value, field)
    }

    fn coerce(&self, value: &Numeric, field: &str) -> Result<f64, Error> {
        value.to_f64().ok_or_else(|| {
            Error::invalid_numeric(format!(
                "Station {} has a {field} of {value}, which is not a real number.",
                self.station.id
            ))
        })
    }
}

/// Rounds to two decimals, from the exact decimal expansion of `value`.
///
/// Scaling by 100 first would round twice, so values just below a half can
/// end up on the wrong side.
fn round_to_hundredths(value: f64) -> Result<f64, Error> {
    format!("{value:.2}")
        .parse()
        .map_err(|e| Error::internal(format!("Can't round {value} to two decimals: {e}")))
}
