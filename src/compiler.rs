// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the instance to twin compiler.

use crate::{
    registry, CompilerConfig, Error, InstanceDocument, Numeric, StationConfig, StationParams,
    TwinDocument, TwinEdge, TwinNode, SINGLE_STATION_CELL,
};

/// Compiles an instance into a twin with the source → station → sink
/// topology.
///
/// Only the presence of the fields read here is checked: `line.line_name`,
/// and the station's `id`, `type`, `cycle_time_s` and `availability_pct`.
/// Missing `setup_time_s` and `scrap_rate_pct` default to 0, everything else
/// is copied without interpretation.
pub fn compile_twin(instance: &InstanceDocument) -> Result<TwinDocument, Error> {
    compile_twin_with_config(instance, &CompilerConfig::default())
}

/// Compiles an instance into a twin, with the optional checks enabled in
/// `config`.
pub fn compile_twin_with_config(
    instance: &InstanceDocument,
    config: &CompilerConfig,
) -> Result<TwinDocument, Error> {
    TwinCompiler::new(instance, config).compile()
}

struct TwinCompiler<'a> {
    instance: &'a InstanceDocument,
    config: &'a CompilerConfig,
}

impl<'a> TwinCompiler<'a> {
    fn new(instance: &'a InstanceDocument, config: &'a CompilerConfig) -> Self {
        Self { instance, config }
    }

    fn compile(self) -> Result<TwinDocument, Error> {
        if self.config.validate_ranges {
            registry().template(SINGLE_STATION_CELL)?.validate(self.instance)?;
        }

        let twin_id = self
            .instance
            .line
            .as_ref()
            .ok_or_else(|| Error::missing_field("Instance has no line."))?
            .line_name
            .clone()
            .ok_or_else(|| Error::missing_field("Instance has no line.line_name."))?;

        let station = self
            .instance
            .station
            .as_ref()
            .ok_or_else(|| Error::missing_field("Instance has no station."))?;
        let station_node = Self::station_node(station)?;
        let station_id = station_node.id.clone();

        tracing::debug!("Compiling twin {twin_id} with station {station_id}.");

        let twin = TwinDocument {
            twin_id,
            twin_type: SINGLE_STATION_CELL.to_string(),
            nodes: vec![TwinNode::source(), station_node, TwinNode::sink()],
            edges: vec![
                TwinEdge::new(crate::SOURCE_ID, station_id.as_str()),
                TwinEdge::new(station_id.as_str(), crate::SINK_ID),
            ],
            quality: self.instance.quality.clone().unwrap_or_default(),
            data: self.instance.data.clone().unwrap_or_default(),
        };

        if self.config.validate_topology {
            if let Err(err) = twin.graph() {
                tracing::warn!("Compiled twin {} is not a valid graph: {err}", twin.twin_id);
                return Err(err);
            }
        }

        Ok(twin)
    }

    fn station_node(station: &StationConfig) -> Result<TwinNode, Error> {
        let missing = |field: &str| Error::missing_field(format!("Instance has no station.{field}."));

        let id = station.id.clone().ok_or_else(|| missing("id"))?;
        let station_type = station.station_type.clone().ok_or_else(|| missing("type"))?;
        let cycle_time_s = station.cycle_time_s.clone().ok_or_else(|| missing("cycle_time_s"))?;
        let availability_pct = station
            .availability_pct
            .clone()
            .ok_or_else(|| missing("availability_pct"))?;

        let params = StationParams {
            cycle_time_s: Some(cycle_time_s),
            availability_pct: Some(availability_pct),
            setup_time_s: Some(station.setup_time_s.clone().unwrap_or(Numeric::from(0_i64))),
            scrap_rate_pct: Some(station.scrap_rate_pct.clone().unwrap_or(Numeric::from(0.0))),
        };

        Ok(TwinNode::station(id, station_type, params))
    }
}
