// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The twin document: the graph representation a work cell compiles into.
//!
//! A twin is the stable intermediate between the compiler and the KPI
//! evaluator.  It can be persisted and evaluated later, or produced by other
//! tools altogether, so everything here decodes leniently and is checked only
//! where it is used.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DataConfig, Edge, Error, Node, NodeKind, Numeric, QualityConfig, StationType, TwinGraph};

/// The `type` tag of twins with the source → station → sink topology.
pub const SINGLE_STATION_CELL: &str = "single_station_cell";

/// The id of the source node.
pub const SOURCE_ID: &str = "SRC";

/// The id of the sink node.
pub const SINK_ID: &str = "SNK";

/// A compiled work cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwinDocument {
    #[serde(default)]
    pub twin_id: String,
    #[serde(rename = "type", default)]
    pub twin_type: String,
    pub nodes: Vec<TwinNode>,
    #[serde(default)]
    pub edges: Vec<TwinEdge>,
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl TwinDocument {
    /// Decodes a twin document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(|e| Error::invalid_document(format!("Invalid twin document: {e}")))
    }

    /// Decodes a twin document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value)
            .map_err(|e| Error::invalid_document(format!("Invalid twin document: {e}")))
    }

    /// Encodes the twin document as indented JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::internal(format!("Unable to encode twin {}: {e}", self.twin_id)))
    }

    /// Returns a validated graph view over the nodes and edges of the twin.
    pub fn graph(&self) -> Result<TwinGraph<&TwinNode, &TwinEdge>, Error> {
        TwinGraph::try_new(self.nodes.iter(), self.edges.iter())
    }
}

/// Checks that a twin document describes a well formed graph, with a single
/// source, a single station and every node reachable from the source.
pub fn validate_twin(twin: &TwinDocument) -> Result<(), Error> {
    twin.graph().map(|_| ())
}

/// A node of a twin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwinNode {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_type: Option<StationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<StationParams>,
}

impl TwinNode {
    pub fn source() -> Self {
        Self {
            id: SOURCE_ID.to_string(),
            kind: NodeKind::Source,
            station_type: None,
            params: None,
        }
    }

    pub fn sink() -> Self {
        Self {
            id: SINK_ID.to_string(),
            kind: NodeKind::Sink,
            station_type: None,
            params: None,
        }
    }

    pub fn station(id: impl Into<String>, station_type: StationType, params: StationParams) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Station,
            station_type: Some(station_type),
            params: Some(params),
        }
    }
}

impl Node for TwinNode {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> NodeKind {
        self.kind.clone()
    }
}

/// Parameters of a station node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StationParams {
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

/// A directed connection between two twin nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwinEdge {
    pub from: String,
    pub to: String,
}

impl TwinEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Edge for TwinEdge {
    fn source(&self) -> &str {
        &self.from
    }

    fn destination(&self) -> &str {
        &self.to
    }
}
