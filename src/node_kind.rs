// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `NodeKind` enum, which represents the role of a
//! node in a twin graph, and the enumerations carried by station and data
//! configuration.

use crate::graph_traits::Node;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Represents the kind of a node in a twin graph.
///
/// Kinds not known to this library are kept as `Other`, so that twins
/// produced elsewhere still decode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Source,
    Station,
    Sink,
    #[serde(untagged)]
    Other(String),
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Source => write!(f, "Source"),
            NodeKind::Station => write!(f, "Station"),
            NodeKind::Sink => write!(f, "Sink"),
            NodeKind::Other(kind) => write!(f, "Other({kind})"),
        }
    }
}

/// Represents the type of a station.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationType {
    Assembly,
    Welding,
    #[serde(untagged)]
    Other(String),
}

impl StationType {
    /// The station types accepted by the registered templates.
    pub const KNOWN: [&'static str; 2] = ["assembly", "welding"];
}

impl Display for StationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationType::Assembly => write!(f, "assembly"),
            StationType::Welding => write!(f, "welding"),
            StationType::Other(t) => write!(f, "{t}"),
        }
    }
}

/// Represents where the runtime data for a twin comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    #[default]
    Simulation,
    Realtime,
    #[serde(untagged)]
    Other(String),
}

impl DataMode {
    /// The data modes accepted by the registered templates.
    pub const KNOWN: [&'static str; 2] = ["simulation", "realtime"];
}

impl Display for DataMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataMode::Simulation => write!(f, "simulation"),
            DataMode::Realtime => write!(f, "realtime"),
            DataMode::Other(m) => write!(f, "{m}"),
        }
    }
}

/// Predicates for checking the kind of a `Node`.
pub(crate) trait KindPredicates: Node {
    fn is_source(&self) -> bool {
        self.kind() == NodeKind::Source
    }

    fn is_station(&self) -> bool {
        self.kind() == NodeKind::Station
    }

    fn is_sink(&self) -> bool {
        self.kind() == NodeKind::Sink
    }
}

/// Implement the `KindPredicates` trait for all types that implement the
/// `Node` trait.
impl<T: Node> KindPredicates for T {}

/// Returns the only station among the given nodes.
///
/// Fails with `StationNotFound` if there is no station, or more than one.
pub(crate) fn find_station<'a, N: Node + 'a>(
    nodes: impl IntoIterator<Item = &'a N>,
) -> Result<&'a N, crate::Error> {
    let mut stations = nodes.into_iter().filter(|n| n.is_station());

    let station = stations
        .next()
        .ok_or_else(|| crate::Error::station_not_found("No station node found."))?;

    if let Some(other) = stations.next() {
        return Err(crate::Error::station_not_found(format!(
            "Multiple station nodes found: {}, {}.",
            station.node_id(),
            other.node_id()
        )));
    }

    Ok(station)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variants_round_trip() {
        let kind: NodeKind = serde_json::from_str("\"buffer\"").unwrap();
        assert_eq!(kind, NodeKind::Other("buffer".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"buffer\"");

        let kind: NodeKind = serde_json::from_str("\"station\"").unwrap();
        assert_eq!(kind, NodeKind::Station);

        let station_type: StationType = serde_json::from_str("\"milling\"").unwrap();
        assert_eq!(station_type, StationType::Other("milling".to_string()));
        assert_eq!(station_type.to_string(), "milling");

        let mode: DataMode = serde_json::from_str("\"realtime\"").unwrap();
        assert_eq!(mode, DataMode::Realtime);
        assert_eq!(DataMode::default(), DataMode::Simulation);
    }
}
