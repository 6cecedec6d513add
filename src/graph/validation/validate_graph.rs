// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating the acyclicity, connectedness and node roles of a
//! [`TwinGraph`][crate::TwinGraph].

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::algo::kosaraju_scc;
use petgraph::Direction;

use crate::{Edge, Error, Node, NodeKind};

use super::TwinGraphValidator;

impl<N, E> TwinGraphValidator<'_, N, E>
where
    N: Node,
    E: Edge,
{
    /// Validates that all nodes are connected into a single graph.
    ///
    /// It does so by ensuring that all the nodes are reachable by traversing
    /// the graph from the source node.
    pub(super) fn validate_connected_graph(&self, source: &N) -> Result<(), Error> {
        let source_id = source.node_id().to_string();
        let mut visited = BTreeSet::new();
        let mut queue = vec![source_id.clone()];
        visited.insert(source_id);
        while let Some(node_id) = queue.pop() {
            for successor in self.tg.successors(&node_id)? {
                if visited.insert(successor.node_id().to_string()) {
                    queue.push(successor.node_id().to_string());
                }
            }
        }

        let unvisited = self
            .tg
            .nodes()
            .map(|n| n.node_id())
            .filter(|id| !visited.contains(*id))
            .collect::<Vec<_>>();

        if !unvisited.is_empty() {
            return Err(Error::invalid_graph(format!(
                "Nodes [{}] are not connected to the source.",
                unvisited.join(", ")
            )));
        }

        Ok(())
    }

    /// Validates that there are no cycles in the graph.
    ///
    /// If there are cycles, an error is returned that lists the nodes of the
    /// shortest cycle through the earliest added node that is part of one.
    pub(super) fn validate_acyclicity(&self) -> Result<(), Error> {
        let graph = &self.tg.graph;

        // Self-loops are rejected when adding connections, so only strongly
        // connected components with more than one node contain cycles.
        let Some((start, members)) = kosaraju_scc(graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .filter_map(|scc| Some((scc.iter().min().copied()?, scc)))
            .min_by_key(|(start, _)| *start)
        else {
            return Ok(());
        };
        let members = members.into_iter().collect::<HashSet<_>>();

        let mut parents = HashMap::new();
        let mut queue = VecDeque::from([start]);
        while let Some(index) = queue.pop_front() {
            for next in graph.neighbors_directed(index, Direction::Outgoing) {
                if next == start {
                    let mut cycle = vec![graph[start].node_id()];
                    let mut current = index;
                    while current != start {
                        cycle.push(graph[current].node_id());
                        current = parents[&current];
                    }
                    cycle[1..].reverse();
                    cycle.push(graph[start].node_id());
                    return Err(Error::invalid_graph(format!(
                        "Cycle detected: {}",
                        cycle.join(" -> ")
                    )));
                }
                if members.contains(&next) && !parents.contains_key(&next) {
                    parents.insert(next, index);
                    queue.push_back(next);
                }
            }
        }

        Err(Error::internal(format!(
            "Can't trace the cycle through node {}.",
            graph[start].node_id()
        )))
    }

    /// Validates that every node has the neighbors its kind requires, that
    /// there is a single sink, and a single station.
    pub(super) fn validate_node_roles(&self) -> Result<(), Error> {
        let mut sinks = 0;
        for node in self.tg.nodes() {
            match node.kind() {
                NodeKind::Source => {}
                NodeKind::Station => self.ensure_not_leaf(node)?,
                NodeKind::Sink => {
                    sinks += 1;
                    self.ensure_leaf(node)?;
                }
                NodeKind::Other(kind) => {
                    tracing::debug!("Node {} has unrecognized kind {kind}.", node.node_id());
                }
            }
        }

        if sinks != 1 {
            return Err(Error::invalid_graph(format!(
                "Expected exactly one sink node, found {sinks}."
            )));
        }

        self.tg.station()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::test_utils::{TestConnection, TestNode, TwinGraphBuilder};
    use crate::{Error, ErrorKind, NodeKind, TwinGraph};

    fn buffer(id: &str) -> TestNode {
        TestNode::new(id, NodeKind::Other("buffer".to_string()))
    }

    #[test]
    fn test_connected_graph_validation() {
        let mut builder = TwinGraphBuilder::new();
        builder.single_station_cell("S1");
        assert!(builder.build().is_ok());

        builder.station("S2");
        assert!(builder.build().is_err_and(
            |e| e == Error::invalid_graph("Nodes [S2] are not connected to the source.")
        ));

        let buffer = builder.add_node("B1", NodeKind::Other("buffer".to_string()));
        builder.connect("S2", buffer);
        assert!(builder.build().is_err_and(
            |e| e == Error::invalid_graph("Nodes [S2, B1] are not connected to the source.")
        ));
    }

    #[test]
    fn test_acyclicity_validation() {
        let mut builder = TwinGraphBuilder::new();
        let station = builder.single_station_cell("S1");
        assert!(builder.build().is_ok());

        builder.connect("SNK", station);
        assert!(builder
            .build()
            .is_err_and(|e| e == Error::invalid_graph("Cycle detected: S1 -> SNK -> S1")));

        builder.disconnect_last().connect(station, "SRC");
        assert!(builder
            .build()
            .is_err_and(|e| e == Error::invalid_graph("Cycle detected: SRC -> S1 -> SRC")));

        builder.disconnect_last();
        assert!(builder.build().is_ok());

        let buffer = builder.add_node("B1", NodeKind::Other("buffer".to_string()));
        builder.connect(station, buffer).connect(buffer, "SRC");
        assert!(builder
            .build()
            .is_err_and(|e| e == Error::invalid_graph("Cycle detected: SRC -> S1 -> B1 -> SRC")));
    }

    #[test]
    fn test_stacked_diamonds() {
        // SRC -> {A0, B0} -> J0 -> {A1, B1} -> J1 ... -> S1 -> SNK
        let layers = 30;
        let mut nodes = vec![TestNode::new("SRC", NodeKind::Source)];
        let mut connections = vec![];
        let mut previous = "SRC".to_string();
        for layer in 0..layers {
            let (a, b, join) = (format!("A{layer}"), format!("B{layer}"), format!("J{layer}"));
            for id in [&a, &b, &join] {
                nodes.push(buffer(id));
            }
            for (from, to) in [(&previous, &a), (&previous, &b), (&a, &join), (&b, &join)] {
                connections.push(TestConnection::new(from, to));
            }
            previous = join;
        }
        nodes.push(TestNode::new("S1", NodeKind::Station));
        nodes.push(TestNode::new("SNK", NodeKind::Sink));
        connections.push(TestConnection::new(&previous, "S1"));
        connections.push(TestConnection::new("S1", "SNK"));

        assert!(TwinGraph::try_new(nodes.clone(), connections.clone()).is_ok());

        // Each layer can be crossed through either branch, so only the length
        // and the ends of the reported cycle are fixed.
        connections.push(TestConnection::new("J29", "A0"));
        assert!(TwinGraph::try_new(nodes, connections).is_err_and(|e| {
            e.kind() == ErrorKind::InvalidGraph
                && e.desc().starts_with("Cycle detected: A0 -> J0 -> ")
                && e.desc().ends_with(" -> J29 -> A0")
                && e.desc().matches(" -> ").count() == 2 * layers
        }));
    }

    #[test]
    fn test_long_chain() {
        let length = 20_000;
        let ids = (0..length).map(|i| format!("B{i}")).collect::<Vec<_>>();
        let mut nodes = vec![
            TestNode::new("SRC", NodeKind::Source),
            TestNode::new("S1", NodeKind::Station),
            TestNode::new("SNK", NodeKind::Sink),
        ];
        nodes.extend(ids.iter().map(|id| buffer(id)));
        let mut connections = vec![TestConnection::new("SRC", &ids[0])];
        connections.extend(ids.windows(2).map(|w| TestConnection::new(&w[0], &w[1])));
        connections.push(TestConnection::new(&ids[length - 1], "S1"));
        connections.push(TestConnection::new("S1", "SNK"));

        assert!(TwinGraph::try_new(nodes, connections).is_ok());
    }

    #[test]
    fn test_node_role_validation() {
        let mut builder = TwinGraphBuilder::new();
        let source = builder.source();
        let station = builder.station("S1");
        let sink = builder.sink();
        builder.connect(source, station).connect(source, sink);
        assert!(builder.build().is_err_and(
            |e| e == Error::invalid_graph("Station:S1 must have at least one successor.")
        ));

        builder.disconnect_last().connect(station, sink);
        assert!(builder.build().is_ok());

        let buffer = builder.add_node("B1", NodeKind::Other("buffer".to_string()));
        builder.connect(sink, buffer);
        assert!(builder.build().is_err_and(|e| e
            == Error::invalid_graph("Sink:SNK can't have any successors. Found Other(buffer):B1.")));
    }

    #[test]
    fn test_sink_count_validation() {
        let mut builder = TwinGraphBuilder::new();
        let source = builder.source();
        let station = builder.station("S1");
        let buffer = builder.add_node("B1", NodeKind::Other("buffer".to_string()));
        builder.connect(source, station).connect(station, buffer);
        assert!(builder.build().is_err_and(
            |e| e == Error::invalid_graph("Expected exactly one sink node, found 0.")
        ));

        let mut builder = TwinGraphBuilder::new();
        let station = builder.single_station_cell("S1");
        let second_sink = builder.add_node("SNK2", NodeKind::Sink);
        builder.connect(station, second_sink);
        assert!(builder.build().is_err_and(
            |e| e == Error::invalid_graph("Expected exactly one sink node, found 2.")
        ));
    }

    #[test]
    fn test_station_count_validation() {
        let mut builder = TwinGraphBuilder::new();
        let source = builder.source();
        let first = builder.station("S1");
        let second = builder.station("S2");
        let sink = builder.sink();
        builder
            .connect(source, first)
            .connect(first, second)
            .connect(second, sink);
        assert!(builder.build().is_err_and(|e| e.kind() == ErrorKind::StationNotFound
            && e.desc() == "Multiple station nodes found: S1, S2."));
    }
}
