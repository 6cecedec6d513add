// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`TwinGraph`] instances from given nodes and
//! connections.

use petgraph::graph::DiGraph;

use crate::{node_kind::KindPredicates, Edge, Error, Node};

use super::{EdgeMap, NodeIndexMap, TwinGraph};

/// `TwinGraph` instantiation.
impl<N, E> TwinGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Creates a new [`TwinGraph`] from the given nodes and connections.
    ///
    /// Returns an error if the graph is invalid.
    pub fn try_new<NodeIterator: IntoIterator<Item = N>, EdgeIterator: IntoIterator<Item = E>>(
        nodes: NodeIterator,
        connections: EdgeIterator,
    ) -> Result<Self, Error> {
        let (graph, indices) = Self::create_graph(nodes)?;
        let source_id = Self::find_source(&graph)?.node_id().to_string();

        let mut tg = Self {
            graph,
            node_indices: indices,
            source_id,
            edges: EdgeMap::new(),
        };
        tg.add_connections(connections)?;

        tg.validate()?;

        tracing::debug!(
            nodes = tg.graph.node_count(),
            edges = tg.graph.edge_count(),
            "Validated twin graph starting at {}.",
            tg.source_id
        );

        Ok(tg)
    }

    fn find_source(graph: &DiGraph<N, ()>) -> Result<&N, Error> {
        let mut sources_iter = graph.raw_nodes().iter().filter(|n| n.weight.is_source());

        let source = sources_iter
            .next()
            .map(|n| &n.weight)
            .ok_or_else(|| Error::invalid_graph("No source node found."))?;

        if sources_iter.next().is_some() {
            return Err(Error::invalid_graph("Multiple source nodes found."));
        }

        Ok(source)
    }

    fn create_graph(
        nodes: impl IntoIterator<Item = N>,
    ) -> Result<(DiGraph<N, ()>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for node in nodes {
            let nid = node.node_id().to_string();

            if nid.is_empty() {
                return Err(Error::invalid_graph(format!(
                    "Node id not specified for {} node.",
                    node.kind()
                )));
            }
            if indices.contains_key(&nid) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate node ID found: {nid}"
                )));
            }

            let idx = graph.add_node(node);
            indices.insert(nid, idx);
        }

        Ok((graph, indices))
    }

    fn add_connections(&mut self, connections: impl IntoIterator<Item = E>) -> Result<(), Error> {
        for connection in connections {
            let sid = connection.source();
            let did = connection.destination();

            if sid == did {
                return Err(Error::invalid_connection(format!(
                    "Connection:({sid}, {did}) Can't connect a node to itself."
                )));
            }
            for nid in [sid, did] {
                if !self.node_indices.contains_key(nid) {
                    return Err(Error::invalid_connection(format!(
                        "Connection:({sid}, {did}) Can't find a node with ID {nid}"
                    )));
                }
            }

            let source_idx = self.node_indices[sid];
            let dest_idx = self.node_indices[did];
            self.graph.update_edge(source_idx, dest_idx, ());
            self.edges.insert((source_idx, dest_idx), connection);
        }

        Ok(())
    }
}
