// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and connections from a [`TwinGraph`].

use petgraph::Direction;

use crate::node_kind::find_station;
use crate::{Edge, Error, Node, TwinGraph};

/// `Node` and `Connection` retrieval.
impl<N, E> TwinGraph<N, E>
where
    N: Node,
    E: Edge,
{
    /// Returns the node with the given `node_id`, if it exists.
    pub fn node(&self, node_id: &str) -> Result<&N, Error> {
        self.node_indices
            .get(node_id)
            .map(|i| &self.graph[*i])
            .ok_or_else(|| Error::node_not_found(format!("Node with id {node_id} not found.")))
    }

    /// Returns the source node of the graph.
    pub fn source(&self) -> Result<&N, Error> {
        self.node(&self.source_id)
    }

    /// Returns the only station node of the graph.
    pub fn station(&self) -> Result<&N, Error> {
        find_station(self.nodes())
    }

    /// Returns the nodes of the graph, in the order they were given.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.graph.raw_nodes().iter().map(|n| &n.weight)
    }

    /// Returns the connections of the graph, in the order they were given.
    ///
    /// A connection that was given more than once is returned once, as the
    /// last one given.
    pub fn connections(&self) -> impl Iterator<Item = &E> + '_ {
        self.graph
            .raw_edges()
            .iter()
            .filter_map(move |e| self.edges.get(&(e.source(), e.target())))
    }

    /// Returns the nodes with a connection to the node with the given
    /// `node_id`.
    ///
    /// Returns an error if the given `node_id` does not exist.
    pub fn predecessors(&self, node_id: &str) -> Result<impl Iterator<Item = &N> + '_, Error> {
        self.neighbors(node_id, Direction::Incoming)
    }

    /// Returns the nodes the node with the given `node_id` is connected to.
    ///
    /// Returns an error if the given `node_id` does not exist.
    pub fn successors(&self, node_id: &str) -> Result<impl Iterator<Item = &N> + '_, Error> {
        self.neighbors(node_id, Direction::Outgoing)
    }

    fn neighbors(
        &self,
        node_id: &str,
        direction: Direction,
    ) -> Result<impl Iterator<Item = &N> + '_, Error> {
        let index = *self
            .node_indices
            .get(node_id)
            .ok_or_else(|| Error::node_not_found(format!("Node with id {node_id} not found.")))?;
        Ok(self
            .graph
            .neighbors_directed(index, direction)
            .map(move |i| &self.graph[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::{TestConnection, TestNode, TwinGraphBuilder};
    use crate::NodeKind;

    #[test]
    fn test_node() -> Result<(), Error> {
        let mut builder = TwinGraphBuilder::new();
        builder.single_station_cell("S1");
        let graph = builder.build()?;

        assert_eq!(graph.node("S1"), Ok(&TestNode::new("S1", NodeKind::Station)));
        assert_eq!(graph.source(), Ok(&TestNode::new("SRC", NodeKind::Source)));
        assert_eq!(graph.station(), Ok(&TestNode::new("S1", NodeKind::Station)));
        assert_eq!(
            graph.node("S9"),
            Err(Error::node_not_found("Node with id S9 not found."))
        );

        Ok(())
    }

    #[test]
    fn test_nodes_and_connections() -> Result<(), Error> {
        let mut builder = TwinGraphBuilder::new();
        builder.single_station_cell("W2");
        let graph = builder.build()?;

        assert!(graph.nodes().eq(&[
            TestNode::new("SRC", NodeKind::Source),
            TestNode::new("W2", NodeKind::Station),
            TestNode::new("SNK", NodeKind::Sink),
        ]));
        assert!(graph.connections().eq(&[
            TestConnection::new("SRC", "W2"),
            TestConnection::new("W2", "SNK"),
        ]));
        assert!(graph
            .connections()
            .filter(|x| x.source() == "W2")
            .eq(&[TestConnection::new("W2", "SNK")]));

        builder.connect("SRC", "W2");
        let graph = builder.build()?;
        assert_eq!(graph.connections().count(), 2);

        Ok(())
    }

    #[test]
    fn test_neighbors() -> Result<(), Error> {
        let mut builder = TwinGraphBuilder::new();
        builder.single_station_cell("S1");
        let graph = builder.build()?;

        assert!(graph.predecessors("SRC").is_ok_and(|x| x.count() == 0));
        assert!(graph
            .predecessors("S1")
            .is_ok_and(|x| x.eq(&[TestNode::new("SRC", NodeKind::Source)])));
        assert!(graph
            .successors("S1")
            .is_ok_and(|x| x.eq(&[TestNode::new("SNK", NodeKind::Sink)])));
        assert!(graph.successors("SNK").is_ok_and(|x| x.count() == 0));

        assert!(graph
            .predecessors("S9")
            .is_err_and(|e| e == Error::node_not_found("Node with id S9 not found.")));
        assert!(graph
            .successors("S9")
            .is_err_and(|e| e == Error::node_not_found("Node with id S9 not found.")));

        Ok(())
    }
}
