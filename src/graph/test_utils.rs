// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `graph` module.
//!
//! - the `TestNode` and `TestConnection` types, which implement the `Node`
//!   and `Edge` traits respectively.
//! - the `TwinGraphBuilder`, which can declaratively build graph
//!   configurations for use in tests.

use crate::{Edge, Error, Node, NodeKind, TwinGraph};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestNode(String, NodeKind);

impl TestNode {
    pub(crate) fn new(id: &str, kind: NodeKind) -> Self {
        TestNode(id.to_string(), kind)
    }
}

impl Node for TestNode {
    fn node_id(&self) -> &str {
        &self.0
    }

    fn kind(&self) -> NodeKind {
        self.1.clone()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestConnection(String, String);

impl TestConnection {
    pub(crate) fn new(source: &str, destination: &str) -> Self {
        TestConnection(source.to_string(), destination.to_string())
    }
}

impl Edge for TestConnection {
    fn source(&self) -> &str {
        &self.0
    }

    fn destination(&self) -> &str {
        &self.1
    }
}

/// A builder for creating graph configurations easily, for use in tests.
pub(crate) struct TwinGraphBuilder {
    nodes: Vec<TestNode>,
    connections: Vec<TestConnection>,
}

impl TwinGraphBuilder {
    /// Creates a new `TwinGraphBuilder`.
    pub(crate) fn new() -> Self {
        TwinGraphBuilder {
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Adds a node to the graph and returns its id.
    pub(crate) fn add_node<'a>(&mut self, id: &'a str, kind: NodeKind) -> &'a str {
        self.nodes.push(TestNode::new(id, kind));
        id
    }

    /// Adds the `SRC` node to the graph and returns its id.
    pub(crate) fn source(&mut self) -> &'static str {
        self.add_node("SRC", NodeKind::Source)
    }

    /// Adds a station to the graph and returns its id.
    pub(crate) fn station<'a>(&mut self, id: &'a str) -> &'a str {
        self.add_node(id, NodeKind::Station)
    }

    /// Adds the `SNK` node to the graph and returns its id.
    pub(crate) fn sink(&mut self) -> &'static str {
        self.add_node("SNK", NodeKind::Sink)
    }

    /// Connects two nodes in the graph.
    pub(crate) fn connect(&mut self, from: &str, to: &str) -> &mut Self {
        self.connections.push(TestConnection::new(from, to));
        self
    }

    /// Adds a `SRC -> station -> SNK` chain and returns the station id.
    pub(crate) fn single_station_cell<'a>(&mut self, station: &'a str) -> &'a str {
        let source = self.source();
        let station = self.station(station);
        let sink = self.sink();
        self.connect(source, station).connect(station, sink);
        station
    }

    /// Removes the most recently added connection.
    pub(crate) fn disconnect_last(&mut self) -> &mut Self {
        self.connections.pop();
        self
    }

    /// Builds and returns the graph from the nodes and connections added to
    /// the builder.
    pub(crate) fn build(&self) -> Result<TwinGraph<TestNode, TestConnection>, Error> {
        TwinGraph::try_new(self.nodes.clone(), self.connections.clone())
    }
}
