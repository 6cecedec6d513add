// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Helper methods for checking invariants of a [`TwinGraph`][crate::TwinGraph].

use crate::{Edge, Error, Node};

use super::TwinGraphValidator;

impl<N, E> TwinGraphValidator<'_, N, E>
where
    N: Node,
    E: Edge,
{
    /// Checks that the given node is a leaf node.
    pub(super) fn ensure_leaf(&self, node: &N) -> Result<(), Error> {
        if let Some(successor) = self.tg.successors(node.node_id())?.next() {
            return Err(Error::invalid_graph(format!(
                "{}:{} can't have any successors. Found {}:{}.",
                node.kind(),
                node.node_id(),
                successor.kind(),
                successor.node_id()
            )));
        }
        Ok(())
    }

    /// Checks that the given node is *not* a leaf node.
    pub(super) fn ensure_not_leaf(&self, node: &N) -> Result<(), Error> {
        if self.tg.successors(node.node_id())?.next().is_none() {
            return Err(Error::invalid_graph(format!(
                "{}:{} must have at least one successor.",
                node.kind(),
                node.node_id()
            )));
        }
        Ok(())
    }
}
