// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating a [`TwinGraph`].

mod invariant_checks;
mod validate_graph;

use crate::{Edge, Error, Node, TwinGraph};

pub(crate) struct TwinGraphValidator<'a, N, E>
where
    N: Node,
    E: Edge,
{
    tg: &'a TwinGraph<N, E>,
}

impl<N, E> TwinGraph<N, E>
where
    N: Node,
    E: Edge,
{
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let Ok(source) = self.node(&self.source_id) else {
            return Err(Error::internal(format!(
                "Source node not found with detected node ID: {}.",
                self.source_id
            )));
        };

        let validator = TwinGraphValidator { tg: self };

        validator.validate_acyclicity()?;
        validator.validate_connected_graph(source)?;
        validator.validate_node_roles()?;

        Ok(())
    }
}
