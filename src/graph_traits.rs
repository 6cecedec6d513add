// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the traits that need to be implemented by the types
//! that represent a node and an edge.

use crate::node_kind::NodeKind;

/**
This trait needs to be implemented by the type that represents a node.

[`TwinNode`][crate::TwinNode] implements it, so compiled or decoded twins can
be turned into a [`TwinGraph`][crate::TwinGraph] directly.  Other node types,
for example rows loaded from a database, can implement it too.

<details>
<summary>Example implementation:</summary>

```ignore
impl work_cell_twin::Node for StoredNode {
    fn node_id(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> work_cell_twin::NodeKind {
        match self.role.as_str() {
            "source" => work_cell_twin::NodeKind::Source,
            "sink" => work_cell_twin::NodeKind::Sink,
            "station" => work_cell_twin::NodeKind::Station,
            other => work_cell_twin::NodeKind::Other(other.to_string()),
        }
    }
}
```

</details>
*/
pub trait Node {
    /// Returns the id of the node.
    fn node_id(&self) -> &str;
    /// Returns the kind of the node.
    fn kind(&self) -> NodeKind;
}

/// This trait needs to be implemented by the type that represents a
/// connection between two nodes.
pub trait Edge {
    /// Returns the id of the node the connection starts at.
    fn source(&self) -> &str;
    /// Returns the id of the node the connection ends at.
    fn destination(&self) -> &str;
}

impl<T: Node> Node for &T {
    fn node_id(&self) -> &str {
        (**self).node_id()
    }

    fn kind(&self) -> NodeKind {
        (**self).kind()
    }
}

impl<T: Edge> Edge for &T {
    fn source(&self) -> &str {
        (**self).source()
    }

    fn destination(&self) -> &str {
        (**self).destination()
    }
}
