// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Work Cell Twin

This is a library for compiling the description of a manufacturing work cell
into a small directed graph model (a "twin"), and for computing steady-state
performance indicators (KPIs) from such a twin.

The twin is the stable intermediate between the two steps.  KPIs can be
computed for twins that were stored earlier, or produced by other tools, as
long as they have the expected shape.

## Compiling instances

An [`InstanceDocument`] describes one production line with a single station.
[`compile_twin`] turns it into a [`TwinDocument`] with three nodes, `SRC`, the
station and `SNK`, connected `SRC -> station -> SNK`.  The station parameters
are copied from the instance, with `setup_time_s` and `scrap_rate_pct`
defaulting to 0.  Quality and data settings are carried along untouched.

The compiler only checks that the fields it reads are present.  Ranges and
enumerations are published by the template [`registry`], and can optionally be
enforced with [`compile_twin_with_config`].

## Computing KPIs

[`compute_kpis`] finds the only station of a twin and computes:

- `throughput_pph`: `(3600 / cycle_time_s) * availability * (1 - scrap_rate)`,
  rounded to two decimals.
- `cycle_time_s`, `availability` and `scrap_rate`, the latter two as
  fractions.
- `bottleneck`: the id of the station.

[`compute_kpi_report`] does both steps for an instance.

## The `Node` and `Edge` traits

[`TwinGraph`] is a validated graph view over any node and connection types
that implement the [`Node`] and [`Edge`] traits.  [`TwinNode`] and
[`TwinEdge`] implement them, and [`validate_twin`] checks that a twin
document:

- has unique node ids and exactly one source node,
- has connections between existing nodes only,
- has no cycles, and every node is reachable from the source,
- has exactly one sink, without successors, and exactly one station, with a
  successor.
*/

mod compiler;
pub use compiler::{compile_twin, compile_twin_with_config};

mod config;
pub use config::CompilerConfig;

mod error;
pub use error::{Error, ErrorKind};

mod evaluator;
pub use evaluator::{compute_kpi_report, compute_kpis};

mod graph;
pub use graph::TwinGraph;

mod graph_traits;
pub use graph_traits::{Edge, Node};

mod instance;
pub use instance::{DataConfig, InstanceDocument, LineConfig, QualityConfig, StationConfig};

mod kpi;
pub use kpi::{KpiRecord, KpiReport};

mod node_kind;
pub use node_kind::{DataMode, NodeKind, StationType};

mod numeric;
pub use numeric::Numeric;

mod templates;
pub use templates::{registry, Template, TemplateRegistry, TemplateSummary};

mod twin;
pub use twin::{
    validate_twin, StationParams, TwinDocument, TwinEdge, TwinNode, SINGLE_STATION_CELL, SINK_ID,
    SOURCE_ID,
};
