// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the twin compiler.

/// Configuration options for
/// [`compile_twin_with_config`][crate::compile_twin_with_config].
///
/// The default configuration compiles exactly like
/// [`compile_twin`][crate::compile_twin]: only presence checks on the fields
/// the compiler reads.
#[derive(Clone, Default, Debug)]
pub struct CompilerConfig {
    /// Whether to check the instance against the registered template schema
    /// before compiling.  Out-of-range numbers and unknown enumeration values
    /// are rejected with `InvalidField`.
    pub validate_ranges: bool,

    /// Whether to run the structural graph checks on the compiled twin.  This
    /// rejects station ids that collide with the `SRC` or `SNK` nodes.
    pub validate_topology: bool,
}
