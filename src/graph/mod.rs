//! The in-memory graph data model.
//!
//! Four variants over one adjacency-list representation:
//! - [`Graph`]: undirected, one edge per node pair
//! - [`DiGraph`]: directed, one arc per ordered pair
//! - [`MultiGraph`]: undirected, keyed parallel edges
//! - [`MultiDiGraph`]: directed, keyed parallel edges
//!
//! An edge is one attribute record referenced from two index positions;
//! see [`types`] for the shared-handle machinery and [`view`] for the
//! uniform surfaces the conversion layer builds against.

pub mod attrs;
pub mod directed;
pub mod multidigraph;
pub mod multigraph;
pub(crate) mod storage;
pub mod types;
pub mod undirected;
pub mod view;

// Re-export main types
pub use attrs::{AttrMap, AttrValue};
pub use directed::DiGraph;
pub use multidigraph::MultiDiGraph;
pub use multigraph::MultiGraph;
pub use types::{detached_attrs, shared_attrs, EdgeKey, EdgeSpec, NodeKey, SharedAttrs, SharedSlot};
pub use undirected::Graph;
pub use view::{EdgeRef, GraphBuilder, GraphView};
