//! Jala
//!
//! An in-memory property graph data model. Four variants share one
//! adjacency-list representation:
//!
//! - [`Graph`]: undirected, one edge per node pair
//! - [`DiGraph`]: directed, one arc per ordered pair
//! - [`MultiGraph`]: undirected, keyed parallel edges
//! - [`MultiDiGraph`]: directed, keyed parallel edges
//!
//! An edge is physically one attribute record referenced from two index
//! positions (u→v and v→u, or successor/predecessor). The record is a
//! shared handle ([`SharedAttrs`]); mutating it through either position is
//! visible through the other. Derived views (`subgraph`, `edge_subgraph`)
//! deliberately alias the parent's records, while directional conversions
//! (`to_directed`, `to_undirected`, `reverse`) deep-copy.
//!
//! The [`convert`] module normalizes external representations
//! (mapping-of-mappings, mapping-of-sequences, edge-tuple sequences) into
//! any variant and exports them back; [`func`] carries the functional
//! helpers.
//!
//! # Example
//!
//! ```
//! use jala::{AttrValue, Graph};
//!
//! let mut g = Graph::new();
//! g.add_edge("alice", "bob")?;
//! g.add_edge("bob", "carol")?;
//!
//! assert_eq!(g.number_of_nodes(), 3);
//! assert_eq!(g.degree(&"bob")?, 2);
//!
//! // the edge record is shared between both directions
//! let record = g.get_edge_data(&"alice", &"bob").unwrap();
//! record.borrow_mut().insert("since".to_string(), AttrValue::Int(2019));
//! let reverse = g.get_edge_data(&"bob", &"alice").unwrap();
//! assert_eq!(reverse.borrow().get("since").and_then(AttrValue::as_int), Some(2019));
//! # Ok::<(), jala::GraphError>(())
//! ```

pub mod convert;
pub mod error;
pub mod func;
pub mod graph;

pub use error::{GraphError, GraphResult};
pub use graph::{
    AttrMap, AttrValue, DiGraph, EdgeKey, EdgeRef, EdgeSpec, Graph, GraphBuilder, GraphView,
    MultiDiGraph, MultiGraph, NodeKey, SharedAttrs, SharedSlot,
};
