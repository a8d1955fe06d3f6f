//! Uniform read/build surfaces over the four graph variants.
//!
//! The conversion layer and the functional helpers do not care which
//! variant they are handed; they work against these two traits. The
//! capability flags replace variant-specific dispatch: code that only
//! supports some variants checks the flags up front and rejects the rest
//! with an explicit error.

use super::attrs::AttrMap;
use super::types::{EdgeKey, EdgeSpec, NodeKey, SharedAttrs};
use crate::convert::AdjacencyMap;
use crate::error::GraphResult;

/// A shared handle onto one edge record, with its location in the index.
///
/// `key` is present for multi-edge variants only.
#[derive(Debug, Clone)]
pub struct EdgeRef<N> {
    pub source: N,
    pub target: N,
    pub key: Option<EdgeKey>,
    pub attrs: SharedAttrs,
}

/// Read surface common to all graph variants.
pub trait GraphView<N: NodeKey> {
    /// Whether edges are ordered pairs.
    fn is_directed(&self) -> bool;

    /// Whether a node pair may hold parallel edges.
    fn is_multigraph(&self) -> bool;

    /// Whether the instance has been marked read-only.
    fn is_frozen(&self) -> bool;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn contains_node(&self, n: &N) -> bool;

    /// Node ids in insertion order.
    fn node_ids(&self) -> Vec<N>;

    /// Shared handle onto a node's attribute record.
    fn node_attr_handle(&self, n: &N) -> Option<SharedAttrs>;

    /// Shared handle onto the graph-level attribute record.
    fn graph_attr_handle(&self) -> SharedAttrs;

    fn degree_of(&self, n: &N) -> GraphResult<usize>;

    /// Adjacent node ids; successors for directed variants.
    fn neighbor_ids(&self, n: &N) -> GraphResult<Vec<N>>;

    /// Predecessor node ids; same as `neighbor_ids` for undirected
    /// variants.
    fn predecessor_ids(&self, n: &N) -> GraphResult<Vec<N>>;

    /// The full adjacency index as an owned mapping-of-mappings, attribute
    /// records copied out. Every node appears as an outer key, isolated
    /// nodes with an empty row.
    fn adjacency_rows(&self) -> AdjacencyMap<N>;

    /// Every edge as an owned spec, one element per parallel edge,
    /// unordered pairs reported once.
    fn edge_specs(&self) -> Vec<EdgeSpec<N>>;

    /// Shared handles onto every edge record (unordered pairs once).
    fn edge_handles(&self) -> Vec<EdgeRef<N>>;
}

/// Mutation surface used to populate a graph from external data.
///
/// Implemented by all four variants; conversion functions are generic over
/// it, which is how the target variant is selected.
pub trait GraphBuilder<N: NodeKey>: GraphView<N> + Sized {
    /// A fresh, empty instance of this variant.
    fn empty() -> Self;

    /// Insert-or-merge a node with the given attribute record.
    fn insert_node(&mut self, n: N, attrs: AttrMap) -> GraphResult<()>;

    /// Insert one edge described by `spec`. Simple variants reject
    /// `EdgeSpec::WithKey` as an invalid tuple; multi variants allocate a
    /// key when the spec carries none.
    fn insert_edge(&mut self, spec: EdgeSpec<N>) -> GraphResult<()>;
}
