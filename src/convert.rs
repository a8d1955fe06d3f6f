//! Conversion between graphs and external representations.
//!
//! Three shapes are accepted and produced:
//!
//! - mapping-of-mappings ([`AdjacencyMap`]): outer key = node, inner key =
//!   neighbor, inner value = one attribute record ([`SlotData::Flat`]) or a
//!   key-to-record collection ([`SlotData::Keyed`])
//! - mapping-of-sequences ([`NeighborLists`]): node to neighbor ids, no
//!   attributes
//! - edge sequences (`Vec<EdgeSpec>`): 2/3/4-arity edge tuples
//!
//! The target variant is selected by the `G: GraphBuilder` type parameter.
//! Imports build into a scratch instance and publish only on success, so a
//! failed conversion never yields a partially built graph.

use crate::error::{GraphError, GraphResult};
use crate::graph::attrs::AttrMap;
use crate::graph::types::{EdgeKey, EdgeSpec, NodeKey};
use crate::graph::view::{GraphBuilder, GraphView};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inner value of a mapping-of-mappings: one attribute record
/// (simple-graph shape) or a key-to-record collection (multigraph shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotData {
    Flat(AttrMap),
    Keyed(IndexMap<EdgeKey, AttrMap>),
}

/// Mapping-of-mappings: the adjacency index as owned data.
pub type AdjacencyMap<N> = IndexMap<N, IndexMap<N, SlotData>>;

/// Mapping-of-sequences: node to neighbor ids.
pub type NeighborLists<N> = IndexMap<N, Vec<N>>;

/// One of the accepted external shapes, for shape-generic construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphInput<N: NodeKey> {
    Adjacency(AdjacencyMap<N>),
    Neighbors(NeighborLists<N>),
    Edges(Vec<EdgeSpec<N>>),
}

fn expect_keyed<'a, N: NodeKey>(
    u: &N,
    v: &N,
    slot: &'a SlotData,
) -> GraphResult<&'a IndexMap<EdgeKey, AttrMap>> {
    match slot {
        SlotData::Keyed(entries) => Ok(entries),
        SlotData::Flat(_) => Err(GraphError::InvalidAttributeContainer(format!(
            "slot for {u:?}-{v:?} must be a key-to-record mapping when multigraph_input is set"
        ))),
    }
}

fn expect_flat<'a, N: NodeKey>(u: &N, v: &N, slot: &'a SlotData) -> GraphResult<&'a AttrMap> {
    match slot {
        SlotData::Flat(attrs) => Ok(attrs),
        SlotData::Keyed(_) => Err(GraphError::InvalidAttributeContainer(format!(
            "slot for {u:?}-{v:?} must be a plain attribute record unless multigraph_input is set"
        ))),
    }
}

/// Build a graph from a mapping-of-mappings.
///
/// `multigraph_input` selects the legal inner shape: when set, every inner
/// value must be [`SlotData::Keyed`]; otherwise [`SlotData::Flat`]. A
/// mismatch is an invalid-attribute-container error and no graph is
/// returned.
///
/// Undirected targets visit each unordered pair once (the input carries
/// both orientations), so edges are not inserted twice.
pub fn from_adjacency_map<N: NodeKey, G: GraphBuilder<N>>(
    d: &AdjacencyMap<N>,
    multigraph_input: bool,
) -> GraphResult<G> {
    debug!(rows = d.len(), multigraph_input, "building graph from adjacency mapping");
    let mut g = G::empty();
    for n in d.keys() {
        g.insert_node(n.clone(), AttrMap::new())?;
    }
    if multigraph_input {
        let mut seen: FxHashSet<(N, N)> = FxHashSet::default();
        for (u, row) in d {
            for (v, slot) in row {
                if !g.is_directed() {
                    if seen.contains(&(u.clone(), v.clone())) {
                        continue;
                    }
                    seen.insert((v.clone(), u.clone()));
                }
                let entries = expect_keyed(u, v, slot)?;
                for (key, attrs) in entries {
                    let spec = if g.is_multigraph() {
                        EdgeSpec::WithKey(u.clone(), v.clone(), key.clone(), attrs.clone())
                    } else {
                        // simple target: keys flatten away, records merge
                        EdgeSpec::WithAttrs(u.clone(), v.clone(), attrs.clone())
                    };
                    g.insert_edge(spec)?;
                }
            }
        }
    } else if g.is_multigraph() && !g.is_directed() {
        // both orientations are present in the input; only one may insert,
        // or every edge would double
        let mut seen: FxHashSet<(N, N)> = FxHashSet::default();
        for (u, row) in d {
            for (v, slot) in row {
                if seen.contains(&(u.clone(), v.clone())) {
                    continue;
                }
                let attrs = expect_flat(u, v, slot)?;
                g.insert_edge(EdgeSpec::WithAttrs(u.clone(), v.clone(), attrs.clone()))?;
                seen.insert((v.clone(), u.clone()));
            }
        }
    } else {
        // simple undirected targets absorb the reverse orientation by
        // merging into the same record; directed targets want both
        for (u, row) in d {
            for (v, slot) in row {
                let attrs = expect_flat(u, v, slot)?;
                g.insert_edge(EdgeSpec::WithAttrs(u.clone(), v.clone(), attrs.clone()))?;
            }
        }
    }
    Ok(g)
}

/// Build a graph from a mapping-of-sequences. Attribute records start
/// empty.
pub fn from_neighbor_lists<N: NodeKey, G: GraphBuilder<N>>(
    d: &NeighborLists<N>,
) -> GraphResult<G> {
    debug!(rows = d.len(), "building graph from neighbor lists");
    let mut g = G::empty();
    for n in d.keys() {
        g.insert_node(n.clone(), AttrMap::new())?;
    }
    if g.is_multigraph() && !g.is_directed() {
        // an undirected pair appears in both lists; suppress the reverse
        // duplicate or it would become a parallel edge
        let mut seen: FxHashSet<N> = FxHashSet::default();
        for (node, nbrs) in d {
            for nbr in nbrs {
                if !seen.contains(nbr) {
                    g.insert_edge(EdgeSpec::Pair(node.clone(), nbr.clone()))?;
                }
            }
            seen.insert(node.clone());
        }
    } else {
        for (node, nbrs) in d {
            for nbr in nbrs {
                g.insert_edge(EdgeSpec::Pair(node.clone(), nbr.clone()))?;
            }
        }
    }
    Ok(g)
}

/// Build a graph from an edge sequence.
pub fn from_edges<N, G, I, E>(edges: I) -> GraphResult<G>
where
    N: NodeKey,
    G: GraphBuilder<N>,
    I: IntoIterator<Item = E>,
    E: Into<EdgeSpec<N>>,
{
    let mut g = G::empty();
    for e in edges {
        g.insert_edge(e.into())?;
    }
    Ok(g)
}

/// Build a graph of one variant from any populated graph, copying node,
/// edge and graph attributes. Keyed-vs-flat edge copy logic follows the
/// source's capability flags.
pub fn from_graph<N: NodeKey, S: GraphView<N>, G: GraphBuilder<N>>(source: &S) -> GraphResult<G> {
    let mut g: G = from_adjacency_map(&source.adjacency_rows(), source.is_multigraph())
        .map_err(|e| GraphError::ConversionFailure(format!("input is not a valid graph: {e}")))?;
    for n in source.node_ids() {
        if let Some(handle) = source.node_attr_handle(&n) {
            g.insert_node(n, handle.borrow().clone())?;
        }
    }
    let graph_attrs = g.graph_attr_handle();
    let mut target = graph_attrs.borrow_mut();
    for (k, v) in source.graph_attr_handle().borrow().iter() {
        target.insert(k.clone(), v.clone());
    }
    Ok(g)
}

/// Export the adjacency index as a mapping-of-mappings.
pub fn to_adjacency_map<N: NodeKey, G: GraphView<N>>(g: &G) -> AdjacencyMap<N> {
    g.adjacency_rows()
}

/// Export the adjacency index as a mapping-of-sequences (attributes are
/// dropped; parallel edges collapse to one entry).
pub fn to_neighbor_lists<N: NodeKey, G: GraphView<N>>(g: &G) -> NeighborLists<N> {
    g.adjacency_rows()
        .into_iter()
        .map(|(u, row)| (u, row.into_keys().collect()))
        .collect()
}

/// Export every edge as an owned spec sequence.
pub fn to_edges<N: NodeKey, G: GraphView<N>>(g: &G) -> Vec<EdgeSpec<N>> {
    g.edge_specs()
}

fn fatal(shape: &str, err: GraphError) -> GraphError {
    GraphError::ConversionFailure(format!("input is not a valid {shape}: {err}"))
}

/// Build a graph from any accepted external shape. Failures are fatal: the
/// error describes the shape that was rejected, and no graph is returned.
pub fn build<N: NodeKey, G: GraphBuilder<N>>(
    input: &GraphInput<N>,
    multigraph_input: bool,
) -> GraphResult<G> {
    match input {
        GraphInput::Adjacency(d) => {
            from_adjacency_map(d, multigraph_input).map_err(|e| fatal("adjacency mapping", e))
        }
        GraphInput::Neighbors(d) => {
            from_neighbor_lists(d).map_err(|e| fatal("neighbor-list mapping", e))
        }
        GraphInput::Edges(specs) => {
            from_edges(specs.iter().cloned()).map_err(|e| fatal("edge sequence", e))
        }
    }
}

/// Populate an existing instance from an external shape.
///
/// The target is validated first (a frozen instance is rejected) and is
/// replaced wholesale on success; on failure it is left untouched.
pub fn build_into<N: NodeKey, G: GraphBuilder<N>>(
    input: &GraphInput<N>,
    multigraph_input: bool,
    target: &mut G,
) -> GraphResult<()> {
    if target.is_frozen() {
        return Err(GraphError::FrozenGraphMutation);
    }
    let built: G = build(input, multigraph_input)?;
    *target = built;
    Ok(())
}
