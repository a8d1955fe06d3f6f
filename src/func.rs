//! Functional helpers over the uniform graph surfaces.
//!
//! Everything here is generic over [`GraphView`] / [`GraphBuilder`], so it
//! works with all four variants. Helpers that only make sense for some
//! variants check the capability flags and reject the rest.

use crate::error::{GraphError, GraphResult};
use crate::graph::attrs::AttrValue;
use crate::graph::types::{EdgeKey, EdgeSpec, NodeKey};
use crate::graph::view::{GraphBuilder, GraphView};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Edge count over the maximum possible for the node count; undirected
/// graphs scale by 2. Zero for empty or single-node graphs.
pub fn density<N: NodeKey, G: GraphView<N>>(g: &G) -> f64 {
    let n = g.node_count() as f64;
    let m = g.edge_count() as f64;
    if m == 0.0 || n <= 1.0 {
        return 0.0;
    }
    let mut d = m / (n * (n - 1.0));
    if !g.is_directed() {
        d *= 2.0;
    }
    d
}

/// `result[d]` = number of nodes with degree d.
pub fn degree_histogram<N: NodeKey, G: GraphView<N>>(g: &G) -> GraphResult<Vec<usize>> {
    let mut counts: Vec<usize> = Vec::new();
    for n in g.node_ids() {
        let d = g.degree_of(&n)?;
        if d >= counts.len() {
            counts.resize(d + 1, 0);
        }
        counts[d] += 1;
    }
    Ok(counts)
}

/// A graph with no edges is empty, regardless of node count.
pub fn is_empty<N: NodeKey, G: GraphView<N>>(g: &G) -> bool {
    g.edge_count() == 0
}

/// Neighbors in either direction: predecessors then successors for
/// directed variants, plain neighbors otherwise.
pub fn all_neighbors<N: NodeKey, G: GraphView<N>>(g: &G, n: &N) -> GraphResult<Vec<N>> {
    if g.is_directed() {
        let mut out = g.predecessor_ids(n)?;
        out.extend(g.neighbor_ids(n)?);
        Ok(out)
    } else {
        g.neighbor_ids(n)
    }
}

/// Nodes adjacent to both u and v, excluding u and v themselves.
/// Undirected variants only.
pub fn common_neighbors<N: NodeKey, G: GraphView<N>>(g: &G, u: &N, v: &N) -> GraphResult<Vec<N>> {
    if g.is_directed() {
        return Err(GraphError::UnsupportedOperation(
            "common_neighbors is not defined for directed graphs".to_string(),
        ));
    }
    if !g.contains_node(u) {
        return Err(GraphError::node_not_found(u));
    }
    if !g.contains_node(v) {
        return Err(GraphError::node_not_found(v));
    }
    let v_nbrs: FxHashSet<N> = g.neighbor_ids(v)?.into_iter().collect();
    Ok(g
        .neighbor_ids(u)?
        .into_iter()
        .filter(|w| v_nbrs.contains(w) && w != u && w != v)
        .collect())
}

/// Set one attribute to the same value on every node.
pub fn set_node_attrs<N: NodeKey, G: GraphView<N>>(g: &G, name: &str, value: AttrValue) {
    for n in g.node_ids() {
        if let Some(handle) = g.node_attr_handle(&n) {
            handle.borrow_mut().insert(name.to_string(), value.clone());
        }
    }
}

/// Collect the named attribute from every node that carries it.
pub fn get_node_attrs<N: NodeKey, G: GraphView<N>>(g: &G, name: &str) -> IndexMap<N, AttrValue> {
    let mut out = IndexMap::new();
    for n in g.node_ids() {
        if let Some(handle) = g.node_attr_handle(&n) {
            if let Some(value) = handle.borrow().get(name) {
                out.insert(n, value.clone());
            }
        }
    }
    out
}

/// Set one attribute to the same value on every edge record.
pub fn set_edge_attrs<N: NodeKey, G: GraphView<N>>(g: &G, name: &str, value: AttrValue) {
    for edge in g.edge_handles() {
        edge.attrs
            .borrow_mut()
            .insert(name.to_string(), value.clone());
    }
}

/// Collect the named attribute from every edge record that carries it,
/// keyed by (source, target, edge key).
pub fn get_edge_attrs<N: NodeKey, G: GraphView<N>>(
    g: &G,
    name: &str,
) -> Vec<(N, N, Option<EdgeKey>, AttrValue)> {
    let mut out = Vec::new();
    for edge in g.edge_handles() {
        if let Some(value) = edge.attrs.borrow().get(name) {
            out.push((edge.source, edge.target, edge.key, value.clone()));
        }
    }
    out
}

/// True when every edge carries the named attribute. An edgeless graph is
/// not weighted.
pub fn is_weighted<N: NodeKey, G: GraphView<N>>(g: &G, weight: &str) -> bool {
    let handles = g.edge_handles();
    if handles.is_empty() {
        return false;
    }
    handles
        .iter()
        .all(|edge| edge.attrs.borrow().contains_key(weight))
}

/// True when any edge carries a negative numeric value under the named
/// attribute.
pub fn is_negatively_weighted<N: NodeKey, G: GraphView<N>>(g: &G, weight: &str) -> bool {
    g.edge_handles().iter().any(|edge| {
        edge.attrs
            .borrow()
            .get(weight)
            .and_then(AttrValue::as_number)
            .map_or(false, |w| w < 0.0)
    })
}

/// Connect the first node to every following node.
pub fn add_star<N: NodeKey, G: GraphBuilder<N>>(
    g: &mut G,
    nodes: impl IntoIterator<Item = N>,
) -> GraphResult<()> {
    let mut iter = nodes.into_iter();
    let hub = match iter.next() {
        Some(hub) => hub,
        None => return Ok(()),
    };
    for n in iter {
        g.insert_edge(EdgeSpec::Pair(hub.clone(), n))?;
    }
    Ok(())
}

/// Connect consecutive nodes into a path.
pub fn add_path<N: NodeKey, G: GraphBuilder<N>>(
    g: &mut G,
    nodes: impl IntoIterator<Item = N>,
) -> GraphResult<()> {
    let mut iter = nodes.into_iter();
    let mut prev = match iter.next() {
        Some(first) => first,
        None => return Ok(()),
    };
    for n in iter {
        g.insert_edge(EdgeSpec::Pair(prev, n.clone()))?;
        prev = n;
    }
    Ok(())
}

/// Connect consecutive nodes and close the loop back to the first. A
/// single node yields a self-loop.
pub fn add_cycle<N: NodeKey, G: GraphBuilder<N>>(
    g: &mut G,
    nodes: impl IntoIterator<Item = N>,
) -> GraphResult<()> {
    let mut iter = nodes.into_iter();
    let first = match iter.next() {
        Some(first) => first,
        None => return Ok(()),
    };
    let mut prev = first.clone();
    for n in iter {
        g.insert_edge(EdgeSpec::Pair(prev, n.clone()))?;
        prev = n;
    }
    g.insert_edge(EdgeSpec::Pair(prev, first))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiGraph, Graph, MultiGraph};

    #[test]
    fn test_density() {
        let mut g: Graph<i32> = Graph::new();
        g.add_edges_from([(1, 2), (2, 3)]).unwrap();
        // 2 edges of 3 possible
        assert!((density(&g) - 2.0 / 3.0).abs() < 1e-12);

        let mut d: DiGraph<i32> = DiGraph::new();
        d.add_edges_from([(1, 2), (2, 1)]).unwrap();
        assert!((density(&d) - 1.0).abs() < 1e-12);

        let empty: Graph<i32> = Graph::new();
        assert_eq!(density(&empty), 0.0);
    }

    #[test]
    fn test_degree_histogram() {
        let mut g: Graph<&str> = Graph::new();
        add_star(&mut g, ["c", "x", "y", "z"]).unwrap();
        // three leaves of degree 1, one hub of degree 3
        assert_eq!(degree_histogram(&g).unwrap(), vec![0, 3, 0, 1]);
    }

    #[test]
    fn test_is_empty_ignores_isolated_nodes() {
        let mut g: Graph<i32> = Graph::new();
        g.add_node(1).unwrap();
        assert!(is_empty(&g));
        g.add_edge(1, 2).unwrap();
        assert!(!is_empty(&g));
    }

    #[test]
    fn test_all_neighbors_directed() {
        let mut g: DiGraph<&str> = DiGraph::new();
        g.add_edges_from([("a", "b"), ("c", "b")]).unwrap();
        let mut nbrs = all_neighbors(&g, &"b").unwrap();
        nbrs.sort();
        assert_eq!(nbrs, vec!["a", "c"]);
    }

    #[test]
    fn test_common_neighbors_guard() {
        let mut g: DiGraph<i32> = DiGraph::new();
        g.add_edge(1, 2).unwrap();
        assert!(matches!(
            common_neighbors(&g, &1, &2),
            Err(GraphError::UnsupportedOperation(_))
        ));

        let mut u: Graph<i32> = Graph::new();
        u.add_edges_from([(1, 3), (2, 3), (1, 2)]).unwrap();
        assert_eq!(common_neighbors(&u, &1, &2).unwrap(), vec![3]);
        assert!(matches!(
            common_neighbors(&u, &1, &99),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_node_and_edge_attr_helpers() {
        let mut g: Graph<&str> = Graph::new();
        g.add_edges_from([("a", "b"), ("b", "c")]).unwrap();

        set_node_attrs(&g, "layer", AttrValue::Int(1));
        let layers = get_node_attrs(&g, "layer");
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[&"a"], AttrValue::Int(1));

        set_edge_attrs(&g, "capacity", AttrValue::Int(10));
        let caps = get_edge_attrs(&g, "capacity");
        assert_eq!(caps.len(), 2);
        assert!(caps.iter().all(|(_, _, key, v)| key.is_none() && *v == AttrValue::Int(10)));
    }

    #[test]
    fn test_weight_predicates() {
        let mut g: Graph<&str> = Graph::new();
        assert!(!is_weighted(&g, "weight"));
        g.add_weighted_edges_from([("a", "b", 2.0)]).unwrap();
        assert!(is_weighted(&g, "weight"));
        assert!(!is_negatively_weighted(&g, "weight"));
        g.add_weighted_edges_from([("b", "c", -1.0)]).unwrap();
        assert!(is_negatively_weighted(&g, "weight"));
        g.add_edge("c", "d").unwrap();
        assert!(!is_weighted(&g, "weight"));
    }

    #[test]
    fn test_add_path_and_cycle() {
        let mut g: Graph<i32> = Graph::new();
        add_path(&mut g, [1, 2, 3, 4]).unwrap();
        assert_eq!(g.number_of_edges(), 3);

        let mut c: Graph<i32> = Graph::new();
        add_cycle(&mut c, [1, 2, 3]).unwrap();
        assert_eq!(c.number_of_edges(), 3);
        assert!(c.has_edge(&3, &1));

        let mut loop_graph: MultiGraph<i32> = MultiGraph::new();
        add_cycle(&mut loop_graph, [7]).unwrap();
        assert_eq!(loop_graph.degree(&7).unwrap(), 2);
    }

    #[test]
    fn test_add_star_empty_input() {
        let mut g: Graph<i32> = Graph::new();
        add_star(&mut g, []).unwrap();
        assert_eq!(g.number_of_nodes(), 0);
    }
}
