//! Directed simple graph.
//!
//! Twin adjacency maps: successors and predecessors. Each arc is one
//! attribute record installed at `succ[u][v]` and `pred[v][u]`, so the two
//! maps always observe the same record.

use super::attrs::{AttrMap, AttrValue};
use super::storage::DiAdjStorage;
use super::types::{
    detached_attrs, record_weight, shared_attrs, EdgeSpec, NodeKey, SharedAttrs,
};
use super::undirected::Graph;
use super::view::{EdgeRef, GraphBuilder, GraphView};
use crate::convert::{AdjacencyMap, SlotData};
use crate::error::{GraphError, GraphResult};
use tracing::debug;

/// Directed graph without parallel edges. Copy semantics as in
/// [`Graph`](super::undirected::Graph): `copy` is deep, `shallow_copy`
/// shares records, there is no `Clone`.
#[derive(Debug)]
pub struct DiGraph<N: NodeKey> {
    pub(crate) core: DiAdjStorage<N, SharedAttrs>,
    pub(crate) graph: SharedAttrs,
    pub(crate) frozen: bool,
}

impl<N: NodeKey> Default for DiGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> DiGraph<N> {
    /// Create a new empty directed graph
    pub fn new() -> Self {
        DiGraph {
            core: DiAdjStorage::new(),
            graph: shared_attrs(AttrMap::new()),
            frozen: false,
        }
    }

    pub fn name(&self) -> String {
        self.graph
            .borrow()
            .get("name")
            .and_then(AttrValue::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.graph
            .borrow_mut()
            .insert("name".to_string(), AttrValue::Str(name.into()));
    }

    pub fn graph_attrs(&self) -> SharedAttrs {
        self.graph.clone()
    }

    /// Mark the instance read-only. Irreversible.
    pub fn freeze(&mut self) {
        debug!("freezing digraph");
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_directed(&self) -> bool {
        true
    }

    pub fn is_multigraph(&self) -> bool {
        false
    }

    fn check_mutable(&self) -> GraphResult<()> {
        if self.frozen {
            return Err(GraphError::FrozenGraphMutation);
        }
        Ok(())
    }

    // ── Nodes ───────────────────────────────────────────────────────

    pub fn add_node(&mut self, n: N) -> GraphResult<()> {
        self.add_node_with_attrs(n, AttrMap::new())
    }

    pub fn add_node_with_attrs(&mut self, n: N, attrs: AttrMap) -> GraphResult<()> {
        self.check_mutable()?;
        self.core.add_node(n, attrs);
        Ok(())
    }

    pub fn add_nodes_from(&mut self, nodes: impl IntoIterator<Item = N>) -> GraphResult<()> {
        self.check_mutable()?;
        for n in nodes {
            self.core.add_node(n, AttrMap::new());
        }
        Ok(())
    }

    pub fn add_nodes_with_attrs_from(
        &mut self,
        nodes: impl IntoIterator<Item = (N, AttrMap)>,
    ) -> GraphResult<()> {
        self.check_mutable()?;
        for (n, attrs) in nodes {
            self.core.add_node(n, attrs);
        }
        Ok(())
    }

    /// Remove a node and every incoming and outgoing edge.
    pub fn remove_node(&mut self, n: &N) -> GraphResult<()> {
        self.check_mutable()?;
        self.core.remove_node(n)
    }

    /// Best-effort batch removal: missing nodes are silently skipped.
    pub fn remove_nodes_from(&mut self, nodes: impl IntoIterator<Item = N>) -> GraphResult<()> {
        self.check_mutable()?;
        for n in nodes {
            let _ = self.core.remove_node(&n);
        }
        Ok(())
    }

    pub fn has_node(&self, n: &N) -> bool {
        self.core.has_node(n)
    }

    pub fn node_attrs(&self, n: &N) -> Option<SharedAttrs> {
        self.core.node_attrs(n)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.core.nodes.keys()
    }

    pub fn nodes_data(&self) -> Vec<(N, SharedAttrs)> {
        self.core
            .nodes
            .iter()
            .map(|(n, attrs)| (n.clone(), attrs.clone()))
            .collect()
    }

    pub fn number_of_nodes(&self) -> usize {
        self.core.nodes.len()
    }

    // ── Edges ───────────────────────────────────────────────────────

    /// Add the arc u → v, creating either node as needed.
    pub fn add_edge(&mut self, u: N, v: N) -> GraphResult<()> {
        self.add_edge_with_attrs(u, v, AttrMap::new())
    }

    /// Add the arc u → v, merging `attrs` into an existing record.
    pub fn add_edge_with_attrs(&mut self, u: N, v: N, attrs: AttrMap) -> GraphResult<()> {
        self.check_mutable()?;
        self.core.ensure_node(&u);
        self.core.ensure_node(&v);
        let record = match self.core.slot(&u, &v) {
            Some(existing) => {
                existing.borrow_mut().extend(attrs);
                existing.clone()
            }
            None => shared_attrs(attrs),
        };
        self.core.install_slot(&u, &v, record);
        Ok(())
    }

    pub fn add_edges_from<I, E>(&mut self, edges: I) -> GraphResult<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<EdgeSpec<N>>,
    {
        self.check_mutable()?;
        for spec in edges {
            self.apply_edge_spec(spec.into())?;
        }
        Ok(())
    }

    pub fn add_weighted_edges_from(
        &mut self,
        edges: impl IntoIterator<Item = (N, N, f64)>,
    ) -> GraphResult<()> {
        self.check_mutable()?;
        for (u, v, w) in edges {
            let mut attrs = AttrMap::new();
            attrs.insert("weight".to_string(), AttrValue::Float(w));
            self.add_edge_with_attrs(u, v, attrs)?;
        }
        Ok(())
    }

    fn apply_edge_spec(&mut self, spec: EdgeSpec<N>) -> GraphResult<()> {
        match spec {
            EdgeSpec::Pair(u, v) => self.add_edge(u, v),
            EdgeSpec::WithAttrs(u, v, attrs) => self.add_edge_with_attrs(u, v, attrs),
            EdgeSpec::WithKey(u, v, _, _) => Err(GraphError::InvalidEdgeTuple(format!(
                "edge tuple for {u:?}-{v:?} must be a 2-tuple or 3-tuple"
            ))),
        }
    }

    /// Remove the arc u → v.
    pub fn remove_edge(&mut self, u: &N, v: &N) -> GraphResult<()> {
        self.check_mutable()?;
        self.core.remove_slot(u, v).map(|_| ())
    }

    /// Best-effort batch removal: missing arcs are silently skipped.
    pub fn remove_edges_from(&mut self, edges: impl IntoIterator<Item = (N, N)>) -> GraphResult<()> {
        self.check_mutable()?;
        for (u, v) in edges {
            if self.core.slot(&u, &v).is_some() {
                let _ = self.core.remove_slot(&u, &v);
            }
        }
        Ok(())
    }

    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        self.core.slot(u, v).is_some()
    }

    pub fn has_successor(&self, u: &N, v: &N) -> bool {
        self.has_edge(u, v)
    }

    pub fn has_predecessor(&self, u: &N, v: &N) -> bool {
        self.core
            .pred
            .get(u)
            .map_or(false, |row| row.contains_key(v))
    }

    /// Shared handle onto the record of arc u → v. The same record is
    /// observed from the predecessor side.
    pub fn get_edge_data(&self, u: &N, v: &N) -> Option<SharedAttrs> {
        self.core.slot(u, v).cloned()
    }

    /// Successor ids of `n` (alias: neighbors).
    pub fn successors<'a>(&'a self, n: &N) -> GraphResult<impl Iterator<Item = &'a N> + 'a> {
        match self.core.succ.get(n) {
            Some(row) => Ok(row.keys()),
            None => Err(GraphError::node_not_found(n)),
        }
    }

    /// Predecessor ids of `n`.
    pub fn predecessors<'a>(&'a self, n: &N) -> GraphResult<impl Iterator<Item = &'a N> + 'a> {
        match self.core.pred.get(n) {
            Some(row) => Ok(row.keys()),
            None => Err(GraphError::node_not_found(n)),
        }
    }

    /// For a directed graph, neighbors means successors.
    pub fn neighbors<'a>(&'a self, n: &N) -> GraphResult<impl Iterator<Item = &'a N> + 'a> {
        self.successors(n)
    }

    /// Every arc as (source, target).
    pub fn edges(&self) -> Vec<(N, N)> {
        self.core
            .succ
            .iter()
            .flat_map(|(u, row)| row.keys().map(move |v| (u.clone(), v.clone())))
            .collect()
    }

    /// Every arc with a shared handle onto its record.
    pub fn edges_data(&self) -> Vec<(N, N, SharedAttrs)> {
        self.core
            .succ
            .iter()
            .flat_map(|(u, row)| {
                row.iter()
                    .map(move |(v, rec)| (u.clone(), v.clone(), rec.clone()))
            })
            .collect()
    }

    /// Alias of [`DiGraph::edges`].
    pub fn out_edges(&self) -> Vec<(N, N)> {
        self.edges()
    }

    /// Every arc reported from the predecessor index, as (source, target).
    pub fn in_edges(&self) -> Vec<(N, N)> {
        self.core
            .pred
            .iter()
            .flat_map(|(n, row)| row.keys().map(move |nbr| (nbr.clone(), n.clone())))
            .collect()
    }

    /// Incoming arcs of every node with shared record handles.
    pub fn in_edges_data(&self) -> Vec<(N, N, SharedAttrs)> {
        self.core
            .pred
            .iter()
            .flat_map(|(n, row)| {
                row.iter()
                    .map(move |(nbr, rec)| (nbr.clone(), n.clone(), rec.clone()))
            })
            .collect()
    }

    // ── Degrees and counts ──────────────────────────────────────────

    /// |successors| + |predecessors|; a self-loop appears in both maps and
    /// therefore contributes 2.
    pub fn degree(&self, n: &N) -> GraphResult<usize> {
        Ok(self.out_degree(n)? + self.in_degree(n)?)
    }

    pub fn in_degree(&self, n: &N) -> GraphResult<usize> {
        self.core
            .pred
            .get(n)
            .map(|row| row.len())
            .ok_or_else(|| GraphError::node_not_found(n))
    }

    pub fn out_degree(&self, n: &N) -> GraphResult<usize> {
        self.core
            .succ
            .get(n)
            .map(|row| row.len())
            .ok_or_else(|| GraphError::node_not_found(n))
    }

    pub fn degrees(&self) -> Vec<(N, usize)> {
        self.core
            .succ
            .iter()
            .map(|(n, row)| {
                let pred_len = self.core.pred.get(n).map_or(0, |r| r.len());
                (n.clone(), row.len() + pred_len)
            })
            .collect()
    }

    pub fn degree_weighted(&self, n: &N, weight: &str) -> GraphResult<f64> {
        Ok(self.out_degree_weighted(n, weight)? + self.in_degree_weighted(n, weight)?)
    }

    pub fn in_degree_weighted(&self, n: &N, weight: &str) -> GraphResult<f64> {
        let row = self
            .core
            .pred
            .get(n)
            .ok_or_else(|| GraphError::node_not_found(n))?;
        Ok(row.values().map(|rec| record_weight(rec, weight)).sum())
    }

    pub fn out_degree_weighted(&self, n: &N, weight: &str) -> GraphResult<f64> {
        let row = self
            .core
            .succ
            .get(n)
            .ok_or_else(|| GraphError::node_not_found(n))?;
        Ok(row.values().map(|rec| record_weight(rec, weight)).sum())
    }

    /// Number of arcs.
    pub fn size(&self) -> usize {
        self.core.succ.values().map(|row| row.len()).sum()
    }

    pub fn size_weighted(&self, weight: &str) -> f64 {
        self.core
            .succ
            .values()
            .flat_map(|row| row.values())
            .map(|rec| record_weight(rec, weight))
            .sum()
    }

    pub fn number_of_edges(&self) -> usize {
        self.size()
    }

    pub fn number_of_edges_between(&self, u: &N, v: &N) -> usize {
        usize::from(self.has_edge(u, v))
    }

    pub fn nodes_with_selfloops(&self) -> Vec<N> {
        self.core
            .succ
            .iter()
            .filter(|(n, row)| row.contains_key(*n))
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn selfloop_edges(&self) -> Vec<(N, N)> {
        self.nodes_with_selfloops()
            .into_iter()
            .map(|n| (n.clone(), n))
            .collect()
    }

    pub fn number_of_selfloops(&self) -> usize {
        self.nodes_with_selfloops().len()
    }

    pub fn clear(&mut self) -> GraphResult<()> {
        self.check_mutable()?;
        debug!("clearing digraph");
        self.core.clear();
        self.graph.borrow_mut().clear();
        Ok(())
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Deep copy: fresh records, nothing aliased, mutable again.
    pub fn copy(&self) -> Self {
        let mut h = DiGraph::new();
        h.graph = detached_attrs(&self.graph);
        for (n, attrs) in &self.core.nodes {
            h.core.add_node(n.clone(), attrs.borrow().clone());
        }
        for (u, row) in &self.core.succ {
            for (v, rec) in row {
                h.core.install_slot(u, v, detached_attrs(rec));
            }
        }
        h
    }

    /// Structural copy sharing every attribute record with `self`.
    pub fn shallow_copy(&self) -> Self {
        let all: Vec<N> = self.core.nodes.keys().cloned().collect();
        self.subgraph(all)
    }

    /// The subgraph induced on `nbunch ∩ nodes`; records shared by
    /// reference with `self`.
    pub fn subgraph(&self, nbunch: impl IntoIterator<Item = N>) -> Self {
        let mut h = DiGraph::new();
        h.graph = self.graph.clone();
        for n in self.core.filter_existing(nbunch) {
            if let Some(attrs) = self.core.nodes.get(&n) {
                h.core.adopt_node(&n, attrs.clone());
            }
        }
        let kept: Vec<N> = h.core.nodes.keys().cloned().collect();
        for u in &kept {
            if let Some(row) = self.core.succ.get(u) {
                for (v, rec) in row {
                    if h.core.has_node(v) {
                        h.core.install_slot(u, v, rec.clone());
                    }
                }
            }
        }
        h
    }

    /// The subgraph induced by the given arcs; records shared by
    /// reference.
    pub fn edge_subgraph(&self, edges: impl IntoIterator<Item = (N, N)>) -> Self {
        let mut h = DiGraph::new();
        h.graph = self.graph.clone();
        for (u, v) in edges {
            let rec = match self.core.slot(&u, &v) {
                Some(rec) => rec.clone(),
                None => continue,
            };
            for n in [&u, &v] {
                if let Some(attrs) = self.core.nodes.get(n) {
                    h.core.adopt_node(n, attrs.clone());
                }
            }
            h.core.install_slot(&u, &v, rec);
        }
        h
    }

    /// A new digraph with every arc flipped; records deep-copied so the
    /// result never aliases `self`.
    pub fn reverse(&self) -> Self {
        let mut h = DiGraph::new();
        h.graph = detached_attrs(&self.graph);
        for (n, attrs) in &self.core.nodes {
            h.core.add_node(n.clone(), attrs.borrow().clone());
        }
        for (u, row) in &self.core.succ {
            for (v, rec) in row {
                h.core.install_slot(v, u, detached_attrs(rec));
            }
        }
        h
    }

    /// Flip the successor/predecessor roles in place: O(1), same records,
    /// same rows. A view flip, not a structural rebuild.
    pub fn reverse_in_place(&mut self) -> GraphResult<()> {
        self.check_mutable()?;
        self.core.swap_direction();
        Ok(())
    }

    /// Undirected version. With `reciprocal`, only arcs present in both
    /// directions are kept; otherwise the union. Records are deep-copied
    /// either way, and a surviving pair's two records merge into one.
    pub fn to_undirected(&self, reciprocal: bool) -> Graph<N> {
        let mut h = Graph::new();
        h.graph = detached_attrs(&self.graph);
        for (n, attrs) in &self.core.nodes {
            h.core.add_node(n.clone(), attrs.borrow().clone());
        }
        for (u, row) in &self.core.succ {
            for (v, rec) in row {
                if reciprocal {
                    let mutual = self.core.succ.get(v).map_or(false, |r| r.contains_key(u));
                    if !mutual {
                        continue;
                    }
                }
                let record = match h.core.slot(u, v) {
                    Some(existing) => {
                        existing.borrow_mut().extend(rec.borrow().clone());
                        existing.clone()
                    }
                    None => detached_attrs(rec),
                };
                h.core.install_slot(u, v, record);
            }
        }
        h
    }

    /// Deep copy (already directed).
    pub fn to_directed(&self) -> Self {
        self.copy()
    }
}

impl<N: NodeKey> GraphView<N> for DiGraph<N> {
    fn is_directed(&self) -> bool {
        true
    }

    fn is_multigraph(&self) -> bool {
        false
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn node_count(&self) -> usize {
        self.number_of_nodes()
    }

    fn edge_count(&self) -> usize {
        self.size()
    }

    fn contains_node(&self, n: &N) -> bool {
        self.has_node(n)
    }

    fn node_ids(&self) -> Vec<N> {
        self.core.nodes.keys().cloned().collect()
    }

    fn node_attr_handle(&self, n: &N) -> Option<SharedAttrs> {
        self.node_attrs(n)
    }

    fn graph_attr_handle(&self) -> SharedAttrs {
        self.graph.clone()
    }

    fn degree_of(&self, n: &N) -> GraphResult<usize> {
        self.degree(n)
    }

    fn neighbor_ids(&self, n: &N) -> GraphResult<Vec<N>> {
        Ok(self.successors(n)?.cloned().collect())
    }

    fn predecessor_ids(&self, n: &N) -> GraphResult<Vec<N>> {
        Ok(self.predecessors(n)?.cloned().collect())
    }

    fn adjacency_rows(&self) -> AdjacencyMap<N> {
        self.core
            .succ
            .iter()
            .map(|(u, row)| {
                let exported = row
                    .iter()
                    .map(|(v, rec)| (v.clone(), SlotData::Flat(rec.borrow().clone())))
                    .collect();
                (u.clone(), exported)
            })
            .collect()
    }

    fn edge_specs(&self) -> Vec<EdgeSpec<N>> {
        self.edges_data()
            .into_iter()
            .map(|(u, v, rec)| EdgeSpec::WithAttrs(u, v, rec.borrow().clone()))
            .collect()
    }

    fn edge_handles(&self) -> Vec<EdgeRef<N>> {
        self.edges_data()
            .into_iter()
            .map(|(u, v, rec)| EdgeRef {
                source: u,
                target: v,
                key: None,
                attrs: rec,
            })
            .collect()
    }
}

impl<N: NodeKey> GraphBuilder<N> for DiGraph<N> {
    fn empty() -> Self {
        DiGraph::new()
    }

    fn insert_node(&mut self, n: N, attrs: AttrMap) -> GraphResult<()> {
        self.add_node_with_attrs(n, attrs)
    }

    fn insert_edge(&mut self, spec: EdgeSpec<N>) -> GraphResult<()> {
        self.check_mutable()?;
        self.apply_edge_spec(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_arc_record_shared_between_succ_and_pred() {
        let mut g: DiGraph<&str> = DiGraph::new();
        g.add_edge("a", "b").unwrap();

        let via_succ = g.get_edge_data(&"a", &"b").unwrap();
        let via_pred = g
            .in_edges_data()
            .into_iter()
            .find(|(u, v, _)| (*u, *v) == ("a", "b"))
            .map(|(_, _, rec)| rec)
            .unwrap();
        assert!(Rc::ptr_eq(&via_succ, &via_pred));
    }

    #[test]
    fn test_direction_is_respected() {
        let mut g: DiGraph<i32> = DiGraph::new();
        g.add_edge(1, 2).unwrap();
        assert!(g.has_edge(&1, &2));
        assert!(!g.has_edge(&2, &1));
        assert!(g.has_successor(&1, &2));
        assert!(g.has_predecessor(&2, &1));
        assert_eq!(g.out_degree(&1).unwrap(), 1);
        assert_eq!(g.in_degree(&1).unwrap(), 0);
        assert_eq!(g.degree(&1).unwrap(), 1);
    }

    #[test]
    fn test_self_loop_counts_in_both_maps() {
        let mut g: DiGraph<&str> = DiGraph::new();
        g.add_edge("a", "a").unwrap();
        assert_eq!(g.in_degree(&"a").unwrap(), 1);
        assert_eq!(g.out_degree(&"a").unwrap(), 1);
        assert_eq!(g.degree(&"a").unwrap(), 2);
    }

    #[test]
    fn test_remove_node_cleans_both_maps() {
        let mut g: DiGraph<&str> = DiGraph::new();
        g.add_edges_from([("a", "b"), ("c", "a"), ("a", "a")]).unwrap();
        g.remove_node(&"a").unwrap();
        assert_eq!(g.number_of_edges(), 0);
        assert_eq!(g.successors(&"c").unwrap().count(), 0);
        assert_eq!(g.predecessors(&"b").unwrap().count(), 0);
    }

    #[test]
    fn test_reverse_copy_does_not_alias() {
        let mut g: DiGraph<i32> = DiGraph::new();
        let mut attrs = AttrMap::new();
        attrs.insert("w".to_string(), AttrValue::Int(1));
        g.add_edge_with_attrs(1, 2, attrs).unwrap();

        let r = g.reverse();
        assert!(r.has_edge(&2, &1));
        assert!(!r.has_edge(&1, &2));

        r.get_edge_data(&2, &1)
            .unwrap()
            .borrow_mut()
            .insert("w".to_string(), AttrValue::Int(9));
        assert_eq!(
            g.get_edge_data(&1, &2)
                .unwrap()
                .borrow()
                .get("w")
                .and_then(AttrValue::as_int),
            Some(1)
        );
    }

    #[test]
    fn test_reverse_in_place_keeps_records() {
        let mut g: DiGraph<i32> = DiGraph::new();
        g.add_edge(1, 2).unwrap();
        let rec = g.get_edge_data(&1, &2).unwrap();

        g.reverse_in_place().unwrap();
        assert!(g.has_edge(&2, &1));
        assert!(!g.has_edge(&1, &2));
        let flipped = g.get_edge_data(&2, &1).unwrap();
        assert!(Rc::ptr_eq(&rec, &flipped));
    }

    #[test]
    fn test_to_undirected_union_and_reciprocal() {
        let mut g: DiGraph<&str> = DiGraph::new();
        g.add_edges_from([("a", "b"), ("b", "a"), ("b", "c")]).unwrap();

        let union = g.to_undirected(false);
        assert_eq!(union.number_of_edges(), 2);
        assert!(union.has_edge(&"a", &"b"));
        assert!(union.has_edge(&"b", &"c"));

        let mutual = g.to_undirected(true);
        assert_eq!(mutual.number_of_edges(), 1);
        assert!(mutual.has_edge(&"a", &"b"));
        assert!(!mutual.has_edge(&"b", &"c"));
    }

    #[test]
    fn test_to_undirected_deep_copies_records() {
        let mut g: DiGraph<i32> = DiGraph::new();
        g.add_edge(1, 2).unwrap();
        let h = g.to_undirected(false);
        h.get_edge_data(&1, &2)
            .unwrap()
            .borrow_mut()
            .insert("x".to_string(), AttrValue::Bool(true));
        assert!(g.get_edge_data(&1, &2).unwrap().borrow().get("x").is_none());
    }

    #[test]
    fn test_subgraph_shares_records() {
        let mut g: DiGraph<i32> = DiGraph::new();
        g.add_edges_from([(1, 2), (2, 3)]).unwrap();
        let h = g.subgraph([1, 2]);
        assert_eq!(h.edges(), vec![(1, 2)]);
        h.get_edge_data(&1, &2)
            .unwrap()
            .borrow_mut()
            .insert("tag".to_string(), AttrValue::Int(5));
        assert_eq!(
            g.get_edge_data(&1, &2)
                .unwrap()
                .borrow()
                .get("tag")
                .and_then(AttrValue::as_int),
            Some(5)
        );
    }

    #[test]
    fn test_frozen_digraph_rejects_mutation() {
        let mut g: DiGraph<i32> = DiGraph::new();
        g.add_edge(1, 2).unwrap();
        g.freeze();
        assert_eq!(g.add_edge(2, 3), Err(GraphError::FrozenGraphMutation));
        assert_eq!(g.reverse_in_place(), Err(GraphError::FrozenGraphMutation));
    }
}
