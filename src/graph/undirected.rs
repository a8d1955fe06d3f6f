//! Undirected simple graph.
//!
//! One attribute record per unordered node pair, installed at both
//! `adj[u][v]` and `adj[v][u]` (once for self-loops). Re-adding an existing
//! edge merges attributes into the existing record instead of duplicating
//! the edge.

use super::attrs::{AttrMap, AttrValue};
use super::directed::DiGraph;
use super::storage::AdjStorage;
use super::types::{
    detached_attrs, record_weight, shared_attrs, EdgeSpec, NodeKey, SharedAttrs,
};
use super::view::{EdgeRef, GraphBuilder, GraphView};
use crate::convert::{AdjacencyMap, SlotData};
use crate::error::{GraphError, GraphResult};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Undirected graph without parallel edges.
///
/// Node identifiers are any map-key-shaped type; node, edge and graph
/// attributes are shared records ([`SharedAttrs`]) that may be mutated
/// through any handle onto them. There is deliberately no `Clone` impl:
/// use [`Graph::copy`] for an independent deep copy or
/// [`Graph::shallow_copy`] for a record-sharing structural copy.
#[derive(Debug)]
pub struct Graph<N: NodeKey> {
    pub(crate) core: AdjStorage<N, SharedAttrs>,
    pub(crate) graph: SharedAttrs,
    pub(crate) frozen: bool,
}

impl<N: NodeKey> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> Graph<N> {
    /// Create a new empty graph
    pub fn new() -> Self {
        Graph {
            core: AdjStorage::new(),
            graph: shared_attrs(AttrMap::new()),
            frozen: false,
        }
    }

    /// The graph's `name` attribute, empty string when unset.
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

    /// Shared handle onto the graph-level attribute record.
    pub fn graph_attrs(&self) -> SharedAttrs {
        self.graph.clone()
    }

    /// Mark the instance read-only. Irreversible; every structural
    /// mutation afterwards fails with `FrozenGraphMutation`.
    pub fn freeze(&mut self) {
        debug!("freezing graph");
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_directed(&self) -> bool {
        false
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

    /// Add a node with an empty attribute record; a no-op on an existing
    /// node.
    pub fn add_node(&mut self, n: N) -> GraphResult<()> {
        self.add_node_with_attrs(n, AttrMap::new())
    }

    /// Add a node, merging `attrs` into the record of an existing node.
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

    /// Remove a node and every edge incident to it.
    pub fn remove_node(&mut self, n: &N) -> GraphResult<()> {
        self.check_mutable()?;
        self.core.remove_node(n)
    }

    /// Best-effort batch removal: nodes missing from the graph are
    /// silently skipped.
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

    /// Shared handle onto a node's attribute record.
    pub fn node_attrs(&self, n: &N) -> Option<SharedAttrs> {
        self.core.node_attrs(n)
    }

    /// Node ids in insertion order.
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

    /// Add an edge between u and v, creating either node as needed.
    pub fn add_edge(&mut self, u: N, v: N) -> GraphResult<()> {
        self.add_edge_with_attrs(u, v, AttrMap::new())
    }

    /// Add an edge, merging `attrs` into the existing record when the edge
    /// is already present.
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

    /// Add a batch of edges. A malformed element (a keyed tuple, which a
    /// simple graph does not accept) aborts the batch at that element;
    /// earlier elements stay applied.
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

    /// Add edges carrying a numeric `weight` attribute.
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

    /// Remove the edge between u and v (both index entries, one for a
    /// self-loop).
    pub fn remove_edge(&mut self, u: &N, v: &N) -> GraphResult<()> {
        self.check_mutable()?;
        self.core.remove_slot(u, v).map(|_| ())
    }

    /// Best-effort batch removal: missing edges are silently skipped.
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

    /// Shared handle onto the edge's attribute record. Mutations through
    /// it are visible from both directions.
    pub fn get_edge_data(&self, u: &N, v: &N) -> Option<SharedAttrs> {
        self.core.slot(u, v).cloned()
    }

    /// Iterator over the ids adjacent to `n`.
    pub fn neighbors<'a>(&'a self, n: &N) -> GraphResult<impl Iterator<Item = &'a N> + 'a> {
        match self.core.adj.get(n) {
            Some(row) => Ok(row.keys()),
            None => Err(GraphError::node_not_found(n)),
        }
    }

    /// Every edge once, as unordered pairs in row order.
    pub fn edges(&self) -> Vec<(N, N)> {
        let mut seen: FxHashSet<&N> = FxHashSet::default();
        let mut out = Vec::new();
        for (n, row) in &self.core.adj {
            for nbr in row.keys() {
                if !seen.contains(nbr) {
                    out.push((n.clone(), nbr.clone()));
                }
            }
            seen.insert(n);
        }
        out
    }

    /// Every edge once, with a shared handle onto its record.
    pub fn edges_data(&self) -> Vec<(N, N, SharedAttrs)> {
        let mut seen: FxHashSet<&N> = FxHashSet::default();
        let mut out = Vec::new();
        for (n, row) in &self.core.adj {
            for (nbr, rec) in row {
                if !seen.contains(nbr) {
                    out.push((n.clone(), nbr.clone(), rec.clone()));
                }
            }
            seen.insert(n);
        }
        out
    }

    // ── Degrees and counts ──────────────────────────────────────────

    /// Number of edges incident to `n`; a self-loop contributes 2.
    pub fn degree(&self, n: &N) -> GraphResult<usize> {
        let row = self
            .core
            .adj
            .get(n)
            .ok_or_else(|| GraphError::node_not_found(n))?;
        Ok(row.len() + usize::from(row.contains_key(n)))
    }

    /// (node, degree) for every node.
    pub fn degrees(&self) -> Vec<(N, usize)> {
        self.core
            .adj
            .iter()
            .map(|(n, row)| (n.clone(), row.len() + usize::from(row.contains_key(n))))
            .collect()
    }

    /// Sum of the named numeric attribute over incident edges (1.0 when
    /// absent); a self-loop's weight counts twice.
    pub fn degree_weighted(&self, n: &N, weight: &str) -> GraphResult<f64> {
        let row = self
            .core
            .adj
            .get(n)
            .ok_or_else(|| GraphError::node_not_found(n))?;
        let mut total: f64 = row.values().map(|rec| record_weight(rec, weight)).sum();
        if let Some(rec) = row.get(n) {
            total += record_weight(rec, weight);
        }
        Ok(total)
    }

    /// Number of edges.
    pub fn size(&self) -> usize {
        let doubled: usize = self
            .core
            .adj
            .iter()
            .map(|(n, row)| row.len() + usize::from(row.contains_key(n)))
            .sum();
        doubled / 2
    }

    /// Sum of edge weights (named numeric attribute, 1.0 when absent).
    pub fn size_weighted(&self, weight: &str) -> f64 {
        let doubled: f64 = self
            .core
            .adj
            .iter()
            .map(|(n, row)| {
                let mut d: f64 = row.values().map(|rec| record_weight(rec, weight)).sum();
                if let Some(rec) = row.get(n) {
                    d += record_weight(rec, weight);
                }
                d
            })
            .sum();
        doubled / 2.0
    }

    pub fn number_of_edges(&self) -> usize {
        self.size()
    }

    /// 1 when the edge (u, v) exists, else 0.
    pub fn number_of_edges_between(&self, u: &N, v: &N) -> usize {
        usize::from(self.has_edge(u, v))
    }

    pub fn nodes_with_selfloops(&self) -> Vec<N> {
        self.core
            .adj
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

    /// Remove every node, edge and graph attribute.
    pub fn clear(&mut self) -> GraphResult<()> {
        self.check_mutable()?;
        debug!("clearing graph");
        self.core.clear();
        self.graph.borrow_mut().clear();
        Ok(())
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Deep copy: fresh records everywhere, nothing aliased. The copy is
    /// mutable even when `self` is frozen.
    pub fn copy(&self) -> Self {
        let mut h = Graph::new();
        h.graph = detached_attrs(&self.graph);
        for (n, attrs) in &self.core.nodes {
            h.core.nodes.insert(n.clone(), detached_attrs(attrs));
            h.core.adj.insert(n.clone(), IndexMap::new());
        }
        let mut seen: FxHashSet<&N> = FxHashSet::default();
        for (u, row) in &self.core.adj {
            for (v, rec) in row {
                if !seen.contains(v) {
                    h.core.install_slot(u, v, detached_attrs(rec));
                }
            }
            seen.insert(u);
        }
        h
    }

    /// Structural copy sharing every attribute record with `self`.
    pub fn shallow_copy(&self) -> Self {
        let all: Vec<N> = self.core.nodes.keys().cloned().collect();
        self.subgraph(all)
    }

    /// The subgraph induced on `nbunch ∩ nodes`. Node, edge and graph
    /// attribute records are shared with `self` by reference: mutating the
    /// subgraph's records is visible here.
    pub fn subgraph(&self, nbunch: impl IntoIterator<Item = N>) -> Self {
        let mut h = Graph::new();
        h.graph = self.graph.clone();
        for n in self.core.filter_existing(nbunch) {
            if let Some(attrs) = self.core.nodes.get(&n) {
                h.core.adopt_node(&n, attrs.clone());
            }
        }
        let kept: Vec<N> = h.core.nodes.keys().cloned().collect();
        for n in &kept {
            if let Some(row) = self.core.adj.get(n) {
                for (nbr, rec) in row {
                    if h.core.has_node(nbr) {
                        h.core.install_slot(n, nbr, rec.clone());
                    }
                }
            }
        }
        h
    }

    /// The subgraph induced by the given edges; nodes are derived from the
    /// edges that currently exist. Records shared by reference, as in
    /// [`Graph::subgraph`].
    pub fn edge_subgraph(&self, edges: impl IntoIterator<Item = (N, N)>) -> Self {
        let mut h = Graph::new();
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

    /// Directed version: both (u, v) and (v, u) populated, every record
    /// deep-copied so the result never aliases `self`.
    pub fn to_directed(&self) -> DiGraph<N> {
        let mut h = DiGraph::new();
        h.graph = detached_attrs(&self.graph);
        for (n, attrs) in &self.core.nodes {
            h.core.add_node(n.clone(), attrs.borrow().clone());
        }
        for (u, row) in &self.core.adj {
            for (v, rec) in row {
                h.core.install_slot(u, v, detached_attrs(rec));
            }
        }
        h
    }

    /// Deep copy (already undirected).
    pub fn to_undirected(&self) -> Self {
        self.copy()
    }
}

impl<N: NodeKey> GraphView<N> for Graph<N> {
    fn is_directed(&self) -> bool {
        false
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
        Ok(self.neighbors(n)?.cloned().collect())
    }

    fn predecessor_ids(&self, n: &N) -> GraphResult<Vec<N>> {
        self.neighbor_ids(n)
    }

    fn adjacency_rows(&self) -> AdjacencyMap<N> {
        self.core
            .adj
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

impl<N: NodeKey> GraphBuilder<N> for Graph<N> {
    fn empty() -> Self {
        Graph::new()
    }

    fn insert_node(&mut self, n: N, attrs: AttrMap) -> GraphResult<()> {
        self.add_node_with_attrs(n, attrs)
    }

    fn insert_edge(&mut self, spec: EdgeSpec<N>) -> GraphResult<()> {
        self.check_mutable()?;
        self.apply_edge_spec(spec)
    }
}
