//! Undirected multigraph.
//!
//! Each node pair owns one keyed slot holding its parallel edge records.
//! The slot object itself (not each record) is what the two index
//! positions share: `adj[u][v]` and `adj[v][u]` hold the identical slot
//! while it is non-empty, and removing the last key deletes the slot from
//! both sides.

use super::attrs::{AttrMap, AttrValue};
use super::multidigraph::MultiDiGraph;
use super::storage::AdjStorage;
use super::types::{
    detached_attrs, shared_attrs, record_weight, EdgeKey, EdgeSpec, NodeKey, SharedAttrs,
    SharedSlot,
};
use super::view::{EdgeRef, GraphBuilder, GraphView};
use crate::convert::{AdjacencyMap, SlotData};
use crate::error::{GraphError, GraphResult};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

fn fresh_slot() -> SharedSlot {
    Rc::new(RefCell::new(IndexMap::new()))
}

/// Undirected graph allowing parallel edges, distinguished per pair by an
/// [`EdgeKey`]. No `Clone`: use `copy` / `shallow_copy`.
#[derive(Debug)]
pub struct MultiGraph<N: NodeKey> {
    pub(crate) core: AdjStorage<N, SharedSlot>,
    pub(crate) graph: SharedAttrs,
    pub(crate) frozen: bool,
}

impl<N: NodeKey> Default for MultiGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> MultiGraph<N> {
    /// Create a new empty multigraph
    pub fn new() -> Self {
        MultiGraph {
            core: AdjStorage::new(),
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
        debug!("freezing multigraph");
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_directed(&self) -> bool {
        false
    }

    pub fn is_multigraph(&self) -> bool {
        true
    }

    fn check_mutable(&self) -> GraphResult<()> {
        if self.frozen {
            return Err(GraphError::FrozenGraphMutation);
        }
        Ok(())
    }

    // ── Nodes (same bookkeeping as the simple variant) ──────────────

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

    pub fn number_of_nodes(&self) -> usize {
        self.core.nodes.len()
    }

    // ── Edges ───────────────────────────────────────────────────────

    /// Add a parallel edge with an auto-assigned key (smallest unused
    /// non-negative integer for the pair). Returns the key used.
    pub fn add_edge(&mut self, u: N, v: N) -> GraphResult<EdgeKey> {
        self.add_edge_entry(u, v, None, AttrMap::new())
    }

    /// Add a parallel edge with attributes and an auto-assigned key.
    pub fn add_edge_with_attrs(&mut self, u: N, v: N, attrs: AttrMap) -> GraphResult<EdgeKey> {
        self.add_edge_entry(u, v, None, attrs)
    }

    /// Add an edge under an explicit key, merging attributes into the
    /// existing record if the key is already present for the pair.
    pub fn add_edge_keyed(
        &mut self,
        u: N,
        v: N,
        key: EdgeKey,
        attrs: AttrMap,
    ) -> GraphResult<EdgeKey> {
        self.add_edge_entry(u, v, Some(key), attrs)
    }

    fn add_edge_entry(
        &mut self,
        u: N,
        v: N,
        key: Option<EdgeKey>,
        attrs: AttrMap,
    ) -> GraphResult<EdgeKey> {
        self.check_mutable()?;
        self.core.ensure_node(&u);
        self.core.ensure_node(&v);
        if let Some(slot) = self.core.slot(&u, &v) {
            let slot = slot.clone();
            let mut entries = slot.borrow_mut();
            let key = match key {
                Some(k) => k,
                None => EdgeKey::next_unused(&entries),
            };
            match entries.get(&key) {
                Some(existing) => existing.borrow_mut().extend(attrs),
                None => {
                    entries.insert(key.clone(), shared_attrs(attrs));
                }
            }
            Ok(key)
        } else {
            // first edge for the pair: a fresh slot is installed on both
            // sides (self-loops need no special treatment)
            let key = key.unwrap_or(EdgeKey::Int(0));
            let slot = fresh_slot();
            slot.borrow_mut().insert(key.clone(), shared_attrs(attrs));
            self.core.install_slot(&u, &v, slot);
            Ok(key)
        }
    }

    /// Add a batch of edges; keyed 4-tuples are honored, 2/3-tuples get
    /// auto keys. A structural failure aborts at that element.
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

    fn apply_edge_spec(&mut self, spec: EdgeSpec<N>) -> GraphResult<()> {
        match spec {
            EdgeSpec::Pair(u, v) => self.add_edge(u, v).map(|_| ()),
            EdgeSpec::WithAttrs(u, v, attrs) => self.add_edge_with_attrs(u, v, attrs).map(|_| ()),
            EdgeSpec::WithKey(u, v, key, attrs) => {
                self.add_edge_keyed(u, v, key, attrs).map(|_| ())
            }
        }
    }

    /// Remove the last-inserted parallel edge of the pair. Deletes the
    /// emptied slot from both sides.
    pub fn remove_edge(&mut self, u: &N, v: &N) -> GraphResult<()> {
        self.remove_edge_entry(u, v, None)
    }

    /// Remove the parallel edge stored under `key`.
    pub fn remove_edge_keyed(&mut self, u: &N, v: &N, key: &EdgeKey) -> GraphResult<()> {
        self.remove_edge_entry(u, v, Some(key))
    }

    fn remove_edge_entry(&mut self, u: &N, v: &N, key: Option<&EdgeKey>) -> GraphResult<()> {
        self.check_mutable()?;
        let slot = self
            .core
            .slot(u, v)
            .cloned()
            .ok_or_else(|| GraphError::edge_not_found(u, v))?;
        let now_empty = {
            let mut entries = slot.borrow_mut();
            match key {
                None => {
                    entries.pop();
                }
                Some(k) => {
                    if entries.shift_remove(k).is_none() {
                        return Err(GraphError::edge_key_not_found(u, v, k));
                    }
                }
            }
            entries.is_empty()
        };
        if now_empty {
            let _ = self.core.remove_slot(u, v)?;
        }
        Ok(())
    }

    /// Best-effort batch removal; an element may carry an explicit key.
    pub fn remove_edges_from(
        &mut self,
        edges: impl IntoIterator<Item = (N, N, Option<EdgeKey>)>,
    ) -> GraphResult<()> {
        self.check_mutable()?;
        for (u, v, key) in edges {
            let _ = self.remove_edge_entry(&u, &v, key.as_ref());
        }
        Ok(())
    }

    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        self.core.slot(u, v).is_some()
    }

    pub fn has_edge_keyed(&self, u: &N, v: &N, key: &EdgeKey) -> bool {
        self.core
            .slot(u, v)
            .map_or(false, |slot| slot.borrow().contains_key(key))
    }

    /// Shared handle onto the whole keyed slot for the pair.
    pub fn get_edge_data(&self, u: &N, v: &N) -> Option<SharedSlot> {
        self.core.slot(u, v).cloned()
    }

    /// Shared handle onto one parallel edge's record.
    pub fn get_edge_data_keyed(&self, u: &N, v: &N, key: &EdgeKey) -> Option<SharedAttrs> {
        self.core
            .slot(u, v)
            .and_then(|slot| slot.borrow().get(key).cloned())
    }

    pub fn neighbors<'a>(&'a self, n: &N) -> GraphResult<impl Iterator<Item = &'a N> + 'a> {
        match self.core.adj.get(n) {
            Some(row) => Ok(row.keys()),
            None => Err(GraphError::node_not_found(n)),
        }
    }

    /// Every parallel edge once, as (u, v) pairs.
    pub fn edges(&self) -> Vec<(N, N)> {
        self.edges_keyed()
            .into_iter()
            .map(|(u, v, _)| (u, v))
            .collect()
    }

    /// Every parallel edge once, with its key.
    pub fn edges_keyed(&self) -> Vec<(N, N, EdgeKey)> {
        let mut seen: FxHashSet<&N> = FxHashSet::default();
        let mut out = Vec::new();
        for (n, row) in &self.core.adj {
            for (nbr, slot) in row {
                if !seen.contains(nbr) {
                    for key in slot.borrow().keys() {
                        out.push((n.clone(), nbr.clone(), key.clone()));
                    }
                }
            }
            seen.insert(n);
        }
        out
    }

    /// Every parallel edge once, with key and a shared record handle.
    pub fn edges_data(&self) -> Vec<(N, N, EdgeKey, SharedAttrs)> {
        let mut seen: FxHashSet<&N> = FxHashSet::default();
        let mut out = Vec::new();
        for (n, row) in &self.core.adj {
            for (nbr, slot) in row {
                if !seen.contains(nbr) {
                    for (key, rec) in slot.borrow().iter() {
                        out.push((n.clone(), nbr.clone(), key.clone(), rec.clone()));
                    }
                }
            }
            seen.insert(n);
        }
        out
    }

    // ── Degrees and counts ──────────────────────────────────────────

    /// Number of incident parallel edges; self-loop slots count twice.
    pub fn degree(&self, n: &N) -> GraphResult<usize> {
        let row = self
            .core
            .adj
            .get(n)
            .ok_or_else(|| GraphError::node_not_found(n))?;
        let mut d: usize = row.values().map(|slot| slot.borrow().len()).sum();
        if let Some(slot) = row.get(n) {
            d += slot.borrow().len();
        }
        Ok(d)
    }

    pub fn degrees(&self) -> Vec<(N, usize)> {
        self.core
            .adj
            .iter()
            .map(|(n, row)| {
                let mut d: usize = row.values().map(|slot| slot.borrow().len()).sum();
                if let Some(slot) = row.get(n) {
                    d += slot.borrow().len();
                }
                (n.clone(), d)
            })
            .collect()
    }

    /// Weighted degree over all incident parallel edges, self-loop weights
    /// counted twice.
    pub fn degree_weighted(&self, n: &N, weight: &str) -> GraphResult<f64> {
        let row = self
            .core
            .adj
            .get(n)
            .ok_or_else(|| GraphError::node_not_found(n))?;
        let sum_slot = |slot: &SharedSlot| -> f64 {
            slot.borrow()
                .values()
                .map(|rec| record_weight(rec, weight))
                .sum()
        };
        let mut total: f64 = row.values().map(sum_slot).sum();
        if let Some(slot) = row.get(n) {
            total += sum_slot(slot);
        }
        Ok(total)
    }

    /// Number of edges, parallel edges counted individually.
    pub fn size(&self) -> usize {
        let doubled: usize = self
            .degrees()
            .into_iter()
            .map(|(_, d)| d)
            .sum();
        doubled / 2
    }

    pub fn number_of_edges(&self) -> usize {
        self.size()
    }

    /// Number of parallel edges between u and v (the slot size).
    pub fn number_of_edges_between(&self, u: &N, v: &N) -> usize {
        self.core.slot(u, v).map_or(0, |slot| slot.borrow().len())
    }

    pub fn nodes_with_selfloops(&self) -> Vec<N> {
        self.core
            .adj
            .iter()
            .filter(|(n, row)| row.contains_key(*n))
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn selfloop_edges(&self) -> Vec<(N, N, EdgeKey)> {
        let mut out = Vec::new();
        for (n, row) in &self.core.adj {
            if let Some(slot) = row.get(n) {
                for key in slot.borrow().keys() {
                    out.push((n.clone(), n.clone(), key.clone()));
                }
            }
        }
        out
    }

    pub fn number_of_selfloops(&self) -> usize {
        self.selfloop_edges().len()
    }

    pub fn clear(&mut self) -> GraphResult<()> {
        self.check_mutable()?;
        debug!("clearing multigraph");
        self.core.clear();
        self.graph.borrow_mut().clear();
        Ok(())
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Deep copy: fresh slots and fresh records, mutable again.
    pub fn copy(&self) -> Self {
        let mut h = MultiGraph::new();
        h.graph = detached_attrs(&self.graph);
        for (n, attrs) in &self.core.nodes {
            h.core.add_node(n.clone(), attrs.borrow().clone());
        }
        let mut seen: FxHashSet<&N> = FxHashSet::default();
        for (u, row) in &self.core.adj {
            for (v, slot) in row {
                if !seen.contains(v) {
                    let copied = fresh_slot();
                    for (key, rec) in slot.borrow().iter() {
                        copied
                            .borrow_mut()
                            .insert(key.clone(), detached_attrs(rec));
                    }
                    h.core.install_slot(u, v, copied);
                }
            }
            seen.insert(u);
        }
        h
    }

    /// Structural copy sharing every edge record with `self` (slots are
    /// fresh objects, the records inside are shared).
    pub fn shallow_copy(&self) -> Self {
        let all: Vec<N> = self.core.nodes.keys().cloned().collect();
        self.subgraph(all)
    }

    /// The subgraph induced on `nbunch ∩ nodes`. Each retained pair gets a
    /// fresh slot shared between its two sides; the records inside alias
    /// the parent's.
    pub fn subgraph(&self, nbunch: impl IntoIterator<Item = N>) -> Self {
        let mut h = MultiGraph::new();
        h.graph = self.graph.clone();
        for n in self.core.filter_existing(nbunch) {
            if let Some(attrs) = self.core.nodes.get(&n) {
                h.core.adopt_node(&n, attrs.clone());
            }
        }
        let kept: Vec<N> = h.core.nodes.keys().cloned().collect();
        for n in &kept {
            if let Some(row) = self.core.adj.get(n) {
                for (nbr, slot) in row {
                    if h.core.has_node(nbr) && h.core.slot(n, nbr).is_none() {
                        let copied = fresh_slot();
                        for (key, rec) in slot.borrow().iter() {
                            copied.borrow_mut().insert(key.clone(), rec.clone());
                        }
                        h.core.install_slot(n, nbr, copied);
                    }
                }
            }
        }
        h
    }

    /// The subgraph induced by the given (u, v, key) triples; records
    /// shared with the parent, one slot object per retained pair.
    pub fn edge_subgraph(
        &self,
        edges: impl IntoIterator<Item = (N, N, EdgeKey)>,
    ) -> Self {
        let mut h = MultiGraph::new();
        h.graph = self.graph.clone();
        for (u, v, key) in edges {
            let rec = match self
                .core
                .slot(&u, &v)
                .and_then(|slot| slot.borrow().get(&key).cloned())
            {
                Some(rec) => rec,
                None => continue,
            };
            for n in [&u, &v] {
                if let Some(attrs) = self.core.nodes.get(n) {
                    h.core.adopt_node(n, attrs.clone());
                }
            }
            let slot = match h.core.slot(&u, &v) {
                Some(slot) => slot.clone(),
                None => {
                    let slot = fresh_slot();
                    h.core.install_slot(&u, &v, slot.clone());
                    slot
                }
            };
            slot.borrow_mut().insert(key, rec);
        }
        h
    }

    /// Directed version: every parallel edge populated in both directions
    /// under its key, records deep-copied.
    pub fn to_directed(&self) -> MultiDiGraph<N> {
        let mut h = MultiDiGraph::new();
        h.graph = detached_attrs(&self.graph);
        for (n, attrs) in &self.core.nodes {
            h.core.add_node(n.clone(), attrs.borrow().clone());
        }
        for (u, row) in &self.core.adj {
            for (v, slot) in row {
                let copied = fresh_slot();
                for (key, rec) in slot.borrow().iter() {
                    copied
                        .borrow_mut()
                        .insert(key.clone(), detached_attrs(rec));
                }
                h.core.install_slot(u, v, copied);
            }
        }
        h
    }

    /// Deep copy (already undirected).
    pub fn to_undirected(&self) -> Self {
        self.copy()
    }
}

impl<N: NodeKey> GraphView<N> for MultiGraph<N> {
    fn is_directed(&self) -> bool {
        false
    }

    fn is_multigraph(&self) -> bool {
        true
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
                    .map(|(v, slot)| {
                        let keyed = slot
                            .borrow()
                            .iter()
                            .map(|(key, rec)| (key.clone(), rec.borrow().clone()))
                            .collect();
                        (v.clone(), SlotData::Keyed(keyed))
                    })
                    .collect();
                (u.clone(), exported)
            })
            .collect()
    }

    fn edge_specs(&self) -> Vec<EdgeSpec<N>> {
        self.edges_data()
            .into_iter()
            .map(|(u, v, key, rec)| EdgeSpec::WithKey(u, v, key, rec.borrow().clone()))
            .collect()
    }

    fn edge_handles(&self) -> Vec<EdgeRef<N>> {
        self.edges_data()
            .into_iter()
            .map(|(u, v, key, rec)| EdgeRef {
                source: u,
                target: v,
                key: Some(key),
                attrs: rec,
            })
            .collect()
    }
}

impl<N: NodeKey> GraphBuilder<N> for MultiGraph<N> {
    fn empty() -> Self {
        MultiGraph::new()
    }

    fn insert_node(&mut self, n: N, attrs: AttrMap) -> GraphResult<()> {
        self.add_node_with_attrs(n, attrs)
    }

    fn insert_edge(&mut self, spec: EdgeSpec<N>) -> GraphResult<()> {
        self.check_mutable()?;
        self.apply_edge_spec(spec)
    }
}
