//! Adjacency-list storage shared by the four graph variants.
//!
//! Node bookkeeping is identical across variants; only the slot type held
//! per neighbor differs (one shared record for simple graphs, a shared
//! keyed collection for multigraphs). The two structs here are generic over
//! that slot type so each concern is written once:
//!
//! - [`AdjStorage`]: node store + one symmetric adjacency index
//! - [`DiAdjStorage`]: node store + twin successor/predecessor indexes
//!
//! A node is present in the node store iff it owns a row in every adjacency
//! index; every method here preserves that bijection.

use super::attrs::AttrMap;
use super::types::{shared_attrs, NodeKey, SharedAttrs};
use crate::error::{GraphError, GraphResult};
use indexmap::IndexMap;

/// Node store plus a single symmetric adjacency index.
#[derive(Debug, Clone)]
pub(crate) struct AdjStorage<N: NodeKey, S: Clone> {
    pub(crate) nodes: IndexMap<N, SharedAttrs>,
    pub(crate) adj: IndexMap<N, IndexMap<N, S>>,
}

impl<N: NodeKey, S: Clone> AdjStorage<N, S> {
    pub(crate) fn new() -> Self {
        AdjStorage {
            nodes: IndexMap::new(),
            adj: IndexMap::new(),
        }
    }

    /// Create `n` with an empty attribute record if it is absent.
    pub(crate) fn ensure_node(&mut self, n: &N) {
        if !self.nodes.contains_key(n) {
            self.nodes.insert(n.clone(), shared_attrs(AttrMap::new()));
            self.adj.insert(n.clone(), IndexMap::new());
        }
    }

    /// Insert-or-merge: attrs are merged into the record of an existing
    /// node rather than replacing it.
    pub(crate) fn add_node(&mut self, n: N, attrs: AttrMap) {
        match self.nodes.get(&n) {
            Some(existing) => existing.borrow_mut().extend(attrs),
            None => {
                self.adj.insert(n.clone(), IndexMap::new());
                self.nodes.insert(n, shared_attrs(attrs));
            }
        }
    }

    /// Register `n` with an already-shared attribute record (used by the
    /// derived views, which alias the parent's node records).
    pub(crate) fn adopt_node(&mut self, n: &N, attrs: SharedAttrs) {
        if !self.nodes.contains_key(n) {
            self.nodes.insert(n.clone(), attrs);
            self.adj.insert(n.clone(), IndexMap::new());
        }
    }

    /// Remove `n` and every adjacency slot naming it on either side.
    pub(crate) fn remove_node(&mut self, n: &N) -> GraphResult<()> {
        if self.nodes.shift_remove(n).is_none() {
            return Err(GraphError::node_not_found(n));
        }
        // snapshot the neighbor set before mutating the rows it points at
        let nbrs: Vec<N> = self
            .adj
            .get(n)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        for u in &nbrs {
            if u != n {
                if let Some(row) = self.adj.get_mut(u) {
                    row.shift_remove(n);
                }
            }
        }
        self.adj.shift_remove(n);
        Ok(())
    }

    pub(crate) fn has_node(&self, n: &N) -> bool {
        self.nodes.contains_key(n)
    }

    pub(crate) fn node_attrs(&self, n: &N) -> Option<SharedAttrs> {
        self.nodes.get(n).cloned()
    }

    pub(crate) fn slot(&self, u: &N, v: &N) -> Option<&S> {
        self.adj.get(u).and_then(|row| row.get(v))
    }

    /// Install the same slot at both index positions (once for self-loops).
    pub(crate) fn install_slot(&mut self, u: &N, v: &N, slot: S) {
        if let Some(row) = self.adj.get_mut(u) {
            row.insert(v.clone(), slot.clone());
        }
        if u != v {
            if let Some(row) = self.adj.get_mut(v) {
                row.insert(u.clone(), slot);
            }
        }
    }

    /// Delete both index entries for (u, v). Errors if the slot is absent.
    pub(crate) fn remove_slot(&mut self, u: &N, v: &N) -> GraphResult<S> {
        let removed = self
            .adj
            .get_mut(u)
            .and_then(|row| row.shift_remove(v))
            .ok_or_else(|| GraphError::edge_not_found(u, v))?;
        if u != v {
            if let Some(row) = self.adj.get_mut(v) {
                row.shift_remove(u);
            }
        }
        Ok(removed)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.adj.clear();
    }

    /// Filter a node-set specifier down to nodes actually present.
    pub(crate) fn filter_existing(&self, nbunch: impl IntoIterator<Item = N>) -> Vec<N> {
        nbunch
            .into_iter()
            .filter(|n| self.nodes.contains_key(n))
            .collect()
    }
}

/// Node store plus twin successor/predecessor adjacency indexes.
#[derive(Debug, Clone)]
pub(crate) struct DiAdjStorage<N: NodeKey, S: Clone> {
    pub(crate) nodes: IndexMap<N, SharedAttrs>,
    pub(crate) succ: IndexMap<N, IndexMap<N, S>>,
    pub(crate) pred: IndexMap<N, IndexMap<N, S>>,
}

impl<N: NodeKey, S: Clone> DiAdjStorage<N, S> {
    pub(crate) fn new() -> Self {
        DiAdjStorage {
            nodes: IndexMap::new(),
            succ: IndexMap::new(),
            pred: IndexMap::new(),
        }
    }

    pub(crate) fn ensure_node(&mut self, n: &N) {
        if !self.nodes.contains_key(n) {
            self.nodes.insert(n.clone(), shared_attrs(AttrMap::new()));
            self.succ.insert(n.clone(), IndexMap::new());
            self.pred.insert(n.clone(), IndexMap::new());
        }
    }

    pub(crate) fn add_node(&mut self, n: N, attrs: AttrMap) {
        match self.nodes.get(&n) {
            Some(existing) => existing.borrow_mut().extend(attrs),
            None => {
                self.succ.insert(n.clone(), IndexMap::new());
                self.pred.insert(n.clone(), IndexMap::new());
                self.nodes.insert(n, shared_attrs(attrs));
            }
        }
    }

    /// Register `n` with an already-shared attribute record.
    pub(crate) fn adopt_node(&mut self, n: &N, attrs: SharedAttrs) {
        if !self.nodes.contains_key(n) {
            self.nodes.insert(n.clone(), attrs);
            self.succ.insert(n.clone(), IndexMap::new());
            self.pred.insert(n.clone(), IndexMap::new());
        }
    }

    /// Remove `n`, all outgoing slots (via the predecessor rows of its
    /// successors) and all incoming slots (via the successor rows of its
    /// predecessors).
    pub(crate) fn remove_node(&mut self, n: &N) -> GraphResult<()> {
        if self.nodes.shift_remove(n).is_none() {
            return Err(GraphError::node_not_found(n));
        }
        let succs: Vec<N> = self
            .succ
            .get(n)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        for u in &succs {
            if let Some(row) = self.pred.get_mut(u) {
                row.shift_remove(n);
            }
        }
        self.succ.shift_remove(n);
        let preds: Vec<N> = self
            .pred
            .get(n)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        for u in &preds {
            if let Some(row) = self.succ.get_mut(u) {
                row.shift_remove(n);
            }
        }
        self.pred.shift_remove(n);
        Ok(())
    }

    pub(crate) fn has_node(&self, n: &N) -> bool {
        self.nodes.contains_key(n)
    }

    pub(crate) fn node_attrs(&self, n: &N) -> Option<SharedAttrs> {
        self.nodes.get(n).cloned()
    }

    pub(crate) fn slot(&self, u: &N, v: &N) -> Option<&S> {
        self.succ.get(u).and_then(|row| row.get(v))
    }

    /// Install the same slot at `succ[u][v]` and `pred[v][u]`.
    pub(crate) fn install_slot(&mut self, u: &N, v: &N, slot: S) {
        if let Some(row) = self.succ.get_mut(u) {
            row.insert(v.clone(), slot.clone());
        }
        if let Some(row) = self.pred.get_mut(v) {
            row.insert(u.clone(), slot);
        }
    }

    /// Delete `succ[u][v]` and `pred[v][u]`. Errors if the slot is absent.
    pub(crate) fn remove_slot(&mut self, u: &N, v: &N) -> GraphResult<S> {
        let removed = self
            .succ
            .get_mut(u)
            .and_then(|row| row.shift_remove(v))
            .ok_or_else(|| GraphError::edge_not_found(u, v))?;
        if let Some(row) = self.pred.get_mut(v) {
            row.shift_remove(u);
        }
        Ok(removed)
    }

    /// Swap the successor/predecessor roles in place. O(1): the rows and
    /// the records they hold are untouched.
    pub(crate) fn swap_direction(&mut self) {
        std::mem::swap(&mut self.succ, &mut self.pred);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.succ.clear();
        self.pred.clear();
    }

    pub(crate) fn filter_existing(&self, nbunch: impl IntoIterator<Item = N>) -> Vec<N> {
        nbunch
            .into_iter()
            .filter(|n| self.nodes.contains_key(n))
            .collect()
    }
}
