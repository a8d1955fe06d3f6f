//! Core type definitions shared by every graph variant.
//!
//! The central idea is that an edge is physically one attribute record
//! referenced from two index positions. [`SharedAttrs`] is that record: a
//! reference-counted, interiorly-mutable handle installed at `adj[u][v]`
//! and `adj[v][u]` (or `succ[u][v]` and `pred[v][u]`). Multi-edge variants
//! share a whole keyed slot ([`SharedSlot`]) between the two positions
//! instead.

use super::attrs::AttrMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Bound for node identifier types: anything map-key-shaped qualifies
/// (integers, strings, opaque handles).
pub trait NodeKey: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> NodeKey for T {}

/// One shared attribute record. Cloning the handle aliases the record;
/// mutations through any handle are visible through all of them.
pub type SharedAttrs = Rc<RefCell<AttrMap>>;

/// A multi-edge slot: the keyed collection of parallel edge records for one
/// node pair. The slot itself is the object shared between the two index
/// positions of an undirected multigraph.
pub type SharedSlot = Rc<RefCell<IndexMap<EdgeKey, SharedAttrs>>>;

/// Wrap an attribute record in a fresh shared handle.
pub fn shared_attrs(attrs: AttrMap) -> SharedAttrs {
    Rc::new(RefCell::new(attrs))
}

/// Deep-copy a shared record into an independent handle.
pub fn detached_attrs(attrs: &SharedAttrs) -> SharedAttrs {
    Rc::new(RefCell::new(attrs.borrow().clone()))
}

/// The numeric weight a record contributes to a weighted degree sum: the
/// named attribute when it is numeric, 1.0 otherwise.
pub(crate) fn record_weight(rec: &SharedAttrs, weight: &str) -> f64 {
    rec.borrow()
        .get(weight)
        .and_then(super::attrs::AttrValue::as_number)
        .unwrap_or(1.0)
}

/// Identifier distinguishing parallel edges within one multi-edge slot.
///
/// Auto-assignment uses the smallest non-negative integer not already
/// present in the slot, so freed keys are reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeKey {
    Int(i64),
    Text(String),
}

impl EdgeKey {
    /// Smallest non-negative integer key not used in `slot`.
    pub(crate) fn next_unused(slot: &IndexMap<EdgeKey, SharedAttrs>) -> EdgeKey {
        let mut k = 0i64;
        while slot.contains_key(&EdgeKey::Int(k)) {
            k += 1;
        }
        EdgeKey::Int(k)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKey::Int(i) => write!(f, "{}", i),
            EdgeKey::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EdgeKey {
    fn from(k: i64) -> Self {
        EdgeKey::Int(k)
    }
}

impl From<i32> for EdgeKey {
    fn from(k: i32) -> Self {
        EdgeKey::Int(k as i64)
    }
}

impl From<&str> for EdgeKey {
    fn from(k: &str) -> Self {
        EdgeKey::Text(k.to_string())
    }
}

impl From<String> for EdgeKey {
    fn from(k: String) -> Self {
        EdgeKey::Text(k)
    }
}

/// One element of an edge sequence: the 2/3/4-arity edge tuples accepted by
/// batch insertion and the conversion layer.
///
/// `WithKey` is only meaningful for multi-edge targets; feeding it to a
/// simple variant is an invalid-tuple error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeSpec<N> {
    Pair(N, N),
    WithAttrs(N, N, AttrMap),
    WithKey(N, N, EdgeKey, AttrMap),
}

impl<N> EdgeSpec<N> {
    /// The (source, target) endpoints, regardless of arity.
    pub fn endpoints(&self) -> (&N, &N) {
        match self {
            EdgeSpec::Pair(u, v) => (u, v),
            EdgeSpec::WithAttrs(u, v, _) => (u, v),
            EdgeSpec::WithKey(u, v, _, _) => (u, v),
        }
    }
}

impl<N> From<(N, N)> for EdgeSpec<N> {
    fn from((u, v): (N, N)) -> Self {
        EdgeSpec::Pair(u, v)
    }
}

impl<N> From<(N, N, AttrMap)> for EdgeSpec<N> {
    fn from((u, v, attrs): (N, N, AttrMap)) -> Self {
        EdgeSpec::WithAttrs(u, v, attrs)
    }
}

impl<N> From<(N, N, EdgeKey, AttrMap)> for EdgeSpec<N> {
    fn from((u, v, key, attrs): (N, N, EdgeKey, AttrMap)) -> Self {
        EdgeSpec::WithKey(u, v, key, attrs)
    }
}
