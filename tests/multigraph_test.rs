//! Integration tests for the multi-edge variants: key allocation and
//! reuse, shared slots, last-inserted removal and keyed views.

use jala::{AttrMap, AttrValue, EdgeKey, MultiDiGraph, MultiGraph};
use std::rc::Rc;

#[test]
fn auto_keys_allocate_in_order_and_reuse_freed_keys() {
    let mut g: MultiGraph<&str> = MultiGraph::new();
    assert_eq!(g.add_edge("a", "b").unwrap(), EdgeKey::Int(0));
    assert_eq!(g.add_edge("a", "b").unwrap(), EdgeKey::Int(1));
    assert_eq!(g.add_edge("a", "b").unwrap(), EdgeKey::Int(2));

    g.remove_edge_keyed(&"a", &"b", &EdgeKey::Int(1)).unwrap();
    // smallest unused non-negative integer is reused
    assert_eq!(g.add_edge("a", "b").unwrap(), EdgeKey::Int(1));
}

#[test]
fn undirected_slot_is_one_object_for_both_sides() {
    let mut g: MultiGraph<&str> = MultiGraph::new();
    g.add_edge("a", "b").unwrap();

    let ab = g.get_edge_data(&"a", &"b").unwrap();
    let ba = g.get_edge_data(&"b", &"a").unwrap();
    assert!(Rc::ptr_eq(&ab, &ba));

    // removing the last parallel edge removes the slot from both sides
    g.remove_edge(&"a", &"b").unwrap();
    assert!(g.get_edge_data(&"a", &"b").is_none());
    assert!(g.get_edge_data(&"b", &"a").is_none());
}

#[test]
fn a_fresh_slot_is_created_per_pair() {
    let mut g: MultiGraph<&str> = MultiGraph::new();
    g.add_edge("a", "b").unwrap();
    let first = g.get_edge_data(&"a", &"b").unwrap();
    g.remove_edge(&"a", &"b").unwrap();
    g.add_edge("a", "b").unwrap();
    let second = g.get_edge_data(&"a", &"b").unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
}

#[test]
fn keyless_removal_takes_last_inserted() {
    let mut g: MultiGraph<i32> = MultiGraph::new();
    g.add_edge_keyed(1, 2, EdgeKey::Text("first".to_string()), AttrMap::new())
        .unwrap();
    g.add_edge_keyed(1, 2, EdgeKey::Text("second".to_string()), AttrMap::new())
        .unwrap();

    g.remove_edge(&1, &2).unwrap();
    assert!(g.has_edge_keyed(&1, &2, &EdgeKey::Text("first".to_string())));
    assert!(!g.has_edge_keyed(&1, &2, &EdgeKey::Text("second".to_string())));
}

#[test]
fn parallel_edges_count_in_degree_and_size() {
    let mut g: MultiGraph<&str> = MultiGraph::new();
    g.add_edge("a", "b").unwrap();
    g.add_edge("a", "b").unwrap();
    g.add_edge("a", "a").unwrap();

    // two parallel edges plus a doubled self-loop slot
    assert_eq!(g.degree(&"a").unwrap(), 4);
    assert_eq!(g.number_of_edges(), 3);
    assert_eq!(g.number_of_edges_between(&"a", &"b"), 2);
}

#[test]
fn weighted_degree_sums_parallel_records() {
    let mut g: MultiGraph<&str> = MultiGraph::new();
    let mut a = AttrMap::new();
    a.insert("weight".to_string(), AttrValue::Float(2.0));
    g.add_edge_with_attrs("a", "b", a).unwrap();
    g.add_edge("a", "b").unwrap(); // defaults to 1.0
    assert_eq!(g.degree_weighted(&"a", "weight").unwrap(), 3.0);
}

#[test]
fn multigraph_edges_listing_has_one_entry_per_parallel_edge() {
    let mut g: MultiGraph<&str> = MultiGraph::new();
    g.add_edge("a", "b").unwrap();
    g.add_edge("a", "b").unwrap();
    g.add_edge("b", "c").unwrap();

    assert_eq!(g.edges().len(), 3);
    let mut keyed = g.edges_keyed();
    keyed.sort();
    assert_eq!(
        keyed,
        vec![
            ("a", "b", EdgeKey::Int(0)),
            ("a", "b", EdgeKey::Int(1)),
            ("b", "c", EdgeKey::Int(0)),
        ]
    );
}

#[test]
fn directed_multi_key_spaces_are_per_ordered_pair() {
    let mut g: MultiDiGraph<&str> = MultiDiGraph::new();
    assert_eq!(g.add_edge("a", "b").unwrap(), EdgeKey::Int(0));
    assert_eq!(g.add_edge("b", "a").unwrap(), EdgeKey::Int(0));
    assert_eq!(g.add_edge("a", "b").unwrap(), EdgeKey::Int(1));
    assert_eq!(g.number_of_edges(), 3);
    assert_eq!(g.out_degree(&"a").unwrap(), 2);
    assert_eq!(g.in_degree(&"a").unwrap(), 1);
}

#[test]
fn directed_multi_reverse_preserves_keys() {
    let mut g: MultiDiGraph<i32> = MultiDiGraph::new();
    g.add_edge_keyed(1, 2, EdgeKey::Int(3), AttrMap::new()).unwrap();
    let r = g.reverse();
    assert!(r.has_edge_keyed(&2, &1, &EdgeKey::Int(3)));

    let mut in_place = g.copy();
    in_place.reverse_in_place().unwrap();
    assert!(in_place.has_edge_keyed(&2, &1, &EdgeKey::Int(3)));
}

#[test]
fn multigraph_round_trip_through_directed() {
    let mut g: MultiGraph<&str> = MultiGraph::new();
    g.add_edge("a", "b").unwrap();
    g.add_edge("a", "b").unwrap();

    let d = g.to_directed();
    // each undirected parallel edge appears in both directions
    assert_eq!(d.number_of_edges(), 4);
    assert!(d.has_edge_keyed(&"a", &"b", &EdgeKey::Int(1)));
    assert!(d.has_edge_keyed(&"b", &"a", &EdgeKey::Int(1)));

    let back = d.to_undirected(false);
    assert_eq!(back.number_of_edges(), 2);
    assert_eq!(back.number_of_edges_between(&"a", &"b"), 2);
}

#[test]
fn multi_subgraph_shares_records_but_not_slots() {
    let mut g: MultiGraph<&str> = MultiGraph::new();
    g.add_edge("a", "b").unwrap();
    g.add_edge("b", "c").unwrap();

    let h = g.subgraph(["a", "b"]);
    assert_eq!(h.number_of_edges(), 1);

    let child_slot = h.get_edge_data(&"a", &"b").unwrap();
    let parent_slot = g.get_edge_data(&"a", &"b").unwrap();
    assert!(!Rc::ptr_eq(&child_slot, &parent_slot));

    let child_rec = h.get_edge_data_keyed(&"a", &"b", &EdgeKey::Int(0)).unwrap();
    let parent_rec = g.get_edge_data_keyed(&"a", &"b", &EdgeKey::Int(0)).unwrap();
    assert!(Rc::ptr_eq(&child_rec, &parent_rec));
}

#[test]
fn multi_edge_subgraph_selects_individual_parallel_edges() {
    let mut g: MultiDiGraph<&str> = MultiDiGraph::new();
    g.add_edge("a", "b").unwrap();
    g.add_edge("a", "b").unwrap();
    g.add_edge("b", "c").unwrap();

    let h = g.edge_subgraph([("a", "b", EdgeKey::Int(1))]);
    assert_eq!(h.number_of_edges(), 1);
    assert!(h.has_edge_keyed(&"a", &"b", &EdgeKey::Int(1)));
    assert!(!h.has_edge_keyed(&"a", &"b", &EdgeKey::Int(0)));
    assert!(!h.has_node(&"c"));
}

#[test]
fn batch_removal_with_optional_keys() {
    let mut g: MultiGraph<i32> = MultiGraph::new();
    g.add_edge(1, 2).unwrap();
    g.add_edge(1, 2).unwrap();
    g.add_edge(2, 3).unwrap();

    g.remove_edges_from([
        (1, 2, Some(EdgeKey::Int(0))),
        (2, 3, None),
        (7, 8, None), // missing pair, silently skipped
    ])
    .unwrap();

    assert_eq!(g.number_of_edges(), 1);
    assert!(g.has_edge_keyed(&1, &2, &EdgeKey::Int(1)));
}
