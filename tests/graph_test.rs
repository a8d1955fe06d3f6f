//! Integration tests for the undirected simple variant: shared edge
//! records, the self-loop degree convention, removal cascades and derived
//! views.

use jala::{AttrMap, AttrValue, Graph, GraphError};
use std::rc::Rc;

fn attrs(pairs: &[(&str, i64)]) -> AttrMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), AttrValue::Int(*v)))
        .collect()
}

#[test]
fn edge_record_mutation_visible_from_both_directions() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edge_with_attrs("u", "v", attrs(&[("w", 1)])).unwrap();

    let record = g.get_edge_data(&"u", &"v").unwrap();
    record.borrow_mut().insert("w".to_string(), AttrValue::Int(42));

    let reverse = g.get_edge_data(&"v", &"u").unwrap();
    assert_eq!(reverse.borrow().get("w").and_then(AttrValue::as_int), Some(42));
    assert!(Rc::ptr_eq(&record, &reverse));
}

#[test]
fn self_loop_contributes_two_to_degree() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edge("a", "a").unwrap();
    assert_eq!(g.degree(&"a").unwrap(), 2);
    assert_eq!(g.number_of_edges(), 1);
}

#[test]
fn removing_star_center_removes_every_edge() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edges_from([("c", "x"), ("c", "y"), ("c", "z")]).unwrap();
    assert_eq!(g.number_of_edges(), 3);

    g.remove_node(&"c").unwrap();

    assert_eq!(g.number_of_edges(), 0);
    for leaf in ["x", "y", "z"] {
        let nbrs: Vec<&&str> = g.neighbors(&leaf).unwrap().collect();
        assert!(nbrs.is_empty());
    }
}

#[test]
fn second_add_edge_updates_not_duplicates() {
    let mut g: Graph<i32> = Graph::new();
    g.add_edge_with_attrs(1, 2, attrs(&[("w", 1)])).unwrap();
    g.add_edge_with_attrs(1, 2, attrs(&[("w", 2)])).unwrap();

    assert_eq!(g.number_of_edges(), 1);
    let record = g.get_edge_data(&1, &2).unwrap();
    assert_eq!(record.borrow().get("w").and_then(AttrValue::as_int), Some(2));
}

#[test]
fn implicit_node_creation_on_add_edge() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edge("p", "q").unwrap();
    assert!(g.has_node(&"p"));
    assert!(g.has_node(&"q"));
    // created with empty attribute records
    assert!(g.node_attrs(&"p").unwrap().borrow().is_empty());
}

#[test]
fn subgraph_content_and_aliasing() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edges_from([("a", "b"), ("b", "c")]).unwrap();

    let h = g.subgraph(["a", "b"]);
    let mut nodes: Vec<&str> = h.nodes().copied().collect();
    nodes.sort();
    assert_eq!(nodes, vec!["a", "b"]);
    assert_eq!(h.edges(), vec![("a", "b")]);

    h.get_edge_data(&"a", &"b")
        .unwrap()
        .borrow_mut()
        .insert("mark".to_string(), AttrValue::Bool(true));
    assert_eq!(
        g.get_edge_data(&"a", &"b")
            .unwrap()
            .borrow()
            .get("mark")
            .and_then(AttrValue::as_bool),
        Some(true)
    );
}

#[test]
fn edge_subgraph_derives_nodes_from_existing_edges() {
    let mut g: Graph<i32> = Graph::new();
    g.add_edges_from([(1, 2), (2, 3), (3, 4)]).unwrap();

    let h = g.edge_subgraph([(2, 3), (40, 50)]);
    assert_eq!(h.number_of_nodes(), 2);
    assert!(h.has_edge(&2, &3));

    // node records are aliased as well
    h.node_attrs(&2)
        .unwrap()
        .borrow_mut()
        .insert("shared".to_string(), AttrValue::Bool(true));
    assert_eq!(
        g.node_attrs(&2)
            .unwrap()
            .borrow()
            .get("shared")
            .and_then(AttrValue::as_bool),
        Some(true)
    );
}

#[test]
fn batch_node_removal_is_best_effort() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edge("a", "b").unwrap();
    g.remove_nodes_from(["a", "missing"]).unwrap();
    assert!(!g.has_node(&"a"));
    assert!(g.has_node(&"b"));
}

#[test]
fn batch_edge_removal_is_best_effort() {
    let mut g: Graph<i32> = Graph::new();
    g.add_edges_from([(1, 2), (2, 3)]).unwrap();
    g.remove_edges_from([(1, 2), (7, 8)]).unwrap();
    assert_eq!(g.number_of_edges(), 1);
}

#[test]
fn single_remove_raises_and_leaves_state_unchanged() {
    let mut g: Graph<i32> = Graph::new();
    g.add_edge(1, 2).unwrap();

    assert!(matches!(g.remove_node(&9), Err(GraphError::NodeNotFound(_))));
    assert!(matches!(
        g.remove_edge(&1, &9),
        Err(GraphError::EdgeNotFound(_))
    ));
    assert_eq!(g.number_of_nodes(), 2);
    assert_eq!(g.number_of_edges(), 1);
}

#[test]
fn neighbors_errors_for_missing_node() {
    let g: Graph<i32> = Graph::new();
    assert!(matches!(g.neighbors(&5), Err(GraphError::NodeNotFound(_))));
    assert!(matches!(g.degree(&5), Err(GraphError::NodeNotFound(_))));
}

#[test]
fn weighted_degree_defaults_missing_weights_to_one() {
    let mut g: Graph<&str> = Graph::new();
    g.add_weighted_edges_from([("a", "b", 3.0)]).unwrap();
    g.add_edge("a", "c").unwrap();
    assert_eq!(g.degree_weighted(&"a", "weight").unwrap(), 4.0);
    assert_eq!(g.size_weighted("weight"), 4.0);
}

#[test]
fn to_directed_produces_both_arcs_without_aliasing() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edge_with_attrs("a", "b", attrs(&[("w", 5)])).unwrap();

    let d = g.to_directed();
    assert!(d.has_edge(&"a", &"b"));
    assert!(d.has_edge(&"b", &"a"));

    d.get_edge_data(&"a", &"b")
        .unwrap()
        .borrow_mut()
        .insert("w".to_string(), AttrValue::Int(9));
    // the undirected source and the reverse arc are untouched
    assert_eq!(
        g.get_edge_data(&"a", &"b")
            .unwrap()
            .borrow()
            .get("w")
            .and_then(AttrValue::as_int),
        Some(5)
    );
    assert_eq!(
        d.get_edge_data(&"b", &"a")
            .unwrap()
            .borrow()
            .get("w")
            .and_then(AttrValue::as_int),
        Some(5)
    );
}

#[test]
fn shallow_copy_shares_deep_copy_does_not() {
    let mut g: Graph<i32> = Graph::new();
    g.add_edge_with_attrs(1, 2, attrs(&[("w", 1)])).unwrap();

    let shallow = g.shallow_copy();
    shallow
        .get_edge_data(&1, &2)
        .unwrap()
        .borrow_mut()
        .insert("w".to_string(), AttrValue::Int(2));
    assert_eq!(
        g.get_edge_data(&1, &2)
            .unwrap()
            .borrow()
            .get("w")
            .and_then(AttrValue::as_int),
        Some(2)
    );

    let deep = g.copy();
    deep.get_edge_data(&1, &2)
        .unwrap()
        .borrow_mut()
        .insert("w".to_string(), AttrValue::Int(3));
    assert_eq!(
        g.get_edge_data(&1, &2)
            .unwrap()
            .borrow()
            .get("w")
            .and_then(AttrValue::as_int),
        Some(2)
    );
}

#[test]
fn frozen_graph_rejects_all_structural_mutation() {
    let mut g: Graph<i32> = Graph::new();
    g.add_edge(1, 2).unwrap();
    g.freeze();
    assert!(g.is_frozen());

    assert_eq!(g.add_node(3), Err(GraphError::FrozenGraphMutation));
    assert_eq!(g.add_edge(1, 3), Err(GraphError::FrozenGraphMutation));
    assert_eq!(g.remove_edge(&1, &2), Err(GraphError::FrozenGraphMutation));
    assert_eq!(
        g.remove_nodes_from([1, 2]),
        Err(GraphError::FrozenGraphMutation)
    );
    assert_eq!(g.clear(), Err(GraphError::FrozenGraphMutation));
    assert_eq!(g.number_of_edges(), 1);
}

#[test]
fn graph_attributes_are_shared_into_subgraphs() {
    let mut g: Graph<i32> = Graph::new();
    g.set_name("parent");
    g.add_edge(1, 2).unwrap();

    let h = g.subgraph([1, 2]);
    assert_eq!(h.name(), "parent");

    h.graph_attrs()
        .borrow_mut()
        .insert("note".to_string(), "from child".into());
    assert_eq!(
        g.graph_attrs()
            .borrow()
            .get("note")
            .and_then(AttrValue::as_str),
        Some("from child")
    );
}
