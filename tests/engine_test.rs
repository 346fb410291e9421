use notegraph::{
    props, Direction, EdgeKind, ElementState, EventKind, GraphEngine, GraphError, GraphEvent,
    NodeId, NodeKind, NodeQuery, PropertyMap, PropertyValue,
};
use std::cell::RefCell;
use std::rc::Rc;

fn note(engine: &mut GraphEngine, title: &str) -> NodeId {
    engine
        .add_node(NodeKind::Note, props([("title", title)]), None, None)
        .unwrap()
        .id
}

/// A folder with two notes inside, one of them linking to an outside note
fn small_workspace(engine: &mut GraphEngine) -> (NodeId, NodeId, NodeId, NodeId) {
    let folder = engine
        .add_node(NodeKind::Folder, props([("name", "inbox")]), None, None)
        .unwrap()
        .id;
    let a = engine
        .add_node(NodeKind::Note, props([("title", "a")]), Some(folder), None)
        .unwrap()
        .id;
    let b = engine
        .add_node(NodeKind::Note, props([("title", "b")]), Some(folder), None)
        .unwrap()
        .id;
    let outside = note(engine, "outside");
    engine
        .add_edge(EdgeKind::LinksTo, a, outside, PropertyMap::new())
        .unwrap();
    (folder, a, b, outside)
}

#[test]
fn test_single_parent_invariant_holds_under_repeated_attempts() {
    let mut engine = GraphEngine::new();
    let p1 = note(&mut engine, "p1");
    let p2 = note(&mut engine, "p2");
    let child = note(&mut engine, "child");

    engine
        .add_edge(EdgeKind::Hierarchy, p1, child, PropertyMap::new())
        .unwrap();

    for _ in 0..3 {
        let err = engine
            .add_edge(EdgeKind::Hierarchy, p2, child, PropertyMap::new())
            .unwrap_err();
        assert_eq!(err, GraphError::ParentConflict(child));
        assert_eq!(engine.parent_of(child), Some(p1));
    }
    // failed attempts left no stray edges behind
    assert_eq!(engine.edge_count(), 1);
}

#[test]
fn test_acyclicity() {
    let mut engine = GraphEngine::new();
    let root = note(&mut engine, "root");
    let mid = note(&mut engine, "mid");
    let leaf = note(&mut engine, "leaf");
    engine
        .add_edge(EdgeKind::Hierarchy, root, mid, PropertyMap::new())
        .unwrap();
    engine
        .add_edge(EdgeKind::Hierarchy, mid, leaf, PropertyMap::new())
        .unwrap();

    assert!(!engine.is_ancestor(root, root));
    let err = engine.move_node(root, Some(leaf)).unwrap_err();
    assert_eq!(err, GraphError::CycleDetected(root));
    assert_eq!(engine.ancestors_of(leaf), vec![mid, root]);
}

#[test]
fn test_limbo_round_trip_restores_everything() {
    let mut engine = GraphEngine::new();
    let (folder, a, _, outside) = small_workspace(&mut engine);

    let nodes_before = engine.node_count();
    let edges_before = engine.edge_count();

    engine.remove_node(a).unwrap();
    assert_eq!(engine.node_state(a), Some(ElementState::Limbo));
    assert!(engine
        .find_nodes(&NodeQuery::new().prop("title", "a"))
        .is_empty());
    assert_eq!(engine.parent_of(a), None);

    engine.restore_node(a).unwrap();
    assert_eq!(engine.node_state(a), Some(ElementState::Active));
    assert_eq!(engine.node_count(), nodes_before);
    assert_eq!(engine.edge_count(), edges_before);
    assert_eq!(engine.parent_of(a), Some(folder));
    assert_eq!(
        engine.find_nodes(&NodeQuery::new().prop("title", "a")).len(),
        1
    );
    let linked = notegraph::neighbors(&engine, a, Direction::Outgoing, Some(&[EdgeKind::LinksTo]))
        .unwrap();
    assert_eq!(linked.iter().map(|n| n.id).collect::<Vec<_>>(), vec![outside]);
}

#[test]
fn test_restore_skips_edges_to_limbo_endpoints() {
    let mut engine = GraphEngine::new();
    let a = note(&mut engine, "a");
    let b = note(&mut engine, "b");
    let edge = engine
        .add_edge(EdgeKind::LinksTo, a, b, PropertyMap::new())
        .unwrap();

    engine.remove_node(a).unwrap();
    engine.remove_node(b).unwrap();
    engine.restore_node(a).unwrap();

    // the link stays parked until b comes back
    assert_eq!(engine.edge_state(edge.id), Some(ElementState::Limbo));
    engine.restore_node(b).unwrap();
    assert_eq!(engine.edge_state(edge.id), Some(ElementState::Active));
    // identifier survived the round trip
    assert_eq!(engine.get_edge(edge.id).unwrap().id, edge.id);
}

#[test]
fn test_remove_node_with_children_requires_recursive() {
    let mut engine = GraphEngine::new();
    let (folder, a, b, _) = small_workspace(&mut engine);

    let err = engine.remove_node(folder).unwrap_err();
    assert_eq!(err, GraphError::HasChildren(folder));

    let removed = engine.remove_node_and_descendants(folder).unwrap();
    assert_eq!(removed.len(), 3);
    for id in [folder, a, b] {
        assert_eq!(engine.node_state(id), Some(ElementState::Limbo));
    }
}

#[test]
fn test_destroy_is_irreversible() {
    let mut engine = GraphEngine::new();
    let (folder, a, b, _) = small_workspace(&mut engine);

    let err = engine.destroy_node(folder, false).unwrap_err();
    assert_eq!(err, GraphError::HasChildren(folder));

    engine.destroy_node(folder, true).unwrap();
    for id in [folder, a, b] {
        assert!(engine.get_node(id).is_none());
        assert_eq!(engine.restore_node(id).unwrap_err(), GraphError::NodeNotFound(id));
    }
    // the a -> outside link went down with a
    assert_eq!(engine.edge_count(), 0);
    assert_eq!(engine.node_count(), 1);
}

#[test]
fn test_destroy_reaches_limbo_edges() {
    let mut engine = GraphEngine::new();
    let a = note(&mut engine, "a");
    let b = note(&mut engine, "b");
    let edge = engine
        .add_edge(EdgeKind::LinksTo, a, b, PropertyMap::new())
        .unwrap();
    engine.remove_edge(edge.id).unwrap();

    engine.destroy_node(a, false).unwrap();
    assert!(engine.get_edge(edge.id).is_none());
}

#[test]
fn test_move_edge_retargets() {
    let mut engine = GraphEngine::new();
    let a = note(&mut engine, "a");
    let b = note(&mut engine, "b");
    let c = note(&mut engine, "c");
    let edge = engine
        .add_edge(EdgeKind::Mentions, a, b, PropertyMap::new())
        .unwrap();

    let moved = engine.move_edge(edge.id, None, Some(c)).unwrap();
    assert_eq!(moved.from, a);
    assert_eq!(moved.to, c);
    assert!(engine.incident_edges(b).is_empty());
    assert_eq!(engine.incident_edges(c), vec![edge.id]);
}

#[test]
fn test_move_edge_can_reverse_a_hierarchy_edge() {
    let mut engine = GraphEngine::new();
    let a = note(&mut engine, "a");
    let b = note(&mut engine, "b");
    let edge = engine
        .add_edge(EdgeKind::Hierarchy, a, b, PropertyMap::new())
        .unwrap();

    // a -> b flipped to b -> a leaves the forest acyclic
    let moved = engine.move_edge(edge.id, Some(b), Some(a)).unwrap();
    assert_eq!((moved.from, moved.to), (b, a));
    assert_eq!(engine.parent_of(a), Some(b));
    assert_eq!(engine.parent_of(b), None);
}

#[test]
fn test_move_edge_still_rejects_real_cycles() {
    let mut engine = GraphEngine::new();
    let a = note(&mut engine, "a");
    let b = note(&mut engine, "b");
    let c = note(&mut engine, "c");
    engine
        .add_edge(EdgeKind::Hierarchy, a, b, PropertyMap::new())
        .unwrap();
    let lower = engine
        .add_edge(EdgeKind::Hierarchy, b, c, PropertyMap::new())
        .unwrap();

    // retargeting b -> c into b -> a would close a <-> b
    let err = engine.move_edge(lower.id, None, Some(a)).unwrap_err();
    assert_eq!(err, GraphError::CycleDetected(a));
    // the rejected move left the hierarchy untouched
    assert_eq!(engine.parent_of(c), Some(b));
    assert_eq!(engine.parent_of(b), Some(a));
}

#[test]
fn test_find_nodes_intersects_filters() {
    let mut engine = GraphEngine::new();
    engine
        .add_node(NodeKind::Note, props([("color", "red")]), None, None)
        .unwrap();
    let hit = engine
        .add_node(
            NodeKind::Tag,
            props([("color", "red"), ("name", "urgent")]),
            None,
            None,
        )
        .unwrap();
    engine
        .add_node(NodeKind::Tag, props([("color", "blue")]), None, None)
        .unwrap();

    let found = engine.find_nodes(&NodeQuery::new().kind(NodeKind::Tag).prop("color", "red"));
    assert_eq!(found.iter().map(|n| n.id).collect::<Vec<_>>(), vec![hit.id]);

    // empty query matches every active node
    assert_eq!(engine.find_nodes(&NodeQuery::new()).len(), 3);
}

#[test]
fn test_find_nodes_complex_values_scan() {
    let mut engine = GraphEngine::new();
    let tags = PropertyValue::Array(vec!["x".into(), "y".into()]);
    let hit = engine
        .add_node(NodeKind::Note, props([("tags", tags.clone())]), None, None)
        .unwrap();
    note(&mut engine, "plain");

    let found = engine.find_nodes(&NodeQuery::new().prop("tags", tags));
    assert_eq!(found.iter().map(|n| n.id).collect::<Vec<_>>(), vec![hit.id]);
}

#[test]
fn test_hyper_edges() {
    let mut engine = GraphEngine::new();
    let a = note(&mut engine, "a");
    let b = note(&mut engine, "b");
    let c = note(&mut engine, "c");

    let err = engine.add_hyper_edge(vec![a], PropertyMap::new()).unwrap_err();
    assert_eq!(err, GraphError::TooFewHyperNodes(1));

    let hyper = engine
        .add_hyper_edge(vec![a, b, c], props([("topic", "trip")]))
        .unwrap();
    assert_eq!(engine.hyper_edges_of(b).len(), 1);

    engine.destroy_hyper_edge(hyper.id).unwrap();
    assert!(engine.get_hyper_edge(hyper.id).is_none());
    assert!(engine.hyper_edges_of(b).is_empty());
}

#[test]
fn test_events_follow_mutations_in_order() {
    let mut engine = GraphEngine::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in [
        EventKind::NodeAdded,
        EventKind::NodeRemoved,
        EventKind::NodeRestored,
        EventKind::NodeDestroyed,
    ] {
        let log = Rc::clone(&log);
        engine.on(kind, move |event: &GraphEvent| {
            log.borrow_mut().push(event.kind());
        });
    }

    let id = note(&mut engine, "x");
    engine.remove_node(id).unwrap();
    engine.restore_node(id).unwrap();
    engine.destroy_node(id, false).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            EventKind::NodeAdded,
            EventKind::NodeRemoved,
            EventKind::NodeRestored,
            EventKind::NodeDestroyed,
        ]
    );
}

#[test]
fn test_off_stops_delivery() {
    let mut engine = GraphEngine::new();
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let listener = engine.on(EventKind::NodeAdded, move |_| *c.borrow_mut() += 1);

    note(&mut engine, "one");
    assert!(engine.off(EventKind::NodeAdded, listener));
    note(&mut engine, "two");

    assert_eq!(*count.borrow(), 1);
}
