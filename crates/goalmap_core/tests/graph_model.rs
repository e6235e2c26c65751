use goalmap_core::{GraphError, GraphModel, Position, SequentialIds};
use std::collections::HashSet;
use uuid::Uuid;

fn model() -> GraphModel {
    GraphModel::new(Box::new(SequentialIds::new()))
}

fn assert_referential_integrity(model: &GraphModel) {
    for connection in model.connections() {
        assert!(model.find_node(connection.from_id).is_some());
        assert!(model.find_node(connection.to_id).is_some());
    }
}

#[test]
fn add_node_assigns_distinct_ids() {
    let mut model = model();
    let ids: HashSet<Uuid> = (0..25)
        .map(|index| {
            model
                .add_node(&format!("node {index}"), Position::new(index as f64, 0.0))
                .unwrap()
                .id
        })
        .collect();

    assert_eq!(ids.len(), 25);
    assert_eq!(model.nodes().len(), 25);
}

#[test]
fn add_node_rejects_blank_title_without_mutation() {
    let mut model = model();
    let err = model.add_node(" \n ", Position::default()).unwrap_err();
    assert!(matches!(err, GraphError::InvalidInput(_)));
    assert!(model.nodes().is_empty());
}

#[test]
fn add_node_keeps_insertion_order() {
    let mut model = model();
    let a = model.add_node("first", Position::default()).unwrap();
    let b = model.add_node("second", Position::default()).unwrap();
    let order: Vec<Uuid> = model.nodes().iter().map(|node| node.id).collect();
    assert_eq!(order, vec![a.id, b.id]);
}

#[test]
fn connections_are_undirected() {
    let mut model = model();
    let a = model.add_node("a", Position::default()).unwrap();
    let b = model.add_node("b", Position::default()).unwrap();

    let created = model.add_connection(b.id, a.id).unwrap();
    assert_eq!((created.from_id, created.to_id), (b.id, a.id));
    assert!(model.connection_exists(a.id, b.id));
    assert!(model.add_connection(a.id, b.id).is_none());
    assert!(model.add_connection(b.id, a.id).is_none());
    assert_eq!(model.connections().len(), 1);
}

#[test]
fn self_connection_is_always_a_noop() {
    let mut model = model();
    let a = model.add_node("a", Position::default()).unwrap();
    assert!(model.add_connection(a.id, a.id).is_none());

    let missing = Uuid::from_u128(404);
    assert!(model.add_connection(missing, missing).is_none());
    assert!(model.connections().is_empty());
}

#[test]
fn connection_to_unknown_node_is_a_noop() {
    let mut model = model();
    let a = model.add_node("a", Position::default()).unwrap();
    let missing = Uuid::from_u128(404);

    assert!(model.add_connection(a.id, missing).is_none());
    assert!(model.add_connection(missing, a.id).is_none());
    assert!(model.connections().is_empty());
}

#[test]
fn update_position_ignores_unknown_ids() {
    let mut model = model();
    let a = model.add_node("a", Position::new(1.0, 2.0)).unwrap();

    assert!(!model.update_node_position(Uuid::from_u128(404), Position::new(9.0, 9.0)));
    assert_eq!(model.find_node(a.id).unwrap().position, Position::new(1.0, 2.0));

    assert!(model.update_node_position(a.id, Position::new(3.0, 4.0)));
    assert_eq!(model.find_node(a.id).unwrap().position, Position::new(3.0, 4.0));
}

#[test]
fn connections_touching_returns_both_directions() {
    let mut model = model();
    let a = model.add_node("a", Position::default()).unwrap();
    let b = model.add_node("b", Position::default()).unwrap();
    let c = model.add_node("c", Position::default()).unwrap();
    let ab = model.add_connection(a.id, b.id).unwrap();
    let cb = model.add_connection(c.id, b.id).unwrap();
    model.add_connection(a.id, c.id).unwrap();

    let touching: Vec<Uuid> = model.connections_touching(b.id).map(|conn| conn.id).collect();
    assert_eq!(touching, vec![ab.id, cb.id]);
}

#[test]
fn clear_empties_both_collections() {
    let mut model = model();
    let a = model.add_node("a", Position::default()).unwrap();
    let b = model.add_node("b", Position::default()).unwrap();
    model.add_connection(a.id, b.id).unwrap();

    model.clear();
    assert!(model.graph().is_empty());
    assert_referential_integrity(&model);

    let c = model.add_node("c", Position::default()).unwrap();
    assert_ne!(c.id, a.id);
    assert_ne!(c.id, b.id);
}

#[test]
fn mixed_operation_sequence_keeps_invariants() {
    let mut model = model();
    let mut ids = Vec::new();
    for step in 0..40u32 {
        match step % 4 {
            0 | 1 => ids.push(model.add_node(&format!("n{step}"), Position::default()).unwrap().id),
            2 if ids.len() >= 2 => {
                let a = ids[(step as usize * 7) % ids.len()];
                let b = ids[(step as usize * 3) % ids.len()];
                model.add_connection(a, b);
            }
            _ => {
                if let Some(first) = ids.first() {
                    model.add_connection(*first, Uuid::from_u128(u128::from(step) + 10_000));
                }
            }
        }
        assert_referential_integrity(&model);
        assert!(model.graph().validate().is_ok());
    }
}
