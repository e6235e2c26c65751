use goalmap_core::{
    CannedConfirm, GraphModel, InteractionController, InteractionState, Position, SequentialIds,
    ViewUpdate,
};

fn model_with_nodes(count: usize) -> (GraphModel, Vec<uuid::Uuid>) {
    let mut model = GraphModel::new(Box::new(SequentialIds::new()));
    let ids = (0..count)
        .map(|index| {
            model
                .add_node(&format!("node {index}"), Position::new(index as f64 * 200.0, 0.0))
                .unwrap()
                .id
        })
        .collect();
    (model, ids)
}

#[test]
fn connect_gesture_end_to_end() {
    let (mut model, ids) = model_with_nodes(2);
    let (a, b) = (ids[0], ids[1]);
    let mut controller = InteractionController::new();
    assert_eq!(controller.state(), InteractionState::Idle);

    let outcome = controller.toggle_connect_mode();
    assert_eq!(controller.state(), InteractionState::ConnectArmed);
    assert_eq!(outcome.updates, vec![ViewUpdate::ConnectMode(true)]);

    let outcome = controller.pointer_down(&mut model, a, Position::new(5.0, 5.0));
    assert_eq!(controller.state(), InteractionState::ConnectPending { selected: a });
    assert_eq!(outcome.updates, vec![ViewUpdate::Selected(a)]);
    assert!(!outcome.persist);

    let outcome = controller.pointer_down(&mut model, a, Position::new(5.0, 5.0));
    assert!(outcome.is_noop());
    assert_eq!(controller.state(), InteractionState::ConnectPending { selected: a });
    assert!(model.connections().is_empty());

    let outcome = controller.pointer_down(&mut model, b, Position::new(205.0, 5.0));
    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(model.connections().len(), 1);
    assert!(model.connection_exists(a, b));
    let edge_id = model.connections()[0].id;
    assert_eq!(
        outcome.updates,
        vec![
            ViewUpdate::Deselected(a),
            ViewUpdate::ConnectMode(false),
            ViewUpdate::EdgeAdded(edge_id),
        ]
    );
    assert!(outcome.persist);
}

#[test]
fn duplicate_pairing_still_disarms_without_persisting() {
    let (mut model, ids) = model_with_nodes(2);
    model.add_connection(ids[0], ids[1]).unwrap();
    let mut controller = InteractionController::new();

    controller.toggle_connect_mode();
    controller.pointer_down(&mut model, ids[1], Position::default());
    let outcome = controller.pointer_down(&mut model, ids[0], Position::default());

    assert_eq!(controller.state(), InteractionState::Idle);
    assert!(!outcome.persist);
    assert_eq!(model.connections().len(), 1);
}

#[test]
fn toggling_off_drops_pending_selection() {
    let (mut model, ids) = model_with_nodes(1);
    let mut controller = InteractionController::new();
    controller.toggle_connect_mode();
    controller.pointer_down(&mut model, ids[0], Position::default());

    let outcome = controller.toggle_connect_mode();
    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(
        outcome.updates,
        vec![ViewUpdate::Deselected(ids[0]), ViewUpdate::ConnectMode(false)]
    );
}

#[test]
fn drag_moves_node_and_marks_touching_edges() {
    let (mut model, ids) = model_with_nodes(3);
    let ab = model.add_connection(ids[0], ids[1]).unwrap();
    let ca = model.add_connection(ids[2], ids[0]).unwrap();
    model.add_connection(ids[1], ids[2]).unwrap();
    model.update_node_position(ids[0], Position::new(10.0, 10.0));
    let mut controller = InteractionController::new();

    let down = controller.pointer_down(&mut model, ids[0], Position::new(15.0, 12.0));
    assert!(down.is_noop());

    let moved = controller.pointer_move(&mut model, Position::new(100.0, 100.0));
    assert_eq!(model.find_node(ids[0]).unwrap().position, Position::new(95.0, 98.0));
    assert_eq!(
        moved.updates,
        vec![
            ViewUpdate::NodeMoved(ids[0]),
            ViewUpdate::EdgesDirty(vec![ab.id, ca.id]),
        ]
    );
    assert!(!moved.persist);

    controller.pointer_move(&mut model, Position::new(50.0, 20.0));
    assert_eq!(model.find_node(ids[0]).unwrap().position, Position::new(45.0, 18.0));

    let up = controller.pointer_up();
    assert!(up.persist);
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn drag_of_isolated_node_reports_no_dirty_edges() {
    let (mut model, ids) = model_with_nodes(1);
    let mut controller = InteractionController::new();
    controller.pointer_down(&mut model, ids[0], Position::default());
    let moved = controller.pointer_move(&mut model, Position::new(1.0, 1.0));
    assert_eq!(moved.updates, vec![ViewUpdate::NodeMoved(ids[0])]);
}

#[test]
fn clear_requires_confirmation() {
    let (mut model, ids) = model_with_nodes(2);
    model.add_connection(ids[0], ids[1]).unwrap();
    let mut controller = InteractionController::new();
    controller.pointer_down(&mut model, ids[0], Position::default());

    let declined = controller.clear_all(&mut model, &mut CannedConfirm(false));
    assert!(declined.is_noop());
    assert_eq!(model.nodes().len(), 2);
    assert_eq!(model.connections().len(), 1);
    assert!(matches!(controller.state(), InteractionState::Dragging { .. }));

    let accepted = controller.clear_all(&mut model, &mut CannedConfirm(true));
    assert!(accepted.persist);
    assert!(model.nodes().is_empty());
    assert!(model.connections().is_empty());
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn clear_resets_pending_connect_selection() {
    let (mut model, ids) = model_with_nodes(2);
    let mut controller = InteractionController::new();
    controller.toggle_connect_mode();
    controller.pointer_down(&mut model, ids[0], Position::default());

    controller.clear_all(&mut model, &mut CannedConfirm(true));
    assert_eq!(controller.state(), InteractionState::Idle);
    // Former selection is gone; a new press starts a drag.
    let b = model.add_node("fresh", Position::default()).unwrap();
    controller.pointer_down(&mut model, b.id, Position::default());
    assert!(matches!(controller.state(), InteractionState::Dragging { .. }));
}
