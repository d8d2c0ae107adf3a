use std::path::PathBuf;

use sketchkit_core::Rgba;
use sketchkit_designer::{
    DesignerOptions, DesignerShape, DesignerState, DrawingTool, MirrorAxis, NodeId, PaintTarget,
    ShapeType,
};

fn draw_rect(state: &mut DesignerState, x: f64, y: f64, w: f64, h: f64) -> NodeId {
    state.set_tool(DrawingTool::Rectangle);
    state.press(x, y).unwrap();
    state.drag(x + w, y + h);
    state.release().unwrap().unwrap()
}

fn geometry(state: &DesignerState, id: NodeId) -> (f64, f64, f64, f64) {
    let shape = state.store.get(id).unwrap();
    (shape.x(), shape.y(), shape.width(), shape.height())
}

#[test]
fn test_drag_creates_decorated_shape() {
    let mut state = DesignerState::new();
    state.set_tool(DrawingTool::Rectangle);
    state.press(50.0, 40.0).unwrap();
    // dragging up and left still yields a positive box
    state.drag(10.0, 10.0);
    assert!(state.pending_shape().is_some());
    assert!(state.store.is_empty());

    let id = state.release().unwrap().unwrap();
    assert_eq!(geometry(&state, id), (10.0, 10.0, 40.0, 30.0));
    assert!(state.pending_shape().is_none());
    assert_eq!(state.undo_depth(), 1);
    assert!(state.is_modified);

    let shape = state.store.get(id).unwrap();
    assert_eq!(shape.depth(), 2);
    assert_eq!(shape.paint(PaintTarget::Stroke), Some(Rgba::BLACK));
    assert_eq!(shape.paint(PaintTarget::Fill), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_zero_size_shape_is_discarded() {
    let mut state = DesignerState::new();
    state.set_tool(DrawingTool::Ellipse);
    state.press(5.0, 5.0).unwrap();
    assert_eq!(state.release().unwrap(), None);
    assert!(state.store.is_empty());
    assert!(!state.can_undo());
}

#[test]
fn test_polygon_closes_near_start() {
    let mut state = DesignerState::new();
    state.set_tool(DrawingTool::Polygon);
    assert_eq!(state.press(0.0, 0.0).unwrap(), None);
    assert_eq!(state.press(100.0, 0.0).unwrap(), None);
    assert_eq!(state.press(100.0, 100.0).unwrap(), None);
    assert_eq!(state.polygon_in_progress().unwrap().vertex_count(), 3);
    assert!(state.store.is_empty());

    let id = state.press(3.0, 4.0).unwrap().unwrap();
    assert!(state.polygon_in_progress().is_none());
    let shape = state.store.get(id).unwrap();
    assert_eq!(shape.shape_type(), ShapeType::Polygon);
    assert_eq!(shape.base().as_polygon().unwrap().vertex_count(), 3);
    assert_eq!(state.undo_depth(), 1);
}

#[test]
fn test_polygon_needs_two_vertices_to_close() {
    let mut state = DesignerState::new();
    state.set_tool(DrawingTool::Polygon);
    state.press(0.0, 0.0).unwrap();
    // near the start, but a single vertex cannot close
    assert_eq!(state.press(2.0, 2.0).unwrap(), None);
    assert_eq!(state.polygon_in_progress().unwrap().vertex_count(), 2);

    state.set_tool(DrawingTool::Select);
    assert!(state.polygon_in_progress().is_none());
    assert!(state.store.is_empty());
}

#[test]
fn test_finish_polygon_explicitly() {
    let mut state = DesignerState::new();
    state.set_tool(DrawingTool::Polygon);
    state.press(0.0, 0.0).unwrap();
    assert_eq!(state.finish_polygon().unwrap(), None);
    assert!(state.store.is_empty());

    state.press(0.0, 0.0).unwrap();
    state.press(50.0, 0.0).unwrap();
    state.press(50.0, 50.0).unwrap();
    assert!(state.finish_polygon().unwrap().is_some());
    assert_eq!(state.store.len(), 1);
}

#[test]
fn test_select_at_picks_topmost() {
    let mut state = DesignerState::new();
    let bottom = draw_rect(&mut state, 0.0, 0.0, 50.0, 50.0);
    let top = draw_rect(&mut state, 25.0, 25.0, 50.0, 50.0);

    assert_eq!(state.select_at(30.0, 30.0, false), Some(top));
    assert_eq!(state.selected_ids(), vec![top]);

    assert_eq!(state.select_at(5.0, 5.0, true), Some(bottom));
    assert_eq!(state.selected_ids(), vec![bottom, top]);

    // multi-select toggles off
    state.select_at(5.0, 5.0, true);
    assert_eq!(state.selected_ids(), vec![top]);

    // a miss with multi leaves the selection alone, without it clears
    assert_eq!(state.select_at(500.0, 500.0, true), None);
    assert_eq!(state.selected_ids(), vec![top]);
    state.select_at(500.0, 500.0, false);
    assert!(state.selected_ids().is_empty());
}

#[test]
fn test_select_tool_press_hit_tests() {
    let mut state = DesignerState::new();
    let id = draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    state.set_tool(DrawingTool::Select);
    assert_eq!(state.press(5.0, 5.0).unwrap(), Some(id));
    assert!(state.store.get(id).unwrap().node().is_highlighted());
}

#[test]
fn test_copy_paste_and_undo() {
    let mut state = DesignerState::new();
    let original = draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    state.select_all();
    assert_eq!(state.copy_selection().unwrap(), 1);
    // copy is not an undo step
    assert_eq!(state.undo_depth(), 1);

    let pasted = state.paste_at(200.0, 100.0).unwrap();
    assert_eq!(pasted.len(), 1);
    assert_ne!(pasted[0], original);
    assert_eq!(geometry(&state, pasted[0]), (200.0, 100.0, 10.0, 10.0));
    assert_eq!(state.selected_ids(), pasted);

    assert!(state.undo().unwrap());
    assert_eq!(state.store.ids(), vec![original]);
    assert!(state.selected_ids().is_empty());
}

#[test]
fn test_duplicate_and_delete() {
    let mut state = DesignerState::new();
    let a = draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    state.select_all();

    let copies = state.duplicate_selection().unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(geometry(&state, copies[0]), (20.0, 20.0, 10.0, 10.0));

    state.select_all();
    assert_eq!(state.delete_selection().unwrap(), 2);
    assert!(state.store.is_empty());
    assert!(state.selected_ids().is_empty());

    state.undo().unwrap();
    assert_eq!(state.store.ids(), vec![a, copies[0]]);
}

#[test]
fn test_cut_and_paste_moves_shape() {
    let mut state = DesignerState::new();
    let a = draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    state.select_at(5.0, 5.0, false);
    state.cut_selection().unwrap();
    assert!(state.store.is_empty());
    assert_eq!(state.clipboard.len(), 1);

    let pasted = state.paste_at(40.0, 40.0).unwrap();
    assert_ne!(pasted[0], a);
    assert_eq!(state.store.len(), 1);
}

#[test]
fn test_empty_selection_operations_are_no_ops() {
    let mut state = DesignerState::new();
    draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    let depth = state.undo_depth();

    state.move_selection(5.0, 5.0).unwrap();
    state.scale_selection(2.0).unwrap();
    state.bring_to_front().unwrap();
    state.mirror_selection(MirrorAxis::Vertical).unwrap();
    assert_eq!(state.copy_selection().unwrap(), 0);
    assert_eq!(state.delete_selection().unwrap(), 0);
    assert_eq!(state.undo_depth(), depth);
}

#[test]
fn test_transforms_are_single_undo_steps() {
    let mut state = DesignerState::new();
    let a = draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    let b = draw_rect(&mut state, 100.0, 0.0, 20.0, 20.0);
    state.select_all();
    let depth = state.undo_depth();

    state.scale_selection(2.0).unwrap();
    assert_eq!(state.undo_depth(), depth + 1);
    assert_eq!(geometry(&state, a), (-5.0, -5.0, 20.0, 20.0));
    assert_eq!(geometry(&state, b), (90.0, -10.0, 40.0, 40.0));
    assert_eq!(state.history().last().map(String::as_str), Some("Scale"));

    state.move_selection(1.0, 2.0).unwrap();
    state.set_selection_fill(Rgba::RED).unwrap();
    assert_eq!(
        state.store.get(b).unwrap().paint(PaintTarget::Fill),
        Some(Rgba::RED)
    );

    state.undo().unwrap();
    state.undo().unwrap();
    state.undo().unwrap();
    assert_eq!(geometry(&state, a), (0.0, 0.0, 10.0, 10.0));
    assert_eq!(
        state.store.get(b).unwrap().paint(PaintTarget::Fill),
        Some(Rgba::TRANSPARENT)
    );
}

#[test]
fn test_z_order_keeps_relative_stacking() {
    let mut state = DesignerState::new();
    let a = draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    let b = draw_rect(&mut state, 20.0, 0.0, 10.0, 10.0);
    let c = draw_rect(&mut state, 40.0, 0.0, 10.0, 10.0);
    let d = draw_rect(&mut state, 60.0, 0.0, 10.0, 10.0);

    state.select_at(5.0, 5.0, false);
    state.select_at(45.0, 5.0, true);
    state.bring_to_front().unwrap();
    assert_eq!(state.store.ids(), vec![b, d, a, c]);

    state.send_to_back().unwrap();
    assert_eq!(state.store.ids(), vec![a, c, b, d]);

    state.undo().unwrap();
    state.undo().unwrap();
    assert_eq!(state.store.ids(), vec![a, b, c, d]);
}

#[test]
fn test_resize_rejects_wrong_kind() {
    let mut state = DesignerState::new();
    let a = draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    let depth = state.undo_depth();
    let line = sketchkit_designer::ShapeGeometry::Line {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    assert!(state.resize_shape(a, line).is_err());
    assert_eq!(state.undo_depth(), depth);
}

#[test]
fn test_text_tool_places_label() {
    let mut state = DesignerState::new();
    state.set_tool(DrawingTool::Text);
    let id = state.press(10.0, 20.0).unwrap().unwrap();
    let shape = state.store.get(id).unwrap();
    assert_eq!(shape.shape_type(), ShapeType::Text);
    assert_eq!(shape.base().as_text().map(|t| t.text()), Some("Text"));
    assert_eq!((shape.x(), shape.y()), (10.0, 20.0));

    assert_eq!(state.place_text(0.0, 0.0, "").unwrap(), None);
    assert_eq!(state.store.len(), 1);
}

#[test]
fn test_snap_to_grid_while_creating() {
    let options = DesignerOptions {
        snap_to_grid: true,
        grid_spacing: 10.0,
        ..DesignerOptions::default()
    };
    let mut state = DesignerState::with_options(options);
    state.set_tool(DrawingTool::Rectangle);
    state.press(12.0, 18.0).unwrap();
    state.drag(47.0, 41.0);
    let id = state.release().unwrap().unwrap();
    assert_eq!(geometry(&state, id), (10.0, 20.0, 40.0, 20.0));
}

#[test]
fn test_display_name() {
    let mut state = DesignerState::new();
    assert_eq!(state.display_name(), "Untitled");
    draw_rect(&mut state, 0.0, 0.0, 10.0, 10.0);
    assert_eq!(state.display_name(), "Untitled*");

    state.current_file_path = Some(PathBuf::from("/tmp/drawings/plan.json"));
    state.is_modified = false;
    assert_eq!(state.display_name(), "plan.json");

    state.new_design();
    assert_eq!(state.display_name(), "Untitled");
    assert!(state.store.is_empty());
    assert!(!state.can_undo());
}
