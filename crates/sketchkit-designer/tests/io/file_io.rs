use std::path::Path;

use sketchkit_core::Rgba;
use sketchkit_designer::{
    DesignRectangle, DesignerShape, DesignerState, DrawingFile, DrawingTool, MemoryChannel,
    PaintTarget, Shape, ShapeData, StyledShape,
};
use tempfile::TempDir;

fn draw(state: &mut DesignerState, tool: DrawingTool, from: (f64, f64), to: (f64, f64)) {
    state.set_tool(tool);
    state.press(from.0, from.1).unwrap();
    state.drag(to.0, to.1);
    state.release().unwrap().unwrap();
}

fn populated() -> DesignerState {
    let mut state = DesignerState::new();
    state.design_name = "floor plan".to_string();
    draw(&mut state, DrawingTool::Rectangle, (0.0, 0.0), (40.0, 20.0));
    draw(&mut state, DrawingTool::Ellipse, (50.0, 50.0), (80.0, 70.0));
    draw(&mut state, DrawingTool::Line, (100.0, 0.0), (60.0, 30.0));
    state.place_text(10.0, 90.0, "Kitchen").unwrap();
    state.select_at(5.0, 5.0, false);
    state.set_selection_fill(Rgba::GREEN).unwrap();
    state
}

#[test]
fn test_save_and_load_through_filesystem() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.json");

    let mut state = populated();
    assert!(state.is_modified);
    assert_eq!(state.save_to_file(&path).unwrap(), 4);
    assert!(!state.is_modified);
    assert_eq!(state.display_name(), "plan.json");

    let mut loaded = DesignerState::new();
    let outcome = loaded.load_from_file(&path).unwrap();
    assert_eq!(outcome.loaded, 4);
    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.summary.total, 4);
    assert_eq!(loaded.design_name, "floor plan");
    assert_eq!(loaded.current_file_path.as_deref(), Some(path.as_path()));
    assert!(!loaded.is_modified);

    for (before, after) in state.store.iter().zip(loaded.store.iter()) {
        assert_eq!(before.shape_type(), after.shape_type());
        assert!((before.x() - after.x()).abs() < 1e-9);
        assert!((before.width() - after.width()).abs() < 1e-9);
    }
    let rect = loaded.store.get_at(0).unwrap();
    assert_eq!(rect.paint(PaintTarget::Fill), Some(Rgba::GREEN));
}

#[test]
fn test_load_replaces_model_and_history() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("one.json");

    let mut source = DesignerState::new();
    draw(&mut source, DrawingTool::Rectangle, (0.0, 0.0), (10.0, 10.0));
    source.save_to_file(&path).unwrap();

    let mut state = populated();
    assert!(state.can_undo());
    assert!(!state.selected_ids().is_empty());

    let outcome = state.load_from_file(&path).unwrap();
    assert_eq!(outcome.loaded, 1);
    assert_eq!(state.store.len(), 1);
    assert!(!state.can_undo());
    assert!(state.selected_ids().is_empty());
}

#[test]
fn test_failed_load_keeps_model() {
    let dir = TempDir::new().unwrap();
    let mut state = populated();
    let depth = state.undo_depth();

    let err = state
        .load_from_file(dir.path().join("missing.json"))
        .unwrap_err();
    assert!(err.to_string().contains("failed to load design"));
    assert_eq!(state.store.len(), 4);
    assert_eq!(state.undo_depth(), depth);

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, b"{ not a drawing").unwrap();
    assert!(state.load_from_file(&garbage).is_err());
    assert_eq!(state.store.len(), 4);
}

#[test]
fn test_partial_load_reports_skipped_records() {
    let good = ShapeData::from_shape(&StyledShape::from(Shape::Rectangle(
        DesignRectangle::new(0.0, 0.0, 5.0, 5.0),
    )));
    let bad = ShapeData {
        shape_type: "star".to_string(),
        ..good.clone()
    };
    let mut file = DrawingFile::new("partial");
    file.shapes = vec![bad, good];

    let path = Path::new("partial.json");
    let mut channel = MemoryChannel::new();
    channel.insert(path, file.to_bytes().unwrap());

    let mut state = DesignerState::new();
    let outcome = state.load_with(&mut channel, path).unwrap();
    assert_eq!(outcome.loaded, 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].index, 0);
    assert_eq!(outcome.skipped[0].shape_type, "star");
    assert_eq!(state.store.len(), 1);
}

#[test]
fn test_save_with_memory_channel() {
    let mut state = populated();
    let mut channel = MemoryChannel::new();
    let path = Path::new("mem/plan.json");

    state.save_with(&mut channel, path).unwrap();
    let file = DrawingFile::from_bytes(channel.get(path).unwrap()).unwrap();
    assert_eq!(file.metadata.name, "floor plan");
    assert_eq!(file.shapes.len(), 4);
    assert_eq!(file.shapes[3].text.as_deref(), Some("Kitchen"));
}
