use sketchkit_core::CommandError;
use sketchkit_designer::{
    Clipboard, CommandInvoker, DesignRectangle, DesignerShape, EditContext, MoveShapes,
    PasteShapes, SelectionManager, Shape, ShapeStore, StyledShape,
};

fn setup() -> (ShapeStore, SelectionManager, Clipboard) {
    let mut store = ShapeStore::new();
    store.push(StyledShape::from(Shape::Rectangle(DesignRectangle::new(
        0.0, 0.0, 10.0, 10.0,
    ))));
    (store, SelectionManager::new(), Clipboard::new())
}

#[test]
fn test_undo_on_empty_stack() {
    let (mut store, mut selection, mut clipboard) = setup();
    let mut ctx = EditContext {
        store: &mut store,
        selection: &mut selection,
        clipboard: &mut clipboard,
    };
    let mut invoker = CommandInvoker::new();
    assert!(!invoker.can_undo());
    assert_eq!(invoker.undo(&mut ctx), Ok(false));
    assert_eq!(invoker.last_name(), None);
}

#[test]
fn test_failed_command_is_not_recorded() {
    let (mut store, mut selection, mut clipboard) = setup();
    let mut ctx = EditContext {
        store: &mut store,
        selection: &mut selection,
        clipboard: &mut clipboard,
    };
    let mut invoker = CommandInvoker::new();

    let err = invoker
        .execute(Box::new(PasteShapes::new(0.0, 0.0)), &mut ctx)
        .unwrap_err();
    assert_eq!(err, CommandError::EmptyClipboard);
    assert_eq!(invoker.depth(), 0);
}

#[test]
fn test_undo_is_lifo() {
    let (mut store, mut selection, mut clipboard) = setup();
    let id = store.ids()[0];
    let mut invoker = CommandInvoker::new();

    for step in 1..=3 {
        let cmd = MoveShapes::new(&store, &[id], 10.0, 0.0);
        let mut ctx = EditContext {
            store: &mut store,
            selection: &mut selection,
            clipboard: &mut clipboard,
        };
        invoker.execute(Box::new(cmd), &mut ctx).unwrap();
        assert_eq!(invoker.depth(), step);
    }
    assert_eq!(invoker.history(), vec!["Move", "Move", "Move"]);
    assert_eq!(store.get(id).unwrap().x(), 30.0);

    let mut ctx = EditContext {
        store: &mut store,
        selection: &mut selection,
        clipboard: &mut clipboard,
    };
    assert_eq!(invoker.undo(&mut ctx), Ok(true));
    assert_eq!(ctx.store.get(id).unwrap().x(), 20.0);
    assert_eq!(invoker.undo(&mut ctx), Ok(true));
    assert_eq!(invoker.undo(&mut ctx), Ok(true));
    assert_eq!(ctx.store.get(id).unwrap().x(), 0.0);
    assert_eq!(invoker.undo(&mut ctx), Ok(false));
}

#[test]
fn test_clear_drops_history() {
    let (mut store, mut selection, mut clipboard) = setup();
    let id = store.ids()[0];
    let cmd = MoveShapes::new(&store, &[id], 1.0, 1.0);
    let mut ctx = EditContext {
        store: &mut store,
        selection: &mut selection,
        clipboard: &mut clipboard,
    };
    let mut invoker = CommandInvoker::new();
    invoker.execute(Box::new(cmd), &mut ctx).unwrap();
    assert_eq!(invoker.last_name(), Some("Move"));

    invoker.clear();
    assert!(!invoker.can_undo());
    assert_eq!(invoker.undo(&mut ctx), Ok(false));
    // the change itself stays applied
    assert_eq!(ctx.store.get(id).unwrap().x(), 1.0);
}
